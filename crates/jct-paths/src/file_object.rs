//! File objects handed to the compiler.

use jct_core::{FsPath, Kind, Location, Result};
use std::fmt;

/// A resolved file paired with the name it was requested by.
///
/// The given name is kept verbatim, since callers compare it against what
/// they asked for: a class name for class lookups, a package-relative name
/// for resource lookups, or the path itself for listed files.
///
/// # Examples
///
/// ```
/// use jct_core::{FsPath, Kind, StandardLocation};
/// use jct_paths::PathFileObject;
///
/// let file = PathFileObject::new(
///     StandardLocation::SourcePath.into(),
///     FsPath::host("/src/com/example/Foo.java"),
///     "com.example.Foo",
/// );
///
/// assert_eq!(file.kind(), Kind::Source);
/// assert_eq!(file.given_name(), "com.example.Foo");
/// assert!(file.is_name_compatible("Foo", Kind::Source));
/// assert!(!file.is_name_compatible("Foo", Kind::Class));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathFileObject {
    location: Location,
    path: FsPath,
    given_name: String,
    kind: Kind,
}

impl PathFileObject {
    /// Creates a file object, inferring the kind from the file name.
    #[must_use]
    pub fn new(location: Location, path: FsPath, given_name: impl Into<String>) -> Self {
        let kind = Kind::from_file_name(path.file_name().unwrap_or_default());
        Self {
            location,
            path,
            given_name: given_name.into(),
            kind,
        }
    }

    /// Returns the location the file was resolved in.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the concrete path.
    #[must_use]
    pub const fn path(&self) -> &FsPath {
        &self.path
    }

    /// Returns the name the file was requested by.
    #[must_use]
    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    /// Returns the kind inferred from the file name.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the URI of the concrete path.
    #[must_use]
    pub fn uri(&self) -> String {
        self.path.uri()
    }

    /// Returns `true` if this file is `simple_name` plus the extension of
    /// `kind`, and has that kind.
    #[must_use]
    pub fn is_name_compatible(&self, simple_name: &str, kind: Kind) -> bool {
        self.kind == kind
            && self
                .path
                .file_name()
                .and_then(|name| name.strip_suffix(kind.extension()))
                .is_some_and(|stem| stem == simple_name)
    }

    /// Returns `true` if the file currently exists as a regular file.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the file's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::Io`] if the file cannot be read.
    pub fn read(&self) -> Result<Vec<u8>> {
        self.path.read()
    }

    /// Reads the file as UTF-8, replacing invalid sequences.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::Io`] if the file cannot be read.
    pub fn read_to_string(&self) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.read()?).into_owned())
    }

    /// Writes the file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::Io`] if the file cannot be written.
    pub fn write(&self, content: &[u8]) -> Result<()> {
        self.path.write(content)
    }
}

impl fmt::Display for PathFileObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.given_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jct_core::StandardLocation;
    use jct_memfs::TemporaryFileSystem;

    #[test]
    fn test_kind_inference() {
        let location: Location = StandardLocation::ClassOutput.into();
        let class = PathFileObject::new(location.clone(), FsPath::host("/o/A.class"), "A");
        let other = PathFileObject::new(location, FsPath::host("/o/notes.txt"), "notes.txt");
        assert_eq!(class.kind(), Kind::Class);
        assert_eq!(other.kind(), Kind::Other);
        assert!(other.is_name_compatible("notes.txt", Kind::Other));
    }

    #[test]
    fn test_write_then_read() {
        let fs = TemporaryFileSystem::named("out").unwrap();
        let file = PathFileObject::new(
            StandardLocation::SourceOutput.into(),
            fs.path().join("gen/Gen.java"),
            "gen.Gen",
        );
        assert!(!file.exists());
        file.write(b"class Gen {}").unwrap();
        assert!(file.exists());
        assert_eq!(file.read_to_string().unwrap(), "class Gen {}");
        assert_eq!(file.to_string(), "gen.Gen");
    }
}
