//! Paths bound to a filesystem instance.

use crate::traits::{DirEntry, FileSystem, Metadata};
use crate::{Error, HostFs, Result, WalkConfig};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Lexically normalizes a path.
///
/// Removes `.` components and resolves `..` against the preceding
/// component. A `..` directly below the root is dropped, so the result never
/// climbs above `/`. No filesystem access takes place.
///
/// # Examples
///
/// ```
/// use jct_core::normalize;
/// use std::path::Path;
///
/// assert_eq!(normalize(Path::new("/work/./a/../b")), Path::new("/work/b"));
/// assert_eq!(normalize(Path::new("/../etc")), Path::new("/etc"));
/// assert_eq!(normalize(Path::new("a/../../b")), Path::new("../b"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// An absolute, normalized path on a specific [`FileSystem`].
///
/// Equality and hashing use the filesystem id and the path, so the same
/// path string on two in-memory filesystems names two different files.
///
/// # Examples
///
/// ```
/// use jct_core::FsPath;
///
/// let root = FsPath::host("/work");
/// let file = root.join("com/example/../example/Foo.java");
///
/// assert_eq!(file.path().to_str(), Some("/work/com/example/Foo.java"));
/// assert!(file.starts_with(&root));
/// assert_eq!(file.file_name(), Some("Foo.java"));
/// ```
#[derive(Clone)]
pub struct FsPath {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FsPath {
    /// Binds `path` to `fs`, making it absolute and normalizing it.
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        let path = normalize(&fs.absolutize(path.as_ref()));
        Self { fs, path }
    }

    /// Binds `path` to the host filesystem.
    pub fn host(path: impl AsRef<Path>) -> Self {
        Self::new(HostFs::shared(), path)
    }

    /// Returns the filesystem this path lives on.
    #[must_use]
    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Returns the absolute path within the filesystem.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if `other` lives on the same filesystem instance.
    #[must_use]
    pub fn same_fs(&self, other: &Self) -> bool {
        self.fs.id() == other.fs.id()
    }

    /// Appends `relative` and normalizes the result.
    ///
    /// A leading `/` on `relative` is ignored.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> Self {
        let relative = relative.as_ref();
        let relative = relative.strip_prefix("/").unwrap_or(relative);
        Self {
            fs: Arc::clone(&self.fs),
            path: normalize(&self.path.join(relative)),
        }
    }

    /// Returns the parent directory, or `None` at the filesystem root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.path.parent().map(|parent| Self {
            fs: Arc::clone(&self.fs),
            path: parent.to_path_buf(),
        })
    }

    /// Returns the final component as UTF-8, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Returns `true` if this path is `base` or lies beneath it on the same
    /// filesystem. Comparison is component-wise.
    #[must_use]
    pub fn starts_with(&self, base: &Self) -> bool {
        self.same_fs(base) && self.path.starts_with(&base.path)
    }

    /// Returns this path relative to `base`, or `None` if it is not beneath
    /// `base` on the same filesystem.
    #[must_use]
    pub fn strip_prefix(&self, base: &Self) -> Option<&Path> {
        if !self.same_fs(base) {
            return None;
        }
        self.path.strip_prefix(&base.path).ok()
    }

    /// Returns the URI identifying this path.
    #[must_use]
    pub fn uri(&self) -> String {
        self.fs.uri(&self.path)
    }

    /// Returns `true` if this path is an existing regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.fs.is_file(&self.path)
    }

    /// Returns `true` if this path is an existing directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.fs.is_dir(&self.path)
    }

    /// Returns `true` if anything exists at this path.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Returns the metadata of this path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path does not exist or cannot be read.
    pub fn metadata(&self) -> Result<Metadata> {
        self.fs
            .metadata(&self.path)
            .map_err(|e| Error::io(format!("reading metadata of {self}"), e))
    }

    /// Reads the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn read(&self) -> Result<Vec<u8>> {
        self.fs
            .read(&self.path)
            .map_err(|e| Error::io(format!("reading {self}"), e))
    }

    /// Writes the whole file, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory cannot be created or the file
    /// cannot be written.
    pub fn write(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.parent() {
            parent.create_dir_all()?;
        }
        self.fs
            .write(&self.path, data)
            .map_err(|e| Error::io(format!("writing {self}"), e))
    }

    /// Creates this directory and every missing parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory cannot be created.
    pub fn create_dir_all(&self) -> Result<()> {
        self.fs
            .create_dir_all(&self.path)
            .map_err(|e| Error::io(format!("creating directory {self}"), e))
    }

    /// Lists the direct children of this directory in file name order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be listed.
    pub fn read_dir(&self) -> Result<Vec<Self>> {
        let entries = self
            .fs
            .read_dir(&self.path)
            .map_err(|e| Error::io(format!("listing {self}"), e))?;
        Ok(entries.into_iter().map(|e| self.rebind(e.path)).collect())
    }

    /// Walks the tree below this directory.
    ///
    /// See [`FileSystem::walk`] for ordering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if any directory cannot be listed.
    pub fn walk(&self, max_depth: Option<usize>, config: &WalkConfig) -> Result<Vec<DirEntry>> {
        self.fs
            .walk(&self.path, max_depth, config)
            .map_err(|e| Error::io(format!("walking {self}"), e))
    }

    /// Binds another path on the same filesystem.
    #[must_use]
    pub fn rebind(&self, path: impl AsRef<Path>) -> Self {
        Self::new(Arc::clone(&self.fs), path)
    }
}

impl PartialEq for FsPath {
    fn eq(&self, other: &Self) -> bool {
        self.same_fs(other) && self.path == other.path
    }
}

impl Eq for FsPath {}

impl Hash for FsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fs.id().hash(state);
        self.path.hash(state);
    }
}

impl fmt::Debug for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsPath")
            .field("fs", &self.fs.id())
            .field("path", &self.path)
            .finish()
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<&Path> for FsPath {
    fn from(path: &Path) -> Self {
        Self::host(path)
    }
}

impl From<PathBuf> for FsPath {
    fn from(path: PathBuf) -> Self {
        Self::host(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_handles_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), Path::new("/a/c"));
        assert_eq!(normalize(Path::new("/a/b/../../..")), Path::new("/"));
        assert_eq!(normalize(Path::new("a/b/../..")), Path::new(""));
        assert_eq!(normalize(Path::new("../x")), Path::new("../x"));
    }

    #[test]
    fn test_join_ignores_leading_slash() {
        let root = FsPath::host("/work");
        assert_eq!(root.join("/etc/passwd").path(), Path::new("/work/etc/passwd"));
        assert_eq!(root.join("").path(), Path::new("/work"));
    }

    #[test]
    fn test_parent_and_file_name() {
        let path = FsPath::host("/work/Foo.java");
        assert_eq!(path.file_name(), Some("Foo.java"));
        assert_eq!(path.parent().unwrap().path(), Path::new("/work"));
        assert!(FsPath::host("/").parent().is_none());
    }

    #[test]
    fn test_starts_with_is_component_wise() {
        let root = FsPath::host("/work");
        assert!(FsPath::host("/work/a").starts_with(&root));
        assert!(FsPath::host("/work").starts_with(&root));
        assert!(!FsPath::host("/workshop/a").starts_with(&root));
    }

    #[test]
    fn test_strip_prefix() {
        let root = FsPath::host("/work");
        let file = FsPath::host("/work/com/example/Foo.class");
        assert_eq!(
            file.strip_prefix(&root),
            Some(Path::new("com/example/Foo.class"))
        );
        assert!(root.strip_prefix(&file).is_none());
    }

    #[test]
    fn test_equality_and_hash() {
        let a = FsPath::host("/work/./a");
        let b = FsPath::from(PathBuf::from("/work/a"));
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_host_uri() {
        assert_eq!(FsPath::host("/tmp/x").uri(), "file:///tmp/x");
    }

    #[test]
    fn test_read_missing_is_io_not_found() {
        let err = FsPath::host("/definitely/not/here/Foo.java")
            .read()
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }
}
