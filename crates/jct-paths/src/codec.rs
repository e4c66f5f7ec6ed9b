//! Conversions between package/class names and relative paths.
//!
//! Package `com.example` maps to `com/example`; class `com.example.Foo` of
//! kind [`Kind::Source`] maps to `com/example/Foo.java`. The reverse
//! direction strips the kind's extension and joins components with `.`.
//!
//! # Examples
//!
//! ```
//! use jct_core::Kind;
//! use jct_paths::codec;
//! use std::path::Path;
//!
//! let path = codec::class_to_relative("com.example.Foo", Kind::Class).unwrap();
//! assert_eq!(path, Path::new("com/example/Foo.class"));
//! assert_eq!(codec::binary_name(&path, Kind::Class), "com.example.Foo");
//! ```

use jct_core::{Error, Kind, Result};
use std::path::{Component, Path, PathBuf};

fn check_dotted(name: &str, what: &str) -> Result<()> {
    if name.starts_with('/') {
        return Err(Error::invalid_argument(format!(
            "Absolute paths are not supported (got '{name}')"
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(Error::invalid_argument(format!(
            "Expected a dotted {what} name (got '{name}')"
        )));
    }
    if name.split('.').any(str::is_empty) {
        return Err(Error::invalid_argument(format!(
            "{what} name has an empty segment (got '{name}')"
        )));
    }
    Ok(())
}

/// Converts a package name to a path relative to a root.
///
/// The empty package maps to the empty path, i.e. the root itself.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for names that start with `/`,
/// contain path separators, or have empty segments.
///
/// # Examples
///
/// ```
/// use jct_paths::codec;
/// use std::path::Path;
///
/// assert_eq!(codec::package_to_relative("com.example").unwrap(), Path::new("com/example"));
/// assert_eq!(codec::package_to_relative("").unwrap(), Path::new(""));
/// assert!(codec::package_to_relative("com..example").is_err());
/// ```
pub fn package_to_relative(package_name: &str) -> Result<PathBuf> {
    if package_name.is_empty() {
        return Ok(PathBuf::new());
    }
    check_dotted(package_name, "package")?;
    Ok(package_name.split('.').collect())
}

/// Converts a class binary name to a relative file path with the kind's
/// extension appended to the last segment.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for empty names and for the same
/// malformed inputs as [`package_to_relative`].
pub fn class_to_relative(class_name: &str, kind: Kind) -> Result<PathBuf> {
    if class_name.is_empty() {
        return Err(Error::invalid_argument("Class name must not be empty"));
    }
    check_dotted(class_name, "class")?;

    let mut path: PathBuf = class_name.split('.').collect();
    if let Some(last) = path.file_name().and_then(|n| n.to_str()) {
        let file_name = format!("{last}{}", kind.extension());
        path.set_file_name(file_name);
    }
    Ok(path)
}

/// Checks a file name given relative to a package directory.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `relative_name` is absolute,
/// contains `..` components, or is empty once `.` components are removed.
pub fn check_relative_name(relative_name: &str) -> Result<()> {
    let path = Path::new(relative_name);
    if path.has_root() {
        return Err(Error::invalid_argument(format!(
            "Absolute paths are not supported (got '{relative_name}')"
        )));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(Error::invalid_argument(format!(
            "Relative name must not leave its package (got '{relative_name}')"
        )));
    }
    if !path.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(Error::invalid_argument(format!(
            "Relative name must name a file (got '{relative_name}')"
        )));
    }
    Ok(())
}

/// Converts a path relative to a root back to a binary name.
///
/// The extension of `kind` is removed from the final component when
/// present; separators become `.`.
#[must_use]
pub fn binary_name(relative: &Path, kind: Kind) -> String {
    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".");

    joined
        .strip_suffix(kind.extension())
        .map_or_else(|| joined.clone(), str::to_string)
}
