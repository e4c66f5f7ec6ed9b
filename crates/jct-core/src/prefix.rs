//! Module prefixes on binary names.
//!
//! Names such as `java.base/java.lang.Integer` carry the module they belong
//! to before the first `/`.

use crate::{Error, Result};

/// A module name split off the front of a binary name.
///
/// # Examples
///
/// ```
/// use jct_core::ModulePrefix;
///
/// let prefix = ModulePrefix::try_extract("net.bytebuddy/net.bytebuddy.ByteBuddy")
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(prefix.module_name(), "net.bytebuddy");
/// assert_eq!(prefix.rest(), "net.bytebuddy.ByteBuddy");
/// assert_eq!(prefix.original(), "net.bytebuddy/net.bytebuddy.ByteBuddy");
///
/// assert!(ModulePrefix::try_extract("org.example.HelloWorld").unwrap().is_none());
/// assert!(ModulePrefix::try_extract("/foo").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModulePrefix {
    original: String,
    module_name: String,
    rest: String,
}

impl ModulePrefix {
    /// Extracts the module prefix from `original`, if it has one.
    ///
    /// Returns `Ok(None)` when no `/` is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `original` starts with `/`.
    pub fn try_extract(original: &str) -> Result<Option<Self>> {
        if original.starts_with('/') {
            return Err(Error::invalid_argument(format!(
                "Absolute paths are not supported (got '{original}')"
            )));
        }

        Ok(original.split_once('/').map(|(module_name, rest)| Self {
            original: original.to_string(),
            module_name: module_name.to_string(),
            rest: rest.to_string(),
        }))
    }

    /// Returns the full input this prefix was extracted from.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns everything after the first `/`.
    #[must_use]
    pub fn rest(&self) -> &str {
        &self.rest
    }
}
