//! Error types for the jct virtual path manager.
//!
//! Absence (a file, package or class that does not exist) is never an error:
//! lookups return `Ok(None)` or an empty collection instead. The variants here
//! cover the remaining categories:
//!
//! - invalid input, raised synchronously by the call that received it;
//! - unsupported operations, a capability gap rather than bad data;
//! - I/O failures from the underlying storage, with the cause preserved.
//!
//! # Examples
//!
//! ```
//! use jct_core::{Error, Result};
//!
//! fn relative_only(name: &str) -> Result<&str> {
//!     if name.starts_with('/') {
//!         return Err(Error::invalid_argument(format!(
//!             "Absolute paths are not supported (got '{name}')"
//!         )));
//!     }
//!     Ok(name)
//! }
//!
//! let err = relative_only("/etc/passwd").unwrap_err();
//! assert!(err.is_invalid_argument());
//! ```

use std::io;
use thiserror::Error;

/// Main error type for jct.
///
/// All errors in the workspace use this type, providing consistent error
/// handling across the core, in-memory filesystem and path manager crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument error.
    ///
    /// Raised when an identity string is malformed, such as an absolute
    /// relative-name, an empty class name or an invalid filesystem name.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was wrong with the argument
        message: String,
    },

    /// Unsupported operation error.
    ///
    /// Raised when the requested operation is not available for the given
    /// target, such as service loading scoped to a single module.
    #[error("Unsupported operation: {operation}")]
    Unsupported {
        /// Description of the unsupported operation
        operation: String,
    },

    /// I/O failure in the underlying storage.
    ///
    /// Wraps errors from the host filesystem or an in-memory filesystem
    /// during copies, walks and reads.
    #[error("I/O error while {context}")]
    Io {
        /// What was being done when the failure occurred
        context: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid or cannot be parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_core::Error;
    ///
    /// let err = Error::invalid_argument("class name must not be empty");
    /// assert_eq!(err.to_string(), "Invalid argument: class name must not be empty");
    /// ```
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an [`Error::Unsupported`].
    #[must_use]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Creates an [`Error::Io`] with a description of the failed operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_core::Error;
    /// use std::io;
    ///
    /// let err = Error::io(
    ///     "reading /work/Foo.java",
    ///     io::Error::new(io::ErrorKind::NotFound, "missing"),
    /// );
    /// assert!(err.is_io());
    /// assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    /// ```
    #[must_use]
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` if this is an unsupported operation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_core::Error;
    ///
    /// let err = Error::unsupported("Cannot load services from specific modules");
    /// assert!(err.is_unsupported());
    /// assert!(!err.is_io());
    /// ```
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns the kind of the wrapped I/O error, if this is an I/O error.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Type alias for jct operation results.
///
/// # Examples
///
/// ```
/// use jct_core::{Result, ModulePrefix};
///
/// fn module_of(name: &str) -> Result<Option<String>> {
///     Ok(ModulePrefix::try_extract(name)?.map(|p| p.module_name().to_string()))
/// }
///
/// assert_eq!(module_of("java.base/java.lang.Integer").unwrap().as_deref(), Some("java.base"));
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("bad name");
        assert_eq!(err.to_string(), "Invalid argument: bad name");
        assert!(err.is_invalid_argument());
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_display() {
        let err = Error::unsupported("loading services");
        assert_eq!(err.to_string(), "Unsupported operation: loading services");
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_io_preserves_source() {
        let err = Error::io(
            "walking /work",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error while walking /work");
        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_kind_none_for_other_variants() {
        assert!(Error::invalid_argument("x").io_kind().is_none());
        assert!(
            Error::ConfigError {
                message: "x".to_string()
            }
            .io_kind()
            .is_none()
        );
    }

    #[test]
    fn test_config_error_classification() {
        let err = Error::ConfigError {
            message: "line separator must not be empty".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_io());
    }
}
