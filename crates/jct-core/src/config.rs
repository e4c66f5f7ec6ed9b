//! Configuration types for jct.
//!
//! This module provides configuration for in-memory filesystems and for the
//! directory walks performed when listing packages.
//!
//! # Examples
//!
//! ```
//! use jct_core::{JctConfig, TempFsConfig};
//!
//! // Use default configuration
//! let config = JctConfig::default();
//! assert!(config.temp_fs.close_on_drop);
//! assert!(!config.walk.follow_links);
//!
//! // Create custom configuration
//! let custom = TempFsConfig {
//!     close_on_drop: false,
//!     ..Default::default()
//! };
//! assert_eq!(custom.line_separator, "\n");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration, loadable from TOML.
///
/// # Examples
///
/// ```
/// use jct_core::JctConfig;
///
/// let config = JctConfig::from_toml_str(r#"
///     [temp_fs]
///     close_on_drop = false
///
///     [walk]
///     follow_links = true
/// "#).unwrap();
///
/// assert!(!config.temp_fs.close_on_drop);
/// assert!(config.walk.follow_links);
/// assert_eq!(config.temp_fs.line_separator, "\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JctConfig {
    /// Settings for in-memory filesystems.
    pub temp_fs: TempFsConfig,

    /// Settings for package directory walks.
    pub walk: WalkConfig,
}

impl JctConfig {
    /// Parses and validates configuration from a TOML document.
    ///
    /// Missing tables and keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the document is not valid TOML, has
    /// fields of the wrong type, or fails [`JctConfig::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| Error::ConfigError {
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.temp_fs.validate()?;
        self.walk.validate()
    }
}

/// Configuration for in-memory filesystems.
///
/// # Examples
///
/// ```
/// use jct_core::TempFsConfig;
///
/// let config = TempFsConfig::builder()
///     .close_on_drop(false)
///     .export_prefix("jct-debug")
///     .build();
///
/// assert!(!config.close_on_drop);
/// assert_eq!(config.export_prefix.as_deref(), Some("jct-debug"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TempFsConfig {
    /// Close the filesystem once the last handle to it is dropped.
    ///
    /// When `false`, the filesystem stays open until `close()` is called
    /// explicitly.
    /// Default: true
    pub close_on_drop: bool,

    /// Separator placed between lines when creating text files.
    ///
    /// Default: `"\n"`
    pub line_separator: String,

    /// Prefix for temporary directories created by exports.
    ///
    /// If `None`, the filesystem name is used.
    /// Default: None
    pub export_prefix: Option<String>,
}

impl Default for TempFsConfig {
    fn default() -> Self {
        Self {
            close_on_drop: true,
            line_separator: "\n".to_string(),
            export_prefix: None,
        }
    }
}

impl TempFsConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> TempFsConfigBuilder {
        TempFsConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The line separator is empty
    /// - The export prefix is empty or contains a path separator
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_core::TempFsConfig;
    ///
    /// assert!(TempFsConfig::default().validate().is_ok());
    ///
    /// let mut invalid = TempFsConfig::default();
    /// invalid.line_separator.clear();
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.line_separator.is_empty() {
            return Err(Error::ConfigError {
                message: "Line separator cannot be empty".to_string(),
            });
        }

        if let Some(prefix) = &self.export_prefix
            && (prefix.is_empty() || prefix.contains(['/', '\\']))
        {
            return Err(Error::ConfigError {
                message: format!("Export prefix must be a plain file name (got '{prefix}')"),
            });
        }

        Ok(())
    }
}

/// Builder for [`TempFsConfig`].
#[derive(Debug, Clone, Default)]
pub struct TempFsConfigBuilder {
    config: TempFsConfig,
}

impl TempFsConfigBuilder {
    /// Creates a builder starting from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the filesystem closes when its last handle is dropped.
    #[must_use]
    pub const fn close_on_drop(mut self, close: bool) -> Self {
        self.config.close_on_drop = close;
        self
    }

    /// Sets the separator used between lines of text files.
    #[must_use]
    pub fn line_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.line_separator = separator.into();
        self
    }

    /// Sets the prefix for exported temporary directories.
    #[must_use]
    pub fn export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.export_prefix = Some(prefix.into());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> TempFsConfig {
        self.config
    }
}

/// Configuration for walking package directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Follow symbolic links on the host filesystem.
    ///
    /// Default: false
    pub follow_links: bool,

    /// Maximum number of directory handles held open during a host walk.
    ///
    /// Default: 10
    pub max_open: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_open: 10,
        }
    }
}

impl WalkConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_open` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_open == 0 {
            return Err(Error::ConfigError {
                message: "Walk max_open must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(JctConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = TempFsConfig::builder()
            .close_on_drop(false)
            .line_separator("\r\n")
            .build();
        assert!(!config.close_on_drop);
        assert_eq!(config.line_separator, "\r\n");
        assert!(config.export_prefix.is_none());
    }

    #[test]
    fn test_export_prefix_with_separator_is_invalid() {
        let config = TempFsConfig::builder().export_prefix("a/b").build();
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_zero_max_open_is_invalid() {
        let config = WalkConfig {
            max_open: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_empty_document() {
        let config = JctConfig::from_toml_str("").unwrap();
        assert_eq!(config, JctConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let err = JctConfig::from_toml_str("[walk]\nmax_open = 0\n").unwrap_err();
        assert!(err.is_config_error());

        let err = JctConfig::from_toml_str("[temp_fs]\nclose_on_drop = \"yes\"\n").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_toml_round_trip_of_custom_settings() {
        let config = JctConfig {
            temp_fs: TempFsConfig::builder().export_prefix("dump").build(),
            walk: WalkConfig {
                follow_links: true,
                max_open: 4,
            },
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(JctConfig::from_toml_str(&text).unwrap(), config);
    }
}
