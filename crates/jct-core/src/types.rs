//! Compiler vocabulary: locations and file kinds.
//!
//! A [`Location`] names a bucket the compiler reads from or writes to, such as
//! "where sources live" or "where classes are written". A [`Kind`] tags the
//! role of a file and carries its canonical extension.
//!
//! # Examples
//!
//! ```
//! use jct_core::{Kind, Location, StandardLocation};
//!
//! let output = Location::from(StandardLocation::ClassOutput);
//! assert!(output.is_output_location());
//! assert!(!output.is_module_oriented_location());
//!
//! assert_eq!(Kind::Source.extension(), ".java");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The standard locations known to the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StandardLocation {
    /// Where compiled classes are written.
    ClassOutput,
    /// Where generated sources are written.
    SourceOutput,
    /// User class path.
    ClassPath,
    /// User source path.
    SourcePath,
    /// Path to search for annotation processors.
    AnnotationProcessorPath,
    /// Module path to search for annotation processors.
    AnnotationProcessorModulePath,
    /// Platform class path.
    PlatformClassPath,
    /// Where native headers are written.
    NativeHeaderOutput,
    /// Sources of modules being compiled.
    ModuleSourcePath,
    /// Upgradeable platform modules.
    UpgradeModulePath,
    /// System modules.
    SystemModules,
    /// User module path.
    ModulePath,
    /// Module patches.
    PatchModulePath,
}

impl StandardLocation {
    /// Every standard location, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::ClassOutput,
        Self::SourceOutput,
        Self::ClassPath,
        Self::SourcePath,
        Self::AnnotationProcessorPath,
        Self::AnnotationProcessorModulePath,
        Self::PlatformClassPath,
        Self::NativeHeaderOutput,
        Self::ModuleSourcePath,
        Self::UpgradeModulePath,
        Self::SystemModules,
        Self::ModulePath,
        Self::PatchModulePath,
    ];

    /// Returns the canonical name, e.g. `CLASS_OUTPUT`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClassOutput => "CLASS_OUTPUT",
            Self::SourceOutput => "SOURCE_OUTPUT",
            Self::ClassPath => "CLASS_PATH",
            Self::SourcePath => "SOURCE_PATH",
            Self::AnnotationProcessorPath => "ANNOTATION_PROCESSOR_PATH",
            Self::AnnotationProcessorModulePath => "ANNOTATION_PROCESSOR_MODULE_PATH",
            Self::PlatformClassPath => "PLATFORM_CLASS_PATH",
            Self::NativeHeaderOutput => "NATIVE_HEADER_OUTPUT",
            Self::ModuleSourcePath => "MODULE_SOURCE_PATH",
            Self::UpgradeModulePath => "UPGRADE_MODULE_PATH",
            Self::SystemModules => "SYSTEM_MODULES",
            Self::ModulePath => "MODULE_PATH",
            Self::PatchModulePath => "PATCH_MODULE_PATH",
        }
    }

    /// Looks up a standard location by its canonical name.
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_core::StandardLocation;
    ///
    /// assert_eq!(
    ///     StandardLocation::from_name("MODULE_PATH"),
    ///     Some(StandardLocation::ModulePath)
    /// );
    /// assert_eq!(StandardLocation::from_name("module_path"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|location| location.name() == name)
    }

    /// Returns `true` if the compiler writes to this location.
    #[must_use]
    pub const fn is_output_location(self) -> bool {
        matches!(
            self,
            Self::ClassOutput | Self::SourceOutput | Self::NativeHeaderOutput
        )
    }

    /// Returns `true` if this location holds modules rather than packages.
    #[must_use]
    pub const fn is_module_oriented_location(self) -> bool {
        matches!(
            self,
            Self::AnnotationProcessorModulePath
                | Self::ModuleSourcePath
                | Self::UpgradeModulePath
                | Self::SystemModules
                | Self::ModulePath
                | Self::PatchModulePath
        )
    }
}

impl fmt::Display for StandardLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One specific module inside a module-oriented location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleLocation {
    parent: Box<Location>,
    module_name: String,
}

impl ModuleLocation {
    /// Returns the location the module lives in.
    #[must_use]
    pub fn parent(&self) -> &Location {
        &self.parent
    }

    /// Returns the module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }
}

/// A location defined outside of the standard set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomLocation {
    name: String,
    output: bool,
    module_oriented: bool,
}

/// Opaque identity of a compilation location.
///
/// # Examples
///
/// ```
/// use jct_core::{Location, StandardLocation};
///
/// let module = Location::module(StandardLocation::ModulePath, "org.example");
/// assert!(module.is_module_location());
/// assert!(!module.is_module_oriented_location());
/// assert_eq!(module.name(), "MODULE_PATH[org.example]");
///
/// let custom = Location::custom("GENERATED_TESTS", true, false);
/// assert!(custom.is_output_location());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// One of the standard compiler locations.
    Standard(StandardLocation),
    /// A specific module within a module-oriented location.
    Module(ModuleLocation),
    /// A user-defined location.
    Custom(CustomLocation),
}

impl Location {
    /// Creates a location for a specific module inside `parent`.
    #[must_use]
    pub fn module(parent: impl Into<Self>, module_name: impl Into<String>) -> Self {
        Self::Module(ModuleLocation {
            parent: Box::new(parent.into()),
            module_name: module_name.into(),
        })
    }

    /// Creates a user-defined location.
    #[must_use]
    pub fn custom(name: impl Into<String>, output: bool, module_oriented: bool) -> Self {
        Self::Custom(CustomLocation {
            name: name.into(),
            output,
            module_oriented,
        })
    }

    /// Returns the name of the location.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Standard(location) => location.name().to_string(),
            Self::Module(module) => format!("{}[{}]", module.parent.name(), module.module_name),
            Self::Custom(custom) => custom.name.clone(),
        }
    }

    /// Returns `true` if the compiler writes to this location.
    #[must_use]
    pub fn is_output_location(&self) -> bool {
        match self {
            Self::Standard(location) => location.is_output_location(),
            Self::Module(module) => module.parent.is_output_location(),
            Self::Custom(custom) => custom.output,
        }
    }

    /// Returns `true` if this location holds modules rather than packages.
    ///
    /// A [`Location::Module`] is never module-oriented itself: it already
    /// names one resolved module.
    #[must_use]
    pub const fn is_module_oriented_location(&self) -> bool {
        match self {
            Self::Standard(location) => location.is_module_oriented_location(),
            Self::Module(_) => false,
            Self::Custom(custom) => custom.module_oriented,
        }
    }

    /// Returns `true` if this location represents one specific module.
    #[must_use]
    pub const fn is_module_location(&self) -> bool {
        matches!(self, Self::Module(_))
    }

    /// Returns the module details if this is a module location.
    #[must_use]
    pub const fn as_module(&self) -> Option<&ModuleLocation> {
        match self {
            Self::Module(module) => Some(module),
            _ => None,
        }
    }
}

impl From<StandardLocation> for Location {
    fn from(location: StandardLocation) -> Self {
        Self::Standard(location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// The role of a file, paired with its canonical extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Source file (`.java`).
    Source,
    /// Compiled class file (`.class`).
    Class,
    /// Documentation page (`.html`).
    Html,
    /// Anything else. Has an empty extension, so it matches every file name.
    Other,
}

impl Kind {
    /// Every kind, most specific first.
    pub const ALL: [Self; 4] = [Self::Source, Self::Class, Self::Html, Self::Other];

    /// Returns the canonical extension including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Source => ".java",
            Self::Class => ".class",
            Self::Html => ".html",
            Self::Other => "",
        }
    }

    /// Infers the kind from a file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_core::Kind;
    ///
    /// assert_eq!(Kind::from_file_name("Foo.class"), Kind::Class);
    /// assert_eq!(Kind::from_file_name("README.md"), Kind::Other);
    /// ```
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| *kind != Self::Other && file_name.ends_with(kind.extension()))
            .unwrap_or(Self::Other)
    }

    /// Returns `true` if `file_name` carries this kind's extension.
    #[must_use]
    pub fn matches(self, file_name: &str) -> bool {
        file_name.ends_with(self.extension())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Source => "SOURCE",
            Self::Class => "CLASS",
            Self::Html => "HTML",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}
