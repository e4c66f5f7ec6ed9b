//! One [`LocationManager`] per compiler location.

use crate::codec;
use crate::file_object::PathFileObject;
use crate::loader::PathClassLoader;
use crate::manager::LocationManager;
use crate::services::ServiceLoader;
use jct_core::{FsPath, JctConfig, Kind, Location, ModulePrefix, Result, WalkConfig};
use jct_memfs::TemporaryFileSystem;
use std::collections::HashMap;
use std::sync::Arc;

/// Routes file manager requests to the manager of each location.
///
/// Locations without a manager behave as locations without roots: lookups
/// return `None` and listings are empty.
///
/// # Examples
///
/// ```
/// use jct_core::{Kind, Location, StandardLocation};
/// use jct_memfs::TemporaryFileSystem;
/// use jct_paths::PathFileManager;
///
/// let modules = TemporaryFileSystem::named("modules").unwrap();
/// modules
///     .create_file("org.example/org/example/Foo.class", b"")
///     .unwrap();
///
/// let mut files = PathFileManager::new();
/// let module = Location::module(StandardLocation::ModulePath, "org.example");
/// files.add_path(module, modules.path().join("org.example"));
///
/// let found = files
///     .get_java_file_for_input(
///         &StandardLocation::ModulePath.into(),
///         "org.example/org.example.Foo",
///         Kind::Class,
///     )
///     .unwrap()
///     .unwrap();
/// assert_eq!(found.given_name(), "org.example.Foo");
/// ```
#[derive(Debug, Default)]
pub struct PathFileManager {
    managers: HashMap<Location, LocationManager>,
    walk_config: WalkConfig,
}

impl PathFileManager {
    /// Creates a file manager with no locations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a file manager whose location managers use the walk settings
    /// of `config`.
    #[must_use]
    pub fn with_config(config: &JctConfig) -> Self {
        Self {
            managers: HashMap::new(),
            walk_config: config.walk.clone(),
        }
    }

    /// Returns the manager of `location`, if one was created.
    #[must_use]
    pub fn manager_for(&self, location: &Location) -> Option<&LocationManager> {
        self.managers.get(location)
    }

    /// Returns the manager of `location`, creating an empty one if needed.
    pub fn get_or_create(&mut self, location: Location) -> &mut LocationManager {
        let walk_config = &self.walk_config;
        self.managers.entry(location).or_insert_with_key(|location| {
            tracing::debug!(%location, "created location manager");
            LocationManager::with_walk_config(location.clone(), walk_config.clone())
        })
    }

    /// Returns `true` if a manager exists for `location`.
    #[must_use]
    pub fn has_location(&self, location: &Location) -> bool {
        self.managers.contains_key(location)
    }

    /// Adds a root to `location`.
    pub fn add_path(&mut self, location: Location, path: FsPath) {
        self.get_or_create(location).add_path(path);
    }

    /// Adds the root of an in-memory filesystem to `location`.
    pub fn add_temp_fs(&mut self, location: Location, fs: &TemporaryFileSystem) {
        self.get_or_create(location).add_temp_fs(fs);
    }

    /// Returns every location with a manager, sorted by name.
    #[must_use]
    pub fn locations(&self) -> Vec<&Location> {
        let mut locations: Vec<_> = self.managers.keys().collect();
        locations.sort_by_key(|location| location.name());
        locations
    }

    /// Returns the module locations registered below a module-oriented
    /// `location`, sorted by module name.
    #[must_use]
    pub fn list_locations_for_modules(&self, location: &Location) -> Vec<&Location> {
        let mut modules: Vec<_> = self
            .managers
            .keys()
            .filter(|candidate| {
                candidate
                    .as_module()
                    .is_some_and(|module| module.parent() == location)
            })
            .collect();
        modules.sort_by_key(|candidate| candidate.name());
        modules
    }

    /// Returns `true` if `file` lies under a root of `location`.
    #[must_use]
    pub fn contains(&self, location: &Location, file: &PathFileObject) -> bool {
        self.manager_for(location)
            .is_some_and(|manager| manager.contains(file))
    }

    /// Lists files of the given kinds in `package_name` of `location`.
    ///
    /// # Errors
    ///
    /// See [`LocationManager::list`].
    pub fn list(
        &self,
        location: &Location,
        package_name: &str,
        kinds: &[Kind],
        recurse: bool,
    ) -> Result<Vec<PathFileObject>> {
        self.manager_for(location)
            .map_or(Ok(Vec::new()), |manager| manager.list(package_name, kinds, recurse))
    }

    /// Returns the class loader of `location`, if it has a manager.
    #[must_use]
    pub fn class_loader(&self, location: &Location) -> Option<Arc<PathClassLoader>> {
        self.manager_for(location).map(LocationManager::class_loader)
    }

    /// Infers the binary name of `file`, trying `location` first and then
    /// the location `file` was resolved in.
    #[must_use]
    pub fn infer_binary_name(&self, location: &Location, file: &PathFileObject) -> Option<String> {
        let from = |location: &Location| {
            self.manager_for(location)
                .and_then(|manager| manager.infer_binary_name(file))
        };
        from(location).or_else(|| {
            if file.location() == location {
                None
            } else {
                from(file.location())
            }
        })
    }

    /// Returns a service loader for `service` in `location`.
    ///
    /// # Errors
    ///
    /// See [`LocationManager::service_loader`].
    pub fn get_service_loader(&self, location: &Location, service: &str) -> Result<ServiceLoader> {
        self.manager_for(location).map_or_else(
            || LocationManager::new(location.clone()).service_loader(service),
            |manager| manager.service_loader(service),
        )
    }

    /// Finds an existing file by package and relative name.
    ///
    /// # Errors
    ///
    /// See [`LocationManager::get_file_for_input`].
    pub fn get_file_for_input(
        &self,
        location: &Location,
        package_name: &str,
        relative_name: &str,
    ) -> Result<Option<PathFileObject>> {
        self.manager_for(location)
            .map_or(Ok(None), |manager| manager.get_file_for_input(package_name, relative_name))
    }

    /// Returns the output file for a package and relative name.
    ///
    /// # Errors
    ///
    /// See [`LocationManager::get_file_for_output`].
    pub fn get_file_for_output(
        &self,
        location: &Location,
        package_name: &str,
        relative_name: &str,
    ) -> Result<Option<PathFileObject>> {
        self.manager_for(location)
            .map_or(Ok(None), |manager| manager.get_file_for_output(package_name, relative_name))
    }

    /// Finds an existing class or source file.
    ///
    /// On a module-oriented location, a `module/class` name is looked up in
    /// that module's location.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::InvalidArgument`] for a malformed name.
    pub fn get_java_file_for_input(
        &self,
        location: &Location,
        class_name: &str,
        kind: Kind,
    ) -> Result<Option<PathFileObject>> {
        let (location, class_name) = Self::route(location, class_name)?;
        self.manager_for(&location)
            .map_or(Ok(None), |manager| manager.get_java_file_for_input(&class_name, kind))
    }

    /// Returns the output file for a class or source file.
    ///
    /// On a module-oriented location, a `module/class` name targets that
    /// module's location.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::InvalidArgument`] for a malformed name.
    pub fn get_java_file_for_output(
        &self,
        location: &Location,
        class_name: &str,
        kind: Kind,
    ) -> Result<Option<PathFileObject>> {
        let (location, class_name) = Self::route(location, class_name)?;
        self.manager_for(&location)
            .map_or(Ok(None), |manager| manager.get_java_file_for_output(&class_name, kind))
    }

    fn route(location: &Location, class_name: &str) -> Result<(Location, String)> {
        let (location, class_name) = match ModulePrefix::try_extract(class_name)? {
            Some(prefix) if location.is_module_oriented_location() => (
                Location::module(location.clone(), prefix.module_name()),
                prefix.rest().to_string(),
            ),
            _ => (location.clone(), class_name.to_string()),
        };
        codec::class_to_relative(&class_name, Kind::Other)?;
        Ok((location, class_name))
    }
}
