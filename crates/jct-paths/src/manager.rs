//! Paths registered against a single compiler location.
//!
//! # Examples
//!
//! ```
//! use jct_core::{Kind, StandardLocation};
//! use jct_memfs::TemporaryFileSystem;
//! use jct_paths::LocationManager;
//!
//! let first = TemporaryFileSystem::named("first").unwrap();
//! let second = TemporaryFileSystem::named("second").unwrap();
//! second.create_file("com/example/Foo.class", b"").unwrap();
//!
//! let mut manager = LocationManager::new(StandardLocation::ClassPath.into());
//! manager.add_temp_fs(&first);
//! manager.add_temp_fs(&second);
//!
//! // Reads search every root in order.
//! let input = manager
//!     .get_java_file_for_input("com.example.Foo", Kind::Class)
//!     .unwrap()
//!     .unwrap();
//! assert!(input.path().starts_with(second.path()));
//!
//! // Writes always target the first root.
//! let output = manager
//!     .get_java_file_for_output("com.example.Bar", Kind::Class)
//!     .unwrap()
//!     .unwrap();
//! assert!(output.path().starts_with(first.path()));
//! ```

use crate::codec;
use crate::file_object::PathFileObject;
use crate::lazy::Lazy;
use crate::loader::PathClassLoader;
use crate::modules::{ModuleFinder, ModuleLayer};
use crate::roots::RootSet;
use crate::services::ServiceLoader;
use crate::walker::{self, ListRequest};
use jct_core::{Error, FsPath, Kind, Location, Result, WalkConfig};
use jct_memfs::TemporaryFileSystem;
use std::fmt;
use std::sync::Arc;

/// Manager of the roots for one location.
///
/// Provides file object lookups over the roots, lazily builds a class
/// loader spanning them and loads services, through a module layer for
/// module-oriented locations.
///
/// Root mutation takes `&mut self`; callers sharing a manager across
/// threads synchronize it themselves.
pub struct LocationManager {
    location: Location,
    roots: RootSet,
    class_loader: Lazy<PathClassLoader>,
    temp_filesystems: Vec<TemporaryFileSystem>,
    walk_config: WalkConfig,
}

impl LocationManager {
    /// Creates an empty manager for `location`.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self::with_walk_config(location, WalkConfig::default())
    }

    /// Creates an empty manager using `walk_config` for listings.
    #[must_use]
    pub fn with_walk_config(location: Location, walk_config: WalkConfig) -> Self {
        Self {
            location,
            roots: RootSet::new(),
            class_loader: Lazy::new(),
            temp_filesystems: Vec::new(),
            walk_config,
        }
    }

    /// Returns the location this manager serves.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Adds a root if not already present. Invalidates the class loader.
    pub fn add_path(&mut self, path: FsPath) {
        self.class_loader.invalidate();
        let added = self.roots.add(path.clone());
        tracing::debug!(location = %self.location, root = %path.uri(), added, "added root");
    }

    /// Adds several roots in order.
    pub fn add_paths(&mut self, paths: impl IntoIterator<Item = FsPath>) {
        for path in paths {
            self.add_path(path);
        }
    }

    /// Adds the root of an in-memory filesystem and keeps the filesystem
    /// alive while it stays registered.
    pub fn add_temp_fs(&mut self, fs: &TemporaryFileSystem) {
        self.add_path(fs.path().clone());
        if !self.temp_filesystems.contains(fs) {
            self.temp_filesystems.push(fs.clone());
        }
    }

    /// Adds several in-memory filesystems in order.
    pub fn add_temp_filesystems<'a>(
        &mut self,
        filesystems: impl IntoIterator<Item = &'a TemporaryFileSystem>,
    ) {
        for fs in filesystems {
            self.add_temp_fs(fs);
        }
    }

    /// Removes a root if present. Invalidates the class loader.
    ///
    /// An in-memory filesystem rooted at `path` is released.
    pub fn remove_path(&mut self, path: &FsPath) {
        self.class_loader.invalidate();
        let removed = self.roots.remove(path);
        self.temp_filesystems.retain(|fs| fs.path() != path);
        tracing::debug!(location = %self.location, root = %path.uri(), removed, "removed root");
    }

    /// Removes several roots.
    pub fn remove_paths<'a>(&mut self, paths: impl IntoIterator<Item = &'a FsPath>) {
        for path in paths {
            self.remove_path(path);
        }
    }

    /// Removes the root of an in-memory filesystem and releases it.
    pub fn remove_temp_fs(&mut self, fs: &TemporaryFileSystem) {
        self.remove_path(fs.path());
    }

    /// Returns `true` if no roots are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns a snapshot of the roots in search order.
    #[must_use]
    pub fn paths(&self) -> Vec<FsPath> {
        self.roots.snapshot()
    }

    /// Returns the registered roots.
    #[must_use]
    pub const fn roots(&self) -> &RootSet {
        &self.roots
    }

    /// Returns `true` if `file` lies under one of the roots and exists as a
    /// regular file.
    #[must_use]
    pub fn contains(&self, file: &PathFileObject) -> bool {
        self.roots.root_of(file.path()).is_some() && file.path().is_file()
    }

    /// Returns the first root-relative occurrence of `relative_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `relative_path` is absolute or
    /// climbs out of the root.
    pub fn find_file(&self, relative_path: &str) -> Result<Option<FsPath>> {
        codec::check_relative_name(relative_path)?;
        Ok(self
            .roots
            .iter()
            .map(|root| root.join(relative_path))
            .find(FsPath::is_file))
    }

    /// Finds an existing file by package and package-relative name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed package or
    /// relative name.
    pub fn get_file_for_input(
        &self,
        package_name: &str,
        relative_name: &str,
    ) -> Result<Option<PathFileObject>> {
        let relative = Self::package_relative(package_name, relative_name)?;
        Ok(self
            .roots
            .iter()
            .map(|root| root.join(&relative))
            .find(FsPath::is_file)
            .map(|path| self.file_object(path, &relative)))
    }

    /// Returns the file for writing `relative_name` in `package_name`,
    /// always under the first root. The file need not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed package or
    /// relative name.
    pub fn get_file_for_output(
        &self,
        package_name: &str,
        relative_name: &str,
    ) -> Result<Option<PathFileObject>> {
        let relative = Self::package_relative(package_name, relative_name)?;
        Ok(self
            .roots
            .first()
            .map(|root| self.file_object(root.join(&relative), &relative)))
    }

    /// Finds an existing class or source file by binary name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed class name.
    pub fn get_java_file_for_input(
        &self,
        class_name: &str,
        kind: Kind,
    ) -> Result<Option<PathFileObject>> {
        let relative = codec::class_to_relative(class_name, kind)?;
        Ok(self
            .roots
            .iter()
            .map(|root| root.join(&relative))
            .find(FsPath::is_file)
            .map(|path| PathFileObject::new(self.location.clone(), path, class_name)))
    }

    /// Returns the file for writing a class or source file, always under
    /// the first root. The file need not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed class name.
    pub fn get_java_file_for_output(
        &self,
        class_name: &str,
        kind: Kind,
    ) -> Result<Option<PathFileObject>> {
        let relative = codec::class_to_relative(class_name, kind)?;
        Ok(self.roots.first().map(|root| {
            PathFileObject::new(self.location.clone(), root.join(&relative), class_name)
        }))
    }

    /// Infers the binary name of `file` from its path below a root.
    ///
    /// Returns `None` if the file is outside every root or does not exist.
    #[must_use]
    pub fn infer_binary_name(&self, file: &PathFileObject) -> Option<String> {
        let root = self.roots.root_of(file.path())?;
        if !file.path().is_file() {
            return None;
        }
        let relative = file.path().strip_prefix(root)?;
        Some(codec::binary_name(relative, file.kind()))
    }

    /// Lists files of the given kinds in `package_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed package name or
    /// [`Error::Io`] if a package directory cannot be walked.
    pub fn list(
        &self,
        package_name: &str,
        kinds: &[Kind],
        recurse: bool,
    ) -> Result<Vec<PathFileObject>> {
        let request = ListRequest {
            package_name,
            kinds,
            recurse,
        };
        let found = walker::list(&self.location, &self.roots, &request, &self.walk_config)?;
        tracing::debug!(
            location = %self.location,
            package = package_name,
            recurse,
            count = found.len(),
            "listed files"
        );
        Ok(found)
    }

    /// Appends the result of [`LocationManager::list`] to `out`.
    ///
    /// # Errors
    ///
    /// See [`LocationManager::list`].
    pub fn list_into(
        &self,
        package_name: &str,
        kinds: &[Kind],
        recurse: bool,
        out: &mut Vec<PathFileObject>,
    ) -> Result<()> {
        out.extend(self.list(package_name, kinds, recurse)?);
        Ok(())
    }

    /// Returns the class loader over the current roots, building it if the
    /// roots changed since the last call.
    #[must_use]
    pub fn class_loader(&self) -> Arc<PathClassLoader> {
        self.class_loader.get_or_init(|| {
            tracing::trace!(location = %self.location, "building class loader");
            PathClassLoader::new(self.roots.snapshot())
        })
    }

    /// Returns a service loader for `service`.
    ///
    /// Module-oriented locations get a fresh module layer defined over the
    /// modules in the roots, with its own loader; other locations use the
    /// cached class loader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if this manager serves a specific
    /// module, [`Error::InvalidArgument`] for a malformed service name, or
    /// [`Error::Io`] if a root cannot be scanned for modules.
    pub fn service_loader(&self, service: &str) -> Result<ServiceLoader> {
        if self.location.is_module_location() {
            return Err(Error::unsupported(
                "Cannot load services from specific modules",
            ));
        }

        if !self.location.is_module_oriented_location() {
            return ServiceLoader::load(service, self.class_loader());
        }

        let finder = ModuleFinder::of(self.roots.snapshot().as_slice())?;
        let boot = ModuleLayer::boot();
        let configuration = boot
            .configuration()
            .resolve_and_bind(&ModuleFinder::empty(), &finder);
        let layer = ModuleLayer::define_modules_with_one_loader(
            &boot,
            configuration,
            PathClassLoader::system(),
        );
        ServiceLoader::load_in_layer(Arc::new(layer), service)
    }

    fn package_relative(package_name: &str, relative_name: &str) -> Result<String> {
        codec::check_relative_name(relative_name)?;
        let package = codec::package_to_relative(package_name)?;
        Ok(package
            .join(relative_name)
            .to_string_lossy()
            .into_owned())
    }

    fn file_object(&self, path: FsPath, given_name: &str) -> PathFileObject {
        PathFileObject::new(self.location.clone(), path, given_name)
    }
}

impl fmt::Debug for LocationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationManager")
            .field("location", &self.location.name())
            .field("roots", &self.roots.len())
            .field("class_loader", &self.class_loader)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jct_core::StandardLocation;

    fn manager(location: StandardLocation, roots: &[&TemporaryFileSystem]) -> LocationManager {
        let mut manager = LocationManager::new(location.into());
        manager.add_temp_filesystems(roots.iter().copied());
        manager
    }

    #[test]
    fn test_no_roots_means_absence() {
        let manager = LocationManager::new(StandardLocation::SourcePath.into());
        assert!(manager.is_empty());
        assert!(manager.get_file_for_input("com.example", "Foo.java").unwrap().is_none());
        assert!(manager.get_file_for_output("com.example", "Foo.java").unwrap().is_none());
        assert!(manager.get_java_file_for_input("a.B", Kind::Source).unwrap().is_none());
        assert!(manager.get_java_file_for_output("a.B", Kind::Source).unwrap().is_none());
        assert!(manager.list("", &[Kind::Source], true).unwrap().is_empty());
    }

    #[test]
    fn test_given_names() {
        let fs = TemporaryFileSystem::named("src").unwrap();
        fs.create_file("com/example/data.txt", b"").unwrap();
        fs.create_file("com/example/Foo.java", b"").unwrap();
        let manager = manager(StandardLocation::SourcePath, &[&fs]);

        let resource = manager
            .get_file_for_input("com.example", "data.txt")
            .unwrap()
            .unwrap();
        assert_eq!(resource.given_name(), "com/example/data.txt");

        let source = manager
            .get_java_file_for_input("com.example.Foo", Kind::Source)
            .unwrap()
            .unwrap();
        assert_eq!(source.given_name(), "com.example.Foo");
        assert_eq!(source.location(), &Location::from(StandardLocation::SourcePath));
    }

    #[test]
    fn test_input_never_creates_files() {
        let fs = TemporaryFileSystem::named("src").unwrap();
        let manager = manager(StandardLocation::SourcePath, &[&fs]);
        assert!(manager.get_file_for_input("a", "b.txt").unwrap().is_none());
        assert!(!fs.path().join("a").exists());
    }

    #[test]
    fn test_output_does_not_require_existence() {
        let fs = TemporaryFileSystem::named("out").unwrap();
        let manager = manager(StandardLocation::ClassOutput, &[&fs]);
        let file = manager
            .get_java_file_for_output("a.b.C", Kind::Class)
            .unwrap()
            .unwrap();
        assert_eq!(file.path(), &fs.path().join("a/b/C.class"));
        assert!(!file.exists());
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let fs = TemporaryFileSystem::named("src").unwrap();
        let manager = manager(StandardLocation::SourcePath, &[&fs]);
        assert!(manager.get_file_for_input("a", "/abs.txt").unwrap_err().is_invalid_argument());
        assert!(manager.get_file_for_output("a..b", "x").unwrap_err().is_invalid_argument());
        assert!(manager.get_java_file_for_input("", Kind::Class).unwrap_err().is_invalid_argument());
        assert!(manager.find_file("/x").unwrap_err().is_invalid_argument());
        for empty in ["", "."] {
            assert!(manager.get_file_for_output("com.example", empty).unwrap_err().is_invalid_argument());
            assert!(manager.get_file_for_input("com.example", empty).unwrap_err().is_invalid_argument());
            assert!(manager.find_file(empty).unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn test_find_file() {
        let a = TemporaryFileSystem::named("a").unwrap();
        let b = TemporaryFileSystem::named("b").unwrap();
        b.create_file("META-INF/MANIFEST.MF", b"").unwrap();
        let manager = manager(StandardLocation::ClassPath, &[&a, &b]);

        let found = manager.find_file("META-INF/MANIFEST.MF").unwrap().unwrap();
        assert!(found.starts_with(b.path()));
        assert!(manager.find_file("missing").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_roots_are_ignored() {
        let fs = TemporaryFileSystem::named("src").unwrap();
        let mut manager = manager(StandardLocation::SourcePath, &[&fs, &fs]);
        manager.add_path(fs.path().join("."));
        assert_eq!(manager.paths().len(), 1);
    }

    #[test]
    fn test_remove_releases_temp_fs() {
        let fs = TemporaryFileSystem::named("src").unwrap();
        let backing = fs.memory_fs();
        let mut manager = manager(StandardLocation::SourcePath, &[&fs]);
        drop(fs);

        assert!(jct_core::traits::FileSystem::is_open(&*backing));
        let root = manager.paths()[0].clone();
        manager.remove_path(&root);
        assert!(manager.is_empty());
        assert!(manager.temp_filesystems.is_empty());
    }

    #[test]
    fn test_infer_binary_name_requires_root_and_file() {
        let fs = TemporaryFileSystem::named("classes").unwrap();
        fs.create_file("com/example/Foo.class", b"").unwrap();
        let manager = manager(StandardLocation::ClassPath, &[&fs]);

        let file = manager
            .get_java_file_for_input("com.example.Foo", Kind::Class)
            .unwrap()
            .unwrap();
        assert_eq!(manager.infer_binary_name(&file).as_deref(), Some("com.example.Foo"));

        let missing = manager
            .get_java_file_for_output("com.example.Bar", Kind::Class)
            .unwrap()
            .unwrap();
        assert!(manager.infer_binary_name(&missing).is_none());
    }

    #[test]
    fn test_service_loader_on_module_location_is_unsupported() {
        let location = Location::module(StandardLocation::ModulePath, "org.example");
        let manager = LocationManager::new(location);
        let err = manager.service_loader("x.Svc").unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(
            err.to_string(),
            "Unsupported operation: Cannot load services from specific modules"
        );
    }

    #[test]
    fn test_debug_output() {
        let manager = LocationManager::new(StandardLocation::ClassPath.into());
        let debug = format!("{manager:?}");
        assert!(debug.contains("CLASS_PATH"));
        assert!(debug.contains("initialized: false"));
    }
}
