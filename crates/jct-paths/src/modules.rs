//! Exploded modules, module configurations and module layers.
//!
//! An exploded module is a directory holding a module descriptor
//! (`module-info.class` or `module-info.java`); the directory name is the
//! module name. A [`ModuleLayer`] owns one [`PathClassLoader`] spanning the
//! directories of every module defined in it.
//!
//! # Examples
//!
//! ```
//! use jct_memfs::TemporaryFileSystem;
//! use jct_paths::{ModuleFinder, ModuleLayer, PathClassLoader};
//!
//! let modules = TemporaryFileSystem::named("modules").unwrap();
//! modules.create_file("org.example.api/module-info.class", b"").unwrap();
//! modules.create_file("org.example.impl/module-info.class", b"").unwrap();
//! modules.create_file("not-a-module/README", b"").unwrap();
//!
//! let finder = ModuleFinder::of(&[modules.path().clone()]).unwrap();
//! let boot = ModuleLayer::boot();
//! let config = boot
//!     .configuration()
//!     .resolve_and_bind(&ModuleFinder::empty(), &finder);
//! let layer = ModuleLayer::define_modules_with_one_loader(&boot, config, PathClassLoader::system());
//!
//! assert_eq!(layer.module_names(), vec!["org.example.api", "org.example.impl"]);
//! ```

use crate::loader::PathClassLoader;
use jct_core::{FsPath, Result};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

/// File names that mark a directory as an exploded module.
pub const DESCRIPTOR_NAMES: [&str; 2] = ["module-info.class", "module-info.java"];

static BOOT: LazyLock<Arc<ModuleLayer>> = LazyLock::new(|| {
    Arc::new(ModuleLayer {
        configuration: Configuration::default(),
        loader: PathClassLoader::system(),
        parent: None,
    })
});

/// A module found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleReference {
    name: String,
    location: FsPath,
}

impl ModuleReference {
    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the module's root directory.
    #[must_use]
    pub const fn location(&self) -> &FsPath {
        &self.location
    }
}

fn is_exploded_module(dir: &FsPath) -> bool {
    DESCRIPTOR_NAMES
        .iter()
        .any(|descriptor| dir.join(descriptor).is_file())
}

/// Finds exploded modules below a list of roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleFinder {
    modules: Vec<ModuleReference>,
}

impl ModuleFinder {
    /// Returns a finder that finds nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Scans `roots` in order.
    ///
    /// A root that is itself a module contributes that module; otherwise
    /// each child directory that is a module is contributed, in file name
    /// order. The first module with a given name wins. Missing roots are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::Io`] if an existing root cannot be listed.
    pub fn of(roots: &[FsPath]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut modules = Vec::new();

        let mut offer = |dir: FsPath| {
            if let Some(name) = dir.file_name().map(str::to_string)
                && seen.insert(name.clone())
            {
                modules.push(ModuleReference {
                    name,
                    location: dir,
                });
            }
        };

        for root in roots {
            if !root.is_dir() {
                continue;
            }
            if is_exploded_module(root) {
                offer(root.clone());
                continue;
            }
            for child in root.read_dir()? {
                if child.is_dir() && is_exploded_module(&child) {
                    offer(child);
                }
            }
        }

        tracing::trace!(count = modules.len(), "found exploded modules");
        Ok(Self { modules })
    }

    /// Returns the module with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ModuleReference> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// Returns every module found, in discovery order.
    #[must_use]
    pub fn find_all(&self) -> &[ModuleReference] {
        &self.modules
    }
}

/// The set of modules resolved for a layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    modules: Vec<ModuleReference>,
    parent_names: HashSet<String>,
}

impl Configuration {
    /// Resolves every module from `before` and then `after` as a child of
    /// this configuration.
    ///
    /// Modules already resolved here or in an ancestor are not resolved
    /// again, and `before` takes precedence over `after`.
    #[must_use]
    pub fn resolve_and_bind(&self, before: &ModuleFinder, after: &ModuleFinder) -> Self {
        let mut parent_names = self.parent_names.clone();
        parent_names.extend(self.modules.iter().map(|m| m.name.clone()));

        let mut seen = parent_names.clone();
        let modules = before
            .find_all()
            .iter()
            .chain(after.find_all())
            .filter(|module| seen.insert(module.name.clone()))
            .cloned()
            .collect();

        Self {
            modules,
            parent_names,
        }
    }

    /// Returns the modules resolved in this configuration.
    #[must_use]
    pub fn modules(&self) -> &[ModuleReference] {
        &self.modules
    }

    /// Returns the module with the given name, if resolved here.
    #[must_use]
    pub fn find_module(&self, name: &str) -> Option<&ModuleReference> {
        self.modules.iter().find(|module| module.name == name)
    }
}

/// A layer of modules sharing one class loader.
#[derive(Debug)]
pub struct ModuleLayer {
    configuration: Configuration,
    loader: Arc<PathClassLoader>,
    parent: Option<Arc<ModuleLayer>>,
}

impl ModuleLayer {
    /// Returns the process-wide boot layer. It defines no modules and uses
    /// the system loader.
    #[must_use]
    pub fn boot() -> Arc<Self> {
        Arc::clone(&*BOOT)
    }

    /// Defines the modules of `configuration` in a new child of `parent`,
    /// all loaded by a single fresh loader whose parent is `parent_loader`.
    #[must_use]
    pub fn define_modules_with_one_loader(
        parent: &Arc<Self>,
        configuration: Configuration,
        parent_loader: Arc<PathClassLoader>,
    ) -> Self {
        let roots = configuration
            .modules
            .iter()
            .map(|module| module.location.clone())
            .collect();
        let loader = Arc::new(PathClassLoader::named("layer", roots, Some(parent_loader)));

        tracing::debug!(
            modules = configuration.modules.len(),
            "defined module layer"
        );
        Self {
            configuration,
            loader,
            parent: Some(Arc::clone(parent)),
        }
    }

    /// Returns the layer's configuration.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the loader shared by every module in this layer.
    #[must_use]
    pub const fn loader(&self) -> &Arc<PathClassLoader> {
        &self.loader
    }

    /// Returns the parent layer, or `None` for the boot layer.
    #[must_use]
    pub const fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Returns the names of the modules defined in this layer.
    #[must_use]
    pub fn module_names(&self) -> Vec<&str> {
        self.configuration
            .modules
            .iter()
            .map(ModuleReference::name)
            .collect()
    }

    /// Returns the loader of `module_name`, searching parent layers.
    #[must_use]
    pub fn find_loader(&self, module_name: &str) -> Option<&Arc<PathClassLoader>> {
        if self.configuration.find_module(module_name).is_some() {
            return Some(&self.loader);
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.find_loader(module_name))
    }

    /// Returns the module whose directory contains `path`, searching parent
    /// layers.
    #[must_use]
    pub fn module_of(&self, path: &FsPath) -> Option<&ModuleReference> {
        self.configuration
            .modules
            .iter()
            .find(|module| path.starts_with(&module.location))
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.module_of(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jct_memfs::TemporaryFileSystem;

    fn modules_root(name: &str, modules: &[&str]) -> TemporaryFileSystem {
        let fs = TemporaryFileSystem::named(name).unwrap();
        for module in modules {
            fs.create_file(format!("{module}/module-info.class"), b"").unwrap();
        }
        fs
    }

    #[test]
    fn test_root_that_is_a_module() {
        let fs = modules_root("single", &[]);
        fs.create_file("module-info.java", b"module single {}").unwrap();

        let finder = ModuleFinder::of(&[fs.path().clone()]).unwrap();
        assert_eq!(finder.find_all().len(), 1);
        assert_eq!(finder.find("single").unwrap().location(), fs.path());
    }

    #[test]
    fn test_first_module_name_wins() {
        let a = modules_root("a", &["m.one", "m.two"]);
        let b = modules_root("b", &["m.two", "m.three"]);

        let finder = ModuleFinder::of(&[a.path().clone(), b.path().clone()]).unwrap();
        let names: Vec<_> = finder.find_all().iter().map(ModuleReference::name).collect();
        assert_eq!(names, vec!["m.one", "m.two", "m.three"]);
        assert!(finder.find("m.two").unwrap().location().starts_with(a.path()));
    }

    #[test]
    fn test_missing_roots_are_skipped() {
        let a = modules_root("a", &["m.one"]);
        let finder = ModuleFinder::of(&[a.path().join("missing"), a.path().clone()]).unwrap();
        assert_eq!(finder.find_all().len(), 1);
    }

    #[test]
    fn test_parent_modules_are_not_redefined() {
        let a = modules_root("a", &["m.one"]);
        let b = modules_root("b", &["m.one", "m.two"]);
        let boot = ModuleLayer::boot();

        let first_config = boot
            .configuration()
            .resolve_and_bind(&ModuleFinder::empty(), &ModuleFinder::of(&[a.path().clone()]).unwrap());
        let first = Arc::new(ModuleLayer::define_modules_with_one_loader(
            &boot,
            first_config,
            PathClassLoader::system(),
        ));

        let second_config = first
            .configuration()
            .resolve_and_bind(&ModuleFinder::empty(), &ModuleFinder::of(&[b.path().clone()]).unwrap());
        let second =
            ModuleLayer::define_modules_with_one_loader(&first, second_config, PathClassLoader::system());

        assert_eq!(second.module_names(), vec!["m.two"]);
        assert!(Arc::ptr_eq(second.find_loader("m.one").unwrap(), first.loader()));
        assert!(Arc::ptr_eq(second.find_loader("m.two").unwrap(), second.loader()));
        assert!(second.find_loader("m.missing").is_none());
    }

    #[test]
    fn test_layer_loader_spans_module_directories() {
        let a = modules_root("a", &["m.one"]);
        a.create_file("m.one/m/one/Api.class", b"api").unwrap();

        let boot = ModuleLayer::boot();
        let config = boot
            .configuration()
            .resolve_and_bind(&ModuleFinder::empty(), &ModuleFinder::of(&[a.path().clone()]).unwrap());
        let layer = ModuleLayer::define_modules_with_one_loader(&boot, config, PathClassLoader::system());

        assert_eq!(layer.loader().find_class("m.one.Api").unwrap(), Some(b"api".to_vec()));
        let parent = layer.loader().parent().unwrap();
        assert!(Arc::ptr_eq(parent, &PathClassLoader::system()));

        let class_file = a.path().join("m.one/m/one/Api.class");
        assert_eq!(layer.module_of(&class_file).unwrap().name(), "m.one");
    }
}
