//! Class and resource loading over a list of roots.
//!
//! A [`PathClassLoader`] searches its parent first, then each of its roots in
//! order. Class bytes are located by binary name and are never interpreted.

use crate::codec;
use jct_core::traits::ResourceLoader;
use jct_core::{FsPath, Kind, Result};
use std::path::{Component, Path};
use std::sync::{Arc, LazyLock};

static SYSTEM: LazyLock<Arc<PathClassLoader>> =
    LazyLock::new(|| Arc::new(PathClassLoader::named("system", Vec::new(), None)));

/// A class loader whose classpath is a fixed snapshot of roots.
///
/// # Examples
///
/// ```
/// use jct_core::traits::ResourceLoader;
/// use jct_memfs::TemporaryFileSystem;
/// use jct_paths::PathClassLoader;
///
/// let classes = TemporaryFileSystem::named("classes").unwrap();
/// classes.create_file("org/example/Foo.class", &[0xCA, 0xFE]).unwrap();
///
/// let loader = PathClassLoader::new(vec![classes.path().clone()]);
/// assert_eq!(loader.find_class("org.example.Foo").unwrap(), Some(vec![0xCA, 0xFE]));
/// assert!(loader.find_resource("org/example/Bar.class").is_none());
/// ```
#[derive(Debug)]
pub struct PathClassLoader {
    name: String,
    roots: Vec<FsPath>,
    parent: Option<Arc<PathClassLoader>>,
}

impl PathClassLoader {
    /// Creates a loader over `roots` whose parent is the system loader.
    #[must_use]
    pub fn new(roots: Vec<FsPath>) -> Self {
        Self::named("path", roots, Some(Self::system()))
    }

    /// Creates a loader with an explicit name and parent.
    #[must_use]
    pub fn named(name: impl Into<String>, roots: Vec<FsPath>, parent: Option<Arc<Self>>) -> Self {
        let name = name.into();
        tracing::trace!(%name, roots = roots.len(), "created class loader");
        Self {
            name,
            roots,
            parent,
        }
    }

    /// Returns the process-wide system loader, which has no roots.
    #[must_use]
    pub fn system() -> Arc<Self> {
        Arc::clone(&*SYSTEM)
    }

    /// Returns the loader's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the roots searched by this loader, in order.
    #[must_use]
    pub fn roots(&self) -> &[FsPath] {
        &self.roots
    }

    /// Returns the parent loader, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    fn own_resources<'a>(&'a self, name: &'a str) -> impl Iterator<Item = FsPath> + 'a {
        let relative = resource_path(name);
        self.roots
            .iter()
            .filter_map(move |root| relative.map(|relative| root.join(relative)))
            .filter(FsPath::is_file)
    }

    /// Finds the bytes of the class with the given binary name.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::InvalidArgument`] for a malformed name or
    /// [`jct_core::Error::Io`] if the class file cannot be read.
    pub fn find_class(&self, binary_name: &str) -> Result<Option<Vec<u8>>> {
        let relative = codec::class_to_relative(binary_name, Kind::Class)?;
        self.read_resource(&relative.to_string_lossy())
    }
}

/// Validates a slash-separated resource name as a relative path.
fn resource_path(name: &str) -> Option<&Path> {
    let path = Path::new(name.strip_prefix('/').unwrap_or(name));
    let valid = path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    valid.then_some(path)
}

impl ResourceLoader for PathClassLoader {
    fn find_resource(&self, name: &str) -> Option<FsPath> {
        self.parent
            .as_ref()
            .and_then(|parent| parent.find_resource(name))
            .or_else(|| self.own_resources(name).next())
    }

    fn find_resources(&self, name: &str) -> Vec<FsPath> {
        let mut found = self
            .parent
            .as_ref()
            .map(|parent| parent.find_resources(name))
            .unwrap_or_default();
        found.extend(self.own_resources(name));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jct_memfs::TemporaryFileSystem;

    fn root_with(name: &str, files: &[(&str, &str)]) -> TemporaryFileSystem {
        let fs = TemporaryFileSystem::named(name).unwrap();
        for (path, content) in files {
            fs.create_file(path, content.as_bytes()).unwrap();
        }
        fs
    }

    #[test]
    fn test_system_loader_is_shared_and_empty() {
        let a = PathClassLoader::system();
        assert!(Arc::ptr_eq(&a, &PathClassLoader::system()));
        assert!(a.roots().is_empty());
        assert!(a.parent().is_none());
    }

    #[test]
    fn test_first_root_wins() {
        let a = root_with("a", &[("x/R.txt", "a")]);
        let b = root_with("b", &[("x/R.txt", "b"), ("x/Only.txt", "only")]);
        let loader = PathClassLoader::new(vec![a.path().clone(), b.path().clone()]);

        assert_eq!(loader.read_resource("x/R.txt").unwrap(), Some(b"a".to_vec()));
        assert_eq!(loader.read_resource("/x/Only.txt").unwrap(), Some(b"only".to_vec()));
        assert_eq!(loader.find_resources("x/R.txt").len(), 2);
    }

    #[test]
    fn test_parent_is_searched_first() {
        let parent_root = root_with("parent", &[("R.txt", "parent")]);
        let child_root = root_with("child", &[("R.txt", "child")]);
        let parent = Arc::new(PathClassLoader::named(
            "parent",
            vec![parent_root.path().clone()],
            None,
        ));
        let child = PathClassLoader::named("child", vec![child_root.path().clone()], Some(parent));

        assert_eq!(child.read_resource("R.txt").unwrap(), Some(b"parent".to_vec()));
        let all = child.find_resources("R.txt");
        assert_eq!(all[0], parent_root.path().join("R.txt"));
        assert_eq!(all[1], child_root.path().join("R.txt"));
    }

    #[test]
    fn test_invalid_resource_names_find_nothing() {
        let a = root_with("a", &[("R.txt", "a")]);
        let loader = PathClassLoader::new(vec![a.path().clone()]);
        for name in ["", "/", "../R.txt", "./R.txt"] {
            assert!(loader.find_resource(name).is_none(), "{name}");
        }
    }

    #[test]
    fn test_directories_are_not_resources() {
        let a = root_with("a", &[("pkg/R.txt", "a")]);
        let loader = PathClassLoader::new(vec![a.path().clone()]);
        assert!(loader.find_resource("pkg").is_none());
    }

    #[test]
    fn test_find_class() {
        let a = root_with("a", &[("com/example/Foo.class", "bytes")]);
        let loader = PathClassLoader::new(vec![a.path().clone()]);
        assert_eq!(loader.find_class("com.example.Foo").unwrap(), Some(b"bytes".to_vec()));
        assert_eq!(loader.find_class("com.example.Bar").unwrap(), None);
        assert!(loader.find_class("").unwrap_err().is_invalid_argument());
    }
}
