//! Insertion-ordered, deduplicated root directories.

use jct_core::FsPath;

/// Ordered set of absolute roots registered against one location.
///
/// The first root added is the output target; input lookups search roots in
/// insertion order.
///
/// # Examples
///
/// ```
/// use jct_core::FsPath;
/// use jct_paths::RootSet;
///
/// let mut roots = RootSet::new();
/// assert!(roots.add(FsPath::host("/a")));
/// assert!(roots.add(FsPath::host("/b")));
/// assert!(!roots.add(FsPath::host("/a/./")));
///
/// assert_eq!(roots.len(), 2);
/// assert_eq!(roots.first(), Some(&FsPath::host("/a")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSet {
    roots: Vec<FsPath>,
}

impl RootSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Appends `root` unless already present. Returns `true` if added.
    pub fn add(&mut self, root: FsPath) -> bool {
        if self.roots.contains(&root) {
            return false;
        }
        self.roots.push(root);
        true
    }

    /// Removes `root` if present. Returns `true` if removed.
    pub fn remove(&mut self, root: &FsPath) -> bool {
        let before = self.roots.len();
        self.roots.retain(|existing| existing != root);
        self.roots.len() != before
    }

    /// Returns `true` if no roots are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the number of roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns the first registered root.
    #[must_use]
    pub fn first(&self) -> Option<&FsPath> {
        self.roots.first()
    }

    /// Iterates roots in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, FsPath> {
        self.roots.iter()
    }

    /// Returns a copy of the roots in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FsPath> {
        self.roots.clone()
    }

    /// Returns the first root that `path` lies beneath.
    #[must_use]
    pub fn root_of(&self, path: &FsPath) -> Option<&FsPath> {
        self.roots.iter().find(|root| path.starts_with(root))
    }
}

impl<'a> IntoIterator for &'a RootSet {
    type Item = &'a FsPath;
    type IntoIter = std::slice::Iter<'a, FsPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let mut roots = RootSet::new();
        for name in ["/c", "/a", "/b"] {
            roots.add(FsPath::host(name));
        }
        let paths: Vec<_> = roots.iter().map(ToString::to_string).collect();
        assert_eq!(paths, vec!["/c", "/a", "/b"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut roots = RootSet::new();
        roots.add(FsPath::host("/a"));
        assert!(!roots.remove(&FsPath::host("/b")));
        assert!(roots.remove(&FsPath::host("/a/")));
        assert!(roots.is_empty());
    }

    #[test]
    fn test_root_of_is_component_wise() {
        let mut roots = RootSet::new();
        roots.add(FsPath::host("/src"));
        assert!(roots.root_of(&FsPath::host("/src/Foo.java")).is_some());
        assert!(roots.root_of(&FsPath::host("/srcs/Foo.java")).is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut roots = RootSet::new();
        roots.add(FsPath::host("/a"));
        let snapshot = roots.snapshot();
        roots.add(FsPath::host("/b"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(roots.len(), 2);
    }
}
