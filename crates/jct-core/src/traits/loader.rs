//! Named resource lookup.

use crate::{FsPath, Result};
use std::fmt::Debug;

/// Looks up resources by slash-separated name, such as
/// `META-INF/services/java.sql.Driver` or `org/example/Foo.class`.
///
/// Implemented by class loaders over a set of roots; used to copy resources
/// into in-memory filesystems.
pub trait ResourceLoader: Send + Sync + Debug {
    /// Returns the first location of `name`, or `None` if it is absent.
    fn find_resource(&self, name: &str) -> Option<FsPath>;

    /// Returns every location of `name` in search order.
    fn find_resources(&self, name: &str) -> Vec<FsPath> {
        self.find_resource(name).into_iter().collect()
    }

    /// Reads the first occurrence of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the resource exists but cannot be read.
    fn read_resource(&self, name: &str) -> Result<Option<Vec<u8>>> {
        self.find_resource(name).map(|path| path.read()).transpose()
    }
}
