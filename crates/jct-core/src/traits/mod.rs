//! Trait seams between filesystems, loaders and the path manager.
//!
//! - [`FileSystem`]: synchronous storage backend that roots point into
//! - [`ResourceLoader`]: named-resource lookup used to seed in-memory trees

mod filesystem;
mod loader;

pub use filesystem::{DirEntry, EntryType, FileSystem, Metadata};
pub use loader::ResourceLoader;
