//! In-memory filesystems for jct compilation roots.
//!
//! This crate provides:
//! - [`MemoryFs`]: an isolated POSIX-style tree implementing
//!   [`jct_core::traits::FileSystem`]
//! - [`TemporaryFileSystem`]: a named handle over a `MemoryFs` with helpers
//!   for seeding content, closed on a background thread when the last clone
//!   is dropped
//! - [`copy_tree`]: recursive copies between any two filesystems
//!
//! # Examples
//!
//! ```
//! use jct_memfs::TemporaryFileSystem;
//!
//! let classes = TemporaryFileSystem::named("classes").unwrap();
//! classes.create_file("com/example/Foo.class", &[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
//!
//! assert!(classes.path().join("com/example/Foo.class").is_file());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod cleaner;
mod export;
mod memory;
mod wrapper;

pub use export::{CopyStats, copy_tree};
pub use memory::{MemoryFs, SCHEME};
pub use wrapper::TemporaryFileSystem;
