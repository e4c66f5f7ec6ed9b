//! Location-oriented path management for compiler file managers.
//!
//! Every compiler location (sources, classes, module path, ...) is backed
//! by an ordered set of roots, either host directories or in-memory
//! filesystems. This crate resolves compiler requests against those roots:
//!
//! - [`LocationManager`]: roots of one location, file object lookups,
//!   listing, a cached [`PathClassLoader`] and [`ServiceLoader`]s
//! - [`PathFileManager`]: one `LocationManager` per location, with
//!   `module/class` name routing
//! - [`codec`]: package and class names to relative paths and back
//!
//! # Examples
//!
//! ```
//! use jct_core::{Kind, Location, StandardLocation};
//! use jct_memfs::TemporaryFileSystem;
//! use jct_paths::PathFileManager;
//!
//! let sources = TemporaryFileSystem::named("src").unwrap();
//! sources
//!     .create_file("com/example/Hello.java", b"class Hello {}")
//!     .unwrap();
//!
//! let location: Location = StandardLocation::SourcePath.into();
//! let mut files = PathFileManager::new();
//! files.add_temp_fs(location.clone(), &sources);
//!
//! let listed = files.list(&location, "com.example", &[Kind::Source], false).unwrap();
//! assert_eq!(listed.len(), 1);
//! assert_eq!(
//!     files.infer_binary_name(&location, &listed[0]).as_deref(),
//!     Some("com.example.Hello"),
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod codec;
mod file_manager;
mod file_object;
mod lazy;
mod loader;
mod manager;
mod modules;
mod roots;
mod services;
mod walker;

pub use file_manager::PathFileManager;
pub use file_object::PathFileObject;
pub use lazy::Lazy;
pub use loader::PathClassLoader;
pub use manager::LocationManager;
pub use modules::{Configuration, DESCRIPTOR_NAMES, ModuleFinder, ModuleLayer, ModuleReference};
pub use roots::RootSet;
pub use services::{SERVICES_DIR, ServiceLoader, ServiceProvider};
pub use walker::{ListRequest, list};
