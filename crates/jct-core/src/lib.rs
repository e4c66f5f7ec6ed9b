//! Core types, traits, and errors for the jct virtual path manager.
//!
//! This crate provides the foundational types and abstractions shared by the
//! in-memory filesystem (`jct-memfs`) and the location-oriented path manager
//! (`jct-paths`).
//!
//! # Architecture
//!
//! The core consists of:
//! - Compiler vocabulary (`Location`, `StandardLocation`, `Kind`, `ModulePrefix`)
//! - Error hierarchy separating invalid input, unsupported operations and I/O
//! - The `FileSystem` and `ResourceLoader` traits, and the host filesystem
//! - `FsPath`, an absolute normalized path bound to a filesystem instance
//! - Configuration types

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod host;
mod path;
mod prefix;
mod types;

pub mod traits;

pub use config::{JctConfig, TempFsConfig, TempFsConfigBuilder, WalkConfig};
pub use error::{Error, Result};
pub use host::HostFs;
pub use path::{FsPath, normalize};
pub use prefix::ModulePrefix;
pub use types::{CustomLocation, Kind, Location, ModuleLocation, StandardLocation};
