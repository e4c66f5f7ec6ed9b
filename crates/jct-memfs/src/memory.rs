//! In-memory filesystem implementation.
//!
//! A `MemoryFs` is an isolated POSIX-style tree: a single `/` root, forward
//! slashes, case-sensitive names. All data is lost when it is closed or
//! dropped.
//!
//! # Examples
//!
//! ```
//! use jct_core::traits::FileSystem;
//! use jct_memfs::MemoryFs;
//! use std::path::Path;
//!
//! let fs = MemoryFs::new();
//! fs.create_dir_all(Path::new("/work/com/example")).unwrap();
//! fs.write(Path::new("/work/com/example/Foo.java"), b"class Foo {}").unwrap();
//!
//! assert!(fs.is_file(Path::new("/work/com/example/Foo.java")));
//! assert_eq!(fs.read(Path::new("/work/com/example/Foo.java")).unwrap(), b"class Foo {}");
//! ```

use jct_core::traits::{DirEntry, EntryType, FileSystem, Metadata};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// URI scheme of in-memory filesystems.
pub const SCHEME: &str = "memory";

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Directory,
}

impl Node {
    const fn entry_type(&self) -> EntryType {
        match self {
            Self::File(_) => EntryType::File,
            Self::Directory => EntryType::Directory,
        }
    }
}

/// In-memory filesystem.
///
/// Thread-safe via an internal `RwLock`. Each instance has a unique id, so
/// equal path strings on two instances never compare equal as
/// [`jct_core::FsPath`] values.
#[derive(Debug)]
pub struct MemoryFs {
    id: String,
    entries: RwLock<BTreeMap<PathBuf, Node>>,
    open: AtomicBool,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Creates an empty filesystem holding only the root directory.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("/"), Node::Directory);
        let id = Uuid::new_v4().simple().to_string();
        tracing::trace!(%id, "created in-memory filesystem");
        Self {
            id,
            entries: RwLock::new(entries),
            open: AtomicBool::new(true),
        }
    }

    /// Returns the number of regular files stored.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|node| matches!(node, Node::File(_)))
            .count()
    }

    fn ensure_open(&self) -> io::Result<()> {
        if self.open.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "in-memory filesystem {} is closed",
                self.id
            )))
        }
    }

    fn lock_poisoned() -> io::Error {
        io::Error::other("lock poisoned")
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("not found: {}", path.display()),
        )
    }
}

impl FileSystem for MemoryFs {
    fn id(&self) -> &str {
        &self.id
    }

    fn scheme(&self) -> &str {
        SCHEME
    }

    fn uri(&self, path: &Path) -> String {
        format!("{SCHEME}://{}{}", self.id, path.display())
    }

    fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        self.ensure_open()?;
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;
        match entries.get(path) {
            Some(node) => Ok(Metadata {
                entry_type: node.entry_type(),
                len: match node {
                    Node::File(data) => data.len() as u64,
                    Node::Directory => 0,
                },
            }),
            None => Err(Self::not_found(path)),
        }
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.ensure_open()?;
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;
        match entries.get(path) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Directory) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(Self::not_found(path)),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        self.ensure_open()?;
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;

        let parent = path.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot write to root: {}", path.display()),
            )
        })?;
        match entries.get(parent) {
            Some(Node::Directory) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", parent.display()),
                ));
            }
            None => return Err(Self::not_found(parent)),
        }

        if let Some(Node::Directory) = entries.get(path) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            ));
        }

        entries.insert(path.to_path_buf(), Node::File(data.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.ensure_open()?;
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;

        // Ancestors are yielded deepest first.
        let missing: Vec<&Path> = path
            .ancestors()
            .take_while(|ancestor| !matches!(entries.get(*ancestor), Some(Node::Directory)))
            .collect();

        for dir in missing.into_iter().rev() {
            if let Some(Node::File(_)) = entries.get(dir) {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", dir.display()),
                ));
            }
            entries.insert(dir.to_path_buf(), Node::Directory);
        }
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        self.ensure_open()?;
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;

        match entries.get(path) {
            Some(Node::Directory) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => return Err(Self::not_found(path)),
        }

        // Paths order component-wise, so descendants of `path` form one
        // contiguous run and its direct children appear in name order.
        Ok(entries
            .range(path.to_path_buf()..)
            .skip(1)
            .take_while(|(candidate, _)| candidate.starts_with(path))
            .filter(|(candidate, _)| candidate.parent() == Some(path))
            .map(|(candidate, node)| DirEntry {
                path: candidate.clone(),
                entry_type: node.entry_type(),
                depth: 1,
            })
            .collect())
    }

    fn close(&self) -> io::Result<()> {
        if self.open.swap(false, Ordering::AcqRel) {
            let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;
            entries.clear();
            tracing::trace!(id = %self.id, "closed in-memory filesystem");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}
