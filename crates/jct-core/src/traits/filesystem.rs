//! Storage backend trait.

use crate::WalkConfig;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else (sockets, devices, dangling links).
    Other,
}

impl From<fs::FileType> for EntryType {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_file() {
            Self::File
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::Other
        }
    }
}

/// Metadata about a file or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Type of the entry.
    pub entry_type: EntryType,
    /// Size in bytes (0 for directories).
    pub len: u64,
}

impl Metadata {
    /// Returns `true` for regular files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    /// Returns `true` for directories.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// An entry produced by [`FileSystem::read_dir`] or [`FileSystem::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Type of the entry.
    pub entry_type: EntryType,
    /// Distance from the directory that was listed (direct children are 1).
    pub depth: usize,
}

/// Synchronous filesystem interface.
///
/// Every path handed to a `FileSystem` is absolute and already normalized
/// (see [`crate::normalize`]). Implementations report absence with
/// [`io::ErrorKind::NotFound`]; callers translate that into empty results.
pub trait FileSystem: Send + Sync + Debug {
    /// Identifier of this filesystem instance.
    ///
    /// Two paths are equal only if they share the same filesystem id.
    fn id(&self) -> &str;

    /// URI scheme used by [`FileSystem::uri`].
    fn scheme(&self) -> &str;

    /// Returns the URI identifying `path` on this filesystem.
    fn uri(&self, path: &Path) -> String {
        format!("{}://{}", self.scheme(), path.display())
    }

    /// Turns a possibly relative path into an absolute one.
    ///
    /// The default resolves relative paths against `/`.
    fn absolutize(&self, path: &Path) -> PathBuf {
        Path::new("/").join(path)
    }

    /// Returns metadata for `path`.
    fn metadata(&self, path: &Path) -> io::Result<Metadata>;

    /// Returns `true` if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).is_ok_and(|m| m.is_file())
    }

    /// Returns `true` if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).is_ok_and(|m| m.is_dir())
    }

    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    /// Reads the entire contents of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes a file, replacing any existing content.
    ///
    /// The parent directory must already exist.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Creates a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Lists the direct children of a directory, sorted by file name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Walks the tree below `root` depth first.
    ///
    /// `root` itself is not yielded. Entries within each directory are
    /// visited in file name order. `max_depth` of `None` means unbounded.
    fn walk(
        &self,
        root: &Path,
        max_depth: Option<usize>,
        _config: &WalkConfig,
    ) -> io::Result<Vec<DirEntry>> {
        let mut out = Vec::new();
        walk_into(self, root, 1, max_depth, &mut out)?;
        Ok(out)
    }

    /// Closes the filesystem. Idempotent.
    fn close(&self) -> io::Result<()> {
        Ok(())
    }

    /// Returns `false` once [`FileSystem::close`] has been called.
    fn is_open(&self) -> bool {
        true
    }
}

fn walk_into<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    depth: usize,
    max_depth: Option<usize>,
    out: &mut Vec<DirEntry>,
) -> io::Result<()> {
    if max_depth.is_some_and(|max| depth > max) {
        return Ok(());
    }

    for mut entry in fs.read_dir(dir)? {
        entry.depth = depth;
        let descend = entry.entry_type == EntryType::Directory;
        let path = entry.path.clone();
        out.push(entry);
        if descend {
            walk_into(fs, &path, depth + 1, max_depth, out)?;
        }
    }
    Ok(())
}
