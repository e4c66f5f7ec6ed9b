//! The host operating system's filesystem.

use crate::WalkConfig;
use crate::traits::{DirEntry, EntryType, FileSystem, Metadata};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use walkdir::WalkDir;

static SHARED: LazyLock<Arc<HostFs>> = LazyLock::new(|| Arc::new(HostFs));

/// [`FileSystem`] backed by `std::fs`.
///
/// There is a single shared instance per process, see [`HostFs::shared`].
///
/// # Examples
///
/// ```
/// use jct_core::HostFs;
/// use jct_core::traits::FileSystem;
///
/// let host = HostFs::shared();
/// assert_eq!(host.id(), "host");
/// assert_eq!(host.scheme(), "file");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl HostFs {
    /// Identifier shared by every host path.
    pub const ID: &'static str = "host";

    /// Returns the process-wide host filesystem.
    #[must_use]
    pub fn shared() -> Arc<dyn FileSystem> {
        Arc::clone(&*SHARED) as Arc<dyn FileSystem>
    }
}

/// Resolves symlinks so links to files and directories count as such.
fn entry_type(path: &Path, file_type: fs::FileType) -> EntryType {
    if file_type.is_symlink() {
        fs::metadata(path).map_or(EntryType::Other, |m| m.file_type().into())
    } else {
        file_type.into()
    }
}

impl FileSystem for HostFs {
    fn id(&self) -> &str {
        Self::ID
    }

    fn scheme(&self) -> &str {
        "file"
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        std::path::absolute(path).unwrap_or_else(|_| Path::new("/").join(path))
    }

    fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        let metadata = fs::metadata(path)?;
        Ok(Metadata {
            entry_type: metadata.file_type().into(),
            len: metadata.len(),
        })
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| -> io::Result<DirEntry> {
                let entry = entry?;
                let path = entry.path();
                let entry_type = entry_type(&path, entry.file_type()?);
                Ok(DirEntry {
                    path,
                    entry_type,
                    depth: 1,
                })
            })
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(entries)
    }

    fn walk(
        &self,
        root: &Path,
        max_depth: Option<usize>,
        config: &WalkConfig,
    ) -> io::Result<Vec<DirEntry>> {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(config.follow_links)
            .max_open(config.max_open)
            .sort_by_file_name();
        if let Some(max_depth) = max_depth {
            walker = walker.max_depth(max_depth);
        }

        walker
            .into_iter()
            .map(|entry| -> io::Result<DirEntry> {
                let entry = entry?;
                Ok(DirEntry {
                    entry_type: entry_type(entry.path(), entry.file_type()),
                    depth: entry.depth(),
                    path: entry.into_path(),
                })
            })
            .collect()
    }
}
