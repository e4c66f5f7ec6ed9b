//! Copying trees between filesystems.
//!
//! Both directions go through [`FsPath`], so either side may be the host
//! filesystem or an in-memory one.

use jct_core::traits::EntryType;
use jct_core::{FsPath, Result, WalkConfig};

/// Summary of a tree copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Directories created below the target.
    pub directories: usize,
    /// Regular files written.
    pub files: usize,
}

/// Recursively copies everything below `source` into `target`.
///
/// `target` is created if missing. Directories are created in a first pass,
/// then files are written. Existing files are overwritten. Entries that are
/// neither files nor directories are skipped.
///
/// # Errors
///
/// Returns [`jct_core::Error::Io`] if `source` cannot be walked or any entry
/// cannot be copied.
pub fn copy_tree(source: &FsPath, target: &FsPath, config: &WalkConfig) -> Result<CopyStats> {
    let entries = source.walk(None, config)?;
    let mut stats = CopyStats::default();

    target.create_dir_all()?;

    // Phase 1: directories
    for entry in entries.iter().filter(|e| e.entry_type == EntryType::Directory) {
        let from = source.rebind(&entry.path);
        if let Some(relative) = from.strip_prefix(source) {
            target.join(relative).create_dir_all()?;
            stats.directories += 1;
        }
    }

    // Phase 2: files
    for entry in entries.iter().filter(|e| e.entry_type == EntryType::File) {
        let from = source.rebind(&entry.path);
        if let Some(relative) = from.strip_prefix(source) {
            target.join(relative).write(&from.read()?)?;
            stats.files += 1;
        }
    }

    tracing::debug!(
        source = %source.uri(),
        target = %target.uri(),
        files = stats.files,
        directories = stats.directories,
        "copied tree"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFs;
    use jct_core::traits::FileSystem;
    use std::sync::Arc;

    #[test]
    fn test_copy_between_memory_filesystems() {
        let from_fs: Arc<dyn FileSystem> = Arc::new(MemoryFs::new());
        let to_fs: Arc<dyn FileSystem> = Arc::new(MemoryFs::new());

        let source = FsPath::new(Arc::clone(&from_fs), "/src");
        source.join("a/b/C.java").write(b"class C {}").unwrap();
        source.join("empty").create_dir_all().unwrap();
        source.join("Top.java").write(b"class Top {}").unwrap();

        let target = FsPath::new(to_fs, "/dst/nested");
        let stats = copy_tree(&source, &target, &WalkConfig::default()).unwrap();

        assert_eq!(stats, CopyStats { directories: 3, files: 2 });
        assert_eq!(target.join("a/b/C.java").read().unwrap(), b"class C {}");
        assert!(target.join("empty").is_dir());
        assert!(target.join("Top.java").is_file());
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFs::new());
        let err = copy_tree(
            &FsPath::new(Arc::clone(&fs), "/nope"),
            &FsPath::new(fs, "/dst"),
            &WalkConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_io());
    }
}
