//! Named, self-closing in-memory filesystems.
//!
//! # Examples
//!
//! ```
//! use jct_memfs::TemporaryFileSystem;
//!
//! let sources = TemporaryFileSystem::named("sources").unwrap();
//! sources
//!     .create_file_lines(
//!         "com/example/HelloWorld.java",
//!         ["package com.example;", "public class HelloWorld {}"],
//!     )
//!     .unwrap();
//!
//! let file = sources.path().join("com/example/HelloWorld.java");
//! assert!(file.is_file());
//! assert_eq!(
//!     file.read().unwrap(),
//!     b"package com.example;\npublic class HelloWorld {}"
//! );
//! ```

use crate::cleaner;
use crate::export::{self, CopyStats};
use crate::memory::MemoryFs;
use jct_core::traits::{FileSystem, ResourceLoader};
use jct_core::{Error, FsPath, Result, TempFsConfig, WalkConfig};
use reqwest::Url;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A named in-memory filesystem with a single root directory `/<name>`.
///
/// Clones share the same filesystem. Unless disabled through
/// [`TempFsConfig::close_on_drop`], the filesystem is closed on a background
/// thread once the last clone is dropped. [`TemporaryFileSystem::close`]
/// closes it immediately.
///
/// Equality and hashing use the name and URI, never the content.
#[derive(Clone)]
pub struct TemporaryFileSystem {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    fs: Arc<MemoryFs>,
    root: FsPath,
    uri: String,
    config: TempFsConfig,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if self.config.close_on_drop && self.fs.is_open() {
            cleaner::schedule_close(
                self.name.clone(),
                Arc::clone(&self.fs) as Arc<dyn FileSystem>,
            );
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(Error::invalid_argument(format!(
            "Filesystem name must be a valid directory name (got '{name}')"
        )));
    }
    Ok(())
}

impl TemporaryFileSystem {
    /// Creates a filesystem named `name` that closes when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is not a plain directory
    /// name.
    pub fn named(name: &str) -> Result<Self> {
        Self::named_with(name, &TempFsConfig::default())
    }

    /// Creates a filesystem named `name` with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid name,
    /// [`Error::ConfigError`] for an invalid configuration, or
    /// [`Error::Io`] if the root directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_core::TempFsConfig;
    /// use jct_memfs::TemporaryFileSystem;
    ///
    /// let config = TempFsConfig::builder().close_on_drop(false).build();
    /// let fs = TemporaryFileSystem::named_with("manual", &config).unwrap();
    /// let backing = fs.memory_fs();
    ///
    /// drop(fs);
    /// assert!(jct_core::traits::FileSystem::is_open(&*backing));
    /// ```
    pub fn named_with(name: &str, config: &TempFsConfig) -> Result<Self> {
        validate_name(name)?;
        config.validate()?;

        let fs = Arc::new(MemoryFs::new());
        let root = FsPath::new(Arc::clone(&fs) as Arc<dyn FileSystem>, Path::new("/").join(name));
        root.create_dir_all()?;
        let uri = root.uri();

        tracing::trace!(%name, %uri, "initialized in-memory directory");

        Ok(Self {
            inner: Arc::new(Inner {
                name: name.to_string(),
                fs,
                root,
                uri,
                config: config.clone(),
            }),
        })
    }

    /// Returns the name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the root directory `/<name>`.
    #[must_use]
    pub fn path(&self) -> &FsPath {
        &self.inner.root
    }

    /// Returns the URI of the root directory.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.inner.uri
    }

    /// Returns the backing filesystem.
    #[must_use]
    pub fn memory_fs(&self) -> Arc<MemoryFs> {
        Arc::clone(&self.inner.fs)
    }

    /// Returns `false` once the filesystem has been closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.fs.is_open()
    }

    /// Closes the backing filesystem. Calling this more than once is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the filesystem fails to close.
    pub fn close(&self) -> Result<()> {
        self.inner
            .fs
            .close()
            .map_err(|e| Error::io(format!("closing {}", self.inner.uri), e))
    }

    /// Resolves a caller-supplied target path to a location under the root.
    ///
    /// Relative paths resolve against the root. Absolute paths already under
    /// the root are kept. Any other absolute path is treated as relative,
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the normalized path escapes the
    /// root through `..`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jct_memfs::TemporaryFileSystem;
    ///
    /// let fs = TemporaryFileSystem::named("work").unwrap();
    /// let resolved = fs.resolve("/etc/passwd").unwrap();
    /// assert_eq!(resolved.path().to_str(), Some("/work/etc/passwd"));
    ///
    /// assert!(fs.resolve("../escape").is_err());
    /// ```
    pub fn resolve(&self, target: impl AsRef<Path>) -> Result<FsPath> {
        let target = target.as_ref();
        let root = &self.inner.root;

        let relative = if target.has_root() {
            let normalized = jct_core::normalize(target);
            if let Ok(inside) = normalized.strip_prefix(root.path()) {
                inside.to_path_buf()
            } else {
                let fixed: PathBuf = target.components().skip(1).collect();
                tracing::warn!(
                    "Treating {} as relative path {} (hint: consider removing the leading forward-slash)",
                    target.display(),
                    fixed.display()
                );
                fixed
            }
        } else {
            target.to_path_buf()
        };

        let joined = jct_core::normalize(&root.path().join(&relative));
        if !joined.starts_with(root.path()) {
            return Err(Error::invalid_argument(format!(
                "Path '{}' escapes the root of {}",
                target.display(),
                self.inner.uri
            )));
        }
        Ok(root.rebind(joined))
    }

    /// Writes `content` to `target`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a target escaping the root, or
    /// [`Error::Io`] if the file cannot be written.
    pub fn create_file(&self, target: impl AsRef<Path>, content: &[u8]) -> Result<&Self> {
        self.resolve(target)?.write(content)?;
        Ok(self)
    }

    /// Writes `lines` joined with the configured line separator as UTF-8.
    ///
    /// # Errors
    ///
    /// See [`TemporaryFileSystem::create_file`].
    pub fn create_file_lines<I, S>(&self, target: impl AsRef<Path>, lines: I) -> Result<&Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&self.inner.config.line_separator);
        self.create_file(target, text.as_bytes())
    }

    /// Copies an existing file from any filesystem to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if `existing` cannot be read or the copy cannot
    /// be written.
    pub fn copy_from_path(&self, existing: &FsPath, target: impl AsRef<Path>) -> Result<&Self> {
        let content = existing.read()?;
        self.create_file(target, &content)
    }

    /// Downloads or reads `url` into `target`.
    ///
    /// `file:` URLs are read from the host filesystem, `http:` and `https:`
    /// URLs are fetched with a blocking GET.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unparsable URL,
    /// [`Error::Unsupported`] for any other scheme, or [`Error::Io`] if the
    /// content cannot be fetched or written.
    pub fn copy_from_url(&self, url: &str, target: impl AsRef<Path>) -> Result<&Self> {
        let parsed = Url::parse(url)
            .map_err(|e| Error::invalid_argument(format!("Invalid URL '{url}': {e}")))?;

        let content = match parsed.scheme() {
            "file" => {
                let path = parsed.to_file_path().map_err(|()| {
                    Error::invalid_argument(format!("URL '{url}' is not a local file path"))
                })?;
                FsPath::host(path).read()?
            }
            "http" | "https" => fetch(&parsed)?,
            other => {
                return Err(Error::unsupported(format!(
                    "copying from URLs with scheme '{other}'"
                )));
            }
        };

        self.create_file(target, &content)
    }

    /// Copies a resource found through `loader` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] with kind [`io::ErrorKind::NotFound`] if the
    /// loader has no such resource, or if reading or writing fails.
    pub fn copy_from_class_path(
        &self,
        loader: &dyn ResourceLoader,
        resource: &str,
        target: impl AsRef<Path>,
    ) -> Result<&Self> {
        let resource = resource.strip_prefix('/').unwrap_or(resource);
        let content = loader.read_resource(resource)?.ok_or_else(|| {
            Error::io(
                format!("copying classpath:{resource}"),
                io::Error::new(io::ErrorKind::NotFound, format!("{resource} not found")),
            )
        })?;
        self.create_file(target, &content)
    }

    /// Drains `reader` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading or writing fails.
    pub fn copy_from_reader(&self, mut reader: impl Read, target: impl AsRef<Path>) -> Result<&Self> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| Error::io("reading input stream", e))?;
        self.create_file(target, &content)
    }

    /// Recursively copies the directory `tree` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the tree cannot be walked or copied.
    pub fn copy_tree_from(&self, tree: &FsPath, target: impl AsRef<Path>) -> Result<&Self> {
        let target = self.resolve(target)?;
        export::copy_tree(tree, &target, &WalkConfig::default())?;
        Ok(self)
    }

    /// Copies the whole tree into a new directory under the system temp
    /// directory and returns its path.
    ///
    /// The directory is not removed automatically once the copy succeeds.
    /// If the copy fails, the partially populated directory is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be created or the copy
    /// fails.
    pub fn copy_to_temp_dir(&self) -> Result<PathBuf> {
        let prefix = self
            .inner
            .config
            .export_prefix
            .as_deref()
            .unwrap_or(&self.inner.name);

        let staging = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .map_err(|e| Error::io("creating temporary directory", e))?;

        let stats: CopyStats = export::copy_tree(
            &self.inner.root,
            &FsPath::host(staging.path()),
            &WalkConfig::default(),
        )?;
        let dir = staging.keep();

        tracing::info!(
            "Copied {} into temporary directory on file system at {} ({} files)",
            self.inner.uri,
            dir.display(),
            stats.files
        );
        Ok(dir)
    }
}

fn fetch(url: &Url) -> Result<Vec<u8>> {
    let context = || format!("fetching {url}");
    let response = reqwest::blocking::get(url.clone())
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| Error::io(context(), io::Error::other(e)))?;
    let bytes = response
        .bytes()
        .map_err(|e| Error::io(context(), io::Error::other(e)))?;
    Ok(bytes.to_vec())
}

impl PartialEq for TemporaryFileSystem {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name == other.inner.name && self.inner.uri == other.inner.uri
    }
}

impl Eq for TemporaryFileSystem {}

impl Hash for TemporaryFileSystem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.name.hash(state);
        self.inner.uri.hash(state);
    }
}

impl fmt::Debug for TemporaryFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryFileSystem")
            .field("name", &self.inner.name)
            .field("uri", &self.inner.uri)
            .finish()
    }
}

impl fmt::Display for TemporaryFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.uri)
    }
}

impl From<&TemporaryFileSystem> for FsPath {
    fn from(fs: &TemporaryFileSystem) -> Self {
        fs.inner.root.clone()
    }
}
