//! Background teardown of in-memory filesystems.
//!
//! Dropping the last handle of a [`crate::TemporaryFileSystem`] must not run
//! the close inline, so the filesystem is handed to a single worker thread
//! over a channel. Failures are logged and never reach the dropping thread.

use jct_core::traits::FileSystem;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, LazyLock};
use std::thread;
use tracing::{Dispatch, dispatcher};

const THREAD_NAME: &str = "jct-memfs-cleaner";

/// A pending close, carrying the subscriber that was current when the
/// filesystem was dropped so its logs land in the same place.
#[derive(Debug)]
struct CloseJob {
    name: String,
    fs: Arc<dyn FileSystem>,
    dispatch: Dispatch,
}

impl CloseJob {
    fn run(self) {
        dispatcher::with_default(&self.dispatch, || match self.fs.close() {
            Ok(()) => tracing::trace!(name = %self.name, "closed in-memory filesystem in background"),
            Err(e) => tracing::error!(
                name = %self.name,
                error = %e,
                "failed to close in-memory filesystem"
            ),
        });
    }
}

static CLEANER: LazyLock<Option<Sender<CloseJob>>> = LazyLock::new(|| {
    let (sender, receiver) = mpsc::channel::<CloseJob>();
    let spawned = thread::Builder::new()
        .name(THREAD_NAME.to_string())
        .spawn(move || {
            for job in receiver {
                job.run();
            }
        });

    match spawned {
        Ok(_) => Some(sender),
        Err(e) => {
            tracing::error!(error = %e, "failed to start {THREAD_NAME} thread");
            None
        }
    }
});

/// Schedules `fs` to be closed on the cleaner thread.
///
/// If the cleaner thread could not be started, the close runs on the
/// calling thread instead.
pub(crate) fn schedule_close(name: String, fs: Arc<dyn FileSystem>) {
    let job = CloseJob {
        name,
        fs,
        dispatch: dispatcher::get_default(Dispatch::clone),
    };
    match CLEANER.as_ref() {
        Some(sender) => {
            if let Err(mpsc::SendError(job)) = sender.send(job) {
                tracing::warn!(name = %job.name, "cleaner thread has stopped, closing inline");
                job.run();
            }
        }
        None => job.run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFs;
    use jct_core::traits::{DirEntry, Metadata};
    use std::io::{self, Write};
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Debug)]
    struct StuckFs;

    impl FileSystem for StuckFs {
        fn id(&self) -> &str {
            "stuck"
        }

        fn scheme(&self) -> &str {
            "stuck"
        }

        fn metadata(&self, _path: &Path) -> io::Result<Metadata> {
            Err(io::ErrorKind::NotFound.into())
        }

        fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
            Err(io::ErrorKind::NotFound.into())
        }

        fn write(&self, _path: &Path, _data: &[u8]) -> io::Result<()> {
            Err(io::ErrorKind::PermissionDenied.into())
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Err(io::ErrorKind::PermissionDenied.into())
        }

        fn read_dir(&self, _path: &Path) -> io::Result<Vec<DirEntry>> {
            Err(io::ErrorKind::NotFound.into())
        }

        fn close(&self) -> io::Result<()> {
            Err(io::Error::other("device busy"))
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_scheduled_close_runs_off_thread() {
        let fs = Arc::new(MemoryFs::new());
        schedule_close("scheduled".to_string(), Arc::clone(&fs) as Arc<dyn FileSystem>);

        let deadline = Instant::now() + Duration::from_secs(5);
        while fs.is_open() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!fs.is_open());
    }

    #[test]
    fn test_failed_close_is_logged_not_propagated() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            schedule_close("stuck".to_string(), Arc::new(StuckFs));
        });

        let deadline = Instant::now() + Duration::from_secs(5);
        while !logs.contents().contains("failed to close in-memory filesystem")
            && Instant::now() < deadline
        {
            thread::sleep(Duration::from_millis(5));
        }

        let output = logs.contents();
        assert!(output.contains("failed to close in-memory filesystem"), "{output}");
        assert!(output.contains("device busy"), "{output}");
        assert!(output.contains("stuck"), "{output}");
    }
}
