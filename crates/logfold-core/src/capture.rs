#![forbid(unsafe_code)]

//! Lifecycle guard for the on-disk raw-output capture.
//!
//! A build session keeps its raw tool output in a scratch file owned by the
//! event source. [`CaptureFile`] guards that file's end-of-life: when
//! configured with [`remove_on_drop`](CaptureFile::remove_on_drop) it deletes
//! the file exactly once, either on an explicit [`dispose`](CaptureFile::dispose)
//! call or when the guard goes out of scope. The guard never reads or writes
//! the file's contents.
//!
//! Deletion is best-effort: disposal runs on teardown paths where a panic or
//! a propagated error would be unsafe, so an IO failure is logged at debug
//! level and swallowed.

use std::fs;
use std::path::{Path, PathBuf};

/// Owns the path to a raw build-output capture and optionally deletes the
/// file when its lifetime ends.
///
/// # Example
/// ```no_run
/// use logfold_core::CaptureFile;
///
/// let mut capture = CaptureFile::new("/tmp/build-20260806.log").remove_on_drop(true);
/// // ... hand capture.path() to the event source ...
/// capture.dispose(); // deterministic cleanup; drop would do the same
/// ```
#[derive(Debug)]
pub struct CaptureFile {
    path: PathBuf,
    remove_on_drop: bool,
    disposed: bool,
}

impl CaptureFile {
    /// Guard `path` without taking responsibility for deletion.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            remove_on_drop: false,
            disposed: false,
        }
    }

    /// Set whether the file is deleted when the guard is disposed or dropped.
    #[must_use]
    pub fn remove_on_drop(mut self, remove: bool) -> Self {
        self.remove_on_drop = remove;
        self
    }

    /// Path of the guarded file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether disposal has already run.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Dispose the guard, deleting the file if configured to.
    ///
    /// Idempotent: the first call does the work and marks the guard disposed;
    /// any later call, including the implicit one from `Drop`, is a no-op.
    /// A failed deletion is logged and swallowed, and still counts as
    /// disposed.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if self.remove_on_drop && self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                tracing::debug!(path = %self.path.display(), %err, "capture file removal failed");
            }
        }
    }
}

impl Drop for CaptureFile {
    fn drop(&mut self) {
        self.dispose();
    }
}
