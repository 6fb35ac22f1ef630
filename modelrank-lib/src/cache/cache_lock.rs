use crate::Result;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

const LOG_TARGET: &str = "     cache";

/// Guard that releases an entry lock when dropped
#[derive(Debug)]
pub struct EntryLockGuard(File);

impl Drop for EntryLockGuard {
    fn drop(&mut self) {
        // Lock is automatically released when the file is closed
        if let Err(e) = FileExt::unlock(&self.0) {
            log::warn!(target: LOG_TARGET, "Could not unlock cache entry: {e:#}");
        }
    }
}

/// Acquire an exclusive advisory lock on a cache entry's lock file.
///
/// Blocks until the lock is available, so callers on an async runtime should invoke this
/// from a blocking task.
pub fn lock_entry(lock_path: &Path) -> Result<EntryLockGuard> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .into_app_err_with(|| format!("opening cache lock file at '{}'", lock_path.display()))?;

    FileExt::lock_exclusive(&file).into_app_err_with(|| format!("acquiring exclusive lock on '{}'", lock_path.display()))?;
    log::trace!(target: LOG_TARGET, "Acquired cache lock at '{}'", lock_path.display());

    Ok(EntryLockGuard(file))
}
