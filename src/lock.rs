use crate::error::{Result, SousChefError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default lock timeout for cache and shelf writes
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A guard that holds an exclusive lock next to a data file. The lock is
/// released when dropped.
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Acquire an exclusive lock for `path` with timeout
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        let start = Instant::now();
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(FileLock { file }),
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(_) => return Err(SousChefError::Locked(path.display().to_string())),
            }
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
