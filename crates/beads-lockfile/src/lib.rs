//! Advisory lock file for daemon ownership.
//!
//! A `.beads/daemon.lock` file records which process owns direct access to
//! the Store. The file handle itself holds an `fs2` advisory lock as the
//! authoritative check; the PID written inside is informational only, used
//! to produce a useful error message when a stale lock is found.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("lock held by pid {pid} (socket {socket})")]
    Held { pid: u32, socket: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LockError>;

/// Contents of a lock file: the owning process and its RPC socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockInfo {
    pub pid: u32,
    pub socket_path: String,
}

impl LockInfo {
    fn encode(&self) -> String {
        format!("{}\n{}\n", self.pid, self.socket_path)
    }

    fn decode(s: &str) -> Option<Self> {
        let mut lines = s.lines();
        let pid: u32 = lines.next()?.trim().parse().ok()?;
        let socket_path = lines.next()?.trim().to_string();
        Some(Self { pid, socket_path })
    }
}

/// A held advisory lock. Dropping it releases the OS-level lock; the lock
/// file itself is removed on drop as well, so a clean shutdown leaves no
/// trace for the next process to consider stale.
pub struct LockGuard {
    path: PathBuf,
    file: File,
}

impl LockGuard {
    /// Attempts to acquire the daemon lock at `path`, writing `info` into it.
    ///
    /// Fails with `LockError::Held` if another live process holds the lock.
    /// A lock file whose OS-level lock is not actually held by anyone (the
    /// owning process died without cleanup) is silently reclaimed.
    pub fn acquire(path: &Path, info: &LockInfo) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(_) => {
                let existing = read_info(path).ok().flatten();
                return Err(match existing {
                    Some(existing) => LockError::Held {
                        pid: existing.pid,
                        socket: existing.socket_path,
                    },
                    None => LockError::Held {
                        pid: 0,
                        socket: String::new(),
                    },
                });
            }
        }

        // We hold the OS lock; it's safe to overwrite the file contents.
        let mut file = file;
        file.set_len(0)?;
        use std::io::Seek;
        file.seek(std::io::SeekFrom::Start(0))?;
        file.write_all(info.encode().as_bytes())?;
        file.flush()?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Returns the info of whoever currently holds (or last held) `path`,
    /// without attempting to acquire the lock.
    pub fn inspect(path: &Path) -> Option<LockInfo> {
        read_info(path).ok().flatten()
    }

    /// Returns `true` if `path` is held by a live process right now.
    ///
    /// Probes liveness by attempting a non-blocking shared lock: if it
    /// succeeds, nobody holds an exclusive lock, so the file is stale (or
    /// absent); the attempt itself is immediately released.
    pub fn is_held(path: &Path) -> bool {
        let Ok(file) = OpenOptions::new().read(true).write(true).open(path) else {
            return false;
        };
        match file.try_lock_shared() {
            Ok(()) => {
                let _ = fs2::FileExt::unlock(&file);
                false
            }
            Err(_) => true,
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        let _ = fs::remove_file(&self.path);
    }
}

fn read_info(path: &Path) -> std::io::Result<Option<LockInfo>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    Ok(LockInfo::decode(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn acquire_and_release() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("daemon.lock");
        let info = LockInfo {
            pid: std::process::id(),
            socket_path: "daemon.sock".into(),
        };

        let guard = LockGuard::acquire(&path, &info).unwrap();
        assert!(path.exists());
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("daemon.lock");
        let info = LockInfo {
            pid: std::process::id(),
            socket_path: "daemon.sock".into(),
        };

        let _guard = LockGuard::acquire(&path, &info).unwrap();
        let err = LockGuard::acquire(&path, &info).unwrap_err();
        assert!(matches!(err, LockError::Held { .. }));
    }

    #[test]
    fn inspect_reads_info_without_locking() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("daemon.lock");
        let info = LockInfo {
            pid: 4242,
            socket_path: "daemon.sock".into(),
        };
        let guard = LockGuard::acquire(&path, &info).unwrap();

        let inspected = LockGuard::inspect(&path).unwrap();
        assert_eq!(inspected.pid, 4242);
        drop(guard);
    }
}
