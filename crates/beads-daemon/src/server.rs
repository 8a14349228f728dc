//! Daemon process lifecycle: lock acquisition, socket accept loop, one
//! thread per connection, auto-flush, and (optionally) the journal watcher.
//!
//! Grounded in `bd`'s `ctrlc`-based signal handling for the shutdown path,
//! and in the teacher's `SqliteStore` single-connection-`Mutex` model for
//! write serialization -- dispatch itself takes no extra lock, since the
//! Store already serializes at the connection level.

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use beads_lockfile::{LockGuard, LockInfo};
use beads_storage::Storage;
use beads_watcher::Watcher;

use crate::autoflush::AutoFlusher;
use crate::dispatcher;
use crate::protocol::Request;
use crate::transport;

pub struct Server {
    storage: Arc<dyn Storage>,
    journal_path: PathBuf,
    socket_path: PathBuf,
    lock_path: PathBuf,
}

impl Server {
    pub fn new(storage: Arc<dyn Storage>, beads_dir: &Path) -> Self {
        Self {
            storage,
            journal_path: beads_dir.join("journal.jsonl"),
            socket_path: beads_dir.join("daemon.sock"),
            lock_path: beads_dir.join("daemon.lock"),
        }
    }

    /// Acquires the daemon lock, binds the socket, starts auto-flush, and
    /// serves connections until `stop` is set (by the returned handle's
    /// `Drop`, or a Ctrl+C caught by [`run_until_signal`]).
    pub fn run(self, stop: Arc<AtomicBool>) -> io::Result<()> {
        let lock_info = LockInfo {
            pid: std::process::id(),
            socket_path: self.socket_path.to_string_lossy().to_string(),
        };
        let _lock = LockGuard::acquire(&self.lock_path, &lock_info)
            .map_err(|e| io::Error::other(e.to_string()))?;

        let _ = std::fs::remove_file(&self.socket_path);
        let listener = UnixListener::bind(&self.socket_path)?;
        listener.set_nonblocking(true)?;

        let git_repo_root = beads_git::gitdir::find_git_root(
            self.journal_path.parent().unwrap_or(Path::new(".")),
        );

        let _autoflusher = AutoFlusher::spawn(
            Arc::clone(&self.storage),
            self.journal_path.clone(),
            crate::autoflush::DEFAULT_DELAY,
            Duration::from_millis(100),
            git_repo_root,
            |result| {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "auto-flush failed");
                }
            },
        );

        let _watcher = Watcher::spawn(
            Arc::clone(&self.storage),
            self.journal_path.clone(),
            Duration::from_millis(300),
            "daemon".to_string(),
            |result| match result {
                Ok(outcome) => tracing::debug!(?outcome, "journal watcher reconciled"),
                Err(e) => tracing::warn!(error = %e, "journal watcher failed"),
            },
        )
        .map_err(|e| io::Error::other(e.to_string()))?;

        tracing::info!(socket = %self.socket_path.display(), "daemon listening");

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            match listener.accept() {
                Ok((stream, _addr)) => {
                    let storage = Arc::clone(&self.storage);
                    let journal_path = self.journal_path.clone();
                    thread::spawn(move || handle_connection(storage.as_ref(), &journal_path, stream));
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(20));
                }
                Err(e) => return Err(e),
            }
        }

        let _ = std::fs::remove_file(&self.socket_path);
        Ok(())
    }

    /// Convenience entry point: installs a Ctrl+C handler that flips an
    /// `AtomicBool`, then runs until it's set.
    pub fn run_until_signal(self) -> io::Result<()> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_handler = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop_for_handler.store(true, Ordering::Relaxed);
        })
        .map_err(io::Error::other)?;

        self.run(stop)
    }
}

fn handle_connection(storage: &dyn Storage, journal_path: &Path, mut stream: UnixStream) {
    stream.set_nonblocking(false).ok();
    loop {
        let request: Request = match transport::read_frame(&mut stream) {
            Ok(r) => r,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return,
            Err(e) => {
                tracing::warn!(error = %e, "malformed rpc frame, closing connection");
                return;
            }
        };

        let response = dispatcher::dispatch(storage, journal_path, request);
        if transport::write_frame(&mut stream, &response).is_err() {
            return;
        }
    }
}
