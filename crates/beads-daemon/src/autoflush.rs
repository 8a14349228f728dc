//! Timer-coalesced journal flush.
//!
//! Grounded in the teacher's config crate's atomic `save_config`
//! (write-temp, fsync, rename) generalized here to the full journal, and in
//! the same debounce shape `beads-watcher` uses, run in the opposite
//! direction: Store -> journal instead of journal -> Store.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use beads_storage::{Storage, StorageError};

/// Default delay between the dirty set becoming non-empty and a flush
/// firing, absent explicit configuration.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Serializes the full current store state to `journal_path` via
/// [`beads_journal::write_to_file`], then clears the dirty set.
///
/// Called both by the debounced background loop and directly by the
/// `Flush` RPC for an immediate, synchronous flush. Does not touch git;
/// use [`flush_now_with_git`] when a commit-on-flush is wanted.
pub fn flush_now(storage: &dyn Storage, journal_path: &Path) -> Result<(), StorageError> {
    beads_journal::write_to_file(storage, journal_path)
}

/// Like [`flush_now`], but also commits the journal via
/// `beads_git::commands::commit_journal` when `repo_root` is `Some`
/// (callers pass `None` when `no-git-ops` is configured). Git failures are
/// logged but do not fail the flush: the journal write already succeeded.
pub fn flush_now_with_git(
    storage: &dyn Storage,
    journal_path: &Path,
    repo_root: Option<&Path>,
) -> Result<(), StorageError> {
    flush_now(storage, journal_path)?;

    if let Some(repo_root) = repo_root {
        if let Err(e) = beads_git::commands::commit_journal(repo_root, journal_path, "beads: auto-flush journal") {
            tracing::warn!(error = %e, "failed to commit journal");
        }
    }

    Ok(())
}

/// A background thread that watches the dirty set and flushes after it has
/// been non-empty (and unchanged in size) for `delay`.
pub struct AutoFlusher {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AutoFlusher {
    /// `git_repo_root`: `Some(root)` to commit the journal on every flush
    /// (absent when `no-git-ops` is configured or no `.git` was found).
    pub fn spawn(
        storage: Arc<dyn Storage>,
        journal_path: std::path::PathBuf,
        delay: Duration,
        poll_interval: Duration,
        git_repo_root: Option<std::path::PathBuf>,
        mut on_flush: impl FnMut(Result<(), StorageError>) + Send + 'static,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            let mut dirty_since: Option<std::time::Instant> = None;
            loop {
                if stop_for_thread.load(Ordering::Relaxed) {
                    return;
                }
                thread::sleep(poll_interval);

                let is_dirty = !storage
                    .dirty_issues()
                    .unwrap_or_default()
                    .is_empty();

                match (is_dirty, dirty_since) {
                    (true, None) => dirty_since = Some(std::time::Instant::now()),
                    (true, Some(since)) if since.elapsed() >= delay => {
                        on_flush(flush_now_with_git(
                            storage.as_ref(),
                            &journal_path,
                            git_repo_root.as_deref(),
                        ));
                        dirty_since = None;
                    }
                    (false, _) => dirty_since = None,
                    _ => {}
                }
            }
        });

        Self {
            stop,
            thread: Some(thread),
        }
    }
}

impl Drop for AutoFlusher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beads_core::issue::IssueBuilder;
    use beads_storage::SqliteStore;
    use std::sync::mpsc as std_mpsc;
    use tempfile::tempdir;

    #[test]
    fn flush_now_writes_journal_and_clears_dirty() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create_issue(&IssueBuilder::new("Flush me").id("bd-f1").build(), "alice")
            .unwrap();
        assert!(!store.dirty_issues().unwrap().is_empty());

        let dir = tempdir().unwrap();
        let journal_path = dir.path().join("journal.jsonl");
        flush_now(&store, &journal_path).unwrap();

        assert!(store.dirty_issues().unwrap().is_empty());
        let contents = std::fs::read_to_string(&journal_path).unwrap();
        assert!(contents.contains("bd-f1"));
    }

    #[test]
    fn autoflusher_flushes_after_delay() {
        let store: Arc<dyn Storage> = Arc::new(SqliteStore::open_in_memory().unwrap());
        store
            .create_issue(&IssueBuilder::new("Background flush").id("bd-f2").build(), "alice")
            .unwrap();

        let dir = tempdir().unwrap();
        let journal_path = dir.path().join("journal.jsonl");
        let (tx, rx) = std_mpsc::channel();

        let _flusher = AutoFlusher::spawn(
            Arc::clone(&store),
            journal_path.clone(),
            Duration::from_millis(20),
            Duration::from_millis(5),
            None,
            move |result| {
                let _ = tx.send(result.is_ok());
            },
        );

        let flushed = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(flushed);
        assert!(journal_path.exists());
    }
}
