//! Watches the on-disk journal for external edits and reconciles them into
//! the store.
//!
//! Grounded in the debounce-timer/callback-on-settle shape used for
//! background job-queue watching elsewhere in the retrieval corpus,
//! generalized here from queue events to filesystem events via the `notify`
//! crate, and kept synchronous (`std::thread` + `std::sync::mpsc`) to match
//! the rest of this codebase rather than introducing an async runtime.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use thiserror::Error;

use beads_importer::ImportReport;
use beads_storage::{Storage, StorageError};

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    #[error("journal error: {0}")]
    Journal(#[from] beads_journal::JournalError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WatcherError>;

/// The result of one reconciliation pass.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The journal matched the store; nothing to do.
    NoChange,
    /// The journal was applied to the store.
    Applied(ImportReport),
    /// The store has unflushed local changes; local wins, so the journal was
    /// overwritten from the store and the external journal's content was
    /// discarded rather than imported.
    SkippedLocalDirty { dirty_count: usize },
}

/// Reads `journal_path` and applies any changes it describes to `storage`,
/// unless `storage` already has unflushed local changes (local wins: the
/// journal is overwritten from the store instead, and the on-disk journal's
/// divergent content is discarded without being imported).
pub fn reconcile(storage: &dyn Storage, journal_path: &Path, actor: &str) -> Result<ReconcileOutcome> {
    let dirty = storage.dirty_issues()?;
    if !dirty.is_empty() {
        beads_journal::write_to_file(storage, journal_path)?;
        return Ok(ReconcileOutcome::SkippedLocalDirty {
            dirty_count: dirty.len(),
        });
    }

    if !journal_path.exists() {
        return Ok(ReconcileOutcome::NoChange);
    }

    let reader = BufReader::new(File::open(journal_path)?);
    let records = beads_journal::decode(reader).collect::<beads_journal::Result<Vec<_>>>()?;

    let report = beads_importer::dry_run(storage, &records)?;
    if report.new_ids.is_empty() && report.colliding_ids.is_empty() {
        return Ok(ReconcileOutcome::NoChange);
    }

    let report = beads_importer::apply(storage, &records, false, false, actor)?;
    Ok(ReconcileOutcome::Applied(report))
}

/// A background watcher that debounces filesystem events on the journal's
/// directory and reconciles on settle.
pub struct Watcher {
    _fs_watcher: RecommendedWatcher,
    thread: Option<thread::JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl Watcher {
    /// Spawns a watcher on the directory containing `journal_path`.
    ///
    /// Every filesystem event under that directory resets a `debounce`
    /// timer; `on_reconcile` fires once per settle, after `reconcile` runs.
    pub fn spawn(
        storage: Arc<dyn Storage>,
        journal_path: PathBuf,
        debounce: Duration,
        actor: String,
        mut on_reconcile: impl FnMut(Result<ReconcileOutcome>) + Send + 'static,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<()>();
        let watch_target = journal_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let mut fs_watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if res.is_ok() {
                let _ = tx.send(());
            }
        })?;
        fs_watcher.watch(&watch_target, RecursiveMode::NonRecursive)?;

        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = Arc::clone(&stop);

        let thread = thread::spawn(move || loop {
            if stop_for_thread.load(Ordering::Relaxed) {
                return;
            }
            match rx.recv_timeout(debounce) {
                Ok(()) => {
                    // Drain further events until the directory settles.
                    while rx.recv_timeout(debounce).is_ok() {}
                    let outcome = reconcile(storage.as_ref(), &journal_path, &actor);
                    on_reconcile(outcome);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => return,
            }
        });

        Ok(Self {
            _fs_watcher: fs_watcher,
            thread: Some(thread),
            stop,
        })
    }
}

impl Drop for Watcher {
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
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn reconcile_applies_new_journal_records() {
        let store = SqliteStore::open_in_memory().unwrap();
        let dir = tempdir().unwrap();
        let journal_path = dir.path().join("journal.jsonl");

        let record = beads_journal::build_record(
            &store,
            IssueBuilder::new("From journal").id("bd-w1").build(),
        );
        // Build against an empty in-memory store just to get a well-formed
        // record shape; the issue doesn't exist there either way.
        let record = record.unwrap_or_else(|_| unreachable!());
        let mut file = File::create(&journal_path).unwrap();
        beads_journal::encode(&mut file, std::slice::from_ref(&record)).unwrap();
        drop(file);

        let outcome = reconcile(&store, &journal_path, "watcher").unwrap();
        assert!(matches!(outcome, ReconcileOutcome::Applied(_)));
        assert!(store.get_issue("bd-w1").is_ok());
    }

    #[test]
    fn reconcile_overwrites_journal_from_store_when_dirty() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create_issue(&IssueBuilder::new("Local edit").id("bd-w2").build(), "alice")
            .unwrap();
        // create_issue already marks bd-w2 dirty.

        let dir = tempdir().unwrap();
        let journal_path = dir.path().join("journal.jsonl");
        let mut file = File::create(&journal_path).unwrap();
        file.write_all(b"{\"id\":\"bd-stale\",\"title\":\"stale external edit\"}\n")
            .unwrap();

        let outcome = reconcile(&store, &journal_path, "watcher").unwrap();
        assert!(matches!(
            outcome,
            ReconcileOutcome::SkippedLocalDirty { dirty_count: 1 }
        ));

        // Local wins: the journal now reflects the store, and the stale
        // external content is gone.
        let contents = std::fs::read_to_string(&journal_path).unwrap();
        assert!(contents.contains("bd-w2"));
        assert!(!contents.contains("bd-stale"));
        assert!(store.dirty_issues().unwrap().is_empty());
    }

    #[test]
    fn reconcile_reports_no_change_for_missing_journal() {
        let store = SqliteStore::open_in_memory().unwrap();
        let dir = tempdir().unwrap();
        let journal_path = dir.path().join("missing.jsonl");

        let outcome = reconcile(&store, &journal_path, "watcher").unwrap();
        assert!(matches!(outcome, ReconcileOutcome::NoChange));
    }
}
