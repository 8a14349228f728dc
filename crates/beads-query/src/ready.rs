//! Ready-work queries and block-reason summaries.

use beads_core::filter::WorkFilter;
use beads_core::issue::Issue;
use beads_storage::error::Result;
use beads_storage::Storage;

/// A read-only view over a [`Storage`] backend for planning queries.
///
/// Thin wrapper: the heavy lifting (SQL shape, indexing) stays in
/// `beads-storage`; this type is the reusable surface callers (CLI, daemon)
/// use instead of hand-rolling queries against the trait directly.
pub struct Planner<'a> {
    storage: &'a dyn Storage,
}

impl<'a> Planner<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Returns issues that are ready to work on: `status` in
    /// `{open, in_progress}`, with no undischarged blocking dependency.
    /// Ordered `(priority asc, created_at asc)` by the backing query.
    pub fn ready_work(&self, filter: &WorkFilter) -> Result<Vec<Issue>> {
        self.storage.get_ready_work(filter)
    }

    /// Summarizes why an issue is not ready: names each blocking dependency
    /// whose partner is not yet `closed`.
    pub fn reason_summary(&self, issue_id: &str) -> Result<BlockReason> {
        let deps = self.storage.get_dependencies_with_metadata(issue_id)?;

        let blockers = deps
            .into_iter()
            .filter(|d| d.dependency.dep_type.affects_ready_work())
            .filter(|d| d.issue.status.as_str() != "closed")
            .map(|d| Blocker {
                id: d.issue.id,
                title: d.issue.title,
                status: d.issue.status.as_str().to_string(),
                dep_type: d.dependency.dep_type.as_str().to_string(),
            })
            .collect();

        Ok(BlockReason {
            issue_id: issue_id.to_string(),
            blockers,
        })
    }
}

/// Why an issue is not currently ready for work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReason {
    pub issue_id: String,
    pub blockers: Vec<Blocker>,
}

impl BlockReason {
    /// `true` if no open blocker remains -- the issue would appear in
    /// [`Planner::ready_work`] (modulo status/deferred/template filters).
    pub fn is_ready(&self) -> bool {
        self.blockers.is_empty()
    }
}

/// A single open blocking dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blocker {
    pub id: String,
    pub title: String,
    pub status: String,
    pub dep_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use beads_core::dependency::Dependency;
    use beads_core::enums::DependencyType;
    use beads_core::issue::IssueBuilder;
    use beads_storage::SqliteStore;

    fn test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn ready_work_excludes_blocked() {
        let store = test_store();
        let blocker = IssueBuilder::new("Blocker").id("bd-r1").build();
        let blocked = IssueBuilder::new("Blocked").id("bd-r2").build();
        store.create_issue(&blocker, "alice").unwrap();
        store.create_issue(&blocked, "alice").unwrap();
        store
            .add_dependency(
                &Dependency {
                    issue_id: "bd-r2".into(),
                    depends_on_id: "bd-r1".into(),
                    dep_type: DependencyType::Blocks,
                    created_at: chrono::Utc::now(),
                    created_by: "alice".into(),
                    metadata: String::new(),
                    thread_id: String::new(),
                },
                "alice",
            )
            .unwrap();

        let planner = Planner::new(&store);
        let ready = planner.ready_work(&WorkFilter::default()).unwrap();
        let ids: Vec<&str> = ready.iter().map(|i| i.id.as_str()).collect();
        assert!(ids.contains(&"bd-r1"));
        assert!(!ids.contains(&"bd-r2"));
    }

    #[test]
    fn reason_summary_names_open_blocker() {
        let store = test_store();
        let blocker = IssueBuilder::new("Blocker").id("bd-r3").build();
        let blocked = IssueBuilder::new("Blocked").id("bd-r4").build();
        store.create_issue(&blocker, "alice").unwrap();
        store.create_issue(&blocked, "alice").unwrap();
        store
            .add_dependency(
                &Dependency {
                    issue_id: "bd-r4".into(),
                    depends_on_id: "bd-r3".into(),
                    dep_type: DependencyType::Blocks,
                    created_at: chrono::Utc::now(),
                    created_by: "alice".into(),
                    metadata: String::new(),
                    thread_id: String::new(),
                },
                "alice",
            )
            .unwrap();

        let planner = Planner::new(&store);
        let reason = planner.reason_summary("bd-r4").unwrap();
        assert!(!reason.is_ready());
        assert_eq!(reason.blockers.len(), 1);
        assert_eq!(reason.blockers[0].id, "bd-r3");
    }

    #[test]
    fn reason_summary_ready_when_blocker_closed() {
        let store = test_store();
        let blocker = IssueBuilder::new("Blocker").id("bd-r5").build();
        let blocked = IssueBuilder::new("Blocked").id("bd-r6").build();
        store.create_issue(&blocker, "alice").unwrap();
        store.create_issue(&blocked, "alice").unwrap();
        store
            .add_dependency(
                &Dependency {
                    issue_id: "bd-r6".into(),
                    depends_on_id: "bd-r5".into(),
                    dep_type: DependencyType::Blocks,
                    created_at: chrono::Utc::now(),
                    created_by: "alice".into(),
                    metadata: String::new(),
                    thread_id: String::new(),
                },
                "alice",
            )
            .unwrap();
        store
            .close_issue("bd-r5", "done", "alice", "session-1")
            .unwrap();

        let planner = Planner::new(&store);
        let reason = planner.reason_summary("bd-r6").unwrap();
        assert!(reason.is_ready());
    }
}
