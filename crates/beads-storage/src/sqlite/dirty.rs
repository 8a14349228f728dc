//! Child counter and dirty-set bookkeeping for hierarchical IDs and
//! journal flushing.

use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::Result;
use crate::sqlite::store::SqliteStore;

/// Atomically reads and increments `parent_id`'s child counter, returning
/// the new value. Uses `INSERT ... ON CONFLICT ... RETURNING` so a
/// first-ever child and a Nth child are both a single round trip.
pub(crate) fn next_child_number_on_conn(conn: &Connection, parent_id: &str) -> Result<i64> {
    let counter: i64 = conn.query_row(
        "INSERT INTO child_counters (parent_id, counter) VALUES (?1, 1)
         ON CONFLICT(parent_id) DO UPDATE SET counter = counter + 1
         RETURNING counter",
        params![parent_id],
        |row| row.get(0),
    )?;
    Ok(counter)
}

pub(crate) fn mark_dirty_on_conn(conn: &Connection, issue_id: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO dirty_issues (issue_id, marked_at)
         VALUES (?1, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
        params![issue_id],
    )?;
    Ok(())
}

pub(crate) fn dirty_issues_on_conn(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT issue_id FROM dirty_issues ORDER BY marked_at ASC")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

impl SqliteStore {
    pub(crate) fn next_child_number_impl(&self, parent_id: &str) -> Result<i64> {
        let conn = self.lock_conn()?;
        next_child_number_on_conn(&conn, parent_id)
    }

    pub(crate) fn mark_dirty_impl(&self, issue_id: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        mark_dirty_on_conn(&conn, issue_id)
    }

    pub(crate) fn dirty_issues_impl(&self) -> Result<Vec<String>> {
        let conn = self.lock_conn()?;
        dirty_issues_on_conn(&conn)
    }

    pub(crate) fn drain_dirty_impl(&self) -> Result<Vec<String>> {
        let conn = self.lock_conn()?;
        let ids = dirty_issues_on_conn(&conn)?;
        conn.execute("DELETE FROM dirty_issues", [])?;
        debug!(count = ids.len(), "drained dirty set");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn child_numbers_increment() {
        let store = test_store();
        assert_eq!(store.next_child_number_impl("bd-p1").unwrap(), 1);
        assert_eq!(store.next_child_number_impl("bd-p1").unwrap(), 2);
        assert_eq!(store.next_child_number_impl("bd-p1").unwrap(), 3);
        // Independent parents have independent counters.
        assert_eq!(store.next_child_number_impl("bd-p2").unwrap(), 1);
    }

    #[test]
    fn dirty_set_mark_and_drain() {
        let store = test_store();
        store.mark_dirty_impl("bd-a").unwrap();
        store.mark_dirty_impl("bd-b").unwrap();
        // Marking twice is idempotent.
        store.mark_dirty_impl("bd-a").unwrap();

        let dirty = store.dirty_issues_impl().unwrap();
        assert_eq!(dirty.len(), 2);

        let drained = store.drain_dirty_impl().unwrap();
        assert_eq!(drained.len(), 2);
        assert!(store.dirty_issues_impl().unwrap().is_empty());
    }
}
