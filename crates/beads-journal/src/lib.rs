//! Text journal codec.
//!
//! Generalizes the teacher's `beads_core::jsonl` issue-only codec into a
//! journal format where each line is a self-contained record describing one
//! issue together with its dependencies, labels, and comments, as the
//! external text representation the Watcher and Importer operate on.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use beads_core::comment::Comment;
use beads_core::dependency::Dependency;
use beads_core::issue::Issue;
use beads_storage::error::Result as StorageResult;
use beads_storage::{Storage, StorageError};

/// Error type for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        source: serde_json::Error,
    },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, JournalError>;

/// One line of the journal: an issue plus its embedded relations.
///
/// Fields not known to the current `Issue`/`JournalRecord` shape are
/// captured in `extra` via `#[serde(flatten)]` so a decode→encode cycle
/// reproduces them unchanged, giving forward compatibility with journals
/// written by a newer version of this format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalRecord {
    #[serde(flatten)]
    pub issue: Issue,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JournalRecord {
    /// Sorts nested collections by their documented keys so two records
    /// holding the same data always serialize identically.
    fn normalize(&mut self) {
        self.dependencies
            .sort_by(|a, b| (&a.depends_on_id, a.dep_type.as_str()).cmp(&(&b.depends_on_id, b.dep_type.as_str())));
        self.labels.sort();
        self.comments.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    }
}

/// Assembles the journal record for a single issue by pulling its
/// dependencies, labels, and comments out of `storage`.
pub fn build_record(storage: &dyn Storage, issue: Issue) -> StorageResult<JournalRecord> {
    let issue_id = issue.id.clone();
    let dependencies = storage
        .get_dependencies_with_metadata(&issue_id)?
        .into_iter()
        .map(|d| d.dependency)
        .collect();
    let labels = storage.get_labels(&issue_id)?;
    let comments = storage.get_comments(&issue_id)?;

    let mut record = JournalRecord {
        issue,
        dependencies,
        labels,
        comments,
        extra: Map::new(),
    };
    record.normalize();
    Ok(record)
}

/// Exports every issue currently in `storage` as journal records, sorted by
/// issue ID.
pub fn export_all(storage: &dyn Storage) -> StorageResult<Vec<JournalRecord>> {
    let issues = storage.search_issues("", &beads_core::filter::IssueFilter::default())?;
    let mut records = issues
        .into_iter()
        .map(|issue| build_record(storage, issue))
        .collect::<StorageResult<Vec<_>>>()?;
    records.sort_by(|a, b| a.issue.id.cmp(&b.issue.id));
    Ok(records)
}

/// Serializes every issue currently in `storage` to `journal_path` via
/// write-temp + fsync + rename, then clears the dirty set.
///
/// Shared by `beads-daemon`'s auto-flush loop and `beads-watcher`'s
/// local-wins reconciliation so both write the journal the same way.
pub fn write_to_file(storage: &dyn Storage, journal_path: &std::path::Path) -> StorageResult<()> {
    let records = export_all(storage)?;

    let tmp_path = journal_path.with_extension("jsonl.tmp");
    {
        let mut tmp = std::fs::File::create(&tmp_path).map_err(|e| StorageError::Internal(e.to_string()))?;
        encode(&mut tmp, &records).map_err(|e| StorageError::Internal(e.to_string()))?;
        tmp.flush().map_err(|e| StorageError::Internal(e.to_string()))?;
        tmp.sync_all().map_err(|e| StorageError::Internal(e.to_string()))?;
    }
    std::fs::rename(&tmp_path, journal_path).map_err(|e| StorageError::Internal(e.to_string()))?;

    storage.drain_dirty()?;
    Ok(())
}

/// Encodes journal records to `writer`, one per line, sorted by issue ID.
pub fn encode<W: Write>(writer: &mut W, records: &[JournalRecord]) -> Result<()> {
    let mut sorted: Vec<&JournalRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.issue.id.cmp(&b.issue.id));

    for record in sorted {
        serde_json::to_writer(&mut *writer, record)
            .map_err(|e| JournalError::Json { line: 0, column: 0, source: e })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Returns an iterator decoding journal records from `reader`.
pub fn decode<R: BufRead>(reader: R) -> JournalIter<R> {
    JournalIter { reader, line_number: 0 }
}

/// Streaming decoder over a journal reader.
pub struct JournalIter<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> Iterator for JournalIter<R> {
    type Item = Result<JournalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return match serde_json::from_str::<JournalRecord>(trimmed) {
                        Ok(record) => Some(Ok(record)),
                        Err(e) => Some(Err(JournalError::Json {
                            line: self.line_number,
                            column: e.column(),
                            source: e,
                        })),
                    };
                }
                Err(e) => return Some(Err(JournalError::Io(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beads_core::issue::IssueBuilder;
    use std::io::BufReader;

    fn sample_record(id: &str, title: &str) -> JournalRecord {
        JournalRecord {
            issue: IssueBuilder::new(title).id(id).build(),
            dependencies: Vec::new(),
            labels: Vec::new(),
            comments: Vec::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn encode_sorts_by_id() {
        let records = vec![sample_record("bd-002", "Second"), sample_record("bd-001", "First")];
        let mut buf = Vec::new();
        encode(&mut buf, &records).unwrap();

        let reader = BufReader::new(buf.as_slice());
        let decoded: Vec<JournalRecord> = decode(reader).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(decoded[0].issue.id, "bd-001");
        assert_eq!(decoded[1].issue.id, "bd-002");
    }

    #[test]
    fn unknown_fields_round_trip() {
        let mut record = sample_record("bd-003", "Third");
        record
            .extra
            .insert("future_field".to_string(), Value::String("kept".into()));

        let mut buf = Vec::new();
        encode(&mut buf, std::slice::from_ref(&record)).unwrap();

        let reader = BufReader::new(buf.as_slice());
        let decoded: Vec<JournalRecord> = decode(reader).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(
            decoded[0].extra.get("future_field"),
            Some(&Value::String("kept".into()))
        );

        let mut buf2 = Vec::new();
        encode(&mut buf2, &decoded).unwrap();
        assert_eq!(buf, buf2);
    }

    #[test]
    fn reports_line_and_column_on_error() {
        let data = b"{\"id\":\"bd-001\"}\nnot-json\n";
        let reader = BufReader::new(data.as_slice());
        let results: Vec<_> = decode(reader).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(JournalError::Json { line, .. }) => assert_eq!(*line, 2),
            other => panic!("expected JSON error, got {:?}", other),
        }
    }
}
