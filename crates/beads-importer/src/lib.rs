//! Journal import: classification, reference integrity checking, and
//! collision resolution.
//!
//! Generalizes the teacher's `beads_core::jsonl` load-into-store path into a
//! classify-then-apply pipeline so a caller can inspect what an import would
//! do (`dry_run`) before committing it (`apply`).

pub mod migration;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use beads_core::content_hash::compute_content_hash;
use beads_core::idgen::{adaptive_defaults, compute_adaptive_length, generate_hash_id};
use beads_journal::JournalRecord;
use beads_storage::error::Result as StorageResult;
use beads_storage::{Storage, StorageError};

/// How an incoming record relates to the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportClass {
    /// No issue with this ID exists locally.
    New,
    /// An issue with this ID exists locally and its content hash matches.
    Idempotent,
    /// An issue with this ID exists locally but its content differs.
    Colliding,
}

/// A dependency edge whose `depends_on_id` names neither a batch member nor
/// an existing local issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    pub issue_id: String,
    pub depends_on_id: String,
}

/// Result of classifying (and, for [`apply`], applying) an import batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub new_ids: Vec<String>,
    pub idempotent_ids: Vec<String>,
    /// IDs classified as colliding, before any resolution.
    pub colliding_ids: Vec<String>,
    /// `(old_id, new_id)` for collisions resolved by minting a fresh ID.
    pub resolved: Vec<(String, String)>,
    pub dangling: Vec<DanglingReference>,
    /// `true` if [`apply`] actually wrote to the store.
    pub applied: bool,
}

impl ImportReport {
    pub fn has_unresolved_collisions(&self) -> bool {
        !self.colliding_ids.is_empty()
    }
}

/// Classifies a single record against the local store.
pub fn classify(storage: &dyn Storage, record: &JournalRecord) -> StorageResult<ImportClass> {
    match storage.get_issue(&record.issue.id) {
        Ok(local) => {
            if compute_content_hash(&local) == compute_content_hash(&record.issue) {
                Ok(ImportClass::Idempotent)
            } else {
                Ok(ImportClass::Colliding)
            }
        }
        Err(StorageError::NotFound { .. }) => Ok(ImportClass::New),
        Err(e) => Err(e),
    }
}

/// Classifies every record in `records` and checks reference integrity,
/// without writing anything to `storage`.
pub fn dry_run(storage: &dyn Storage, records: &[JournalRecord]) -> StorageResult<ImportReport> {
    let mut report = ImportReport::default();

    let batch_ids: HashSet<&str> = records.iter().map(|r| r.issue.id.as_str()).collect();

    for record in records {
        match classify(storage, record)? {
            ImportClass::New => report.new_ids.push(record.issue.id.clone()),
            ImportClass::Idempotent => report.idempotent_ids.push(record.issue.id.clone()),
            ImportClass::Colliding => report.colliding_ids.push(record.issue.id.clone()),
        }
    }

    report.dangling = find_dangling_references(storage, records, &batch_ids)?;

    Ok(report)
}

/// Looks up, in one batched query, which referenced IDs exist neither in the
/// batch itself nor in `storage`.
fn find_dangling_references(
    storage: &dyn Storage,
    records: &[JournalRecord],
    batch_ids: &HashSet<&str>,
) -> StorageResult<Vec<DanglingReference>> {
    let mut external_refs: HashSet<String> = HashSet::new();
    for record in records {
        for dep in &record.dependencies {
            if !batch_ids.contains(dep.depends_on_id.as_str()) {
                external_refs.insert(dep.depends_on_id.clone());
            }
        }
    }

    let external_ref_vec: Vec<String> = external_refs.iter().cloned().collect();
    let existing: HashSet<String> = storage
        .get_issues_by_ids(&external_ref_vec)?
        .into_iter()
        .map(|i| i.id)
        .collect();

    let mut dangling = Vec::new();
    for record in records {
        for dep in &record.dependencies {
            if !batch_ids.contains(dep.depends_on_id.as_str())
                && !existing.contains(&dep.depends_on_id)
            {
                dangling.push(DanglingReference {
                    issue_id: record.issue.id.clone(),
                    depends_on_id: dep.depends_on_id.clone(),
                });
            }
        }
    }
    Ok(dangling)
}

/// Applies an import batch to `storage` in a single transaction.
///
/// Colliding records abort the whole batch unless `resolve_collisions` is
/// set, in which case each is assigned a fresh hash ID and every reference
/// to its old ID *within this batch* is rewritten before insertion.
/// References to other repositories' IDs embedded as plain text (rather
/// than as dependency edges) are untouched; see [`migration`] for that.
///
/// Dangling references (a dependency on an ID that exists neither in this
/// batch nor in `storage`) are reported but otherwise permissive by
/// default. With `strict` set, any dangling reference aborts the batch
/// instead, matching `resolve_collisions`'s abort-by-default-unless-opted-in
/// shape for collisions.
pub fn apply(
    storage: &dyn Storage,
    records: &[JournalRecord],
    resolve_collisions: bool,
    strict: bool,
    actor: &str,
) -> StorageResult<ImportReport> {
    let batch_ids: HashSet<&str> = records.iter().map(|r| r.issue.id.as_str()).collect();
    let mut report = dry_run(storage, records)?;

    if report.has_unresolved_collisions() && !resolve_collisions {
        return Err(StorageError::Conflict(format!(
            "{} colliding id(s), not resolved: {}",
            report.colliding_ids.len(),
            report.colliding_ids.join(", ")
        )));
    }

    if strict && !report.dangling.is_empty() {
        let refs = report
            .dangling
            .iter()
            .map(|d| format!("{} -> {}", d.issue_id, d.depends_on_id))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(StorageError::Conflict(format!(
            "{} dangling reference(s) in strict mode: {}",
            report.dangling.len(),
            refs
        )));
    }

    let mut records: Vec<JournalRecord> = records.to_vec();

    if resolve_collisions && !report.colliding_ids.is_empty() {
        let mut rename: HashMap<String, String> = HashMap::new();
        let stats = storage.get_statistics()?;
        let mut minted: HashSet<String> = HashSet::new();

        for record in &mut records {
            if !report.colliding_ids.contains(&record.issue.id) {
                continue;
            }
            let old_id = record.issue.id.clone();
            let prefix = old_id.split('-').next().unwrap_or("bd");
            let fresh = mint_fresh_id(
                storage,
                &batch_ids,
                &minted,
                prefix,
                &record.issue.title,
                &record.issue.description,
                &record.issue.created_by,
                stats.total_issues as usize,
            )?;
            minted.insert(fresh.clone());
            rename.insert(old_id.clone(), fresh.clone());
            record.issue.id = fresh.clone();
            report.resolved.push((old_id, fresh));
        }

        // Rewrite dependency endpoints within the batch to the new ids.
        for record in &mut records {
            for dep in &mut record.dependencies {
                if let Some(new_id) = rename.get(&dep.issue_id) {
                    dep.issue_id = new_id.clone();
                }
                if let Some(new_id) = rename.get(&dep.depends_on_id) {
                    dep.depends_on_id = new_id.clone();
                }
            }
        }

        report.colliding_ids.clear();
    }

    storage.run_in_transaction(&|tx| {
        for record in &records {
            match classify_in_tx(tx, &record.issue.id, &record.issue)? {
                ImportClass::Idempotent => continue,
                ImportClass::Colliding => {
                    return Err(StorageError::Conflict(format!(
                        "unresolved collision on {} during apply",
                        record.issue.id
                    )));
                }
                ImportClass::New => {}
            }

            tx.create_issue(&record.issue, actor)?;
            for dep in &record.dependencies {
                tx.add_dependency(dep, actor)?;
            }
            for label in &record.labels {
                tx.add_label(&record.issue.id, label, actor)?;
            }
            for comment in &record.comments {
                tx.import_comment(
                    &record.issue.id,
                    &comment.author,
                    &comment.text,
                    comment.created_at,
                )?;
            }
        }
        Ok(())
    })?;

    report.applied = true;
    Ok(report)
}

fn classify_in_tx(
    tx: &dyn beads_storage::Transaction,
    id: &str,
    incoming: &beads_core::issue::Issue,
) -> StorageResult<ImportClass> {
    match tx.get_issue(id) {
        Ok(local) => {
            if compute_content_hash(&local) == compute_content_hash(incoming) {
                Ok(ImportClass::Idempotent)
            } else {
                Ok(ImportClass::Colliding)
            }
        }
        Err(StorageError::NotFound { .. }) => Ok(ImportClass::New),
        Err(e) => Err(e),
    }
}

/// Mints a hash ID not already used locally, in `batch_ids`, or in `minted`.
#[allow(clippy::too_many_arguments)]
fn mint_fresh_id(
    storage: &dyn Storage,
    batch_ids: &HashSet<&str>,
    minted: &HashSet<String>,
    prefix: &str,
    title: &str,
    description: &str,
    creator: &str,
    num_issues: usize,
) -> StorageResult<String> {
    let length = compute_adaptive_length(
        num_issues,
        adaptive_defaults::MIN_LENGTH,
        adaptive_defaults::MAX_LENGTH,
        adaptive_defaults::MAX_COLLISION_PROB,
    );

    for nonce in 0..10_000 {
        let candidate = generate_hash_id(
            prefix,
            title,
            description,
            creator,
            chrono::Utc::now(),
            length,
            nonce,
        );
        if batch_ids.contains(candidate.as_str()) || minted.contains(&candidate) {
            continue;
        }
        match storage.get_issue(&candidate) {
            Ok(_) => continue,
            Err(StorageError::NotFound { .. }) => return Ok(candidate),
            Err(e) => return Err(e),
        }
    }

    Err(StorageError::Internal(format!(
        "could not mint a free id under prefix {prefix} after 10000 attempts"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use beads_core::dependency::Dependency;
    use beads_core::enums::DependencyType;
    use beads_core::issue::IssueBuilder;
    use beads_storage::SqliteStore;
    use serde_json::Map;

    fn test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn bare_record(id: &str, title: &str) -> JournalRecord {
        JournalRecord {
            issue: IssueBuilder::new(title).id(id).build(),
            dependencies: Vec::new(),
            labels: Vec::new(),
            comments: Vec::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn classifies_new_idempotent_and_colliding() {
        let store = test_store();
        let existing = IssueBuilder::new("Existing").id("bd-e1").build();
        store.create_issue(&existing, "alice").unwrap();

        let new_rec = bare_record("bd-e2", "Brand new");
        let idempotent_rec = bare_record("bd-e1", "Existing");
        let colliding_rec = bare_record("bd-e1", "Existing but different");

        assert_eq!(classify(&store, &new_rec).unwrap(), ImportClass::New);
        assert_eq!(
            classify(&store, &idempotent_rec).unwrap(),
            ImportClass::Idempotent
        );
        assert_eq!(
            classify(&store, &colliding_rec).unwrap(),
            ImportClass::Colliding
        );
    }

    #[test]
    fn apply_inserts_new_records_with_relations() {
        let store = test_store();
        let parent = bare_record("bd-p1", "Parent");
        let mut child = bare_record("bd-c1", "Child");
        child.dependencies.push(Dependency {
            issue_id: "bd-c1".into(),
            depends_on_id: "bd-p1".into(),
            dep_type: DependencyType::ParentChild,
            created_at: chrono::Utc::now(),
            created_by: "alice".into(),
            metadata: String::new(),
            thread_id: String::new(),
        });
        child.labels.push("urgent".into());

        let report = apply(&store, &[parent, child], false, false, "alice").unwrap();
        assert!(report.applied);
        assert_eq!(report.new_ids.len(), 2);

        let deps = store.get_dependencies("bd-c1").unwrap();
        assert_eq!(deps[0].id, "bd-p1");
        let labels = store.get_labels("bd-c1").unwrap();
        assert_eq!(labels, vec!["urgent".to_string()]);
    }

    #[test]
    fn apply_skips_idempotent_records() {
        let store = test_store();
        let issue = IssueBuilder::new("Same").id("bd-s1").build();
        store.create_issue(&issue, "alice").unwrap();

        let rec = bare_record("bd-s1", "Same");
        let report = apply(&store, &[rec], false, false, "alice").unwrap();
        assert_eq!(report.idempotent_ids, vec!["bd-s1".to_string()]);
        assert!(report.new_ids.is_empty());
    }

    #[test]
    fn apply_without_resolve_aborts_on_collision() {
        let store = test_store();
        let issue = IssueBuilder::new("Original").id("bd-k1").build();
        store.create_issue(&issue, "alice").unwrap();

        let rec = bare_record("bd-k1", "Changed title");
        let err = apply(&store, &[rec], false, false, "alice").unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
        // Nothing was mutated.
        assert_eq!(store.get_issue("bd-k1").unwrap().title, "Original");
    }

    #[test]
    fn apply_with_resolve_mints_fresh_id_and_rewrites_batch_refs() {
        let store = test_store();
        let issue = IssueBuilder::new("Original").id("bd-k2").build();
        store.create_issue(&issue, "alice").unwrap();

        let colliding = bare_record("bd-k2", "Changed title");
        let mut referrer = bare_record("bd-k3", "Referrer");
        referrer.dependencies.push(Dependency {
            issue_id: "bd-k3".into(),
            depends_on_id: "bd-k2".into(),
            dep_type: DependencyType::Blocks,
            created_at: chrono::Utc::now(),
            created_by: "alice".into(),
            metadata: String::new(),
            thread_id: String::new(),
        });

        let report = apply(&store, &[colliding, referrer], true, false, "alice").unwrap();
        assert_eq!(report.resolved.len(), 1);
        let (old_id, new_id) = &report.resolved[0];
        assert_eq!(old_id, "bd-k2");

        // Original untouched.
        assert_eq!(store.get_issue("bd-k2").unwrap().title, "Original");
        // Fresh copy exists under the new id.
        assert_eq!(store.get_issue(new_id).unwrap().title, "Changed title");
        // The referrer's dependency now points at the fresh id.
        let deps = store.get_dependencies("bd-k3").unwrap();
        assert_eq!(deps[0].id, *new_id);
    }

    #[test]
    fn dry_run_reports_dangling_reference() {
        let store = test_store();
        let mut rec = bare_record("bd-d1", "Has dangling dep");
        rec.dependencies.push(Dependency {
            issue_id: "bd-d1".into(),
            depends_on_id: "bd-missing".into(),
            dep_type: DependencyType::Blocks,
            created_at: chrono::Utc::now(),
            created_by: "alice".into(),
            metadata: String::new(),
            thread_id: String::new(),
        });

        let report = dry_run(&store, &[rec]).unwrap();
        assert_eq!(report.dangling.len(), 1);
        assert_eq!(report.dangling[0].depends_on_id, "bd-missing");
    }

    #[test]
    fn apply_with_strict_aborts_on_dangling_reference() {
        let store = test_store();
        let mut rec = bare_record("bd-d2", "Has dangling dep");
        rec.dependencies.push(Dependency {
            issue_id: "bd-d2".into(),
            depends_on_id: "bd-missing".into(),
            dep_type: DependencyType::Blocks,
            created_at: chrono::Utc::now(),
            created_by: "alice".into(),
            metadata: String::new(),
            thread_id: String::new(),
        });

        let err = apply(&store, &[rec], false, true, "alice").unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
        assert!(store.get_issue("bd-d2").is_err());
    }

    #[test]
    fn apply_without_strict_permits_dangling_reference() {
        let store = test_store();
        let mut rec = bare_record("bd-d3", "Has dangling dep");
        rec.dependencies.push(Dependency {
            issue_id: "bd-d3".into(),
            depends_on_id: "bd-missing".into(),
            dep_type: DependencyType::Blocks,
            created_at: chrono::Utc::now(),
            created_by: "alice".into(),
            metadata: String::new(),
            thread_id: String::new(),
        });

        let report = apply(&store, &[rec], false, false, "alice").unwrap();
        assert!(report.applied);
        assert_eq!(report.dangling.len(), 1);
        assert!(store.get_issue("bd-d3").is_ok());
    }
}
