//! Hash-ID migration: replaces sequential or legacy IDs across an entire
//! store with content-derived hash IDs, preserving the parent/child tree.
//!
//! Grounded in the same [`beads_core::idgen`] allocator the live Store uses
//! for new issues; this module just runs it once per existing issue instead
//! of once per `create_issue` call, in parent-before-child order so that
//! hierarchical IDs (`parent.1`, `parent.2`, ...) stay consistent with the
//! rewritten parent ids.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use regex::Regex;
use serde::Serialize;

use beads_core::enums::DependencyType;
use beads_core::filter::IssueFilter;
use beads_core::idgen::{adaptive_defaults, compute_adaptive_length, generate_hash_id};
use beads_storage::error::Result as StorageResult;
use beads_storage::{IssueUpdates, Storage};

/// One ID rewrite, in the order it should be applied (parents first).
#[derive(Debug, Clone, Serialize)]
pub struct MigrationEntry {
    pub old_id: String,
    pub new_id: String,
}

/// A complete, unapplied migration: a rename for every issue in the store.
#[derive(Debug, Clone, Serialize, Default)]
pub struct MigrationPlan {
    pub entries: Vec<MigrationEntry>,
}

/// Computes a migration plan without touching `storage`.
///
/// Issues with no parent (no outgoing `parent-child` dependency) become
/// top-level hash ids; every other issue is assigned a child id under its
/// parent's *new* id, walked breadth-first so a grandchild's id always
/// embeds its parent's already-rewritten id.
pub fn plan(storage: &dyn Storage, prefix: &str) -> StorageResult<MigrationPlan> {
    let mut issues = storage.search_issues("", &IssueFilter::default())?;
    issues.sort_by(|a, b| a.id.cmp(&b.id));

    let mut child_to_parent: HashMap<String, String> = HashMap::new();
    for issue in &issues {
        let deps = storage.get_dependencies_with_metadata(&issue.id)?;
        if let Some(parent) = deps
            .into_iter()
            .find(|d| d.dependency.dep_type == DependencyType::ParentChild)
        {
            child_to_parent.insert(issue.id.clone(), parent.issue.id);
        }
    }

    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    for (child, parent) in &child_to_parent {
        children_of.entry(parent.clone()).or_default().push(child.clone());
    }
    for children in children_of.values_mut() {
        children.sort();
    }

    let by_id: HashMap<String, &beads_core::issue::Issue> =
        issues.iter().map(|i| (i.id.clone(), i)).collect();

    let roots: Vec<&beads_core::issue::Issue> = issues
        .iter()
        .filter(|i| !child_to_parent.contains_key(&i.id))
        .collect();

    let length = compute_adaptive_length(
        roots.len().max(1),
        adaptive_defaults::MIN_LENGTH,
        adaptive_defaults::MAX_LENGTH,
        adaptive_defaults::MAX_COLLISION_PROB,
    );

    let mut entries = Vec::new();
    let mut new_id_of: HashMap<String, String> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();

    for root in &roots {
        let new_id = mint(prefix, root, length, &used);
        used.insert(new_id.clone());
        new_id_of.insert(root.id.clone(), new_id.clone());
        entries.push(MigrationEntry {
            old_id: root.id.clone(),
            new_id,
        });
    }

    // Breadth-first over the parent tree, numbering children under their
    // parent's rewritten id via a local counter (not the store's, since this
    // is a read-only plan).
    let mut counters: HashMap<String, i64> = HashMap::new();
    let mut frontier: Vec<String> = roots.iter().map(|r| r.id.clone()).collect();

    while let Some(old_parent_id) = frontier.pop() {
        let new_parent_id = new_id_of[&old_parent_id].clone();
        let Some(children) = children_of.get(&old_parent_id) else {
            continue;
        };
        for child_old_id in children {
            let n = counters.entry(new_parent_id.clone()).or_insert(0);
            *n += 1;
            let new_child_id = format!("{}.{}", new_parent_id, n);
            new_id_of.insert(child_old_id.clone(), new_child_id.clone());
            entries.push(MigrationEntry {
                old_id: child_old_id.clone(),
                new_id: new_child_id,
            });
            frontier.push(child_old_id.clone());
        }
    }

    // Any issue whose parent chain never reached a root (broken reference)
    // falls back to a fresh top-level id of its own.
    for issue in &issues {
        if new_id_of.contains_key(&issue.id) {
            continue;
        }
        let new_id = mint(prefix, issue, length, &used);
        used.insert(new_id.clone());
        new_id_of.insert(issue.id.clone(), new_id.clone());
        entries.push(MigrationEntry {
            old_id: issue.id.clone(),
            new_id,
        });
    }

    debug_assert_eq!(entries.len(), by_id.len());
    Ok(MigrationPlan { entries })
}

fn mint(
    prefix: &str,
    issue: &beads_core::issue::Issue,
    length: usize,
    used: &HashSet<String>,
) -> String {
    for nonce in 0.. {
        let candidate = generate_hash_id(
            prefix,
            &issue.title,
            &issue.description,
            &issue.created_by,
            Utc::now(),
            length,
            nonce,
        );
        if !used.contains(&candidate) {
            return candidate;
        }
    }
    unreachable!()
}

/// Applies `plan` to `storage` in one transaction: rewrites every issue's
/// primary key via [`Storage::update_id`], then rewrites textual mentions of
/// old ids (`description`, `design`, `notes`, `acceptance_criteria`,
/// `external_ref`) across every remaining issue.
pub fn commit(storage: &dyn Storage, plan: &MigrationPlan, actor: &str) -> StorageResult<()> {
    let mapping: HashMap<String, String> = plan
        .entries
        .iter()
        .map(|e| (e.old_id.clone(), e.new_id.clone()))
        .collect();

    let prefixes: HashSet<&str> = mapping.keys().filter_map(|id| id.split('-').next()).collect();
    let pattern = prefixes
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let id_re = Regex::new(&format!(r"(?:{})-[0-9a-zA-Z]+(?:\.[0-9]+)*", pattern))
        .expect("id pattern is a valid regex");

    storage.run_in_transaction(&|tx| {
        for entry in &plan.entries {
            let current = tx.get_issue(&entry.old_id)?;
            let mut updated = current;
            updated.id = entry.new_id.clone();
            tx.update_id(&entry.old_id, &entry.new_id, &updated, actor)?;
        }

        for entry in &plan.entries {
            let issue = tx.get_issue(&entry.new_id)?;
            let mut updates = IssueUpdates::default();
            let mut changed = false;

            if let Some(new_text) = rewrite(&id_re, &issue.description, &mapping) {
                updates.description = Some(new_text);
                changed = true;
            }
            if let Some(new_text) = rewrite(&id_re, &issue.design, &mapping) {
                updates.design = Some(new_text);
                changed = true;
            }
            if let Some(new_text) = rewrite(&id_re, &issue.notes, &mapping) {
                updates.notes = Some(new_text);
                changed = true;
            }
            if let Some(new_text) = rewrite(&id_re, &issue.acceptance_criteria, &mapping) {
                updates.acceptance_criteria = Some(new_text);
                changed = true;
            }
            if let Some(external_ref) = &issue.external_ref {
                if let Some(new_text) = rewrite(&id_re, external_ref, &mapping) {
                    updates.external_ref = Some(Some(new_text));
                    changed = true;
                }
            }

            if changed {
                tx.update_issue(&entry.new_id, &updates, actor)?;
            }
        }

        Ok(())
    })
}

fn rewrite(id_re: &Regex, text: &str, mapping: &HashMap<String, String>) -> Option<String> {
    if text.is_empty() || !id_re.is_match(text) {
        return None;
    }
    let rewritten = id_re.replace_all(text, |caps: &regex::Captures| {
        let matched = &caps[0];
        mapping.get(matched).cloned().unwrap_or_else(|| matched.to_string())
    });
    if rewritten == text {
        None
    } else {
        Some(rewritten.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beads_core::dependency::Dependency;
    use beads_core::issue::IssueBuilder;
    use beads_storage::SqliteStore;

    fn link(store: &SqliteStore, child: &str, parent: &str) {
        store
            .add_dependency(
                &Dependency {
                    issue_id: child.into(),
                    depends_on_id: parent.into(),
                    dep_type: DependencyType::ParentChild,
                    created_at: Utc::now(),
                    created_by: "alice".into(),
                    metadata: String::new(),
                    thread_id: String::new(),
                },
                "alice",
            )
            .unwrap();
    }

    #[test]
    fn plan_assigns_children_under_rewritten_parent_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create_issue(&IssueBuilder::new("Epic").id("1").build(), "alice")
            .unwrap();
        store
            .create_issue(&IssueBuilder::new("Task").id("1.1").build(), "alice")
            .unwrap();
        link(&store, "1.1", "1");

        let plan = plan(&store, "bd").unwrap();
        assert_eq!(plan.entries.len(), 2);

        let root_entry = plan.entries.iter().find(|e| e.old_id == "1").unwrap();
        assert!(root_entry.new_id.starts_with("bd-"));

        let child_entry = plan.entries.iter().find(|e| e.old_id == "1.1").unwrap();
        assert_eq!(child_entry.new_id, format!("{}.1", root_entry.new_id));
    }

    #[test]
    fn commit_rewrites_ids_and_textual_mentions() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create_issue(&IssueBuilder::new("Epic").id("bd-1").build(), "alice")
            .unwrap();
        let mut task = IssueBuilder::new("Task").id("bd-2").build();
        task.description = "Blocked by bd-1".to_string();
        store.create_issue(&task, "alice").unwrap();

        let migration_plan = plan(&store, "bd").unwrap();
        commit(&store, &migration_plan, "alice").unwrap();

        let root_new_id = migration_plan
            .entries
            .iter()
            .find(|e| e.old_id == "bd-1")
            .unwrap()
            .new_id
            .clone();
        let task_new_id = migration_plan
            .entries
            .iter()
            .find(|e| e.old_id == "bd-2")
            .unwrap()
            .new_id
            .clone();

        assert!(store.get_issue("bd-1").is_err());
        let migrated_task = store.get_issue(&task_new_id).unwrap();
        assert_eq!(
            migrated_task.description,
            format!("Blocked by {}", root_new_id)
        );
    }
}
