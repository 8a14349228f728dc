//! Dependency tree traversal, DFS over forward/reverse edges.

use std::collections::HashSet;

use beads_storage::error::Result;
use beads_storage::{Storage, TreeNode};

/// DFS dependency-tree walker.
///
/// Grounded in `beads-storage::sqlite::dependencies::get_dependency_tree_impl`
/// (a BFS over the same two edge directions); this crate re-expresses the
/// traversal as DFS so depth-first callers (e.g. a tree-printing CLI) see
/// each branch walked to its end before backtracking, while still cutting
/// cycles via a visited set.
pub struct DependencyTree;

impl DependencyTree {
    /// Walks the dependency tree from `issue_id`.
    ///
    /// `reverse` selects which edge direction to follow: `false` walks
    /// issues `issue_id` depends on, `true` walks issues that depend on
    /// `issue_id`. `show_all_paths` disables cycle-cutting dedup, allowing
    /// the same issue to appear more than once via different paths (bounded
    /// only by `max_depth`).
    pub fn build(
        storage: &dyn Storage,
        issue_id: &str,
        max_depth: i32,
        show_all_paths: bool,
        reverse: bool,
    ) -> Result<Vec<TreeNode>> {
        let mut nodes = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(issue_id.to_string());

        Self::walk(
            storage,
            issue_id,
            0,
            max_depth,
            show_all_paths,
            reverse,
            &mut visited,
            &mut nodes,
        )?;

        Ok(nodes)
    }

    #[allow(clippy::too_many_arguments)]
    fn walk(
        storage: &dyn Storage,
        issue_id: &str,
        depth: i32,
        max_depth: i32,
        show_all_paths: bool,
        reverse: bool,
        visited: &mut HashSet<String>,
        out: &mut Vec<TreeNode>,
    ) -> Result<()> {
        if depth >= max_depth {
            return Ok(());
        }

        let edges = if reverse {
            storage.get_dependents_with_metadata(issue_id)?
        } else {
            storage.get_dependencies_with_metadata(issue_id)?
        };

        for edge in edges {
            let child_id = edge.issue.id.clone();
            let already_seen = visited.contains(&child_id);
            if already_seen && !show_all_paths {
                continue;
            }

            out.push(TreeNode {
                issue: edge.issue,
                depth: depth + 1,
                dep_type: edge.dependency.dep_type,
                reverse,
            });

            if !already_seen {
                visited.insert(child_id.clone());
                Self::walk(
                    storage,
                    &child_id,
                    depth + 1,
                    max_depth,
                    show_all_paths,
                    reverse,
                    visited,
                    out,
                )?;
            }
        }

        Ok(())
    }
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

    fn link(store: &SqliteStore, from: &str, to: &str, dep_type: DependencyType) {
        store
            .add_dependency(
                &Dependency {
                    issue_id: from.into(),
                    depends_on_id: to.into(),
                    dep_type,
                    created_at: chrono::Utc::now(),
                    created_by: "alice".into(),
                    metadata: String::new(),
                    thread_id: String::new(),
                },
                "alice",
            )
            .unwrap();
    }

    #[test]
    fn walks_chain_forward() {
        let store = test_store();
        for id in ["bd-t1", "bd-t2", "bd-t3"] {
            store
                .create_issue(&IssueBuilder::new(id).id(id).build(), "alice")
                .unwrap();
        }
        link(&store, "bd-t1", "bd-t2", DependencyType::Blocks);
        link(&store, "bd-t2", "bd-t3", DependencyType::Blocks);

        let nodes = DependencyTree::build(&store, "bd-t1", 5, false, false).unwrap();
        let ids: Vec<&str> = nodes.iter().map(|n| n.issue.id.as_str()).collect();
        assert_eq!(ids, vec!["bd-t2", "bd-t3"]);
        assert_eq!(nodes[1].depth, 2);
    }

    #[test]
    fn respects_max_depth() {
        let store = test_store();
        for id in ["bd-t4", "bd-t5", "bd-t6"] {
            store
                .create_issue(&IssueBuilder::new(id).id(id).build(), "alice")
                .unwrap();
        }
        link(&store, "bd-t4", "bd-t5", DependencyType::Blocks);
        link(&store, "bd-t5", "bd-t6", DependencyType::Blocks);

        let nodes = DependencyTree::build(&store, "bd-t4", 1, false, false).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].issue.id, "bd-t5");
    }

    #[test]
    fn cuts_cycles_without_show_all_paths() {
        let store = test_store();
        for id in ["bd-t7", "bd-t8"] {
            store
                .create_issue(&IssueBuilder::new(id).id(id).build(), "alice")
                .unwrap();
        }
        link(&store, "bd-t7", "bd-t8", DependencyType::Related);
        link(&store, "bd-t8", "bd-t7", DependencyType::Related);

        let nodes = DependencyTree::build(&store, "bd-t7", 10, false, false).unwrap();
        // bd-t8 is walked; its back-edge to the already-visited root is dropped.
        assert_eq!(nodes.len(), 1);
    }
}
