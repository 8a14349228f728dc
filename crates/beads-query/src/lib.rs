//! Read-only planning queries over the [`beads_storage::Storage`] trait.
//!
//! `beads-query` generalizes the ready-work and dependency-tree SQL shapes
//! that `beads-storage` already implements into a storage-agnostic layer
//! callers can use without hand-rolling query logic of their own.

pub mod ready;
pub mod tree;

pub use ready::{BlockReason, Blocker, Planner};
pub use tree::DependencyTree;
