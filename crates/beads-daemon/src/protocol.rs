//! RPC request/response shapes.
//!
//! One enum per direction, tagged by method name, so the wire format is a
//! single JSON object per frame: `{"method": "...", "params": {...}}` for
//! requests, and a plain `Ok`/`Err` envelope for responses.

use serde::{Deserialize, Serialize};

use beads_core::comment::Comment;
use beads_core::dependency::Dependency;
use beads_core::filter::{IssueFilter, WorkFilter};
use beads_core::issue::Issue;
use beads_storage::{IssueUpdates, Statistics, TreeNode};

use crate::error::RpcError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum Request {
    Create { issue: Issue, actor: String },
    Get { id: String },
    Update { id: String, updates: IssueUpdatesWire, actor: String },
    Close { id: String, reason: String, actor: String, session: String },
    Reopen { id: String, actor: String },
    Delete { id: String },
    List { filter: IssueFilter },
    Search { query: String, filter: IssueFilter },
    ReadyWork { filter: WorkFilter },
    DependencyTree { id: String, max_depth: i32, show_all_paths: bool, reverse: bool },
    AddDependency { dep: Dependency, actor: String },
    RemoveDependency { issue_id: String, depends_on_id: String, actor: String },
    AddLabel { issue_id: String, label: String, actor: String },
    RemoveLabel { issue_id: String, label: String, actor: String },
    AddComment { issue_id: String, author: String, text: String },
    Import {
        records: Vec<beads_journal::JournalRecord>,
        resolve_collisions: bool,
        strict: bool,
        actor: String,
    },
    Export,
    ResolveId { prefix: String },
    Stats,
    Flush,
}

/// Wire-shaped [`IssueUpdates`]: same fields, structurally identical, kept
/// separate so `beads-storage`'s internal type doesn't need to derive
/// `Serialize`/`Deserialize` purely for the RPC boundary's sake.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUpdatesWire {
    pub title: Option<String>,
    pub description: Option<String>,
    pub design: Option<String>,
    pub acceptance_criteria: Option<String>,
    pub notes: Option<String>,
    pub status: Option<beads_core::enums::Status>,
    pub priority: Option<i32>,
    pub issue_type: Option<beads_core::enums::IssueType>,
    pub assignee: Option<String>,
    pub owner: Option<String>,
    pub spec_id: Option<String>,
    pub external_ref: Option<Option<String>>,
    pub source_system: Option<String>,
    pub pinned: Option<bool>,
}

impl From<IssueUpdatesWire> for IssueUpdates {
    fn from(w: IssueUpdatesWire) -> Self {
        IssueUpdates {
            title: w.title,
            description: w.description,
            design: w.design,
            acceptance_criteria: w.acceptance_criteria,
            notes: w.notes,
            status: w.status,
            priority: w.priority,
            issue_type: w.issue_type,
            assignee: w.assignee,
            owner: w.owner,
            spec_id: w.spec_id,
            external_ref: w.external_ref,
            source_system: w.source_system,
            pinned: w.pinned,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    Issue(Issue),
    Issues(Vec<Issue>),
    Tree(Vec<TreeNode>),
    Comment(Comment),
    IssueId(String),
    Stats(Statistics),
    JournalRecords(Vec<beads_journal::JournalRecord>),
    ImportReport(ImportReportWire),
    Unit,
}

/// Wire-shaped [`beads_importer::ImportReport`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReportWire {
    pub new_ids: Vec<String>,
    pub idempotent_ids: Vec<String>,
    pub colliding_ids: Vec<String>,
    pub resolved: Vec<(String, String)>,
    pub dangling: Vec<(String, String)>,
    pub applied: bool,
}

impl From<beads_importer::ImportReport> for ImportReportWire {
    fn from(r: beads_importer::ImportReport) -> Self {
        Self {
            new_ids: r.new_ids,
            idempotent_ids: r.idempotent_ids,
            colliding_ids: r.colliding_ids,
            resolved: r.resolved,
            dangling: r
                .dangling
                .into_iter()
                .map(|d| (d.issue_id, d.depends_on_id))
                .collect(),
            applied: r.applied,
        }
    }
}

pub type RpcResult = Result<Response, RpcError>;
