//! Method dispatch: translates a [`Request`] into calls against a
//! [`Storage`] handle and a [`RpcResult`].

use std::thread;
use std::time::Duration;

use beads_query::{DependencyTree, Planner};
use beads_storage::Storage;

use crate::error::{RpcError, RpcErrorCode};
use crate::protocol::{ImportReportWire, Request, Response, RpcResult};

/// Backoff schedule for `Locked`/`DatabaseLocked` errors: five attempts,
/// doubling from 100ms. SQLite's own `busy_timeout` PRAGMA is the first
/// line of defense; this covers cross-process contention beyond it.
const RETRY_BACKOFF_MS: [u64; 4] = [100, 200, 400, 800];

/// Dispatches one request against `storage`, retrying on a retryable
/// (`Locked`) error with bounded exponential backoff. Writes are serialized
/// by the Store's own `Mutex<Connection>`, not by this function.
pub fn dispatch(storage: &dyn Storage, journal_path: &std::path::Path, request: Request) -> RpcResult {
    let mut attempt = 0;
    loop {
        match dispatch_once(storage, journal_path, request.clone()) {
            Err(err) if err.code == RpcErrorCode::Locked && attempt < RETRY_BACKOFF_MS.len() => {
                thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS[attempt]));
                attempt += 1;
            }
            result => return result,
        }
    }
}

fn dispatch_once(storage: &dyn Storage, journal_path: &std::path::Path, request: Request) -> RpcResult {
    match request {
        Request::Create { issue, actor } => {
            storage.create_issue(&issue, &actor)?;
            Ok(Response::Unit)
        }
        Request::Get { id } => {
            let issue = storage.get_issue(&id)?;
            Ok(Response::Issue(issue))
        }
        Request::Update { id, updates, actor } => {
            storage.update_issue(&id, &updates.into(), &actor)?;
            Ok(Response::Unit)
        }
        Request::Close { id, reason, actor, session } => {
            storage.close_issue(&id, &reason, &actor, &session)?;
            Ok(Response::Unit)
        }
        Request::Reopen { id, actor } => {
            storage.reopen_issue(&id, &actor)?;
            Ok(Response::Unit)
        }
        Request::Delete { id } => {
            storage.delete_issue(&id)?;
            Ok(Response::Unit)
        }
        Request::List { filter } => {
            let issues = storage.search_issues("", &filter)?;
            Ok(Response::Issues(issues))
        }
        Request::Search { query, filter } => {
            let issues = storage.search_issues(&query, &filter)?;
            Ok(Response::Issues(issues))
        }
        Request::ReadyWork { filter } => {
            let planner = Planner::new(storage);
            let issues = planner.ready_work(&filter)?;
            Ok(Response::Issues(issues))
        }
        Request::DependencyTree { id, max_depth, show_all_paths, reverse } => {
            let nodes = DependencyTree::build(storage, &id, max_depth, show_all_paths, reverse)?;
            Ok(Response::Tree(nodes))
        }
        Request::AddDependency { dep, actor } => {
            storage.add_dependency(&dep, &actor)?;
            Ok(Response::Unit)
        }
        Request::RemoveDependency { issue_id, depends_on_id, actor } => {
            storage.remove_dependency(&issue_id, &depends_on_id, &actor)?;
            Ok(Response::Unit)
        }
        Request::AddLabel { issue_id, label, actor } => {
            storage.add_label(&issue_id, &label, &actor)?;
            Ok(Response::Unit)
        }
        Request::RemoveLabel { issue_id, label, actor } => {
            storage.remove_label(&issue_id, &label, &actor)?;
            Ok(Response::Unit)
        }
        Request::AddComment { issue_id, author, text } => {
            let comment = storage.add_comment(&issue_id, &author, &text)?;
            Ok(Response::Comment(comment))
        }
        Request::Import { records, resolve_collisions, strict, actor } => {
            let report = beads_importer::apply(storage, &records, resolve_collisions, strict, &actor)?;
            Ok(Response::ImportReport(ImportReportWire::from(report)))
        }
        Request::Export => {
            let records = beads_journal::export_all(storage)?;
            Ok(Response::JournalRecords(records))
        }
        Request::ResolveId { prefix } => resolve_id(storage, &prefix),
        Request::Stats => {
            let stats = storage.get_statistics()?;
            Ok(Response::Stats(stats))
        }
        Request::Flush => {
            crate::autoflush::flush_now(storage, journal_path)?;
            Ok(Response::Unit)
        }
    }
}

fn resolve_id(storage: &dyn Storage, prefix: &str) -> RpcResult {
    let mut filter = beads_core::filter::IssueFilter::default();
    filter.id_prefix = Some(prefix.to_string());
    let matches = storage.search_issues("", &filter)?;

    match matches.len() {
        0 => Err(RpcError::not_found(prefix)),
        1 => Ok(Response::IssueId(matches[0].id.clone())),
        _ => Err(RpcError::ambiguous(
            prefix,
            &matches.iter().map(|i| i.id.clone()).collect::<Vec<_>>(),
        )),
    }
}
