//! `bd daemon` -- start, stop, and query the background daemon.

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use beads_lockfile::LockGuard;
use beads_storage::SqliteStore;

use crate::cli::{DaemonArgs, DaemonCommands};
use crate::context::RuntimeContext;

pub fn run(ctx: &RuntimeContext, args: &DaemonArgs) -> Result<()> {
    let beads_dir = ctx
        .resolve_db_path()
        .context("no beads database found. Run 'bd init' to create one.")?;
    let db_path = beads_dir.join("beads.db");
    let lock_path = beads_dir.join("daemon.lock");

    match &args.command {
        DaemonCommands::Start => {
            if !db_path.exists() {
                bail!(
                    "no beads database found at {}\nHint: run 'bd init' to create a database",
                    db_path.display()
                );
            }
            let store: Arc<dyn beads_storage::Storage> =
                Arc::new(SqliteStore::open(&db_path).with_context(|| {
                    format!("failed to open database: {}", db_path.display())
                })?);

            println!("starting daemon for {} (Ctrl+C to stop)", beads_dir.display());
            let server = beads_daemon::Server::new(store, &beads_dir);
            server.run_until_signal().context("daemon exited with an error")
        }
        DaemonCommands::Stop => {
            match LockGuard::inspect(&lock_path) {
                Some(info) if LockGuard::is_held(&lock_path) => {
                    println!(
                        "daemon running as pid {}; send it SIGINT/SIGTERM (e.g. `kill {}`) to stop it",
                        info.pid, info.pid
                    );
                }
                _ => println!("no daemon is running"),
            }
            Ok(())
        }
        DaemonCommands::Status => {
            match LockGuard::inspect(&lock_path) {
                Some(info) if LockGuard::is_held(&lock_path) => {
                    println!("daemon running: pid {}, socket {}", info.pid, info.socket_path);
                }
                _ => println!("daemon not running"),
            }
            Ok(())
        }
    }
}
