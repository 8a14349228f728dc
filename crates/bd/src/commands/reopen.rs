//! `bd reopen` -- reopen a closed issue.

use anyhow::{bail, Context, Result};

use beads_storage::{SqliteStore, Storage};

use crate::cli::ReopenArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

pub fn run(ctx: &RuntimeContext, args: &ReopenArgs) -> Result<()> {
    if ctx.readonly {
        bail!("cannot reopen issues in read-only mode");
    }

    let beads_dir = ctx
        .resolve_db_path()
        .context("no beads database found. Run 'bd init' to create one.")?;
    let db_path = beads_dir.join("beads.db");

    if !db_path.exists() {
        bail!(
            "no beads database found at {}\nHint: run 'bd init' to create a database",
            db_path.display()
        );
    }

    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database: {}", db_path.display()))?;

    store.reopen_issue(&args.id, &ctx.actor)?;
    let issue = store.get_issue(&args.id)?;

    if ctx.json {
        output_json(&issue);
    } else if !ctx.quiet {
        println!("Reopened {}: {}", issue.id, issue.title);
    }

    Ok(())
}
