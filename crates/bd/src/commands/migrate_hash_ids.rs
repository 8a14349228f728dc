//! `bd migrate-hash-ids` -- migrate sequential issue IDs to content-addressed
//! hash IDs.

use anyhow::{bail, Context, Result};

use beads_importer::migration;
use beads_storage::SqliteStore;

use crate::cli::MigrateHashIdsArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

pub fn run(ctx: &RuntimeContext, args: &MigrateHashIdsArgs) -> Result<()> {
    if ctx.readonly && !args.dry_run {
        bail!("cannot migrate ids in read-only mode");
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

    let prefix = std::env::var("BD_PREFIX").unwrap_or_else(|_| "bd".to_string());
    let plan = migration::plan(&store, &prefix)?;

    if ctx.json {
        output_json(&plan);
    } else if !ctx.quiet {
        println!("{} issue(s) would be renamed:", plan.entries.len());
        for entry in &plan.entries {
            println!("  {} -> {}", entry.old_id, entry.new_id);
        }
    }

    if args.dry_run {
        return Ok(());
    }

    migration::commit(&store, &plan, &ctx.actor)?;

    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let audit_path = beads_dir.join(format!("migration-{stamp}.json"));
    std::fs::write(&audit_path, serde_json::to_vec_pretty(&plan)?)
        .with_context(|| format!("failed to write migration audit log: {}", audit_path.display()))?;

    if !ctx.quiet {
        println!("migration applied; mapping written to {}", audit_path.display());
    }

    Ok(())
}
