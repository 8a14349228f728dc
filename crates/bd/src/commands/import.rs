//! `bd import` -- import journal records into the local database.
//!
//! Only the `json` format is implemented: the journal's own line-delimited
//! record format (see `beads-journal`). `--source` defaults to the local
//! journal file, so `bd import` with no arguments reconciles the database
//! against `.beads/journal.jsonl`.

use std::fs::File;
use std::io::BufReader;

use anyhow::{bail, Context, Result};

use beads_storage::SqliteStore;

use crate::cli::ImportArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

pub fn run(ctx: &RuntimeContext, args: &ImportArgs) -> Result<()> {
    if ctx.readonly {
        bail!("cannot import issues in read-only mode");
    }
    if args.format != "json" {
        bail!("unsupported import format: {} (only 'json' is supported)", args.format);
    }

    let beads_dir = ctx
        .resolve_db_path()
        .context("no beads database found. Run 'bd init' to create one.")?;
    let db_path = beads_dir.join("beads.db");
    let journal_path = args
        .source
        .as_ref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| beads_dir.join("journal.jsonl"));

    if !journal_path.exists() {
        bail!("journal not found: {}", journal_path.display());
    }

    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database: {}", db_path.display()))?;

    let reader = BufReader::new(
        File::open(&journal_path)
            .with_context(|| format!("failed to open journal: {}", journal_path.display()))?,
    );
    let records = beads_journal::decode(reader)
        .collect::<beads_journal::Result<Vec<_>>>()
        .with_context(|| format!("failed to decode journal: {}", journal_path.display()))?;

    let report = beads_importer::apply(&store, &records, false, args.strict, &ctx.actor)?;

    if ctx.json {
        output_json(&report);
    } else if !ctx.quiet {
        println!(
            "imported {} new, {} unchanged, {} colliding ({} dangling reference(s))",
            report.new_ids.len(),
            report.idempotent_ids.len(),
            report.colliding_ids.len(),
            report.dangling.len()
        );
        if !report.colliding_ids.is_empty() {
            println!("colliding ids (re-run with collision resolution to apply): {:?}", report.colliding_ids);
        }
    }

    if report.has_unresolved_collisions() {
        bail!("import aborted: {} colliding record(s) were not applied", report.colliding_ids.len());
    }

    Ok(())
}
