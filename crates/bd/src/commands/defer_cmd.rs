//! `bd defer` -- defer an issue until a later date (stub).

use anyhow::Result;

use crate::cli::DeferArgs;
use crate::context::RuntimeContext;

pub fn run(_ctx: &RuntimeContext, args: &DeferArgs) -> Result<()> {
    println!("bd defer {}: not yet implemented", args.id);
    Ok(())
}
