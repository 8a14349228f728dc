//! `bd todo` -- list issues assigned to the current actor (stub).

use anyhow::Result;

use crate::cli::TodoArgs;
use crate::context::RuntimeContext;

pub fn run(_ctx: &RuntimeContext, args: &TodoArgs) -> Result<()> {
    println!("bd todo (limit {}): not yet implemented", args.limit);
    Ok(())
}
