//! `bd undefer` -- clear an issue's defer date (stub).

use anyhow::Result;

use crate::cli::UndeferArgs;
use crate::context::RuntimeContext;

pub fn run(_ctx: &RuntimeContext, args: &UndeferArgs) -> Result<()> {
    println!("bd undefer {}: not yet implemented", args.id);
    Ok(())
}
