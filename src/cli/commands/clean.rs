//! Clean Command
//!
//! Clear the recent-files list, and with `--all` the stored reports too.

use crate::cli::CommandContext;
use crate::types::{FigsonaError, Result};

pub fn run(ctx: &CommandContext, all: bool) -> Result<()> {
    let db = match ctx.history_db() {
        Ok(db) => db,
        Err(FigsonaError::NotInitialized) => {
            ctx.output.info("Nothing to clean");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let summary = ctx.history(&db).clean(all)?;
    ctx.output.success(&format!(
        "Cleared {} recent file(s)",
        summary.recent_files
    ));
    if all {
        ctx.output
            .success(&format!("Removed {} stored report(s)", summary.analyses));
    }
    Ok(())
}
