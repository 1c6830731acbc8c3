//! Recent Command
//!
//! List recently analyzed files, newest first.

use console::style;

use crate::cli::CommandContext;
use crate::types::{FigsonaError, Result, format_thousands};

pub fn run(ctx: &CommandContext, limit: usize) -> Result<()> {
    let db = match ctx.history_db() {
        Ok(db) => db,
        Err(FigsonaError::NotInitialized) => {
            ctx.output.info("No history yet");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let files = ctx.history(&db).recent(limit)?;
    if ctx.print_structured(&files)? {
        return Ok(());
    }

    if files.is_empty() {
        ctx.output.info("No recent files");
        return Ok(());
    }

    ctx.output.header("Recent Files");
    for (i, file) in files.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            i + 1,
            style(file.file_name.as_deref().unwrap_or("Untitled")).cyan(),
            style(format!("({})", file.file_key)).dim()
        );
        println!(
            "     {} · {} layers · {}",
            file.archetype,
            format_thousands(file.total_layers),
            file.last_accessed.format("%Y-%m-%d %H:%M UTC")
        );
    }
    Ok(())
}
