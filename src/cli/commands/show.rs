//! Show Command
//!
//! Print the latest stored report for a file without contacting Figma.

use crate::cli::CommandContext;
use crate::figma::extract_file_key;
use crate::types::Result;

pub fn run(ctx: &CommandContext, target: &str) -> Result<()> {
    let key = extract_file_key(target)?;
    let db = ctx.history_db()?;

    match ctx.history(&db).latest_report(key.as_str())? {
        Some(report) => ctx.print_reports(std::slice::from_ref(&report)),
        None => {
            ctx.output.warning(&format!("No stored analysis for {}", key));
            ctx.output
                .info(&format!("Run 'figsona analyze {}' first", target));
            Ok(())
        }
    }
}
