//! Analyze Command
//!
//! Fetch one or more files from Figma and print their design personality.

use std::sync::Arc;

use crate::cli::CommandContext;
use crate::figma::FigmaClient;
use crate::pipeline::AnalysisPipeline;
use crate::types::{FigsonaError, Result};

pub async fn run(ctx: &CommandContext, targets: &[String], no_history: bool) -> Result<()> {
    let client =
        FigmaClient::new(&ctx.config.figma)?.with_max_depth(ctx.config.analysis.max_depth);
    let mut pipeline = AnalysisPipeline::from_config(Arc::new(client), &ctx.config);

    if !no_history {
        match ctx.recording_db() {
            Ok(Some(db)) => {
                pipeline = pipeline.with_history(db, ctx.config.history.max_entries);
            }
            Ok(None) => {}
            Err(e) => ctx.output.warning(&format!("History unavailable: {}", e)),
        }
    }

    let mut outcomes = pipeline.run_many(targets).await;

    // A lone target reports its own error
    if outcomes.len() == 1
        && let Some((_, result)) = outcomes.pop()
    {
        let report = result?;
        return ctx.print_reports(std::slice::from_ref(&report));
    }

    let total = outcomes.len();
    let mut reports = Vec::with_capacity(total);
    for (target, result) in outcomes {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => ctx.output.failure(&target, &e),
        }
    }

    ctx.print_reports(&reports)?;

    let failed = total - reports.len();
    if failed > 0 {
        return Err(FigsonaError::Incomplete { failed, total });
    }
    Ok(())
}
