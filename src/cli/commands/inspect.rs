//! Inspect Command
//!
//! Analyze a local JSON export without network access. Accepts the body of
//! a `GET /v1/files/:key` response or a bare node.

use std::path::Path;
use std::sync::Arc;

use crate::cli::CommandContext;
use crate::figma::StaticSource;
use crate::pipeline::AnalysisPipeline;
use crate::types::{DesignFile, FileKey, Result, ResultExt};

pub fn run(ctx: &CommandContext, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context_fn(|| format!("Failed to read {}", path.display()))?;
    let mut file =
        DesignFile::from_json_str_with_limit(&content, ctx.config.analysis.max_depth)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("local")
        .to_string();
    if file.name.is_none() {
        file.name = Some(stem.clone());
    }

    let pipeline = AnalysisPipeline::from_config(Arc::new(StaticSource::new()), &ctx.config);
    let report = pipeline.analyze_file(&FileKey::new(stem), &file)?;
    ctx.print_reports(std::slice::from_ref(&report))
}
