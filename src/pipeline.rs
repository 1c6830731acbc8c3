//! Analysis Pipeline
//!
//! Connects the pieces for one target:
//!
//! ```text
//! target ─▶ file key ─▶ fetch ─▶ analyze ─▶ harmony ─▶ classify ─▶ report ─▶ history
//! ```
//!
//! Several targets run through a buffered stream with bounded concurrency;
//! results come back in input order and one failing target does not affect
//! the others.

use futures::StreamExt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analyzer::{ColorHarmonyProfile, TreeAnalyzer};
use crate::config::Config;
use crate::figma::{DocumentSource, extract_file_key};
use crate::persona::classify;
use crate::report::{AnalysisReport, FileMetadata};
use crate::storage::{HistoryStore, SharedDatabase};
use crate::types::{DesignFile, FileKey, Result};

/// Outcome for one target of a batch run
pub type TargetOutcome = (String, Result<AnalysisReport>);

pub struct AnalysisPipeline {
    source: Arc<dyn DocumentSource>,
    analyzer: TreeAnalyzer,
    concurrency: usize,
    history: Option<(SharedDatabase, usize)>,
}

impl AnalysisPipeline {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            analyzer: TreeAnalyzer::default(),
            concurrency: 1,
            history: None,
        }
    }

    /// Depth guard and concurrency from configuration
    pub fn from_config(source: Arc<dyn DocumentSource>, config: &Config) -> Self {
        Self::new(source)
            .with_max_depth(config.analysis.max_depth)
            .with_concurrency(config.analysis.concurrency)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.analyzer = TreeAnalyzer::new(max_depth);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Record every successful report in the history database
    pub fn with_history(mut self, db: SharedDatabase, max_entries: usize) -> Self {
        self.history = Some((db, max_entries));
        self
    }

    /// Analyze one target (URL or key)
    pub async fn run(&self, target: &str) -> Result<AnalysisReport> {
        let key = extract_file_key(target)?;
        info!(file_key = %key, source = self.source.name(), "Fetching design file");

        let file = self.source.fetch(&key).await?;
        let report = self.analyze_file(&key, &file)?;
        self.record(&report);

        info!(
            file_key = %key,
            archetype = %report.personality.primary_archetype,
            "Analysis complete"
        );
        Ok(report)
    }

    /// Analyze several targets, preserving input order
    pub async fn run_many(&self, targets: &[String]) -> Vec<TargetOutcome> {
        futures::stream::iter(targets)
            .map(|target| async move { (target.clone(), self.run(target).await) })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Analyze an already loaded file. Does not touch history.
    pub fn analyze_file(&self, key: &FileKey, file: &DesignFile) -> Result<AnalysisReport> {
        let stats = self.analyzer.analyze(file.document.as_ref())?;
        let harmony = ColorHarmonyProfile::evaluate(&stats.colors);
        let personality = classify(&stats, &harmony);

        Ok(AnalysisReport::new(
            FileMetadata::from_file(key, file),
            stats,
            personality,
        ))
    }

    /// History failures never fail the analysis
    fn record(&self, report: &AnalysisReport) {
        if let Some((db, max_entries)) = &self.history
            && let Err(e) = HistoryStore::new(db, *max_entries).record(report)
        {
            warn!("Failed to record {} in history: {}", report.file.file_key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::StaticSource;
    use crate::storage::Database;
    use crate::types::{
        AnalysisError, DocumentNode, ErrorCategory, FigsonaError, NodeKind, Paint, TypeStyle,
    };

    const KEY_A: &str = "AAAAAAAAAAAAAAAAAAAAAA";
    const KEY_B: &str = "BBBBBBBBBBBBBBBBBBBBBB";

    fn screen() -> DesignFile {
        let root = DocumentNode::new(NodeKind::Frame, "Screen").with_children(
            (0..15)
                .map(|i| {
                    DocumentNode::new(NodeKind::Text, format!("label {}", i))
                        .with_fill(Paint::solid(1.0, 0.0, 0.0))
                        .with_style(TypeStyle::new("Inter", 16.0))
                })
                .collect(),
        );
        DesignFile {
            name: Some("Screen".to_string()),
            ..DesignFile::from_document(root)
        }
    }

    fn deep(levels: usize) -> DesignFile {
        let mut node = DocumentNode::new(NodeKind::Group, "leaf");
        for _ in 0..levels {
            node = DocumentNode::new(NodeKind::Group, "g").with_child(node);
        }
        DesignFile::from_document(node)
    }

    fn source() -> Arc<dyn DocumentSource> {
        Arc::new(
            StaticSource::new()
                .with_file(KEY_A, screen())
                .with_file(KEY_B, DesignFile::default()),
        )
    }

    #[tokio::test]
    async fn test_run_from_url() {
        let pipeline = AnalysisPipeline::new(source());
        let url = format!("https://www.figma.com/design/{}/Screen", KEY_A);

        let report = pipeline.run(&url).await.unwrap();
        assert_eq!(report.file.file_key, KEY_A);
        assert_eq!(report.stats.total_layers, 16);
        assert_eq!(report.stats.colors, vec!["rgb(255, 0, 0)"]);
        assert!(report.personality.color_analysis.harmony.is_monochromatic);
    }

    #[tokio::test]
    async fn test_empty_document() {
        let pipeline = AnalysisPipeline::new(source());
        let report = pipeline.run(KEY_B).await.unwrap();
        assert_eq!(report.stats.total_layers, 0);
        assert!(!report.file.has_children);
        assert_eq!(report.personality.color_analysis.harmony.sample_size, 0);
    }

    #[tokio::test]
    async fn test_invalid_target_and_missing_file() {
        let pipeline = AnalysisPipeline::new(source());

        let err = pipeline.run("https://example.com").await.unwrap_err();
        assert!(matches!(err, FigsonaError::InvalidTarget(_)));

        let err = pipeline.run("CCCCCCCCCCCCCCCCCCCCCC").await.unwrap_err();
        assert_eq!(err.category(), Some(ErrorCategory::NotFound));
    }

    #[tokio::test]
    async fn test_depth_guard_from_config() {
        let mut config = Config::default();
        config.analysis.max_depth = 3;
        let source: Arc<dyn DocumentSource> =
            Arc::new(StaticSource::new().with_file(KEY_A, deep(4)));
        let pipeline = AnalysisPipeline::from_config(source, &config);

        let err = pipeline.run(KEY_A).await.unwrap_err();
        assert!(matches!(
            err,
            FigsonaError::Analysis(AnalysisError::TooDeep { depth: 4, limit: 3 })
        ));
    }

    #[tokio::test]
    async fn test_run_many_preserves_order_and_isolates_failures() {
        let pipeline = AnalysisPipeline::new(source()).with_concurrency(4);
        let targets = vec![
            KEY_B.to_string(),
            "nope".to_string(),
            KEY_A.to_string(),
        ];

        let outcomes = pipeline.run_many(&targets).await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].0, KEY_B);
        assert!(outcomes[0].1.is_ok());
        assert!(outcomes[1].1.is_err());
        assert_eq!(outcomes[2].1.as_ref().unwrap().stats.total_layers, 16);
    }

    #[tokio::test]
    async fn test_history_recording() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.initialize().unwrap();
        let pipeline = AnalysisPipeline::new(source()).with_history(Arc::clone(&db), 10);

        pipeline.run(KEY_A).await.unwrap();
        pipeline.run(KEY_B).await.unwrap();

        let store = HistoryStore::new(&db, 10);
        let recent = store.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].file_key, KEY_B);
        assert_eq!(recent[1].file_name.as_deref(), Some("Screen"));
        assert!(store.latest_report(KEY_A).unwrap().is_some());
    }

    #[test]
    fn test_analyze_file_is_deterministic() {
        let pipeline = AnalysisPipeline::new(source());
        let key = FileKey::new(KEY_A);
        let first = pipeline.analyze_file(&key, &screen()).unwrap();
        let second = pipeline.analyze_file(&key, &screen()).unwrap();
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.personality, second.personality);
    }
}
