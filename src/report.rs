//! Analysis Report
//!
//! The unit the CLI prints and the history store persists: file metadata,
//! structural statistics and the personality classification.
//!
//! ## Output Formats
//!
//! - **text**: styled terminal summary (`console`)
//! - **json** / **yaml**: the full report, camelCase keys

use chrono::{DateTime, Utc};
use console::style;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::analyzer::AnalysisStats;
use crate::config::OutputFormat;
use crate::persona::ClassificationResult;
use crate::types::{DesignFile, FileKey, FigsonaError, Result, format_thousands};

/// Descriptive data about the analyzed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub file_key: String,
    pub file_name: Option<String>,
    pub version: Option<String>,
    pub last_modified: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Type tag of the root node, when there is one
    pub document_type: Option<String>,
    pub has_children: bool,
}

impl FileMetadata {
    pub fn from_file(key: &FileKey, file: &DesignFile) -> Self {
        Self {
            file_key: key.to_string(),
            file_name: file.name.clone(),
            version: file.version.clone(),
            last_modified: file.last_modified.clone(),
            thumbnail_url: file.thumbnail_url.clone(),
            document_type: file.document.as_ref().map(|d| d.kind.to_string()),
            has_children: file
                .document
                .as_ref()
                .is_some_and(|d| !d.children.is_empty()),
        }
    }

    /// File name, or the key when the file is unnamed
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(&self.file_key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub file: FileMetadata,
    pub stats: AnalysisStats,
    pub personality: ClassificationResult,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(file: FileMetadata, stats: AnalysisStats, personality: ClassificationResult) -> Self {
        Self {
            file,
            stats,
            personality,
            generated_at: Utc::now(),
        }
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(FigsonaError::from)
    }

    /// Styled terminal summary
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let p = &self.personality;
        let info = &p.archetype_info;
        let s = &self.stats;

        // write! into a String cannot fail
        let _ = writeln!(
            out,
            "\n{} {}",
            info.emoji,
            style(&p.primary_archetype).bold().underlined()
        );
        let _ = writeln!(
            out,
            "{} {}",
            style(self.file.display_name()).cyan(),
            style(format!("({})", self.file.file_key)).dim()
        );
        let _ = writeln!(out, "\n{}", info.description);

        section(&mut out, "Strengths");
        for strength in &info.strengths {
            let _ = writeln!(out, "  {} {}", style("•").green(), strength);
        }

        section(&mut out, "Design Stats");
        let _ = writeln!(out, "  Layers:      {}", format_thousands(s.total_layers));
        let _ = writeln!(out, "  Max depth:   {}", s.max_depth);
        let _ = writeln!(out, "  Colors:      {}", s.colors.len());
        let _ = writeln!(out, "  Type styles: {}", s.typography.len());
        let _ = writeln!(out, "  Components:  {}", s.component_usage.len());
        let _ = writeln!(
            out,
            "  Complex frames: {}",
            s.complex_frame_summary.total
        );
        for frame in &s.complex_frames {
            let _ = writeln!(
                out,
                "    {} {} children {}",
                style("›").dim(),
                frame.name,
                style(frame.layout_key()).dim()
            );
        }

        let harmony = &p.color_analysis.harmony;
        section(&mut out, "Color Harmony");
        let _ = writeln!(out, "  Monochromatic: {}", yes_no(harmony.is_monochromatic));
        let _ = writeln!(out, "  High contrast: {}", yes_no(harmony.has_high_contrast));
        let _ = writeln!(out, "  Vibrant:       {}", yes_no(harmony.is_vibrant));
        let _ = writeln!(out, "  Avg saturation: {:.1}%", harmony.avg_saturation);

        section(&mut out, "Scores");
        for score in &p.scores {
            let line = format!("  {:<26} {:>2}", score.archetype, score.score);
            if score.archetype == p.primary_archetype {
                let _ = writeln!(out, "{}", style(line).green().bold());
            } else {
                let _ = writeln!(out, "{}", line);
            }
        }

        section(&mut out, "Fun Facts");
        for fact in &p.fun_facts {
            let _ = writeln!(out, "  {} {}", style("★").yellow(), fact);
        }

        section(&mut out, "Best Match");
        let _ = writeln!(
            out,
            "  {}: {}",
            style(&p.compatibility.archetype).bold(),
            p.compatibility.reason
        );

        out
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", style(title).bold());
    let _ = writeln!(out, "{}", "─".repeat(40));
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ColorHarmonyProfile, TreeAnalyzer};
    use crate::persona::classify;
    use crate::types::{DocumentNode, NodeKind, Paint};

    fn sample_report() -> AnalysisReport {
        let root = DocumentNode::new(NodeKind::Document, "Doc").with_child(
            DocumentNode::new(NodeKind::Canvas, "Page")
                .with_child(DocumentNode::new(NodeKind::Rectangle, "Box").with_fill(Paint::solid(0.0, 0.0, 1.0))),
        );
        let file = DesignFile {
            name: Some("Marketing Site".to_string()),
            version: Some("12".to_string()),
            ..DesignFile::from_document(root)
        };
        let stats = TreeAnalyzer::default().analyze(file.document.as_ref()).unwrap();
        let harmony = ColorHarmonyProfile::evaluate(&stats.colors);
        let personality = classify(&stats, &harmony);
        AnalysisReport::new(
            FileMetadata::from_file(&FileKey::new("key123"), &file),
            stats,
            personality,
        )
    }

    #[test]
    fn test_metadata() {
        let report = sample_report();
        assert_eq!(report.file.file_key, "key123");
        assert_eq!(report.file.display_name(), "Marketing Site");
        assert_eq!(report.file.document_type.as_deref(), Some("DOCUMENT"));
        assert!(report.file.has_children);

        let empty = FileMetadata::from_file(&FileKey::new("k"), &DesignFile::default());
        assert_eq!(empty.display_name(), "k");
        assert!(!empty.has_children);
        assert!(empty.document_type.is_none());
    }

    #[test]
    fn test_text_contains_sections() {
        let report = sample_report();
        let text = report.render_text();
        assert!(text.contains(&report.personality.primary_archetype));
        assert!(text.contains("Marketing Site"));
        assert!(text.contains("Layers:      3"));
        assert!(text.contains("Fun Facts"));
        assert!(text.contains(&report.personality.compatibility.archetype));
    }

    #[test]
    fn test_json_roundtrip() {
        let report = sample_report();
        let json = report.render(OutputFormat::Json).unwrap();
        assert!(json.contains("\"generatedAt\""));
        assert!(json.contains("\"totalLayers\": 3"));
        assert_eq!(AnalysisReport::from_json(&json).unwrap(), report);
    }

    #[test]
    fn test_yaml_render() {
        let yaml = sample_report().render(OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("primaryArchetype:"));
    }
}
