//! Document Tree Analyzer
//!
//! Walks a design document once, depth-first and pre-order, and aggregates
//! structural statistics. The walk uses an explicit work stack so tree depth
//! is bounded by the configured guard rather than by the call stack.
//!
//! Absent facets (no fills, no style, no children, no bounding box) simply
//! contribute nothing. The only failure is exceeding the depth guard.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::color::canonical_color;
use crate::constants::analysis;
use crate::types::{AnalysisError, DocumentNode, NodeKind};

/// A FRAME whose direct child count exceeds the complexity threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexFrame {
    pub name: String,
    pub child_count: usize,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ComplexFrame {
    /// Both dimensions present and multiples of the grid unit
    pub fn is_on_grid(&self) -> bool {
        match (self.width, self.height) {
            (Some(w), Some(h)) => w % analysis::GRID_UNIT == 0.0 && h % analysis::GRID_UNIT == 0.0,
            _ => false,
        }
    }

    /// `WxH` layout signature; missing dimensions render as `?`
    pub fn layout_key(&self) -> String {
        let dim = |v: Option<f64>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        format!("{}x{}", dim(self.width), dim(self.height))
    }
}

/// Whole-population view of complex frames, computed before truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexFrameSummary {
    /// Number of complex frames found
    pub total: usize,
    /// Number of distinct `WxH` layouts among them
    pub distinct_layouts: usize,
    /// Every complex frame sits on the grid (vacuously true when none)
    pub all_on_grid: bool,
}

impl Default for ComplexFrameSummary {
    fn default() -> Self {
        Self {
            total: 0,
            distinct_layouts: 0,
            all_on_grid: true,
        }
    }
}

impl ComplexFrameSummary {
    fn from_frames(frames: &[ComplexFrame]) -> Self {
        let layouts: HashSet<String> = frames.iter().map(ComplexFrame::layout_key).collect();
        Self {
            total: frames.len(),
            distinct_layouts: layouts.len(),
            all_on_grid: frames.iter().all(ComplexFrame::is_on_grid),
        }
    }
}

/// Aggregate statistics of one document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_layers: usize,
    /// Deepest nesting level; the root is depth 0
    pub max_depth: usize,
    pub layer_types: BTreeMap<String, usize>,
    pub component_usage: BTreeMap<String, usize>,
    /// Distinct canonical colors in first-seen order
    pub colors: Vec<String>,
    pub typography: BTreeMap<String, usize>,
    /// Top complex frames by descending child count
    pub complex_frames: Vec<ComplexFrame>,
    pub complex_frame_summary: ComplexFrameSummary,
}

impl AnalysisStats {
    /// Occurrences of a layer type
    pub fn layer_count(&self, kind: &NodeKind) -> usize {
        self.layer_types.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Typography key with the highest count; ties resolve to the smallest key
    pub fn most_used_typography(&self) -> Option<(&str, usize)> {
        self.typography
            .iter()
            .fold(None, |best: Option<(&str, usize)>, (key, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((key.as_str(), count)),
            })
    }
}

/// Build the typography key for a style: `"<family> <size>px"`, or
/// `"<family> auto"` when the size is unknown
pub fn typography_key(family: &str, size: Option<f64>) -> String {
    match size {
        Some(size) => format!("{} {}px", family, size),
        None => format!("{} {}", family, analysis::AUTO_FONT_SIZE),
    }
}

/// Single-pass tree analyzer with a depth guard
#[derive(Debug, Clone)]
pub struct TreeAnalyzer {
    max_depth: usize,
}

impl Default for TreeAnalyzer {
    fn default() -> Self {
        Self::new(analysis::DEFAULT_MAX_DEPTH)
    }
}

impl TreeAnalyzer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Analyze a document tree. A missing root yields empty statistics.
    pub fn analyze(&self, root: Option<&DocumentNode>) -> Result<AnalysisStats, AnalysisError> {
        let Some(root) = root else {
            return Ok(AnalysisStats::default());
        };

        let mut acc = Accumulator::default();
        let mut stack: Vec<(&DocumentNode, usize)> = vec![(root, 0)];

        while let Some((node, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(AnalysisError::TooDeep {
                    depth,
                    limit: self.max_depth,
                });
            }
            acc.visit(node, depth);
            // Reverse push keeps children in array order
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }

        let stats = acc.finish();
        tracing::debug!(
            layers = stats.total_layers,
            depth = stats.max_depth,
            colors = stats.colors.len(),
            complex_frames = stats.complex_frame_summary.total,
            "Document traversal complete"
        );
        Ok(stats)
    }
}

#[derive(Default)]
struct Accumulator {
    stats: AnalysisStats,
    seen_colors: HashSet<String>,
    frames: Vec<ComplexFrame>,
}

impl Accumulator {
    fn visit(&mut self, node: &DocumentNode, depth: usize) {
        self.stats.total_layers += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        *self
            .stats
            .layer_types
            .entry(node.kind.as_str().to_string())
            .or_insert(0) += 1;

        for paint in node.fills.iter().chain(&node.strokes) {
            if let Some(color) = paint.solid_color() {
                self.add_color(canonical_color(color.to_rgb8()));
            }
        }

        if let Some(style) = &node.style
            && let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty())
        {
            *self
                .stats
                .typography
                .entry(typography_key(family, style.font_size))
                .or_insert(0) += 1;
        }

        if node.component_id.is_some() {
            let name = node
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(analysis::UNNAMED_COMPONENT);
            *self
                .stats
                .component_usage
                .entry(name.to_string())
                .or_insert(0) += 1;
        }

        if node.kind == NodeKind::Frame
            && node.children.len() > analysis::COMPLEX_FRAME_CHILD_THRESHOLD
        {
            self.frames.push(ComplexFrame {
                name: node.name.clone().unwrap_or_default(),
                child_count: node.children.len(),
                width: node.width(),
                height: node.height(),
            });
        }
    }

    fn add_color(&mut self, color: String) {
        if self.seen_colors.insert(color.clone()) {
            self.stats.colors.push(color);
        }
    }

    fn finish(mut self) -> AnalysisStats {
        // Stable sort keeps traversal order among equal child counts
        self.frames.sort_by(|a, b| b.child_count.cmp(&a.child_count));
        self.stats.complex_frame_summary = ComplexFrameSummary::from_frames(&self.frames);
        self.frames.truncate(analysis::MAX_REPORTED_COMPLEX_FRAMES);
        self.stats.complex_frames = self.frames;
        self.stats
    }
}
