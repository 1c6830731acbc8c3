//! Design Analyzer Module
//!
//! Pure, synchronous analysis of a design document:
//! - Single-pass tree statistics (layers, depth, colors, typography, components)
//! - Canonical color encoding and palette harmony evaluation

pub mod color;
pub mod tree;

pub use color::{ColorHarmonyProfile, Hsl, canonical_color, parse_canonical_color};
pub use tree::{AnalysisStats, ComplexFrame, ComplexFrameSummary, TreeAnalyzer, typography_key};
