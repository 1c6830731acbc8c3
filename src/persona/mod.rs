//! Design Personality Module
//!
//! Deterministic archetype classification over analysis statistics:
//! - `catalog`: the static archetype table with rules and pairings
//! - `classifier`: feature extraction, scoring and ranking
//! - `facts`: light-hearted commentary for the report

pub mod catalog;
pub mod classifier;
pub mod facts;

pub use catalog::{Archetype, ArchetypeProfile, CATALOG, CompatibilityProfile};
pub use classifier::{
    ArchetypeScore, ClassificationResult, ColorAnalysis, Features, MostUsedStyle,
    TypographyAnalysis, classify,
};
pub use facts::fun_facts;
