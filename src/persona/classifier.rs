//! Archetype Classifier
//!
//! Maps analysis statistics and a color harmony profile onto one archetype of
//! the static catalog.
//!
//! ## Scoring
//!
//! Every archetype starts at zero and earns a fixed number of points when its
//! rule holds. The ranking is a stable descending sort over catalog order, so
//! equal scores always resolve to the earliest archetype.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::{ArchetypeProfile, CATALOG, CompatibilityProfile};
use super::facts::fun_facts;
use crate::analyzer::{AnalysisStats, ColorHarmonyProfile};
use crate::types::NodeKind;

/// Substrings that mark a typography key as part of a type scale
const TYPE_SCALE_MARKERS: &[&str] = &["heading", "title"];

/// Rule inputs derived from statistics and harmony
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub color_count: usize,
    pub harmony: ColorHarmonyProfile,
    pub total_layers: usize,
    pub max_depth: usize,
    pub all_frames_on_grid: bool,
    pub distinct_layouts: usize,
    pub typography_styles: usize,
    pub has_type_scale: bool,
    pub instance_layers: usize,
    pub component_layers: usize,
    pub distinct_components: usize,
}

impl Features {
    pub fn extract(stats: &AnalysisStats, harmony: &ColorHarmonyProfile) -> Self {
        let has_type_scale = stats
            .typography
            .keys()
            .any(|key| TYPE_SCALE_MARKERS.iter().any(|m| key.contains(m)));

        Self {
            color_count: stats.colors.len(),
            harmony: *harmony,
            total_layers: stats.total_layers,
            max_depth: stats.max_depth,
            all_frames_on_grid: stats.complex_frame_summary.all_on_grid,
            distinct_layouts: stats.complex_frame_summary.distinct_layouts,
            typography_styles: stats.typography.len(),
            has_type_scale,
            instance_layers: stats.layer_count(&NodeKind::Instance),
            component_layers: stats.layer_count(&NodeKind::Component),
            distinct_components: stats.component_usage.len(),
        }
    }
}

/// One line of the ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeScore {
    pub archetype: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalysis {
    pub palette: Vec<String>,
    pub harmony: ColorHarmonyProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostUsedStyle {
    pub style: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyAnalysis {
    pub styles: BTreeMap<String, usize>,
    pub most_used: Option<MostUsedStyle>,
}

/// Outcome of classifying one design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub primary_archetype: String,
    pub archetype_info: ArchetypeProfile,
    /// Descending by score; ties keep catalog order
    pub scores: Vec<ArchetypeScore>,
    pub fun_facts: Vec<String>,
    pub compatibility: CompatibilityProfile,
    pub color_analysis: ColorAnalysis,
    pub typography_analysis: TypographyAnalysis,
}

impl ClassificationResult {
    pub fn score_of(&self, archetype: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|s| s.archetype == archetype)
            .map(|s| s.score)
    }
}

/// Classify a design. Pure; depends only on its inputs and the catalog.
pub fn classify(stats: &AnalysisStats, harmony: &ColorHarmonyProfile) -> ClassificationResult {
    let features = Features::extract(stats, harmony);

    let mut ranked = CATALOG
        .each_ref()
        .map(|archetype| (archetype, archetype.score(&features)));
    // sort_by is stable: equal scores keep declaration order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let [(winner, top_score), ..] = ranked;
    tracing::debug!(
        archetype = winner.name,
        score = top_score,
        "Classified design"
    );

    let most_used = stats
        .most_used_typography()
        .map(|(style, count)| MostUsedStyle {
            style: style.to_string(),
            count,
        });

    ClassificationResult {
        primary_archetype: winner.name.to_string(),
        archetype_info: winner.to_profile(),
        scores: ranked
            .iter()
            .map(|(a, score)| ArchetypeScore {
                archetype: a.name.to_string(),
                score: *score,
            })
            .collect(),
        fun_facts: fun_facts(stats, harmony, winner),
        compatibility: winner.compatibility.into(),
        color_analysis: ColorAnalysis {
            palette: stats.colors.clone(),
            harmony: *harmony,
        },
        typography_analysis: TypographyAnalysis {
            styles: stats.typography.clone(),
            most_used,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ComplexFrameSummary, canonical_color};
    use crate::persona::catalog::*;

    fn neutral() -> ColorHarmonyProfile {
        ColorHarmonyProfile::default()
    }

    /// Stats that match no rule: deep tree, off-grid frames
    fn plain_stats() -> AnalysisStats {
        AnalysisStats {
            total_layers: 800,
            max_depth: 9,
            complex_frame_summary: ComplexFrameSummary {
                total: 1,
                distinct_layouts: 1,
                all_on_grid: false,
            },
            ..AnalysisStats::default()
        }
    }

    fn palette(n: usize) -> Vec<String> {
        (0..n).map(|i| canonical_color([i as u8, 0, 0])).collect()
    }

    #[test]
    fn test_all_zero_resolves_to_first_archetype() {
        let result = classify(&plain_stats(), &neutral());
        assert!(result.scores.iter().all(|s| s.score == 0));
        assert_eq!(result.primary_archetype, MINIMALIST_MONK);

        let order: Vec<&str> = result.scores.iter().map(|s| s.archetype.as_str()).collect();
        let catalog: Vec<&str> = CATALOG.iter().map(|a| a.name).collect();
        assert_eq!(order, catalog);
    }

    #[test]
    fn test_empty_design_is_grid_guardian() {
        let result = classify(&AnalysisStats::default(), &neutral());
        assert_eq!(result.primary_archetype, GRID_GUARDIAN);
        assert_eq!(result.score_of(GRID_GUARDIAN), Some(5));
        assert_eq!(result.compatibility.archetype, TYPE_WHISPERER);
    }

    #[test]
    fn test_minimalist_monk() {
        let mut stats = plain_stats();
        stats.total_layers = 120;
        stats.colors = palette(3);
        let harmony = ColorHarmonyProfile {
            is_monochromatic: true,
            ..neutral()
        };
        let result = classify(&stats, &harmony);
        assert_eq!(result.primary_archetype, MINIMALIST_MONK);
        assert_eq!(result.score_of(MINIMALIST_MONK), Some(5));
        assert_eq!(result.compatibility.archetype, COLOR_MYSTIC);

        stats.total_layers = 500;
        assert_eq!(classify(&stats, &harmony).score_of(MINIMALIST_MONK), Some(0));
    }

    #[test]
    fn test_color_mystic() {
        let mut stats = plain_stats();
        stats.colors = palette(6);
        let harmony = ColorHarmonyProfile {
            is_vibrant: true,
            has_high_contrast: true,
            ..neutral()
        };
        let result = classify(&stats, &harmony);
        assert_eq!(result.primary_archetype, COLOR_MYSTIC);
        assert_eq!(result.scores[0].archetype, COLOR_MYSTIC);
    }

    #[test]
    fn test_type_whisperer_needs_a_scale() {
        let mut stats = plain_stats();
        for key in ["Inter 12px", "Inter 14px", "Inter 16px", "Inter 20px", "Inter 32px"] {
            stats.typography.insert(key.to_string(), 1);
        }
        assert_eq!(classify(&stats, &neutral()).score_of(TYPE_WHISPERER), Some(0));

        // Markers are matched as written
        stats.typography.insert("Heading Sans 48px".to_string(), 2);
        assert_eq!(classify(&stats, &neutral()).score_of(TYPE_WHISPERER), Some(0));

        stats.typography.insert("display-title 48px".to_string(), 2);
        let result = classify(&stats, &neutral());
        assert_eq!(result.primary_archetype, TYPE_WHISPERER);
    }

    #[test]
    fn test_pixel_prophet() {
        let mut stats = plain_stats();
        stats.complex_frame_summary.distinct_layouts = 6;
        stats.layer_types.insert("INSTANCE".to_string(), 21);
        assert_eq!(classify(&stats, &neutral()).primary_archetype, PIXEL_PROPHET);

        stats.layer_types.insert("INSTANCE".to_string(), 20);
        assert_eq!(classify(&stats, &neutral()).score_of(PIXEL_PROPHET), Some(0));
    }

    #[test]
    fn test_component_composer() {
        let mut stats = plain_stats();
        for i in 0..15 {
            stats.component_usage.insert(format!("Component {}", i), 2);
        }
        stats.layer_types.insert("COMPONENT".to_string(), 11);
        let result = classify(&stats, &neutral());
        assert_eq!(result.primary_archetype, COMPONENT_COMPOSER);
        assert_eq!(result.compatibility.archetype, MINIMALIST_MONK);
    }

    #[test]
    fn test_tie_resolves_to_catalog_order() {
        // Grid Guardian and Component Composer both score
        let mut stats = plain_stats();
        stats.max_depth = 3;
        stats.complex_frame_summary.all_on_grid = true;
        for i in 0..15 {
            stats.component_usage.insert(format!("C{}", i), 1);
        }
        stats.layer_types.insert("COMPONENT".to_string(), 11);

        for _ in 0..10 {
            let result = classify(&stats, &neutral());
            assert_eq!(result.primary_archetype, GRID_GUARDIAN);
            assert_eq!(result.scores[1].archetype, COMPONENT_COMPOSER);
            assert_eq!(result.scores[1].score, 5);
        }
    }

    #[test]
    fn test_result_carries_analysis_sections() {
        let mut stats = plain_stats();
        stats.colors = palette(2);
        stats.typography.insert("Inter 16px".to_string(), 4);
        let result = classify(&stats, &neutral());

        assert_eq!(result.color_analysis.palette, stats.colors);
        assert_eq!(
            result.typography_analysis.most_used,
            Some(MostUsedStyle {
                style: "Inter 16px".to_string(),
                count: 4
            })
        );
        assert_eq!(result.archetype_info.name, result.primary_archetype);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = classify(&AnalysisStats::default(), &neutral());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("primaryArchetype").is_some());
        assert!(json.get("funFacts").is_some());
        assert!(json["colorAnalysis"]["harmony"].get("isMonochromatic").is_some());

        let back: ClassificationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
