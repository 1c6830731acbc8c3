//! Archetype Catalog
//!
//! The fixed, process-wide table of design archetypes. Declaration order is
//! significant: it is the tie-break order used by the classifier.
//!
//! Each entry carries its scoring rule next to its descriptive text, so the
//! catalog is the single place that defines what an archetype is.

use serde::{Deserialize, Serialize};

use super::classifier::Features;
use crate::constants::scoring;

/// Pairing with another archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compatibility {
    pub archetype: &'static str,
    pub reason: &'static str,
}

/// Static catalog entry
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub strengths: &'static [&'static str],
    pub compatibility: Compatibility,
    /// Human-readable intent; selection is score-driven
    pub requirements: &'static [&'static str],
    rule: fn(&Features) -> bool,
}

impl Archetype {
    /// Whether this archetype's rule holds for the given features
    pub fn matches(&self, features: &Features) -> bool {
        (self.rule)(features)
    }

    /// Points earned for the given features
    pub fn score(&self, features: &Features) -> u32 {
        if self.matches(features) {
            scoring::RULE_POINTS
        } else {
            0
        }
    }

    pub fn to_profile(&self) -> ArchetypeProfile {
        ArchetypeProfile {
            name: self.name.to_string(),
            emoji: self.emoji.to_string(),
            description: self.description.to_string(),
            strengths: self.strengths.iter().map(|s| s.to_string()).collect(),
            compatibility: self.compatibility.into(),
            requirements: self.requirements.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Owned, serializable copy of a compatibility pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityProfile {
    pub archetype: String,
    pub reason: String,
}

impl From<Compatibility> for CompatibilityProfile {
    fn from(c: Compatibility) -> Self {
        Self {
            archetype: c.archetype.to_string(),
            reason: c.reason.to_string(),
        }
    }
}

/// Owned, serializable copy of a catalog entry (stored inside reports)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub strengths: Vec<String>,
    pub compatibility: CompatibilityProfile,
    pub requirements: Vec<String>,
}

// =============================================================================
// Catalog
// =============================================================================

pub const MINIMALIST_MONK: &str = "The Minimalist Monk";
pub const COLOR_MYSTIC: &str = "The Color Mystic";
pub const GRID_GUARDIAN: &str = "The Grid Guardian";
pub const TYPE_WHISPERER: &str = "The Type Whisperer";
pub const PIXEL_PROPHET: &str = "The Pixel Prophet";
pub const COMPONENT_COMPOSER: &str = "The Component Composer";

pub static CATALOG: [Archetype; 6] = [
    Archetype {
        name: MINIMALIST_MONK,
        emoji: "🧘",
        description: "you design like a tidy-up expert: every element has earned its place, \
                      and the whole file reads like a raked zen garden.",
        strengths: &[
            "Ruthless simplification",
            "Pixel-perfect spacing",
            "Elegant minimalism",
        ],
        compatibility: Compatibility {
            archetype: COLOR_MYSTIC,
            reason: "You master the art of less; a Color Mystic adds just enough vibrancy \
                     to bring your calm compositions to life.",
        },
        requirements: &[
            "At most 4 colors",
            "Monochromatic palette",
            "Fewer than 500 layers",
        ],
        rule: |f| {
            f.color_count <= scoring::MINIMALIST_MAX_COLORS
                && f.harmony.is_monochromatic
                && f.total_layers < scoring::MINIMALIST_MAX_LAYERS
        },
    },
    Archetype {
        name: COLOR_MYSTIC,
        emoji: "🎨",
        description: "your palette is a mood ring: colors that tell stories and stir \
                      feelings instead of merely looking nice.",
        strengths: &[
            "Emotional color theory",
            "Visual storytelling",
            "Brand personality",
        ],
        compatibility: Compatibility {
            archetype: GRID_GUARDIAN,
            reason: "Expressive color paired with a Grid Guardian's structure gives designs \
                     that are both moving and balanced.",
        },
        requirements: &["At least 6 colors", "Vibrant palette", "High contrast"],
        rule: |f| {
            f.color_count >= scoring::COLOR_MYSTIC_MIN_COLORS
                && f.harmony.is_vibrant
                && f.harmony.has_high_contrast
        },
    },
    Archetype {
        name: GRID_GUARDIAN,
        emoji: "📐",
        description: "you are the architect of the pixel realm, with grids tight enough \
                      to make a mathematician smile.",
        strengths: &[
            "Layout mastery",
            "Responsive design",
            "Structural harmony",
        ],
        compatibility: Compatibility {
            archetype: TYPE_WHISPERER,
            reason: "Your clean layouts are the ideal stage for a Type Whisperer's \
                     typographic performances.",
        },
        requirements: &[
            "Complex frames aligned to an 8px grid",
            "Nesting depth of 5 or less",
        ],
        rule: |f| f.all_frames_on_grid && f.max_depth <= scoring::GRID_GUARDIAN_MAX_DEPTH,
    },
    Archetype {
        name: TYPE_WHISPERER,
        emoji: "📚",
        description: "typography is a performance in your hands; fonts talk to you and \
                      you make them sing together.",
        strengths: &[
            "Typography mastery",
            "Font pairing",
            "Readability magic",
        ],
        compatibility: Compatibility {
            archetype: PIXEL_PROPHET,
            reason: "You craft the reading experience while a Pixel Prophet makes sure \
                     every detail supports it.",
        },
        requirements: &["At least 5 typography styles", "A heading or title scale"],
        rule: |f| {
            f.typography_styles >= scoring::TYPE_WHISPERER_MIN_STYLES && f.has_type_scale
        },
    },
    Archetype {
        name: PIXEL_PROPHET,
        emoji: "🔮",
        description: "you see the future in every pixel, shipping interfaces that feel \
                      like they arrived from next year.",
        strengths: &[
            "Innovation",
            "Micro-interactions",
            "Future-forward design",
        ],
        compatibility: Compatibility {
            archetype: COMPONENT_COMPOSER,
            reason: "Your inventiveness combined with a Component Composer's system \
                     yields interfaces that are bold and dependable.",
        },
        requirements: &[
            "More than 5 distinct complex layouts",
            "More than 20 component instances",
        ],
        rule: |f| {
            f.distinct_layouts > scoring::PIXEL_PROPHET_MIN_LAYOUTS
                && f.instance_layers > scoring::PIXEL_PROPHET_MIN_INSTANCES
        },
    },
    Archetype {
        name: COMPONENT_COMPOSER,
        emoji: "🏗️",
        description: "you build UI like a brick-set master: well-organized components \
                      and variants that snap together.",
        strengths: &[
            "System thinking",
            "Component architecture",
            "Scalable design",
        ],
        compatibility: Compatibility {
            archetype: MINIMALIST_MONK,
            reason: "Your systematic approach plus a Minimalist Monk's clarity produces \
                     designs that are powerful and pristine.",
        },
        requirements: &[
            "At least 15 distinct components in use",
            "More than 10 component definitions",
        ],
        rule: |f| {
            f.distinct_components >= scoring::COMPOSER_MIN_COMPONENTS
                && f.component_layers > scoring::COMPOSER_MIN_COMPONENT_LAYERS
        },
    },
];

/// Look up a catalog entry by exact name
pub fn find(name: &str) -> Option<&'static Archetype> {
    CATALOG.iter().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<&str> = CATALOG.iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec![
                MINIMALIST_MONK,
                COLOR_MYSTIC,
                GRID_GUARDIAN,
                TYPE_WHISPERER,
                PIXEL_PROPHET,
                COMPONENT_COMPOSER,
            ]
        );
    }

    #[test]
    fn test_compatibility_forms_a_cycle() {
        for (i, archetype) in CATALOG.iter().enumerate() {
            let next = &CATALOG[(i + 1) % CATALOG.len()];
            assert_eq!(archetype.compatibility.archetype, next.name);
            assert!(find(archetype.compatibility.archetype).is_some());
        }
    }

    #[test]
    fn test_entries_are_complete() {
        for archetype in &CATALOG {
            assert!(!archetype.emoji.is_empty());
            assert!(!archetype.description.is_empty());
            assert_eq!(archetype.strengths.len(), 3);
            assert!(!archetype.requirements.is_empty());
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find(GRID_GUARDIAN).map(|a| a.emoji), Some("📐"));
        assert!(find("The Unknown").is_none());
    }

    #[test]
    fn test_profile_copies_entry() {
        let profile = CATALOG[0].to_profile();
        assert_eq!(profile.name, MINIMALIST_MONK);
        assert_eq!(profile.compatibility.archetype, COLOR_MYSTIC);
        assert_eq!(profile.strengths[0], "Ruthless simplification");
    }
}
