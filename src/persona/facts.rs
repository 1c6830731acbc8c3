//! Fun facts shown under the classification.

use super::catalog::Archetype;
use crate::analyzer::{AnalysisStats, ColorHarmonyProfile};
use crate::constants::facts;
use crate::types::format_thousands;

/// Build the fun-fact list in display order.
pub fn fun_facts(
    stats: &AnalysisStats,
    harmony: &ColorHarmonyProfile,
    archetype: &Archetype,
) -> Vec<String> {
    let layers = format_thousands(stats.total_layers);
    let colors = stats.colors.len();
    let styles = stats.typography.len();

    let mut out = vec![
        if stats.total_layers > facts::HIGH_LAYER_COUNT {
            format!("Your design has {layers} layers - more than a mille-feuille at a French bakery! 🥐")
        } else {
            format!("Your design has {layers} layers - lighter than a soufflé! 🍮")
        },
        if harmony.is_vibrant {
            format!("Your palette rocks {colors} colors - a disco party in a design file! 🕺")
        } else {
            format!("Your palette rocks {colors} colors - cool, calm and collected! 😎")
        },
        if styles > facts::EXPRESSIVE_TYPE_STYLES {
            format!("Your typography spans {styles} styles - a font DJ mixing beats! 🎧")
        } else {
            format!("Your typography spans {styles} styles - clean and classic, like a tailored suit! 👔")
        },
    ];

    if harmony.has_high_contrast {
        out.push("Your contrast is stronger than this morning's coffee! ☕".to_string());
    }

    if let Some((style, count)) = stats.most_used_typography() {
        out.push(format!(
            "Your favorite style, {style}, shows up {count} times - more action than a superhero movie! 🦸"
        ));
    }

    out.push(format!("As {}, {}", archetype.name, archetype.description));
    out
}
