//! Canonical Colors and Harmony Evaluation
//!
//! The tree analyzer stores colors as canonical strings (`rgb(R, G, B)`) and the
//! harmony evaluator parses them back. [`canonical_color`] and
//! [`parse_canonical_color`] are the only two places that know the format.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::constants::harmony;

static CANONICAL_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\((\d{1,3}), (\d{1,3}), (\d{1,3})\)$").expect("valid color regex")
});

/// Format 8-bit channels as the canonical color string.
pub fn canonical_color([r, g, b]: [u8; 3]) -> String {
    format!("rgb({}, {}, {})", r, g, b)
}

/// Parse a canonical color string back into 8-bit channels.
pub fn parse_canonical_color(value: &str) -> Option<[u8; 3]> {
    let caps = CANONICAL_COLOR.captures(value.trim())?;
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some([channel(1)?, channel(2)?, channel(3)?])
}

/// Hue (degrees, 0..360), saturation and lightness (0..=1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self {
            h: h / 6.0 * 360.0,
            s,
            l,
        }
    }
}

/// Palette-level color traits
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorHarmonyProfile {
    /// Hue range below 30°
    pub is_monochromatic: bool,
    /// Lightness spread above 0.5
    pub has_high_contrast: bool,
    /// Mean saturation above 0.6
    pub is_vibrant: bool,
    /// Mean saturation as a percentage (0-100)
    pub avg_saturation: f64,
    /// Number of colors that parsed
    pub sample_size: usize,
}

impl ColorHarmonyProfile {
    /// Evaluate a palette of canonical color strings.
    ///
    /// Strings that do not parse are skipped. An empty palette yields the
    /// neutral profile (all flags false, zero saturation).
    pub fn evaluate(colors: &[String]) -> Self {
        let hsl: Vec<Hsl> = colors
            .iter()
            .filter_map(|c| {
                let parsed = parse_canonical_color(c);
                if parsed.is_none() {
                    tracing::debug!("Skipping non-canonical color: {}", c);
                }
                parsed
            })
            .map(Hsl::from_rgb8)
            .collect();

        if hsl.is_empty() {
            return Self::default();
        }

        let (min_h, max_h) = min_max(hsl.iter().map(|c| c.h));
        let (min_l, max_l) = min_max(hsl.iter().map(|c| c.l));
        let avg_saturation = hsl.iter().map(|c| c.s).sum::<f64>() / hsl.len() as f64;

        Self {
            is_monochromatic: max_h - min_h < harmony::MONOCHROMATIC_HUE_RANGE,
            has_high_contrast: max_l - min_l > harmony::HIGH_CONTRAST_LIGHTNESS_SPREAD,
            is_vibrant: avg_saturation > harmony::VIBRANT_SATURATION,
            avg_saturation: avg_saturation * 100.0,
            sample_size: hsl.len(),
        }
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
