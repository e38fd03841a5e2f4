//! WCAG relative luminance and contrast ratio for OKLCH colors.

use serde::Serialize;

use crate::color::{linearize, oklch_to_srgb, Oklch};

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;
const FLARE: f64 = 0.05;

/// Luminance and contrast of one color measured against a reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub relative_luminance: f64,
    pub contrast_ratio: f64,
}

/// Relative luminance in `[0, 1]`, computed from the clamped sRGB rendition of
/// the color.
pub fn relative_luminance(color: &Oklch) -> f64 {
    let [r, g, b] = oklch_to_srgb(color).map(linearize);
    (RED_WEIGHT * r + GREEN_WEIGHT * g + BLUE_WEIGHT * b).clamp(0.0, 1.0)
}

/// WCAG contrast ratio in `[1, 21]`. Argument order does not matter.
pub fn contrast_ratio(a: &Oklch, b: &Oklch) -> f64 {
    let mut lighter = relative_luminance(a);
    let mut darker = relative_luminance(b);
    if darker > lighter {
        std::mem::swap(&mut lighter, &mut darker);
    }
    (lighter + FLARE) / (darker + FLARE)
}

pub fn compare(reference: &Oklch, color: &Oklch) -> Comparison {
    Comparison {
        relative_luminance: relative_luminance(color),
        contrast_ratio: contrast_ratio(reference, color),
    }
}
