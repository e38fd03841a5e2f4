//! View model for color-wheel style UIs.
//!
//! Each shade is placed twice on a wheel along the direction of its hue: once
//! at a distance driven by chroma and once at a distance driven by lightness.
//! Numbers are pre-formatted so snapshots of the rendered UI stay stable.

use serde::Serialize;

use crate::catalog::ScaleCode;
use crate::color::{oklch_to_css, oklch_to_hex, Oklch};
use crate::level::Level;
use crate::palette::{ColorScale, Palette, Shade};
use crate::ramp::RampFamily;

/// Placement of the two rings inside a square viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelGeometry {
    pub center: f64,
    /// Upper bound of both radii.
    pub max_radius: f64,
    /// Steepness of the `tanh` map from chroma to radius.
    pub chroma_gain: f64,
    pub lightness_power: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            center: 50.0,
            max_radius: 37.0,
            chroma_gain: 6.0,
            lightness_power: 1.5,
        }
    }
}

impl WheelGeometry {
    /// Saturates towards `max_radius` however large the chroma gets.
    pub fn chroma_radius(&self, chroma: f64) -> f64 {
        self.max_radius * (self.chroma_gain * chroma).tanh()
    }

    pub fn lightness_radius(&self, lightness: f64) -> f64 {
        self.max_radius * lightness.powf(self.lightness_power)
    }

    fn point(&self, radius: f64, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point {
            x: self.center + radius * cos,
            y: self.center + radius * sin,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewConfig {
    pub geometry: WheelGeometry,
    /// Leave the background and foreground scales out of the view.
    pub skip_base_scales: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadeView {
    pub code: ScaleCode,
    pub level: Level,
    /// Lightness as a percentage, one decimal (`"62.8%"`).
    pub lightness: String,
    /// Chroma, two decimals.
    pub chroma: String,
    /// Hue in degrees, one decimal.
    pub hue: String,
    pub hex: String,
    pub css: String,
    /// Relative luminance, three decimals.
    pub relative_luminance: String,
    /// Contrast ratio against the background anchor, two decimals.
    pub contrast_ratio: String,
    pub chroma_point: Point,
    pub lightness_point: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleView {
    pub name: String,
    pub code: ScaleCode,
    pub anchor_level: Level,
    pub anchor_css: String,
    pub anchor_hex: String,
    pub shades: Vec<ShadeView>,
}

/// Project every scale of `palette`, in catalog order.
pub fn to_view_model(palette: &Palette, config: &ViewConfig) -> Vec<ScaleView> {
    palette
        .iter()
        .filter(|scale| !(config.skip_base_scales && is_base_scale(scale)))
        .map(|scale| scale_view(scale, &config.geometry))
        .collect()
}

fn is_base_scale(scale: &ColorScale) -> bool {
    matches!(
        scale.seed.family,
        RampFamily::Background(_) | RampFamily::Foreground(_)
    )
}

fn scale_view(scale: &ColorScale, geometry: &WheelGeometry) -> ScaleView {
    let anchor = scale.anchor().color;
    ScaleView {
        name: scale.name().to_string(),
        code: scale.code(),
        anchor_level: scale.anchor_level,
        anchor_css: oklch_to_css(&anchor),
        anchor_hex: oklch_to_hex(&anchor),
        shades: scale
            .shades
            .iter()
            .map(|shade| shade_view(scale.code(), shade, geometry))
            .collect(),
    }
}

pub fn shade_view(code: ScaleCode, shade: &Shade, geometry: &WheelGeometry) -> ShadeView {
    let Oklch { l, c, h } = shade.color;
    let angle = -h;

    ShadeView {
        code,
        level: shade.level,
        lightness: format!("{:.1}%", l * 100.0),
        chroma: format!("{c:.2}"),
        hue: format!("{:.1}", shade.color.hue_degrees()),
        hex: oklch_to_hex(&shade.color),
        css: oklch_to_css(&shade.color),
        relative_luminance: format!("{:.3}", shade.relative_luminance),
        contrast_ratio: format!("{:.2}", shade.contrast_ratio),
        chroma_point: geometry.point(geometry.chroma_radius(c), angle),
        lightness_point: geometry.point(geometry.lightness_radius(l), angle),
    }
}
