//! Ramp generation: from one anchor color to the eleven shades of a scale.
//!
//! Every family except [`NeutralRamp`] is reduced to a pair of [`Leg`]s, one
//! running from the anchor towards level 50 and one towards level 950. A leg
//! interpolates lightness along a power curve and chroma linearly, then fixes
//! up its extreme rung. The tuning constants below were matched by eye against
//! reference palettes; treat them as data.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_oklch, ColorError, Oklch};
use crate::level::{Level, LEVELS, LEVEL_COUNT};

/// Lightest chromatic shade before edge correction.
pub const CHROMATIC_LIGHT_TARGET: Target = Target::new(0.97, 0.01);
/// Darkest chromatic shade before edge correction.
pub const CHROMATIC_DARK_TARGET: Target = Target::new(0.25, 0.05);
/// How far shade 50 is pulled towards shade 100.
pub const CHROMATIC_LIGHT_BLEND: Blend = Blend::new(0.25, 0.37);
/// How far shade 950 is pulled towards shade 900.
pub const CHROMATIC_DARK_BLEND: Blend = Blend::new(0.37, 0.42);

pub const BACKGROUND_LIGHT_LIGHTNESS_SCALE: f64 = 1.8;
pub const BACKGROUND_LIGHT_CHROMA_SCALE: f64 = 2.0;
pub const BACKGROUND_LIGHT_POWER: f64 = 1.3;
pub const BACKGROUND_DARK_LIGHTNESS_SCALE: f64 = 0.667;
pub const BACKGROUND_DARK_CHROMA_SCALE: f64 = 0.667;
pub const BACKGROUND_DARK_POWER: f64 = 1.5;

/// Seeds at or below this lightness are treated as dark backgrounds.
pub const FOREGROUND_THRESHOLD: f64 = 0.5;
/// Anchor lightness for text on a dark background.
pub const FOREGROUND_ON_DARK: f64 = 0.85;
/// Anchor lightness for text on a light background.
pub const FOREGROUND_ON_LIGHT: f64 = 0.25;
pub const FOREGROUND_LIGHT_LIGHTNESS_SCALE: f64 = 1.25;
pub const FOREGROUND_LIGHT_LIGHTNESS_CEILING: f64 = 0.98;
pub const FOREGROUND_LIGHT_CHROMA_SCALE: f64 = 1.5;
pub const FOREGROUND_LIGHT_POWER: f64 = 1.5;
pub const FOREGROUND_DARK_POWER: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RampError {
    #[error("anchor level {level} is not one of the ramp levels")]
    MissingAnchorLevel { level: Level },
    #[error("level {level} is not one of the ramp levels")]
    UnknownLevel { level: Level },
    #[error("curated shade {level} is not a valid color: {source}")]
    InvalidConstant {
        level: Level,
        #[source]
        source: ColorError,
    },
    #[error("foreground ramp requires the background ramp to be built first")]
    BackgroundUnavailable,
}

/// Lightness and chroma a leg heads towards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub lightness: f64,
    pub chroma: f64,
}

impl Target {
    pub const fn new(lightness: f64, chroma: f64) -> Self {
        Self { lightness, chroma }
    }

    fn of(color: &Oklch) -> Self {
        Self::new(color.l, color.c)
    }
}

/// Fractions by which an extreme rung moves towards its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blend {
    pub lightness: f64,
    pub chroma: f64,
}

impl Blend {
    pub const fn new(lightness: f64, chroma: f64) -> Self {
        Self { lightness, chroma }
    }
}

/// Second pass applied to the extreme rung of a leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeCorrection {
    None,
    /// Pull the extreme rung towards its nearer neighbour.
    Blend(Blend),
    /// Replace the target with the value first computed for the neighbour and
    /// interpolate the leg again.
    Retarget,
}

/// One half of a ramp, from the anchor to level 50 or level 950.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub target: Target,
    pub lightness_power: f64,
    pub edge: EdgeCorrection,
}

impl Leg {
    pub const fn linear(target: Target, edge: EdgeCorrection) -> Self {
        Self {
            target,
            lightness_power: 1.0,
            edge,
        }
    }

    fn raw(&self, anchor: &Oklch, target: Target, distance: usize, span: usize) -> Target {
        let t = distance as f64 / span as f64;
        Target::new(
            anchor.l + (target.lightness - anchor.l) * t.powf(self.lightness_power),
            anchor.c + (target.chroma - anchor.c) * t,
        )
    }

    /// Target actually used once a `Retarget` correction has been resolved.
    fn resolved_target(&self, anchor: &Oklch, span: usize) -> Target {
        match self.edge {
            EdgeCorrection::Retarget if span > 0 => self.raw(anchor, self.target, span - 1, span),
            _ => self.target,
        }
    }

    fn point(&self, anchor: &Oklch, target: Target, distance: usize, span: usize) -> Oklch {
        let raw = self.raw(anchor, target, distance, span);
        Oklch::clamped(raw.lightness, raw.chroma, anchor.h)
    }
}

/// Eleven shades, lightest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    anchor_index: usize,
    shades: [Oklch; LEVEL_COUNT],
}

impl Ramp {
    pub fn anchor_level(&self) -> Level {
        LEVELS[self.anchor_index]
    }

    pub fn anchor(&self) -> Oklch {
        self.shades[self.anchor_index]
    }

    pub(crate) fn anchor_index(&self) -> usize {
        self.anchor_index
    }

    pub fn get(&self, level: Level) -> Option<Oklch> {
        level.index().map(|index| self.shades[index])
    }

    pub fn shades(&self) -> &[Oklch; LEVEL_COUNT] {
        &self.shades
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, Oklch)> + '_ {
        LEVELS.iter().copied().zip(self.shades.iter().copied())
    }
}

/// Shapes a two-leg ramp around `anchor`, which is stored verbatim.
pub fn shape(
    anchor: Oklch,
    anchor_level: Level,
    light: &Leg,
    dark: &Leg,
) -> Result<Ramp, RampError> {
    let anchor_index = anchor_level
        .index()
        .ok_or(RampError::MissingAnchorLevel {
            level: anchor_level,
        })?;

    let light_span = anchor_index;
    let dark_span = LEVEL_COUNT - 1 - anchor_index;
    let light_target = light.resolved_target(&anchor, light_span);
    let dark_target = dark.resolved_target(&anchor, dark_span);

    let mut shades: [Oklch; LEVEL_COUNT] =
        std::array::from_fn(|index| match index.cmp(&anchor_index) {
            Ordering::Less => light.point(&anchor, light_target, anchor_index - index, light_span),
            Ordering::Equal => anchor,
            Ordering::Greater => {
                dark.point(&anchor, dark_target, index - anchor_index, dark_span)
            }
        });

    if light_span > 0 {
        correct_edge(&mut shades, &light.edge, 0, 1, anchor.h);
    }
    if dark_span > 0 {
        correct_edge(&mut shades, &dark.edge, LEVEL_COUNT - 1, LEVEL_COUNT - 2, anchor.h);
    }

    Ok(Ramp {
        anchor_index,
        shades,
    })
}

fn correct_edge(
    shades: &mut [Oklch; LEVEL_COUNT],
    edge: &EdgeCorrection,
    extreme: usize,
    neighbour: usize,
    hue: f64,
) {
    let EdgeCorrection::Blend(blend) = edge else {
        return;
    };

    let near = shades[neighbour];
    let far = shades[extreme];
    shades[extreme] = Oklch::clamped(
        far.l + (near.l - far.l) * blend.lightness,
        far.c + (near.c - far.c) * blend.chroma,
        hue,
    );
}

/// Standard hue-bearing scales, anchored on a fixed catalog color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaticRamp {
    pub anchor_level: Level,
    pub light_target: Target,
    pub dark_target: Target,
    pub light_blend: Blend,
    pub dark_blend: Blend,
}

impl Default for ChromaticRamp {
    fn default() -> Self {
        Self {
            anchor_level: Level(600),
            light_target: CHROMATIC_LIGHT_TARGET,
            dark_target: CHROMATIC_DARK_TARGET,
            light_blend: CHROMATIC_LIGHT_BLEND,
            dark_blend: CHROMATIC_DARK_BLEND,
        }
    }
}

impl ChromaticRamp {
    pub fn generate(&self, anchor: Oklch) -> Result<Ramp, RampError> {
        let light = Leg::linear(self.light_target, EdgeCorrection::Blend(self.light_blend));
        let dark = Leg::linear(self.dark_target, EdgeCorrection::Blend(self.dark_blend));
        shape(anchor, self.anchor_level, &light, &dark)
    }
}

/// Surface scale grown around the user's seed. Targets scale with the seed so
/// the ramp stays in the seed's neighbourhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundRamp {
    pub anchor_level: Level,
    pub light_lightness_scale: f64,
    pub light_chroma_scale: f64,
    pub light_power: f64,
    pub dark_lightness_scale: f64,
    pub dark_chroma_scale: f64,
    pub dark_power: f64,
}

impl Default for BackgroundRamp {
    fn default() -> Self {
        Self {
            anchor_level: Level(600),
            light_lightness_scale: BACKGROUND_LIGHT_LIGHTNESS_SCALE,
            light_chroma_scale: BACKGROUND_LIGHT_CHROMA_SCALE,
            light_power: BACKGROUND_LIGHT_POWER,
            dark_lightness_scale: BACKGROUND_DARK_LIGHTNESS_SCALE,
            dark_chroma_scale: BACKGROUND_DARK_CHROMA_SCALE,
            dark_power: BACKGROUND_DARK_POWER,
        }
    }
}

impl BackgroundRamp {
    pub fn generate(&self, seed: Oklch) -> Result<Ramp, RampError> {
        let light = Leg {
            target: Target::new(
                (seed.l * self.light_lightness_scale).min(1.0),
                seed.c * self.light_chroma_scale,
            ),
            lightness_power: self.light_power,
            edge: EdgeCorrection::None,
        };
        let dark = Leg {
            target: Target::new(
                seed.l * self.dark_lightness_scale,
                seed.c * self.dark_chroma_scale,
            ),
            lightness_power: self.dark_power,
            edge: EdgeCorrection::None,
        };
        shape(seed, self.anchor_level, &light, &dark)
    }
}

/// Text scale. The anchor lightness is picked for legibility on the seed and
/// the dark end converges on the background's lightest shade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForegroundRamp {
    pub anchor_level: Level,
    pub threshold: f64,
    pub on_dark: f64,
    pub on_light: f64,
    pub light_lightness_scale: f64,
    pub light_lightness_ceiling: f64,
    pub light_chroma_scale: f64,
    pub light_power: f64,
    pub dark_power: f64,
    /// Background shade the darkest foreground shades converge on.
    pub background_level: Level,
}

impl Default for ForegroundRamp {
    fn default() -> Self {
        Self {
            anchor_level: Level(400),
            threshold: FOREGROUND_THRESHOLD,
            on_dark: FOREGROUND_ON_DARK,
            on_light: FOREGROUND_ON_LIGHT,
            light_lightness_scale: FOREGROUND_LIGHT_LIGHTNESS_SCALE,
            light_lightness_ceiling: FOREGROUND_LIGHT_LIGHTNESS_CEILING,
            light_chroma_scale: FOREGROUND_LIGHT_CHROMA_SCALE,
            light_power: FOREGROUND_LIGHT_POWER,
            dark_power: FOREGROUND_DARK_POWER,
            background_level: Level::LIGHTEST,
        }
    }
}

impl ForegroundRamp {
    /// Anchor derived from the seed: only the lightness changes.
    pub fn anchor_for(&self, seed: &Oklch) -> Oklch {
        let l = if seed.l <= self.threshold {
            self.on_dark
        } else {
            self.on_light
        };
        Oklch::new(l, seed.c, seed.h)
    }

    pub fn generate(&self, seed: Oklch, background: &Ramp) -> Result<Ramp, RampError> {
        let anchor = self.anchor_for(&seed);
        let background_extreme =
            background
                .get(self.background_level)
                .ok_or(RampError::UnknownLevel {
                    level: self.background_level,
                })?;

        let light = Leg {
            target: Target::new(
                (anchor.l * self.light_lightness_scale).min(self.light_lightness_ceiling),
                anchor.c * self.light_chroma_scale,
            ),
            lightness_power: self.light_power,
            edge: EdgeCorrection::None,
        };
        let dark = Leg {
            target: Target::of(&background_extreme),
            lightness_power: self.dark_power,
            edge: EdgeCorrection::Retarget,
        };
        shape(anchor, self.anchor_level, &light, &dark)
    }
}

/// A curated shade of a neutral scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedShade {
    pub level: Level,
    pub hex: String,
}

impl FixedShade {
    pub fn new(level: u16, hex: &str) -> Self {
        Self {
            level: Level(level),
            hex: hex.to_string(),
        }
    }
}

/// Grays, near-blacks and near-whites. Mostly hand-tuned constants; levels
/// left out of `shades` are filled from their curated neighbours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralRamp {
    pub anchor_level: Level,
    #[serde(default)]
    pub shades: Vec<FixedShade>,
}

impl NeutralRamp {
    pub fn generate(&self, anchor: Oklch) -> Result<Ramp, RampError> {
        let anchor_index = self
            .anchor_level
            .index()
            .ok_or(RampError::MissingAnchorLevel {
                level: self.anchor_level,
            })?;

        let mut known: Vec<(usize, Target)> = Vec::with_capacity(self.shades.len() + 1);
        known.push((anchor_index, Target::of(&anchor)));
        for shade in &self.shades {
            let index = shade
                .level
                .index()
                .ok_or(RampError::UnknownLevel { level: shade.level })?;
            if index == anchor_index {
                continue;
            }
            let color = hex_to_oklch(&shade.hex).map_err(|source| RampError::InvalidConstant {
                level: shade.level,
                source,
            })?;
            known.retain(|(existing, _)| *existing != index);
            known.push((index, Target::of(&color)));
        }
        known.sort_by_key(|(index, _)| *index);

        let shades: [Oklch; LEVEL_COUNT] = std::array::from_fn(|index| {
            if index == anchor_index {
                return anchor;
            }
            let before = known.iter().rev().find(|(i, _)| *i <= index);
            let after = known.iter().find(|(i, _)| *i >= index);
            let fill = match (before, after) {
                (Some((lo, low)), Some((hi, high))) if hi > lo => {
                    let t = (index - lo) as f64 / (hi - lo) as f64;
                    Target::new(
                        low.lightness + (high.lightness - low.lightness) * t,
                        low.chroma + (high.chroma - low.chroma) * t,
                    )
                }
                (Some((_, nearest)), _) | (None, Some((_, nearest))) => *nearest,
                (None, None) => Target::of(&anchor),
            };
            Oklch::clamped(fill.lightness, fill.chroma, anchor.h)
        });

        Ok(Ramp {
            anchor_index,
            shades,
        })
    }
}

/// How a scale's shades are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum RampFamily {
    Background(BackgroundRamp),
    Foreground(ForegroundRamp),
    Chromatic(ChromaticRamp),
    Neutral(NeutralRamp),
}

impl RampFamily {
    pub fn anchor_level(&self) -> Level {
        match self {
            RampFamily::Background(ramp) => ramp.anchor_level,
            RampFamily::Foreground(ramp) => ramp.anchor_level,
            RampFamily::Chromatic(ramp) => ramp.anchor_level,
            RampFamily::Neutral(ramp) => ramp.anchor_level,
        }
    }

    /// Whether the anchor comes from the caller's seed rather than the catalog.
    pub fn takes_seed(&self) -> bool {
        matches!(self, RampFamily::Background(_) | RampFamily::Foreground(_))
    }

    pub fn generate(&self, anchor: Oklch, background: Option<&Ramp>) -> Result<Ramp, RampError> {
        match self {
            RampFamily::Background(ramp) => ramp.generate(anchor),
            RampFamily::Foreground(ramp) => {
                let background = background.ok_or(RampError::BackgroundUnavailable)?;
                ramp.generate(anchor, background)
            }
            RampFamily::Chromatic(ramp) => ramp.generate(anchor),
            RampFamily::Neutral(ramp) => ramp.generate(anchor),
        }
    }
}
