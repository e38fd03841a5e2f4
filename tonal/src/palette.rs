use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, NamedSeed, ScaleCode};
use crate::color::{hex_to_oklch, ColorError, Oklch};
use crate::level::{Level, LEVELS, LEVEL_COUNT};
use crate::metrics::compare;
use crate::ramp::{Ramp, RampError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("invalid seed color: {0}")]
    InvalidSeed(#[from] ColorError),
    #[error("scale code {code} is not in the catalog")]
    UnknownScaleCode { code: ScaleCode },
    #[error("scale {code} has no anchor color")]
    MissingAnchorHex { code: ScaleCode },
    #[error("scale {code} has an invalid anchor color: {source}")]
    InvalidAnchor {
        code: ScaleCode,
        #[source]
        source: ColorError,
    },
    #[error("failed to build scale {code}: {source}")]
    Ramp {
        code: ScaleCode,
        #[source]
        source: RampError,
    },
}

impl PaletteError {
    /// Whether the error has to abort the whole palette rather than just the
    /// scale it came from.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PaletteError::InvalidSeed(_)
                | PaletteError::Ramp {
                    source: RampError::MissingAnchorLevel { .. } | RampError::BackgroundUnavailable,
                    ..
                }
        )
    }
}

/// One rung of a scale, annotated against the background anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shade {
    pub level: Level,
    pub color: Oklch,
    pub relative_luminance: f64,
    pub contrast_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub seed: NamedSeed,
    /// Anchor color as given, before any family adjustment.
    pub base: Oklch,
    pub anchor_level: Level,
    pub shades: [Shade; LEVEL_COUNT],
    #[serde(skip)]
    anchor_index: usize,
}

impl ColorScale {
    fn from_ramp(seed: &NamedSeed, base: Oklch, ramp: &Ramp, reference: &Oklch) -> Self {
        let shades: [Shade; LEVEL_COUNT] = std::array::from_fn(|index| {
            let color = ramp.shades()[index];
            let comparison = compare(reference, &color);
            Shade {
                level: LEVELS[index],
                color,
                relative_luminance: comparison.relative_luminance,
                contrast_ratio: comparison.contrast_ratio,
            }
        });

        Self {
            seed: seed.clone(),
            base,
            anchor_level: ramp.anchor_level(),
            shades,
            anchor_index: ramp.anchor_index(),
        }
    }

    pub fn code(&self) -> ScaleCode {
        self.seed.code
    }

    pub fn name(&self) -> &str {
        &self.seed.name
    }

    pub fn shade(&self, level: Level) -> Option<&Shade> {
        level.index().map(|index| &self.shades[index])
    }

    /// The shade that was seeded directly.
    pub fn anchor(&self) -> &Shade {
        &self.shades[self.anchor_index]
    }

    pub fn hue(&self) -> f64 {
        self.shades[0].color.h
    }
}

/// Every scale of one seed, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    scales: Vec<ColorScale>,
    #[serde(skip)]
    background: usize,
}

impl Palette {
    pub fn scales(&self) -> &[ColorScale] {
        &self.scales
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorScale> + '_ {
        self.scales.iter()
    }

    pub fn get(&self, code: ScaleCode) -> Option<&ColorScale> {
        self.scales.iter().find(|scale| scale.code() == code)
    }

    /// The contrast reference of every other scale.
    pub fn background(&self) -> &ColorScale {
        &self.scales[self.background]
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

pub struct PaletteBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> PaletteBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Build every scale of the catalog around `seed_hex`.
    ///
    /// An invalid seed or a scale whose anchor level is not a ramp level fails
    /// the whole palette. Other per-scale problems are logged and the scale is
    /// left out.
    pub fn generate(&self, seed_hex: &str) -> Result<Palette, PaletteError> {
        let seed = hex_to_oklch(seed_hex)?;

        // Phase one: the background, which every other scale refers to.
        let background_seed = self.catalog.background();
        let background_ramp = build_ramp(background_seed, seed, None)?;
        let reference = background_ramp.anchor();
        let background_scale =
            ColorScale::from_ramp(background_seed, seed, &background_ramp, &reference);

        // Phase two: everything else in catalog order.
        let mut scales = Vec::with_capacity(self.catalog.order().len());
        let mut background = 0;
        for &code in self.catalog.order() {
            if code == background_seed.code {
                background = scales.len();
                scales.push(background_scale.clone());
                continue;
            }

            match self.build_scale(code, seed, &background_ramp, &reference) {
                Ok(scale) => {
                    debug!(target: "tonal::palette", code = %code, "built scale");
                    scales.push(scale);
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(target: "tonal::palette", code = %code, error = %err, "skipping scale");
                }
            }
        }

        debug!(
            target: "tonal::palette",
            seed = seed_hex,
            scales = scales.len(),
            "palette generated"
        );

        Ok(Palette { scales, background })
    }

    fn build_scale(
        &self,
        code: ScaleCode,
        seed: Oklch,
        background: &Ramp,
        reference: &Oklch,
    ) -> Result<ColorScale, PaletteError> {
        let named = self
            .catalog
            .seed(code)
            .ok_or(PaletteError::UnknownScaleCode { code })?;

        let base = if named.family.takes_seed() {
            seed
        } else {
            let hex = named
                .anchor_hex
                .as_deref()
                .ok_or(PaletteError::MissingAnchorHex { code })?;
            hex_to_oklch(hex).map_err(|source| PaletteError::InvalidAnchor { code, source })?
        };

        let ramp = build_ramp(named, base, Some(background))?;
        Ok(ColorScale::from_ramp(named, base, &ramp, reference))
    }
}

fn build_ramp(
    named: &NamedSeed,
    base: Oklch,
    background: Option<&Ramp>,
) -> Result<Ramp, PaletteError> {
    named
        .family
        .generate(base, background)
        .map_err(|source| PaletteError::Ramp {
            code: named.code,
            source,
        })
}

/// Build a palette with the standard catalog.
pub fn generate(seed_hex: &str) -> Result<Palette, PaletteError> {
    PaletteBuilder::new(&Catalog::standard()).generate(seed_hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::{BackgroundRamp, ChromaticRamp, ForegroundRamp, RampFamily};

    fn code(value: &str) -> ScaleCode {
        ScaleCode::new(value).expect("valid code")
    }

    fn seed(value: &str, anchor_hex: Option<&str>, family: RampFamily) -> NamedSeed {
        NamedSeed {
            code: code(value),
            name: value.to_uppercase(),
            anchor_hex: anchor_hex.map(str::to_string),
            family,
        }
    }

    fn base_seeds() -> Vec<NamedSeed> {
        vec![
            seed("bgc", None, RampFamily::Background(BackgroundRamp::default())),
            seed("fgc", None, RampFamily::Foreground(ForegroundRamp::default())),
        ]
    }

    #[test]
    fn background_anchor_is_the_seed() {
        let palette = generate("#222536").expect("palette");
        let background = palette.background();

        assert_eq!(background.code(), "bgc");
        assert_eq!(background.anchor().level, Level(600));
        assert_eq!(background.anchor().color, hex_to_oklch("#222536").expect("hex"));
        assert_eq!(background.anchor().contrast_ratio, 1.0);
    }

    #[test]
    fn dark_seed_gets_light_foreground() {
        let palette = generate("#222536").expect("palette");
        let foreground = palette.get(code("fgc")).expect("foreground scale");

        assert_eq!(foreground.anchor().level, Level(400));
        assert_eq!(foreground.anchor().color.l, 0.85);
        assert_eq!(foreground.hue().to_bits(), palette.background().hue().to_bits());
    }

    #[test]
    fn light_seed_gets_dark_foreground() {
        let palette = generate("#f4f1ea").expect("palette");
        let foreground = palette.get(code("fgc")).expect("foreground scale");

        assert_eq!(foreground.anchor().color.l, 0.25);
    }

    #[test]
    fn standard_palette_keeps_catalog_order() {
        let catalog = Catalog::standard();
        let palette = PaletteBuilder::new(&catalog)
            .generate("#1a6b4f")
            .expect("palette");

        let codes: Vec<ScaleCode> = palette.iter().map(ColorScale::code).collect();
        assert_eq!(codes, catalog.order());
        assert_eq!(palette.len(), 41);
    }

    #[test]
    fn fixed_scales_keep_their_anchor() {
        let palette = generate("#222536").expect("palette");
        let ruby = palette.get(code("rby")).expect("ruby");
        let expected = hex_to_oklch(ruby.seed.anchor_hex.as_deref().expect("anchor"))
            .expect("anchor parses");

        assert_eq!(ruby.anchor().color, expected);
        assert_eq!(ruby.base, expected);
    }

    #[test]
    fn invalid_seed_is_rejected() {
        for bad in ["222536", "#22253", "#22253g", ""] {
            assert!(
                matches!(generate(bad), Err(PaletteError::InvalidSeed(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_codes_and_bad_anchors_are_skipped() {
        let mut seeds = base_seeds();
        seeds.push(seed("rby", Some("#f9043a"), RampFamily::Chromatic(ChromaticRamp::default())));
        seeds.push(seed("bad", Some("f9043a"), RampFamily::Chromatic(ChromaticRamp::default())));
        seeds.push(seed("nah", None, RampFamily::Chromatic(ChromaticRamp::default())));
        let order = ["bgc", "fgc", "zzz", "bad", "nah", "rby"].map(code).to_vec();
        let catalog = Catalog::new(order, seeds).expect("catalog");

        let palette = PaletteBuilder::new(&catalog)
            .generate("#222536")
            .expect("palette");
        let codes: Vec<ScaleCode> = palette.iter().map(ColorScale::code).collect();

        assert_eq!(codes, ["bgc", "fgc", "rby"].map(code));
    }

    #[test]
    fn misplaced_anchor_level_fails_the_palette() {
        let mut seeds = base_seeds();
        let chromatic = ChromaticRamp {
            anchor_level: Level(650),
            ..ChromaticRamp::default()
        };
        seeds.push(seed("odd", Some("#f9043a"), RampFamily::Chromatic(chromatic)));
        let order = ["bgc", "fgc", "odd"].map(code).to_vec();
        let catalog = Catalog::new(order, seeds).expect("catalog");

        let result = PaletteBuilder::new(&catalog).generate("#222536");

        assert!(matches!(
            result,
            Err(PaletteError::Ramp {
                source: RampError::MissingAnchorLevel { level: Level(650) },
                ..
            })
        ));
    }

    #[test]
    fn background_is_built_even_when_listed_late() {
        let mut seeds = base_seeds();
        seeds.push(seed("rby", Some("#f9043a"), RampFamily::Chromatic(ChromaticRamp::default())));
        let order = ["fgc", "rby", "bgc"].map(code).to_vec();
        let catalog = Catalog::new(order, seeds).expect("catalog");

        let palette = PaletteBuilder::new(&catalog)
            .generate("#222536")
            .expect("palette");

        assert_eq!(palette.scales()[2].code(), "bgc");
        assert_eq!(palette.background().code(), "bgc");
        let foreground = palette.get(code("fgc")).expect("foreground");
        assert_eq!(foreground.anchor().color.l, 0.85);
    }

    #[test]
    fn shades_are_compared_with_the_background_anchor() {
        let palette = generate("#222536").expect("palette");
        let reference = palette.background().anchor().color;

        for scale in palette.iter() {
            for shade in &scale.shades {
                let expected = compare(&reference, &shade.color);
                assert_eq!(shade.contrast_ratio, expected.contrast_ratio);
                assert!(shade.contrast_ratio >= 1.0);
            }
        }
    }
}
