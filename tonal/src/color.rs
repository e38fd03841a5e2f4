//! Conversions between `#RRGGBB` hex strings, gamma-encoded sRGB and OKLCH.
//!
//! All ramp math happens in OKLCH. Hex is only used at the edges: parsing the
//! seed and catalog anchors, and printing shades for display.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color format: expected #RRGGBB, got {input:?}")]
    InvalidHexFormat { input: String },
}

/// A color in OKLCH. `h` is in radians and is never touched once a scale has
/// been seeded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Builds a color keeping `h` verbatim while clamping lightness into
    /// `[0, 1]` and chroma to be non-negative.
    pub fn clamped(l: f64, c: f64, h: f64) -> Self {
        Self {
            l: clamp_lightness(l),
            c: clamp_chroma(c),
            h,
        }
    }

    pub fn hue_degrees(&self) -> f64 {
        hue_degrees(self.h)
    }

    pub fn to_css(&self) -> String {
        oklch_to_css(self)
    }

    pub fn to_hex(&self) -> String {
        oklch_to_hex(self)
    }
}

impl FromStr for Oklch {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_oklch(s)
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&oklch_to_css(self))
    }
}

pub fn clamp_lightness(l: f64) -> f64 {
    l.clamp(0.0, 1.0)
}

// Also folds NaN and negative zero to 0.
pub fn clamp_chroma(c: f64) -> f64 {
    if c > 0.0 {
        c
    } else {
        0.0
    }
}

/// Parse a `#RRGGBB` string into OKLCH.
pub fn hex_to_oklch(hex: &str) -> Result<Oklch, ColorError> {
    let [r, g, b] = parse_hex(hex)?;
    let lab = linear_to_oklab([decode_srgb(r), decode_srgb(g), decode_srgb(b)]);
    Ok(oklab_to_oklch(lab))
}

/// Format as `oklch(L C H)` with the hue in zero-padded degrees so tabular
/// output lines up.
pub fn oklch_to_css(color: &Oklch) -> String {
    format!(
        "oklch({:.2} {:.3} {:06.2})",
        color.l,
        color.c,
        hue_degrees(color.h)
    )
}

/// Format as lowercase `#rrggbb`. Out-of-gamut channels are clamped, no gamut
/// mapping is attempted.
pub fn oklch_to_hex(color: &Oklch) -> String {
    let [r, g, b] = oklch_to_srgb(color).map(quantize);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Gamma-encoded sRGB channels in `[0, 1]`, clamped per channel.
pub fn oklch_to_srgb(color: &Oklch) -> [f64; 3] {
    let linear = oklab_to_linear(oklch_to_oklab(color));
    linear.map(|channel| encode_srgb(channel).clamp(0.0, 1.0))
}

/// Radians to degrees in `[0, 360)`.
pub fn hue_degrees(h: f64) -> f64 {
    let degrees = h * 180.0 / PI;
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    if degrees == 0.0 {
        0.0
    } else {
        degrees
    }
}

fn parse_hex(hex: &str) -> Result<[u8; 3], ColorError> {
    let invalid = || ColorError::InvalidHexFormat {
        input: hex.to_string(),
    };

    let bytes = hex.as_bytes();
    if bytes.len() != 7 || bytes[0] != b'#' {
        return Err(invalid());
    }
    if !bytes[1..].iter().all(u8::is_ascii_hexdigit) {
        return Err(invalid());
    }

    let channel =
        |start: usize| u8::from_str_radix(&hex[start..start + 2], 16).map_err(|_| invalid());
    Ok([channel(1)?, channel(3)?, channel(5)?])
}

fn quantize(channel: f64) -> u8 {
    (channel * 255.0).round() as u8
}

// decode sRGB -> linear light (D65, IEC 61966-2-1)
pub(crate) fn linearize(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn decode_srgb(channel: u8) -> f64 {
    linearize(f64::from(channel) / 255.0)
}

// encode linear light -> sRGB (D65, IEC 61966-2-1)
fn encode_srgb(l: f64) -> f64 {
    if l <= 0.003_130_8 {
        12.92 * l
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

// source: https://bottosson.github.io/posts/oklab/
fn linear_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
    let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
    let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

    [
        0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
        1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
        0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
    ]
}

fn oklab_to_linear([lightness, a, b]: [f64; 3]) -> [f64; 3] {
    let l_ = lightness + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = lightness - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = lightness - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    [
        4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
        -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
        -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
    ]
}

fn oklab_to_oklch([l, a, b]: [f64; 3]) -> Oklch {
    Oklch {
        l,
        c: a.hypot(b),
        h: b.atan2(a),
    }
}

fn oklch_to_oklab(color: &Oklch) -> [f64; 3] {
    let (sin, cos) = color.h.sin_cos();
    [color.l, color.c * cos, color.c * sin]
}
