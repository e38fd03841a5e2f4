//! Perceptual color-ramp palettes in OKLCH.
//!
//! One seed color becomes a background scale, a readable foreground scale and
//! a catalog of accent and neutral scales, each with eleven shades from 50 to
//! 950. The result can be written as CSS custom properties or projected into a
//! view model for color-wheel UIs.

pub mod catalog;
pub mod color;
pub mod css;
pub mod level;
pub mod metrics;
pub mod palette;
pub mod ramp;
pub mod view;

pub use catalog::{Catalog, CatalogError, NamedSeed, ScaleCode};
pub use color::{hex_to_oklch, oklch_to_css, oklch_to_hex, ColorError, Oklch};
pub use css::to_stylesheet;
pub use level::{Level, LEVELS, LEVEL_COUNT};
pub use metrics::{contrast_ratio, relative_luminance};
pub use palette::{generate, ColorScale, Palette, PaletteBuilder, PaletteError, Shade};
pub use ramp::{Ramp, RampError, RampFamily};
pub use view::{to_view_model, ScaleView, ViewConfig, WheelGeometry};
