//! Stylesheet output.
//!
//! Consumers layer overrides on these variable names, so the scale order (the
//! catalog order) and the level order must never change between runs.

use std::fmt::{self, Write};

use crate::color::oklch_to_css;
use crate::palette::{ColorScale, Palette};

const INDENT: &str = "  ";

/// Render the `:root` custom properties followed by the `@theme` block.
pub fn to_stylesheet(palette: &Palette) -> String {
    let mut css = String::new();
    write_stylesheet(palette, &mut css).expect("writing to a String cannot fail");
    css
}

pub fn write_stylesheet<W: Write>(palette: &Palette, out: &mut W) -> fmt::Result {
    writeln!(out, ":root {{")?;
    for (position, scale) in palette.iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{INDENT}/* {} */", scale.name())?;
        write_properties(scale, "", out)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "@theme {{")?;
    for (position, scale) in palette.iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        write_properties(scale, "color-", out)?;
    }
    writeln!(out, "}}")
}

fn write_properties<W: Write>(scale: &ColorScale, prefix: &str, out: &mut W) -> fmt::Result {
    for shade in &scale.shades {
        writeln!(
            out,
            "{INDENT}--{prefix}{}-{}: {};",
            scale.code(),
            shade.level,
            oklch_to_css(&shade.color)
        )?;
    }
    Ok(())
}
