use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tonal::{Catalog, PaletteBuilder, ViewConfig, to_stylesheet, to_view_model};
use tracing::info;

pub const DEFAULT_STYLESHEET: &str = "static/css/colors.css";

#[derive(Debug, Parser, Clone)]
#[command(
    name = "tonal",
    author,
    version,
    about = "Generate perceptual OKLCH color palettes from a single seed color",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Tracing filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info", value_name = "FILTER")]
    pub log_level: String,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Write the palette as CSS custom properties
    Palette {
        /// Seed color as #RRGGBB
        #[arg(value_name = "HEX")]
        seed: String,

        /// Destination stylesheet
        #[arg(long, value_name = "OUTPUT_FILE", default_value = DEFAULT_STYLESHEET)]
        output: PathBuf,

        /// Catalog JSON to use instead of the built-in one
        #[arg(long, env = "TONAL_CATALOG", value_name = "CATALOG_FILE")]
        catalog: Option<PathBuf>,
    },
    /// Write the color-wheel view model as JSON
    View {
        /// Seed color as #RRGGBB
        #[arg(value_name = "HEX")]
        seed: String,

        /// Destination file; stdout when omitted
        #[arg(long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,

        /// Catalog JSON to use instead of the built-in one
        #[arg(long, env = "TONAL_CATALOG", value_name = "CATALOG_FILE")]
        catalog: Option<PathBuf>,

        /// Leave the background and foreground scales out
        #[arg(long)]
        skip_base: bool,
    },
    /// Log the version and a summary of the catalog
    Info {
        /// Catalog JSON to use instead of the built-in one
        #[arg(long, env = "TONAL_CATALOG", value_name = "CATALOG_FILE")]
        catalog: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Palette {
            seed,
            output,
            catalog,
        } => write_palette(&seed, &output, catalog.as_deref()),
        Command::View {
            seed,
            output,
            catalog,
            skip_base,
        } => write_view(&seed, output.as_deref(), catalog.as_deref(), skip_base),
        Command::Info { catalog } => log_info(catalog.as_deref()),
    }
}

fn write_palette(seed: &str, output: &Path, catalog: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let palette = PaletteBuilder::new(&catalog)
        .generate(seed)
        .with_context(|| format!("failed to generate palette for '{seed}'"))?;

    ensure_parent(output)?;
    fs::write(output, to_stylesheet(&palette))
        .with_context(|| format!("failed to write stylesheet to '{}'", output.display()))?;

    info!(
        target: "tonal::cli",
        seed,
        output = %output.display(),
        scales = palette.len(),
        "stylesheet written"
    );

    Ok(())
}

fn write_view(
    seed: &str,
    output: Option<&Path>,
    catalog: Option<&Path>,
    skip_base: bool,
) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let palette = PaletteBuilder::new(&catalog)
        .generate(seed)
        .with_context(|| format!("failed to generate palette for '{seed}'"))?;

    let config = ViewConfig {
        skip_base_scales: skip_base,
        ..ViewConfig::default()
    };
    let view = to_view_model(&palette, &config);
    let json = serde_json::to_string_pretty(&view)?;

    match output {
        Some(path) => {
            ensure_parent(path)?;
            fs::write(path, json)
                .with_context(|| format!("failed to write view model to '{}'", path.display()))?;
            info!(
                target: "tonal::cli",
                seed,
                output = %path.display(),
                scales = view.len(),
                "view model written"
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn log_info(catalog: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    info!(
        target: "tonal::cli",
        version = env!("CARGO_PKG_VERSION"),
        scales = catalog.order().len(),
        seeds = catalog.seeds().len(),
        background = %catalog.background().code,
        foreground = ?catalog.foreground().map(|seed| seed.code.to_string()),
        "catalog summary"
    );
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_path(path)
            .with_context(|| format!("failed to load catalog from '{}'", path.display())),
        None => Ok(Catalog::standard()),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create output parent directory '{}'",
                    parent.display()
                )
            })?;
        }
    }
    Ok(())
}
