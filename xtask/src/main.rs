use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use duct::cmd;
use tonal::{Catalog, PaletteBuilder, to_stylesheet};

type AnyResult<T> = Result<T, Box<dyn Error>>;

const REFERENCE_SEED: &str = "#222536";
const REFERENCE_STYLESHEET: &str = "static/css/colors.css";
const CATALOG_EXPORT: &str = "static/catalog.json";

fn cli() -> Command {
    Command::new("tonal-task")
        .about("Maintenance tasks for the tonal workspace")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Check formatting, run clippy and the workspace tests")
                .arg(
                    Arg::new("fix")
                        .long("fix")
                        .action(ArgAction::SetTrue)
                        .help("Reformat instead of only checking"),
                ),
        )
        .subcommand(
            Command::new("stylesheet")
                .about("Regenerate the reference stylesheet")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value(REFERENCE_SEED)
                        .help("Seed color as #RRGGBB"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value(REFERENCE_STYLESHEET)
                        .help("Path relative to the workspace root"),
                )
                .arg(
                    Arg::new("verify")
                        .long("verify")
                        .action(ArgAction::SetTrue)
                        .help("Fail if the file on disk differs instead of rewriting it"),
                ),
        )
        .subcommand(
            Command::new("catalog")
                .about("Export the standard catalog as JSON and check it loads back")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value(CATALOG_EXPORT)
                        .help("Path relative to the workspace root"),
                ),
        )
        .subcommand(Command::new("bench").about("Compile the criterion benches"))
}

fn main() {
    if let Err(error) = run(&cli().get_matches()) {
        eprintln!("xtask error: {error}");
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> AnyResult<()> {
    let root = workspace_root();
    match matches.subcommand() {
        Some(("check", args)) => check(&root, args.get_flag("fix")),
        Some(("stylesheet", args)) => stylesheet(
            &root,
            required(args, "seed")?,
            &root.join(required(args, "out")?),
            args.get_flag("verify"),
        ),
        Some(("catalog", args)) => export_catalog(&root.join(required(args, "out")?)),
        Some(("bench", _)) => cargo(&root, &["bench", "-p", "tonal", "--no-run"]),
        _ => unreachable!(),
    }
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> AnyResult<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing --{name}").into())
}

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Runs every step and reports all failures together.
fn check(root: &Path, fix: bool) -> AnyResult<()> {
    let fmt: &[&str] = if fix {
        &["fmt", "--all"]
    } else {
        &["fmt", "--all", "--check"]
    };
    let steps: [(&str, &[&str]); 3] = [
        ("rustfmt", fmt),
        (
            "clippy",
            &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        ),
        ("tests", &["test", "--workspace"]),
    ];

    let failed: Vec<String> = steps
        .iter()
        .filter_map(|(label, args)| {
            cargo(root, args)
                .err()
                .map(|error| format!("{label}: {error}"))
        })
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("check failed:\n{}", failed.join("\n")).into())
    }
}

fn stylesheet(root: &Path, seed: &str, out: &Path, verify: bool) -> AnyResult<()> {
    let palette = PaletteBuilder::new(&Catalog::standard()).generate(seed)?;
    let css = to_stylesheet(&palette);
    let display = out.strip_prefix(root).unwrap_or(out).display();

    if verify {
        let current = fs::read_to_string(out)
            .map_err(|error| format!("cannot read {display}: {error}"))?;
        if current != css {
            return Err(format!("{display} is stale for seed {seed}; rerun without --verify").into());
        }
        println!("{display} is up to date");
        return Ok(());
    }

    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, css)?;
    println!("wrote {display} ({} scales, seed {seed})", palette.len());
    Ok(())
}

fn export_catalog(out: &Path) -> AnyResult<()> {
    let catalog = Catalog::standard();
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, catalog.to_json_pretty()?)?;

    let reloaded = Catalog::load_from_path(out)?;
    if reloaded != catalog {
        return Err(format!("{} does not load back as the standard catalog", out.display()).into());
    }
    println!(
        "wrote {} ({} scales, {} seeds)",
        out.display(),
        catalog.order().len(),
        catalog.seeds().len()
    );
    Ok(())
}

fn cargo(root: &Path, args: &[&str]) -> AnyResult<()> {
    println!("> cargo {}", args.join(" "));
    cmd("cargo", args).dir(root).run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn stylesheet_defaults_to_reference_seed() {
        let matches = cli()
            .try_get_matches_from(["tonal-task", "stylesheet"])
            .expect("parse");
        let (_, args) = matches.subcommand().expect("subcommand");
        assert_eq!(required(args, "seed").expect("seed"), REFERENCE_SEED);
        assert_eq!(required(args, "out").expect("out"), REFERENCE_STYLESHEET);
        assert!(!args.get_flag("verify"));
    }
}
