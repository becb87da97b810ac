//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod palette;
mod sheet;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, validated, SpriteConfig};
use crate::palette::{BodyColors, PaletteRegistry, Team};
use crate::pose::Direction;

pub use palette::PaletteAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// courtsprite - Draw 16x16 walk-cycle spritesheets for basketball players
#[derive(Parser)]
#[command(name = "courtsprite")]
#[command(about = "Draw 16x16 walk-cycle spritesheets for basketball players")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to courtsprite.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate sheets for every player on the roster
    Generate {
        /// Output directory (default: [output].dir, "sprites")
        #[arg(long)]
        out: Option<PathBuf>,

        /// Players per team
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        count: Option<u32>,

        /// Only generate this team (repeatable)
        #[arg(long = "team", value_enum)]
        teams: Vec<Team>,

        /// Number of parallel jobs (0 = available parallelism)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Write a JSON sidecar next to every sheet
        #[arg(long)]
        metadata: bool,

        /// Report progress as JSON lines
        #[arg(long, conflicts_with = "quiet")]
        json: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the sheet for a single player
    Sheet {
        /// Team jersey
        #[arg(long, value_enum)]
        team: Team,

        /// Jersey number (used in the default file name)
        #[arg(long)]
        number: u32,

        /// Output file or directory.
        /// If omitted: player_<team>_<number>.png
        /// If directory (ends with /): dir/player_<team>_<number>.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the JSON sidecar
        #[arg(long)]
        metadata: bool,
    },

    /// Write a single 16x16 frame
    Frame {
        /// Facing direction
        #[arg(long, value_enum)]
        direction: Direction,

        /// Walk phase (0, 1 or 2)
        #[arg(long)]
        frame: u32,

        /// Team jersey
        #[arg(long, value_enum, default_value = "orange")]
        team: Team,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Inspect the color registry
    Palette {
        #[command(subcommand)]
        action: PaletteAction,
    },
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Generate { out, count, teams, jobs, metadata, json, quiet } => {
            generate::run_generate(
                config_path,
                generate::GenerateArgs { out, count, teams, jobs, metadata, json, quiet },
            )
        }
        Commands::Sheet { team, number, output, metadata } => {
            sheet::run_sheet(config_path, team, number, output.as_deref(), metadata)
        }
        Commands::Frame { direction, frame, team, output } => {
            sheet::run_frame(config_path, direction, frame, team, &output)
        }
        Commands::Palette { action } => palette::run_palette(config_path, action),
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Load and validate the project config, printing problems to stderr.
pub(crate) fn load_project_config(path: Option<&Path>) -> Result<SpriteConfig, ExitCode> {
    load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Re-validate after CLI overrides were merged.
pub(crate) fn revalidate(config: SpriteConfig) -> Result<SpriteConfig, ExitCode> {
    validated(config).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Build the registry and body colors a config describes.
pub(crate) fn resolve_colors(
    config: &SpriteConfig,
) -> Result<(PaletteRegistry, BodyColors), ExitCode> {
    let palette = config.palette_registry().map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    let body = config.body_colors(&palette).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    Ok((palette, body))
}
