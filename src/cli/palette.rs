//! Palette inspection commands

use clap::Subcommand;
use std::path::Path;
use std::process::ExitCode;

use crate::color::to_hex;

use super::{load_project_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum PaletteAction {
    /// List every registered color
    List,
    /// Show the value of one color
    Show {
        /// Color name, e.g. orange_main
        name: String,
    },
}

/// Execute the palette command
pub fn run_palette(config_path: Option<&Path>, action: PaletteAction) -> ExitCode {
    let config = match load_project_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let palette = match config.palette_registry() {
        Ok(palette) => palette,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match action {
        PaletteAction::List => {
            let width = palette.names().map(str::len).max().unwrap_or(0);
            for (name, rgba) in palette.iter() {
                println!("  {:width$}  {}", name, to_hex(rgba), width = width);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PaletteAction::Show { name } => match palette.resolve(&name) {
            Ok(rgba) => {
                let [r, g, b, a] = rgba.0;
                println!("{} => {} (rgba {}, {}, {}, {})", name, to_hex(rgba), r, g, b, a);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        },
    }
}
