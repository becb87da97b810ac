//! Single sheet and single frame commands

use std::path::Path;
use std::process::ExitCode;

use crate::error::SpriteError;
use crate::output::{metadata_path, player_stem, resolve_output_path, save_metadata, save_png};
use crate::palette::Team;
use crate::pose::{generate_frame, Direction};
use crate::spritesheet::compose;

use super::{load_project_config, resolve_colors, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the sheet command
pub fn run_sheet(
    config_path: Option<&Path>,
    team: Team,
    number: u32,
    output: Option<&Path>,
    metadata: bool,
) -> ExitCode {
    let config = match load_project_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let (palette, body) = match resolve_colors(&config) {
        Ok(colors) => colors,
        Err(code) => return code,
    };

    let sheet = match palette.jersey(team).and_then(|jersey| compose(&jersey, &body)) {
        Ok(sheet) => sheet,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let png_path = resolve_output_path(output, &format!("{}.png", player_stem(team, number)));
    let json_path = (metadata || config.output.metadata).then(|| metadata_path(&png_path));

    if let Err(e) = save_png(sheet.image(), &png_path) {
        eprintln!("Error: Failed to save '{}': {}", png_path.display(), e);
        remove_partial(&[png_path.as_path()]);
        return ExitCode::from(EXIT_ERROR);
    }

    if let Some(ref json_path) = json_path {
        let image_name = png_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Err(e) = save_metadata(&sheet.metadata(&image_name), json_path) {
            eprintln!("Error: Failed to save '{}': {}", json_path.display(), e);
            remove_partial(&[png_path.as_path(), json_path.as_path()]);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    println!("Saved: {}", png_path.display());
    if let Some(json_path) = json_path {
        println!("Saved: {}", json_path.display());
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the frame command
pub fn run_frame(
    config_path: Option<&Path>,
    direction: Direction,
    frame: u32,
    team: Team,
    output: &Path,
) -> ExitCode {
    let config = match load_project_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let (palette, body) = match resolve_colors(&config) {
        Ok(colors) => colors,
        Err(code) => return code,
    };

    let canvas =
        match palette.jersey(team).and_then(|jersey| generate_frame(direction, frame, &jersey, &body))
        {
            Ok(canvas) => canvas,
            Err(e @ SpriteError::InvalidFrame { .. }) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

    if let Err(e) = save_png(&canvas.into_image(), output) {
        eprintln!("Error: Failed to save '{}': {}", output.display(), e);
        remove_partial(&[output]);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}

/// Delete files left behind by a failed write. Only regular files are removed.
fn remove_partial(paths: &[&Path]) {
    for path in paths {
        if path.is_file() {
            let _ = std::fs::remove_file(path);
        }
    }
}
