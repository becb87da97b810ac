//! PNG output and file path generation

use crate::palette::Team;
use crate::spritesheet::SheetMetadata;
use image::RgbaImage;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Metadata serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
///
/// # Errors
///
/// Returns `OutputError` if the directory cannot be created or encoding fails.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Write sheet metadata as pretty-printed JSON.
///
/// # Errors
///
/// Returns `OutputError` on IO or serialization failure.
pub fn save_metadata(metadata: &SheetMetadata, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, metadata)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// File stem for a player's sheet: `player_<team>_<number>`.
///
/// ```
/// use courtsprite::output::player_stem;
/// use courtsprite::palette::Team;
///
/// assert_eq!(player_stem(Team::Orange, 7), "player_orange_7");
/// ```
pub fn player_stem(team: Team, number: u32) -> String {
    format!("player_{}_{}", team, number)
}

/// Paths of the PNG sheet and its JSON sidecar inside `out_dir`.
pub fn sheet_paths(out_dir: &Path, team: Team, number: u32) -> (PathBuf, PathBuf) {
    let stem = player_stem(team, number);
    (out_dir.join(format!("{}.png", stem)), out_dir.join(format!("{}.json", stem)))
}

/// Resolve the `-o` argument of single-sheet commands.
///
/// | `-o` | Output |
/// |------|--------|
/// | omitted | `player_<team>_<number>.png` |
/// | `dir/` or an existing directory | `dir/player_<team>_<number>.png` |
/// | `file.png` | `file.png` |
pub fn resolve_output_path(output_arg: Option<&Path>, default_name: &str) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(default_name)
            } else {
                output.to_path_buf()
            }
        }
        None => PathBuf::from(default_name),
    }
}

/// The JSON sidecar path next to a PNG path.
pub fn metadata_path(png_path: &Path) -> PathBuf {
    png_path.with_extension("json")
}

fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
