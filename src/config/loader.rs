//! Configuration loading and discovery for `courtsprite.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SpriteConfig;
use crate::palette::Team;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "courtsprite.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse courtsprite.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override players per team
    pub count: Option<u32>,
    /// Restrict generation to these teams
    pub teams: Option<Vec<Team>>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Force JSON sidecars on
    pub metadata: Option<bool>,
}

/// Find courtsprite.toml by walking up from the current working directory,
/// falling back to the XDG config directory.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Checks `$XDG_CONFIG_HOME/courtsprite/courtsprite.toml` or
/// `~/.config/courtsprite/courtsprite.toml`.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("courtsprite").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find courtsprite.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from `path`, or from the discovered file, or defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> Result<SpriteConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(SpriteConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<SpriteConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpriteConfig = toml::from_str(&contents)?;
    validated(config)
}

/// Validate a configuration, turning problems into `ConfigError::Validation`.
///
/// # Errors
///
/// Returns every validation problem at once.
pub fn validated(config: SpriteConfig) -> Result<SpriteConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut SpriteConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.output.dir = out.clone();
    }
    if let Some(count) = overrides.count {
        config.roster.count = count;
    }
    if let Some(ref teams) = overrides.teams {
        if !teams.is_empty() {
            config.roster.teams = teams.clone();
        }
    }
    if let Some(jobs) = overrides.jobs {
        config.batch.jobs = jobs;
    }
    if let Some(metadata) = overrides.metadata {
        config.output.metadata = metadata;
    }
}
