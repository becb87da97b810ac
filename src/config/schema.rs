//! Configuration schema types for `courtsprite.toml`
//!
//! Defines the structure and validation rules for sprite generation settings.

use crate::error::SpriteError;
use crate::palette::{Appearance, BodyColors, PaletteRegistry, Team};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where and how sheets are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory for sheets
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    /// Write a JSON sidecar next to every sheet
    #[serde(default)]
    pub metadata: bool,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("sprites")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_out_dir(), metadata: false }
    }
}

/// Which players get a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Teams to generate, in order
    #[serde(default = "default_teams")]
    pub teams: Vec<Team>,
    /// First jersey number
    #[serde(default = "default_first_number")]
    pub first_number: u32,
    /// Players per team
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_teams() -> Vec<Team> {
    Team::ALL.to_vec()
}

fn default_first_number() -> u32 {
    1
}

fn default_count() -> u32 {
    10
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { teams: default_teams(), first_number: default_first_number(), count: default_count() }
    }
}

/// Batch execution settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads; 0 uses the available parallelism
    #[serde(default)]
    pub jobs: usize,
}

/// Root configuration structure for `courtsprite.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub appearance: Appearance,
    /// Palette overrides and additions, name to CSS color
    #[serde(default)]
    pub palette: BTreeMap<String, String>,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "roster.count")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "courtsprite.toml: '{}' {}", self.field, self.message)
    }
}

impl SpriteConfig {
    /// Validate the configuration and return every problem found
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: String, message: String| {
            errors.push(ConfigValidationError { field, message });
        };

        if self.roster.count == 0 {
            push("roster.count".to_string(), "must be a positive integer".to_string());
        }
        if self.roster.first_number.checked_add(self.roster.count).is_none() {
            push("roster.first_number".to_string(), "jersey numbers overflow".to_string());
        }
        if self.roster.teams.is_empty() {
            push("roster.teams".to_string(), "must list at least one team".to_string());
        }
        for (i, team) in self.roster.teams.iter().enumerate() {
            if self.roster.teams[..i].contains(team) {
                push("roster.teams".to_string(), format!("lists '{}' more than once", team));
            }
        }

        // Appearance names are only checked once the overrides are known good,
        // since they may refer to colors the overrides add.
        match self.palette_registry() {
            Ok(palette) => {
                let appearance = &self.appearance;
                for (field, name) in [
                    ("appearance.skin", &appearance.skin),
                    ("appearance.hair", &appearance.hair),
                    ("appearance.shoe", &appearance.shoe),
                    ("appearance.eye", &appearance.eye),
                ] {
                    if palette.resolve(name).is_err() {
                        push(field.to_string(), format!("unknown color '{}'", name));
                    }
                }
            }
            Err(SpriteError::ReservedColor(name)) => {
                push(format!("palette.{}", name), "cannot be overridden".to_string());
            }
            Err(SpriteError::InvalidColor { name, source }) => {
                push(format!("palette.{}", name), format!("is not a valid color: {}", source));
            }
            Err(e) => push("palette".to_string(), e.to_string()),
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The built-in palette with this config's overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::InvalidColor` for an unparseable override and
    /// `SpriteError::ReservedColor` for an override of `transparent`.
    pub fn palette_registry(&self) -> Result<PaletteRegistry, SpriteError> {
        PaletteRegistry::builtin().with_overrides(&self.palette)
    }

    /// Resolve the configured appearance against `palette`.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::UnknownColor` for an unregistered name.
    pub fn body_colors(&self, palette: &PaletteRegistry) -> Result<BodyColors, SpriteError> {
        BodyColors::resolve(palette, &self.appearance)
    }

    /// Jersey numbers covered by the roster.
    pub fn numbers(&self) -> std::ops::Range<u32> {
        let first = self.roster.first_number;
        first..first.saturating_add(self.roster.count)
    }
}
