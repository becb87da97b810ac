//! Palette registry: semantic color names to pixel values.
//!
//! The registry is built once (from the built-in table plus any config
//! overrides) and then shared read-only by every pose generator. Pose code
//! only ever sees resolved colors, so retuning a color here changes every
//! sheet without touching layout data.

use crate::color::parse_color;
use crate::error::{Result, SpriteError};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transparent sentinel, also the initial value of every canvas cell.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Name of the transparent sentinel entry.
pub const TRANSPARENT_NAME: &str = "transparent";

/// Built-in palette entries.
const BUILTIN: &[(&str, [u8; 4])] = &[
    // Skin
    ("skin_light", [255, 220, 177, 255]),
    ("skin_shadow", [227, 187, 143, 255]),
    ("skin_dark", [198, 153, 110, 255]),
    // Orange jersey (primary)
    ("orange_main", [255, 107, 53, 255]),
    ("orange_light", [255, 140, 90, 255]),
    ("orange_dark", [220, 80, 30, 255]),
    ("orange_shadow", [180, 60, 20, 255]),
    // Blue jersey (secondary)
    ("blue_main", [59, 130, 246, 255]),
    ("blue_light", [96, 165, 250, 255]),
    ("blue_dark", [37, 99, 235, 255]),
    ("blue_shadow", [29, 78, 216, 255]),
    // Hair
    ("hair_black", [40, 40, 40, 255]),
    ("hair_brown", [101, 67, 33, 255]),
    ("hair_blonde", [255, 220, 100, 255]),
    // Shoes
    ("shoe_white", [255, 255, 255, 255]),
    ("shoe_black", [40, 40, 40, 255]),
    ("shoe_shadow", [100, 100, 100, 255]),
    // Other
    ("white", [255, 255, 255, 255]),
    ("black", [0, 0, 0, 255]),
    (TRANSPARENT_NAME, [0, 0, 0, 0]),
];

/// Team identity selecting a jersey palette.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Primary (home) team
    #[serde(alias = "primary")]
    #[value(alias = "primary")]
    Orange,
    /// Secondary (away) team
    #[serde(alias = "secondary")]
    #[value(alias = "secondary")]
    Blue,
}

impl Team {
    /// Both teams, primary first.
    pub const ALL: [Team; 2] = [Team::Orange, Team::Blue];

    /// The home team.
    pub const PRIMARY: Team = Team::Orange;

    /// The away team.
    pub const SECONDARY: Team = Team::Blue;

    /// Lowercase name, used as palette prefix and in file names.
    pub fn name(self) -> &'static str {
        match self {
            Team::Orange => "orange",
            Team::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The four shades of one team's uniform.
///
/// Only [`PaletteRegistry::jersey`] builds these, so all four members always
/// come from the same team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JerseySet {
    team: Team,
    main: Rgba<u8>,
    light: Rgba<u8>,
    dark: Rgba<u8>,
    shadow: Rgba<u8>,
}

impl JerseySet {
    pub fn team(&self) -> Team {
        self.team
    }

    /// Torso fill
    pub fn main(&self) -> Rgba<u8> {
        self.main
    }

    /// Torso highlight strip
    pub fn light(&self) -> Rgba<u8> {
        self.light
    }

    /// Torso shadow strip and shorts
    pub fn dark(&self) -> Rgba<u8> {
        self.dark
    }

    pub fn shadow(&self) -> Rgba<u8> {
        self.shadow
    }
}

/// Semantic names of the non-jersey colors a player is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(default = "default_skin")]
    pub skin: String,
    #[serde(default = "default_hair")]
    pub hair: String,
    #[serde(default = "default_shoe")]
    pub shoe: String,
    #[serde(default = "default_eye")]
    pub eye: String,
}

fn default_skin() -> String {
    "skin_light".to_string()
}

fn default_hair() -> String {
    "hair_black".to_string()
}

fn default_shoe() -> String {
    "shoe_white".to_string()
}

fn default_eye() -> String {
    "black".to_string()
}

impl Default for Appearance {
    fn default() -> Self {
        Self { skin: default_skin(), hair: default_hair(), shoe: default_shoe(), eye: default_eye() }
    }
}

/// Resolved non-jersey colors handed to the pose generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyColors {
    pub skin: Rgba<u8>,
    pub hair: Rgba<u8>,
    pub shoe: Rgba<u8>,
    pub eye: Rgba<u8>,
}

impl BodyColors {
    /// Resolve an appearance against a registry.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::UnknownColor` for the first name not registered.
    pub fn resolve(palette: &PaletteRegistry, appearance: &Appearance) -> Result<Self> {
        Ok(Self {
            skin: palette.resolve(&appearance.skin)?,
            hair: palette.resolve(&appearance.hair)?,
            shoe: palette.resolve(&appearance.shoe)?,
            eye: palette.resolve(&appearance.eye)?,
        })
    }
}

/// Immutable lookup table from color names to RGBA values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRegistry {
    colors: BTreeMap<String, Rgba<u8>>,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PaletteRegistry {
    /// Registry holding only the built-in colors.
    pub fn builtin() -> Self {
        let colors = BUILTIN.iter().map(|(name, rgba)| (name.to_string(), Rgba(*rgba))).collect();
        Self { colors }
    }

    /// Copy of this registry with entries replaced or added.
    ///
    /// Values use the config color syntax (see [`parse_color`]).
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::InvalidColor` if a value does not parse, and
    /// `SpriteError::ReservedColor` if an override targets the transparent
    /// sentinel.
    pub fn with_overrides<'a, I>(&self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut colors = self.colors.clone();
        for (name, value) in overrides {
            if name == TRANSPARENT_NAME {
                return Err(SpriteError::ReservedColor(name.clone()));
            }
            let rgba = parse_color(value)
                .map_err(|source| SpriteError::InvalidColor { name: name.clone(), source })?;
            colors.insert(name.clone(), rgba);
        }
        Ok(Self { colors })
    }

    /// Look up a color by name.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::UnknownColor` if the name is not registered.
    pub fn resolve(&self, name: &str) -> Result<Rgba<u8>> {
        self.colors.get(name).copied().ok_or_else(|| SpriteError::UnknownColor(name.to_string()))
    }

    /// Resolve the four jersey shades for a team.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::UnknownColor` if any shade is missing.
    pub fn jersey(&self, team: Team) -> Result<JerseySet> {
        let shade = |suffix: &str| self.resolve(&format!("{}_{}", team.name(), suffix));
        Ok(JerseySet {
            team,
            main: shade("main")?,
            light: shade("light")?,
            dark: shade("dark")?,
            shadow: shade("shadow")?,
        })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Registered entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgba<u8>)> {
        self.colors.iter().map(|(name, rgba)| (name.as_str(), *rgba))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn without(&self, name: &str) -> Self {
        let mut colors = self.colors.clone();
        colors.remove(name);
        Self { colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorError;

    #[test]
    fn test_builtin_has_required_groups() {
        let palette = PaletteRegistry::builtin();
        for name in [
            "skin_light",
            "skin_shadow",
            "skin_dark",
            "hair_black",
            "hair_brown",
            "hair_blonde",
            "shoe_white",
            "shoe_black",
            "black",
            "white",
            "transparent",
        ] {
            assert!(palette.resolve(name).is_ok(), "missing {}", name);
        }
        assert_eq!(palette.len(), 20);
    }

    #[test]
    fn test_resolve_values() {
        let palette = PaletteRegistry::builtin();
        assert_eq!(palette.resolve("orange_main"), Ok(Rgba([255, 107, 53, 255])));
        assert_eq!(palette.resolve("black"), Ok(Rgba([0, 0, 0, 255])));
        assert_eq!(palette.resolve("transparent"), Ok(TRANSPARENT));
    }

    #[test]
    fn test_resolve_unknown() {
        let palette = PaletteRegistry::builtin();
        assert_eq!(
            palette.resolve("purple_main"),
            Err(SpriteError::UnknownColor("purple_main".to_string()))
        );
    }

    #[test]
    fn test_jersey_uses_one_team() {
        let palette = PaletteRegistry::builtin();
        let blue = palette.jersey(Team::Blue).unwrap();
        assert_eq!(blue.team(), Team::Blue);
        assert_eq!(blue.main(), Rgba([59, 130, 246, 255]));
        assert_eq!(blue.light(), Rgba([96, 165, 250, 255]));
        assert_eq!(blue.dark(), Rgba([37, 99, 235, 255]));
        assert_eq!(blue.shadow(), Rgba([29, 78, 216, 255]));

        let orange = palette.jersey(Team::PRIMARY).unwrap();
        assert_eq!(orange.main(), Rgba([255, 107, 53, 255]));
        assert_ne!(orange, blue);
    }

    #[test]
    fn test_overrides_replace_and_add() {
        let overrides = BTreeMap::from([
            ("orange_main".to_string(), "#000080".to_string()),
            ("hair_red".to_string(), "rgb(200, 30, 30)".to_string()),
        ]);
        let base = PaletteRegistry::builtin();
        let palette = base.with_overrides(&overrides).unwrap();

        assert_eq!(palette.resolve("orange_main"), Ok(Rgba([0, 0, 128, 255])));
        assert_eq!(palette.resolve("hair_red"), Ok(Rgba([200, 30, 30, 255])));
        // The base registry is untouched
        assert_eq!(base.resolve("orange_main"), Ok(Rgba([255, 107, 53, 255])));
    }

    #[test]
    fn test_overrides_reject_bad_values() {
        let bad = BTreeMap::from([("white".to_string(), "#12".to_string())]);
        let err = PaletteRegistry::builtin().with_overrides(&bad).unwrap_err();
        assert_eq!(
            err,
            SpriteError::InvalidColor { name: "white".to_string(), source: ColorError::InvalidLength(2) }
        );

        let sentinel = BTreeMap::from([("transparent".to_string(), "#FFF".to_string())]);
        let err = PaletteRegistry::builtin().with_overrides(&sentinel).unwrap_err();
        assert_eq!(err, SpriteError::ReservedColor("transparent".to_string()));
        assert_eq!(err.to_string(), "color 'transparent' is reserved and cannot be overridden");
    }

    #[test]
    fn test_body_colors_default_appearance() {
        let palette = PaletteRegistry::builtin();
        let body = BodyColors::resolve(&palette, &Appearance::default()).unwrap();
        assert_eq!(body.skin, Rgba([255, 220, 177, 255]));
        assert_eq!(body.hair, Rgba([40, 40, 40, 255]));
        assert_eq!(body.shoe, Rgba([255, 255, 255, 255]));
        assert_eq!(body.eye, Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_body_colors_unknown_name() {
        let appearance = Appearance { hair: "hair_green".to_string(), ..Appearance::default() };
        let err = BodyColors::resolve(&PaletteRegistry::builtin(), &appearance).unwrap_err();
        assert_eq!(err, SpriteError::UnknownColor("hair_green".to_string()));
    }

    #[test]
    fn test_team_names_and_aliases() {
        assert_eq!(Team::PRIMARY.to_string(), "orange");
        assert_eq!(Team::SECONDARY.to_string(), "blue");
        let team: Team = serde_json::from_str("\"secondary\"").unwrap();
        assert_eq!(team, Team::Blue);
    }
}
