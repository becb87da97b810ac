//! courtsprite - Procedural pixel-art spritesheets for basketball players
//!
//! This library provides functionality to:
//! - Resolve semantic color names through a palette registry
//! - Paint 16x16 walk-cycle frames for four facing directions
//! - Compose the frames into a 48x64 sheet and write it as PNG
//! - Generate a whole roster of sheets in parallel
//!
//! # Example
//!
//! ```
//! use courtsprite::palette::{Appearance, BodyColors, PaletteRegistry, Team};
//! use courtsprite::spritesheet::compose;
//!
//! let palette = PaletteRegistry::builtin();
//! let body = BodyColors::resolve(&palette, &Appearance::default()).unwrap();
//! let jersey = palette.jersey(Team::Orange).unwrap();
//!
//! let sheet = compose(&jersey, &body).unwrap();
//! assert_eq!((sheet.width(), sheet.height()), (48, 64));
//! ```

pub mod batch;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod output;
pub mod palette;
pub mod pose;
pub mod spritesheet;

pub use error::{Result, SpriteError};
