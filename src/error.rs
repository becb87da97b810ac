//! Error types for sprite synthesis
//!
//! Every variant here indicates a defect in configuration or layout data,
//! never a transient condition. Nothing is retried.

use crate::color::ColorError;
use thiserror::Error;

/// Errors raised while resolving colors or painting frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteError {
    /// A semantic color name was not registered in the palette
    #[error("unknown color '{0}'")]
    UnknownColor(String),
    /// A pixel write fell outside the frame canvas
    #[error("pixel ({x}, {y}) is outside the {width}x{height} frame")]
    OutOfBounds {
        /// Column of the offending write
        x: u32,
        /// Row of the offending write
        y: u32,
        /// Canvas width
        width: u32,
        /// Canvas height
        height: u32,
    },
    /// Frame index outside the walk cycle
    #[error("invalid frame index {index}, expected 0..{frames}")]
    InvalidFrame {
        /// The rejected index
        index: u32,
        /// Number of frames per direction
        frames: u32,
    },
    /// A palette override targets a name that cannot be redefined
    #[error("color '{0}' is reserved and cannot be overridden")]
    ReservedColor(String),
    /// A palette override could not be parsed
    #[error("invalid color for '{name}': {source}")]
    InvalidColor {
        /// Palette entry name
        name: String,
        /// Underlying parse failure
        source: ColorError,
    },
}

/// Convenience alias used across the synthesis modules
pub type Result<T> = std::result::Result<T, SpriteError>;
