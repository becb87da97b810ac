//! Directional pose generators.
//!
//! Each facing direction has a layout table describing where the hair, face,
//! torso, arms and legs go for every walk phase. A frame is painted by
//! running the layers of that table in a fixed order:
//!
//! 1. hair
//! 2. face and eye marks
//! 3. torso, then its highlight and shadow strips
//! 4. arms
//! 5. legs, then shoes on the lowest row of each leg
//!
//! Later layers overwrite earlier ones where they overlap.

mod back;
mod front;
mod side;

use crate::canvas::{FrameCanvas, Rect};
use crate::error::{Result, SpriteError};
use crate::palette::{BodyColors, JerseySet};
use serde::{Deserialize, Serialize};

/// Number of walk-cycle frames drawn for each direction.
pub const FRAMES_PER_DIRECTION: u32 = 3;

/// Facing direction. The declaration order is the sheet row order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    /// All directions in sheet row order.
    pub const ALL: [Direction; 4] = [Direction::Down, Direction::Left, Direction::Right, Direction::Up];

    /// Row of this direction in the sprite sheet.
    pub fn row(self) -> u32 {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Walk-cycle pose selected by a frame index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkPhase {
    /// Frame 0: feet together
    Neutral,
    /// Frame 1: left foot forward
    ForwardA,
    /// Frame 2: right foot forward
    ForwardB,
}

impl WalkPhase {
    /// Map a frame index to its phase.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::InvalidFrame` for indices outside `0..3`.
    pub fn from_index(index: u32) -> Result<Self> {
        match index {
            0 => Ok(WalkPhase::Neutral),
            1 => Ok(WalkPhase::ForwardA),
            2 => Ok(WalkPhase::ForwardB),
            _ => Err(SpriteError::InvalidFrame { index, frames: FRAMES_PER_DIRECTION }),
        }
    }

    pub fn index(self) -> u32 {
        match self {
            WalkPhase::Neutral => 0,
            WalkPhase::ForwardA => 1,
            WalkPhase::ForwardB => 2,
        }
    }
}

impl TryFrom<u32> for WalkPhase {
    type Error = SpriteError;

    fn try_from(index: u32) -> Result<Self> {
        Self::from_index(index)
    }
}

/// One leg column: shorts fill plus the shoe span on its lowest row.
#[derive(Debug, Clone, Copy)]
struct Leg {
    area: Rect,
    /// Shoe pixels drawn from the left edge of the bottom row; 0 hides the foot.
    shoe_width: u32,
}

impl Leg {
    const fn new(x: u32, y: u32, w: u32, h: u32, shoe_width: u32) -> Self {
        Self { area: Rect::new(x, y, w, h), shoe_width }
    }

    fn shoe(&self) -> Rect {
        Rect::new(self.area.x, self.area.bottom_row(), self.shoe_width, 1)
    }
}

/// Torso block with its shading strips.
#[derive(Debug, Clone, Copy)]
struct Torso {
    body: Rect,
    highlight: Rect,
    shadow: Rect,
}

/// Per-direction layout, indexed by walk phase where it varies.
#[derive(Debug)]
struct PoseLayout {
    hair: Rect,
    face: Option<Rect>,
    eyes: &'static [(u32, u32)],
    torso: Torso,
    arms: [&'static [(u32, u32)]; 3],
    legs: [&'static [Leg]; 3],
}

/// Paint one frame for a direction and frame index.
///
/// The right-facing frames reuse the left-facing layout unchanged.
///
/// # Errors
///
/// Returns `SpriteError::InvalidFrame` if `frame_index` is not 0, 1 or 2.
/// Any `SpriteError::OutOfBounds` indicates a broken layout table.
pub fn generate_frame(
    direction: Direction,
    frame_index: u32,
    jersey: &JerseySet,
    body: &BodyColors,
) -> Result<FrameCanvas> {
    let phase = WalkPhase::from_index(frame_index)?;
    let mut canvas = FrameCanvas::new();
    match direction {
        Direction::Down => front::draw(&mut canvas, phase, jersey, body)?,
        Direction::Left | Direction::Right => side::draw(&mut canvas, phase, jersey, body)?,
        Direction::Up => back::draw(&mut canvas, phase, jersey, body)?,
    }
    Ok(canvas)
}

/// Run every layer of `layout` for `phase`, in compositing order.
fn paint(
    layout: &PoseLayout,
    canvas: &mut FrameCanvas,
    phase: WalkPhase,
    jersey: &JerseySet,
    body: &BodyColors,
) -> Result<()> {
    canvas.fill_rect(layout.hair, body.hair)?;

    if let Some(face) = layout.face {
        canvas.fill_rect(face, body.skin)?;
    }
    for &(x, y) in layout.eyes {
        canvas.set_pixel(x, y, body.eye)?;
    }

    let torso = &layout.torso;
    canvas.fill_rect(torso.body, jersey.main())?;
    canvas.fill_rect(torso.highlight, jersey.light())?;
    canvas.fill_rect(torso.shadow, jersey.dark())?;

    let phase = phase.index() as usize;
    for &(x, y) in layout.arms[phase] {
        canvas.set_pixel(x, y, body.skin)?;
    }

    let legs = layout.legs[phase];
    for leg in legs {
        canvas.fill_rect(leg.area, jersey.dark())?;
    }
    for leg in legs {
        canvas.fill_rect(leg.shoe(), body.shoe)?;
    }
    Ok(())
}
