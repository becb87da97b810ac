//! Spritesheet composition - packs walk-cycle frames into a direction x frame grid

use crate::canvas::FRAME_SIZE;
use crate::error::Result;
use crate::palette::{BodyColors, JerseySet, TRANSPARENT};
use crate::pose::{generate_frame, Direction, FRAMES_PER_DIRECTION};
use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sheet width in pixels (frames laid out left to right).
pub const SHEET_WIDTH: u32 = FRAME_SIZE * FRAMES_PER_DIRECTION;

/// Sheet height in pixels (one row per direction).
pub const SHEET_HEIGHT: u32 = FRAME_SIZE * Direction::ALL.len() as u32;

/// Render multiple frames into a spritesheet grid.
///
/// # Arguments
///
/// * `frames` - Slice of RGBA images to combine, in row-major order
/// * `cols` - Optional number of columns. If None, uses horizontal layout (1 row)
///
/// # Returns
///
/// A single RGBA image containing all frames arranged in a grid.
/// Every cell is sized to the largest frame; unused space stays transparent.
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use courtsprite::spritesheet::render_spritesheet;
///
/// let frame = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
/// let frames = vec![frame.clone(), frame.clone(), frame.clone(), frame];
///
/// let sheet = render_spritesheet(&frames, Some(2));
/// assert_eq!(sheet.dimensions(), (4, 4));
/// ```
pub fn render_spritesheet(frames: &[RgbaImage], cols: Option<u32>) -> RgbaImage {
    if frames.is_empty() {
        return RgbaImage::from_pixel(1, 1, TRANSPARENT);
    }

    let max_width = frames.iter().map(|f| f.width()).max().unwrap_or(1);
    let max_height = frames.iter().map(|f| f.height()).max().unwrap_or(1);

    let num_frames = frames.len() as u32;
    let columns = cols.unwrap_or(num_frames).max(1);
    let rows = num_frames.div_ceil(columns);

    let mut sheet = RgbaImage::from_pixel(columns * max_width, rows * max_height, TRANSPARENT);

    for (i, frame) in frames.iter().enumerate() {
        let col = (i as u32) % columns;
        let row = (i as u32) / columns;
        imageops::replace(
            &mut sheet,
            frame,
            i64::from(col * max_width),
            i64::from(row * max_height),
        );
    }

    sheet
}

/// A composed 48x64 walk-cycle sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    image: RgbaImage,
}

impl SpriteSheet {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Copy out the cell for `direction` and `frame`.
    ///
    /// Returns `None` if `frame` is outside the walk cycle.
    pub fn frame(&self, direction: Direction, frame: u32) -> Option<RgbaImage> {
        if frame >= FRAMES_PER_DIRECTION {
            return None;
        }
        let (x, y) = cell_origin(direction, frame);
        Some(imageops::crop_imm(&self.image, x, y, FRAME_SIZE, FRAME_SIZE).to_image())
    }

    /// Describe the frame grid for game-engine loaders.
    pub fn metadata(&self, image_name: &str) -> SheetMetadata {
        let mut frames = BTreeMap::new();
        let mut animations = BTreeMap::new();

        for direction in Direction::ALL {
            let mut cycle = Vec::with_capacity(FRAMES_PER_DIRECTION as usize);
            for frame in 0..FRAMES_PER_DIRECTION {
                let name = frame_name(direction, frame);
                let (x, y) = cell_origin(direction, frame);
                frames.insert(name.clone(), FrameRect { x, y, w: FRAME_SIZE, h: FRAME_SIZE });
                cycle.push(name);
            }
            animations.insert(format!("walk_{}", direction), cycle);
        }

        SheetMetadata {
            image: image_name.to_string(),
            size: [self.width(), self.height()],
            frame_size: [FRAME_SIZE, FRAME_SIZE],
            frames,
            animations,
        }
    }
}

/// Frame position within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// JSON sidecar describing a sheet's frames and walk animations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMetadata {
    pub image: String,
    pub size: [u32; 2],
    pub frame_size: [u32; 2],
    pub frames: BTreeMap<String, FrameRect>,
    pub animations: BTreeMap<String, Vec<String>>,
}

/// Compose the full sheet for one jersey.
///
/// Frames are generated for every direction (down, left, right, up) and
/// walk phase, then placed at `(frame * 16, row * 16)`.
///
/// # Errors
///
/// Propagates the first generator failure; no partial sheet is returned.
pub fn compose(jersey: &JerseySet, body: &BodyColors) -> Result<SpriteSheet> {
    let mut frames = Vec::with_capacity(Direction::ALL.len() * FRAMES_PER_DIRECTION as usize);
    for direction in Direction::ALL {
        for frame in 0..FRAMES_PER_DIRECTION {
            frames.push(generate_frame(direction, frame, jersey, body)?.into_image());
        }
    }

    let image = render_spritesheet(&frames, Some(FRAMES_PER_DIRECTION));
    log::debug!("composed {}x{} sheet for team {}", image.width(), image.height(), jersey.team());
    Ok(SpriteSheet { image })
}

/// Name of a frame in sheet metadata, e.g. `down_0`.
pub fn frame_name(direction: Direction, frame: u32) -> String {
    format!("{}_{}", direction, frame)
}

fn cell_origin(direction: Direction, frame: u32) -> (u32, u32) {
    (frame * FRAME_SIZE, direction.row() * FRAME_SIZE)
}
