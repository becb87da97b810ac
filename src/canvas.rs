//! Frame canvas: one 16x16 animation frame.
//!
//! The canvas is a flat arena indexed by `y * FRAME_SIZE + x`. It is
//! write-then-export only: pose generators paint into it, and the only way to
//! observe the result is [`FrameCanvas::into_image`].

use crate::error::{Result, SpriteError};
use crate::palette::TRANSPARENT;
use image::{Rgba, RgbaImage};
use std::ops::Range;

/// Width and height of every frame, in pixels.
pub const FRAME_SIZE: u32 = 16;

/// Axis-aligned rectangle in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Columns covered; the end saturates at `u32::MAX`.
    pub fn xs(&self) -> Range<u32> {
        self.x..self.x.saturating_add(self.w)
    }

    /// Rows covered; the end saturates at `u32::MAX`.
    pub fn ys(&self) -> Range<u32> {
        self.y..self.y.saturating_add(self.h)
    }

    /// The bottom row of this rectangle.
    pub fn bottom_row(&self) -> u32 {
        self.y.saturating_add(self.h).saturating_sub(1)
    }
}

/// A mutable 16x16 pixel grid, initially transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCanvas {
    pixels: Vec<Rgba<u8>>,
}

impl Default for FrameCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCanvas {
    pub fn new() -> Self {
        Self { pixels: vec![TRANSPARENT; (FRAME_SIZE * FRAME_SIZE) as usize] }
    }

    /// Write a single pixel.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::OutOfBounds` if `(x, y)` is outside the frame.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) -> Result<()> {
        check_bounds(x, y)?;
        self.pixels[index(x, y)] = color;
        Ok(())
    }

    /// Fill every cell in the half-open rectangle `xs` x `ys`.
    ///
    /// An empty range that starts inside the frame (or on its far edge) is a
    /// no-op. Later fills overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `SpriteError::OutOfBounds` if any part of the region lies
    /// outside the frame, reporting the first offending coordinate on each
    /// axis. Nothing is written in that case.
    pub fn fill_region(&mut self, xs: Range<u32>, ys: Range<u32>, color: Rgba<u8>) -> Result<()> {
        let bad_x = first_outside(&xs);
        let bad_y = first_outside(&ys);
        if bad_x.is_some() || bad_y.is_some() {
            return Err(SpriteError::OutOfBounds {
                x: bad_x.unwrap_or(xs.start),
                y: bad_y.unwrap_or(ys.start),
                width: FRAME_SIZE,
                height: FRAME_SIZE,
            });
        }
        if xs.is_empty() || ys.is_empty() {
            return Ok(());
        }

        for y in ys {
            for x in xs.clone() {
                self.pixels[index(x, y)] = color;
            }
        }
        Ok(())
    }

    /// Fill a [`Rect`].
    ///
    /// # Errors
    ///
    /// Same as [`FrameCanvas::fill_region`].
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) -> Result<()> {
        self.fill_region(rect.xs(), rect.ys(), color)
    }

    /// Export the finished frame as an image.
    pub fn into_image(self) -> RgbaImage {
        let mut image = RgbaImage::new(FRAME_SIZE, FRAME_SIZE);
        for (i, pixel) in self.pixels.into_iter().enumerate() {
            let i = i as u32;
            image.put_pixel(i % FRAME_SIZE, i / FRAME_SIZE, pixel);
        }
        image
    }
}

fn check_bounds(x: u32, y: u32) -> Result<()> {
    if x >= FRAME_SIZE || y >= FRAME_SIZE {
        return Err(SpriteError::OutOfBounds { x, y, width: FRAME_SIZE, height: FRAME_SIZE });
    }
    Ok(())
}

/// First coordinate of `range` that falls outside the frame, if any.
fn first_outside(range: &Range<u32>) -> Option<u32> {
    if range.is_empty() {
        (range.start > FRAME_SIZE).then_some(range.start)
    } else if range.end > FRAME_SIZE {
        Some(range.start.max(FRAME_SIZE))
    } else {
        None
    }
}

fn index(x: u32, y: u32) -> usize {
    (y * FRAME_SIZE + x) as usize
}
