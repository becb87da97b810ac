//! Back view, used for walking up (away from the camera).

use super::{paint, Leg, PoseLayout, Torso, WalkPhase};
use crate::canvas::{FrameCanvas, Rect};
use crate::error::Result;
use crate::palette::{BodyColors, JerseySet};

const LAYOUT: PoseLayout = PoseLayout {
    // Hair covers the whole head from behind
    hair: Rect::new(5, 3, 6, 4),
    face: None,
    eyes: &[],
    torso: Torso {
        body: Rect::new(5, 7, 6, 4),
        highlight: Rect::new(6, 7, 3, 1),
        shadow: Rect::new(6, 10, 4, 1),
    },
    arms: [&[], &[(4, 8), (11, 8)], &[]],
    legs: [
        &[Leg::new(6, 11, 2, 4, 2), Leg::new(8, 11, 2, 4, 2)],
        &[Leg::new(5, 11, 2, 4, 2), Leg::new(9, 12, 2, 2, 0)],
        &[Leg::new(9, 11, 2, 4, 2), Leg::new(5, 12, 2, 2, 0)],
    ],
};

pub(super) fn draw(
    canvas: &mut FrameCanvas,
    phase: WalkPhase,
    jersey: &JerseySet,
    body: &BodyColors,
) -> Result<()> {
    paint(&LAYOUT, canvas, phase, jersey, body)
}
