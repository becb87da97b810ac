//! Front view, used for walking down (towards the camera).

use super::{paint, Leg, PoseLayout, Torso, WalkPhase};
use crate::canvas::{FrameCanvas, Rect};
use crate::error::Result;
use crate::palette::{BodyColors, JerseySet};

const LAYOUT: PoseLayout = PoseLayout {
    hair: Rect::new(5, 3, 6, 2),
    face: Some(Rect::new(6, 5, 4, 2)),
    eyes: &[(6, 5), (9, 5)],
    torso: Torso {
        body: Rect::new(5, 7, 6, 4),
        highlight: Rect::new(6, 7, 3, 1),
        shadow: Rect::new(6, 10, 4, 1),
    },
    arms: [
        &[(4, 8), (11, 8)],
        // Left hand forward, right hand back
        &[(4, 7), (4, 8), (11, 9)],
        &[(4, 9), (11, 7), (11, 8)],
    ],
    legs: [
        &[Leg::new(6, 11, 2, 4, 2), Leg::new(8, 11, 2, 4, 2)],
        // Trailing leg is lifted a row
        &[Leg::new(5, 11, 2, 4, 2), Leg::new(9, 12, 2, 3, 2)],
        &[Leg::new(5, 12, 2, 3, 2), Leg::new(9, 11, 2, 4, 2)],
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
