//! Side view, used for walking left and (unmirrored) right.

use super::{paint, Leg, PoseLayout, Torso, WalkPhase};
use crate::canvas::{FrameCanvas, Rect};
use crate::error::Result;
use crate::palette::{BodyColors, JerseySet};

const LAYOUT: PoseLayout = PoseLayout {
    hair: Rect::new(6, 3, 4, 2),
    face: Some(Rect::new(7, 5, 3, 2)),
    eyes: &[(9, 5)],
    torso: Torso {
        body: Rect::new(6, 7, 5, 4),
        highlight: Rect::new(7, 7, 3, 1),
        shadow: Rect::new(7, 10, 4, 1),
    },
    arms: [&[(5, 9), (5, 10)], &[(5, 7), (5, 8)], &[(5, 9), (5, 10)]],
    legs: [
        // Legs overlap when standing, so only one column shows
        &[Leg::new(7, 11, 2, 4, 2)],
        &[Leg::new(6, 11, 2, 4, 2), Leg::new(9, 12, 2, 2, 1)],
        &[Leg::new(8, 11, 2, 4, 2), Leg::new(6, 12, 2, 2, 1)],
    ],
};

// TODO: draw a mirrored layout for Direction::Right instead of sharing this one.
pub(super) fn draw(
    canvas: &mut FrameCanvas,
    phase: WalkPhase,
    jersey: &JerseySet,
    body: &BodyColors,
) -> Result<()> {
    paint(&LAYOUT, canvas, phase, jersey, body)
}
