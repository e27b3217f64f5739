//! Per-frame control step: turns an [`InputState`] into the changes to apply to the scene.

use glam::Vec3;

use crate::camera::CameraSlot;
use crate::config::controls::{
    CROSS_SPIN_RATE, ELEMENT_SPIN_RATE, ORBITAL_SPIN_RATE, TRANSLATION_STEP,
};
use crate::input::InputState;

/// Radians per update for each joint of the articulated object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinRates {
    /// Orbital cross about its local Z axis
    pub orbital: f32,
    /// Cross about its local X axis
    pub cross: f32,
    /// Cross element about its local Y axis
    pub element: f32,
}

impl Default for SpinRates {
    fn default() -> Self {
        Self {
            orbital: ORBITAL_SPIN_RATE,
            cross: CROSS_SPIN_RATE,
            element: ELEMENT_SPIN_RATE,
        }
    }
}

/// Everything one update changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// `None` keeps the camera that is already active.
    pub camera: Option<CameraSlot>,
    pub wireframe: bool,
    pub orbital_spin: f32,
    pub cross_spin: f32,
    pub element_spin: f32,
    /// Offset along the orbital cross's own axes.
    pub translation: Vec3,
}

pub fn frame_delta(input: &InputState, rates: &SpinRates) -> FrameDelta {
    FrameDelta {
        camera: selected_camera(input),
        wireframe: input.wireframe,
        orbital_spin: spin(
            input,
            InputState::ORBITAL_ACTIVE,
            InputState::ORBITAL_POSITIVE,
            rates.orbital,
        ),
        cross_spin: spin(
            input,
            InputState::CROSS_ACTIVE,
            InputState::CROSS_POSITIVE,
            rates.cross,
        ),
        element_spin: spin(
            input,
            InputState::ELEMENT_ACTIVE,
            InputState::ELEMENT_POSITIVE,
            rates.element,
        ),
        translation: translation(raw_translation(input)),
    }
}

/// Later cameras take precedence when several bits are set.
fn selected_camera(input: &InputState) -> Option<CameraSlot> {
    if input.is_pressed(InputState::CAMERA_SIDE) {
        Some(CameraSlot::Side)
    } else if input.is_pressed(InputState::CAMERA_TOP) {
        Some(CameraSlot::Top)
    } else if input.is_pressed(InputState::CAMERA_FRONT) {
        Some(CameraSlot::Front)
    } else {
        None
    }
}

fn spin(input: &InputState, active: u16, positive: u16, rate: f32) -> f32 {
    if !input.is_pressed(active) {
        0.0
    } else if input.is_pressed(positive) {
        rate
    } else {
        -rate
    }
}

/// Sum of the held direction keys, each worth one step along its axis.
pub fn raw_translation(input: &InputState) -> Vec3 {
    [
        (InputState::RIGHT, Vec3::X),
        (InputState::LEFT, Vec3::NEG_X),
        (InputState::UP, Vec3::Y),
        (InputState::DOWN, Vec3::NEG_Y),
        (InputState::FORWARD, Vec3::NEG_Z),
        (InputState::BACKWARD, Vec3::Z),
    ]
    .into_iter()
    .filter(|(bit, _)| input.is_pressed(*bit))
    .map(|(_, axis)| axis * TRANSLATION_STEP)
    .sum()
}

/// Rescales `raw` to one step. A zero sum, from no keys or opposite keys cancelling,
/// means no movement.
pub fn translation(raw: Vec3) -> Vec3 {
    raw.normalize_or_zero() * TRANSLATION_STEP
}
