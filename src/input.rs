//! Keyboard state for the viewer.
//!
//! Key events flip bits in an [`InputState`], which is copied into the per-frame
//! control step. Nothing is queued: the last event for a key wins.

use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config;

/// Snapshot of every control the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    /// Raw bitfield of held keys and selected camera
    pub bits: u16,

    /// Whether meshes are drawn as wireframes
    pub wireframe: bool,
}

impl InputState {
    // Camera selection, exactly one is set by the keyboard
    pub const CAMERA_FRONT: u16 = 1 << 0;
    pub const CAMERA_TOP: u16 = 1 << 1;
    pub const CAMERA_SIDE: u16 = 1 << 2;

    // Articulation: active + direction per joint
    pub const ORBITAL_ACTIVE: u16 = 1 << 3;
    pub const ORBITAL_POSITIVE: u16 = 1 << 4;
    pub const CROSS_ACTIVE: u16 = 1 << 5;
    pub const CROSS_POSITIVE: u16 = 1 << 6;
    pub const ELEMENT_ACTIVE: u16 = 1 << 7;
    pub const ELEMENT_POSITIVE: u16 = 1 << 8;

    // Translation
    pub const RIGHT: u16 = 1 << 9;
    pub const LEFT: u16 = 1 << 10;
    pub const UP: u16 = 1 << 11;
    pub const DOWN: u16 = 1 << 12;
    pub const FORWARD: u16 = 1 << 13; // towards −Z
    pub const BACKWARD: u16 = 1 << 14; // towards +Z

    const CAMERAS: u16 = Self::CAMERA_FRONT | Self::CAMERA_TOP | Self::CAMERA_SIDE;

    const HELD: u16 = Self::ORBITAL_ACTIVE
        | Self::CROSS_ACTIVE
        | Self::ELEMENT_ACTIVE
        | Self::RIGHT
        | Self::LEFT
        | Self::UP
        | Self::DOWN
        | Self::FORWARD
        | Self::BACKWARD;

    pub const fn new() -> Self {
        Self {
            bits: Self::CAMERA_FRONT,
            wireframe: config::START_IN_WIREFRAME,
        }
    }

    #[inline]
    pub const fn is_pressed(&self, input: u16) -> bool {
        self.bits & input != 0
    }

    #[inline]
    pub fn set(&mut self, input: u16, pressed: bool) {
        if pressed {
            self.bits |= input;
        } else {
            self.bits &= !input;
        }
    }

    /// Selects one camera and deselects the others.
    pub fn select_camera(&mut self, camera: u16) {
        self.bits = (self.bits & !Self::CAMERAS) | (camera & Self::CAMERAS);
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Logical effect of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Camera(u16),
    ToggleWireframe,
    /// Joint active bit and its direction bit, positive or not
    Spin {
        active: u16,
        direction: u16,
        positive: bool,
    },
    Move(u16),
}

fn key_action(key: PhysicalKey) -> Option<KeyAction> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };

    let spin = |active, direction, positive| KeyAction::Spin {
        active,
        direction,
        positive,
    };

    let action = match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => KeyAction::Camera(InputState::CAMERA_FRONT),
        KeyCode::Digit2 | KeyCode::Numpad2 => KeyAction::Camera(InputState::CAMERA_TOP),
        KeyCode::Digit3 | KeyCode::Numpad3 => KeyAction::Camera(InputState::CAMERA_SIDE),
        KeyCode::Digit4 | KeyCode::Numpad4 => KeyAction::ToggleWireframe,

        KeyCode::KeyQ => spin(InputState::ORBITAL_ACTIVE, InputState::ORBITAL_POSITIVE, true),
        KeyCode::KeyW => spin(InputState::ORBITAL_ACTIVE, InputState::ORBITAL_POSITIVE, false),
        KeyCode::KeyA => spin(InputState::CROSS_ACTIVE, InputState::CROSS_POSITIVE, true),
        KeyCode::KeyS => spin(InputState::CROSS_ACTIVE, InputState::CROSS_POSITIVE, false),
        KeyCode::KeyZ => spin(InputState::ELEMENT_ACTIVE, InputState::ELEMENT_POSITIVE, true),
        KeyCode::KeyX => spin(InputState::ELEMENT_ACTIVE, InputState::ELEMENT_POSITIVE, false),

        KeyCode::ArrowUp => KeyAction::Move(InputState::UP),
        KeyCode::ArrowDown => KeyAction::Move(InputState::DOWN),
        KeyCode::ArrowRight => KeyAction::Move(InputState::RIGHT),
        KeyCode::ArrowLeft => KeyAction::Move(InputState::LEFT),
        KeyCode::KeyD => KeyAction::Move(InputState::FORWARD),
        KeyCode::KeyC => KeyAction::Move(InputState::BACKWARD),

        _ => return None,
    };

    Some(action)
}

/// Tracks current input state from window key events.
#[derive(Debug, Default)]
pub struct InputHandler {
    current: InputState,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key event and update input state. `repeat` marks auto-repeated presses.
    pub fn process_key(&mut self, key: PhysicalKey, state: ElementState, repeat: bool) {
        let Some(action) = key_action(key) else {
            return;
        };

        let pressed = state == ElementState::Pressed;

        match action {
            KeyAction::Camera(camera) => {
                if pressed {
                    self.current.select_camera(camera);
                }
            }
            KeyAction::ToggleWireframe => {
                if pressed && !repeat {
                    self.current.wireframe = !self.current.wireframe;
                }
            }
            KeyAction::Spin {
                active,
                direction,
                positive,
            } => {
                if pressed {
                    self.current.set(active, true);
                    self.current.set(direction, positive);
                } else {
                    // Releasing either key of the pair stops the joint.
                    self.current.set(active, false);
                }
            }
            KeyAction::Move(direction) => self.current.set(direction, pressed),
        }
    }

    /// Get the current input state.
    pub fn current(&self) -> InputState {
        self.current
    }

    /// Release every held key, e.g. on focus loss. Camera and wireframe choices stay.
    pub fn release_all(&mut self) {
        self.current.set(InputState::HELD, false);
    }
}
