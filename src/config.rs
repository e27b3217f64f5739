//! Compile-time settings for the sculpture viewer.

/// Title of the main window
pub const WINDOW_TITLE: &str = "Kandinsky";

/// Inner size of the window when it opens, in physical pixels
pub const INITIAL_WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Whether meshes start out drawn as wireframes
pub const START_IN_WIREFRAME: bool = true;

/// Articulated object controls
pub mod controls {
    /// Radians per update that the orbital cross turns about its local Z axis
    pub const ORBITAL_SPIN_RATE: f32 = 0.01;

    /// Radians per update that the cross turns about its local X axis
    pub const CROSS_SPIN_RATE: f32 = 0.01;

    /// Radians per update that the cross element turns about its local Y axis
    pub const ELEMENT_SPIN_RATE: f32 = 0.01;

    /// Length of one translation step, and the contribution of each held direction key
    pub const TRANSLATION_STEP: f32 = 10.0;
}

/// Fixed camera placement
pub mod cameras {
    /// Distance of every camera from the origin along its axis
    pub const EYE_DISTANCE: f32 = 500.0;

    pub const NEAR: f32 = 1.0;

    pub const FAR: f32 = 1000.0;
}

/// Axis helper at the origin
pub mod axes {
    pub const LENGTH: f32 = 10.0;
}
