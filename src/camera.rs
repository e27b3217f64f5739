use glam::{Mat4, Vec2, Vec3};

use crate::config::cameras::{EYE_DISTANCE, FAR, NEAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSlot {
    /// Looks down −Z from +Z.
    Front,
    /// Looks down −Y from +Y.
    Top,
    /// Looks down −X from +X.
    Side,
}

impl CameraSlot {
    #[cfg(test)]
    pub const ALL: [CameraSlot; 3] = [CameraSlot::Front, CameraSlot::Top, CameraSlot::Side];

    fn index(self) -> usize {
        match self {
            CameraSlot::Front => 0,
            CameraSlot::Top => 1,
            CameraSlot::Side => 2,
        }
    }
}

/// Orthographic camera whose frustum spans the viewport in world units, one unit per logical pixel.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub half_extent: Vec2,
    pub near: f32,
    pub far: f32,
}

impl OrthographicCamera {
    pub fn new(eye: Vec3, up: Vec3, viewport: Vec2) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up,
            half_extent: viewport / 2.0,
            near: NEAR,
            far: FAR,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -self.half_extent.x,
            self.half_extent.x,
            -self.half_extent.y,
            self.half_extent.y,
            self.near,
            self.far,
        )
    }

    pub fn get_vp_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// The three fixed cameras and which one is active.
#[derive(Debug, Clone)]
pub struct CameraRig {
    cameras: [OrthographicCamera; 3],
    active: CameraSlot,
}

impl CameraRig {
    pub fn new(viewport: Vec2) -> Self {
        let cameras = [
            OrthographicCamera::new(Vec3::Z * EYE_DISTANCE, Vec3::Y, viewport),
            // World up is parallel to this view direction, so screen-up is −Z instead.
            OrthographicCamera::new(Vec3::Y * EYE_DISTANCE, Vec3::NEG_Z, viewport),
            OrthographicCamera::new(Vec3::X * EYE_DISTANCE, Vec3::Y, viewport),
        ];

        Self {
            cameras,
            active: CameraSlot::Front,
        }
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        for camera in &mut self.cameras {
            camera.half_extent = viewport / 2.0;
        }
    }

    pub fn select(&mut self, slot: CameraSlot) {
        if slot != self.active {
            log::info!("Switching to {:?} camera", slot);
        }
        self.active = slot;
    }

    #[cfg(test)]
    pub fn active_slot(&self) -> CameraSlot {
        self.active
    }

    pub fn active(&self) -> &OrthographicCamera {
        self.camera(self.active)
    }

    pub fn camera(&self, slot: CameraSlot) -> &OrthographicCamera {
        &self.cameras[slot.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn project(camera: &OrthographicCamera, point: Vec3) -> Vec3 {
        camera.get_vp_matrix().project_point3(point)
    }

    #[test]
    fn origin_projects_to_screen_center_at_mid_depth() {
        let rig = CameraRig::new(VIEWPORT);

        for slot in CameraSlot::ALL {
            let ndc = project(rig.camera(slot), Vec3::ZERO);
            assert!(ndc.truncate().abs_diff_eq(Vec2::ZERO, 1e-5));
            // Eye at 500, near 1, far 1000: the origin sits at depth 499 / 999.
            assert!((ndc.z - 499.0 / 999.0).abs() < 1e-4);
        }
    }

    #[test]
    fn frustum_spans_the_viewport() {
        let rig = CameraRig::new(VIEWPORT);

        let front = project(rig.camera(CameraSlot::Front), Vec3::new(400.0, 300.0, 0.0));
        assert!(front.truncate().abs_diff_eq(Vec2::ONE, 1e-5));

        // Seen from above, +X is to the right and −Z is up.
        let top = project(rig.camera(CameraSlot::Top), Vec3::new(400.0, 0.0, -300.0));
        assert!(top.truncate().abs_diff_eq(Vec2::ONE, 1e-5));

        // Seen from +X, −Z is to the right.
        let side = project(rig.camera(CameraSlot::Side), Vec3::new(0.0, 300.0, -400.0));
        assert!(side.truncate().abs_diff_eq(Vec2::ONE, 1e-5));
    }

    #[test]
    fn resizing_rebuilds_every_frustum() {
        let mut rig = CameraRig::new(VIEWPORT);
        rig.set_viewport(Vec2::new(200.0, 100.0));

        for slot in CameraSlot::ALL {
            assert_eq!(rig.camera(slot).half_extent, Vec2::new(100.0, 50.0));
        }
    }

    #[test]
    fn selection_switches_active_camera() {
        let mut rig = CameraRig::new(VIEWPORT);
        assert_eq!(rig.active_slot(), CameraSlot::Front);

        rig.select(CameraSlot::Side);
        assert_eq!(rig.active_slot(), CameraSlot::Side);
        assert_eq!(rig.active().eye, Vec3::new(500.0, 0.0, 0.0));
    }
}
