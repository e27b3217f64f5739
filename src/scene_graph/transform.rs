use glam::{Mat4, Quat, Vec3};
use std::cell::{Cell, Ref, RefCell};

#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: f32,

    local_matrix: RefCell<Mat4>,
    world_matrix: RefCell<Mat4>,
    local_dirty: Cell<bool>,
    world_dirty: Cell<bool>,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            local_matrix: RefCell::new(Mat4::IDENTITY),
            world_matrix: RefCell::new(Mat4::IDENTITY),
            local_dirty: Cell::new(true),
            world_dirty: Cell::new(true),
        }
    }

    /// Builds a transform by applying `rotations` one after another, each about the
    /// node's own (already rotated) axes.
    pub fn placed(translation: Vec3, rotations: &[Quat]) -> Self {
        let mut transform = Self::from_translation(translation);

        for rotation in rotations {
            transform.rotate(*rotation);
        }

        transform
    }

    pub fn get_local_matrix(&self) -> Ref<Mat4> {
        if self.local_dirty.get() {
            let matrix = Mat4::from_scale_rotation_translation(
                Vec3::splat(self.scale),
                self.rotation,
                self.translation,
            );

            self.local_matrix.replace(matrix);
            self.local_dirty.set(false);
            self.invalidate_world();
        }

        self.local_matrix.borrow()
    }

    pub fn get_world_matrix(&self) -> Ref<Mat4> {
        self.world_matrix.borrow()
    }

    pub fn set_world_matrix(&self, world_matrix: Mat4) {
        self.world_matrix.replace(world_matrix);
        self.world_dirty.set(false);
    }

    pub fn invalidate_local(&self) {
        self.local_dirty.set(true);
        self.world_dirty.set(true);
    }

    pub fn invalidate_world(&self) {
        self.world_dirty.set(true);
    }

    pub fn is_world_dirty(&self) -> bool {
        self.world_dirty.get()
    }

    /// Moves along the node's own axes, i.e. `delta` is rotated by the current rotation first.
    pub fn translate_local(&mut self, delta: Vec3) {
        self.translation += self.rotation * delta;
        self.invalidate_local();
    }

    /// Rotates about the node's own axes.
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = self.rotation * rotation;
        self.invalidate_local();
    }

    #[cfg(test)]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    #[cfg(test)]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn rotations_compose_in_local_space() {
        let transform = Transform::placed(
            Vec3::ZERO,
            &[Quat::from_rotation_x(FRAC_PI_2), Quat::from_rotation_y(FRAC_PI_2)],
        );

        let expected = Quat::from_rotation_x(FRAC_PI_2) * Quat::from_rotation_y(FRAC_PI_2);
        assert!(transform.rotation().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn translate_local_follows_rotation() {
        let mut transform = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        transform.rotate(Quat::from_rotation_z(FRAC_PI_2));
        transform.translate_local(Vec3::X * 10.0);

        assert!(transform
            .translation()
            .abs_diff_eq(Vec3::new(1.0, 10.0, 0.0), 1e-5));
    }

    #[test]
    fn local_matrix_is_rebuilt_after_changes() {
        let mut transform = Transform::default();
        assert_eq!(*transform.get_local_matrix(), Mat4::IDENTITY);

        transform.translate_local(Vec3::new(0.0, 5.0, 0.0));
        let matrix = *transform.get_local_matrix();
        assert!(matrix
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), 1e-6));
        assert!(transform.is_world_dirty());
    }
}
