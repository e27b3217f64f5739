use glam::{Quat, Vec2, Vec3};

use crate::{
    camera::CameraRig,
    controls::{self, FrameDelta},
    input::InputState,
    scene_graph::scene::Scene,
    sculpture::Sculpture,
};

pub struct DemoState {
    pub cameras: CameraRig,
    pub start_time: std::time::Instant,
    pub scene: Scene,
    sculpture: Sculpture,
}

impl DemoState {
    pub fn new(viewport: Vec2) -> Self {
        let mut scene = Scene::new();
        let sculpture = Sculpture::build(&mut scene);

        log::debug!("Scene hierarchy:\n{}", scene.outline(scene.root()));

        Self {
            cameras: CameraRig::new(viewport),
            start_time: std::time::Instant::now(),
            scene,
            sculpture,
        }
    }

    pub fn update(&mut self, input: &InputState) {
        let delta = controls::frame_delta(input, &self.sculpture.rates);
        self.apply(&delta);
    }

    pub fn apply(&mut self, delta: &FrameDelta) {
        if let Some(slot) = delta.camera {
            self.cameras.select(slot);
        }

        self.scene.set_wireframe(delta.wireframe);

        let joints = [
            (
                self.sculpture.orbital_cross,
                delta.orbital_spin,
                Quat::from_rotation_z as fn(f32) -> Quat,
            ),
            (self.sculpture.cross, delta.cross_spin, Quat::from_rotation_x),
            (self.sculpture.cross_element, delta.element_spin, Quat::from_rotation_y),
        ];

        for (joint, spin, rotation) in joints {
            if spin != 0.0 {
                self.scene.rotate_object(joint, rotation(spin));
            }
        }

        if delta.translation != Vec3::ZERO {
            self.scene
                .translate_object_local(self.sculpture.orbital_cross, delta.translation);
        }
    }

    #[cfg(test)]
    pub fn sculpture(&self) -> &Sculpture {
        &self.sculpture
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::camera::CameraSlot;

    fn demo() -> DemoState {
        DemoState::new(Vec2::new(800.0, 600.0))
    }

    fn input(bits: u16, wireframe: bool) -> InputState {
        InputState { bits, wireframe }
    }

    fn rotation_of(demo: &DemoState, id: crate::scene_graph::ObjectId) -> Quat {
        demo.scene.get_object_transform(id).unwrap().rotation()
    }

    #[test]
    fn held_spin_turns_by_rate_each_update() {
        let mut demo = demo();
        let bits = InputState::CAMERA_FRONT | InputState::CROSS_ACTIVE | InputState::CROSS_POSITIVE;

        for _ in 0..3 {
            demo.update(&input(bits, true));
        }

        let cross = demo.sculpture().cross;
        assert!(rotation_of(&demo, cross).abs_diff_eq(Quat::from_rotation_x(0.03), 1e-6));

        demo.update(&input(bits & !InputState::CROSS_POSITIVE, true));
        assert!(rotation_of(&demo, cross).abs_diff_eq(Quat::from_rotation_x(0.02), 1e-6));

        // Released: no further change.
        demo.update(&input(InputState::CAMERA_FRONT, true));
        assert!(rotation_of(&demo, cross).abs_diff_eq(Quat::from_rotation_x(0.02), 1e-6));
        assert_eq!(
            rotation_of(&demo, demo.sculpture().orbital_cross),
            Quat::IDENTITY
        );
    }

    #[test]
    fn each_joint_turns_about_its_own_axis() {
        let mut demo = demo();
        let sculpture = *demo.sculpture();
        let rate = sculpture.rates.orbital;

        demo.update(&input(
            InputState::ORBITAL_ACTIVE | InputState::ORBITAL_POSITIVE,
            true,
        ));
        assert!(rotation_of(&demo, sculpture.orbital_cross)
            .abs_diff_eq(Quat::from_rotation_z(rate), 1e-6));
        assert_eq!(rotation_of(&demo, sculpture.cross), Quat::IDENTITY);
        assert_eq!(rotation_of(&demo, sculpture.cross_element), Quat::IDENTITY);

        let rate = sculpture.rates.element;
        demo.update(&input(InputState::ELEMENT_ACTIVE, true));
        assert!(rotation_of(&demo, sculpture.cross_element)
            .abs_diff_eq(Quat::from_rotation_y(-rate), 1e-6));

        demo.update(&input(
            InputState::ELEMENT_ACTIVE | InputState::ELEMENT_POSITIVE,
            true,
        ));
        demo.update(&input(
            InputState::ELEMENT_ACTIVE | InputState::ELEMENT_POSITIVE,
            true,
        ));
        assert!(rotation_of(&demo, sculpture.cross_element)
            .abs_diff_eq(Quat::from_rotation_y(rate), 1e-6));

        // Only the orbital press reached the outer joint.
        assert!(rotation_of(&demo, sculpture.orbital_cross)
            .abs_diff_eq(Quat::from_rotation_z(sculpture.rates.orbital), 1e-6));
        assert_eq!(rotation_of(&demo, sculpture.cross), Quat::IDENTITY);
    }

    #[test]
    fn wireframe_reaches_every_triangle_mesh() {
        let mut demo = demo();

        demo.update(&input(InputState::CAMERA_FRONT, false));
        assert!(demo
            .scene
            .renderables()
            .all(|(_, mesh)| mesh.draws_lines() == !mesh.honors_wireframe()));

        demo.update(&input(InputState::CAMERA_FRONT, true));
        assert!(demo.scene.renderables().all(|(_, mesh)| mesh.draws_lines()));
    }

    #[test]
    fn translation_follows_local_axes() {
        let mut demo = demo();
        let orbital = demo.sculpture().orbital_cross;

        demo.scene
            .rotate_object(orbital, Quat::from_rotation_z(FRAC_PI_2));
        demo.update(&input(InputState::RIGHT, true));

        let translation = demo.scene.get_object_transform(orbital).unwrap().translation();
        assert!(translation.abs_diff_eq(Vec3::new(0.0, 10.0, 0.0), 1e-4));
    }

    #[test]
    fn camera_persists_without_selection() {
        let mut demo = demo();

        demo.update(&input(InputState::CAMERA_TOP, true));
        assert_eq!(demo.cameras.active_slot(), CameraSlot::Top);

        demo.update(&input(0, true));
        assert_eq!(demo.cameras.active_slot(), CameraSlot::Top);
    }
}
