use crate::{demo::DemoState, input::InputState};

pub fn update(state: &mut DemoState, input: &InputState) -> anyhow::Result<()> {
    state.update(input);
    state.scene.late_update();

    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;

    #[test]
    fn update_refreshes_world_matrices() {
        let mut state = DemoState::new(Vec2::new(800.0, 600.0));
        let input = InputState {
            bits: InputState::UP,
            wireframe: true,
        };

        update(&mut state, &input).unwrap();

        let orbital = state.sculpture().orbital_cross;
        let world = state.scene.world_matrix(orbital).unwrap();
        assert!(world
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(0.0, 10.0, 0.0), 1e-4));
    }
}
