//! The hand-built Kandinsky sculpture.
//!
//! Every composite is created once with fixed parameters. Meshes that need an extra
//! rotation sit under an empty holder node carrying it.

use std::f32::consts::{FRAC_PI_4, FRAC_PI_6, PI};

use glam::{Quat, Vec3};

use crate::config::axes;
use crate::controls::SpinRates;
use crate::geometry::{
    box_geometry, cone, cylinder, sphere, tetrahedron, torus, tube, Geometry, SineCurve,
};
use crate::material::{BasicMaterial, Color};
use crate::scene_graph::{ObjectId, Scene, Transform};

/// Handles of the articulated object's three joints.
#[derive(Debug, Clone, Copy)]
pub struct Sculpture {
    pub orbital_cross: ObjectId,
    pub cross: ObjectId,
    pub cross_element: ObjectId,
    pub rates: SpinRates,
}

impl Sculpture {
    pub fn build(scene: &mut Scene) -> Sculpture {
        let root = scene.root();

        add_axes(scene, root);

        let kandinsky = scene.add_group(root, "Kandinsky", Transform::default());
        let sculpture = add_orbital_cross(scene, kandinsky, Vec3::ZERO);
        add_planet(scene, kandinsky, Vec3::new(-350.0, -150.0, 200.0));
        add_hammer(scene, kandinsky, Vec3::new(100.0, 100.0, -200.0));
        add_cones(scene, kandinsky, Vec3::new(100.0, -150.0, 0.0));

        // Hangs off the scene root, not the sculpture group.
        add_cylinder(scene, root, Vec3::new(-300.0, 150.0, 50.0));

        sculpture
    }
}

fn hex(hex: u32) -> BasicMaterial {
    BasicMaterial::new(Color::from_hex(hex))
}

fn named(name: &str) -> BasicMaterial {
    BasicMaterial::new(Color::from_name(name).unwrap_or(Color::from_hex(0xffffff)))
}

fn add_axes(scene: &mut Scene, parent: ObjectId) {
    let group = scene.add_group(parent, "Axes", Transform::default());

    for (name, direction, color) in [
        ("Axis X", Vec3::X, "red"),
        ("Axis Y", Vec3::Y, "green"),
        ("Axis Z", Vec3::Z, "blue"),
    ] {
        scene.add_mesh(
            group,
            name,
            Transform::default(),
            Geometry::line_segments(&[Vec3::ZERO, direction * axes::LENGTH]),
            BasicMaterial {
                wireframe: false,
                ..named(color)
            },
        );
    }
}

fn add_orbital_cross(scene: &mut Scene, parent: ObjectId, position: Vec3) -> Sculpture {
    let orbital_cross = scene.add_group(
        parent,
        "Orbital Cross",
        Transform::from_translation(position),
    );

    scene.add_mesh(
        orbital_cross,
        "Orbital Cross Ball",
        Transform::default(),
        sphere(50.0, 20, 20),
        hex(0xfb8500),
    );

    let cross = scene.add_group(orbital_cross, "Cross", Transform::default());
    scene.add_mesh(
        cross,
        "Cross Beam",
        Transform::from_translation(Vec3::new(0.0, 60.0, 0.0)),
        box_geometry(20.0, 20.0, 500.0),
        hex(0x8d99ae),
    );

    let cross_element = scene.add_group(cross, "Cross Element", Transform::default());
    scene.add_mesh(
        cross_element,
        "Cross Element Beam",
        Transform::from_translation(Vec3::new(0.0, 60.0, 0.0)),
        box_geometry(200.0, 20.0, 20.0),
        hex(0x8d99ae),
    );

    Sculpture {
        orbital_cross,
        cross,
        cross_element,
        rates: SpinRates::default(),
    }
}

fn add_planet(scene: &mut Scene, parent: ObjectId, position: Vec3) {
    let planet = scene.add_group(
        parent,
        "Planet",
        Transform::placed(
            position,
            &[
                Quat::from_rotation_x(3.2),
                Quat::from_rotation_y(0.5),
                Quat::from_rotation_y(FRAC_PI_6),
                Quat::from_rotation_x(FRAC_PI_6),
            ],
        ),
    );

    scene.add_mesh(
        planet,
        "Planet Ball",
        Transform::default(),
        sphere(50.0, 20, 20),
        hex(0xd90429),
    );
    scene.add_mesh(
        planet,
        "Planet Torus",
        Transform::default(),
        torus(100.0, 20.0, 30, 30),
        hex(0x457b9d),
    );

    let holders = [
        (-70.0, Some(FRAC_PI_4), "darkorange"),
        (70.0, Some(-FRAC_PI_4), "orangered"),
        (0.0, None, "orange"),
    ];

    for (index, (offset_y, tilt, color)) in holders.into_iter().enumerate() {
        let rotations: Vec<Quat> = tilt.into_iter().map(Quat::from_rotation_x).collect();
        let holder = scene.add_group(
            planet,
            format!("Planet Box Holder {}", index + 1),
            Transform::placed(Vec3::new(15.0, offset_y, 110.0), &rotations),
        );

        scene.add_mesh(
            holder,
            format!("Planet Box {}", index + 1),
            Transform::default(),
            box_geometry(30.0, 30.0, 100.0),
            named(color),
        );
    }
}

fn add_hammer(scene: &mut Scene, parent: ObjectId, position: Vec3) {
    let hammer = scene.add_group(
        parent,
        "Hammer",
        Transform::placed(
            position,
            &[
                Quat::from_rotation_x(FRAC_PI_4),
                Quat::from_rotation_y(-FRAC_PI_4),
            ],
        ),
    );

    // Parts are placed relative to the hammer's own position once more.
    let part = |z: f32| Transform::from_translation(position + Vec3::Z * z);

    scene.add_mesh(
        hammer,
        "Hammer Handle",
        part(95.0),
        box_geometry(20.0, 20.0, 120.0),
        hex(0x90e0ef),
    );
    scene.add_mesh(
        hammer,
        "Hammer Head",
        part(0.0),
        box_geometry(70.0, 70.0, 70.0),
        hex(0xa8dadc),
    );
    scene.add_mesh(
        hammer,
        "Hammer Ball",
        part(200.0),
        sphere(12.0, 10, 10),
        hex(0xd90429),
    );
    scene.add_mesh(
        hammer,
        "Hammer Tip",
        part(250.0),
        sphere(10.0, 10, 10),
        hex(0xef233c),
    );
}

fn add_cones(scene: &mut Scene, parent: ObjectId, position: Vec3) {
    let cones = scene.add_group(
        parent,
        "Cones",
        Transform::placed(position, &[Quat::from_rotation_z(FRAC_PI_4)]),
    );

    let large = scene.add_group(cones, "Large Cone Holder", Transform::from_translation(position));
    scene.add_mesh(
        large,
        "Large Cone",
        Transform::default(),
        cone(100.0, 200.0, 100),
        hex(0xe9c46a),
    );

    let small = scene.add_group(
        cones,
        "Small Cone Holder",
        Transform::placed(
            position + Vec3::Y * 150.0,
            &[Quat::from_rotation_x(PI)],
        ),
    );
    scene.add_mesh(
        small,
        "Small Cone",
        Transform::default(),
        cone(50.0, 100.0, 100),
        hex(0xe9c46a),
    );
}

fn add_cylinder(scene: &mut Scene, parent: ObjectId, position: Vec3) {
    let group = scene.add_group(parent, "Cylinder", Transform::from_translation(position));

    let cylinder_holder = scene.add_group(
        group,
        "Cylinder Holder",
        Transform::placed(
            Vec3::ZERO,
            &[Quat::from_rotation_x(0.5), Quat::from_rotation_z(0.8)],
        ),
    );
    scene.add_mesh(
        cylinder_holder,
        "Cylinder Body",
        Transform::default(),
        cylinder(50.0, 50.0, 120.0, 20),
        hex(0x006d77),
    );

    let tilted = || {
        Transform::placed(
            Vec3::ZERO,
            &[Quat::from_rotation_y(0.8), Quat::from_rotation_z(-0.5)],
        )
    };

    let tube_holder = scene.add_group(group, "Tube Holder", tilted());
    scene.add_mesh(
        tube_holder,
        "Tube",
        Transform::from_translation(Vec3::new(150.0, 50.0, 50.0)),
        tube(&SineCurve::new(40.0), 20, 8.0, 5, false),
        hex(0x023e8a),
    );

    let tetrahedron_holder = scene.add_group(group, "Tetrahedron Holder", tilted());
    scene.add_mesh(
        tetrahedron_holder,
        "Tetrahedron",
        Transform::from_translation(Vec3::new(215.0, 60.0, 50.0)),
        tetrahedron(40.0, 1),
        hex(0x52796f),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Topology;

    fn built() -> (Scene, Sculpture) {
        let mut scene = Scene::new();
        let sculpture = Sculpture::build(&mut scene);
        scene.late_update();
        (scene, sculpture)
    }

    fn child_names(scene: &Scene, id: ObjectId) -> Vec<String> {
        scene
            .get_object(id)
            .unwrap()
            .children(scene)
            .map(|child| child.name.clone())
            .collect()
    }

    #[test]
    fn top_level_layout() {
        let (scene, _) = built();

        assert_eq!(
            child_names(&scene, scene.root()),
            ["Axes", "Kandinsky", "Cylinder"]
        );

        let kandinsky = scene.get_object_by_name("Kandinsky").unwrap();
        assert_eq!(
            child_names(&scene, kandinsky),
            ["Orbital Cross", "Planet", "Hammer", "Cones"]
        );
    }

    #[test]
    fn articulated_joints_are_nested() {
        let (scene, sculpture) = built();

        let cross = scene.get_object(sculpture.cross).unwrap();
        let element = scene.get_object(sculpture.cross_element).unwrap();

        assert_eq!(cross.parent_id, Some(sculpture.orbital_cross));
        assert_eq!(element.parent_id, Some(sculpture.cross));
        assert_eq!(sculpture.rates, SpinRates::default());
    }

    #[test]
    fn hammer_parts_carry_the_offset_twice() {
        let (scene, _) = built();

        let hammer = scene.get_object_by_name("Hammer").unwrap();
        let head = scene.get_object_by_name("Hammer Head").unwrap();

        let hammer_world = scene.world_matrix(hammer).unwrap();
        let head_world = scene.world_matrix(head).unwrap();

        let expected = hammer_world.transform_point3(Vec3::new(100.0, 100.0, -200.0));
        assert!(head_world
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(expected, 1e-3));
    }

    #[test]
    fn only_axes_are_line_meshes() {
        let (scene, _) = built();

        let line_meshes: Vec<_> = scene
            .renderables()
            .filter(|(_, mesh)| mesh.geometry.topology == Topology::Lines)
            .map(|(object, _)| object.name.clone())
            .collect();

        assert_eq!(line_meshes, ["Axis X", "Axis Y", "Axis Z"]);
        assert_eq!(scene.renderables().count(), 3 + 3 + 5 + 4 + 2 + 3);
    }

    #[test]
    fn planet_boxes_use_named_colors() {
        let (scene, _) = built();

        let box_color = |name: &str| {
            let id = scene.get_object_by_name(name).unwrap();
            let mesh_id = scene.get_object(id).unwrap().mesh_id.unwrap();
            scene.get_mesh(mesh_id).unwrap().material.color
        };

        assert_eq!(box_color("Planet Box 1"), Color::from_hex(0xff8c00));
        assert_eq!(box_color("Planet Box 2"), Color::from_hex(0xff4500));
        assert_eq!(box_color("Planet Box 3"), Color::from_hex(0xffa500));
    }
}
