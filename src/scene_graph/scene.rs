use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;

use crate::geometry::Geometry;
use crate::material::BasicMaterial;
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::scene_mesh::{SceneMesh, SceneMeshId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
    pub meshes: Arena<SceneMesh>,
    root: ObjectId,
    // Objects carrying a mesh, in insertion order.
    renderables: Vec<ObjectId>,
    // Meshes whose material follows the global wireframe switch.
    wireframe_meshes: Vec<SceneMeshId>,
}

impl Scene {
    pub fn new() -> Self {
        let mut objects = Arena::new();
        let root = objects.alloc(Object3D::new("Scene", Transform::default()));

        Self {
            objects,
            meshes: Arena::new(),
            root,
            renderables: Vec::new(),
            wireframe_meshes: Vec::new(),
        }
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    /// Adds an empty transform node under `parent`.
    pub fn add_group(
        &mut self,
        parent: ObjectId,
        name: impl Into<String>,
        transform: Transform,
    ) -> ObjectId {
        self.add_child_object(parent, Object3D::new(name, transform))
    }

    /// Adds a node under `parent` that draws `geometry` with `material`.
    pub fn add_mesh(
        &mut self,
        parent: ObjectId,
        name: impl Into<String>,
        transform: Transform,
        geometry: Geometry,
        material: BasicMaterial,
    ) -> ObjectId {
        let name = name.into();
        let mesh = SceneMesh::new(name.clone(), geometry, material);
        let honors_wireframe = mesh.honors_wireframe();
        let mesh_id = self.meshes.alloc(mesh);

        if honors_wireframe {
            self.wireframe_meshes.push(mesh_id);
        }

        let mut object = Object3D::new(name, transform);
        object.mesh_id = Some(mesh_id);

        let object_id = self.add_child_object(parent, object);
        self.renderables.push(object_id);
        object_id
    }

    fn add_child_object(&mut self, parent: ObjectId, object: Object3D) -> ObjectId {
        let object_id = self.add_object(object);
        self.set_object_parent(object_id, Some(parent));
        object_id
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    /// Objects that carry a mesh, paired with it.
    pub fn renderables(&self) -> impl Iterator<Item = (&Object3D, &SceneMesh)> + '_ {
        self.renderables.iter().filter_map(|&object_id| {
            let object = self.objects.get(object_id)?;
            let mesh = self.meshes.get(object.mesh_id?)?;
            Some((object, mesh))
        })
    }

    /// Overwrites the wireframe flag of every mesh that honours it.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        for &mesh_id in &self.wireframe_meshes {
            if let Some(mesh) = self.meshes.get_mut(mesh_id) {
                mesh.material.wireframe = wireframe;
            }
        }
    }

    /// Updates all object transforms in hierarchical order
    fn update_transforms(&self) {
        let root_objects = self.objects.iter().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        });

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    /// Recursively updates an object's world transform and its children
    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            // Only update if the world transform is dirty
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                let world_matrix = parent_world_matrix * local_matrix;
                object.transform.set_world_matrix(world_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        // Remove from old parent's children list
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        // Set new parent and add to new parent's children list
        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_object_hierarchy(child_id);
    }

    /// Rotates an object about its own axes.
    pub fn rotate_object(&mut self, object_id: ObjectId, rotation: Quat) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.rotate(rotation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    /// Moves an object along its own axes.
    pub fn translate_object_local(&mut self, object_id: ObjectId, delta: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.translate_local(delta);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    /// Indented outline of the hierarchy below `object_id`, one node per line.
    pub fn outline(&self, object_id: ObjectId) -> String {
        let mut outline = String::new();

        if let Some(object) = self.get_object(object_id) {
            self.outline_recursive(object, 0, &mut outline);
        }

        outline
    }

    fn outline_recursive(&self, object: &Object3D, depth: usize, outline: &mut String) {
        outline.push_str(&"  ".repeat(depth));
        outline.push_str(&object.name);
        outline.push('\n');

        for child in object.children(self) {
            self.outline_recursive(child, depth + 1, outline);
        }
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}

#[cfg(test)]
impl Scene {
    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn get_mesh(&self, id: SceneMeshId) -> Option<&SceneMesh> {
        self.meshes.get(id)
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    /// World matrix as of the last `late_update`.
    pub fn world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        self.get_object_transform(object_id)
            .map(|transform| *transform.get_world_matrix())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::geometry::{box_geometry, Geometry};
    use crate::material::Color;

    fn material() -> BasicMaterial {
        BasicMaterial::new(Color::from_hex(0x8d99ae))
    }

    #[test]
    fn children_follow_parent_transform() {
        let mut scene = Scene::new();
        let parent = scene.add_group(
            scene.root(),
            "Parent",
            Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)),
        );
        let child = scene.add_mesh(
            parent,
            "Child",
            Transform::from_translation(Vec3::new(0.0, 60.0, 0.0)),
            box_geometry(1.0, 1.0, 1.0),
            material(),
        );

        scene.late_update();
        let world = scene.world_matrix(child).unwrap();
        assert!(world
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(10.0, 60.0, 0.0), 1e-4));

        scene.rotate_object(parent, Quat::from_rotation_z(FRAC_PI_2));
        scene.late_update();
        let world = scene.world_matrix(child).unwrap();
        assert!(world
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(-50.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn reparenting_moves_child_lists() {
        let mut scene = Scene::new();
        let a = scene.add_group(scene.root(), "A", Transform::default());
        let b = scene.add_group(scene.root(), "B", Transform::default());
        let leaf = scene.add_group(a, "Leaf", Transform::default());

        scene.set_object_parent(leaf, Some(b));

        assert!(scene.get_object(a).unwrap().child_ids.is_empty());
        assert_eq!(scene.get_object(b).unwrap().child_ids, vec![leaf]);
        assert_eq!(scene.get_object(leaf).unwrap().parent_id, Some(b));
        assert_eq!(scene.get_object_by_name("Leaf"), Some(leaf));
    }

    #[test]
    fn wireframe_switch_skips_line_helpers() {
        let mut scene = Scene::new();
        let root = scene.root();
        let cube = scene.add_mesh(
            root,
            "Cube",
            Transform::default(),
            box_geometry(1.0, 1.0, 1.0),
            material(),
        );
        let axis = scene.add_mesh(
            root,
            "Axis",
            Transform::default(),
            Geometry::line_segments(&[Vec3::ZERO, Vec3::X]),
            BasicMaterial {
                color: Color::from_hex(0xff0000),
                wireframe: false,
            },
        );

        scene.set_wireframe(false);
        let mesh_of = |scene: &Scene, id: ObjectId| {
            let mesh_id = scene.get_object(id).unwrap().mesh_id.unwrap();
            (
                scene.get_mesh(mesh_id).unwrap().material,
                scene.get_mesh(mesh_id).unwrap().draws_lines(),
            )
        };
        assert!(!mesh_of(&scene, cube).1);

        scene.set_wireframe(true);
        assert!(mesh_of(&scene, cube).0.wireframe);
        assert!(!mesh_of(&scene, axis).0.wireframe);
        assert!(mesh_of(&scene, axis).1);
        assert_eq!(scene.renderables().count(), 2);
    }

    #[test]
    fn outline_lists_hierarchy() {
        let mut scene = Scene::new();
        let group = scene.add_group(scene.root(), "Group", Transform::default());
        scene.add_group(group, "Leaf", Transform::default());

        assert_eq!(scene.outline(scene.root()), "Scene\n  Group\n    Leaf\n");
    }
}
