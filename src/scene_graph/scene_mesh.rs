use id_arena::Id;

use crate::geometry::{Geometry, Topology};
use crate::material::BasicMaterial;
use crate::rendering::render_mesh::RenderMeshId;

pub type SceneMeshId = Id<SceneMesh>;

/// Geometry and material pair attached to a single scene object.
pub struct SceneMesh {
    pub name: String,
    pub geometry: Geometry,
    pub material: BasicMaterial,
    pub render_mesh: Option<RenderMeshId>,
}

impl SceneMesh {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: BasicMaterial) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            render_mesh: None,
        }
    }

    /// Whether the global wireframe switch applies. Line helpers are always drawn as lines.
    pub fn honors_wireframe(&self) -> bool {
        self.geometry.topology == Topology::Triangles
    }

    pub fn draws_lines(&self) -> bool {
        self.material.wireframe || self.geometry.topology == Topology::Lines
    }
}
