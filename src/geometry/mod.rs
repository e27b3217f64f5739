//! CPU-side geometry for the primitive shapes the sculpture is made of.
//!
//! All generators produce indexed triangle lists with counter-clockwise front faces.

pub mod curve;
pub mod polyhedron;
pub mod primitives;
pub mod tube;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use itertools::Itertools;

pub use curve::{Curve, SineCurve};
pub use polyhedron::tetrahedron;
pub use primitives::{box_geometry, cone, cylinder, sphere, torus};
pub use tube::tube;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Geometry {
    pub fn triangles(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            topology: Topology::Triangles,
        }
    }

    /// Line list through consecutive pairs of `points`.
    pub fn line_segments(points: &[Vec3]) -> Self {
        let vertices = points
            .iter()
            .map(|&point| Vertex::new(point, Vec3::ZERO))
            .collect();
        let indices = (0..points.len() as u32).collect();

        Self {
            vertices,
            indices,
            topology: Topology::Lines,
        }
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }

    /// Line-list indices drawn in wireframe mode: every undirected triangle edge once.
    pub fn edge_indices(&self) -> Vec<u32> {
        match self.topology {
            Topology::Lines => self.indices.clone(),
            Topology::Triangles => self
                .indices
                .chunks_exact(3)
                .flat_map(|triangle| {
                    let [a, b, c] = [triangle[0], triangle[1], triangle[2]];
                    [(a, b), (b, c), (c, a)]
                })
                .map(|(a, b)| (a.min(b), a.max(b)))
                .unique()
                .flat_map(|(a, b)| [a, b])
                .collect(),
        }
    }
}
