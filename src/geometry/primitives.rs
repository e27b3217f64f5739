use std::f32::consts::{PI, TAU};

use glam::Vec3;
use itertools::iproduct;

use super::{Geometry, Vertex};

/// Axis-aligned box centered at the origin, one quad per face.
pub fn box_geometry(width: f32, height: f32, depth: f32) -> Geometry {
    let half = Vec3::new(width, height, depth) / 2.0;

    // (normal, u axis, v axis) with u × v = normal, so every face winds counter-clockwise.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        let center = normal * half;

        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = center + u * half * su + v * half * sv;
            vertices.push(Vertex::new(position, normal));
        }

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Geometry::triangles(vertices, indices)
}

/// UV sphere. The degenerate triangles touching the poles are skipped.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row = width_segments + 1;

    let vertices = iproduct!(0..=height_segments, 0..=width_segments)
        .map(|(iy, ix)| {
            let u = ix as f32 / width_segments as f32;
            let v = iy as f32 / height_segments as f32;

            let normal = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );

            Vertex::new(normal * radius, normal)
        })
        .collect();

    let mut indices = Vec::new();

    for (iy, ix) in iproduct!(0..height_segments, 0..width_segments) {
        let a = iy * row + ix + 1;
        let b = iy * row + ix;
        let c = (iy + 1) * row + ix;
        let d = (iy + 1) * row + ix + 1;

        if iy != 0 {
            indices.extend_from_slice(&[a, b, d]);
        }
        if iy != height_segments - 1 {
            indices.extend_from_slice(&[b, c, d]);
        }
    }

    Geometry::triangles(vertices, indices)
}

/// Capped cylinder along Y with a single height segment. A cap with zero radius is left out.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let half_height = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for (radius, y) in [(radius_top, half_height), (radius_bottom, -half_height)] {
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();

            vertices.push(Vertex::new(
                Vec3::new(radius * sin, y, radius * cos),
                Vec3::new(sin, slope, cos).normalize(),
            ));
        }
    }

    let row = radial_segments + 1;
    for x in 0..radial_segments {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;

        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    if radius_top > 0.0 {
        add_cap(&mut vertices, &mut indices, radius_top, half_height, radial_segments, true);
    }
    if radius_bottom > 0.0 {
        add_cap(&mut vertices, &mut indices, radius_bottom, -half_height, radial_segments, false);
    }

    Geometry::triangles(vertices, indices)
}

fn add_cap(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    radial_segments: u32,
    top: bool,
) {
    let normal = if top { Vec3::Y } else { Vec3::NEG_Y };

    // One center vertex per segment keeps the fan independent of the ring's seam.
    let center_start = vertices.len() as u32;
    for _ in 0..radial_segments {
        vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal));
    }

    let ring_start = vertices.len() as u32;
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        vertices.push(Vertex::new(Vec3::new(radius * sin, y, radius * cos), normal));
    }

    for x in 0..radial_segments {
        let center = center_start + x;
        let i = ring_start + x;

        if top {
            indices.extend_from_slice(&[i, i + 1, center]);
        } else {
            indices.extend_from_slice(&[i + 1, i, center]);
        }
    }
}

/// Cone along Y with its apex at `height / 2` and a capped base.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    cylinder(0.0, radius, height, radial_segments)
}

/// Torus in the XY plane around the Z axis.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);
    let row = tubular_segments + 1;

    let vertices = iproduct!(0..=radial_segments, 0..=tubular_segments)
        .map(|(j, i)| {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let v = j as f32 / radial_segments as f32 * TAU;

            let ring = radius + tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);

            Vertex::new(position, (position - center).normalize())
        })
        .collect();

    let mut indices = Vec::new();

    for (j, i) in iproduct!(1..=radial_segments, 1..=tubular_segments) {
        let a = row * j + i - 1;
        let b = row * (j - 1) + i - 1;
        let c = row * (j - 1) + i;
        let d = row * j + i;

        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    Geometry::triangles(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs(geometry: &Geometry) -> Vec3 {
        geometry
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, vertex| acc.max(vertex.position.abs()))
    }

    #[test]
    fn box_has_one_quad_per_face() {
        let geometry = box_geometry(20.0, 20.0, 500.0);

        assert_eq!(geometry.vertices.len(), 24);
        assert_eq!(geometry.indices.len(), 36);
        assert!(max_abs(&geometry).abs_diff_eq(Vec3::new(10.0, 10.0, 250.0), 1e-4));
        // Four outline edges and one diagonal per face, faces do not share vertices.
        assert_eq!(geometry.edge_indices().len(), 6 * 5 * 2);
    }

    #[test]
    fn box_faces_wind_outwards() {
        let geometry = box_geometry(2.0, 2.0, 2.0);

        for triangle in geometry.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| geometry.vertices[triangle[k] as usize]);
            let face_normal = (b.position - a.position).cross(c.position - a.position);
            assert!(face_normal.dot(a.normal) > 0.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let geometry = sphere(50.0, 20, 20);

        assert_eq!(geometry.vertices.len(), 21 * 21);
        // Two triangles per quad, minus one per quad on each pole row.
        assert_eq!(geometry.triangle_count(), 20 * 20 * 2 - 2 * 20);
        for vertex in &geometry.vertices {
            assert!((vertex.position.length() - 50.0).abs() < 1e-3);
        }
    }

    #[test]
    fn cone_has_apex_and_base_cap_only() {
        let geometry = cone(100.0, 200.0, 100);

        // Side: two rings of 101. Base cap: 100 centers plus a ring of 101.
        assert_eq!(geometry.vertices.len(), 2 * 101 + 100 + 101);
        assert_eq!(geometry.triangle_count(), 100 * 2 + 100);

        let apex_ring = &geometry.vertices[..101];
        assert!(apex_ring
            .iter()
            .all(|vertex| vertex.position.abs_diff_eq(Vec3::new(0.0, 100.0, 0.0), 1e-4)));
    }

    #[test]
    fn cylinder_spans_its_height() {
        let geometry = cylinder(50.0, 50.0, 120.0, 20);

        assert_eq!(geometry.triangle_count(), 20 * 2 + 20 * 2);
        assert!(max_abs(&geometry).abs_diff_eq(Vec3::new(50.0, 60.0, 50.0), 1e-3));
    }

    #[test]
    fn torus_stays_within_tube() {
        let geometry = torus(100.0, 20.0, 30, 30);

        assert_eq!(geometry.vertices.len(), 31 * 31);
        assert_eq!(geometry.triangle_count(), 30 * 30 * 2);
        for vertex in &geometry.vertices {
            let ring_distance = vertex.position.truncate().length() - 100.0;
            let tube_distance = Vec3::new(ring_distance, vertex.position.z, 0.0).length();
            assert!((tube_distance - 20.0).abs() < 1e-3);
        }
    }
}
