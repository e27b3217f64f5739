use std::f32::consts::TAU;

use itertools::iproduct;

use super::{Curve, Geometry, Vertex};

/// Sweeps a circle of `radius` along `curve`.
pub fn tube(
    curve: &impl Curve,
    tubular_segments: u32,
    radius: f32,
    radial_segments: u32,
    closed: bool,
) -> Geometry {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let frames = curve.frenet_frames(tubular_segments as usize, closed);

    let mut vertices = Vec::with_capacity(((tubular_segments + 1) * (radial_segments + 1)) as usize);

    for i in 0..=tubular_segments {
        // A closed tube reuses the first ring so the seam matches exactly.
        let sample = if closed && i == tubular_segments { 0 } else { i };
        let center = curve.point_at(sample as f32 / tubular_segments as f32);
        let normal = frames.normals[sample as usize];
        let binormal = frames.binormals[sample as usize];

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = (v.sin(), -v.cos());

            let direction = (normal * cos + binormal * sin).normalize();
            vertices.push(Vertex::new(center + direction * radius, direction));
        }
    }

    let row = radial_segments + 1;
    let mut indices = Vec::with_capacity((tubular_segments * radial_segments * 6) as usize);

    for (j, i) in iproduct!(1..=tubular_segments, 1..=radial_segments) {
        let a = row * (j - 1) + (i - 1);
        let b = row * j + (i - 1);
        let c = row * j + i;
        let d = row * (j - 1) + i;

        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    Geometry::triangles(vertices, indices)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::SineCurve;

    #[test]
    fn tube_rings_surround_the_path() {
        let curve = SineCurve::new(40.0);
        let geometry = tube(&curve, 20, 8.0, 5, false);

        assert_eq!(geometry.vertices.len(), 21 * 6);
        assert_eq!(geometry.triangle_count(), 20 * 5 * 2);

        for (ring_index, ring) in geometry.vertices.chunks_exact(6).enumerate() {
            let center = curve.point_at(ring_index as f32 / 20.0);
            for vertex in ring {
                assert!((vertex.position.distance(center) - 8.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn open_tube_ends_at_curve_endpoints() {
        let curve = SineCurve::new(40.0);
        let geometry = tube(&curve, 20, 8.0, 5, false);

        let first_ring_center = geometry.vertices[..5]
            .iter()
            .fold(Vec3::ZERO, |sum, vertex| sum + vertex.position)
            / 5.0;

        assert!(first_ring_center.abs_diff_eq(curve.point(0.0), 1e-2));
    }
}
