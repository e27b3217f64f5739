use glam::Vec3;

use super::{Geometry, Vertex};

const TETRAHEDRON_VERTICES: [Vec3; 4] = [
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
];

const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

/// Regular tetrahedron inscribed in a sphere of `radius`. Each face is split into
/// `(detail + 1)²` triangles whose corners are pushed out onto the sphere.
pub fn tetrahedron(radius: f32, detail: u32) -> Geometry {
    polyhedron(&TETRAHEDRON_VERTICES, &TETRAHEDRON_FACES, radius, detail)
}

fn polyhedron(corners: &[Vec3], faces: &[[usize; 3]], radius: f32, detail: u32) -> Geometry {
    let mut positions = Vec::new();

    for face in faces {
        let [a, b, c] = face.map(|index| corners[index]);
        subdivide_face(&mut positions, a, b, c, detail);
    }

    let vertices: Vec<Vertex> = positions
        .into_iter()
        .map(|position| {
            let normal = position.normalize();
            Vertex::new(normal * radius, normal)
        })
        .collect();
    let indices = (0..vertices.len() as u32).collect();

    Geometry::triangles(vertices, indices)
}

fn subdivide_face(positions: &mut Vec<Vec3>, a: Vec3, b: Vec3, c: Vec3, detail: u32) {
    let cols = detail as usize + 1;

    // grid[i][j]: row i walks from edge ab towards c, column j across the row.
    let grid: Vec<Vec<Vec3>> = (0..=cols)
        .map(|i| {
            let row_start = a.lerp(c, i as f32 / cols as f32);
            let row_end = b.lerp(c, i as f32 / cols as f32);
            let rows = cols - i;

            (0..=rows)
                .map(|j| {
                    if rows == 0 {
                        row_start
                    } else {
                        row_start.lerp(row_end, j as f32 / rows as f32)
                    }
                })
                .collect()
        })
        .collect();

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;

            if j % 2 == 0 {
                positions.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                positions.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_zero_is_four_faces() {
        let geometry = tetrahedron(40.0, 0);

        assert_eq!(geometry.triangle_count(), 4);
        assert_eq!(geometry.vertices.len(), 12);
    }

    #[test]
    fn detail_one_splits_each_face_in_four() {
        let geometry = tetrahedron(40.0, 1);

        assert_eq!(geometry.triangle_count(), 16);
        for vertex in &geometry.vertices {
            assert!((vertex.position.length() - 40.0).abs() < 1e-3);
        }
    }

    #[test]
    fn faces_point_away_from_center() {
        let geometry = tetrahedron(1.0, 1);

        for triangle in geometry.vertices.chunks_exact(3) {
            let normal = (triangle[1].position - triangle[0].position)
                .cross(triangle[2].position - triangle[0].position);
            let centroid =
                (triangle[0].position + triangle[1].position + triangle[2].position) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }
}
