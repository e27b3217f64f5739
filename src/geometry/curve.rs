use std::f32::consts::TAU;

use glam::{Quat, Vec3};

const ARC_LENGTH_DIVISIONS: usize = 200;
const TANGENT_DELTA: f32 = 1e-4;

/// Orthonormal frames along a curve, one per sample.
#[derive(Debug, Clone)]
pub struct FrenetFrames {
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

/// Parametric 3D curve over `t ∈ [0, 1]`.
///
/// `point` and `tangent` use the raw parameter. The `*_at` variants take `u ∈ [0, 1]` as a
/// fraction of the arc length, so equal steps in `u` cover equal distances.
pub trait Curve {
    fn point(&self, t: f32) -> Vec3;

    fn tangent(&self, t: f32) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);

        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    /// Cumulative polyline lengths over `divisions` equal parameter steps. The first entry is 0.
    fn lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;

        lengths.push(0.0);

        for step in 1..=divisions {
            let current = self.point(step as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }

        lengths
    }

    /// Maps an arc-length fraction to the raw curve parameter.
    fn arc_length_to_t(&self, u: f32) -> f32 {
        let lengths = self.lengths(ARC_LENGTH_DIVISIONS);
        let last_index = lengths.len() - 1;
        let total = lengths[last_index];

        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * total;

        // Last sample whose cumulative length does not exceed the target.
        let i = lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(last_index);

        if i == last_index || lengths[i] == target {
            return i as f32 / last_index as f32;
        }

        let segment_length = lengths[i + 1] - lengths[i];
        let segment_fraction = (target - lengths[i]) / segment_length;

        (i as f32 + segment_fraction) / last_index as f32
    }

    fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.arc_length_to_t(u))
    }

    fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.arc_length_to_t(u))
    }

    /// Parallel-transported frames at `segments + 1` evenly spaced arc-length samples.
    fn frenet_frames(&self, segments: usize, closed: bool) -> FrenetFrames {
        let tangents: Vec<Vec3> = (0..=segments)
            .map(|i| self.tangent_at(i as f32 / segments as f32))
            .collect();

        let mut normals = Vec::with_capacity(segments + 1);
        let mut binormals = Vec::with_capacity(segments + 1);

        // Seed the first normal with the world axis least aligned with the tangent.
        let first = tangents[0];
        let abs = first.abs();
        let mut seed = Vec3::X;
        let mut min = abs.x;
        if abs.y <= min {
            min = abs.y;
            seed = Vec3::Y;
        }
        if abs.z <= min {
            seed = Vec3::Z;
        }

        let side = first.cross(seed).normalize_or_zero();
        normals.push(first.cross(side));
        binormals.push(first.cross(normals[0]));

        for i in 1..=segments {
            let mut normal = normals[i - 1];

            let axis = tangents[i - 1].cross(tangents[i]);
            if axis.length() > f32::EPSILON {
                let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
                normal = Quat::from_axis_angle(axis.normalize(), theta) * normal;
            }

            normals.push(normal);
            binormals.push(tangents[i].cross(normal));
        }

        if closed {
            let mut theta = normals[0]
                .dot(normals[segments])
                .clamp(-1.0, 1.0)
                .acos()
                / segments as f32;

            if tangents[0].dot(normals[0].cross(normals[segments])) > 0.0 {
                theta = -theta;
            }

            for i in 1..=segments {
                normals[i] = Quat::from_axis_angle(tangents[i], theta * i as f32) * normals[i];
                binormals[i] = tangents[i].cross(normals[i]);
            }
        }

        FrenetFrames {
            normals,
            binormals,
        }
    }
}

/// One period of a sine wave along X: `t ↦ (3t − 1.5, sin 2πt, 0) · scale`.
#[derive(Debug, Clone, Copy)]
pub struct SineCurve {
    pub scale: f32,
}

impl SineCurve {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Curve for SineCurve {
    fn point(&self, t: f32) -> Vec3 {
        Vec3::new(t * 3.0 - 1.5, (TAU * t).sin(), 0.0) * self.scale
    }
}
