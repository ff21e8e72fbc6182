//! Skin bindings between sheet vertices and the bone chain.
//!
//! Every vertex is bound to the two joints bracketing its position along the
//! bend axis, with weights interpolating linearly between them. The binding
//! uses the common 4-slot layout (the last two slots are always zero) so it
//! can be uploaded to GPU skinning as-is.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Joint indices and weights for one vertex (GPU-compatible with bytemuck).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SkinBinding {
    pub joints: [u16; 4],
    pub weights: [f32; 4],
}

impl SkinBinding {
    /// Sum of all four weights. Always 1 for bindings built by [`bind_vertex`].
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Apply linear blend skinning to a rest-pose point.
    ///
    /// Missing matrices are treated as identity.
    pub fn skin_point(&self, point: Vec3, matrices: &[Mat4]) -> Vec3 {
        self.joints
            .iter()
            .zip(self.weights)
            .filter(|(_, weight)| *weight != 0.0)
            .map(|(&joint, weight)| {
                joint_matrix(matrices, joint).transform_point3(point) * weight
            })
            .sum()
    }

    pub fn skin_vector(&self, vector: Vec3, matrices: &[Mat4]) -> Vec3 {
        self.joints
            .iter()
            .zip(self.weights)
            .filter(|(_, weight)| *weight != 0.0)
            .map(|(&joint, weight)| {
                joint_matrix(matrices, joint).transform_vector3(vector) * weight
            })
            .sum()
    }
}

/// Bind a vertex at bend-axis coordinate `x` to a chain spanning `width`.
///
/// The segment is `floor(x / (width / segments))` clamped to
/// `[0, segments - 1]`; the blend fraction is the remaining distance into
/// that segment, so a vertex on a joint boundary binds fully to that joint
/// and the free edge binds fully to the last joint.
pub fn bind_vertex(x: f32, width: f32, segments: usize) -> SkinBinding {
    let segments = segments.max(1);
    let segment_width = width / segments as f32;

    let raw = (x / segment_width).floor();
    let segment = if raw.is_finite() && raw > 0.0 {
        (raw as usize).min(segments - 1)
    } else {
        0
    };

    let mut fraction = (x - segment as f32 * segment_width) / segment_width;
    if !fraction.is_finite() {
        fraction = 0.0;
    }
    let fraction = fraction.clamp(0.0, 1.0);

    SkinBinding {
        joints: [segment as u16, (segment + 1) as u16, 0, 0],
        weights: [1.0 - fraction, fraction, 0.0, 0.0],
    }
}

/// Bind every position of a sheet laid out along +X from the spine.
pub fn bind_positions(positions: &[Vec3], width: f32, segments: usize) -> Vec<SkinBinding> {
    positions
        .iter()
        .map(|position| bind_vertex(position.x, width, segments))
        .collect()
}

/// Deform rest-pose positions on the CPU with the given skinning matrices.
pub fn skin_positions(
    positions: &[Vec3],
    bindings: &[SkinBinding],
    matrices: &[Mat4],
) -> Vec<Vec3> {
    positions
        .iter()
        .zip(bindings)
        .map(|(&position, binding)| binding.skin_point(position, matrices))
        .collect()
}

fn joint_matrix(matrices: &[Mat4], joint: u16) -> Mat4 {
    matrices.get(joint as usize).copied().unwrap_or(Mat4::IDENTITY)
}
