//! Bone chain spanning a page from the spine to the free edge.
//!
//! The chain is a strict linear hierarchy: joint `k` is the only child of
//! joint `k - 1`. Joints are stored in a flat array holding a fixed offset
//! from the parent and the current rotation about the page's up axis, and
//! world transforms are produced by a single forward accumulation pass.
//!
//! The chain also carries the page's stack offset. It is applied after the
//! root rotation, so it always lies along the page normal and separates
//! stacked pages whichever way they have swung.

use glam::{Affine3A, Mat4, Quat, Vec3};
use tracing::debug;

use crate::geometry::PageGeometry;

/// A single joint of the page rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    /// Rest offset from the parent joint along the bend axis (+X)
    pub offset: f32,
    /// Current rotation about the up axis (+Y), in radians.
    ///
    /// This is the damped state driven by the curvature solver.
    pub angle: f32,
}

/// Linear chain of `N + 1` joints.
///
/// The default chain is empty and stands for a rig that has not been built
/// yet; solver ticks on it do nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoneChain {
    joints: Vec<Joint>,
    segment_width: f32,
    /// Offset of the whole page along the root joint's local +Z
    normal_offset: f32,
}

impl BoneChain {
    /// Build a chain of `segments + 1` joints spanning `width`.
    ///
    /// Joint 0 sits at the spine with no offset; every other joint is offset
    /// by `width / segments` from its parent. A zero segment count is
    /// treated as one segment.
    pub fn new(width: f32, segments: usize) -> Self {
        let segments = segments.max(1);
        let segment_width = width / segments as f32;

        let joints = (0..=segments)
            .map(|k| Joint {
                offset: if k == 0 { 0.0 } else { segment_width },
                angle: 0.0,
            })
            .collect();

        debug!(
            "Built page rig: {} joints, segment width {:.5}",
            segments + 1,
            segment_width
        );

        Self {
            joints,
            segment_width,
            normal_offset: 0.0,
        }
    }

    pub fn from_geometry(geometry: &PageGeometry) -> Self {
        Self::new(geometry.width(), geometry.segments())
    }

    /// Number of joints (N + 1 for a built chain).
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Number of bend segments (N).
    pub fn segments(&self) -> usize {
        self.joints.len().saturating_sub(1)
    }

    pub fn segment_width(&self) -> f32 {
        self.segment_width
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub(crate) fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn normal_offset(&self) -> f32 {
        self.normal_offset
    }

    /// Move the page along its normal, e.g. to its place in the stack.
    pub fn set_normal_offset(&mut self, offset: f32) {
        self.normal_offset = offset;
    }

    /// Translation of joint `index` relative to its parent.
    ///
    /// For the root this includes the normal offset, rotated with the root.
    pub fn local_translation(&self, index: usize) -> Vec3 {
        let Some(joint) = self.joints.get(index) else {
            return Vec3::ZERO;
        };
        let translation = Vec3::X * joint.offset;
        if index == 0 {
            translation + Quat::from_rotation_y(joint.angle) * Vec3::Z * self.normal_offset
        } else {
            translation
        }
    }

    /// Current joint angles in chain order.
    pub fn angles(&self) -> impl Iterator<Item = f32> + '_ {
        self.joints.iter().map(|joint| joint.angle)
    }

    /// Parent of joint `index`. The root has none.
    pub fn parent(&self, index: usize) -> Option<usize> {
        (index > 0 && index < self.joints.len()).then(|| index - 1)
    }

    /// The single child of joint `index`. The last joint has none.
    pub fn child(&self, index: usize) -> Option<usize> {
        (index + 1 < self.joints.len()).then_some(index + 1)
    }

    /// Return every joint to the flat rest pose.
    pub fn reset(&mut self) {
        for joint in &mut self.joints {
            joint.angle = 0.0;
        }
    }

    /// World transforms (relative to the page root) for every joint.
    pub fn world_transforms(&self) -> Vec<Affine3A> {
        let mut world = Vec::with_capacity(self.joints.len());
        let mut accumulated = Affine3A::IDENTITY;
        for (k, joint) in self.joints.iter().enumerate() {
            let local = Affine3A::from_rotation_translation(
                Quat::from_rotation_y(joint.angle),
                self.local_translation(k),
            );
            accumulated = accumulated * local;
            world.push(accumulated);
        }
        world
    }

    pub fn world_matrices(&self) -> Vec<Mat4> {
        self.world_transforms().into_iter().map(Mat4::from).collect()
    }

    /// Inverse of each joint's rest-pose world transform.
    ///
    /// At rest every joint is a pure translation along +X, so the inverse
    /// bind pose of joint `k` translates by the negated cumulative offset.
    /// The normal offset is not part of the bind pose.
    pub fn inverse_bind_matrices(&self) -> Vec<Mat4> {
        let mut distance = 0.0;
        self.joints
            .iter()
            .map(|joint| {
                distance += joint.offset;
                Mat4::from_translation(Vec3::new(-distance, 0.0, 0.0))
            })
            .collect()
    }

    /// Per-joint skinning matrices (`world * inverse_bind`).
    pub fn skinning_matrices(&self) -> Vec<Mat4> {
        self.world_matrices()
            .into_iter()
            .zip(self.inverse_bind_matrices())
            .map(|(world, inverse_bind)| world * inverse_bind)
            .collect()
    }

    /// World position of the last joint (the free edge at mid height).
    pub fn tip(&self) -> Vec3 {
        self.world_transforms()
            .last()
            .map(|transform| Vec3::from(transform.translation))
            .unwrap_or(Vec3::ZERO)
    }
}
