//! Curvature solver: per-frame target pose and damping for one page.
//!
//! # Target pose
//!
//! The page swings toward `-90deg` once opened and `+90deg` while closed.
//! While the book is shut on a cover the root joint carries the whole swing
//! and every other joint lies flat. While reading, the swing is spread over
//! the chain as two profiles:
//!
//! - an inside curve (`sin`) on the joints before the transition joint,
//!   curling the sheet near the spine;
//! - an outside curve (`cos`) on the joints after it, bending the free edge
//!   gently back the other way.
//!
//! The transition joint itself receives no curl. Resting pages also add a
//! small per-page fan angle so neighbouring pages do not coincide.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{
    CURVE_TRANSITION_JOINT, EASING_FACTOR, INSIDE_CURVE_STRENGTH, OUTSIDE_CURVE_STRENGTH,
    PAGE_FAN_DEGREES, SNAP_EPSILON,
};
use crate::damp::damp_angle;
use crate::rig::BoneChain;
use crate::stack::PageState;

/// Tunables of the page curl.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlProfile {
    /// Damping smooth time in seconds
    pub smooth_time: f32,
    pub inside_strength: f32,
    pub outside_strength: f32,
    /// Joint between the two curves; it is left flat
    pub transition_joint: usize,
    pub inside_frequency: f32,
    pub inside_phase: f32,
    pub outside_frequency: f32,
    pub outside_phase: f32,
    /// Extra swing per page index while reading, in degrees
    pub fan_degrees: f32,
    /// Snap distance of the damper, in radians
    pub snap_epsilon: f32,
}

impl Default for CurlProfile {
    fn default() -> Self {
        Self {
            smooth_time: EASING_FACTOR,
            inside_strength: INSIDE_CURVE_STRENGTH,
            outside_strength: OUTSIDE_CURVE_STRENGTH,
            transition_joint: CURVE_TRANSITION_JOINT,
            inside_frequency: 0.2,
            inside_phase: 0.25,
            outside_frequency: 0.3,
            outside_phase: 0.09,
            fan_degrees: PAGE_FAN_DEGREES,
            snap_epsilon: SNAP_EPSILON,
        }
    }
}

impl CurlProfile {
    /// Whole-page swing for a page, fan angle included.
    pub fn swing_angle(&self, state: &PageState) -> f32 {
        let mut angle = if state.opened {
            -std::f32::consts::FRAC_PI_2
        } else {
            std::f32::consts::FRAC_PI_2
        };
        if !state.book_closed {
            angle += (state.index as f32 * self.fan_degrees).to_radians();
        }
        angle
    }

    /// Inside curve intensity of joint `k` (zero from the transition joint on).
    pub fn inside_intensity(&self, k: usize) -> f32 {
        if k < self.transition_joint {
            (k as f32 * self.inside_frequency + self.inside_phase).sin()
        } else {
            0.0
        }
    }

    /// Outside curve intensity of joint `k` (zero up to the transition joint).
    pub fn outside_intensity(&self, k: usize) -> f32 {
        if k > self.transition_joint {
            (k as f32 * self.outside_frequency + self.outside_phase).cos()
        } else {
            0.0
        }
    }

    /// Target rotation of joint `k`.
    pub fn joint_target(&self, k: usize, state: &PageState) -> f32 {
        let swing = self.swing_angle(state);

        if state.book_closed {
            return if k == 0 { swing } else { 0.0 };
        }

        self.inside_strength * self.inside_intensity(k) * swing
            - self.outside_strength * self.outside_intensity(k) * swing
    }
}

/// Drives a page's bone chain toward its target pose.
#[derive(Debug, Clone, Default)]
pub struct CurvatureSolver {
    profile: CurlProfile,
}

impl CurvatureSolver {
    pub fn new(profile: CurlProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &CurlProfile {
        &self.profile
    }

    /// Target angles for a chain of `joint_count` joints.
    pub fn targets(&self, state: &PageState, joint_count: usize) -> Vec<f32> {
        (0..joint_count)
            .map(|k| self.profile.joint_target(k, state))
            .collect()
    }

    /// Advance every joint of `chain` by `dt` seconds toward its target.
    ///
    /// The chain takes the page's stack offset as its normal offset. An empty
    /// chain (rig not built yet) is left alone, and a non-positive `dt` leaves
    /// all angles unchanged.
    pub fn tick(&self, chain: &mut BoneChain, state: &PageState, dt: f32) {
        if chain.is_empty() {
            trace!("Skipping tick for page {}: rig not built", state.index);
            return;
        }

        chain.set_normal_offset(state.stack_offset);

        let profile = &self.profile;
        for (k, joint) in chain.joints_mut().iter_mut().enumerate() {
            let target = profile.joint_target(k, state);
            joint.angle = damp_angle(
                joint.angle,
                target,
                profile.smooth_time,
                dt,
                profile.snap_epsilon,
            );
        }
    }

    /// Whether every joint already sits on its target.
    pub fn settled(&self, chain: &BoneChain, state: &PageState) -> bool {
        chain
            .angles()
            .enumerate()
            .all(|(k, angle)| angle == self.profile.joint_target(k, state))
    }
}
