use glam::Quat;
use vrhand_core::{Axis, FingerState, HandFinger, RigSettings, lerp_clamped};

use crate::joint::{FingerJoint, JointChain};
use crate::rig::NodeKey;

/// How a finger deviates sideways from its rest pose.
///
/// Angles are in radians and measured around `axis`, relative to
/// `rest_rotation`. When the finger's anchor is also its root joint, the
/// joint's own rest rotation is used instead of `rest_rotation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltSpec {
    pub axis: Axis,
    pub rest_angle: f32,
    /// Angle reached at tilt = -1
    pub left_angle: f32,
    /// Angle reached at tilt = +1
    pub right_angle: f32,
    pub rest_rotation: Quat,
}

impl TiltSpec {
    #[must_use]
    pub fn new(axis: Axis, rest_angle: f32, left_angle: f32, right_angle: f32, rest_rotation: Quat) -> Self {
        Self {
            axis,
            rest_angle,
            left_angle,
            right_angle,
            rest_rotation,
        }
    }

    /// Guesses a tilt range from the finger's rest rotation: a symmetric
    /// `spread` to either side.
    #[must_use]
    pub fn from_rest(rest_rotation: Quat, axis: Axis, spread: f32) -> Self {
        Self::new(axis, 0.0, spread, -spread, rest_rotation)
    }

    #[must_use]
    pub fn from_settings(rest_rotation: Quat, settings: &RigSettings) -> Self {
        Self::from_rest(rest_rotation, Axis::Y, settings.default_tilt_spread)
    }
}

impl Default for TiltSpec {
    fn default() -> Self {
        Self::from_settings(Quat::IDENTITY, &RigSettings::default())
    }
}

/// A named digit: a tilt plus the chain of joints it bends.
///
/// Tilt and bend are independent. Changing the tilt never alters any joint
/// bend, even when the finger's anchor node is also its root joint; the two
/// rotations are composed when the pose is written out.
#[derive(Debug, Clone)]
pub struct Finger {
    name: HandFinger,
    anchor: NodeKey,
    tilt_spec: TiltSpec,
    tilt: f32,
    chain: JointChain,
}

impl Finger {
    #[must_use]
    pub fn new(name: HandFinger, anchor: NodeKey, tilt_spec: TiltSpec, chain: JointChain) -> Self {
        Self {
            name,
            anchor,
            tilt_spec,
            tilt: 0.0,
            chain,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> HandFinger {
        self.name
    }

    /// Rig node the tilt rotation is written to.
    #[inline]
    #[must_use]
    pub fn anchor(&self) -> NodeKey {
        self.anchor
    }

    #[inline]
    #[must_use]
    pub fn tilt_spec(&self) -> &TiltSpec {
        &self.tilt_spec
    }

    #[inline]
    #[must_use]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// Sets the tilt, clamped to [-1, 1]. NaN is treated as 0.
    pub fn set_tilt(&mut self, tilt: f32) {
        self.tilt = if tilt.is_nan() { 0.0 } else { tilt.clamp(-1.0, 1.0) };
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&FingerJoint> {
        self.chain.root()
    }

    #[inline]
    #[must_use]
    pub fn chain(&self) -> &JointChain {
        &self.chain
    }

    #[inline]
    pub fn chain_mut(&mut self) -> &mut JointChain {
        &mut self.chain
    }

    /// Rotation contributed by the tilt alone, relative to rest.
    #[must_use]
    pub fn tilt_rotation(&self) -> Quat {
        let spec = &self.tilt_spec;
        let limit = if self.tilt < 0.0 {
            spec.left_angle
        } else {
            spec.right_angle
        };
        let angle = lerp_clamped(spec.rest_angle, limit, self.tilt.abs());
        Quat::from_axis_angle(spec.axis.unit(), angle)
    }

    /// Local rotation of the anchor node, ignoring any bend.
    #[must_use]
    pub fn local_rotation(&self) -> Quat {
        self.tilt_spec.rest_rotation * self.tilt_rotation()
    }

    /// Applies a full target state: tilt first, then bends positionally
    /// from the root joint.
    ///
    /// Returns the number of joints touched, `min(bends, chain length)`.
    pub fn update_state(&mut self, state: &FingerState) -> usize {
        self.set_tilt(state.tilt);
        self.chain.apply_bends(&state.bends)
    }

    /// Snapshot of the current pose as an active state.
    #[must_use]
    pub fn current_state(&self) -> FingerState {
        FingerState::new(self.tilt, self.chain.bends())
    }

    /// Local rotations for every node this finger drives, anchor first.
    ///
    /// When the anchor is also the root joint a single rotation,
    /// `joint rest * tilt * bend`, is produced for it: the joint's authored
    /// rest rotation takes the place of the tilt rest rotation.
    pub fn node_rotations(&self) -> impl Iterator<Item = (NodeKey, Quat)> + '_ {
        let shared_root = self
            .chain
            .root()
            .filter(|joint| joint.node() == self.anchor);

        let anchor_rotation = match shared_root {
            Some(joint) => joint.spec().rest_rotation * self.tilt_rotation() * joint.bend_rotation(),
            None => self.local_rotation(),
        };

        std::iter::once((self.anchor, anchor_rotation)).chain(
            self.chain
                .iter()
                .skip(usize::from(shared_root.is_some()))
                .map(|joint| (joint.node(), joint.local_rotation())),
        )
    }
}
