use glam::Quat;
use vrhand_core::{Axis, RigSettings, lerp_clamped};

use crate::rig::{NodeKey, Rig};

/// Static description of a bendable joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSpec {
    /// Local axis the joint bends around
    pub bend_axis: Axis,
    /// Angle (radians) reached at full bend
    pub bend_angle: f32,
    /// Local rotation of the joint when fully open
    pub rest_rotation: Quat,
}

impl JointSpec {
    #[must_use]
    pub fn new(bend_axis: Axis, bend_angle: f32, rest_rotation: Quat) -> Self {
        Self {
            bend_axis,
            bend_angle,
            rest_rotation,
        }
    }

    /// A joint bending around X with the configured default angle.
    #[must_use]
    pub fn from_settings(settings: &RigSettings) -> Self {
        Self::new(Axis::X, settings.default_bend_angle, Quat::IDENTITY)
    }
}

impl Default for JointSpec {
    fn default() -> Self {
        Self::from_settings(&RigSettings::default())
    }
}

/// A joint of a finger together with its current bend.
#[derive(Debug, Clone, PartialEq)]
pub struct FingerJoint {
    node: NodeKey,
    spec: JointSpec,
    bend: f32,
}

impl FingerJoint {
    #[must_use]
    pub fn new(node: NodeKey, spec: JointSpec) -> Self {
        Self {
            node,
            spec,
            bend: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeKey {
        self.node
    }

    #[inline]
    #[must_use]
    pub fn spec(&self) -> &JointSpec {
        &self.spec
    }

    /// Bend in [0, 1]: 0 is the rest pose, 1 the fully closed pose.
    #[inline]
    #[must_use]
    pub fn bend(&self) -> f32 {
        self.bend
    }

    /// Sets the bend, clamped to [0, 1]. NaN is treated as 0.
    pub fn set_bend(&mut self, bend: f32) {
        self.bend = if bend.is_nan() { 0.0 } else { bend.clamp(0.0, 1.0) };
    }

    /// Rotation contributed by the bend alone, relative to rest.
    #[must_use]
    pub fn bend_rotation(&self) -> Quat {
        let angle = lerp_clamped(0.0, self.spec.bend_angle, self.bend);
        Quat::from_axis_angle(self.spec.bend_axis.unit(), angle)
    }

    /// Local rotation of the joint: rest composed with bend.
    #[must_use]
    pub fn local_rotation(&self) -> Quat {
        self.spec.rest_rotation * self.bend_rotation()
    }
}

/// The ordered joints of one finger, root first.
///
/// The chain is built once at setup and its structure never changes at
/// runtime; only individual bends do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointChain {
    joints: Vec<FingerJoint>,
}

impl JointChain {
    #[must_use]
    pub fn from_joints(joints: Vec<FingerJoint>) -> Self {
        Self { joints }
    }

    /// Builds a chain by walking the rig from `start`.
    ///
    /// `start` becomes the root when it is a joint. From each joint the
    /// children are scanned in order and the first child that is itself a
    /// joint becomes the next link; its siblings are ignored. A `start`
    /// that is not a joint yields an empty chain.
    #[must_use]
    pub fn detect(rig: &Rig, start: NodeKey) -> Self {
        let mut joints = Vec::new();
        if let Some(spec) = rig.get_node(start).and_then(|n| n.joint) {
            joints.push(FingerJoint::new(start, spec));
            detect_following(rig, start, &mut joints);
        }
        Self { joints }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&FingerJoint> {
        self.joints.first()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, FingerJoint> {
        self.joints.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FingerJoint> {
        self.joints.iter_mut()
    }

    /// Current bends in traversal order.
    pub fn bends(&self) -> impl Iterator<Item = f32> + '_ {
        self.joints.iter().map(FingerJoint::bend)
    }

    /// Assigns `bends[i]` to the i-th joint.
    ///
    /// Stops at the shorter of the two sequences: surplus bends are dropped
    /// and joints past the end of `bends` keep their current value.
    /// Returns the number of joints touched.
    pub fn apply_bends(&mut self, bends: &[f32]) -> usize {
        let mut touched = 0;
        for (joint, &bend) in self.joints.iter_mut().zip(bends) {
            joint.set_bend(bend);
            touched += 1;
        }
        touched
    }
}

impl<'a> IntoIterator for &'a JointChain {
    type Item = &'a FingerJoint;
    type IntoIter = std::slice::Iter<'a, FingerJoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.joints.iter()
    }
}

fn detect_following(rig: &Rig, current: NodeKey, joints: &mut Vec<FingerJoint>) {
    let Some(node) = rig.get_node(current) else {
        return;
    };
    for &child in node.children() {
        if let Some(spec) = rig.get_node(child).and_then(|n| n.joint) {
            joints.push(FingerJoint::new(child, spec));
            detect_following(rig, child, joints);
            // first match wins
            break;
        }
    }
}
