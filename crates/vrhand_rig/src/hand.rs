use glam::{Quat, Vec3};
use vrhand_core::{FingerState, HandError, HandFinger, Result};

use crate::finger::Finger;
use crate::rig::{NodeKey, Rig};

/// The addressable set of fingers of one avatar hand, plus hand-level pose
/// fields.
///
/// A hand never mutates itself: the driver writes into it every tick and
/// the pose sink reads from it.
#[derive(Debug, Clone)]
pub struct Hand {
    /// Whether the hand model should be rendered
    pub visible: bool,
    /// Position offset of the hand model in local space
    pub position_offset: Vec3,
    /// Rotation offset of the hand model in local space
    pub rotation_offset: Quat,

    anchor: Option<NodeKey>,
    fingers: Vec<Finger>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: true,
            position_offset: Vec3::ZERO,
            rotation_offset: Quat::IDENTITY,
            anchor: None,
            fingers: Vec::new(),
        }
    }

    /// Sets the rig node every finger must be parented under.
    #[must_use]
    pub fn with_anchor(mut self, anchor: NodeKey) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_finger(mut self, finger: Finger) -> Self {
        self.fingers.push(finger);
        self
    }

    /// Adds a finger. Name uniqueness is checked by [`validate`](Self::validate).
    pub fn add_finger(&mut self, finger: Finger) {
        self.fingers.push(finger);
    }

    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Option<NodeKey> {
        self.anchor
    }

    #[inline]
    #[must_use]
    pub fn fingers(&self) -> &[Finger] {
        &self.fingers
    }

    #[inline]
    pub fn fingers_mut(&mut self) -> &mut [Finger] {
        &mut self.fingers
    }

    #[must_use]
    pub fn finger(&self, name: HandFinger) -> Option<&Finger> {
        self.fingers.iter().find(|f| f.name() == name)
    }

    pub fn finger_mut(&mut self, name: HandFinger) -> Option<&mut Finger> {
        self.fingers.iter_mut().find(|f| f.name() == name)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Every structural problem of this hand against `rig`.
    #[must_use]
    pub fn problems(&self, rig: &Rig) -> Vec<HandError> {
        let mut problems = Vec::new();
        let mut seen: Vec<HandFinger> = Vec::with_capacity(self.fingers.len());

        for finger in &self.fingers {
            if seen.contains(&finger.name()) {
                problems.push(HandError::DuplicateFinger(finger.name()));
            } else {
                seen.push(finger.name());
            }

            let Some(node) = rig.get_node(finger.anchor()) else {
                problems.push(HandError::UnknownNode);
                continue;
            };

            if let Some(hand_anchor) = self.anchor
                && !rig.is_descendant_of(finger.anchor(), hand_anchor)
            {
                problems.push(HandError::FingerOutsideHand {
                    finger: finger.name(),
                    node: node.name.clone(),
                });
            }
        }

        problems
    }

    /// Fails with the first structural problem, if any.
    pub fn validate(&self, rig: &Rig) -> Result<()> {
        match self.problems(rig).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Logs every structural problem and reports whether the hand is valid.
    pub fn validate_logged(&self, rig: &Rig) -> bool {
        let problems = self.problems(rig);
        for problem in &problems {
            log::error!("{problem}");
        }
        problems.is_empty()
    }

    // ========================================================================
    // Pose
    // ========================================================================

    /// Applies `lookup(finger)` to every finger when it yields an active
    /// state, and `fallback` otherwise.
    pub fn apply_profile_states<F>(&mut self, lookup: F, fallback: &FingerState)
    where
        F: Fn(HandFinger) -> Option<FingerState>,
    {
        for finger in &mut self.fingers {
            match lookup(finger.name()).and_then(FingerState::into_active) {
                Some(state) => finger.update_state(&state),
                None => finger.update_state(fallback),
            };
        }
    }

    /// Puts every finger into `rest`.
    pub fn reset_pose(&mut self, rest: &FingerState) {
        for finger in &mut self.fingers {
            finger.update_state(rest);
        }
    }

    /// Writes finger and joint rotations into the rig's nodes.
    ///
    /// Returns the number of nodes written. Nodes missing from the rig are
    /// skipped.
    pub fn write_pose(&self, rig: &mut Rig) -> usize {
        let mut written = 0;
        for finger in &self.fingers {
            for (key, rotation) in finger.node_rotations() {
                if let Some(node) = rig.get_node_mut(key) {
                    node.rotation = rotation;
                    written += 1;
                }
            }
        }
        written
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
