use bitflags::bitflags;
use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use vrhand_core::{FingerState, HandFinger};
use vrhand_rig::Hand;

bitflags! {
    /// Which hand-level fields a profile takes control of.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HandOverrides: u8 {
        const VISIBILITY = 1 << 0;
        const POSITION   = 1 << 1;
        const ROTATION   = 1 << 2;
    }
}

impl Default for HandOverrides {
    fn default() -> Self {
        Self::all()
    }
}

/// A named bundle of target finger states plus hand-level pose.
///
/// Finger states may be partial (fingers missing from the map) and may be
/// muted; both are treated as "no opinion" by
/// [`finger_state`](Self::finger_state) when `only_active` is set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandProfile {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: HandOverrides,
    pub hand_visible: bool,
    pub hand_position_offset: Vec3,
    pub hand_rotation_offset: Quat,
    #[cfg_attr(feature = "serde", serde(default))]
    finger_states: FxHashMap<HandFinger, FingerState>,
}

impl HandProfile {
    /// An empty profile that overrides every hand-level field with a
    /// visible, un-offset hand.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            overrides: HandOverrides::all(),
            hand_visible: true,
            hand_position_offset: Vec3::ZERO,
            hand_rotation_offset: Quat::IDENTITY,
            finger_states: FxHashMap::default(),
        }
    }

    /// Every finger open and straight, covering `bend_count` joints.
    #[must_use]
    pub fn rest(bend_count: usize) -> Self {
        let mut profile = Self::new("rest");
        for finger in HandFinger::iter() {
            profile
                .finger_states
                .insert(finger, FingerState::rest(bend_count));
        }
        profile
    }

    // === Builder ===

    #[must_use]
    pub fn with_finger(mut self, finger: HandFinger, state: FingerState) -> Self {
        self.finger_states.insert(finger, state);
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: HandOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.hand_visible = visible;
        self
    }

    #[must_use]
    pub fn with_position_offset(mut self, offset: Vec3) -> Self {
        self.hand_position_offset = offset;
        self
    }

    #[must_use]
    pub fn with_rotation_offset(mut self, offset: Quat) -> Self {
        self.hand_rotation_offset = offset;
        self
    }

    // === Finger states ===

    /// The state mapped to `finger`.
    ///
    /// Returns `None` when the finger is unmapped, or when `only_active` is
    /// set and the mapped state is muted.
    #[must_use]
    pub fn finger_state(&self, finger: HandFinger, only_active: bool) -> Option<&FingerState> {
        self.finger_states
            .get(&finger)
            .filter(|state| !only_active || state.active)
    }

    pub fn set_finger_state(&mut self, finger: HandFinger, state: FingerState) -> Option<FingerState> {
        self.finger_states.insert(finger, state)
    }

    pub fn remove_finger_state(&mut self, finger: HandFinger) -> Option<FingerState> {
        self.finger_states.remove(&finger)
    }

    /// Mapped states in enum order of their fingers.
    pub fn finger_states(&self) -> impl Iterator<Item = (HandFinger, &FingerState)> {
        HandFinger::iter().filter_map(|f| self.finger_states.get(&f).map(|s| (f, s)))
    }

    /// Copies every active state of `other` over this profile's entry for
    /// the same finger, in enum order. Muted and unmapped fingers of
    /// `other` leave this profile untouched.
    pub fn overlay_active_from(&mut self, other: &HandProfile) {
        for finger in HandFinger::iter() {
            if let Some(state) = other.finger_state(finger, true) {
                self.finger_states.insert(finger, state.clone());
            }
        }
    }

    /// A profile with `base`'s hand-level fields whose fingers are `base`'s
    /// active states overlaid by `overlay`'s active states.
    #[must_use]
    pub fn merged(name: &str, base: &HandProfile, overlay: &HandProfile) -> Self {
        let mut profile = Self {
            name: name.to_string(),
            overrides: base.overrides,
            hand_visible: base.hand_visible,
            hand_position_offset: base.hand_position_offset,
            hand_rotation_offset: base.hand_rotation_offset,
            finger_states: FxHashMap::default(),
        };
        profile.overlay_active_from(base);
        profile.overlay_active_from(overlay);
        profile
    }

    // === Hand-level fields ===

    /// Writes the hand-level fields this profile overrides onto `hand`,
    /// leaving the others untouched.
    pub fn apply_hand_fields(&self, hand: &mut Hand) {
        if self.overrides.contains(HandOverrides::VISIBILITY) {
            hand.visible = self.hand_visible;
        }
        if self.overrides.contains(HandOverrides::POSITION) {
            hand.position_offset = self.hand_position_offset;
        }
        if self.overrides.contains(HandOverrides::ROTATION) {
            hand.rotation_offset = self.hand_rotation_offset;
        }
    }
}

impl Default for HandProfile {
    fn default() -> Self {
        Self::new("")
    }
}
