use smallvec::SmallVec;

/// Per-joint bend targets, root joint first and fingertip last.
pub type Bends = SmallVec<[f32; 4]>;

/// Target pose of a single finger.
///
/// An inactive ("muted") state is a soft-delete marker: every consumer must
/// treat it exactly as if no state were present.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FingerState {
    /// Whether the state should be applied to its finger at all
    pub active: bool,
    /// Lateral deviation from rest, in [-1, 1]
    pub tilt: f32,
    /// Bend per joint in traversal order, each in [0, 1]
    pub bends: Bends,
}

impl FingerState {
    /// Creates an active state.
    #[must_use]
    pub fn new(tilt: f32, bends: impl IntoIterator<Item = f32>) -> Self {
        Self {
            active: true,
            tilt,
            bends: bends.into_iter().collect(),
        }
    }

    /// Rest pose: no tilt and `bend_count` fully open joints.
    #[must_use]
    pub fn rest(bend_count: usize) -> Self {
        Self {
            active: true,
            tilt: 0.0,
            bends: SmallVec::from_elem(0.0, bend_count),
        }
    }

    /// Returns a muted copy of this state.
    #[must_use]
    pub fn muted(mut self) -> Self {
        self.active = false;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_muted(&self) -> bool {
        !self.active
    }

    /// Filters out muted states.
    #[inline]
    #[must_use]
    pub fn into_active(self) -> Option<Self> {
        self.active.then_some(self)
    }
}

impl Default for FingerState {
    fn default() -> Self {
        Self {
            active: true,
            tilt: 0.0,
            bends: SmallVec::new(),
        }
    }
}
