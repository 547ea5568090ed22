//! Rig Settings & Transition Configuration
//!
//! Authoring defaults shared by every hand built in a session, plus the
//! transition policy the driver uses each tick.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vrhand_core::settings::{RigSettings, Transition};
//!
//! // Default: snap to the target pose every frame
//! let settings = RigSettings::default();
//!
//! // Smoothly approach the target, covering 25% of the gap per tick
//! let settings = RigSettings {
//!     transition: Transition::Smooth(0.25),
//!     ..Default::default()
//! };
//! ```

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// How the driver moves a finger towards its resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Apply the target pose verbatim.
    #[default]
    Snap,

    /// Interpolate from the current pose towards the target.
    ///
    /// The value is the per-tick interpolation factor and must be `> 0`;
    /// values of 1 or more reach the target within one tick.
    Smooth(f32),
}

impl Transition {
    /// The speed argument understood by the hand driver.
    ///
    /// [`Snap`](Self::Snap) maps to positive infinity.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        match self {
            Self::Snap => f32::INFINITY,
            Self::Smooth(speed) => *speed,
        }
    }
}

// ---------------------------------------------------------------------------
// RigSettings
// ---------------------------------------------------------------------------

/// Defaults applied when authoring joints and fingers, and the driver's
/// transition policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigSettings {
    /// Angle (radians) a joint reaches at full bend.
    pub default_bend_angle: f32,

    /// Angle (radians) a finger deviates from rest at full tilt, used when a
    /// finger is auto-configured from its rest pose.
    pub default_tilt_spread: f32,

    /// Number of joints covered by the rest pose.
    pub rest_bend_count: usize,

    /// Per-tick transition policy.
    pub transition: Transition,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            default_bend_angle: 65.0_f32.to_radians(),
            default_tilt_spread: 5.0_f32.to_radians(),
            rest_bend_count: 10,
            transition: Transition::Snap,
        }
    }
}
