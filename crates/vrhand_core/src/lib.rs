//! # vrhand_core
//!
//! Foundational types shared by every vrhand crate:
//!
//! - [`HandFinger`]: the names of the five digits, in merge order
//! - [`FingerState`]: a (possibly muted) target pose for one finger
//! - [`Axis`]: single-axis rotation selector for joints and fingers
//! - [`Interpolatable`]: linear blending for scalars, vectors and rotations
//! - [`RigSettings`]: authoring defaults and the transition policy
//! - [`HandError`]: the error type

pub mod axis;
pub mod errors;
pub mod finger;
pub mod settings;
pub mod state;
pub mod values;

pub use axis::Axis;
pub use errors::{HandError, Result};
pub use finger::HandFinger;
pub use settings::{RigSettings, Transition};
pub use state::{Bends, FingerState};
pub use values::{Interpolatable, lerp_clamped};
