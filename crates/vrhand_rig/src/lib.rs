//! # vrhand_rig
//!
//! The skeletal side of a hand:
//!
//! - [`Rig`]: the authoring hierarchy nodes live in, and the pose sink the
//!   hand writes rotations back into
//! - [`JointChain`]: ordered joints of one finger, built by auto-detection
//! - [`Finger`]: tilt plus joint chain, updated atomically from a state
//! - [`Hand`]: the fingers of one hand and its hand-level pose fields

pub mod finger;
pub mod hand;
pub mod joint;
pub mod rig;

pub use finger::{Finger, TiltSpec};
pub use hand::Hand;
pub use joint::{FingerJoint, JointChain, JointSpec};
pub use rig::{NodeKey, Rig, RigNode};
