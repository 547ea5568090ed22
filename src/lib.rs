#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! # vrhand
//!
//! Procedural VR hand posing: a hand skeleton is driven toward target finger
//! poses supplied by interchangeable state providers, with optional smooth
//! transitions between poses.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`types`]: finger names, finger states, settings and errors
//! - [`rig`]: rig hierarchy, joint chains, fingers and hands
//! - [`pose`]: profiles, providers, the hand driver and interaction routing
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vrhand::prelude::*;
//!
//! let settings = RigSettings::default();
//! let mut rig = Rig::new();
//! let palm = rig.create_node("palm");
//! // ... create finger joints under `palm` ...
//!
//! let mut providers = ProviderSet::new();
//! let rest = providers.insert(StateProvider::rest(settings.rest_bend_count));
//! let driver = HandDriver::new(rest);
//!
//! driver.update_hand_with(&providers, &mut hand, &settings)?;
//! hand.write_pose(&mut rig);
//! ```

pub use vrhand_core as types;
pub use vrhand_pose as pose;
pub use vrhand_rig as rig;

pub use vrhand_core::{Axis, FingerState, HandError, HandFinger, Result, RigSettings, Transition};
pub use vrhand_pose::{
    ActionBasedProvider, HandDriver, HandOverrides, HandProfile, InteractionRouter, ProviderKey,
    ProviderSet, SelectActivateProvider, StateProvider,
};
pub use vrhand_rig::{Finger, FingerJoint, Hand, JointChain, JointSpec, NodeKey, Rig, TiltSpec};

pub mod prelude {
    pub use vrhand_core::{Axis, FingerState, HandError, HandFinger, RigSettings, Transition};
    pub use vrhand_pose::{
        ActionBasedProvider, ActionPhase, HandDriver, HandOverrides, HandProfile,
        InteractableKey, InteractionRouter, ProfileSource, ProviderKey, ProviderSet,
        SelectActivateProvider, StateProvider,
    };
    pub use vrhand_rig::{Finger, FingerJoint, Hand, JointChain, JointSpec, NodeKey, Rig, TiltSpec};
}
