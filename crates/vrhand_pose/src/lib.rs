//! # vrhand_pose
//!
//! Profile resolution and pose blending:
//!
//! - [`HandProfile`]: named bundle of finger states and hand-level pose
//! - [`StateProvider`]: fixed, select/activate and input-action-blended
//!   sources of "the profile in effect right now", stored in a [`ProviderSet`]
//! - [`HandDriver`]: per-tick fallback resolution and interpolation
//! - [`InteractionRouter`]: turns select/activate signals into provider swaps

pub mod driver;
pub mod interaction;
pub mod profile;
pub mod provider;

pub use driver::HandDriver;
pub use interaction::{InteractableKey, InteractionRouter};
pub use profile::{HandOverrides, HandProfile};
pub use provider::{
    ActionBasedProvider, ActionPhase, ProfileSource, ProviderKey, ProviderSet,
    SelectActivateProvider, StateProvider,
};
