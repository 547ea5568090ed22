//! Error Types
//!
//! This module defines the error types used throughout vrhand.
//!
//! # Overview
//!
//! The main error type [`HandError`] covers two very different audiences:
//! - Per-frame errors raised while driving a hand (bad transition speed,
//!   unresolvable finger state, stale provider handles)
//! - Authoring errors raised while validating a rig (duplicate fingers,
//!   fingers parented outside the hand, unsupported axes)
//!
//! Per-finger errors produced inside a tick are logged and swallowed by the
//! driver; everything else is returned to the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vrhand_core::errors::{HandError, Result};
//!
//! fn drive() -> Result<()> {
//!     Ok(())
//! }
//! ```

use glam::IVec3;
use thiserror::Error;

use crate::finger::HandFinger;

/// The main error type for vrhand.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandError {
    // ========================================================================
    // Driver Errors
    // ========================================================================
    /// A finite transition speed must be strictly positive.
    #[error("Transition speed must be > 0, but {0} was provided")]
    InvalidTransitionSpeed(f32),

    /// Neither the current nor the default provider has an active state.
    #[error("No active state found for finger: {0}")]
    MissingFingerState(HandFinger),

    /// A provider handle does not refer to a live provider.
    #[error("State provider not found")]
    ProviderNotFound,

    // ========================================================================
    // Authoring Errors
    // ========================================================================
    /// Two fingers on the same hand share a name.
    #[error("Duplicate finger on hand: {0}")]
    DuplicateFinger(HandFinger),

    /// A finger's anchor node is not parented under the hand.
    #[error("Finger {finger} (node '{node}') must be a child of the hand")]
    FingerOutsideHand {
        /// The offending finger
        finger: HandFinger,
        /// Name of the finger's anchor node
        node: String,
    },

    /// A rig node handle does not refer to a live node.
    #[error("Rig node not found")]
    UnknownNode,

    /// Joint and tilt axes must be a single positive unit axis.
    #[error("Unsupported axis {0}: exactly one component must be 1")]
    UnsupportedAxis(IVec3),
}

/// Alias for `Result<T, HandError>`.
pub type Result<T> = std::result::Result<T, HandError>;
