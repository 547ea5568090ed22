//! Hand Driver
//!
//! The per-tick resolver that turns provider output into an applied hand
//! pose.
//!
//! # State
//!
//! A driver is either *not overridden* (it follows its default provider) or
//! *overridden* (it follows the provider last passed to
//! [`HandDriver::set_provider`]). Swapping takes effect on the next
//! [`HandDriver::update_hand`]; only one level is kept, a new provider
//! replaces the previous one instead of stacking on it.
//!
//! # Resolution
//!
//! Every tick, for every finger of the hand independently:
//! 1. the current provider's active state for that finger, else
//! 2. the default provider's active state for that finger, else
//! 3. nothing: the finger is left as is and a warning is logged.
//!
//! A failure for one finger never prevents the others from updating.

use vrhand_core::{FingerState, HandError, HandFinger, Result, RigSettings, lerp_clamped};
use vrhand_rig::{Finger, Hand};

use crate::profile::HandProfile;
use crate::provider::{ProviderKey, ProviderSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandDriver {
    default_provider: ProviderKey,
    current_provider: Option<ProviderKey>,
}

impl HandDriver {
    /// Creates a driver following `default_provider` until told otherwise.
    #[must_use]
    pub fn new(default_provider: ProviderKey) -> Self {
        Self {
            default_provider,
            current_provider: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn default_provider(&self) -> ProviderKey {
        self.default_provider
    }

    /// The provider in effect: the override if one is set, else the default.
    #[inline]
    #[must_use]
    pub fn current_provider(&self) -> ProviderKey {
        self.current_provider.unwrap_or(self.default_provider)
    }

    #[inline]
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.current_provider.is_some()
    }

    /// Overrides the provider, or clears the override with `None`.
    pub fn set_provider(&mut self, provider: Option<ProviderKey>) {
        if self.current_provider != provider {
            log::debug!("Hand provider changed: {:?} -> {:?}", self.current_provider, provider);
        }
        self.current_provider = provider;
    }

    /// Updates `hand` from the providers in `providers`.
    ///
    /// `speed == f32::INFINITY` snaps every finger to its target. Any other
    /// speed must be `> 0` and is used as the per-tick interpolation factor
    /// (capped at 1) from the current pose towards the target.
    ///
    /// Fails before touching the hand when the speed is invalid or the
    /// default provider is missing. Fingers without any active state are
    /// skipped with a warning.
    pub fn update_hand(&self, providers: &ProviderSet, hand: &mut Hand, speed: f32) -> Result<()> {
        if speed.is_nan() || speed <= 0.0 {
            return Err(HandError::InvalidTransitionSpeed(speed));
        }

        let default_profile = providers
            .profile(self.default_provider)
            .ok_or(HandError::ProviderNotFound)?;
        let profile = self.current_profile(providers, default_profile);

        profile.apply_hand_fields(hand);

        for finger in hand.fingers_mut() {
            let target = match resolve(profile, default_profile, finger.name()) {
                Ok(target) => target,
                Err(err) => {
                    log::warn!("{err}");
                    continue;
                }
            };

            if speed == f32::INFINITY {
                finger.update_state(target);
            } else {
                let state = Self::transition_state(finger, target, speed);
                finger.update_state(&state);
            }
        }

        Ok(())
    }

    /// [`update_hand`](Self::update_hand) with the speed taken from the
    /// settings' transition policy.
    pub fn update_hand_with(&self, providers: &ProviderSet, hand: &mut Hand, settings: &RigSettings) -> Result<()> {
        self.update_hand(providers, hand, settings.transition.speed())
    }

    /// The state `finger` would be driven towards this tick.
    pub fn resolve_finger_state(&self, providers: &ProviderSet, finger: HandFinger) -> Result<FingerState> {
        let default_profile = providers
            .profile(self.default_provider)
            .ok_or(HandError::ProviderNotFound)?;
        let profile = self.current_profile(providers, default_profile);
        resolve(profile, default_profile, finger).cloned()
    }

    /// A state between `finger`'s current pose and `target`.
    ///
    /// Tilt and each bend move by factor `t` (capped at 1). Bends are paired
    /// with joints by position; bends past the end of the chain are copied
    /// from the target unchanged.
    #[must_use]
    pub fn transition_state(finger: &Finger, target: &FingerState, t: f32) -> FingerState {
        let t = t.min(1.0);
        let mut state = target.clone();
        state.tilt = lerp_clamped(finger.tilt(), target.tilt, t);
        for (bend, joint) in state.bends.iter_mut().zip(finger.chain()) {
            *bend = lerp_clamped(joint.bend(), *bend, t);
        }
        state
    }

    fn current_profile<'a>(&self, providers: &'a ProviderSet, default_profile: &'a HandProfile) -> &'a HandProfile {
        let Some(key) = self.current_provider else {
            return default_profile;
        };
        providers.profile(key).unwrap_or_else(|| {
            log::warn!("Current hand provider no longer exists, using the default provider");
            default_profile
        })
    }
}

fn resolve<'a>(current: &'a HandProfile, default_profile: &'a HandProfile, finger: HandFinger) -> Result<&'a FingerState> {
    current
        .finger_state(finger, true)
        .or_else(|| default_profile.finger_state(finger, true))
        .ok_or(HandError::MissingFingerState(finger))
}
