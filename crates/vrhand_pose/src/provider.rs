use slotmap::{SlotMap, new_key_type};
use vrhand_core::{FingerState, HandFinger};

use crate::profile::{HandOverrides, HandProfile};

new_key_type! {
    /// Handle to a provider stored in a [`ProviderSet`].
    pub struct ProviderKey;
}

/// Anything that can tell which profile is in effect right now.
pub trait ProfileSource {
    fn current_profile(&self) -> &HandProfile;
}

impl ProfileSource for HandProfile {
    fn current_profile(&self) -> &HandProfile {
        self
    }
}

// ============================================================================
// Select / Activate
// ============================================================================

/// Profile source for an interactable that can be both selected and
/// activated (a trigger-pulled tool, a squeezed bottle...).
///
/// While selected it exposes the select profile. While activated it exposes
/// a mix where the activate profile's active fingers override the select
/// profile's. The mix is computed once, at construction.
#[derive(Debug, Clone)]
pub struct SelectActivateProvider {
    select: HandProfile,
    activate: HandProfile,
    mixed: HandProfile,
    activated: bool,
}

impl SelectActivateProvider {
    #[must_use]
    pub fn new(select: HandProfile, activate: HandProfile) -> Self {
        let name = format!("{}+{}", select.name, activate.name);
        let mixed = HandProfile::merged(&name, &select, &activate);
        Self {
            select,
            activate,
            mixed,
            activated: false,
        }
    }

    pub fn activate(&mut self) {
        self.activated = true;
    }

    pub fn deactivate(&mut self) {
        self.activated = false;
    }

    #[inline]
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    #[inline]
    #[must_use]
    pub fn select_profile(&self) -> &HandProfile {
        &self.select
    }

    #[inline]
    #[must_use]
    pub fn activate_profile(&self) -> &HandProfile {
        &self.activate
    }
}

impl ProfileSource for SelectActivateProvider {
    fn current_profile(&self) -> &HandProfile {
        if self.activated {
            &self.mixed
        } else {
            &self.select
        }
    }
}

// ============================================================================
// Action based
// ============================================================================

/// Lifecycle of an input action, as reported by the input system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPhase {
    #[default]
    Waiting,
    Started,
    Performed,
}

#[derive(Debug, Clone)]
struct ActionBinding {
    name: String,
    profile: HandProfile,
    phase: ActionPhase,
}

/// Blends a base profile with per-action overlay profiles, driven by
/// controller input.
///
/// The blended profile never overrides hand visibility or offsets. Each
/// finger takes the state of the last configured performed action that has
/// an active state for it, falling back to the base profile.
#[derive(Debug, Clone)]
pub struct ActionBasedProvider {
    base: HandProfile,
    actions: Vec<ActionBinding>,
    blended: HandProfile,
}

impl ActionBasedProvider {
    #[must_use]
    pub fn new(base: HandProfile) -> Self {
        let mut provider = Self {
            base,
            actions: Vec::new(),
            blended: HandProfile::new("blended").with_overrides(HandOverrides::empty()),
        };
        provider.update_profile();
        provider
    }

    /// Registers an action and its overlay profile. Registration order is
    /// overlay order: later actions win.
    ///
    /// Registering a name twice replaces the first binding's profile and
    /// keeps its position.
    #[must_use]
    pub fn with_action(mut self, name: &str, profile: HandProfile) -> Self {
        if let Some(binding) = self.actions.iter_mut().find(|a| a.name == name) {
            log::warn!("Input action '{name}' registered twice, replacing its profile");
            binding.profile = profile;
        } else {
            self.actions.push(ActionBinding {
                name: name.to_string(),
                profile,
                phase: ActionPhase::Waiting,
            });
        }
        self.update_profile();
        self
    }

    #[inline]
    #[must_use]
    pub fn base_profile(&self) -> &HandProfile {
        &self.base
    }

    /// Registered action names, in overlay order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }

    #[must_use]
    pub fn action_phase(&self, name: &str) -> Option<ActionPhase> {
        self.binding(name).map(|a| a.phase)
    }

    #[must_use]
    pub fn is_action_active(&self, name: &str) -> bool {
        self.action_phase(name) == Some(ActionPhase::Performed)
    }

    pub fn action_started(&mut self, name: &str) -> bool {
        self.set_phase(name, ActionPhase::Started)
    }

    pub fn action_performed(&mut self, name: &str) -> bool {
        self.set_phase(name, ActionPhase::Performed)
    }

    pub fn action_canceled(&mut self, name: &str) -> bool {
        self.set_phase(name, ActionPhase::Waiting)
    }

    /// Shortcut for performed/canceled. Returns `false` for unknown actions.
    pub fn set_action_active(&mut self, name: &str, active: bool) -> bool {
        let phase = if active {
            ActionPhase::Performed
        } else {
            ActionPhase::Waiting
        };
        self.set_phase(name, phase)
    }

    /// Replaces the overlay profile of an existing action. Actions cannot be
    /// added or removed once the provider is in use.
    pub fn set_action_profile(&mut self, name: &str, profile: HandProfile) -> bool {
        let Some(binding) = self.actions.iter_mut().find(|a| a.name == name) else {
            return false;
        };
        binding.profile = profile;
        self.update_profile();
        true
    }

    pub fn set_base_profile(&mut self, profile: HandProfile) {
        self.base = profile;
        self.update_profile();
    }

    /// Rebuilds the blended profile from the base and every performed action.
    pub fn update_profile(&mut self) {
        for finger in HandFinger::iter() {
            self.blended
                .set_finger_state(finger, FingerState::default().muted());
        }

        self.blended.overlay_active_from(&self.base);

        for binding in &self.actions {
            if binding.phase == ActionPhase::Performed {
                self.blended.overlay_active_from(&binding.profile);
            }
        }

        log::debug!(
            "Blended hand profile rebuilt ({} active actions)",
            self.actions
                .iter()
                .filter(|a| a.phase == ActionPhase::Performed)
                .count()
        );
    }

    fn binding(&self, name: &str) -> Option<&ActionBinding> {
        self.actions.iter().find(|a| a.name == name)
    }

    fn set_phase(&mut self, name: &str, phase: ActionPhase) -> bool {
        let Some(binding) = self.actions.iter_mut().find(|a| a.name == name) else {
            log::warn!("Unknown input action: {name}");
            return false;
        };
        binding.phase = phase;
        self.update_profile();
        true
    }
}

impl ProfileSource for ActionBasedProvider {
    fn current_profile(&self) -> &HandProfile {
        &self.blended
    }
}

// ============================================================================
// StateProvider
// ============================================================================

/// Every kind of provider a driver can be pointed at.
#[derive(Debug, Clone)]
pub enum StateProvider {
    /// A fixed authored profile (idle hands, simple interactables)
    Fixed(HandProfile),
    SelectActivate(SelectActivateProvider),
    ActionBased(ActionBasedProvider),
}

impl StateProvider {
    /// A fixed provider holding the rest profile.
    #[must_use]
    pub fn rest(bend_count: usize) -> Self {
        Self::Fixed(HandProfile::rest(bend_count))
    }

    pub fn as_select_activate_mut(&mut self) -> Option<&mut SelectActivateProvider> {
        match self {
            Self::SelectActivate(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_action_based_mut(&mut self) -> Option<&mut ActionBasedProvider> {
        match self {
            Self::ActionBased(p) => Some(p),
            _ => None,
        }
    }
}

impl ProfileSource for StateProvider {
    fn current_profile(&self) -> &HandProfile {
        match self {
            Self::Fixed(profile) => profile,
            Self::SelectActivate(p) => p.current_profile(),
            Self::ActionBased(p) => p.current_profile(),
        }
    }
}

impl From<HandProfile> for StateProvider {
    fn from(profile: HandProfile) -> Self {
        Self::Fixed(profile)
    }
}

impl From<SelectActivateProvider> for StateProvider {
    fn from(provider: SelectActivateProvider) -> Self {
        Self::SelectActivate(provider)
    }
}

impl From<ActionBasedProvider> for StateProvider {
    fn from(provider: ActionBasedProvider) -> Self {
        Self::ActionBased(provider)
    }
}

// ============================================================================
// ProviderSet
// ============================================================================

/// Arena owning every provider of a session.
///
/// Drivers and the interaction router refer to providers by
/// [`ProviderKey`], so input events can mutate a provider while drivers
/// keep pointing at it.
#[derive(Debug, Default)]
pub struct ProviderSet {
    providers: SlotMap<ProviderKey, StateProvider>,
}

impl ProviderSet {
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, provider: impl Into<StateProvider>) -> ProviderKey {
        self.providers.insert(provider.into())
    }

    pub fn remove(&mut self, key: ProviderKey) -> Option<StateProvider> {
        self.providers.remove(key)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: ProviderKey) -> Option<&StateProvider> {
        self.providers.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: ProviderKey) -> Option<&mut StateProvider> {
        self.providers.get_mut(key)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: ProviderKey) -> bool {
        self.providers.contains_key(key)
    }

    /// Current profile of the provider behind `key`.
    #[inline]
    #[must_use]
    pub fn profile(&self, key: ProviderKey) -> Option<&HandProfile> {
        self.providers.get(key).map(|p| p.current_profile())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
