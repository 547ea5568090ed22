use slotmap::{SlotMap, new_key_type};

use crate::driver::HandDriver;
use crate::provider::{ProviderKey, ProviderSet, SelectActivateProvider};

new_key_type! {
    /// Handle to an interactable registered with an [`InteractionRouter`].
    pub struct InteractableKey;
}

#[derive(Debug, Clone)]
struct Interactable {
    name: String,
    provider: Option<ProviderKey>,
}

/// Translates interaction signals (select entered/exited, activated,
/// deactivated) into provider swaps on hand drivers.
///
/// Interaction detection itself happens elsewhere; the router only knows
/// which provider, if any, is attached to each interactable.
#[derive(Debug, Default)]
pub struct InteractionRouter {
    interactables: SlotMap<InteractableKey, Interactable>,
}

impl InteractionRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            interactables: SlotMap::with_key(),
        }
    }

    /// Registers an interactable, optionally carrying a provider.
    pub fn register(&mut self, name: &str, provider: Option<ProviderKey>) -> InteractableKey {
        self.interactables.insert(Interactable {
            name: name.to_string(),
            provider,
        })
    }

    pub fn unregister(&mut self, key: InteractableKey) -> bool {
        self.interactables.remove(key).is_some()
    }

    #[must_use]
    pub fn name(&self, key: InteractableKey) -> Option<&str> {
        self.interactables.get(key).map(|i| i.name.as_str())
    }

    #[must_use]
    pub fn provider_of(&self, key: InteractableKey) -> Option<ProviderKey> {
        self.interactables.get(key).and_then(|i| i.provider)
    }

    /// A hand started holding `object`. Objects without a provider leave
    /// the driver unchanged.
    pub fn select_entered(&self, driver: &mut HandDriver, object: InteractableKey) {
        match self.provider_of(object) {
            Some(provider) => {
                log::debug!("Select entered '{}'", self.name(object).unwrap_or_default());
                driver.set_provider(Some(provider));
            }
            None => log::trace!("Select entered an object without a hand provider"),
        }
    }

    /// A hand let go of `object`. The override is cleared only when it
    /// still belongs to `object`.
    pub fn select_exited(&self, driver: &mut HandDriver, object: InteractableKey) {
        let Some(provider) = self.provider_of(object) else {
            return;
        };
        if driver.is_overridden() && driver.current_provider() == provider {
            log::debug!("Select exited '{}'", self.name(object).unwrap_or_default());
            driver.set_provider(None);
        }
    }

    /// `object` was activated. Returns whether a select/activate provider
    /// reacted to it.
    pub fn activated(&self, providers: &mut ProviderSet, object: InteractableKey) -> bool {
        self.with_select_activate(providers, object, SelectActivateProvider::activate)
    }

    /// `object` was deactivated. Returns whether a select/activate provider
    /// reacted to it.
    pub fn deactivated(&self, providers: &mut ProviderSet, object: InteractableKey) -> bool {
        self.with_select_activate(providers, object, SelectActivateProvider::deactivate)
    }

    fn with_select_activate<F>(&self, providers: &mut ProviderSet, object: InteractableKey, f: F) -> bool
    where
        F: FnOnce(&mut SelectActivateProvider),
    {
        let provider = self
            .provider_of(object)
            .and_then(|key| providers.get_mut(key))
            .and_then(|p| p.as_select_activate_mut());
        match provider {
            Some(provider) => {
                f(provider);
                true
            }
            None => false,
        }
    }
}
