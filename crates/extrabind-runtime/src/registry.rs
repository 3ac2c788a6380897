//! Statically populated binder registry
//!
//! Binders are registered explicitly under their target's canonical name,
//! typically once at startup from a generated dispatch table, and looked up
//! by that name when a target asks to be injected.

use crate::{ExtraBinder, ExtraSource, Finder, RuntimeError, RuntimeResult};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Global binder registry
static BINDER_REGISTRY: OnceCell<BinderRegistry> = OnceCell::new();

/// Registry of extra binders keyed by canonical class name
pub struct BinderRegistry {
    binders: RwLock<HashMap<String, Arc<dyn ExtraBinder>>>,
}

impl BinderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            binders: RwLock::new(HashMap::new()),
        }
    }

    /// Get the global registry instance
    pub fn global() -> &'static BinderRegistry {
        BINDER_REGISTRY.get_or_init(BinderRegistry::new)
    }

    /// Register a binder, returning the one it replaced
    pub fn register(&self, binder: Arc<dyn ExtraBinder>) -> Option<Arc<dyn ExtraBinder>> {
        let name = binder.target_name().to_string();
        debug!(target_class = %name, "registering extra binder");
        self.binders.write().insert(name, binder)
    }

    /// Look up the binder for a class
    pub fn get(&self, target_name: &str) -> Option<Arc<dyn ExtraBinder>> {
        self.binders.read().get(target_name).cloned()
    }

    pub fn contains(&self, target_name: &str) -> bool {
        self.binders.read().contains_key(target_name)
    }

    pub fn len(&self) -> usize {
        self.binders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.read().is_empty()
    }

    /// Inject `target` with the binder registered under `target_name`
    pub fn inject(
        &self,
        target_name: &str,
        finder: Finder,
        target: &mut dyn Any,
        source: &dyn ExtraSource,
    ) -> RuntimeResult<()> {
        // Clone out of the lock so a binder may itself consult the registry.
        let binder = self
            .get(target_name)
            .ok_or_else(|| RuntimeError::UnknownBinder(target_name.to_string()))?;
        binder.inject(finder, target, source)
    }
}

impl Default for BinderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
