use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::kernel::context::RuntimeContext;
use crate::object_registry::error::ObjectRegistryError;
use crate::object_registry::injector::InjectionEngine;
use crate::object_registry::lifecycle::{LifecycleManager, Phase};
use crate::object_registry::store::{ObjectMetadata, ObjectStore};
use crate::object_registry::traits::RegistryObject;

/// The registry every hosted object passes through.
///
/// Registration stores the instance, fills its dependency slots from the
/// objects already present, and fast-forwards it through every lifecycle
/// phase the rest of the system has completed. Useful for lightweight
/// contexts that don't want a heavier object container; slot discovery is
/// uncached and bulk injection makes no ordering guarantees between
/// objects.
pub struct SimpleRegistry {
    store: ObjectStore,
    lifecycle: LifecycleManager,
    root_context: Arc<RuntimeContext>,
    /// What the injector actually wired, per owning key. Feeds the
    /// auto-discovered dependency source of the graph resolver.
    wired: RwLock<HashMap<String, Vec<(String, Arc<dyn RegistryObject>)>>>,
}

impl SimpleRegistry {
    pub fn new(root_context: Arc<RuntimeContext>) -> Self {
        Self {
            store: ObjectStore::new(),
            lifecycle: LifecycleManager::new(),
            root_context,
            wired: RwLock::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn root_context(&self) -> &Arc<RuntimeContext> {
        &self.root_context
    }

    /// Register an instance under `key`.
    ///
    /// An existing entry is disposed and replaced first (a warning is
    /// emitted; a teardown failure of the displaced entry is logged but does
    /// not abort the replacement). The new instance is injected and then
    /// caught up to every globally completed phase; a phase failure
    /// surfaces as [`ObjectRegistryError::Registration`] and leaves the
    /// entry in the store, since removing it mid-failure could mask the
    /// original cause.
    pub async fn register_object(
        &self,
        key: &str,
        instance: Arc<dyn RegistryObject>,
        metadata: ObjectMetadata,
    ) -> Result<(), ObjectRegistryError> {
        if self.store.contains(key) {
            log::warn!("An entry already exists for key '{}'. It will be replaced", key);
            if let Err(e) = self.unregister_object(key).await {
                log::error!("Teardown of replaced entry '{}' failed: {}", key, e);
            }
        }

        self.store.put(key, instance.clone(), metadata);

        let engine = InjectionEngine::new(&self.store, &self.root_context);
        let wired = engine.inject(&instance)?;
        self.wired
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), wired);

        let mut reached = Phase::NotInLifecycle;
        let result = self
            .lifecycle
            .apply_completed_phases(key, &instance, &mut reached)
            .await;
        self.store.set_phase_reached(key, reached);
        result.map_err(|source| ObjectRegistryError::Registration {
            key: key.to_string(),
            source: Box::new(source),
        })
    }

    /// Detach the entry for `key` and run its terminal teardown phase.
    pub async fn unregister_object(
        &self,
        key: &str,
    ) -> Result<Arc<dyn RegistryObject>, ObjectRegistryError> {
        let reached = self.store.phase_reached(key);
        let Some(instance) = self.store.remove(key) else {
            return Err(ObjectRegistryError::NotFound(key.to_string()));
        };
        self.wired
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);

        let mut reached = reached.unwrap_or(Phase::NotInLifecycle);
        self.lifecycle
            .apply_single(key, &instance, &mut reached, Phase::Dispose)
            .await?;
        Ok(instance)
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn RegistryObject>> {
        self.store.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    /// First registered instance of concrete type `T`.
    pub fn lookup_by_type<T: RegistryObject>(&self) -> Option<Arc<T>> {
        self.store.lookup_by_type::<T>()
    }

    /// Every registered instance of concrete type `T`, in registration order.
    pub fn lookup_all_by_type<T: RegistryObject>(&self) -> Vec<Arc<T>> {
        self.store.lookup_all_by_type::<T>()
    }

    /// Fill the dependency slots of an object without registering it.
    pub fn inject(&self, object: &Arc<dyn RegistryObject>) -> Result<(), ObjectRegistryError> {
        let engine = InjectionEngine::new(&self.store, &self.root_context);
        engine.inject(object).map(|_| ())
    }

    /// Catch an unregistered object up to every globally completed phase.
    /// Returns the highest phase applied.
    pub async fn apply_lifecycle(
        &self,
        object: &Arc<dyn RegistryObject>,
    ) -> Result<Phase, ObjectRegistryError> {
        let mut reached = Phase::NotInLifecycle;
        self.lifecycle
            .apply_completed_phases(object.type_name(), object, &mut reached)
            .await?;
        Ok(reached)
    }

    /// Apply the phases strictly between `from` and `to` to an unregistered
    /// object.
    pub async fn apply_lifecycle_phase(
        &self,
        object: &Arc<dyn RegistryObject>,
        from: Phase,
        to: Phase,
    ) -> Result<(), ObjectRegistryError> {
        let mut reached = from;
        self.lifecycle
            .apply_phase(object.type_name(), object, &mut reached, from, to)
            .await
    }

    /// Apply one phase to the registered entry for `key`, persisting the
    /// phase it reached.
    pub async fn apply_phase_to(&self, key: &str, phase: Phase) -> Result<(), ObjectRegistryError> {
        let Some(instance) = self.store.get(key) else {
            return Err(ObjectRegistryError::NotFound(key.to_string()));
        };
        let mut reached = self.store.phase_reached(key).unwrap_or(Phase::NotInLifecycle);
        let result = self
            .lifecycle
            .apply_single(key, &instance, &mut reached, phase)
            .await;
        self.store.set_phase_reached(key, reached);
        result
    }

    /// Drive every registered object through `phase` and mark it globally
    /// completed.
    ///
    /// Startup phases run in registration order and fail fast; the phase is
    /// not marked completed on failure. Teardown phases run in reverse
    /// registration order, continue past individual failures, and are
    /// always marked completed so late registrations do not resurrect a
    /// stopping system.
    pub async fn fire_phase(&self, phase: Phase) -> Result<(), ObjectRegistryError> {
        let mut keys = self.store.keys();
        if phase.is_teardown() {
            keys.reverse();
            let mut failures = Vec::new();
            for key in keys {
                match self.apply_phase_to(&key, phase).await {
                    Ok(()) | Err(ObjectRegistryError::NotFound(_)) => {}
                    Err(e) => {
                        log::error!("Error applying phase '{}' to '{}': {}", phase, key, e);
                        failures.push(e.to_string());
                    }
                }
            }
            self.lifecycle.mark_completed(phase);
            if failures.is_empty() {
                Ok(())
            } else {
                Err(ObjectRegistryError::Sweep { phase, details: failures.join("; ") })
            }
        } else {
            for key in keys {
                match self.apply_phase_to(&key, phase).await {
                    Ok(()) | Err(ObjectRegistryError::NotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
            self.lifecycle.mark_completed(phase);
            Ok(())
        }
    }

    /// The `(key, instance)` pairs the injector wired into the entry for
    /// `key` at registration time.
    pub fn wired_dependencies(&self, key: &str) -> Vec<(String, Arc<dyn RegistryObject>)> {
        self.wired
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}
