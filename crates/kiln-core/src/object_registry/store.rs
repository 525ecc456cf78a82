use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::object_registry::lifecycle::Phase;
use crate::object_registry::traits::RegistryObject;

/// Opaque metadata tag attached to an entry at registration time.
pub type ObjectMetadata = Option<Arc<dyn Any + Send + Sync>>;

struct Entry {
    instance: Arc<dyn RegistryObject>,
    metadata: ObjectMetadata,
    /// Highest lifecycle phase this entry has completed.
    phase_reached: Phase,
}

/// Thread-safe mapping from string key to instance plus metadata.
///
/// Writes use last-write-wins replacement (replace-then-log, not merge);
/// a put is immediately visible to lookups from any thread. Type-based
/// lookups scan in insertion order. `remove` only detaches the entry;
/// sequencing teardown phases beforehand is the caller's job.
#[derive(Default)]
pub struct ObjectStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    entries: HashMap<String, Entry>,
    insertion_order: Vec<String>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an instance under `key`. An existing entry is replaced and a
    /// warning is emitted; the displaced instance is returned so the caller
    /// can run its unregistration hook.
    pub fn put(
        &self,
        key: &str,
        instance: Arc<dyn RegistryObject>,
        metadata: ObjectMetadata,
    ) -> Option<Arc<dyn RegistryObject>> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let entry = Entry { instance, metadata, phase_reached: Phase::NotInLifecycle };
        let previous = inner.entries.insert(key.to_string(), entry);
        if let Some(previous) = previous {
            log::warn!("An entry already exists for key '{}'. It will be replaced", key);
            Some(previous.instance)
        } else {
            inner.insertion_order.push(key.to_string());
            None
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn RegistryObject>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(key)
            .map(|entry| entry.instance.clone())
    }

    pub fn metadata(&self, key: &str) -> ObjectMetadata {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(key)
            .and_then(|entry| entry.metadata.clone())
    }

    /// Detach the entry for `key`. Does not run teardown phases.
    pub fn remove(&self, key: &str) -> Option<Arc<dyn RegistryObject>> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let removed = inner.entries.remove(key);
        if removed.is_some() {
            inner.insertion_order.retain(|k| k != key);
        }
        removed.map(|entry| entry.instance)
    }

    /// Highest phase the entry for `key` has completed.
    pub fn phase_reached(&self, key: &str) -> Option<Phase> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(key)
            .map(|entry| entry.phase_reached)
    }

    pub(crate) fn set_phase_reached(&self, key: &str, phase: Phase) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = inner.entries.get_mut(key) {
            entry.phase_reached = phase;
        }
    }

    /// Registered keys, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .insertion_order
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First instance whose concrete type is `type_id`, in insertion order,
    /// together with its key.
    pub fn lookup_by_type_id(&self, type_id: TypeId) -> Option<(String, Arc<dyn RegistryObject>)> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        for key in &inner.insertion_order {
            if let Some(entry) = inner.entries.get(key) {
                if concrete_type_id(&entry.instance) == type_id {
                    return Some((key.clone(), entry.instance.clone()));
                }
            }
        }
        None
    }

    /// Every instance whose concrete type is `type_id`, in insertion order.
    pub fn lookup_all_by_type_id(&self, type_id: TypeId) -> Vec<(String, Arc<dyn RegistryObject>)> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut matches = Vec::new();
        for key in &inner.insertion_order {
            if let Some(entry) = inner.entries.get(key) {
                if concrete_type_id(&entry.instance) == type_id {
                    matches.push((key.clone(), entry.instance.clone()));
                }
            }
        }
        matches
    }

    /// First instance of concrete type `T`, downcast.
    pub fn lookup_by_type<T: RegistryObject>(&self) -> Option<Arc<T>> {
        self.lookup_by_type_id(TypeId::of::<T>())
            .and_then(|(_, instance)| downcast_instance::<T>(instance))
    }

    /// Every instance of concrete type `T`, in insertion order, downcast.
    pub fn lookup_all_by_type<T: RegistryObject>(&self) -> Vec<Arc<T>> {
        self.lookup_all_by_type_id(TypeId::of::<T>())
            .into_iter()
            .filter_map(|(_, instance)| downcast_instance::<T>(instance))
            .collect()
    }
}

/// TypeId of the concrete type behind a stored trait object.
pub(crate) fn concrete_type_id(instance: &Arc<dyn RegistryObject>) -> TypeId {
    let any: &dyn Any = &**instance;
    any.type_id()
}

fn downcast_instance<T: RegistryObject>(instance: Arc<dyn RegistryObject>) -> Option<Arc<T>> {
    let any: Arc<dyn Any + Send + Sync> = instance;
    Arc::downcast::<T>(any).ok()
}
