use std::any::TypeId;
use std::sync::Arc;

use crate::kernel::context::RuntimeContext;
use crate::object_registry::error::ObjectRegistryError;
use crate::object_registry::slot::{ResolvedSlot, SlotDescriptor, SlotShape};
use crate::object_registry::store::ObjectStore;
use crate::object_registry::traits::RegistryObject;

/// Resolves the dependency slots of one object against the store.
///
/// Wiring is permissive: a plain slot with no match is left unset rather
/// than failing, so lightweight contexts can register partial object sets.
/// A dependent feature touching the unset slot fails at use time, not at
/// injection time.
pub struct InjectionEngine<'a> {
    store: &'a ObjectStore,
    root_context: &'a Arc<RuntimeContext>,
}

impl<'a> InjectionEngine<'a> {
    pub fn new(store: &'a ObjectStore, root_context: &'a Arc<RuntimeContext>) -> Self {
        Self { store, root_context }
    }

    /// Fill every slot the object declares, returning the `(key, instance)`
    /// pairs that were actually wired from the store.
    ///
    /// The first failing slot aborts processing for this object; slots
    /// assigned before it keep their values.
    pub fn inject(
        &self,
        object: &Arc<dyn RegistryObject>,
    ) -> Result<Vec<(String, Arc<dyn RegistryObject>)>, ObjectRegistryError> {
        let Some(injectable) = object.as_injectable() else {
            return Ok(Vec::new());
        };

        let mut wired = Vec::new();
        for slot in injectable.dependency_slots() {
            let resolved = match slot.shape {
                SlotShape::Collection => {
                    let matches = self.store.lookup_all_by_type_id(slot.element_type);
                    let values = matches.iter().map(|(_, v)| v.clone()).collect();
                    wired.extend(matches);
                    Some(ResolvedSlot::Many(values))
                }
                SlotShape::Plain | SlotShape::Optional => {
                    match self.resolve_single(&slot, &mut wired) {
                        Some(value) => Some(ResolvedSlot::One(value)),
                        // Optional slots are always resolved; plain slots are
                        // silently skipped when nothing matches.
                        None if slot.shape == SlotShape::Optional => Some(ResolvedSlot::Absent),
                        None => None,
                    }
                }
            };

            if let Some(value) = resolved {
                injectable.assign(&slot, value).map_err(|e| {
                    ObjectRegistryError::Injection {
                        slot: slot.name.to_string(),
                        object_type: object.type_name().to_string(),
                        message: e.to_string(),
                    }
                })?;
            }
        }
        Ok(wired)
    }

    /// Resolve a single-valued slot: by key when a qualifier names one, by
    /// type otherwise, with the root context as the final fallback for slots
    /// of the root-context type.
    fn resolve_single(
        &self,
        slot: &SlotDescriptor,
        wired: &mut Vec<(String, Arc<dyn RegistryObject>)>,
    ) -> Option<Arc<dyn RegistryObject>> {
        if let Some(qualifier) = slot.qualifier {
            let found = self.store.get(qualifier)?;
            wired.push((qualifier.to_string(), found.clone()));
            return Some(found);
        }

        if let Some((key, found)) = self.store.lookup_by_type_id(slot.element_type) {
            wired.push((key, found.clone()));
            return Some(found);
        }

        if slot.element_type == TypeId::of::<RuntimeContext>() {
            log::debug!("Slot '{}' fell back to the root context", slot.name);
            return Some(self.root_context.clone() as Arc<dyn RegistryObject>);
        }

        None
    }
}
