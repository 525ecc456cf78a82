use std::any::{Any, TypeId, type_name};
use std::sync::{Arc, PoisonError, RwLock};

use crate::object_registry::error::SlotAssignError;
use crate::object_registry::traits::RegistryObject;

/// How a slot wraps its element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotShape {
    /// A single required-looking value; left unset when nothing matches.
    Plain,
    /// An optional value; resolved to present or absent, never left unset.
    Optional,
    /// Every matching instance, in registration order.
    Collection,
}

/// A typed, optionally named dependency slot declared by an object.
#[derive(Debug, Clone)]
pub struct SlotDescriptor {
    /// Slot name, unique within the declaring object.
    pub name: &'static str,
    /// The element type the slot wants (the inner type for optional and
    /// collection slots).
    pub element_type: TypeId,
    /// Human-readable element type, for diagnostics.
    pub element_type_name: &'static str,
    /// When set, the slot is resolved by key instead of by type.
    pub qualifier: Option<&'static str>,
    pub shape: SlotShape,
}

impl SlotDescriptor {
    fn new<T: 'static>(name: &'static str, shape: SlotShape) -> Self {
        Self {
            name,
            element_type: TypeId::of::<T>(),
            element_type_name: type_name::<T>(),
            qualifier: None,
            shape,
        }
    }

    pub fn plain<T: 'static>(name: &'static str) -> Self {
        Self::new::<T>(name, SlotShape::Plain)
    }

    pub fn optional<T: 'static>(name: &'static str) -> Self {
        Self::new::<T>(name, SlotShape::Optional)
    }

    pub fn collection<T: 'static>(name: &'static str) -> Self {
        Self::new::<T>(name, SlotShape::Collection)
    }

    /// A plain slot resolved by registry key rather than by type.
    pub fn named<T: 'static>(name: &'static str, qualifier: &'static str) -> Self {
        let mut slot = Self::new::<T>(name, SlotShape::Plain);
        slot.qualifier = Some(qualifier);
        slot
    }
}

/// Value handed to [`Injectable::assign`](super::traits::Injectable::assign)
/// for a slot.
pub enum ResolvedSlot {
    /// A single matching instance (plain or present-optional slots).
    One(Arc<dyn RegistryObject>),
    /// An optional slot that resolved to nothing.
    Absent,
    /// Every match for a collection slot, in registration order.
    Many(Vec<Arc<dyn RegistryObject>>),
}

/// Downcast a stored object to its concrete type.
pub fn downcast_arc<T: Any + Send + Sync>(
    object: Arc<dyn RegistryObject>,
) -> Result<Arc<T>, SlotAssignError> {
    let any: Arc<dyn Any + Send + Sync> = object;
    Arc::downcast::<T>(any)
        .map_err(|_| SlotAssignError::new(format!("value is not a {}", type_name::<T>())))
}

/// Cell backing a plain slot: unset until the engine assigns a match.
#[derive(Debug)]
pub struct SlotCell<T> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T> Default for SlotCell<T> {
    fn default() -> Self {
        Self { value: RwLock::new(None) }
    }
}

impl<T: Any + Send + Sync> SlotCell<T> {
    pub fn new() -> Self {
        Self { value: RwLock::new(None) }
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_set(&self) -> bool {
        self.value.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    pub fn set(&self, value: Arc<T>) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    /// Accept an engine-resolved value for the slot described by `slot`.
    pub fn accept(&self, slot: &SlotDescriptor, value: ResolvedSlot) -> Result<(), SlotAssignError> {
        match value {
            ResolvedSlot::One(object) => {
                self.set(downcast_arc::<T>(object)?);
                Ok(())
            }
            _ => Err(SlotAssignError::shape_mismatch(slot.name)),
        }
    }
}

/// Cell backing an optional slot.
///
/// Distinguishes "not resolved yet" from "resolved to absent": the engine
/// always assigns optional slots, so after injection the cell reports
/// resolved either way.
#[derive(Debug)]
pub struct OptionalSlotCell<T> {
    state: RwLock<Option<Option<Arc<T>>>>,
}

impl<T> Default for OptionalSlotCell<T> {
    fn default() -> Self {
        Self { state: RwLock::new(None) }
    }
}

impl<T: Any + Send + Sync> OptionalSlotCell<T> {
    pub fn new() -> Self {
        Self { state: RwLock::new(None) }
    }

    /// Whether the engine has resolved this slot at all.
    pub fn is_resolved(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .flatten()
    }

    pub fn accept(&self, slot: &SlotDescriptor, value: ResolvedSlot) -> Result<(), SlotAssignError> {
        let resolved = match value {
            ResolvedSlot::One(object) => Some(downcast_arc::<T>(object)?),
            ResolvedSlot::Absent => None,
            ResolvedSlot::Many(_) => return Err(SlotAssignError::shape_mismatch(slot.name)),
        };
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(resolved);
        Ok(())
    }
}

/// Cell backing a collection slot.
#[derive(Debug)]
pub struct CollectionSlotCell<T> {
    values: RwLock<Vec<Arc<T>>>,
}

impl<T> Default for CollectionSlotCell<T> {
    fn default() -> Self {
        Self { values: RwLock::new(Vec::new()) }
    }
}

impl<T: Any + Send + Sync> CollectionSlotCell<T> {
    pub fn new() -> Self {
        Self { values: RwLock::new(Vec::new()) }
    }

    pub fn get(&self) -> Vec<Arc<T>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn accept(&self, slot: &SlotDescriptor, value: ResolvedSlot) -> Result<(), SlotAssignError> {
        match value {
            ResolvedSlot::Many(objects) => {
                let mut downcast = Vec::with_capacity(objects.len());
                for object in objects {
                    downcast.push(downcast_arc::<T>(object)?);
                }
                *self.values.write().unwrap_or_else(PoisonError::into_inner) = downcast;
                Ok(())
            }
            _ => Err(SlotAssignError::shape_mismatch(slot.name)),
        }
    }
}
