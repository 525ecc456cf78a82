use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::object_registry::error::{PhaseCallbackError, SlotAssignError};
use crate::object_registry::slot::{ResolvedSlot, SlotDescriptor};

/// Base trait for everything stored in the registry.
///
/// Capabilities are opted into through the `as_*` accessors rather than
/// discovered by runtime attribute scanning: an object that wants lifecycle
/// callbacks, dependency injection, or declared-dependency reporting
/// overrides the matching accessor to return itself. The defaults return
/// `None`, so plain value objects register with a one-line impl.
pub trait RegistryObject: Any + Send + Sync {
    /// Concrete type name, used in diagnostics. Implementations return
    /// `std::any::type_name::<Self>()`.
    fn type_name(&self) -> &'static str;

    /// Lifecycle capability: phase callbacks.
    fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
        None
    }

    /// Injection capability: declared dependency slots.
    fn as_injectable(&self) -> Option<&dyn Injectable> {
        None
    }

    /// Declared-dependency capability, for dependencies invisible to slot
    /// discovery (e.g. held inside a wrapped delegate).
    fn as_dependency_provider(&self) -> Option<&dyn DependencyProvider> {
        None
    }
}

impl fmt::Debug for dyn RegistryObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryObject")
            .field("type_name", &self.type_name())
            .finish()
    }
}

/// Phase callbacks for objects participating in the lifecycle.
///
/// Every method defaults to a no-op so implementors only write the phases
/// they care about.
#[async_trait]
pub trait Lifecycle: Send + Sync {
    async fn initialise(&self) -> Result<(), PhaseCallbackError> {
        Ok(())
    }

    async fn start(&self) -> Result<(), PhaseCallbackError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), PhaseCallbackError> {
        Ok(())
    }

    async fn dispose(&self) -> Result<(), PhaseCallbackError> {
        Ok(())
    }
}

/// Injection capability: the object declares its dependency slots and
/// accepts resolved values for them.
///
/// Slot discovery is intentionally not cached per type; the engine asks the
/// object anew on every injection pass, and no dependency ordering between
/// objects is guaranteed during bulk injection.
pub trait Injectable: Send + Sync {
    /// The slots this object wants filled.
    fn dependency_slots(&self) -> Vec<SlotDescriptor>;

    /// Accept a resolved value for one of the declared slots.
    fn assign(&self, slot: &SlotDescriptor, value: ResolvedSlot) -> Result<(), SlotAssignError>;
}

/// Capability for objects that volunteer dependencies the registry cannot
/// see through their slots.
pub trait DependencyProvider: Send + Sync {
    /// The declared direct dependencies, as `(dependency, key)` pairs.
    fn declared_direct_dependencies(&self) -> Vec<(Arc<dyn RegistryObject>, String)>;
}
