use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::sync::Arc;

use crate::object_registry::error::ObjectRegistryError;
use crate::object_registry::traits::RegistryObject;

/// A named lifecycle phase.
///
/// Registered objects move monotonically forward along
/// [`Phase::DECLARED_ORDER`], starting from the synthetic
/// [`Phase::NotInLifecycle`] state. `Dispose` is terminal and, being the
/// last phase in the order, may be reached from any earlier state; no phase
/// is ever executed twice for the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Synthetic initial state: the object has not entered the lifecycle yet.
    NotInLifecycle,
    Initialise,
    Start,
    Stop,
    Dispose,
}

impl Phase {
    /// The fixed phase sequence, in initialisation order. Disposal order is
    /// the inverse.
    pub const DECLARED_ORDER: [Phase; 4] =
        [Phase::Initialise, Phase::Start, Phase::Stop, Phase::Dispose];

    /// The phases that tear an object down rather than bring it up.
    pub fn is_teardown(&self) -> bool {
        matches!(self, Phase::Stop | Phase::Dispose)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::NotInLifecycle => "not-in-lifecycle",
            Phase::Initialise => "initialise",
            Phase::Start => "start",
            Phase::Stop => "stop",
            Phase::Dispose => "dispose",
        }
    }

    /// Parse a phase from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "not-in-lifecycle" => Some(Phase::NotInLifecycle),
            "initialise" => Some(Phase::Initialise),
            "start" => Some(Phase::Start),
            "stop" => Some(Phase::Stop),
            "dispose" => Some(Phase::Dispose),
            _ => None,
        }
    }

    fn rank(self) -> i8 {
        match self {
            Phase::NotInLifecycle => -1,
            Phase::Initialise => 0,
            Phase::Start => 1,
            Phase::Stop => 2,
            Phase::Dispose => 3,
        }
    }

    /// Whether executing `self` is a forward move for an object whose highest
    /// completed phase is `reached`. This single rule encodes both
    /// invariants: a completed phase is never re-executed, and `Dispose`
    /// (ranked last) is executable from any other state.
    pub fn follows(self, reached: Phase) -> bool {
        self.rank() > reached.rank()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finite-state driver advancing objects through the phase sequence.
///
/// The manager tracks which phases have been completed globally, so that an
/// object registered late can be caught up to the point the rest of the
/// system has already reached. Per-object progress (`reached`) is owned by
/// the caller, which for registered objects is the store entry.
///
/// Phase advancement for a single object is not reentrant-safe; the
/// registration path is the only phase-advancing writer for a freshly added
/// object, and global phase firing is serialized by the caller.
#[derive(Debug, Default)]
pub struct LifecycleManager {
    /// Globally completed phases, in the order they completed.
    completed: RwLock<Vec<Phase>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self { completed: RwLock::new(Vec::new()) }
    }

    /// Phases completed globally so far, in completion order.
    pub fn completed_phases(&self) -> Vec<Phase> {
        self.completed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_completed(&self, phase: Phase) -> bool {
        self.completed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&phase)
    }

    /// Record that `phase` has completed globally.
    pub fn mark_completed(&self, phase: Phase) {
        let mut completed = self.completed.write().unwrap_or_else(PoisonError::into_inner);
        if !completed.contains(&phase) {
            completed.push(phase);
        }
    }

    /// Walk every phase already completed globally, in order, invoking each
    /// one the object has not yet passed. Stops at the first failure and
    /// surfaces it; phases applied before the failure stay applied.
    pub async fn apply_completed_phases(
        &self,
        key: &str,
        object: &Arc<dyn RegistryObject>,
        reached: &mut Phase,
    ) -> Result<(), ObjectRegistryError> {
        for phase in self.completed_phases() {
            self.apply_single(key, object, reached, phase).await?;
        }
        Ok(())
    }

    /// Apply every phase strictly between `from` (exclusive) and `to`
    /// (inclusive), in declared order. No-op when `from == to` or when the
    /// object has already passed `to`.
    pub async fn apply_phase(
        &self,
        key: &str,
        object: &Arc<dyn RegistryObject>,
        reached: &mut Phase,
        from: Phase,
        to: Phase,
    ) -> Result<(), ObjectRegistryError> {
        if from == to || !to.follows(*reached) {
            return Ok(());
        }
        for phase in Phase::DECLARED_ORDER {
            // Window: strictly after `from`, up to and including `to`.
            if phase.follows(from) && !phase.follows(to) {
                self.apply_single(key, object, reached, phase).await?;
            }
        }
        Ok(())
    }

    /// Apply one phase if it is a forward move for the object.
    pub(crate) async fn apply_single(
        &self,
        key: &str,
        object: &Arc<dyn RegistryObject>,
        reached: &mut Phase,
        phase: Phase,
    ) -> Result<(), ObjectRegistryError> {
        if !phase.follows(*reached) {
            return Ok(());
        }
        Self::invoke(key, object, phase).await?;
        *reached = phase;
        Ok(())
    }

    /// Invoke one phase callback on the object, if it carries the
    /// [`Lifecycle`](super::traits::Lifecycle) capability. Objects without
    /// the capability pass through phases without side effects.
    async fn invoke(
        key: &str,
        object: &Arc<dyn RegistryObject>,
        phase: Phase,
    ) -> Result<(), ObjectRegistryError> {
        let Some(lifecycle) = object.as_lifecycle() else {
            return Ok(());
        };
        log::debug!("Applying phase '{}' to '{}'", phase, key);
        let outcome = match phase {
            Phase::NotInLifecycle => Ok(()),
            Phase::Initialise => lifecycle.initialise().await,
            Phase::Start => lifecycle.start().await,
            Phase::Stop => lifecycle.stop().await,
            Phase::Dispose => lifecycle.dispose().await,
        };
        outcome.map_err(|source| ObjectRegistryError::PhaseFailed {
            phase,
            key: key.to_string(),
            source,
        })
    }
}
