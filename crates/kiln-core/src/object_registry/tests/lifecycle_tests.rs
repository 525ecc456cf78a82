use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;

use crate::object_registry::error::{ObjectRegistryError, PhaseCallbackError};
use crate::object_registry::lifecycle::{LifecycleManager, Phase};
use crate::object_registry::traits::{Lifecycle, RegistryObject};

/// Records every phase callback it receives, optionally failing one phase.
#[derive(Debug)]
struct TrackedObject {
    calls: Arc<StdMutex<Vec<&'static str>>>,
    fail_on: Option<Phase>,
}

impl TrackedObject {
    fn new(calls: Arc<StdMutex<Vec<&'static str>>>) -> Self {
        Self { calls, fail_on: None }
    }

    fn failing_on(calls: Arc<StdMutex<Vec<&'static str>>>, phase: Phase) -> Self {
        Self { calls, fail_on: Some(phase) }
    }

    fn record(&self, phase: Phase) -> Result<(), PhaseCallbackError> {
        self.calls.lock().unwrap().push(phase.name());
        if self.fail_on == Some(phase) {
            Err(PhaseCallbackError::new(format!("{} refused", phase)))
        } else {
            Ok(())
        }
    }
}

impl RegistryObject for TrackedObject {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
        Some(self)
    }
}

#[async_trait]
impl Lifecycle for TrackedObject {
    async fn initialise(&self) -> Result<(), PhaseCallbackError> {
        self.record(Phase::Initialise)
    }

    async fn start(&self) -> Result<(), PhaseCallbackError> {
        self.record(Phase::Start)
    }

    async fn stop(&self) -> Result<(), PhaseCallbackError> {
        self.record(Phase::Stop)
    }

    async fn dispose(&self) -> Result<(), PhaseCallbackError> {
        self.record(Phase::Dispose)
    }
}

fn tracker() -> Arc<StdMutex<Vec<&'static str>>> {
    Arc::new(StdMutex::new(Vec::new()))
}

#[test]
fn phase_order_is_monotonic() {
    assert!(Phase::Initialise.follows(Phase::NotInLifecycle));
    assert!(Phase::Start.follows(Phase::Initialise));
    assert!(!Phase::Initialise.follows(Phase::Start));
    assert!(!Phase::Start.follows(Phase::Start));
    // The terminal phase is executable from every state but its own.
    assert!(Phase::Dispose.follows(Phase::NotInLifecycle));
    assert!(Phase::Dispose.follows(Phase::Start));
    assert!(!Phase::Dispose.follows(Phase::Dispose));
    // No phase is a forward move once the object is disposed.
    assert!(!Phase::Stop.follows(Phase::Dispose));
}

#[test]
fn phase_names_round_trip() {
    for phase in Phase::DECLARED_ORDER {
        assert_eq!(Phase::from_name(phase.name()), Some(phase));
    }
    assert_eq!(Phase::from_name("not-in-lifecycle"), Some(Phase::NotInLifecycle));
    assert_eq!(Phase::from_name("bogus"), None);
}

#[test]
fn mark_completed_deduplicates() {
    let manager = LifecycleManager::new();
    manager.mark_completed(Phase::Initialise);
    manager.mark_completed(Phase::Initialise);
    manager.mark_completed(Phase::Start);

    assert_eq!(manager.completed_phases(), vec![Phase::Initialise, Phase::Start]);
    assert!(manager.is_completed(Phase::Initialise));
    assert!(!manager.is_completed(Phase::Stop));
}

#[tokio::test]
async fn apply_completed_phases_walks_in_order() {
    let manager = LifecycleManager::new();
    manager.mark_completed(Phase::Initialise);
    manager.mark_completed(Phase::Start);

    let calls = tracker();
    let object: Arc<dyn RegistryObject> = Arc::new(TrackedObject::new(calls.clone()));
    let mut reached = Phase::NotInLifecycle;

    manager
        .apply_completed_phases("tracked", &object, &mut reached)
        .await
        .unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["initialise", "start"]);
    assert_eq!(reached, Phase::Start);
}

#[tokio::test]
async fn apply_completed_phases_is_idempotent() {
    let manager = LifecycleManager::new();
    manager.mark_completed(Phase::Initialise);
    manager.mark_completed(Phase::Start);

    let calls = tracker();
    let object: Arc<dyn RegistryObject> = Arc::new(TrackedObject::new(calls.clone()));
    let mut reached = Phase::NotInLifecycle;

    manager
        .apply_completed_phases("tracked", &object, &mut reached)
        .await
        .unwrap();
    let after_first = calls.lock().unwrap().len();

    // No new phase completed globally between the calls: the second walk
    // must invoke zero additional callbacks.
    manager
        .apply_completed_phases("tracked", &object, &mut reached)
        .await
        .unwrap();
    assert_eq!(calls.lock().unwrap().len(), after_first);
}

#[tokio::test]
async fn apply_completed_phases_fails_fast() {
    let manager = LifecycleManager::new();
    manager.mark_completed(Phase::Initialise);
    manager.mark_completed(Phase::Start);

    let calls = tracker();
    let object: Arc<dyn RegistryObject> =
        Arc::new(TrackedObject::failing_on(calls.clone(), Phase::Initialise));
    let mut reached = Phase::NotInLifecycle;

    let err = manager
        .apply_completed_phases("tracked", &object, &mut reached)
        .await
        .unwrap_err();

    match err {
        ObjectRegistryError::PhaseFailed { phase, key, .. } => {
            assert_eq!(phase, Phase::Initialise);
            assert_eq!(key, "tracked");
        }
        other => panic!("unexpected error: {other}"),
    }
    // The failing phase was attempted, the next one never ran.
    assert_eq!(*calls.lock().unwrap(), vec!["initialise"]);
    assert_eq!(reached, Phase::NotInLifecycle);
}

#[tokio::test]
async fn apply_phase_applies_window_exclusive_inclusive() {
    let manager = LifecycleManager::new();
    let calls = tracker();
    let object: Arc<dyn RegistryObject> = Arc::new(TrackedObject::new(calls.clone()));
    let mut reached = Phase::NotInLifecycle;

    manager
        .apply_phase("tracked", &object, &mut reached, Phase::NotInLifecycle, Phase::Start)
        .await
        .unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["initialise", "start"]);
    assert_eq!(reached, Phase::Start);
}

#[tokio::test]
async fn apply_phase_same_bounds_is_noop() {
    let manager = LifecycleManager::new();
    let calls = tracker();
    let object: Arc<dyn RegistryObject> = Arc::new(TrackedObject::new(calls.clone()));
    let mut reached = Phase::NotInLifecycle;

    manager
        .apply_phase("tracked", &object, &mut reached, Phase::Start, Phase::Start)
        .await
        .unwrap();

    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(reached, Phase::NotInLifecycle);
}

#[tokio::test]
async fn apply_phase_skips_object_already_past_target() {
    let manager = LifecycleManager::new();
    let calls = tracker();
    let object: Arc<dyn RegistryObject> = Arc::new(TrackedObject::new(calls.clone()));
    let mut reached = Phase::Stop;

    manager
        .apply_phase("tracked", &object, &mut reached, Phase::NotInLifecycle, Phase::Start)
        .await
        .unwrap();

    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(reached, Phase::Stop);
}

#[tokio::test]
async fn objects_without_lifecycle_capability_pass_through() {
    #[derive(Debug)]
    struct Inert;
    impl RegistryObject for Inert {
        fn type_name(&self) -> &'static str {
            std::any::type_name::<Self>()
        }
    }

    let manager = LifecycleManager::new();
    manager.mark_completed(Phase::Initialise);

    let object: Arc<dyn RegistryObject> = Arc::new(Inert);
    let mut reached = Phase::NotInLifecycle;
    manager
        .apply_completed_phases("inert", &object, &mut reached)
        .await
        .unwrap();

    // Phases advance without callbacks.
    assert_eq!(reached, Phase::Initialise);
}
