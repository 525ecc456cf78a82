//! End-to-end host scenarios: configuration-driven teardown ordering and
//! artifact groups sharing one isolation domain.
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;

use crate::config::data::{ConfigData, ConfigFormat};
use crate::isolation::boundary::ArtifactBoundary;
use crate::isolation::descriptor::{ArtifactPluginDescriptor, DomainDescriptor};
use crate::isolation::policy::LookupPolicy;
use crate::kernel::bootstrap::Application;
use crate::object_registry::error::{PhaseCallbackError, SlotAssignError};
use crate::object_registry::slot::{OptionalSlotCell, ResolvedSlot, SlotDescriptor};
use crate::object_registry::traits::{Injectable, Lifecycle, RegistryObject};

type CallLog = Arc<StdMutex<Vec<String>>>;

#[derive(Debug)]
struct Store {
    log: CallLog,
}

impl RegistryObject for Store {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
        Some(self)
    }
}

#[async_trait]
impl Lifecycle for Store {
    async fn stop(&self) -> Result<(), PhaseCallbackError> {
        self.log.lock().unwrap().push("store:stop".to_string());
        Ok(())
    }
}

/// References the store only through configuration: no slot points at it.
#[derive(Debug)]
struct Indexer {
    log: CallLog,
    metrics: OptionalSlotCell<Metrics>,
}

#[derive(Debug)]
struct Metrics;

impl RegistryObject for Metrics {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl RegistryObject for Indexer {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
        Some(self)
    }

    fn as_injectable(&self) -> Option<&dyn Injectable> {
        Some(self)
    }
}

#[async_trait]
impl Lifecycle for Indexer {
    async fn stop(&self) -> Result<(), PhaseCallbackError> {
        self.log.lock().unwrap().push("indexer:stop".to_string());
        Ok(())
    }
}

impl Injectable for Indexer {
    fn dependency_slots(&self) -> Vec<SlotDescriptor> {
        vec![SlotDescriptor::optional::<Metrics>("metrics")]
    }

    fn assign(&self, slot: &SlotDescriptor, value: ResolvedSlot) -> Result<(), SlotAssignError> {
        self.metrics.accept(slot, value)
    }
}

#[tokio::test]
async fn configuration_declared_dependencies_order_teardown() {
    let content = r#"{"components": {"indexer": {"depends-on": ["store"]}}}"#;
    let config = ConfigData::from_str(content, ConfigFormat::Json).unwrap();
    let mut app = Application::with_config(&config).unwrap();

    let log: CallLog = Arc::new(StdMutex::new(Vec::new()));
    // The store is registered *after* the indexer, so reverse registration
    // order alone would stop it first; the configuration dependency flips
    // that.
    let indexer = Arc::new(Indexer { log: log.clone(), metrics: OptionalSlotCell::new() });
    app.registry().register_object("indexer", indexer.clone(), None).await.unwrap();
    app.registry()
        .register_object("store", Arc::new(Store { log: log.clone() }), None)
        .await
        .unwrap();

    // No Metrics instance is registered: the optional slot resolved absent
    // and no error surfaced.
    assert!(indexer.metrics.is_resolved());
    assert!(!indexer.metrics.is_present());

    app.start().await.unwrap();
    app.shutdown().await.unwrap();

    let calls = log.lock().unwrap().clone();
    let indexer_stop = calls.iter().position(|c| c == "indexer:stop").unwrap();
    let store_stop = calls.iter().position(|c| c == "store:stop").unwrap();
    assert!(indexer_stop < store_stop);
}

#[tokio::test]
async fn artifact_groups_share_one_domain() {
    let root = tempfile::tempdir().unwrap();
    let app = Application::new().unwrap();

    struct ContainerBoundary {
        policy: LookupPolicy,
    }

    impl ArtifactBoundary for ContainerBoundary {
        fn artifact_id(&self) -> &str {
            "container"
        }

        fn lookup_policy(&self) -> &LookupPolicy {
            &self.policy
        }

        fn resource_locations(&self) -> &[std::path::PathBuf] {
            &[]
        }
    }

    let parent: Arc<dyn ArtifactBoundary> =
        Arc::new(ContainerBoundary { policy: LookupPolicy::default() });

    let mut shared_plugin = ArtifactPluginDescriptor::new("http", "2.1.0");
    shared_plugin.exported_packages.insert("org.kiln.http".to_string());
    let mut descriptor = DomainDescriptor::new("commerce", root.path());
    descriptor.plugins.push(shared_plugin);

    // Two applications deployed on the same domain get one boundary.
    let for_app_a = app
        .domain_factory()
        .get_or_create(&descriptor, parent.clone(), Vec::new())
        .unwrap();
    let for_app_b = app
        .domain_factory()
        .get_or_create(&descriptor, parent, Vec::new())
        .unwrap();
    assert!(Arc::ptr_eq(&for_app_a, &for_app_b));

    // Both carry the shared plugin parent-first, so the package has one
    // identity across the artifacts layered on the domain.
    assert!(for_app_a.resolves_through_parent("org.kiln.http"));

    for_app_a.attach_artifact("app-a");
    for_app_b.attach_artifact("app-b");
    for_app_a.detach_artifact("app-a");
    assert_eq!(app.domain_factory().cached_count(), 1);
    for_app_b.detach_artifact("app-b");
    assert_eq!(app.domain_factory().cached_count(), 0);
}
