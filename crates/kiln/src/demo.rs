//! Demo services registered by the CLI so the host has something to drive.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use kiln_core::isolation::boundary::ArtifactBoundary;
use kiln_core::isolation::descriptor::{ArtifactPluginDescriptor, DomainDescriptor};
use kiln_core::isolation::policy::LookupPolicy;
use kiln_core::kernel::bootstrap::Application;
use kiln_core::kernel::error::Result;
use kiln_core::object_registry::error::{PhaseCallbackError, SlotAssignError};
use kiln_core::object_registry::slot::{
    OptionalSlotCell, ResolvedSlot, SlotCell, SlotDescriptor,
};
use kiln_core::object_registry::traits::{Injectable, Lifecycle, RegistryObject};

/// Wall-clock source the reporter depends on.
#[derive(Debug, Default)]
pub struct ClockService;

impl RegistryObject for ClockService {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Optional sink; the demo deliberately never registers one.
#[derive(Debug)]
pub struct MetricsSink;

impl RegistryObject for MetricsSink {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Lifecycle-aware service wired to the clock by type.
#[derive(Debug, Default)]
pub struct ReporterService {
    clock: SlotCell<ClockService>,
    metrics: OptionalSlotCell<MetricsSink>,
}

impl RegistryObject for ReporterService {
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

impl Injectable for ReporterService {
    fn dependency_slots(&self) -> Vec<SlotDescriptor> {
        vec![
            SlotDescriptor::plain::<ClockService>("clock"),
            SlotDescriptor::optional::<MetricsSink>("metrics"),
        ]
    }

    fn assign(
        &self,
        slot: &SlotDescriptor,
        value: ResolvedSlot,
    ) -> std::result::Result<(), SlotAssignError> {
        match slot.name {
            "clock" => self.clock.accept(slot, value),
            "metrics" => self.metrics.accept(slot, value),
            other => Err(SlotAssignError::unknown_slot(other)),
        }
    }
}

#[async_trait]
impl Lifecycle for ReporterService {
    async fn initialise(&self) -> std::result::Result<(), PhaseCallbackError> {
        info!(
            "reporter initialised (clock wired: {}, metrics present: {})",
            self.clock.is_set(),
            self.metrics.is_present()
        );
        Ok(())
    }

    async fn start(&self) -> std::result::Result<(), PhaseCallbackError> {
        info!("reporter started");
        Ok(())
    }

    async fn stop(&self) -> std::result::Result<(), PhaseCallbackError> {
        info!("reporter stopped");
        Ok(())
    }
}

pub async fn register_demo_services(app: &Application) -> Result<()> {
    app.registry()
        .register_object("clock", Arc::new(ClockService), None)
        .await?;
    app.registry()
        .register_object("reporter", Arc::new(ReporterService::default()), None)
        .await?;
    Ok(())
}

/// Container-level boundary the demo domain hangs off.
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

    fn resource_locations(&self) -> &[PathBuf] {
        &[]
    }
}

/// Build the shared demo domain and describe it.
pub fn describe_demo_domain(app: &Application) -> Result<Vec<String>> {
    let root = app.context().home_dir().join("domains").join("demo");
    kiln_core::utils::fs::ensure_dir_exists(&root).map_err(|e| {
        kiln_core::kernel::error::Error::Other(format!(
            "cannot create demo domain directory: {e}"
        ))
    })?;
    let parent: Arc<dyn ArtifactBoundary> =
        Arc::new(ContainerBoundary { policy: LookupPolicy::default() });

    let mut plugin = ArtifactPluginDescriptor::new("http", "1.0.0");
    plugin.exported_packages.insert("org.kiln.http".to_string());
    let mut descriptor = DomainDescriptor::new("demo", root);
    descriptor.plugins.push(plugin);

    let domain = app
        .domain_factory()
        .get_or_create(&descriptor, parent, Vec::new())?;

    Ok(vec![
        format!("- {}", domain.id()),
        format!(
            "  org.kiln.http resolves parent-first: {}",
            domain.resolves_through_parent("org.kiln.http")
        ),
        format!("  cached domains: {}", app.domain_factory().cached_count()),
    ])
}
