use std::sync::Arc;

use crate::config::data::ConfigData;
use crate::config::dependencies::ConfigComponentDependencies;
use crate::dependency_graph::resolver::DependencyResolver;
use crate::dependency_graph::sources::ConfigurationDependencySource;
use crate::isolation::factory::DomainBoundaryFactory;
use crate::kernel::constants;
use crate::kernel::context::RuntimeContext;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::object_registry::lifecycle::Phase;
use crate::object_registry::registry::SimpleRegistry;

/// Main application struct coordinating the registry, the root context and
/// the isolation-domain factory.
pub struct Application {
    context: Arc<RuntimeContext>,
    registry: Arc<SimpleRegistry>,
    domain_factory: Arc<DomainBoundaryFactory>,
    config_dependencies: Option<Arc<ConfigComponentDependencies>>,
    initialized: bool,
}

impl Application {
    /// Creates a new application instance rooted in the current working
    /// directory, with no configuration-declared dependencies.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Creates a new application instance whose graph resolver also consults
    /// the `components` section of the given configuration.
    pub fn with_config(config: &ConfigData) -> Result<Self> {
        Self::build(Some(Arc::new(ConfigComponentDependencies::from_config(config))))
    }

    fn build(config_dependencies: Option<Arc<ConfigComponentDependencies>>) -> Result<Self> {
        log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let home_dir = std::env::current_dir().map_err(|e| Error::KernelLifecycle {
            phase: KernelLifecyclePhase::Bootstrap,
            message: format!("cannot determine working directory: {e}"),
            source: None,
        })?;
        let context = Arc::new(RuntimeContext::new(constants::APP_NAME, home_dir));
        let registry = Arc::new(SimpleRegistry::new(context.clone()));

        // Seed the root context into the store directly: no phase has
        // completed yet and the context declares no slots, so the full
        // registration path would be a no-op around this put.
        registry
            .store()
            .put(constants::CONTEXT_OBJECT_KEY, context.clone(), None);

        Ok(Application {
            context,
            registry,
            domain_factory: Arc::new(DomainBoundaryFactory::new()),
            config_dependencies,
            initialized: false,
        })
    }

    pub fn context(&self) -> &Arc<RuntimeContext> {
        &self.context
    }

    pub fn registry(&self) -> &Arc<SimpleRegistry> {
        &self.registry
    }

    pub fn domain_factory(&self) -> &Arc<DomainBoundaryFactory> {
        &self.domain_factory
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// A fresh resolver for one dependency walk. Each walk owns its
    /// processed-key set, so concurrent walks never share state.
    pub fn dependency_resolver(&self) -> DependencyResolver {
        let configuration = self
            .config_dependencies
            .clone()
            .map(|c| c as Arc<dyn ConfigurationDependencySource>);
        DependencyResolver::new(self.registry.clone(), configuration)
    }

    /// Drive every registered object through the startup phases, in
    /// registration order.
    pub async fn start(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::KernelLifecycle {
                phase: KernelLifecyclePhase::Start,
                message: "Application already started".to_string(),
                source: None,
            });
        }

        log::info!("Starting registered objects...");
        self.registry.fire_phase(Phase::Initialise).await?;
        self.registry.fire_phase(Phase::Start).await?;
        self.initialized = true;
        log::info!("Application started with {} objects.", self.registry.object_count());
        Ok(())
    }

    /// Tear the application down: stop and dispose every registered object
    /// in dependency-respecting order (dependents before dependencies).
    ///
    /// Individual phase failures are logged and do not halt the remaining
    /// teardown; the first batch of failures is reported once the sweep
    /// finishes.
    pub async fn shutdown(&mut self) -> Result<()> {
        log::info!("Shutting down registered objects...");

        let mut roots = self.registry.keys();
        roots.reverse();
        let mut resolver = self.dependency_resolver();
        let order = resolver.teardown_order(roots);

        let mut failures = Vec::new();
        for phase in [Phase::Stop, Phase::Dispose] {
            for key in &order {
                match self.registry.apply_phase_to(key, phase).await {
                    Ok(()) => {}
                    Err(crate::object_registry::ObjectRegistryError::NotFound(_)) => {}
                    Err(e) => {
                        log::error!("Error applying phase '{}' to '{}': {}", phase, key, e);
                        failures.push(e.to_string());
                    }
                }
            }
            self.registry.lifecycle().mark_completed(phase);
        }

        self.initialized = false;
        if failures.is_empty() {
            log::info!("Shutdown complete.");
            Ok(())
        } else {
            Err(Error::KernelLifecycle {
                phase: KernelLifecyclePhase::Shutdown,
                message: failures.join("; "),
                source: None,
            })
        }
    }
}
