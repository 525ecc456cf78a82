use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::isolation::boundary::{ArtifactBoundary, IsolationDomain};
use crate::isolation::descriptor::DomainDescriptor;
use crate::isolation::error::IsolationError;
use crate::isolation::policy::{LookupPolicy, LookupStrategy};

/// Cached, at-most-once constructor for shared isolation domains.
///
/// The first request for a domain id builds the boundary; every later
/// request returns the cached instance without blocking. Construction runs
/// under a dedicated lock with a re-check, so two concurrent first-time
/// requesters still construct exactly once.
#[derive(Default)]
pub struct DomainBoundaryFactory {
    domains: Arc<RwLock<HashMap<String, Arc<IsolationDomain>>>>,
    create_lock: Mutex<()>,
}

impl DomainBoundaryFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The unique identifier for a domain in the container.
    pub fn domain_id(domain_name: &str) -> Result<String, IsolationError> {
        if domain_name.is_empty() {
            return Err(IsolationError::InvalidDomainName);
        }
        Ok(format!("domain/{domain_name}"))
    }

    /// Return the shared domain for `descriptor`, constructing it on first
    /// request.
    ///
    /// `artifact_boundaries` are the sibling artifact boundaries layered on
    /// the domain; they are retained by the constructed domain. The domain
    /// evicts itself from the cache once its last referencing artifact
    /// detaches.
    pub fn get_or_create(
        &self,
        descriptor: &DomainDescriptor,
        parent: Arc<dyn ArtifactBoundary>,
        artifact_boundaries: Vec<Arc<dyn ArtifactBoundary>>,
    ) -> Result<Arc<IsolationDomain>, IsolationError> {
        let id = Self::domain_id(&descriptor.name)?;

        // Fast path: cached domains are returned without touching the
        // construction lock.
        if let Some(domain) = self
            .domains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Ok(domain.clone());
        }

        let _create_guard = self.create_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Re-check under the lock: another thread may have won the race.
        if let Some(domain) = self
            .domains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Ok(domain.clone());
        }

        let domain = Arc::new(self.build_domain(&id, descriptor, parent, artifact_boundaries)?);

        let cache = Arc::clone(&self.domains);
        let evict_id = id.clone();
        domain.add_shutdown_listener(Box::new(move || {
            cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&evict_id);
            log::debug!("Domain '{}' evicted from cache", evict_id);
        }));

        self.domains
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, domain.clone());
        Ok(domain)
    }

    /// The cached domain for `id`, if one is alive.
    pub fn cached(&self, id: &str) -> Option<Arc<IsolationDomain>> {
        self.domains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn cached_count(&self) -> usize {
        self.domains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn build_domain(
        &self,
        id: &str,
        descriptor: &DomainDescriptor,
        parent: Arc<dyn ArtifactBoundary>,
        artifact_boundaries: Vec<Arc<dyn ArtifactBoundary>>,
    ) -> Result<IsolationDomain, IsolationError> {
        if descriptor.is_default() {
            log::debug!("Constructing default domain boundary");
            let policy = parent.lookup_policy().extend(HashMap::new());
            return Ok(IsolationDomain::new(
                id.to_string(),
                descriptor.clone(),
                parent,
                policy,
                Vec::new(),
                Vec::new(),
            ));
        }

        Self::validate_domain(descriptor)?;
        let policy = Self::domain_lookup_policy(parent.as_ref(), descriptor)?;
        log::info!(
            "Constructing domain '{}' with {} plugin(s)",
            descriptor.name,
            descriptor.plugins.len()
        );
        Ok(IsolationDomain::new(
            id.to_string(),
            descriptor.clone(),
            parent,
            policy,
            descriptor.resource_model.locations.clone(),
            artifact_boundaries,
        ))
    }

    /// Every package exported by every plugin the domain declares resolves
    /// parent-first. Artifacts layered on the domain that also carry one of
    /// these plugins would otherwise each load a private, mutually
    /// invisible copy of the same logical package.
    fn domain_lookup_policy(
        parent: &dyn ArtifactBoundary,
        descriptor: &DomainDescriptor,
    ) -> Result<LookupPolicy, IsolationError> {
        let mut plugin_strategies = HashMap::new();
        for plugin in &descriptor.plugins {
            plugin.validate()?;
            for package in &plugin.exported_packages {
                plugin_strategies.insert(package.clone(), LookupStrategy::ParentFirst);
            }
        }
        Ok(parent.lookup_policy().extend(plugin_strategies))
    }

    fn validate_domain(descriptor: &DomainDescriptor) -> Result<(), IsolationError> {
        let root = &descriptor.root_location;
        if !(root.exists() && root.is_dir()) {
            return Err(IsolationError::Deployment {
                domain: descriptor.name.clone(),
                path: root.clone(),
            });
        }
        Ok(())
    }
}
