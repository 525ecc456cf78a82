use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::isolation::descriptor::DomainDescriptor;
use crate::isolation::policy::{LookupPolicy, LookupStrategy};

/// Callback fired when a boundary reports no remaining referencing
/// artifacts.
pub type ShutdownListener = Box<dyn FnOnce() + Send>;

/// An execution and symbol-visibility scope artifacts run inside.
pub trait ArtifactBoundary: Send + Sync {
    /// Identifier of the artifact this boundary belongs to.
    fn artifact_id(&self) -> &str;

    /// The visibility policy symbols resolve through. Immutable after
    /// construction.
    fn lookup_policy(&self) -> &LookupPolicy;

    /// Resource locations owned by this boundary.
    fn resource_locations(&self) -> &[PathBuf];
}

/// A shared isolation domain: one boundary reused by every artifact group
/// that declares the same domain.
///
/// The referencing-artifact set and the listener list are the only mutable
/// state; both sit behind their own locks. Everything else is fixed at
/// construction.
pub struct IsolationDomain {
    id: String,
    descriptor: DomainDescriptor,
    parent: Arc<dyn ArtifactBoundary>,
    lookup_policy: LookupPolicy,
    resource_locations: Vec<PathBuf>,
    owned_artifacts: Vec<Arc<dyn ArtifactBoundary>>,
    attached: Mutex<HashSet<String>>,
    shutdown_listeners: Mutex<Vec<ShutdownListener>>,
}

impl IsolationDomain {
    pub(crate) fn new(
        id: String,
        descriptor: DomainDescriptor,
        parent: Arc<dyn ArtifactBoundary>,
        lookup_policy: LookupPolicy,
        resource_locations: Vec<PathBuf>,
        owned_artifacts: Vec<Arc<dyn ArtifactBoundary>>,
    ) -> Self {
        Self {
            id,
            descriptor,
            parent,
            lookup_policy,
            resource_locations,
            owned_artifacts,
            attached: Mutex::new(HashSet::new()),
            shutdown_listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for IsolationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsolationDomain")
            .field("id", &self.id)
            .field("resource_locations", &self.resource_locations)
            .finish_non_exhaustive()
    }
}

impl IsolationDomain {

    pub fn descriptor(&self) -> &DomainDescriptor {
        &self.descriptor
    }

    pub fn parent(&self) -> &Arc<dyn ArtifactBoundary> {
        &self.parent
    }

    /// Artifact boundaries constructed on top of this domain.
    pub fn owned_artifacts(&self) -> &[Arc<dyn ArtifactBoundary>] {
        &self.owned_artifacts
    }

    /// Whether `package` resolves through the parent boundary rather than
    /// the domain's own resources.
    pub fn resolves_through_parent(&self, package: &str) -> bool {
        self.lookup_policy.strategy_for(package) == LookupStrategy::ParentFirst
    }

    /// Register a callback fired once when the last referencing artifact
    /// detaches.
    pub fn add_shutdown_listener(&self, listener: ShutdownListener) {
        self.shutdown_listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Record that `artifact_id` now runs on this domain.
    pub fn attach_artifact(&self, artifact_id: &str) {
        self.attached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(artifact_id.to_string());
        log::debug!("Artifact '{}' attached to domain '{}'", artifact_id, self.id);
    }

    /// Record that `artifact_id` disconnected. When no referencing artifact
    /// remains, the shutdown listeners fire exactly once.
    pub fn detach_artifact(&self, artifact_id: &str) {
        let drained = {
            let mut attached = self.attached.lock().unwrap_or_else(PoisonError::into_inner);
            if !attached.remove(artifact_id) {
                return;
            }
            if !attached.is_empty() {
                return;
            }
            // Listener list drained under the attach lock so a concurrent
            // re-attach cannot race the notification.
            std::mem::take(
                &mut *self
                    .shutdown_listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            )
        };
        log::debug!("Last artifact detached from domain '{}'", self.id);
        for listener in drained {
            listener();
        }
    }

    pub fn referencing_count(&self) -> usize {
        self.attached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ArtifactBoundary for IsolationDomain {
    fn artifact_id(&self) -> &str {
        &self.id
    }

    fn lookup_policy(&self) -> &LookupPolicy {
        &self.lookup_policy
    }

    fn resource_locations(&self) -> &[PathBuf] {
        &self.resource_locations
    }
}
