use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::extension::error::DiscoveryError;
use crate::extension::model::ExtensionModel;
use crate::isolation::boundary::ArtifactBoundary;
use crate::isolation::descriptor::ArtifactPluginDescriptor;

/// Registry of extension loaders available to a discoverer.
pub trait ExtensionModelLoaderRepository: Send + Sync {
    /// Identifiers of the loaders this repository can hand out.
    fn available_loaders(&self) -> Vec<String>;
}

/// Performs extension-model discovery. Implemented outside the core; the
/// runtime only builds requests and consumes the resulting model set.
#[async_trait]
pub trait ExtensionDiscoverer: Send + Sync {
    async fn discover(
        &self,
        request: ExtensionDiscoveryRequest,
    ) -> Result<HashSet<ExtensionModel>, DiscoveryError>;
}

/// Container of the parameters handed to an [`ExtensionDiscoverer`].
pub struct ExtensionDiscoveryRequest {
    loader_repository: Arc<dyn ExtensionModelLoaderRepository>,
    artifact_plugins: Vec<(ArtifactPluginDescriptor, Arc<dyn ArtifactBoundary>)>,
    parent_artifact_extensions: HashSet<ExtensionModel>,
    parallel_discovery: bool,
    enrich_descriptions: bool,
}

impl ExtensionDiscoveryRequest {
    /// A fluent builder for a new request.
    pub fn builder(
        loader_repository: Arc<dyn ExtensionModelLoaderRepository>,
    ) -> ExtensionDiscoveryRequestBuilder {
        ExtensionDiscoveryRequestBuilder {
            loader_repository,
            artifact_plugins: Vec::new(),
            parent_artifact_extensions: HashSet::new(),
            parallel_discovery: false,
            enrich_descriptions: true,
        }
    }

    pub fn loader_repository(&self) -> &Arc<dyn ExtensionModelLoaderRepository> {
        &self.loader_repository
    }

    /// Plugin descriptor / boundary pairs for the plugins deployed inside
    /// the requesting artifact.
    pub fn artifact_plugins(&self) -> &[(ArtifactPluginDescriptor, Arc<dyn ArtifactBoundary>)] {
        &self.artifact_plugins
    }

    /// Extension models supplied by the parent artifact, to be taken into
    /// account while parsing.
    pub fn parent_artifact_extensions(&self) -> &HashSet<ExtensionModel> {
        &self.parent_artifact_extensions
    }

    /// Whether the discoverer may discover models from independent plugins
    /// in parallel.
    pub fn parallel_discovery(&self) -> bool {
        self.parallel_discovery
    }

    /// Whether description-enriching steps must run, or may be skipped.
    pub fn enrich_descriptions(&self) -> bool {
        self.enrich_descriptions
    }
}

pub struct ExtensionDiscoveryRequestBuilder {
    loader_repository: Arc<dyn ExtensionModelLoaderRepository>,
    artifact_plugins: Vec<(ArtifactPluginDescriptor, Arc<dyn ArtifactBoundary>)>,
    parent_artifact_extensions: HashSet<ExtensionModel>,
    parallel_discovery: bool,
    enrich_descriptions: bool,
}

impl ExtensionDiscoveryRequestBuilder {
    pub fn artifact_plugins(
        mut self,
        artifact_plugins: Vec<(ArtifactPluginDescriptor, Arc<dyn ArtifactBoundary>)>,
    ) -> Self {
        self.artifact_plugins = artifact_plugins;
        self
    }

    pub fn parent_artifact_extensions(mut self, extensions: HashSet<ExtensionModel>) -> Self {
        self.parent_artifact_extensions = extensions;
        self
    }

    pub fn parallel_discovery(mut self, parallel_discovery: bool) -> Self {
        self.parallel_discovery = parallel_discovery;
        self
    }

    pub fn enrich_descriptions(mut self, enrich_descriptions: bool) -> Self {
        self.enrich_descriptions = enrich_descriptions;
        self
    }

    pub fn build(self) -> ExtensionDiscoveryRequest {
        ExtensionDiscoveryRequest {
            loader_repository: self.loader_repository,
            artifact_plugins: self.artifact_plugins,
            parent_artifact_extensions: self.parent_artifact_extensions,
            parallel_discovery: self.parallel_discovery,
            enrich_descriptions: self.enrich_descriptions,
        }
    }
}
