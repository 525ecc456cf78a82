use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::extension::discovery::{
    ExtensionDiscoverer, ExtensionDiscoveryRequest, ExtensionModelLoaderRepository,
};
use crate::extension::error::DiscoveryError;
use crate::extension::model::ExtensionModel;
use crate::isolation::boundary::ArtifactBoundary;
use crate::isolation::descriptor::ArtifactPluginDescriptor;
use crate::isolation::policy::LookupPolicy;

struct StubRepository;

impl ExtensionModelLoaderRepository for StubRepository {
    fn available_loaders(&self) -> Vec<String> {
        vec!["manifest".to_string()]
    }
}

#[test]
fn builder_defaults_match_contract() {
    let request = ExtensionDiscoveryRequest::builder(Arc::new(StubRepository)).build();

    // Parallel discovery is opt-in; description enrichment is opt-out.
    assert!(!request.parallel_discovery());
    assert!(request.enrich_descriptions());
    assert!(request.artifact_plugins().is_empty());
    assert!(request.parent_artifact_extensions().is_empty());
    assert_eq!(request.loader_repository().available_loaders(), vec!["manifest".to_string()]);
}

#[test]
fn builder_carries_all_parameters() {
    let parent_extensions =
        HashSet::from([ExtensionModel::new("http", "kiln", "1.2.0")]);

    let request = ExtensionDiscoveryRequest::builder(Arc::new(StubRepository))
        .parent_artifact_extensions(parent_extensions.clone())
        .parallel_discovery(true)
        .enrich_descriptions(false)
        .build();

    assert!(request.parallel_discovery());
    assert!(!request.enrich_descriptions());
    assert_eq!(request.parent_artifact_extensions(), &parent_extensions);
}

#[tokio::test]
async fn discoverer_contract_is_consumable() {
    /// A discoverer that fabricates one model per artifact plugin.
    struct EchoDiscoverer;

    #[async_trait]
    impl ExtensionDiscoverer for EchoDiscoverer {
        async fn discover(
            &self,
            request: ExtensionDiscoveryRequest,
        ) -> Result<HashSet<ExtensionModel>, DiscoveryError> {
            let mut models: HashSet<ExtensionModel> = request
                .artifact_plugins()
                .iter()
                .map(|(descriptor, _)| {
                    ExtensionModel::new(descriptor.name.clone(), "test", descriptor.version.clone())
                })
                .collect();
            models.extend(request.parent_artifact_extensions().iter().cloned());
            Ok(models)
        }
    }

    struct StubBoundary {
        policy: LookupPolicy,
    }

    impl ArtifactBoundary for StubBoundary {
        fn artifact_id(&self) -> &str {
            "plugin/http"
        }

        fn lookup_policy(&self) -> &LookupPolicy {
            &self.policy
        }

        fn resource_locations(&self) -> &[std::path::PathBuf] {
            &[]
        }
    }

    let boundary: Arc<dyn ArtifactBoundary> =
        Arc::new(StubBoundary { policy: LookupPolicy::default() });
    let request = ExtensionDiscoveryRequest::builder(Arc::new(StubRepository))
        .artifact_plugins(vec![(ArtifactPluginDescriptor::new("http", "1.2.0"), boundary)])
        .parent_artifact_extensions(HashSet::from([ExtensionModel::new("parent", "kiln", "0.9.0")]))
        .build();

    let models = EchoDiscoverer.discover(request).await.unwrap();
    assert_eq!(models.len(), 2);
    assert!(models.contains(&ExtensionModel::new("http", "test", "1.2.0")));
    assert!(models.contains(&ExtensionModel::new("parent", "kiln", "0.9.0")));
}
