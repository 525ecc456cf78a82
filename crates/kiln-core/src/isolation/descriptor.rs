use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::isolation::error::IsolationError;

/// Name of the implicit domain artifacts belong to when they declare none.
pub const DEFAULT_DOMAIN_NAME: &str = "default";

/// Resource locations an artifact contributes to its boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceModel {
    /// Locations resolved through the boundary itself.
    #[serde(default)]
    pub locations: Vec<PathBuf>,
    /// Scratch folder for artifact-private data, if any.
    #[serde(default)]
    pub data_folder: Option<PathBuf>,
}

/// Declarative description of one plugin carried by an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactPluginDescriptor {
    pub name: String,
    pub version: String,
    /// Packages the plugin makes visible to artifacts layered on top of it.
    #[serde(default)]
    pub exported_packages: BTreeSet<String>,
    #[serde(default)]
    pub resource_model: ResourceModel,
}

impl ArtifactPluginDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            exported_packages: BTreeSet::new(),
            resource_model: ResourceModel::default(),
        }
    }

    /// Check that the declared version parses as semver.
    pub fn validate(&self) -> Result<(), IsolationError> {
        semver::Version::parse(&self.version).map(|_| ()).map_err(|source| {
            IsolationError::InvalidPluginVersion {
                plugin: self.name.clone(),
                version: self.version.clone(),
                source,
            }
        })
    }
}

/// Declarative description of a domain: its name, backing location and the
/// plugins it shares with the artifacts on top of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainDescriptor {
    pub name: String,
    /// Directory backing the domain; validated at construction time for
    /// every domain except the default one.
    pub root_location: PathBuf,
    #[serde(default)]
    pub plugins: Vec<ArtifactPluginDescriptor>,
    #[serde(default)]
    pub resource_model: ResourceModel,
}

impl DomainDescriptor {
    pub fn new(name: impl Into<String>, root_location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root_location: root_location.into(),
            plugins: Vec::new(),
            resource_model: ResourceModel::default(),
        }
    }

    /// Descriptor for the implicit default domain.
    pub fn default_domain() -> Self {
        Self::new(DEFAULT_DOMAIN_NAME, PathBuf::new())
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_DOMAIN_NAME
    }
}
