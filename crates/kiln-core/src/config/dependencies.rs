use std::collections::HashMap;

use serde::Deserialize;

use crate::config::data::ConfigData;
use crate::dependency_graph::sources::ConfigurationDependencySource;
use crate::kernel::constants::COMPONENTS_CONFIG_KEY;

/// Per-component configuration entry.
#[derive(Debug, Default, Deserialize)]
struct ComponentEntry {
    #[serde(default, rename = "depends-on")]
    depends_on: Vec<String>,
}

/// Component dependencies declared in configuration.
///
/// Reads the `components` section, where each component may carry a
/// `depends-on` list of other component keys:
///
/// ```toml
/// [components.reporter]
/// depends-on = ["clock", "sink"]
/// ```
#[derive(Debug, Default)]
pub struct ConfigComponentDependencies {
    by_component: HashMap<String, Vec<String>>,
}

impl ConfigComponentDependencies {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfigData) -> Self {
        let entries: HashMap<String, ComponentEntry> =
            config.get(COMPONENTS_CONFIG_KEY).unwrap_or_default();
        let by_component = entries
            .into_iter()
            .map(|(key, entry)| (key, entry.depends_on))
            .collect();
        Self { by_component }
    }

    /// Build directly from a key → dependencies map.
    pub fn from_map(by_component: HashMap<String, Vec<String>>) -> Self {
        Self { by_component }
    }

    pub fn component_count(&self) -> usize {
        self.by_component.len()
    }
}

impl ConfigurationDependencySource for ConfigComponentDependencies {
    fn direct_component_dependencies(&self, key: &str) -> Vec<String> {
        self.by_component.get(key).cloned().unwrap_or_default()
    }
}
