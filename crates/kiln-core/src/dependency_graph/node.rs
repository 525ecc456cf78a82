use std::sync::Arc;

use crate::object_registry::traits::RegistryObject;

/// One node in a dependency walk.
///
/// Within a single resolution pass a key appears as a child at most once;
/// the resolver enforces this through its processed-key set.
pub struct DependencyNode {
    key: Option<String>,
    value: Arc<dyn RegistryObject>,
    children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(value: Arc<dyn RegistryObject>) -> Self {
        Self { key: None, value, children: Vec::new() }
    }

    pub fn with_key(value: Arc<dyn RegistryObject>, key: impl Into<String>) -> Self {
        Self { key: Some(key.into()), value, children: Vec::new() }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> &Arc<dyn RegistryObject> {
        &self.value
    }

    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    pub fn add_child(&mut self, child: DependencyNode) {
        self.children.push(child);
    }

    /// The `(key, instance)` pairs of the keyed children, in insertion
    /// order.
    pub fn child_pairs(&self) -> Vec<(String, Arc<dyn RegistryObject>)> {
        self.children
            .iter()
            .filter_map(|child| {
                child
                    .key()
                    .map(|key| (key.to_string(), child.value().clone()))
            })
            .collect()
    }
}
