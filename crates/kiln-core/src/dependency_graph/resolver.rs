use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::dependency_graph::node::DependencyNode;
use crate::dependency_graph::sources::ConfigurationDependencySource;
use crate::object_registry::registry::SimpleRegistry;
use crate::object_registry::traits::RegistryObject;

/// Computes direct dependencies of registered objects, deduplicated across
/// the resolver's lifetime.
///
/// One resolver is one walk: the processed-key set lives as long as the
/// resolver, so repeated calls during a teardown sweep never re-emit a key
/// already visited. Concurrent walks must use separate resolvers.
pub struct DependencyResolver {
    registry: Arc<SimpleRegistry>,
    configuration: Option<Arc<dyn ConfigurationDependencySource>>,
    processed: HashSet<String>,
}

impl DependencyResolver {
    pub fn new(
        registry: Arc<SimpleRegistry>,
        configuration: Option<Arc<dyn ConfigurationDependencySource>>,
    ) -> Self {
        Self { registry, configuration, processed: HashSet::new() }
    }

    /// Resolve `key` into a node whose children are its direct
    /// dependencies. Returns `None` when nothing is registered under `key`.
    pub fn resolve_node(&mut self, key: &str) -> Option<DependencyNode> {
        let object = self.registry.get(key)?;
        let mut node = DependencyNode::with_key(object, key);
        for (dep_key, value) in self.gather_sources(key) {
            self.add_child(&mut node, dep_key, value);
        }
        Some(node)
    }

    /// The direct dependencies of `key` as `(key, instance)` pairs, merged
    /// from all three sources and deduplicated against everything this
    /// resolver has already seen.
    pub fn resolve_direct_dependencies(
        &mut self,
        key: &str,
    ) -> Vec<(String, Arc<dyn RegistryObject>)> {
        self.resolve_node(key)
            .map(|node| node.child_pairs())
            .unwrap_or_default()
    }

    /// Transitive walk over direct dependencies, yielding keys in teardown
    /// order: every dependent precedes the objects it depends on, and no
    /// key appears twice.
    ///
    /// The walk first discovers every node reachable from the roots, then
    /// orders them over the reverse graph: a node is emitted once no
    /// still-unemitted node depends on it. Keys left over by a dependency
    /// cycle are appended in discovery order so teardown still covers them.
    pub fn teardown_order(&mut self, roots: impl IntoIterator<Item = String>) -> Vec<String> {
        // Discover reachable nodes and their dependency edges breadth-first.
        let mut discovered: Vec<String> = Vec::new();
        let mut edges: HashMap<String, Vec<String>> = HashMap::new();
        let mut queue: VecDeque<String> = roots
            .into_iter()
            .filter(|root| !self.processed.contains(root) && self.registry.contains(root))
            .collect();
        let mut seen: HashSet<String> = queue.iter().cloned().collect();
        while let Some(key) = queue.pop_front() {
            let deps: Vec<String> = self
                .gather_sources(&key)
                .into_iter()
                .map(|(dep_key, _)| dep_key)
                .filter(|dep_key| dep_key != &key && !self.processed.contains(dep_key))
                .collect();
            for dep_key in &deps {
                if seen.insert(dep_key.clone()) {
                    queue.push_back(dep_key.clone());
                }
            }
            edges.insert(key.clone(), deps);
            discovered.push(key);
        }

        // How many still-pending nodes depend on each node.
        let mut dependent_count: HashMap<&str, usize> =
            discovered.iter().map(|key| (key.as_str(), 0)).collect();
        for deps in edges.values() {
            for dep_key in deps {
                if let Some(count) = dependent_count.get_mut(dep_key.as_str()) {
                    *count += 1;
                }
            }
        }

        let mut ready: VecDeque<&str> = discovered
            .iter()
            .filter(|key| dependent_count[key.as_str()] == 0)
            .map(|key| key.as_str())
            .collect();
        let mut order = Vec::new();
        while let Some(key) = ready.pop_front() {
            order.push(key.to_string());
            for dep_key in &edges[key] {
                if let Some(count) = dependent_count.get_mut(dep_key.as_str()) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(dep_key.as_str());
                    }
                }
            }
        }

        if order.len() != discovered.len() {
            log::warn!("Dependency cycle among registered objects; tearing the remainder down in discovery order");
            for key in &discovered {
                if !order.contains(key) {
                    order.push(key.clone());
                }
            }
        }

        self.processed.extend(order.iter().cloned());
        order
    }

    /// Merge the three sources for `key`, in fixed order: auto-discovered
    /// (what the injector wired, self-references excluded), then
    /// configuration-declared (names with no registered instance are
    /// skipped silently, the artifact may be starting in lazy mode), then
    /// explicitly declared. The order only decides which source wins the
    /// first-seen-key race; the values are identical either way.
    fn gather_sources(&self, key: &str) -> Vec<(String, Arc<dyn RegistryObject>)> {
        let Some(object) = self.registry.get(key) else {
            return Vec::new();
        };
        let mut merged = Vec::new();

        for (dep_key, value) in self.registry.wired_dependencies(key) {
            if Arc::ptr_eq(&value, &object) {
                continue;
            }
            merged.push((dep_key, value));
        }

        if let Some(configuration) = &self.configuration {
            for dep_key in configuration.direct_component_dependencies(key) {
                if let Some(value) = self.registry.get(&dep_key) {
                    merged.push((dep_key, value));
                } else {
                    log::debug!(
                        "Configuration dependency '{}' of '{}' is not registered, skipping",
                        dep_key,
                        key
                    );
                }
            }
        }

        if let Some(provider) = object.as_dependency_provider() {
            for (value, dep_key) in provider.declared_direct_dependencies() {
                merged.push((dep_key, value));
            }
        }

        merged
    }

    fn add_child(&mut self, node: &mut DependencyNode, key: String, value: Arc<dyn RegistryObject>) {
        if !self.processed.insert(key.clone()) {
            return;
        }
        node.add_child(DependencyNode::with_key(value, key));
    }
}
