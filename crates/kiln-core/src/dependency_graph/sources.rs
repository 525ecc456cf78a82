/// Dependencies declared by the external configuration layer.
///
/// The resolver consumes this purely as a lookup: given a component key,
/// which other component keys does the configuration say it references.
/// A registry without a configuration layer simply passes no source, which
/// the resolver treats as "no configuration-declared dependencies".
pub trait ConfigurationDependencySource: Send + Sync {
    /// The component keys the configuration declares `key` depends on.
    fn direct_component_dependencies(&self, key: &str) -> Vec<String>;
}
