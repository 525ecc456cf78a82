use std::collections::HashMap;

/// How a boundary resolves symbols of one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStrategy {
    /// Defer to the parent boundary before consulting own resources. Used
    /// for packages a shared domain exports, so that every artifact layered
    /// on the domain sees one identity for the package instead of a private
    /// shadow copy.
    ParentFirst,
    /// Consult own resources before the parent.
    #[default]
    SelfFirst,
}

/// Immutable package-to-strategy map a boundary resolves through.
///
/// Resolution tries the exact package, then walks up the dotted prefixes
/// (`a.b.c` → `a.b` → `a`), then falls back to the policy default. Built
/// once during boundary construction and read freely afterwards.
#[derive(Debug, Clone, Default)]
pub struct LookupPolicy {
    strategies: HashMap<String, LookupStrategy>,
    default_strategy: LookupStrategy,
}

impl LookupPolicy {
    pub fn new(strategies: HashMap<String, LookupStrategy>, default_strategy: LookupStrategy) -> Self {
        Self { strategies, default_strategy }
    }

    pub fn default_strategy(&self) -> LookupStrategy {
        self.default_strategy
    }

    /// The strategy governing `package`.
    pub fn strategy_for(&self, package: &str) -> LookupStrategy {
        if let Some(strategy) = self.strategies.get(package) {
            return *strategy;
        }
        let mut prefix = package;
        while let Some(cut) = prefix.rfind('.') {
            prefix = &prefix[..cut];
            if let Some(strategy) = self.strategies.get(prefix) {
                return *strategy;
            }
        }
        self.default_strategy
    }

    /// Whether an explicit rule (exact or prefix) governs `package`.
    pub fn governs(&self, package: &str) -> bool {
        if self.strategies.contains_key(package) {
            return true;
        }
        let mut prefix = package;
        while let Some(cut) = prefix.rfind('.') {
            prefix = &prefix[..cut];
            if self.strategies.contains_key(prefix) {
                return true;
            }
        }
        false
    }

    /// A new policy extended with additional package rules. Packages already
    /// governed keep their existing strategy: an artifact cannot override
    /// what its parent already rules on.
    pub fn extend(&self, additional: HashMap<String, LookupStrategy>) -> LookupPolicy {
        let mut strategies = self.strategies.clone();
        for (package, strategy) in additional {
            if strategies.contains_key(&package) {
                log::debug!("Package '{}' already governed, keeping existing strategy", package);
                continue;
            }
            strategies.insert(package, strategy);
        }
        LookupPolicy { strategies, default_strategy: self.default_strategy }
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
