//! # Kiln Core Configuration
//!
//! In-memory configuration data with pluggable on-disk formats (JSON by
//! default, YAML and TOML behind the `yaml-config` / `toml-config`
//! features), plus the configuration-declared component-dependency source
//! consumed by the dependency-graph resolver.
pub mod data;
pub mod dependencies;
pub mod error;

pub use data::{ConfigData, ConfigFormat};
pub use dependencies::ConfigComponentDependencies;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
