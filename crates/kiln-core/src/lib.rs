//! # Kiln Core
//!
//! Core library for the Kiln modular host runtime.
//!
//! Kiln hosts applications assembled out of named objects: instances are
//! registered into a shared [`object_registry::SimpleRegistry`], wired
//! together through declared dependency slots, and driven through ordered
//! lifecycle phases. Teardown ordering is computed by the
//! [`dependency_graph`] resolver, and artifacts are isolated from each other
//! through shared [`isolation`] domains with an explicit symbol-visibility
//! policy.

pub mod config;
pub mod dependency_graph;
pub mod extension;
pub mod isolation;
pub mod kernel;
pub mod object_registry;
pub mod utils;

// Re-export key public types/traits for easier use by the binary and hosts
pub use kernel::Application;
pub use kernel::error::Error as KernelError;
pub use object_registry::{RegistryObject, SimpleRegistry};
pub use dependency_graph::DependencyResolver;
pub use isolation::DomainBoundaryFactory;

#[cfg(test)]
mod tests;
