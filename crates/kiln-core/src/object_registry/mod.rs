//! # Kiln Core Object Registry
//!
//! This module provides the shared registry that every hosted object passes
//! through. It stores named instances, performs capability-based dependency
//! injection into them, and drives them through the ordered lifecycle
//! phases.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`store`]**: The thread-safe [`ObjectStore`](store::ObjectStore)
//!   mapping string keys to instances plus metadata, with insertion-ordered
//!   type lookups.
//! - **[`lifecycle`]**: The [`Phase`](lifecycle::Phase) sequence and the
//!   [`LifecycleManager`](lifecycle::LifecycleManager) that advances objects
//!   through it, catching late registrations up to the phases the rest of
//!   the system has already completed.
//! - **[`slot`]**: The dependency-slot model: typed, optionally named slot
//!   descriptors and the cells injectable objects store resolved values in.
//! - **[`injector`]**: The [`InjectionEngine`](injector::InjectionEngine)
//!   that resolves each declared slot against the store.
//! - **[`traits`]**: Capability traits registered objects may implement:
//!   [`Lifecycle`](traits::Lifecycle), [`Injectable`](traits::Injectable),
//!   and [`DependencyProvider`](traits::DependencyProvider).
//! - **[`registry`]**: The [`SimpleRegistry`] facade tying the store,
//!   injector, and lifecycle manager together.
//! - **[`error`]**: [`ObjectRegistryError`](error::ObjectRegistryError).
pub mod error;
pub mod injector;
pub mod lifecycle;
pub mod registry;
pub mod slot;
pub mod store;
pub mod traits;

pub use error::ObjectRegistryError;
pub use lifecycle::{LifecycleManager, Phase};
pub use registry::SimpleRegistry;
pub use slot::{CollectionSlotCell, OptionalSlotCell, ResolvedSlot, SlotCell, SlotDescriptor, SlotShape};
pub use store::{ObjectMetadata, ObjectStore};
pub use traits::{DependencyProvider, Injectable, Lifecycle, RegistryObject};

// Test module declaration
#[cfg(test)]
mod tests;
