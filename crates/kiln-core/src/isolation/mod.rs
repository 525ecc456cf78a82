//! # Kiln Core Isolation Domains
//!
//! Artifacts (applications, plugins) execute inside shared isolation
//! domains: named boundaries that decide which symbols are visible to which
//! consumer. A domain is constructed lazily on first request, cached and
//! shared by every artifact group that names it, and evicted once the last
//! referencing artifact detaches.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`descriptor`]**: [`DomainDescriptor`](descriptor::DomainDescriptor)
//!   and [`ArtifactPluginDescriptor`](descriptor::ArtifactPluginDescriptor),
//!   the declarative inputs to domain construction.
//! - **[`policy`]**: [`LookupPolicy`](policy::LookupPolicy), the immutable
//!   package-prefix to [`LookupStrategy`](policy::LookupStrategy) map a
//!   boundary resolves symbols through.
//! - **[`boundary`]**: the [`ArtifactBoundary`](boundary::ArtifactBoundary)
//!   trait and the shared [`IsolationDomain`](boundary::IsolationDomain).
//! - **[`factory`]**: [`DomainBoundaryFactory`](factory::DomainBoundaryFactory),
//!   the cached, at-most-once constructor for domains.
//! - **[`error`]**: [`IsolationError`](error::IsolationError).
pub mod boundary;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod policy;

pub use boundary::{ArtifactBoundary, IsolationDomain};
pub use descriptor::{ArtifactPluginDescriptor, DomainDescriptor, ResourceModel, DEFAULT_DOMAIN_NAME};
pub use error::IsolationError;
pub use factory::DomainBoundaryFactory;
pub use policy::{LookupPolicy, LookupStrategy};

#[cfg(test)]
mod tests;
