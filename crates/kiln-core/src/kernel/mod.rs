//! # Kiln Core Kernel
//!
//! The kernel owns application bootstrap and teardown: it builds the root
//! [`RuntimeContext`](context::RuntimeContext), the shared object registry,
//! and the isolation-domain factory, then drives the registry through the
//! global lifecycle phases on startup and through dependency-ordered
//! teardown on shutdown.
pub mod bootstrap;
pub mod constants;
pub mod context;
pub mod error;

pub use bootstrap::Application;
pub use context::RuntimeContext;

#[cfg(test)]
mod tests;
