//! # Kiln Core Kernel Errors
//!
//! Defines error types specific to the Kiln kernel.
//!
//! This module includes [`Error`], the primary enum encompassing the errors
//! that can occur during kernel operations, such as application
//! bootstrapping failures or problems surfaced by the subsystems the kernel
//! coordinates.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::extension::error::DiscoveryError;
use crate::isolation::error::IsolationError;
use crate::object_registry::error::ObjectRegistryError;

/// Top-level error type for the Kiln host runtime
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed object registry error
    #[error("Object registry error: {0}")]
    ObjectRegistry(#[from] ObjectRegistryError),

    /// Specific, typed isolation-domain error
    #[error("Isolation error: {0}")]
    Isolation(#[from] IsolationError),

    /// Specific, typed configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Specific, typed extension discovery error
    #[error("Extension discovery error: {0}")]
    Extension(#[from] DiscoveryError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycle {
        phase: KernelLifecyclePhase,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the kernel's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelLifecyclePhase {
    Bootstrap,
    Start,
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
