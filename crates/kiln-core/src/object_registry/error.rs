//! # Kiln Core Object Registry Errors
//!
//! Defines error types specific to the Kiln object registry.
//!
//! This module includes [`ObjectRegistryError`], the primary enum
//! encompassing the errors that can occur while registering objects,
//! injecting their dependency slots, or applying lifecycle phases to them.
use thiserror::Error;

use crate::object_registry::lifecycle::Phase;

#[derive(Debug, Error)]
pub enum ObjectRegistryError {
    #[error("registration failed for '{key}': {source}")]
    Registration {
        key: String,
        #[source]
        source: Box<ObjectRegistryError>,
    },

    #[error("could not inject dependency on slot '{slot}' of {object_type}: {message}")]
    Injection {
        slot: String,
        object_type: String,
        message: String,
    },

    #[error("lifecycle phase '{phase}' failed for '{key}': {source}")]
    PhaseFailed {
        phase: Phase,
        key: String,
        #[source]
        source: PhaseCallbackError,
    },

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("encountered errors while applying phase '{phase}': {details}")]
    Sweep { phase: Phase, details: String },
}

/// Error returned by an object's phase callback.
///
/// Hosted objects produce these from [`Lifecycle`](super::traits::Lifecycle)
/// implementations; the manager wraps them into
/// [`ObjectRegistryError::PhaseFailed`] together with the phase and key.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PhaseCallbackError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PhaseCallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self { message: message.into(), source: Some(Box::new(source)) }
    }
}

/// Error returned by an [`Injectable::assign`](super::traits::Injectable::assign)
/// hook when a resolved value does not fit the slot it was resolved for.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SlotAssignError {
    pub message: String,
}

impl SlotAssignError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The object was handed a slot name it never declared.
    pub fn unknown_slot(slot: &str) -> Self {
        Self::new(format!("no such slot: '{slot}'"))
    }

    /// The resolved value's shape does not match the slot's declared shape.
    pub fn shape_mismatch(slot: &str) -> Self {
        Self::new(format!("resolved value shape does not match slot '{slot}'"))
    }
}
