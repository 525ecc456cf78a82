//! # Kiln Core Extension Boundary Errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("extension discovery failed: {0}")]
    Discovery(String),

    #[error("no extension loader available for '{0}'")]
    MissingLoader(String),
}
