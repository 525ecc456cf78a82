//! # Kiln Core Isolation Errors
//!
//! Defines error types specific to the Kiln isolation-domain subsystem.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IsolationError {
    /// Malformed input: a domain must carry a non-empty name.
    #[error("domain name cannot be empty")]
    InvalidDomainName,

    /// The domain's backing location is missing or not a directory. Fatal
    /// to this domain's construction, non-fatal to the process.
    #[error("domain '{domain}' does not exist at '{path}'")]
    Deployment { domain: String, path: PathBuf },

    /// A plugin declared by the domain carries an unparsable version.
    #[error("artifact plugin '{plugin}' has invalid version '{version}': {source}")]
    InvalidPluginVersion {
        plugin: String,
        version: String,
        #[source]
        source: semver::Error,
    },
}
