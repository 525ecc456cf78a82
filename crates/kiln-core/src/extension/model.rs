use serde::{Deserialize, Serialize};

/// Structured model a discoverer produces for one extension.
///
/// Opaque to the core: it is carried between the discovery boundary and the
/// artifacts that requested it, never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionModel {
    pub name: String,
    pub vendor: String,
    pub version: String,
}

impl ExtensionModel {
    pub fn new(
        name: impl Into<String>,
        vendor: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vendor: vendor.into(),
            version: version.into(),
        }
    }
}
