use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::object_registry::traits::RegistryObject;

/// The well-known root context object.
///
/// One instance exists per [`Application`](super::bootstrap::Application);
/// it is registered under
/// [`CONTEXT_OBJECT_KEY`](super::constants::CONTEXT_OBJECT_KEY) and doubles
/// as the injection fallback: a slot of this type is satisfied with the
/// singleton when no other match exists.
#[derive(Debug)]
pub struct RuntimeContext {
    name: String,
    home_dir: PathBuf,
    start_time: SystemTime,
}

impl RuntimeContext {
    pub fn new(name: impl Into<String>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            home_dir: home_dir.into(),
            start_time: SystemTime::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }
}

impl RegistryObject for RuntimeContext {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
