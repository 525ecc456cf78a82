/// Application name
pub const APP_NAME: &str = "kiln";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Registry key the root context object is stored under
pub const CONTEXT_OBJECT_KEY: &str = "kiln.context";

/// Configuration section naming component dependency declarations
pub const COMPONENTS_CONFIG_KEY: &str = "components";
