use std::path::Path;

use crate::config::data::{ConfigData, ConfigFormat};

#[test]
fn format_from_path_recognises_extensions() {
    assert_eq!(ConfigFormat::from_path(Path::new("app.json")), Some(ConfigFormat::Json));
    #[cfg(feature = "yaml-config")]
    {
        assert_eq!(ConfigFormat::from_path(Path::new("app.yaml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("app.YML")), Some(ConfigFormat::Yaml));
    }
    #[cfg(feature = "toml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("app.toml")), Some(ConfigFormat::Toml));
    assert_eq!(ConfigFormat::from_path(Path::new("app.ini")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("noextension")), None);
}

#[test]
fn json_round_trip() {
    let mut config = ConfigData::new();
    config.set("name", "kiln").unwrap();
    config.set("workers", 4).unwrap();

    let serialized = config.to_string(ConfigFormat::Json).unwrap();
    let parsed = ConfigData::from_str(&serialized, ConfigFormat::Json).unwrap();

    assert_eq!(parsed.get::<String>("name"), Some("kiln".to_string()));
    assert_eq!(parsed.get::<u32>("workers"), Some(4));
}

#[test]
fn get_with_default_and_remove() {
    let mut config = ConfigData::new();
    config.set("present", true).unwrap();

    assert!(config.get_or("present", false));
    assert!(!config.get_or("absent", false));
    assert!(config.contains("present"));

    config.remove("present");
    assert!(!config.contains("present"));
}

#[test]
fn invalid_content_is_a_deserialization_error() {
    let err = ConfigData::from_str("not json at all", ConfigFormat::Json).unwrap_err();
    assert!(err.to_string().contains("json"));
}

#[cfg(feature = "toml-config")]
#[test]
fn toml_content_parses() {
    let content = r#"
name = "kiln"

[components.reporter]
"depends-on" = ["clock"]
"#;
    let config = ConfigData::from_str(content, ConfigFormat::Toml).unwrap();
    assert_eq!(config.get::<String>("name"), Some("kiln".to_string()));
    assert!(config.contains("components"));
}

#[cfg(feature = "yaml-config")]
#[test]
fn yaml_content_parses() {
    let content = "name: kiln\nworkers: 2\n";
    let config = ConfigData::from_str(content, ConfigFormat::Yaml).unwrap();
    assert_eq!(config.get::<String>("name"), Some("kiln".to_string()));
    assert_eq!(config.get::<u32>("workers"), Some(2));
}
