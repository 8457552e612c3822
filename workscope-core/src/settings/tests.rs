use crate::settings::config::DEFAULT_IGNORE_PATTERNS;
use crate::settings::{load_settings, settings_schema, Settings};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");

    let settings = load_settings(&settings_path).unwrap();

    assert!(settings.ignore.hidden);
    assert!(settings.tree.retain_empty_dirs);
    assert_eq!(settings.ignore.patterns.len(), DEFAULT_IGNORE_PATTERNS.len());
    assert!(!settings_path.exists(), "loading must not create the file");
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &settings_path,
        "root = \"/srv/projects\"\n\n[ignore]\nhidden = false\n",
    )
    .unwrap();

    let settings = load_settings(&settings_path).unwrap();

    assert_eq!(settings.root, PathBuf::from("/srv/projects"));
    assert!(!settings.ignore.hidden);
    assert!(settings.ignore.patterns.iter().any(|p| p == ".git/**"));
    assert!(settings.tree.retain_empty_dirs);
}

#[test]
fn test_round_trip_through_toml() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");

    let mut original = Settings::with_root("/data/workspace");
    original.ignore.patterns = vec!["*.tmp".to_string(), "cache/**".to_string()];
    original.tree.retain_empty_dirs = false;
    std::fs::write(&settings_path, toml::to_string_pretty(&original).unwrap()).unwrap();

    let loaded = load_settings(&settings_path).unwrap();

    assert_eq!(original, loaded);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&settings_path, "root = [not toml").unwrap();

    let err = load_settings(&settings_path).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to parse settings"));
    assert_eq!(
        std::fs::read_to_string(&settings_path).unwrap(),
        "root = [not toml"
    );
}

#[test]
fn test_schema_lists_sections() {
    let schema = settings_schema();
    let properties = schema["properties"].as_object().unwrap();

    assert!(properties.contains_key("root"));
    assert!(properties.contains_key("ignore"));
    assert!(properties.contains_key("tree"));
}
