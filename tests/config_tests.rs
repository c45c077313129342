//! Integration tests for the config module
//!
//! - loader: File I/O, JSON parsing and path validation
//! - SettingsManager: defaults on missing or unreadable files
//! - LauncherSettings: overrides, validation and derived values

use app_launcher::config::{loader, LauncherSettings, SettingsManager, ENV_BACKEND_URL, ENV_CATALOG_ENDPOINT};
use app_launcher::error::ConfigError;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

// ============================================================================
// LOADING AND SAVING
// ============================================================================

#[test]
fn test_save_and_load_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("nested").join("settings.json");

    let mut settings = LauncherSettings::default();
    settings.catalog_endpoint = "https://apps.example/api/data".to_string();
    settings.mobile_breakpoint = 600.0;
    settings.debug_logging = true;

    loader::save_settings_to_file(&settings, &path)?;
    assert!(path.exists());

    let loaded = loader::load_settings_from_file(&path)?;
    assert_eq!(loaded, settings);
    Ok(())
}

#[test]
fn test_partial_file_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("settings.json");
    fs::write(&path, r#"{ "hover_delay_ms": 250 }"#)?;

    let loaded = SettingsManager::load_from(&path)?;
    assert_eq!(loaded.hover_delay(), Duration::from_millis(250));
    assert_eq!(loaded.catalog_endpoint, LauncherSettings::default().catalog_endpoint);
    Ok(())
}

#[test]
fn test_missing_file_yields_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("absent.json");

    assert!(matches!(
        loader::load_settings_from_file(&path),
        Err(ConfigError::FileNotFound(_))
    ));
    assert_eq!(SettingsManager::load_from(&path)?, LauncherSettings::default());
    Ok(())
}

#[test]
fn test_invalid_json_yields_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("settings.json");
    fs::write(&path, "{ this is not json")?;

    assert!(matches!(
        loader::load_settings_from_file(&path),
        Err(ConfigError::InvalidJson(_))
    ));
    assert_eq!(SettingsManager::load_from(&path)?, LauncherSettings::default());
    Ok(())
}

#[test]
fn test_non_json_paths_rejected() {
    let settings = LauncherSettings::default();
    let temp = tempfile::tempdir().unwrap();

    let toml_path = temp.path().join("settings.toml");
    assert!(matches!(
        loader::save_settings_to_file(&settings, &toml_path),
        Err(ConfigError::ValidationFailed(_))
    ));
    assert!(!toml_path.exists());

    // A wrong extension is a hard error, not a silent fallback
    assert!(SettingsManager::load_from(&toml_path).is_err());
}

// ============================================================================
// OVERRIDES AND VALIDATION
// ============================================================================

#[test]
fn test_overrides_replace_endpoints() {
    let mut env = HashMap::new();
    env.insert(ENV_CATALOG_ENDPOINT, "https://apps.example/api/data".to_string());
    env.insert(ENV_BACKEND_URL, "https://apps.example/".to_string());

    let mut settings = LauncherSettings::default();
    settings.apply_overrides(|key| env.get(key).cloned());

    assert_eq!(settings.catalog_endpoint, "https://apps.example/api/data");
    assert_eq!(settings.backend_base_url, "https://apps.example");
    assert_eq!(
        settings.background_image_url(),
        "https://apps.example/uploads/background.png"
    );
}

#[test]
fn test_blank_overrides_ignored() {
    let mut settings = LauncherSettings::default();
    settings.apply_overrides(|_| Some("   ".to_string()));
    assert_eq!(settings, LauncherSettings::default());
}

#[test]
fn test_validation_failures() {
    let mut settings = LauncherSettings::default();
    settings.catalog_endpoint = String::new();
    assert!(matches!(settings.validate(), Err(ConfigError::ValidationFailed(_))));

    let mut settings = LauncherSettings::default();
    settings.catalog_endpoint = "ftp://apps.example/data".to_string();
    assert!(settings.validate().is_err());

    let mut settings = LauncherSettings::default();
    settings.mobile_breakpoint = 0.0;
    assert!(settings.validate().is_err());

    let mut settings = LauncherSettings::default();
    settings.hover_delay_ms = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn test_breakpoint_is_exclusive() {
    let settings = LauncherSettings::default();
    assert!(settings.is_narrow(767.0));
    assert!(!settings.is_narrow(768.0));
    assert!(!settings.is_narrow(1200.0));
}
