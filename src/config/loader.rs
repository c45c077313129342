//! Settings file loader and serialization.

use crate::config::LauncherSettings;
use crate::error::ConfigError;
use std::fs;
use std::path::Path;

/// Load settings from a JSON file.
pub fn load_settings_from_file(path: &Path) -> Result<LauncherSettings, ConfigError> {
    validate_settings_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(format!(
                "Settings file not found at: {}",
                path.display()
            ))
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let settings: LauncherSettings =
        serde_json::from_str(&content).map_err(ConfigError::InvalidJson)?;

    Ok(settings)
}

/// Save settings to a JSON file, creating parent directories as needed.
pub fn save_settings_to_file(settings: &LauncherSettings, path: &Path) -> Result<(), ConfigError> {
    validate_settings_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(ConfigError::IoError)?;
        }
    }

    let json_content = serde_json::to_string_pretty(settings).map_err(ConfigError::InvalidJson)?;
    fs::write(path, json_content).map_err(ConfigError::IoError)?;

    Ok(())
}

/// Validate settings path (.json extension required).
pub fn validate_settings_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Settings path cannot be empty".to_string(),
        ));
    }

    match path.extension() {
        Some(ext) if ext == "json" => Ok(()),
        Some(ext) => Err(ConfigError::ValidationFailed(format!(
            "Settings file must have .json extension, got .{}",
            ext.to_string_lossy()
        ))),
        None => Err(ConfigError::ValidationFailed(
            "Settings file must have .json extension".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_settings_path() {
        assert!(validate_settings_path(Path::new("config/settings.json")).is_ok());
        assert!(validate_settings_path(Path::new("config/settings.toml")).is_err());
        assert!(validate_settings_path(Path::new("config/settings")).is_err());
        assert!(validate_settings_path(Path::new("")).is_err());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = load_settings_from_file(Path::new("/nonexistent/dir/settings.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
