//! Settings file loading

use std::path::Path;

use super::{
    ConfigError,
    LocalizerSettings,
};

/// Name of the settings file looked up by [`load_from_dir`].
pub const CONFIG_FILE_NAME: &str = ".json-localizer.json";

/// Loads and validates settings from `path`.
///
/// A relative `resourcesPath` is resolved against the directory containing
/// the settings file.
///
/// # Errors
/// - File read errors
/// - JSON parse errors
/// - Validation errors
/// - `resourcesPath` naming an existing file
pub fn load_from_file(path: &Path) -> Result<LocalizerSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", path);

    let content = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let mut settings: LocalizerSettings = serde_json::from_str(&content)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

    settings
        .validate()
        .map_err(|errors| ConfigError::Invalid { path: path.to_path_buf(), errors })?;

    if settings.resources_path.is_relative()
        && let Some(base) = path.parent()
    {
        settings.resources_path = base.join(&settings.resources_path);
    }

    // A missing directory is reported when the store loads.
    if settings.resources_path.is_file() {
        return Err(ConfigError::ResourcesPathNotDirectory(settings.resources_path));
    }

    tracing::debug!("Loaded settings: {:?}", settings);

    Ok(settings)
}

/// Loads settings from `root/.json-localizer.json`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and is valid
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read, parse or validation failure
///
/// # Errors
/// See [`load_from_file`].
pub fn load_from_dir(root: &Path) -> Result<Option<LocalizerSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}
