use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::culture::DEFAULT_FALLBACK_CULTURE;
use crate::store::{
    DEFAULT_FILE_PATTERN,
    StoreOptions,
};

/// One problem found in a settings file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid setting '{field_path}': {message}")]
pub struct ValidationError {
    /// camelCase name of the offending setting (e.g., "filePattern")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failure to obtain usable [`LocalizerSettings`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid settings in {}:\n{}", .path.display(), format_validation_errors(.errors))]
    Invalid { path: PathBuf, errors: Vec<ValidationError> },

    #[error("Failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `resourcesPath` names an existing file instead of a directory.
    #[error("resourcesPath {} is a file, not a directory", .0.display())]
    ResourcesPathNotDirectory(PathBuf),

    #[error("Failed to determine the working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

/// One `- setting: message` line per error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| format!("  - {}: {}", err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default directory holding the translation files.
const DEFAULT_RESOURCES_PATH: &str = "Resources";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizerSettings {
    /// Directory scanned for translation files.
    /// Relative paths in a config file are resolved against the file's directory.
    pub resources_path: PathBuf,

    /// Glob matched against file names in `resources_path`.
    pub file_pattern: String,

    /// Last culture tried when neither the requested culture nor its
    /// primary subtag has translations.
    pub fallback_culture: String,

    /// Culture used when a request carries no usable language preference.
    /// If unset, the operating system locale is used.
    pub default_culture: Option<String>,
}

impl Default for LocalizerSettings {
    fn default() -> Self {
        Self {
            resources_path: PathBuf::from(DEFAULT_RESOURCES_PATH),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            fallback_culture: DEFAULT_FALLBACK_CULTURE.to_string(),
            default_culture: None,
        }
    }
}

impl LocalizerSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.resources_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "resourcesPath",
                "The path cannot be empty. Please specify the directory containing the translation files",
            ));
        }

        if self.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.file_pattern) {
            errors.push(ValidationError::new(
                "filePattern",
                format!("Invalid glob pattern '{}': {e}", self.file_pattern),
            ));
        }

        if self.fallback_culture.trim().is_empty() {
            errors.push(ValidationError::new(
                "fallbackCulture",
                "The culture cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(culture) = &self.default_culture
            && culture.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "defaultCulture",
                "The culture cannot be empty. Please specify a culture (e.g., \"en-US\"), or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Options for loading a [`ResourceStore`](crate::store::ResourceStore).
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            file_pattern: self.file_pattern.clone(),
            fallback_culture: self.fallback_culture.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use std::path::Path;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = LocalizerSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"resourcesPath": "locales", "defaultCulture": "pt-BR"}"#;

        let settings: LocalizerSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.resources_path.as_path(), eq(Path::new("locales")));
        assert_that!(settings.file_pattern, eq("*.json"));
        assert_that!(settings.default_culture, some(eq("pt-BR")));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: LocalizerSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.resources_path.as_path(), eq(Path::new("Resources")));
        assert_that!(settings.file_pattern, eq("*.json"));
        assert_that!(settings.fallback_culture, eq("en"));
        assert_that!(settings.default_culture, none());
    }

    #[rstest]
    fn store_options_follow_settings() {
        let settings = LocalizerSettings {
            file_pattern: "*.jsonc".to_string(),
            fallback_culture: "ja".to_string(),
            ..LocalizerSettings::default()
        };

        let options = settings.store_options();

        assert_that!(options.file_pattern, eq("*.jsonc"));
        assert_that!(options.fallback_culture, eq("ja"));
    }

    #[rstest]
    fn validate_invalid_resources_path_empty() {
        let settings =
            LocalizerSettings { resources_path: PathBuf::new(), ..LocalizerSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("resourcesPath")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern_empty() {
        let settings =
            LocalizerSettings { file_pattern: String::new(), ..LocalizerSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("filePattern")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern_invalid_glob() {
        let settings = LocalizerSettings {
            file_pattern: "*.{json".to_string(),
            ..LocalizerSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("*.{json"))
            ]])
        );
    }

    #[rstest]
    #[case("fallbackCulture", LocalizerSettings {
        fallback_culture: " ".to_string(),
        ..LocalizerSettings::default()
    })]
    #[case("defaultCulture", LocalizerSettings {
        default_culture: Some(String::new()),
        ..LocalizerSettings::default()
    })]
    fn validate_invalid_culture_empty(
        #[case] field_path: &str,
        #[case] settings: LocalizerSettings,
    ) {
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn config_error_lists_every_invalid_setting() {
        let settings = LocalizerSettings {
            resources_path: PathBuf::new(),
            fallback_culture: String::new(),
            ..LocalizerSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error =
            ConfigError::Invalid { path: PathBuf::from("app/.json-localizer.json"), errors };

        let error_message = format!("{config_error}");
        assert_that!(error_message, starts_with("Invalid settings in app/.json-localizer.json:"));
        assert_that!(
            error_message,
            contains_substring("  - resourcesPath: The path cannot be empty")
        );
        assert_that!(
            error_message,
            contains_substring("  - fallbackCulture: The culture cannot be empty")
        );
    }

    #[rstest]
    fn validation_error_names_the_setting() {
        let error = ValidationError::new("filePattern", "The pattern cannot be empty");

        let message = error.to_string();

        assert_that!(message, eq("Invalid setting 'filePattern': The pattern cannot be empty"));
    }
}
