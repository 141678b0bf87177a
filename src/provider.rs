//! Application-wide entry point
//!
//! Build one [`LocalizerProvider`] at startup and keep it for the lifetime
//! of the host. Every request then asks it for a [`Localizer`] bound to the
//! culture that request prefers.

use std::path::Path;
use std::sync::Arc;

use crate::config::LocalizerSettings;
use crate::culture::{
    ambient_culture,
    culture_from_accept_language,
};
use crate::localizer::Localizer;
use crate::store::{
    ResourceStore,
    StoreError,
    StoreOptions,
};

/// Owns the shared [`ResourceStore`] and hands out per-request localizers.
#[derive(Debug, Clone)]
pub struct LocalizerProvider {
    /// Loaded once, shared by every localizer.
    store: Arc<ResourceStore>,
    /// Culture for requests without a usable language preference.
    default_culture: String,
}

impl LocalizerProvider {
    /// Loads every `*.json` file in `resources_path`.
    ///
    /// # Errors
    /// Fails if the directory is missing or any translation file is invalid.
    pub fn new(resources_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = ResourceStore::with_options(resources_path, &StoreOptions::default())?;
        Ok(Self::from_store(Arc::new(store)))
    }

    /// Loads the store described by `settings`.
    ///
    /// # Errors
    /// Fails if the directory is missing or any translation file is invalid.
    pub fn from_settings(settings: &LocalizerSettings) -> Result<Self, StoreError> {
        let store =
            ResourceStore::with_options(&settings.resources_path, &settings.store_options())?;
        let provider = Self::from_store(Arc::new(store));

        Ok(match &settings.default_culture {
            Some(culture) => provider.with_default_culture(culture.clone()),
            None => provider,
        })
    }

    /// Wraps an existing store. The default culture is the operating system
    /// locale, or the store's fallback culture if that is unknown.
    #[must_use]
    pub fn from_store(store: Arc<ResourceStore>) -> Self {
        let default_culture =
            ambient_culture().unwrap_or_else(|| store.fallback_culture().to_string());
        Self { store, default_culture }
    }

    #[must_use]
    pub fn with_default_culture(mut self, culture: impl Into<String>) -> Self {
        self.default_culture = culture.into();
        self
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<ResourceStore> {
        &self.store
    }

    #[must_use]
    pub fn default_culture(&self) -> &str {
        &self.default_culture
    }

    /// A localizer bound to an explicit culture.
    #[must_use]
    pub fn localizer(&self, culture: impl Into<String>) -> Localizer {
        Localizer::new(Arc::clone(&self.store), culture)
    }

    /// A localizer for a request carrying the given `Accept-Language` value.
    ///
    /// Without a usable header the default culture is used.
    #[must_use]
    pub fn localizer_for_request(&self, accept_language: Option<&str>) -> Localizer {
        let culture = accept_language
            .and_then(culture_from_accept_language)
            .unwrap_or_else(|| self.default_culture.clone());

        tracing::trace!(?accept_language, %culture, "Creating request localizer");

        self.localizer(culture)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::localizer::Localize;

    #[fixture]
    fn resources() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"a": {"b": "Hello"}}"#).unwrap();
        fs::write(dir.path().join("pt.json"), r#"{"a": {"b": "Olá"}}"#).unwrap();
        fs::write(dir.path().join("ja.json"), r#"{"a": {"b": "こんにちは"}}"#).unwrap();
        dir
    }

    #[rstest]
    #[case(Some("pt-BR,pt;q=0.9,en;q=0.8"), "pt-BR", "Olá")]
    #[case(Some("de-DE, fr;q=0.5"), "de-DE", "Hello")]
    #[case(Some("en;q=0.2, ja"), "ja", "こんにちは")]
    #[case(Some("*"), "ja-JP", "こんにちは")]
    #[case(Some(""), "ja-JP", "こんにちは")]
    #[case(None, "ja-JP", "こんにちは")]
    fn localizer_for_request_picks_culture(
        resources: TempDir,
        #[case] header: Option<&str>,
        #[case] culture: &str,
        #[case] value: &str,
    ) {
        let provider =
            LocalizerProvider::new(resources.path()).unwrap().with_default_culture("ja-JP");

        let localizer = provider.localizer_for_request(header);

        assert_eq!(localizer.culture(), culture);
        assert_eq!(localizer.get_string("a.b").value(), value);
    }

    #[rstest]
    fn localizers_share_the_store(resources: TempDir) {
        let provider = LocalizerProvider::new(resources.path()).unwrap();

        let first = provider.localizer("en");
        let second = provider.localizer("pt");

        assert!(std::ptr::eq(first.store(), second.store()));
        assert!(std::ptr::eq(first.store(), provider.store().as_ref()));
    }

    #[rstest]
    fn from_settings_applies_options(resources: TempDir) {
        let settings = LocalizerSettings {
            resources_path: resources.path().to_path_buf(),
            fallback_culture: "pt".to_string(),
            default_culture: Some("ko".to_string()),
            ..LocalizerSettings::default()
        };

        let provider = LocalizerProvider::from_settings(&settings).unwrap();
        let result = provider.localizer_for_request(None).get_string("a.b");

        assert_that!(provider.default_culture(), eq("ko"));
        assert_that!(result.value(), eq("Olá"));
        assert_that!(result.searched_location(), eq("pt.a.b"));
    }

    #[rstest]
    fn missing_directory_fails_fast() {
        let dir = TempDir::new().unwrap();
        let missing: PathBuf = dir.path().join("Resources");

        let result = LocalizerProvider::new(&missing);

        assert!(matches!(result, Err(StoreError::DirectoryNotFound(path)) if path == missing));
    }

    #[rstest]
    fn default_culture_is_never_empty(resources: TempDir) {
        let provider = LocalizerProvider::new(resources.path()).unwrap();

        assert_that!(provider.default_culture(), not(eq("")));
    }
}
