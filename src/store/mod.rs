//! In-memory store of every culture's translation document
//!
//! Built once from a directory, then only read. The store holds no interior
//! mutability, so a shared reference (typically behind `Arc`) can be read
//! from any number of threads without locking.

mod error;
mod loader;

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::Path;

pub use error::StoreError;

use crate::culture::{
    DEFAULT_FALLBACK_CULTURE,
    fallback_chain,
};
use crate::document::TranslationDocument;
use crate::localized::LocalizedString;

/// Default glob for translation file names.
pub const DEFAULT_FILE_PATTERN: &str = "*.json";

/// Options controlling how a [`ResourceStore`] is loaded and searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Glob matched against file names inside the resources directory.
    pub file_pattern: String,
    /// Last culture tried by the fallback chain.
    pub fallback_culture: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            fallback_culture: DEFAULT_FALLBACK_CULTURE.to_string(),
        }
    }
}

/// Culture identifier → translation document.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    /// Documents keyed by file base name.
    documents: HashMap<String, TranslationDocument>,
    /// Last entry of every fallback chain.
    fallback_culture: String,
}

impl ResourceStore {
    /// Loads every `*.json` file in `resources_path`.
    ///
    /// # Errors
    /// See [`ResourceStore::with_options`].
    pub fn new(resources_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_options(resources_path, &StoreOptions::default())
    }

    /// Loads every matching file in `resources_path`.
    ///
    /// # Errors
    /// - `StoreError::DirectoryNotFound` if the path is missing or not a directory
    /// - Invalid file pattern
    /// - Any matching file that cannot be read or parsed
    pub fn with_options(
        resources_path: impl AsRef<Path>,
        options: &StoreOptions,
    ) -> Result<Self, StoreError> {
        let documents = loader::load_directory(resources_path.as_ref(), &options.file_pattern)?;

        Ok(Self { documents, fallback_culture: options.fallback_culture.clone() })
    }

    /// Builds a store from documents that are already parsed.
    #[must_use]
    pub fn from_documents<I>(documents: I, fallback_culture: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (String, TranslationDocument)>,
    {
        Self {
            documents: documents.into_iter().collect(),
            fallback_culture: fallback_culture.into(),
        }
    }

    /// Resolves `key` for `culture`.
    ///
    /// The first culture of the fallback chain (exact, primary subtag,
    /// fallback culture) that has a document is searched. The result never
    /// carries an empty value: misses, non-textual nodes and empty strings
    /// all yield the key itself.
    #[must_use]
    pub fn lookup(&self, key: &str, culture: &str) -> LocalizedString {
        let Some((selected, document)) = self.select(culture) else {
            tracing::trace!(culture, key, "No translation document in fallback chain");
            return LocalizedString::not_found(culture, key);
        };

        let Some(node) = document.resolve(key) else {
            tracing::trace!(culture = selected, key, "Translation key not found");
            return LocalizedString::not_found(selected, key);
        };

        let value = node.as_text().filter(|text| !text.is_empty()).unwrap_or(key);
        LocalizedString::found(value, selected, key)
    }

    /// Returns the first culture of the fallback chain that has a document.
    #[must_use]
    pub fn select(&self, culture: &str) -> Option<(&str, &TranslationDocument)> {
        fallback_chain(culture, &self.fallback_culture).into_iter().find_map(|candidate| {
            self.documents.get_key_value(candidate).map(|(name, doc)| (name.as_str(), doc))
        })
    }

    #[must_use]
    pub fn document(&self, culture: &str) -> Option<&TranslationDocument> {
        self.documents.get(culture)
    }

    #[must_use]
    pub fn contains_culture(&self, culture: &str) -> bool {
        self.documents.contains_key(culture)
    }

    /// Loaded culture identifiers, sorted.
    #[must_use]
    pub fn cultures(&self) -> Vec<&str> {
        let mut cultures: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        cultures.sort_unstable();
        cultures
    }

    /// Every string leaf of one culture's document, keyed by dotted path.
    #[must_use]
    pub fn entries(&self, culture: &str) -> Option<BTreeMap<String, String>> {
        self.documents.get(culture).map(TranslationDocument::flatten)
    }

    #[must_use]
    pub fn fallback_culture(&self) -> &str {
        &self.fallback_culture
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
