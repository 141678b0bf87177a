//! Culture-bound localizer

use std::fmt::Display;
use std::sync::Arc;

use crate::format::format_positional;
use crate::localized::LocalizedString;
use crate::store::ResourceStore;

/// String lookup for one fixed culture.
pub trait Localize {
    /// Looks up `key`.
    fn get_string(&self, key: &str) -> LocalizedString;

    /// Looks up `key` and substitutes `{0}`, `{1}`, ... with `args`.
    ///
    /// Formatting also applies when the key was not found, in which case the
    /// key itself is the template. A template that cannot be formatted is
    /// returned unformatted.
    fn get_string_with(&self, key: &str, args: &[&dyn Display]) -> LocalizedString;
}

/// A [`ResourceStore`] paired with the culture of the current request.
///
/// Cheap to clone and to create per request.
#[derive(Debug, Clone)]
pub struct Localizer {
    /// Shared, read-only translations.
    store: Arc<ResourceStore>,
    /// Culture every lookup is made for.
    culture: String,
}

impl Localizer {
    #[must_use]
    pub fn new(store: Arc<ResourceStore>, culture: impl Into<String>) -> Self {
        Self { store, culture: culture.into() }
    }

    #[must_use]
    pub fn culture(&self) -> &str {
        &self.culture
    }

    #[must_use]
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }
}

impl Localize for Localizer {
    fn get_string(&self, key: &str) -> LocalizedString {
        self.store.lookup(key, &self.culture)
    }

    fn get_string_with(&self, key: &str, args: &[&dyn Display]) -> LocalizedString {
        let localized = self.get_string(key);

        match format_positional(localized.value(), args) {
            Ok(formatted) => localized.with_value(formatted),
            Err(e) => {
                tracing::debug!(
                    key,
                    culture = %self.culture,
                    location = localized.searched_location(),
                    "Returning unformatted value: {e}"
                );
                localized
            }
        }
    }
}
