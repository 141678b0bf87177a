//! Lookup result type

use std::fmt;

/// Outcome of resolving a translation key.
///
/// `value` is always usable as display text: the translation when one was
/// found, otherwise the requested key itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedString {
    /// Translated text, or the requested key when unresolved.
    value: String,
    /// Whether resolution failed.
    resource_not_found: bool,
    /// `<culture>.<key>` location that was searched.
    searched_location: String,
}

impl LocalizedString {
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        resource_not_found: bool,
        searched_location: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            resource_not_found,
            searched_location: searched_location.into(),
        }
    }

    /// A resolved value found under `culture`.
    pub(crate) fn found(value: impl Into<String>, culture: &str, key: &str) -> Self {
        Self::new(value, false, searched_location(culture, key))
    }

    /// An unresolved key; the key doubles as the value.
    pub(crate) fn not_found(culture: &str, key: &str) -> Self {
        Self::new(key, true, searched_location(culture, key))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn resource_not_found(&self) -> bool {
        self.resource_not_found
    }

    #[must_use]
    pub fn searched_location(&self) -> &str {
        &self.searched_location
    }

    /// Replaces the value, keeping the lookup metadata.
    #[must_use]
    pub(crate) fn with_value(self, value: String) -> Self {
        Self { value, ..self }
    }

    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for LocalizedString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl From<LocalizedString> for String {
    fn from(localized: LocalizedString) -> Self {
        localized.value
    }
}

/// Formats the diagnostic location of a lookup.
fn searched_location(culture: &str, key: &str) -> String {
    format!("{culture}.{key}")
}
