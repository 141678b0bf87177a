//! json-localizer
//!
//! Culture-aware string lookup backed by one JSON translation file per
//! culture.
//!
//! ```no_run
//! use json_localizer::{Localize, LocalizerProvider};
//!
//! # fn main() -> Result<(), json_localizer::StoreError> {
//! let provider = LocalizerProvider::new("Resources")?;
//! let localizer = provider.localizer_for_request(Some("pt-BR,pt;q=0.9"));
//!
//! let greeting = localizer.get_string_with("home.greeting", &[&"Ada"]);
//! if greeting.resource_not_found() {
//!     tracing::warn!(location = greeting.searched_location(), "Missing translation");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod culture;
pub mod document;
pub mod format;
pub mod localized;
pub mod localizer;
pub mod provider;
pub mod store;

pub use localized::LocalizedString;
pub use localizer::{
    Localize,
    Localizer,
};
pub use provider::LocalizerProvider;
pub use store::{
    ResourceStore,
    StoreError,
};
