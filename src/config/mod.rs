//! Localizer settings
mod loader;
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_dir,
    load_from_file,
};
pub use types::{
    ConfigError,
    LocalizerSettings,
    ValidationError,
};
