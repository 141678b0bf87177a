//! Directory scan and file loading for the resource store

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;

use globset::Glob;
use ignore::WalkBuilder;

use super::StoreError;
use crate::document::TranslationDocument;

/// Byte order mark some editors put in front of UTF-8 files.
const UTF8_BOM: char = '\u{feff}';

/// Loads every translation file directly inside `dir`.
///
/// Files are matched by name against `file_pattern`; the culture identifier
/// is the file name without its extension. Hidden files and subdirectories
/// are ignored. Files are visited in name order, so if two files map to the
/// same culture the later one wins.
///
/// # Errors
/// - `dir` is missing or not a directory
/// - Invalid `file_pattern`
/// - Any matching file that cannot be read or parsed
pub(super) fn load_directory(
    dir: &Path,
    file_pattern: &str,
) -> Result<HashMap<String, TranslationDocument>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::DirectoryNotFound(dir.to_path_buf()));
    }

    let matcher = Glob::new(file_pattern)
        .map_err(|source| StoreError::InvalidPattern { pattern: file_pattern.to_string(), source })?
        .compile_matcher();

    tracing::debug!(dir = %dir.display(), file_pattern, "Loading translation files");

    let mut documents = HashMap::new();

    for result in WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry = result?;

        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if is_hidden(file_name) || !matcher.is_match(file_name) {
            continue;
        }

        let Some(culture) = path.file_stem().and_then(OsStr::to_str) else {
            tracing::warn!("Skipping translation file with non UTF-8 name: {:?}", path);
            continue;
        };

        let document = load_file(path)?;
        tracing::debug!(culture, path = %path.display(), "Loaded translation file");

        if documents.insert(culture.to_string(), document).is_some() {
            tracing::warn!(culture, path = %path.display(), "Culture loaded more than once");
        }
    }

    tracing::debug!(count = documents.len(), "Finished loading translation files");

    Ok(documents)
}

/// Reads and parses a single translation file.
fn load_file(path: &Path) -> Result<TranslationDocument, StoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;

    let text = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    TranslationDocument::parse(text)
        .map_err(|source| StoreError::Document { path: path.to_path_buf(), source })
}

/// Dot files are editor and VCS artifacts, never translations.
fn is_hidden(file_name: &OsStr) -> bool {
    file_name.to_str().is_some_and(|name| name.starts_with('.'))
}
