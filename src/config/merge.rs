//! Section merging
//!
//! Priority: closer file > outer file, later section > earlier section.
//! Keys that only an outer scope sets are kept.

use std::path::Path;

use super::editorconfig::Properties;
use super::file::ConfigFile;
use super::settings::ResolvedSettings;
use crate::paths;

/// Fold every section matching `target` into raw properties.
///
/// `files` must be ordered outermost first, as returned by `locate`.
/// `target` must be absolute and normalized.
pub fn merge_sections(files: &[ConfigFile], target: &Path) -> Properties {
    let mut merged = Properties::new();

    for file in files {
        let Some(relative) = paths::relative_slash_path(target, file.dir()) else {
            continue;
        };

        for section in file.sections() {
            if section.matches(&relative) {
                tracing::trace!(
                    "[{}] in {} matches {relative}",
                    section.pattern,
                    file.path().display()
                );
                merged.extend_from(&section.properties);
            }
        }
    }

    merged
}

/// Merge and normalize the settings that apply to `target`.
pub fn resolve(files: &[ConfigFile], target: &Path) -> ResolvedSettings {
    ResolvedSettings::from_properties(&merge_sections(files, target))
}
