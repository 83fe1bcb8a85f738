//! Resolve the effective `.editorconfig` settings for a single file.
//!
//! Every config file from the filesystem root down to the file's directory
//! is consulted (stopping early at `root = true`). Sections whose pattern
//! matches the file are merged, closer files and later sections winning, and
//! the result is normalized into a flat [`ResolvedSettings`] map.
//!
//! ```no_run
//! use ecresolve::{get_editor_config_data, ResolveOptions};
//!
//! let settings = get_editor_config_data("src/app.hbs", &ResolveOptions::default());
//! if let Some(size) = settings.get("indent_size") {
//!     println!("indent_size = {size}");
//! }
//! ```

pub mod colors;
pub mod config;
pub mod error;
pub mod glob;
mod output;
pub mod paths;
pub mod walker;

pub use colors::{should_use_colors, Colors};
pub use config::{
    locate, merge_sections, parse_editorconfig, resolve, ConfigFile, ParsedConfig, Properties,
    ResolvedSettings, Section, Value, DEFAULT_CONFIG_NAME, KNOWN_PROPERTIES,
};
pub use error::{Error, Result};
pub use glob::Glob;
pub use output::{print_settings, render_toml, OutputContext, OutputMode};
pub use walker::walk_paths;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Per-call resolution options.
///
/// Deserializable so a host tool can embed it in its own config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Name of the per-directory config file
    pub config: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            config: DEFAULT_CONFIG_NAME.to_string(),
        }
    }
}

impl ResolveOptions {
    pub fn with_config(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
        }
    }
}

/// Resolves settings for files, with relative paths taken against a fixed
/// base directory.
#[derive(Debug, Clone)]
pub struct EditorConfigResolver {
    base_dir: PathBuf,
}

impl Default for EditorConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfigResolver {
    /// Use the current working directory, captured now.
    pub fn new() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!("cannot read current directory, relative paths stay relative: {e}");
            PathBuf::new()
        });
        Self { base_dir }
    }

    /// Use `base_dir`; a relative one is taken against the current working
    /// directory so the upward walk can still reach the filesystem root.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        if base_dir.is_absolute() {
            return Self {
                base_dir: paths::normalize(&base_dir),
            };
        }

        let base_dir = match std::env::current_dir() {
            Ok(cwd) => paths::absolutize(&cwd, &base_dir),
            Err(e) => {
                tracing::warn!("cannot read current directory, base dir stays relative: {e}");
                base_dir
            }
        };
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `path` as an absolute, normalized path.
    pub fn absolutize(&self, path: impl AsRef<Path>) -> PathBuf {
        paths::absolutize(&self.base_dir, path.as_ref())
    }

    /// Settings for `file_path`. Never fails; returns an empty map when no
    /// config file or section applies.
    pub fn get_editor_config_data(
        &self,
        file_path: impl AsRef<Path>,
        options: &ResolveOptions,
    ) -> ResolvedSettings {
        let target = self.absolutize(file_path);
        let files = locate(&target, &options.config, &self.base_dir);
        resolve(&files, &target)
    }
}

/// Settings for `file_path`, resolving relative paths against the current
/// working directory.
pub fn get_editor_config_data(
    file_path: impl AsRef<Path>,
    options: &ResolveOptions,
) -> ResolvedSettings {
    EditorConfigResolver::new().get_editor_config_data(file_path, options)
}
