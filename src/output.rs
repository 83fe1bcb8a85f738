use crate::colors::Colors;
use crate::config::ResolvedSettings;
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    /// Header per file, then `key = value` lines
    Text,
    /// One TOML table per file, keyed by path
    Toml,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
        }
    }
}

/// Text rendering of one file's settings.
pub fn format_settings(path: &Path, settings: &ResolvedSettings, colors: &Colors) -> String {
    let mut out = format!("{}{}{}\n", colors.path, path.display(), colors.reset());

    if settings.is_empty() {
        out.push_str(&format!(
            "  {}(no settings){}\n",
            colors.muted,
            colors.reset()
        ));
        return out;
    }

    for (key, value) in settings.iter() {
        out.push_str(&format!(
            "  {}{key}{} = {value}\n",
            colors.key,
            colors.reset()
        ));
    }
    out
}

pub fn print_settings(path: &Path, settings: &ResolvedSettings, ctx: &OutputContext) {
    print!("{}", format_settings(path, settings, &ctx.colors));
}

/// TOML document with one table per resolved file.
pub fn render_toml(results: &[(PathBuf, ResolvedSettings)]) -> Result<String> {
    let tables: BTreeMap<String, &ResolvedSettings> = results
        .iter()
        .map(|(path, settings)| (path.display().to_string(), settings))
        .collect();
    Ok(toml::to_string(&tables)?)
}
