//! Settings resolution for a single file.
//!
//! This module provides:
//! - `.editorconfig` parsing into ordered sections
//! - Config file discovery (walk upward from the target's directory)
//! - Merging matching sections in precedence order
//! - Normalizing the merged result into typed settings

mod editorconfig;
mod file;
mod merge;
mod settings;

pub use editorconfig::{
    parse_editorconfig, ParsedConfig, Properties, Section, MAX_KEY_LEN, MAX_SECTION_NAME,
    MAX_VALUE_LEN,
};
pub use file::{locate, ConfigFile, DEFAULT_CONFIG_NAME};
pub use merge::{merge_sections, resolve};
pub use settings::{ResolvedSettings, Value, KNOWN_PROPERTIES};
