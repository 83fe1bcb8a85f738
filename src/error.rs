//! Error types

use thiserror::Error;

/// Errors raised outside the resolution path.
///
/// Resolving settings never fails; these surface from pattern compilation
/// (which the merger downgrades to "section never matches") and from the
/// directory walking and rendering done by the binary.
#[derive(Debug, Error)]
pub enum Error {
    /// Section pattern could not be compiled to a matcher
    #[error("invalid section pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Directory expansion failed
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// TOML rendering failed
    #[error("failed to render settings as TOML: {0}")]
    Render(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
