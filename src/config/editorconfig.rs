//! .editorconfig parsing
//!
//! The parser is a line scanner with two states: before the first section
//! header (the preamble) and inside a section. Header lines are the only
//! transitions. Lines that are neither a header nor a property are skipped.

use crate::glob::Glob;

/// Maximum length of a section name.
pub const MAX_SECTION_NAME: usize = 4096;
/// Maximum length of a property key.
pub const MAX_KEY_LEN: usize = 50;
/// Maximum length of a property value.
pub const MAX_VALUE_LEN: usize = 255;

/// Ordered `key -> value` map of raw strings.
///
/// Keys keep their first insertion position; inserting an existing key
/// overwrites its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Copy every entry of `other` over this map.
    pub fn extend_from(&mut self, other: &Properties) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A `[pattern]` block and its properties.
#[derive(Debug, Clone)]
pub struct Section {
    pub pattern: String,
    pub properties: Properties,
    glob: Option<Glob>,
}

impl Section {
    pub fn new(pattern: &str) -> Self {
        let glob = match Glob::for_section(pattern) {
            Ok(glob) => Some(glob),
            Err(e) => {
                tracing::debug!("section never matches: {e}");
                None
            }
        };

        Self {
            pattern: pattern.to_string(),
            properties: Properties::new(),
            glob,
        }
    }

    /// Whether this section applies to `relative_path`, a `/`-separated path
    /// relative to the directory of the file declaring the section.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.glob
            .as_ref()
            .is_some_and(|glob| glob.is_match(relative_path))
    }
}

/// Parsed contents of one configuration file.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    /// Properties declared before the first header. Never matched against
    /// files; only `root` is meaningful here.
    pub preamble: Properties,
    pub sections: Vec<Section>,
}

impl ParsedConfig {
    /// `root = true` in the preamble.
    pub fn is_root(&self) -> bool {
        self.preamble
            .get("root")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Blank,
    Header(&'a str),
    Property(String, &'a str),
    Malformed,
}

/// Parse configuration text into its preamble and sections.
pub fn parse_editorconfig(content: &str) -> ParsedConfig {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut parsed = ParsedConfig::default();

    for (idx, raw) in content.lines().enumerate() {
        match parse_line(raw) {
            Line::Blank => {}
            Line::Header(pattern) => parsed.sections.push(Section::new(pattern)),
            Line::Property(key, value) => match parsed.sections.last_mut() {
                Some(section) => section.properties.insert(key, value),
                None => parsed.preamble.insert(key, value),
            },
            Line::Malformed => {
                tracing::trace!(line = idx + 1, "skipping malformed line: {raw:?}");
            }
        }
    }

    parsed
}

fn is_comment(text: &str) -> bool {
    text.starts_with('#') || text.starts_with(';')
}

fn parse_line(raw: &str) -> Line<'_> {
    let line = raw.trim();

    // Skip empty lines and comments
    if line.is_empty() || is_comment(line) {
        return Line::Blank;
    }

    if line.starts_with('[') {
        // The header ends at the first `]` followed only by a comment
        let end = line.match_indices(']').map(|(pos, _)| pos).find(|&pos| {
            let rest = line[pos + 1..].trim();
            rest.is_empty() || is_comment(rest)
        });

        return match end {
            Some(end) if end - 1 <= MAX_SECTION_NAME => Line::Header(&line[1..end]),
            _ => Line::Malformed,
        };
    }

    let line = match line.find(['#', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    };

    let Some(sep) = line.find(['=', ':']) else {
        return Line::Malformed;
    };

    let key = line[..sep].trim();
    let value = line[sep + 1..].trim();

    let valid_key = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if !valid_key || value.len() > MAX_VALUE_LEN {
        return Line::Malformed;
    }

    Line::Property(key.to_lowercase(), value)
}
