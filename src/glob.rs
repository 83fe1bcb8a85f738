//! EditorConfig glob patterns
//!
//! Section patterns are translated to an anchored regular expression and
//! matched against `/`-separated paths relative to the declaring file's
//! directory. Numeric ranges (`{1..10}`) become capture groups whose values
//! are range-checked after the regex itself matches.

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled section pattern.
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    regex: Regex,
    ranges: Vec<(i64, i64)>,
}

impl Glob {
    /// Compile a section header pattern.
    ///
    /// A pattern without `/` matches the file name at any depth (it gets an
    /// implicit `**/` prefix). A pattern with `/` is anchored to the
    /// declaring directory; a leading `/` is dropped.
    pub fn for_section(pattern: &str) -> Result<Self> {
        let anchored = if pattern.contains('/') {
            pattern.strip_prefix('/').unwrap_or(pattern).to_string()
        } else {
            format!("**/{pattern}")
        };

        let mut glob = Self::new(&anchored)?;
        glob.pattern = pattern.to_string();
        Ok(glob)
    }

    /// Compile a glob exactly as written, anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut translator = Translator {
            ranges: Vec::new(),
            braces_balanced: braces_balanced(&chars),
        };
        let body = translator.translate(&chars);

        let regex = Regex::new(&format!("^(?:{body})$")).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            ranges: translator.ranges,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Match a `/`-separated relative path.
    pub fn is_match(&self, path: &str) -> bool {
        if self.ranges.is_empty() {
            return self.regex.is_match(path);
        }

        let Some(caps) = self.regex.captures(path) else {
            return false;
        };

        // A range inside an alternative that was not taken has no capture.
        self.ranges.iter().enumerate().all(|(i, &(lo, hi))| match caps.get(i + 1) {
            Some(m) => m
                .as_str()
                .parse::<i64>()
                .is_ok_and(|n| lo <= n && n <= hi),
            None => true,
        })
    }
}

struct Translator {
    ranges: Vec<(i64, i64)>,
    braces_balanced: bool,
}

impl Translator {
    fn translate(&mut self, chars: &[char]) -> String {
        let mut out = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            i += 1;

            match c {
                '*' => {
                    if chars.get(i) == Some(&'*') {
                        let at_segment_start = i == 1 || chars[i - 2] == '/';
                        i += 1;
                        if at_segment_start && chars.get(i) == Some(&'/') {
                            // `**/` spans zero or more whole directories
                            i += 1;
                            out.push_str("(?:.*/)?");
                        } else {
                            out.push_str(".*");
                        }
                    } else {
                        out.push_str("[^/]*");
                    }
                }
                '?' => out.push_str("[^/]"),
                '[' => match class_end(chars, i) {
                    Some(end) => {
                        out.push_str(&translate_class(&chars[i..end]));
                        i = end + 1;
                    }
                    None => out.push_str(r"\["),
                },
                '{' if self.braces_balanced => match brace_end(chars, i) {
                    Some(end) => {
                        let braces = self.translate_braces(&chars[i..end]);
                        out.push_str(&braces);
                        i = end + 1;
                    }
                    None => out.push_str(r"\{"),
                },
                '\\' => match chars.get(i) {
                    Some(&next) => {
                        push_literal(&mut out, next);
                        i += 1;
                    }
                    None => out.push_str(r"\\"),
                },
                '/' => out.push('/'),
                other => push_literal(&mut out, other),
            }
        }

        out
    }

    fn translate_braces(&mut self, inner: &[char]) -> String {
        let text: String = inner.iter().collect();
        if let Some((a, b)) = numeric_range(&text) {
            self.ranges.push((a.min(b), a.max(b)));
            return r"([+-]?\d+)".to_string();
        }

        let alternatives = split_alternatives(inner);
        if alternatives.len() < 2 {
            // `{single}` is literal
            return format!(r"\{{{}\}}", self.translate(inner));
        }

        let parts: Vec<String> = alternatives
            .into_iter()
            .map(|alt| self.translate(alt))
            .collect();
        format!("(?:{})", parts.join("|"))
    }
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

fn numeric_range(text: &str) -> Option<(i64, i64)> {
    let (lo, hi) = text.split_once("..")?;
    Some((lo.parse().ok()?, hi.parse().ok()?))
}

fn braces_balanced(chars: &[char]) -> bool {
    let mut depth: i64 = 0;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
        i += 1;
    }
    depth == 0
}

/// Index of the `}` closing a brace opened just before `from`.
fn brace_end(chars: &[char], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = from;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn split_alternatives(chars: &[char]) -> Vec<&[char]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&chars[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    parts.push(&chars[start..]);
    parts
}

/// Index of the `]` closing a class opened just before `from`.
///
/// Classes never span a path separator; `None` means the `[` is literal.
fn class_end(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    if matches!(chars.get(i), Some('!' | '^')) {
        i += 1;
    }
    // a leading `]` is part of the set
    if chars.get(i) == Some(&']') {
        i += 1;
    }

    while i < chars.len() {
        match chars[i] {
            ']' => return Some(i),
            '/' => return None,
            '\\' => i += 1,
            _ => {}
        }
        i += 1;
    }
    None
}

fn translate_class(inner: &[char]) -> String {
    let mut out = String::from("[");
    let mut rest = inner;

    if let Some((first, tail)) = rest.split_first() {
        if matches!(first, '!' | '^') {
            out.push('^');
            rest = tail;
        }
    }

    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            '\\' if i + 1 < rest.len() => {
                i += 1;
                push_class_literal(&mut out, rest[i]);
            }
            '-' => out.push('-'),
            c => push_class_literal(&mut out, c),
        }
        i += 1;
    }

    out.push(']');
    out
}

fn push_class_literal(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~' | '-') {
        out.push('\\');
    }
    out.push(c);
}
