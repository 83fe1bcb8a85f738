//! Resolved settings and output normalization

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::editorconfig::Properties;

/// Keys whose values are lower-cased on output.
pub const KNOWN_PROPERTIES: &[&str] = &[
    "indent_style",
    "indent_size",
    "tab_width",
    "end_of_line",
    "charset",
    "trim_trailing_whitespace",
    "insert_final_newline",
];

const INTEGER_PROPERTIES: &[&str] = &["indent_size", "tab_width"];
const BOOLEAN_PROPERTIES: &[&str] = &["trim_trailing_whitespace", "insert_final_newline"];

/// A typed setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Flat, normalized settings for one file. Keys are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedSettings(BTreeMap<String, Value>);

impl ResolvedSettings {
    /// Normalize merged raw properties.
    ///
    /// - `root` is dropped and `unset` removes a key
    /// - values of known keys are lower-cased
    /// - `indent_size`/`tab_width` become integers when numeric
    /// - `trim_trailing_whitespace`/`insert_final_newline` become booleans
    ///   for `true`/`false`
    /// - `tab_width` defaults to `indent_size` unless that is `tab`
    pub fn from_properties(merged: &Properties) -> Self {
        let mut settings = BTreeMap::new();

        for (key, raw) in merged.iter() {
            if key == "root" || raw.eq_ignore_ascii_case("unset") {
                continue;
            }

            let value = if KNOWN_PROPERTIES.contains(&key) {
                raw.to_lowercase()
            } else {
                raw.to_string()
            };

            settings.insert(key.to_string(), typed_value(key, value));
        }

        if !settings.contains_key("tab_width") {
            if let Some(indent_size) = settings.get("indent_size") {
                if indent_size.as_str() != Some("tab") {
                    let derived = indent_size.clone();
                    settings.insert("tab_width".to_string(), derived);
                }
            }
        }

        Self(settings)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ResolvedSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn typed_value(key: &str, value: String) -> Value {
    if INTEGER_PROPERTIES.contains(&key) {
        if let Ok(n) = value.parse::<i64>() {
            return Value::Integer(n);
        }
    }

    if BOOLEAN_PROPERTIES.contains(&key) {
        match value.as_str() {
            "true" => return Value::Boolean(true),
            "false" => return Value::Boolean(false),
            _ => {}
        }
    }

    Value::String(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        let mut props = Properties::new();
        for (k, v) in pairs {
            props.insert(*k, *v);
        }
        props
    }

    #[test]
    fn test_typed_values() {
        let settings = ResolvedSettings::from_properties(&props(&[
            ("indent_style", "space"),
            ("indent_size", "12"),
            ("insert_final_newline", "false"),
            ("trim_trailing_whitespace", "true"),
            ("charset", "utf-8"),
        ]));

        let expected: ResolvedSettings = [
            ("charset", Value::from("utf-8")),
            ("indent_size", Value::Integer(12)),
            ("indent_style", Value::from("space")),
            ("insert_final_newline", Value::from(false)),
            ("tab_width", Value::Integer(12)),
            ("trim_trailing_whitespace", Value::from(true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(settings, expected);
    }

    #[test]
    fn test_explicit_tab_width_kept() {
        let settings =
            ResolvedSettings::from_properties(&props(&[("indent_size", "2"), ("tab_width", "8")]));
        assert_eq!(settings.get("tab_width"), Some(&Value::Integer(8)));
        assert_eq!(settings.get("indent_size"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_no_tab_width_without_indent_size() {
        let settings = ResolvedSettings::from_properties(&props(&[("indent_style", "tab")]));
        assert!(!settings.contains_key("tab_width"));
        assert!(!settings.contains_key("indent_size"));
    }

    #[test]
    fn test_indent_size_tab_is_not_copied() {
        let settings = ResolvedSettings::from_properties(&props(&[("indent_size", "tab")]));
        assert_eq!(settings.get("indent_size"), Some(&Value::from("tab")));
        assert!(!settings.contains_key("tab_width"));
    }

    #[test]
    fn test_known_values_lowercased() {
        let settings = ResolvedSettings::from_properties(&props(&[
            ("indent_style", "Space"),
            ("insert_final_newline", "TRUE"),
            ("custom_key", "KeepCase"),
        ]));
        assert_eq!(settings.get("indent_style"), Some(&Value::from("space")));
        assert_eq!(settings.get("insert_final_newline"), Some(&Value::from(true)));
        assert_eq!(settings.get("custom_key"), Some(&Value::from("KeepCase")));
    }

    #[test]
    fn test_non_boolean_stays_string() {
        let settings =
            ResolvedSettings::from_properties(&props(&[("trim_trailing_whitespace", "yes")]));
        assert_eq!(
            settings.get("trim_trailing_whitespace"),
            Some(&Value::from("yes"))
        );
    }

    #[test]
    fn test_root_and_unset_dropped() {
        let settings = ResolvedSettings::from_properties(&props(&[
            ("root", "true"),
            ("indent_size", "unset"),
            ("charset", "utf-8"),
        ]));
        assert_eq!(settings.len(), 1);
        assert!(!settings.contains_key("tab_width"));
    }

    #[test]
    fn test_empty() {
        assert!(ResolvedSettings::from_properties(&Properties::new()).is_empty());
    }

    #[test]
    fn test_serializes_to_toml() {
        let settings = ResolvedSettings::from_properties(&props(&[
            ("indent_style", "space"),
            ("indent_size", "2"),
            ("insert_final_newline", "true"),
        ]));

        let rendered = toml::to_string(&settings).unwrap();
        assert!(rendered.contains("indent_size = 2"));
        assert!(rendered.contains("indent_style = \"space\""));
        assert!(rendered.contains("insert_final_newline = true"));
        assert!(rendered.contains("tab_width = 2"));
    }
}
