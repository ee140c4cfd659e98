//! Field annotation parsing.
//!
//! An annotation is a comma-separated list of bare flags (`null`, `auto`,
//! `-`) and `key=value` pairs (`size=20`, `default=0`, `type=text`).
//! Parsing never fails and never validates keys; consumers decide which
//! keys they understand.

use std::collections::BTreeMap;

/// Marker that drops a field from the generated table.
pub const IGNORE_MARKER: &str = "-";

pub const KEY_SIZE: &str = "size";
pub const KEY_DEFAULT: &str = "default";
pub const KEY_TYPE: &str = "type";
pub const KEY_NULL: &str = "null";
pub const KEY_AUTO: &str = "auto";

/// Parsed annotation of a single field.
///
/// Flags map to an empty value. When a key is repeated the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    specs: BTreeMap<String, String>,
}

impl Attributes {
    /// Split an annotation string into an attribute map.
    pub fn parse(annotation: &str) -> Self {
        let specs = annotation
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
                None => (token.to_string(), String::new()),
            })
            .collect();

        Self { specs }
    }

    /// Value of `key`, or `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.specs.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.specs.contains_key(key)
    }

    pub fn is_ignored(&self) -> bool {
        self.contains(IGNORE_MARKER)
    }

    pub fn is_nullable(&self) -> bool {
        self.contains(KEY_NULL)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.contains(KEY_AUTO)
    }

    /// Explicit SQL type override from `type=...`.
    pub fn type_override(&self) -> Option<&str> {
        self.get(KEY_TYPE).filter(|t| !t.is_empty())
    }

    /// Default literal from `default=...`; a bare `default` flag yields nothing.
    pub fn default_literal(&self) -> Option<&str> {
        self.get(KEY_DEFAULT).filter(|d| !d.is_empty())
    }

    /// Raw `size` value; empty counts as absent.
    pub fn size(&self) -> Option<&str> {
        self.get(KEY_SIZE).filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
