// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Untyped field map built from a form or JSON body.

use std::collections::HashMap;

use serde_json::Value;

/// Raw, untrusted request fields.
///
/// A key may carry several values (repeated form keys such as `tags`, or a
/// JSON array). Lookups trim values and treat empty strings as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: HashMap<String, Vec<String>>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `application/x-www-form-urlencoded` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = Self::new();
        for (key, value) in pairs {
            fields.insert(key, value);
        }
        fields
    }

    /// Build from a JSON object. Returns `None` for any other JSON value.
    ///
    /// Scalars are stringified, arrays contribute one value per scalar
    /// element and `null` is dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut fields = Self::new();

        for (key, value) in object {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = scalar_to_string(item) {
                            fields.insert(key.as_str(), text);
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar_to_string(other) {
                        fields.insert(key.as_str(), text);
                    }
                }
            }
        }

        Some(fields)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style [`Fields::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// First value for `key`, trimmed; `None` if missing or blank.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)?
            .iter()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    /// First value for `key` exactly as submitted; `None` only if missing or empty.
    ///
    /// For secrets such as passwords, where surrounding whitespace is significant.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)?
            .iter()
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    /// Every non-blank value for `key`, trimmed, in submission order.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.values
            .get(key)
            .map(|values| {
                values
                    .iter()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.text(key).is_some()
    }

    /// Remove `key` and return its first trimmed value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values
            .remove(key)?
            .into_iter()
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_trims_and_skips_blank() {
        let fields = Fields::new()
            .with("title", "  Hello  ")
            .with("slug", "   ");

        assert_eq!(fields.text("title"), Some("Hello"));
        assert_eq!(fields.text("slug"), None);
        assert_eq!(fields.text("missing"), None);
    }

    #[test]
    fn test_raw_keeps_whitespace() {
        let fields = Fields::new()
            .with("password", " secret ")
            .with("blank", "")
            .with("spaces", "   ");

        assert_eq!(fields.raw("password"), Some(" secret "));
        assert_eq!(fields.text("password"), Some("secret"));
        assert_eq!(fields.raw("blank"), None);
        assert_eq!(fields.raw("spaces"), Some("   "));
        assert_eq!(fields.raw("missing"), None);
    }

    #[test]
    fn test_repeated_form_keys() {
        let fields = Fields::from_pairs([("tags", "a"), ("tags", " "), ("tags", "b")]);
        assert_eq!(fields.all("tags"), vec!["a", "b"]);
    }

    #[test]
    fn test_from_json_object() {
        let fields = Fields::from_json(&json!({
            "content": "hi",
            "display_order": 3,
            "published": true,
            "image_url": null,
            "tools": ["git", 2],
        }))
        .unwrap();

        assert_eq!(fields.text("content"), Some("hi"));
        assert_eq!(fields.text("display_order"), Some("3"));
        assert_eq!(fields.text("published"), Some("true"));
        assert!(!fields.contains("image_url"));
        assert_eq!(fields.all("tools"), vec!["git", "2"]);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Fields::from_json(&json!(["a"])).is_none());
        assert!(Fields::from_json(&json!("a")).is_none());
    }

    #[test]
    fn test_take_removes_key() {
        let mut fields = Fields::new().with("_method", " DELETE ");
        assert_eq!(fields.take("_method").as_deref(), Some("DELETE"));
        assert!(!fields.contains("_method"));
    }
}
