// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Input normalization for untrusted form/JSON payloads.
//!
//! Each entity has a pure `normalize_*` function turning a [`Fields`] map into
//! its canonical draft or a [`ValidationError`] listing every violated rule.
//! Nothing here performs I/O: uniqueness checks belong to the caller.

pub mod contact;
pub mod fields;
pub mod post;
pub mod slug;
pub mod tag;
pub mod time_entry;
pub mod work;

pub use contact::normalize_contact;
pub use fields::Fields;
pub use post::normalize_post;
pub use slug::{generate_slug, is_valid_slug};
pub use tag::normalize_tag;
pub use time_entry::normalize_time;
pub use work::normalize_work;

pub const SLUG_REQUIRED: &str = "Slug is required";
pub const SLUG_INVALID: &str = "Slug must contain only lowercase letters, numbers, and hyphens";

/// One or more violated field rules.
///
/// Displays as the individual messages joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .messages.join(", "))]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Collects violations so a normalizer reports all of them at once.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub(crate) fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// `Ok(())` if nothing was recorded.
    pub(crate) fn check(self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                messages: self.messages,
            })
        }
    }

    /// Trimmed value of a required field, recording `message` when absent.
    pub(crate) fn required(&mut self, fields: &Fields, key: &str, message: &str) -> String {
        match fields.text(key) {
            Some(value) => value.to_string(),
            None => {
                self.push(message);
                String::new()
            }
        }
    }

    /// Required slug: distinguishes "missing" from "malformed".
    pub(crate) fn required_slug(&mut self, fields: &Fields) -> String {
        match fields.text("slug") {
            None => {
                self.push(SLUG_REQUIRED);
                String::new()
            }
            Some(slug) => {
                if !is_valid_slug(slug) {
                    self.push(SLUG_INVALID);
                }
                slug.to_string()
            }
        }
    }
}

/// Optional trimmed text field.
pub(crate) fn optional(fields: &Fields, key: &str) -> Option<String> {
    fields.text(key).map(str::to_string)
}

/// Comma-separated list: split, trim, drop blanks, keep order and duplicates.
///
/// Repeated keys (or JSON arrays) are concatenated in order.
pub fn parse_list(fields: &Fields, key: &str) -> Vec<String> {
    fields
        .all(key)
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Leading-integer coercion: `"12"` → 12, `"7th"` → 7, `"-3"` → -3, anything
/// without leading digits (or out of range) → `default`.
pub fn coerce_integer(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };

    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return default;
    }

    format!("{}{}", sign, &digits[..end])
        .parse()
        .unwrap_or(default)
}
