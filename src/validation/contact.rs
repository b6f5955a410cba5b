//! Contact form normalization.

use std::sync::LazyLock;

use regex::Regex;

use super::{Fields, ValidationError, Violations};
use crate::models::ContactDraft;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("covered by tests"));

pub fn normalize_contact(fields: &Fields) -> Result<ContactDraft, ValidationError> {
    let mut errors = Violations::default();

    let name = errors.required(fields, "name", "Name is required");

    let email = match fields.text("email") {
        None => {
            errors.push("Email is required");
            String::new()
        }
        Some(email) => {
            if !EMAIL_PATTERN.is_match(email) {
                errors.push("Email must be valid");
            }
            email.to_lowercase()
        }
    };

    let message = errors.required(fields, "message", "Message is required");

    errors.check()?;

    Ok(ContactDraft {
        name,
        email,
        message,
    })
}
