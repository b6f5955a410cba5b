//! Times entry normalization.

use super::{optional, Fields, ValidationError, Violations};
use crate::models::{TimeDraft, MAX_TIME_CONTENT_CHARS};

pub fn normalize_time(fields: &Fields) -> Result<TimeDraft, ValidationError> {
    let mut errors = Violations::default();

    let content = errors.required(fields, "content", "Content is required");
    if content.chars().count() > MAX_TIME_CONTENT_CHARS {
        errors.push(format!(
            "Content must be {} characters or less",
            MAX_TIME_CONTENT_CHARS
        ));
    }

    errors.check()?;

    Ok(TimeDraft {
        content,
        image_url: optional(fields, "image_url"),
    })
}
