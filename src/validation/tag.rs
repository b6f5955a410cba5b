//! Tag normalization.

use super::{Fields, ValidationError, Violations};
use crate::models::TagDraft;

/// Normalize a tag payload. Slug uniqueness is checked by the caller.
pub fn normalize_tag(fields: &Fields) -> Result<TagDraft, ValidationError> {
    let mut errors = Violations::default();

    let name = errors.required(fields, "name", "Name is required");
    let slug = errors.required_slug(fields);

    errors.check()?;

    Ok(TagDraft { name, slug })
}
