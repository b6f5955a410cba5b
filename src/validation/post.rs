// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Post normalization.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{generate_slug, is_valid_slug, optional, Fields, ValidationError, Violations, SLUG_INVALID};
use crate::models::{PostDraft, PostStatus};
use crate::time_utils::format_utc_rfc3339;

const STATUS_INVALID: &str = "Status must be either \"draft\" or \"published\"";
const PUBLISHED_AT_INVALID: &str = "Published date must be a valid date";

/// Normalize a post payload.
///
/// A missing slug is generated from `now`; a published post without an
/// explicit `published_at` is stamped with `now`.
pub fn normalize_post(fields: &Fields, now: DateTime<Utc>) -> Result<PostDraft, ValidationError> {
    normalize_post_with_rng(fields, now, &mut rand::rng())
}

pub fn normalize_post_with_rng<R: Rng>(
    fields: &Fields,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PostDraft, ValidationError> {
    let mut errors = Violations::default();

    let title = errors.required(fields, "title", "Title is required");

    let slug = match fields.text("slug") {
        Some(slug) => {
            if !is_valid_slug(slug) {
                errors.push(SLUG_INVALID);
            }
            slug.to_string()
        }
        None => generate_slug(now.timestamp_millis(), rng),
    };

    let content = errors.required(fields, "content", "Content is required");

    let status = match fields.text("status") {
        None => PostStatus::Draft,
        Some(raw) => match PostStatus::parse(raw) {
            Some(status) => status,
            None => {
                errors.push(STATUS_INVALID);
                PostStatus::Draft
            }
        },
    };

    let explicit_published_at = match fields.text("published_at") {
        None => None,
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(date) => Some(format_utc_rfc3339(date.with_timezone(&Utc))),
            Err(_) => {
                errors.push(PUBLISHED_AT_INVALID);
                None
            }
        },
    };

    errors.check()?;

    let published_at = match (status, explicit_published_at) {
        (PostStatus::Published, None) => Some(format_utc_rfc3339(now)),
        (_, explicit) => explicit,
    };

    Ok(PostDraft {
        title,
        slug,
        content,
        excerpt: optional(fields, "excerpt"),
        status,
        published_at,
    })
}
