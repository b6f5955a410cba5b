// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod contact;
pub mod post;
pub mod principal;
pub mod tag;
pub mod time_entry;
pub mod work;

pub use contact::{Contact, ContactDraft};
pub use post::{Post, PostDraft, PostStatus};
pub use principal::{CredentialPair, Principal, Session};
pub use tag::{PostTag, Tag, TagDraft};
pub use time_entry::{TimeDraft, TimeEntry, MAX_TIME_CONTENT_CHARS};
pub use work::{Work, WorkDraft};
