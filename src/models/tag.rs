//! Tag model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Canonical tag fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDraft {
    pub name: String,
    pub slug: String,
}

/// Stored tag row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Join row linking a post to a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: String,
    pub tag_id: String,
}
