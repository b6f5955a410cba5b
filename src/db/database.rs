// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed operations for posts, tags, contacts, times and works.
//!
//! Every call goes straight to the [`Store`]; nothing is cached here.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::db::store::{Direction, Query, Store};
use crate::db::tables;
use crate::error::AppError;
use crate::models::{
    Contact, ContactDraft, Post, PostDraft, PostTag, Tag, TagDraft, TimeDraft, TimeEntry, Work,
    WorkDraft,
};
use crate::time_utils::format_utc_rfc3339;

/// Database handle shared through `AppState`.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn Store>,
}

fn decode<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, AppError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| AppError::Database(format!("Unexpected row shape: {}", e)))
        })
        .collect()
}

/// Serialize `draft` and merge `extra` columns into it.
fn row<D: Serialize>(draft: &D, extra: Value) -> Result<Value, AppError> {
    let mut row = serde_json::to_value(draft)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize row: {}", e)))?;

    if let (Value::Object(row), Value::Object(extra)) = (&mut row, extra) {
        row.extend(extra);
    }
    Ok(row)
}

fn now() -> String {
    format_utc_rfc3339(chrono::Utc::now())
}

impl Database {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: Query) -> Result<Vec<T>, AppError> {
        decode(self.store.select(table, &query).await?)
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
    ) -> Result<Option<T>, AppError> {
        Ok(self.select(table, query.limit(1)).await?.into_iter().next())
    }

    async fn insert_one<T: DeserializeOwned>(&self, table: &str, row: Value) -> Result<T, AppError> {
        decode(self.store.insert(table, row).await?)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Database(format!("Insert into {} returned no row", table)))
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), AppError> {
        self.store.delete(table, &Query::new().eq("id", id)).await
    }

    // ─── Posts ───────────────────────────────────────────────────

    /// Fill in `tags` on each post from the join table.
    async fn attach_tags(&self, posts: &mut [Post]) -> Result<(), AppError> {
        if posts.is_empty() {
            return Ok(());
        }

        let links_query = match posts {
            [single] => Query::new().eq("post_id", single.id.as_str()),
            _ => Query::new(),
        };
        let (links, tags) = tokio::try_join!(
            self.select::<PostTag>(tables::POST_TAGS, links_query),
            self.list_tags(),
        )?;

        let tags_by_id: HashMap<&str, &Tag> = tags.iter().map(|t| (t.id.as_str(), t)).collect();
        for post in posts.iter_mut() {
            post.tags = links
                .iter()
                .filter(|link| link.post_id == post.id)
                .filter_map(|link| tags_by_id.get(link.tag_id.as_str()))
                .map(|tag| (*tag).clone())
                .collect();
        }

        Ok(())
    }

    /// Published posts, newest publication first.
    pub async fn list_published_posts(&self) -> Result<Vec<Post>, AppError> {
        let query = Query::new()
            .eq("status", "published")
            .order_by("published_at", Direction::Descending);
        let mut posts = self.select(tables::POSTS, query).await?;
        self.attach_tags(&mut posts).await?;
        Ok(posts)
    }

    /// Every post regardless of status, newest first (admin dashboard).
    pub async fn list_all_posts(&self) -> Result<Vec<Post>, AppError> {
        let query = Query::new().order_by("created_at", Direction::Descending);
        let mut posts = self.select(tables::POSTS, query).await?;
        self.attach_tags(&mut posts).await?;
        Ok(posts)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let post = self
            .select_one::<Post>(tables::POSTS, Query::new().eq("id", id))
            .await?;
        self.with_tags(post).await
    }

    pub async fn get_published_post_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError> {
        let query = Query::new().eq("slug", slug).eq("status", "published");
        let post = self.select_one::<Post>(tables::POSTS, query).await?;
        self.with_tags(post).await
    }

    async fn with_tags(&self, post: Option<Post>) -> Result<Option<Post>, AppError> {
        match post {
            Some(post) => {
                let mut posts = [post];
                self.attach_tags(&mut posts).await?;
                let [post] = posts;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }

    pub async fn create_post(&self, draft: &PostDraft, author_id: &str) -> Result<Post, AppError> {
        let row = row(draft, json!({ "author_id": author_id, "view_count": 0 }))?;
        self.insert_one(tables::POSTS, row).await
    }

    pub async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<(), AppError> {
        let patch = row(draft, json!({ "updated_at": now() }))?;
        self.store
            .update(tables::POSTS, &Query::new().eq("id", id), patch)
            .await
    }

    /// Remove the post and its tag links.
    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        self.store
            .delete(tables::POST_TAGS, &Query::new().eq("post_id", id))
            .await?;
        self.delete_by_id(tables::POSTS, id).await
    }

    /// Replace the tag links of a post.
    pub async fn set_post_tags(&self, post_id: &str, tag_ids: &[&str]) -> Result<(), AppError> {
        self.store
            .delete(tables::POST_TAGS, &Query::new().eq("post_id", post_id))
            .await?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let links: Vec<Value> = tag_ids
            .iter()
            .map(|tag_id| json!({ "post_id": post_id, "tag_id": tag_id }))
            .collect();
        self.store.insert(tables::POST_TAGS, Value::Array(links)).await?;
        Ok(())
    }

    /// Read-modify-write; concurrent views may be lost, which is acceptable for a counter.
    pub async fn increment_view_count(&self, post: &Post) -> Result<(), AppError> {
        self.store
            .update(
                tables::POSTS,
                &Query::new().eq("id", post.id.as_str()),
                json!({ "view_count": post.view_count + 1 }),
            )
            .await
    }

    // ─── Tags ────────────────────────────────────────────────────

    /// All tags ordered by name.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        self.select(tables::TAGS, Query::new().order_by("name", Direction::Ascending))
            .await
    }

    pub async fn tag_slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self
            .select_one::<Tag>(tables::TAGS, Query::new().eq("slug", slug))
            .await?
            .is_some())
    }

    pub async fn create_tag(&self, draft: &TagDraft) -> Result<Tag, AppError> {
        self.insert_one(tables::TAGS, row(draft, json!({}))?).await
    }

    /// Unlink the tag from every post, then delete it.
    pub async fn delete_tag(&self, id: &str) -> Result<(), AppError> {
        self.store
            .delete(tables::POST_TAGS, &Query::new().eq("tag_id", id))
            .await?;
        self.delete_by_id(tables::TAGS, id).await
    }

    // ─── Contacts ────────────────────────────────────────────────

    pub async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, AppError> {
        self.insert_one(tables::CONTACTS, row(draft, json!({ "is_read": false }))?)
            .await
    }

    /// Contact messages, newest first.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        self.select(
            tables::CONTACTS,
            Query::new().order_by("created_at", Direction::Descending),
        )
        .await
    }

    pub async fn mark_contact_read(&self, id: &str) -> Result<(), AppError> {
        self.store
            .update(
                tables::CONTACTS,
                &Query::new().eq("id", id),
                json!({ "is_read": true }),
            )
            .await
    }

    // ─── Times ───────────────────────────────────────────────────

    /// Times entries, newest first.
    pub async fn list_times(&self) -> Result<Vec<TimeEntry>, AppError> {
        self.select(
            tables::TIMES,
            Query::new().order_by("created_at", Direction::Descending),
        )
        .await
    }

    pub async fn create_time(&self, draft: &TimeDraft) -> Result<TimeEntry, AppError> {
        self.insert_one(tables::TIMES, row(draft, json!({}))?).await
    }

    pub async fn delete_time(&self, id: &str) -> Result<(), AppError> {
        self.delete_by_id(tables::TIMES, id).await
    }

    // ─── Works ───────────────────────────────────────────────────

    /// Works in display order, newest first within the same order.
    pub async fn list_works(&self) -> Result<Vec<Work>, AppError> {
        let query = Query::new()
            .order_by("display_order", Direction::Ascending)
            .order_by("created_at", Direction::Descending);
        self.select(tables::WORKS, query).await
    }

    pub async fn get_work(&self, id: &str) -> Result<Option<Work>, AppError> {
        self.select_one(tables::WORKS, Query::new().eq("id", id)).await
    }

    pub async fn get_work_by_slug(&self, slug: &str) -> Result<Option<Work>, AppError> {
        self.select_one(tables::WORKS, Query::new().eq("slug", slug))
            .await
    }

    /// Whether a work other than `except_id` already uses `slug`.
    pub async fn work_slug_taken(&self, slug: &str, except_id: Option<&str>) -> Result<bool, AppError> {
        let works: Vec<Work> = self
            .select(tables::WORKS, Query::new().eq("slug", slug))
            .await?;
        Ok(works.iter().any(|w| Some(w.id.as_str()) != except_id))
    }

    pub async fn create_work(&self, draft: &WorkDraft) -> Result<Work, AppError> {
        self.insert_one(tables::WORKS, row(draft, json!({}))?).await
    }

    pub async fn update_work(&self, id: &str, draft: &WorkDraft) -> Result<(), AppError> {
        let patch = row(draft, json!({ "updated_at": now() }))?;
        self.store
            .update(tables::WORKS, &Query::new().eq("id", id), patch)
            .await
    }

    pub async fn delete_work(&self, id: &str) -> Result<(), AppError> {
        self.delete_by_id(tables::WORKS, id).await
    }
}
