// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML pages rendered with askama.
//!
//! Templates live under `templates/` and are HTML-escaped by default. Post
//! and work bodies are shown as escaped, pre-wrapped text.

use askama::Template;
use axum::response::Html;

use crate::error::AppError;
use crate::models::{Contact, Post, Tag, TimeEntry, Work};

pub const SITE_NAME: &str = "oneamlog";

/// Number of posts shown on the home page.
pub const HOME_POST_COUNT: usize = 3;

/// Render a template into an HTML response body.
pub fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Template render failed: {}", e)))
}

// ─── Public pages ────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub posts: &'a [Post],
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Tag filter link on the blog index.
pub struct TagLink<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "blog_list.html")]
pub struct BlogListTemplate<'a> {
    pub posts: &'a [Post],
    pub tag_links: Vec<TagLink<'a>>,
    pub filtered: bool,
}

impl<'a> BlogListTemplate<'a> {
    pub fn new(posts: &'a [Post], tags: &'a [Tag], current_tag: Option<&str>) -> Self {
        let tag_links = tags
            .iter()
            .map(|tag| TagLink {
                name: &tag.name,
                slug: &tag.slug,
                active: current_tag == Some(tag.slug.as_str()),
            })
            .collect();

        Self {
            posts,
            tag_links,
            filtered: current_tag.is_some(),
        }
    }
}

#[derive(Template)]
#[template(path = "blog_post.html")]
pub struct BlogPostTemplate<'a> {
    pub post: &'a Post,
}

#[derive(Template)]
#[template(path = "work_list.html")]
pub struct WorkListTemplate<'a> {
    pub works: &'a [Work],
}

#[derive(Template)]
#[template(path = "work_detail.html")]
pub struct WorkDetailTemplate<'a> {
    pub work: &'a Work,
}

#[derive(Template)]
#[template(path = "times.html")]
pub struct TimesTemplate<'a> {
    pub times: &'a [TimeEntry],
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate<'a> {
    pub success: bool,
    pub error: Option<&'a str>,
}

// ─── Admin pages ─────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate<'a> {
    pub error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub posts: &'a [Post],
}

/// Tag checkbox on the post editor.
pub struct TagOption<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub checked: bool,
}

/// Values pre-filled into the post editor.
#[derive(Default)]
pub struct PostForm {
    pub action: String,
    pub is_edit: bool,
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub status: &'static str,
}

impl PostForm {
    pub fn new_post() -> Self {
        Self {
            action: "/api/posts".to_string(),
            status: "draft",
            ..Default::default()
        }
    }

    pub fn edit(post: &Post) -> Self {
        Self {
            action: format!("/api/posts/{}", post.id),
            is_edit: true,
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone().unwrap_or_default(),
            content: post.content.clone(),
            status: post.status.as_str(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/post_editor.html")]
pub struct PostEditorTemplate<'a> {
    pub form: PostForm,
    pub tags: Vec<TagOption<'a>>,
    pub error: Option<&'a str>,
}

impl<'a> PostEditorTemplate<'a> {
    pub fn new(post: Option<&Post>, all_tags: &'a [Tag], error: Option<&'a str>) -> Self {
        let tags = all_tags
            .iter()
            .map(|tag| TagOption {
                id: &tag.id,
                name: &tag.name,
                checked: post.is_some_and(|p| p.tags.iter().any(|t| t.id == tag.id)),
            })
            .collect();

        Self {
            form: post.map(PostForm::edit).unwrap_or_else(PostForm::new_post),
            tags,
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/tags.html")]
pub struct TagManagerTemplate<'a> {
    pub tags: &'a [Tag],
    pub error: Option<&'a str>,
    pub success: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "admin/contacts.html")]
pub struct ContactListTemplate<'a> {
    pub contacts: &'a [Contact],
    pub error: Option<&'a str>,
    pub success: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "admin/times.html")]
pub struct TimesAdminTemplate<'a> {
    pub times: &'a [TimeEntry],
}

#[derive(Template)]
#[template(path = "admin/time_form.html")]
pub struct TimeFormTemplate {
    pub max_chars: usize,
}

#[derive(Template)]
#[template(path = "admin/works.html")]
pub struct WorksAdminTemplate<'a> {
    pub works: &'a [Work],
    pub success: Option<&'static str>,
}

impl<'a> WorksAdminTemplate<'a> {
    /// Map the `success` code the work form redirects with to a banner.
    pub fn success_message(code: Option<&str>) -> Option<&'static str> {
        match code? {
            "created" => Some("Work created successfully"),
            "updated" => Some("Work updated successfully"),
            "deleted" => Some("Work deleted successfully"),
            _ => None,
        }
    }
}

/// Values pre-filled into the work form. List fields are comma-joined.
#[derive(Default)]
pub struct WorkForm {
    pub is_edit: bool,
    pub endpoint: String,
    pub method: &'static str,
    pub success_code: &'static str,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub period: String,
    pub position: String,
    pub category: String,
    pub technologies: String,
    pub languages: String,
    pub libraries: String,
    pub environments: String,
    pub tools: String,
    pub image_url: String,
    pub project_url: String,
    pub github_url: String,
    pub display_order: i64,
}

impl WorkForm {
    pub fn new_work() -> Self {
        Self {
            endpoint: "/api/works".to_string(),
            method: "POST",
            success_code: "created",
            ..Default::default()
        }
    }

    pub fn edit(work: &Work) -> Self {
        Self {
            is_edit: true,
            endpoint: format!("/api/works/{}", work.id),
            method: "PUT",
            success_code: "updated",
            title: work.title.clone(),
            slug: work.slug.clone(),
            description: work.description.clone(),
            period: work.period.clone().unwrap_or_default(),
            position: work.position.clone().unwrap_or_default(),
            category: work.category.clone().unwrap_or_default(),
            technologies: work.technologies.join(", "),
            languages: work.languages.join(", "),
            libraries: work.libraries.join(", "),
            environments: work.environments.join(", "),
            tools: work.tools.join(", "),
            image_url: work.image_url.clone().unwrap_or_default(),
            project_url: work.project_url.clone().unwrap_or_default(),
            github_url: work.github_url.clone().unwrap_or_default(),
            display_order: work.display_order,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/work_form.html")]
pub struct WorkFormTemplate {
    pub form: WorkForm,
}

/// Map a login error code to the message shown on the login page.
pub fn login_error_message(code: Option<&str>) -> Option<&'static str> {
    match code? {
        "missing-credentials" => Some("Please enter your email address and password"),
        "invalid-credentials" => Some("The email address or password is incorrect"),
        _ => None,
    }
}
