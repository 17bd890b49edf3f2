/*!
 * Post models and wire DTOs for the content API.
 *
 * `Post` is what the fetcher hands to the pipeline; `NewPost` is what the
 * publisher submits. The `*Response` structures mirror the JSON returned
 * by the WordPress REST API in the `edit` context.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// A post as read from the content API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Identifier the post was requested with
    pub id: String,
    /// Raw title markup
    pub title: String,
    /// Raw body markup
    pub content: String,
}

/// Publication state of a created post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Stored but not publicly visible
    Draft,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
        }
    }
}

/// Payload for the post-creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

impl NewPost {
    /// Create a draft; translated posts are never published directly
    pub fn draft(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status: PostStatus::Draft,
        }
    }
}

/// Details of a post the API accepted
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedPost {
    /// Identifier assigned by the API
    #[serde(default)]
    pub id: Option<u64>,
    /// Preview link of the draft
    #[serde(default)]
    pub link: Option<String>,
}

/// Field rendered with its raw source in the `edit` context
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub raw: String,
}

/// Post body returned by `GET /posts/{id}?context=edit`
#[derive(Debug, Clone, Deserialize)]
pub struct PostResponse {
    pub title: RawField,
    pub content: RawField,
}

impl PostResponse {
    /// Convert to the domain model
    pub fn into_post(self, id: impl Into<String>) -> Post {
        Post {
            id: id.into(),
            title: self.title.raw,
            content: self.content.raw,
        }
    }
}
