/*!
 * Content API access.
 *
 * The pipeline only needs two operations from the content-management
 * system: read a post in its raw (edit) form, and create a new draft.
 * `WordPressClient` implements them over the WordPress REST API.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ContentError;

pub mod models;
pub mod wordpress;

pub use models::{CreatedPost, NewPost, Post, PostStatus};
pub use wordpress::WordPressClient;

/// Common trait for content-management backends
#[async_trait]
pub trait ContentApi: Send + Sync + Debug {
    /// Fetch a post's raw title and body
    ///
    /// # Arguments
    /// * `post_id` - Identifier of the post
    ///
    /// # Returns
    /// * `Result<Post, ContentError>` - `ContentError::Retrieval` on any non-200 answer
    async fn fetch_post(&self, post_id: &str) -> Result<Post, ContentError>;

    /// Create a new post
    ///
    /// # Arguments
    /// * `post` - Title, content and status of the post
    ///
    /// # Returns
    /// * `Result<CreatedPost, ContentError>` - `ContentError::Publish` on any non-201 answer
    async fn create_post(&self, post: &NewPost) -> Result<CreatedPost, ContentError>;
}
