use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::time::Duration;

use crate::app_config::ContentApiConfig;
use crate::content_api::models::{CreatedPost, NewPost, Post, PostResponse};
use crate::content_api::ContentApi;
use crate::errors::ContentError;

/// WordPress REST API client using basic authentication
pub struct WordPressClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the REST API, without trailing slash
    base_url: String,
    /// Account name
    username: String,
    /// Password or application password
    password: String,
}

impl fmt::Debug for WordPressClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPressClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl WordPressClient {
    /// Create a new client from configuration
    pub fn new(config: &ContentApiConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Self {
            client: builder.build().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// URL of a single post; the ID is escaped as one path segment
    pub fn post_url(&self, post_id: &str) -> Result<Url, ContentError> {
        let mut url = self.posts_url()?;
        url.path_segments_mut()
            .map_err(|_| ContentError::Request(format!("Cannot use {} as a base URL", self.base_url)))?
            .push(post_id.trim());
        Ok(url)
    }

    /// URL of the post collection
    pub fn posts_url(&self) -> Result<Url, ContentError> {
        Url::parse(&format!("{}/posts", self.base_url))
            .map_err(|e| ContentError::Request(format!("Invalid content API URL '{}': {}", self.base_url, e)))
    }
}

#[async_trait]
impl ContentApi for WordPressClient {
    async fn fetch_post(&self, post_id: &str) -> Result<Post, ContentError> {
        let url = self.post_url(post_id)?;
        debug!("Fetching post from {}", url);

        let response = self
            .client
            .get(url.clone())
            .query(&[("context", "edit")])
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| ContentError::Request(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Content API returned {} for post {}", status, post_id);
            return Err(ContentError::Retrieval {
                status_code: status.as_u16(),
            });
        }

        let post = response
            .json::<PostResponse>()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))?;

        Ok(post.into_post(post_id.trim()))
    }

    async fn create_post(&self, post: &NewPost) -> Result<CreatedPost, ContentError> {
        let url = self.posts_url()?;
        debug!("Creating {} post at {}", post.status, url);

        let response = self
            .client
            .post(url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .json(post)
            .send()
            .await
            .map_err(|e| ContentError::Request(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get response text".to_string());

        if status != StatusCode::CREATED {
            return Err(ContentError::Publish {
                status_code: status.as_u16(),
                body,
            });
        }

        // The post exists at this point; missing details in the answer are not an error.
        let created = serde_json::from_str::<CreatedPost>(&body).unwrap_or_else(|e| {
            debug!("Could not read created post details: {}", e);
            CreatedPost::default()
        });

        Ok(created)
    }
}
