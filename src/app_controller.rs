use log::{debug, error, info, warn};
use std::fmt;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::content_api::{ContentApi, NewPost, WordPressClient};
use crate::errors::{AppError, ContentError};
use crate::language_utils;
use crate::providers::openai::OpenAI;
use crate::providers::Provider;
use crate::translation::{Sleeper, TokioSleeper, TranslationService};

// @module: Application controller for post translation

/// How the draft submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The content API created the draft
    Published {
        id: Option<u64>,
        link: Option<String>,
    },
    /// The content API answered with something other than 201
    Rejected { status_code: u16, body: String },
}

/// Summary of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub post_id: String,
    pub target_language: String,
    pub blocks_total: usize,
    pub blocks_translated: usize,
    pub outcome: RunOutcome,
}

impl RunReport {
    /// Whether a draft was created
    pub fn is_published(&self) -> bool {
        matches!(self.outcome, RunOutcome::Published { .. })
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            RunOutcome::Published { id, link } => {
                write!(f, "Post successfully created in {}.", self.target_language)?;
                if let Some(id) = id {
                    write!(f, " Draft ID: {}.", id)?;
                }
                if let Some(link) = link {
                    write!(f, " Preview: {}", link)?;
                }
            }
            RunOutcome::Rejected { status_code, .. } => {
                write!(f, "Error creating post. Status code: {}", status_code)?;
            }
        }
        write!(
            f,
            " ({} of {} blocks translated from post {})",
            self.blocks_translated, self.blocks_total, self.post_id
        )
    }
}

/// Main application controller: fetch, translate, publish
#[derive(Debug)]
pub struct Controller<C: ContentApi, P: Provider, S: Sleeper = TokioSleeper> {
    // @field: Source and destination of posts
    content_api: C,
    // @field: Title and body translation
    translator: TranslationService<P, S>,
}

impl Controller<WordPressClient, OpenAI> {
    // @method: Create a controller talking to WordPress and OpenAI
    pub fn with_config(config: &Config) -> Self {
        if config.content_api.base_url.trim().is_empty() {
            warn!("WP_API_URL is not set; the post request will fail");
        }
        if config.translation.api_key.trim().is_empty() {
            warn!("OPENAI_TOKEN is not set; translation requests will be rejected");
        }

        let content_api = WordPressClient::new(&config.content_api);
        let translator = TranslationService::new(OpenAI::from_config(&config.translation), config);

        Self::new(content_api, translator)
    }
}

impl<C: ContentApi, P: Provider, S: Sleeper> Controller<C, P, S> {
    /// Create a controller from its parts
    pub fn new(content_api: C, translator: TranslationService<P, S>) -> Self {
        Self {
            content_api,
            translator,
        }
    }

    /// The content API backend
    pub fn content_api(&self) -> &C {
        &self.content_api
    }

    /// The translation service
    pub fn translator(&self) -> &TranslationService<P, S> {
        &self.translator
    }

    /// Translate a post into a new draft.
    ///
    /// Every failure before the draft submission aborts the run. A rejected
    /// submission is reported in the returned outcome instead.
    pub async fn run(&self, post_id: &str, target_language: &str) -> Result<RunReport, AppError> {
        let start_time = Instant::now();
        let post_id = post_id.trim();
        let target_language = target_language.trim();

        info!("Fetching post {}", post_id);
        let post = self.content_api.fetch_post(post_id).await?;
        debug!("Post {}: {} bytes of content", post.id, post.content.len());

        if language_utils::get_language_name(target_language).is_err() {
            warn!(
                "'{}' is not a recognised ISO language code; it is sent to the translator as given",
                target_language
            );
        }
        info!(
            "Target language: {}",
            language_utils::describe_language(target_language)
        );

        info!("Translating title");
        let title = self.translator.translate_title(&post.title, target_language).await?;
        info!("Translated title: {}", title);

        let translated = self
            .translator
            .translate_content(&post.content, target_language)
            .await?;

        let draft = NewPost::draft(title, translated.content);
        let outcome = match self.content_api.create_post(&draft).await {
            Ok(created) => RunOutcome::Published {
                id: created.id,
                link: created.link,
            },
            Err(ContentError::Publish { status_code, body }) => {
                error!("Error creating post. Status code: {}", status_code);
                error!("{}", body);
                RunOutcome::Rejected { status_code, body }
            }
            Err(e) => return Err(e.into()),
        };

        debug!("{}", self.translator.usage().summary());
        info!(
            "Run completed in {}.",
            Self::format_duration(start_time.elapsed())
        );

        Ok(RunReport {
            post_id: post_id.to_string(),
            target_language: target_language.to_string(),
            blocks_total: translated.blocks_total,
            blocks_translated: translated.blocks_translated,
            outcome,
        })
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
