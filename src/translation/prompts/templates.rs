/*!
 * Prompt templates for block translation.
 *
 * The user template accepts two placeholders, `{target_language}` and
 * `{text}`. The system prompt is sent unchanged with every request.
 */

use crate::app_config::TranslationConfig;
use crate::providers::{ChatMessage, CompletionRequest};

/// A template with `{target_language}` and `{text}` placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Default user message: translate HTML and nothing else.
    pub const HTML_TRANSLATOR: &'static str =
        "Translate the following English HTML content to {target_language}:\n\n{text}\n\nTranslated Content:";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default HTML translator template.
    pub fn html_translator() -> Self {
        Self::new(Self::HTML_TRANSLATOR)
    }

    /// Render the template with the given variables.
    ///
    /// The language is substituted first so a `{target_language}` token that
    /// happens to appear inside the post text is left alone.
    pub fn render(&self, target_language: &str, text: &str) -> String {
        self.template
            .replace("{target_language}", target_language)
            .replace("{text}", text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::html_translator()
    }
}

/// System instruction plus user template, ready to build requests.
#[derive(Debug, Clone)]
pub struct TranslationPrompt {
    system_prompt: String,
    user_template: PromptTemplate,
    temperature: Option<f32>,
}

impl TranslationPrompt {
    /// The default system instruction.
    pub const HTML_SYSTEM: &'static str = "You are a helpful assistant that translates English HTML content to another language while retaining the structure.";

    pub fn new(system_prompt: &str, user_template: PromptTemplate) -> Self {
        Self {
            system_prompt: system_prompt.to_string(),
            user_template,
            temperature: None,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            user_template: PromptTemplate::new(&config.user_prompt),
            temperature: config.temperature,
        }
    }

    /// Build the completion request for one piece of text.
    pub fn build(&self, text: &str, target_language: &str) -> CompletionRequest {
        CompletionRequest::new()
            .add_message(ChatMessage::system(&self.system_prompt))
            .add_message(ChatMessage::user(self.user_template.render(target_language, text)))
            .temperature(self.temperature)
    }
}

impl Default for TranslationPrompt {
    fn default() -> Self {
        Self::new(Self::HTML_SYSTEM, PromptTemplate::default())
    }
}
