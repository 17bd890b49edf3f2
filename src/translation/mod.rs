/*!
 * Translation of post titles and bodies.
 *
 * It is split into several submodules:
 *
 * - `core`: the translation service and the per-block loop
 * - `retry`: bounded retry on transient service failures
 * - `prompts`: prompt templates sent to the provider
 * - `formatting`: casing normalisation for titles
 */

// Re-export main types for easier usage
pub use self::core::{TokenUsageStats, TranslatedContent, TranslationService};
pub use self::formatting::to_title_case;
pub use self::prompts::{PromptTemplate, TranslationPrompt};
pub use self::retry::{RecordingSleeper, RetryPolicy, Sleeper, TokioSleeper};

// Submodules
pub mod core;
pub mod formatting;
pub mod prompts;
pub mod retry;
