/*!
 * Prompt construction for block translation.
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptTemplate, TranslationPrompt};
