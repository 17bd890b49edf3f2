/*!
 * Block splitting for post content.
 *
 * Post bodies are cut on blank lines into an ordered sequence of blocks.
 * Each block is tagged translatable when it opens with a structural marker
 * for one of the configured block names (paragraphs and headings by
 * default), optionally followed by a brace-enclosed attribute payload:
 *
 * ```text
 * <!-- wp:paragraph -->
 * <!-- wp:heading {"level":2} -->
 * ```
 *
 * The attribute payload is matched, never parsed.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::MarkerConfig;

/// Delimiter between blocks in raw post content
pub const BLOCK_DELIMITER: &str = "\n\n";

/// Classifier built from the default marker configuration
static DEFAULT_CLASSIFIER: Lazy<BlockClassifier> =
    Lazy::new(|| BlockClassifier::new(&MarkerConfig::default()));

/// How a block is handled by the translation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Sent to the translation service
    Translatable,
    /// Copied to the output unchanged
    Passthrough,
}

/// A blank-line-delimited segment of post content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Raw text of the block, without the delimiter
    pub text: String,
    /// Classification of the block
    pub kind: BlockKind,
}

impl Block {
    /// Whether the block goes to the translation service
    pub fn is_translatable(&self) -> bool {
        self.kind == BlockKind::Translatable
    }
}

/// Pure prefix predicate deciding which blocks are translatable
#[derive(Debug, Clone)]
pub struct BlockClassifier {
    pattern: Option<Regex>,
}

impl BlockClassifier {
    /// Build a classifier for the given marker dialect
    pub fn new(markers: &MarkerConfig) -> Self {
        let names: Vec<String> = markers
            .translatable_blocks
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(regex::escape)
            .collect();

        if names.is_empty() {
            return Self { pattern: None };
        }

        // Attribute payload stays on the marker line: `.` does not cross newlines.
        let source = format!(
            r"^{}(?:{})(?:\s*\{{.*\}})?{}",
            regex::escape(&markers.open),
            names.join("|"),
            regex::escape(&markers.close),
        );

        Self {
            pattern: Regex::new(&source).ok(),
        }
    }

    /// Classify one block of text
    pub fn classify(&self, text: &str) -> BlockKind {
        match &self.pattern {
            Some(pattern) if pattern.is_match(text) => BlockKind::Translatable,
            _ => BlockKind::Passthrough,
        }
    }

    /// Split content into classified blocks, preserving order
    pub fn split(&self, content: &str) -> Vec<Block> {
        content
            .split(BLOCK_DELIMITER)
            .map(|text| Block {
                text: text.to_string(),
                kind: self.classify(text),
            })
            .collect()
    }
}

impl Default for BlockClassifier {
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

/// Whether a block opens with a default paragraph or heading marker
pub fn is_translatable_block(text: &str) -> bool {
    DEFAULT_CLASSIFIER.classify(text) == BlockKind::Translatable
}

/// Split content with the default markers
pub fn split_blocks(content: &str) -> Vec<Block> {
    DEFAULT_CLASSIFIER.split(content)
}

/// Rejoin block texts with the original delimiter
pub fn join_blocks<S: AsRef<str>>(blocks: &[S]) -> String {
    blocks
        .iter()
        .map(|b| b.as_ref())
        .collect::<Vec<_>>()
        .join(BLOCK_DELIMITER)
}
