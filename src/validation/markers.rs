/*!
 * Structural marker validation for translated blocks.
 *
 * Block delimiters are HTML comments (`<!-- wp:paragraph -->`, ...). The
 * translation service is asked to keep them intact; this module compares
 * the comments of a source block with those of its translation so drift
 * can be reported. It never changes the translated text.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for matching HTML comments, which carry the block markers
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->").expect("Invalid marker regex")
});

/// Marker validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerValidationResult {
    /// Markers of the source text, in order
    pub expected: Vec<String>,
    /// Markers of the translated text, in order
    pub found: Vec<String>,
    /// Source markers absent from the translation
    pub missing: Vec<String>,
    /// Translation markers absent from the source
    pub unexpected: Vec<String>,
    /// Same markers, different order
    pub out_of_order: bool,
}

impl MarkerValidationResult {
    /// Check if validation passed (same markers, same order)
    pub fn passed(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && !self.out_of_order
    }

    /// Human-readable description of the drift, if any
    pub fn error_message(&self) -> Option<String> {
        if !self.missing.is_empty() {
            Some(format!("Missing markers: {:?}", self.missing))
        } else if !self.unexpected.is_empty() {
            Some(format!("Unexpected markers: {:?}", self.unexpected))
        } else if self.out_of_order {
            Some("Markers found out of order".to_string())
        } else {
            None
        }
    }
}

/// Marker validator for translated blocks
pub struct MarkerValidator;

impl MarkerValidator {
    /// Extract the markers of a text, in order of appearance
    pub fn extract(text: &str) -> Vec<String> {
        MARKER_REGEX
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Compare the markers of `source` with those of `translated`
    ///
    /// # Arguments
    /// * `source` - The original block text
    /// * `translated` - The text returned by the translation service
    ///
    /// # Returns
    /// * `MarkerValidationResult` with validation details
    pub fn validate(source: &str, translated: &str) -> MarkerValidationResult {
        let expected = Self::extract(source);
        let found = Self::extract(translated);

        let missing = multiset_difference(&expected, &found);
        let unexpected = multiset_difference(&found, &expected);
        let out_of_order = missing.is_empty() && unexpected.is_empty() && expected != found;

        debug!(
            "Marker check: {} expected, {} found",
            expected.len(),
            found.len()
        );

        MarkerValidationResult {
            expected,
            found,
            missing,
            unexpected,
            out_of_order,
        }
    }
}

/// Items of `left` not matched one-for-one by an item of `right`
fn multiset_difference(left: &[String], right: &[String]) -> Vec<String> {
    let mut remaining: Vec<&String> = right.iter().collect();
    let mut difference = Vec::new();

    for item in left {
        match remaining.iter().position(|candidate| *candidate == item) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => difference.push(item.clone()),
        }
    }

    difference
}
