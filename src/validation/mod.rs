/*!
 * Validation of translated blocks.
 *
 * - `markers`: compares block markers before and after translation
 */

pub mod markers;

// Re-export main types
pub use markers::{MarkerValidationResult, MarkerValidator};
