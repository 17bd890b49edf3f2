/*!
 * Casing normalisation for translated titles.
 *
 * A word starts at every cased letter that follows an uncased character,
 * so digits and apostrophes also begin a new word: `"they're 1st"` becomes
 * `"They'Re 1St"`. Markup inside the title is cased the same way as text.
 */

/// Whether a character carries case
fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Convert text to title case: upper-case the first cased letter of each
/// run of cased letters, lower-case the rest.
pub fn to_title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        if previous_cased {
            result.extend(c.to_lowercase());
        } else {
            // Multi-char upper mappings keep only their first letter capital: "ß" gives "Ss".
            let mut upper = c.to_uppercase();
            result.extend(upper.next());
            result.extend(upper.flat_map(char::to_lowercase));
        }
        previous_cased = is_cased(c);
    }

    result
}
