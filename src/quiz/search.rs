/*!
 * Search predicate over question text.
 */

/// Case-insensitive substring containment.
///
/// An empty term matches every text.
pub fn matches(term: &str, text: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&term.to_lowercase())
}
