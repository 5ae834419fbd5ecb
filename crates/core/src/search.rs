//! Title search helpers.
//!
//! Search is a case-insensitive literal substring match on the title. These
//! helpers live in `core` so the in-memory store and the SQL repository
//! agree on what a query means.

/// Whether `title` contains `query`, ignoring case.
///
/// An empty query matches every title.
pub fn title_matches(title: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&query.to_lowercase())
}

/// Build an `ILIKE` pattern that matches `query` as a literal substring.
///
/// `%`, `_` and the escape character `\` are escaped so user input can never
/// act as a wildcard.
///
/// # Examples
///
/// ```
/// use gamelib_core::search::contains_pattern;
/// assert_eq!(contains_pattern("zelda"), "%zelda%");
/// assert_eq!(contains_pattern("100%"), "%100\\%%");
/// assert_eq!(contains_pattern(""), "%%");
/// ```
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
