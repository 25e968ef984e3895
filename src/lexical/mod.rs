//! Keyword-overlap scoring.
//!
//! Used wherever vector similarity is unavailable or insufficient: reviews
//! ingested without embeddings and the FAQ rescue fallback. Intentionally
//! crude bag-of-words overlap: no stemming, no stop words, no IDF.

/// Normalizes text for lexical comparison: lowercase, non-alphanumerics
/// replaced with spaces, whitespace collapsed, trimmed.
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_space = true;
        }
    }

    out
}

/// Counts how many query tokens appear as substrings of `text`.
///
/// Both strings are normalized identically first. Duplicate query tokens
/// are retained, so a repeated word raises the achievable ceiling; each
/// token is checked once via substring containment, not exact token match.
pub fn score(text: &str, query: &str) -> usize {
    let text = normalize_text(text);
    let query = normalize_text(query);

    if text.is_empty() || query.is_empty() {
        return 0;
    }

    query
        .split_whitespace()
        .filter(|token| text.contains(token))
        .count()
}
