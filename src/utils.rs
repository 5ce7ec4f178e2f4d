//! Small string helpers shared across the pipeline.

/// Truncate a string to at most `max` characters.
///
/// Char-count based, not word-aware; used to bound feed summaries before
/// they enter the curation prompt. Counting chars rather than bytes keeps
/// the cut from landing inside a multi-byte sequence.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the chars dropped, so log lines stay readable when a model response or
/// page body is dumped into them.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        format!("{}…(+{} chars)", truncate_chars(s, max), total - max)
    }
}
