//! Query string splitting.

/// Split a comma-separated query into trimmed tokens.
///
/// Order and duplicates are preserved; an empty query yields one empty token.
pub fn split_query(query: &str) -> Vec<&str> {
    query.split(',').map(str::trim).collect()
}
