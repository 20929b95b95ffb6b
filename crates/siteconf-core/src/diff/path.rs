//! Key paths into structured documents
//!
//! `auth.providers[0].type`, with awkward keys bracket-quoted:
//! `settings["search.index"].enabled`.

/// Append an object key to `path`
pub fn push_key(path: &str, key: &str) -> String {
    if is_plain_key(key) {
        if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path, key)
        }
    } else {
        // serde_json string encoding of a &str cannot fail
        let quoted = serde_json::to_string(key).unwrap_or_else(|_| format!("\"{}\"", key));
        format!("{}[{}]", path, quoted)
    }
}

/// Append an array index to `path`
pub fn push_index(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| c == '.' || c == '[' || c == ']' || c == '"' || c == '\'' || c.is_whitespace())
}
