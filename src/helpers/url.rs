//! URL helper functions

use percent_encoding::percent_decode_str;

/// Join a base URL and a relative path with exactly one slash between them
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/", "/data/data.json") // -> "https://example.com/data/data.json"
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Append a `t=<millis>` query parameter so caches never serve a stale copy
pub fn cache_busted(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, millis)
}

/// Percent-decode a request path (`/my%20work.html` -> `/my work.html`)
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}
