//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Return the value only when it is present and not blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag("/images/me.png", "Logo", None) // -> <img src="/images/me.png" alt="Logo">
/// ```
pub fn image_tag(src: &str, alt: &str, style: Option<&str>) -> String {
    let style_attr = style
        .map(|s| format!(r#" style="{}""#, html_escape(s)))
        .unwrap_or_default();

    format!(
        r#"<img src="{}" alt="{}"{}>"#,
        html_escape(src),
        html_escape(alt),
        style_attr
    )
}

/// Generate an external anchor tag that opens in a new tab
pub fn external_link(href: &str, icon: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener"><i class="{}"></i> {}</a>"#,
        html_escape(href),
        html_escape(icon),
        html_escape(text)
    )
}

/// Truncate to at most `length` characters, appending `...` when cut
///
/// Unlike a word-aware truncation, the kept prefix is exactly `length`
/// characters and the omission marker is added on top of it.
pub fn truncate_chars(s: &str, length: usize) -> String {
    match s.char_indices().nth(length) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

/// Split text on newlines into non-blank paragraphs, wrapped in `<p>` and escaped
pub fn paragraphs(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", html_escape(line)))
        .collect()
}

/// Escape a value for use inside a single-quoted CSS string such as `url('...')`
pub fn css_string_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "")
}

/// Escape text and turn newlines into `<br>`
pub fn nl2br(text: &str) -> String {
    html_escape(text).replace('\n', "<br>")
}
