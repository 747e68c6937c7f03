use std::error::Error as _;

/// Truncates `text` to `max_chars` characters, appending `...` when cut.
pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Flattens a reqwest error and its source chain without the request URL.
///
/// URLs may carry secrets (the Telegram bot token) and per-request query
/// values, neither of which belongs in user-facing or deduplicated text.
pub fn describe_transport_error(error: reqwest::Error) -> String {
    let error = error.without_url();
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !rendered.ends_with(&cause_text) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        source = cause.source();
    }
    rendered
}
