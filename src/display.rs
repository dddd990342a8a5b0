//! Small formatting helpers shared by the terminal reports.

/// Thousands-separated integer (`1234567` -> `1,234,567`).
pub(crate) fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Extension label for display; files without one get `fallback`.
pub(crate) fn extension_label<'a>(extension: &'a str, fallback: &'a str) -> &'a str {
    if extension.is_empty() {
        fallback
    } else {
        extension
    }
}
