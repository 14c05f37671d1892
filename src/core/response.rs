//! Reply chunking and IRC line utilities
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.2.0
//!
//! ## Changelog
//! - 1.0.0: Extracted from per-handler truncation in the reminder responder

/// Usable payload budget of a single IRC line.
///
/// The protocol caps a full message at 512 bytes including the command,
/// target, and trailing CRLF; 430 leaves headroom for the server-added
/// `:nick!user@host` prefix.
pub const LINE_LIMIT: usize = 430;

/// Split text into pieces that each fit on one IRC line (UTF-8 safe).
///
/// IRC lines cannot contain newlines at all, so every `\n` in the input
/// starts a new piece; pieces longer than `max_size` bytes are split at
/// character boundaries.
pub fn split_text(text: &str, max_size: usize) -> Vec<String> {
    let mut pieces = Vec::new();

    for line in text.lines() {
        if line.len() <= max_size {
            pieces.push(line.to_string());
        } else {
            pieces.extend(split_long_line(line, max_size));
        }
    }

    if pieces.is_empty() {
        pieces.push(String::new());
    }
    pieces
}

/// Split a single overlong line into chunks respecting UTF-8 boundaries.
fn split_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        let ch_len = ch.len_utf8();
        if current.len() + ch_len > max_size && !current.is_empty() {
            result.push(current);
            current = String::new();
        }
        current.push(ch);
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Split text into IRC-sized lines (430 byte payload budget).
pub fn split_for_line(text: &str) -> Vec<String> {
    split_text(text, LINE_LIMIT)
}

/// Truncate text to fit one IRC line, adding ellipsis if needed.
pub fn truncate_for_line(text: &str) -> String {
    if text.len() <= LINE_LIMIT {
        text.to_string()
    } else {
        // Find a safe UTF-8 boundary
        let mut end = LINE_LIMIT - 3; // Room for "..."
        while !text.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
