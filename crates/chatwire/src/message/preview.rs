//! Short previews of long messages (conversation titles, notifications).

/// Marker appended to a shortened preview.
pub const DEFAULT_PREVIEW_MARKER: &str = "...";

/// Default preview length in characters.
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;

/// Shorten `message` to `length` characters, appending `"..."` when cut.
pub fn preview(message: &str, length: usize) -> String {
    preview_with(message, length, DEFAULT_PREVIEW_MARKER)
}

/// Shorten `message` to `length` characters, appending `marker` when cut.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn preview_with(message: &str, length: usize, marker: &str) -> String {
    match message.char_indices().nth(length) {
        Some((cut, _)) => {
            let (head, _) = message.split_at(cut);
            format!("{head}{marker}")
        }
        None => message.to_string(),
    }
}
