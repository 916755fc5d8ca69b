//! Line windows over growing text.
//!
//! Streaming output can grow without bound; renderers only keep the most
//! recent lines on screen. [`window`] is pure, so callers simply re-apply it
//! to the accumulated buffer after every chunk.

/// Keep at most `max_lines` lines of `text`.
///
/// Lines are the segments between `\n` characters, so a trailing newline
/// counts as an (empty) final line. When `text` already fits it is returned
/// unchanged; otherwise the last (`from_end`) or first `max_lines` lines are
/// joined back with `\n`. A limit of zero keeps nothing.
pub fn window(text: &str, max_lines: usize, from_end: bool) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }
    let kept = if from_end {
        &lines[lines.len() - max_lines..]
    } else {
        &lines[..max_lines]
    };
    kept.join("\n")
}

/// The last `max_lines` lines of `text`.
pub fn tail(text: &str, max_lines: usize) -> String {
    window(text, max_lines, true)
}

/// The first `max_lines` lines of `text`.
pub fn head(text: &str, max_lines: usize) -> String {
    window(text, max_lines, false)
}

/// Number of lines [`window`] sees in `text`.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}
