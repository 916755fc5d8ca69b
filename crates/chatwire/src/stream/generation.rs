//! Cleanup for streamed generation payloads.
//!
//! Generation chunks may arrive wrapped as `{"result": { ... }}` and with
//! control characters double-encoded as literal backslash sequences.
//! [`unwrap_generation`] undoes both and keeps only the latest
//! [`GENERATION_VISIBLE_LINES`] lines. The steps run in a fixed order:
//! wrapper, escapes, window. A literal `\n` only becomes a line break once
//! unescaped, so windowing must come last.

use super::window::window;

/// Lines of generation output kept visible.
pub const GENERATION_VISIBLE_LINES: usize = 6;

/// Number of braces the `{"result": {` opener opens.
const WRAPPER_DEPTH: usize = 2;

/// Literal escape tokens and their replacements, applied in this order.
const ESCAPES: [(&str, &str); 6] = [
    ("\\n", "\n"),
    ("\\t", "\t"),
    ("\\r", "\r"),
    ("\\s", " "),
    ("\\\"", "\""),
    ("\\'", "'"),
];

/// Strip the wrapper, resolve escapes and window to the latest lines.
pub fn unwrap_generation(raw: &str) -> String {
    let text = strip_wrapper(raw);
    window(&unescape(&text), GENERATION_VISIBLE_LINES, true)
}

/// Replace literal `\n`, `\t`, `\r`, `\s`, `\"` and `\'` tokens with the
/// characters they stand for.
pub fn unescape(text: &str) -> String {
    ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (token, replacement)| {
            acc.replace(token, replacement)
        })
}

/// Best-effort removal of the `{"result": {` opener and its closing braces.
///
/// This is a token strip, not a JSON parse. One trailing `}` is always
/// removed, since the closing chunk of a stream carries no opener. When the
/// opener is found, up to [`WRAPPER_DEPTH`] trailing `}` are removed instead,
/// since closing braces may not have streamed in yet.
fn strip_wrapper(raw: &str) -> String {
    let (joined, depth) = match find_opener(raw) {
        Some((start, len)) => {
            let (before, rest) = raw.split_at(start);
            let (_, after) = rest.split_at(len);
            (format!("{before}{after}"), WRAPPER_DEPTH)
        }
        None => (raw.to_string(), 1),
    };

    let mut text = joined.trim();
    for _ in 0..depth {
        match text.strip_suffix('}') {
            Some(stripped) => text = stripped.trim_end(),
            None => break,
        }
    }
    text.trim().to_string()
}

/// Position and length of the first `{ "result" : {` opener.
fn find_opener(text: &str) -> Option<(usize, usize)> {
    text.match_indices('{').find_map(|(start, _)| {
        text.get(start..)
            .and_then(match_opener)
            .map(|len| (start, len))
    })
}

fn match_opener(candidate: &str) -> Option<usize> {
    let rest = candidate.strip_prefix('{')?.trim_start();
    let rest = rest.strip_prefix("\"result\"")?.trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('{')?;
    Some(candidate.len() - rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::window::line_count;

    #[test]
    fn wrapped_payload_is_unwrapped() {
        let raw = r#"{ "result": {  line one\nline two } }"#;
        assert_eq!(unwrap_generation(raw), "line one\nline two");
    }

    #[test]
    fn compact_wrapper() {
        assert_eq!(unwrap_generation(r#"{"result":{hello}}"#), "hello");
    }

    #[test]
    fn partial_wrapper_without_closers() {
        assert_eq!(unwrap_generation(r#"{"result": {partial out"#), "partial out");
    }

    #[test]
    fn plain_text_is_trimmed() {
        assert_eq!(unwrap_generation("  plain text  "), "plain text");
    }

    #[test]
    fn closing_chunk_loses_its_brace() {
        assert_eq!(unwrap_generation("last line }"), "last line");
        assert_eq!(unwrap_generation("last line}\n  "), "last line");
    }

    #[test]
    fn one_brace_stripped_without_opener() {
        assert_eq!(unwrap_generation("map { a } }"), "map { a }");
    }

    #[test]
    fn only_first_opener_is_removed() {
        let raw = r#"{"result": {a {"result": {b}}"#;
        assert_eq!(unwrap_generation(raw), r#"a {"result": {b"#);
    }

    #[test]
    fn escapes_become_characters() {
        assert_eq!(
            unescape(r#"a\tb\rc\sd\"e\'f\ng"#),
            "a\tb\rc d\"e'f\ng"
        );
    }

    #[test]
    fn window_applies_after_unescape() {
        // Nine lines once escapes are resolved, one line before.
        let body = (1..=9)
            .map(|i| format!("step {i}"))
            .collect::<Vec<_>>()
            .join("\\n");
        let raw = format!(r#"{{"result": {{{body}}}}}"#);
        assert_eq!(line_count(&raw), 1);

        let out = unwrap_generation(&raw);
        assert_eq!(line_count(&out), GENERATION_VISIBLE_LINES);
        assert!(out.starts_with("step 4\n"));
        assert!(out.ends_with("step 9"));
    }

    #[test]
    fn real_newlines_are_windowed_too() {
        let raw = "1\n2\n3\n4\n5\n6\n7";
        assert_eq!(unwrap_generation(raw), "2\n3\n4\n5\n6\n7");
    }
}
