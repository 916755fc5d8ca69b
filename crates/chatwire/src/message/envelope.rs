//! Attachment envelopes: embed a text file inside a chat message.
//!
//! A message with an attachment is sent as a single string:
//!
//! ```text
//!
//! ```file
//! [[notes.txt]]
//! <file content>
//! ```
//!
//! <user message>
//! ```
//!
//! [`encode`] builds that string and [`decode`] strips the attachment block
//! back out before a message is displayed. Parsing is a literal marker scan:
//! the first ```` ```file ```` opener, a `[[name]]` line, then everything up
//! to the nearest closing fence followed by one blank line.
//!
//! Fence sequences inside the attachment content are not escaped. Content
//! containing `"\n```\n\n"` ends the block early and will not round-trip.

use serde::{Deserialize, Serialize};
use std::ops::Range;

const FENCE_OPEN: &str = "```file\n";
const FENCE_CLOSE: &str = "\n```\n\n";
const NAME_OPEN: &str = "[[";
const NAME_CLOSE: &str = "]]";

/// A text file attached to a chat message.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub content: String,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// An attachment slot with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an attachment from uploaded file bytes.
    ///
    /// Only 7-bit ASCII text is accepted; anything else (binary files,
    /// non-ASCII encodings) is rejected so it never ends up in a prompt.
    pub fn from_upload(name: impl Into<String>, bytes: &[u8]) -> Result<Self, String> {
        let name = name.into();
        if !bytes.is_ascii() {
            return Err(format!("{name} is not a plain ASCII text file"));
        }
        let content = String::from_utf8(bytes.to_vec())
            .map_err(|e| format!("failed to read {name}: {e}"))?;
        Ok(Self { name, content })
    }

    /// Whether the attachment carries a name or any content.
    pub fn is_present(&self) -> bool {
        !self.name.is_empty() || !self.content.is_empty()
    }
}

/// Compose the wire string for a message and its (optional) attachment.
///
/// The message is trimmed. Without an attachment the trimmed message is
/// returned as-is.
pub fn encode(attachment: &FileAttachment, message: &str) -> String {
    let message = message.trim();
    if !attachment.is_present() {
        return message.to_string();
    }
    format!(
        "\n{FENCE_OPEN}{NAME_OPEN}{}{NAME_CLOSE}\n{}{FENCE_CLOSE}{message}",
        attachment.name, attachment.content
    )
}

/// Strip every attachment block from a stored message.
///
/// Text without a block is returned unchanged. Stripping repeats until no
/// block remains, so `decode(decode(x)) == decode(x)`.
pub fn decode(text: &str) -> String {
    let mut current = text.to_string();
    while let Some(stripped) = strip_blocks(&current) {
        current = stripped;
    }
    current
}

/// One left-to-right pass removing non-overlapping blocks. `None` when the
/// text has no block at all.
fn strip_blocks(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut at_start = true;
    let mut found = false;

    while let Some(block) = find_block(rest) {
        let (before, _) = rest.split_at(block.start);
        // The blank line `encode` puts ahead of a leading block belongs to it.
        if !(at_start && before == "\n") {
            out.push_str(before);
        }
        let (_, after) = rest.split_at(block.end);
        rest = after;
        at_start = false;
        found = true;
    }

    if !found {
        return None;
    }
    out.push_str(rest);
    Some(out)
}

/// Byte range of the first complete block in `text`.
///
/// Every later opener searches a suffix of what an earlier one searched, so a
/// missing line break or closing fence ends the scan for the whole text. This
/// keeps one call linear in the length of `text`.
fn find_block(text: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    while let Some(pos) = text.get(offset..)?.find(FENCE_OPEN) {
        let start = offset + pos;
        let body_start = start + FENCE_OPEN.len();
        let body = text.get(body_start..)?;
        let line_end = body.find('\n')?;
        let (name_line, rest) = body.split_at(line_end);
        if is_name_line(name_line) {
            let content = rest.get(1..)?;
            let close = content.find(FENCE_CLOSE)?;
            let end = body_start + line_end + 1 + close + FENCE_CLOSE.len();
            return Some(start..end);
        }
        offset = start + 1;
    }
    None
}

fn is_name_line(line: &str) -> bool {
    line.len() >= NAME_OPEN.len() + NAME_CLOSE.len()
        && line.starts_with(NAME_OPEN)
        && line.ends_with(NAME_CLOSE)
}
