//! Streaming generation output.
//!
//! - [`window`]: keep at most N lines of a growing buffer.
//! - [`generation`]: unwrap `{"result": {...}}` payloads and bound them to
//!   the latest visible lines.

pub mod generation;
pub mod window;

pub use generation::{GENERATION_VISIBLE_LINES, unescape, unwrap_generation};
pub use window::{head, line_count, tail, window};
