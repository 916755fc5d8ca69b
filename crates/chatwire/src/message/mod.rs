//! Outgoing and stored chat messages.
//!
//! - [`envelope`]: embed a file attachment in a message and strip it back
//!   out for display.
//! - [`preview`]: bounded previews of long messages.

pub mod envelope;
pub mod preview;

pub use envelope::{FileAttachment, decode, encode};
pub use preview::{preview, preview_with};
