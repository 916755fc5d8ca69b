//! Convenience re-exports for common `chatwire` items.
//!
//! ```ignore
//! use chatwire::prelude::*;
//! ```
//!
//! Helpers in [`util`](crate::util) are left out; import those directly.

// ── Messages ────────────────────────────────────────────────────────
pub use crate::message::{FileAttachment, decode, encode, preview};

// ── Streaming ───────────────────────────────────────────────────────
pub use crate::stream::{GENERATION_VISIBLE_LINES, unwrap_generation, window};

// ── Quota ───────────────────────────────────────────────────────────
pub use crate::config::PollerConfig;
pub use crate::quota::{
    PollGuard, PollOutcome, PollerHandle, QuotaClient, QuotaPoller, QuotaSource, QuotaState,
    QuotaStore, dialog_open, new_store, quota_display, quota_value, set_quota,
};
