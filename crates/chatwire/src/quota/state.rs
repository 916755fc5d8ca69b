//! Shared quota state for the quota dialog and indicator.
//!
//! ```text
//! QuotaPoller ──set_quota──▶ Arc<Mutex<QuotaState>> ◀──selectors── indicator / dialog
//!                                      ▲
//!              increase / decrease ────┘ (local bookkeeping after a send)
//! ```
//!
//! State lives for the whole session and is only changed through the
//! updaters below. The last writer wins.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Quota value plus the open/closed flag of the quota dialog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaState {
    pub quota: f64,
    pub dialog: bool,
}

impl QuotaState {
    /// Quota formatted for display, two decimals.
    pub fn display(&self) -> String {
        format!("{:.2}", self.quota)
    }
}

/// Process-wide handle to the quota state.
pub type QuotaStore = Arc<Mutex<QuotaState>>;

/// Fresh store at `{ quota: 0.0, dialog: false }`.
pub fn new_store() -> QuotaStore {
    Arc::new(Mutex::new(QuotaState::default()))
}

/// Lock the store and run a closure on the guard.
/// Poisoned locks are skipped silently.
macro_rules! with_state {
    ($state:expr, |$s:ident| $body:block) => {
        if let Ok(mut $s) = $state.lock() {
            $body
        }
    };
}

// ── Updaters ──────────────────────────────────────────────────────────

/// Overwrite the quota value.
pub fn set_quota(state: &QuotaStore, value: f64) {
    with_state!(state, |s| { s.quota = value });
}

pub fn increase_quota(state: &QuotaStore, delta: f64) {
    with_state!(state, |s| { s.quota += delta });
}

pub fn decrease_quota(state: &QuotaStore, delta: f64) {
    with_state!(state, |s| { s.quota -= delta });
}

pub fn toggle_dialog(state: &QuotaStore) {
    with_state!(state, |s| { s.dialog = !s.dialog });
}

pub fn set_dialog(state: &QuotaStore, open: bool) {
    with_state!(state, |s| { s.dialog = open });
}

pub fn open_dialog(state: &QuotaStore) {
    set_dialog(state, true);
}

pub fn close_dialog(state: &QuotaStore) {
    set_dialog(state, false);
}

// ── Selectors ─────────────────────────────────────────────────────────

/// Copy of the current state for renderers.
pub fn snapshot(state: &QuotaStore) -> QuotaState {
    match state.lock() {
        Ok(s) => s.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn dialog_open(state: &QuotaStore) -> bool {
    snapshot(state).dialog
}

pub fn quota_value(state: &QuotaStore) -> f64 {
    snapshot(state).quota
}

/// Quota as a two-decimal string, e.g. `"12.50"`.
pub fn quota_display(state: &QuotaStore) -> String {
    snapshot(state).display()
}
