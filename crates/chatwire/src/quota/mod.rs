//! Quota tracking: shared state, the `/quota` client and the refresh poller.
//!
//! - [`state`]: [`QuotaState`] behind an `Arc<Mutex<_>>`, with updaters and
//!   selectors for the quota indicator and dialog.
//! - [`client`]: [`QuotaClient`] (reqwest) and the [`QuotaSource`] trait.
//! - [`poller`]: [`QuotaPoller`], its shared [`PollGuard`] and the
//!   [`PollerHandle`] returned by [`QuotaPoller::start`].

pub mod client;
pub mod poller;
pub mod state;

pub use client::{QuotaClient, QuotaFuture, QuotaResponse, QuotaSource};
pub use poller::{PollGuard, PollOutcome, PollerHandle, QuotaPoller};
pub use state::{
    QuotaState, QuotaStore, close_dialog, decrease_quota, dialog_open, increase_quota, new_store,
    open_dialog, quota_display, quota_value, set_dialog, set_quota, snapshot, toggle_dialog,
};
