//! Client-side utilities for a web chat and editor application.
//!
//! `chatwire` covers the pieces of a chat client that carry real invariants,
//! leaving rendering and DOM glue to the frontend:
//!
//! - **Attachment envelopes.** [`message::encode`] folds a file attachment
//!   and the user's message into one string for the transport;
//!   [`message::decode`] strips the attachment back out before display.
//! - **Bounded streaming output.** [`stream::window`] keeps at most N lines
//!   of a growing buffer and [`stream::unwrap_generation`] cleans up raw
//!   generation chunks (wrapper, escaped control characters) before windowing
//!   them to the latest six lines.
//! - **Quota polling.** [`quota::QuotaPoller`] refreshes the user's quota
//!   from `GET /quota` on a fixed cadence, with a shared
//!   [`PollGuard`](quota::PollGuard) guaranteeing at most one request per
//!   cool-down window across every poller that shares it.
//!
//! # Getting started
//!
//! ```ignore
//! use chatwire::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     // Compose an outgoing message.
//!     let file = FileAttachment::new("a.txt", "hello");
//!     let wire = encode(&file, "explain this");
//!     assert_eq!(decode(&wire), "explain this");
//!
//!     // Keep the quota indicator fresh.
//!     let store = new_store();
//!     let config = PollerConfig::new("https://chat.example.com/api");
//!     let client = QuotaClient::from_config(&config)?;
//!     let poller = QuotaPoller::new(client, store.clone(), config).start();
//!
//!     // ... later
//!     println!("quota: {}", quota_display(&store));
//!     poller.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`message`] | Attachment envelope encode/decode, message previews |
//! | [`stream`] | Line windows and generation payload cleanup |
//! | [`quota`] | Shared quota state, `/quota` client, refresh poller |
//! | [`config`] | [`PollerConfig`](config::PollerConfig) with defaults |
//! | [`util`] | List edits, query parsing, numeric key filter, shared values |

pub mod config;
pub mod message;
pub mod prelude;
pub mod quota;
pub mod stream;
pub mod util;

pub use config::PollerConfig;
