//! A value published once and awaited from anywhere.

use std::sync::Arc;
use tokio::sync::watch;

/// Write-once-or-more slot that async readers can wait on.
///
/// Clones share the slot. [`wait`](Self::wait) resolves as soon as any value
/// has been [`set`](Self::set), immediately if one already has.
pub struct SharedValue<T> {
    tx: Arc<watch::Sender<Option<T>>>,
}

impl<T> Clone for SharedValue<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Clone> Default for SharedValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SharedValue<T> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Publish `value`, replacing any earlier one.
    pub fn set(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Current value, if any.
    pub fn get(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    pub fn is_set(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Wait until a value is available.
    pub async fn wait(&self) -> T {
        let mut rx = self.tx.subscribe();
        loop {
            if let Some(value) = rx.borrow_and_update().as_ref() {
                return value.clone();
            }
            // The sender lives in `self`, so the channel cannot close here.
            let _ = rx.changed().await;
        }
    }
}
