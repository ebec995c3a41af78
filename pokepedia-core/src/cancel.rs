//! Cooperative cancellation for in-flight catalog loads
//!
//! A [`CancellationToken`] is cheap to clone; every clone observes the same
//! state. Cancelling is one-way and idempotent.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared cancellation flag backed by a `watch` channel
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            state: Arc::new(tx),
        }
    }

    /// Signal cancellation to every clone of this token
    pub fn cancel(&self) {
        if !self.state.send_replace(true) {
            tracing::debug!("Cancellation requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once the token has been cancelled
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Returns a guard that cancels this token when dropped
    pub fn drop_guard(self) -> CancelOnDrop {
        CancelOnDrop { token: self }
    }
}

/// Cancels the wrapped token on drop
#[derive(Debug)]
pub struct CancelOnDrop {
    token: CancellationToken,
}

impl CancelOnDrop {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
