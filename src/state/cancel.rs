/// Cancellation tokens for in-flight async work
///
/// Preview requests, grid-advice requests and job polls each allow at most
/// one logically current operation. Every dispatched task carries a token
/// from its channel's source; issuing a new token (or cancelling outright)
/// invalidates all earlier ones, so a stale result can never overwrite
/// state that a newer operation owns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One cancellation channel. The app keeps one source per concern.
#[derive(Debug, Clone, Default)]
pub struct TokenSource {
    live_epoch: Arc<AtomicU64>,
}

impl TokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token, cancelling every token issued before it
    pub fn issue(&self) -> CancelToken {
        let epoch = self.live_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        CancelToken {
            epoch,
            live_epoch: Arc::clone(&self.live_epoch),
        }
    }

    /// Cancel all outstanding tokens without issuing a new one
    pub fn cancel(&self) {
        self.live_epoch.fetch_add(1, Ordering::SeqCst);
    }
}

/// Handle carried by one async operation. Results are committed only while
/// the token is still the channel's newest.
#[derive(Debug, Clone)]
pub struct CancelToken {
    epoch: u64,
    live_epoch: Arc<AtomicU64>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.live_epoch.load(Ordering::SeqCst) != self.epoch
    }
}
