//! Cancellation token shared between a session controller and the player.

use core::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop request
///
/// The player only observes the token at wait boundaries. It is a plain
/// atomic flag, so it can live in a `static` and be raised from a signal
/// handler or another thread.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create a token in the not-cancelled state
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request the running session to stop
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check if a stop was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Clear the request before starting a new session
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}
