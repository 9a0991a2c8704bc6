//! Blocking wait primitive used by the player.
//!
//! The player never sleeps on its own. It hands each (already scaled and
//! sliced) wait to a [`Delay`], so hosts pick their own timer: a thread sleep
//! on Linux, a busy wait on bare metal, a virtual clock in tests.

use embassy_time::Duration;

/// Blocks the caller for a duration
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration);
    }
}

/// Busy-wait delay over the embassy time driver
///
/// Requires a time driver to be linked (the `std` feature of `embassy-time`
/// provides one on hosts).
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingDelay;

impl Delay for BlockingDelay {
    fn delay(&mut self, duration: Duration) {
        embassy_time::block_for(duration);
    }
}
