//! Basic on/off blinking

use embassy_time::Duration;

use super::{CycleProgram, Effect, Program, collect_pattern};
use crate::speed::Speed;
use crate::step::{Level, Step};

const DEFAULT_ON_MS: u64 = 500;
const DEFAULT_OFF_MS: u64 = 500;

/// Blink effect - alternates the line on and off
#[derive(Debug, Clone)]
pub struct BlinkEffect {
    /// Base time the line stays on
    on: Duration,
    /// Base time the line stays off
    off: Duration,
}

impl Default for BlinkEffect {
    fn default() -> Self {
        Self {
            on: Duration::from_millis(DEFAULT_ON_MS),
            off: Duration::from_millis(DEFAULT_OFF_MS),
        }
    }
}

impl BlinkEffect {
    /// Set the base on/off timings
    #[must_use]
    pub fn with_timings(mut self, on: Duration, off: Duration) -> Self {
        self.on = on;
        self.off = off;
        self
    }
}

impl Effect for BlinkEffect {
    fn program(&self, _speed: Speed) -> Program {
        Program::Cycle(CycleProgram::new(collect_pattern([
            Step::Level(Level::On, self.on),
            Step::Level(Level::Off, self.off),
        ])))
    }
}
