//! Atomic playback instructions

use embassy_time::Duration;

/// Binary output level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Off,
    On,
}

impl Level {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// One instruction of an effect program
///
/// Durations are base timings; the player scales them by the session speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Drive the line to a binary level, then hold it
    Level(Level, Duration),
    /// Drive the line to a proportional intensity (0.0-1.0), then hold it
    Intensity(f32, Duration),
    /// Hold whatever the line currently shows
    Rest(Duration),
}

impl Step {
    /// Line on for `ms` base milliseconds
    pub const fn on(ms: u64) -> Self {
        Self::Level(Level::On, Duration::from_millis(ms))
    }

    /// Line off for `ms` base milliseconds
    pub const fn off(ms: u64) -> Self {
        Self::Level(Level::Off, Duration::from_millis(ms))
    }

    /// Pause for `ms` base milliseconds without touching the line
    pub const fn rest(ms: u64) -> Self {
        Self::Rest(Duration::from_millis(ms))
    }

    /// Unscaled hold time of this step
    pub const fn base_duration(&self) -> Duration {
        match *self {
            Self::Level(_, duration) | Self::Intensity(_, duration) | Self::Rest(duration) => {
                duration
            }
        }
    }
}
