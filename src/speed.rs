//! Speed multiplier and duration scaling
//!
//! Every effect is written in base timings. The speed multiplier is applied
//! only when waiting: a speed of 2.0 halves each wait, 0.5 doubles it.

use core::fmt;

use embassy_time::Duration;

/// Smallest effective speed multiplier.
///
/// Zero, negative and non-finite multipliers are replaced by this value.
pub const MIN_SPEED: f32 = 1e-6;

/// Upper bound for a speed-scaled ramp increment.
pub const MAX_RAMP_STEP: f32 = 0.2;

/// Longest wait a scaled duration can produce, in microseconds.
///
/// Keeps tick conversion from overflowing at any embassy tick rate.
const MAX_SCALED_MICROS: u64 = u64::MAX / 1_000_000;

/// Playback speed multiplier, always finite and at least [`MIN_SPEED`]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f32);

impl Speed {
    /// Nominal speed (1.0)
    pub const NOMINAL: Self = Self(1.0);
    /// Minimum effective speed
    pub const MIN: Self = Self(MIN_SPEED);

    /// Create a speed multiplier, clamping degenerate input to [`Speed::MIN`]
    pub fn new(multiplier: f32) -> Self {
        if multiplier.is_finite() && multiplier > MIN_SPEED {
            Self(multiplier)
        } else {
            Self::MIN
        }
    }

    /// Raw multiplier value
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Convert a base duration into the actual wait at this speed
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn scale(self, base: Duration) -> Duration {
        let micros = libm::round(base.as_micros() as f64 / f64::from(self.0)).max(0.0);
        if micros >= MAX_SCALED_MICROS as f64 {
            return Duration::from_micros(MAX_SCALED_MICROS);
        }
        Duration::from_micros(micros as u64)
    }

    /// Scale a ramp increment in the opposite direction to durations
    ///
    /// Faster playback takes bigger steps, capped at `max_step` so the ramp
    /// keeps some resolution. The result never drops below the smallest
    /// increment that still moves an `f32` intensity.
    pub fn scale_ramp_step(self, base_step: f32, max_step: f32) -> f32 {
        (base_step * self.0).min(max_step).max(f32::EPSILON)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NOMINAL
    }
}

impl From<f32> for Speed {
    fn from(multiplier: f32) -> Self {
        Self::new(multiplier)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×", self.0)
    }
}

/// Scale `base` by a raw multiplier
///
/// Shorthand for `Speed::new(speed).scale(base)`.
pub fn scale(base: Duration, speed: f32) -> Duration {
    Speed::new(speed).scale(base)
}
