//! Smooth PWM fade
//!
//! A triangle wave over the line intensity: up from 0.0 to 1.0, back down to
//! 0.0, forever. Both the sample delay and the ramp increment follow the
//! session speed, so faster playback also takes coarser steps instead of
//! hammering the sink with tiny updates.

use embassy_time::Duration;

use super::{Effect, Program};
use crate::sink::OutputMode;
use crate::speed::{MAX_RAMP_STEP, Speed};
use crate::step::Step;

const DEFAULT_BASE_STEP: f32 = 0.01;
const DEFAULT_BASE_DELAY_MS: u64 = 20;

#[derive(Debug, Clone)]
pub struct FadeEffect {
    /// Intensity increment per sample at nominal speed
    base_step: f32,
    /// Base time between samples
    base_delay: Duration,
    /// Cap for the speed-scaled increment
    max_step: f32,
}

impl Default for FadeEffect {
    fn default() -> Self {
        Self {
            base_step: DEFAULT_BASE_STEP,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_step: MAX_RAMP_STEP,
        }
    }
}

impl Effect for FadeEffect {
    const OUTPUT_MODE: OutputMode = OutputMode::Pwm;

    fn program(&self, speed: Speed) -> Program {
        let step = speed.scale_ramp_step(self.base_step, self.max_step);
        Program::Ramp(RampProgram::new(step, self.base_delay))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampPhase {
    Rising,
    Falling,
}

/// Endless triangle ramp between 0.0 and 1.0
///
/// Intensity is derived from the sample index rather than summed, and is
/// clamped at both ends, so the ramp always lands exactly on 0.0 and 1.0.
#[derive(Debug, Clone)]
pub struct RampProgram {
    step: f32,
    delay: Duration,
    phase: RampPhase,
    index: u32,
}

impl RampProgram {
    pub fn new(step: f32, delay: Duration) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            delay,
            phase: RampPhase::Rising,
            index: 0,
        }
    }

    /// Intensity increment between samples
    pub const fn step_size(&self) -> f32 {
        self.step
    }

    /// Direction of the next sample
    pub const fn phase(&self) -> RampPhase {
        self.phase
    }
}

impl Iterator for RampProgram {
    type Item = Step;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Step> {
        let travelled = self.index as f32 * self.step;
        let (intensity, at_end) = match self.phase {
            RampPhase::Rising => {
                let value = travelled.min(1.0);
                (value, value >= 1.0)
            }
            RampPhase::Falling => {
                let value = (1.0 - travelled).max(0.0);
                (value, value <= 0.0)
            }
        };

        if at_end {
            self.phase = match self.phase {
                RampPhase::Rising => RampPhase::Falling,
                RampPhase::Falling => RampPhase::Rising,
            };
            // The turning point was just emitted
            self.index = 1;
        } else {
            self.index = self.index.saturating_add(1);
        }

        Some(Step::Intensity(intensity, self.delay))
    }
}
