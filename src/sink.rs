//! Output sink abstraction
//!
//! Implement these traits to drive a physical line. The core never resolves
//! pin numbers or configures hardware; it only asks for a sink in the right
//! [`OutputMode`] and writes levels to it.

use core::fmt;

use crate::step::Level;

/// Intensity at or above which a digital-only sink turns on
pub const DIGITAL_THRESHOLD: f32 = 0.5;

/// How an effect drives the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Binary on/off
    Digital,
    /// Proportional intensity (PWM)
    Pwm,
}

/// A single acquired output line
pub trait OutputSink {
    type Error: fmt::Debug;

    /// Drive the line to a binary level
    fn set_level(&mut self, level: Level) -> Result<(), Self::Error>;

    /// Drive the line to a proportional intensity in `0.0..=1.0`
    ///
    /// Sinks without PWM fall back to thresholding at [`DIGITAL_THRESHOLD`].
    fn set_intensity(&mut self, intensity: f32) -> Result<(), Self::Error> {
        let level = if intensity >= DIGITAL_THRESHOLD {
            Level::On
        } else {
            Level::Off
        };
        self.set_level(level)
    }

    /// Give the line back
    fn release(&mut self) -> Result<(), Self::Error>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    type Error = S::Error;

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        (**self).set_level(level)
    }

    fn set_intensity(&mut self, intensity: f32) -> Result<(), Self::Error> {
        (**self).set_intensity(intensity)
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        (**self).release()
    }
}

/// Acquisition point for an output sink
///
/// Binding to a concrete pin happens when the line is constructed, before
/// any effect is chosen.
pub trait OutputLine {
    type Sink: OutputSink;
    type Error: fmt::Debug;

    /// Claim the line in the given mode
    fn acquire(&mut self, mode: OutputMode) -> Result<Self::Sink, Self::Error>;
}
