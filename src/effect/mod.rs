//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait and produces a fresh
//! [`Program`] per session, so effects themselves stay stateless.

mod blink;
mod cycle;
mod fade;
mod heartbeat;
mod morse;

use core::fmt;

pub use blink::BlinkEffect;
pub use cycle::{CycleProgram, MAX_PATTERN_STEPS, Pattern, collect_pattern};
pub use fade::{FadeEffect, RampPhase, RampProgram};
pub use heartbeat::HeartbeatEffect;
pub use morse::{MorseSymbol, MorseTimings, SosEffect};

use crate::sink::OutputMode;
use crate::speed::Speed;
use crate::step::Step;

const EFFECT_NAME_BASIC_BLINK: &str = "basic-blink";
const EFFECT_NAME_SOS_MORSE: &str = "sos-morse";
const EFFECT_NAME_HEARTBEAT: &str = "heartbeat";
const EFFECT_NAME_SMOOTH_FADE: &str = "smooth-fade";

const EFFECT_ID_BASIC_BLINK: u8 = 1;
const EFFECT_ID_SOS_MORSE: u8 = 2;
const EFFECT_ID_HEARTBEAT: u8 = 3;
const EFFECT_ID_SMOOTH_FADE: u8 = 4;

pub trait Effect {
    /// Line mode the effect needs from its sink
    const OUTPUT_MODE: OutputMode = OutputMode::Digital;

    /// Build the step sequence for one session at the given speed
    fn program(&self, speed: Speed) -> Program;
}

/// Step sequence of a running session
#[derive(Debug, Clone)]
pub enum Program {
    /// Finite pattern repeated forever
    Cycle(CycleProgram),
    /// Unbounded intensity ramp
    Ramp(RampProgram),
}

impl Iterator for Program {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self {
            Self::Cycle(program) => program.next(),
            Self::Ramp(program) => program.next(),
        }
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Plain on/off blinking
    BasicBlink(BlinkEffect),
    /// SOS in Morse code
    SosMorse(SosEffect),
    /// Double beat followed by a rest
    Heartbeat(HeartbeatEffect),
    /// PWM fade in and out
    SmoothFade(FadeEffect),
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    BasicBlink = EFFECT_ID_BASIC_BLINK,
    SosMorse = EFFECT_ID_SOS_MORSE,
    Heartbeat = EFFECT_ID_HEARTBEAT,
    SmoothFade = EFFECT_ID_SMOOTH_FADE,
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::BasicBlink(BlinkEffect::default())
    }
}

impl EffectId {
    /// Every built-in effect, in menu order
    pub const ALL: [Self; 4] = [
        Self::BasicBlink,
        Self::SosMorse,
        Self::Heartbeat,
        Self::SmoothFade,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_BASIC_BLINK => Self::BasicBlink,
            EFFECT_ID_SOS_MORSE => Self::SosMorse,
            EFFECT_ID_HEARTBEAT => Self::Heartbeat,
            EFFECT_ID_SMOOTH_FADE => Self::SmoothFade,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::BasicBlink => EffectSlot::BasicBlink(BlinkEffect::default()),
            Self::SosMorse => EffectSlot::SosMorse(SosEffect::default()),
            Self::Heartbeat => EffectSlot::Heartbeat(HeartbeatEffect::default()),
            Self::SmoothFade => EffectSlot::SmoothFade(FadeEffect::default()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BasicBlink => EFFECT_NAME_BASIC_BLINK,
            Self::SosMorse => EFFECT_NAME_SOS_MORSE,
            Self::Heartbeat => EFFECT_NAME_HEARTBEAT,
            Self::SmoothFade => EFFECT_NAME_SMOOTH_FADE,
        }
    }

    /// Human readable name for menus
    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicBlink => "Basic Blink",
            Self::SosMorse => "SOS (Morse)",
            Self::Heartbeat => "Heartbeat",
            Self::SmoothFade => "Smooth Fade (PWM)",
        }
    }

    pub const fn output_mode(self) -> OutputMode {
        match self {
            Self::BasicBlink => BlinkEffect::OUTPUT_MODE,
            Self::SosMorse => SosEffect::OUTPUT_MODE,
            Self::Heartbeat => HeartbeatEffect::OUTPUT_MODE,
            Self::SmoothFade => FadeEffect::OUTPUT_MODE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_BASIC_BLINK => Some(Self::BasicBlink),
            EFFECT_NAME_SOS_MORSE => Some(Self::SosMorse),
            EFFECT_NAME_HEARTBEAT => Some(Self::Heartbeat),
            EFFECT_NAME_SMOOTH_FADE => Some(Self::SmoothFade),
            _ => None,
        }
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EffectSlot {
    /// Build a fresh program for one session
    pub fn program(&self, speed: Speed) -> Program {
        match self {
            Self::BasicBlink(effect) => effect.program(speed),
            Self::SosMorse(effect) => effect.program(speed),
            Self::Heartbeat(effect) => effect.program(speed),
            Self::SmoothFade(effect) => effect.program(speed),
        }
    }

    /// Line mode the current effect needs
    pub fn output_mode(&self) -> OutputMode {
        self.id().output_mode()
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::BasicBlink(_) => EffectId::BasicBlink,
            Self::SosMorse(_) => EffectId::SosMorse,
            Self::Heartbeat(_) => EffectId::Heartbeat,
            Self::SmoothFade(_) => EffectId::SmoothFade,
        }
    }
}
