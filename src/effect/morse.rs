//! SOS distress signal in Morse code
//!
//! The cycle is `... --- ...` followed by a word gap. Each symbol lights the
//! line for its own length and is followed by one symbol gap with the line
//! off; the word gap just holds the line off.

use core::iter;

use embassy_time::Duration;

use super::{CycleProgram, Effect, Program, collect_pattern};
use crate::speed::Speed;
use crate::step::{Level, Step};

const DOT_MS: u64 = 300;
const DASH_MS: u64 = 900;
const GAP_MS: u64 = 300;
const WORD_GAP_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseSymbol {
    Dot,
    Dash,
}

use MorseSymbol::{Dash, Dot};

/// S, O, S
const SOS: [MorseSymbol; 9] = [Dot, Dot, Dot, Dash, Dash, Dash, Dot, Dot, Dot];

/// Base timings of the Morse elements
#[derive(Debug, Clone, Copy)]
pub struct MorseTimings {
    /// Line on for a dot
    pub dot: Duration,
    /// Line on for a dash
    pub dash: Duration,
    /// Line off after every symbol
    pub gap: Duration,
    /// Pause before the message repeats
    pub word_gap: Duration,
}

impl Default for MorseTimings {
    fn default() -> Self {
        Self {
            dot: Duration::from_millis(DOT_MS),
            dash: Duration::from_millis(DASH_MS),
            gap: Duration::from_millis(GAP_MS),
            word_gap: Duration::from_millis(WORD_GAP_MS),
        }
    }
}

impl MorseTimings {
    /// On/off steps for a single symbol
    fn symbol(&self, symbol: MorseSymbol) -> [Step; 2] {
        let on = match symbol {
            Dot => self.dot,
            Dash => self.dash,
        };
        [Step::Level(Level::On, on), Step::Level(Level::Off, self.gap)]
    }
}

#[derive(Debug, Clone, Default)]
pub struct SosEffect {
    timings: MorseTimings,
}

impl SosEffect {
    #[must_use]
    pub fn with_timings(mut self, timings: MorseTimings) -> Self {
        self.timings = timings;
        self
    }
}

impl Effect for SosEffect {
    fn program(&self, _speed: Speed) -> Program {
        let symbols = SOS.iter().flat_map(|&symbol| self.timings.symbol(symbol));
        let word_gap = iter::once(Step::Rest(self.timings.word_gap));
        Program::Cycle(CycleProgram::new(collect_pattern(symbols.chain(word_gap))))
    }
}
