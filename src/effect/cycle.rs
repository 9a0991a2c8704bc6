//! Repeating step patterns

use heapless::Vec;

use crate::step::Step;

/// Capacity of a single pattern
///
/// The longest built-in pattern (SOS) needs 19 steps.
pub const MAX_PATTERN_STEPS: usize = 24;

/// Fixed-capacity list of steps forming one cycle
pub type Pattern = Vec<Step, MAX_PATTERN_STEPS>;

/// Collect steps into a pattern
///
/// Steps past [`MAX_PATTERN_STEPS`] are dropped.
pub fn collect_pattern<I: IntoIterator<Item = Step>>(steps: I) -> Pattern {
    let mut pattern = Pattern::new();
    for step in steps {
        if pattern.push(step).is_err() {
            break;
        }
    }
    pattern
}

/// Plays a pattern from the start, wrapping around forever
///
/// An empty pattern yields nothing, which ends playback.
#[derive(Debug, Clone)]
pub struct CycleProgram {
    pattern: Pattern,
    position: usize,
}

impl CycleProgram {
    pub const fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            position: 0,
        }
    }

    /// Steps of one full cycle
    pub fn pattern(&self) -> &[Step] {
        &self.pattern
    }
}

impl Iterator for CycleProgram {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = *self.pattern.get(self.position)?;
        self.position = (self.position + 1) % self.pattern.len();
        Some(step)
    }
}
