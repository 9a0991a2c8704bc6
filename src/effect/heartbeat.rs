//! Heartbeat effect: two quick beats and a longer rest

use core::iter;

use super::{CycleProgram, Effect, Program, collect_pattern};
use crate::speed::Speed;
use crate::step::Step;

const BEATS: usize = 2;
const BEAT_ON_MS: u64 = 120;
const BEAT_OFF_MS: u64 = 120;
const REST_MS: u64 = 600;

#[derive(Debug, Clone, Default)]
pub struct HeartbeatEffect;

impl Effect for HeartbeatEffect {
    fn program(&self, _speed: Speed) -> Program {
        let beat = [Step::on(BEAT_ON_MS), Step::off(BEAT_OFF_MS)];
        let beats = iter::repeat_n(beat, BEATS).flatten();
        Program::Cycle(CycleProgram::new(collect_pattern(
            beats.chain(iter::once(Step::rest(REST_MS))),
        )))
    }
}
