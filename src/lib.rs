#![no_std]

#[macro_use]
mod logging;

pub mod cancel;
pub mod delay;
pub mod effect;
pub mod error;
pub mod player;
pub mod sink;
pub mod speed;
pub mod step;

pub use cancel::CancelToken;
pub use delay::{BlockingDelay, Delay};
pub use effect::{Effect, EffectId, EffectSlot, Program};
pub use error::{PlaybackError, SessionError};
pub use player::{PlaybackReport, PlaybackSession, Player, PlayerConfig, SessionState};
pub use sink::{OutputLine, OutputMode, OutputSink};
pub use speed::{MIN_SPEED, Speed, scale};
pub use step::{Level, Step};

pub use embassy_time::Duration;
