//! Effect playback engine
//!
//! Runs an effect program against an output sink until the cancellation
//! token is raised. Portable in the same way as the rest of the crate: no
//! async, no platform timers. Every wait goes through a caller supplied
//! [`Delay`].
//!
//! # Usage
//!
//! ```ignore
//! static STOP: CancelToken = CancelToken::new();
//!
//! let mut player = Player::new(BlockingDelay);
//! let effect = EffectId::Heartbeat.to_slot();
//! let report = player.play(&effect, Speed::new(2.0), &mut sink, &STOP)?;
//! ```

use embassy_time::Duration;

use crate::cancel::CancelToken;
use crate::delay::Delay;
use crate::effect::{EffectId, EffectSlot, Program};
use crate::error::{PlaybackError, SessionError};
use crate::sink::{OutputLine, OutputMode, OutputSink};
use crate::speed::Speed;
use crate::step::{Level, Step};

/// Default longest uninterrupted wait.
pub const DEFAULT_WAIT_SLICE: Duration = Duration::from_millis(50);

const ZERO: Duration = Duration::from_ticks(0);

/// Configuration for the player
#[derive(Debug, Clone, Copy)]
pub struct PlayerConfig {
    /// Longest uninterrupted wait; cancellation is checked between slices.
    ///
    /// Zero disables slicing, so each step waits in one piece.
    pub wait_slice: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            wait_slice: DEFAULT_WAIT_SLICE,
        }
    }
}

/// Session state machine
///
/// `Stopping` is terminal: a stopped session is never resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Stopping,
}

/// Outcome of a session that stopped on request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Steps applied to the sink (rests included)
    pub steps: u64,
    /// Total scaled time spent waiting
    pub waited: Duration,
    /// Forcing the line idle or releasing it failed
    pub cleanup_failed: bool,
}

/// Owns the sink for one session and puts it back to idle on drop
struct SinkGuard<S: OutputSink> {
    sink: S,
    mode: OutputMode,
    released: bool,
}

impl<S: OutputSink> SinkGuard<S> {
    const fn new(sink: S, mode: OutputMode) -> Self {
        Self {
            sink,
            mode,
            released: false,
        }
    }

    fn apply(&mut self, step: &Step) -> Result<(), S::Error> {
        match *step {
            Step::Level(level, _) => self.sink.set_level(level),
            Step::Intensity(intensity, _) => self.sink.set_intensity(intensity.clamp(0.0, 1.0)),
            Step::Rest(_) => Ok(()),
        }
    }

    /// Force the line idle and release it, once
    ///
    /// Release is attempted even when idling fails.
    fn shutdown(&mut self) -> Result<(), S::Error> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let idle = match self.mode {
            OutputMode::Digital => self.sink.set_level(Level::Off),
            OutputMode::Pwm => self.sink.set_intensity(0.0),
        };
        let release = self.sink.release();
        idle.and(release)
    }
}

impl<S: OutputSink> Drop for SinkGuard<S> {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            log_warn!("failed to idle output line: {:?}", err);
        }
    }
}

/// One run of an effect against a bound sink
pub struct PlaybackSession<'a, S: OutputSink> {
    id: EffectId,
    program: Program,
    speed: Speed,
    guard: SinkGuard<S>,
    cancel: &'a CancelToken,
    state: SessionState,
    report: PlaybackReport,
}

impl<'a, S: OutputSink> PlaybackSession<'a, S> {
    /// Bind an effect to a sink
    ///
    /// The session starts `Running`. The sink is idled and released when the
    /// session is finished or dropped.
    pub fn new(effect: &EffectSlot, speed: Speed, sink: S, cancel: &'a CancelToken) -> Self {
        Self {
            id: effect.id(),
            program: effect.program(speed),
            speed,
            guard: SinkGuard::new(sink, effect.output_mode()),
            cancel,
            state: SessionState::Running,
            report: PlaybackReport {
                steps: 0,
                waited: ZERO,
                cleanup_failed: false,
            },
        }
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub const fn speed(&self) -> Speed {
        self.speed
    }

    pub const fn effect(&self) -> EffectId {
        self.id
    }

    /// Apply the next step and wait it out
    ///
    /// Returns the state after the wait. A sink fault stops the session and
    /// is returned as an error; the caller should drop the session, which
    /// idles the line.
    pub fn advance<D: Delay>(
        &mut self,
        delay: &mut D,
        config: PlayerConfig,
    ) -> Result<SessionState, PlaybackError<S::Error>> {
        if self.state == SessionState::Stopping {
            return Ok(self.state);
        }

        let Some(step) = self.program.next() else {
            self.state = SessionState::Stopping;
            return Ok(self.state);
        };

        if let Err(err) = self.guard.apply(&step) {
            log_warn!("{} stopped by sink fault: {:?}", self.id, err);
            self.state = SessionState::Stopping;
            return Err(PlaybackError::Sink(err));
        }
        self.report.steps += 1;

        let wait = self.speed.scale(step.base_duration());
        self.state = self.wait(wait, delay, config);
        Ok(self.state)
    }

    /// Play until cancelled, then idle and release the line
    pub fn run<D: Delay>(
        mut self,
        delay: &mut D,
        config: PlayerConfig,
    ) -> Result<PlaybackReport, PlaybackError<S::Error>> {
        while self.advance(delay, config)? == SessionState::Running {}
        Ok(self.finish())
    }

    /// Stop the session now and return its report
    pub fn finish(mut self) -> PlaybackReport {
        self.state = SessionState::Stopping;
        if let Err(err) = self.guard.shutdown() {
            log_warn!("{} stopped, but idling the line failed: {:?}", self.id, err);
            self.report.cleanup_failed = true;
        }
        log_debug!(
            "{} stopped after {} steps ({} ms)",
            self.id,
            self.report.steps,
            self.report.waited.as_millis()
        );
        self.report
    }

    /// Wait in slices, checking the token before each one
    fn wait<D: Delay>(
        &mut self,
        duration: Duration,
        delay: &mut D,
        config: PlayerConfig,
    ) -> SessionState {
        let mut remaining = duration;
        loop {
            if self.cancel.is_cancelled() {
                return SessionState::Stopping;
            }
            if remaining == ZERO {
                return SessionState::Running;
            }

            let slice = if config.wait_slice == ZERO {
                remaining
            } else {
                remaining.min(config.wait_slice)
            };
            delay.delay(slice);
            self.report.waited += slice;
            remaining -= slice;
        }
    }
}

/// Plays effects one session at a time
pub struct Player<D: Delay> {
    delay: D,
    config: PlayerConfig,
}

impl<D: Delay> Player<D> {
    /// Create a player with the default configuration
    pub fn new(delay: D) -> Self {
        Self::with_config(delay, PlayerConfig::default())
    }

    pub fn with_config(delay: D, config: PlayerConfig) -> Self {
        Self { delay, config }
    }

    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub const fn delay(&self) -> &D {
        &self.delay
    }

    /// Play an effect until `cancel` is raised
    ///
    /// Blocks the caller. The sink is idled and released on every exit path.
    pub fn play<S: OutputSink>(
        &mut self,
        effect: &EffectSlot,
        speed: Speed,
        sink: S,
        cancel: &CancelToken,
    ) -> Result<PlaybackReport, PlaybackError<S::Error>> {
        log_debug!(
            "playing {} at {} ({:?})",
            effect.id(),
            speed,
            effect.output_mode()
        );
        PlaybackSession::new(effect, speed, sink, cancel).run(&mut self.delay, self.config)
    }

    /// Play a built-in effect by name on a line acquired for it
    ///
    /// Unknown names and acquisition failures are reported before anything
    /// is written to the line.
    pub fn play_named<L: OutputLine>(
        &mut self,
        name: &str,
        speed: f32,
        line: &mut L,
        cancel: &CancelToken,
    ) -> Result<PlaybackReport, SessionError<L::Error, <L::Sink as OutputSink>::Error>> {
        let id = EffectId::parse_from_str(name).ok_or(SessionError::UnknownEffect)?;
        let effect = id.to_slot();
        let sink = line
            .acquire(effect.output_mode())
            .map_err(SessionError::SinkUnavailable)?;
        Ok(self.play(&effect, Speed::new(speed), sink, cancel)?)
    }
}
