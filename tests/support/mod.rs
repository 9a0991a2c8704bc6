//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use myrtio_pin_effects::{
    CancelToken, Delay, Duration, Level, OutputLine, OutputMode, OutputSink,
};

/// Everything the sink and the delay saw, in order
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    Level(Level),
    Intensity(f32),
    Wait(Duration),
    Release,
}

pub(crate) type Trace = Rc<RefCell<Vec<Event>>>;

pub(crate) fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

pub(crate) const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SinkFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineBusy;

/// Sink recording writes into a trace
pub(crate) struct MockSink {
    trace: Trace,
    writes: usize,
    fault_at: Option<usize>,
    release_fails: bool,
}

impl MockSink {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            trace: Rc::clone(trace),
            writes: 0,
            fault_at: None,
            release_fails: false,
        }
    }

    /// Fail the `nth` write (1-based) once
    pub(crate) fn faulting_at(trace: &Trace, nth: usize) -> Self {
        Self {
            fault_at: Some(nth),
            ..Self::new(trace)
        }
    }

    pub(crate) fn failing_release(trace: &Trace) -> Self {
        Self {
            release_fails: true,
            ..Self::new(trace)
        }
    }

    fn write(&mut self, event: Event) -> Result<(), SinkFault> {
        self.writes += 1;
        if self.fault_at == Some(self.writes) {
            self.fault_at = None;
            return Err(SinkFault);
        }
        self.trace.borrow_mut().push(event);
        Ok(())
    }
}

impl OutputSink for MockSink {
    type Error = SinkFault;

    fn set_level(&mut self, level: Level) -> Result<(), SinkFault> {
        self.write(Event::Level(level))
    }

    fn set_intensity(&mut self, intensity: f32) -> Result<(), SinkFault> {
        self.write(Event::Intensity(intensity))
    }

    fn release(&mut self) -> Result<(), SinkFault> {
        if self.release_fails {
            return Err(SinkFault);
        }
        self.trace.borrow_mut().push(Event::Release);
        Ok(())
    }
}

/// Line handing out [`MockSink`]s
pub(crate) struct MockLine {
    trace: Trace,
    available: bool,
    pub(crate) acquired: Vec<OutputMode>,
}

impl MockLine {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            trace: Rc::clone(trace),
            available: true,
            acquired: Vec::new(),
        }
    }

    pub(crate) fn busy(trace: &Trace) -> Self {
        Self {
            available: false,
            ..Self::new(trace)
        }
    }
}

impl OutputLine for MockLine {
    type Sink = MockSink;
    type Error = LineBusy;

    fn acquire(&mut self, mode: OutputMode) -> Result<MockSink, LineBusy> {
        if !self.available {
            return Err(LineBusy);
        }
        self.acquired.push(mode);
        Ok(MockSink::new(&self.trace))
    }
}

/// Delay advancing a virtual clock instead of sleeping
///
/// Raises the token once the clock reaches `cancel_at`.
pub(crate) struct VirtualDelay<'a> {
    trace: Trace,
    cancel: &'a CancelToken,
    cancel_at: Option<Duration>,
    clock: Duration,
}

impl<'a> VirtualDelay<'a> {
    pub(crate) fn new(trace: &Trace, cancel: &'a CancelToken) -> Self {
        Self {
            trace: Rc::clone(trace),
            cancel,
            cancel_at: None,
            clock: Duration::from_ticks(0),
        }
    }

    pub(crate) fn cancel_at(trace: &Trace, cancel: &'a CancelToken, at: Duration) -> Self {
        Self {
            cancel_at: Some(at),
            ..Self::new(trace, cancel)
        }
    }

    pub(crate) fn clock(&self) -> Duration {
        self.clock
    }
}

impl Delay for VirtualDelay<'_> {
    fn delay(&mut self, duration: Duration) {
        self.trace.borrow_mut().push(Event::Wait(duration));
        self.clock += duration;
        if let Some(at) = self.cancel_at {
            if self.clock >= at {
                self.cancel.cancel();
            }
        }
    }
}

/// Output writes only, waits dropped
pub(crate) fn writes(trace: &Trace) -> Vec<Event> {
    trace
        .borrow()
        .iter()
        .filter(|event| !matches!(event, Event::Wait(_)))
        .cloned()
        .collect()
}

/// Level runs as `(level, held for)`; rests extend the preceding run
pub(crate) fn level_runs(trace: &Trace) -> Vec<(Level, Duration)> {
    let mut runs: Vec<(Level, Duration)> = Vec::new();
    for event in trace.borrow().iter() {
        match event {
            Event::Level(level) => runs.push((*level, Duration::from_ticks(0))),
            Event::Wait(duration) => {
                if let Some(run) = runs.last_mut() {
                    run.1 += *duration;
                }
            }
            Event::Intensity(_) | Event::Release => {}
        }
    }
    runs
}
