//! Session timer - alternates capture between running and paused phases
//!
//! Free-running two-phase oscillator once started:
//!
//! ```text
//! idle --start--> Running(run) --expired--> Paused(pause) --expired--> Running(run) ...
//!   ^                                                                      |
//!   +------------------------------- force_stop ---------------------------+
//! ```
//!
//! The tick subscription is cancelled before every new one is scheduled, so
//! a stale tick can never advance a fresh phase.
//!
//! The timer never touches the camera itself. Every transition returns the
//! `CaptureAction` to perform, and `drive` performs it only after the timer
//! borrow is released, so capture hooks may read the timer back.

use std::cell::RefCell;

use crate::config::TimerConfig;

/// Camera side effects issued on phase transitions (fire-and-forget)
pub trait CaptureControl {
    fn start(&self);
    fn stop(&self);
}

/// Periodic tick subscription driving `SessionTimer::tick`
pub trait TickSource {
    type Error;

    fn schedule(&mut self, period_ms: u32) -> Result<(), Self::Error>;
    fn cancel(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPhase {
    Running,
    Paused,
}

/// What the camera has to do after a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureAction {
    Start,
    Stop,
}

impl CaptureAction {
    pub fn apply<C: CaptureControl + ?Sized>(self, capture: &C) {
        match self {
            CaptureAction::Start => capture.start(),
            CaptureAction::Stop => capture.stop(),
        }
    }
}

impl From<TimerPhase> for CaptureAction {
    fn from(phase: TimerPhase) -> Self {
        match phase {
            TimerPhase::Running => CaptureAction::Start,
            TimerPhase::Paused => CaptureAction::Stop,
        }
    }
}

/// Everything the countdown display needs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_secs: f64,
    /// False before the first `start` and after `force_stop`
    pub active: bool,
}

pub struct SessionTimer<T> {
    config: TimerConfig,
    phase: TimerPhase,
    remaining_secs: f64,
    active: bool,
    /// Period of the live subscription; differs from config until the next transition
    scheduled_period_ms: u32,
    ticks: T,
}

impl<T: TickSource> SessionTimer<T> {
    /// Idle timer, paused with the configured pause duration
    pub fn new(config: TimerConfig, ticks: T) -> Self {
        Self {
            phase: TimerPhase::Paused,
            remaining_secs: config.pause_duration_secs,
            active: false,
            scheduled_period_ms: config.tick_period_ms,
            config,
            ticks,
        }
    }

    /// Begin (or restart) a session with a full running phase
    ///
    /// On a scheduling failure the timer is left idle.
    pub fn start(&mut self) -> Result<CaptureAction, T::Error> {
        self.active = true;
        self.enter(TimerPhase::Running)
    }

    /// Go idle until the next `start`; capture must stop
    pub fn force_stop(&mut self) -> CaptureAction {
        self.ticks.cancel();
        self.go_idle();
        console_log!("Session stopped");
        CaptureAction::Stop
    }

    /// Advance the countdown by one tick period
    ///
    /// Returns the capture action when the current phase expired on this tick.
    pub fn tick(&mut self) -> Result<Option<CaptureAction>, T::Error> {
        if !self.active {
            return Ok(None);
        }

        self.remaining_secs -= self.scheduled_period_ms as f64 / 1000.0;
        if self.remaining_secs >= 0.0 {
            return Ok(None);
        }

        let next = match self.phase {
            TimerPhase::Running => TimerPhase::Paused,
            TimerPhase::Paused => TimerPhase::Running,
        };
        self.enter(next).map(Some)
    }

    fn enter(&mut self, phase: TimerPhase) -> Result<CaptureAction, T::Error> {
        self.ticks.cancel();

        if let Err(err) = self.ticks.schedule(self.config.tick_period_ms) {
            self.go_idle();
            return Err(err);
        }
        self.scheduled_period_ms = self.config.tick_period_ms;

        self.phase = phase;
        self.remaining_secs = match phase {
            TimerPhase::Running => self.config.run_duration_secs,
            TimerPhase::Paused => self.config.pause_duration_secs,
        };
        console_log!("Session {:?} for {}s", phase, self.remaining_secs);
        Ok(phase.into())
    }

    fn go_idle(&mut self) {
        self.active = false;
        self.phase = TimerPhase::Paused;
        self.remaining_secs = self.config.pause_duration_secs;
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            active: self.active,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// New durations and tick period apply from the next phase on; the
    /// running countdown is left as is.
    pub fn set_config(&mut self, config: TimerConfig) {
        self.config = config;
        if !self.active {
            self.remaining_secs = config.pause_duration_secs;
        }
    }
}

/// Run one timer operation on a shared timer, then perform its capture action
///
/// The borrow ends before `capture` is called. A failed operation leaves the
/// timer idle, so capture is stopped as well.
pub fn drive<T, C, F>(timer: &RefCell<SessionTimer<T>>, capture: &C, op: F) -> Result<(), T::Error>
where
    T: TickSource,
    C: CaptureControl + ?Sized,
    F: FnOnce(&mut SessionTimer<T>) -> Result<Option<CaptureAction>, T::Error>,
{
    let outcome = op(&mut timer.borrow_mut());
    match outcome {
        Ok(Some(action)) => {
            action.apply(capture);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            CaptureAction::Stop.apply(capture);
            Err(err)
        }
    }
}
