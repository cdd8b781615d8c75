//! Timer module - run/pause scheduling of the capture session
//!
//! Re-exports only. All logic in submodules.

mod session;

pub use session::{
    drive, CaptureAction, CaptureControl, SessionTimer, TickSource, TimerPhase, TimerSnapshot,
};
