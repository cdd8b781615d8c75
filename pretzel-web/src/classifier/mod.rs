//! Classifier module - windowed pretzel verdicts
//!
//! Re-exports only. All logic in submodules.

mod window;
mod temporal;
mod monitor;

pub use window::AngleWindow;
pub use temporal::{TemporalClassifier, Verdict};
pub use monitor::{FrameOutcome, PostureMonitor};
