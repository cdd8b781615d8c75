//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod error;
mod landmarks;
mod overlay;
mod notify;
mod session;
mod controller;

pub use error::BridgeError;

pub use landmarks::{PoseFrame, LANDMARK_STRIDE, POSE_LANDMARK_COUNT};

pub use overlay::{
    overlay_connections,
    marked_landmarks,
    overlay_points,
    POSTURE_SKELETON, KEY_LANDMARKS, OVERLAY_POINT_COUNT,
};

pub use notify::{NotificationGate, PretzelNotifier};

pub use session::{FrameReport, PostureSession};

pub use controller::{SessionController, TimerStatus};
