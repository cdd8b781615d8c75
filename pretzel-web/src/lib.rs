//! Pretzel Web - posture analysis engine for the browser
//!
//! The JS host runs the camera and the pose model; this module decides
//! whether the subject is sitting like a pretzel. Only contains:
//! - Module declarations
//! - Console logging macros
//! - wasm_bindgen entry points that delegate to submodules

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

// Imported JS functions panic off-wasm, so native test builds log nothing.

#[cfg(target_arch = "wasm32")]
macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&wasm_bindgen::JsValue::from(format!($($t)*))))
}

#[cfg(target_arch = "wasm32")]
macro_rules! console_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&wasm_bindgen::JsValue::from(format!($($t)*))))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_log {
    ($($t:tt)*) => {
        if false {
            let _ = format!($($t)*);
        }
    };
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_warn {
    ($($t:tt)*) => {
        if false {
            let _ = format!($($t)*);
        }
    };
}

pub mod config;
pub mod posture;
pub mod classifier;
pub mod timer;
mod bridge;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen types and functions for JS access
pub use bridge::{
    marked_landmarks, overlay_connections, overlay_points,
    BridgeError, FrameReport, NotificationGate, PoseFrame, PostureSession,
    PretzelNotifier, SessionController, TimerStatus,
    KEY_LANDMARKS, LANDMARK_STRIDE, OVERLAY_POINT_COUNT, POSE_LANDMARK_COUNT,
    POSTURE_SKELETON,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console_log!("Pretzel posture engine loaded");
}
