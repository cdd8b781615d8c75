//! Errors surfaced to JS by the bridge

use std::fmt;
use wasm_bindgen::prelude::*;

/// Errors the JS host can cause or hit
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// No `window` global (not running on a browser main thread)
    NoWindow,
    /// Landmark payload that cannot be read as a pose frame
    MalformedFrame { len: usize },
    /// The browser refused `setInterval`
    IntervalFailed(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::NoWindow => write!(f, "No window found"),
            BridgeError::MalformedFrame { len } => write!(
                f,
                "Invalid landmark data length: {} (expected {} values per landmark, at least {} landmarks)",
                len,
                super::landmarks::LANDMARK_STRIDE,
                super::landmarks::MIN_LANDMARKS,
            ),
            BridgeError::IntervalFailed(e) => write!(f, "setInterval failed: {}", e),
        }
    }
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
