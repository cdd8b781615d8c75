//! Pretzel notifications - edge-triggered JS callback with a cooldown
//!
//! The monitor reports each good→pretzel flip; this gate keeps the host
//! from being nagged more than once per cooldown.

use wasm_bindgen::prelude::*;

use crate::classifier::Verdict;
use crate::config::NotificationConfig;

/// Cooldown bookkeeping, independent of any clock
pub struct NotificationGate {
    config: NotificationConfig,
    last_fired_ms: Option<f64>,
}

impl NotificationGate {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            last_fired_ms: None,
        }
    }

    /// True (and arms the cooldown) if a notification may fire at `now_ms`
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_fired_ms {
            if now_ms - last < self.config.cooldown_ms {
                return false;
            }
        }
        self.last_fired_ms = Some(now_ms);
        true
    }

    pub fn config_mut(&mut self) -> &mut NotificationConfig {
        &mut self.config
    }

    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}

pub struct PretzelNotifier {
    gate: NotificationGate,
    callback: Option<js_sys::Function>,
}

impl PretzelNotifier {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            gate: NotificationGate::new(config),
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }

    pub fn gate_mut(&mut self) -> &mut NotificationGate {
        &mut self.gate
    }

    /// Call the host with the window's average angle, unless cooling down
    pub fn notify(&mut self, verdict: Verdict) {
        let Some(callback) = &self.callback else {
            return;
        };
        if !self.gate.admit(js_sys::Date::now()) {
            return;
        }
        let angle = JsValue::from_f64(verdict.average_angle as f64);
        if let Err(err) = callback.call1(&JsValue::NULL, &angle) {
            console_warn!("pretzel callback failed: {:?}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(cooldown_ms: f64) -> NotificationGate {
        NotificationGate::new(NotificationConfig { cooldown_ms })
    }

    #[test]
    fn test_first_notification_passes() {
        assert!(gate(600_000.0).admit(1_000.0));
    }

    #[test]
    fn test_cooldown_blocks_repeats() {
        let mut gate = gate(10_000.0);
        assert!(gate.admit(0.0));
        assert!(!gate.admit(5_000.0));
        assert!(!gate.admit(9_999.0));
        assert!(gate.admit(10_000.0));
        assert!(!gate.admit(15_000.0));
    }

    #[test]
    fn test_zero_cooldown_always_passes() {
        let mut gate = gate(0.0);
        assert!(gate.admit(0.0));
        assert!(gate.admit(0.0));
    }

    #[test]
    fn test_reset_rearms() {
        let mut gate = gate(10_000.0);
        gate.admit(0.0);
        gate.reset();
        assert!(gate.admit(1.0));
    }
}
