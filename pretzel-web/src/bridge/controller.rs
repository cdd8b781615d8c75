//! Session controller - drives the run/pause timer from the browser
//!
//! Ticks come from `window.setInterval`; capture start/stop are JS
//! functions supplied by the host (typically `camera.start` / `camera.stop`).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::error::BridgeError;
use crate::config::EngineConfig;
use crate::timer::{drive, CaptureControl, SessionTimer, TickSource, TimerPhase};

// ============================================================================
// BROWSER COLLABORATORS
// ============================================================================

/// Capture hooks supplied by the host
pub struct JsCapture {
    start: js_sys::Function,
    stop: js_sys::Function,
}

impl JsCapture {
    fn call(hook: &js_sys::Function, name: &str) {
        if let Err(err) = hook.call0(&JsValue::NULL) {
            console_warn!("capture {} failed: {:?}", name, err);
        }
    }
}

impl CaptureControl for JsCapture {
    fn start(&self) {
        Self::call(&self.start, "start");
    }

    fn stop(&self) {
        Self::call(&self.stop, "stop");
    }
}

/// `setInterval` subscription with a reusable callback
pub struct IntervalTicker {
    window: web_sys::Window,
    callback: Closure<dyn FnMut()>,
    handle: Option<i32>,
}

impl IntervalTicker {
    fn new(window: web_sys::Window, callback: Closure<dyn FnMut()>) -> Self {
        Self {
            window,
            callback,
            handle: None,
        }
    }
}

impl TickSource for IntervalTicker {
    type Error = BridgeError;

    fn schedule(&mut self, period_ms: u32) -> Result<(), BridgeError> {
        self.cancel();
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                period_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(|err| BridgeError::IntervalFailed(format!("{:?}", err)))?;
        self.handle = Some(handle);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

type BrowserTimer = SessionTimer<IntervalTicker>;

// ============================================================================
// WASM API
// ============================================================================

/// Countdown state for display
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct TimerStatus {
    /// True while capturing, false while paused or stopped
    pub running: bool,
    /// False before `start` and after `forceStop`
    pub active: bool,
    pub remaining_secs: f64,
}

#[wasm_bindgen]
pub struct SessionController {
    timer: Rc<RefCell<BrowserTimer>>,
    capture: Rc<JsCapture>,
}

#[wasm_bindgen]
impl SessionController {
    /// `start`/`stop` are called on every phase change, after the timer
    /// state is updated, so they may read `status()` back.
    #[wasm_bindgen(constructor)]
    pub fn new(start: js_sys::Function, stop: js_sys::Function) -> Result<SessionController, JsValue> {
        let window = web_sys::window().ok_or(BridgeError::NoWindow)?;
        let config = EngineConfig::default().timer;
        let capture = Rc::new(JsCapture { start, stop });

        let timer = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserTimer>>| {
            let weak = weak.clone();
            let capture = Rc::clone(&capture);
            let callback = Closure::<dyn FnMut()>::new(move || {
                let Some(timer) = weak.upgrade() else {
                    return;
                };
                let ticked = drive(&timer, capture.as_ref(), BrowserTimer::tick);
                if let Err(err) = ticked {
                    console_warn!("Session stopped: {}", err);
                }
            });
            let ticker = IntervalTicker::new(window, callback);
            RefCell::new(SessionTimer::new(config, ticker))
        });

        Ok(Self { timer, capture })
    }

    /// Start a session: capture resumes and the running countdown begins
    pub fn start(&self) -> Result<(), JsValue> {
        drive(&self.timer, self.capture.as_ref(), |timer| timer.start().map(Some))?;
        Ok(())
    }

    /// Stop capture and all scheduling until `start` is called again
    #[wasm_bindgen(js_name = forceStop)]
    pub fn force_stop(&self) {
        let stopped = drive(&self.timer, self.capture.as_ref(), |timer| {
            Ok(Some(timer.force_stop()))
        });
        if let Err(err) = stopped {
            console_warn!("{}", err);
        }
    }

    pub fn status(&self) -> TimerStatus {
        let snapshot = self.timer.borrow().snapshot();
        TimerStatus {
            running: snapshot.active && snapshot.phase == TimerPhase::Running,
            active: snapshot.active,
            remaining_secs: snapshot.remaining_secs,
        }
    }

    /// Applies from the next running phase
    #[wasm_bindgen(js_name = setRunDuration)]
    pub fn set_run_duration(&self, secs: f64) {
        let mut timer = self.timer.borrow_mut();
        let mut config = timer.config();
        if config.set_run_duration(secs) {
            timer.set_config(config);
        } else {
            console_warn!("Ignoring run duration {}", secs);
        }
    }

    /// Applies from the next paused phase
    #[wasm_bindgen(js_name = setPauseDuration)]
    pub fn set_pause_duration(&self, secs: f64) {
        let mut timer = self.timer.borrow_mut();
        let mut config = timer.config();
        if config.set_pause_duration(secs) {
            timer.set_config(config);
        } else {
            console_warn!("Ignoring pause duration {}", secs);
        }
    }

    /// Applies from the next phase change
    #[wasm_bindgen(js_name = setTickPeriod)]
    pub fn set_tick_period(&self, ms: u32) {
        let mut timer = self.timer.borrow_mut();
        let mut config = timer.config();
        if config.set_tick_period(ms) {
            timer.set_config(config);
        } else {
            console_warn!("Ignoring tick period {}", ms);
        }
    }
}
