//! Posture session - the per-frame entry point for JavaScript
//!
//! One instance per capture session. The host feeds every pose detection
//! into `analyzeFrame`, reads back angles and the current verdict, and
//! pulls overlay geometry for drawing.

use wasm_bindgen::prelude::*;

use super::error::BridgeError;
use super::landmarks::PoseFrame;
use super::notify::PretzelNotifier;
use super::overlay::overlay_points;
use crate::classifier::{FrameOutcome, PostureMonitor, Verdict};
use crate::config::{AnalyzerOptions, EngineConfig};

/// What one analysed frame produced
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Instantaneous head tilt (degrees)
    pub primary_angle: f32,
    /// Instantaneous torso/knee angle (degrees)
    pub secondary_angle: f32,
    pub neck_length: f32,
    /// True when this frame closed a window
    pub evaluated: bool,
    /// Current verdict (possibly from an earlier window)
    pub is_pretzel: bool,
    /// Mean head tilt of the window behind the current verdict
    pub average_angle: f32,
    /// Verdict turned pretzel on this frame
    pub became_pretzel: bool,
    /// Verdict turned back to good posture on this frame
    pub became_upright: bool,
}

impl FrameReport {
    fn new(outcome: &FrameOutcome, verdict: Verdict) -> Self {
        Self {
            primary_angle: outcome.analysis.angles.primary,
            secondary_angle: outcome.analysis.angles.secondary,
            neck_length: outcome.analysis.neck_length(),
            evaluated: outcome.evaluated.is_some(),
            is_pretzel: verdict.is_pretzel,
            average_angle: verdict.average_angle,
            became_pretzel: outcome.became_pretzel(),
            became_upright: outcome.became_upright(),
        }
    }
}

#[wasm_bindgen]
pub struct PostureSession {
    options: AnalyzerOptions,
    monitor: PostureMonitor,
    notifier: PretzelNotifier,
    /// Overlay points of the last analysed frame
    overlay: Vec<f32>,
}

#[wasm_bindgen]
impl PostureSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PostureSession {
        let config = EngineConfig::default();
        Self {
            options: config.analyzer,
            monitor: PostureMonitor::new(config.classifier),
            notifier: PretzelNotifier::new(config.notification),
            overlay: Vec::new(),
        }
    }

    /// Analyze one detection (flat `x, y, z, visibility` per landmark)
    ///
    /// Returns `undefined` for an empty payload, which leaves all state
    /// untouched.
    #[wasm_bindgen(js_name = analyzeFrame)]
    pub fn analyze_frame(&mut self, data: &[f32]) -> Result<Option<FrameReport>, JsValue> {
        match self.process(data) {
            Ok(report) => Ok(report),
            Err(err) => {
                console_warn!("{}", err);
                Err(err.into())
            }
        }
    }

    /// Flat `x, y, z` overlay points of the last frame (empty before any)
    #[wasm_bindgen(js_name = overlayPoints)]
    pub fn overlay_points(&self) -> Vec<f32> {
        self.overlay.clone()
    }

    #[wasm_bindgen(js_name = isPretzel)]
    pub fn is_pretzel(&self) -> bool {
        self.monitor.verdict().is_pretzel
    }

    #[wasm_bindgen(js_name = averageAngle)]
    pub fn average_angle(&self) -> f32 {
        self.monitor.verdict().average_angle
    }

    /// Register the callback fired when posture turns into a pretzel
    #[wasm_bindgen(js_name = onPretzel)]
    pub fn on_pretzel(&mut self, callback: js_sys::Function) {
        self.notifier.set_callback(callback);
    }

    #[wasm_bindgen(js_name = setNotificationCooldown)]
    pub fn set_notification_cooldown(&mut self, ms: f64) {
        if !self.notifier.gate_mut().config_mut().set_cooldown(ms) {
            console_warn!("Ignoring notification cooldown {}", ms);
        }
    }

    #[wasm_bindgen(js_name = setNeckExtension)]
    pub fn set_neck_extension(&mut self, value: f32) {
        if !self.options.set_neck_extension(value) {
            console_warn!("Ignoring neck extension {}", value);
        }
    }

    #[wasm_bindgen(js_name = setAngleThreshold)]
    pub fn set_angle_threshold(&mut self, degrees: f32) {
        let mut config = self.monitor.classifier().next_config();
        if config.set_angle_threshold(degrees) {
            self.monitor.classifier_mut().set_config(config);
        } else {
            console_warn!("Ignoring angle threshold {}", degrees);
        }
    }

    #[wasm_bindgen(js_name = setFrameThreshold)]
    pub fn set_frame_threshold(&mut self, frames: u32) {
        let mut config = self.monitor.classifier().next_config();
        if config.set_frame_threshold(frames) {
            self.monitor.classifier_mut().set_config(config);
        } else {
            console_warn!("Ignoring frame threshold {}", frames);
        }
    }

    #[wasm_bindgen(js_name = setSecondaryAngleLimit)]
    pub fn set_secondary_angle_limit(&mut self, degrees: f32) {
        let mut config = self.monitor.classifier().next_config();
        if config.set_secondary_angle_limit(degrees) {
            self.monitor.classifier_mut().set_config(config);
        } else {
            console_warn!("Ignoring secondary angle limit {}", degrees);
        }
    }

    /// Drop the window, verdict, overlay and notification cooldown
    pub fn reset(&mut self) {
        self.monitor.reset();
        self.notifier.gate_mut().reset();
        self.overlay.clear();
    }
}

impl PostureSession {
    fn process(&mut self, data: &[f32]) -> Result<Option<FrameReport>, BridgeError> {
        let Some(frame) = PoseFrame::from_flat(data)? else {
            return Ok(None);
        };

        let input = frame.frame_input(self.options);
        let Some(outcome) = self.monitor.process(Some(&input)) else {
            return Ok(None);
        };

        self.overlay = overlay_points(frame.landmarks(), &outcome.analysis.points);

        let verdict = self.monitor.verdict();
        if let Some(is_pretzel) = outcome.flipped {
            console_log!(
                "Verdict: {} (average {:.1}°)",
                if is_pretzel { "pretzel" } else { "upright" },
                verdict.average_angle
            );
        }
        if outcome.became_pretzel() {
            self.notifier.notify(verdict);
        }

        Ok(Some(FrameReport::new(&outcome, verdict)))
    }
}

impl Default for PostureSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::landmarks::tests::flat_frame;
    use crate::bridge::landmarks::{
        LANDMARK_STRIDE, LEFT_EAR, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER,
        RIGHT_EAR, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
    };
    use crate::bridge::overlay::{EAR_MIDPOINT, OVERLAY_POINT_COUNT};

    fn set(data: &mut [f32], index: usize, x: f32, y: f32) {
        data[index * LANDMARK_STRIDE] = x;
        data[index * LANDMARK_STRIDE + 1] = y;
    }

    /// Upright subject: ears straight above the shoulders
    fn upright_payload() -> Vec<f32> {
        let mut data = flat_frame();
        set(&mut data, LEFT_EAR, 0.45, 0.20);
        set(&mut data, RIGHT_EAR, 0.55, 0.20);
        set(&mut data, LEFT_SHOULDER, 0.40, 0.40);
        set(&mut data, RIGHT_SHOULDER, 0.60, 0.40);
        set(&mut data, LEFT_HIP, 0.40, 0.80);
        set(&mut data, RIGHT_HIP, 0.60, 0.80);
        set(&mut data, LEFT_KNEE, 0.30, 0.85);
        set(&mut data, RIGHT_KNEE, 0.70, 0.85);
        data
    }

    fn slouched_payload() -> Vec<f32> {
        let mut data = upright_payload();
        set(&mut data, LEFT_EAR, 0.65, 0.25);
        set(&mut data, RIGHT_EAR, 0.75, 0.25);
        data
    }

    #[test]
    fn test_empty_payload_is_noop() {
        let mut session = PostureSession::new();
        assert_eq!(session.process(&[]), Ok(None));
        assert!(session.overlay_points().is_empty());
        assert_eq!(session.monitor.classifier().frame_count(), 0);
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let mut session = PostureSession::new();
        assert_eq!(
            session.process(&[0.0; 10]),
            Err(BridgeError::MalformedFrame { len: 10 })
        );
    }

    #[test]
    fn test_upright_session() {
        let mut session = PostureSession::new();
        let data = upright_payload();
        let mut report = None;
        for _ in 0..31 {
            report = session.process(&data).unwrap();
        }
        let report = report.unwrap();
        assert!(report.evaluated);
        assert!(report.primary_angle.abs() < 1.0);
        assert!(!report.is_pretzel);
        assert!(!session.is_pretzel());
        assert_eq!(session.overlay_points().len(), OVERLAY_POINT_COUNT * 3);
        assert!((session.overlay_points()[EAR_MIDPOINT * 3 + 1] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_slouched_session_turns_pretzel() {
        let mut session = PostureSession::new();
        session.set_frame_threshold(5);
        let data = slouched_payload();
        // threshold change waits for the first 30-frame window
        for _ in 0..30 {
            let report = session.process(&data).unwrap().unwrap();
            assert!(!report.evaluated);
        }
        let report = session.process(&data).unwrap().unwrap();
        assert!(report.evaluated);
        assert!(report.is_pretzel);
        assert!(session.average_angle() > 20.0);
    }

    #[test]
    fn test_report_marks_both_edges() {
        let mut session = PostureSession::new();
        let slouched = slouched_payload();
        let upright = upright_payload();

        let reports: Vec<FrameReport> = (0..31)
            .map(|_| session.process(&slouched).unwrap().unwrap())
            .collect();
        assert_eq!(reports.iter().filter(|r| r.became_pretzel).count(), 1);
        assert!(reports[30].became_pretzel);
        assert!(reports.iter().all(|r| !r.became_upright));

        // one frame carried over, so 30 more close the next window
        let reports: Vec<FrameReport> = (0..30)
            .map(|_| session.process(&upright).unwrap().unwrap())
            .collect();
        assert!(reports[..29].iter().all(|r| !r.evaluated && !r.became_upright));
        assert!(reports[29].evaluated);
        assert!(reports[29].became_upright);
        assert!(!reports[29].became_pretzel);
        assert!(!session.is_pretzel());
    }

    #[test]
    fn test_invalid_setters_keep_config() {
        let mut session = PostureSession::new();
        session.set_frame_threshold(0);
        session.set_angle_threshold(f32::NAN);
        session.set_neck_extension(f32::INFINITY);
        assert_eq!(session.monitor.classifier().next_config().frame_threshold, 30);
        assert_eq!(session.monitor.classifier().next_config().angle_threshold, 20.0);
        assert_eq!(session.options.neck_extension, 0.5);
    }

    #[test]
    fn test_reset() {
        let mut session = PostureSession::new();
        let data = slouched_payload();
        for _ in 0..31 {
            session.process(&data).unwrap();
        }
        assert!(session.is_pretzel());
        session.reset();
        assert!(!session.is_pretzel());
        assert!(session.overlay_points().is_empty());
    }
}
