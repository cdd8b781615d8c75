//! Tunable parameters for the analyzer, classifier and session timer
//!
//! All values can be changed live from JS. Setters ignore values that would
//! break an invariant (non-finite numbers, zero-frame windows) and keep the
//! previous setting instead.

/// Length of the synthetic neck vector, in normalized image units
pub const DEFAULT_NECK_EXTENSION: f32 = 0.5;

/// Mean head tilt (degrees) above which the window reads as "pretzel"
pub const DEFAULT_ANGLE_THRESHOLD: f32 = 20.0;

/// Frames accumulated before a verdict is evaluated
pub const DEFAULT_FRAME_THRESHOLD: u32 = 30;

/// Torso/knee angle (degrees) below which a single frame forces "pretzel"
pub const DEFAULT_SECONDARY_ANGLE_LIMIT: f32 = 70.0;

pub const DEFAULT_RUN_DURATION_SECS: f64 = 120.0;
pub const DEFAULT_PAUSE_DURATION_SECS: f64 = 20.0;
pub const DEFAULT_TICK_PERIOD_MS: u32 = 600;

/// Minimum time between two pretzel notifications (10 minutes)
pub const DEFAULT_NOTIFICATION_COOLDOWN_MS: f64 = 10.0 * 60.0 * 1000.0;

/// Options consumed by the reference-point resolver
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyzerOptions {
    pub neck_extension: f32,
}

impl AnalyzerOptions {
    pub fn set_neck_extension(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.neck_extension = value;
        true
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            neck_extension: DEFAULT_NECK_EXTENSION,
        }
    }
}

/// Decision rule of the temporal classifier
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierConfig {
    /// Window closes once more than this many frames were observed
    pub frame_threshold: u32,
    /// Mean primary angle (degrees) above which the verdict is pretzel
    pub angle_threshold: f32,
    /// Secondary angle (degrees) below which the verdict is pretzel
    pub secondary_angle_limit: f32,
}

impl ClassifierConfig {
    pub fn set_frame_threshold(&mut self, frames: u32) -> bool {
        if frames == 0 {
            return false;
        }
        self.frame_threshold = frames;
        true
    }

    pub fn set_angle_threshold(&mut self, degrees: f32) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.angle_threshold = degrees;
        true
    }

    pub fn set_secondary_angle_limit(&mut self, degrees: f32) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.secondary_angle_limit = degrees;
        true
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            frame_threshold: DEFAULT_FRAME_THRESHOLD,
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
            secondary_angle_limit: DEFAULT_SECONDARY_ANGLE_LIMIT,
        }
    }
}

/// Run/pause schedule of the session timer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerConfig {
    pub run_duration_secs: f64,
    pub pause_duration_secs: f64,
    pub tick_period_ms: u32,
}

impl TimerConfig {
    /// Negative durations are clamped to zero
    pub fn set_run_duration(&mut self, secs: f64) -> bool {
        if !secs.is_finite() {
            return false;
        }
        self.run_duration_secs = secs.max(0.0);
        true
    }

    pub fn set_pause_duration(&mut self, secs: f64) -> bool {
        if !secs.is_finite() {
            return false;
        }
        self.pause_duration_secs = secs.max(0.0);
        true
    }

    pub fn set_tick_period(&mut self, ms: u32) -> bool {
        if ms == 0 {
            return false;
        }
        self.tick_period_ms = ms;
        true
    }

    pub fn tick_secs(&self) -> f64 {
        self.tick_period_ms as f64 / 1000.0
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            run_duration_secs: DEFAULT_RUN_DURATION_SECS,
            pause_duration_secs: DEFAULT_PAUSE_DURATION_SECS,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

/// Every tunable of one posture session
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub analyzer: AnalyzerOptions,
    pub classifier: ClassifierConfig,
    pub timer: TimerConfig,
    pub notification: NotificationConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotificationConfig {
    /// 0 disables the cooldown
    pub cooldown_ms: f64,
}

impl NotificationConfig {
    pub fn set_cooldown(&mut self, ms: f64) -> bool {
        if !ms.is_finite() {
            return false;
        }
        self.cooldown_ms = ms.max(0.0);
        true
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_NOTIFICATION_COOLDOWN_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.analyzer.neck_extension, 0.5);
        assert_eq!(config.classifier.frame_threshold, 30);
        assert_eq!(config.classifier.angle_threshold, 20.0);
        assert_eq!(config.classifier.secondary_angle_limit, 70.0);
        assert_eq!(config.timer.run_duration_secs, 120.0);
        assert_eq!(config.timer.pause_duration_secs, 20.0);
        assert_eq!(config.timer.tick_period_ms, 600);
        assert_eq!(config.notification.cooldown_ms, 600_000.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut classifier = ClassifierConfig::default();
        assert!(!classifier.set_frame_threshold(0));
        assert!(!classifier.set_angle_threshold(f32::NAN));
        assert_eq!(classifier, ClassifierConfig::default());

        let mut options = AnalyzerOptions::default();
        assert!(!options.set_neck_extension(f32::INFINITY));
        assert_eq!(options.neck_extension, DEFAULT_NECK_EXTENSION);

        let mut timer = TimerConfig::default();
        assert!(!timer.set_tick_period(0));
        assert!(!timer.set_run_duration(f64::NAN));
        assert_eq!(timer, TimerConfig::default());
    }

    #[test]
    fn test_negative_durations_clamp() {
        let mut timer = TimerConfig::default();
        assert!(timer.set_pause_duration(-5.0));
        assert_eq!(timer.pause_duration_secs, 0.0);
        assert!((timer.tick_secs() - 0.6).abs() < 1e-9);

        let mut notification = NotificationConfig::default();
        assert!(notification.set_cooldown(-1.0));
        assert_eq!(notification.cooldown_ms, 0.0);
    }
}
