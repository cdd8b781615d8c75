//! Temporal classifier - debounced pretzel verdicts over a frame window
//!
//! Primary angles are averaged over a window of `frame_threshold` frames
//! so one noisy detection cannot flip the verdict. The secondary angle is
//! read from the frame that closes the window, unaveraged: severe torso
//! misalignment marks the window as pretzel on its own.

use super::window::AngleWindow;
use crate::config::ClassifierConfig;
use crate::posture::AngleSample;

/// Latest classifier output
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Verdict {
    pub is_pretzel: bool,
    /// Mean primary angle of the window that produced this verdict (degrees)
    pub average_angle: f32,
}

pub struct TemporalClassifier {
    window: AngleWindow,
    /// Rule used to evaluate the window currently filling
    config: ClassifierConfig,
    /// Update waiting for the current window to close
    pending: Option<ClassifierConfig>,
    verdict: Verdict,
}

impl TemporalClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            window: AngleWindow::new(),
            config,
            pending: None,
            verdict: Verdict::default(),
        }
    }

    /// Feed one frame's angles
    ///
    /// Returns the new verdict when this frame closed the window, `None`
    /// otherwise (the previous verdict stays current).
    pub fn observe(&mut self, sample: AngleSample) -> Option<Verdict> {
        self.window.push(sample.primary);

        let threshold = self.config.frame_threshold;
        if !self.window.is_ready(threshold) {
            return None;
        }

        let average_angle = self.window.mean()?;
        let is_pretzel = average_angle > self.config.angle_threshold
            || sample.secondary < self.config.secondary_angle_limit;

        self.verdict = Verdict {
            is_pretzel,
            average_angle,
        };
        self.window.carry_over(threshold);

        if let Some(next) = self.pending.take() {
            self.config = next;
        }

        Some(self.verdict)
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Rule in effect for the window currently filling
    pub fn config(&self) -> ClassifierConfig {
        self.config
    }

    /// Rule that will be in effect once the current window closes
    pub fn next_config(&self) -> ClassifierConfig {
        self.pending.unwrap_or(self.config)
    }

    /// Schedule a new rule. Samples already buffered are still judged by
    /// the old one; the change applies from the next window on.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        if config == self.config {
            self.pending = None;
        } else {
            self.pending = Some(config);
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.window.frame_count()
    }

    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    /// Drop the window and the verdict; pending config applies immediately
    pub fn reset(&mut self) {
        self.window.clear();
        self.verdict = Verdict::default();
        if let Some(next) = self.pending.take() {
            self.config = next;
        }
    }
}

impl Default for TemporalClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(primary: f32, secondary: f32) -> AngleSample {
        AngleSample { primary, secondary }
    }

    fn upright() -> AngleSample {
        sample(5.0, 90.0)
    }

    fn config(frame_threshold: u32, angle_threshold: f32) -> ClassifierConfig {
        ClassifierConfig {
            frame_threshold,
            angle_threshold,
            ..ClassifierConfig::default()
        }
    }

    #[test]
    fn test_no_verdict_before_threshold() {
        let mut classifier = TemporalClassifier::new(config(30, 20.0));
        for _ in 0..30 {
            assert_eq!(classifier.observe(sample(80.0, 10.0)), None);
        }
        assert_eq!(classifier.verdict(), Verdict::default());
    }

    #[test]
    fn test_carry_over_cadence() {
        let mut classifier = TemporalClassifier::new(config(30, 20.0));
        let mut evaluations = Vec::new();
        for call in 1..=91 {
            if classifier.observe(upright()).is_some() {
                evaluations.push(call);
            }
            if call == 31 {
                assert_eq!(classifier.frame_count(), 1);
                assert_eq!(classifier.buffered(), 0);
            }
        }
        assert_eq!(evaluations, vec![31, 61, 91]);
    }

    #[test]
    fn test_average_above_threshold_is_pretzel() {
        let mut classifier = TemporalClassifier::new(config(4, 20.0));
        for angle in [10.0, 30.0, 30.0, 30.0] {
            assert!(classifier.observe(sample(angle, 90.0)).is_none());
        }
        let verdict = classifier.observe(sample(30.0, 90.0)).unwrap();
        assert!(verdict.is_pretzel);
        assert!((verdict.average_angle - 26.0).abs() < 1e-4);
    }

    #[test]
    fn test_average_below_threshold_is_fine() {
        let mut classifier = TemporalClassifier::new(config(4, 20.0));
        let mut verdict = None;
        for angle in [40.0, 10.0, 10.0, 10.0, 10.0] {
            verdict = classifier.observe(sample(angle, 90.0));
        }
        let verdict = verdict.unwrap();
        assert!(!verdict.is_pretzel);
        assert!((verdict.average_angle - 16.0).abs() < 1e-4);
    }

    #[test]
    fn test_secondary_override() {
        let mut classifier = TemporalClassifier::new(config(30, 20.0));
        for _ in 0..30 {
            classifier.observe(upright());
        }
        let verdict = classifier.observe(sample(0.0, 60.0)).unwrap();
        assert!(verdict.is_pretzel);
        assert!(verdict.average_angle < 20.0);
    }

    #[test]
    fn test_secondary_only_read_on_closing_frame() {
        let mut classifier = TemporalClassifier::new(config(3, 20.0));
        classifier.observe(sample(0.0, 10.0));
        classifier.observe(upright());
        classifier.observe(upright());
        let verdict = classifier.observe(upright()).unwrap();
        assert!(!verdict.is_pretzel);
    }

    #[test]
    fn test_verdict_persists_between_windows() {
        let mut classifier = TemporalClassifier::new(config(2, 20.0));
        for _ in 0..3 {
            classifier.observe(sample(50.0, 90.0));
        }
        assert!(classifier.verdict().is_pretzel);
        classifier.observe(upright());
        assert!(classifier.verdict().is_pretzel);
    }

    #[test]
    fn test_config_change_waits_for_window() {
        let mut classifier = TemporalClassifier::new(config(4, 20.0));
        for _ in 0..3 {
            classifier.observe(sample(30.0, 90.0));
        }
        // raising the threshold mid-window must not clear this window
        classifier.set_config(config(4, 45.0));
        assert_eq!(classifier.config().angle_threshold, 20.0);
        assert_eq!(classifier.next_config().angle_threshold, 45.0);

        classifier.observe(sample(30.0, 90.0));
        let verdict = classifier.observe(sample(30.0, 90.0)).unwrap();
        assert!(verdict.is_pretzel);
        assert_eq!(classifier.config().angle_threshold, 45.0);

        let mut verdict = None;
        for _ in 0..4 {
            verdict = classifier.observe(sample(30.0, 90.0));
        }
        assert!(!verdict.unwrap().is_pretzel);
    }

    #[test]
    fn test_frame_threshold_change_applies_next_window() {
        let mut classifier = TemporalClassifier::new(config(5, 20.0));
        classifier.observe(upright());
        classifier.set_config(config(2, 20.0));
        let mut evaluations = Vec::new();
        for call in 2..=9 {
            if classifier.observe(upright()).is_some() {
                evaluations.push(call);
            }
        }
        // first window closes at frame 6 (old rule), carry-over of 1 frame,
        // then every 2 frames under the new rule
        assert_eq!(evaluations, vec![6, 8]);
    }

    #[test]
    fn test_reset() {
        let mut classifier = TemporalClassifier::new(config(2, 20.0));
        for _ in 0..3 {
            classifier.observe(sample(50.0, 90.0));
        }
        classifier.reset();
        assert_eq!(classifier.verdict(), Verdict::default());
        assert_eq!(classifier.frame_count(), 0);
    }
}
