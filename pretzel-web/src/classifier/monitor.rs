//! Posture monitor - runs one frame through the resolver and classifier
//!
//! Also tracks the last verdict so the caller learns about edges
//! (good→pretzel, pretzel→good) instead of re-reading a level every frame.

use super::temporal::{TemporalClassifier, Verdict};
use crate::config::ClassifierConfig;
use crate::posture::{analyze, Analysis, FrameInput};

/// Result of one analysed frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutcome {
    pub analysis: Analysis,
    /// Set when this frame closed a window
    pub evaluated: Option<Verdict>,
    /// Set to the new state when the verdict flipped on this frame
    pub flipped: Option<bool>,
}

impl FrameOutcome {
    pub fn became_pretzel(&self) -> bool {
        self.flipped == Some(true)
    }

    pub fn became_upright(&self) -> bool {
        self.flipped == Some(false)
    }
}

pub struct PostureMonitor {
    classifier: TemporalClassifier,
    was_pretzel: bool,
}

impl PostureMonitor {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            classifier: TemporalClassifier::new(config),
            was_pretzel: false,
        }
    }

    /// Analyze a frame. `None` (no landmarks detected) is a no-op.
    pub fn process(&mut self, frame: Option<&FrameInput>) -> Option<FrameOutcome> {
        let frame = frame?;
        let analysis = analyze(frame);
        let evaluated = self.classifier.observe(analysis.angles);

        let flipped = match evaluated {
            Some(verdict) if verdict.is_pretzel != self.was_pretzel => {
                self.was_pretzel = verdict.is_pretzel;
                Some(verdict.is_pretzel)
            }
            _ => None,
        };

        Some(FrameOutcome {
            analysis,
            evaluated,
            flipped,
        })
    }

    pub fn verdict(&self) -> Verdict {
        self.classifier.verdict()
    }

    pub fn classifier(&self) -> &TemporalClassifier {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut TemporalClassifier {
        &mut self.classifier
    }

    pub fn reset(&mut self) {
        self.classifier.reset();
        self.was_pretzel = false;
    }
}

impl Default for PostureMonitor {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
