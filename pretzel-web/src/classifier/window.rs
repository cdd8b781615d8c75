//! Angle window - primary angles collected since the last verdict
//!
//! The frame counter is tracked separately from the sample buffer: on
//! evaluation the samples are dropped but the counter only gives back one
//! threshold's worth of frames, so any overshoot carries into the next window.

/// Initial capacity, sized for the default 30-frame window plus carry-over
const INITIAL_CAPACITY: usize = 32;

pub struct AngleWindow {
    /// Primary angles in arrival order
    samples: Vec<f32>,
    /// Frames counted towards the next evaluation
    frame_count: u32,
}

impl AngleWindow {
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(INITIAL_CAPACITY),
            frame_count: 0,
        }
    }

    /// Append one primary angle and count its frame
    pub fn push(&mut self, angle: f32) {
        self.samples.push(angle);
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True once more than `threshold` frames have been counted
    pub fn is_ready(&self, threshold: u32) -> bool {
        self.frame_count > threshold && !self.samples.is_empty()
    }

    /// Mean of the buffered angles; `None` for an empty window
    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f32 = self.samples.iter().sum();
        Some(sum / self.samples.len() as f32)
    }

    /// Close the window: drop the samples, give back `threshold` frames
    pub fn carry_over(&mut self, threshold: u32) {
        self.samples.clear();
        self.frame_count = self.frame_count.saturating_sub(threshold);
    }

    /// Forget everything, including carried-over frames
    pub fn clear(&mut self) {
        self.samples.clear();
        self.frame_count = 0;
    }
}

impl Default for AngleWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_has_no_mean() {
        let window = AngleWindow::new();
        assert_eq!(window.mean(), None);
        assert!(!window.is_ready(0));
    }

    #[test]
    fn test_mean() {
        let mut window = AngleWindow::new();
        for angle in [10.0, 20.0, 30.0, 40.0] {
            window.push(angle);
        }
        assert_eq!(window.len(), 4);
        assert_eq!(window.mean(), Some(25.0));
    }

    #[test]
    fn test_ready_only_past_threshold() {
        let mut window = AngleWindow::new();
        for _ in 0..3 {
            window.push(1.0);
        }
        assert!(!window.is_ready(3));
        window.push(1.0);
        assert!(window.is_ready(3));
    }

    #[test]
    fn test_carry_over_keeps_extra_frames() {
        let mut window = AngleWindow::new();
        for _ in 0..31 {
            window.push(5.0);
        }
        window.carry_over(30);
        assert!(window.is_empty());
        assert_eq!(window.frame_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut window = AngleWindow::new();
        window.push(5.0);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.frame_count(), 0);
    }
}
