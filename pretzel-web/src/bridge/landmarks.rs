//! Pose landmark payloads from JavaScript
//!
//! MediaPipe Pose hands JS 33 landmarks per detection. The host flattens
//! them into a Float32Array of `x, y, z, visibility` quadruples; an empty
//! array means nothing was detected in that frame.

use super::error::BridgeError;
use crate::config::AnalyzerOptions;
use crate::posture::{BodyLandmarks, FrameInput, Landmark, LandmarkPair};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LEFT_EAR: usize = 7;
pub const RIGHT_EAR: usize = 8;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;

pub const POSE_LANDMARK_COUNT: usize = 33;

/// Floats per landmark in the flat payload: x, y, z, visibility
pub const LANDMARK_STRIDE: usize = 4;

/// Shortest frame that still contains both knees
pub const MIN_LANDMARKS: usize = RIGHT_KNEE + 1;

// ============================================================================
// POSE FRAME
// ============================================================================

/// One detection's landmarks, in MediaPipe order
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Parse a flat payload. `Ok(None)` for an empty payload (no detection).
    pub fn from_flat(data: &[f32]) -> Result<Option<Self>, BridgeError> {
        if data.is_empty() {
            return Ok(None);
        }
        if data.len() % LANDMARK_STRIDE != 0 || data.len() / LANDMARK_STRIDE < MIN_LANDMARKS {
            return Err(BridgeError::MalformedFrame { len: data.len() });
        }

        let landmarks = data
            .chunks_exact(LANDMARK_STRIDE)
            .map(|v| Landmark {
                x: v[0],
                y: v[1],
                z: v[2],
                visibility: v[3].is_finite().then_some(v[3]),
            })
            .collect();

        Ok(Some(Self { landmarks }))
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    fn pair(&self, left: usize, right: usize) -> LandmarkPair {
        LandmarkPair::new(self.landmarks[left], self.landmarks[right])
    }

    /// The landmarks the analyzer reads
    pub fn body(&self) -> BodyLandmarks {
        BodyLandmarks {
            ears: self.pair(LEFT_EAR, RIGHT_EAR),
            shoulders: self.pair(LEFT_SHOULDER, RIGHT_SHOULDER),
            hips: self.pair(LEFT_HIP, RIGHT_HIP),
            knees: self.pair(LEFT_KNEE, RIGHT_KNEE),
        }
    }

    pub fn frame_input(&self, options: AnalyzerOptions) -> FrameInput {
        FrameInput {
            body: self.body(),
            options,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Flat payload of 33 landmarks, each at (index/100, index/50, 0) with visibility 0.5
    pub(crate) fn flat_frame() -> Vec<f32> {
        (0..POSE_LANDMARK_COUNT)
            .flat_map(|i| [i as f32 / 100.0, i as f32 / 50.0, 0.0, 0.5])
            .collect()
    }

    #[test]
    fn test_empty_payload_is_no_detection() {
        assert!(matches!(PoseFrame::from_flat(&[]), Ok(None)));
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert_eq!(
            PoseFrame::from_flat(&[0.0; 99]).err(),
            Some(BridgeError::MalformedFrame { len: 99 })
        );
        assert_eq!(
            PoseFrame::from_flat(&[0.0; 4 * 26]).err(),
            Some(BridgeError::MalformedFrame { len: 104 })
        );
    }

    #[test]
    fn test_extracts_body_pairs() {
        let frame = PoseFrame::from_flat(&flat_frame()).unwrap().unwrap();
        assert_eq!(frame.landmarks().len(), POSE_LANDMARK_COUNT);

        let body = frame.body();
        assert_eq!(body.ears.left.x, 0.07);
        assert_eq!(body.shoulders.right.x, 0.12);
        assert_eq!(body.hips.left.y, 23.0 / 50.0);
        assert_eq!(body.knees.right.visibility, Some(0.5));
    }

    #[test]
    fn test_nan_visibility_is_missing() {
        let mut data = flat_frame();
        data[LEFT_SHOULDER * LANDMARK_STRIDE + 3] = f32::NAN;
        let frame = PoseFrame::from_flat(&data).unwrap().unwrap();
        assert_eq!(frame.body().shoulders.left.visibility, None);
    }

    #[test]
    fn test_accepts_frame_without_feet() {
        let data = &flat_frame()[..MIN_LANDMARKS * LANDMARK_STRIDE];
        let frame = PoseFrame::from_flat(data).unwrap().unwrap();
        assert_eq!(frame.body().knees.left.x, 0.25);
    }
}
