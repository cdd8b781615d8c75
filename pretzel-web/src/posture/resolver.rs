//! Reference-point resolver - turns one frame's landmarks into posture angles
//!
//! Picks the more visible side of the body, builds the synthetic neck
//! reference points, and measures:
//! - primary angle: ear midpoint vs. a vertical ray above the shoulders
//!   (0° = head straight above the shoulders)
//! - secondary angle: knee midpoint vs. shoulder midpoint, seen from the hips

use super::geometry::{angle_from_normal, midpoint, planar_distance, translate_up, Landmark, Point3, UP_OFFSET};
use crate::config::AnalyzerOptions;

/// Left/right landmarks of one body part
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LandmarkPair {
    pub left: Landmark,
    pub right: Landmark,
}

impl LandmarkPair {
    pub fn new(left: Landmark, right: Landmark) -> Self {
        Self { left, right }
    }

    pub fn midpoint(&self) -> Point3 {
        midpoint(self.left.point(), self.right.point())
    }

    pub fn side(&self, side: BodySide) -> &Landmark {
        match side {
            BodySide::Left => &self.left,
            BodySide::Right => &self.right,
        }
    }
}

/// The landmarks the analyzer reads from a full pose frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyLandmarks {
    pub ears: LandmarkPair,
    pub shoulders: LandmarkPair,
    pub hips: LandmarkPair,
    pub knees: LandmarkPair,
}

/// One frame to analyze, with the options in effect for it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub body: BodyLandmarks,
    pub options: AnalyzerOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodySide {
    Left,
    Right,
}

impl BodySide {
    /// Side whose shoulder the model is more confident about (ties go right)
    pub fn more_visible(shoulders: &LandmarkPair) -> Self {
        if shoulders.left.visibility_or_zero() > shoulders.right.visibility_or_zero() {
            BodySide::Left
        } else {
            BodySide::Right
        }
    }
}

/// Geometry derived from one frame, for the overlay
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DerivedPoints {
    /// Neck projection along the hip→shoulder direction (follows torso lean)
    pub reference_hip_shoulder: Point3,
    /// Neck projection straight up from the shoulder (ignores lean)
    pub reference_shoulder_only: Point3,
    pub shoulder_midpoint: Point3,
    pub ear_midpoint: Point3,
    pub hip_midpoint: Point3,
    pub knee_midpoint: Point3,
    /// Vertical reference above the shoulder midpoint
    pub normal_vertex: Point3,
}

/// Angles in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngleSample {
    /// Head-forward tilt
    pub primary: f32,
    /// Upper vs. lower body alignment through the hips
    pub secondary: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Analysis {
    pub side: BodySide,
    pub points: DerivedPoints,
    pub angles: AngleSample,
}

impl Analysis {
    /// Image-plane distance between ear and shoulder midpoints
    pub fn neck_length(&self) -> f32 {
        planar_distance(self.points.ear_midpoint, self.points.shoulder_midpoint)
    }
}

/// Neck reference following the torso: shoulder + unit(shoulder - hip) * extension
fn reference_from_hip(hip: Point3, shoulder: Point3, extension: f32) -> Point3 {
    shoulder + (shoulder - hip).normalized() * extension
}

/// Neck reference straight up from the shoulder
fn reference_from_shoulder(shoulder: Point3, extension: f32) -> Point3 {
    shoulder + Point3::UP * extension
}

/// Analyze one frame. Total over any input: missing landmarks degrade to
/// neutral angles rather than NaN.
pub fn analyze(frame: &FrameInput) -> Analysis {
    let body = &frame.body;
    let extension = frame.options.neck_extension;

    let side = BodySide::more_visible(&body.shoulders);
    let hip = body.hips.side(side).point();
    let shoulder = body.shoulders.side(side).point();

    let shoulder_midpoint = body.shoulders.midpoint();
    let ear_midpoint = body.ears.midpoint();
    let hip_midpoint = body.hips.midpoint();
    let knee_midpoint = body.knees.midpoint();
    let normal_vertex = translate_up(shoulder_midpoint, UP_OFFSET);

    let points = DerivedPoints {
        reference_hip_shoulder: reference_from_hip(hip, shoulder, extension),
        reference_shoulder_only: reference_from_shoulder(shoulder, extension),
        shoulder_midpoint,
        ear_midpoint,
        hip_midpoint,
        knee_midpoint,
        normal_vertex,
    };

    let angles = AngleSample {
        primary: angle_from_normal(ear_midpoint, shoulder_midpoint, normal_vertex),
        secondary: angle_from_normal(knee_midpoint, hip_midpoint, shoulder_midpoint),
    };

    Analysis { side, points, angles }
}
