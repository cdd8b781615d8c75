//! Overlay geometry for the JS renderer
//!
//! Derived points are appended after the raw landmarks at synthetic
//! indices, so the host can draw everything with one connector list over a
//! single point array. Nothing is drawn here.

use wasm_bindgen::prelude::*;

use super::landmarks::{
    LEFT_EAR, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, POSE_LANDMARK_COUNT,
    RIGHT_EAR, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
};
use crate::posture::{DerivedPoints, Landmark, Point3};

// ============================================================================
// SYNTHETIC INDICES (after the 33 MediaPipe landmarks)
// ============================================================================

pub const REFERENCE_HIP_SHOULDER: usize = 33;
pub const REFERENCE_SHOULDER_ONLY: usize = 34;
pub const SHOULDER_MIDPOINT: usize = 35;
pub const EAR_MIDPOINT: usize = 36;
pub const NORMAL_VERTEX: usize = 37;
pub const HIP_MIDPOINT: usize = 38;
pub const KNEE_MIDPOINT: usize = 39;

pub const OVERLAY_POINT_COUNT: usize = 40;

/// Connector segments (pairs of overlay indices)
pub const POSTURE_SKELETON: [(usize, usize); 10] = [
    (LEFT_SHOULDER, SHOULDER_MIDPOINT),
    (RIGHT_SHOULDER, SHOULDER_MIDPOINT),
    (EAR_MIDPOINT, SHOULDER_MIDPOINT),
    (EAR_MIDPOINT, LEFT_EAR),
    (EAR_MIDPOINT, RIGHT_EAR),
    (SHOULDER_MIDPOINT, NORMAL_VERTEX),
    (LEFT_HIP, HIP_MIDPOINT),
    (RIGHT_HIP, HIP_MIDPOINT),
    (HIP_MIDPOINT, SHOULDER_MIDPOINT),
    (HIP_MIDPOINT, KNEE_MIDPOINT),
];

/// Raw landmarks to draw as dots
pub const KEY_LANDMARKS: [usize; 8] = [
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_EAR, RIGHT_EAR,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
];

/// Flat `x, y, z` array of all overlay points
///
/// Raw landmarks missing from a short frame are filled with NaN so the
/// renderer skips them.
pub fn overlay_points(raw: &[Landmark], derived: &DerivedPoints) -> Vec<f32> {
    let mut points = [Point3::new(f32::NAN, f32::NAN, f32::NAN); OVERLAY_POINT_COUNT];
    for (slot, landmark) in points.iter_mut().zip(raw.iter().take(POSE_LANDMARK_COUNT)) {
        *slot = landmark.point();
    }

    points[REFERENCE_HIP_SHOULDER] = derived.reference_hip_shoulder;
    points[REFERENCE_SHOULDER_ONLY] = derived.reference_shoulder_only;
    points[SHOULDER_MIDPOINT] = derived.shoulder_midpoint;
    points[EAR_MIDPOINT] = derived.ear_midpoint;
    points[NORMAL_VERTEX] = derived.normal_vertex;
    points[HIP_MIDPOINT] = derived.hip_midpoint;
    points[KNEE_MIDPOINT] = derived.knee_midpoint;

    points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
}

/// Connector list as flat index pairs
#[wasm_bindgen(js_name = overlayConnections)]
pub fn overlay_connections() -> Vec<u32> {
    POSTURE_SKELETON
        .iter()
        .flat_map(|&(a, b)| [a as u32, b as u32])
        .collect()
}

/// Indices of the raw landmarks to mark
#[wasm_bindgen(js_name = markedLandmarks)]
pub fn marked_landmarks() -> Vec<u32> {
    KEY_LANDMARKS.iter().map(|&i| i as u32).collect()
}
