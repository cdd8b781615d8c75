//! Posture module - per-frame landmark geometry and angle extraction
//!
//! Re-exports only. All logic in submodules.

mod geometry;
mod resolver;

pub use geometry::{
    angle_from_normal, midpoint, planar_distance, translate_up,
    Landmark, Point3, NEUTRAL_ANGLE, UP_OFFSET,
};
pub use resolver::{
    analyze, Analysis, AngleSample, BodyLandmarks, BodySide,
    DerivedPoints, FrameInput, LandmarkPair,
};
