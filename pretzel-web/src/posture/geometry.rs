//! Landmark geometry - midpoints, translations and angles between 3-D points
//!
//! Every function here is total: degenerate input (coincident points,
//! zero-length vectors, NaN coordinates from low-confidence detections)
//! resolves to a fixed neutral value instead of leaking NaN into the
//! rolling mean downstream.

use std::ops::{Add, Mul, Sub};

/// Screen-space "up" offset used to build the vertical reference vertex
pub const UP_OFFSET: f32 = 0.3;

/// Angle reported when one of the two vectors has no direction
pub const NEUTRAL_ANGLE: f32 = 90.0;

/// Vectors shorter than this are treated as zero-length
const MIN_LENGTH: f32 = 1e-6;

/// A point (or direction) in normalized camera space
///
/// x/y are 0-1 across the image, y grows downward, z is relative depth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    /// Unit vector pointing up the image
    pub const UP: Point3 = Point3 { x: 0.0, y: -1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Point3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` when there is no direction
    pub fn normalized(self) -> Point3 {
        let len = self.length();
        if !(len > MIN_LENGTH) || !len.is_finite() {
            return Point3::ZERO;
        }
        self * (1.0 / len)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Point3;

    fn mul(self, scale: f32) -> Point3 {
        Point3::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

/// A single pose landmark with optional detection confidence
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Confidence in [0, 1]; `None` when the model did not report one
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, visibility: None }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn point(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Visibility with the missing case counted as zero
    pub fn visibility_or_zero(&self) -> f32 {
        self.visibility.unwrap_or(0.0)
    }
}

/// Componentwise average of two points
pub fn midpoint(a: Point3, b: Point3) -> Point3 {
    Point3::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
}

/// Move a point up the image by `amount` (y decreases)
pub fn translate_up(a: Point3, amount: f32) -> Point3 {
    Point3::new(a.x, a.y - amount, a.z)
}

/// Angle in degrees at `center` between the rays towards `p` and `n`
///
/// The cosine is clamped to [0, 1] before `acos`, so the result lies in
/// [0, 90]: rays pointing away from each other read as perpendicular.
/// A zero-length ray yields `NEUTRAL_ANGLE`.
pub fn angle_from_normal(p: Point3, center: Point3, n: Point3) -> f32 {
    let a = p - center;
    let b = n - center;

    let len_a = a.length();
    let len_b = b.length();
    if !(len_a > MIN_LENGTH && len_b > MIN_LENGTH) {
        return NEUTRAL_ANGLE;
    }

    let cos_angle = (a.dot(b) / (len_a * len_b)).clamp(0.0, 1.0);
    if cos_angle.is_nan() {
        return NEUTRAL_ANGLE;
    }

    cos_angle.acos().to_degrees()
}

/// Image-plane distance between two points, ignoring depth
///
/// Returns 0 when the distance is not a number (missing landmark).
pub fn planar_distance(a: Point3, b: Point3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist.is_nan() {
        0.0
    } else {
        dist
    }
}
