//! Core Types - Shared value types for motion streams
//!
//! - [`MotionState`] - the auxiliary activity channel every stream carries
//! - [`Point`] - 2D point/vector used by gesture payloads and geometry operators
//! - [`TransformState`] - pivot, scale and rotation of a transformable target

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// =============================================================================
// MOTION STATE
// =============================================================================

/// Activity signal carried alongside values.
///
/// `Active` while a source is in motion (a gesture is in progress, a tween is
/// playing), `AtRest` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionState {
    #[default]
    AtRest,
    Active,
}

impl MotionState {
    /// True for [`MotionState::Active`].
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    /// Logical OR of two activity states.
    pub fn or(self, other: Self) -> Self {
        if self.is_active() || other.is_active() {
            Self::Active
        } else {
            Self::AtRest
        }
    }
}

// =============================================================================
// POINT
// =============================================================================

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotate around the origin by `radians` (counter-clockwise).
    pub fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Linear interpolation between two points.
    pub fn lerp(self, to: Point, fraction: f32) -> Self {
        self + (to - self) * fraction
    }

    /// Approximate equality, for geometry assertions.
    pub fn approx_eq(self, other: Point, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

// =============================================================================
// TRANSFORM STATE
// =============================================================================

/// Pivot, scale and rotation of a target, as read by geometry operators.
///
/// A point `x` in target space maps to `translation + pivot + R(rotation) * scale * (x - pivot)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub pivot: Point,
    pub scale: f32,
    /// Rotation in radians.
    pub rotation: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            pivot: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl TransformState {
    /// Apply the linear part (rotation and scale) to a vector.
    pub fn apply_linear(&self, v: Point) -> Point {
        v.rotate(self.rotation) * self.scale
    }

    /// Map a target-space point to parent space.
    pub fn map_point(&self, translation: Point, x: Point) -> Point {
        translation + self.pivot + self.apply_linear(x - self.pivot)
    }
}

// =============================================================================
// TESTS
// =============================================================================
