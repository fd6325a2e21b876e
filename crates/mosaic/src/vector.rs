//! 2D vector algebra.
//!
//! Everything in mosaic is built on this one type: positions, local
//! vertices, edge directions and plane normals are all `Vector`s.
//!
//! ## Rust Lesson #1: Copy types
//!
//! `Vector` is two `f64`s, so it derives `Copy`. Passing it by value is
//! as cheap as passing a reference, and every method below returns a new
//! value instead of mutating `self`.

use std::ops::{Add, Mul, Neg, Sub};

use crate::transform::Transform;

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// The zero vector. Also the "no result" normal of a [`crate::Contact`].
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate a quarter turn: `(y, -x)`.
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(self.y, -self.x)
    }

    #[inline]
    pub fn invert(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    #[inline]
    pub fn dot(self, w: Vector) -> f64 {
        self.x * w.x + self.y * w.y
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn cross(self, w: Vector) -> f64 {
        self.x * w.y - self.y * w.x
    }

    /// Same as [`Vector::right_normal`].
    #[inline]
    pub fn normal(self, w: Vector) -> Self {
        self.right_normal(w)
    }

    /// Unit normal of the segment `self -> w` for clockwise winding.
    pub fn left_normal(self, w: Vector) -> Self {
        let vn = w.subtract(self).normalize();
        Self::new(-vn.y, vn.x)
    }

    /// Unit normal of the segment `self -> w` for counter-clockwise winding.
    pub fn right_normal(self, w: Vector) -> Self {
        let vn = w.subtract(self).normalize();
        Self::new(vn.y, -vn.x)
    }

    #[inline]
    pub fn add(self, w: Vector) -> Self {
        Self::new(self.x + w.x, self.y + w.y)
    }

    #[inline]
    pub fn subtract(self, w: Vector) -> Self {
        Self::new(self.x - w.x, self.y - w.y)
    }

    #[inline]
    pub fn scale(self, c: f64) -> Self {
        Self::new(self.x * c, self.y * c)
    }

    #[inline]
    pub fn scale_xy(self, cx: f64, cy: f64) -> Self {
        Self::new(self.x * cx, self.y * cy)
    }

    /// Projection of `self` onto `w`.
    ///
    /// `w` must be non-zero; projecting onto the zero vector yields NaN.
    pub fn projection(self, w: Vector) -> Self {
        w.scale(self.dot(w) / w.dot(w))
    }

    /// Projection onto a `w` already known to be unit length.
    pub fn unit_projection(self, w: Vector) -> Self {
        w.scale(self.dot(w))
    }

    /// Reflect `self` across the line spanned by `w`.
    pub fn reflect(self, w: Vector) -> Self {
        self.projection(w).scale(2.0).subtract(self)
    }

    /// Reflect across a unit-length `w`.
    pub fn unit_reflect(self, w: Vector) -> Self {
        self.unit_projection(w).scale(2.0).subtract(self)
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector normalizes to itself: a zero magnitude is replaced
    /// by a divisor of 1 instead of dividing by zero.
    pub fn normalize(self) -> Self {
        let mut c = self.magnitude();
        if c == 0.0 {
            c = 1.0;
        }
        self.scale(1.0 / c)
    }

    /// Squared magnitude. Not the same as [`Vector::magnitude`].
    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.length().sqrt()
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, w: Vector) -> f64 {
        let dx = w.x - self.x;
        let dy = w.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Apply scale, then rotation, then translation.
    pub fn transform(self, t: &Transform) -> Self {
        Self::new(
            t.scale() * (t.cos() * self.x - t.sin() * self.y) + t.x(),
            t.scale() * (t.sin() * self.x + t.cos() * self.y) + t.y(),
        )
    }
}

// ============================================================================
// OPERATORS
// ============================================================================
//
// ## Rust Lesson #2: Operator overloading
//
// Implementing `std::ops::Add` lets callers write `a + b` instead of
// `a.add(b)`. The named methods above stay for readability in the
// geometry code; the operators are thin wrappers.

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::add(self, rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.subtract(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.invert()
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// TESTS
// ============================================================================
