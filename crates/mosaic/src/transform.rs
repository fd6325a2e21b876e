//! Affine scale/rotate/translate helper.

use std::f64::consts::PI;

/// A scale, then rotation, then translation.
///
/// The rotation is stored as a precomputed `sin`/`cos` pair so applying
/// the transform to many vertices never calls trig functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    x: f64,
    y: f64,
    sin: f64,
    cos: f64,
    scale: f64,
}

impl Transform {
    /// Build a transform from a translation, a uniform scale and an angle
    /// in degrees.
    ///
    /// A scale of `0` is treated as `1`. Angles of exactly `0` or `360`
    /// produce an exact identity rotation (no `sin(2π)` rounding noise).
    pub fn new(x: f64, y: f64, scale: f64, angle_degrees: f64) -> Self {
        let scale = if scale == 0.0 { 1.0 } else { scale };

        if angle_degrees == 0.0 || angle_degrees == 360.0 {
            return Self { x, y, sin: 0.0, cos: 1.0, scale };
        }

        let r = PI * angle_degrees / 180.0;
        Self { x, y, sin: r.sin(), cos: r.cos(), scale }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    /// Only the translation part of this transform.
    pub fn translation(&self) -> Self {
        Self { x: self.x, y: self.y, sin: 0.0, cos: 1.0, scale: 1.0 }
    }

    /// Only the scale and rotation part of this transform.
    pub fn linear(&self) -> Self {
        Self { x: 0.0, y: 0.0, sin: self.sin, cos: self.cos, scale: self.scale }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.cos
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
