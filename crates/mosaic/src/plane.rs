//! Separating planes derived from edges.

use crate::edge::Edge;
use crate::vector::Vector;

/// A line in normal form: every point `v` with `normal · v == distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit right-hand normal of the source edge.
    pub normal: Vector,
    /// Signed distance from the origin along `normal`.
    pub distance: f64,
}

impl Plane {
    /// Plane through the edge `start -> end`.
    pub fn new(start: Vector, end: Vector) -> Self {
        let normal = start.right_normal(end);
        let distance = normal.dot(end);
        Self { normal, distance }
    }

    #[inline]
    pub fn from_edge(edge: &Edge) -> Self {
        Self::new(edge.start, edge.end)
    }

    /// Signed distance of `v` from the plane. Positive is in front.
    #[inline]
    pub fn distance_to(&self, v: Vector) -> f64 {
        self.normal.dot(v) - self.distance
    }

    /// The same line facing the other way.
    pub fn invert(&self) -> Self {
        Self {
            normal: self.normal.invert(),
            distance: -self.distance,
        }
    }

    /// True when `other` is exactly this plane facing the other way: the
    /// shared wall between two shapes placed edge to edge.
    pub fn is_opposite(&self, other: &Plane) -> bool {
        self.distance == -other.distance && self.normal == other.normal.invert()
    }
}
