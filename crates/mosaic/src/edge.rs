//! Directed edges: ray crossing, line intersection and half-plane tests.

use crate::transform::Transform;
use crate::vector::Vector;

/// Vertical nudge applied to a ray that passes exactly through an edge
/// endpoint, so a shared vertex is counted once instead of twice.
pub const RAY_EPSILON: f64 = 1e-4;

/// A directed segment from `start` to `end`.
///
/// `active` only matters for SAT: inactive edges produce no plane. Ray
/// casting and clipping use every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vector,
    pub end: Vector,
    pub active: bool,
}

impl Edge {
    /// A new active edge.
    #[inline]
    pub fn new(start: Vector, end: Vector) -> Self {
        Self { start, end, active: true }
    }

    #[inline]
    pub fn with_active(self, active: bool) -> Self {
        Self { active, ..self }
    }

    /// Apply `t` to both endpoints. The active flag is kept.
    pub fn transform(&self, t: &Transform) -> Self {
        Self {
            start: self.start.transform(t),
            end: self.end.transform(t),
            active: self.active,
        }
    }

    /// Shift both endpoints by `offset`.
    #[inline]
    pub fn translate(&self, offset: Vector) -> Self {
        Self {
            start: offset.add(self.start),
            end: offset.add(self.end),
            active: self.active,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Number of times a ray cast from `v` toward +X crosses this edge
    /// (0 or 1).
    ///
    /// Horizontal edges never count. A ray through an endpoint's Y is
    /// nudged up by [`RAY_EPSILON`] first.
    pub fn ray_count(&self, v: Vector) -> usize {
        let start = self.start;
        let end = self.end;

        if start.y == end.y {
            return 0;
        }

        let mut y = v.y;
        if y == start.y || y == end.y {
            y += RAY_EPSILON;
        }

        let spans = (y > start.y && y <= end.y) || (y > end.y && y <= start.y);
        if !spans {
            return 0;
        }

        let x = start.x + (y - start.y) * (end.x - start.x) / (end.y - start.y);
        usize::from(x > v.x)
    }

    /// X coordinate where the infinite lines through `self` and `f` cross.
    ///
    /// Parallel lines divide by zero: the result is `±inf`, or NaN when the
    /// lines coincide. Callers receive it unchanged.
    pub fn x_intersect(&self, f: &Edge) -> f64 {
        let (det_e, det_f, denominator) = self.determinants(f);
        let numerator = det_e * (f.start.x - f.end.x) - (self.start.x - self.end.x) * det_f;
        numerator / denominator
    }

    /// Y coordinate where the infinite lines through `self` and `f` cross.
    ///
    /// Same parallel-line behaviour as [`Edge::x_intersect`].
    pub fn y_intersect(&self, f: &Edge) -> f64 {
        let (det_e, det_f, denominator) = self.determinants(f);
        let numerator = det_e * (f.start.y - f.end.y) - (self.start.y - self.end.y) * det_f;
        numerator / denominator
    }

    /// Intersection point of the infinite lines through `self` and `f`.
    pub fn intersect(&self, f: &Edge) -> Vector {
        Vector::new(self.x_intersect(f), self.y_intersect(f))
    }

    /// `(det(self), det(f), denominator)` of the 2×2 line intersection.
    #[inline]
    fn determinants(&self, f: &Edge) -> (f64, f64, f64) {
        let det_e = self.start.x * self.end.y - self.start.y * self.end.x;
        let det_f = f.start.x * f.end.y - f.start.y * f.end.x;
        let denominator = (self.start.x - self.end.x) * (f.start.y - f.end.y)
            - (self.start.y - self.end.y) * (f.start.x - f.end.x);
        (det_e, det_f, denominator)
    }

    /// True when `v` lies strictly to the left of this directed edge.
    ///
    /// For a counter-clockwise polygon "left" is the inside. Points on the
    /// line are outside.
    pub fn contains_vector(&self, v: Vector) -> bool {
        (self.end.x - self.start.x) * (v.y - self.start.y)
            > (self.end.y - self.start.y) * (v.x - self.start.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(x1: f64, y1: f64, x2: f64, y2: f64) -> Edge {
        Edge::new(Vector::new(x1, y1), Vector::new(x2, y2))
    }

    #[test]
    fn x_intersect_vertical() {
        let e = edge(300.0, 200.0, 100.0, 150.0);
        let f = edge(200.0, 150.0, 200.0, 200.0);
        assert_eq!(e.x_intersect(&f), 200.0);
        assert_eq!(e.y_intersect(&f), 175.0);
    }

    #[test]
    fn y_intersect_does_not_depend_on_direction() {
        let e = edge(100.0, 150.0, 300.0, 200.0);
        assert_eq!(e.y_intersect(&edge(200.0, 150.0, 200.0, 200.0)), 175.0);
        assert_eq!(e.y_intersect(&edge(150.0, 150.0, 150.0, 200.0)), 162.5);
    }

    #[test]
    fn intersect_diagonals() {
        let e = edge(5.0, 5.0, 25.0, 25.0);
        let f = edge(5.0, 25.0, 25.0, 5.0);
        assert_eq!(e.x_intersect(&f), 15.0);
        assert_eq!(e.y_intersect(&f), 15.0);
        assert_eq!(e.intersect(&f), Vector::new(15.0, 15.0));
    }

    #[test]
    fn parallel_lines_are_not_finite() {
        let e = edge(0.0, 0.0, 10.0, 0.0);
        let f = edge(0.0, 5.0, 10.0, 5.0);
        assert!(e.x_intersect(&f).is_infinite());
        assert!(!e.intersect(&f).y.is_finite());

        let coincident = edge(2.0, 0.0, 8.0, 0.0);
        assert!(e.x_intersect(&coincident).is_nan());
    }

    #[test]
    fn ray_count_crossing() {
        let e = edge(10.0, 0.0, 10.0, 10.0);
        assert_eq!(e.ray_count(Vector::new(5.0, 5.0)), 1);
        assert_eq!(e.ray_count(Vector::new(15.0, 5.0)), 0);
        assert_eq!(e.ray_count(Vector::new(5.0, 20.0)), 0);
    }

    #[test]
    fn ray_count_ignores_horizontal_edges() {
        let e = edge(0.0, 5.0, 10.0, 5.0);
        assert_eq!(e.ray_count(Vector::new(-5.0, 5.0)), 0);
    }

    #[test]
    fn ray_count_through_shared_vertex_counts_once() {
        // Two edges meeting at (10, 5); a ray at y = 5 touches the vertex.
        let lower = edge(10.0, 0.0, 10.0, 5.0);
        let upper = edge(10.0, 5.0, 10.0, 10.0);
        let v = Vector::new(0.0, 5.0);
        assert_eq!(lower.ray_count(v) + upper.ray_count(v), 1);
    }

    #[test]
    fn ray_count_ignores_active_flag() {
        let e = edge(10.0, 0.0, 10.0, 10.0).with_active(false);
        assert_eq!(e.ray_count(Vector::new(5.0, 5.0)), 1);
    }

    #[test]
    fn contains_vector_left_side() {
        // Left of a rightward edge is +Y.
        let e = edge(0.0, 0.0, 10.0, 0.0);
        assert!(e.contains_vector(Vector::new(5.0, 1.0)));
        assert!(!e.contains_vector(Vector::new(5.0, -1.0)));
        assert!(!e.contains_vector(Vector::new(5.0, 0.0)));
    }

    #[test]
    fn translate_and_transform_keep_active() {
        let e = edge(0.0, 0.0, 1.0, 0.0).with_active(false);
        let moved = e.translate(Vector::new(2.0, 3.0));
        assert_eq!(moved.start, Vector::new(2.0, 3.0));
        assert_eq!(moved.end, Vector::new(3.0, 3.0));
        assert!(!moved.active);

        let scaled = e.transform(&Transform::new(0.0, 0.0, 2.0, 0.0));
        assert_eq!(scaled.end, Vector::new(2.0, 0.0));
        assert!(!scaled.active);
    }
}
