//! Rectangles: a fixed four-edge polygon with axis-aligned helpers.

use crate::circle::Circle;
use crate::contact::Contact;
use crate::edge::Edge;
use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::sat::{self, Hull};
use crate::transform::Transform;
use crate::vector::Vector;

/// A rectangle centred on `position`.
///
/// Width and height are not stored. They are read back from the world
/// edges, so they stay correct after scaling and rotation.
///
/// The corner ring is counter-clockwise on a y-down screen, which makes it
/// clockwise in y-up coordinates. Reverse its polygon before using it as a
/// clip region.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    position: Vector,
    local_edges: [Edge; 4],
    edges: [Edge; 4],
    planes: [Plane; 4],
    /// Axis-aligned box around a rotated rectangle. `None` while the
    /// rectangle is its own box.
    aabb: Option<Box<Rectangle>>,
}

impl Rectangle {
    pub fn new(position: Vector, width: f64, height: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let corners = [
            Vector::new(-hw, -hh),
            Vector::new(-hw, hh),
            Vector::new(hw, hh),
            Vector::new(hw, -hh),
        ];
        let local_edges = std::array::from_fn(|i| Edge::new(corners[i], corners[(i + 1) % 4]));
        Self::from_local_edges(position, local_edges)
    }

    fn from_local_edges(position: Vector, local_edges: [Edge; 4]) -> Self {
        let edges = local_edges.map(|edge| edge.translate(position));
        let planes = edges.map(|edge| Plane::from_edge(&edge));
        let aabb = Self::calc_aabb(&edges).map(Box::new);
        Self { position, local_edges, edges, planes, aabb }
    }

    fn calc_aabb(edges: &[Edge; 4]) -> Option<Rectangle> {
        let axis_aligned = edges
            .iter()
            .all(|edge| edge.start.x == edge.end.x || edge.start.y == edge.end.y);
        if axis_aligned {
            return None;
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in edges.iter().map(|edge| edge.start) {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }

        let center = Vector::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        Some(Rectangle::new(center, max_x - min_x, max_y - min_y))
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[inline]
    pub fn edges(&self) -> &[Edge; 4] {
        &self.edges
    }

    #[inline]
    pub fn local_edges(&self) -> &[Edge; 4] {
        &self.local_edges
    }

    #[inline]
    pub fn planes(&self) -> &[Plane; 4] {
        &self.planes
    }

    /// World-space corners.
    pub fn vertices(&self) -> [Vector; 4] {
        self.edges.map(|edge| edge.start)
    }

    /// Axis-aligned bounding box. An unrotated rectangle is its own box.
    #[inline]
    pub fn bounds(&self) -> &Rectangle {
        self.aabb.as_deref().unwrap_or(self)
    }

    fn hull(&self) -> Hull<'_> {
        Hull {
            position: self.position,
            edges: &self.edges,
            planes: &self.planes,
        }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.edges[0].length()
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.edges[1].length()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The corner closest to the origin.
    ///
    /// This is the lower-left corner only for an unrotated rectangle in
    /// the positive quadrant; it is not a per-axis minimum.
    pub fn min_point(&self) -> Vector {
        self.vertices()
            .into_iter()
            .reduce(|min, v| if min.length() > v.length() { v } else { min })
            .unwrap_or(self.position)
    }

    /// The corner farthest from the origin. Same caveat as
    /// [`Rectangle::min_point`].
    pub fn max_point(&self) -> Vector {
        self.vertices()
            .into_iter()
            .reduce(|max, v| if max.length() < v.length() { v } else { max })
            .unwrap_or(self.position)
    }

    pub fn with_position(&self, position: Vector) -> Self {
        if self.position == position {
            return self.clone();
        }
        Self::from_local_edges(position, self.local_edges)
    }

    pub fn translate(&self, offset: Vector) -> Self {
        self.with_position(self.position.add(offset))
    }

    /// Translation moves the centre; scale and rotation reshape the
    /// corners around it.
    pub fn transform(&self, t: &Transform) -> Self {
        let position = self.position.transform(&t.translation());
        let linear = t.linear();
        Self::from_local_edges(position, self.local_edges.map(|edge| edge.transform(&linear)))
    }

    pub fn scale(&self, c: f64) -> Self {
        self.transform(&Transform::new(0.0, 0.0, c, 0.0))
    }

    pub fn contains_vector(&self, v: Vector) -> bool {
        let crossings: usize = self.edges.iter().map(|edge| edge.ray_count(v)).sum();
        crossings % 2 == 1
    }

    /// SAT overlap test, same contract as [`Polygon::intersects`].
    pub fn intersects(&self, other: &Rectangle) -> Contact {
        sat::minimum_translation(&self.hull(), &other.hull())
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_local_edges(self.position, self.local_edges.to_vec())
    }

    /// Overlapping area of two axis-aligned rectangles.
    ///
    /// Rotation is not supported: the overlap is computed from
    /// [`Rectangle::min_point`] / [`Rectangle::max_point`].
    pub fn area_of_overlap(&self, other: &Rectangle) -> f64 {
        if self.intersects(other).depth == 0.0 {
            return 0.0;
        }

        let (r_min, r_max) = (self.min_point(), self.max_point());
        let (o_min, o_max) = (other.min_point(), other.max_point());

        let x = r_max.x.min(o_max.x) - r_min.x.max(o_min.x);
        let y = r_max.y.min(o_max.y) - r_min.y.max(o_min.y);
        x * y
    }

    /// Smallest circle about `position` through the farther of the
    /// min/max corners.
    pub fn to_circle(&self) -> Circle {
        let r_min = self.position.distance(self.min_point());
        let r_max = self.position.distance(self.max_point());
        Circle::new(self.position, r_min.max(r_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn canonical_edges() {
        let r = Rectangle::new(v(2.0, 2.0), 4.0, 2.0);
        assert_eq!(r.edges()[0], Edge::new(v(0.0, 1.0), v(0.0, 3.0)));
        assert_eq!(r.edges()[1], Edge::new(v(0.0, 3.0), v(4.0, 3.0)));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 2.0);
        assert_eq!(r.area(), 8.0);
    }

    #[test]
    fn area_of_overlap_identical() {
        let r = Rectangle::new(v(1.0, 1.0), 4.0, 4.0);
        assert_eq!(r.area_of_overlap(&r.clone()), 16.0);
    }

    #[test]
    fn area_of_overlap_disjoint() {
        let r = Rectangle::new(v(2.0, 2.0), 4.0, 4.0);
        let o = Rectangle::new(v(10.0, 10.0), 4.0, 4.0);
        assert_eq!(r.area_of_overlap(&o), 0.0);
    }

    #[test]
    fn area_of_overlap_half() {
        let r = Rectangle::new(v(2.0, 2.0), 4.0, 4.0);
        let o = Rectangle::new(v(2.0, 4.0), 4.0, 4.0);
        assert_eq!(r.area_of_overlap(&o), 8.0);
    }

    #[test]
    fn min_and_max_point() {
        let r = Rectangle::new(v(2.0, 2.0), 4.0, 4.0);
        assert_eq!(r.min_point(), v(0.0, 0.0));
        assert_eq!(r.max_point(), v(4.0, 4.0));
    }

    #[test]
    fn intersects_matches_polygon_view() {
        let r = Rectangle::new(v(0.0, 0.0), 4.0, 4.0);
        let o = Rectangle::new(v(3.0, 0.0), 4.0, 4.0);
        let contact = r.intersects(&o);
        assert_eq!(contact.depth, 1.0);
        assert_eq!(contact.normal, v(1.0, 0.0));
        assert_eq!(contact, r.to_polygon().intersects(&o.to_polygon()));
    }

    #[test]
    fn transform_rotates_corners_not_centre() {
        let r = Rectangle::new(v(1.0, 1.0), 4.0, 2.0);
        let t = r.transform(&Transform::new(2.0, 3.0, 1.0, 90.0));
        assert_eq!(t.position(), v(3.0, 4.0));
        // Edge lengths survive the turn; the first edge is now horizontal.
        assert_relative_eq!(t.width(), 4.0, max_relative = 1e-9);
        assert_relative_eq!(t.height(), 2.0, max_relative = 1e-9);
        let first = t.edges()[0];
        assert_relative_eq!(first.start.y, first.end.y, max_relative = 1e-9);
    }

    #[test]
    fn rotated_bounds_are_axis_aligned() {
        let r = Rectangle::new(Vector::ZERO, 4.0, 2.0).transform(&Transform::new(0.0, 0.0, 1.0, 45.0));

        let (mut min, mut max) = (v(f64::INFINITY, f64::INFINITY), v(f64::NEG_INFINITY, f64::NEG_INFINITY));
        for c in r.vertices() {
            min = v(min.x.min(c.x), min.y.min(c.y));
            max = v(max.x.max(c.x), max.y.max(c.y));
        }

        let bounds = r.bounds();
        assert_ne!(bounds, &r);
        let first = bounds.edges()[0];
        assert_eq!(first.start.x, first.end.x);
        assert_relative_eq!(bounds.width(), max.x - min.x, max_relative = 1e-9);
        assert_relative_eq!(bounds.height(), max.y - min.y, max_relative = 1e-9);
        // 4x2 turned 45 degrees spans 3*sqrt(2) both ways.
        assert_relative_eq!(bounds.width(), 3.0 * 2f64.sqrt(), max_relative = 1e-9);
        assert_relative_eq!(bounds.position().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.position().y, 0.0, epsilon = 1e-12);

        let shape: crate::shape::Shape = r.clone().into();
        assert_eq!(shape.bounds(), Some(bounds));
    }

    #[test]
    fn unrotated_rectangle_is_its_own_bounds() {
        let r = Rectangle::new(v(2.0, 2.0), 4.0, 2.0).scale(2.0);
        assert!(std::ptr::eq(r.bounds(), &r));
    }

    #[test]
    fn scale_grows_width_and_height() {
        let r = Rectangle::new(v(5.0, 5.0), 4.0, 2.0).scale(2.5);
        assert_eq!(r.position(), v(5.0, 5.0));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 5.0);
    }

    #[test]
    fn contains_vector() {
        let r = Rectangle::new(v(0.0, 0.0), 4.0, 4.0);
        assert!(r.contains_vector(v(1.0, 1.0)));
        assert!(!r.contains_vector(v(3.0, 1.0)));
    }

    #[test]
    fn to_polygon_shares_geometry() {
        let r = Rectangle::new(v(3.0, -1.0), 6.0, 2.0);
        let p = r.to_polygon();
        assert_eq!(p.position(), r.position());
        assert_eq!(p.edges(), r.edges().as_slice());
        assert_eq!(p.planes(), r.planes().as_slice());
        assert_eq!(p.area(), r.area());
    }

    #[test]
    fn to_circle_reaches_corners() {
        let c = Rectangle::new(v(0.0, 0.0), 6.0, 8.0).to_circle();
        assert_eq!(c.position(), v(0.0, 0.0));
        assert_eq!(c.radius(), 5.0);
    }

    #[test]
    fn with_position_moves_edges() {
        let r = Rectangle::new(v(0.0, 0.0), 2.0, 2.0).translate(v(10.0, 0.0));
        assert_eq!(r.position(), v(10.0, 0.0));
        assert_eq!(r.vertices()[0], v(9.0, -1.0));
    }
}
