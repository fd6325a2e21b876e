//! Circles. SAT between two circles collapses to one axis: the line
//! between their centres.

use crate::contact::Contact;
use crate::rectangle::Rectangle;
use crate::vector::Vector;

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    position: Vector,
    radius: f64,
    bounds: Rectangle,
}

impl Circle {
    pub fn new(position: Vector, radius: f64) -> Self {
        Self {
            position,
            radius,
            bounds: Rectangle::new(position, radius * 2.0, radius * 2.0),
        }
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Square of side `2 * radius` centred on `position`.
    #[inline]
    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    pub fn with_position(&self, position: Vector) -> Self {
        Self::new(position, self.radius)
    }

    pub fn with_radius(&self, radius: f64) -> Self {
        Self::new(self.position, radius)
    }

    pub fn translate(&self, offset: Vector) -> Self {
        self.with_position(self.position.add(offset))
    }

    #[inline]
    pub fn contains_vector(&self, v: Vector) -> bool {
        self.position.distance(v) < self.radius
    }

    /// Push-out from `self` toward `other`, or [`Contact::NONE`] when the
    /// circles are apart or touching.
    ///
    /// Concentric circles overlap with a zero normal (there is no preferred
    /// direction) and depth equal to the radius sum. Off-axis pairs moved by
    /// [`Contact::translation`] may keep a residual depth of a few ulps.
    pub fn intersects(&self, other: &Circle) -> Contact {
        let distance = self.position.distance(other.position);
        let radii = self.radius + other.radius;

        if distance >= radii {
            return Contact::NONE;
        }

        let normal = other.position.subtract(self.position).normalize();
        Contact::new(normal, radii - distance)
    }

    /// True when `other` fits entirely inside `self`. Touching counts.
    pub fn contains(&self, other: &Circle) -> bool {
        self.radius >= self.position.distance(other.position) + other.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn bounds_is_square_of_diameter() {
        let c = Circle::new(v(3.0, 4.0), 2.0);
        assert_eq!(c.bounds().position(), v(3.0, 4.0));
        assert_eq!(c.bounds().width(), 4.0);
        assert_eq!(c.bounds().height(), 4.0);

        let moved = c.translate(v(1.0, 0.0));
        assert_eq!(moved.bounds().position(), v(4.0, 4.0));
        assert_eq!(c.with_radius(5.0).bounds().width(), 10.0);
    }

    #[test]
    fn intersects_overlapping() {
        let a = Circle::new(v(0.0, 0.0), 2.0);
        let b = Circle::new(v(3.0, 0.0), 2.0);
        let contact = a.intersects(&b);
        assert_eq!(contact.normal, v(1.0, 0.0));
        assert_eq!(contact.depth, 1.0);

        let resolved = b.translate(contact.translation());
        assert_eq!(a.intersects(&resolved), Contact::NONE);
    }

    #[test]
    fn intersects_off_axis_resolves_within_tolerance() {
        let a = Circle::new(v(0.0, 0.0), 2.0);
        for (x, y) in [(1.3, 2.1), (-0.7, 1.9), (2.2, -1.1), (0.1, -3.3)] {
            let b = Circle::new(v(x, y), 1.5);
            let contact = a.intersects(&b);
            assert!(contact.depth > 0.0);

            let residual = a.intersects(&b.translate(contact.translation()));
            assert!(residual.depth < 1e-9, "({}, {}): residual depth {}", x, y, residual.depth);
        }
    }

    #[test]
    fn intersects_apart_or_touching() {
        let a = Circle::new(v(0.0, 0.0), 2.0);
        assert_eq!(a.intersects(&Circle::new(v(4.0, 0.0), 2.0)), Contact::NONE);
        assert_eq!(a.intersects(&Circle::new(v(0.0, 9.0), 2.0)), Contact::NONE);
    }

    #[test]
    fn concentric_overlap_has_zero_normal() {
        let a = Circle::new(v(1.0, 1.0), 2.0);
        let contact = a.intersects(&a.clone());
        assert_eq!(contact.normal, Vector::ZERO);
        assert_eq!(contact.depth, 4.0);
    }

    #[test]
    fn contains_inner_circle() {
        let outer = Circle::new(v(0.0, 0.0), 5.0);
        assert!(outer.contains(&Circle::new(v(1.0, 0.0), 2.0)));
        assert!(outer.contains(&Circle::new(v(3.0, 0.0), 2.0)));
        assert!(!outer.contains(&Circle::new(v(4.0, 0.0), 2.0)));
    }

    #[test]
    fn contains_vector_strictly_inside() {
        let c = Circle::new(v(0.0, 0.0), 1.0);
        assert!(c.contains_vector(v(0.5, 0.5)));
        assert!(!c.contains_vector(v(1.0, 0.0)));
    }
}
