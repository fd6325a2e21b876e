//! Closed set of shape variants for caller-side dispatch.
//!
//! ## Rust Lesson #5: Enums instead of interfaces
//!
//! Every shape mosaic knows about is listed here, so `match` is
//! exhaustive: adding a variant forces every caller to handle it.

use crate::circle::Circle;
use crate::polygon::Polygon;
use crate::rectangle::Rectangle;

/// Variant tag without the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Circle,
    Triangle,
    Rectangle,
    Polygon,
}

impl ShapeType {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeType::Circle => "circle",
            ShapeType::Triangle => "triangle",
            ShapeType::Rectangle => "rectangle",
            ShapeType::Polygon => "polygon",
        }
    }
}

/// Any shape.
///
/// `Triangle` is reserved and carries no geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Triangle,
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Triangle => ShapeType::Triangle,
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::Polygon(_) => ShapeType::Polygon,
        }
    }

    /// Axis-aligned bounding rectangle. `None` for `Triangle`.
    pub fn bounds(&self) -> Option<&Rectangle> {
        match self {
            Shape::Circle(c) => Some(c.bounds()),
            Shape::Triangle => None,
            Shape::Rectangle(r) => Some(r.bounds()),
            Shape::Polygon(p) => Some(p.bounds()),
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}
