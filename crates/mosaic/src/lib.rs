//! # mosaic
//!
//! 2D collision geometry: SAT intersection with minimum translation
//! vectors, point-in-polygon ray casting, containment depth and convex
//! clipping, on top of a small immutable vector/edge/plane algebra.
//!
//! Every shape is an immutable value. Methods that "change" a shape
//! (`with_position`, `with_edge_active`, `transform`, ...) return a new
//! one with its world edges, planes and bounds rebuilt together.
//!
//! ```
//! use mosaic::{Polygon, Rectangle, Vector};
//!
//! let wall = Rectangle::new(Vector::new(0.0, 0.0), 4.0, 4.0).to_polygon();
//! let crate_ = Rectangle::new(Vector::new(3.0, 0.0), 4.0, 4.0).to_polygon();
//!
//! let contact = wall.intersects(&crate_);
//! assert_eq!(contact.depth, 1.0);
//!
//! let resolved: Polygon = crate_.translate(contact.translation());
//! assert!(wall.intersects(&resolved).is_none());
//! ```

pub mod circle;
pub mod contact;
pub mod edge;
pub mod plane;
pub mod polygon;
pub mod rectangle;
mod sat;
pub mod shape;
pub mod transform;
pub mod vector;

// Re-export common types at crate root for convenience.
pub use circle::Circle;
pub use contact::Contact;
pub use edge::{Edge, RAY_EPSILON};
pub use plane::Plane;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use shape::{Shape, ShapeType};
pub use transform::Transform;
pub use vector::Vector;
