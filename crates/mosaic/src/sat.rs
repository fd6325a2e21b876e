//! Separating Axis Theorem kernels shared by polygons and rectangles.
//!
//! Both shapes hand these functions a borrowed [`Hull`] view of their
//! world-space edges and planes, so the projection loops live in one place.

use crate::contact::Contact;
use crate::edge::Edge;
use crate::plane::Plane;
use crate::vector::Vector;

/// Borrowed world-space view of a shape.
///
/// ## Rust Lesson #3: Lifetimes
///
/// `'a` says "this view cannot outlive the shape it borrows from". The
/// compiler checks it, so a `Hull` never points at a dropped edge list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hull<'a> {
    pub position: Vector,
    pub edges: &'a [Edge],
    pub planes: &'a [Plane],
}

/// Project every vertex (edge start) onto `axis`, returning `(min, max)`.
///
/// An empty edge list projects to `(f64::MAX, -f64::MAX)`, which every
/// overlap test treats as separated.
pub(crate) fn project(edges: &[Edge], axis: Vector) -> (f64, f64) {
    edges
        .iter()
        .map(|edge| edge.start.dot(axis))
        .fold((f64::MAX, -f64::MAX), |(min, max), p| (min.min(p), max.max(p)))
}

/// Minimum translation vector between two hulls.
///
/// Tests every plane of `a` then every plane of `b`. The first axis with
/// no overlap returns [`Contact::NONE`]. The winning normal is oriented to
/// point from `a` toward `b`.
pub(crate) fn minimum_translation(a: &Hull<'_>, b: &Hull<'_>) -> Contact {
    let mut depth = f64::MAX;
    let mut normal = Vector::ZERO;

    for plane in a.planes.iter().chain(b.planes) {
        let (min_a, max_a) = project(a.edges, plane.normal);
        let (min_b, max_b) = project(b.edges, plane.normal);

        if min_a >= max_b || min_b >= max_a {
            return Contact::NONE;
        }

        let overlap = (max_b - min_a).min(max_a - min_b);
        if overlap < depth {
            depth = overlap;
            normal = plane.normal;
        }
    }

    // Neither hull had an active plane.
    if depth == f64::MAX {
        return Contact::NONE;
    }

    if normal.dot(b.position.subtract(a.position)) < 0.0 {
        normal = normal.invert();
    }

    Contact::new(normal, depth)
}

/// Push-out needed to bring `inner` fully inside `outer`.
///
/// The caller has already ruled out full containment. For each plane the
/// protrusion is `(max_i - min_i) - min(max_i - min_o, max_o - min_i)`;
/// the smallest positive protrusion is tracked separately for normals with
/// an X component and normals with a Y component, then combined.
pub(crate) fn containment_depth(outer: &Hull<'_>, inner: &Hull<'_>) -> Contact {
    let mut x_depth = f64::MAX;
    let mut x_normal = Vector::ZERO;
    let mut y_depth = f64::MAX;
    let mut y_normal = Vector::ZERO;

    for plane in outer.planes.iter().chain(inner.planes) {
        let (min_o, max_o) = project(outer.edges, plane.normal);
        let (min_i, max_i) = project(inner.edges, plane.normal);

        let excess = max_i - min_i - (max_i - min_o).min(max_o - min_i);
        if excess <= 0.0 {
            continue;
        }

        if excess < x_depth && plane.normal.x != 0.0 {
            x_depth = excess;
            x_normal = plane.normal;
        }
        if excess < y_depth && plane.normal.y != 0.0 {
            y_depth = excess;
            y_normal = plane.normal;
        }
    }

    // Outward: away from the inner shape's centre.
    let to_inner = inner.position.subtract(outer.position);
    if x_normal.dot(to_inner) > 0.0 {
        x_normal = x_normal.invert();
    }
    if y_normal.dot(to_inner) > 0.0 {
        y_normal = y_normal.invert();
    }

    match (x_depth < f64::MAX, y_depth < f64::MAX) {
        (false, false) => Contact::NONE,
        (true, false) => Contact::new(x_normal, x_depth),
        (false, true) => Contact::new(y_normal, y_depth),
        (true, true) => Contact::new(
            x_normal.add(y_normal).normalize(),
            (x_depth * x_depth + y_depth * y_depth).sqrt(),
        ),
    }
}
