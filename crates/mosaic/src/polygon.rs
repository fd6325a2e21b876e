//! General polygons and the core collision algorithms.
//!
//! A polygon is a position plus a template of local-space edges. The
//! world-space edges, the SAT planes and the bounding box are derived
//! from that template and always rebuilt together by [`Polygon::rebuild`].
//! Nothing mutates a polygon after construction: every "setter" returns a
//! new value.

use log::{debug, trace};

use crate::contact::Contact;
use crate::edge::Edge;
use crate::plane::Plane;
use crate::rectangle::Rectangle;
use crate::sat::{self, Hull};
use crate::transform::Transform;
use crate::vector::Vector;

/// An ordered ring of edges, counter-clockwise.
///
/// ## Rust Lesson #4: Owned storage means no aliasing
///
/// Each polygon owns its `Vec`s. `clone()` copies them, so toggling an
/// edge on one copy can never leak into another, which is exactly what
/// `with_edge_active` and `join` rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    position: Vector,
    local_edges: Vec<Edge>,
    edges: Vec<Edge>,
    planes: Vec<Plane>,
    bounds: Rectangle,
}

impl Polygon {
    /// Build a polygon at `position` from local vertices in CCW order.
    ///
    /// Consecutive vertices become edges and the last vertex connects back
    /// to the first. All edges start active.
    pub fn new(position: Vector, vertices: &[Vector]) -> Self {
        let n = vertices.len();
        let local_edges = (0..n)
            .map(|i| Edge::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        Self::from_local_edges(position, local_edges)
    }

    /// Build a polygon from an existing local edge template, keeping each
    /// edge's active flag.
    pub fn from_local_edges(position: Vector, local_edges: Vec<Edge>) -> Self {
        Self {
            position,
            local_edges,
            edges: Vec::new(),
            planes: Vec::new(),
            bounds: Rectangle::new(position, 0.0, 0.0),
        }
        .rebuild()
    }

    /// Recompute world edges, planes and bounds from the template.
    fn rebuild(mut self) -> Self {
        self.edges = self
            .local_edges
            .iter()
            .map(|edge| edge.translate(self.position))
            .collect();

        self.planes = self
            .edges
            .iter()
            .filter(|edge| edge.active)
            .map(Plane::from_edge)
            .collect();

        self.bounds = self.calc_bounds();
        self
    }

    fn calc_bounds(&self) -> Rectangle {
        if self.edges.is_empty() {
            return Rectangle::new(self.position, 0.0, 0.0);
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in self.vertices() {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }

        let center = Vector::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        Rectangle::new(center, max_x - min_x, max_y - min_y)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    /// World-space edges.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The local-space template, relative to `position`.
    #[inline]
    pub fn local_edges(&self) -> &[Edge] {
        &self.local_edges
    }

    /// One plane per active edge, in edge order.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Axis-aligned bounding box of the world vertices.
    #[inline]
    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    /// World-space vertices (the start of each edge).
    pub fn vertices(&self) -> impl Iterator<Item = Vector> + '_ {
        self.edges.iter().map(|edge| edge.start)
    }

    pub(crate) fn hull(&self) -> Hull<'_> {
        Hull {
            position: self.position,
            edges: &self.edges,
            planes: &self.planes,
        }
    }

    // ------------------------------------------------------------------
    // Rebuilders
    // ------------------------------------------------------------------

    /// The same polygon at a new position.
    pub fn with_position(&self, position: Vector) -> Self {
        if self.position == position {
            return self.clone();
        }
        Self::from_local_edges(position, self.local_edges.clone())
    }

    /// The same polygon moved by `offset`.
    pub fn translate(&self, offset: Vector) -> Self {
        self.with_position(self.position.add(offset))
    }

    /// Set the active flag of every local edge that runs exactly from
    /// `start` to `end` (local coordinates, no tolerance).
    pub fn with_edge_active(&self, start: Vector, end: Vector, active: bool) -> Self {
        let local_edges = self
            .local_edges
            .iter()
            .map(|edge| {
                if edge.start == start && edge.end == end {
                    edge.with_active(active)
                } else {
                    *edge
                }
            })
            .collect();
        Self::from_local_edges(self.position, local_edges)
    }

    /// Move the position by the transform's translation and apply its
    /// scale and rotation to the local template.
    pub fn transform(&self, t: &Transform) -> Self {
        let position = self.position.transform(&t.translation());
        let linear = t.linear();
        let local_edges = self.local_edges.iter().map(|edge| edge.transform(&linear)).collect();
        Self::from_local_edges(position, local_edges)
    }

    /// Scale the template about `position`.
    pub fn scale(&self, c: f64) -> Self {
        self.transform(&Transform::new(0.0, 0.0, c, 0.0))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Signed area by the shoelace formula.
    ///
    /// Positive for counter-clockwise winding, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self
            .edges
            .iter()
            .map(|edge| edge.start.cross(edge.end))
            .sum();
        twice / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Rectangles are wound clockwise; use [`Polygon::reversed`] before
    /// clipping against one.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// The same ring walked the other way. Active flags follow their edge.
    pub fn reversed(&self) -> Self {
        let local_edges = self
            .local_edges
            .iter()
            .rev()
            .map(|edge| Edge {
                start: edge.end,
                end: edge.start,
                active: edge.active,
            })
            .collect();
        Self::from_local_edges(self.position, local_edges)
    }

    /// Point-in-polygon by the even-odd rule.
    ///
    /// Every edge is counted, active or not.
    pub fn contains_vector(&self, v: Vector) -> bool {
        let crossings: usize = self.edges.iter().map(|edge| edge.ray_count(v)).sum();
        crossings % 2 == 1
    }

    /// SAT overlap test.
    ///
    /// Returns the minimum translation that separates the two polygons,
    /// with the normal pointing from `self` toward `other`, or
    /// [`Contact::NONE`] if they are disjoint or only touching.
    ///
    /// Comparisons are exact, so for rotated or scaled shapes moving
    /// `other` by [`Contact::translation`] can leave a residual depth of a
    /// few ulps instead of exactly `NONE`.
    pub fn intersects(&self, other: &Polygon) -> Contact {
        sat::minimum_translation(&self.hull(), &other.hull())
    }

    /// How far `other` sticks out of `self`.
    ///
    /// [`Contact::NONE`] when every vertex of `other` is inside `self`.
    /// Otherwise the normal points back inward (away from `other`'s
    /// centre) and the depth is the distance `other` must travel along it
    /// to fit.
    pub fn contains_polygon(&self, other: &Polygon) -> Contact {
        if other.vertices().all(|v| self.contains_vector(v)) {
            return Contact::NONE;
        }
        sat::containment_depth(&self.hull(), &other.hull())
    }

    /// Weld two polygons along every wall they share.
    ///
    /// Each pair of exactly opposite planes marks a shared boundary edge;
    /// both source edges are deactivated, so that wall no longer blocks
    /// SAT between tiles placed side by side.
    pub fn join(&self, other: &Polygon) -> (Polygon, Polygon) {
        let mut self_welds = Vec::new();
        let mut other_welds = Vec::new();

        for (i, p) in self.active_planes() {
            for (j, q) in other.active_planes() {
                if p.is_opposite(q) {
                    trace!("welding edge {} to edge {}", i, j);
                    self_welds.push(i);
                    other_welds.push(j);
                }
            }
        }

        debug!("join welded {} shared wall(s)", self_welds.len());
        (self.deactivate(&self_welds), other.deactivate(&other_welds))
    }

    /// `(edge index, plane)` for every active edge.
    fn active_planes(&self) -> impl Iterator<Item = (usize, &Plane)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.active)
            .map(|(i, _)| i)
            .zip(self.planes.iter())
    }

    fn deactivate(&self, indices: &[usize]) -> Polygon {
        let local_edges = self
            .local_edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                if indices.contains(&i) {
                    edge.with_active(false)
                } else {
                    *edge
                }
            })
            .collect();
        Self::from_local_edges(self.position, local_edges)
    }

    /// Sutherland–Hodgman clip of `self` against `clip`.
    ///
    /// `clip` must be convex and counter-clockwise. The result keeps
    /// `self`'s position; it has no vertices when the shapes do not
    /// overlap. Parallel subject/clip edges are never intersected because
    /// they cannot straddle the clip line.
    pub fn clip(&self, clip: &Polygon) -> Polygon {
        let mut subject = self.clone();

        for clip_edge in clip.edges() {
            let mut vertices = Vec::with_capacity(subject.edges.len() + 1);

            for edge in subject.edges() {
                let start = clip_edge.contains_vector(edge.start);
                let end = clip_edge.contains_vector(edge.end);

                match (start, end) {
                    (true, true) => vertices.push(edge.end),
                    (false, true) => {
                        vertices.push(edge.intersect(clip_edge));
                        vertices.push(edge.end);
                    }
                    (true, false) => vertices.push(edge.intersect(clip_edge)),
                    (false, false) => {}
                }
            }

            if vertices.is_empty() {
                trace!("clip round left no vertices");
            }

            let local: Vec<Vector> = vertices
                .into_iter()
                .map(|v| v.subtract(self.position))
                .collect();
            subject = Polygon::new(self.position, &local);
        }

        subject
    }
}

// ============================================================================
// TESTS
// ============================================================================
