//! SVG scenes - extract collision polygons from SVG files.
//!
//! Uses usvg for complete SVG resolution (CSS, `<rect>`/`<circle>` to
//! paths, etc.) then walks the tree and turns each path into a mosaic
//! [`Polygon`].
//!
//! ## Curve Flattening
//!
//! Paths may contain Bézier curves. They are flattened into line segments
//! with lyon_geom before becoming polygon edges, so a `<circle>` becomes
//! a many-sided polygon rather than its four control points.

use log::debug;
use lyon_geom::{CubicBezierSegment, LineSegment, Point, QuadraticBezierSegment, point};
use mosaic::{Polygon, Vector};

/// Errors from loading an SVG scene.
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    ParseError(String),
    #[error("No polygons found in SVG")]
    NoPolygons,
}

/// A polygon pulled out of an SVG, with the element id if it had one.
#[derive(Debug, Clone)]
pub struct SvgPolygon {
    pub id: Option<String>,
    pub polygon: Polygon,
}

/// Tolerance for curve flattening, in SVG user units.
const CURVE_TOLERANCE: f32 = 0.1;

/// Extract every closed path in `svg_content` as a polygon.
///
/// Each polygon is positioned at the centre of its bounding box with local
/// vertices wound counter-clockwise.
pub fn extract_polygons_from_svg(svg_content: &str) -> Result<Vec<SvgPolygon>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut polygons = Vec::new();
    extract_from_group(tree.root(), &mut polygons);

    if polygons.is_empty() {
        Err(SvgError::NoPolygons)
    } else {
        debug!("extracted {} polygons from SVG", polygons.len());
        Ok(polygons)
    }
}

fn extract_from_group(group: &usvg::Group, polygons: &mut Vec<SvgPolygon>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, polygons),
            usvg::Node::Path(path) => {
                if let Some(polygon) = path_to_polygon(path) {
                    polygons.push(polygon);
                }
            }
            // Text, images, etc. have no collision geometry.
            _ => {}
        }
    }
}

/// A Bézier segment awaiting flattening.
enum Curve {
    Quad(QuadraticBezierSegment<f32>),
    Cubic(CubicBezierSegment<f32>),
}

fn to_vector(p: Point<f32>) -> Vector {
    Vector::new(p.x as f64, p.y as f64)
}

/// Append the flattened curve's vertices, excluding its start point.
fn flatten_into(points: &mut Vec<Vector>, curve: Curve) {
    let mut push = |line: &LineSegment<f32>| points.push(to_vector(line.to));
    match curve {
        Curve::Quad(c) => c.for_each_flattened(CURVE_TOLERANCE, &mut push),
        Curve::Cubic(c) => c.for_each_flattened(CURVE_TOLERANCE, &mut push),
    }
}

fn path_to_polygon(path: &usvg::Path) -> Option<SvgPolygon> {
    use usvg::tiny_skia_path::PathSegment;

    let mut points: Vec<Vector> = Vec::new();
    // Current pen position; curves flatten from here.
    let mut pen: Option<Point<f32>> = None;

    for segment in path.data().segments() {
        let end = match segment {
            // Only the first subpath becomes a polygon.
            PathSegment::MoveTo(_) if pen.is_some() => break,
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                let p = point(p.x, p.y);
                points.push(to_vector(p));
                p
            }
            PathSegment::QuadTo(ctrl, p) => {
                let to = point(p.x, p.y);
                match pen {
                    Some(from) => flatten_into(
                        &mut points,
                        Curve::Quad(QuadraticBezierSegment { from, ctrl: point(ctrl.x, ctrl.y), to }),
                    ),
                    None => points.push(to_vector(to)),
                }
                to
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                let to = point(p.x, p.y);
                match pen {
                    Some(from) => flatten_into(
                        &mut points,
                        Curve::Cubic(CubicBezierSegment {
                            from,
                            ctrl1: point(ctrl1.x, ctrl1.y),
                            ctrl2: point(ctrl2.x, ctrl2.y),
                            to,
                        }),
                    ),
                    None => points.push(to_vector(to)),
                }
                to
            }
            PathSegment::Close => continue,
        };
        pen = Some(end);
    }

    // Flattening and explicit closing both repeat points.
    points.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
    if points.len() >= 2 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if (first.x - last.x).abs() < 1e-6 && (first.y - last.y).abs() < 1e-6 {
            points.pop();
        }
    }

    if points.len() < 3 {
        return None;
    }

    let id = path.id();
    Some(SvgPolygon {
        id: if id.is_empty() { None } else { Some(id.to_string()) },
        polygon: centred_ccw_polygon(&points),
    })
}

/// Build a polygon centred on the bounding box of `points`, flipping the
/// ring if it arrives clockwise.
pub fn centred_ccw_polygon(points: &[Vector]) -> Polygon {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let centre = Vector::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    let local: Vec<Vector> = points.iter().map(|p| p.subtract(centre)).collect();
    let polygon = Polygon::new(centre, &local);
    if polygon.is_clockwise() {
        polygon.reversed()
    } else {
        polygon
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_rect() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect id="floor" x="10" y="10" width="80" height="40"/>
            </svg>
        "#;

        let polygons = extract_polygons_from_svg(svg).unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].id.as_deref(), Some("floor"));

        let polygon = &polygons[0].polygon;
        assert_eq!(polygon.edges().len(), 4);
        assert_eq!(polygon.position(), Vector::new(50.0, 30.0));
        assert!(!polygon.is_clockwise());
        assert!((polygon.area() - 3200.0).abs() < 1e-6);
    }

    #[test]
    fn no_polygons_error() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"></svg>"#;
        assert!(matches!(extract_polygons_from_svg(svg), Err(SvgError::NoPolygons)));
    }

    #[test]
    fn circle_is_flattened() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <circle cx="50" cy="50" r="40"/>
            </svg>
        "#;

        let polygons = extract_polygons_from_svg(svg).unwrap();
        let polygon = &polygons[0].polygon;
        assert!(polygon.edges().len() > 20, "got {} edges", polygon.edges().len());
        assert!(polygon.contains_vector(Vector::new(50.0, 50.0)));
        assert!(polygons[0].id.is_none());
    }

    #[test]
    fn quadratic_curve_is_flattened() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path id="arch" d="M0,0 Q50,100 100,0 Z"/>
            </svg>
        "#;

        let polygons = extract_polygons_from_svg(svg).unwrap();
        let polygon = &polygons[0].polygon;
        assert!(polygon.edges().len() > 3, "got {} edges", polygon.edges().len());
        // The arch peaks at y = 50, halfway to the control point.
        let max_y = polygon.edges().iter().map(|e| e.start.y).fold(f64::MIN, f64::max);
        assert!((max_y - 50.0).abs() < 0.5, "peak {}", max_y);
        assert!(!polygon.is_clockwise());
    }

    #[test]
    fn only_first_subpath_is_kept() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M0,0 L10,0 L10,10 Z M50,50 L60,50 L60,60 Z"/>
            </svg>
        "#;

        let polygons = extract_polygons_from_svg(svg).unwrap();
        let polygon = &polygons[0].polygon;
        assert_eq!(polygon.edges().len(), 3);
        assert!((polygon.area() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn clockwise_input_is_flipped() {
        let cw = [
            Vector::new(0.0, 0.0),
            Vector::new(0.0, 2.0),
            Vector::new(2.0, 2.0),
            Vector::new(2.0, 0.0),
        ];
        let polygon = centred_ccw_polygon(&cw);
        assert!(!polygon.is_clockwise());
        assert_eq!(polygon.position(), Vector::new(1.0, 1.0));
        assert_eq!(polygon.area(), 4.0);
    }
}
