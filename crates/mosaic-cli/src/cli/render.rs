//! Render command implementation.
//!
//! Draws a scene as SVG text; `.png` outputs go through resvg.
//! Active edges are solid, welded (inactive) edges are dashed.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;
use mosaic::{Circle, Edge, Shape, Vector};

use super::scene::{Scene, as_polygon};

/// Margin around the scene bounds, in scene units.
const PADDING: f64 = 10.0;
const STROKE_WIDTH: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("scene has no drawable shapes")]
    Empty,
    #[error("generated SVG did not parse: {0}")]
    Svg(String),
    #[error("could not create a {0}x{1} pixmap")]
    Pixmap(u32, u32),
    #[error("PNG encode failed: {0}")]
    Png(String),
}

/// Execute the render command.
///
/// Without an output path the SVG is written to stdout.
pub fn cmd_render(scene_path: &Path, output: Option<&Path>, scale: f64) -> anyhow::Result<()> {
    let scene = Scene::load(scene_path)?;
    let svg = scene_to_svg(&scene)?;

    let Some(output) = output else {
        print!("{}", svg);
        return Ok(());
    };

    let is_png = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));

    if is_png {
        let (width, height) = svg_to_png(&svg, output, scale)?;
        info!("Wrote: {} ({}x{})", output.display(), width, height);
    } else {
        fs::write(output, &svg).with_context(|| format!("writing {}", output.display()))?;
        info!("Wrote: {}", output.display());
    }
    Ok(())
}

/// `(min, max)` corners over every shape's bounds.
fn scene_bounds(scene: &Scene) -> Option<(Vector, Vector)> {
    let mut min = Vector::new(f64::INFINITY, f64::INFINITY);
    let mut max = Vector::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut any = false;

    for bounds in scene.shapes.iter().filter_map(|s| s.shape.bounds()) {
        for v in bounds.vertices() {
            min = Vector::new(min.x.min(v.x), min.y.min(v.y));
            max = Vector::new(max.x.max(v.x), max.y.max(v.y));
        }
        any = true;
    }

    any.then_some((min, max))
}

/// Build the SVG document for a scene.
pub fn scene_to_svg(scene: &Scene) -> Result<String, RenderError> {
    let (min, max) = scene_bounds(scene).ok_or(RenderError::Empty)?;
    let width = max.x - min.x + PADDING * 2.0;
    let height = max.y - min.y + PADDING * 2.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{:.2}" height="{:.2}" viewBox="{:.2} {:.2} {:.2} {:.2}">
<g stroke="black" stroke-width="{}" fill="none">
"#,
        width,
        height,
        min.x - PADDING,
        min.y - PADDING,
        width,
        height,
        STROKE_WIDTH
    ));

    for item in &scene.shapes {
        svg.push_str(&format!("<g id=\"{}\">\n", escape(&item.id)));
        match &item.shape {
            Shape::Circle(circle) => push_circle(&mut svg, circle),
            shape => {
                if let Some(polygon) = as_polygon(shape) {
                    for edge in polygon.edges() {
                        push_edge(&mut svg, edge);
                    }
                }
            }
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</g>\n</svg>\n");
    Ok(svg)
}

fn push_circle(svg: &mut String, circle: &Circle) {
    let p = circle.position();
    svg.push_str(&format!(
        "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>\n",
        p.x,
        p.y,
        circle.radius()
    ));
}

fn push_edge(svg: &mut String, edge: &Edge) {
    let style = if edge.active {
        ""
    } else {
        r##" stroke="#999999" stroke-dasharray="2 2""##
    };
    svg.push_str(&format!(
        "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"{}/>\n",
        edge.start.x, edge.start.y, edge.end.x, edge.end.y, style
    ));
}

fn escape(id: &str) -> String {
    id.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rasterize `svg` at `scale` pixels per unit. Returns the pixel size.
fn svg_to_png(svg: &str, path: &Path, scale: f64) -> Result<(u32, u32), RenderError> {
    use resvg::usvg;
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| RenderError::Svg(e.to_string()))?;

    let size = tree.size();
    let pixmap_width = (size.width() as f64 * scale).ceil() as u32;
    let pixmap_height = (size.height() as f64 * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)
        .ok_or(RenderError::Pixmap(pixmap_width, pixmap_height))?;

    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(path)
        .map_err(|e| RenderError::Png(e.to_string()))?;
    Ok((pixmap_width, pixmap_height))
}
