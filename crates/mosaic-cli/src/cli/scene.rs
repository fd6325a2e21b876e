//! Scene files: a list of named shapes plus optional welds.
//!
//! Scenes load from YAML (`.yaml`/`.yml`), JSON (`.json`) or SVG
//! (`.svg`). YAML and JSON share one serde model; SVG scenes become one
//! polygon per path.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use mosaic::{Circle, Polygon, Rectangle, Shape, Transform, Vector};
use serde::{Deserialize, Serialize};

use super::svg::{SvgError, extract_polygons_from_svg};

/// Errors from loading or building a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported scene format: {0} (use .yaml, .yml, .json or .svg)")]
    UnsupportedFormat(String),
    #[error("YAML scene error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON scene error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Svg(#[from] SvgError),
    #[error("duplicate shape id: {0}")]
    DuplicateId(String),
    #[error("unknown shape id: {0}")]
    UnknownId(String),
    #[error("invalid shape {id}: {reason}")]
    InvalidShape { id: String, reason: String },
    #[error("shape {0} is not a polygon or rectangle")]
    NotPolygonal(String),
}

// ============================================================================
// FILE MODEL
// ============================================================================

/// On-disk scene layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub shapes: Vec<ShapeSpec>,
    /// Pairs of polygon ids to weld along their shared walls.
    #[serde(default)]
    pub joins: Vec<[String; 2]>,
}

fn unit_scale() -> f64 {
    1.0
}

/// One shape as written in a scene file.
///
/// ## Rust Lesson #6: Internally tagged enums
///
/// `#[serde(tag = "kind")]` reads a `kind: circle` field to pick the
/// variant, so the file format stays flat and readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeSpec {
    Circle {
        #[serde(default)]
        id: Option<String>,
        position: [f64; 2],
        radius: f64,
    },
    Rectangle {
        #[serde(default)]
        id: Option<String>,
        position: [f64; 2],
        width: f64,
        height: f64,
        /// Degrees.
        #[serde(default)]
        angle: f64,
        #[serde(default = "unit_scale")]
        scale: f64,
    },
    Polygon {
        #[serde(default)]
        id: Option<String>,
        position: [f64; 2],
        /// Local vertices, counter-clockwise.
        vertices: Vec<[f64; 2]>,
        /// Indices of edges that do not take part in SAT.
        #[serde(default)]
        inactive_edges: Vec<usize>,
    },
}

impl ShapeSpec {
    fn id(&self) -> Option<&str> {
        match self {
            ShapeSpec::Circle { id, .. }
            | ShapeSpec::Rectangle { id, .. }
            | ShapeSpec::Polygon { id, .. } => id.as_deref(),
        }
    }

    /// Build the mosaic shape, validating sizes and edge indices.
    fn build(&self, id: &str) -> Result<Shape, SceneError> {
        let invalid = |reason: String| SceneError::InvalidShape { id: id.to_string(), reason };

        match self {
            ShapeSpec::Circle { position, radius, .. } => {
                if !(*radius > 0.0) {
                    return Err(invalid(format!("radius must be positive, got {}", radius)));
                }
                Ok(Circle::new(Vector::from(*position), *radius).into())
            }
            ShapeSpec::Rectangle { position, width, height, angle, scale, .. } => {
                if !(*width > 0.0 && *height > 0.0) {
                    return Err(invalid(format!("size must be positive, got {}x{}", width, height)));
                }
                let rectangle = Rectangle::new(Vector::from(*position), *width, *height)
                    .transform(&Transform::new(0.0, 0.0, *scale, *angle));
                Ok(rectangle.into())
            }
            ShapeSpec::Polygon { position, vertices, inactive_edges, .. } => {
                if vertices.len() < 3 {
                    return Err(invalid(format!("needs at least 3 vertices, got {}", vertices.len())));
                }
                let local: Vec<Vector> = vertices.iter().copied().map(Vector::from).collect();
                let mut polygon = Polygon::new(Vector::from(*position), &local);

                for &index in inactive_edges {
                    let Some(edge) = polygon.local_edges().get(index).copied() else {
                        return Err(invalid(format!(
                            "inactive edge {} out of range ({} edges)",
                            index,
                            local.len()
                        )));
                    };
                    polygon = polygon.with_edge_active(edge.start, edge.end, false);
                }
                Ok(polygon.into())
            }
        }
    }
}

// ============================================================================
// LOADED SCENE
// ============================================================================

/// A shape with the name it is reported under.
#[derive(Debug, Clone)]
pub struct SceneShape {
    pub id: String,
    pub shape: Shape,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub shapes: Vec<SceneShape>,
}

impl Scene {
    /// Load a scene, choosing the parser from the file extension.
    pub fn load(path: &Path) -> Result<Scene, SceneError> {
        let content = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let scene = match extension.as_str() {
            "yaml" | "yml" => Scene::from_file(serde_yaml::from_str(&content)?)?,
            "json" => Scene::from_file(serde_json::from_str(&content)?)?,
            "svg" => Scene::from_svg(&content)?,
            other => return Err(SceneError::UnsupportedFormat(other.to_string())),
        };

        info!("Loaded {} shapes from {}", scene.shapes.len(), path.display());
        Ok(scene)
    }

    /// Build shapes, assign ids and apply welds.
    pub fn from_file(file: SceneFile) -> Result<Scene, SceneError> {
        let mut seen = HashSet::new();
        let mut shapes = Vec::with_capacity(file.shapes.len());

        for (i, entry) in file.shapes.iter().enumerate() {
            let id = entry.id().map(str::to_string).unwrap_or_else(|| format!("shape-{}", i));
            if !seen.insert(id.clone()) {
                return Err(SceneError::DuplicateId(id));
            }
            let shape = entry.build(&id)?;
            shapes.push(SceneShape { id, shape });
        }

        let mut scene = Scene { shapes };
        for [a, b] in &file.joins {
            scene.join(a, b)?;
        }
        Ok(scene)
    }

    pub fn from_svg(content: &str) -> Result<Scene, SceneError> {
        let mut seen = HashSet::new();
        let mut shapes = Vec::new();

        for (i, svg_polygon) in extract_polygons_from_svg(content)?.into_iter().enumerate() {
            let id = svg_polygon.id.unwrap_or_else(|| format!("path-{}", i));
            if !seen.insert(id.clone()) {
                return Err(SceneError::DuplicateId(id));
            }
            shapes.push(SceneShape { id, shape: svg_polygon.polygon.into() });
        }

        Ok(Scene { shapes })
    }

    fn index_of(&self, id: &str) -> Result<usize, SceneError> {
        self.shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SceneError::UnknownId(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Result<&SceneShape, SceneError> {
        self.index_of(id).map(|i| &self.shapes[i])
    }

    /// Polygon view of a shape: rectangles convert, circles do not.
    pub fn polygon(&self, id: &str) -> Result<Polygon, SceneError> {
        as_polygon(&self.get(id)?.shape).ok_or_else(|| SceneError::NotPolygonal(id.to_string()))
    }

    /// Weld two polygonal shapes. Rectangles become polygons.
    fn join(&mut self, a: &str, b: &str) -> Result<(), SceneError> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        let (pa, pb) = (self.polygon(a)?, self.polygon(b)?);

        let (ja, jb) = pa.join(&pb);
        debug!(
            "joined {} and {}: {} -> {} and {} -> {} planes",
            a,
            b,
            pa.planes().len(),
            ja.planes().len(),
            pb.planes().len(),
            jb.planes().len()
        );

        self.shapes[ia].shape = ja.into();
        self.shapes[ib].shape = jb.into();
        Ok(())
    }
}

/// Polygon view of a shape, if it has one.
pub fn as_polygon(shape: &Shape) -> Option<Polygon> {
    match shape {
        Shape::Polygon(p) => Some(p.clone()),
        Shape::Rectangle(r) => Some(r.to_polygon()),
        Shape::Circle(_) | Shape::Triangle => None,
    }
}
