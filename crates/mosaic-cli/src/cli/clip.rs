//! Clip command implementation.

use std::path::Path;

use log::{info, warn};
use mosaic::Polygon;
use serde::Serialize;

use super::common::{OutputFormat, point, to_json};
use super::scene::Scene;

#[derive(Debug, Clone, Serialize)]
pub struct ClipReport {
    pub subject: String,
    pub clip: String,
    /// World-space vertices of the clipped region.
    pub vertices: Vec<[f64; 2]>,
    pub area: f64,
}

/// Execute the clip command.
pub fn cmd_clip(
    scene_path: &Path,
    subject_id: &str,
    clip_id: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let scene = Scene::load(scene_path)?;
    let report = clip_scene(&scene, subject_id, clip_id)?;

    if report.vertices.is_empty() {
        warn!("{} and {} do not overlap", subject_id, clip_id);
    } else {
        info!(
            "clipped {} by {}: {} vertices",
            subject_id,
            clip_id,
            report.vertices.len()
        );
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Text => {
            for [x, y] in &report.vertices {
                println!("{:.6} {:.6}", x, y);
            }
            println!("area {:.6}", report.area);
        }
    }
    Ok(())
}

pub fn clip_scene(scene: &Scene, subject_id: &str, clip_id: &str) -> anyhow::Result<ClipReport> {
    let subject = scene.polygon(subject_id)?;
    let clip = counter_clockwise(scene.polygon(clip_id)?);

    let clipped = subject.clip(&clip);
    Ok(ClipReport {
        subject: subject_id.to_string(),
        clip: clip_id.to_string(),
        vertices: clipped.vertices().map(point).collect(),
        area: clipped.area(),
    })
}

/// The clipper needs a counter-clockwise ring; rectangles are built
/// clockwise.
fn counter_clockwise(polygon: Polygon) -> Polygon {
    if polygon.is_clockwise() {
        polygon.reversed()
    } else {
        polygon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::scene::SceneFile;
    use approx::assert_relative_eq;

    fn scene(yaml: &str) -> Scene {
        let file: SceneFile = serde_yaml::from_str(yaml).unwrap();
        Scene::from_file(file).unwrap()
    }

    #[test]
    fn clip_by_rectangle() {
        let scene = scene(
            r#"
shapes:
  - { kind: rectangle, id: window, position: [0, 0], width: 10, height: 10 }
  - kind: polygon
    id: tri
    position: [0, 0]
    vertices: [[0, 0], [8, 0], [0, 8]]
"#,
        );

        let report = clip_scene(&scene, "tri", "window").unwrap();
        // The square corner beyond the hypotenuse is cut away.
        assert_eq!(report.vertices.len(), 5);
        assert_relative_eq!(report.area, 23.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_clip_is_empty() {
        let scene = scene(
            r#"
shapes:
  - { kind: rectangle, id: a, position: [0, 0], width: 2, height: 2 }
  - { kind: rectangle, id: b, position: [10, 0], width: 2, height: 2 }
"#,
        );

        let report = clip_scene(&scene, "a", "b").unwrap();
        assert!(report.vertices.is_empty());
        assert_eq!(report.area, 0.0);
    }

    #[test]
    fn circles_cannot_be_clipped() {
        let scene = scene("shapes: [{ kind: circle, id: c, position: [0, 0], radius: 1 }, { kind: rectangle, id: r, position: [0, 0], width: 1, height: 1 }]");
        assert!(clip_scene(&scene, "c", "r").is_err());
        assert!(clip_scene(&scene, "r", "missing").is_err());
    }
}
