//! Check command implementation.
//!
//! Runs every unordered pair of scene shapes through the matching
//! collision query and reports how they relate.

use std::path::Path;

use log::{info, warn};
use mosaic::{Circle, Contact, Polygon, Shape};
use serde::Serialize;

use super::common::{ContactReport, OutputFormat, to_json};
use super::scene::{Scene, as_polygon};

/// How shape `a` relates to shape `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Disjoint,
    Overlapping,
    /// `a` contains `b`.
    Contains,
    /// `b` contains `a`.
    Contained,
    /// No query exists for this pair of kinds (e.g. circle vs polygon).
    Unsupported,
}

impl Relation {
    fn label(&self) -> &'static str {
        match self {
            Relation::Disjoint => "disjoint",
            Relation::Overlapping => "overlapping",
            Relation::Contains => "contains",
            Relation::Contained => "contained",
            Relation::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    pub a: String,
    pub b: String,
    pub relation: Relation,
    /// Push-out from `a` toward `b`.
    pub contact: Option<ContactReport>,
    /// How far `b` sticks out of `a` (polygons only).
    pub containment: Option<ContactReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub shapes: usize,
    pub pairs: Vec<PairReport>,
}

impl CheckReport {
    pub fn colliding(&self) -> usize {
        self.pairs
            .iter()
            .filter(|p| !matches!(p.relation, Relation::Disjoint | Relation::Unsupported))
            .count()
    }
}

/// Execute the check command.
pub fn cmd_check(scene_path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let scene = Scene::load(scene_path)?;
    let report = check_scene(&scene);

    info!(
        "{} pairs checked, {} colliding",
        report.pairs.len(),
        report.colliding()
    );

    match format {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

pub fn check_scene(scene: &Scene) -> CheckReport {
    let mut pairs = Vec::new();

    for (i, a) in scene.shapes.iter().enumerate() {
        for b in &scene.shapes[i + 1..] {
            let mut report = check_pair(&a.shape, &b.shape);
            if report.relation == Relation::Unsupported {
                warn!(
                    "no query for {} vs {} ({} / {})",
                    a.id,
                    b.id,
                    a.shape.shape_type().name(),
                    b.shape.shape_type().name()
                );
            }
            report.a = a.id.clone();
            report.b = b.id.clone();
            pairs.push(report);
        }
    }

    CheckReport {
        shapes: scene.shapes.len(),
        pairs,
    }
}

fn check_pair(a: &Shape, b: &Shape) -> PairReport {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => check_circles(a, b),
        _ => match (as_polygon(a), as_polygon(b)) {
            (Some(a), Some(b)) => check_polygons(&a, &b),
            _ => pair(Relation::Unsupported, Contact::NONE, Contact::NONE),
        },
    }
}

fn check_circles(a: &Circle, b: &Circle) -> PairReport {
    let contact = a.intersects(b);
    let relation = if contact.is_none() {
        Relation::Disjoint
    } else if a.contains(b) {
        Relation::Contains
    } else if b.contains(a) {
        Relation::Contained
    } else {
        Relation::Overlapping
    };
    pair(relation, contact, Contact::NONE)
}

fn check_polygons(a: &Polygon, b: &Polygon) -> PairReport {
    let contact = a.intersects(b);
    if contact.is_none() {
        return pair(Relation::Disjoint, contact, Contact::NONE);
    }

    let containment = a.contains_polygon(b);
    let relation = if containment.is_none() {
        Relation::Contains
    } else if b.contains_polygon(a).is_none() {
        Relation::Contained
    } else {
        Relation::Overlapping
    };
    pair(relation, contact, containment)
}

fn pair(relation: Relation, contact: Contact, containment: Contact) -> PairReport {
    PairReport {
        a: String::new(),
        b: String::new(),
        relation,
        contact: ContactReport::from_contact(contact),
        containment: ContactReport::from_contact(containment),
    }
}

fn print_text(report: &CheckReport) {
    for p in &report.pairs {
        let mut line = format!("{} {} {}", p.a, p.relation.label(), p.b);
        if let Some(c) = &p.contact {
            line.push_str(&format!(
                "  push ({:.4}, {:.4}) x {:.4}",
                c.normal[0], c.normal[1], c.depth
            ));
        }
        if let Some(c) = &p.containment {
            line.push_str(&format!(
                "  escape ({:.4}, {:.4}) x {:.4}",
                c.normal[0], c.normal[1], c.depth
            ));
        }
        println!("{}", line);
    }
    println!(
        "{} shapes, {} pairs, {} colliding",
        report.shapes,
        report.pairs.len(),
        report.colliding()
    );
}
