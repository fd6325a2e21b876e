//! Benchmark command implementation.
//!
//! Scatters random convex polygons over a square field and times the
//! all-pairs collision queries.

use std::f64::consts::TAU;
use std::time::Instant;

use log::info;
use mosaic::{Polygon, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::common::to_json;

#[derive(Debug, Clone, Copy)]
pub struct BenchmarkConfig {
    pub shapes: usize,
    pub vertices: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub calls: usize,
    pub total_ms: f64,
    pub avg_us: f64,
}

impl Timing {
    fn new(calls: usize, elapsed: std::time::Duration) -> Self {
        let total_ms = elapsed.as_secs_f64() * 1000.0;
        let avg_us = if calls == 0 { 0.0 } else { total_ms * 1000.0 / calls as f64 };
        Self { calls, total_ms, avg_us }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub timestamp: String,
    pub seed: Option<u64>,
    pub shapes: usize,
    pub vertices: usize,
    pub colliding_pairs: usize,
    pub intersects: Timing,
    pub contains_polygon: Timing,
    pub clip: Timing,
}

/// Execute the benchmark command.
pub fn cmd_benchmark(config: BenchmarkConfig, json: bool) -> anyhow::Result<()> {
    info!(
        "Generating {} polygons with {} vertices",
        config.shapes, config.vertices
    );
    let report = run_benchmark(config);

    if json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  MOSAIC BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Polygons: {} x {} vertices", report.shapes, report.vertices);
    if let Some(seed) = report.seed {
        println!("  Seed: {}", seed);
    }
    println!("  Colliding pairs: {}", report.colliding_pairs);
    for (name, timing) in [
        ("intersects", &report.intersects),
        ("contains_polygon", &report.contains_polygon),
        ("clip", &report.clip),
    ] {
        println!(
            "  {:<17} {:>8} calls  {:>9.2}ms  {:>8.3}us avg",
            name, timing.calls, timing.total_ms, timing.avg_us
        );
    }
    println!("═══════════════════════════════════════════════");
    Ok(())
}

pub fn run_benchmark(config: BenchmarkConfig) -> BenchmarkReport {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Field grows with the shape count so density stays roughly constant.
    let field = 40.0 * (config.shapes.max(1) as f64).sqrt();
    let polygons: Vec<Polygon> = (0..config.shapes)
        .map(|_| random_convex_polygon(&mut rng, config.vertices, field))
        .collect();

    let start = Instant::now();
    let mut pairs = Vec::new();
    let mut calls = 0;
    for (i, a) in polygons.iter().enumerate() {
        for b in &polygons[i + 1..] {
            calls += 1;
            if !a.intersects(b).is_none() {
                pairs.push((a, b));
            }
        }
    }
    let intersects = Timing::new(calls, start.elapsed());

    let start = Instant::now();
    for (a, b) in &pairs {
        std::hint::black_box(a.contains_polygon(b));
    }
    let contains_polygon = Timing::new(pairs.len(), start.elapsed());

    let start = Instant::now();
    for (a, b) in &pairs {
        std::hint::black_box(a.clip(b));
    }
    let clip = Timing::new(pairs.len(), start.elapsed());

    BenchmarkReport {
        timestamp: chrono::Local::now().to_rfc3339(),
        seed: config.seed,
        shapes: config.shapes,
        vertices: config.vertices,
        colliding_pairs: pairs.len(),
        intersects,
        contains_polygon,
        clip,
    }
}

/// A convex polygon with `n` vertices at sorted random angles on a
/// circle, so the ring is counter-clockwise.
pub fn random_convex_polygon(rng: &mut impl Rng, n: usize, field: f64) -> Polygon {
    let n = n.max(3);
    let radius = rng.random_range(5.0..20.0);

    let mut angles: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..TAU)).collect();
    angles.sort_by(f64::total_cmp);
    angles.dedup();

    let vertices: Vec<Vector> = angles
        .iter()
        .map(|a| Vector::new(radius * a.cos(), radius * a.sin()))
        .collect();

    let position = Vector::new(rng.random_range(0.0..field), rng.random_range(0.0..field));
    Polygon::new(position, &vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_polygons_are_ccw_and_sized() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let polygon = random_convex_polygon(&mut rng, 8, 100.0);
            assert_eq!(polygon.edges().len(), 8);
            assert!(!polygon.is_clockwise());
            assert!(polygon.area() > 0.0);
        }
    }

    #[test]
    fn seeded_runs_are_repeatable() {
        let config = BenchmarkConfig {
            shapes: 30,
            vertices: 6,
            seed: Some(42),
        };
        let first = run_benchmark(config);
        let second = run_benchmark(config);

        assert_eq!(first.colliding_pairs, second.colliding_pairs);
        assert_eq!(first.intersects.calls, 30 * 29 / 2);
        assert_eq!(first.contains_polygon.calls, first.colliding_pairs);
        assert_eq!(first.seed, Some(42));
    }

    #[test]
    fn zero_calls_average_is_zero() {
        let timing = Timing::new(0, std::time::Duration::from_millis(5));
        assert_eq!(timing.avg_us, 0.0);
        approx::assert_relative_eq!(timing.total_ms, 5.0);
    }
}
