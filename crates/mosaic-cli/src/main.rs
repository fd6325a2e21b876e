//! mosaic - check, clip and render 2D collision scenes
//!
//! Usage:
//!   mosaic check <scene>                           Pairwise collision report
//!   mosaic clip <scene> --subject <id> --clip <id> Clip one polygon by another
//!   mosaic render <scene> [-o out.svg|out.png]     Draw a scene
//!   mosaic benchmark [--shapes N] [--seed S]       Time the collision queries
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for more detail.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod cli;

use cli::benchmark::BenchmarkConfig;
use cli::common::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "mosaic", version, about = "2D collision scenes: check, clip, render")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report how every pair of shapes in a scene relates
    Check {
        /// Scene file (.yaml, .yml, .json or .svg)
        scene: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Clip one polygon of a scene against another
    Clip {
        scene: PathBuf,
        /// Id of the polygon to cut
        #[arg(long)]
        subject: String,
        /// Id of the convex polygon to cut with
        #[arg(long)]
        clip: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Draw a scene as SVG (stdout or file) or PNG
    Render {
        scene: PathBuf,
        /// Output file; `.png` rasterizes, anything else is SVG
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pixels per scene unit for PNG output
        #[arg(long, default_value_t = 4.0)]
        scale: f64,
    },
    /// Time intersects, contains_polygon and clip on random polygons
    Benchmark {
        #[arg(long, default_value_t = 200)]
        shapes: usize,
        #[arg(long, default_value_t = 8)]
        vertices: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Commands::Check { scene, format } => cli::cmd_check(&scene, format)
            .with_context(|| format!("checking {}", scene.display())),
        Commands::Clip {
            scene,
            subject,
            clip,
            format,
        } => cli::cmd_clip(&scene, &subject, &clip, format)
            .with_context(|| format!("clipping {} by {} in {}", subject, clip, scene.display())),
        Commands::Render {
            scene,
            output,
            scale,
        } => {
            anyhow::ensure!(scale > 0.0, "--scale must be positive, got {}", scale);
            cli::cmd_render(&scene, output.as_deref(), scale)
                .with_context(|| format!("rendering {}", scene.display()))
        }
        Commands::Benchmark {
            shapes,
            vertices,
            seed,
            json,
        } => cli::cmd_benchmark(BenchmarkConfig { shapes, vertices, seed }, json),
    }
}
