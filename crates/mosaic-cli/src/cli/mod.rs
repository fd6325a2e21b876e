//! CLI command implementations.
//!
//! - `check` - Pairwise intersection and containment report for a scene
//! - `clip` - Clip one scene polygon against another
//! - `render` - Draw a scene to SVG or PNG
//! - `benchmark` - Time the collision queries on random polygons

pub mod benchmark;
pub mod check;
pub mod clip;
pub mod common;
pub mod render;
pub mod scene;
pub mod svg;

pub use benchmark::cmd_benchmark;
pub use check::cmd_check;
pub use clip::cmd_clip;
pub use render::cmd_render;
