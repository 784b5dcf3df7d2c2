//! CLI command implementations.
//!
//! - `label` - Find label points for every polygon in an SVG
//! - `probe` - Print the signed distance from a point to each polygon

pub mod common;
pub mod config;
pub mod label;
pub mod probe;

pub use label::cmd_label;
pub use probe::cmd_probe;
