//! Error types for polylabel.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` writes the
//! `Display` and `std::error::Error` impls for us from the `#[error]`
//! attributes, so each variant reads like its message.

use thiserror::Error;

/// Input rejected before the label search starts. No partial result is
/// produced for any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    /// The polygon has no outer ring at all.
    #[error("polygon has no outer ring")]
    EmptyPolygon,

    /// A ring has fewer than 3 points (ring 0 is the outer boundary).
    #[error("ring {ring} has {count} points, need at least 3")]
    TooFewPoints { ring: usize, count: usize },

    /// Precision must be a finite value greater than zero.
    #[error("precision must be finite and positive, got {0}")]
    InvalidPrecision(f64),
}

/// Error type for SVG parsing.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    ParseError(String),

    #[error("No polygons found in SVG")]
    NoPolygons,
}
