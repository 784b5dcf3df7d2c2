//! # polylabel
//!
//! Finds the pole of inaccessibility of a polygon: the interior point
//! farthest from any edge, which makes a stable anchor for a region's label.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod batch;
pub mod cell;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod search;
pub mod seed;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use batch::{BatchLabels, label_all};
pub use cell::Cell;
pub use distance::{point_in_polygon, segment_distance_sq, signed_distance};
pub use error::{LabelError, SvgError};
pub use geometry::{Extent, Point, Polygon};
pub use search::{
    DEFAULT_PRECISION, Label, LabelOptions, SearchObserver, find_label, find_label_observed,
    pole_of_inaccessibility,
};
pub use svg::extract_polygons_from_svg;
