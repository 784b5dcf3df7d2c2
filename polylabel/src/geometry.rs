//! Core geometry types for polylabel.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = duplicate the value (`Copy` only for small stack values)
//! - `PartialEq` = can compare with `==`
//!
//! `cfg_attr(feature = "serde", ...)` only adds the serde derives when the
//! `serde` feature is on, so the core math has no hard serde dependency.

use crate::error::LabelError;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned bounding box.
///
/// Returned per polygon (or per batch) instead of being accumulated
/// somewhere global, so every call stays independent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Extent of a point sequence, or `None` if it is empty.
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut extent = Extent {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in rest {
            extent.include_point(*p);
        }
        Some(extent)
    }

    /// Grow the extent to cover `p`.
    #[inline]
    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Smallest extent covering both.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    #[inline]
    pub fn min_corner(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }
}

/// A polygon with an outer boundary and optional holes.
///
/// ## Rust Lesson #4: Ownership & Vec
///
/// This struct OWNS its rings. Functions that only need to read them take
/// `&Polygon` or `&[Point]` (a borrowed slice) instead of copying.
///
/// Ring winding is not interpreted: inside/outside is decided by even-odd
/// parity across every ring, so holes may wind either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Outer boundary vertices, closed implicitly
    pub outer: Vec<Point>,
    /// Interior holes
    pub holes: Vec<Vec<Point>>,
    /// Optional ID from the source document
    pub id: Option<String>,
}

impl Polygon {
    /// Create a simple polygon with no holes.
    pub fn new(outer: Vec<Point>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
            id: None,
        }
    }

    /// Create a polygon with holes.
    pub fn with_holes(outer: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self {
            outer,
            holes,
            id: None,
        }
    }

    /// Create a polygon with an ID.
    pub fn with_id(outer: Vec<Point>, id: Option<String>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
            id,
        }
    }

    /// Build a polygon from `(x, y)` tuples. The first ring is the outer
    /// boundary, the rest are holes.
    pub fn from_rings(rings: &[&[(f64, f64)]]) -> Self {
        let mut rings = rings
            .iter()
            .map(|ring| ring.iter().map(|&(x, y)| Point::new(x, y)).collect::<Vec<_>>());
        let outer = rings.next().unwrap_or_default();
        Self::with_holes(outer, rings.collect())
    }

    /// Iterate over every ring, outer boundary first.
    pub fn rings(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Total number of vertices across all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings().map(<[Point]>::len).sum()
    }

    /// Check the preconditions of the label search: a non-empty outer ring
    /// and at least 3 points in every ring.
    pub fn validate(&self) -> Result<(), LabelError> {
        if self.outer.is_empty() {
            return Err(LabelError::EmptyPolygon);
        }
        for (ring, points) in self.rings().enumerate() {
            if points.len() < 3 {
                return Err(LabelError::TooFewPoints {
                    ring,
                    count: points.len(),
                });
            }
        }
        Ok(())
    }

    /// Bounding box of the outer ring. Holes never extend it.
    ///
    /// ## Rust Lesson #6: Option<T>
    ///
    /// No `null` in Rust: an empty ring has no extent, so we return `None`
    /// and the compiler forces callers to handle it.
    pub fn bounding_box(&self) -> Option<Extent> {
        Extent::of_points(&self.outer)
    }

    /// Bounding box of all rings.
    pub fn extent_all(&self) -> Option<Extent> {
        self.rings()
            .filter_map(Extent::of_points)
            .reduce(|a, b| a.union(&b))
    }
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// Returns:
/// - Positive value for counter-clockwise winding
/// - Negative value for clockwise winding
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}
