//! Square probe regions used by the search.

use std::cmp::Ordering;
use std::f64::consts::SQRT_2;

use crate::distance::signed_distance;
use crate::geometry::{Point, Polygon};

/// A square cell with its center distance and an upper bound on the
/// distance reachable anywhere inside it.
///
/// Boundary distance is 1-Lipschitz, and no point of the cell is farther
/// than the half-diagonal `h * √2` from the center, so `max = d + h√2`
/// bounds every point in the cell.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    /// Half the side length (0 for a point probe)
    pub h: f64,
    /// Signed distance from the center to the boundary
    pub d: f64,
    /// Upper bound on `d` over the whole cell
    pub max: f64,
}

impl Cell {
    pub fn new(x: f64, y: f64, h: f64, polygon: &Polygon) -> Self {
        let d = signed_distance(Point::new(x, y), polygon);
        Self {
            x,
            y,
            h,
            d,
            max: d + h * SQRT_2,
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The four quadrant cells of half the size.
    pub fn split(&self, polygon: &Polygon) -> [Cell; 4] {
        let h = self.h / 2.0;
        [
            Cell::new(self.x - h, self.y - h, h, polygon),
            Cell::new(self.x + h, self.y - h, h, polygon),
            Cell::new(self.x - h, self.y + h, h, polygon),
            Cell::new(self.x + h, self.y + h, h, polygon),
        ]
    }
}

// ## Rust Lesson #12: Trait Impls for Ordering
//
// `BinaryHeap` needs `Ord`. f64 is only `PartialOrd` (NaN!), so we compare
// with `total_cmp`, which gives a total order over every f64. Cells compare
// by `max` alone; ties fall wherever the heap puts them.

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.max.total_cmp(&other.max) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.max.total_cmp(&other.max)
    }
}
