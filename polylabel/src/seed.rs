//! Initial cells for the search: a grid over the outer ring's bounding box,
//! plus two point probes that set the first best candidate.

use crate::cell::Cell;
use crate::geometry::{Extent, Polygon, signed_area_of_points};

/// How the search should start for a given polygon.
#[derive(Debug, Clone)]
pub enum Seeding {
    /// Zero-width or zero-height bounding box. Nothing to search; the
    /// answer is the box's minimum corner.
    Degenerate(Extent),
    /// Grid tiles for the frontier, and the best of the point seeds.
    Grid { tiles: Vec<Cell>, best: Cell },
}

/// Seed the search for `polygon`. Expects a validated polygon.
pub fn seed(polygon: &Polygon) -> Option<Seeding> {
    let extent = polygon.bounding_box()?;
    let tiles = grid_cells(&extent, polygon);
    if tiles.is_empty() {
        return Some(Seeding::Degenerate(extent));
    }
    Some(Seeding::Grid {
        tiles,
        best: initial_best(&extent, polygon),
    })
}

/// Tile the extent with square cells whose side is the shorter box side.
///
/// Covers `[min_x, max_x) × [min_y, max_y)`. Returns no tiles when the box
/// has zero width or height. Tiles are placed by index, so the count is
/// fixed up front even when `cell_size` is below the float spacing of the
/// box's coordinates.
pub fn grid_cells(extent: &Extent, polygon: &Polygon) -> Vec<Cell> {
    let cell_size = extent.width().min(extent.height());
    if cell_size <= 0.0 || !cell_size.is_finite() {
        return Vec::new();
    }
    let h = cell_size / 2.0;
    let nx = (extent.width() / cell_size).ceil() as usize;
    let ny = (extent.height() / cell_size).ceil() as usize;

    let mut cells = Vec::with_capacity(nx * ny);
    for i in 0..nx {
        let x = extent.min_x + i as f64 * cell_size;
        for j in 0..ny {
            let y = extent.min_y + j as f64 * cell_size;
            cells.push(Cell::new(x + h, y + h, h, polygon));
        }
    }
    cells
}

/// Zero-radius cell at the area-weighted centroid of the outer ring.
///
/// Falls back to the first vertex when the ring's signed area is exactly
/// zero (collinear or coincident points).
pub fn centroid_cell(polygon: &Polygon) -> Cell {
    let points = &polygon.outer;
    let area = signed_area_of_points(points);
    if area == 0.0 {
        let first = points[0];
        return Cell::new(first.x, first.y, 0.0, polygon);
    }

    let n = points.len();
    let mut x = 0.0;
    let mut y = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let f = a.x * b.y - b.x * a.y;
        x += (a.x + b.x) * f;
        y += (a.y + b.y) * f;
    }

    let six_area = 6.0 * area;
    Cell::new(x / six_area, y / six_area, 0.0, polygon)
}

/// Zero-radius cell at the center of the bounding box.
pub fn box_center_cell(extent: &Extent, polygon: &Polygon) -> Cell {
    let c = extent.center();
    Cell::new(c.x, c.y, 0.0, polygon)
}

/// Whichever point seed lies deeper inside. The centroid wins ties.
pub fn initial_best(extent: &Extent, polygon: &Polygon) -> Cell {
    let centroid = centroid_cell(polygon);
    let center = box_center_cell(extent, polygon);
    if center.d > centroid.d {
        center
    } else {
        centroid
    }
}
