//! Point-to-boundary distance.
//!
//! This is the HOT PATH: every cell the search constructs calls
//! [`signed_distance`] once, and it walks every edge of every ring. Keep it
//! allocation-free.

use crate::geometry::{Point, Polygon};

/// Squared distance from `p` to the segment `[a, b]`.
///
/// Projects `p` onto the line through `a` and `b`, clamps the projection to
/// the segment, and measures to the clamped point. A zero-length segment is
/// treated as the single point `a`.
#[inline]
pub fn segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let mut x = a.x;
    let mut y = a.y;
    let dx = b.x - x;
    let dy = b.y - y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p.x - x) * dx + (p.y - y) * dy) / (dx * dx + dy * dy);

        if t > 1.0 {
            x = b.x;
            y = b.y;
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    let dx = p.x - x;
    let dy = p.y - y;
    dx * dx + dy * dy
}

// ============================================================================
// SIGNED DISTANCE (Ray Casting + Nearest Edge)
// ============================================================================
//
// ## Rust Lesson #8: References & Slices
//
// `polygon.rings()` hands out `&[Point]` slices - borrowed views into each
// ring's Vec. Nothing is copied; we only look at the vertices.

/// Signed distance from `p` to the polygon boundary.
///
/// Positive iff `p` is inside under even-odd parity across all rings;
/// the magnitude is the Euclidean distance to the nearest edge. Expects a
/// polygon that passed [`Polygon::validate`].
pub fn signed_distance(p: Point, polygon: &Polygon) -> f64 {
    let mut inside = false;
    let mut min_dist_sq = f64::INFINITY;

    for ring in polygon.rings() {
        let n = ring.len();
        if n == 0 {
            continue;
        }
        let mut j = n - 1;

        for i in 0..n {
            let a = ring[i];
            let b = ring[j];

            // Ray casting: does the rightward ray from p cross edge (a, b)?
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }

            min_dist_sq = min_dist_sq.min(segment_distance_sq(p, a, b));
            j = i;
        }
    }

    let sign = if inside { 1.0 } else { -1.0 };
    sign * min_dist_sq.sqrt()
}

/// Test if a point is inside the polygon (outer ring minus holes).
#[inline]
pub fn point_in_polygon(p: Point, polygon: &Polygon) -> bool {
    signed_distance(p, polygon) > 0.0
}
