//! SVG parsing - extract polygons from SVG files.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, shapes to paths)
//! then walks the tree to extract path data as polygons. The first subpath of
//! a path is the outer ring; every later subpath becomes a hole, so shapes
//! drawn with `fill-rule="evenodd"` cut-outs keep them.
//!
//! ## Curve Flattening
//!
//! SVG paths contain Bézier curves. The distance evaluator only understands
//! straight edges, so curves are flattened with lyon_geom first.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use usvg::tiny_skia_path::PathSegment;

use crate::error::SvgError;
use crate::geometry::{Point, Polygon};

/// Tolerance for curve flattening, in user units.
const CURVE_TOLERANCE: f32 = 0.1;

/// Extract all polygons from an SVG document.
pub fn extract_polygons_from_svg(svg_content: &str) -> Result<Vec<Polygon>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut polygons = Vec::new();
    extract_from_group(tree.root(), &mut polygons);

    if polygons.is_empty() {
        Err(SvgError::NoPolygons)
    } else {
        log::debug!("extracted {} polygons from SVG", polygons.len());
        Ok(polygons)
    }
}

fn extract_from_group(group: &usvg::Group, polygons: &mut Vec<Polygon>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, polygons),
            usvg::Node::Path(path) => {
                if let Some(polygon) = path_to_polygon(path) {
                    polygons.push(polygon);
                }
            }
            // Text, images, etc. carry no rings
            _ => {}
        }
    }
}

/// Convert a usvg path to a polygon in document coordinates.
fn path_to_polygon(path: &usvg::Path) -> Option<Polygon> {
    let data = path.data().clone().transform(path.abs_transform())?;

    let mut rings: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut last_point: Option<(f32, f32)> = None;

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if !current.is_empty() {
                    rings.push(std::mem::take(&mut current));
                }
                current.push(Point::new(p.x as f64, p.y as f64));
                last_point = Some((p.x, p.y));
            }
            PathSegment::LineTo(p) => {
                current.push(Point::new(p.x as f64, p.y as f64));
                last_point = Some((p.x, p.y));
            }
            PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |line| {
                        current.push(Point::new(line.to.x as f64, line.to.y as f64));
                    });
                } else {
                    current.push(Point::new(p.x as f64, p.y as f64));
                }
                last_point = Some((p.x, p.y));
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |line| {
                        current.push(Point::new(line.to.x as f64, line.to.y as f64));
                    });
                } else {
                    current.push(Point::new(p.x as f64, p.y as f64));
                }
                last_point = Some((p.x, p.y));
            }
            PathSegment::Close => {}
        }
    }
    if !current.is_empty() {
        rings.push(current);
    }

    // Rings are closed implicitly, so drop near-duplicate neighbours and a
    // repeated closing vertex; rings that collapse below 3 points go.
    let mut rings = rings.into_iter().filter_map(|mut ring| {
        ring.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
        if ring.len() > 1 {
            let (first, last) = (ring[0], ring[ring.len() - 1]);
            if (first.x - last.x).abs() < 1e-6 && (first.y - last.y).abs() < 1e-6 {
                ring.pop();
            }
        }
        (ring.len() >= 3).then_some(ring)
    });

    let outer = rings.next()?;
    let id = (!path.id().is_empty()).then(|| path.id().to_string());
    Some(Polygon {
        outer,
        holes: rings.collect(),
        id,
    })
}
