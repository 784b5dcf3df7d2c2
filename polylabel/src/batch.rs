//! Labelling many polygons at once.
//!
//! Each polygon gets its own independent search, so a batch parallelises
//! trivially across polygons. The combined extent comes back as part of the
//! result rather than living in shared state.

use rayon::prelude::*;

use crate::error::LabelError;
use crate::geometry::{Extent, Polygon};
use crate::search::{Label, LabelOptions, find_label};

/// Labels for a batch of polygons, in input order.
#[derive(Debug, Clone)]
pub struct BatchLabels {
    pub labels: Vec<Result<Label, LabelError>>,
    /// Extent of every ring of every polygon, `None` for an empty batch
    pub extent: Option<Extent>,
}

impl BatchLabels {
    /// Number of polygons that produced a label.
    pub fn labelled(&self) -> usize {
        self.labels.iter().filter(|r| r.is_ok()).count()
    }
}

/// Label every polygon. Runs on the rayon pool when `options.parallel` is
/// set; results keep the input order either way.
pub fn label_all(polygons: &[Polygon], options: &LabelOptions) -> BatchLabels {
    let label_one = |(index, polygon): (usize, &Polygon)| {
        let result = find_label(polygon, options);
        if let Err(e) = &result {
            let id = polygon.id.as_deref().unwrap_or("unnamed");
            log::warn!("skipping polygon {} ({}): {}", index, id, e);
        }
        result
    };

    let labels: Vec<_> = if options.parallel {
        polygons.par_iter().enumerate().map(label_one).collect()
    } else {
        polygons.iter().enumerate().map(label_one).collect()
    };

    let extent = polygons
        .iter()
        .filter_map(Polygon::extent_all)
        .reduce(|a, b| a.union(&b));

    BatchLabels { labels, extent }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn extent(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Extent {
        Extent {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Polygon::from_rings(&[&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)]])
    }

    #[test]
    fn keeps_order_and_reports_failures() {
        let polygons = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            Polygon::from_rings(&[&[(0.0, 0.0), (1.0, 0.0)]]),
            rect(100.0, 50.0, 4.0, 4.0),
        ];
        let batch = label_all(&polygons, &LabelOptions::with_precision(0.1));

        assert_eq!(batch.labels.len(), 3);
        assert_eq!(batch.labelled(), 2);
        assert_eq!(batch.labels[0].as_ref().unwrap().point, Point::new(5.0, 5.0));
        assert!(matches!(batch.labels[1], Err(LabelError::TooFewPoints { ring: 0, count: 2 })));
        assert_eq!(batch.labels[2].as_ref().unwrap().point, Point::new(102.0, 52.0));
    }

    #[test]
    fn parallel_matches_sequential() {
        let polygons: Vec<Polygon> = (0..16)
            .map(|i| rect(i as f64 * 20.0, 0.0, 5.0 + i as f64, 12.0))
            .collect();
        let sequential = label_all(&polygons, &LabelOptions::with_precision(0.05));
        let options = LabelOptions {
            parallel: true,
            ..LabelOptions::with_precision(0.05)
        };
        let parallel = label_all(&polygons, &options);
        assert_eq!(sequential.labels, parallel.labels);
    }

    #[test]
    fn extent_is_per_batch() {
        let first = label_all(&[rect(0.0, 0.0, 10.0, 10.0)], &LabelOptions::default());
        let second = label_all(&[rect(50.0, 50.0, 1.0, 1.0)], &LabelOptions::default());

        assert_eq!(first.extent, Some(extent(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(second.extent, Some(extent(50.0, 50.0, 51.0, 51.0)));
        assert_eq!(label_all(&[], &LabelOptions::default()).extent, None);
    }
}
