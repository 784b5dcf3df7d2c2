//! Pole of inaccessibility search.
//!
//! Quadtree refinement driven by a priority queue: the cell with the highest
//! potential (`max`) is always expanded next, and cells that cannot beat the
//! current best by more than `precision` are dropped without splitting.
//!
//! ## Rust Lesson #14: Loops Instead of Recursion
//!
//! Subdivision could be written recursively, but small precisions make the
//! tree deep. An explicit `BinaryHeap` frontier keeps the stack flat no
//! matter how far we refine.

use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use log::Level;

use crate::cell::Cell;
use crate::distance::signed_distance;
use crate::error::LabelError;
use crate::geometry::{Point, Polygon};
use crate::seed::{Seeding, seed};

/// Default tolerance, in the polygon's coordinate units.
pub const DEFAULT_PRECISION: f64 = 1.0;

/// Settings for a label search.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOptions {
    /// Maximum gap between the returned distance and the true optimum
    pub precision: f64,
    /// Log search progress at `debug` instead of `trace`
    pub debug: bool,
    /// Label batches on the rayon thread pool
    pub parallel: bool,
    /// Stop refining after this long and return the best so far
    pub deadline: Option<Duration>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            debug: false,
            parallel: false,
            deadline: None,
        }
    }
}

impl LabelOptions {
    pub fn with_precision(precision: f64) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    fn log_level(&self) -> Level {
        if self.debug {
            Level::Debug
        } else {
            Level::Trace
        }
    }
}

/// Result of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    /// Where to anchor the label
    pub point: Point,
    /// Signed boundary distance at `point`
    pub distance: f64,
    /// Number of grid and subdivision cells constructed
    pub probes: usize,
    /// Number of times the best candidate was replaced
    pub improvements: usize,
    /// False if the deadline cut refinement short
    pub completed: bool,
}

/// Hook for watching a search as it runs.
///
/// Purely observational: nothing an observer does can change the result.
pub trait SearchObserver {
    /// A cell beat the previous best.
    fn on_improvement(&mut self, _best: &Cell, _probes: usize) {}

    /// The search finished (or hit its deadline).
    fn on_finish(&mut self, _label: &Label) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Find the interior point farthest from the polygon's boundary.
///
/// Returns a point whose boundary distance is within `precision` of the best
/// achievable. With `debug` set, progress is logged at `debug` level.
///
/// # Example
/// ```
/// use polylabel::{Polygon, pole_of_inaccessibility};
///
/// let square = Polygon::from_rings(&[&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]]);
/// let p = pole_of_inaccessibility(&square, 0.1, false).unwrap();
/// assert!((p.x - 5.0).abs() < 0.1 && (p.y - 5.0).abs() < 0.1);
/// ```
pub fn pole_of_inaccessibility(
    polygon: &Polygon,
    precision: f64,
    debug: bool,
) -> Result<Point, LabelError> {
    let options = LabelOptions {
        precision,
        debug,
        ..LabelOptions::default()
    };
    find_label(polygon, &options).map(|label| label.point)
}

/// Run the search and return the full [`Label`].
pub fn find_label(polygon: &Polygon, options: &LabelOptions) -> Result<Label, LabelError> {
    find_label_observed(polygon, options, &mut NoopObserver)
}

/// Run the search, reporting progress to `observer`.
pub fn find_label_observed(
    polygon: &Polygon,
    options: &LabelOptions,
    observer: &mut dyn SearchObserver,
) -> Result<Label, LabelError> {
    if !options.precision.is_finite() || options.precision <= 0.0 {
        return Err(LabelError::InvalidPrecision(options.precision));
    }
    polygon.validate()?;

    let level = options.log_level();
    let started = Instant::now();

    let (tiles, mut best) = match seed(polygon).ok_or(LabelError::EmptyPolygon)? {
        Seeding::Degenerate(extent) => {
            let point = extent.min_corner();
            let label = Label {
                point,
                distance: signed_distance(point, polygon),
                probes: 0,
                improvements: 0,
                completed: true,
            };
            log::log!(level, "degenerate bounding box, using corner ({}, {})", point.x, point.y);
            observer.on_finish(&label);
            return Ok(label);
        }
        Seeding::Grid { tiles, best } => (tiles, best),
    };

    let mut probes = tiles.len();
    let mut improvements = 0;
    let mut completed = true;
    let mut frontier: BinaryHeap<Cell> = tiles.into();

    log::log!(level, "seeded {} cells, initial best {:.4}", probes, best.d);

    while let Some(cell) = frontier.pop() {
        if cell.d > best.d {
            best = cell;
            improvements += 1;
            log::log!(level, "found best {:.4} after {} probes", cell.d, probes);
            observer.on_improvement(&best, probes);
        }

        if let Some(limit) = options.deadline {
            if started.elapsed() >= limit {
                log::log!(level, "deadline reached with {} cells pending", frontier.len());
                completed = false;
                break;
            }
        }

        if cell.max - best.d <= options.precision {
            continue;
        }

        frontier.extend(cell.split(polygon));
        probes += 4;
    }

    let label = Label {
        point: best.center(),
        distance: best.d,
        probes,
        improvements,
        completed,
    };

    log::log!(level, "num probes: {}", probes);
    log::log!(level, "best distance: {}", best.d);
    observer.on_finish(&label);

    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::SQRT_2;
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};

    /// Global logger that keeps every record, tagged with the emitting thread
    /// so parallel tests only see their own output.
    struct CaptureLogger {
        records: Mutex<Vec<(ThreadId, Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            let entry = (thread::current().id(), record.level(), record.args().to_string());
            self.records.lock().unwrap().push(entry);
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };
    static LOGGER_INIT: Once = Once::new();

    /// Run `f` and return the log records it emitted on this thread.
    fn capture_logs(f: impl FnOnce()) -> Vec<(Level, String)> {
        LOGGER_INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
        f();

        let me = thread::current().id();
        let mut records = LOGGER.records.lock().unwrap();
        let (mine, others): (Vec<_>, Vec<_>) = records.drain(..).partition(|r| r.0 == me);
        *records = others;
        mine.into_iter().map(|(_, level, msg)| (level, msg)).collect()
    }

    fn square() -> Polygon {
        Polygon::from_rings(&[&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]])
    }

    fn l_shape() -> Polygon {
        Polygon::from_rings(&[&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (4.0, 4.0),
            (4.0, 10.0),
            (0.0, 10.0),
        ]])
    }

    /// Best signed distance over a fine grid of sample points.
    fn brute_force_best(polygon: &Polygon, step: f64) -> f64 {
        let extent = polygon.bounding_box().unwrap();
        let mut best = f64::NEG_INFINITY;
        let mut x = extent.min_x;
        while x <= extent.max_x {
            let mut y = extent.min_y;
            while y <= extent.max_y {
                best = best.max(signed_distance(Point::new(x, y), polygon));
                y += step;
            }
            x += step;
        }
        best
    }

    #[derive(Default)]
    struct Recorder {
        distances: Vec<f64>,
        finished: Option<Label>,
    }

    impl SearchObserver for Recorder {
        fn on_improvement(&mut self, best: &Cell, _probes: usize) {
            self.distances.push(best.d);
        }

        fn on_finish(&mut self, label: &Label) {
            self.finished = Some(*label);
        }
    }

    #[test]
    fn square_converges_to_center() {
        let label = find_label(&square(), &LabelOptions::with_precision(0.1)).unwrap();
        assert!(label.point.distance(Point::new(5.0, 5.0)) <= 0.1, "got {:?}", label.point);
        assert_abs_diff_eq!(label.distance, 5.0, epsilon = 0.1);
        assert!(label.completed);
    }

    #[test]
    fn public_operation_matches_find_label() {
        let p = pole_of_inaccessibility(&square(), 0.1, true).unwrap();
        let label = find_label(&square(), &LabelOptions::with_precision(0.1)).unwrap();
        assert_eq!(p, label.point);
    }

    #[test]
    fn l_shape_beats_box_center() {
        let poly = l_shape();
        let label = find_label(&poly, &LabelOptions::with_precision(0.01)).unwrap();

        let center_d = signed_distance(Point::new(5.0, 5.0), &poly);
        assert!(label.distance > center_d, "{} <= {}", label.distance, center_d);
        let in_arm = label.point.x < 4.0 || label.point.y < 4.0;
        assert!(in_arm, "label {:?} not in an arm", label.point);
        assert!(label.distance > 1.5);
    }

    #[test]
    fn result_is_within_precision_of_brute_force() {
        let shapes = [
            square(),
            l_shape(),
            Polygon::from_rings(&[&[(0.0, 0.0), (12.0, 0.0), (3.0, 9.0)]]),
            Polygon::from_rings(&[&[
                (0.0, 0.0),
                (8.0, 2.0),
                (14.0, 0.0),
                (12.0, 7.0),
                (14.0, 12.0),
                (6.0, 10.0),
                (1.0, 12.0),
            ]]),
        ];
        let precision = 0.05;
        for poly in &shapes {
            let label = find_label(poly, &LabelOptions::with_precision(precision)).unwrap();
            let reference = brute_force_best(poly, 0.05);
            assert!(
                label.distance >= reference - precision - 1e-9,
                "{} is not within {} of {}",
                label.distance,
                precision,
                reference
            );
            assert_abs_diff_eq!(signed_distance(label.point, poly), label.distance);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let poly = l_shape();
        let options = LabelOptions::with_precision(0.05);
        let a = find_label(&poly, &options).unwrap();
        let b = find_label(&poly, &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn collapsed_triangle_returns_its_point() {
        let poly = Polygon::from_rings(&[&[(7.0, 3.0), (7.0, 3.0), (7.0, 3.0)]]);
        let label = find_label(&poly, &LabelOptions::default()).unwrap();
        assert_eq!(label.point, Point::new(7.0, 3.0));
        assert_abs_diff_eq!(label.distance, 0.0);
        assert_eq!(label.probes, 0);
    }

    #[test]
    fn new_best_distances_strictly_increase() {
        let mut recorder = Recorder::default();
        let options = LabelOptions::with_precision(0.01);
        let label = find_label_observed(&l_shape(), &options, &mut recorder).unwrap();

        assert_eq!(recorder.distances.len(), label.improvements);
        assert!(recorder.distances.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(recorder.finished, Some(label));
    }

    #[test]
    fn debug_flag_logs_progress_at_debug_level() {
        let logs = capture_logs(|| {
            pole_of_inaccessibility(&l_shape(), 0.01, true).unwrap();
        });
        let at_debug = |needle: &str| {
            logs.iter()
                .any(|(level, msg)| *level == Level::Debug && msg.contains(needle))
        };
        assert!(at_debug("seeded"), "logs: {:?}", logs);
        assert!(at_debug("found best"), "logs: {:?}", logs);
        assert!(at_debug("num probes"), "logs: {:?}", logs);
        assert!(at_debug("best distance"), "logs: {:?}", logs);
        assert!(logs.iter().all(|(level, _)| *level == Level::Debug));
    }

    #[test]
    fn progress_stays_at_trace_without_debug() {
        let logs = capture_logs(|| {
            pole_of_inaccessibility(&l_shape(), 0.01, false).unwrap();
        });
        assert!(!logs.is_empty());
        assert!(logs.iter().all(|(level, _)| *level == Level::Trace), "logs: {:?}", logs);
        assert!(logs.iter().any(|(_, msg)| msg.contains("found best")));
    }

    #[test]
    fn label_avoids_hole() {
        let poly = Polygon::from_rings(&[
            &[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0)],
            &[(6.0, 6.0), (14.0, 6.0), (14.0, 14.0), (6.0, 14.0)],
        ]);
        let label = find_label(&poly, &LabelOptions::with_precision(0.1)).unwrap();
        // Best spot is in a corner of the frame, balanced between the two
        // outer edges and the nearest hole corner.
        let expected = 6.0 * SQRT_2 / (1.0 + SQRT_2);
        assert!(signed_distance(label.point, &poly) > 0.0);
        assert_abs_diff_eq!(label.distance, expected, epsilon = 0.1);
    }

    #[test]
    fn zero_deadline_returns_seed_best() {
        let options = LabelOptions {
            precision: 0.001,
            deadline: Some(Duration::ZERO),
            ..LabelOptions::default()
        };
        let label = find_label(&l_shape(), &options).unwrap();
        assert!(!label.completed);
        assert!(label.distance > 0.0);
        assert_abs_diff_eq!(signed_distance(label.point, &l_shape()), label.distance);
    }

    #[test]
    fn rejects_bad_input() {
        let short = Polygon::from_rings(&[&[(0.0, 0.0), (1.0, 1.0)]]);
        assert_eq!(
            find_label(&short, &LabelOptions::default()),
            Err(LabelError::TooFewPoints { ring: 0, count: 2 })
        );
        assert_eq!(
            pole_of_inaccessibility(&Polygon::new(vec![]), 1.0, false),
            Err(LabelError::EmptyPolygon)
        );
        assert_eq!(
            find_label(&square(), &LabelOptions::with_precision(0.0)),
            Err(LabelError::InvalidPrecision(0.0))
        );
        assert!(matches!(
            find_label(&square(), &LabelOptions::with_precision(f64::NAN)),
            Err(LabelError::InvalidPrecision(_))
        ));
    }
}
