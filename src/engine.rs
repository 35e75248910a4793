//! One-pass k-means over named 2D points.
//!
//! # The Algorithm
//!
//! Classic Lloyd-style k-means, with one deliberate twist: each call to
//! [`KMeansEngine::cluster`] runs **exactly one** assign/update pass. There
//! is no convergence detection; the caller decides how many passes to run
//! by calling again.
//!
//! A pass consists of:
//!
//! 1. **Initial mean generation** (only when marked stale): `k` means are
//!    placed at uniform-random integer coordinates inside the half-open box
//!    `[min_x, max_x) × [min_y, max_y)` of the current point set, each with
//!    a distinct random light color so renderers can tell clusters apart.
//!    Means go stale whenever `k` changes or a new point set is loaded.
//! 2. **Assignment**: every point takes the nearest mean by Euclidean
//!    distance and adopts its color. Ties keep the mean evaluated first;
//!    with means in arbitrary order this is an accepted nondeterminism
//!    source, not special-cased further.
//! 3. **Update**: every mean moves to the integer-truncated average of the
//!    points assigned to it. A mean with zero assigned points keeps its
//!    position exactly.
//!
//! ## Edge behavior
//!
//! - Empty point set: no bounds exist, so mean generation is deferred (the
//!   stale flag stays set) and the pass is a no-op.
//! - Degenerate bounds (`max == min` on an axis): the half-open draw
//!   collapses to the single value `min` instead of panicking.
//! - `k` larger than the point count is allowed; surplus means simply own
//!   zero points and stay where they are.

use rand::prelude::*;

use crate::bounds::Bounds;
use crate::point::{Point, Rgba};

/// The k-means clustering engine.
///
/// Owns the point set, the mean set, and the clustering state. Callers
/// inspect results through [`points`](Self::points),
/// [`means`](Self::means) and [`bounds`](Self::bounds); the sets are never
/// handed out mutably.
#[derive(Debug)]
pub struct KMeansEngine {
    points: Vec<Point>,
    means: Vec<Point>,
    bounds: Option<Bounds>,
    k: usize,
    needs_initial_means: bool,
    rng: StdRng,
}

/// Default number of means.
const DEFAULT_K: usize = 3;

impl KMeansEngine {
    /// Create an engine with an empty point set and `k = 3`.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            means: Vec::new(),
            bounds: None,
            k: DEFAULT_K,
            needs_initial_means: true,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the random source used for initial mean placement.
    ///
    /// With a fixed seed, mean generation is fully deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set the number of means and mark them stale.
    ///
    /// `k == 0` is clamped to 1. Does not trigger a clustering pass.
    pub fn set_k(&mut self, k: usize) {
        if k == 0 {
            tracing::warn!("k must be at least 1, clamping 0 to 1");
        }
        self.k = k.max(1);
        self.needs_initial_means = true;
        tracing::debug!(k = self.k, "changed k");
    }

    /// The configured number of means.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Replace the point set and its bounds.
    ///
    /// Clears the mean set and marks means stale; the next pass generates
    /// fresh ones.
    pub fn load_points(&mut self, points: Vec<Point>, bounds: Option<Bounds>) {
        self.points = points;
        self.bounds = bounds;
        self.means.clear();
        self.needs_initial_means = true;
    }

    /// Run one assign/update pass.
    pub fn cluster(&mut self) {
        tracing::debug!(k = self.k, points = self.points.len(), "clustering");

        if self.needs_initial_means {
            self.generate_initial_means();
        }

        // Assignment step. Accumulate per-mean coordinate sums as we go so
        // the update step needs no second scan.
        let mut sum_x = vec![0i64; self.means.len()];
        let mut sum_y = vec![0i64; self.means.len()];
        let mut count = vec![0i64; self.means.len()];

        for point in &mut self.points {
            let mut nearest = None;
            let mut best = f64::INFINITY;
            for (idx, mean) in self.means.iter().enumerate() {
                let d = mean.distance(point);
                if d < best {
                    best = d;
                    nearest = Some(idx);
                }
            }

            // With an empty mean set there is nothing to assign to.
            let Some(idx) = nearest else { continue };

            point.color = self.means[idx].color;
            sum_x[idx] += i64::from(point.x);
            sum_y[idx] += i64::from(point.y);
            count[idx] += 1;
        }

        // Update step: integer-truncated average. Means with no assigned
        // points keep their previous position.
        for (idx, mean) in self.means.iter_mut().enumerate() {
            if count[idx] != 0 {
                mean.x = (sum_x[idx] / count[idx]) as i32;
                mean.y = (sum_y[idx] / count[idx]) as i32;
            }
        }
    }

    /// Generate `k` means at random positions within the current bounds.
    fn generate_initial_means(&mut self) {
        // No points yet: defer until a load establishes bounds.
        let Some(bounds) = self.bounds else { return };

        tracing::debug!(k = self.k, "generating initial means");

        self.means = Vec::with_capacity(self.k);
        for _ in 0..self.k {
            let x = draw(&mut self.rng, bounds.min_x, bounds.max_x);
            let y = draw(&mut self.rng, bounds.min_y, bounds.max_y);
            let mut mean = Point::new("mean", x, y);
            mean.color = self.random_light_color();
            self.means.push(mean);
        }

        self.needs_initial_means = false;
    }

    /// A random color from the lighter half of the spectrum, translucent
    /// enough to distinguish means from raw points.
    fn random_light_color(&mut self) -> Rgba {
        Rgba {
            r: self.rng.random::<f32>() * 0.5 + 0.5,
            g: self.rng.random::<f32>() * 0.5 + 0.5,
            b: self.rng.random::<f32>() * 0.5 + 0.5,
            a: 0.8,
        }
    }

    /// The current point set.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The current mean set. Empty until the first pass after a load.
    pub fn means(&self) -> &[Point] {
        &self.means
    }

    /// Raw (unpadded) bounds of the point set, `None` while it is empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl Default for KMeansEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform draw from the half-open range `[lo, hi)`.
///
/// An empty range (`hi <= lo`) degenerates to the single value `lo`.
fn draw(rng: &mut StdRng, lo: i32, hi: i32) -> i32 {
    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> Vec<Point> {
        vec![
            Point::new("a", 0, 0),
            Point::new("b", 0, 10),
            Point::new("c", 10, 0),
            Point::new("d", 10, 10),
        ]
    }

    fn engine_with(points: Vec<Point>, k: usize, seed: u64) -> KMeansEngine {
        let mut engine = KMeansEngine::new().with_seed(seed);
        engine.set_k(k);
        let bounds = Bounds::of(&points);
        engine.load_points(points, bounds);
        engine
    }

    /// Index of the nearest mean, first one wins ties. Mirrors the
    /// assignment rule so tests can recompute memberships from snapshots.
    fn nearest(point: &Point, means: &[Point]) -> Option<usize> {
        let mut best = f64::INFINITY;
        let mut nearest = None;
        for (idx, mean) in means.iter().enumerate() {
            let d = mean.distance(point);
            if d < best {
                best = d;
                nearest = Some(idx);
            }
        }
        nearest
    }

    #[test]
    fn default_k_is_three() {
        assert_eq!(KMeansEngine::new().k(), 3);
    }

    #[test]
    fn k_zero_clamps_to_one() {
        let mut engine = KMeansEngine::new();
        engine.set_k(0);
        assert_eq!(engine.k(), 1);
    }

    #[test]
    fn cluster_generates_exactly_k_means() {
        for k in 1..=6 {
            let mut engine = engine_with(corners(), k, 42);
            engine.cluster();
            assert_eq!(engine.means().len(), k);
        }
    }

    #[test]
    fn draw_is_half_open() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = draw(&mut rng, -3, 4);
            assert!((-3..4).contains(&v));
        }
        // Empty range degenerates to the lower bound.
        assert_eq!(draw(&mut rng, 5, 5), 5);
        assert_eq!(draw(&mut rng, 5, 4), 5);
    }

    #[test]
    fn initial_means_lie_within_bounds() {
        let mut engine = engine_with(corners(), 50, 7);
        engine.cluster();
        // Generated positions lie in [0, 10) x [0, 10); the update step can
        // only move a mean to an average of points, which stays in [0, 10].
        for mean in engine.means() {
            assert!((0..=10).contains(&mean.x));
            assert!((0..=10).contains(&mean.y));
        }
    }

    #[test]
    fn degenerate_bounds_do_not_panic() {
        let points = vec![Point::new("only", 5, 5)];
        let mut engine = engine_with(points, 3, 1);
        engine.cluster();
        assert_eq!(engine.means().len(), 3);
        for mean in engine.means() {
            assert_eq!((mean.x, mean.y), (5, 5));
        }
    }

    #[test]
    fn empty_point_set_defers_mean_generation() {
        let mut engine = KMeansEngine::new().with_seed(3);
        engine.cluster();
        assert!(engine.means().is_empty());

        // Once points arrive, the deferred generation happens.
        let points = corners();
        let bounds = Bounds::of(&points);
        engine.load_points(points, bounds);
        engine.cluster();
        assert_eq!(engine.means().len(), 3);
    }

    #[test]
    fn mean_colors_are_light_and_translucent() {
        let mut engine = engine_with(corners(), 4, 11);
        engine.cluster();
        for mean in engine.means() {
            let c = mean.color;
            assert!((0.5..=1.0).contains(&c.r));
            assert!((0.5..=1.0).contains(&c.g));
            assert!((0.5..=1.0).contains(&c.b));
            assert_eq!(c.a, 0.8);
        }
    }

    #[test]
    fn points_adopt_their_nearest_means_color() {
        let mut engine = engine_with(corners(), 2, 42);
        engine.cluster();

        // Membership is recomputed against pre-update mean positions, so
        // verify via colors after a second pass where means are stable
        // inputs: each point's color must equal the color of a mean that
        // is nearest among all means at assignment time. Colors uniquely
        // identify means here (random f32 channels).
        for _ in 0..10 {
            let means_before = engine.means().to_vec();
            engine.cluster();
            for point in engine.points() {
                let idx = nearest(point, &means_before).unwrap();
                assert_eq!(point.color, means_before[idx].color);
            }
        }
    }

    #[test]
    fn means_sit_at_truncated_average_of_their_points() {
        let mut engine = engine_with(corners(), 2, 5);
        for _ in 0..10 {
            engine.cluster();
        }

        // After any pass, a mean with members sits at the integer-truncated
        // average of the points colored by it.
        for mean in engine.means() {
            let members: Vec<&Point> = engine
                .points()
                .iter()
                .filter(|p| p.color == mean.color)
                .collect();
            if members.is_empty() {
                continue;
            }
            let n = members.len() as i64;
            let avg_x = members.iter().map(|p| i64::from(p.x)).sum::<i64>() / n;
            let avg_y = members.iter().map(|p| i64::from(p.y)).sum::<i64>() / n;
            assert_eq!(i64::from(mean.x), avg_x);
            assert_eq!(i64::from(mean.y), avg_y);
        }
    }

    #[test]
    fn average_truncates_toward_zero() {
        let points = vec![Point::new("a", 0, 0), Point::new("b", 0, 1)];
        let bounds = Bounds::of(&points);
        let mut engine = KMeansEngine::new().with_seed(9);
        engine.set_k(1);
        engine.load_points(points, bounds);
        engine.cluster();
        let mean = &engine.means()[0];
        // (0 + 1) / 2 truncates to 0.
        assert_eq!((mean.x, mean.y), (0, 0));
    }

    #[test]
    fn single_mean_reaches_fixed_point_after_one_pass() {
        let mut engine = engine_with(corners(), 1, 13);
        engine.cluster();
        let settled = engine.means().to_vec();
        assert_eq!((settled[0].x, settled[0].y), (5, 5));

        // Already at the centroid: further passes change nothing.
        for _ in 0..5 {
            engine.cluster();
            assert_eq!(engine.means(), settled.as_slice());
        }
    }

    #[test]
    fn zero_member_means_keep_their_position() {
        let mut engine = engine_with(corners(), 6, 21);
        engine.cluster();

        // Recompute memberships from the snapshot, run another pass, and
        // check that every mean which attracted no points did not move.
        let means_before = engine.means().to_vec();
        let mut assigned = vec![false; means_before.len()];
        for point in engine.points() {
            if let Some(idx) = nearest(point, &means_before) {
                assigned[idx] = true;
            }
        }
        engine.cluster();
        let mut saw_empty_mean = false;
        for (idx, mean) in engine.means().iter().enumerate() {
            if !assigned[idx] {
                saw_empty_mean = true;
                assert_eq!((mean.x, mean.y), (means_before[idx].x, means_before[idx].y));
            }
        }
        // k=6 over 4 points guarantees at least two unassigned means.
        assert!(saw_empty_mean);
    }

    #[test]
    fn set_k_marks_means_stale() {
        let mut engine = engine_with(corners(), 2, 2);
        engine.cluster();
        assert_eq!(engine.means().len(), 2);

        engine.set_k(4);
        engine.cluster();
        assert_eq!(engine.means().len(), 4);
    }

    #[test]
    fn reload_clears_means() {
        let mut engine = engine_with(corners(), 2, 2);
        engine.cluster();
        assert!(!engine.means().is_empty());

        let points = vec![Point::new("x", 1, 1)];
        let bounds = Bounds::of(&points);
        engine.load_points(points, bounds);
        assert!(engine.means().is_empty());
        assert_eq!(engine.points().len(), 1);
    }
}
