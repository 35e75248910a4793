//! The clustering service facade.
//!
//! [`ClusteringService`] is the seam between the engine and whatever drives
//! it (a UI event loop, a CLI, a test). It exposes the three operations a
//! driver needs, [`open`](ClusteringService::open),
//! [`set_k`](ClusteringService::set_k) and
//! [`cluster`](ClusteringService::cluster), and pushes a [`Snapshot`] of
//! the resulting state to an optional [`SnapshotObserver`] after every load
//! and every pass.
//!
//! The service owns all mutable state exclusively. Snapshots are clones;
//! observers and callers can never mutate the live sets. Calls are
//! synchronous and run to completion, so a driver that handles concurrent
//! events must serialize its calls into the service.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::bounds::Bounds;
use crate::engine::KMeansEngine;
use crate::error::{Error, Result};
use crate::parse::PointSetParser;
use crate::point::Point;

/// Margin added to every side of the raw bounds before display.
///
/// Cosmetic only: clustering math always uses the raw bounds.
pub const DISPLAY_MARGIN: i32 = 10;

/// A read-only copy of the service state, suitable for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// The current point set, colored by cluster.
    pub points: Vec<Point>,
    /// The current mean set. Empty until the first pass after a load.
    pub means: Vec<Point>,
    /// The padded, inclusive viewing box, or `None` while no points are
    /// loaded.
    pub bounds: Option<Bounds>,
}

/// Receives a snapshot after every successful load and every pass.
pub trait SnapshotObserver {
    /// Called with the freshly produced snapshot.
    fn snapshot(&mut self, snapshot: &Snapshot);
}

/// Facade coordinating parsing, bounds tracking and the k-means engine.
pub struct ClusteringService {
    engine: KMeansEngine,
    observer: Option<Box<dyn SnapshotObserver>>,
}

impl ClusteringService {
    /// Create a service with no observer and `k = 3`.
    pub fn new() -> Self {
        Self {
            engine: KMeansEngine::new(),
            observer: None,
        }
    }

    /// Seed the engine's random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.engine = self.engine.with_seed(seed);
        self
    }

    /// Attach the observer notified after each load and pass.
    ///
    /// The observer lives as long as the service; there is at most one.
    pub fn with_observer(mut self, observer: Box<dyn SnapshotObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Load a point file, replacing the current point set wholesale.
    ///
    /// On success the observer is notified and the snapshot returned. On
    /// any I/O failure the point set is left empty and the error is
    /// returned; the service stays usable for the next call.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<Snapshot> {
        let path = path.as_ref();

        // Reset first so a failed load leaves an empty set behind, not the
        // previous file's points.
        self.engine.load_points(Vec::new(), None);

        let mut parser = PointSetParser::new();
        let matched = File::open(path)
            .map(BufReader::new)
            .and_then(|reader| parser.load(reader))
            .map_err(|source| {
                tracing::warn!(path = %path.display(), error = %source, "failed to load point file");
                Error::LoadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        tracing::debug!(path = %path.display(), points = matched, "loaded point file");

        let (points, bounds) = parser.into_parts();
        self.engine.load_points(points, bounds);
        Ok(self.emit())
    }

    /// Set the number of means. `k == 0` is clamped to 1.
    pub fn set_k(&mut self, k: usize) {
        self.engine.set_k(k);
    }

    /// Run one assign/update pass, notify the observer, and return the
    /// snapshot.
    pub fn cluster(&mut self) -> Snapshot {
        self.engine.cluster();
        self.emit()
    }

    fn emit(&mut self) -> Snapshot {
        let snapshot = Snapshot {
            points: self.engine.points().to_vec(),
            means: self.engine.means().to_vec(),
            bounds: self.engine.bounds().map(|b| b.padded(DISPLAY_MARGIN)),
        };
        if let Some(observer) = &mut self.observer {
            observer.snapshot(&snapshot);
        }
        snapshot
    }
}

impl Default for ClusteringService {
    fn default() -> Self {
        Self::new()
    }
}
