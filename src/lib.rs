//! K-means over named 2D integer points.
//!
//! `kmeans2d` ingests plain-text files of named points (`A (3, 14)`, one
//! per line) and clusters them with k-means, one assign/update pass per
//! request. It is built for interactive drivers (a renderer asks for
//! another pass whenever the user does), so there is no convergence loop
//! inside the engine.
//!
//! The crate is organized leaves-first:
//!
//! - [`point`]: [`Point`], a named integer position plus a display color.
//! - [`bounds`]: [`Bounds`], the axis-aligned box around the point set.
//! - [`parse`]: [`PointSetParser`], text lines in, points and bounds out.
//! - [`engine`]: [`KMeansEngine`], mean generation, assignment, update.
//! - [`service`]: [`ClusteringService`], the facade a driver talks to,
//!   with [`SnapshotObserver`] as the rendering seam.
//!
//! ## Usage
//!
//! ```rust
//! use kmeans2d::{Bounds, KMeansEngine, Point};
//!
//! let points = vec![
//!     Point::new("a", 0, 0),
//!     Point::new("b", 0, 10),
//!     Point::new("c", 10, 0),
//!     Point::new("d", 10, 10),
//! ];
//! let bounds = Bounds::of(&points);
//!
//! let mut engine = KMeansEngine::new().with_seed(42);
//! engine.set_k(2);
//! engine.load_points(points, bounds);
//!
//! engine.cluster();
//! assert_eq!(engine.means().len(), 2);
//!
//! // Every point now carries the color of a mean.
//! for point in engine.points() {
//!     assert!(engine.means().iter().any(|m| m.color == point.color));
//! }
//! ```
//!
//! File-driven use goes through [`ClusteringService`], which loads a file,
//! forwards `set_k`/`cluster` calls to the engine, and hands padded-bounds
//! [`Snapshot`]s to an observer for display.

#![forbid(unsafe_code)]

pub mod bounds;
pub mod engine;
pub mod error;
pub mod parse;
pub mod point;
pub mod service;

pub use bounds::Bounds;
pub use engine::KMeansEngine;
pub use error::{Error, Result};
pub use parse::{parse_line, PointSetParser};
pub use point::{Point, Rgba};
pub use service::{ClusteringService, Snapshot, SnapshotObserver, DISPLAY_MARGIN};
