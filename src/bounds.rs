//! Axis-aligned bounding box over a point set.

use crate::point::Point;

/// The axis-aligned box containing all points in the current set.
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`. An empty point set has
/// no bounds; APIs that may see an empty set use `Option<Bounds>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest x among all points.
    pub min_x: i32,
    /// Largest x among all points.
    pub max_x: i32,
    /// Smallest y among all points.
    pub min_y: i32,
    /// Largest y among all points.
    pub max_y: i32,
}

impl Bounds {
    /// Compute the bounds of a point set from scratch.
    ///
    /// Returns `None` for an empty set. The full recompute (rather than an
    /// incremental update) is deliberate: bounds must be re-derivable from
    /// the point set at every step, including across wholesale reloads.
    pub fn of(points: &[Point]) -> Option<Bounds> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    /// Widen every side by `margin`.
    ///
    /// Used to give renderers visual breathing room around the data. The
    /// padding is cosmetic only; clustering math always uses raw bounds.
    pub fn padded(self, margin: i32) -> Bounds {
        Bounds {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_bounds() {
        assert_eq!(Bounds::of(&[]), None);
    }

    #[test]
    fn single_point_collapses_to_it() {
        let b = Bounds::of(&[Point::new("a", 7, -2)]).unwrap();
        assert_eq!(
            b,
            Bounds {
                min_x: 7,
                max_x: 7,
                min_y: -2,
                max_y: -2
            }
        );
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = vec![
            Point::new("a", 0, 10),
            Point::new("b", 5, 0),
            Point::new("c", -3, 4),
        ];
        let b = Bounds::of(&points).unwrap();
        assert_eq!(
            b,
            Bounds {
                min_x: -3,
                max_x: 5,
                min_y: 0,
                max_y: 10
            }
        );
    }

    #[test]
    fn padding_widens_every_side() {
        let b = Bounds {
            min_x: 0,
            max_x: 10,
            min_y: 2,
            max_y: 8,
        };
        assert_eq!(
            b.padded(10),
            Bounds {
                min_x: -10,
                max_x: 20,
                min_y: -8,
                max_y: 18
            }
        );
    }
}
