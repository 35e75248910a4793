//! Named 2D integer points with a display color.

/// An RGBA color with each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Near-white translucent color marking a point that has not been
    /// assigned to any mean yet.
    pub const UNCLUSTERED: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 0.7,
    };
}

/// A point in 2D space with a name and a color.
///
/// The name is fixed at construction; position and color are mutated in
/// place by the clustering engine (recentering moves means, assignment
/// recolors data points). Positions are always integer-valued.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// The name of the point.
    pub name: String,
    /// The x position of the point.
    pub x: i32,
    /// The y position of the point.
    pub y: i32,
    /// The display color of the point.
    pub color: Rgba,
}

impl Point {
    /// Create a point at `(x, y)` with the unclustered default color.
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            color: Rgba::UNCLUSTERED,
        }
    }

    /// Euclidean distance between this point and another.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}
