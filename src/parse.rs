//! Parsing of named points from plain text.
//!
//! The input format is one point per line:
//!
//! ```text
//! <name> (<x>, <y>)
//! ```
//!
//! where `<name>` is one or more word characters (ASCII alphanumerics or
//! `_`), and `<x>`/`<y>` are base-10 non-negative integers. Whitespace
//! between the name and the opening parenthesis, and after the comma, is
//! optional. The pattern may start anywhere in the line.
//!
//! Lines that do not match are skipped, not errors: input files routinely
//! carry headers or comments, and the loader tolerates them. Skipped lines
//! are reported at `debug` level so a malformed file is still diagnosable.

use std::io::{self, BufRead};

use crate::bounds::Bounds;
use crate::point::Point;

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Extract a named point from one line of text.
///
/// Returns `Some((name, x, y))` for the first occurrence of
/// `<name><ws?>(<x>,<ws?><y>)` in the line, `None` if the line contains no
/// such pattern. Coordinates that overflow `i32` do not match.
pub fn parse_line(line: &str) -> Option<(String, i32, i32)> {
    let bytes = line.as_bytes();

    for (open, _) in line.match_indices('(') {
        // Scan backwards from the parenthesis: optional whitespace, then
        // at least one word character for the name.
        let mut name_end = open;
        while name_end > 0 && bytes[name_end - 1].is_ascii_whitespace() {
            name_end -= 1;
        }
        let mut name_start = name_end;
        while name_start > 0 && is_word(bytes[name_start - 1]) {
            name_start -= 1;
        }
        if name_start == name_end {
            continue;
        }

        // Scan forwards: digits, comma, optional whitespace, digits, ')'.
        let mut i = open + 1;
        let x_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == x_start || i >= bytes.len() || bytes[i] != b',' {
            continue;
        }
        let x_end = i;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let y_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == y_start || i >= bytes.len() || bytes[i] != b')' {
            continue;
        }
        let y_end = i;

        let (Ok(x), Ok(y)) = (
            line[x_start..x_end].parse::<i32>(),
            line[y_start..y_end].parse::<i32>(),
        ) else {
            continue;
        };

        return Some((line[name_start..name_end].to_string(), x, y));
    }

    None
}

/// Accumulates parsed points and keeps their bounds current.
#[derive(Debug, Default)]
pub struct PointSetParser {
    points: Vec<Point>,
    bounds: Option<Bounds>,
}

impl PointSetParser {
    /// Create a parser with an empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one line of input.
    ///
    /// On a match, a new point is added to the set. Bounds are recomputed
    /// over the entire set after every line, matched or not, so they can be
    /// re-derived at any step. Returns whether the line matched.
    pub fn feed_line(&mut self, line: &str) -> bool {
        let matched = match parse_line(line) {
            Some((name, x, y)) => {
                self.points.push(Point::new(name, x, y));
                true
            }
            None => {
                if !line.trim().is_empty() {
                    tracing::debug!(line, "skipping unparsable line");
                }
                false
            }
        };

        self.bounds = Bounds::of(&self.points);
        matched
    }

    /// Read the input line-by-line until EOF.
    ///
    /// Returns the number of lines that matched. An I/O error aborts the
    /// load; points parsed before the error remain in the set.
    pub fn load<R: BufRead>(&mut self, reader: R) -> io::Result<usize> {
        let mut matched = 0;
        for line in reader.lines() {
            if self.feed_line(&line?) {
                matched += 1;
            }
        }
        Ok(matched)
    }

    /// The points parsed so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Bounds of the current point set, `None` while it is empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Consume the parser, yielding the point set and its bounds.
    pub fn into_parts(self) -> (Vec<Point>, Option<Bounds>) {
        (self.points, self.bounds)
    }
}
