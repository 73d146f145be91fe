use geo_types::{Coord, Line};
use std::fmt;

/// Largest absolute coordinate accepted as input.
/// Keeps the outer triangle inside `i64` and every determinant inside `i128`.
pub const MAX_COORDINATE: i64 = 1 << 40;

/// An exact integer point.
///
/// The derived ordering is lexicographic (x first, then y), which is the order
/// every `BTreeMap`/`BTreeSet` keyed by points iterates in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn in_range(&self) -> bool {
        self.x.abs() <= MAX_COORDINATE && self.y.abs() <= MAX_COORDINATE
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord<i64>> for Point {
    fn from(c: Coord<i64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<Point> for Coord<i64> {
    fn from(p: Point) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

/// An undirected segment. The smaller endpoint is always stored first so
/// that `Segment::new(a, b) == Segment::new(b, a)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub fn shares_endpoint(&self, other: &Segment) -> bool {
        self.start == other.start
            || self.start == other.end
            || self.end == other.start
            || self.end == other.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl From<Segment> for Line<i64> {
    fn from(s: Segment) -> Self {
        Line::new(Coord::from(s.start), Coord::from(s.end))
    }
}

impl From<Line<i64>> for Segment {
    fn from(line: Line<i64>) -> Self {
        Segment::new(line.start.into(), line.end.into())
    }
}
