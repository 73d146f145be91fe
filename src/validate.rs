//! Input checks run before construction.
//!
//! The triangulator assumes a simple polygon with distinct vertices and no
//! collinear runs. Anything else is rejected here with a precise error instead
//! of surfacing later as a topology failure.

use crate::error::{LocatorError, Result};
use crate::geometry::{determinant, segments_intersect, signed_area_2x, Point, Segment};
use rstar::{RTree, RTreeObject, AABB};
use std::collections::BTreeSet;

// Polygon edge wrapper so rstar can index it
#[derive(Clone, Copy, Debug)]
struct IndexedSegment {
    segment: Segment,
    index: usize,
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[i64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let Segment { start, end } = self.segment;
        AABB::from_corners(
            [start.x.min(end.x), start.y.min(end.y)],
            [start.x.max(end.x), start.y.max(end.y)],
        )
    }
}

/// Checks that `points` describe a simple polygon the locator can be built on.
///
/// In order: at least 3 vertices, coordinates within
/// [`MAX_COORDINATE`](crate::geometry::MAX_COORDINATE), no repeated vertex, no
/// three consecutive collinear vertices, no two edges touching other than
/// neighbours at their shared vertex, and non-zero area.
pub fn validate_polygon(points: &[Point]) -> Result<()> {
    let n = points.len();
    if n < 3 {
        return Err(LocatorError::InsufficientVertices(n));
    }

    if let Some(p) = points.iter().find(|p| !p.in_range()) {
        return Err(LocatorError::CoordinateOutOfRange(*p));
    }

    let mut seen = BTreeSet::new();
    for p in points {
        if !seen.insert(*p) {
            return Err(LocatorError::DuplicatePoint(*p));
        }
    }

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        if determinant(prev, points[i], next) == 0 {
            return Err(LocatorError::CollinearVertices(points[i]));
        }
    }

    if let Some((s1, s2)) = first_self_intersection(points) {
        return Err(LocatorError::SelfIntersection(s1, s2));
    }

    if signed_area_2x(points) == 0 {
        return Err(LocatorError::CollinearVertices(points[0]));
    }

    Ok(())
}

/// Lowest-indexed pair of non-adjacent edges that touch, if any.
///
/// Adjacent edges are skipped: with distinct vertices and no collinear
/// neighbours they can only meet at their shared vertex.
fn first_self_intersection(points: &[Point]) -> Option<(Segment, Segment)> {
    let n = points.len();
    let indexed: Vec<IndexedSegment> = (0..n)
        .map(|i| IndexedSegment {
            segment: Segment::new(points[i], points[(i + 1) % n]),
            index: i,
        })
        .collect();
    let tree = RTree::bulk_load(indexed);

    let adjacent = |i: usize, j: usize| j == i + 1 || (i == 0 && j == n - 1);

    tree.intersection_candidates_with_other_tree(&tree)
        .filter(|(a, b)| a.index < b.index && !adjacent(a.index, b.index))
        .filter(|(a, b)| segments_intersect(&a.segment, &b.segment))
        .map(|(a, b)| (a.index, b.index, a.segment, b.segment))
        .min_by_key(|&(i, j, _, _)| (i, j))
        .map(|(_, _, s1, s2)| (s1, s2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MAX_COORDINATE;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_accepts_simple_polygons() {
        assert!(validate_polygon(&[p(0, 0), p(4, 0), p(4, 4), p(0, 4)]).is_ok());
        assert!(validate_polygon(&[p(0, 0), p(0, 4), p(4, 4), p(4, 0)]).is_ok());
        assert!(validate_polygon(&[p(0, 0), p(4, 0), p(4, 2), p(2, 2), p(2, 4), p(0, 4)]).is_ok());
    }

    #[test]
    fn test_too_few_points() {
        let err = validate_polygon(&[p(0, 0), p(1, 1)]).unwrap_err();
        assert!(matches!(err, LocatorError::InsufficientVertices(2)));
    }

    #[test]
    fn test_out_of_range() {
        let far = p(MAX_COORDINATE + 1, 0);
        let err = validate_polygon(&[p(0, 0), far, p(0, 5)]).unwrap_err();
        assert!(matches!(err, LocatorError::CoordinateOutOfRange(q) if q == far));
    }

    #[test]
    fn test_duplicate_vertex() {
        let err = validate_polygon(&[p(0, 0), p(4, 0), p(4, 4), p(0, 0), p(0, 4)]).unwrap_err();
        assert!(matches!(err, LocatorError::DuplicatePoint(q) if q == p(0, 0)));
    }

    #[test]
    fn test_collinear_run() {
        let err = validate_polygon(&[p(0, 0), p(2, 0), p(4, 0), p(4, 4)]).unwrap_err();
        assert!(matches!(err, LocatorError::CollinearVertices(q) if q == p(2, 0)));
    }

    #[test]
    fn test_bow_tie() {
        let err = validate_polygon(&[p(0, 0), p(4, 4), p(4, 0), p(0, 4)]).unwrap_err();
        match err {
            LocatorError::SelfIntersection(s1, s2) => {
                assert_eq!(s1, Segment::new(p(0, 0), p(4, 4)));
                assert_eq!(s2, Segment::new(p(4, 0), p(0, 4)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_vertex_touching_other_edge() {
        // The spike down to (2, 0) touches the bottom edge.
        let ring = [p(0, 0), p(4, 0), p(4, 4), p(2, 0), p(0, 4)];
        let err = validate_polygon(&ring).unwrap_err();
        assert!(matches!(err, LocatorError::SelfIntersection(..)));
    }
}
