//! Exact orientation predicates on integer points.
//!
//! Every decision that affects containment goes through [`determinant`], which
//! is computed in `i128` and therefore exact for coordinates within
//! [`MAX_COORDINATE`](super::MAX_COORDINATE). Floating point is only used by
//! [`sort_counter_clockwise`] to order a star ring.

use super::{Point, Segment};
use geo::kernels::Orientation;
use std::cmp::Ordering;

/// Twice the signed area of `(p1, p2, p3)`, i.e. `(p2 - p1) x (p3 - p1)`.
#[inline]
pub fn determinant(p1: Point, p2: Point, p3: Point) -> i128 {
    let ux = p2.x as i128 - p1.x as i128;
    let uy = p2.y as i128 - p1.y as i128;
    let vx = p3.x as i128 - p1.x as i128;
    let vy = p3.y as i128 - p1.y as i128;
    ux * vy - uy * vx
}

pub fn orientation(p1: Point, p2: Point, p3: Point) -> Orientation {
    match determinant(p1, p2, p3).cmp(&0) {
        Ordering::Greater => Orientation::CounterClockwise,
        Ordering::Less => Orientation::Clockwise,
        Ordering::Equal => Orientation::Collinear,
    }
}

#[inline]
pub fn is_left_turn(p1: Point, p2: Point, p3: Point) -> bool {
    determinant(p1, p2, p3) > 0
}

#[inline]
pub fn is_right_turn(p1: Point, p2: Point, p3: Point) -> bool {
    determinant(p1, p2, p3) < 0
}

/// Boundary-inclusive containment test for a counter-clockwise triangle.
pub fn point_in_triangle(p1: Point, p2: Point, p3: Point, pt: Point) -> bool {
    determinant(pt, p2, p1) <= 0 && determinant(pt, p3, p2) <= 0 && determinant(pt, p1, p3) <= 0
}

fn sign(v: i128) -> i8 {
    match v.cmp(&0) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// True if the closed segments share at least one point. Touching endpoints count.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> bool {
    let r1 = sign(determinant(s1.start, s1.end, s2.start));
    let r2 = sign(determinant(s1.start, s1.end, s2.end));
    let r3 = sign(determinant(s2.start, s2.end, s1.start));
    let r4 = sign(determinant(s2.start, s2.end, s1.end));

    if r1 * r2 > 0 || r3 * r4 > 0 {
        return false;
    }

    if r1 == 0 && r2 == 0 && r3 == 0 && r4 == 0 {
        // All four points on one line: the sign test alone would report any
        // two segments on a common line, so compare their extents instead.
        let overlap = |a1: i64, a2: i64, b1: i64, b2: i64| {
            a1.min(a2) <= b1.max(b2) && b1.min(b2) <= a1.max(a2)
        };
        return overlap(s1.start.x, s1.end.x, s2.start.x, s2.end.x)
            && overlap(s1.start.y, s1.end.y, s2.start.y, s2.end.y);
    }

    true
}

/// Like [`segments_intersect`], but segments sharing an endpoint never count.
pub fn segments_intersect_strict(s1: &Segment, s2: &Segment) -> bool {
    if s1.shares_endpoint(s2) {
        return false;
    }
    segments_intersect(s1, s2)
}

/// `(p1, p2, p3)` is an ear of `polygon` if it turns left and no other polygon
/// vertex lies inside it or on its boundary. O(n).
pub fn is_ear(p1: Point, p2: Point, p3: Point, polygon: &[Point]) -> bool {
    if !is_left_turn(p1, p2, p3) {
        return false;
    }
    polygon
        .iter()
        .filter(|&&p| p != p1 && p != p2 && p != p3)
        .all(|&p| !point_in_triangle(p1, p2, p3, p))
}

/// Twice the signed area of a closed ring (shoelace formula).
pub fn signed_area_2x(ring: &[Point]) -> i128 {
    if ring.len() < 3 {
        return 0;
    }
    let mut sum = 0i128;
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        sum += p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128;
    }
    sum
}

pub fn is_counter_clockwise(ring: &[Point]) -> bool {
    signed_area_2x(ring) > 0
}

/// Orders `points` counter-clockwise by angle around `center`, starting just
/// after the negative x axis. Equal angles fall back to point order so the
/// result is deterministic.
pub fn sort_counter_clockwise<I>(center: Point, points: I) -> Vec<Point>
where
    I: IntoIterator<Item = Point>,
{
    let angle = |p: &Point| ((p.y - center.y) as f64).atan2((p.x - center.x) as f64);
    let mut ring: Vec<Point> = points.into_iter().collect();
    ring.sort_by(|a, b| angle(a).total_cmp(&angle(b)).then_with(|| a.cmp(b)));
    ring
}
