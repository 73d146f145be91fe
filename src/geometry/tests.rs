use super::*;
use geo::kernels::Orientation;
use geo::{GeoNum, Kernel};
use rand::{Rng, SeedableRng};

fn p(x: i64, y: i64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_orientation_signs() {
    assert_eq!(orientation(p(0, 0), p(4, 0), p(4, 4)), Orientation::CounterClockwise);
    assert_eq!(orientation(p(0, 0), p(4, 4), p(4, 0)), Orientation::Clockwise);
    assert_eq!(orientation(p(0, 0), p(2, 2), p(5, 5)), Orientation::Collinear);
    assert!(is_left_turn(p(0, 0), p(4, 0), p(4, 4)));
    assert!(is_right_turn(p(0, 0), p(4, 4), p(4, 0)));
}

#[test]
fn test_orientation_matches_geo_kernel() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let pts: Vec<Point> = (0..3)
            .map(|_| p(rng.gen_range(-50..50), rng.gen_range(-50..50)))
            .collect();
        let expected = <i64 as GeoNum>::Ker::orient2d(pts[0].into(), pts[1].into(), pts[2].into());
        assert_eq!(orientation(pts[0], pts[1], pts[2]), expected);
    }
}

#[test]
fn test_determinant_is_exact_at_range_limits() {
    let m = MAX_COORDINATE;
    // Products overflow i64 here; i128 keeps the sign right.
    assert!(is_left_turn(p(-m, -m), p(m, -m), p(m, m)));
    assert!(is_right_turn(p(-m, -m), p(m, m), p(m, m - 1)));
    assert_eq!(determinant(p(-m, -m), p(0, 0), p(m, m)), 0);
}

#[test]
fn test_point_in_triangle_is_boundary_inclusive() {
    let (a, b, c) = (p(0, 0), p(4, 0), p(0, 4));
    assert!(point_in_triangle(a, b, c, p(1, 1)));
    assert!(point_in_triangle(a, b, c, p(2, 0)), "edge midpoint");
    assert!(point_in_triangle(a, b, c, p(2, 2)), "hypotenuse midpoint");
    assert!(point_in_triangle(a, b, c, a), "corner");
    assert!(!point_in_triangle(a, b, c, p(3, 3)));
    assert!(!point_in_triangle(a, b, c, p(-1, 0)));
}

#[test]
fn test_segments_intersect() {
    let s = |a: (i64, i64), b: (i64, i64)| Segment::new(a.into(), b.into());

    assert!(segments_intersect(&s((0, 0), (4, 4)), &s((0, 4), (4, 0))));
    assert!(segments_intersect(&s((0, 0), (4, 0)), &s((4, 0), (4, 4))), "shared endpoint");
    assert!(segments_intersect(&s((0, 0), (4, 0)), &s((2, 0), (2, 3))), "T junction");
    assert!(!segments_intersect(&s((0, 0), (4, 0)), &s((0, 1), (4, 1))));
    assert!(!segments_intersect(&s((0, 0), (1, 1)), &s((3, 3), (5, 5))), "disjoint collinear");
    assert!(segments_intersect(&s((0, 0), (3, 3)), &s((2, 2), (5, 5))), "overlapping collinear");
}

#[test]
fn test_segments_intersect_strict_ignores_shared_endpoints() {
    let a = Segment::new(p(0, 0), p(4, 0));
    let b = Segment::new(p(4, 0), p(4, 4));
    let c = Segment::new(p(2, -2), p(2, 2));
    assert!(!segments_intersect_strict(&a, &b));
    assert!(segments_intersect_strict(&a, &c));
}

#[test]
fn test_segment_is_unordered() {
    assert_eq!(Segment::new(p(3, 1), p(0, 0)), Segment::new(p(0, 0), p(3, 1)));
    assert_eq!(Segment::new(p(3, 1), p(0, 0)).start, p(0, 0));
}

#[test]
fn test_is_ear() {
    // L shape: the reflex corner at (2, 2) blocks the triangle (4,2),(2,2),(2,4).
    let l_shape = [p(0, 0), p(4, 0), p(4, 2), p(2, 2), p(2, 4), p(0, 4)];
    assert!(is_ear(p(0, 0), p(4, 0), p(4, 2), &l_shape));
    assert!(!is_ear(p(4, 2), p(2, 2), p(2, 4), &l_shape), "reflex vertex");
    assert!(!is_ear(p(0, 4), p(0, 0), p(4, 0), &[p(0, 4), p(0, 0), p(4, 0), p(1, 1)]));
}

#[test]
fn test_ring_orientation() {
    let ccw = [p(0, 0), p(4, 0), p(4, 4), p(0, 4)];
    let mut cw = ccw;
    cw.reverse();
    assert_eq!(signed_area_2x(&ccw), 32);
    assert!(is_counter_clockwise(&ccw));
    assert!(!is_counter_clockwise(&cw));
}

#[test]
fn test_sort_counter_clockwise() {
    let center = p(0, 0);
    let sorted = sort_counter_clockwise(center, vec![p(0, 5), p(-3, 0), p(2, -2), p(4, 0)]);
    assert_eq!(sorted, vec![p(2, -2), p(4, 0), p(0, 5), p(-3, 0)]);
}
