use super::*;
use crate::trace::RecordingTracer;

fn p(x: i64, y: i64) -> Point {
    Point::new(x, y)
}

fn square() -> Vec<Point> {
    vec![p(0, 0), p(4, 0), p(4, 4), p(0, 4)]
}

fn l_shape() -> Vec<Point> {
    vec![p(0, 0), p(4, 0), p(4, 2), p(2, 2), p(2, 4), p(0, 4)]
}

#[test]
fn test_outer_triangle_encloses_points() {
    let outer = outer_triangle(&square(), 10).unwrap();
    assert_eq!(outer, [p(-10, -10), p(28, -10), p(-10, 28)]);
    let t = Triangle::new(outer, false, 0);
    for q in square() {
        assert!(t.contains(q));
    }
}

#[test]
fn test_outer_triangle_rejects_bad_margin() {
    assert!(matches!(
        outer_triangle(&square(), 0),
        Err(LocatorError::InvalidGeometry(_))
    ));
    assert!(matches!(
        outer_triangle(&[], 10),
        Err(LocatorError::InsufficientVertices(0))
    ));
}

#[test]
fn test_square_queries() {
    let locator = PointLocator::new(&square()).unwrap();
    assert!(locator.query(p(2, 2)));
    assert!(!locator.query(p(-1, -1)));
    assert!(!locator.query(p(5, 5)));
    // Boundary and corners count as inside.
    assert!(locator.query(p(0, 0)));
    assert!(locator.query(p(4, 2)));
    // Far outside the outer triangle.
    assert!(!locator.query(p(1000, 1000)));
}

#[test]
fn test_square_hierarchy_shape() {
    let locator = PointLocator::new(&square()).unwrap();
    assert_eq!(locator.rounds(), 3);
    assert_eq!(locator.hierarchy().len(), 15);
    assert_eq!(locator.root(), 14);
    assert_eq!(locator.hierarchy().depth(), 3);

    let root = locator.triangle(locator.root()).unwrap();
    assert_eq!(*root.vertices(), locator.outer_triangle());

    let inside_leaves = locator
        .hierarchy()
        .leaves()
        .filter(|(_, t)| t.is_inside())
        .count();
    assert_eq!(inside_leaves, 2);
}

#[test]
fn test_triangulation_export() {
    let locator = PointLocator::new(&square()).unwrap();
    // 7 vertices of a triangulated outer triangle: 3 * 7 - 6 edges.
    assert_eq!(locator.triangulation().len(), 15);
    assert!(locator.triangulation().contains(&Segment::new(p(0, 0), p(4, 0))));
    assert!(locator.triangulation().windows(2).all(|w| w[0] < w[1]));

    let lines = locator.triangulation_lines();
    assert_eq!(lines.len(), 15);
    assert_eq!(Segment::from(lines[0]), locator.triangulation()[0]);
}

#[test]
fn test_children_intersect_parents() {
    let locator = PointLocator::new(&l_shape()).unwrap();
    for (id, t) in locator.hierarchy().iter() {
        if t.level() == 0 {
            assert!(t.is_leaf(), "initial triangle #{id} has children");
        } else {
            assert!(!t.is_leaf(), "refined triangle #{id} has no children");
            assert!(!t.is_inside());
        }
        for &child in t.children() {
            let c = locator.triangle(child).unwrap();
            assert!(t.intersects(c), "#{child} does not touch parent #{id}");
            assert!(c.level() < t.level());
        }
    }
}

#[test]
fn test_l_shape_queries() {
    let locator = PointLocator::new(&l_shape()).unwrap();
    assert!(locator.query(p(1, 1)));
    assert!(locator.query(p(1, 3)));
    assert!(locator.query(p(3, 1)));
    assert!(locator.query(p(2, 2)));
    assert!(!locator.query(p(3, 3)));
    assert!(!locator.query(p(4, 4)));
}

#[test]
fn test_clockwise_input_is_reversed() {
    let mut cw = square();
    cw.reverse();
    let mut tracer = RecordingTracer::default();
    let locator = LocatorOptions::default().build_traced(&cw, &mut tracer).unwrap();

    assert_eq!(tracer.events.first(), Some(&TraceEvent::Reversed));
    assert_eq!(tracer.events.last(), Some(&TraceEvent::Root(locator.root())));
    assert!(locator.query(p(2, 2)));
    assert!(!locator.query(p(5, 5)));
}

#[test]
fn test_trace_covers_every_round() {
    let mut tracer = RecordingTracer::default();
    let locator = LocatorOptions::default()
        .build_traced(&l_shape(), &mut tracer)
        .unwrap();

    let started = tracer
        .events
        .iter()
        .filter(|e| matches!(e, TraceEvent::RoundStarted { .. }))
        .count();
    assert_eq!(started, locator.rounds());

    let added = tracer
        .events
        .iter()
        .filter(|e| matches!(e, TraceEvent::TriangleAdded { .. }))
        .count();
    assert_eq!(added, locator.hierarchy().len());
    assert!(tracer.events.contains(&TraceEvent::RoundFinished {
        round: locator.rounds(),
        vertices_left: 3,
    }));
}

#[test]
fn test_query_all_matches_query() {
    let locator = PointLocator::new(&l_shape()).unwrap();
    let points: Vec<Point> = (-2..8)
        .flat_map(|x| (-2..8).map(move |y| p(x, y)))
        .collect();
    let expected: Vec<bool> = points.iter().map(|&q| locator.query(q)).collect();
    assert_eq!(locator.query_all(&points), expected);
}

#[test]
fn test_locate() {
    let locator = PointLocator::new(&square()).unwrap();

    let inside = locator.locate(p(2, 2)).unwrap();
    let t = locator.triangle(inside).unwrap();
    assert!(t.is_leaf() && t.is_inside() && t.contains(p(2, 2)));

    let outside = locator.locate(p(5, 5)).unwrap();
    let t = locator.triangle(outside).unwrap();
    assert!(t.is_leaf() && !t.is_inside() && t.contains(p(5, 5)));

    assert_eq!(locator.locate(p(100, 100)), None);
}

#[test]
fn test_validation_errors_surface() {
    let bow_tie = [p(0, 0), p(4, 4), p(4, 0), p(0, 4)];
    assert!(matches!(
        PointLocator::new(&bow_tie),
        Err(LocatorError::SelfIntersection(..))
    ));

    let options = LocatorOptions {
        validate: false,
        ..Default::default()
    };
    assert!(matches!(
        options.build(&[p(0, 0), p(1, 0)]),
        Err(LocatorError::InsufficientVertices(2))
    ));
}

#[test]
fn test_unvalidated_input_still_range_checked() {
    let options = LocatorOptions {
        validate: false,
        ..Default::default()
    };
    let far = p(i64::MAX - 5, 0);
    let err = options
        .build(&[p(0, 0), far, p(0, i64::MAX - 5)])
        .unwrap_err();
    assert!(matches!(err, LocatorError::CoordinateOutOfRange(q) if q == far), "{err}");

    let err = outer_triangle(&[p(0, 0), p(i64::MIN + 3, 7), p(2, 2)], 10).unwrap_err();
    assert!(matches!(err, LocatorError::CoordinateOutOfRange(_)), "{err}");
}

#[test]
fn test_low_max_degree_cannot_reduce() {
    let options = LocatorOptions {
        max_degree: 2,
        ..Default::default()
    };
    assert!(matches!(
        options.build(&square()),
        Err(LocatorError::Topology(_))
    ));
}

#[test]
fn test_locator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PointLocator>();
}
