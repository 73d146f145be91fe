use crate::error::{LocatorError, Result};
use crate::geometry::{is_counter_clockwise, sort_counter_clockwise, Point, Segment, MAX_COORDINATE};
use crate::hierarchy::{Triangle, TriangleHierarchy, TriangleId};
use crate::trace::{NullTracer, TraceEvent, Tracer};
use crate::triangulator::{ear_clip, initial_triangulation, Mesh};
use crate::utils::parallel;
use crate::validate::validate_polygon;
use geo_types::Line;

/// Upper bound on the degree of vertices removed in a refinement round.
pub const MAX_DEGREE: usize = 8;

/// Default gap between the polygon's bounding box and the outer triangle.
pub const OUTER_MARGIN: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocatorOptions {
    pub max_degree: usize,
    pub outer_margin: i64,
    /// Run [`validate_polygon`] before building. Only turn this off for input
    /// that is already known to be a simple polygon.
    pub validate: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            max_degree: MAX_DEGREE,
            outer_margin: OUTER_MARGIN,
            validate: true,
        }
    }
}

impl LocatorOptions {
    pub fn build(&self, points: &[Point]) -> Result<PointLocator> {
        PointLocator::with_options(points, self, &mut NullTracer)
    }

    pub fn build_traced<T: Tracer>(&self, points: &[Point], tracer: &mut T) -> Result<PointLocator> {
        PointLocator::with_options(points, self, tracer)
    }
}

/// Point-in-polygon structure over a simple polygon (Kirkpatrick's hierarchy).
///
/// Built once, then immutable: every query takes `&self` and walks the
/// triangle DAG from the root, so a locator can be shared across threads.
#[derive(Clone, Debug)]
pub struct PointLocator {
    outer: [Point; 3],
    hierarchy: TriangleHierarchy,
    root: TriangleId,
    triangulation: Vec<Segment>,
    rounds: usize,
}

impl PointLocator {
    /// Builds a locator with the default options.
    pub fn new(points: &[Point]) -> Result<Self> {
        LocatorOptions::default().build(points)
    }

    /// Builds a locator for the polygon `points` (either orientation, implicitly closed).
    ///
    /// After the initial triangulation, every round removes a bounded-degree
    /// independent set of vertices, re-triangulates the hole each one leaves
    /// and links the new triangles to the ones they replace. Rounds stop when
    /// only the outer triangle's corners are left.
    pub fn with_options<T: Tracer>(
        points: &[Point],
        options: &LocatorOptions,
        tracer: &mut T,
    ) -> Result<Self> {
        if options.validate {
            validate_polygon(points)?;
        } else {
            // The orientation test and the outer triangle still need bounded coordinates.
            if points.len() < 3 {
                return Err(LocatorError::InsufficientVertices(points.len()));
            }
            if let Some(p) = points.iter().find(|p| !p.in_range()) {
                return Err(LocatorError::CoordinateOutOfRange(*p));
            }
        }

        let mut polygon = points.to_vec();
        if !is_counter_clockwise(&polygon) {
            polygon.reverse();
            tracer.trace(TraceEvent::Reversed);
        }

        let outer = outer_triangle(&polygon, options.outer_margin)?;
        let mut mesh = Mesh::new(outer)?;
        initial_triangulation(&mut mesh, &polygon, &outer, tracer)?;

        let triangulation = mesh.graph.edges();
        tracer.trace(TraceEvent::InitialTriangulation {
            triangles: mesh.hierarchy.len(),
            edges: triangulation.len(),
        });

        let rounds = refine(&mut mesh, options.max_degree, tracer)?;
        let root = top_triangle(&mesh)?;
        mesh.hierarchy.set_root(root);
        tracer.trace(TraceEvent::Root(root));

        log::debug!(
            "built locator for {} vertices: {} triangles over {} rounds",
            polygon.len(),
            mesh.hierarchy.len(),
            rounds
        );

        Ok(Self {
            outer,
            hierarchy: mesh.hierarchy,
            root,
            triangulation,
            rounds,
        })
    }

    /// True if `pt` is inside the polygon or on its boundary.
    pub fn query(&self, pt: Point) -> bool {
        self.hierarchy.query(pt)
    }

    pub fn query_all(&self, points: &[Point]) -> Vec<bool> {
        parallel::map(points, |&pt| self.query(pt))
    }

    /// Leaf triangle deciding the answer for `pt`. `None` outside the outer triangle.
    pub fn locate(&self, pt: Point) -> Option<TriangleId> {
        self.hierarchy.locate(pt)
    }

    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.hierarchy.get(id)
    }

    pub fn hierarchy(&self) -> &TriangleHierarchy {
        &self.hierarchy
    }

    pub fn root(&self) -> TriangleId {
        self.root
    }

    /// Edges of the initial triangulation, outer triangle included.
    pub fn triangulation(&self) -> &[Segment] {
        &self.triangulation
    }

    pub fn triangulation_lines(&self) -> Vec<Line<i64>> {
        self.triangulation.iter().map(|&s| s.into()).collect()
    }

    pub fn outer_triangle(&self) -> [Point; 3] {
        self.outer
    }

    /// Number of refinement rounds, which bounds the query depth.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

/// Right triangle enclosing `points` with `margin` to spare, counter-clockwise
/// from its lower-left corner. The hypotenuse runs along `x + y = c` with `c`
/// just above the largest `x + y` among the points, which must lie within
/// [`MAX_COORDINATE`].
pub fn outer_triangle(points: &[Point], margin: i64) -> Result<[Point; 3]> {
    if !(1..=MAX_COORDINATE).contains(&margin) {
        return Err(LocatorError::InvalidGeometry(format!(
            "outer margin {margin} must be between 1 and {MAX_COORDINATE}"
        )));
    }
    if let Some(p) = points.iter().find(|p| !p.in_range()) {
        return Err(LocatorError::CoordinateOutOfRange(*p));
    }
    let (Some(min_x), Some(min_y), Some(max_sum)) = (
        points.iter().map(|p| p.x).min(),
        points.iter().map(|p| p.y).min(),
        points.iter().map(|p| p.x + p.y).max(),
    ) else {
        return Err(LocatorError::InsufficientVertices(0));
    };

    let lower_left = Point::new(min_x - margin, min_y - margin);
    let c = max_sum + margin;
    Ok([
        lower_left,
        Point::new(c - lower_left.y, lower_left.y),
        Point::new(lower_left.x, c - lower_left.x),
    ])
}

/// Runs refinement rounds until no vertex can be removed. Returns the round count.
fn refine<T: Tracer>(mesh: &mut Mesh, max_degree: usize, tracer: &mut T) -> Result<usize> {
    let mut round = 0;
    loop {
        let independent = mesh.graph.independent_set(max_degree);
        if independent.is_empty() {
            return Ok(round);
        }
        round += 1;
        mesh.level = round;
        tracer.trace(TraceEvent::RoundStarted {
            round,
            independent_set: independent.len(),
        });

        for &v in &independent {
            retriangulate_star(mesh, v, tracer)?;
        }
        mesh.graph.remove_all(&independent);

        tracer.trace(TraceEvent::RoundFinished {
            round,
            vertices_left: mesh.graph.vertex_count(),
        });
    }
}

/// Replaces the triangles around `v` by a triangulation of its neighbour ring.
fn retriangulate_star<T: Tracer>(mesh: &mut Mesh, v: Point, tracer: &mut T) -> Result<()> {
    let old = mesh.index.incident(&v);
    let neighbours = mesh
        .graph
        .neighbours(&v)
        .ok_or(LocatorError::VertexNotInGraph(v))?;
    let ring = sort_counter_clockwise(v, neighbours.iter().copied());

    let new = ear_clip(mesh, &ring, false, tracer)?;

    for &parent in &new {
        for &child in &old {
            let overlaps = match (mesh.hierarchy.get(parent), mesh.hierarchy.get(child)) {
                (Some(p), Some(c)) => p.intersects(c),
                _ => false,
            };
            if overlaps {
                mesh.hierarchy.add_child(parent, child);
                tracer.trace(TraceEvent::ChildLinked { parent, child });
            }
        }
    }

    for &id in &old {
        if let Some(vertices) = mesh.hierarchy.get(id).map(|t| *t.vertices()) {
            mesh.index.remove_triangle(id, &vertices);
        }
    }
    mesh.index.remove_vertex(&v);

    tracer.trace(TraceEvent::Retriangulated {
        vertex: v,
        old: old.len(),
        new: new.len(),
    });
    Ok(())
}

/// The single triangle still indexed once refinement is over.
fn top_triangle(mesh: &Mesh) -> Result<TriangleId> {
    let live = mesh.index.live_triangles();
    let mut iter = live.iter();
    match (iter.next(), iter.next()) {
        (Some(&root), None) => Ok(root),
        _ => Err(LocatorError::Topology(format!(
            "expected one triangle after refinement, found {} ({} vertices left)",
            live.len(),
            mesh.graph.vertex_count()
        ))),
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
