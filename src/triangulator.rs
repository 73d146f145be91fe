//! Initial triangulation and star re-triangulation.
//!
//! Everything here writes through [`Mesh::add_triangle`], which keeps the
//! planar graph, the triangle arena and the vertex index in step.

use crate::error::{LocatorError, Result};
use crate::geometry::{is_ear, is_right_turn, point_in_triangle, Point};
use crate::graph::PlanarGraph;
use crate::hierarchy::{Triangle, TriangleHierarchy, TriangleId, VertexTriangleIndex};
use crate::trace::{TraceEvent, Tracer};

/// Working state shared by the triangulator and the refinement rounds.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub graph: PlanarGraph,
    pub hierarchy: TriangleHierarchy,
    pub index: VertexTriangleIndex,
    /// Level stamped on newly created triangles.
    pub level: usize,
}

impl Mesh {
    /// A mesh holding only the outer triangle's vertices and edges.
    pub fn new(outer: [Point; 3]) -> Result<Self> {
        Ok(Self {
            graph: PlanarGraph::new(outer)?,
            hierarchy: TriangleHierarchy::new(),
            index: VertexTriangleIndex::new(),
            level: 0,
        })
    }

    /// Registers a counter-clockwise triangle: its edges go into the graph,
    /// the triangle into the arena and the vertex index.
    pub fn add_triangle<T: Tracer>(
        &mut self,
        vertices: [Point; 3],
        is_inside: bool,
        tracer: &mut T,
    ) -> Result<TriangleId> {
        let [a, b, c] = vertices;
        self.graph.add_edge(a, b)?;
        self.graph.add_edge(b, c)?;
        self.graph.add_edge(c, a)?;

        let id = self.hierarchy.push(Triangle::new(vertices, is_inside, self.level));
        self.index.insert(id, &vertices);
        tracer.trace(TraceEvent::TriangleAdded {
            id,
            vertices,
            is_inside,
        });
        Ok(id)
    }
}

/// Ear clipping of a simple counter-clockwise ring into `ring.len() - 2` triangles.
///
/// Runs a stack over the ring: while the top two available vertices and the
/// next ring vertex form an ear, the ear is emitted and its tip popped. A
/// single pass never looks at the two triples straddling the ring's seam, so
/// whatever is left is rotated by one and scanned again.
pub fn ear_clip<T: Tracer>(
    mesh: &mut Mesh,
    ring: &[Point],
    is_inside: bool,
    tracer: &mut T,
) -> Result<Vec<TriangleId>> {
    let mut generated = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut remaining = ring.to_vec();
    let mut stalled = 0;

    while remaining.len() > 2 {
        let clipped_before = generated.len();
        let mut avail: Vec<Point> = Vec::with_capacity(remaining.len());

        for &pt in &remaining {
            while avail.len() > 1 {
                let tip = avail[avail.len() - 1];
                let base = avail[avail.len() - 2];
                if !is_ear(base, tip, pt, ring) {
                    break;
                }
                generated.push(mesh.add_triangle([base, tip, pt], is_inside, tracer)?);
                avail.pop();
            }
            avail.push(pt);
        }
        remaining = avail;

        if generated.len() == clipped_before {
            stalled += 1;
            if stalled > remaining.len() {
                return Err(LocatorError::Triangulation(format!(
                    "no ear found among {} remaining vertices starting at {}",
                    remaining.len(),
                    remaining[0]
                )));
            }
        } else {
            stalled = 0;
        }

        if remaining.len() > 2 {
            remaining.rotate_left(1);
        }
    }

    Ok(generated)
}

/// Triangulates the pockets between a counter-clockwise polygon and its
/// convex hull, and returns the hull.
///
/// The scan starts at the leftmost vertex (lowest on ties) and walks once
/// around the polygon back to it, so the returned hull begins and ends with
/// that vertex. A right turn whose triangle holds no other polygon vertex is
/// a pocket: it is emitted (tagged outside) and the hull's last vertex popped.
pub fn triangulate_pockets<T: Tracer>(
    mesh: &mut Mesh,
    polygon: &[Point],
    tracer: &mut T,
) -> Result<Vec<Point>> {
    let n = polygon.len();
    if n < 3 {
        return Err(LocatorError::InsufficientVertices(n));
    }
    let leftmost = (0..n).min_by_key(|&i| polygon[i]).unwrap_or(0);

    let mut hull: Vec<Point> = Vec::with_capacity(n + 1);
    for step in 0..2 {
        let pt = polygon[(leftmost + step) % n];
        tracer.trace(TraceEvent::HullPush(pt));
        hull.push(pt);
    }

    for step in 2..=n {
        let pt = polygon[(leftmost + step) % n];
        while hull.len() > 1 {
            let last = hull[hull.len() - 1];
            let prev = hull[hull.len() - 2];
            if !is_right_turn(prev, last, pt) {
                break;
            }
            // Make sure no other vertex lies in this triangle.
            let blocked = polygon
                .iter()
                .filter(|&&p| p != prev && p != last && p != pt)
                .any(|&p| point_in_triangle(pt, last, prev, p));
            if blocked {
                break;
            }
            tracer.trace(TraceEvent::Pocket([pt, last, prev]));
            mesh.add_triangle([pt, last, prev], false, tracer)?;
            tracer.trace(TraceEvent::HullPop(last));
            hull.pop();
        }
        tracer.trace(TraceEvent::HullPush(pt));
        hull.push(pt);
    }

    Ok(hull)
}

/// Fills the gap between the convex hull and the outer triangle.
///
/// `hull` is counter-clockwise, starts at its leftmost vertex and repeats it
/// at the end; `outer` is counter-clockwise starting at the lower-left corner.
/// The leftmost hull vertex is joined to corners 2 and 0. Walking the hull,
/// each edge is joined to the corner currently in view. The view moves on
/// (0 -> 1 -> 2) at a hull vertex when the current corner cannot see the
/// next edge or the following corner already can; the last vertex closes
/// the fan up to corner 2.
pub fn stitch_outer_triangle<T: Tracer>(
    mesh: &mut Mesh,
    hull: &[Point],
    outer: &[Point; 3],
    tracer: &mut T,
) -> Result<()> {
    let Some(&first) = hull.first() else {
        return Err(LocatorError::Triangulation("empty convex hull".to_string()));
    };
    mesh.add_triangle([first, outer[2], outer[0]], false, tracer)?;

    // An edge a -> b of a counter-clockwise hull is visible from o if o lies to its right.
    let sees = |o: Point, a: Point, b: Point| is_right_turn(o, a, b);

    let mut corner = 0;
    for i in 0..hull.len() {
        if i > 0 && sees(outer[corner], hull[i - 1], hull[i]) {
            mesh.add_triangle([hull[i - 1], outer[corner], hull[i]], false, tracer)?;
        }
        while corner < 2 {
            if let Some(&next) = hull.get(i + 1) {
                let blind = !sees(outer[corner], hull[i], next);
                let handover = i > 0 && sees(outer[corner + 1], hull[i], next);
                if !blind && !handover {
                    break;
                }
            }
            tracer.trace(TraceEvent::CornerSees {
                corner: corner + 1,
                hull_vertex: hull[i],
            });
            mesh.add_triangle([outer[corner], outer[corner + 1], hull[i]], false, tracer)?;
            corner += 1;
        }
    }
    Ok(())
}

/// Adds the polygon ring to the graph, then ear clips the polygon (inside)
/// and fills the pockets and the outer gap (outside).
/// `polygon` must already be counter-clockwise.
pub fn initial_triangulation<T: Tracer>(
    mesh: &mut Mesh,
    polygon: &[Point],
    outer: &[Point; 3],
    tracer: &mut T,
) -> Result<()> {
    mesh.graph.add_ring(polygon)?;
    ear_clip(mesh, polygon, true, tracer)?;
    let hull = triangulate_pockets(mesh, polygon, tracer)?;
    stitch_outer_triangle(mesh, &hull, outer, tracer)?;
    Ok(())
}

#[cfg(test)]
#[path = "triangulator_tests.rs"]
mod tests;
