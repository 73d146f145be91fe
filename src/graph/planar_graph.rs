use crate::error::{LocatorError, Result};
use crate::geometry::{Point, Segment};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Undirected planar graph keyed by exact points.
///
/// Adjacency is kept symmetric: `v` is in `u`'s set iff `u` is in `v`'s set.
/// The three special vertices of the outer triangle are permanent and never
/// offered for removal by [`PlanarGraph::independent_set`].
#[derive(Clone, Debug)]
pub struct PlanarGraph {
    adjacency: BTreeMap<Point, BTreeSet<Point>>,
    special: [Point; 3],
}

impl PlanarGraph {
    /// Creates a graph holding only the outer triangle.
    pub fn new(special: [Point; 3]) -> Result<Self> {
        let mut graph = Self {
            adjacency: BTreeMap::new(),
            special,
        };
        graph.add_ring(&special)?;
        Ok(graph)
    }

    /// Inserts an isolated vertex. Adding a vertex twice is an error: it would
    /// otherwise drop the adjacency the vertex already has.
    pub fn add(&mut self, v: Point) -> Result<()> {
        if self.adjacency.contains_key(&v) {
            return Err(LocatorError::DuplicateVertex(v));
        }
        self.adjacency.insert(v, BTreeSet::new());
        Ok(())
    }

    /// Connects two existing vertices. Repeating an edge is a no-op.
    pub fn add_edge(&mut self, u: Point, v: Point) -> Result<()> {
        if u == v {
            return Err(LocatorError::SelfLoop(u));
        }
        if !self.adjacency.contains_key(&u) {
            return Err(LocatorError::VertexNotInGraph(u));
        }
        if !self.adjacency.contains_key(&v) {
            return Err(LocatorError::VertexNotInGraph(v));
        }
        if let Some(n) = self.adjacency.get_mut(&u) {
            n.insert(v);
        }
        if let Some(n) = self.adjacency.get_mut(&v) {
            n.insert(u);
        }
        Ok(())
    }

    /// Adds every point of a closed ring, plus its cycle of edges.
    pub fn add_ring(&mut self, points: &[Point]) -> Result<()> {
        for &p in points {
            self.add(p)?;
        }
        for (i, &p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            if p != q {
                self.add_edge(p, q)?;
            }
        }
        Ok(())
    }

    pub fn contains(&self, v: &Point) -> bool {
        self.adjacency.contains_key(v)
    }

    pub fn is_special(&self, v: &Point) -> bool {
        self.special.contains(v)
    }

    pub fn special(&self) -> [Point; 3] {
        self.special
    }

    pub fn degree(&self, v: &Point) -> Option<usize> {
        self.adjacency.get(v).map(BTreeSet::len)
    }

    pub fn neighbours(&self, v: &Point) -> Option<&BTreeSet<Point>> {
        self.adjacency.get(v)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Point> + '_ {
        self.adjacency.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Every undirected edge exactly once, smaller endpoint first, sorted.
    pub fn edges(&self) -> Vec<Segment> {
        let mut res = Vec::with_capacity(self.edge_count());
        for (&p1, neighbours) in &self.adjacency {
            // BTreeSet iterates in order, so skip straight past the smaller half.
            for &p2 in neighbours.range(p1..) {
                res.push(Segment::new(p1, p2));
            }
        }
        res
    }

    /// Greedy bounded-degree independent set.
    ///
    /// One pass in ascending point order. A vertex is taken if its degree is at
    /// most `max_degree`, it is not special, and none of its neighbours was
    /// already taken. Not maximum, only valid.
    pub fn independent_set(&self, max_degree: usize) -> Vec<Point> {
        let mut res = Vec::new();
        let mut masked: BTreeSet<Point> = self.special.iter().copied().collect();
        for (&v, neighbours) in &self.adjacency {
            if neighbours.len() > max_degree || masked.contains(&v) {
                continue;
            }
            masked.extend(neighbours.iter().copied());
            res.push(v);
        }
        res
    }

    /// Deletes `v` together with all of its edges. Unknown vertices are ignored.
    pub fn remove(&mut self, v: &Point) {
        if let Some(neighbours) = self.adjacency.remove(v) {
            for n in neighbours {
                if let Some(adj) = self.adjacency.get_mut(&n) {
                    adj.remove(v);
                }
            }
        }
    }

    /// Removes a whole batch. The caller's slice is the snapshot: nothing is
    /// re-selected while the batch is being removed.
    pub fn remove_all(&mut self, vertices: &[Point]) {
        for v in vertices {
            self.remove(v);
        }
    }
}

impl fmt::Display for PlanarGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, neighbours) in &self.adjacency {
            write!(f, "{p}:")?;
            for n in neighbours {
                write!(f, " {n}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
