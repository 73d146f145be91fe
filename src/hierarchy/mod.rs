//! Triangle DAG produced by the refinement rounds.
//!
//! Triangles live in an arena and refer to their children by [`TriangleId`].
//! A child always comes from an earlier round than its parent, so the graph
//! is acyclic without any extra bookkeeping.

pub mod index;

pub use index::VertexTriangleIndex;


use crate::geometry::{point_in_triangle, segments_intersect, Point, Segment};
use smallvec::SmallVec;
use std::fmt;

pub type TriangleId = usize;

#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [Point; 3],
    is_inside: bool,
    /// Refinement round that created this triangle; 0 for the initial triangulation.
    level: usize,
    children: SmallVec<[TriangleId; 8]>,
}

impl Triangle {
    pub fn new(vertices: [Point; 3], is_inside: bool, level: usize) -> Self {
        Self {
            vertices,
            is_inside,
            level,
            children: SmallVec::new(),
        }
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    pub fn is_inside(&self) -> bool {
        self.is_inside
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn children(&self) -> &[TriangleId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Boundary-inclusive containment.
    pub fn contains(&self, pt: Point) -> bool {
        let [a, b, c] = self.vertices;
        point_in_triangle(a, b, c, pt)
    }

    pub fn edges(&self) -> [Segment; 3] {
        let [a, b, c] = self.vertices;
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)]
    }

    /// True if any edge of `self` touches any edge of `other`.
    pub fn intersects(&self, other: &Triangle) -> bool {
        let theirs = other.edges();
        self.edges()
            .iter()
            .any(|s1| theirs.iter().any(|s2| segments_intersect(s1, s2)))
    }

    /// Twice the (positive) area; triangles are stored counter-clockwise.
    pub fn area_2x(&self) -> i128 {
        let [a, b, c] = self.vertices;
        crate::geometry::determinant(a, b, c)
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.vertices;
        write!(f, "triangle {{ {a} {b} {c} }}")
    }
}

/// Arena owning every triangle ever created, plus the root once refinement is done.
#[derive(Clone, Debug, Default)]
pub struct TriangleHierarchy {
    triangles: Vec<Triangle>,
    root: Option<TriangleId>,
}

impl TriangleHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, triangle: Triangle) -> TriangleId {
        let id = self.triangles.len();
        self.triangles.push(triangle);
        id
    }

    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id)
    }

    pub fn add_child(&mut self, parent: TriangleId, child: TriangleId) {
        debug_assert!(child < parent, "children must predate their parent");
        if let Some(t) = self.triangles.get_mut(parent) {
            t.children.push(child);
        }
    }

    pub fn set_root(&mut self, root: TriangleId) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<TriangleId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> + '_ {
        self.triangles.iter().enumerate()
    }

    pub fn leaves(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> + '_ {
        self.iter().filter(|(_, t)| t.is_leaf())
    }

    /// Edges on the longest root-to-leaf path; 0 without a root.
    ///
    /// Bounded by the root's [`Triangle::level`], but shorter when every
    /// child of some triangle skips a round.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        // Children always have smaller ids, so one forward pass settles every height.
        let mut heights = vec![0usize; self.triangles.len()];
        for (id, t) in self.triangles.iter().enumerate().take(root + 1) {
            heights[id] = t
                .children
                .iter()
                .map(|&c| heights[c] + 1)
                .max()
                .unwrap_or(0);
        }
        heights.get(root).copied().unwrap_or(0)
    }

    /// Point-in-polygon query starting at the root.
    ///
    /// A triangle that does not contain `pt` answers false, a leaf answers
    /// with its tag, and an inner triangle answers true if any child does.
    pub fn query(&self, pt: Point) -> bool {
        self.root.map_or(false, |root| self.query_from(root, pt))
    }

    fn query_from(&self, id: TriangleId, pt: Point) -> bool {
        let Some(t) = self.get(id) else {
            return false;
        };
        if !t.contains(pt) {
            return false;
        }
        if t.is_leaf() {
            return t.is_inside;
        }
        t.children.iter().any(|&child| self.query_from(child, pt))
    }

    /// Leaf triangle that decides the answer for `pt`.
    ///
    /// Prefers a leaf tagged inside; otherwise returns the first containing
    /// leaf found. `None` when `pt` is outside the root.
    pub fn locate(&self, pt: Point) -> Option<TriangleId> {
        let root = self.root?;
        let mut fallback = None;
        self.descend(root, pt, &mut fallback).or(fallback)
    }

    fn descend(
        &self,
        id: TriangleId,
        pt: Point,
        fallback: &mut Option<TriangleId>,
    ) -> Option<TriangleId> {
        let t = self.get(id)?;
        if !t.contains(pt) {
            return None;
        }
        if t.is_leaf() {
            if t.is_inside {
                return Some(id);
            }
            if fallback.is_none() {
                *fallback = Some(id);
            }
            return None;
        }
        t.children
            .iter()
            .find_map(|&child| self.descend(child, pt, fallback))
    }
}
