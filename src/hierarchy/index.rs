use super::TriangleId;
use crate::geometry::Point;
use std::collections::{BTreeMap, BTreeSet};

/// Triangles currently incident on each vertex.
///
/// Only "live" triangles are indexed: once a triangle is superseded by a
/// refinement round it is dropped from the entries of all three of its vertices.
#[derive(Clone, Debug, Default)]
pub struct VertexTriangleIndex {
    map: BTreeMap<Point, BTreeSet<TriangleId>>,
}

impl VertexTriangleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TriangleId, vertices: &[Point; 3]) {
        for v in vertices {
            self.map.entry(*v).or_default().insert(id);
        }
    }

    /// Snapshot of the triangles around `v`, in creation order.
    pub fn incident(&self, v: &Point) -> Vec<TriangleId> {
        self.map
            .get(v)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn remove_triangle(&mut self, id: TriangleId, vertices: &[Point; 3]) {
        for v in vertices {
            if let Some(set) = self.map.get_mut(v) {
                set.remove(&id);
            }
        }
    }

    pub fn remove_vertex(&mut self, v: &Point) {
        self.map.remove(v);
    }

    /// Every distinct triangle still indexed.
    pub fn live_triangles(&self) -> BTreeSet<TriangleId> {
        self.map.values().flatten().copied().collect()
    }
}
