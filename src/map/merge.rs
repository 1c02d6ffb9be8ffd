use ahash::AHashMap;
use geo::{AffineTransform, Coord};

use crate::geom::Tolerance;

use super::{EdgeId, EdgePoly, EdgeShape, Map, VertexId};

impl Map {
    /// Insert every vertex and edge of `other`.  Vertices are matched by
    /// coordinate, edges go through [`Map::insert_edge`], so crossings
    /// between the two maps are split.
    pub fn merge_map(&mut self, other: &Map) {
        let mut remap: AHashMap<VertexId, VertexId> = AHashMap::with_capacity(other.num_vertices());
        for (id, v) in other.get_vertices() {
            remap.insert(id, self.insert_vertex(v.pos()));
        }
        for (_, e) in other.get_edges() {
            if let (Some(&v1), Some(&v2)) = (remap.get(&e.v1()), remap.get(&e.v2())) {
                self.insert_edge(v1, v2, *e.shape());
            }
        }
    }

    /// [`Map::merge_map`], matching coordinates with `tolerance` instead of
    /// this map's own.
    pub fn merge_map_with_tolerance(&mut self, other: &Map, tolerance: Tolerance) {
        let saved = std::mem::replace(&mut self.tolerance, tolerance);
        self.merge_map(other);
        self.tolerance = saved;
    }

    /// Merge one transformed copy of `other` per placement.
    pub fn merge_many(&mut self, other: &Map, placements: &[AffineTransform<f64>]) {
        for t in placements {
            self.merge_map(&other.transformed(t));
        }
    }

    /// Insert every edge of `poly`, returning the pieces created.
    pub fn insert_edge_poly(&mut self, poly: &EdgePoly) -> Vec<EdgeId> {
        let mut pieces = Vec::new();
        for edge in poly {
            let v1 = self.insert_vertex(edge.start);
            let v2 = self.insert_vertex(edge.end);
            pieces.extend(self.insert_edge(v1, v2, edge.shape));
        }
        pieces
    }

    /// Insert a straight edge between two points.
    pub fn insert_line(&mut self, p1: Coord<f64>, p2: Coord<f64>) -> Vec<EdgeId> {
        let v1 = self.insert_vertex(p1);
        let v2 = self.insert_vertex(p2);
        self.insert_edge(v1, v2, EdgeShape::Line)
    }

    /// Insert a circular arc from `p1` to `p2` around `center`; `convex`
    /// selects the counter-clockwise sweep.
    pub fn insert_arc(&mut self, p1: Coord<f64>, p2: Coord<f64>, center: Coord<f64>, convex: bool) -> Vec<EdgeId> {
        let v1 = self.insert_vertex(p1);
        let v2 = self.insert_vertex(p2);
        self.insert_edge(v1, v2, EdgeShape::Arc { center, convex })
    }
}
