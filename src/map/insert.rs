use geo::Coord;
use tracing::{trace, warn};

use super::{EdgeId, EdgeShape, Map, VertexId};

impl Map {
    /// Get the vertex at `p`, creating it if no vertex lies within `eps`.
    ///
    /// A newly created vertex splits every edge whose interior passes
    /// through it, so the map never has a vertex sitting unattached on an
    /// edge.
    pub fn insert_vertex(&mut self, p: Coord<f64>) -> VertexId {
        if let Some(v) = self.find_vertex(p) {
            return v;
        }
        let v = self.push_vertex(p);
        self.split_edges_at(v);
        v
    }

    /// Split every edge whose interior contains vertex `v` into two pieces
    /// meeting at `v`.  Returns the number of edges split.
    pub fn split_edges_at(&mut self, v: VertexId) -> usize {
        let Some(p) = self.position(v) else { return 0 };
        let tol = self.tolerance;

        let hit: Vec<EdgeId> = self.get_edges()
            .filter(|(_, e)| !e.touches(v))
            .filter(|(_, e)| self.segment_of(e).is_some_and(|s| s.contains_interior(p, &tol)))
            .map(|(id, _)| id)
            .collect();

        hit.iter().filter(|&&e| self.split_edge(e, v).is_some()).count()
    }

    /// Replace edge `e` by two edges meeting at `v`, keeping its shape (arc
    /// pieces share the original center and direction).
    ///
    /// Returns the two pieces, or `None` if `e` is gone or `v` is one of its
    /// endpoints.
    pub fn split_edge(&mut self, e: EdgeId, v: VertexId) -> Option<(EdgeId, EdgeId)> {
        let edge = self.edge(e)?.clone();
        if edge.touches(v) || self.vertex(v).is_none() {
            return None;
        }
        self.remove_edge(e);
        let a = self.add_edge_unique(edge.v1(), v, *edge.shape());
        let b = self.add_edge_unique(v, edge.v2(), *edge.shape());
        trace!(edge = %e, vertex = %v, pieces = ?(a, b), "split edge");
        Some((a, b))
    }

    /// Join `v1` and `v2` with an edge of the given shape (read in the
    /// `v1 -> v2` direction), splitting it and every edge it meets so that
    /// no two edges cross except at a shared vertex.
    ///
    /// Returns the pieces the new edge was cut into, in order from `v1`.
    /// Inserting an edge that already exists returns the existing edge.
    pub fn insert_edge(&mut self, v1: VertexId, v2: VertexId, shape: EdgeShape) -> Vec<EdgeId> {
        let (Some(p1), Some(p2)) = (self.position(v1), self.position(v2)) else {
            warn!(%v1, %v2, "insert_edge with a missing endpoint");
            return Vec::new();
        };
        if let Some(e) = self.find_edge(v1, v2, &shape) {
            return vec![e];
        }
        let tol = self.tolerance;
        if v1 == v2 || tol.point_eq(p1, p2) {
            return vec![self.push_edge(v1, v2, shape)];
        }

        // Edges passing through the cutter's own endpoints.
        self.split_edges_at(v1);
        self.split_edges_at(v2);

        let cutter = shape.segment(p1, p2);
        let mut cuts: Vec<Coord<f64>> = self.get_edges()
            .filter_map(|(_, e)| self.segment_of(e))
            .flat_map(|s| cutter.crossings(&s, &tol))
            .filter(|&p| !cutter.is_endpoint(p, &tol))
            .collect();
        cuts.extend(self.get_vertices()
            .map(|(_, v)| v.pos())
            .filter(|&p| cutter.contains_interior(p, &tol)));

        let cut_vertices: Vec<VertexId> = cuts.into_iter()
            .map(|p| self.insert_vertex(p))
            .filter(|&v| v != v1 && v != v2)
            .collect();
        let mut stops: Vec<(f64, VertexId)> = cut_vertices.into_iter()
            .filter_map(|v| self.position(v).map(|p| (cutter.param(p, &tol), v)))
            .collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        stops.dedup_by_key(|s| s.1);

        let mut pieces = Vec::with_capacity(stops.len() + 1);
        let mut from = v1;
        for to in stops.into_iter().map(|(_, v)| v).chain(std::iter::once(v2)) {
            if to != from {
                pieces.push(self.add_edge_unique(from, to, shape));
            }
            from = to;
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use crate::geom::Segment;

    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    #[test]
    fn vertex_on_edge_splits_it() {
        let mut map = Map::new();
        let a = map.insert_vertex(c(0.0, 0.0));
        let b = map.insert_vertex(c(2.0, 0.0));
        map.insert_edge(a, b, EdgeShape::Line);

        let m = map.insert_vertex(c(1.0, 0.0));
        assert_eq!(map.num_edges(), 2);
        assert_eq!(map.edges_of(m).len(), 2);
        // Same point again: no new vertex.
        assert_eq!(map.insert_vertex(c(1.0, 0.0 + 1e-9)), m);
        assert_eq!(map.num_vertices(), 3);
    }

    #[test]
    fn crossing_lines_split_each_other() {
        let mut map = Map::new();
        let a = map.insert_vertex(c(0.0, 0.0));
        let b = map.insert_vertex(c(2.0, 2.0));
        let d = map.insert_vertex(c(2.0, 0.0));
        let e = map.insert_vertex(c(0.0, 2.0));
        map.insert_edge(a, b, EdgeShape::Line);
        let pieces = map.insert_edge(d, e, EdgeShape::Line);

        assert_eq!(pieces.len(), 2);
        assert_eq!(map.num_vertices(), 5);
        assert_eq!(map.num_edges(), 4);
        let mid = map.find_vertex(c(1.0, 1.0)).unwrap();
        assert_eq!(map.degree(mid), 4);
    }

    #[test]
    fn pieces_follow_the_cutter() {
        let mut map = Map::new();
        for x in [1.0, 2.0, 3.0] {
            let lo = map.insert_vertex(c(x, -1.0));
            let hi = map.insert_vertex(c(x, 1.0));
            map.insert_edge(lo, hi, EdgeShape::Line);
        }
        // Inserted right to left.
        let a = map.insert_vertex(c(4.0, 0.0));
        let b = map.insert_vertex(c(0.0, 0.0));
        let pieces = map.insert_edge(a, b, EdgeShape::Line);
        assert_eq!(pieces.len(), 4);

        let starts: Vec<f64> = pieces.iter()
            .map(|&e| {
                let edge = map.edge(e).unwrap();
                map.position(edge.v1()).unwrap().x.max(map.position(edge.v2()).unwrap().x)
            })
            .collect();
        assert_eq!(starts, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn arc_is_cut_by_a_line() {
        let mut map = Map::new();
        let center = c(0.0, 0.0);
        let a = map.insert_vertex(c(1.0, 0.0));
        let b = map.insert_vertex(c(-1.0, 0.0));
        map.insert_edge(a, b, EdgeShape::Arc { center, convex: true });

        let lo = map.insert_vertex(c(0.0, 0.0));
        let hi = map.insert_vertex(c(0.0, 2.0));
        map.insert_edge(lo, hi, EdgeShape::Line);

        assert_eq!(map.num_edges(), 4);
        let top = map.find_vertex(c(0.0, 1.0)).unwrap();
        for e in map.edges_of(top) {
            if let Some(Segment::Arc(arc)) = map.segment(e) {
                assert_eq!(arc.center, center);
                assert!(arc.convex);
            }
        }
    }

    #[test]
    fn overlapping_line_reuses_existing_piece() {
        let mut map = Map::new();
        let a = map.insert_vertex(c(0.0, 0.0));
        let b = map.insert_vertex(c(2.0, 0.0));
        map.insert_edge(a, b, EdgeShape::Line);

        let d = map.insert_vertex(c(1.0, 0.0));
        let e = map.insert_vertex(c(3.0, 0.0));
        map.insert_edge(d, e, EdgeShape::Line);

        // 0-1, 1-2, 2-3
        assert_eq!(map.num_vertices(), 4);
        assert_eq!(map.num_edges(), 3);
    }

    #[test]
    fn trivial_edge_is_tolerated() {
        let mut map = Map::new();
        let a = map.insert_vertex(c(0.0, 0.0));
        let pieces = map.insert_edge(a, a, EdgeShape::Line);
        assert_eq!(pieces.len(), 1);
        assert!(map.is_trivial(pieces[0]));
    }
}
