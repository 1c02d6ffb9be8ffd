use ahash::AHashMap;
use geo::{Coord, Rect};
use smallvec::SmallVec;

use crate::geom::{candidate_pairs, is_colinear, BoundingBox};
use crate::map::{EdgeId, EdgeShape, Map, VertexId};

/// Upper bound on split-and-rescan rounds when dividing intersections.
const MAX_ROUNDS: usize = 16;

impl Map {
    /// Remove loops, edges between coincident points, and edges that lost
    /// an endpoint.  Returns the number of edges removed.
    pub(crate) fn remove_bad_edges(&mut self) -> usize {
        let bad: Vec<EdgeId> = self.edge_ids().into_iter()
            .filter(|&e| self.is_trivial(e))
            .collect();
        for &e in &bad {
            self.remove_edge(e);
        }
        bad.len()
    }

    /// Put a vertex at every crossing and split the edges through it,
    /// repeating until no crossing is left.  Returns the number of vertices
    /// added.
    pub(crate) fn divide_intersecting_edges(&mut self) -> usize {
        let before = self.num_vertices();
        for _ in 0..MAX_ROUNDS {
            let points: Vec<Coord<f64>> = self.crossings().into_iter().map(|(_, _, p)| p).collect();
            if points.is_empty() { break; }
            for p in points {
                let v = self.insert_vertex(p);
                self.split_edges_at(v);
            }
        }
        self.num_vertices() - before
    }

    /// Merge every vertex into an earlier one lying within the "near"
    /// tolerance, then drop the loops and duplicates this creates.  Returns
    /// the number of vertices merged away.
    pub(crate) fn coalesce_near_vertices(&mut self) -> usize {
        let tol = *self.tolerance();
        let points: Vec<(VertexId, Coord<f64>)> = self.get_vertices()
            .map(|(id, v)| (id, v.pos()))
            .collect();
        let boxes = points.iter().enumerate()
            .map(|(i, &(_, p))| BoundingBox::new(i, Rect::new(p, p), tol.near * 0.5))
            .collect();

        let mut target: Vec<Option<usize>> = vec![None; points.len()];
        for (i, j) in candidate_pairs(boxes) {
            if target[j].is_some() || !tol.is_near(points[i].1, points[j].1) { continue; }
            let root = target[i].unwrap_or(i);
            if root != j {
                target[j] = Some(root);
            }
        }

        let remap: AHashMap<VertexId, VertexId> = target.iter().enumerate()
            .filter_map(|(j, t)| t.map(|root| (points[j].0, points[root].0)))
            .collect();
        if remap.is_empty() { return 0; }

        self.redirect_edges(&remap);
        for &v in remap.keys() {
            self.remove_vertex(v);
        }
        self.remove_bad_edges();
        self.remove_duplicate_edges();
        remap.len()
    }

    /// Keep one edge of every group of equivalent edges between the same
    /// pair of vertices.  A line and an arc between the same vertices are
    /// not equivalent.  Returns the number of edges removed.
    pub(crate) fn remove_duplicate_edges(&mut self) -> usize {
        let tol = *self.tolerance();
        let mut kept: AHashMap<(VertexId, VertexId), SmallVec<[EdgeId; 2]>> = AHashMap::new();
        let mut duplicates = Vec::new();
        for (id, e) in self.get_edges() {
            let list = kept.entry((e.v1().min(e.v2()), e.v1().max(e.v2()))).or_default();
            if list.iter().any(|&k| self.edge(k).is_some_and(|k| k.duplicates(e, &tol))) {
                duplicates.push(id);
            } else {
                list.push(id);
            }
        }
        for &e in &duplicates {
            self.remove_edge(e);
        }
        duplicates.len()
    }

    /// Remove vertices with exactly one edge, along with that edge, until
    /// none are left.  Returns the number of vertices removed.
    pub(crate) fn remove_dangling_vertices(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let dangling = self.vertices_of_degree(1);
            if dangling.is_empty() { break; }
            for v in dangling {
                self.remove_vertex(v);
                removed += 1;
            }
        }
        removed
    }

    /// Remove vertices with no edges.  Returns the number removed.
    pub(crate) fn remove_isolated_vertices(&mut self) -> usize {
        let isolated = self.vertices_of_degree(0);
        for &v in &isolated {
            self.remove_vertex(v);
        }
        isolated.len()
    }

    /// Replace every pair of colinear lines meeting at a degree-2 vertex by
    /// one line, deleting the vertex.  Returns the number of vertices removed.
    pub(crate) fn join_colinear_edges(&mut self) -> usize {
        let mut joined = 0;
        loop {
            let candidates: Vec<VertexId> = self.neighbours().iter()
                .filter(|(_, star)| star.len() == 2)
                .map(|(v, _)| v)
                .collect();
            let before = joined;
            for v in candidates {
                if self.join_colinear_at(v) {
                    joined += 1;
                }
            }
            if joined == before { break; }
        }
        joined
    }

    fn join_colinear_at(&mut self, v: VertexId) -> bool {
        let edges = self.edges_of(v);
        let [e1, e2] = edges[..] else { return false };
        let (Some(first), Some(second)) = (self.edge(e1), self.edge(e2)) else { return false };
        if !first.shape().is_line() || !second.shape().is_line() || first.is_loop() || second.is_loop() {
            return false;
        }
        let (Some(a), Some(b)) = (first.other(v), second.other(v)) else { return false };
        if a == b { return false; }
        let (Some(pv), Some(pa), Some(pb)) = (self.position(v), self.position(a), self.position(b)) else {
            return false;
        };
        if !is_colinear(pa, pv, pb, self.tolerance()) {
            return false;
        }

        self.remove_vertex(v);
        self.add_edge_unique(a, b, EdgeShape::Line);
        true
    }

    fn vertices_of_degree(&self, degree: usize) -> Vec<VertexId> {
        let degrees = self.degrees();
        self.get_vertices()
            .map(|(id, _)| id)
            .filter(|v| degrees[v.0] == degree)
            .collect()
    }
}
