use super::{EdgeId, EdgePoly, Map, PolyEdge, VertexId};

impl Map {
    /// Chain the edges into ordered runs.
    ///
    /// Open runs start at vertices whose degree is not 2 and stop at the
    /// next such vertex; the edges left over form closed loops, each walked
    /// from its lowest-numbered edge.  Every edge appears in exactly one run.
    pub fn get_edge_poly(&self) -> Vec<EdgePoly> {
        let neighbours = self.neighbours();
        let mut used = vec![false; self.edges.len()];
        let mut runs = Vec::new();

        for (v, edges) in neighbours.iter() {
            if edges.len() == 2 { continue; }
            for &e in edges {
                if !used[e.0] {
                    runs.push(self.walk(v, e, &mut used));
                }
            }
        }
        for (id, edge) in self.get_edges() {
            if !used[id.0] {
                runs.push(self.walk(edge.v1(), id, &mut used));
            }
        }
        runs
    }

    /// Follow edges from `start` along `first` through degree-2 vertices.
    fn walk(&self, start: VertexId, first: EdgeId, used: &mut [bool]) -> EdgePoly {
        let neighbours = self.neighbours();
        let mut poly = EdgePoly::new();
        let (mut at, mut edge) = (start, first);
        loop {
            used[edge.0] = true;
            let Some(piece) = self.oriented(edge, at) else { break };
            poly.push(piece);
            let Some(next_vertex) = self.edge(edge).and_then(|e| e.other(at)) else { break };
            at = next_vertex;

            let around = neighbours.neighbours(at);
            if around.len() != 2 { break; }
            match around.iter().copied().find(|&e| !used[e.0]) {
                Some(e) => edge = e,
                None => break,
            }
        }
        poly
    }

    /// `edge` as a [`PolyEdge`] leaving `from`.
    fn oriented(&self, edge: EdgeId, from: VertexId) -> Option<PolyEdge> {
        let e = self.edge(edge)?;
        let p1 = self.position(e.v1())?;
        let p2 = self.position(e.v2())?;
        if e.v1() == from {
            Some(PolyEdge::new(p1, p2, *e.shape()))
        } else {
            Some(PolyEdge::new(p2, p1, e.shape().reversed()))
        }
    }
}
