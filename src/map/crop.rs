use super::{Containment, EdgeId, EdgePoly, Map};

impl Map {
    /// Insert `boundary`, then keep only what lies on or inside it.  An edge
    /// is judged by its midpoint; insertion has already cut every edge at the
    /// boundary, so each piece is wholly on one side.
    pub fn embed_crop(&mut self, boundary: &EdgePoly) {
        self.insert_edge_poly(boundary);
        let tol = self.tolerance;
        let outside: Vec<EdgeId> = self.get_edges()
            .filter(|(_, e)| self.segment_of(e)
                .is_some_and(|s| boundary.containment(s.midpoint(), &tol) == Containment::Outside))
            .map(|(id, _)| id)
            .collect();
        for e in outside {
            self.remove_edge(e);
        }
        self.remove_isolated_vertices();
    }

    /// Insert `boundary`, then delete every edge with an endpoint strictly
    /// outside it.
    pub fn crop_outside(&mut self, boundary: &EdgePoly) {
        self.insert_edge_poly(boundary);
        let tol = self.tolerance;
        let outside: Vec<EdgeId> = self.get_edges()
            .filter(|(_, e)| [e.v1(), e.v2()].into_iter().any(|v| {
                self.position(v)
                    .is_some_and(|p| boundary.containment(p, &tol) == Containment::Outside)
            }))
            .map(|(id, _)| id)
            .collect();
        for e in outside {
            self.remove_edge(e);
        }
        self.remove_isolated_vertices();
    }
}
