//! Topology repair: independently selectable passes that remove the
//! degeneracies floating-point construction leaves behind.

mod passes;

use bitflags::bitflags;
use tracing::debug;

use crate::map::Map;

bitflags! {
    /// Selects cleansing passes, and reports which of them changed a map.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Cleanse: u16 {
        /// Edges that are loops, join coincident points, or lost an endpoint.
        const BAD_EDGES            = 0b0000_0001;
        /// Vertices with no edges.
        const ISOLATED_VERTICES    = 0b0000_0010;
        /// Vertices with exactly one edge (repeated until none are left).
        const DANGLING_VERTICES    = 0b0000_0100;
        /// Degree-2 vertices between two colinear lines.
        const COLINEAR_EDGES       = 0b0000_1000;
        /// Crossings without a vertex.
        const INTERSECTING_EDGES   = 0b0001_0000;
        /// Vertices closer than the "near" tolerance.
        const NEAR_VERTICES        = 0b0010_0000;
        /// Several equivalent edges between one pair of vertices.
        const DUPLICATE_NEIGHBOURS = 0b0100_0000;
    }
}

impl Cleanse {
    /// The passes that repair noise without changing the drawn pattern.
    pub fn default_passes() -> Self {
        Self::BAD_EDGES
            | Self::INTERSECTING_EDGES
            | Self::NEAR_VERTICES
            | Self::DUPLICATE_NEIGHBOURS
            | Self::ISOLATED_VERTICES
    }
}

/// Pass order.  Dangling vertices go before isolated ones because removing a
/// dangling edge can leave its far end isolated.
const ORDER: [(Cleanse, &str, fn(&mut Map)); 7] = [
    (Cleanse::BAD_EDGES, "bad edges", |m| { m.remove_bad_edges(); }),
    (Cleanse::INTERSECTING_EDGES, "intersecting edges", |m| { m.divide_intersecting_edges(); }),
    (Cleanse::NEAR_VERTICES, "near vertices", |m| { m.coalesce_near_vertices(); }),
    (Cleanse::DUPLICATE_NEIGHBOURS, "duplicate neighbours", |m| { m.remove_duplicate_edges(); }),
    (Cleanse::DANGLING_VERTICES, "dangling vertices", |m| { m.remove_dangling_vertices(); }),
    (Cleanse::ISOLATED_VERTICES, "isolated vertices", |m| { m.remove_isolated_vertices(); }),
    (Cleanse::COLINEAR_EDGES, "colinear edges", |m| { m.join_colinear_edges(); }),
];

impl Map {
    /// Run the selected passes in a fixed order and return the ones that
    /// changed the vertex or edge count.
    pub fn cleanse(&mut self, passes: Cleanse) -> Cleanse {
        let mut changed = Cleanse::empty();
        for (flag, name, pass) in ORDER {
            if !passes.contains(flag) { continue; }

            let before = (self.num_vertices(), self.num_edges());
            pass(self);
            let after = (self.num_vertices(), self.num_edges());
            debug!(
                pass = name,
                vertices_before = before.0,
                edges_before = before.1,
                vertices_after = after.0,
                edges_after = after.1,
                "cleanse"
            );
            if before != after {
                changed |= flag;
            }
        }
        changed
    }

    /// Report which of the selected passes would change the map, without
    /// changing it.
    pub fn analyze(&self, passes: Cleanse) -> Cleanse {
        self.copy().cleanse(passes)
    }
}
