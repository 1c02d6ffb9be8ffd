//! Per-vertex incident edges sorted by the direction in which they leave the
//! vertex.
//!
//! Built in one go from a [`Map`] and never patched: the map drops its copy
//! on every structural change and rebuilds it on the next request.

use smallvec::SmallVec;

use crate::geom::angle_of;
use crate::map::{EdgeId, Map, VertexId};

type Star = SmallVec<[EdgeId; 6]>;

/// Angle-sorted adjacency of a [`Map`].
///
/// Around each vertex, edges are listed counter-clockwise by the angle of
/// their outgoing tangent, starting from the positive x axis.  Equal angles
/// are ordered by edge id.  A self-loop is listed twice.
#[derive(Clone, Debug, Default)]
pub struct NeighbourMap {
    stars: Vec<Star>,
}

impl NeighbourMap {
    pub fn build(map: &Map) -> Self {
        let slots = map.get_vertices().last().map_or(0, |(v, _)| v.0 + 1);
        let mut keyed: Vec<Vec<(f64, EdgeId)>> = vec![Vec::new(); slots];

        for (id, edge) in map.get_edges() {
            let Some(segment) = map.segment_of(edge) else { continue };
            let (v1, v2) = (edge.v1().0, edge.v2().0);
            if v1 >= slots || v2 >= slots { continue; }
            keyed[v1].push((angle_of(segment.start_direction()), id));
            keyed[v2].push((angle_of(segment.end_direction()), id));
        }

        let stars = keyed.into_iter()
            .map(|mut star| {
                star.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                star.into_iter().map(|(_, e)| e).collect()
            })
            .collect();
        Self { stars }
    }

    /// Get the edges around `v`, counter-clockwise.  Empty for unknown or
    /// isolated vertices.
    #[inline]
    pub fn neighbours(&self, v: VertexId) -> &[EdgeId] {
        self.stars.get(v.0).map(|s| s.as_slice()).unwrap_or(&[])
    }

    #[inline] pub fn degree(&self, v: VertexId) -> usize { self.neighbours(v).len() }

    /// Get the index of `e` in the star of `v`.
    #[inline]
    pub fn position(&self, v: VertexId, e: EdgeId) -> Option<usize> {
        self.neighbours(v).iter().position(|&x| x == e)
    }

    /// The edge following `e` when turning clockwise around `v`.
    pub fn next_clockwise(&self, v: VertexId, e: EdgeId) -> Option<EdgeId> {
        let star = self.neighbours(v);
        let i = self.position(v, e)?;
        Some(star[(i + star.len() - 1) % star.len()])
    }

    /// The edge following `e` when turning counter-clockwise around `v`.
    pub fn next_counter_clockwise(&self, v: VertexId, e: EdgeId) -> Option<EdgeId> {
        let star = self.neighbours(v);
        let i = self.position(v, e)?;
        Some(star[(i + 1) % star.len()])
    }

    /// Iterate over every vertex that has at least one edge.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &[EdgeId])> + '_ {
        self.stars.iter().enumerate()
            .filter(|(_, s)| !s.is_empty())
            .map(|(i, s)| (VertexId(i), s.as_slice()))
    }
}
