use ahash::AHashMap;
use anyhow::{bail, Result};
use geo::Coord;

use crate::geom::{candidate_pairs, BoundingBox};

use super::{EdgeId, Map};

impl Map {
    /// Check the map's integrity: every edge endpoint is live, no edge is
    /// trivial, no two edges duplicate each other, and no two edges meet
    /// anywhere but at a shared vertex.
    ///
    /// Returns the first violation found.
    pub fn verify(&self) -> Result<()> {
        let tol = self.tolerance;

        let mut by_pair: AHashMap<_, Vec<EdgeId>> = AHashMap::new();
        for (id, e) in self.get_edges() {
            for v in [e.v1(), e.v2()] {
                if self.vertex(v).is_none() {
                    bail!("{id} references missing {v}");
                }
            }
            if self.is_trivial(id) {
                bail!("{id} is trivial ({} -> {})", e.v1(), e.v2());
            }
            let key = (e.v1().min(e.v2()), e.v1().max(e.v2()));
            let seen = by_pair.entry(key).or_default();
            if let Some(&other) = seen.iter().find(|&&o| self.edge(o).is_some_and(|o| o.duplicates(e, &tol))) {
                bail!("{id} duplicates {other}");
            }
            seen.push(id);
        }

        if let Some((a, b, p)) = self.crossings().into_iter().next() {
            bail!("{a} and {b} cross at ({:.9}, {:.9}) without a shared vertex", p.x, p.y);
        }
        Ok(())
    }

    /// Every point where two edges meet other than at a shared vertex, with
    /// the pair of edges, found through an R-tree broad phase.
    pub(crate) fn crossings(&self) -> Vec<(EdgeId, EdgeId, Coord<f64>)> {
        let tol = self.tolerance;
        let segments: Vec<_> = self.get_edges()
            .filter_map(|(id, e)| self.segment_of(e).map(|s| (id, s)))
            .collect();
        let boxes = segments.iter().enumerate()
            .map(|(i, (_, s))| BoundingBox::new(i, s.bounding_rect(&tol), tol.eps))
            .collect();

        candidate_pairs(boxes).into_iter()
            .flat_map(|(i, j)| {
                let ((a, sa), (b, sb)) = (segments[i], segments[j]);
                sa.crossings(&sb, &tol).into_iter().map(move |p| (a, b, p))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::EdgeShape;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    #[test]
    fn raw_crossing_is_reported() {
        let mut map = Map::new();
        let (a, b) = (map.push_vertex(c(0.0, 0.0)), map.push_vertex(c(1.0, 1.0)));
        let (d, e) = (map.push_vertex(c(1.0, 0.0)), map.push_vertex(c(0.0, 1.0)));
        map.push_edge(a, b, EdgeShape::Line);
        map.push_edge(d, e, EdgeShape::Line);

        let err = map.verify().unwrap_err();
        assert!(err.to_string().contains("cross"));
    }

    #[test]
    fn duplicate_and_missing_are_reported() {
        let mut map = Map::new();
        let (a, b) = (map.push_vertex(c(0.0, 0.0)), map.push_vertex(c(1.0, 0.0)));
        map.push_edge(a, b, EdgeShape::Line);
        map.push_edge(b, a, EdgeShape::Line);
        assert!(map.verify().unwrap_err().to_string().contains("duplicates"));

        let mut map = Map::new();
        let a = map.push_vertex(c(0.0, 0.0));
        map.push_edge(a, crate::map::VertexId(9), EdgeShape::Line);
        assert!(map.verify().unwrap_err().to_string().contains("missing"));
    }

    #[test]
    fn inserted_edges_verify() {
        let mut map = Map::new();
        map.insert_line(c(0.0, 0.0), c(1.0, 1.0));
        map.insert_line(c(1.0, 0.0), c(0.0, 1.0));
        map.insert_arc(c(1.0, 0.5), c(0.0, 0.5), c(0.5, 0.5), true);
        assert!(map.verify().is_ok(), "{}", map.info());
    }
}
