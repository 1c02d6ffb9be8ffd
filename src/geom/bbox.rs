use geo::Rect;
use rstar::{RTree, RTreeObject, AABB};

/// A bounding box in an R-tree, associated with an item by index.
#[derive(Debug, Clone)]
pub(crate) struct BoundingBox {
    idx: usize, // Index of the corresponding edge or face in the caller's list
    bbox: Rect<f64>,
}

impl BoundingBox {
    /// Box around `rect`, grown by `pad` on every side.
    pub(crate) fn new(idx: usize, rect: Rect<f64>, pad: f64) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self {
            idx,
            bbox: Rect::new(
                geo::Coord { x: min.x - pad, y: min.y - pad },
                geo::Coord { x: max.x + pad, y: max.y + pad },
            ),
        }
    }

    /// Get the index of the corresponding item.
    #[inline] pub(crate) fn idx(&self) -> usize { self.idx }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// All unordered pairs `(i, j)` with `i < j` whose boxes intersect, sorted.
pub(crate) fn candidate_pairs(boxes: Vec<BoundingBox>) -> Vec<(usize, usize)> {
    let envelopes: Vec<_> = boxes.iter().map(|b| (b.idx(), b.envelope())).collect();
    let rtree = RTree::bulk_load(boxes);

    let mut pairs: Vec<(usize, usize)> = envelopes.iter()
        .flat_map(|(i, env)| {
            rtree.locate_in_envelope_intersecting(env)
                .map(|cand| cand.idx())
                .filter(move |j| j > i) // check each unordered pair once
                .map(move |j| (*i, j))
        })
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}
