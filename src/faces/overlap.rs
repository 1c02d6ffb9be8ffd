use geo::Relate;
use tracing::warn;

use crate::geom::{candidate_pairs, BoundingBox, Tolerance};
use crate::map::Containment;

use super::{Face, FaceGraph, FaceId, FaceState};

/// Mark the smaller face of every overlapping pair as [`FaceState::Remove`],
/// taking it out of later coloring.  Returns how many faces were removed.
///
/// Faces of one connected, cleansed map only ever touch along shared edges
/// and vertices.  Overlaps come from separate components nested inside one
/// another, or from a graph built with
/// [`build_dcel_allowing_crossings`](super::build_dcel_allowing_crossings)
/// out of placements that really cross.
pub fn remove_overlaps(graph: &mut FaceGraph) -> usize {
    let tol = *graph.tolerance();
    let ids: Vec<FaceId> = graph.bounded_faces().collect();
    let boxes = ids.iter().enumerate()
        .filter_map(|(i, &id)| {
            let rect = graph.face(id)?.bounding_rect(&tol)?;
            Some(BoundingBox::new(i, rect, tol.eps))
        })
        .collect();

    let mut removed = 0;
    for (i, j) in candidate_pairs(boxes) {
        let (a, b) = (ids[i], ids[j]);
        let (Some(fa), Some(fb)) = (graph.face(a), graph.face(b)) else { continue };
        if fa.state() == FaceState::Remove || fb.state() == FaceState::Remove {
            continue;
        }
        if !overlaps(fa, fb, &tol) { continue; }

        let (smaller, kept) = if fa.area() < fb.area() { (a, b) } else { (b, a) };
        warn!(%kept, removed = %smaller, "removing overlapping face");
        graph.set_state(smaller, FaceState::Remove);
        removed += 1;
    }
    removed
}

/// Interiors intersect, not merely touching.  The DE-9IM test runs on the
/// flattened polygons; a hit is then confirmed against the exact arcs so
/// neighbours along a shared curved edge are not caught by flattening noise.
fn overlaps(a: &Face, b: &Face, tol: &Tolerance) -> bool {
    let im = a.to_polygon().relate(&b.to_polygon());
    if !im.is_intersects() || im.is_touches() {
        return false;
    }
    let crossing = a.poly().iter().any(|ea| {
        let sa = ea.path();
        b.poly().iter().any(|eb| !sa.crossings(&eb.path(), tol).is_empty())
    });
    let nested = |inner: &Face, outer: &Face| {
        inner.poly().points().into_iter()
            .any(|p| outer.poly().containment(p, tol) == Containment::Inside)
    };
    crossing || nested(a, b) || nested(b, a)
}
