//! Faces of a planar map: DCEL construction, coloring, and overlap removal.
//!
//! A [`FaceGraph`] is a read-only view derived from a [`Map`](crate::Map).
//! It holds no reference back to the map and must be rebuilt, not patched,
//! after the map changes.

mod build;
mod color;
mod overlap;

use geo::{Coord, Polygon, Rect};
use geograph::{Dcel, HalfEdgeId};

use crate::geom::Tolerance;
use crate::map::{EdgeId, EdgePoly};

pub use build::{build_dcel, build_dcel_allowing_crossings, BuildError};
pub use color::{assign_palette, group_faces, two_color_by_adjacency, two_color_by_area, FaceGroup, TwoColoring};
pub use geograph::FaceId;
pub use overlap::remove_overlaps;

// ---------------------------------------------------------------------------
// Face
// ---------------------------------------------------------------------------

/// Progress of a face through the coloring algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FaceState {
    #[default]
    Undone,
    /// Discovered by the adjacency walk but not colored yet.
    Processing,
    Black,
    White,
    /// Assigned to a palette group.
    Done,
    /// Excluded from coloring by the overlap remover.
    Remove,
}

/// One closed boundary cycle of the DCEL.
#[derive(Clone, Debug)]
pub struct Face {
    poly: EdgePoly,
    area: f64,
    outer: bool,
    half_edge: HalfEdgeId,
    pub(crate) state: FaceState,
    pub(crate) color_index: Option<usize>,
}

impl Face {
    pub(crate) fn new(poly: EdgePoly, half_edge: HalfEdgeId, tol: &Tolerance) -> Self {
        let area = poly.signed_area();
        Self {
            poly,
            area,
            outer: area <= tol.eps * tol.eps,
            half_edge,
            state: FaceState::Undone,
            color_index: None,
        }
    }

    /// Get the boundary, counter-clockwise for bounded faces.
    #[inline] pub fn poly(&self) -> &EdgePoly { &self.poly }

    /// Get the signed area; positive for bounded faces.
    #[inline] pub fn area(&self) -> f64 { self.area }

    /// True if this cycle bounds the unbounded region.
    #[inline] pub fn is_outer(&self) -> bool { self.outer }

    #[inline] pub fn state(&self) -> FaceState { self.state }

    /// Get the palette slot assigned by [`assign_palette`], if any.
    #[inline] pub fn color_index(&self) -> Option<usize> { self.color_index }

    /// Get the first half-edge of the boundary cycle.
    #[inline] pub fn half_edge(&self) -> HalfEdgeId { self.half_edge }

    /// Number of edges on the boundary.
    #[inline] pub fn sides(&self) -> usize { self.poly.len() }

    pub fn center(&self) -> Option<Coord<f64>> { self.poly.center() }

    pub fn bounding_rect(&self, tol: &Tolerance) -> Option<Rect<f64>> { self.poly.bounding_rect(tol) }

    /// The boundary as a `geo` polygon, arcs flattened.
    pub fn to_polygon(&self) -> Polygon<f64> { self.poly.to_polygon() }

    /// True while the face takes part in coloring.
    #[inline]
    pub(crate) fn is_colorable(&self) -> bool { !self.outer && self.state != FaceState::Remove }
}

// ---------------------------------------------------------------------------
// FaceGraph
// ---------------------------------------------------------------------------

/// Half-edge structure of a map together with its faces.
#[derive(Clone, Debug)]
pub struct FaceGraph {
    pub(crate) dcel: Dcel<Coord<f64>, EdgeId>,
    pub(crate) faces: Vec<Face>,
    pub(crate) outer: Option<FaceId>,
    pub(crate) tolerance: Tolerance,
}

impl FaceGraph {
    /// Get the underlying half-edge arena.  Half-edge payloads are the ids of
    /// the map edges they came from.
    #[inline] pub fn dcel(&self) -> &Dcel<Coord<f64>, EdgeId> { &self.dcel }

    /// Get every face, the outer ones included, indexed by `FaceId`.
    #[inline] pub fn faces(&self) -> &[Face] { &self.faces }

    #[inline] pub fn face(&self, id: FaceId) -> Option<&Face> { self.faces.get(id.0) }

    /// Number of faces including every outer cycle.
    #[inline] pub fn num_faces(&self) -> usize { self.faces.len() }

    /// The outer cycle with the largest extent, if the map had any edges.
    #[inline] pub fn outer_face(&self) -> Option<FaceId> { self.outer }

    #[inline] pub fn tolerance(&self) -> &Tolerance { &self.tolerance }

    /// Ids of the faces that take part in coloring: bounded and not removed.
    pub fn bounded_faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().enumerate()
            .filter(|(_, f)| f.is_colorable())
            .map(|(i, _)| FaceId(i))
    }

    /// Faces sharing at least one edge with `id`, each listed once, in
    /// boundary order.
    pub fn adjacent_faces(&self, id: FaceId) -> Vec<FaceId> {
        let Some(face) = self.face(id) else { return Vec::new() };
        let mut out: Vec<FaceId> = Vec::new();
        let across = self.dcel.face_cycle(face.half_edge)
            .filter_map(|he| self.dcel.face_of(self.dcel.twin(he)));
        for other in across {
            if other != id && !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    pub(crate) fn set_state(&mut self, id: FaceId, state: FaceState) {
        if let Some(face) = self.faces.get_mut(id.0) {
            face.state = state;
        }
    }

    pub(crate) fn state(&self, id: FaceId) -> Option<FaceState> {
        self.face(id).map(Face::state)
    }
}
