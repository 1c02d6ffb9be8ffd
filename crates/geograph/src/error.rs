use thiserror::Error;

use crate::dcel::{FaceId, HalfEdgeId};

/// Structural failures detected while linking or validating a [`Dcel`](crate::Dcel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DcelError {
    /// Following `next` from this half-edge never returns to it.
    #[error("face cycle starting at {0} does not close")]
    OpenCycle(HalfEdgeId),

    /// `twin(twin(h)) != h`, or a half-edge is its own twin.
    #[error("twin link of {0} is not symmetric")]
    TwinMismatch(HalfEdgeId),

    /// `prev(next(h)) != h`.
    #[error("next/prev links of {0} disagree")]
    PrevMismatch(HalfEdgeId),

    /// `next(h)` does not leave from the vertex `h` arrives at.
    #[error("{0} is followed by a half-edge that does not start at its head")]
    Disconnected(HalfEdgeId),

    /// A half-edge and its successor are assigned to different faces.
    #[error("{half_edge} belongs to {face} but its successor does not")]
    FaceMismatch { half_edge: HalfEdgeId, face: FaceId },

    /// A half-edge has not been assigned to any face.
    #[error("{0} has no incident face")]
    Unassigned(HalfEdgeId),
}
