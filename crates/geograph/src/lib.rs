pub mod dcel;
pub mod error;

pub use dcel::{Dcel, FaceId, HalfEdgeId, VertexId};
pub use error::DcelError;
