#![doc = "patternmap: planar subdivision engine for geometric pattern construction"]
pub mod cleanse;
pub mod faces;
pub mod geom;
pub mod map;
pub mod neighbours;

#[doc(inline)]
pub use cleanse::Cleanse;

#[doc(inline)]
pub use faces::{build_dcel, BuildError, Face, FaceGraph, FaceGroup, FaceId, FaceState, TwoColoring};

#[doc(inline)]
pub use geom::{Arc, Segment, Tolerance};

#[doc(inline)]
pub use map::{Edge, EdgeId, EdgePoly, EdgeShape, Map, PolyEdge, Vertex, VertexId};

#[doc(inline)]
pub use neighbours::NeighbourMap;

pub use geo::{AffineTransform, Coord};
