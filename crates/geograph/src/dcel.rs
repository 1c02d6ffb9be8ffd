//! Doubly Connected Edge List (DCEL): a half-edge arena for planar
//! subdivisions.
//!
//! # Structure
//!
//! Every undirected edge is represented as a pair of directed **half-edges**
//! (twins).  Each half-edge carries:
//!
//! * `origin` : the vertex it leaves from
//! * `twin`   : the opposite half-edge (same edge, opposite direction)
//! * `next`   : the next half-edge around the same face
//! * `prev`   : the previous half-edge around the same face
//! * `face`   : the face to the left of this half-edge, once assigned
//! * `data`   : a caller payload shared by both twins (typically the id of
//!               the undirected edge in some source structure)
//!
//! The arena is built in three steps: add vertices and twin pairs, link every
//! half-edge to its successor with [`Dcel::set_next`], then call
//! [`Dcel::assign_faces`] which turns each `next` cycle into a face.
//!
//! # Indexing
//!
//! All elements are stored in flat `Vec`s and addressed by strongly-typed
//! index wrappers (`VertexId`, `HalfEdgeId`, `FaceId`).  Twins are allocated
//! in pairs, so `twin(h)` is always `h ^ 1`.  No face is reserved: which face
//! is unbounded is a geometric question left to the caller.

use std::fmt;

use crate::error::DcelError;

// ---------------------------------------------------------------------------
// Index types
// ---------------------------------------------------------------------------

macro_rules! idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

idx!(VertexId);
idx!(HalfEdgeId);
idx!(FaceId);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A vertex with an arbitrary coordinate payload `C` and one incident
/// half-edge (any half-edge whose `origin` is this vertex).
#[derive(Clone, Debug)]
pub struct Vertex<C> {
    pub coords:    C,
    /// Any half-edge leaving this vertex.  `None` for isolated vertices.
    pub half_edge: Option<HalfEdgeId>,
}

/// A directed half-edge.
#[derive(Clone, Debug)]
pub struct HalfEdge<E> {
    /// Vertex this half-edge leaves from.
    pub origin: VertexId,
    /// The other half-edge of the same undirected edge (opposite direction).
    pub twin:   HalfEdgeId,
    /// Next half-edge around `face`.
    pub next:   HalfEdgeId,
    /// Previous half-edge around `face`.
    pub prev:   HalfEdgeId,
    /// Face to the left of this half-edge; `None` until faces are assigned.
    pub face:   Option<FaceId>,
    /// Payload shared with the twin.
    pub data:   E,
}

/// A face: one closed `next` cycle.
#[derive(Clone, Debug)]
pub struct Face {
    /// First half-edge found on the cycle.
    pub half_edge: HalfEdgeId,
    /// Number of half-edges on the cycle.
    pub len:       usize,
}

// ---------------------------------------------------------------------------
// DCEL
// ---------------------------------------------------------------------------

/// A Doubly Connected Edge List over vertices with coordinate type `C` and
/// half-edge payload `E`.
#[derive(Clone, Debug)]
pub struct Dcel<C, E> {
    pub vertices:   Vec<Vertex<C>>,
    pub half_edges: Vec<HalfEdge<E>>,
    pub faces:      Vec<Face>,
}

impl<C, E> Default for Dcel<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> Dcel<C, E> {
    /// Create an empty DCEL.
    pub fn new() -> Self {
        Self {
            vertices:   Vec::new(),
            half_edges: Vec::new(),
            faces:      Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn num_vertices(&self)   -> usize { self.vertices.len() }
    pub fn num_half_edges(&self) -> usize { self.half_edges.len() }
    /// Number of undirected edges (twin pairs).
    pub fn num_edges(&self)      -> usize { self.half_edges.len() / 2 }
    /// Number of faces assigned so far (every cycle, bounded or not).
    pub fn num_faces(&self)      -> usize { self.faces.len() }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn vertex(&self, id: VertexId)       -> &Vertex<C>  { &self.vertices[id.0] }
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex<C> { &mut self.vertices[id.0] }

    pub fn half_edge(&self, id: HalfEdgeId)       -> &HalfEdge<E>  { &self.half_edges[id.0] }
    pub fn half_edge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge<E> { &mut self.half_edges[id.0] }

    pub fn face(&self, id: FaceId) -> &Face { &self.faces[id.0] }

    pub fn twin(&self, he: HalfEdgeId)   -> HalfEdgeId { self.half_edges[he.0].twin }
    pub fn next(&self, he: HalfEdgeId)   -> HalfEdgeId { self.half_edges[he.0].next }
    pub fn prev(&self, he: HalfEdgeId)   -> HalfEdgeId { self.half_edges[he.0].prev }
    pub fn origin(&self, he: HalfEdgeId) -> VertexId   { self.half_edges[he.0].origin }

    /// The vertex at the head (destination) of a half-edge.
    pub fn dest(&self, he: HalfEdgeId) -> VertexId {
        self.half_edges[self.half_edges[he.0].twin.0].origin
    }

    /// Face to the left of `he`, if faces have been assigned.
    pub fn face_of(&self, he: HalfEdgeId) -> Option<FaceId> { self.half_edges[he.0].face }

    /// Iterate over all half-edge ids.
    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId)
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Add an isolated vertex with the given coordinates.
    pub fn add_vertex(&mut self, coords: C) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex { coords, half_edge: None });
        id
    }

    /// Add a twin pair of half-edges between `u` and `v`, both carrying `data`.
    ///
    /// Each half-edge starts out as its own `next`/`prev` (a one-element
    /// cycle); call `set_next` for every half-edge before `assign_faces`.
    ///
    /// Returns `(uv, vu)`: the half-edge from u to v and its twin.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, data: E) -> (HalfEdgeId, HalfEdgeId)
    where
        E: Clone,
    {
        let uv = HalfEdgeId(self.half_edges.len());
        let vu = HalfEdgeId(self.half_edges.len() + 1);

        self.half_edges.push(HalfEdge { origin: u, twin: vu, next: uv, prev: uv, face: None, data: data.clone() });
        self.half_edges.push(HalfEdge { origin: v, twin: uv, next: vu, prev: vu, face: None, data });

        if self.vertices[u.0].half_edge.is_none() { self.vertices[u.0].half_edge = Some(uv); }
        if self.vertices[v.0].half_edge.is_none() { self.vertices[v.0].half_edge = Some(vu); }

        (uv, vu)
    }

    /// Set `he.next = next` and `next.prev = he`.
    pub fn set_next(&mut self, he: HalfEdgeId, next: HalfEdgeId) {
        self.half_edges[he.0].next   = next;
        self.half_edges[next.0].prev = he;
    }

    /// Discard any previous face assignment and create one face per closed
    /// `next` cycle, in order of the lowest half-edge id on each cycle.
    ///
    /// Fails with [`DcelError::OpenCycle`] if some cycle does not return to
    /// its start within `num_half_edges` steps.
    pub fn assign_faces(&mut self) -> Result<usize, DcelError> {
        self.faces.clear();
        for he in &mut self.half_edges {
            he.face = None;
        }

        let limit = self.half_edges.len();
        for start in 0..self.half_edges.len() {
            if self.half_edges[start].face.is_some() { continue; }

            let face = FaceId(self.faces.len());
            let mut current = start;
            let mut len = 0;
            loop {
                if len > limit || self.half_edges[current].face.is_some() {
                    return Err(DcelError::OpenCycle(HalfEdgeId(start)));
                }
                self.half_edges[current].face = Some(face);
                len += 1;
                current = self.half_edges[current].next.0;
                if current == start { break; }
            }
            self.faces.push(Face { half_edge: HalfEdgeId(start), len });
        }

        Ok(self.faces.len())
    }

    /// Check every structural invariant of a fully linked DCEL.
    pub fn validate(&self) -> Result<(), DcelError> {
        for he in self.half_edge_ids() {
            let twin = self.twin(he);
            if twin == he || self.twin(twin) != he {
                return Err(DcelError::TwinMismatch(he));
            }
            let next = self.next(he);
            if self.prev(next) != he {
                return Err(DcelError::PrevMismatch(he));
            }
            if self.origin(next) != self.dest(he) {
                return Err(DcelError::Disconnected(he));
            }
            let face = self.face_of(he).ok_or(DcelError::Unassigned(he))?;
            if self.face_of(next) != Some(face) {
                return Err(DcelError::FaceMismatch { half_edge: he, face });
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Traversal iterators
    // -----------------------------------------------------------------------

    /// Iterate over all half-edges around the face of `start`, starting (and
    /// ending just before returning to) `start`.
    pub fn face_cycle(&self, start: HalfEdgeId) -> FaceCycle<'_, C, E> {
        FaceCycle { dcel: self, start, current: start, steps: 0, done: false }
    }

    /// Iterate over all outgoing half-edges around a vertex (using
    /// `twin.next` links), starting from `start`.
    pub fn vertex_star(&self, start: HalfEdgeId) -> VertexStar<'_, C, E> {
        VertexStar { dcel: self, start, current: start, steps: 0, done: false }
    }

    /// Faces on the other side of each half-edge of `face`, in cycle order.
    /// A face adjacent along several edges is reported once per edge.
    pub fn adjacent_faces(&self, face: FaceId) -> impl Iterator<Item = FaceId> + '_ {
        self.face_cycle(self.faces[face.0].half_edge)
            .filter_map(move |he| self.face_of(self.twin(he)))
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over half-edges in a face cycle.
///
/// Stops after `num_half_edges` steps even if the cycle never closes, so a
/// corrupted arena cannot loop forever.
pub struct FaceCycle<'a, C, E> {
    dcel:    &'a Dcel<C, E>,
    start:   HalfEdgeId,
    current: HalfEdgeId,
    steps:   usize,
    done:    bool,
}

impl<'a, C, E> Iterator for FaceCycle<'a, C, E> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        if self.done || self.steps >= self.dcel.half_edges.len() { return None; }
        let he = self.current;
        self.steps += 1;
        self.current = self.dcel.half_edges[he.0].next;
        if self.current == self.start { self.done = true; }
        Some(he)
    }
}

/// Iterator over half-edges in a vertex star, using `twin.next`.
pub struct VertexStar<'a, C, E> {
    dcel:    &'a Dcel<C, E>,
    start:   HalfEdgeId,
    current: HalfEdgeId,
    steps:   usize,
    done:    bool,
}

impl<'a, C, E> Iterator for VertexStar<'a, C, E> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        if self.done || self.steps >= self.dcel.half_edges.len() { return None; }
        let he = self.current;
        self.steps += 1;
        let twin = self.dcel.half_edges[he.0].twin;
        self.current = self.dcel.half_edges[twin.0].next;
        if self.current == self.start { self.done = true; }
        Some(he)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
