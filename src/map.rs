//! The planar map: vertex and edge arenas kept free of unintended crossings.
//!
//! Vertices and edges live in flat `Vec<Option<_>>` arenas addressed by
//! [`VertexId`] / [`EdgeId`].  Removing an element leaves a hole, so a stale
//! id resolves to `None` rather than to some other element.  The per-vertex
//! angular adjacency ([`NeighbourMap`]) is built lazily and thrown away on
//! every structural mutation.

mod chain;
mod crop;
mod edge_poly;
mod entity;
mod insert;
mod merge;
mod verify;

use std::fmt::Write as _;
use std::sync::OnceLock;

use ahash::AHashMap;
use geo::{AffineTransform, Coord, Rect};

use crate::geom::{Segment, Tolerance};
use crate::neighbours::NeighbourMap;

pub use edge_poly::{Containment, EdgePoly, PolyEdge};
pub use entity::{Edge, EdgeId, EdgeShape, Vertex, VertexId};

/// A planar subdivision under construction.
#[derive(Clone, Debug, Default)]
pub struct Map {
    vertices: Vec<Option<Vertex>>,
    edges: Vec<Option<Edge>>,

    // ----- Live counts (arena slots minus holes) -----
    num_vertices: usize,
    num_edges: usize,

    tolerance: Tolerance,

    // ----- Lazy adjacency -----

    /// Angle-sorted incident edges per vertex.  Rebuilt on demand after any
    /// structural change.
    neighbours: OnceLock<NeighbourMap>,
}

impl Map {
    /// Create an empty map with the default tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map comparing coordinates with `tolerance`.
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self { tolerance, ..Self::default() }
    }

    /// Get the tolerance used by every geometric test on this map.
    #[inline] pub fn tolerance(&self) -> &Tolerance { &self.tolerance }

    #[inline] pub fn is_empty(&self) -> bool { self.num_vertices == 0 && self.num_edges == 0 }

    /// Get the number of live vertices.
    #[inline] pub fn num_vertices(&self) -> usize { self.num_vertices }

    /// Get the number of live edges.
    #[inline] pub fn num_edges(&self) -> usize { self.num_edges }

    /// Get a vertex, or `None` if the id was never issued or has been removed.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0).and_then(Option::as_ref)
    }

    /// Get an edge, or `None` if the id was never issued or has been removed.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    /// Get the coordinates of a vertex.
    #[inline]
    pub fn position(&self, id: VertexId) -> Option<Coord<f64>> {
        self.vertex(id).map(Vertex::pos)
    }

    /// Iterate over live vertices in id order.
    pub fn get_vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter().enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (VertexId(i), v)))
    }

    /// Iterate over live edges in id order.
    pub fn get_edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId(i), e)))
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.get_vertices().map(|(id, _)| id).collect()
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.get_edges().map(|(id, _)| id).collect()
    }

    /// Get the angle-sorted adjacency, building it if the map changed since
    /// the last call.
    pub fn neighbours(&self) -> &NeighbourMap {
        self.neighbours.get_or_init(|| NeighbourMap::build(self))
    }

    // -----------------------------------------------------------------------
    // Geometry of edges
    // -----------------------------------------------------------------------

    /// Geometry of an edge used for intersection tests (chords act as arcs).
    /// `None` if the edge or one of its endpoints is gone.
    pub fn segment(&self, id: EdgeId) -> Option<Segment> {
        self.edge(id).and_then(|e| self.segment_of(e))
    }

    pub(crate) fn segment_of(&self, edge: &Edge) -> Option<Segment> {
        let p1 = self.position(edge.v1())?;
        let p2 = self.position(edge.v2())?;
        Some(edge.shape().segment(p1, p2))
    }

    /// Geometry of an edge as drawn (chords straight).
    pub fn path(&self, id: EdgeId) -> Option<Segment> {
        let edge = self.edge(id)?;
        let p1 = self.position(edge.v1())?;
        let p2 = self.position(edge.v2())?;
        Some(edge.shape().path(p1, p2))
    }

    /// True if the edge is a loop, joins coincident points, or has lost an
    /// endpoint.  Such edges are tolerated until the cleanser removes them.
    pub fn is_trivial(&self, id: EdgeId) -> bool {
        let Some(edge) = self.edge(id) else { return false };
        match (self.position(edge.v1()), self.position(edge.v2())) {
            (Some(p1), Some(p2)) => edge.is_loop() || self.tolerance.point_eq(p1, p2),
            _ => true,
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The lowest-numbered vertex within `eps` of `p`.
    pub fn find_vertex(&self, p: Coord<f64>) -> Option<VertexId> {
        self.get_vertices()
            .find(|(_, v)| self.tolerance.point_eq(v.pos(), p))
            .map(|(id, _)| id)
    }

    /// An edge joining `v1` and `v2` (either way round) with an equivalent
    /// shape.  `shape` is read in the `v1 -> v2` direction.
    pub fn find_edge(&self, v1: VertexId, v2: VertexId, shape: &EdgeShape) -> Option<EdgeId> {
        self.get_edges()
            .find(|(_, e)| e.joins(v1, v2, shape, &self.tolerance))
            .map(|(id, _)| id)
    }

    /// Every live edge with `v` as an endpoint, in id order.
    pub fn edges_of(&self, v: VertexId) -> Vec<EdgeId> {
        self.get_edges()
            .filter(|(_, e)| e.touches(v))
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of edge ends at `v` (a loop counts twice).
    pub fn degree(&self, v: VertexId) -> usize {
        self.get_edges()
            .map(|(_, e)| (e.v1() == v) as usize + (e.v2() == v) as usize)
            .sum()
    }

    // -----------------------------------------------------------------------
    // Raw mutation
    // -----------------------------------------------------------------------

    /// Add a vertex without looking for an existing one and without
    /// splitting edges through it.
    pub fn push_vertex(&mut self, pos: Coord<f64>) -> VertexId {
        self.neighbours.take();
        let id = VertexId(self.vertices.len());
        self.vertices.push(Some(Vertex::new(pos)));
        self.num_vertices += 1;
        id
    }

    /// Add an edge without any intersection handling.  The endpoints are not
    /// checked; an edge referencing a missing vertex is a "bad edge" for the
    /// cleanser and a [`BuildError`](crate::faces::BuildError) for the DCEL.
    pub fn push_edge(&mut self, v1: VertexId, v2: VertexId, shape: EdgeShape) -> EdgeId {
        self.neighbours.take();
        let id = EdgeId(self.edges.len());
        self.edges.push(Some(Edge::new(v1, v2, shape)));
        self.num_edges += 1;
        id
    }

    /// Return the edge joining `v1` and `v2` with `shape`, adding it if absent.
    pub(crate) fn add_edge_unique(&mut self, v1: VertexId, v2: VertexId, shape: EdgeShape) -> EdgeId {
        match self.find_edge(v1, v2, &shape) {
            Some(id) => id,
            None => self.push_edge(v1, v2, shape),
        }
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.get_mut(id.0)?.take()?;
        self.neighbours.take();
        self.num_edges -= 1;
        Some(edge)
    }

    /// Remove a vertex together with every edge that touches it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        let vertex = self.vertices.get_mut(id.0)?.take()?;
        self.neighbours.take();
        self.num_vertices -= 1;
        for e in self.edges_of(id) {
            self.remove_edge(e);
        }
        Some(vertex)
    }

    /// Re-point edge ends according to `remap` (old vertex to new).  The old
    /// vertices themselves stay.
    pub(crate) fn redirect_edges(&mut self, remap: &AHashMap<VertexId, VertexId>) {
        self.neighbours.take();
        for edge in self.edges.iter_mut().flatten() {
            for v in [edge.v1(), edge.v2()] {
                if let Some(&to) = remap.get(&v) {
                    edge.redirect(v, to);
                }
            }
        }
    }

    /// Edge ends per vertex slot (a loop counts twice).
    pub(crate) fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertices.len()];
        for (_, e) in self.get_edges() {
            for v in [e.v1(), e.v2()] {
                if let Some(d) = degrees.get_mut(v.0) { *d += 1; }
            }
        }
        degrees
    }

    /// Remove every vertex and edge.  The tolerance is kept.
    pub fn clear(&mut self) {
        *self = Self::with_tolerance(self.tolerance);
    }

    // -----------------------------------------------------------------------
    // Copies and transforms
    // -----------------------------------------------------------------------

    /// An independent copy with the same ids.
    pub fn copy(&self) -> Map {
        let mut copy = self.clone();
        copy.neighbours.take();
        copy
    }

    /// An independent copy with holes squeezed out: ids are renumbered in
    /// order, and edges that lost an endpoint are dropped.
    pub fn recreate(&self) -> Map {
        let mut out = Map::with_tolerance(self.tolerance);
        let mut remap: Vec<Option<VertexId>> = vec![None; self.vertices.len()];
        for (id, v) in self.get_vertices() {
            remap[id.0] = Some(out.push_vertex(v.pos()));
        }
        for (_, e) in self.get_edges() {
            let v1 = remap.get(e.v1().0).copied().flatten();
            let v2 = remap.get(e.v2().0).copied().flatten();
            if let (Some(v1), Some(v2)) = (v1, v2) {
                out.push_edge(v1, v2, *e.shape());
            }
        }
        out
    }

    /// Apply `t` to every vertex and arc center in place.  Reflections flip
    /// the sweep direction of arcs so they still bulge the same way.
    pub fn transform(&mut self, t: &AffineTransform<f64>) {
        self.neighbours.take();
        for v in self.vertices.iter_mut().flatten() {
            v.set_pos(t.apply(v.pos()));
        }
        for e in self.edges.iter_mut().flatten() {
            *e = Edge::new(e.v1(), e.v2(), e.shape().transformed(t));
        }
    }

    /// A transformed copy; `self` is unchanged.
    pub fn transformed(&self, t: &AffineTransform<f64>) -> Map {
        let mut out = self.copy();
        out.transform(t);
        out
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Bounds of all vertices and drawn edges, `None` for an empty map.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let vertex_rects = self.get_vertices().map(|(_, v)| Rect::new(v.pos(), v.pos()));
        let edge_rects = self.get_edges()
            .filter_map(|(id, _)| self.path(id))
            .map(|s| s.bounding_rect(&self.tolerance));
        vertex_rects.chain(edge_rects).reduce(|a, b| Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
    }

    /// One line: vertex and edge counts.
    pub fn summary(&self) -> String {
        let curves = self.get_edges().filter(|(_, e)| !e.shape().is_line()).count();
        format!(
            "Map: {} vertices, {} edges ({} lines, {} curves)",
            self.num_vertices, self.num_edges, self.num_edges - curves, curves,
        )
    }

    /// Multi-line listing of every vertex and edge.
    pub fn info(&self) -> String {
        let mut out = self.summary();
        for (id, v) in self.get_vertices() {
            let p = v.pos();
            let _ = write!(out, "\n  {id} ({:.6}, {:.6}) degree {}", p.x, p.y, self.degree(id));
        }
        for (id, e) in self.get_edges() {
            let _ = write!(out, "\n  {id} {} -> {}", e.v1(), e.v2());
            match e.shape() {
                EdgeShape::Line => {}
                EdgeShape::Arc { center, convex } => {
                    let _ = write!(out, " arc center ({:.6}, {:.6}) convex {convex}", center.x, center.y);
                }
                EdgeShape::Chord { center, convex } => {
                    let _ = write!(out, " chord center ({:.6}, {:.6}) convex {convex}", center.x, center.y);
                }
            }
        }
        out
    }
}
