use std::fmt;

use geo::{AffineTransform, Coord};

use crate::geom::{transform_determinant, Arc, Segment, Tolerance};

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
idx!(EdgeId);

// ---------------------------------------------------------------------------
// Vertex
// ---------------------------------------------------------------------------

/// A point of the map.  Identity is the `VertexId`, not the coordinate: two
/// vertices may sit at the same place until the cleanser coalesces them.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pos: Coord<f64>,
}

impl Vertex {
    pub(crate) fn new(pos: Coord<f64>) -> Self {
        Self { pos }
    }

    #[inline] pub fn pos(&self) -> Coord<f64> { self.pos }

    #[inline] pub(crate) fn set_pos(&mut self, pos: Coord<f64>) { self.pos = pos }
}

// ---------------------------------------------------------------------------
// Edge shape
// ---------------------------------------------------------------------------

/// Geometry of an edge between its two vertices.
///
/// `Arc` and `Chord` both carry a circle center and a direction flag (see
/// [`Arc`]); a chord is drawn as a straight line but intersects like the arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeShape {
    Line,
    Arc { center: Coord<f64>, convex: bool },
    Chord { center: Coord<f64>, convex: bool },
}

impl EdgeShape {
    #[inline] pub fn is_line(&self) -> bool { matches!(self, Self::Line) }

    /// Circle center of an arc or chord.
    pub fn center(&self) -> Option<Coord<f64>> {
        match self {
            Self::Line => None,
            Self::Arc { center, .. } | Self::Chord { center, .. } => Some(*center),
        }
    }

    /// The shape as seen when walking the edge from `v2` to `v1`.
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line => Self::Line,
            Self::Arc { center, convex } => Self::Arc { center, convex: !convex },
            Self::Chord { center, convex } => Self::Chord { center, convex: !convex },
        }
    }

    /// Apply `t` to the circle center; a mirroring transform flips direction.
    pub fn transformed(&self, t: &AffineTransform<f64>) -> Self {
        let flip = transform_determinant(t) < 0.0;
        match *self {
            Self::Line => Self::Line,
            Self::Arc { center, convex } => Self::Arc { center: t.apply(center), convex: convex != flip },
            Self::Chord { center, convex } => Self::Chord { center: t.apply(center), convex: convex != flip },
        }
    }

    /// Same kind, and for curves the same center (within `eps`) and direction.
    pub fn same_as(&self, other: &EdgeShape, tol: &Tolerance) -> bool {
        match (self, other) {
            (Self::Line, Self::Line) => true,
            (Self::Arc { center: c1, convex: v1 }, Self::Arc { center: c2, convex: v2 })
            | (Self::Chord { center: c1, convex: v1 }, Self::Chord { center: c2, convex: v2 }) => {
                v1 == v2 && tol.point_eq(*c1, *c2)
            }
            _ => false,
        }
    }

    /// Geometry used for intersection tests: chords behave as arcs.
    pub fn segment(&self, p1: Coord<f64>, p2: Coord<f64>) -> Segment {
        match *self {
            Self::Line => Segment::line(p1, p2),
            Self::Arc { center, convex } | Self::Chord { center, convex } => {
                Segment::Arc(Arc::new(p1, p2, center, convex))
            }
        }
    }

    /// Geometry as drawn: chords are straight.
    pub fn path(&self, p1: Coord<f64>, p2: Coord<f64>) -> Segment {
        match *self {
            Self::Line | Self::Chord { .. } => Segment::line(p1, p2),
            Self::Arc { center, convex } => Segment::Arc(Arc::new(p1, p2, center, convex)),
        }
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// An edge between two vertices of the same map.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    v1: VertexId,
    v2: VertexId,
    shape: EdgeShape,
}

impl Edge {
    pub(crate) fn new(v1: VertexId, v2: VertexId, shape: EdgeShape) -> Self {
        Self { v1, v2, shape }
    }

    #[inline] pub fn v1(&self) -> VertexId { self.v1 }

    #[inline] pub fn v2(&self) -> VertexId { self.v2 }

    #[inline] pub fn shape(&self) -> &EdgeShape { &self.shape }

    #[inline] pub fn touches(&self, v: VertexId) -> bool { self.v1 == v || self.v2 == v }

    #[inline] pub fn is_loop(&self) -> bool { self.v1 == self.v2 }

    /// The endpoint opposite `v`, or `None` if `v` is not an endpoint.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.v1 == v { Some(self.v2) }
        else if self.v2 == v { Some(self.v1) }
        else { None }
    }

    /// True if this edge joins `a` and `b` (either way round) with an
    /// equivalent shape.
    pub fn joins(&self, a: VertexId, b: VertexId, shape: &EdgeShape, tol: &Tolerance) -> bool {
        (self.v1 == a && self.v2 == b && self.shape.same_as(shape, tol))
            || (self.v1 == b && self.v2 == a && self.shape.same_as(&shape.reversed(), tol))
    }

    /// True if both edges join the same vertex pair with an equivalent shape.
    pub fn duplicates(&self, other: &Edge, tol: &Tolerance) -> bool {
        other.joins(self.v1, self.v2, &self.shape, tol)
    }

    /// Replace every reference to `from` with `to`.
    pub(crate) fn redirect(&mut self, from: VertexId, to: VertexId) {
        if self.v1 == from { self.v1 = to; }
        if self.v2 == from { self.v2 = to; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_arc_matches_original() {
        let tol = Tolerance::default();
        let shape = EdgeShape::Arc { center: Coord { x: 0.0, y: 0.0 }, convex: true };
        let e = Edge::new(VertexId(0), VertexId(1), shape);
        assert!(e.joins(VertexId(0), VertexId(1), &shape, &tol));
        assert!(e.joins(VertexId(1), VertexId(0), &shape.reversed(), &tol));
        assert!(!e.joins(VertexId(1), VertexId(0), &shape, &tol));
    }

    #[test]
    fn arc_and_chord_differ() {
        let tol = Tolerance::default();
        let center = Coord { x: 0.0, y: 0.0 };
        let arc = EdgeShape::Arc { center, convex: true };
        let chord = EdgeShape::Chord { center, convex: true };
        assert!(!arc.same_as(&chord, &tol));
        assert!(chord.path(Coord { x: 1.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 }) != chord.segment(Coord { x: 1.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 }));
    }

    #[test]
    fn mirror_flips_direction() {
        let mirror = AffineTransform::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        let shape = EdgeShape::Arc { center: Coord { x: 2.0, y: 0.0 }, convex: true };
        assert_eq!(
            shape.transformed(&mirror),
            EdgeShape::Arc { center: Coord { x: -2.0, y: 0.0 }, convex: false }
        );
    }

    #[test]
    fn other_endpoint() {
        let e = Edge::new(VertexId(3), VertexId(7), EdgeShape::Line);
        assert_eq!(e.other(VertexId(3)), Some(VertexId(7)));
        assert_eq!(e.other(VertexId(5)), None);
    }
}
