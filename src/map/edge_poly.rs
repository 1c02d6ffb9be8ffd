use geo::{AffineTransform, Contains, Coord, LineString, Point, Polygon, Rect};

use crate::geom::{cross, Segment, Tolerance};

use super::EdgeShape;

/// Number of straight pieces an arc is flattened into for polygon output.
const ARC_STEPS: usize = 16;

/// Direction of the sub-tolerance nudge applied before inside tests.
const CHORD_NUDGE: (f64, f64) = (0.540_302_305_868_139_8, 0.841_470_984_807_896_5);

/// One oriented edge of an [`EdgePoly`], carrying its own coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolyEdge {
    pub start: Coord<f64>,
    pub end:   Coord<f64>,
    pub shape: EdgeShape,
}

impl PolyEdge {
    pub fn new(start: Coord<f64>, end: Coord<f64>, shape: EdgeShape) -> Self {
        Self { start, end, shape }
    }

    #[inline] pub fn line(start: Coord<f64>, end: Coord<f64>) -> Self { Self::new(start, end, EdgeShape::Line) }

    /// The edge walked the other way.
    pub fn reversed(&self) -> Self {
        Self { start: self.end, end: self.start, shape: self.shape.reversed() }
    }

    /// Geometry as drawn (chords straight).
    #[inline] pub fn path(&self) -> Segment { self.shape.path(self.start, self.end) }

    /// This edge's contribution to the signed area of a closed boundary.
    fn area_term(&self) -> f64 {
        match self.path() {
            Segment::Line { start, end } => 0.5 * cross(start, end),
            Segment::Arc(arc) => arc.area_contribution(),
        }
    }

    /// Points strictly after `start` up to and including `end`.
    fn flattened(&self) -> Vec<Coord<f64>> {
        match self.path() {
            Segment::Line { end, .. } => vec![end],
            Segment::Arc(arc) => {
                let sweep = arc.signed_sweep();
                (1..ARC_STEPS)
                    .map(|i| arc.point_at(sweep * i as f64 / ARC_STEPS as f64))
                    .chain(std::iter::once(arc.end))
                    .collect()
            }
        }
    }
}

/// Where a point lies relative to a closed [`EdgePoly`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Boundary,
    Outside,
}

/// An ordered sequence of edges: an open polyline or a closed boundary, any
/// of whose edges may be arcs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgePoly {
    edges: Vec<PolyEdge>,
}

impl EdgePoly {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Closed polygon of straight edges through `points` (the last point is
    /// joined back to the first).
    pub fn from_points(points: &[Coord<f64>]) -> Self {
        let n = points.len();
        let edges = (0..n)
            .filter(|_| n > 1)
            .map(|i| PolyEdge::line(points[i], points[(i + 1) % n]))
            .collect();
        Self { edges }
    }

    pub fn push(&mut self, edge: PolyEdge) { self.edges.push(edge) }

    #[inline] pub fn len(&self) -> usize { self.edges.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    #[inline] pub fn edges(&self) -> &[PolyEdge] { &self.edges }

    pub fn iter(&self) -> impl Iterator<Item = &PolyEdge> { self.edges.iter() }

    /// True if the last edge ends where the first one starts.
    pub fn is_closed(&self, tol: &Tolerance) -> bool {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) => tol.point_eq(first.start, last.end),
            _ => false,
        }
    }

    /// Start point of every edge (the corners of a closed boundary).
    pub fn points(&self) -> Vec<Coord<f64>> {
        self.edges.iter().map(|e| e.start).collect()
    }

    /// Signed area enclosed by a closed boundary, positive when the edges
    /// run counter-clockwise.  Arcs contribute their exact circular segment.
    pub fn signed_area(&self) -> f64 {
        self.edges.iter().map(PolyEdge::area_term).sum()
    }

    /// Bounding box of the drawn geometry, `None` when empty.
    pub fn bounding_rect(&self, tol: &Tolerance) -> Option<Rect<f64>> {
        self.edges.iter()
            .map(|e| e.path().bounding_rect(tol))
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }

    /// Average of the corner points.
    pub fn center(&self) -> Option<Coord<f64>> {
        if self.edges.is_empty() { return None; }
        let sum = self.edges.iter().fold(Coord { x: 0.0, y: 0.0 }, |acc, e| acc + e.start);
        Some(sum / self.edges.len() as f64)
    }

    pub fn transformed(&self, t: &AffineTransform<f64>) -> Self {
        let edges = self.edges.iter()
            .map(|e| PolyEdge::new(t.apply(e.start), t.apply(e.end), e.shape.transformed(t)))
            .collect();
        Self { edges }
    }

    /// The same boundary walked the other way.
    pub fn reversed(&self) -> Self {
        Self { edges: self.edges.iter().rev().map(PolyEdge::reversed).collect() }
    }

    /// Exterior ring with arcs flattened into straight pieces.
    pub fn ring(&self) -> Vec<Coord<f64>> {
        let mut ring = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() { ring.push(first.start); }
        for e in &self.edges {
            ring.extend(e.flattened());
        }
        ring
    }

    /// `geo` polygon of the flattened boundary, for renderers.
    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.ring()), vec![])
    }

    /// Classify `p` against a closed boundary.
    ///
    /// Arcs are handled exactly: the polygon of straight chords decides the
    /// straight part, and each arc then toggles the answer inside the
    /// circular segment between its chord and itself.
    pub fn containment(&self, p: Coord<f64>, tol: &Tolerance) -> Containment {
        if self.edges.iter().any(|e| e.path().contains_point(p, tol)) {
            return Containment::Boundary;
        }
        // Off the boundary by at least `eps`, so a nudge far smaller than
        // that keeps the answer and moves `p` off any chord line.
        let q = p + Coord { x: CHORD_NUDGE.0, y: CHORD_NUDGE.1 } * (tol.eps * 0.1);

        let mut inside = self.chord_polygon().contains(&Point::from(q));
        for e in &self.edges {
            if let Segment::Arc(arc) = e.path() {
                if arc.segment_contains(q) {
                    inside = !inside;
                }
            }
        }
        if inside { Containment::Inside } else { Containment::Outside }
    }

    /// The boundary with every arc replaced by its chord.
    fn chord_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.points()), vec![])
    }
}

impl FromIterator<PolyEdge> for EdgePoly {
    fn from_iter<I: IntoIterator<Item = PolyEdge>>(iter: I) -> Self {
        Self { edges: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a EdgePoly {
    type Item = &'a PolyEdge;
    type IntoIter = std::slice::Iter<'a, PolyEdge>;

    fn into_iter(self) -> Self::IntoIter { self.edges.iter() }
}
