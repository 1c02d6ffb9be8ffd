use geo::{Coord, Rect};

use super::{
    circle_circle_intersection, dist, line_circle_intersection, project_param,
    segment_distance, segment_intersection, Arc, Hits, Tolerance,
};

/// A straight or circular piece of geometry between two endpoints.
///
/// Every pairwise routine matches both operands exhaustively, so line/line,
/// line/arc and arc/arc each go through the matching kernel routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { start: Coord<f64>, end: Coord<f64> },
    Arc(Arc),
}

impl Segment {
    #[inline]
    pub fn line(start: Coord<f64>, end: Coord<f64>) -> Self { Self::Line { start, end } }

    #[inline]
    pub fn start(&self) -> Coord<f64> {
        match self {
            Self::Line { start, .. } => *start,
            Self::Arc(arc) => arc.start,
        }
    }

    #[inline]
    pub fn end(&self) -> Coord<f64> {
        match self {
            Self::Line { end, .. } => *end,
            Self::Arc(arc) => arc.end,
        }
    }

    /// The same geometry traversed the other way.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line { start, end } => Self::Line { start: *end, end: *start },
            Self::Arc(arc) => Self::Arc(arc.reversed()),
        }
    }

    pub fn midpoint(&self) -> Coord<f64> {
        match self {
            Self::Line { start, end } => (*start + *end) * 0.5,
            Self::Arc(arc) => arc.midpoint(),
        }
    }

    /// Straight-line distance between the endpoints.
    #[inline] pub fn chord_length(&self) -> f64 { dist(self.start(), self.end()) }

    /// A parameter that increases monotonically from `start` to `end`.
    /// Only meaningful for points on (or near) the segment.
    pub fn param(&self, p: Coord<f64>, tol: &Tolerance) -> f64 {
        match self {
            Self::Line { start, end } => project_param(p, *start, *end),
            Self::Arc(arc) => arc.param(p, tol),
        }
    }

    /// True if `p` lies on the segment, endpoints included.
    pub fn contains_point(&self, p: Coord<f64>, tol: &Tolerance) -> bool {
        match self {
            Self::Line { start, end } => segment_distance(p, *start, *end) < tol.eps,
            Self::Arc(arc) => arc.contains_point(p, tol),
        }
    }

    /// True if `p` lies on the segment but is not one of its endpoints.
    pub fn contains_interior(&self, p: Coord<f64>, tol: &Tolerance) -> bool {
        !tol.point_eq(p, self.start()) && !tol.point_eq(p, self.end()) && self.contains_point(p, tol)
    }

    /// True if `p` is within `eps` of either endpoint.
    #[inline]
    pub fn is_endpoint(&self, p: Coord<f64>, tol: &Tolerance) -> bool {
        tol.point_eq(p, self.start()) || tol.point_eq(p, self.end())
    }

    /// Every point the two segments have in common, endpoints included.
    /// Overlapping colinear or co-circular pieces report nothing here; see
    /// [`Segment::crossings`].
    pub fn intersections(&self, other: &Segment, tol: &Tolerance) -> Hits {
        match (self, other) {
            (Self::Line { start: a1, end: a2 }, Self::Line { start: b1, end: b2 }) => {
                segment_intersection(*a1, *a2, *b1, *b2, tol).into_iter().collect()
            }
            (Self::Line { start, end }, Self::Arc(arc)) | (Self::Arc(arc), Self::Line { start, end }) => {
                line_circle_intersection(*start, *end, arc.center, arc.radius(), tol)
                    .into_iter()
                    .filter(|&p| segment_distance(p, *start, *end) < tol.eps && arc.contains_angle(p, tol))
                    .collect()
            }
            (Self::Arc(a), Self::Arc(b)) => {
                circle_circle_intersection(a.center, a.radius(), b.center, b.radius(), tol)
                    .into_iter()
                    .filter(|&p| a.contains_angle(p, tol) && b.contains_angle(p, tol))
                    .collect()
            }
        }
    }

    /// Points where the two segments meet other than at a shared endpoint:
    /// proper crossings, T-junctions, and the endpoints of one segment that
    /// lie inside the other (which covers overlapping pieces).
    pub fn crossings(&self, other: &Segment, tol: &Tolerance) -> Hits {
        let mut hits = Hits::new();
        let mut push = |p: Coord<f64>| {
            if !hits.iter().any(|&q| tol.point_eq(p, q)) { hits.push(p); }
        };

        for p in self.intersections(other, tol) {
            if !(self.is_endpoint(p, tol) && other.is_endpoint(p, tol)) { push(p); }
        }
        for p in [other.start(), other.end()] {
            if self.contains_interior(p, tol) { push(p); }
        }
        for p in [self.start(), self.end()] {
            if other.contains_interior(p, tol) { push(p); }
        }
        hits
    }

    /// Unit direction of travel when leaving `start`.
    pub fn start_direction(&self) -> Coord<f64> {
        match self {
            Self::Line { start, end } => unit(*end - *start),
            Self::Arc(arc) => arc.start_tangent(),
        }
    }

    /// Unit direction of travel when leaving `end` back towards `start`.
    pub fn end_direction(&self) -> Coord<f64> {
        match self {
            Self::Line { start, end } => unit(*start - *end),
            Self::Arc(arc) => arc.end_tangent(),
        }
    }

    pub fn bounding_rect(&self, tol: &Tolerance) -> Rect<f64> {
        match self {
            Self::Line { start, end } => Rect::new(*start, *end),
            Self::Arc(arc) => arc.bounding_rect(tol),
        }
    }
}

fn unit(v: Coord<f64>) -> Coord<f64> {
    let len = v.x.hypot(v.y);
    if len == 0.0 { v } else { v / len }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    #[test]
    fn line_crosses_arc_once() {
        let tol = Tolerance::default();
        // Upper unit semicircle, cut by the vertical line x = 0.
        let arc = Segment::Arc(Arc::new(c(1.0, 0.0), c(-1.0, 0.0), c(0.0, 0.0), true));
        let line = Segment::line(c(0.0, -2.0), c(0.0, 2.0));
        let hits = arc.intersections(&line, &tol);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn arcs_cross_inside_both_sweeps_only() {
        let tol = Tolerance::default();
        let a = Segment::Arc(Arc::new(c(1.0, 0.0), c(-1.0, 0.0), c(0.0, 0.0), true));
        let b = Segment::Arc(Arc::new(c(2.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), true));
        let hits = a.intersections(&b, &tol);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].y > 0.0);
    }

    #[test]
    fn overlap_reports_interior_endpoints() {
        let tol = Tolerance::default();
        let a = Segment::line(c(0.0, 0.0), c(2.0, 0.0));
        let b = Segment::line(c(1.0, 0.0), c(3.0, 0.0));
        let hits = a.crossings(&b, &tol);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|&p| tol.point_eq(p, c(1.0, 0.0))));
        assert!(hits.iter().any(|&p| tol.point_eq(p, c(2.0, 0.0))));
    }

    #[test]
    fn shared_corner_is_not_a_crossing() {
        let tol = Tolerance::default();
        let a = Segment::line(c(0.0, 0.0), c(1.0, 0.0));
        let b = Segment::line(c(0.0, 0.0), c(0.0, 1.0));
        assert!(a.crossings(&b, &tol).is_empty());
        let t = Segment::line(c(0.5, 0.0), c(0.5, 1.0));
        assert_eq!(a.crossings(&t, &tol).len(), 1);
    }

    #[test]
    fn directions() {
        let arc = Segment::Arc(Arc::new(c(1.0, 0.0), c(0.0, 1.0), c(0.0, 0.0), true));
        let d = arc.start_direction();
        assert_abs_diff_eq!(d.y, 1.0, epsilon = 1e-12);
        let line = Segment::line(c(0.0, 0.0), c(0.0, 3.0));
        assert_abs_diff_eq!(line.end_direction().y, -1.0, epsilon = 1e-12);
    }
}
