use geo::Coord;
use smallvec::{smallvec, SmallVec};

use super::{cross, dist, dot, Tolerance};

/// Intersection points of two primitives.  Empty means "no intersection";
/// no sentinel coordinate is ever used.
pub type Hits = SmallVec<[Coord<f64>; 2]>;

/// Intersection of the closed segments `a1`–`a2` and `b1`–`b2`, endpoints
/// included.  Parallel (and colinear) segments report no intersection.
pub fn segment_intersection(
    a1: Coord<f64>,
    a2: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
    tol: &Tolerance,
) -> Option<Coord<f64>> {
    let r = a2 - a1;
    let s = b2 - b1;
    let (r_len, s_len) = (dist(a1, a2), dist(b1, b2));
    if r_len < tol.eps || s_len < tol.eps { return None; }

    let denom = cross(r, s);
    if denom.abs() <= 1e-12 * r_len * s_len { return None; }

    let qp = b1 - a1;
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;

    let (te, ue) = (tol.eps / r_len, tol.eps / s_len);
    if t < -te || t > 1.0 + te || u < -ue || u > 1.0 + ue { return None; }

    Some(a1 + r * t)
}

/// Like [`segment_intersection`], but a meeting point that is an endpoint of
/// both segments (a shared corner) does not count.
pub fn true_segment_intersection(
    a1: Coord<f64>,
    a2: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
    tol: &Tolerance,
) -> Option<Coord<f64>> {
    let p = segment_intersection(a1, a2, b1, b2, tol)?;
    let at_a = tol.point_eq(p, a1) || tol.point_eq(p, a2);
    let at_b = tol.point_eq(p, b1) || tol.point_eq(p, b2);
    if at_a && at_b { None } else { Some(p) }
}

/// Intersections of the infinite line through `a` and `b` with a circle.
/// A tangent line yields a single point.
pub fn line_circle_intersection(
    a: Coord<f64>,
    b: Coord<f64>,
    center: Coord<f64>,
    radius: f64,
    tol: &Tolerance,
) -> Hits {
    let d = b - a;
    let len2 = dot(d, d);
    if len2 < tol.eps * tol.eps { return Hits::new(); }

    let t0 = dot(center - a, d) / len2;
    let foot = a + d * t0;
    let off = dist(center, foot);
    if off > radius + tol.eps { return Hits::new(); }

    let h2 = radius * radius - off * off;
    if h2 <= 0.0 || h2.sqrt() < tol.eps {
        return smallvec![foot];
    }
    let step = d * (h2.sqrt() / len2.sqrt());
    smallvec![foot - step, foot + step]
}

/// Intersections of two circles.  Concentric circles (including identical
/// ones) yield nothing.
pub fn circle_circle_intersection(
    c1: Coord<f64>,
    r1: f64,
    c2: Coord<f64>,
    r2: f64,
    tol: &Tolerance,
) -> Hits {
    let d = dist(c1, c2);
    if d < tol.eps { return Hits::new(); }
    if d > r1 + r2 + tol.eps || d < (r1 - r2).abs() - tol.eps { return Hits::new(); }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h2 = r1 * r1 - a * a;
    let dir = (c2 - c1) / d;
    let base = c1 + dir * a;
    if h2 <= 0.0 || h2.sqrt() < tol.eps {
        return smallvec![base];
    }
    let h = h2.sqrt();
    let perp = Coord { x: -dir.y, y: dir.x };
    smallvec![base + perp * h, base - perp * h]
}
