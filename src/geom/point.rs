use std::f64::consts::{PI, TAU};

use geo::{AffineTransform, Coord};

use super::Tolerance;

/// Squared distance between two points.
#[inline]
pub fn dist2(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Distance between two points.
#[inline]
pub fn dist(a: Coord<f64>, b: Coord<f64>) -> f64 { dist2(a, b).sqrt() }

/// z-component of the cross product of two vectors.
#[inline]
pub fn cross(a: Coord<f64>, b: Coord<f64>) -> f64 { a.x * b.y - a.y * b.x }

#[inline]
pub fn dot(a: Coord<f64>, b: Coord<f64>) -> f64 { a.x * b.x + a.y * b.y }

/// Direction of a vector in radians, in `[0, 2π)`.
#[inline]
pub fn angle_of(v: Coord<f64>) -> f64 { normalize_angle(v.y.atan2(v.x)) }

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(a: f64) -> f64 {
    let a = a.rem_euclid(TAU);
    if a >= TAU { 0.0 } else { a }
}

/// Parameter of the projection of `p` onto the line through `a` and `b`
/// (0 at `a`, 1 at `b`).  Returns 0 when `a == b`.
#[inline]
pub fn project_param(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d = b - a;
    let len2 = dot(d, d);
    if len2 == 0.0 { 0.0 } else { dot(p - a, d) / len2 }
}

/// Distance from `p` to the closed segment `a`–`b`.
pub fn segment_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let t = project_param(p, a, b).clamp(0.0, 1.0);
    dist(p, a + (b - a) * t)
}

/// True if the path `a`, `b`, `c` goes straight on or doubles back at `b`:
/// the turn there is within `tol.angle` of 0 or of π.  A point coincident
/// with `b` makes the turn undefined and counts as colinear.
pub fn is_colinear(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>, tol: &Tolerance) -> bool {
    let (u, w) = (a - b, c - b);
    if tol.point_eq(a, b) || tol.point_eq(c, b) { return true; }
    let turn = cross(u, w).atan2(dot(u, w)).abs();
    turn < tol.angle || PI - turn < tol.angle
}

/// Mirror `p` across the infinite line through `a` and `b`.
pub fn reflect_point(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    let foot = a + (b - a) * project_param(p, a, b);
    foot * 2.0 - p
}

/// Determinant of the linear part of `t`; negative for reflections.
pub fn transform_determinant(t: &AffineTransform<f64>) -> f64 {
    let o = t.apply(Coord { x: 0.0, y: 0.0 });
    let ex = t.apply(Coord { x: 1.0, y: 0.0 }) - o;
    let ey = t.apply(Coord { x: 0.0, y: 1.0 }) - o;
    cross(ex, ey)
}
