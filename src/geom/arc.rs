use std::f64::consts::{FRAC_PI_2, TAU};

use geo::{Coord, Rect};

use super::{angle_of, cross, dist, normalize_angle, Tolerance};

/// A circular arc from `start` to `end` around `center`.
///
/// `convex` selects which of the two arcs joining the endpoints is meant:
/// `true` sweeps counter-clockwise from `start` to `end`, `false` sweeps
/// clockwise.  Reversing an arc therefore flips the flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start:  Coord<f64>,
    pub end:    Coord<f64>,
    pub center: Coord<f64>,
    pub convex: bool,
}

impl Arc {
    pub fn new(start: Coord<f64>, end: Coord<f64>, center: Coord<f64>, convex: bool) -> Self {
        Self { start, end, center, convex }
    }

    /// Radius measured at the start point.
    #[inline] pub fn radius(&self) -> f64 { dist(self.start, self.center) }

    #[inline] pub fn start_angle(&self) -> f64 { angle_of(self.start - self.center) }

    #[inline] pub fn end_angle(&self) -> f64 { angle_of(self.end - self.center) }

    /// Unsigned angular extent in `[0, 2π)`.
    pub fn sweep(&self) -> f64 {
        if self.convex {
            normalize_angle(self.end_angle() - self.start_angle())
        } else {
            normalize_angle(self.start_angle() - self.end_angle())
        }
    }

    /// Sweep with the sign of the direction of travel (positive = CCW).
    #[inline]
    pub fn signed_sweep(&self) -> f64 {
        if self.convex { self.sweep() } else { -self.sweep() }
    }

    /// The same arc traversed from `end` to `start`.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self { start: self.end, end: self.start, center: self.center, convex: !self.convex }
    }

    /// Angular offset of `p` from `start`, measured in the direction of
    /// travel, in `[0, 2π)`.
    pub fn offset(&self, p: Coord<f64>) -> f64 {
        let a = angle_of(p - self.center);
        if self.convex {
            normalize_angle(a - self.start_angle())
        } else {
            normalize_angle(self.start_angle() - a)
        }
    }

    /// Monotone parameter along the arc: like `offset` but points just
    /// before `start` come out slightly negative instead of near 2π.
    pub fn param(&self, p: Coord<f64>, tol: &Tolerance) -> f64 {
        let off = self.offset(p);
        if off > self.sweep() + self.angular_eps(tol) { off - TAU } else { off }
    }

    /// True if the ray from the center through `p` falls inside the sweep.
    pub fn contains_angle(&self, p: Coord<f64>, tol: &Tolerance) -> bool {
        let off = self.offset(p);
        let slack = self.angular_eps(tol);
        off <= self.sweep() + slack || off >= TAU - slack
    }

    /// True if `p` lies on the arc itself.
    pub fn contains_point(&self, p: Coord<f64>, tol: &Tolerance) -> bool {
        (dist(p, self.center) - self.radius()).abs() < tol.eps && self.contains_angle(p, tol)
    }

    /// True if `p` lies strictly inside the circular segment cut off by the
    /// chord from `start` to `end`, on the side the arc bulges to.
    pub fn segment_contains(&self, p: Coord<f64>) -> bool {
        let r = self.radius();
        if dist(p, self.center) >= r { return false; }
        let chord = self.end - self.start;
        let side = cross(chord, p - self.start);
        let bulge = cross(chord, self.midpoint() - self.start);
        side * bulge > 0.0
    }

    /// Point half-way along the sweep.
    pub fn midpoint(&self) -> Coord<f64> {
        self.point_at(self.signed_sweep() * 0.5)
    }

    /// Point reached after turning `theta` radians from `start` (positive =
    /// CCW, regardless of `convex`).
    pub fn point_at(&self, theta: f64) -> Coord<f64> {
        let r = self.radius();
        let a = self.start_angle() + theta;
        Coord { x: self.center.x + r * a.cos(), y: self.center.y + r * a.sin() }
    }

    /// Unit tangent leaving `start` in the direction of travel.
    pub fn start_tangent(&self) -> Coord<f64> {
        let r = self.start - self.center;
        let t = if self.convex { Coord { x: -r.y, y: r.x } } else { Coord { x: r.y, y: -r.x } };
        t / self.radius().max(f64::MIN_POSITIVE)
    }

    /// Unit tangent leaving `end` back along the arc.
    pub fn end_tangent(&self) -> Coord<f64> {
        self.reversed().start_tangent()
    }

    /// Signed area between the arc and the x-axis origin, as used by Green's
    /// theorem: the contribution of this arc to a closed boundary's area.
    pub fn area_contribution(&self) -> f64 {
        let r = self.radius();
        0.5 * r * r * self.signed_sweep() + 0.5 * cross(self.center, self.end - self.start)
    }

    /// Tight axis-aligned bounds, including any axis extremes inside the sweep.
    pub fn bounding_rect(&self, tol: &Tolerance) -> Rect<f64> {
        let (mut min, mut max) = (self.start, self.start);
        let mut grow = |p: Coord<f64>| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        };
        grow(self.end);
        let r = self.radius();
        for k in 0..4 {
            let a = k as f64 * FRAC_PI_2;
            let p = Coord { x: self.center.x + r * a.cos(), y: self.center.y + r * a.sin() };
            if self.contains_angle(p, tol) { grow(p); }
        }
        Rect::new(min, max)
    }

    fn angular_eps(&self, tol: &Tolerance) -> f64 {
        tol.eps / self.radius().max(tol.eps)
    }
}
