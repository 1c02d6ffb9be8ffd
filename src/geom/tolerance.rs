use geo::Coord;
use serde::{Deserialize, Serialize};

use super::dist2;

/// Comparison thresholds used by every geometric predicate.
///
/// A `Tolerance` travels with each `Map` so results never depend on global
/// state.  All fields are absolute distances except `angle` (radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Two scalars or points closer than this are equal.
    pub eps: f64,
    /// Looser threshold for "near" tests (feature adjacency, vertex coalescing).
    pub near: f64,
    /// Angular threshold for colinearity and direction comparisons.
    pub angle: f64,
    /// Threshold for comparing face areas.
    pub area: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            eps: Self::DEFAULT_EPS,
            near: Self::DEFAULT_NEAR,
            angle: 1e-5,
            area: 1e-6,
        }
    }
}

impl Tolerance {
    pub const DEFAULT_EPS: f64 = 1e-7;
    pub const DEFAULT_NEAR: f64 = 1e-4;

    /// Replace the equality threshold.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Replace the "near" threshold.
    pub fn with_near(mut self, near: f64) -> Self {
        self.near = near;
        self
    }

    /// Replace the angular threshold.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Replace the area threshold.
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    #[inline] pub fn approx_eq(&self, a: f64, b: f64) -> bool { (a - b).abs() < self.eps }

    #[inline] pub fn is_zero(&self, a: f64) -> bool { a.abs() < self.eps }

    #[inline] pub fn point_eq(&self, a: Coord<f64>, b: Coord<f64>) -> bool { dist2(a, b) < self.eps * self.eps }

    #[inline] pub fn is_near(&self, a: Coord<f64>, b: Coord<f64>) -> bool { dist2(a, b) < self.near * self.near }

    #[inline] pub fn area_eq(&self, a: f64, b: f64) -> bool { (a - b).abs() < self.area }

    /// True if `a` is within `angle` of zero, or of a full turn.
    #[inline]
    pub fn angle_is_zero(&self, a: f64) -> bool {
        let a = super::normalize_angle(a);
        a < self.angle || a > std::f64::consts::TAU - self.angle
    }
}
