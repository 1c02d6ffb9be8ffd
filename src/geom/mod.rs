//! Tolerance-aware geometry kernel: points, arcs, segments and their
//! intersections.  Everything here is pure.
mod arc;
mod bbox;
mod intersect;
mod point;
mod segment;
mod tolerance;

pub use arc::Arc;
pub(crate) use bbox::{candidate_pairs, BoundingBox};
pub use intersect::{
    circle_circle_intersection, line_circle_intersection, segment_intersection,
    true_segment_intersection, Hits,
};
pub use point::{
    angle_of, cross, dist, dist2, dot, is_colinear, normalize_angle, project_param, reflect_point,
    segment_distance, transform_determinant,
};
pub use segment::Segment;
pub use tolerance::Tolerance;
