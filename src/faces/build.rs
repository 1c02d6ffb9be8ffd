use geo::Coord;
use geograph::{Dcel, DcelError, FaceId, HalfEdgeId};
use thiserror::Error;
use tracing::debug;

use crate::map::{EdgeId, EdgePoly, Map, PolyEdge, VertexId};

use super::{Face, FaceGraph};

/// Failures while building faces.  Each one means the map was not cleansed
/// well enough; run the cleanser and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An edge refers to a vertex that is not in the map.
    #[error("{edge} references missing {vertex}")]
    MissingVertex { edge: EdgeId, vertex: VertexId },

    /// An edge is a loop or joins coincident points.
    #[error("{edge} is trivial")]
    TrivialEdge { edge: EdgeId },

    /// Two edges cross away from a shared vertex.
    #[error("{a} and {b} cross without a shared vertex")]
    Crossing { a: EdgeId, b: EdgeId },

    /// The successor of a half-edge could not be found around its head
    /// vertex.
    #[error("no successor for {half_edge} around its head vertex")]
    UnresolvedNext { half_edge: HalfEdgeId },

    #[error(transparent)]
    Topology(#[from] DcelError),
}

/// Build the half-edge structure of `map` and extract its faces.
///
/// Around every vertex the successor of an incoming half-edge is the first
/// outgoing one clockwise from its twin, so each bounded face is walked
/// counter-clockwise and comes out with positive area.  Cycles with
/// non-positive area bound the unbounded region; the largest of them is
/// reported as the outer face.
///
/// A map whose edges cross is rejected with [`BuildError::Crossing`]; run
/// [`Cleanse::INTERSECTING_EDGES`](crate::Cleanse::INTERSECTING_EDGES) first.
pub fn build_dcel(map: &Map) -> Result<FaceGraph, BuildError> {
    check_edges(map)?;
    if let Some((a, b, _)) = map.crossings().into_iter().next() {
        return Err(BuildError::Crossing { a, b });
    }
    build_dcel_allowing_crossings(map)
}

fn check_edges(map: &Map) -> Result<(), BuildError> {
    for (id, edge) in map.get_edges() {
        for vertex in [edge.v1(), edge.v2()] {
            if map.vertex(vertex).is_none() {
                return Err(BuildError::MissingVertex { edge: id, vertex });
            }
        }
        if map.is_trivial(id) {
            return Err(BuildError::TrivialEdge { edge: id });
        }
    }
    Ok(())
}

/// [`build_dcel`] without the crossing check.  Crossing edges produce faces
/// that overlap one another; use this only to feed
/// [`remove_overlaps`](super::remove_overlaps).
pub fn build_dcel_allowing_crossings(map: &Map) -> Result<FaceGraph, BuildError> {
    check_edges(map)?;
    let tol = *map.tolerance();

    // ----- Vertices and twin pairs -----

    let mut dcel: Dcel<Coord<f64>, EdgeId> = Dcel::new();
    let mut vertex_slots = Vec::new();
    for (id, v) in map.get_vertices() {
        if vertex_slots.len() <= id.0 { vertex_slots.resize(id.0 + 1, None); }
        vertex_slots[id.0] = Some(dcel.add_vertex(v.pos()));
    }

    let mut pairs: Vec<Option<(HalfEdgeId, HalfEdgeId)>> = Vec::new();
    for (id, edge) in map.get_edges() {
        let lookup = |vertex: VertexId| {
            vertex_slots.get(vertex.0).copied().flatten()
                .ok_or(BuildError::MissingVertex { edge: id, vertex })
        };
        let (u, v) = (lookup(edge.v1())?, lookup(edge.v2())?);
        if pairs.len() <= id.0 { pairs.resize(id.0 + 1, None); }
        pairs[id.0] = Some(dcel.add_edge(u, v, id));
    }

    // The half-edge of `edge` that leaves map vertex `from`.
    let leaving = |edge: EdgeId, from: VertexId| -> Option<HalfEdgeId> {
        let (uv, vu) = pairs.get(edge.0).copied().flatten()?;
        let e = map.edge(edge)?;
        Some(if e.v1() == from { uv } else { vu })
    };

    // ----- Successor links -----

    let neighbours = map.neighbours();
    let mut links = Vec::with_capacity(dcel.num_half_edges());
    for (id, edge) in map.get_edges() {
        for (from, head) in [(edge.v1(), edge.v2()), (edge.v2(), edge.v1())] {
            let half_edge = leaving(id, from).ok_or(BuildError::MissingVertex { edge: id, vertex: from })?;
            let next = neighbours.next_clockwise(head, id)
                .and_then(|e| leaving(e, head))
                .ok_or(BuildError::UnresolvedNext { half_edge })?;
            links.push((half_edge, next));
        }
    }
    for (half_edge, next) in links {
        dcel.set_next(half_edge, next);
    }

    dcel.assign_faces()?;
    dcel.validate()?;

    // ----- Faces -----

    let faces: Vec<Face> = dcel.face_ids()
        .map(|fid| {
            let start = dcel.face(fid).half_edge;
            let poly: EdgePoly = dcel.face_cycle(start)
                .filter_map(|he| {
                    let id = dcel.half_edge(he).data;
                    let shape = *map.edge(id)?.shape();
                    let forward = pairs.get(id.0).copied().flatten()?.0 == he;
                    Some(PolyEdge::new(
                        dcel.vertex(dcel.origin(he)).coords,
                        dcel.vertex(dcel.dest(he)).coords,
                        if forward { shape } else { shape.reversed() },
                    ))
                })
                .collect();
            Face::new(poly, start, &tol)
        })
        .collect();

    let outer = faces.iter().enumerate()
        .filter(|(_, f)| f.is_outer())
        .filter_map(|(i, f)| f.bounding_rect(&tol).map(|r| (i, r.width() + r.height())))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| FaceId(i));

    debug!(
        vertices = dcel.num_vertices(),
        half_edges = dcel.num_half_edges(),
        faces = faces.len(),
        outer = ?outer,
        "built face graph"
    );

    Ok(FaceGraph { dcel, faces, outer, tolerance: tol })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::map::EdgeShape;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    fn unit_square() -> Map {
        let mut map = Map::new();
        map.insert_edge_poly(&EdgePoly::from_points(&[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0)]));
        map
    }

    #[test]
    fn square_has_one_bounded_face() {
        let graph = build_dcel(&unit_square()).unwrap();
        assert_eq!(graph.num_faces(), 2);

        let bounded: Vec<FaceId> = graph.bounded_faces().collect();
        assert_eq!(bounded.len(), 1);
        let face = graph.face(bounded[0]).unwrap();
        assert_abs_diff_eq!(face.area(), 1.0, epsilon = 1e-12);
        assert_eq!(face.sides(), 4);

        let outer = graph.outer_face().unwrap();
        assert_abs_diff_eq!(graph.face(outer).unwrap().area(), -1.0, epsilon = 1e-12);
        assert_eq!(graph.adjacent_faces(bounded[0]), vec![outer]);
    }

    #[test]
    fn half_disc_face_area_includes_the_arc() {
        let mut map = Map::new();
        map.insert_line(c(-1.0, 0.0), c(1.0, 0.0));
        map.insert_arc(c(1.0, 0.0), c(-1.0, 0.0), c(0.0, 0.0), true);

        let graph = build_dcel(&map).unwrap();
        let bounded: Vec<FaceId> = graph.bounded_faces().collect();
        assert_eq!(bounded.len(), 1);
        let area = graph.face(bounded[0]).unwrap().area();
        assert_abs_diff_eq!(area, std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn dangling_edge_stays_inside_its_face() {
        let mut map = unit_square();
        map.insert_line(c(0.0, 0.0), c(0.5, 0.5));
        let graph = build_dcel(&map).unwrap();
        assert_eq!(graph.num_faces(), 2);
        let inner = graph.bounded_faces().next().unwrap();
        assert_eq!(graph.face(inner).unwrap().sides(), 6);
    }

    #[test]
    fn missing_vertex_is_an_error() {
        let mut map = unit_square();
        let a = map.find_vertex(c(0.0, 0.0)).unwrap();
        map.push_edge(a, VertexId(42), EdgeShape::Line);
        assert!(matches!(build_dcel(&map), Err(BuildError::MissingVertex { vertex: VertexId(42), .. })));
    }

    #[test]
    fn crossing_diagonals_are_an_error() {
        let mut map = unit_square();
        let corner = |x, y| map.find_vertex(c(x, y)).unwrap();
        let (a, b, d, e) = (corner(0.0, 0.0), corner(1.0, 1.0), corner(1.0, 0.0), corner(0.0, 1.0));
        let first = map.push_edge(a, b, EdgeShape::Line);
        let second = map.push_edge(d, e, EdgeShape::Line);

        assert_eq!(build_dcel(&map).unwrap_err(), BuildError::Crossing { a: first, b: second });
        // The unchecked path still walks the raw cycles.
        assert!(build_dcel_allowing_crossings(&map).is_ok());
    }

    #[test]
    fn trivial_edge_is_an_error() {
        let mut map = unit_square();
        let a = map.find_vertex(c(0.0, 0.0)).unwrap();
        let e = map.push_edge(a, a, EdgeShape::Line);
        assert_eq!(build_dcel(&map).unwrap_err(), BuildError::TrivialEdge { edge: e });
    }

    #[test]
    fn empty_map_has_no_faces() {
        let graph = build_dcel(&Map::new()).unwrap();
        assert_eq!(graph.num_faces(), 0);
        assert_eq!(graph.outer_face(), None);
    }
}
