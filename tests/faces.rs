// Integration tests for face extraction and coloring:
//   build_dcel, two-coloring, face groups and palettes

use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use patternmap::faces::{assign_palette, group_faces, two_color_by_adjacency, two_color_by_area};
use patternmap::{
    build_dcel, AffineTransform, BuildError, Cleanse, Coord, EdgePoly, EdgeShape, FaceGraph, FaceId, FaceState, Map,
    VertexId,
};

fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

fn square_at(x: f64, y: f64) -> EdgePoly {
    EdgePoly::from_points(&[c(x, y), c(x + 1.0, y), c(x + 1.0, y + 1.0), c(x, y + 1.0)])
}

/// An `n` x `n` grid of unit squares placed as translated copies of one.
fn grid(n: usize) -> Map {
    let mut motif = Map::new();
    motif.insert_edge_poly(&square_at(0.0, 0.0));
    let placements: Vec<AffineTransform<f64>> = (0..n)
        .flat_map(|i| (0..n).map(move |j| AffineTransform::translate(i as f64, j as f64)))
        .collect();
    let mut map = Map::new();
    map.merge_many(&motif, &placements);
    map
}

fn euler(map: &Map, graph: &FaceGraph) -> isize {
    map.num_vertices() as isize - map.num_edges() as isize + graph.num_faces() as isize
}

/// Panic if two bounded faces sharing an edge have the same color.
fn assert_properly_colored(graph: &FaceGraph) {
    for id in graph.bounded_faces() {
        let state = graph.face(id).unwrap().state();
        assert!(matches!(state, FaceState::White | FaceState::Black), "{id} is {state:?}");
        for n in graph.adjacent_faces(id) {
            let other = graph.face(n).unwrap();
            if other.is_outer() { continue; }
            assert_ne!(state, other.state(), "{id} and {n} share a color");
        }
    }
}

// ---------------------------------------------------------------------------
// DCEL construction
// ---------------------------------------------------------------------------

#[test]
fn connected_maps_satisfy_euler() {
    let mut diagonals = Map::new();
    diagonals.insert_edge_poly(&square_at(0.0, 0.0));
    diagonals.insert_line(c(0.0, 0.0), c(1.0, 1.0));
    diagonals.insert_line(c(1.0, 0.0), c(0.0, 1.0));

    let mut star = Map::new();
    let corner = |k: usize| {
        let a = TAU * k as f64 / 7.0;
        c(a.cos(), a.sin())
    };
    for k in 0..7 {
        star.insert_line(corner(k), corner((k + 3) % 7));
    }
    let quarter = [c(0.5, 0.0), c(0.0, 0.5), c(-0.5, 0.0), c(0.0, -0.5)];
    for k in 0..4 {
        star.insert_arc(quarter[k], quarter[(k + 1) % 4], c(0.0, 0.0), true);
    }

    for map in [diagonals, grid(4), star] {
        let graph = build_dcel(&map).unwrap();
        assert_eq!(euler(&map, &graph), 2, "{}", map.summary());
        assert!(graph.outer_face().is_some());
    }
}

#[test]
fn bounded_faces_tile_the_grid() {
    let map = grid(3);
    let graph = build_dcel(&map).unwrap();

    let bounded: Vec<FaceId> = graph.bounded_faces().collect();
    assert_eq!(bounded.len(), 9);
    let total: f64 = bounded.iter().map(|&id| graph.face(id).unwrap().area()).sum();
    assert_abs_diff_eq!(total, 9.0, epsilon = 1e-9);

    let outer = graph.face(graph.outer_face().unwrap()).unwrap();
    assert_abs_diff_eq!(outer.area(), -9.0, epsilon = 1e-9);
    assert_eq!(outer.sides(), 12);
}

#[test]
fn build_errors_are_repaired_by_cleansing() {
    let mut map = grid(2);
    let corner = map.find_vertex(c(0.0, 0.0)).unwrap();
    map.push_edge(corner, VertexId(999), EdgeShape::Line);

    assert!(matches!(build_dcel(&map), Err(BuildError::MissingVertex { vertex: VertexId(999), .. })));
    assert_eq!(map.cleanse(Cleanse::BAD_EDGES), Cleanse::BAD_EDGES);
    assert_eq!(build_dcel(&map).unwrap().bounded_faces().count(), 4);
}

/// A unit square with both diagonals pushed raw, so they cross without a
/// vertex at the center.
fn square_with_raw_diagonals() -> Map {
    let mut map = Map::new();
    map.insert_edge_poly(&square_at(0.0, 0.0));
    let corner = |map: &Map, x, y| map.find_vertex(c(x, y)).unwrap();
    let (a, b) = (corner(&map, 0.0, 0.0), corner(&map, 1.0, 1.0));
    let (d, e) = (corner(&map, 1.0, 0.0), corner(&map, 0.0, 1.0));
    map.push_edge(a, b, EdgeShape::Line);
    map.push_edge(d, e, EdgeShape::Line);
    map
}

#[test]
fn crossing_map_is_rejected() {
    let map = square_with_raw_diagonals();
    assert!(map.verify().is_err());
    assert!(matches!(build_dcel(&map), Err(BuildError::Crossing { .. })));
}

#[test]
fn dividing_intersections_makes_the_crossing_map_buildable() {
    let mut map = square_with_raw_diagonals();
    assert_eq!(map.cleanse(Cleanse::INTERSECTING_EDGES), Cleanse::INTERSECTING_EDGES);

    let graph = build_dcel(&map).unwrap();
    let bounded: Vec<FaceId> = graph.bounded_faces().collect();
    assert_eq!(bounded.len(), 4);
    for id in bounded {
        assert_abs_diff_eq!(graph.face(id).unwrap().area(), 0.25, epsilon = 1e-9);
    }
    assert_eq!(euler(&map, &graph), 2);
}

// ---------------------------------------------------------------------------
// Two-coloring
// ---------------------------------------------------------------------------

#[test]
fn checkerboard_three_by_three() {
    let mut graph = build_dcel(&grid(3)).unwrap();
    let coloring = two_color_by_adjacency(&mut graph);

    assert_properly_colored(&graph);
    let mut sizes = [coloring.white.len(), coloring.black.len()];
    sizes.sort();
    assert_eq!(sizes, [4, 5]);
}

#[test]
fn checkerboard_four_by_four() {
    let mut graph = build_dcel(&grid(4)).unwrap();
    let coloring = two_color_by_adjacency(&mut graph);

    assert_properly_colored(&graph);
    assert_eq!(coloring.white.len(), 8);
    assert_eq!(coloring.black.len(), 8);
}

#[test]
fn odd_cycle_of_faces_cannot_alternate() {
    // Three triangles around a center point, each touching the other two.
    let (a, b, d) = (c(0.0, 0.0), c(4.0, 0.0), c(2.0, 3.0));
    let mut map = Map::new();
    map.insert_edge_poly(&EdgePoly::from_points(&[a, b, d]));
    for p in [a, b, d] {
        map.insert_line(c(2.0, 1.0), p);
    }

    let mut graph = build_dcel(&map).unwrap();
    let coloring = two_color_by_adjacency(&mut graph);
    assert_eq!(coloring.white.len() + coloring.black.len(), 3);

    let clash = graph.bounded_faces().any(|id| {
        let state = graph.face(id).unwrap().state();
        graph.adjacent_faces(id).into_iter()
            .any(|n| !graph.face(n).unwrap().is_outer() && graph.face(n).unwrap().state() == state)
    });
    assert!(clash);
}

#[test]
fn every_component_gets_colored() {
    let mut map = Map::new();
    map.insert_edge_poly(&square_at(0.0, 0.0));
    map.insert_edge_poly(&square_at(5.0, 5.0));
    map.insert_line(c(5.0, 5.0), c(6.0, 6.0));

    let mut graph = build_dcel(&map).unwrap();
    let coloring = two_color_by_adjacency(&mut graph);
    assert_eq!(coloring.white.len() + coloring.black.len(), 3);
    assert_properly_colored(&graph);
}

#[test]
fn area_coloring_ignores_adjacency() {
    let mut map = grid(3);
    map.insert_line(c(1.0, 1.0), c(2.0, 2.0));
    let mut graph = build_dcel(&map).unwrap();

    let coloring = two_color_by_area(&mut graph);
    // Eight unit squares in one color, the two half squares in the other.
    let mut sizes = [coloring.white.len(), coloring.black.len()];
    sizes.sort();
    assert_eq!(sizes, [2, 8]);
}

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

#[test]
fn short_palette_hides_the_smallest_groups() {
    let mut map = grid(3);
    map.insert_line(c(1.0, 1.0), c(2.0, 2.0));
    map.insert_line(c(2.0, 1.0), c(1.0, 2.0));
    let mut graph = build_dcel(&map).unwrap();

    let groups = group_faces(&graph);
    assert_eq!(groups.len(), 2);
    assert_eq!((groups[0].faces.len(), groups[0].sides), (8, 4));
    assert_eq!((groups[1].faces.len(), groups[1].sides), (4, 3));
    assert_abs_diff_eq!(groups[1].area, 0.25, epsilon = 1e-9);

    let colors = assign_palette(&mut graph, &groups, &[0xff0000_u32]);
    assert_eq!(colors, vec![Some(0xff0000), None]);
    for &id in &groups[1].faces {
        let face = graph.face(id).unwrap();
        assert_eq!(face.color_index(), None);
        assert_eq!(face.state(), FaceState::Done);
    }
    for &id in &groups[0].faces {
        assert_eq!(graph.face(id).unwrap().color_index(), Some(0));
    }
}
