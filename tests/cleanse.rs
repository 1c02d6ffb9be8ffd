// Integration tests for the cleanser:
//   cleanse, analyze, and each pass on its own

use patternmap::{build_dcel, Cleanse, Coord, EdgeShape, Map, VertexId};

fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

/// Push a closed polygon without any intersection handling.
fn push_ring(map: &mut Map, points: &[Coord<f64>]) -> Vec<VertexId> {
    let ids: Vec<VertexId> = points.iter().map(|&p| map.push_vertex(p)).collect();
    for i in 0..ids.len() {
        map.push_edge(ids[i], ids[(i + 1) % ids.len()], EdgeShape::Line);
    }
    ids
}

/// A map built with raw pushes that needs every pass.
fn messy() -> Map {
    let mut map = Map::new();
    // Two overlapping squares that were never split.
    let a = push_ring(&mut map, &[c(0.0, 0.0), c(2.0, 0.0), c(2.0, 2.0), c(0.0, 2.0)]);
    push_ring(&mut map, &[c(1.0, 1.0), c(3.0, 1.0), c(3.0, 3.0), c(1.0, 3.0)]);

    // A near-copy of a corner, joined by its own edge.
    let near = map.push_vertex(c(2.0 + 2e-5, -2e-5));
    map.push_edge(a[0], near, EdgeShape::Line);

    // A spur of two edges hanging off the first square.
    let s1 = map.push_vertex(c(-1.0, 0.0));
    let s2 = map.push_vertex(c(-2.0, 0.0));
    map.push_edge(a[0], s1, EdgeShape::Line);
    map.push_edge(s1, s2, EdgeShape::Line);

    // A duplicate side, and a lonely vertex left behind once its loop goes.
    map.push_edge(a[1], a[0], EdgeShape::Line);
    let lonely = map.push_vertex(c(10.0, 10.0));
    map.push_edge(lonely, lonely, EdgeShape::Line);
    map
}

#[test]
fn every_pass_is_idempotent() {
    for flag in Cleanse::all().iter() {
        let mut map = messy();
        map.cleanse(flag);
        let (vertices, edges) = (map.num_vertices(), map.num_edges());
        assert_eq!(map.cleanse(flag), Cleanse::empty(), "{flag:?} changed the map twice");
        assert_eq!((map.num_vertices(), map.num_edges()), (vertices, edges));
    }
}

#[test]
fn full_cleanse_is_idempotent() {
    let mut map = messy();
    let changed = map.cleanse(Cleanse::all());
    assert!(changed.contains(Cleanse::BAD_EDGES | Cleanse::INTERSECTING_EDGES));
    assert_eq!(map.cleanse(Cleanse::all()), Cleanse::empty());
}

#[test]
fn analysis_predicts_without_touching() {
    let map = messy();
    let before = (map.num_vertices(), map.num_edges());

    let predicted = map.analyze(Cleanse::all());
    assert_eq!((map.num_vertices(), map.num_edges()), before);
    let expected = Cleanse::BAD_EDGES
        | Cleanse::INTERSECTING_EDGES
        | Cleanse::NEAR_VERTICES
        | Cleanse::DANGLING_VERTICES
        | Cleanse::ISOLATED_VERTICES;
    // Coalescing drops the duplicates it creates, the pushed one included.
    assert_eq!(predicted, expected);

    let mut copy = map.copy();
    assert_eq!(copy.cleanse(Cleanse::all()), predicted);
}

#[test]
fn default_passes_leave_a_buildable_map() {
    let mut map = messy();
    map.cleanse(Cleanse::default_passes() | Cleanse::DANGLING_VERTICES);
    map.verify().unwrap();

    let graph = build_dcel(&map).unwrap();
    // Both squares, split where they cross: two L shapes and their overlap.
    let mut areas: Vec<f64> = graph.bounded_faces()
        .map(|id| graph.face(id).unwrap().area())
        .collect();
    areas.sort_by(f64::total_cmp);
    assert_eq!(areas.len(), 3);
    assert!((areas[0] - 1.0).abs() < 1e-6);
    assert!((areas[1] - 3.0).abs() < 1e-6);
    assert!((areas[2] - 3.0).abs() < 1e-6);
}

#[test]
fn colinear_pass_undoes_splitting() {
    let mut map = Map::new();
    for i in 0..4 {
        let x = i as f64;
        map.insert_line(c(x, 0.0), c(x + 1.0, 0.0));
    }
    assert_eq!(map.num_edges(), 4);
    assert_eq!(map.cleanse(Cleanse::COLINEAR_EDGES), Cleanse::COLINEAR_EDGES);
    assert_eq!((map.num_vertices(), map.num_edges()), (2, 1));
}
