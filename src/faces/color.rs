use tracing::warn;

use super::{FaceGraph, FaceId, FaceState};

/// Faces split into two colors, each list in face id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TwoColoring {
    pub white: Vec<FaceId>,
    pub black: Vec<FaceId>,
}

impl TwoColoring {
    fn collect(graph: &FaceGraph) -> Self {
        let mut out = Self::default();
        for id in graph.bounded_faces() {
            match graph.state(id) {
                Some(FaceState::White) => out.white.push(id),
                Some(FaceState::Black) => out.black.push(id),
                _ => {}
            }
        }
        out
    }
}

/// Faces of equal area and side count.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceGroup {
    pub area: f64,
    pub sides: usize,
    pub faces: Vec<FaceId>,
}

// ---------------------------------------------------------------------------
// Two-coloring
// ---------------------------------------------------------------------------

/// Color faces so that neighbours across an edge tend to differ.
///
/// Each sweep seeds the first uncolored face and walks the faces reachable
/// from it depth-first.  A face takes the opposite of the first colored
/// neighbour found along its boundary, or white if it has none.  This is
/// exact when the face adjacency graph is bipartite (grids, most tilings);
/// around an odd cycle of faces some neighbours end up with the same color.
/// Sweeps repeat until every face is colored, so separate components each
/// get their own seed.
pub fn two_color_by_adjacency(graph: &mut FaceGraph) -> TwoColoring {
    let ids: Vec<FaceId> = graph.bounded_faces().collect();
    for &id in &ids {
        graph.set_state(id, FaceState::Undone);
    }

    while let Some(seed) = ids.iter().copied().find(|&id| graph.state(id) == Some(FaceState::Undone)) {
        graph.set_state(seed, FaceState::Processing);
        let mut stack = vec![seed];
        while let Some(face) = stack.pop() {
            let neighbours: Vec<FaceId> = graph.adjacent_faces(face).into_iter()
                .filter(|&n| graph.face(n).is_some_and(|f| f.is_colorable()))
                .collect();

            let color = neighbours.iter()
                .find_map(|&n| match graph.state(n) {
                    Some(FaceState::White) => Some(FaceState::Black),
                    Some(FaceState::Black) => Some(FaceState::White),
                    _ => None,
                })
                .unwrap_or(FaceState::White);
            graph.set_state(face, color);

            for n in neighbours {
                if graph.state(n) == Some(FaceState::Undone) {
                    graph.set_state(n, FaceState::Processing);
                    stack.push(n);
                }
            }
        }
    }

    TwoColoring::collect(graph)
}

/// Color faces by area: every distinct area (within the area tolerance)
/// alternates between white and black in order of first appearance.
pub fn two_color_by_area(graph: &mut FaceGraph) -> TwoColoring {
    let tol = *graph.tolerance();
    let ids: Vec<FaceId> = graph.bounded_faces().collect();
    let mut areas: Vec<f64> = Vec::new();
    for id in ids {
        let Some(area) = graph.face(id).map(|f| f.area()) else { continue };
        let rank = match areas.iter().position(|&a| tol.area_eq(a, area)) {
            Some(rank) => rank,
            None => {
                areas.push(area);
                areas.len() - 1
            }
        };
        let color = if rank % 2 == 0 { FaceState::White } else { FaceState::Black };
        graph.set_state(id, color);
    }
    TwoColoring::collect(graph)
}

// ---------------------------------------------------------------------------
// Palette coloring
// ---------------------------------------------------------------------------

/// Group faces by (area, side count), largest group first.  Groups of equal
/// size keep the order in which they were first met.
pub fn group_faces(graph: &FaceGraph) -> Vec<FaceGroup> {
    let tol = graph.tolerance();
    let mut groups: Vec<FaceGroup> = Vec::new();
    for id in graph.bounded_faces() {
        let Some(face) = graph.face(id) else { continue };
        let (area, sides) = (face.area(), face.sides());
        match groups.iter_mut().find(|g| g.sides == sides && tol.area_eq(g.area, area)) {
            Some(group) => group.faces.push(id),
            None => groups.push(FaceGroup { area, sides, faces: vec![id] }),
        }
    }
    groups.sort_by(|a, b| b.faces.len().cmp(&a.faces.len()));
    groups
}

/// Give group `i` the color `palette[i]`, recording `i` as the palette
/// index of each of its faces.
///
/// The palette is clamped to the number of groups: groups past the end of
/// the palette get `None` (drawn hidden) and extra colors are ignored.
/// Either case is logged as a warning.  Returns the color of each group.
pub fn assign_palette<T: Clone>(graph: &mut FaceGraph, groups: &[FaceGroup], palette: &[T]) -> Vec<Option<T>> {
    if palette.len() < groups.len() {
        warn!(groups = groups.len(), colors = palette.len(), "too few colors, hiding the remaining face groups");
    } else if palette.len() > groups.len() {
        warn!(groups = groups.len(), colors = palette.len(), "too many colors, ignoring the extra ones");
    }

    for (i, group) in groups.iter().enumerate() {
        let index = (i < palette.len()).then_some(i);
        for &id in &group.faces {
            if let Some(face) = graph.faces.get_mut(id.0) {
                face.color_index = index;
                face.state = FaceState::Done;
            }
        }
    }

    (0..groups.len()).map(|i| palette.get(i).cloned()).collect()
}
