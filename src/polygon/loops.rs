// src/polygon/loops.rs

use std::collections::{BTreeMap, VecDeque};

use crate::bsp::BoundingBox;
use crate::map::Vertex;
use crate::polygon::Wall;

/// An ordered run of walls, stored as the start vertex of each wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallLoop {
    pub vertices: Vec<usize>,
    /// Whether the last wall ends where the first one starts.
    pub closed: bool,
}

impl WallLoop {
    pub fn bounding_box(&self, vertices: &[Vertex]) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.vertices
                .iter()
                .filter_map(|&v| vertices.get(v))
                .map(|v| (v.raw_x, v.raw_y)),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSet {
    pub loops: Vec<WallLoop>,
    /// Loops dropped for having fewer than 3 walls.
    pub degenerate: usize,
    /// Vertices that start more than one wall. Extension through these is
    /// decided by the tie-break, so the loops may not match the author's.
    pub ambiguous_vertices: usize,
}

/// Chains a sector's walls into loops.
///
/// A loop starts at the earliest unused wall and is extended with an unused
/// wall starting where the loop currently ends, until there is none. When
/// several walls qualify, the earliest one (lowest linedef, front before
/// back) wins.
pub fn build_loops(walls: &[Wall]) -> LoopSet {
    let mut by_start: BTreeMap<usize, VecDeque<usize>> = BTreeMap::new();
    for (index, wall) in walls.iter().enumerate() {
        by_start.entry(wall.v1).or_default().push_back(index);
    }
    let ambiguous_vertices = by_start.values().filter(|starts| starts.len() > 1).count();

    let mut used = vec![false; walls.len()];
    let mut set = LoopSet {
        ambiguous_vertices,
        ..LoopSet::default()
    };

    for first in 0..walls.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let origin = walls[first].v1;
        let mut vertices = vec![origin];
        let mut end = walls[first].v2;

        while let Some(next) = take_next(&mut by_start, &used, end) {
            used[next] = true;
            vertices.push(walls[next].v1);
            end = walls[next].v2;
        }

        if vertices.len() < 3 {
            set.degenerate += 1;
            continue;
        }
        set.loops.push(WallLoop {
            vertices,
            closed: end == origin,
        });
    }
    set
}

fn take_next(
    by_start: &mut BTreeMap<usize, VecDeque<usize>>,
    used: &[bool],
    vertex: usize,
) -> Option<usize> {
    let starts = by_start.get_mut(&vertex)?;
    while let Some(candidate) = starts.pop_front() {
        if !used[candidate] {
            return Some(candidate);
        }
    }
    None
}

/// Moves the loop with the largest bounding-box area to the front, where
/// triangulation expects the outer boundary. Ties keep the earlier loop.
pub fn order_loops(loops: &mut Vec<WallLoop>, vertices: &[Vertex]) {
    let mut outer = 0;
    let mut outer_area = i64::MIN;
    for (index, wall_loop) in loops.iter().enumerate() {
        let area = wall_loop.bounding_box(vertices).map_or(0, |bbox| bbox.area());
        if area > outer_area {
            outer = index;
            outer_area = area;
        }
    }
    if outer > 0 {
        let wall_loop = loops.remove(outer);
        loops.insert(0, wall_loop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::WallSide;

    fn walls(pairs: &[(usize, usize)]) -> Vec<Wall> {
        pairs
            .iter()
            .enumerate()
            .map(|(linedef, &(v1, v2))| Wall {
                v1,
                v2,
                linedef,
                side: WallSide::Front,
            })
            .collect()
    }

    #[test]
    fn test_unordered_walls_form_one_loop() {
        let set = build_loops(&walls(&[(2, 3), (0, 1), (3, 0), (1, 2)]));
        assert_eq!(set.loops.len(), 1);
        assert_eq!(set.loops[0].vertices, vec![2, 3, 0, 1]);
        assert!(set.loops[0].closed);
        assert_eq!(set.ambiguous_vertices, 0);
        assert_eq!(set.degenerate, 0);
    }

    #[test]
    fn test_two_separate_loops() {
        let set = build_loops(&walls(&[(0, 1), (4, 5), (1, 2), (5, 6), (2, 0), (6, 4)]));
        assert_eq!(set.loops.len(), 2);
        assert_eq!(set.loops[0].vertices, vec![0, 1, 2]);
        assert_eq!(set.loops[1].vertices, vec![4, 5, 6]);
    }

    #[test]
    fn test_shared_vertex_takes_earliest_wall() {
        // Two triangles touching at vertex 0.
        let set = build_loops(&walls(&[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]));
        assert_eq!(set.ambiguous_vertices, 1);
        assert_eq!(set.loops.len(), 1);
        assert_eq!(set.loops[0].vertices, vec![0, 1, 2, 0, 3, 4]);
        assert!(set.loops[0].closed);
    }

    #[test]
    fn test_short_and_open_loops() {
        let set = build_loops(&walls(&[(0, 1), (1, 0), (5, 6), (6, 7), (7, 8)]));
        assert_eq!(set.degenerate, 1);
        assert_eq!(set.loops.len(), 1);
        assert_eq!(set.loops[0].vertices, vec![5, 6, 7]);
        assert!(!set.loops[0].closed);
    }

    #[test]
    fn test_largest_loop_moves_first() {
        let vertices = vec![
            Vertex::new(32, 32),
            Vertex::new(96, 32),
            Vertex::new(96, 96),
            Vertex::new(0, 0),
            Vertex::new(128, 0),
            Vertex::new(128, 128),
        ];
        let mut loops = vec![
            WallLoop { vertices: vec![0, 1, 2], closed: true },
            WallLoop { vertices: vec![3, 4, 5], closed: true },
        ];
        order_loops(&mut loops, &vertices);
        assert_eq!(loops[0].vertices, vec![3, 4, 5]);
        assert_eq!(loops[1].vertices, vec![0, 1, 2]);
    }
}
