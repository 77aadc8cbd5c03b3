// src/polygon/mod.rs
//! Rebuilds sector polygons from the linedefs that bound them.

pub mod loops;
pub mod triangulate;
pub mod wall;

pub use loops::{build_loops, order_loops, LoopSet, WallLoop};
pub use triangulate::{triangulate, SectorMesh};
pub use wall::{Wall, WallSide};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::level::warning::{LoadWarning, WarningSink};
use crate::map::{LineDef, SideDef, Vertex};
use crate::wad::{FormatError, Result};

/// Builds one mesh per sector. In strict mode, open loops and ambiguous
/// vertices abort with [`FormatError::InvalidGeometry`].
pub(crate) fn polygonize(
    vertices: &[Vertex],
    linedefs: &[LineDef],
    sidedefs: &[SideDef],
    num_sectors: usize,
    strict: bool,
    sink: &mut WarningSink,
) -> Result<Vec<SectorMesh>> {
    let walls = wall::collect_walls(linedefs, sidedefs, vertices.len(), num_sectors, sink);

    #[cfg(feature = "parallel")]
    let built: Vec<_> = walls
        .par_iter()
        .enumerate()
        .map(|(cell, walls)| build_cell(cell, walls, vertices, strict))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let built: Vec<_> = walls
        .iter()
        .enumerate()
        .map(|(cell, walls)| build_cell(cell, walls, vertices, strict))
        .collect();

    // Results are in sector order, so the reported error is the lowest cell.
    let mut meshes = Vec::with_capacity(built.len());
    for result in built {
        let (mesh, warnings) = result?;
        sink.extend(warnings);
        meshes.push(mesh);
    }
    Ok(meshes)
}

/// Loops, orders and triangulates the walls of a single sector.
pub fn build_cell(
    cell: usize,
    walls: &[Wall],
    vertices: &[Vertex],
    strict: bool,
) -> Result<(SectorMesh, Vec<LoadWarning>)> {
    let mut warnings = Vec::new();
    let LoopSet {
        mut loops,
        degenerate,
        ambiguous_vertices,
    } = build_loops(walls);

    if degenerate > 0 {
        warnings.push(LoadWarning::DegenerateLoop { cell, count: degenerate });
    }
    if ambiguous_vertices > 0 {
        if strict {
            return Err(FormatError::InvalidGeometry {
                cell,
                reason: format!("{} vertex(es) start more than one wall", ambiguous_vertices),
            });
        }
        warnings.push(LoadWarning::AmbiguousVertices { cell, count: ambiguous_vertices });
    }
    for open in loops.iter().filter(|l| !l.closed) {
        let start = open.vertices[0];
        if strict {
            return Err(FormatError::InvalidGeometry {
                cell,
                reason: format!("wall loop starting at vertex {} does not close", start),
            });
        }
        warnings.push(LoadWarning::OpenLoop { cell, start });
    }

    order_loops(&mut loops, vertices);
    let triangles = match triangulate(&loops, vertices) {
        Some(triangles) => triangles,
        None => {
            warnings.push(LoadWarning::TriangulationFailed { cell });
            Vec::new()
        }
    };

    let mesh = SectorMesh {
        loops: loops
            .iter()
            .map(|l| l.vertices.iter().map(|&v| v as u32).collect())
            .collect(),
        triangles,
        ambiguous_vertices,
    };
    Ok((mesh, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn square_with_hole() -> (Vec<Vertex>, Vec<LineDef>, Vec<SideDef>) {
        let vertices = vec![
            Vertex::new(0, 0),
            Vertex::new(0, 128),
            Vertex::new(128, 128),
            Vertex::new(128, 0),
            Vertex::new(32, 32),
            Vertex::new(32, 96),
            Vertex::new(96, 96),
            Vertex::new(96, 32),
        ];
        // Inner (pillar) lines first so the hole's loop is found first.
        let linedefs = vec![
            LineDef::new(4, 5, 1, 0),
            LineDef::new(5, 6, 1, 0),
            LineDef::new(6, 7, 1, 0),
            LineDef::new(7, 4, 1, 0),
            LineDef::new(0, 1, 2, -1),
            LineDef::new(1, 2, 2, -1),
            LineDef::new(2, 3, 2, -1),
            LineDef::new(3, 0, 2, -1),
        ];
        let sidedefs = vec![SideDef::facing(0), SideDef::facing(1), SideDef::facing(0)];
        (vertices, linedefs, sidedefs)
    }

    #[test]
    fn test_outer_loop_chosen_by_size() {
        let (vertices, linedefs, sidedefs) = square_with_hole();
        let mut sink = WarningSink::new(16);
        let meshes = polygonize(&vertices, &linedefs, &sidedefs, 2, false, &mut sink).unwrap();
        assert!(sink.finish().is_empty());

        let outer = &meshes[0];
        assert_eq!(outer.loops().len(), 2);
        assert_eq!(outer.loops()[0], vec![0, 1, 2, 3]);
        assert_approx_eq!(outer.area(&vertices), 128.0 * 128.0 - 64.0 * 64.0);

        let pillar = &meshes[1];
        assert_eq!(pillar.loops().len(), 1);
        assert_approx_eq!(pillar.area(&vertices), 64.0 * 64.0);
    }

    #[test]
    fn test_empty_sector_has_empty_mesh() {
        let (vertices, linedefs, sidedefs) = square_with_hole();
        let mut sink = WarningSink::new(16);
        let meshes = polygonize(&vertices, &linedefs, &sidedefs, 3, false, &mut sink).unwrap();
        assert_eq!(meshes.len(), 3);
        assert!(meshes[2].is_empty());
        assert!(meshes[2].loops().is_empty());
    }

    #[test]
    fn test_strict_rejects_open_loop() {
        let vertices = vec![Vertex::new(0, 0), Vertex::new(64, 0), Vertex::new(64, 64), Vertex::new(0, 64)];
        let walls: Vec<Wall> = [(0, 1), (1, 2), (2, 3)]
            .iter()
            .enumerate()
            .map(|(linedef, &(v1, v2))| Wall { v1, v2, linedef, side: WallSide::Front })
            .collect();

        let (mesh, warnings) = build_cell(0, &walls, &vertices, false).unwrap();
        assert_eq!(warnings, vec![LoadWarning::OpenLoop { cell: 0, start: 0 }]);
        assert_eq!(mesh.triangles().len(), 1);

        match build_cell(0, &walls, &vertices, true) {
            Err(FormatError::InvalidGeometry { cell, .. }) => assert_eq!(cell, 0),
            other => panic!("expected InvalidGeometry, got {:?}", other.map(|_| ())),
        }
    }

    fn walls(pairs: &[(usize, usize)]) -> Vec<Wall> {
        pairs
            .iter()
            .enumerate()
            .map(|(linedef, &(v1, v2))| Wall { v1, v2, linedef, side: WallSide::Front })
            .collect()
    }

    /// Two triangles meeting only at vertex 0.
    fn bow_tie() -> (Vec<Vertex>, Vec<Wall>) {
        let vertices = vec![
            Vertex::new(64, 64),
            Vertex::new(128, 64),
            Vertex::new(128, 128),
            Vertex::new(0, 64),
            Vertex::new(0, 0),
        ];
        (vertices, walls(&[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]))
    }

    #[test]
    fn test_ambiguous_vertex_is_reported() {
        let (vertices, walls) = bow_tie();
        let (mesh, warnings) = build_cell(2, &walls, &vertices, false).unwrap();
        assert_eq!(mesh.ambiguous_vertices(), 1);
        assert_eq!(mesh.loops().len(), 1);
        assert_eq!(warnings[0], LoadWarning::AmbiguousVertices { cell: 2, count: 1 });
        assert!(!warnings.iter().any(|w| matches!(w, LoadWarning::OpenLoop { .. })));
    }

    #[test]
    fn test_strict_rejects_ambiguous_vertex() {
        let (vertices, walls) = bow_tie();
        match build_cell(2, &walls, &vertices, true) {
            Err(FormatError::InvalidGeometry { cell, reason }) => {
                assert_eq!(cell, 2);
                assert!(reason.contains("more than one wall"));
            }
            other => panic!("expected InvalidGeometry, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_two_wall_loop_is_dropped() {
        let vertices = vec![Vertex::new(0, 0), Vertex::new(64, 0)];
        let (mesh, warnings) = build_cell(3, &walls(&[(0, 1), (1, 0)]), &vertices, true).unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.loops().is_empty());
        assert_eq!(warnings, vec![LoadWarning::DegenerateLoop { cell: 3, count: 1 }]);
    }

    #[test]
    fn test_strict_reports_lowest_bad_sector() {
        let vertices = vec![
            Vertex::new(0, 0),
            Vertex::new(64, 0),
            Vertex::new(64, 64),
            Vertex::new(0, 64),
        ];
        // Sectors 1, 2 and 3 each get an open three-wall path; sector 0 is closed.
        let mut linedefs = vec![
            LineDef::new(0, 1, 0, -1),
            LineDef::new(1, 2, 0, -1),
            LineDef::new(2, 3, 0, -1),
            LineDef::new(3, 0, 0, -1),
        ];
        for side in 1..4 {
            linedefs.push(LineDef::new(0, 1, side, -1));
            linedefs.push(LineDef::new(1, 2, side, -1));
            linedefs.push(LineDef::new(2, 3, side, -1));
        }
        let sidedefs: Vec<_> = (0..4).map(SideDef::facing).collect();

        for _ in 0..20 {
            let mut sink = WarningSink::new(16);
            match polygonize(&vertices, &linedefs, &sidedefs, 4, true, &mut sink) {
                Err(FormatError::InvalidGeometry { cell, .. }) => assert_eq!(cell, 1),
                other => panic!("expected InvalidGeometry, got {:?}", other.map(|_| ())),
            }
        }
    }
}
