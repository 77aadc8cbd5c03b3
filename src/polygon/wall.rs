// src/polygon/wall.rs

use crate::level::warning::{LoadWarning, WarningSink};
use crate::map::{LineDef, SideDef};

/// Which side of its linedef a wall was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Front,
    Back,
}

/// A linedef side seen from the sector it faces.
///
/// Back-side walls run opposite to the linedef, so every wall of a sector
/// has the sector's interior on the same rotational side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub v1: usize,
    pub v2: usize,
    pub linedef: usize,
    pub side: WallSide,
}

/// Produces the walls of one linedef, paired with the sector each faces.
/// Front comes before back. A linedef without a usable front side makes
/// no walls at all.
pub(crate) fn linedef_walls(
    index: usize,
    line: &LineDef,
    sidedefs: &[SideDef],
    num_vertices: usize,
    num_sectors: usize,
    sink: &mut WarningSink,
) -> Vec<(usize, Wall)> {
    let mut walls = Vec::with_capacity(2);

    for vertex in [line.start, line.end] {
        if vertex >= num_vertices {
            sink.push(LoadWarning::InvalidVertex { linedef: index, vertex });
            return walls;
        }
    }

    if line.front < 0 {
        if line.back >= 0 {
            sink.push(LoadWarning::MissingFrontSide { linedef: index });
        }
        return walls;
    }
    let Some(front) = side_sector(index, line.front, sidedefs, num_sectors, sink) else {
        return walls;
    };
    walls.push((
        front,
        Wall {
            v1: line.start,
            v2: line.end,
            linedef: index,
            side: WallSide::Front,
        },
    ));

    if line.back >= 0 {
        if let Some(back) = side_sector(index, line.back, sidedefs, num_sectors, sink) {
            walls.push((
                back,
                Wall {
                    v1: line.end,
                    v2: line.start,
                    linedef: index,
                    side: WallSide::Back,
                },
            ));
        }
    }
    walls
}

/// Sector faced by a present side reference, or `None` after a warning.
fn side_sector(
    linedef: usize,
    raw_side: i32,
    sidedefs: &[SideDef],
    num_sectors: usize,
    sink: &mut WarningSink,
) -> Option<usize> {
    let Some(sidedef) = sidedefs.get(raw_side as usize) else {
        sink.push(LoadWarning::InvalidSide { linedef, side: raw_side });
        return None;
    };
    let sector = sidedef.sector_index().filter(|&sector| sector < num_sectors);
    if sector.is_none() {
        sink.push(LoadWarning::InvalidSector {
            side: raw_side as usize,
            sector: sidedef.sector,
        });
    }
    sector
}

/// Groups every wall of the level by the sector it faces, in linedef order.
pub(crate) fn collect_walls(
    linedefs: &[LineDef],
    sidedefs: &[SideDef],
    num_vertices: usize,
    num_sectors: usize,
    sink: &mut WarningSink,
) -> Vec<Vec<Wall>> {
    let mut by_sector = vec![Vec::new(); num_sectors];
    for (index, line) in linedefs.iter().enumerate() {
        for (sector, wall) in linedef_walls(index, line, sidedefs, num_vertices, num_sectors, sink) {
            by_sector[sector].push(wall);
        }
    }
    by_sector
}
