// src/level/map.rs

use log::info;

use crate::bsp::bsp_tree::BspSource;
use crate::bsp::{to_fixed, BoundingBox, BspTree, CellIndex, Fixed, LeafIndex};
use crate::level::warning::{LoadWarning, WarningSink};
use crate::level::LoadConfig;
use crate::map::{LineDef, MapNode, Record, Sector, Seg, SideDef, Subsector, Thing, Vertex};
use crate::polygon::{self, SectorMesh};
use crate::wad::{FormatError, LevelInfo, Result, Wad};

/// A sector together with its derived polygon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    sector: Sector,
    mesh: SectorMesh,
}

impl Cell {
    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    pub fn mesh(&self) -> &SectorMesh {
        &self.mesh
    }
}

/// One loaded level. Immutable once built, so it can be shared across
/// threads and queried concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    name: String,
    vertices: Vec<Vertex>,
    linedefs: Vec<LineDef>,
    sidedefs: Vec<SideDef>,
    cells: Vec<Cell>,
    things: Vec<Thing>,
    bsp: BspTree,
    bounds: BoundingBox,
    warnings: Vec<LoadWarning>,
}

/// Loads the first level of a WAD with the default configuration.
pub fn load_map(bytes: &[u8]) -> Result<Map> {
    load_map_with(bytes, &LoadConfig::default())
}

pub fn load_map_with(bytes: &[u8], config: &LoadConfig) -> Result<Map> {
    let wad = Wad::parse(bytes)?;
    let level = wad
        .levels()
        .first()
        .ok_or_else(|| FormatError::LevelNotFound(String::new()))?;
    Map::from_level(&wad, level, config)
}

fn required<T: Record>(wad: &Wad<'_>, level: &LevelInfo) -> Result<Vec<T>> {
    if wad.lump_bytes(level, T::LUMP).is_none() {
        return Err(FormatError::MissingLump {
            level: level.name.clone(),
            lump: T::LUMP,
        });
    }
    wad.read_records(level)
}

impl Map {
    pub(crate) fn from_level(wad: &Wad<'_>, level: &LevelInfo, config: &LoadConfig) -> Result<Self> {
        let vertices: Vec<Vertex> = wad.read_records(level)?;
        let bounds = BoundingBox::from_points(vertices.iter().map(|v| (v.raw_x, v.raw_y)))
            .ok_or_else(|| FormatError::EmptyMap {
                level: level.name.clone(),
            })?;

        let linedefs: Vec<LineDef> = required(wad, level)?;
        let sidedefs: Vec<SideDef> = required(wad, level)?;
        let sectors: Vec<Sector> = required(wad, level)?;
        if sectors.is_empty() {
            return Err(FormatError::MissingLump {
                level: level.name.clone(),
                lump: Sector::LUMP,
            });
        }
        let things: Vec<Thing> = wad.read_records(level)?;
        let segs: Vec<Seg> = wad.read_records(level)?;
        let subsectors: Vec<Subsector> = wad.read_records(level)?;
        let nodes: Vec<MapNode> = wad.read_records(level)?;

        let mut sink = WarningSink::new(config.max_warnings);
        let bsp = BspTree::build(
            &BspSource {
                nodes: &nodes,
                subsectors: &subsectors,
                segs: &segs,
                linedefs: &linedefs,
                sidedefs: &sidedefs,
                num_sectors: sectors.len(),
            },
            &mut sink,
        );
        let meshes = polygon::polygonize(
            &vertices,
            &linedefs,
            &sidedefs,
            sectors.len(),
            config.strict_geometry,
            &mut sink,
        )?;
        let cells: Vec<Cell> = sectors
            .into_iter()
            .zip(meshes)
            .map(|(sector, mesh)| Cell { sector, mesh })
            .collect();
        let warnings = sink.finish();

        info!(
            "Loaded level '{}': {} vertices, {} linedefs, {} sectors, {} things, {} nodes, {} warning(s)",
            level.name,
            vertices.len(),
            linedefs.len(),
            cells.len(),
            things.len(),
            bsp.nodes().len(),
            warnings.len()
        );

        Ok(Map {
            name: level.name.clone(),
            vertices,
            linedefs,
            sidedefs,
            cells,
            things,
            bsp,
            bounds,
            warnings,
        })
    }

    /// Level marker name, empty if the WAD had none.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn linedefs(&self) -> &[LineDef] {
        &self.linedefs
    }

    pub fn sidedefs(&self) -> &[SideDef] {
        &self.sidedefs
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.cells.get(index.index())
    }

    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    /// Things without the "not in single player" flag.
    pub fn single_player_things(&self) -> impl Iterator<Item = &Thing> + '_ {
        self.things.iter().filter(|thing| thing.is_single_player())
    }

    pub fn bsp(&self) -> &BspTree {
        &self.bsp
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// `(min_x, min_y, max_x, max_y)` over all vertices.
    pub fn bounding_box(&self) -> (i32, i32, i32, i32) {
        self.bounds.as_tuple()
    }

    /// Anomalies found while building, in the order they were found.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Leaf containing a fixed-point point.
    pub fn locate(&self, x: Fixed, y: Fixed) -> LeafIndex {
        self.bsp.locate(x, y)
    }

    /// Sector containing a point in map units. Always answers, even
    /// outside the map; see [`Map::contains_point`].
    pub fn sector_at(&self, x: i32, y: i32) -> CellIndex {
        self.bsp.cell_of(self.locate(to_fixed(x), to_fixed(y)))
    }

    /// Tests a point against one sector's triangle mesh.
    pub fn cell_contains(&self, cell: CellIndex, x: f64, y: f64) -> bool {
        self.cell(cell)
            .map_or(false, |cell| cell.mesh.contains(&self.vertices, x, y))
    }

    /// True if the point lies inside the map's bounds and inside the mesh
    /// of the sector the BSP places it in.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.bounds.contains_point(x, y)
            && self.cell_contains(self.sector_at(x, y), x as f64, y as f64)
    }
}
