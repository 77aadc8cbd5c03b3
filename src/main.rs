// src/main.rs
//! # wadmap
//!
//! Loads a level from a Doom-format WAD and prints what the loader built:
//! table sizes, the bounding box, per-sector meshes and any warnings.
//! With `--at X Y` it also reports which BSP leaf and sector contain a point.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see lump
//! decoding and `RUST_LOG=warn` for geometry anomalies.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use serde::Serialize;

use wadmap::bsp::to_fixed;
use wadmap::{LoadConfig, LoadWarning, Map, Wad};

#[derive(Parser)]
#[command(name = "wadmap")]
#[command(about = "Inspect the level geometry of a WAD file")]
struct Cli {
    /// Path to the IWAD or PWAD
    wad: PathBuf,

    /// Level marker to load, e.g. E1M1 or MAP01 (default: first level)
    #[arg(long)]
    level: Option<String>,

    /// Locate a point given in map units
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    at: Option<Vec<i32>>,

    /// Fail on open wall loops and ambiguous loop vertices
    #[arg(long)]
    strict: bool,

    /// JSON file with load options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// List the levels in the WAD and exit
    #[arg(long)]
    list: bool,
}

#[derive(Serialize)]
struct CellSummary {
    index: usize,
    light: i32,
    headroom: i32,
    loops: usize,
    triangles: usize,
    area: f64,
    ambiguous_vertices: usize,
}

#[derive(Serialize)]
struct PointSummary {
    x: i32,
    y: i32,
    leaf: u32,
    cell: u32,
    inside: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    level: &'a str,
    vertices: usize,
    linedefs: usize,
    sidedefs: usize,
    things: usize,
    single_player_things: usize,
    nodes: usize,
    leaves: usize,
    bounding_box: (i32, i32, i32, i32),
    cells: Vec<CellSummary>,
    warnings: &'a [LoadWarning],
    point: Option<PointSummary>,
}

impl<'a> Summary<'a> {
    fn new(map: &'a Map, at: Option<(i32, i32)>) -> Self {
        let cells = map
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| CellSummary {
                index,
                light: cell.sector().light,
                headroom: cell.sector().headroom(),
                loops: cell.mesh().loops().len(),
                triangles: cell.mesh().triangles().len(),
                area: cell.mesh().area(map.vertices()),
                ambiguous_vertices: cell.mesh().ambiguous_vertices(),
            })
            .collect();

        let point = at.map(|(x, y)| PointSummary {
            x,
            y,
            leaf: map.locate(to_fixed(x), to_fixed(y)).0,
            cell: map.sector_at(x, y).0,
            inside: map.contains_point(x, y),
        });

        Summary {
            level: map.name(),
            vertices: map.vertices().len(),
            linedefs: map.linedefs().len(),
            sidedefs: map.sidedefs().len(),
            things: map.things().len(),
            single_player_things: map.single_player_things().count(),
            nodes: map.bsp().nodes().len(),
            leaves: map.bsp().leaves().len(),
            bounding_box: map.bounding_box(),
            cells,
            warnings: map.warnings(),
            point,
        }
    }

    fn print_text(&self) {
        let name = if self.level.is_empty() { "<unnamed>" } else { self.level };
        println!("Level {}", name);
        println!(
            "  {} vertices, {} linedefs, {} sidedefs, {} sectors",
            self.vertices,
            self.linedefs,
            self.sidedefs,
            self.cells.len()
        );
        println!(
            "  {} things ({} in single player)",
            self.things, self.single_player_things
        );
        println!("  BSP: {} nodes, {} leaves", self.nodes, self.leaves);
        let (min_x, min_y, max_x, max_y) = self.bounding_box;
        println!("  Bounds: ({}, {}) - ({}, {})", min_x, min_y, max_x, max_y);

        for cell in &self.cells {
            println!(
                "  sector {:>4}: light {:>3}, headroom {:>4}, {} loop(s), {} triangle(s), area {:.1}",
                cell.index, cell.light, cell.headroom, cell.loops, cell.triangles, cell.area
            );
        }
        for warning in self.warnings {
            println!("  warning: {}", warning);
        }
        if let Some(point) = &self.point {
            println!(
                "  ({}, {}): leaf {}, sector {}, {}",
                point.x,
                point.y,
                point.leaf,
                point.cell,
                if point.inside { "inside" } else { "outside" }
            );
        }
    }
}

fn load_config(cli: &Cli) -> Result<LoadConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => LoadConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => LoadConfig::default(),
    };
    if cli.strict {
        config.strict_geometry = true;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let bytes = fs::read(&cli.wad)?;
    let wad = Wad::parse(&bytes)?;
    info!(
        "Opened {} ({:?}, {} lumps)",
        cli.wad.display(),
        wad.kind(),
        wad.directory().len()
    );

    if cli.list {
        for level in wad.levels() {
            println!("{} ({} lumps)", level.name, level.lump_indices.len());
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    let map = match &cli.level {
        Some(name) => wad.load_level(name, &config)?,
        None => wadmap::load_map_with(&bytes, &config)?,
    };

    let at = cli.at.as_deref().and_then(|at| match at {
        [x, y] => Some((*x, *y)),
        _ => None,
    });
    let summary = Summary::new(&map, at);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print_text();
    }
    Ok(())
}
