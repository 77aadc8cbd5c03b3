// src/lib.rs
//! Loads Doom-format WAD levels into an immutable [`Map`]: raw geometry
//! tables, a BSP index for point location, and a triangulated polygon for
//! every sector.

pub mod bsp;
pub mod level;
pub mod map;
pub mod polygon;
pub mod utils;
pub mod wad;

pub use bsp::{CellIndex, LeafIndex, NodeIndex};
pub use level::{load_map, load_map_with, Cell, LoadConfig, LoadWarning, Map};
pub use wad::{FormatError, Wad, WadBuilder, WadKind};
