// src/level/mod.rs
//! The loaded level: raw tables, BSP index and per-sector meshes.

pub mod config;
pub mod map;
pub mod warning;

pub use config::LoadConfig;
pub use map::{load_map, load_map_with, Cell, Map};
pub use warning::LoadWarning;
