// src/wad/error.rs

use std::io;
use thiserror::Error;

/// Everything that can abort loading a level.
///
/// Geometry anomalies that do not prevent building a usable map are not
/// errors; they are collected as [`crate::level::LoadWarning`]s instead.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid WAD identifier `{}`", String::from_utf8_lossy(.found))]
    BadMagic { found: [u8; 4] },

    #[error("level `{level}` has no vertices")]
    EmptyMap { level: String },

    #[error("lump `{lump}` is {size} bytes, not a multiple of the {record_size}-byte record")]
    TruncatedLump {
        lump: String,
        size: usize,
        record_size: usize,
    },

    #[error("level `{level}` is missing required lump `{lump}`")]
    MissingLump { level: String, lump: &'static str },

    #[error("directory of {count} entries at offset {offset} does not fit in {len} bytes")]
    DirectoryOutOfBounds { offset: i64, count: i64, len: usize },

    #[error("level `{0}` not found")]
    LevelNotFound(String),

    #[error("sector {cell} has invalid geometry: {reason}")]
    InvalidGeometry { cell: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
