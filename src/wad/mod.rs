// src/wad/mod.rs
//! WAD container: header, lump directory and level grouping.

pub mod archive;
pub mod error;
pub mod writer;

pub use archive::{LevelInfo, LumpEntry, Wad, WadKind};
pub use error::{FormatError, Result};
pub use writer::{encode_records, WadBuilder};

/// Size of one directory entry in bytes.
pub const FILELUMP_SIZE: usize = 16;
/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 12;
