// src/map/mod.rs
//! Raw level records, decoded exactly as stored in the WAD.

pub mod vertex;
pub mod linedef;
pub mod sidedef;
pub mod sector;
pub mod thing;
pub mod seg;
pub mod subsector;
pub mod node;

pub use vertex::Vertex;
pub use linedef::LineDef;
pub use sidedef::SideDef;
pub use sector::Sector;
pub use thing::{Thing, ThingFlags};
pub use seg::Seg;
pub use subsector::Subsector;
pub use node::MapNode;

use std::io::{self, Read, Write};

/// A fixed-size little-endian record stored in a level lump.
pub trait Record: Sized {
    /// Size of one record in bytes.
    const SIZE: usize;
    /// Name of the lump holding the table of these records.
    const LUMP: &'static str;

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self>;
    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()>;
}

/// Reads an 8-byte name field, dropping everything from the first NUL.
/// The bytes are passed through otherwise untouched.
pub(crate) fn read_name8<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    Ok(buf[..len].iter().map(|&c| c as char).collect())
}

/// Writes an 8-byte name field, zero-padded if shorter, truncated if longer.
pub(crate) fn write_name8<W: Write>(writer: &mut W, name: &str) -> io::Result<()> {
    let mut buf = [0u8; 8];
    for (slot, ch) in buf.iter_mut().zip(name.chars()) {
        *slot = ch as u32 as u8;
    }
    writer.write_all(&buf)
}
