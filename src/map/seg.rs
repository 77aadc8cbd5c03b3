// src/map/seg.rs
use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};

use super::Record;

/// A span of a linedef, as emitted by the node builder.
///
/// Only used to find out which sector a subsector belongs to; it is not
/// kept on the loaded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seg {
    pub v1: usize,
    pub v2: usize,
    pub angle: i32,
    pub linedef: usize,
    /// 0 for the linedef's front side, 1 for its back side.
    pub side: i32,
    pub offset: i32,
}

impl Seg {
    pub fn on_back_side(&self) -> bool {
        self.side != 0
    }
}

impl Record for Seg {
    const SIZE: usize = 12;
    const LUMP: &'static str = "SEGS";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Seg {
            v1: reader.read_u16::<LE>()? as usize,
            v2: reader.read_u16::<LE>()? as usize,
            angle: reader.read_i16::<LE>()? as i32,
            linedef: reader.read_u16::<LE>()? as usize,
            side: reader.read_i16::<LE>()? as i32,
            offset: reader.read_i16::<LE>()? as i32,
        })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LE>(self.v1 as u16)?;
        writer.write_u16::<LE>(self.v2 as u16)?;
        writer.write_i16::<LE>(self.angle as i16)?;
        writer.write_u16::<LE>(self.linedef as u16)?;
        writer.write_i16::<LE>(self.side as i16)?;
        writer.write_i16::<LE>(self.offset as i16)?;
        Ok(())
    }
}
