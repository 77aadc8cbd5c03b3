// src/map/linedef.rs
use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};
use serde::Serialize;

use super::Record;

/// A directed edge between two vertices with up to two sides.
///
/// Layout (14 bytes, little-endian): start, end, flags, special type, tag,
/// front side, back side. A side of `-1` means the side is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDef {
    pub start: usize,
    pub end: usize,
    pub flags: i32,
    pub line_type: i32,
    pub tag: i32,
    pub front: i32,
    pub back: i32,
}

impl LineDef {
    pub const BLOCKING: i32 = 0x0001;
    pub const BLOCK_MONSTERS: i32 = 0x0002;
    pub const TWO_SIDED: i32 = 0x0004;
    pub const UPPER_UNPEGGED: i32 = 0x0008;
    pub const LOWER_UNPEGGED: i32 = 0x0010;
    pub const SECRET: i32 = 0x0020;
    pub const BLOCK_SOUND: i32 = 0x0040;
    /// Never drawn on the automap.
    pub const DONT_DRAW: i32 = 0x0080;
    pub const MAPPED: i32 = 0x0100;

    pub fn new(start: usize, end: usize, front: i32, back: i32) -> Self {
        LineDef {
            start,
            end,
            flags: 0,
            line_type: 0,
            tag: 0,
            front,
            back,
        }
    }

    pub fn front_side(&self) -> Option<usize> {
        (self.front >= 0).then_some(self.front as usize)
    }

    pub fn back_side(&self) -> Option<usize> {
        (self.back >= 0).then_some(self.back as usize)
    }

    pub fn is_one_sided(&self) -> bool {
        self.back < 0
    }

    pub fn has_flag(&self, flag: i32) -> bool {
        self.flags & flag != 0
    }
}

impl Record for LineDef {
    const SIZE: usize = 14;
    const LUMP: &'static str = "LINEDEFS";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(LineDef {
            start: reader.read_u16::<LE>()? as usize,
            end: reader.read_u16::<LE>()? as usize,
            flags: reader.read_i16::<LE>()? as i32,
            line_type: reader.read_i16::<LE>()? as i32,
            tag: reader.read_i16::<LE>()? as i32,
            front: reader.read_i16::<LE>()? as i32,
            back: reader.read_i16::<LE>()? as i32,
        })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LE>(self.start as u16)?;
        writer.write_u16::<LE>(self.end as u16)?;
        writer.write_i16::<LE>(self.flags as i16)?;
        writer.write_i16::<LE>(self.line_type as i16)?;
        writer.write_i16::<LE>(self.tag as i16)?;
        writer.write_i16::<LE>(self.front as i16)?;
        writer.write_i16::<LE>(self.back as i16)?;
        Ok(())
    }
}
