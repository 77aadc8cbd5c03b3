// src/map/sidedef.rs

use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};
use serde::Serialize;

use super::{read_name8, write_name8, Record};

/// A sidedef in classic DOOM format (30 bytes total).
///
/// Layout (all little-endian):
///
/// ```text
/// offset  field       type / size
/// ------  ----------  ------------
///  0-1    x_offset    i16
///  2-3    y_offset    i16
///  4-11   upper_tex   [u8; 8]
/// 12-19   lower_tex   [u8; 8]
/// 20-27   mid_tex     [u8; 8]
/// 28-29   sector      i16  (index into sector list)
/// ```
///
/// Texture names are carried through as stored; this crate never
/// interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideDef {
    /// Horizontal texture offset.
    pub x_offset: i32,

    /// Vertical texture offset.
    pub y_offset: i32,

    pub upper_tex: String,
    pub lower_tex: String,
    pub mid_tex: String,

    /// Index of the sector this side faces.
    pub sector: i32,
}

impl SideDef {
    /// Creates an untextured side facing `sector`.
    pub fn facing(sector: i32) -> Self {
        SideDef {
            x_offset: 0,
            y_offset: 0,
            upper_tex: "-".to_string(),
            lower_tex: "-".to_string(),
            mid_tex: "-".to_string(),
            sector,
        }
    }

    /// The sector index, if it is non-negative.
    pub fn sector_index(&self) -> Option<usize> {
        (self.sector >= 0).then_some(self.sector as usize)
    }
}

impl Record for SideDef {
    const SIZE: usize = 30;
    const LUMP: &'static str = "SIDEDEFS";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        let x_offset = reader.read_i16::<LE>()? as i32;
        let y_offset = reader.read_i16::<LE>()? as i32;

        let upper_tex = read_name8(reader)?;
        let lower_tex = read_name8(reader)?;
        let mid_tex = read_name8(reader)?;

        let sector = reader.read_i16::<LE>()? as i32;

        Ok(SideDef {
            x_offset,
            y_offset,
            upper_tex,
            lower_tex,
            mid_tex,
            sector,
        })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i16::<LE>(self.x_offset as i16)?;
        writer.write_i16::<LE>(self.y_offset as i16)?;

        write_name8(writer, &self.upper_tex)?;
        write_name8(writer, &self.lower_tex)?;
        write_name8(writer, &self.mid_tex)?;

        writer.write_i16::<LE>(self.sector as i16)?;
        Ok(())
    }
}
