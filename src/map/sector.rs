// src/map/sector.rs

use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};
use serde::Serialize;

use super::{read_name8, write_name8, Record};

/// A sector in classic DOOM format (26 bytes).
///
/// Layout (all little-endian):
///
/// ```text
/// offset  field          type / size
/// ------  -------------  ------------
///  0-1    floor_height   i16
///  2-3    ceiling_height i16
///  4-11   floor_tex      [u8; 8]
/// 12-19   ceiling_tex    [u8; 8]
/// 20-21   light_level    i16
/// 22-23   special_type   i16
/// 24-25   tag            i16
/// ```
///
/// Only scalar attributes live here. The boundary and the triangle mesh
/// are derived at load time, see [`crate::level::Cell`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sector {
    pub floor_height: i32,

    pub ceiling_height: i32,

    pub floor_tex: String,
    pub ceiling_tex: String,

    /// 0 (dark) to 255.
    pub light: i32,

    /// Sector special, passed through uninterpreted.
    pub r#type: i32,

    pub tag: i32,
}

impl Sector {
    pub fn new(
        floor_height: i32,
        ceiling_height: i32,
        floor_tex: String,
        ceiling_tex: String,
        light: i32,
        r#type: i32,
        tag: i32,
    ) -> Self {
        Sector {
            floor_height,
            ceiling_height,
            floor_tex,
            ceiling_tex,
            light,
            r#type,
            tag,
        }
    }

    /// Vertical space between floor and ceiling.
    pub fn headroom(&self) -> i32 {
        self.ceiling_height - self.floor_height
    }
}

impl Record for Sector {
    const SIZE: usize = 26;
    const LUMP: &'static str = "SECTORS";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        let floor_height = reader.read_i16::<LE>()? as i32;
        let ceiling_height = reader.read_i16::<LE>()? as i32;
        let floor_tex = read_name8(reader)?;
        let ceiling_tex = read_name8(reader)?;
        let light = reader.read_i16::<LE>()? as i32;
        let r#type = reader.read_i16::<LE>()? as i32;
        let tag = reader.read_i16::<LE>()? as i32;

        Ok(Sector {
            floor_height,
            ceiling_height,
            floor_tex,
            ceiling_tex,
            light,
            r#type,
            tag,
        })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i16::<LE>(self.floor_height as i16)?;
        writer.write_i16::<LE>(self.ceiling_height as i16)?;
        write_name8(writer, &self.floor_tex)?;
        write_name8(writer, &self.ceiling_tex)?;
        writer.write_i16::<LE>(self.light as i16)?;
        writer.write_i16::<LE>(self.r#type as i16)?;
        writer.write_i16::<LE>(self.tag as i16)?;
        Ok(())
    }
}
