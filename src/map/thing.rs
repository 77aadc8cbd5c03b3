// src/map/thing.rs
use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};
use serde::Serialize;

use super::Record;

/// Spawn flag bits stored in [`Thing::options`].
pub struct ThingFlags;

impl ThingFlags {
    pub const EASY: i32 = 0x0001;
    pub const MEDIUM: i32 = 0x0002;
    pub const HARD: i32 = 0x0004;
    pub const AMBUSH: i32 = 0x0008;
    pub const NOT_SINGLE_PLAYER: i32 = 0x0010;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thing {
    pub raw_x: i32,
    pub raw_y: i32,
    pub angle: i32,
    pub thing_type: i32,
    pub options: i32,
}

impl Thing {
    pub fn is_single_player(&self) -> bool {
        self.options & ThingFlags::NOT_SINGLE_PLAYER == 0
    }
}

impl Record for Thing {
    const SIZE: usize = 10;
    const LUMP: &'static str = "THINGS";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Thing {
            raw_x: reader.read_i16::<LE>()? as i32,
            raw_y: reader.read_i16::<LE>()? as i32,
            angle: reader.read_i16::<LE>()? as i32,
            thing_type: reader.read_i16::<LE>()? as i32,
            options: reader.read_i16::<LE>()? as i32,
        })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i16::<LE>(self.raw_x as i16)?;
        writer.write_i16::<LE>(self.raw_y as i16)?;
        writer.write_i16::<LE>(self.angle as i16)?;
        writer.write_i16::<LE>(self.thing_type as i16)?;
        writer.write_i16::<LE>(self.options as i16)?;
        Ok(())
    }
}
