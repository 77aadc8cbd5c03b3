// src/map/subsector.rs
use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};

use super::Record;

/// A BSP leaf record: a contiguous run of segs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subsector {
    pub seg_count: usize,
    pub first_seg: usize,
}

impl Record for Subsector {
    const SIZE: usize = 4;
    const LUMP: &'static str = "SSECTORS";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Subsector {
            seg_count: reader.read_u16::<LE>()? as usize,
            first_seg: reader.read_u16::<LE>()? as usize,
        })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LE>(self.seg_count as u16)?;
        writer.write_u16::<LE>(self.first_seg as u16)?;
        Ok(())
    }
}
