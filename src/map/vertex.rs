// src/map/vertex.rs
use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};
use serde::Serialize;

use super::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub raw_x: i32,
    pub raw_y: i32,
}

impl Vertex {
    pub fn new(raw_x: i32, raw_y: i32) -> Self {
        Vertex { raw_x, raw_y }
    }
}

impl Record for Vertex {
    const SIZE: usize = 4;
    const LUMP: &'static str = "VERTEXES";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Vertex {
            raw_x: reader.read_i16::<LE>()? as i32,
            raw_y: reader.read_i16::<LE>()? as i32,
        })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i16::<LE>(self.raw_x as i16)?;
        writer.write_i16::<LE>(self.raw_y as i16)?;
        Ok(())
    }
}
