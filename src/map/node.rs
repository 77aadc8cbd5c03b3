// src/map/node.rs
use std::io::{self, Read, Write};
use byteorder::{LE, ReadBytesExt, WriteBytesExt};

use super::Record;

/// A BSP node record (28 bytes), still in 16-bit map units.
///
/// ```text
///  0-7    x, y, dx, dy       4 x i16   partition line
///  8-23   bbox[2][4]         8 x i16   top, bottom, left, right per child
/// 24-27   children[2]        2 x u16   bit 15 set => subsector
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapNode {
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    pub bbox: [[i16; 4]; 2],
    pub children: [u16; 2],
}

impl Record for MapNode {
    const SIZE: usize = 28;
    const LUMP: &'static str = "NODES";

    fn from_wad<R: Read>(reader: &mut R) -> io::Result<Self> {
        let x = reader.read_i16::<LE>()?;
        let y = reader.read_i16::<LE>()?;
        let dx = reader.read_i16::<LE>()?;
        let dy = reader.read_i16::<LE>()?;
        let mut bbox = [[0i16; 4]; 2];
        for side in bbox.iter_mut() {
            for coord in side.iter_mut() {
                *coord = reader.read_i16::<LE>()?;
            }
        }
        let children = [reader.read_u16::<LE>()?, reader.read_u16::<LE>()?];
        Ok(MapNode { x, y, dx, dy, bbox, children })
    }

    fn to_wad<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i16::<LE>(self.x)?;
        writer.write_i16::<LE>(self.y)?;
        writer.write_i16::<LE>(self.dx)?;
        writer.write_i16::<LE>(self.dy)?;
        for side in &self.bbox {
            for &coord in side {
                writer.write_i16::<LE>(coord)?;
            }
        }
        for &child in &self.children {
            writer.write_u16::<LE>(child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_node_record_size() {
        let node = MapNode {
            x: 64,
            y: -32,
            dx: 0,
            dy: 128,
            bbox: [[64, 0, 64, 128], [64, 0, 0, 64]],
            children: [0x8001, 0x8000],
        };
        let mut bytes = Vec::new();
        node.to_wad(&mut bytes).unwrap();
        assert_eq!(bytes.len(), MapNode::SIZE);
        assert_eq!(&bytes[24..28], &[0x01, 0x80, 0x00, 0x80]);
        assert_eq!(MapNode::from_wad(&mut Cursor::new(bytes)).unwrap(), node);
    }
}
