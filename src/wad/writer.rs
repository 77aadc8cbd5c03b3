// src/wad/writer.rs

use std::io::{self, Write};

use byteorder::{WriteBytesExt, LE};

use crate::map::{write_name8, Record};
use crate::wad::{WadKind, HEADER_SIZE};

/// Serializes a record table into lump bytes.
pub fn encode_records<T: Record>(records: &[T]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(records.len() * T::SIZE);
    for record in records {
        record.to_wad(&mut out)?;
    }
    Ok(out)
}

/// Assembles a WAD from named lumps. Lump data is laid out after the header
/// in insertion order, followed by the directory.
#[derive(Debug, Clone)]
pub struct WadBuilder {
    kind: WadKind,
    lumps: Vec<(String, Vec<u8>)>,
}

impl WadBuilder {
    pub fn new(kind: WadKind) -> Self {
        WadBuilder {
            kind,
            lumps: Vec::new(),
        }
    }

    pub fn add_lump(&mut self, name: &str, data: Vec<u8>) -> &mut Self {
        self.lumps.push((name.to_string(), data));
        self
    }

    /// Adds an empty lump, such as a level marker.
    pub fn add_marker(&mut self, name: &str) -> &mut Self {
        self.add_lump(name, Vec::new())
    }

    /// Adds a record table under its own lump name.
    pub fn add_records<T: Record>(&mut self, records: &[T]) -> io::Result<&mut Self> {
        let data = encode_records(records)?;
        Ok(self.add_lump(T::LUMP, data))
    }

    pub fn finish(&self) -> io::Result<Vec<u8>> {
        let data_len: usize = self.lumps.iter().map(|(_, data)| data.len()).sum();
        let mut out = Vec::with_capacity(HEADER_SIZE + data_len + self.lumps.len() * 16);

        out.write_all(self.kind.magic())?;
        out.write_i32::<LE>(self.lumps.len() as i32)?;
        out.write_i32::<LE>((HEADER_SIZE + data_len) as i32)?;

        let mut offsets = Vec::with_capacity(self.lumps.len());
        for (_, data) in &self.lumps {
            offsets.push(out.len());
            out.write_all(data)?;
        }
        for ((name, data), offset) in self.lumps.iter().zip(offsets) {
            out.write_i32::<LE>(offset as i32)?;
            out.write_i32::<LE>(data.len() as i32)?;
            write_name8(&mut out, name)?;
        }
        Ok(out)
    }
}
