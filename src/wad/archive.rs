// src/wad/archive.rs

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{ReadBytesExt, LE};
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::level::{LoadConfig, Map};
use crate::map::{read_name8, Record};
use crate::wad::{FormatError, Result, FILELUMP_SIZE};

/// Lumps that may follow a level marker.
const LEVEL_LUMPS: [&str; 12] = [
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS",
    "REJECT", "BLOCKMAP", "BEHAVIOR", "SCRIPTS",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WadKind {
    Iwad,
    Pwad,
}

impl WadKind {
    pub fn magic(self) -> &'static [u8; 4] {
        match self {
            WadKind::Iwad => b"IWAD",
            WadKind::Pwad => b"PWAD",
        }
    }

    fn from_magic(magic: &[u8; 4]) -> Option<Self> {
        match magic {
            b"IWAD" => Some(WadKind::Iwad),
            b"PWAD" => Some(WadKind::Pwad),
            _ => None,
        }
    }
}

/// A single lump entry from the WAD directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LumpEntry {
    pub offset: usize,
    pub size: usize,
    pub name: String,
}

impl LumpEntry {
    /// Compares like `strncmp(name, wanted, 8)`.
    pub fn is_named(&self, wanted: &str) -> bool {
        let wanted = &wanted.as_bytes()[..wanted.len().min(8)];
        let wanted = wanted.split(|&c| c == 0).next().unwrap_or(wanted);
        self.name.chars().map(|c| c as u32 as u8).eq(wanted.iter().copied())
    }
}

/// A grouping of lumps that form a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    /// Marker name, empty for a WAD without level markers.
    pub name: String,
    /// Directory indices of the level's lumps, marker excluded.
    pub lump_indices: Vec<usize>,
}

/// A parsed WAD borrowing its bytes.
#[derive(Debug, Clone)]
pub struct Wad<'a> {
    data: &'a [u8],
    kind: WadKind,
    directory: Vec<LumpEntry>,
    levels: Vec<LevelInfo>,
}

impl<'a> Wad<'a> {
    /// Reads the header and directory and groups lumps into levels.
    ///
    /// Directory entries pointing outside `data` are skipped with a warning.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        let kind = WadKind::from_magic(&magic).ok_or(FormatError::BadMagic { found: magic })?;

        let count = cursor.read_i32::<LE>()? as i64;
        let offset = cursor.read_i32::<LE>()? as i64;
        let len = data.len();
        if count < 0 || offset < 0 || offset + count * FILELUMP_SIZE as i64 > len as i64 {
            return Err(FormatError::DirectoryOutOfBounds { offset, count, len });
        }

        cursor.seek(SeekFrom::Start(offset as u64))?;
        let mut directory = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let lump_offset = cursor.read_i32::<LE>()? as i64;
            let lump_size = cursor.read_i32::<LE>()? as i64;
            let name = read_name8(&mut cursor)?;
            if lump_offset < 0 || lump_size < 0 || lump_offset + lump_size > len as i64 {
                warn!(
                    "Lump '{}' has invalid offset/size ({}+{} > {}), skipped",
                    name, lump_offset, lump_size, len
                );
                continue;
            }
            directory.push(LumpEntry {
                offset: lump_offset as usize,
                size: lump_size as usize,
                name,
            });
        }

        let levels = group_levels(&directory);
        debug!(
            "{:?}: {} lumps, {} level(s)",
            kind,
            directory.len(),
            levels.len()
        );
        Ok(Wad {
            data,
            kind,
            directory,
            levels,
        })
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    pub fn directory(&self) -> &[LumpEntry] {
        &self.directory
    }

    /// Levels in directory order. Never empty: a WAD without markers has
    /// one unnamed level spanning the whole directory.
    pub fn levels(&self) -> &[LevelInfo] {
        &self.levels
    }

    /// Finds a level by marker name, ignoring case.
    pub fn level(&self, name: &str) -> Option<&LevelInfo> {
        self.levels
            .iter()
            .find(|level| level.name.eq_ignore_ascii_case(name))
    }

    /// Raw bytes of the first lump of `level` with the given name.
    pub fn lump_bytes(&self, level: &LevelInfo, name: &str) -> Option<&'a [u8]> {
        let data = self.data;
        level
            .lump_indices
            .iter()
            .filter_map(|&index| self.directory.get(index))
            .find(|entry| entry.is_named(name))
            .map(|entry| &data[entry.offset..entry.offset + entry.size])
    }

    /// Decodes the level's `T::LUMP` table. An absent lump is an empty table.
    pub fn read_records<T: Record>(&self, level: &LevelInfo) -> Result<Vec<T>> {
        let Some(bytes) = self.lump_bytes(level, T::LUMP) else {
            return Ok(Vec::new());
        };
        if bytes.len() % T::SIZE != 0 {
            return Err(FormatError::TruncatedLump {
                lump: T::LUMP.to_string(),
                size: bytes.len(),
                record_size: T::SIZE,
            });
        }

        let count = bytes.len() / T::SIZE;
        let mut cursor = Cursor::new(bytes);
        let records = (0..count)
            .map(|_| T::from_wad(&mut cursor))
            .collect::<std::io::Result<Vec<_>>>()?;
        debug!("{}: {} records", T::LUMP, records.len());
        Ok(records)
    }

    /// Builds the map of the named level.
    pub fn load_level(&self, name: &str, config: &LoadConfig) -> Result<Map> {
        let level = self
            .level(name)
            .ok_or_else(|| FormatError::LevelNotFound(name.to_string()))?;
        Map::from_level(self, level, config)
    }

    /// Builds every level, in directory order.
    pub fn load_all_levels(&self, config: &LoadConfig) -> Vec<Result<Map>> {
        #[cfg(feature = "parallel")]
        let maps = self
            .levels
            .par_iter()
            .map(|level| Map::from_level(self, level, config))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let maps = self
            .levels
            .iter()
            .map(|level| Map::from_level(self, level, config))
            .collect();

        maps
    }
}

/// True for `ExMy` and `MAPxx` marker names.
pub fn is_level_marker(name: &str) -> bool {
    match name.as_bytes() {
        [b'E', e, b'M', m] => e.is_ascii_digit() && m.is_ascii_digit(),
        [b'M', b'A', b'P', a, b] => a.is_ascii_digit() && b.is_ascii_digit(),
        _ => false,
    }
}

fn is_level_lump(name: &str) -> bool {
    LEVEL_LUMPS.contains(&name)
}

/// Groups lumps into levels. A level is a marker followed by a run of level
/// lumps; any other lump ends it.
fn group_levels(directory: &[LumpEntry]) -> Vec<LevelInfo> {
    let mut levels = Vec::new();
    let mut current: Option<LevelInfo> = None;

    for (index, entry) in directory.iter().enumerate() {
        if is_level_marker(&entry.name) {
            levels.extend(current.take());
            current = Some(LevelInfo {
                name: entry.name.clone(),
                lump_indices: Vec::new(),
            });
        } else if is_level_lump(&entry.name) {
            if let Some(level) = current.as_mut() {
                level.lump_indices.push(index);
            }
        } else {
            levels.extend(current.take());
        }
    }
    levels.extend(current);

    if levels.is_empty() {
        levels.push(LevelInfo {
            name: String::new(),
            lump_indices: (0..directory.len()).collect(),
        });
    }
    levels
}
