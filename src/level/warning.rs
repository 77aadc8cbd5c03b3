// src/level/warning.rs

use log::warn;
use serde::Serialize;
use thiserror::Error;

/// A non-fatal anomaly found while building a map.
///
/// Each one is logged when it is found. The map stays usable; at worst a
/// leaf resolves to sector 0 or a sector's mesh is empty.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum LoadWarning {
    #[error("node {node}: subsector child {child} out of range, clamped to 0")]
    ClampedLeafChild { node: usize, child: usize },

    #[error("node {node}: child node {child} is not below its parent, dropped")]
    DroppedNodeChild { node: usize, child: usize },

    #[error("map has no subsectors, using a single implicit leaf")]
    NoLeaves,

    #[error("subsector {leaf}: could not resolve a sector from its first seg, using 0")]
    UnresolvedLeaf { leaf: usize },

    #[error("linedef {linedef}: side {side} is not a valid sidedef")]
    InvalidSide { linedef: usize, side: i32 },

    #[error("linedef {linedef}: has a back side but no front side, skipped")]
    MissingFrontSide { linedef: usize },

    #[error("sidedef {side}: sector {sector} out of range")]
    InvalidSector { side: usize, sector: i32 },

    #[error("linedef {linedef}: vertex {vertex} out of range")]
    InvalidVertex { linedef: usize, vertex: usize },

    #[error("sector {cell}: dropped {count} wall loop(s) shorter than 3")]
    DegenerateLoop { cell: usize, count: usize },

    #[error("sector {cell}: wall loop starting at vertex {start} does not close")]
    OpenLoop { cell: usize, start: usize },

    #[error("sector {cell}: {count} vertex(es) start more than one wall")]
    AmbiguousVertices { cell: usize, count: usize },

    #[error("sector {cell}: triangulation failed, mesh left empty")]
    TriangulationFailed { cell: usize },
}

/// Collects warnings during a load, logging every one and keeping at most
/// `limit` of them.
#[derive(Debug)]
pub(crate) struct WarningSink {
    warnings: Vec<LoadWarning>,
    limit: usize,
    dropped: usize,
}

impl WarningSink {
    pub fn new(limit: usize) -> Self {
        WarningSink {
            warnings: Vec::new(),
            limit,
            dropped: 0,
        }
    }

    pub fn push(&mut self, warning: LoadWarning) {
        warn!("{}", warning);
        if self.warnings.len() < self.limit {
            self.warnings.push(warning);
        } else {
            self.dropped += 1;
        }
    }

    pub fn extend<I: IntoIterator<Item = LoadWarning>>(&mut self, warnings: I) {
        for warning in warnings {
            self.push(warning);
        }
    }

    pub fn finish(self) -> Vec<LoadWarning> {
        if self.dropped > 0 {
            warn!("{} further warning(s) not retained", self.dropped);
        }
        self.warnings
    }
}
