// src/bsp/mod.rs
pub mod bsp_node;
pub mod bsp_tree;
pub mod bsp_util;

pub use bsp_node::{Child, Leaf, Node, NodeSide};
pub use bsp_tree::BspTree;
pub use bsp_util::{fixed_mul, from_raw, to_fixed, BoundingBox, Fixed, FRACBITS, FRACUNIT};

use serde::Serialize;

// Raw child field encoding.
pub const NF_SUBSECTOR: u16 = 0x8000;
pub const NO_CHILD: u16 = 0xFFFF;

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                $name(index as u32)
            }
        }
    };
}

index_type!(
    /// Index into [`BspTree::nodes`].
    NodeIndex
);
index_type!(
    /// Index into [`BspTree::leaves`].
    LeafIndex
);
index_type!(
    /// Index into the map's sectors (cells).
    CellIndex
);
