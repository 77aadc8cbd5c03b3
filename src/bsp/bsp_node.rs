//! src/bsp/bsp_node.rs

use serde::Serialize;

use crate::bsp::{fixed_mul, BoundingBox, CellIndex, Fixed, LeafIndex, NodeIndex};

/// Which half-space of a partition line a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSide {
    Front = 0,
    Back = 1,
}

/// What a node child refers to. Decoded once from the raw 16-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Child {
    Node(NodeIndex),
    Leaf(LeafIndex),
    None,
}

/// An internal BSP node with its partition line in 16.16 fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub x: Fixed,
    pub y: Fixed,
    pub dx: Fixed,
    pub dy: Fixed,
    /// Bounding box of each child, front first.
    pub bbox: [BoundingBox; 2],
    /// Front child, then back child.
    pub children: [Child; 2],
}

impl Node {
    pub fn child(&self, side: NodeSide) -> Child {
        self.children[side as usize]
    }

    /// Classifies a fixed-point point against the partition line.
    ///
    /// Points exactly on the line are on the back side.
    pub fn point_on_side(&self, x: Fixed, y: Fixed) -> NodeSide {
        if self.dx == 0 {
            let back = if x <= self.x { self.dy > 0 } else { self.dy < 0 };
            return side_from(back);
        }
        if self.dy == 0 {
            let back = if y <= self.y { self.dx < 0 } else { self.dx > 0 };
            return side_from(back);
        }

        let dx = x.wrapping_sub(self.x);
        let dy = y.wrapping_sub(self.y);

        // Differing signs settle it without multiplying.
        if (self.dy ^ self.dx ^ dx ^ dy) < 0 {
            return side_from((self.dy ^ dx) < 0);
        }

        let left = fixed_mul(self.dy >> 16, dx);
        let right = fixed_mul(dy, self.dx >> 16);
        side_from(right >= left)
    }
}

fn side_from(back: bool) -> NodeSide {
    if back {
        NodeSide::Back
    } else {
        NodeSide::Front
    }
}

/// A BSP leaf, resolved to the sector it lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub seg_count: usize,
    pub first_seg: usize,
    pub cell: CellIndex,
}
