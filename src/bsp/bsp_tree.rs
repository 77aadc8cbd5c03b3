// src/bsp/bsp_tree.rs

use log::debug;
use serde::Serialize;

use crate::bsp::{
    from_raw, BoundingBox, CellIndex, Child, Fixed, Leaf, LeafIndex, Node, NodeIndex,
    NF_SUBSECTOR, NO_CHILD,
};
use crate::level::warning::{LoadWarning, WarningSink};
use crate::map::{LineDef, MapNode, Seg, SideDef, Subsector};

/// The raw tables the BSP index is built from.
pub struct BspSource<'a> {
    pub nodes: &'a [MapNode],
    pub subsectors: &'a [Subsector],
    pub segs: &'a [Seg],
    pub linedefs: &'a [LineDef],
    pub sidedefs: &'a [SideDef],
    pub num_sectors: usize,
}

/// Normalized BSP tree: fixed-point nodes with tagged children, and leaves
/// resolved to sectors. The root is the last node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BspTree {
    nodes: Vec<Node>,
    leaves: Vec<Leaf>,
}

impl BspTree {
    pub(crate) fn build(source: &BspSource<'_>, sink: &mut WarningSink) -> Self {
        let mut leaves: Vec<Leaf> = source
            .subsectors
            .iter()
            .enumerate()
            .map(|(index, subsector)| Leaf {
                seg_count: subsector.seg_count,
                first_seg: subsector.first_seg,
                cell: resolve_cell(index, subsector, source, sink),
            })
            .collect();

        if leaves.is_empty() {
            sink.push(LoadWarning::NoLeaves);
            leaves.push(Leaf {
                seg_count: 0,
                first_seg: 0,
                cell: CellIndex(0),
            });
        }

        let nodes = source
            .nodes
            .iter()
            .enumerate()
            .map(|(index, raw)| Node {
                x: from_raw(raw.x),
                y: from_raw(raw.y),
                dx: from_raw(raw.dx),
                dy: from_raw(raw.dy),
                bbox: [
                    BoundingBox::from_node_box(&raw.bbox[0]),
                    BoundingBox::from_node_box(&raw.bbox[1]),
                ],
                children: [
                    decode_child(index, raw.children[0], leaves.len(), sink),
                    decode_child(index, raw.children[1], leaves.len(), sink),
                ],
            })
            .collect::<Vec<_>>();

        debug!("BSP: {} nodes, {} leaves", nodes.len(), leaves.len());
        BspTree { nodes, leaves }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.nodes.len().checked_sub(1).map(NodeIndex::from)
    }

    /// Finds the leaf containing a fixed-point point. Total: every point
    /// lands in some leaf, even far outside the map.
    pub fn locate(&self, x: Fixed, y: Fixed) -> LeafIndex {
        let Some(mut current) = self.root() else {
            return LeafIndex(0);
        };
        loop {
            let Some(node) = self.nodes.get(current.index()) else {
                return LeafIndex(0);
            };
            match node.child(node.point_on_side(x, y)) {
                Child::Node(next) => current = next,
                Child::Leaf(leaf) => return leaf,
                Child::None => return LeafIndex(0),
            }
        }
    }

    pub fn cell_of(&self, leaf: LeafIndex) -> CellIndex {
        self.leaves
            .get(leaf.index())
            .map(|leaf| leaf.cell)
            .unwrap_or(CellIndex(0))
    }
}

/// Node children always point at lower-numbered nodes, which is what keeps
/// descent from cycling. Anything else is dropped here, once.
fn decode_child(node: usize, raw: u16, num_leaves: usize, sink: &mut WarningSink) -> Child {
    if raw == NO_CHILD {
        return Child::None;
    }
    if raw & NF_SUBSECTOR != 0 {
        let leaf = (raw & !NF_SUBSECTOR) as usize;
        if leaf >= num_leaves {
            sink.push(LoadWarning::ClampedLeafChild { node, child: leaf });
            return Child::Leaf(LeafIndex(0));
        }
        return Child::Leaf(LeafIndex::from(leaf));
    }
    let child = raw as usize;
    if child >= node {
        sink.push(LoadWarning::DroppedNodeChild { node, child });
        return Child::None;
    }
    Child::Node(NodeIndex::from(child))
}

/// A leaf takes the sector of the side its first seg runs along.
fn resolve_cell(
    leaf: usize,
    subsector: &Subsector,
    source: &BspSource<'_>,
    sink: &mut WarningSink,
) -> CellIndex {
    let sector = source
        .segs
        .get(subsector.first_seg)
        .and_then(|seg| {
            let line = source.linedefs.get(seg.linedef)?;
            if seg.on_back_side() {
                line.back_side()
            } else {
                line.front_side()
            }
        })
        .and_then(|side| source.sidedefs.get(side))
        .and_then(SideDef::sector_index)
        .filter(|&sector| sector < source.num_sectors);

    match sector {
        Some(sector) => CellIndex::from(sector),
        None => {
            sink.push(LoadWarning::UnresolvedLeaf { leaf });
            CellIndex(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::to_fixed;

    fn line(front: i32, back: i32) -> LineDef {
        LineDef::new(0, 1, front, back)
    }

    fn seg(linedef: usize, side: i32) -> Seg {
        Seg {
            v1: 0,
            v2: 1,
            angle: 0,
            linedef,
            side,
            offset: 0,
        }
    }

    fn vertical_node(children: [u16; 2]) -> MapNode {
        MapNode {
            x: 64,
            y: 0,
            dx: 0,
            dy: 64,
            bbox: [[64, 0, 64, 128], [64, 0, 0, 64]],
            children,
        }
    }

    struct Tables {
        nodes: Vec<MapNode>,
        subsectors: Vec<Subsector>,
        segs: Vec<Seg>,
        linedefs: Vec<LineDef>,
        sidedefs: Vec<SideDef>,
    }

    impl Tables {
        /// Two sectors split by a vertical line at x = 64; left is sector 0.
        fn split() -> Self {
            Tables {
                nodes: vec![vertical_node([NF_SUBSECTOR | 1, NF_SUBSECTOR])],
                subsectors: vec![
                    Subsector { seg_count: 1, first_seg: 0 },
                    Subsector { seg_count: 1, first_seg: 1 },
                ],
                segs: vec![seg(0, 1), seg(0, 0)],
                linedefs: vec![line(0, 1)],
                sidedefs: vec![SideDef::facing(1), SideDef::facing(0)],
            }
        }

        fn build(&self, sink: &mut WarningSink) -> BspTree {
            BspTree::build(
                &BspSource {
                    nodes: &self.nodes,
                    subsectors: &self.subsectors,
                    segs: &self.segs,
                    linedefs: &self.linedefs,
                    sidedefs: &self.sidedefs,
                    num_sectors: 2,
                },
                sink,
            )
        }
    }

    #[test]
    fn test_leaf_cell_follows_seg_side() {
        let mut sink = WarningSink::new(16);
        let tree = Tables::split().build(&mut sink);
        // Leaf 0's first seg runs along the back side (sidedef 1, sector 0).
        assert_eq!(tree.leaves()[0].cell, CellIndex(0));
        assert_eq!(tree.leaves()[1].cell, CellIndex(1));
        assert!(sink.finish().is_empty());
    }

    #[test]
    fn test_locate_descends_to_leaf() {
        let mut sink = WarningSink::new(16);
        let tree = Tables::split().build(&mut sink);
        assert_eq!(tree.locate(to_fixed(10), to_fixed(10)), LeafIndex(0));
        assert_eq!(tree.locate(to_fixed(100), to_fixed(10)), LeafIndex(1));
        assert_eq!(tree.cell_of(tree.locate(to_fixed(100), to_fixed(10))), CellIndex(1));
        // Far outside the map still resolves.
        assert_eq!(tree.locate(to_fixed(-30_000), to_fixed(30_000)), LeafIndex(0));
    }

    #[test]
    fn test_no_nodes_is_single_leaf() {
        let mut tables = Tables::split();
        tables.nodes.clear();
        tables.subsectors.truncate(1);
        let mut sink = WarningSink::new(16);
        let tree = tables.build(&mut sink);
        for &(x, y) in &[(0, 0), (5000, -5000), (-32768, 32767)] {
            assert_eq!(tree.locate(to_fixed(x), to_fixed(y)), LeafIndex(0));
        }
    }

    #[test]
    fn test_no_subsectors_gets_implicit_leaf() {
        let mut tables = Tables::split();
        tables.nodes.clear();
        tables.subsectors.clear();
        let mut sink = WarningSink::new(16);
        let tree = tables.build(&mut sink);
        assert_eq!(tree.leaves().len(), 1);
        assert_eq!(tree.cell_of(LeafIndex(0)), CellIndex(0));
        assert_eq!(sink.finish(), vec![LoadWarning::NoLeaves]);
    }

    #[test]
    fn test_child_decoding() {
        let mut tables = Tables::split();
        tables.nodes = vec![
            vertical_node([NF_SUBSECTOR | 1, NF_SUBSECTOR | 50]),
            vertical_node([0, NO_CHILD]),
            vertical_node([2, NF_SUBSECTOR]),
        ];
        let mut sink = WarningSink::new(16);
        let tree = tables.build(&mut sink);

        let nodes = tree.nodes();
        assert_eq!(nodes[0].children, [Child::Leaf(LeafIndex(1)), Child::Leaf(LeafIndex(0))]);
        assert_eq!(nodes[1].children, [Child::Node(NodeIndex(0)), Child::None]);
        assert_eq!(nodes[2].children, [Child::None, Child::Leaf(LeafIndex(0))]);
        assert_eq!(nodes[0].x, 64 << 16);
        assert_eq!(nodes[0].dy, 64 << 16);

        assert_eq!(
            sink.finish(),
            vec![
                LoadWarning::ClampedLeafChild { node: 0, child: 50 },
                LoadWarning::DroppedNodeChild { node: 2, child: 2 },
            ]
        );

        // Root's front child was dropped: points on that side fall back to leaf 0.
        assert_eq!(tree.locate(to_fixed(100), to_fixed(10)), LeafIndex(0));
    }

    #[test]
    fn test_unresolvable_leaf() {
        let mut tables = Tables::split();
        tables.subsectors[1].first_seg = 99;
        let mut sink = WarningSink::new(16);
        let tree = tables.build(&mut sink);
        assert_eq!(tree.leaves()[1].cell, CellIndex(0));
        assert_eq!(sink.finish(), vec![LoadWarning::UnresolvedLeaf { leaf: 1 }]);
    }
}
