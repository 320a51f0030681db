//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode<B>>` with index-based references for efficiency,
//! cache-friendliness, and serializability.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::{Color, Error, Result};
use crate::rules::Board;

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// This avoids reference counting overhead and enables serialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree<B> {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode<B>>,

    /// The root node ID (always 0 after initialization).
    root: NodeId,

    /// Side to move at the root; win percentages are reported for this color.
    perspective: Color,
}

impl<B: Board> MCTSTree<B> {
    /// Create a new tree rooted at `board`.
    pub fn new(board: B) -> Self {
        Self::with_capacity(board, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(board: B, capacity: usize) -> Self {
        let perspective = board.current_player();
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(board));
        Self {
            nodes,
            root: NodeId::new(0),
            perspective,
        }
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, board: B) {
        self.perspective = board.current_player();
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(board));
        self.root = NodeId::new(0);
    }

    /// Child of `id` with the highest win percentage for the root's side.
    ///
    /// Greedy: visit counts are ignored. Ties go to the earliest child.
    #[must_use]
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in self.get(id).children() {
            let score = self.win_percentage(child);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }
}

impl<B> MCTSTree<B> {
    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Color whose wins `win_percentage` reports.
    #[inline]
    #[must_use]
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<B> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<B> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode<B>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of children of `id`, 0 if unexpanded.
    #[must_use]
    pub fn arity(&self, id: NodeId) -> usize {
        self.get(id).arity()
    }

    /// The `index`-th child of `id`.
    pub fn child(&self, id: NodeId, index: usize) -> Result<NodeId> {
        let children = self.get(id).children();
        children.get(index).copied().ok_or(Error::IndexOutOfRange {
            index,
            len: children.len(),
        })
    }

    /// Root-side wins at `id` divided by its visits (0 at zero visits).
    #[must_use]
    pub fn win_percentage(&self, id: NodeId) -> f64 {
        self.get(id).win_percentage(self.perspective)
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<B> {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<B>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Ids from the root down to `id`.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while !self.get(current).parent.is_none() {
            current = self.get(current).parent;
            path.push(current);
        }
        path.reverse();
        path
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            expanded_count: self.nodes.iter().filter(|n| n.is_expanded()).count(),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal).count(),
            total_children: self.nodes.iter().map(MCTSNode::arity).sum(),
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Nodes whose children have been generated.
    pub expanded_count: usize,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Sum of arities over all nodes.
    pub total_children: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            self.total_children as f64 / self.expanded_count as f64
        }
    }
}

impl std::fmt::Display for TreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes ({} expanded, {} terminal), depth {}, branching {:.2}",
            self.node_count,
            self.expanded_count,
            self.terminal_count,
            self.max_depth,
            self.branching_factor()
        )
    }
}
