//! MCTS node structures.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency
//! and serializability. Each node owns its board; boards share structure
//! through the persistent grid, so holding one per node is cheap.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap};
use crate::rules::{Board, Move};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the MCTS tree.
///
/// `total_value` accumulates rollout results from white's point of view
/// (+1 white win, -1 black win, 0 draw).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode<B> {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Position at this node.
    pub board: B,

    /// Move that led here from the parent.
    pub mv: Option<Move>,

    /// Children, or `None` until the node is expanded.
    pub children: Option<Vec<NodeId>>,

    /// Depth in tree (root = 0).
    pub depth: u16,

    pub visits: u32,

    pub total_value: f64,

    /// Exact wins per color among backpropagated results.
    pub wins: ColorMap<u32>,

    /// Is this a finished game?
    pub is_terminal: bool,
}

impl<B: Board> MCTSNode<B> {
    /// Create a new node.
    pub fn new(parent: NodeId, board: B, mv: Option<Move>, depth: u16) -> Self {
        let is_terminal = board.is_finished();
        Self {
            parent,
            board,
            mv,
            children: None,
            depth,
            visits: 0,
            total_value: 0.0,
            wins: ColorMap::default(),
            is_terminal,
        }
    }

    /// Create a root node.
    pub fn root(board: B) -> Self {
        Self::new(NodeId::NONE, board, None, 0)
    }

    /// Player to move at this node.
    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Color {
        self.board.current_player()
    }
}

impl<B> MCTSNode<B> {
    #[inline]
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// Child ids (empty while unexpanded).
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of children, 0 if unexpanded.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.children().len()
    }

    /// Record one backpropagated result.
    pub fn update(&mut self, value: f64) {
        self.visits += 1;
        self.total_value += value;
        if value == 1.0 {
            self.wins[Color::White] += 1;
        } else if value == -1.0 {
            self.wins[Color::Black] += 1;
        }
    }

    /// Mean white-perspective value (0 at zero visits).
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_value / self.visits as f64
        }
    }

    /// Wins for `color` divided by visits (0 at zero visits).
    #[must_use]
    pub fn win_percentage(&self, color: Color) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins[color] as f64 / self.visits as f64
        }
    }
}
