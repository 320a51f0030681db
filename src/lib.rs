//! # board-mcts
//!
//! Two-player board game rules (checkers and chess) behind one board
//! contract, searched by a UCT Monte Carlo Tree Search engine.
//!
//! ## Design Principles
//!
//! 1. **Board-Agnostic Search**: The search only talks to a position through
//!    the `Board` trait. Any game implementing it can be searched.
//!
//! 2. **Closed Piece Set**: Pieces are a color plus a `PieceKind` tag, and move
//!    generation dispatches through a single `match` on the tag.
//!
//! 3. **Explicit Errors**: Precondition violations surface as `Error` values
//!    at the offending call.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) board cloning via `im-rs`, so every
//!   tree node owns its position without deep copies.
//!
//! - **Versioned Legality Cache**: Each board carries a `MoveTable` stamped
//!   with the mutation version it was built for. Stale tables are never read.
//!
//! - **Seeded Randomness**: One `GameRng` is threaded through selection and
//!   rollouts, so a seed reproduces a search exactly.
//!
//! ## Modules
//!
//! - `core`: Squares, colors, RNG, errors
//! - `pieces`: Piece tags and per-tag move generators
//! - `rules`: The `Board` trait, the piece grid, and the legality cache
//! - `games`: Checkers and chess boards
//! - `mcts`: Monte Carlo Tree Search

pub mod core;
pub mod pieces;
pub mod rules;
pub mod games;
pub mod mcts;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap,
    Error, Result,
    GameRng,
    Square, BOARD_SIZE,
};

pub use crate::pieces::{Piece, PieceKind};

pub use crate::rules::{Board, GameResult, Grid, Move, MoveTable};

pub use crate::games::{CheckersBoard, ChessBoard};

pub use crate::mcts::{
    MCTSConfig, MCTSSearch, MCTSTree, MCTSNode, NodeId,
    IterationOutcome, SearchStats, TreeStats,
    SelectionPolicy, SimulationPolicy,
    UCT, RandomRollout,
};
