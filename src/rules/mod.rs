//! Board contract shared by the rule engines.
//!
//! Games implement `Board` to define:
//! - Legal moves for each position
//! - How moves modify the position
//! - Terminal detection and the signed result
//!
//! The search calls into `Board` but never interprets game-specific
//! concepts directly.

pub mod engine;
pub mod grid;
pub mod moves;

pub use engine::{Board, GameResult};
pub use grid::Grid;
pub use moves::{Destinations, Move, MoveTable};
