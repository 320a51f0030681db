//! Concrete board rule engines.

pub mod checkers;
pub mod chess;

pub use checkers::CheckersBoard;
pub use chess::ChessBoard;
