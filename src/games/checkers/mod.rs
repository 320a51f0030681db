//! Checkers on the standard 8×8 board.
//!
//! - Twelve men per side on the dark squares; white moves first, upward
//! - Men step or jump diagonally forward; kings in all four directions
//! - Mandatory capture across the whole side
//! - Reaching the far row replaces a man with a king
//! - A side with no pieces loses; 40 moves without a capture is a draw

mod board;

pub use board::{CheckersBoard, DRAW_THRESHOLD};
