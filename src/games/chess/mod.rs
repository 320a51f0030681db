//! Chess on the standard 8×8 board.
//!
//! - Full standard start position, white to move
//! - Legality filters pseudo-legal moves by testing the mover's king for check
//! - Double steps record an en-passant target; promotion is always to a queen
//! - 100 plies without a pawn move or capture is a draw
//!
//! Castling and checkmate/stalemate detection are not implemented; a side
//! with no legal moves is left to the search's rollout scoring.

mod board;

pub use board::{ChessBoard, NO_PROGRESS_LIMIT};
