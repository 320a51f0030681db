//! The board contract consumed by the search.
//!
//! Boards implement `Board` to define their rules:
//! - Which destinations are legal for the piece on a square
//! - How a move modifies the position
//! - When the game is over and who won
//!
//! The search only ever talks to a position through this trait.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::moves::{Destinations, Move, MoveTable};
use crate::core::{Color, Result, Square};
use crate::pieces::Piece;

/// Signed outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// +1 for a white win, -1 for a black win, 0 for a draw.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            GameResult::WhiteWins => 1.0,
            GameResult::BlackWins => -1.0,
            GameResult::Draw => 0.0,
        }
    }

    /// A win for `color`.
    #[must_use]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    /// The winning color, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw => None,
        }
    }
}

/// Board contract.
///
/// ## Implementation Notes
///
/// - `legal_moves` must not leave the board mutated on any exit path
/// - `apply_move` validates the move, applies it, and passes the turn
/// - `result` is only meaningful once `is_finished` returns true
/// - Every structural change goes through the `Grid`, which invalidates the
///   cached `MoveTable`
pub trait Board: Clone + std::fmt::Display {
    /// Shared grid state.
    fn grid(&self) -> &Grid;

    /// Mutable access to the shared grid state.
    fn grid_mut(&mut self) -> &mut Grid;

    /// Square a pawn may capture onto en passant, if any.
    fn en_passant_target(&self) -> Option<Square> {
        None
    }

    /// Legal destinations for the piece on `origin`.
    fn legal_moves(&self, origin: Square) -> Result<Destinations>;

    /// Legal capturing destinations for the piece on `origin`.
    fn legal_captures(&self, origin: Square) -> Result<Destinations>;

    /// Validate and apply a move, then pass the turn.
    fn apply_move(&mut self, from: Square, to: Square) -> Result<()>;

    /// Apply a move already known to be legal, then pass the turn.
    ///
    /// Used when the move was read from a fresh `MoveTable`.
    fn apply_move_unchecked(&mut self, mv: Move) -> Result<()>;

    /// Whether the game is over.
    fn is_finished(&self) -> bool;

    /// Outcome of the game; `Draw` while unfinished.
    fn result(&self) -> GameResult;

    // === Provided Methods ===

    #[inline]
    fn current_player(&self) -> Color {
        self.grid().to_move()
    }

    fn set_current_player(&mut self, color: Color) {
        self.grid_mut().set_to_move(color);
    }

    #[inline]
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid().get(square)
    }

    /// Whether `square` is empty.
    #[inline]
    fn is_empty_square(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Occupied squares of `color` in scan order.
    fn pieces_of(&self, color: Color) -> Vec<(Square, Piece)> {
        self.grid()
            .occupied()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// Build the legality table for the side to move without storing it.
    fn build_move_table(&self) -> Result<MoveTable> {
        let mut table = MoveTable::new(self.grid().version());
        for (origin, _) in self.pieces_of(self.current_player()) {
            table.push(origin, self.legal_moves(origin)?);
        }
        Ok(table)
    }

    /// Rebuild the cached legality table for every piece of the side to move.
    fn recalculate_moves(&mut self) -> Result<()> {
        let table = self.build_move_table()?;
        self.grid_mut().store_moves(table);
        Ok(())
    }

    /// The legality table, recomputed first if any mutation made it stale.
    fn move_table(&mut self) -> Result<&MoveTable> {
        if self.grid().cached_moves().is_none() {
            self.recalculate_moves()?;
        }
        Ok(self.grid().stored_moves())
    }

    /// Total number of legal moves for the side to move.
    fn num_legal_moves(&mut self) -> Result<usize> {
        Ok(self.move_table()?.len())
    }

    /// The `index`-th legal move in enumeration order.
    fn nth_move(&mut self, index: usize) -> Result<Move> {
        self.move_table()?.nth(index)
    }

    /// All legal moves for the side to move in enumeration order.
    fn all_moves(&mut self) -> Result<Vec<Move>> {
        Ok(self.move_table()?.iter().collect())
    }

    /// Apply the `index`-th legal move.
    fn apply_move_index(&mut self, index: usize) -> Result<Move> {
        let mv = self.nth_move(index)?;
        self.apply_move_unchecked(mv)?;
        Ok(mv)
    }

    /// Label-based form of [`Board::legal_moves`].
    fn legal_moves_for(&self, origin: &str) -> Result<Vec<Square>> {
        Ok(self.legal_moves(Square::parse(origin)?)?.into_vec())
    }

    /// Label-based form of [`Board::apply_move`].
    fn play(&mut self, from: &str, to: &str) -> Result<()> {
        self.apply_move(Square::parse(from)?, Square::parse(to)?)
    }

    /// The board dump: one line per rank, one character per square.
    fn render(&self) -> String {
        self.grid().to_string()
    }
}
