//! Checkers board implementation.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Error, Result, Square};
use crate::pieces::{Piece, PieceKind};
use crate::rules::{Board, Destinations, GameResult, Grid, Move};

/// Consecutive non-capturing moves that end the game in a draw.
pub const DRAW_THRESHOLD: u32 = 40;

/// Checkers position: grid, side to move, and the no-capture counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckersBoard {
    grid: Grid,
    moves_without_capture: u32,
}

impl CheckersBoard {
    /// Standard start: twelve men per side on the dark squares, white to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for square in Square::all() {
            let dark = (square.col() + square.row()) % 2 == 1;
            let color = match square.row() {
                0..=2 => Color::Black,
                5..=7 => Color::White,
                _ => continue,
            };
            if dark {
                board.place_piece(square, Piece::new(color, PieceKind::CheckerMan));
            }
        }
        board
    }

    /// An empty board with white to move.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            grid: Grid::empty(),
            moves_without_capture: 0,
        }
    }

    /// Builder form of [`Board::set_current_player`].
    #[must_use]
    pub fn with_current_player(mut self, color: Color) -> Self {
        self.grid.set_to_move(color);
        self
    }

    /// Put `piece` on `square`, replacing any occupant.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.grid.set(square, Some(piece))
    }

    /// Clear `square`, returning the removed piece.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.grid.take(square)
    }

    /// Number of pieces of `color`.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.grid.count(color)
    }

    #[must_use]
    pub fn moves_without_capture(&self) -> u32 {
        self.moves_without_capture
    }

    /// Whether some piece of `color` has a nonempty capture list.
    pub fn has_jump(&self, color: Color) -> Result<bool> {
        for (square, piece) in self.pieces_of(color) {
            if !piece.captures(self, square)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the no-capture counter has reached the draw threshold.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.moves_without_capture >= DRAW_THRESHOLD
    }

    fn occupant(&self, origin: Square) -> Result<Piece> {
        self.piece_at(origin).ok_or_else(|| Error::EmptySquare(origin.to_string()))
    }
}

impl Default for CheckersBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for CheckersBoard {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Mandatory capture: when any piece of the mover's color can jump,
    /// every piece is restricted to its own captures.
    fn legal_moves(&self, origin: Square) -> Result<Destinations> {
        let piece = self.occupant(origin)?;
        if self.has_jump(piece.color)? {
            piece.captures(self, origin)
        } else {
            piece.destinations(self, origin)
        }
    }

    fn legal_captures(&self, origin: Square) -> Result<Destinations> {
        let piece = self.occupant(origin)?;
        piece.captures(self, origin)
    }

    fn apply_move(&mut self, from: Square, to: Square) -> Result<()> {
        let piece = self.occupant(from)?;
        let illegal = || Error::IllegalMove {
            from: from.to_string(),
            to: to.to_string(),
        };
        if piece.color != self.current_player() {
            return Err(illegal());
        }
        if !self.legal_moves(from)?.contains(&to) {
            return Err(illegal());
        }
        self.apply_move_unchecked(Move::new(from, to))
    }

    /// A two-column move is a jump: the midpoint is emptied and the counter
    /// resets. Anything landing on the far row is replaced by a king.
    fn apply_move_unchecked(&mut self, mv: Move) -> Result<()> {
        let piece = self.occupant(mv.from)?;

        if mv.from.col().abs_diff(mv.to.col()) == 2 {
            self.grid.take(mv.from.midpoint(mv.to));
            self.moves_without_capture = 0;
        } else {
            self.moves_without_capture += 1;
        }

        let landed = if mv.to.row() == piece.color.far_row() {
            piece.promoted(PieceKind::CheckerKing)
        } else {
            piece
        };

        self.grid.take(mv.from);
        self.grid.set(mv.to, Some(landed));
        self.grid.set_to_move(piece.color.opponent());
        Ok(())
    }

    /// Finished when the draw counter is reached or a side has no pieces.
    fn is_finished(&self) -> bool {
        self.is_draw() || self.count(Color::White) == 0 || self.count(Color::Black) == 0
    }

    fn result(&self) -> GameResult {
        if self.is_draw() {
            return GameResult::Draw;
        }
        match (self.count(Color::White), self.count(Color::Black)) {
            (w, 0) if w > 0 => GameResult::WhiteWins,
            (0, b) if b > 0 => GameResult::BlackWins,
            _ => GameResult::Draw,
        }
    }
}

impl std::fmt::Display for CheckersBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}
