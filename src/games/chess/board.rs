//! Chess board implementation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Color, ColorMap, Error, Result, Square};
use crate::pieces::chess::pawn_attacks;
use crate::pieces::{Piece, PieceKind};
use crate::rules::{Board, Destinations, GameResult, Grid, Move};

/// Plies without a pawn move or capture that end the game in a draw.
pub const NO_PROGRESS_LIMIT: u32 = 100;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Chess position: grid plus king squares, en-passant target, last
/// promotion marker, and the no-progress clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChessBoard {
    grid: Grid,
    kings: ColorMap<Option<Square>>,
    en_passant: Option<Square>,
    last_promotion: Option<Square>,
    halfmove_clock: u32,
}

impl ChessBoard {
    /// Standard start position, white to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (col, kind) in (0u8..).zip(BACK_RANK) {
            for (color, back_row, pawn_row) in [(Color::Black, 0, 1), (Color::White, 7, 6)] {
                if let (Ok(back), Ok(pawn)) = (Square::new(col, back_row), Square::new(col, pawn_row)) {
                    board.place_piece(back, Piece::new(color, kind));
                    board.place_piece(pawn, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        board
    }

    /// An empty board with white to move.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            grid: Grid::empty(),
            kings: ColorMap::with_value(None),
            en_passant: None,
            last_promotion: None,
            halfmove_clock: 0,
        }
    }

    /// Builder form of [`Board::set_current_player`].
    #[must_use]
    pub fn with_current_player(mut self, color: Color) -> Self {
        self.grid.set_to_move(color);
        self
    }

    /// Builder that records an en-passant target square.
    #[must_use]
    pub fn with_en_passant(mut self, target: Option<Square>) -> Self {
        self.en_passant = target;
        self.grid.invalidate();
        self
    }

    /// Put `piece` on `square`, replacing any occupant. Tracks kings.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let previous = self.grid.set(square, Some(piece));
        self.forget_king(square, previous);
        if piece.kind == PieceKind::King {
            self.kings[piece.color] = Some(square);
        }
        previous
    }

    /// Clear `square`, returning the removed piece.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let previous = self.grid.take(square);
        self.forget_king(square, previous);
        previous
    }

    /// Number of pieces of `color`.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.grid.count(color)
    }

    /// Tracked king square of `color`.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color]
    }

    /// Square a pawn promoted on during the last move.
    #[must_use]
    pub fn last_promotion(&self) -> Option<Square> {
        self.last_promotion
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Whether any piece of `by` attacks `square`.
    #[must_use]
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        self.grid
            .occupied()
            .filter(|(_, piece)| piece.color == by)
            .any(|(origin, piece)| match piece.kind {
                PieceKind::Pawn => pawn_attacks(origin, by).contains(&square),
                _ => piece
                    .destinations(self, origin)
                    .is_ok_and(|dests| dests.contains(&square)),
            })
    }

    /// Whether the king of `color` is attacked. A side without a tracked
    /// king is never in check.
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        self.kings[color].is_some_and(|king| self.is_attacked(king, color.opponent()))
    }

    fn forget_king(&mut self, square: Square, previous: Option<Piece>) {
        if let Some(old) = previous {
            if old.kind == PieceKind::King && self.kings[old.color] == Some(square) {
                self.kings[old.color] = None;
            }
        }
    }

    fn occupant(&self, origin: Square) -> Result<Piece> {
        self.piece_at(origin).ok_or_else(|| Error::EmptySquare(origin.to_string()))
    }

    /// Apply `mv` for `piece` with no legality checks.
    fn make_move(&mut self, mv: Move, piece: Piece) {
        let is_pawn = piece.kind == PieceKind::Pawn;
        let target_empty = self.grid.get(mv.to).is_none();
        let progress = is_pawn || !target_empty;

        if is_pawn && mv.from.col() != mv.to.col() && target_empty && self.en_passant == Some(mv.to) {
            if let Ok(passed) = Square::new(mv.to.col(), mv.from.row()) {
                self.remove_piece(passed);
            }
        }

        let landed = if is_pawn && mv.to.row() == piece.color.far_row() {
            self.last_promotion = Some(mv.to);
            piece.promoted(PieceKind::Queen)
        } else {
            self.last_promotion = None;
            piece
        };

        self.remove_piece(mv.from);
        self.place_piece(mv.to, landed);

        self.en_passant = (is_pawn && mv.from.row().abs_diff(mv.to.row()) == 2)
            .then(|| mv.from.midpoint(mv.to));
        self.halfmove_clock = if progress { 0 } else { self.halfmove_clock + 1 };
        self.grid.set_to_move(piece.color.opponent());
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for ChessBoard {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Each pseudo-legal destination is tried on a copy of the position and
    /// kept only if the mover's king is not left in check. `self` is never
    /// mutated.
    fn legal_moves(&self, origin: Square) -> Result<Destinations> {
        let piece = self.occupant(origin)?;
        let mut legal = SmallVec::new();
        for to in piece.destinations(self, origin)? {
            let mut probe = self.clone();
            probe.make_move(Move::new(origin, to), piece);
            if !probe.in_check(piece.color) {
                legal.push(to);
            }
        }
        Ok(legal)
    }

    fn legal_captures(&self, origin: Square) -> Result<Destinations> {
        let piece = self.occupant(origin)?;
        let captures = piece.captures(self, origin)?;
        let mut legal = self.legal_moves(origin)?;
        legal.retain(|to| captures.contains(to));
        Ok(legal)
    }

    fn apply_move(&mut self, from: Square, to: Square) -> Result<()> {
        let piece = self.occupant(from)?;
        if piece.kind == PieceKind::King
            && from.row() == to.row()
            && from.col().abs_diff(to.col()) == 2
        {
            return Err(Error::UnsupportedOperation(format!("castling {from} -> {to}")));
        }
        if piece.color != self.current_player() || !self.legal_moves(from)?.contains(&to) {
            return Err(Error::IllegalMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.make_move(Move::new(from, to), piece);
        Ok(())
    }

    fn apply_move_unchecked(&mut self, mv: Move) -> Result<()> {
        let piece = self.occupant(mv.from)?;
        self.make_move(mv, piece);
        Ok(())
    }

    /// Only the no-progress rule ends a game here; positions without legal
    /// moves are scored by the search.
    fn is_finished(&self) -> bool {
        self.halfmove_clock >= NO_PROGRESS_LIMIT
    }

    fn result(&self) -> GameResult {
        GameResult::Draw
    }
}

impl std::fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}
