//! Piece rule engines.
//!
//! A piece is a color plus a variant tag from a closed set. Pieces never store
//! their own location: every generator takes the board and the origin square.
//!
//! Move generation dispatches through a single `match` on [`PieceKind`]:
//!
//! | Kind          | Generator                         |
//! |---------------|-----------------------------------|
//! | `CheckerMan`  | [`checker::man_destinations`]     |
//! | `CheckerKing` | [`checker::king_destinations`]    |
//! | `Pawn`        | [`chess::pawn_destinations`]      |
//! | `Knight`      | [`chess::knight_destinations`]    |
//! | `Bishop`, `Rook`, `Queen` | [`chess::slide`]      |
//! | `King`        | [`chess::king_destinations`]      |
//!
//! Generated destinations are pseudo-legal: geometry and occupancy only.
//! Boards filter them to true legality.

pub mod checker;
pub mod chess;

use serde::{Deserialize, Serialize};

use crate::core::{Color, Error, Result, Square};
use crate::rules::{Board, Destinations};

/// Variant tag of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    CheckerMan,
    CheckerKing,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Uppercase display character.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::CheckerMan => 'O',
            PieceKind::CheckerKing | PieceKind::King => 'K',
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
        }
    }

    /// Pseudo-legal destinations of the `self`-tagged piece on `origin`.
    ///
    /// Fails with `WrongPieceType` when the occupant of `origin` is missing or
    /// carries a different tag.
    pub fn destinations<B: Board>(self, board: &B, origin: Square) -> Result<Destinations> {
        let color = self.occupant_color(board, origin)?;
        Ok(match self {
            PieceKind::CheckerMan => checker::man_destinations(board, origin, color),
            PieceKind::CheckerKing => checker::king_destinations(board, origin, color),
            PieceKind::Pawn => chess::pawn_destinations(board, origin, color),
            PieceKind::Knight => chess::knight_destinations(board, origin, color),
            PieceKind::Bishop => chess::slide(board, origin, color, &chess::DIAGONAL_RAYS),
            PieceKind::Rook => chess::slide(board, origin, color, &chess::ORTHOGONAL_RAYS),
            PieceKind::Queen => chess::slide(board, origin, color, &chess::ALL_RAYS),
            PieceKind::King => chess::king_destinations(board, origin, color),
        })
    }

    /// The capturing subset of [`PieceKind::destinations`].
    pub fn captures<B: Board>(self, board: &B, origin: Square) -> Result<Destinations> {
        let color = self.occupant_color(board, origin)?;
        Ok(match self {
            PieceKind::CheckerMan => checker::man_captures(board, origin, color),
            PieceKind::CheckerKing => checker::king_captures(board, origin, color),
            PieceKind::Pawn => chess::pawn_captures(board, origin, color),
            _ => {
                let mut dests = self.destinations(board, origin)?;
                dests.retain(|sq| board.piece_at(*sq).is_some_and(|p| p.color != color));
                dests
            }
        })
    }

    fn occupant_color<B: Board>(self, board: &B, origin: Square) -> Result<Color> {
        match board.piece_at(origin) {
            Some(piece) if piece.kind == self => Ok(piece.color),
            found => Err(Error::WrongPieceType {
                square: origin.to_string(),
                expected: self,
                found: found.map(|p| p.kind),
            }),
        }
    }
}

/// An immutable color + variant value. Freely copied between boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Display character: uppercase for white, lowercase for black.
    #[must_use]
    pub const fn symbol(self) -> char {
        let upper = self.kind.symbol();
        match self.color {
            Color::White => upper,
            Color::Black => upper.to_ascii_lowercase(),
        }
    }

    /// The same piece with a new tag (promotion is replacement, never mutation).
    #[must_use]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Self::new(self.color, kind)
    }

    /// Pseudo-legal destinations of this piece standing on `origin`.
    pub fn destinations<B: Board>(&self, board: &B, origin: Square) -> Result<Destinations> {
        self.kind.destinations(board, origin)
    }

    /// Capturing destinations of this piece standing on `origin`.
    pub fn captures<B: Board>(&self, board: &B, origin: Square) -> Result<Destinations> {
        self.kind.captures(board, origin)
    }
}
