//! The 8×8 piece grid shared by every board engine.
//!
//! Uses `im` persistent vectors so that cloning a board for a search node is
//! O(1) and mutations copy only the chunks they touch. Two clones never
//! observe each other's writes.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::moves::MoveTable;
use crate::core::{Color, Square};
use crate::pieces::Piece;

/// Grid of optional pieces plus the side to move and the legality cache.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    cells: Vector<Option<Piece>>,

    to_move: Color,

    /// Bumped on every structural mutation.
    version: u64,

    #[serde(skip)]
    moves: Arc<MoveTable>,
}

impl Grid {
    /// An empty grid with white to move.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: std::iter::repeat(None).take(64).collect(),
            to_move: Color::White,
            version: 0,
            moves: Arc::default(),
        }
    }

    /// Piece on `square`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    /// Put `piece` (or nothing) on `square`, returning the previous occupant.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        self.invalidate();
        self.cells.set(square.index(), piece)
    }

    /// Remove and return the occupant of `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.set(square, None)
    }

    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn set_to_move(&mut self, color: Color) {
        if self.to_move != color {
            self.invalidate();
            self.to_move = color;
        }
    }

    /// Current mutation version.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Occupied squares in scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Number of pieces of `color`.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(piece) if piece.color == color))
            .count()
    }

    /// The cached move table, only while it matches the current version.
    #[must_use]
    pub fn cached_moves(&self) -> Option<&MoveTable> {
        if self.moves.is_built_for(self.version) {
            Some(&self.moves)
        } else {
            None
        }
    }

    /// Install a freshly built table. Tables built for another version are dropped.
    pub fn store_moves(&mut self, table: MoveTable) {
        if table.is_built_for(self.version) {
            self.moves = Arc::new(table);
        }
    }

    /// The stored table without a freshness check. Callers check first.
    pub(crate) fn stored_moves(&self) -> &MoveTable {
        &self.moves
    }

    /// Mark the position as changed. Boards call this when auxiliary state
    /// that move generation reads (such as an en-passant target) changes.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        if self.moves.is_built_for(self.version.wrapping_sub(1)) {
            self.moves = Arc::default();
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Grid {
    /// One line per rank from rank 8 down, one character per square:
    /// uppercase for white, lowercase for black, space for empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let cell = Square::new(col, row)
                    .ok()
                    .and_then(|sq| self.get(sq))
                    .map_or(' ', |piece| piece.symbol());
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
