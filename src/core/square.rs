//! Board coordinates and algebraic square notation.
//!
//! A square is addressed either as `(column, row)` in `[0,7]×[0,7]` or as a
//! two-character label: file `'a'..='h'` then rank `'1'..='8'`.
//!
//! Row 0 is the topmost rank (rank 8), so white pieces start on the high rows
//! and advance toward row 0.
//!
//! ```
//! use board_mcts::core::Square;
//!
//! let sq: Square = "d4".parse().unwrap();
//! assert_eq!((sq.col(), sq.row()), (3, 4));
//! assert_eq!(sq.shift(1, -1).unwrap().to_string(), "e5");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{Error, Result};

/// Number of files and ranks on the board.
pub const BOARD_SIZE: u8 = 8;

/// A validated board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    col: u8,
    row: u8,
}

impl Square {
    /// Create a square from absolute coordinates.
    pub fn new(col: u8, row: u8) -> Result<Self> {
        if col < BOARD_SIZE && row < BOARD_SIZE {
            Ok(Self { col, row })
        } else {
            Err(Error::InvalidSquare(format!("({col}, {row})")))
        }
    }

    /// Create a square from signed coordinates, returning `None` off the board.
    #[must_use]
    pub fn from_signed(col: i8, row: i8) -> Option<Self> {
        if is_valid(col, row) {
            Some(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// Parse a two-character label such as `"e4"`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidSquare(text.to_string());
        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !file.is_ascii_lowercase() || !rank.is_ascii_digit() {
            return Err(invalid());
        }
        let col = file as i32 - 'a' as i32;
        let row = BOARD_SIZE as i32 - rank.to_digit(10).ok_or_else(invalid)? as i32;
        if (0..BOARD_SIZE as i32).contains(&col) && (0..BOARD_SIZE as i32).contains(&row) {
            Ok(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            Err(invalid())
        }
    }

    /// Column (file) index, 0 = file a.
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row index, 0 = rank 8.
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Flat index into a row-major 64-entry grid.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Inverse of [`Square::index`].
    pub fn from_index(index: usize) -> Result<Self> {
        if index < 64 {
            Ok(Self {
                col: (index % 8) as u8,
                row: (index / 8) as u8,
            })
        } else {
            Err(Error::IndexOutOfRange { index, len: 64 })
        }
    }

    /// Shift by `(d_col, d_row)`, failing when the result leaves the board.
    pub fn shift(self, d_col: i8, d_row: i8) -> Result<Self> {
        self.try_shift(d_col, d_row).ok_or_else(|| Error::InvalidShift {
            origin: self.to_string(),
            d_col,
            d_row,
        })
    }

    /// Shift by `(d_col, d_row)`, returning `None` when the result leaves the board.
    #[inline]
    #[must_use]
    pub fn try_shift(self, d_col: i8, d_row: i8) -> Option<Self> {
        let col = (self.col as i8).checked_add(d_col)?;
        let row = (self.row as i8).checked_add(d_row)?;
        Self::from_signed(col, row)
    }

    /// Square halfway between `self` and `other` (used for jumps).
    #[must_use]
    pub fn midpoint(self, other: Square) -> Square {
        Square {
            col: (self.col + other.col) / 2,
            row: (self.row + other.row) / 2,
        }
    }

    /// Iterate over all 64 squares in scan order: rank 8 to rank 1, file a to h.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { col, row }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.col) as char,
            BOARD_SIZE - self.row
        )
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Square::parse(s)
    }
}

/// Whether `(col, row)` lies on the board.
#[inline]
#[must_use]
pub fn is_valid(col: i8, row: i8) -> bool {
    (0..BOARD_SIZE as i8).contains(&col) && (0..BOARD_SIZE as i8).contains(&row)
}

/// Whether `text` is one of the 64 labels `a1..h8`.
#[must_use]
pub fn is_valid_square(text: &str) -> bool {
    Square::parse(text).is_ok()
}

/// Parse a label into `(col, row)`.
pub fn parse(text: &str) -> Result<(u8, u8)> {
    Square::parse(text).map(|sq| (sq.col, sq.row))
}

/// Format `(col, row)` as a label.
pub fn format(col: u8, row: u8) -> Result<String> {
    Square::new(col, row).map(|sq| sq.to_string())
}

/// Shift the square labelled `origin` by `(d_col, d_row)`.
pub fn shift(origin: &str, d_col: i8, d_row: i8) -> Result<String> {
    Square::parse(origin)?.shift(d_col, d_row).map(|sq| sq.to_string())
}
