//! Error taxonomy shared by the square utilities, rule engines, and search.
//!
//! Every variant is a precondition violation raised at the offending call.
//! Nothing in the crate retries or swallows them.

use thiserror::Error;

use crate::pieces::PieceKind;

/// Crate-wide error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid shift ({d_col}, {d_row}) from {origin}")]
    InvalidShift {
        origin: String,
        d_col: i8,
        d_row: i8,
    },

    #[error("wrong piece type at {square}: expected {expected:?}, found {found:?}")]
    WrongPieceType {
        square: String,
        expected: PieceKind,
        found: Option<PieceKind>,
    },

    #[error("no piece on {0}")]
    EmptySquare(String),

    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: String, to: String },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
