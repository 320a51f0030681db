//! Core building blocks: squares, colors, RNG, errors.
//!
//! Everything here is game-agnostic and shared by the piece engines,
//! the board engines, and the search.

pub mod color;
pub mod error;
pub mod rng;
pub mod square;

pub use color::{Color, ColorMap};
pub use error::{Error, Result};
pub use rng::GameRng;
pub use square::{is_valid_square, Square, BOARD_SIZE};
