//! Side identification and per-side data storage.
//!
//! ## Color
//!
//! The two sides of a board game. White moves first and its results are
//! reported with a positive sign.
//!
//! ## ColorMap
//!
//! Fixed two-entry storage indexed by `Color` for O(1) access
//! (king squares, win counters).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Map the reference boolean convention (`true` = white) to a color.
    #[must_use]
    pub const fn from_is_white(is_white: bool) -> Self {
        if is_white {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Result sign for this side: +1 for white, -1 for black.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row delta of a forward step. White advances toward row 0.
    #[inline]
    #[must_use]
    pub const fn forward(self) -> i8 {
        -self.sign()
    }

    /// Row a piece of this color is promoted on.
    #[inline]
    #[must_use]
    pub const fn far_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Per-color data storage.
///
/// ## Example
///
/// ```
/// use board_mcts::core::{Color, ColorMap};
///
/// let mut wins: ColorMap<u32> = ColorMap::with_value(0);
/// wins[Color::White] += 1;
/// assert_eq!(wins[Color::White], 1);
/// assert_eq!(wins[Color::Black], 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 2],
}

impl<T> ColorMap<T> {
    /// Create a map from explicit white and black values.
    pub const fn new(white: T, black: T) -> Self {
        Self {
            data: [white, black],
        }
    }

    /// Create a map with values from a factory function.
    pub fn from_fn(factory: impl Fn(Color) -> T) -> Self {
        Self::new(factory(Color::White), factory(Color::Black))
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs, white first.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
