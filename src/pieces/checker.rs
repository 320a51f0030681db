//! Checker move generation.
//!
//! A man steps one square diagonally forward onto an empty square, or jumps
//! two squares diagonally forward over an adjacent enemy piece onto an empty
//! landing square. A king does the same along all four diagonals.
//!
//! Removal of the jumped piece and promotion happen when the board applies
//! the move. Multi-jump chaining is not generated.

use smallvec::SmallVec;

use crate::core::{Color, Square};
use crate::rules::{Board, Destinations};

const ALL_DIAGONALS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

fn forward_diagonals(color: Color) -> [(i8, i8); 2] {
    let dr = color.forward();
    [(-1, dr), (1, dr)]
}

fn steps<B: Board>(board: &B, origin: Square, directions: &[(i8, i8)]) -> Destinations {
    directions
        .iter()
        .filter_map(|&(dc, dr)| origin.try_shift(dc, dr))
        .filter(|sq| board.is_empty_square(*sq))
        .collect()
}

fn jumps<B: Board>(board: &B, origin: Square, color: Color, directions: &[(i8, i8)]) -> Destinations {
    let mut out = SmallVec::new();
    for &(dc, dr) in directions {
        let (Some(over), Some(landing)) = (origin.try_shift(dc, dr), origin.try_shift(2 * dc, 2 * dr))
        else {
            continue;
        };
        let enemy_between = board.piece_at(over).is_some_and(|p| p.color != color);
        if enemy_between && board.is_empty_square(landing) {
            out.push(landing);
        }
    }
    out
}

/// Steps then jumps toward the far edge.
pub fn man_destinations<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    let directions = forward_diagonals(color);
    let mut out = steps(board, origin, &directions);
    out.extend(jumps(board, origin, color, &directions));
    out
}

/// Forward jumps only.
pub fn man_captures<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    jumps(board, origin, color, &forward_diagonals(color))
}

/// Steps then jumps along all four diagonals.
pub fn king_destinations<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    let mut out = steps(board, origin, &ALL_DIAGONALS);
    out.extend(jumps(board, origin, color, &ALL_DIAGONALS));
    out
}

pub fn king_captures<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    jumps(board, origin, color, &ALL_DIAGONALS)
}
