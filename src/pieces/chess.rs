//! Chess move generation (pseudo-legal).
//!
//! Sliding pieces walk each ray one square at a time, collecting empty
//! squares, stopping on and including an enemy piece, stopping before a
//! friendly one. Knights and kings test fixed offsets independently.
//! Castling is not generated.

use smallvec::SmallVec;

use crate::core::{Color, Square};
use crate::rules::{Board, Destinations};

pub const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (-1, -1), (-1, 1), (1, -1)];
pub const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const ALL_RAYS: [(i8, i8); 8] = [
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (1, -2),
    (-1, -2),
    (1, 2),
    (-1, 2),
];

/// Row a pawn of `color` may double-step from.
#[must_use]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row an en-passant target square sits on when `color` captures onto it.
const fn en_passant_row(color: Color) -> u8 {
    match color {
        Color::White => 2,
        Color::Black => 5,
    }
}

fn open_or_enemy<B: Board>(board: &B, square: Square, color: Color) -> bool {
    board.piece_at(square).map_or(true, |p| p.color != color)
}

/// Walk every ray in `rays` from `origin`.
pub fn slide<B: Board>(board: &B, origin: Square, color: Color, rays: &[(i8, i8)]) -> Destinations {
    let mut out = SmallVec::new();
    for &(dc, dr) in rays {
        let mut current = origin;
        while let Some(next) = current.try_shift(dc, dr) {
            match board.piece_at(next) {
                None => out.push(next),
                Some(piece) => {
                    if piece.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    out
}

pub fn knight_destinations<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dc, dr)| origin.try_shift(dc, dr))
        .filter(|sq| open_or_enemy(board, *sq, color))
        .collect()
}

/// One square in any direction.
pub fn king_destinations<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    ALL_RAYS
        .iter()
        .filter_map(|&(dc, dr)| origin.try_shift(dc, dr))
        .filter(|sq| open_or_enemy(board, *sq, color))
        .collect()
}

/// Single step, double step from the start row, then diagonal captures.
pub fn pawn_destinations<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    let forward = color.forward();
    let mut out = SmallVec::new();

    if let Some(one) = origin.try_shift(0, forward) {
        if board.is_empty_square(one) {
            out.push(one);
            if origin.row() == pawn_start_row(color) {
                if let Some(two) = origin.try_shift(0, 2 * forward) {
                    if board.is_empty_square(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    out.extend(pawn_captures(board, origin, color));
    out
}

/// Diagonal captures onto an enemy piece or onto the en-passant target.
pub fn pawn_captures<B: Board>(board: &B, origin: Square, color: Color) -> Destinations {
    let en_passant = board
        .en_passant_target()
        .filter(|target| target.row() == en_passant_row(color));

    pawn_attacks(origin, color)
        .into_iter()
        .filter(|sq| {
            board.piece_at(*sq).is_some_and(|p| p.color != color) || en_passant == Some(*sq)
        })
        .collect()
}

/// The two diagonal squares a pawn threatens, regardless of occupancy.
#[must_use]
pub fn pawn_attacks(origin: Square, color: Color) -> Destinations {
    let forward = color.forward();
    [(-1, forward), (1, forward)]
        .iter()
        .filter_map(|&(dc, dr)| origin.try_shift(dc, dr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::ChessBoard;
    use crate::pieces::{Piece, PieceKind};

    fn sq(label: &str) -> Square {
        Square::parse(label).unwrap()
    }

    fn labels(dests: &Destinations) -> Vec<String> {
        let mut out: Vec<String> = dests.iter().map(|s| s.to_string()).collect();
        out.sort();
        out
    }

    fn board_with(pieces: &[(&str, Color, PieceKind)]) -> ChessBoard {
        let mut board = ChessBoard::empty();
        for &(label, color, kind) in pieces {
            board.place_piece(sq(label), Piece::new(color, kind));
        }
        board
    }

    #[test]
    fn test_rook_rays_stop_at_pieces() {
        let board = board_with(&[
            ("d4", Color::White, PieceKind::Rook),
            ("d6", Color::Black, PieceKind::Pawn),
            ("f4", Color::White, PieceKind::Pawn),
        ]);
        let dests = slide(&board, sq("d4"), Color::White, &ORTHOGONAL_RAYS);
        assert_eq!(
            labels(&dests),
            vec!["a4", "b4", "c4", "d1", "d2", "d3", "d5", "d6", "e4"]
        );
    }

    #[test]
    fn test_bishop_corner() {
        let board = board_with(&[("a1", Color::White, PieceKind::Bishop)]);
        let dests = slide(&board, sq("a1"), Color::White, &DIAGONAL_RAYS);
        assert_eq!(labels(&dests), vec!["b2", "c3", "d4", "e5", "f6", "g7", "h8"]);
    }

    #[test]
    fn test_queen_open_board() {
        let board = board_with(&[("d4", Color::White, PieceKind::Queen)]);
        assert_eq!(slide(&board, sq("d4"), Color::White, &ALL_RAYS).len(), 27);
    }

    #[test]
    fn test_knight_corner_and_center() {
        let board = board_with(&[("a1", Color::White, PieceKind::Knight)]);
        assert_eq!(labels(&knight_destinations(&board, sq("a1"), Color::White)), vec!["b3", "c2"]);

        let board = board_with(&[
            ("d4", Color::White, PieceKind::Knight),
            ("e6", Color::White, PieceKind::Pawn),
            ("c6", Color::Black, PieceKind::Pawn),
        ]);
        let dests = knight_destinations(&board, sq("d4"), Color::White);
        assert_eq!(dests.len(), 7);
        assert!(dests.contains(&sq("c6")));
        assert!(!dests.contains(&sq("e6")));
    }

    #[test]
    fn test_king_one_step() {
        let board = board_with(&[("e1", Color::White, PieceKind::King)]);
        assert_eq!(
            labels(&king_destinations(&board, sq("e1"), Color::White)),
            vec!["d1", "d2", "e2", "f1", "f2"]
        );
    }

    #[test]
    fn test_pawn_double_step_from_start() {
        let board = board_with(&[("e2", Color::White, PieceKind::Pawn)]);
        assert_eq!(labels(&pawn_destinations(&board, sq("e2"), Color::White)), vec!["e3", "e4"]);

        let board = board_with(&[("e7", Color::Black, PieceKind::Pawn)]);
        assert_eq!(labels(&pawn_destinations(&board, sq("e7"), Color::Black)), vec!["e5", "e6"]);
    }

    #[test]
    fn test_pawn_blocked() {
        let board = board_with(&[
            ("e2", Color::White, PieceKind::Pawn),
            ("e3", Color::Black, PieceKind::Knight),
        ]);
        assert!(pawn_destinations(&board, sq("e2"), Color::White).is_empty());

        let board = board_with(&[
            ("e2", Color::White, PieceKind::Pawn),
            ("e4", Color::Black, PieceKind::Knight),
        ]);
        assert_eq!(labels(&pawn_destinations(&board, sq("e2"), Color::White)), vec!["e3"]);
    }

    #[test]
    fn test_pawn_diagonal_captures() {
        let board = board_with(&[
            ("e4", Color::White, PieceKind::Pawn),
            ("d5", Color::Black, PieceKind::Pawn),
            ("f5", Color::White, PieceKind::Pawn),
        ]);
        assert_eq!(labels(&pawn_captures(&board, sq("e4"), Color::White)), vec!["d5"]);
        assert_eq!(labels(&pawn_destinations(&board, sq("e4"), Color::White)), vec!["d5", "e5"]);
    }

    #[test]
    fn test_pawn_attacks_ignore_occupancy() {
        assert_eq!(labels(&pawn_attacks(sq("a2"), Color::White)), vec!["b3"]);
        assert_eq!(labels(&pawn_attacks(sq("d7"), Color::Black)), vec!["c6", "e6"]);
    }
}
