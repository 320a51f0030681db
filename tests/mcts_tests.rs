//! MCTS integration tests over the checkers and chess boards.

use std::collections::HashSet;

use board_mcts::core::{Color, Error, GameRng, Result, Square};
use board_mcts::games::{CheckersBoard, ChessBoard};
use board_mcts::mcts::{IterationOutcome, MCTSConfig, MCTSSearch, SimulationPolicy};
use board_mcts::pieces::{Piece, PieceKind};
use board_mcts::rules::Board;

fn sq(label: &str) -> Square {
    Square::parse(label).unwrap()
}

/// Scores every rollout as a black win.
struct BlackAlwaysWins;

impl<B: Board> SimulationPolicy<B> for BlackAlwaysWins {
    fn simulate(&self, _board: &mut B, _rng: &mut GameRng, _config: &MCTSConfig) -> Result<f64> {
        Ok(-1.0)
    }
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_search_returns_legal_move() {
    let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
    assert_eq!(search.search(100).unwrap(), 100);

    let mv = search.best_move().expect("search should pick a move");
    let mut board = CheckersBoard::new();
    assert!(board.all_moves().unwrap().contains(&mv));
}

#[test]
fn test_stats_track_iterations() {
    let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
    search.search(50).unwrap();

    let stats = search.stats();
    assert_eq!(stats.iterations, 50);
    assert_eq!(stats.simulations, 50);
    assert_eq!(stats.aborted, 0);
    assert!(stats.nodes_expanded > 0);
    assert_eq!(search.visits(search.root()), 50);

    let tree_stats = search.tree().stats();
    assert!(tree_stats.node_count > 1);
    assert!(tree_stats.max_depth > 0);
}

#[test]
fn test_child_visits_sum_to_root_visits() {
    let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
    search.search(80).unwrap();

    let root = search.root();
    let total: u32 = (0..search.arity(root))
        .map(|i| search.visits(search.child(root, i).unwrap()))
        .sum();
    assert_eq!(total, search.visits(root));
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_deterministic_with_seed() {
    let config = MCTSConfig::default().with_seed(12345);

    let mut search1 = MCTSSearch::new(CheckersBoard::new(), config.clone());
    let mut search2 = MCTSSearch::new(CheckersBoard::new(), config);
    search1.search(100).unwrap();
    search2.search(100).unwrap();

    assert_eq!(search1.best_move(), search2.best_move());
    assert_eq!(search1.tree().len(), search2.tree().len());
    let root = search1.root();
    for i in 0..search1.arity(root) {
        let a = search1.child(root, i).unwrap();
        let b = search2.child(root, i).unwrap();
        assert_eq!(search1.visits(a), search2.visits(b));
        assert_eq!(search1.wins(a, Color::White), search2.wins(b, Color::White));
    }
}

// =============================================================================
// Expansion
// =============================================================================

#[test]
fn test_expand_children_are_distinct_single_moves() {
    let mut search = MCTSSearch::new(ChessBoard::new(), MCTSConfig::default());
    let root = search.root();
    let parent_render = search.board(root).render();

    let arity = search.expand(root).unwrap();
    assert_eq!(arity, 20);
    assert_eq!(search.arity(root), 20);
    assert_eq!(search.board(root).render(), parent_render);

    let mut seen = HashSet::new();
    for i in 0..arity {
        let child = search.child(root, i).unwrap();
        let node = search.tree().get(child);
        let mv = node.mv.unwrap();
        let board = search.board(child);

        assert!(board.piece_at(mv.from).is_none());
        assert_eq!(board.piece_at(mv.to), search.board(root).piece_at(mv.from));
        assert_eq!(board.current_player(), Color::Black);
        assert!(seen.insert(board.render()));
    }
    assert_eq!(
        search.child(root, arity),
        Err(Error::IndexOutOfRange { index: 20, len: 20 })
    );
}

#[test]
fn test_children_do_not_share_mutations() {
    let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
    let root = search.root();
    search.expand(root).unwrap();
    let first = search.child(root, 0).unwrap();
    let second = search.child(root, 1).unwrap();

    search.expand(first).unwrap();
    let grandchild = search.child(first, 0).unwrap();

    assert_ne!(search.board(first).render(), search.board(second).render());
    assert_ne!(search.board(first).render(), search.board(grandchild).render());
    assert_eq!(search.board(root).render(), CheckersBoard::new().render());
}

// =============================================================================
// Win Percentage
// =============================================================================

#[test]
fn test_win_percentage_zero_then_one_over_visits() {
    let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
    let root = search.root();
    assert_eq!(search.win_percentage(root), 0.0);

    search.expand(root).unwrap();
    let child = search.child(root, 0).unwrap();
    search.backpropagate(&[root, child], 0.0);
    search.backpropagate(&[root, child], 1.0);

    assert_eq!(search.visits(root), 2);
    assert_eq!(search.win_percentage(root), 1.0 / 2.0);
}

#[test]
fn test_win_percentage_uses_root_color() {
    let board = CheckersBoard::new().with_current_player(Color::Black);
    let mut search = MCTSSearch::new(board, MCTSConfig::default()).with_simulation(BlackAlwaysWins);
    search.search(10).unwrap();

    let root = search.root();
    assert_eq!(search.win_percentage(root), 1.0);
    assert_eq!(search.wins(root, Color::Black), 10);
    assert_eq!(search.wins(root, Color::White), 0);
}

// =============================================================================
// Dead Ends
// =============================================================================

#[test]
fn test_select_action_on_terminal_board() {
    let mut board = CheckersBoard::empty();
    board.place_piece(sq("c3"), Piece::new(Color::White, PieceKind::CheckerMan));
    assert!(board.is_finished());

    let mut search = MCTSSearch::new(board, MCTSConfig::default());
    let root = search.root();
    assert_eq!(search.select_action().unwrap(), IterationOutcome::Aborted);
    assert_eq!(search.arity(root), 0);
    assert_eq!(search.visits(root), 0);
    assert_eq!(search.win_percentage(root), 0.0);
    assert_eq!(search.best_child(root), None);
}

#[test]
fn test_select_action_on_stuck_board() {
    // Black to move with its only man boxed in by white men.
    let mut board = CheckersBoard::empty().with_current_player(Color::Black);
    board.place_piece(sq("b2"), Piece::new(Color::Black, PieceKind::CheckerMan));
    board.place_piece(sq("h8"), Piece::new(Color::White, PieceKind::CheckerMan));
    board.place_piece(sq("b1"), Piece::new(Color::White, PieceKind::CheckerMan));
    board.place_piece(sq("a1"), Piece::new(Color::White, PieceKind::CheckerMan));
    board.place_piece(sq("c1"), Piece::new(Color::White, PieceKind::CheckerMan));

    let mut search = MCTSSearch::new(board, MCTSConfig::default());
    let outcome = search.select_action().unwrap();
    assert_eq!(outcome, IterationOutcome::Aborted);
    assert_eq!(search.visits(search.root()), 0);
    assert_eq!(search.stats().aborted, 1);
}

// =============================================================================
// Budgets
// =============================================================================

#[test]
fn test_time_budget_stops_search() {
    let config = MCTSConfig::default()
        .with_time_budget_ms(1)
        .with_max_rollout_plies(50);
    let mut search = MCTSSearch::new(ChessBoard::new(), config);
    let completed = search.search(u32::MAX).unwrap();
    assert!(completed < u32::MAX);
    assert_eq!(search.stats().iterations, completed);
}

#[test]
fn test_side_relative_values_still_search() {
    let config = MCTSConfig::default().with_side_relative_values(true);
    let mut search = MCTSSearch::new(CheckersBoard::new(), config);
    assert_eq!(search.search(40).unwrap(), 40);
    assert!(search.best_move().is_some());
}
