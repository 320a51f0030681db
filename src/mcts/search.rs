//! Core MCTS search algorithm.
//!
//! One iteration descends from the root by UCT to a leaf, expands it once,
//! picks one fresh child by the same rule, plays a random rollout from a copy
//! of that child's board, and adds the result to every node on the path.

use std::time::{Duration, Instant};

use crate::core::{Color, GameRng, Result};
use crate::rules::{Board, Move};

use super::config::MCTSConfig;
use super::node::{MCTSNode, NodeId};
use super::policy::{
    dead_end_value, ChildStats, RandomRollout, SelectionPolicy, SimulationPolicy, UCT,
};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// What a single `select_action` call did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IterationOutcome {
    /// A value was backpropagated from root to the simulated node.
    Completed { value: f64 },

    /// The root had no children to simulate from; nothing was recorded.
    Aborted,
}

/// Main MCTS search context.
///
/// Generic over the board type. Owns the search tree and configuration,
/// and provides methods to run searches.
pub struct MCTSSearch<B: Board> {
    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree<B>,

    /// RNG for tie-breaks and rollouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<B>>,

    /// Search statistics.
    stats: SearchStats,
}

impl<B: Board> MCTSSearch<B> {
    /// Create a new MCTS search rooted at `board`.
    pub fn new(board: B, config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let capacity = config.max_nodes.min(1 << 16);

        Self {
            tree: MCTSTree::with_capacity(board, capacity),
            config,
            rng,
            selection: Box::new(UCT),
            simulation: Box::new(RandomRollout),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<B> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Discard the tree and statistics and start over from `board`.
    ///
    /// The RNG is reseeded from the config.
    pub fn reset(&mut self, board: B) {
        self.tree.reset(board);
        self.rng = GameRng::new(self.config.seed);
        self.stats.reset();
    }

    /// Run up to `iterations` iterations, stopping early when the tree
    /// reaches `max_nodes`, the time budget runs out, or an iteration aborts.
    ///
    /// Returns the number of completed iterations.
    pub fn search(&mut self, iterations: u32) -> Result<u32> {
        let start = Instant::now();
        let budget = (self.config.time_budget_ms > 0)
            .then(|| Duration::from_millis(self.config.time_budget_ms));
        let mut completed = 0;

        for _ in 0..iterations {
            if self.tree.len() >= self.config.max_nodes {
                break;
            }
            if budget.is_some_and(|limit| start.elapsed() >= limit) {
                break;
            }
            match self.select_action()? {
                IterationOutcome::Completed { .. } => completed += 1,
                IterationOutcome::Aborted => break,
            }
        }

        self.stats.record_elapsed(start.elapsed());
        Ok(completed)
    }

    /// Single MCTS iteration: select, expand, re-select, simulate, backpropagate.
    pub fn select_action(&mut self) -> Result<IterationOutcome> {
        let root = self.tree.root();
        let mut path = vec![root];
        let mut current = root;

        // === SELECTION ===
        while self.tree.get(current).is_expanded() {
            match self.select(current) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }

        // === EXPANSION ===
        let leaf = current;
        if !self.tree.get(leaf).is_expanded() {
            self.expand(leaf)?;
        }

        // === RE-SELECTION ===
        let value = match self.select(leaf) {
            Some(child) => {
                path.push(child);
                self.simulate(child)?
            }
            None if leaf == root => {
                self.stats.record_abort();
                return Ok(IterationOutcome::Aborted);
            }
            None => dead_end_value(&self.tree.get(leaf).board),
        };

        // === BACKPROPAGATION ===
        self.backpropagate(&path, value);
        self.stats.record_iteration();
        Ok(IterationOutcome::Completed { value })
    }

    /// Generate one child per legal move of `node`. Returns the arity.
    ///
    /// Expanding is done at most once per node; terminal nodes stay leaves.
    pub fn expand(&mut self, node: NodeId) -> Result<usize> {
        let parent = self.tree.get(node);
        if parent.is_expanded() || parent.is_terminal {
            return Ok(parent.arity());
        }
        let depth = parent.depth + 1;

        let moves = self.tree.get_mut(node).board.all_moves()?;
        let base = self.tree.get(node).board.clone();

        let mut children = Vec::with_capacity(moves.len());
        for mv in moves {
            let mut board = base.clone();
            board.apply_move_unchecked(mv)?;
            children.push(self.tree.alloc(MCTSNode::new(node, board, Some(mv), depth)));
        }

        let arity = children.len();
        self.tree.get_mut(node).children = Some(children);
        self.stats.record_expansion(depth);
        Ok(arity)
    }

    /// UCT choice among the children of `node`, or `None` if it has none.
    pub fn select(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.tree.get(node);
        let sign = if self.config.side_relative_values {
            f64::from(parent.to_move().sign())
        } else {
            1.0
        };
        let stats: Vec<ChildStats> = parent
            .children()
            .iter()
            .map(|&child| {
                let child = self.tree.get(child);
                ChildStats {
                    visits: child.visits,
                    total_value: child.total_value,
                }
            })
            .collect();

        let index = self
            .selection
            .select(parent.visits, sign, &stats, &self.config, &mut self.rng)?;
        parent.children().get(index).copied()
    }

    /// Roll out from a copy of `node`'s board. The stored board is untouched.
    pub fn simulate(&mut self, node: NodeId) -> Result<f64> {
        let mut board = self.tree.get(node).board.clone();
        let mut rng = self.rng.fork();
        let value = self.simulation.simulate(&mut board, &mut rng, &self.config)?;
        self.stats.record_simulation();
        Ok(value)
    }

    /// Add `value` to every node on `path`.
    pub fn backpropagate(&mut self, path: &[NodeId], value: f64) {
        for &id in path {
            self.tree.get_mut(id).update(value);
        }
    }

    // === Queries ===

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Root-side win percentage of `node`.
    #[must_use]
    pub fn win_percentage(&self, node: NodeId) -> f64 {
        self.tree.win_percentage(node)
    }

    /// Child of `node` with the highest win percentage.
    #[must_use]
    pub fn best_child(&self, node: NodeId) -> Option<NodeId> {
        self.tree.best_child(node)
    }

    /// The move leading to the best child of the root.
    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best_child(self.root()).and_then(|child| self.tree.get(child).mv)
    }

    #[must_use]
    pub fn arity(&self, node: NodeId) -> usize {
        self.tree.arity(node)
    }

    /// The `index`-th child of `node`.
    pub fn child(&self, node: NodeId, index: usize) -> Result<NodeId> {
        self.tree.child(node, index)
    }

    #[must_use]
    pub fn board(&self, node: NodeId) -> &B {
        &self.tree.get(node).board
    }

    #[must_use]
    pub fn visits(&self, node: NodeId) -> u32 {
        self.tree.get(node).visits
    }

    #[must_use]
    pub fn wins(&self, node: NodeId, color: Color) -> u32 {
        self.tree.get(node).wins[color]
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree<B> {
        &self.tree
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square;
    use crate::games::CheckersBoard;
    use crate::pieces::{Piece, PieceKind};

    fn sq(label: &str) -> Square {
        Square::parse(label).unwrap()
    }

    fn man(color: Color) -> Piece {
        Piece::new(color, PieceKind::CheckerMan)
    }

    /// Always scores a white win.
    struct WhiteAlwaysWins;

    impl<B: Board> SimulationPolicy<B> for WhiteAlwaysWins {
        fn simulate(&self, _board: &mut B, _rng: &mut GameRng, _config: &MCTSConfig) -> Result<f64> {
            Ok(1.0)
        }
    }

    #[test]
    fn test_expand_creates_one_child_per_move() {
        let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
        let root = search.root();

        assert_eq!(search.expand(root).unwrap(), 7);
        assert_eq!(search.arity(root), 7);
        assert_eq!(search.stats().nodes_expanded, 1);

        // Expanding again is a no-op.
        assert_eq!(search.expand(root).unwrap(), 7);
        assert_eq!(search.tree().len(), 8);
    }

    #[test]
    fn test_select_unexpanded_is_none() {
        let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
        let root = search.root();
        assert_eq!(search.select(root), None);
    }

    #[test]
    fn test_single_child_always_selected() {
        let mut board = CheckersBoard::empty();
        board.place_piece(sq("d4"), man(Color::White));
        board.place_piece(sq("e5"), man(Color::Black));
        board.place_piece(sq("a7"), man(Color::Black));

        let mut search = MCTSSearch::new(board, MCTSConfig::default());
        let root = search.root();
        assert_eq!(search.expand(root).unwrap(), 1);
        let only = search.child(root, 0).unwrap();
        for _ in 0..5 {
            assert_eq!(search.select(root), Some(only));
            search.backpropagate(&[root, only], -1.0);
        }
    }

    /// Black to move with two man moves; white has a far-off man.
    fn two_move_black_board() -> CheckersBoard {
        let mut board = CheckersBoard::empty().with_current_player(Color::Black);
        board.place_piece(sq("b6"), man(Color::Black));
        board.place_piece(sq("h2"), man(Color::White));
        board
    }

    /// Give the two children of the root equal visits and opposite totals.
    fn seeded_totals(config: MCTSConfig) -> (MCTSSearch<CheckersBoard>, NodeId, NodeId) {
        let mut search = MCTSSearch::new(two_move_black_board(), config);
        let root = search.root();
        assert_eq!(search.expand(root).unwrap(), 2);
        let plus = search.child(root, 0).unwrap();
        let minus = search.child(root, 1).unwrap();
        for _ in 0..50 {
            search.backpropagate(&[root, plus], 1.0);
            search.backpropagate(&[root, minus], -1.0);
        }
        (search, plus, minus)
    }

    #[test]
    fn test_default_selection_maximizes_white_value() {
        let (mut search, plus, _) = seeded_totals(MCTSConfig::default());
        let root = search.root();
        assert_eq!(search.tree().get(root).to_move(), Color::Black);
        assert_eq!(search.select(root), Some(plus));
    }

    #[test]
    fn test_side_relative_selection_follows_mover() {
        let config = MCTSConfig::default().with_side_relative_values(true);
        let (mut search, _, minus) = seeded_totals(config);
        let root = search.root();
        assert_eq!(search.select(root), Some(minus));
    }

    #[test]
    fn test_one_win_gives_one_over_visits() {
        let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default())
            .with_simulation(WhiteAlwaysWins);
        let root = search.root();
        assert_eq!(search.win_percentage(root), 0.0);

        let outcome = search.select_action().unwrap();
        assert_eq!(outcome, IterationOutcome::Completed { value: 1.0 });
        assert_eq!(search.visits(root), 1);
        assert_eq!(search.wins(root, Color::White), 1);
        assert_eq!(search.win_percentage(root), 1.0 / search.visits(root) as f64);
    }

    #[test]
    fn test_iteration_updates_path_only() {
        let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
        let root = search.root();
        search.select_action().unwrap();

        let visited: Vec<NodeId> = (0..search.arity(root))
            .map(|i| search.child(root, i).unwrap())
            .filter(|&child| search.visits(child) > 0)
            .collect();
        assert_eq!(search.visits(root), 1);
        assert_eq!(visited.len(), 1);
        assert_eq!(search.stats().simulations, 1);
    }

    #[test]
    fn test_terminal_root_aborts() {
        let mut board = CheckersBoard::empty();
        board.place_piece(sq("d4"), man(Color::White));

        let mut search = MCTSSearch::new(board, MCTSConfig::default());
        let root = search.root();
        assert_eq!(search.select_action().unwrap(), IterationOutcome::Aborted);
        assert_eq!(search.arity(root), 0);
        assert_eq!(search.visits(root), 0);
        assert_eq!(search.stats().iterations, 0);
        assert_eq!(search.stats().aborted, 1);
        assert_eq!(search.search(10).unwrap(), 0);
    }

    #[test]
    fn test_stuck_child_scored_statically() {
        // The black man on its far row can never move, so every white move
        // leaves black stuck.
        let mut board = CheckersBoard::empty();
        board.place_piece(sq("a1"), man(Color::Black));
        board.place_piece(sq("h4"), man(Color::White));
        board.place_piece(sq("a5"), man(Color::White));
        board.place_piece(sq("b4"), man(Color::White));

        let mut search = MCTSSearch::new(board, MCTSConfig::default());
        search.search(20).unwrap();
        assert!(search.stats().iterations > 0);
        assert_eq!(search.visits(search.root()), search.stats().iterations);
    }

    #[test]
    fn test_search_respects_node_budget() {
        let config = MCTSConfig::default().with_max_nodes(20);
        let mut search = MCTSSearch::new(CheckersBoard::new(), config);
        search.search(1_000).unwrap();
        assert!(search.stats().iterations < 1_000);
        assert!(search.tree().len() >= 20);
    }

    #[test]
    fn test_reset() {
        let mut search = MCTSSearch::new(CheckersBoard::new(), MCTSConfig::default());
        search.search(5).unwrap();
        search.reset(CheckersBoard::new().with_current_player(Color::Black));
        assert_eq!(search.tree().len(), 1);
        assert_eq!(search.stats().iterations, 0);
        assert_eq!(search.tree().perspective(), Color::Black);
    }
}
