//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCT)
//! - `SimulationPolicy`: How to run rollouts (uniform random)

use crate::core::{GameRng, Result};
use crate::rules::Board;

use super::config::MCTSConfig;

// =============================================================================
// Selection Policy
// =============================================================================

/// The statistics selection reads from one child.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChildStats {
    pub visits: u32,

    /// Sum of white-perspective rollout values.
    pub total_value: f64,
}

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child index, or `None` when `children` is empty.
    ///
    /// `sign` is +1.0 when the parent maximizes the white value and -1.0
    /// when it minimizes it.
    fn select(
        &self,
        parent_visits: u32,
        sign: f64,
        children: &[ChildStats],
        config: &MCTSConfig,
        rng: &mut GameRng,
    ) -> Option<usize>;
}

/// UCT (Upper Confidence bound applied to Trees) selection policy.
///
/// Formula: sign * W/(n+ε) + c * sqrt(ln(N+1)/(n+ε)) + U*ε, where U is a
/// fresh uniform draw that only breaks exact ties.
#[derive(Clone, Debug, Default)]
pub struct UCT;

impl UCT {
    /// The score of one child. Always finite.
    #[must_use]
    pub fn score(
        parent_visits: u32,
        sign: f64,
        child: ChildStats,
        config: &MCTSConfig,
        tie_break: f64,
    ) -> f64 {
        let eps = config.epsilon;
        let visits = child.visits as f64 + eps;
        let exploitation = sign * child.total_value / visits;
        let exploration = config.exploration_constant
            * ((parent_visits as f64 + 1.0).ln() / visits).sqrt();
        exploitation + exploration + tie_break * eps
    }
}

impl SelectionPolicy for UCT {
    fn select(
        &self,
        parent_visits: u32,
        sign: f64,
        children: &[ChildStats],
        config: &MCTSConfig,
        rng: &mut GameRng,
    ) -> Option<usize> {
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for (i, child) in children.iter().enumerate() {
            let score = Self::score(parent_visits, sign, *child, config, rng.gen_f64());
            if score > best_score {
                best = Some(i);
                best_score = score;
            }
        }
        best
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<B: Board>: Send + Sync {
    /// Play out `board` and return the white-perspective value in [-1, 1].
    ///
    /// The board is modified during simulation; callers pass a copy.
    fn simulate(&self, board: &mut B, rng: &mut GameRng, config: &MCTSConfig) -> Result<f64>;
}

/// Random rollout policy.
///
/// Plays uniformly random legal moves until the game is finished, the side to
/// move is stuck, or `max_rollout_plies` is reached (scored as a draw).
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl<B: Board> SimulationPolicy<B> for RandomRollout {
    fn simulate(&self, board: &mut B, rng: &mut GameRng, config: &MCTSConfig) -> Result<f64> {
        let mut plies = 0;
        loop {
            if board.is_finished() {
                return Ok(board.result().value());
            }

            if config.max_rollout_plies > 0 && plies >= config.max_rollout_plies {
                return Ok(0.0);
            }

            let count = board.num_legal_moves()?;
            if count == 0 {
                return Ok(dead_end_value(board));
            }

            board.apply_move_index(rng.gen_range_usize(0..count))?;
            plies += 1;
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Static value of a position with no continuation: the result if finished,
/// otherwise a loss for the side to move.
pub fn dead_end_value<B: Board>(board: &B) -> f64 {
    if board.is_finished() {
        board.result().value()
    } else {
        -f64::from(board.current_player().sign())
    }
}
