//! Monte Carlo Tree Search over any [`Board`](crate::rules::Board).
//!
//! ## Overview
//!
//! - **UCT selection** with a seeded tie-break draw
//! - **Uniform random rollouts**, capped by `max_rollout_plies`
//! - **Arena tree**: nodes own copy-on-write boards and are addressed by `NodeId`
//! - **Configurable policies**: selection and simulation are trait objects
//!
//! Values are white-perspective (+1 white win, -1 black win, 0 draw), and by
//! default every node maximizes them. With `side_relative_values` each node
//! reads them from the point of view of its side to move instead.
//!
//! ## Usage
//!
//! ```rust
//! use board_mcts::games::CheckersBoard;
//! use board_mcts::mcts::{MCTSConfig, MCTSSearch};
//!
//! let config = MCTSConfig::default().with_seed(7);
//! let mut search = MCTSSearch::new(CheckersBoard::new(), config);
//!
//! let completed = search.search(50).unwrap();
//! assert_eq!(completed, 50);
//!
//! let best = search.best_child(search.root()).unwrap();
//! println!("{}", search.board(best));
//! println!("{}", search.stats());
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use board_mcts::mcts::{MCTSSearch, MCTSConfig};
//!
//! let search = MCTSSearch::new(board, config)
//!     .with_simulation(MyHeuristicRollout);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{ChildStats, RandomRollout, SelectionPolicy, SimulationPolicy, UCT};
pub use search::{IterationOutcome, MCTSSearch};
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
