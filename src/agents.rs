//! Stateless and baseline agents
//!
//! - [`RandomAgent`]: uniformly random legal move
//! - [`HeuristicAgent`]: fixed rule cascade (win, block, center, corner, edge)
//!
//! The search-based and learning agents live in [`crate::minimax`],
//! [`crate::mcts`] and [`crate::q_learning`].

pub mod heuristic;
pub mod random;

pub use heuristic::HeuristicAgent;
pub use random::RandomAgent;
