//! Monte Carlo Tree Search with UCB1 selection and random rollouts
//!
//! Every decision builds a fresh tree rooted at the real position and runs a
//! fixed number of simulations. Each simulation has four phases:
//!
//! 1. **Selection**: descend through fully expanded nodes by UCB1
//! 2. **Expansion**: add one child for an untried move
//! 3. **Rollout**: play uniformly random moves to a terminal state
//! 4. **Backpropagation**: credit the result along the path, flipping sides
//!    at every level
//!
//! The move played is the root child with the most visits. Nodes live in an
//! arena ([`MctsTree`]) and refer to each other by [`NodeId`], so parent links
//! are plain indices rather than owning pointers.

pub mod agent;
pub mod config;
pub mod node;
pub mod search;
pub mod tree;

pub use agent::MctsAgent;
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use search::{MctsSearch, SearchResult};
pub use tree::MctsTree;
