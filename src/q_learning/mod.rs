//! Tabular Q-learning
//!
//! The learner keeps a [`QTable`] of `(state, move) -> value` estimates and
//! plays epsilon-greedily while training. After each game the terminal reward
//! is propagated backwards through the moves it made:
//!
//! ```text
//! last move:    Q(s,a) ← Q(s,a) + α[r - Q(s,a)]
//! earlier move: Q(s,a) ← Q(s,a) + α[γ Q(s',a') - Q(s,a)]
//! ```
//!
//! where `(s', a')` is the learner's own next decision in the same game.
//! States are stored from the learner's point of view
//! ([`PerspectiveState`]), so one table is shared by the X and O seats.
//!
//! ## Usage Example
//!
//! ```
//! use tictactoe_agents::{
//!     ports::Agent,
//!     q_learning::{QLearningAgent, QLearningConfig},
//!     tictactoe::BoardState,
//! };
//!
//! let config = QLearningConfig::default().with_seed(1);
//! let mut agent = QLearningAgent::new(config).unwrap();
//! agent.set_training(true);
//!
//! let mv = agent.decide(&BoardState::new()).unwrap();
//! assert!(mv < 9);
//! agent.observe_outcome(1.0).unwrap();
//! assert_eq!(agent.table().len(), 1);
//! ```

pub mod agent;
pub mod perspective;
pub mod q_table;
pub mod serialization;

pub use agent::{QLearningAgent, QLearningConfig};
pub use perspective::PerspectiveState;
pub use q_table::{QEntry, QTable};
pub use serialization::{SavedQTable, TrainingMetadata};
