//! Tabular Q-learning agent
//!
//! Values are updated once per game by walking the recorded trajectory
//! backwards, so the final reward reaches earlier moves through the
//! discounted value of the move that followed them.

use std::mem;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Error, Result,
    error::ensure_unit_interval,
    ports::{Agent, playable_moves},
    q_learning::{perspective::PerspectiveState, q_table::QTable},
    tictactoe::BoardState,
};

/// Hyper-parameters of a [`QLearningAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// α, step size of each update
    pub learning_rate: f64,
    /// γ, weight of the following move's value
    pub discount_factor: f64,
    /// ε, probability of a random move while training
    pub epsilon: f64,
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 0.1,
            seed: None,
        }
    }
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any rate lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        ensure_unit_interval("learning_rate", self.learning_rate)?;
        ensure_unit_interval("discount_factor", self.discount_factor)?;
        ensure_unit_interval("epsilon", self.epsilon)
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Epsilon-greedy learner over a [`QTable`]
///
/// The agent plays whichever side is to move and always looks at the board
/// through [`PerspectiveState`], so a single table covers both seats.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    name: String,
    config: QLearningConfig,
    table: QTable,
    history: Vec<(PerspectiveState, usize)>,
    training: bool,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent with an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the config is invalid.
    pub fn new(config: QLearningConfig) -> Result<Self> {
        Self::with_table(config, QTable::new())
    }

    /// Create an agent that takes ownership of an existing table.
    pub fn with_table(config: QLearningConfig, table: QTable) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: "Q-Learning".to_string(),
            config,
            table,
            history: Vec::new(),
            training: false,
            rng: build_rng(config.seed),
        })
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Hand the table back to the caller, leaving an empty one behind.
    pub fn take_table(&mut self) -> QTable {
        mem::take(&mut self.table)
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `epsilon` lies outside `[0, 1]`.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        ensure_unit_interval("epsilon", epsilon)?;
        self.config.epsilon = epsilon;
        Ok(())
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Moves recorded since the last call to [`learn`](Self::learn).
    pub fn history(&self) -> &[(PerspectiveState, usize)] {
        &self.history
    }

    /// Pick a move; in training mode explore with probability ε and record
    /// the choice for the next [`learn`](Self::learn).
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] on a finished game.
    pub fn decide_with(&mut self, state: &BoardState, training: bool) -> Result<usize> {
        let moves = playable_moves(state)?;
        let key = PerspectiveState::from_board(state);

        let mv = if training && self.rng.random::<f64>() < self.config.epsilon {
            *moves.choose(&mut self.rng).ok_or(Error::EmptyMoveSet)?
        } else {
            let best = self.table.best_actions(&key, &moves);
            *best.choose(&mut self.rng).ok_or(Error::EmptyMoveSet)?
        };

        if training {
            self.history.push((key, mv));
        }
        Ok(mv)
    }

    /// Propagate the game's final reward backwards through the history.
    ///
    /// The last move is pulled towards `final_reward`; every earlier move
    /// towards `γ · Q(next state, next move)`. The history is cleared.
    pub fn learn(&mut self, final_reward: f64) {
        let history = mem::take(&mut self.history);
        let QLearningConfig {
            learning_rate,
            discount_factor,
            ..
        } = self.config;

        let mut next: Option<(PerspectiveState, usize)> = None;
        for &(state, action) in history.iter().rev() {
            let target = match next {
                None => final_reward,
                Some((next_state, next_action)) => {
                    discount_factor * self.table.get(&next_state, next_action)
                }
            };
            self.table
                .update_towards(state, action, target, learning_rate);
            next = Some((state, action));
        }

        trace!(
            steps = history.len(),
            final_reward,
            table_size = self.table.len(),
            "Q-learning update"
        );
    }
}

impl Agent for QLearningAgent {
    fn decide(&mut self, state: &BoardState) -> Result<usize> {
        self.decide_with(state, self.training)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn observe_outcome(&mut self, reward: f64) -> Result<()> {
        self.learn(reward);
        Ok(())
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
        if !training {
            self.history.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: QLearningConfig) -> QLearningAgent {
        QLearningAgent::new(config.with_seed(42)).unwrap()
    }

    #[test]
    fn defaults() {
        let config = QLearningConfig::default();
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.epsilon, 0.1);
    }

    #[test]
    fn rejects_rates_outside_unit_interval() {
        let bad = QLearningConfig::default().with_learning_rate(1.5);
        assert!(matches!(
            QLearningAgent::new(bad),
            Err(Error::InvalidConfiguration { .. })
        ));
        let mut agent = seeded(QLearningConfig::default());
        assert!(agent.set_epsilon(-0.1).is_err());
        assert_eq!(agent.epsilon(), 0.1);
    }

    #[test]
    fn greedy_picks_highest_value() {
        let mut agent = seeded(QLearningConfig::default());
        let state = BoardState::new();
        let key = PerspectiveState::from_board(&state);
        let mut table = agent.take_table();
        table.set(key, 6, 0.7);
        table.set(key, 4, 0.2);
        agent = QLearningAgent::with_table(*agent.config(), table).unwrap();

        for _ in 0..20 {
            assert_eq!(agent.decide_with(&state, false).unwrap(), 6);
        }
        assert!(agent.history().is_empty());
    }

    #[test]
    fn ties_are_broken_among_tied_moves_only() {
        let mut agent = seeded(QLearningConfig::default());
        let state = BoardState::new();
        let key = PerspectiveState::from_board(&state);
        let mut table = QTable::new();
        table.set(key, 0, 0.5);
        table.set(key, 8, 0.5);
        for other in [1, 2, 3, 4, 5, 6, 7] {
            table.set(key, other, -0.5);
        }
        agent = QLearningAgent::with_table(*agent.config(), table).unwrap();

        let mut seen = Vec::new();
        for _ in 0..50 {
            let mv = agent.decide_with(&state, false).unwrap();
            assert!(mv == 0 || mv == 8);
            seen.push(mv);
        }
        assert!(seen.contains(&0) && seen.contains(&8));
    }

    #[test]
    fn training_records_history() {
        let mut agent = seeded(QLearningConfig::default());
        let state = BoardState::new();
        let mv = agent.decide_with(&state, true).unwrap();
        assert_eq!(
            agent.history(),
            &[(PerspectiveState::from_board(&state), mv)]
        );
    }

    #[test]
    fn learn_walks_history_backwards() {
        let config = QLearningConfig::default()
            .with_learning_rate(0.5)
            .with_discount_factor(0.9);
        let mut agent = seeded(config);

        let s0 = BoardState::new();
        let s1 = s0.make_move(0).unwrap().make_move(4).unwrap();
        let k0 = PerspectiveState::from_board(&s0);
        let k1 = PerspectiveState::from_board(&s1);
        agent.history = vec![(k0, 0), (k1, 1)];

        agent.learn(1.0);

        // last step: 0 + 0.5 * (1 - 0)
        assert_eq!(agent.table().get(&k1, 1), 0.5);
        // earlier step: 0 + 0.5 * (0.9 * 0.5 - 0)
        assert!((agent.table().get(&k0, 0) - 0.225).abs() < 1e-12);
        assert!(agent.history().is_empty());
    }

    #[test]
    fn zero_learning_rate_leaves_values_unchanged() {
        let config = QLearningConfig::default().with_learning_rate(0.0);
        let state = BoardState::new();
        let key = PerspectiveState::from_board(&state);
        let mut table = QTable::new();
        table.set(key, 4, 0.3);
        let mut agent = QLearningAgent::with_table(config.with_seed(1), table).unwrap();

        agent.history = vec![(key, 4), (key, 2)];
        agent.learn(-1.0);

        assert_eq!(agent.table().get(&key, 4), 0.3);
        assert_eq!(agent.table().get(&key, 2), 0.0);
    }

    #[test]
    fn learn_with_empty_history_is_noop() {
        let mut agent = seeded(QLearningConfig::default());
        agent.learn(1.0);
        assert!(agent.table().is_empty());
    }

    #[test]
    fn agent_trait_follows_training_flag() {
        let mut agent = seeded(QLearningConfig::default());
        let state = BoardState::new();

        agent.decide(&state).unwrap();
        assert!(agent.history().is_empty());

        agent.set_training(true);
        agent.decide(&state).unwrap();
        assert_eq!(agent.history().len(), 1);

        agent.observe_outcome(1.0).unwrap();
        assert!(agent.history().is_empty());
        assert_eq!(agent.table().len(), 1);
    }

    #[test]
    fn refuses_terminal_state() {
        let mut agent = seeded(QLearningConfig::default());
        let won = BoardState::from_string("XXXOO....").unwrap();
        assert!(matches!(
            agent.decide_with(&won, true),
            Err(Error::GameOver)
        ));
    }
}
