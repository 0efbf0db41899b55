//! Observer port - abstraction for training observation
//!
//! Observers receive training events without the training loop knowing
//! whether they drive a progress bar, collect learning curves or log.

use crate::{
    Result,
    tictactoe::{GameOutcome, Player},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once per training run
/// 2. `on_game_end(game_num, outcome, learner)` - after every game
/// 3. `on_training_end()` - once at the end
///
/// A run made of several phases (X seat, then O seat) reports the combined
/// game count up front and numbers games consecutively across phases.
///
/// # Examples
///
/// ```
/// use tictactoe_agents::{
///     ports::Observer,
///     tictactoe::{GameOutcome, Player},
/// };
///
/// struct CountingObserver {
///     learner_wins: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         outcome: GameOutcome,
///         learner: Player,
///     ) -> tictactoe_agents::Result<()> {
///         if outcome == GameOutcome::Win(learner) {
///             self.learner_wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts with the number of games to be played.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each game reaches a terminal state.
    ///
    /// `learner` is the seat the learning agent occupied in that game.
    fn on_game_end(
        &mut self,
        _game_num: usize,
        _outcome: GameOutcome,
        _learner: Player,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
