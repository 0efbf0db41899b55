//! Observer implementations for training pipelines

use std::sync::{Arc, Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    pipeline::training::TrainingSummary,
    ports::Observer,
    tictactoe::{GameOutcome, Player},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    summary: TrainingSummary,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            summary: TrainingSummary::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "{} D:{} L:{}",
            self.summary.wins, self.summary.draws, self.summary.losses
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        outcome: GameOutcome,
        learner: Player,
    ) -> Result<()> {
        self.summary.record(outcome, learner);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// One point of a learning curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Games played when the window closed
    pub games: usize,
    pub role: Player,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

/// Collects win/draw/loss rates over fixed-size windows of games.
///
/// A window is also closed whenever the learner changes seat, so every point
/// describes a single seat.
pub struct LearningCurveObserver {
    window_size: usize,
    current: TrainingSummary,
    current_role: Option<Player>,
    games: usize,
    points: Vec<WindowStats>,
}

impl LearningCurveObserver {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
            current: TrainingSummary::default(),
            current_role: None,
            games: 0,
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[WindowStats] {
        &self.points
    }

    fn close_window(&mut self) {
        let Some(role) = self.current_role else {
            return;
        };
        if self.current.total_games() == 0 {
            return;
        }
        self.points.push(WindowStats {
            games: self.games,
            role,
            win_rate: self.current.win_rate(),
            draw_rate: self.current.draw_rate(),
            loss_rate: self.current.loss_rate(),
        });
        self.current = TrainingSummary::default();
    }
}

impl Observer for LearningCurveObserver {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        outcome: GameOutcome,
        learner: Player,
    ) -> Result<()> {
        if self.current_role.is_some_and(|role| role != learner) {
            self.close_window();
        }
        self.current_role = Some(learner);
        self.current.record(outcome, learner);
        self.games += 1;

        if self.current.total_games() == self.window_size {
            self.close_window();
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.close_window();
        Ok(())
    }
}

/// Shared observer, so results can be read back after the pipeline owned it.
impl<O: Observer> Observer for Arc<Mutex<O>> {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_training_start(total_games)
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        outcome: GameOutcome,
        learner: Player,
    ) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_game_end(game_num, outcome, learner)
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_training_end()
    }
}
