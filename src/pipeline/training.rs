//! Training pipeline for the Q-learning agent

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    pipeline::matchup::{play_game, rate},
    ports::{Agent, Observer},
    q_learning::QLearningAgent,
    tictactoe::{GameOutcome, Player},
};

/// One block of training episodes from a fixed seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingPhase {
    /// Seat the learner occupies
    pub role: Player,
    pub episodes: usize,
    /// ε at the first episode
    pub epsilon_start: f64,
    /// Floor reached after the last episode
    pub epsilon_end: f64,
}

impl TrainingPhase {
    /// Amount ε shrinks after every episode.
    pub fn epsilon_step(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            (self.epsilon_start - self.epsilon_end) / self.episodes as f64
        }
    }
}

/// Two-phase schedule: learner as X first, then as O.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSchedule {
    /// Episodes played as X
    pub episodes: usize,
    pub epsilon_start: f64,
    pub epsilon_end: f64,
    /// Episodes played as O afterwards, at the final ε
    pub second_seat_episodes: usize,
    /// Episodes per logged statistics window
    pub report_every: usize,
}

impl Default for TrainingSchedule {
    fn default() -> Self {
        Self::with_episodes(50_000)
    }
}

impl TrainingSchedule {
    /// Schedule with `episodes` as X and half as many as O.
    pub fn with_episodes(episodes: usize) -> Self {
        Self {
            episodes,
            epsilon_start: 0.3,
            epsilon_end: 0.05,
            second_seat_episodes: episodes / 2,
            report_every: 1000,
        }
    }

    pub fn with_epsilon_range(mut self, start: f64, end: f64) -> Self {
        self.epsilon_start = start;
        self.epsilon_end = end;
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn phases(&self) -> [TrainingPhase; 2] {
        [
            TrainingPhase {
                role: Player::X,
                episodes: self.episodes,
                epsilon_start: self.epsilon_start,
                epsilon_end: self.epsilon_end,
            },
            TrainingPhase {
                role: Player::O,
                episodes: self.second_seat_episodes,
                epsilon_start: self.epsilon_end,
                epsilon_end: self.epsilon_end,
            },
        ]
    }

    pub fn total_episodes(&self) -> usize {
        self.episodes + self.second_seat_episodes
    }
}

/// Win/draw/loss counts from the learner's seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl TrainingSummary {
    pub fn record(&mut self, outcome: GameOutcome, learner: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == learner => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        rate(self.wins, self.total_games())
    }

    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total_games())
    }

    pub fn loss_rate(&self) -> f64 {
        rate(self.losses, self.total_games())
    }

    pub fn merge(&mut self, other: &TrainingSummary) {
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
    }
}

/// Play `phase.episodes` training games between `learner` and `opponent`.
///
/// ε starts at `phase.epsilon_start` and drops linearly to
/// `phase.epsilon_end`. Observers see games numbered from `first_game`.
pub fn train_against(
    learner: &mut QLearningAgent,
    opponent: &mut dyn Agent,
    phase: &TrainingPhase,
    report_every: usize,
    first_game: usize,
    observers: &mut [Box<dyn Observer>],
) -> Result<TrainingSummary> {
    learner.set_training(true);
    learner.set_epsilon(phase.epsilon_start)?;
    let step = phase.epsilon_step();

    let mut summary = TrainingSummary::default();
    let mut window = TrainingSummary::default();

    for episode in 0..phase.episodes {
        let game = match phase.role {
            Player::X => play_game(learner, opponent)?,
            Player::O => play_game(opponent, learner)?,
        };
        let Some(outcome) = game.outcome else {
            continue;
        };
        summary.record(outcome, phase.role);
        window.record(outcome, phase.role);

        let epsilon = (learner.epsilon() - step).max(phase.epsilon_end);
        learner.set_epsilon(epsilon)?;

        for observer in observers.iter_mut() {
            observer.on_game_end(first_game + episode, outcome, phase.role)?;
        }

        if report_every > 0 && (episode + 1).is_multiple_of(report_every) {
            info!(
                role = %phase.role,
                episode = episode + 1,
                win_rate = window.win_rate(),
                loss_rate = window.loss_rate(),
                draw_rate = window.draw_rate(),
                epsilon = learner.epsilon(),
                table_size = learner.table().len(),
                "Training progress"
            );
            window = TrainingSummary::default();
        }
    }

    learner.set_training(false);
    Ok(summary)
}

/// Runs a [`TrainingSchedule`] and notifies observers.
pub struct TrainingPipeline {
    schedule: TrainingSchedule,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(schedule: TrainingSchedule) -> Self {
        Self {
            schedule,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn schedule(&self) -> &TrainingSchedule {
        &self.schedule
    }

    /// Train as X, then as O. Returns one summary per phase.
    pub fn run(
        &mut self,
        learner: &mut QLearningAgent,
        opponent: &mut dyn Agent,
    ) -> Result<Vec<TrainingSummary>> {
        for observer in &mut self.observers {
            observer.on_training_start(self.schedule.total_episodes())?;
        }

        let mut summaries = Vec::new();
        let mut games_played = 0;
        for phase in self.schedule.phases() {
            info!(
                role = %phase.role,
                episodes = phase.episodes,
                opponent = opponent.name(),
                "Starting training phase"
            );
            let summary = train_against(
                learner,
                opponent,
                &phase,
                self.schedule.report_every,
                games_played,
                &mut self.observers,
            )?;
            games_played += phase.episodes;
            summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        info!(
            episodes = games_played,
            table_size = learner.table().len(),
            states = learner.table().state_count(),
            "Training complete"
        );
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{agents::RandomAgent, q_learning::QLearningConfig};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(usize, Player)>>>);

    impl Observer for Recorder {
        fn on_game_end(
            &mut self,
            game_num: usize,
            _outcome: GameOutcome,
            learner: Player,
        ) -> Result<()> {
            self.0.lock().unwrap().push((game_num, learner));
            Ok(())
        }
    }

    fn learner() -> QLearningAgent {
        QLearningAgent::new(QLearningConfig::default().with_seed(9)).unwrap()
    }

    #[test]
    fn default_schedule() {
        let schedule = TrainingSchedule::default();
        assert_eq!(schedule.episodes, 50_000);
        assert_eq!(schedule.second_seat_episodes, 25_000);
        assert_eq!(schedule.total_episodes(), 75_000);
        let [x, o] = schedule.phases();
        assert_eq!((x.role, o.role), (Player::X, Player::O));
        assert_eq!(o.epsilon_start, 0.05);
        assert!((x.epsilon_step() - 0.25 / 50_000.0).abs() < 1e-15);
        assert_eq!(o.epsilon_step(), 0.0);
    }

    #[test]
    fn epsilon_decays_to_floor() {
        let mut agent = learner();
        let mut opponent = RandomAgent::with_seed(1);
        let phase = TrainingPhase {
            role: Player::X,
            episodes: 100,
            epsilon_start: 0.3,
            epsilon_end: 0.05,
        };

        let summary = train_against(&mut agent, &mut opponent, &phase, 0, 0, &mut []).unwrap();

        assert_eq!(summary.total_games(), 100);
        assert!((agent.epsilon() - 0.05).abs() < 1e-9);
        assert!(!agent.is_training());
        assert!(!agent.table().is_empty());
    }

    #[test]
    fn pipeline_numbers_games_across_phases() {
        let recorder = Recorder::default();
        let mut pipeline = TrainingPipeline::new(TrainingSchedule::with_episodes(10))
            .with_observer(Box::new(recorder.clone()));

        let mut agent = learner();
        let mut opponent = RandomAgent::with_seed(2);
        let summaries = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].total_games(), 10);
        assert_eq!(summaries[1].total_games(), 5);

        let seen = recorder.0.lock().unwrap();
        assert_eq!(seen.len(), 15);
        assert_eq!(seen[0], (0, Player::X));
        assert_eq!(seen[14], (14, Player::O));
    }

    #[test]
    fn summary_rates() {
        let mut summary = TrainingSummary::default();
        summary.record(GameOutcome::Win(Player::O), Player::O);
        summary.record(GameOutcome::Win(Player::X), Player::O);
        summary.record(GameOutcome::Draw, Player::O);
        summary.record(GameOutcome::Draw, Player::O);
        assert_eq!(summary.win_rate(), 0.25);
        assert_eq!(summary.loss_rate(), 0.25);
        assert_eq!(summary.draw_rate(), 0.5);
    }
}
