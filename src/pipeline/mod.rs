//! Orchestration around the decision core
//!
//! This module provides:
//! - single games and two-sided matchups
//! - the round-robin tournament
//! - the Q-learning training schedule
//! - observers recording training progress

pub mod matchup;
pub mod observers;
pub mod tournament;
pub mod training;

pub use matchup::{Matchup, MatchupResult, play_game};
pub use observers::{LearningCurveObserver, ProgressObserver, WindowStats};
pub use tournament::{PairingResult, Standing, Tournament, TournamentConfig, TournamentReport};
pub use training::{
    TrainingPhase, TrainingPipeline, TrainingSchedule, TrainingSummary, train_against,
};

pub use crate::ports::{Agent, Observer};
