//! Train command - train the Q-learning agent

use std::{
    fs::File,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::{
    cli::{
        config::{AgentKind, AgentOptions},
        output::{format_number, print_kv, print_section, print_training_summary},
    },
    pipeline::{LearningCurveObserver, ProgressObserver, TrainingPipeline, TrainingSchedule},
    q_learning::{QLearningAgent, QLearningConfig, SavedQTable, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Episodes played as X; half as many follow as O
    #[arg(long, short = 'e', default_value_t = 50_000)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained table
    #[arg(long, short = 'o', default_value = "q_table.msgpack")]
    pub output: PathBuf,

    /// Opponent to train against
    #[arg(long, default_value = "random")]
    pub opponent: AgentKind,

    /// Learning rate α
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration rate at the first episode
    #[arg(long, default_value_t = 0.3)]
    pub epsilon_start: f64,

    /// Exploration rate after the last X episode
    #[arg(long, default_value_t = 0.05)]
    pub epsilon_end: f64,

    /// Episodes per logged statistics window
    #[arg(long, default_value_t = 1000)]
    pub report_every: usize,

    /// Optional JSON file for the windowed learning curve
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = QLearningConfig {
        learning_rate: args.alpha,
        discount_factor: args.gamma,
        epsilon: args.epsilon_start,
        seed: args.seed,
    };
    let mut learner = QLearningAgent::new(config).context("Invalid Q-learning parameters")?;

    let options = AgentOptions {
        seed: args.seed,
        ..AgentOptions::default()
    };
    let mut opponent = options.build(args.opponent, 1)?;

    let schedule = TrainingSchedule::with_episodes(args.episodes)
        .with_epsilon_range(args.epsilon_start, args.epsilon_end)
        .with_report_every(args.report_every);

    print_section("TRAINING Q-LEARNING AGENT");
    print_kv("Opponent", opponent.name());
    print_kv("Episodes as X", &format_number(schedule.episodes));
    print_kv("Episodes as O", &format_number(schedule.second_seat_episodes));
    print_kv(
        "Exploration",
        &format!("{} -> {}", args.epsilon_start, args.epsilon_end),
    );

    let curve = Arc::new(Mutex::new(LearningCurveObserver::new(args.report_every)));
    let mut pipeline = TrainingPipeline::new(schedule).with_observer(Box::new(Arc::clone(&curve)));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let summaries = pipeline.run(&mut learner, opponent.as_mut())?;

    print_section("TRAINING COMPLETE");
    for (label, summary) in ["As X", "As O"].iter().zip(&summaries) {
        print_training_summary(label, summary);
    }
    print_kv("Table entries", &format_number(learner.table().len()));
    print_kv("States learned", &format_number(learner.table().state_count()));

    let metadata = TrainingMetadata {
        episodes: schedule.total_episodes(),
        opponent: opponent.name().to_string(),
        seed: args.seed,
    };
    SavedQTable::from_agent(&learner, metadata).save_to_file(&args.output)?;
    info!(path = %args.output.display(), "Saved Q-table");
    print_kv("Saved to", &args.output.display().to_string());

    if let Some(path) = &args.curve {
        let curve = curve.lock().unwrap_or_else(PoisonError::into_inner);
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, curve.points())
            .context("Failed to write learning curve")?;
        print_kv("Learning curve", &path.display().to_string());
    }

    Ok(())
}
