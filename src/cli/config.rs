//! Agent selection shared across commands

use std::{fmt, path::PathBuf, str::FromStr};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    agents::{HeuristicAgent, RandomAgent},
    mcts::{MctsAgent, MctsConfig},
    minimax::MinimaxAgent,
    ports::Agent,
    q_learning::SavedQTable,
};

/// Agent kinds selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    Random,
    Heuristic,
    Minimax,
    Mcts,
    QLearning,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Random,
        AgentKind::Heuristic,
        AgentKind::Minimax,
        AgentKind::QLearning,
        AgentKind::Mcts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Heuristic => "heuristic",
            AgentKind::Minimax => "minimax",
            AgentKind::Mcts => "mcts",
            AgentKind::QLearning => "q-learning",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "heuristic" => Ok(AgentKind::Heuristic),
            "minimax" | "optimal" => Ok(AgentKind::Minimax),
            "mcts" => Ok(AgentKind::Mcts),
            "q-learning" | "qlearning" | "q" => Ok(AgentKind::QLearning),
            _ => Err(Error::UnknownAgent {
                input: s.to_string(),
                expected: AgentKind::ALL.map(AgentKind::as_str).join(", "),
            }),
        }
    }
}

/// Options used when building agents for a command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentOptions {
    /// Base seed; each built agent derives its own stream from it
    pub seed: Option<u64>,

    /// MCTS simulations per decision
    pub simulations: Option<u32>,

    /// Saved Q-table for the Q-learning agent
    pub q_table: Option<PathBuf>,
}

impl AgentOptions {
    /// Build an agent of `kind`. `slot` separates the seeds of agents built
    /// from the same options.
    pub fn build(&self, kind: AgentKind, slot: u64) -> Result<Box<dyn Agent>> {
        let seed = self.seed.map(|seed| seed.wrapping_add(slot));

        let agent: Box<dyn Agent> = match kind {
            AgentKind::Random => Box::new(match seed {
                Some(seed) => RandomAgent::with_seed(seed),
                None => RandomAgent::new(),
            }),
            AgentKind::Heuristic => Box::new(HeuristicAgent::new()),
            AgentKind::Minimax => Box::new(MinimaxAgent::new()),
            AgentKind::Mcts => {
                let mut config = MctsConfig::default();
                if let Some(simulations) = self.simulations {
                    config = config.with_simulations(simulations);
                }
                if let Some(seed) = seed {
                    config = config.with_seed(seed);
                }
                Box::new(MctsAgent::new(config)?)
            }
            AgentKind::QLearning => {
                let path = self.q_table.as_ref().ok_or_else(|| {
                    anyhow!("The q-learning agent needs a trained table (--q-table)")
                })?;
                let saved = SavedQTable::load_from_file(path)
                    .with_context(|| format!("Failed to load Q-table from {}", path.display()))?;
                let mut agent = saved.into_agent()?;
                agent.set_training(false);
                Box::new(agent)
            }
        };
        Ok(agent)
    }
}
