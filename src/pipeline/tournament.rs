//! Round-robin tournament over a field of agents
//!
//! Every ordered pair of distinct agents plays one [`Matchup`], so each pair
//! meets twice with the roles of "agent 1" swapped. Wins earn 2 points and
//! draws 1. Standings rank by fewest losses, then most wins.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Error, Result,
    pipeline::matchup::{Matchup, MatchupResult, rate},
    ports::Agent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub games_per_side: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            games_per_side: 100,
        }
    }
}

impl TournamentConfig {
    pub fn with_games_per_side(mut self, games_per_side: usize) -> Self {
        self.games_per_side = games_per_side;
        self
    }
}

/// Accumulated record of one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub points: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub games: usize,
}

impl Standing {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn win_rate(&self) -> f64 {
        rate(self.wins, self.games)
    }

    pub fn max_points(&self) -> usize {
        self.games * 2
    }
}

/// Result of one ordered pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    pub agent1: String,
    pub agent2: String,
    pub result: MatchupResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    /// Sorted standings, best first
    pub standings: Vec<Standing>,
    /// Pairings in play order
    pub pairings: Vec<PairingResult>,
}

impl TournamentReport {
    /// Agent 1's win rate in the `agent1` vs `agent2` pairing.
    pub fn head_to_head(&self, agent1: &str, agent2: &str) -> Option<f64> {
        self.pairings
            .iter()
            .find(|p| p.agent1 == agent1 && p.agent2 == agent2)
            .map(|p| p.result.agent1_win_rate())
    }
}

pub struct Tournament {
    config: TournamentConfig,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Self {
        Self { config }
    }

    /// Play every ordered pair of distinct agents.
    ///
    /// Agents are switched to evaluation play before the first game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if two agents share a name and
    /// propagates any game failure.
    pub fn run(&self, agents: &mut [Box<dyn Agent>]) -> Result<TournamentReport> {
        let names: Vec<String> = agents.iter().map(|a| a.name().to_string()).collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::InvalidConfiguration {
                    message: format!("duplicate agent name '{name}' in tournament"),
                });
            }
        }
        for agent in agents.iter_mut() {
            agent.set_training(false);
        }

        let mut standings: Vec<Standing> = names.iter().map(|n| Standing::new(n)).collect();
        let mut pairings = Vec::new();
        let matchup = Matchup::new(self.config.games_per_side);
        let total_pairings = names.len() * names.len().saturating_sub(1);
        let games_per_pairing = self.config.games_per_side * 2;

        info!(
            agents = names.len(),
            pairings = total_pairings,
            games = total_pairings * games_per_pairing,
            "Starting tournament"
        );

        for i in 0..agents.len() {
            for j in 0..agents.len() {
                if i == j {
                    continue;
                }
                let (agent1, agent2) = pair_mut(agents, i, j);
                let result = matchup.run(agent1, agent2)?;
                let (points1, points2) = result.points();

                let first = &mut standings[i];
                first.points += points1;
                first.wins += result.agent1_wins;
                first.draws += result.draws;
                first.losses += result.agent2_wins;
                first.games += games_per_pairing;

                let second = &mut standings[j];
                second.points += points2;
                second.wins += result.agent2_wins;
                second.draws += result.draws;
                second.losses += result.agent1_wins;
                second.games += games_per_pairing;

                info!(
                    pairing = pairings.len() + 1,
                    of = total_pairings,
                    agent1 = %names[i],
                    agent2 = %names[j],
                    agent1_wins = result.agent1_wins,
                    agent2_wins = result.agent2_wins,
                    draws = result.draws,
                    "Pairing complete"
                );
                pairings.push(PairingResult {
                    agent1: names[i].clone(),
                    agent2: names[j].clone(),
                    result,
                });
            }
        }

        standings.sort_by_key(|s| (s.losses, Reverse(s.wins)));
        Ok(TournamentReport {
            standings,
            pairings,
        })
    }
}

/// Mutable references to two distinct slots of `agents`.
fn pair_mut(
    agents: &mut [Box<dyn Agent>],
    i: usize,
    j: usize,
) -> (&mut dyn Agent, &mut dyn Agent) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = agents.split_at_mut(j);
        (left[i].as_mut(), right[0].as_mut())
    } else {
        let (left, right) = agents.split_at_mut(i);
        (right[0].as_mut(), left[j].as_mut())
    }
}
