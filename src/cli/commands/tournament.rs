//! Tournament command - round robin between agents

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    cli::{
        config::{AgentKind, AgentOptions},
        output::{format_number, head_to_head_table, print_kv, print_section, standings_table},
    },
    pipeline::{Tournament, TournamentConfig},
    ports::Agent,
};

#[derive(Parser, Debug)]
#[command(about = "Run a round-robin tournament")]
pub struct TournamentArgs {
    /// Agents to enter (defaults to every kind, Q-learning only with --q-table)
    #[arg(long = "agent", short = 'a')]
    pub agents: Vec<AgentKind>,

    /// Games per agent per side in each pairing
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games_per_side: usize,

    /// Trained table for the Q-learning agent
    #[arg(long)]
    pub q_table: Option<PathBuf>,

    /// MCTS simulations per decision
    #[arg(long, default_value_t = 1000)]
    pub simulations: u32,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the report as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl TournamentArgs {
    fn field(&self) -> Vec<AgentKind> {
        if !self.agents.is_empty() {
            return self.agents.clone();
        }
        AgentKind::ALL
            .into_iter()
            .filter(|kind| *kind != AgentKind::QLearning || self.q_table.is_some())
            .collect()
    }
}

pub fn execute(args: TournamentArgs) -> Result<()> {
    let field = args.field();
    if field.len() < 2 {
        return Err(anyhow!("Need at least 2 agents for a tournament"));
    }

    let options = AgentOptions {
        seed: args.seed,
        simulations: Some(args.simulations),
        q_table: args.q_table.clone(),
    };
    let mut agents: Vec<Box<dyn Agent>> = field
        .iter()
        .enumerate()
        .map(|(slot, &kind)| options.build(kind, slot as u64))
        .collect::<Result<_>>()?;
    let names: Vec<String> = agents.iter().map(|a| a.name().to_string()).collect();

    let config = TournamentConfig::default().with_games_per_side(args.games_per_side);
    let pairings = names.len() * (names.len() - 1);

    if !args.json {
        print_section("STARTING TOURNAMENT");
        print_kv("Agents", &names.join(", "));
        print_kv("Games per pairing", &format_number(config.games_per_side * 2));
        print_kv("Total pairings", &format_number(pairings));
        print_kv(
            "Total games",
            &format_number(pairings * config.games_per_side * 2),
        );
    }

    let report = Tournament::new(config).run(&mut agents)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("FINAL STANDINGS");
    print!("{}", standings_table(&report));
    println!("Scoring: Win = 2 points, Draw = 1 point, Loss = 0 points");

    print_section("HEAD-TO-HEAD WIN RATES");
    print!("{}", head_to_head_table(&report, &names));

    Ok(())
}
