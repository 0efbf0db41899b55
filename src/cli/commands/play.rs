//! Play command - one game between two agents

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::{
    cli::{
        config::{AgentKind, AgentOptions},
        output::{print_kv, print_section},
    },
    pipeline::play_game,
    tictactoe::GameOutcome,
};

#[derive(Parser, Debug)]
#[command(about = "Play a single game and print the final board")]
pub struct PlayArgs {
    /// Agent playing X
    #[arg(long, short = 'x', default_value = "heuristic")]
    pub x: AgentKind,

    /// Agent playing O
    #[arg(long, short = 'o', default_value = "minimax")]
    pub o: AgentKind,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// MCTS simulations per decision
    #[arg(long, default_value_t = 1000)]
    pub simulations: u32,

    /// Trained table for the Q-learning agent
    #[arg(long)]
    pub q_table: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let options = AgentOptions {
        seed: args.seed,
        simulations: Some(args.simulations),
        q_table: args.q_table,
    };
    let mut x = options.build(args.x, 0)?;
    let mut o = options.build(args.o, 1)?;

    let game = play_game(x.as_mut(), o.as_mut())?;
    info!(moves = ?game.positions(), "Game finished");

    print_section(&format!("{} (X) vs {} (O)", x.name(), o.name()));
    for (ply, mv) in game.moves.iter().enumerate() {
        println!("  {:>2}. {} -> {}", ply + 1, mv.player, mv.position);
    }
    println!("\n{}\n", game.current_state());

    let result = match game.outcome {
        Some(GameOutcome::Win(winner)) => format!("{winner} wins"),
        Some(GameOutcome::Draw) => "Draw".to_string(),
        None => "Unfinished".to_string(),
    };
    print_kv("Result", &result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: PlayArgs,
    }

    #[test]
    fn defaults_pit_heuristic_against_minimax() {
        let parsed = Wrapper::parse_from(["ttt"]).args;
        assert_eq!(parsed.x, AgentKind::Heuristic);
        assert_eq!(parsed.o, AgentKind::Minimax);
    }

    #[test]
    fn rejects_unknown_agent() {
        assert!(Wrapper::try_parse_from(["ttt", "--x", "deep-blue"]).is_err());
    }

    #[test]
    fn plays_a_seeded_game() {
        let args =
            Wrapper::parse_from(["ttt", "--x", "random", "--o", "heuristic", "--seed", "5"]).args;
        execute(args).unwrap();
    }
}
