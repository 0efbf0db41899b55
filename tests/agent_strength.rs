//! Strength and consistency checks for the search agents
//!
//! Minimax is compared against its unpruned self over every reachable
//! position; MCTS is played against the baselines with fixed seeds.

mod common;

use common::{evaluate, reachable_states};
use tictactoe_agents::{
    agents::{HeuristicAgent, RandomAgent},
    mcts::{MctsAgent, MctsConfig},
    minimax::{MinimaxAgent, Pruning},
    pipeline::{Matchup, MatchupResult, play_game},
    ports::Agent,
    tictactoe::{BoardState, GameOutcome, Player},
};

fn seeded_mcts(seed: u64) -> MctsAgent {
    MctsAgent::new(MctsConfig::default().with_simulations(1000).with_seed(seed)).unwrap()
}

mod minimax {
    use super::*;

    #[test]
    fn test_self_play_draws() {
        let mut x = MinimaxAgent::new();
        let mut o = MinimaxAgent::new();
        let game = play_game(&mut x, &mut o).unwrap();
        assert_eq!(game.outcome, Some(GameOutcome::Draw));
        assert_eq!(game.moves.len(), 9);
    }

    #[test]
    fn test_pruning_preserves_decisions() {
        let mut pruned = MinimaxAgent::new();
        let mut unpruned = MinimaxAgent::with_pruning(Pruning::Disabled);

        for state in reachable_states() {
            if state.is_terminal() {
                continue;
            }
            let a = pruned.evaluate(&state).unwrap();
            let b = unpruned.evaluate(&state).unwrap();
            assert_eq!(a.mv, b.mv, "move differs at {}", state.encode());
            assert_eq!(a.score, b.score, "score differs at {}", state.encode());
        }
    }

    #[test]
    fn test_pruning_explores_fewer_nodes() {
        let empty = BoardState::new();
        let pruned = MinimaxAgent::new().evaluate(&empty).unwrap();
        let unpruned = MinimaxAgent::with_pruning(Pruning::Disabled)
            .evaluate(&empty)
            .unwrap();

        assert!(
            pruned.nodes_explored < unpruned.nodes_explored,
            "pruned {} vs unpruned {}",
            pruned.nodes_explored,
            unpruned.nodes_explored
        );
        assert_eq!(pruned.score, 0);
    }

    #[test]
    fn test_never_loses_to_the_baselines() {
        let mut agent = MinimaxAgent::new();
        let mut random = RandomAgent::with_seed(17);
        let result = Matchup::new(25).run(&mut agent, &mut random).unwrap();
        assert_eq!(result.agent2_wins, 0);

        let mut heuristic = HeuristicAgent::new();
        let result = Matchup::new(1).run(&mut agent, &mut heuristic).unwrap();
        assert_eq!(result.agent2_wins, 0);
    }
}

mod mcts {
    use super::*;

    #[test]
    fn test_never_loses_to_random() {
        for trial in 0..5 {
            let mut agent = seeded_mcts(100 + trial);
            let mut random = RandomAgent::with_seed(200 + trial);

            let as_x = evaluate(&mut agent, &mut random, Player::X, 2);
            let as_o = evaluate(&mut agent, &mut random, Player::O, 2);
            assert_eq!(as_x.losses + as_o.losses, 0, "trial {trial}");
        }
    }

    #[test]
    fn test_holds_minimax_at_least_as_well_as_random() {
        let mut mcts_agent = seeded_mcts(7);
        let mut random = RandomAgent::with_seed(7);
        let mut oracle = MinimaxAgent::new();

        let mcts_vs = Matchup::new(5).run(&mut mcts_agent, &mut oracle).unwrap();
        let random_vs = Matchup::new(5).run(&mut random, &mut oracle).unwrap();

        let not_lost = |r: &MatchupResult| r.agent1_wins + r.draws;
        assert!(
            not_lost(&mcts_vs) >= not_lost(&random_vs),
            "MCTS held {} games, random held {}",
            not_lost(&mcts_vs),
            not_lost(&random_vs)
        );
    }

    #[test]
    fn test_takes_an_immediate_win() {
        // XX.
        // OO.
        // ...
        let state = BoardState::from_string("XX.OO....").unwrap();
        let mut agent = seeded_mcts(3);
        let mv = agent.decide(&state).unwrap();
        assert_eq!(mv, 2);
    }

    #[test]
    fn test_search_statistics_are_recorded() {
        let mut agent = seeded_mcts(11);
        agent.decide(&BoardState::new()).unwrap();

        let search = agent.last_search().unwrap();
        assert_eq!(search.simulations, 1000);
        assert!(search.tree_size > 9);
    }
}
