//! MCTS tree node representation.
//!
//! Each node holds a snapshot of the position reached by playing `mv` from
//! its parent, together with the visit statistics used by UCB1.

use crate::tictactoe::BoardState;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Position at this node
    pub state: BoardState,

    /// Parent node (`None` for the root). Non-owning back-reference.
    pub parent: Option<NodeId>,

    /// Move that led here from the parent
    pub mv: Option<usize>,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Legal moves not yet expanded. Expansion pops from the back.
    pub untried_moves: Vec<usize>,

    /// Number of simulations that passed through this node
    pub visits: u32,

    /// Accumulated result credit: 1 per win, 0.5 per draw.
    ///
    /// Results arrive relative to the side to move at this node, so the
    /// parent (whose mover is the other side) reads `visits - wins` as its
    /// own success count.
    pub wins: f64,

    /// Whether the game is over at this node
    pub is_terminal: bool,
}

impl MctsNode {
    pub fn new_root(state: BoardState) -> Self {
        Self::build(state, None, None)
    }

    pub fn new_child(parent: NodeId, mv: usize, state: BoardState) -> Self {
        Self::build(state, Some(parent), Some(mv))
    }

    fn build(state: BoardState, parent: Option<NodeId>, mv: Option<usize>) -> Self {
        let is_terminal = state.is_terminal();
        let untried_moves = if is_terminal {
            Vec::new()
        } else {
            state.legal_moves()
        };
        Self {
            state,
            parent,
            mv,
            children: Vec::new(),
            untried_moves,
            visits: 0,
            wins: 0.0,
            is_terminal,
        }
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// UCB1 score of this node as seen by the parent's player to move.
    ///
    /// Unvisited nodes score infinity so they are always tried first.
    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = f64::from(self.visits);
        let parent_wins = visits - self.wins;
        let exploitation = parent_wins / visits;
        let exploration = exploration * (f64::from(parent_visits).ln() / visits).sqrt();
        exploitation + exploration
    }

    /// Record one simulation result (+1 win, 0 draw, -1 loss).
    pub fn record(&mut self, result: i8) {
        self.visits += 1;
        self.wins += match result {
            1 => 1.0,
            0 => 0.5,
            _ => 0.0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_nodes_have_nothing_to_expand() {
        let won = BoardState::from_string("XXXOO....").unwrap();
        let node = MctsNode::new_root(won);
        assert!(node.is_terminal);
        assert!(node.is_fully_expanded());

        let open = MctsNode::new_root(BoardState::new());
        assert_eq!(open.untried_moves.len(), 9);
    }

    #[test]
    fn record_credits_wins_and_draws() {
        let mut node = MctsNode::new_root(BoardState::new());
        node.record(1);
        node.record(0);
        node.record(-1);
        assert_eq!(node.visits, 3);
        assert!((node.wins - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn ucb1_prefers_children_the_parent_wins_through() {
        let state = BoardState::new();
        // child wins are the opponent's successes
        let mut good_for_parent = MctsNode::new_child(NodeId::ROOT, 0, state);
        let mut bad_for_parent = MctsNode::new_child(NodeId::ROOT, 1, state);
        for _ in 0..10 {
            good_for_parent.record(-1);
            bad_for_parent.record(1);
        }

        let c = 1.414;
        assert!(good_for_parent.ucb1(20, c) > bad_for_parent.ucb1(20, c));
        let expected = 1.0 + c * ((20f64).ln() / 10.0).sqrt();
        assert!((good_for_parent.ucb1(20, c) - expected).abs() < 1e-12);
        assert_eq!(
            MctsNode::new_child(NodeId::ROOT, 2, state).ucb1(20, c),
            f64::INFINITY
        );
    }
}
