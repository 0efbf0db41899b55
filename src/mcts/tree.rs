//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by [`NodeId`]
//! indices; the root is always `NodeId(0)`. The tree lives for one decision
//! and is dropped afterwards.

use crate::{
    Result,
    mcts::node::{MctsNode, NodeId},
    tictactoe::BoardState,
};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
}

impl MctsTree {
    /// Create a tree holding only the root position.
    pub fn new(root_state: BoardState) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Child of `node_id` with the highest UCB1 score.
    ///
    /// The first child wins ties. Returns `None` for childless nodes.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let mut best: Option<(NodeId, f64)> = None;

        for &child_id in &node.children {
            let score = self.get(child_id).ucb1(node.visits, exploration);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }

        best.map(|(id, _)| id)
    }

    /// Expand one untried move of `node_id` and return the new child.
    ///
    /// Returns `Ok(None)` when there is nothing left to expand.
    pub fn expand(&mut self, node_id: NodeId) -> Result<Option<NodeId>> {
        let node = self.get_mut(node_id);
        if node.is_terminal {
            return Ok(None);
        }
        let Some(mv) = node.untried_moves.pop() else {
            return Ok(None);
        };
        let child_state = node.state.make_move(mv)?;

        let child_id = self.allocate(MctsNode::new_child(node_id, mv, child_state));
        self.get_mut(node_id).children.push(child_id);
        Ok(Some(child_id))
    }

    /// Backpropagate a rollout result from a leaf to the root.
    ///
    /// `result` is relative to the side to move at the leaf and is negated
    /// at every step up, since the sides alternate.
    pub fn backpropagate(&mut self, leaf_id: NodeId, result: i8) {
        let mut current = Some(leaf_id);
        let mut current_result = result;

        while let Some(id) = current {
            let node = self.get_mut(id);
            node.record(current_result);
            current_result = -current_result;
            current = node.parent;
        }
    }

    /// Move leading to the most visited root child (first one on ties).
    pub fn best_move(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for &child_id in &self.get(self.root()).children {
            let child = self.get(child_id);
            let Some(mv) = child.mv else { continue };
            if best.is_none_or(|(_, visits)| child.visits > visits) {
                best = Some((mv, child.visits));
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// `(move, visits)` for every root child in expansion order.
    pub fn root_visits(&self) -> Vec<(usize, u32)> {
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.mv.map(|mv| (mv, child.visits))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_pops_highest_untried_move_first() {
        let mut tree = MctsTree::new(BoardState::new());
        let child = tree.expand(tree.root()).unwrap().unwrap();

        assert_eq!(tree.get(child).mv, Some(8));
        assert_eq!(tree.get(child).parent, Some(NodeId::ROOT));
        assert_eq!(tree.get(tree.root()).untried_moves.len(), 8);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn backpropagate_alternates_perspective() {
        let mut tree = MctsTree::new(BoardState::new());
        let child = tree.expand(tree.root()).unwrap().unwrap();
        let grandchild = tree.expand(child).unwrap().unwrap();

        tree.backpropagate(grandchild, 1);

        assert_eq!(tree.get(grandchild).wins, 1.0);
        assert_eq!(tree.get(child).wins, 0.0);
        assert_eq!(tree.get(tree.root()).wins, 1.0);
        for id in [tree.root(), child, grandchild] {
            assert_eq!(tree.get(id).visits, 1);
        }
    }

    #[test]
    fn draws_credit_half_at_every_level() {
        let mut tree = MctsTree::new(BoardState::new());
        let child = tree.expand(tree.root()).unwrap().unwrap();
        tree.backpropagate(child, 0);
        assert_eq!(tree.get(child).wins, 0.5);
        assert_eq!(tree.get(tree.root()).wins, 0.5);
    }

    #[test]
    fn best_move_uses_visits_and_first_on_ties() {
        let mut tree = MctsTree::new(BoardState::new());
        let a = tree.expand(tree.root()).unwrap().unwrap(); // move 8
        let b = tree.expand(tree.root()).unwrap().unwrap(); // move 7
        tree.backpropagate(a, 1);
        tree.backpropagate(b, -1);
        assert_eq!(tree.best_move(), Some(8));

        tree.backpropagate(b, -1);
        assert_eq!(tree.best_move(), Some(7));
        assert_eq!(tree.root_visits(), vec![(8, 1), (7, 2)]);
    }

    #[test]
    fn select_child_is_none_without_children() {
        let tree = MctsTree::new(BoardState::new());
        assert_eq!(tree.select_child(tree.root(), 1.414), None);
    }
}
