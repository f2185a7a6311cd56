//! Search tree nodes.
//!
//! Each node shares ownership of its parent, so the ancestry chain is a
//! singly-linked list that lives as long as any descendant does. Nodes are
//! never mutated after construction.

use std::hash::{Hash, Hasher};
use std::iter;
use std::rc::Rc;

use crate::board::{BoardState, Move};
use crate::error::Result;
use crate::puzzle::Puzzle;

#[derive(Debug)]
pub struct SearchNode {
    state: Rc<BoardState>,
    parent: Option<Rc<SearchNode>>,
    /// The transition that produced this node; identical to `state`
    action: Option<Rc<BoardState>>,
    path_cost: usize,
    depth: usize,
}

impl SearchNode {
    pub fn root(state: Rc<BoardState>) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            path_cost: 0,
            depth: 0,
        }
    }

    /// Build the child reached from `parent` by `action`
    pub fn child_node(parent: &Rc<SearchNode>, puzzle: &Puzzle, action: BoardState) -> Self {
        let state = Rc::new(puzzle.result(&parent.state, action));
        Self {
            action: Some(Rc::clone(&state)),
            state,
            parent: Some(Rc::clone(parent)),
            path_cost: puzzle.path_cost(parent.path_cost),
            depth: parent.depth + 1,
        }
    }

    /// All children reachable in one move
    pub fn expand(self: &Rc<Self>, puzzle: &Puzzle) -> Result<Vec<SearchNode>> {
        Ok(puzzle
            .actions(&self.state)?
            .into_iter()
            .map(|action| SearchNode::child_node(self, puzzle, action))
            .collect())
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub(crate) fn shared_state(&self) -> &Rc<BoardState> {
        &self.state
    }

    pub fn parent(&self) -> Option<&SearchNode> {
        self.parent.as_deref()
    }

    pub fn action(&self) -> Option<&BoardState> {
        self.action.as_deref()
    }

    pub fn path_cost(&self) -> usize {
        self.path_cost
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn ancestry(&self) -> impl Iterator<Item = &SearchNode> {
        iter::successors(Some(self), |node| node.parent())
    }

    /// States from the root to this node, inclusive
    pub fn path(&self) -> Vec<&BoardState> {
        let mut path: Vec<&BoardState> = self.ancestry().map(|node| node.state()).collect();
        path.reverse();
        path
    }

    /// Actions taken from the root to reach this node
    pub fn solution(&self) -> Vec<&BoardState> {
        let mut actions: Vec<&BoardState> =
            self.ancestry().filter_map(|node| node.action()).collect();
        actions.reverse();
        actions
    }

    /// The solution as a list of single-vehicle moves
    pub fn moves(&self) -> Vec<Move> {
        self.path()
            .windows(2)
            .filter_map(|pair| pair[0].move_to(pair[1]))
            .collect()
    }
}

/// Nodes compare by state only; the ancestry is irrelevant to identity.
impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Eq for SearchNode {}

impl Hash for SearchNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::vehicle::{Cell, Direction, Orientation};

    fn create_puzzle() -> Puzzle {
        let mut board = Board::new(6, 2).unwrap();
        board
            .insert("red", Cell::new(2, 0), 2, Orientation::Horizontal)
            .unwrap();
        board
            .insert("blue", Cell::new(0, 4), 2, Orientation::Vertical)
            .unwrap();
        Puzzle::with_default_target(&board).unwrap()
    }

    #[test]
    fn test_root_node() {
        let puzzle = create_puzzle();
        let root = SearchNode::root(Rc::new(puzzle.initial().clone()));

        assert_eq!(root.depth(), 0);
        assert_eq!(root.path_cost(), 0);
        assert!(root.parent().is_none());
        assert!(root.action().is_none());
        assert_eq!(root.path(), vec![puzzle.initial()]);
        assert!(root.solution().is_empty());
        assert!(root.moves().is_empty());
    }

    #[test]
    fn test_expand_links_children() {
        let puzzle = create_puzzle();
        let root = Rc::new(SearchNode::root(Rc::new(puzzle.initial().clone())));
        let children = root.expand(&puzzle).unwrap();

        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.depth(), 1);
            assert_eq!(child.path_cost(), 1);
            assert_eq!(child.parent(), Some(root.as_ref()));
            assert_eq!(child.action(), Some(child.state()));
            assert_eq!(child.path().len(), 2);
            assert_eq!(child.solution(), vec![child.state()]);
        }
    }

    #[test]
    fn test_moves_follow_ancestry() {
        let puzzle = create_puzzle();
        let root = Rc::new(SearchNode::root(Rc::new(puzzle.initial().clone())));

        let mut node = Rc::clone(&root);
        for col in 1..=3 {
            let next = node
                .expand(&puzzle)
                .unwrap()
                .into_iter()
                .find(|child| {
                    child.state().vehicle("red").map(|v| v.origin()) == Some(Cell::new(2, col))
                })
                .unwrap();
            node = Rc::new(next);
        }

        assert_eq!(node.depth(), 3);
        assert_eq!(node.path().first().copied(), Some(puzzle.initial()));
        let moves = node.moves();
        assert_eq!(moves.len(), 3);
        assert!(moves
            .iter()
            .all(|m| m.vehicle == "red" && m.direction == Direction::Right));
    }

    #[test]
    fn test_equality_ignores_parent() {
        let puzzle = create_puzzle();
        let state = Rc::new(puzzle.initial().clone());
        let root = Rc::new(SearchNode::root(Rc::clone(&state)));
        let child = SearchNode::child_node(&root, &puzzle, puzzle.initial().clone());

        assert_eq!(*root, child);
        assert_ne!(root.depth(), child.depth());
    }
}
