//! Breadth-first graph search over puzzle states.
//!
//! Goal checks happen when a child is generated rather than when it is
//! dequeued, so the first goal found lies at minimal depth. A state is never
//! enqueued twice: it is skipped once it is either explored or waiting in the
//! frontier.

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Instant;

use log::{debug, info, warn};

use crate::board::{BoardState, Move};
use crate::error::Result;
use crate::node::SearchNode;
use crate::puzzle::Puzzle;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Abort once a node at this depth has been expanded
    pub max_depth: usize,
    /// Emit a progress signal every this many expanded nodes (0 disables it)
    pub progress_interval: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 500,
            progress_interval: 1000,
        }
    }
}

/// How a search ended
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The goal node; its ancestry is the solution
    Solved(Rc<SearchNode>),
    /// Every reachable state was explored without reaching the goal
    Exhausted,
    /// The search gave up after expanding a node at the depth limit
    DepthLimitReached { depth: usize },
}

impl SearchOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            SearchOutcome::Solved(_) => "solved",
            SearchOutcome::Exhausted => "exhausted",
            SearchOutcome::DepthLimitReached { .. } => "depth_limit_reached",
        }
    }
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub outcome: SearchOutcome,
    /// Number of nodes taken off the frontier and expanded
    pub nodes_expanded: usize,
    /// Size of the explored set when the search stopped
    pub states_explored: usize,
    /// Largest frontier seen
    pub max_frontier: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl SolverResult {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved(_))
    }

    pub fn node(&self) -> Option<&SearchNode> {
        match &self.outcome {
            SearchOutcome::Solved(node) => Some(node.as_ref()),
            _ => None,
        }
    }

    /// Moves of the solution, empty when unsolved or already at the goal
    pub fn moves(&self) -> Vec<Move> {
        self.node().map(SearchNode::moves).unwrap_or_default()
    }

    /// Board states from the initial one to the goal
    pub fn path(&self) -> Vec<&BoardState> {
        self.node().map(SearchNode::path).unwrap_or_default()
    }
}

/// Counters kept while a search runs
struct SearchStats {
    start_time: Instant,
    nodes_expanded: usize,
    max_frontier: usize,
}

impl SearchStats {
    fn new() -> Self {
        Self {
            start_time: Instant::now(),
            nodes_expanded: 0,
            max_frontier: 1,
        }
    }

    fn finish(&self, outcome: SearchOutcome, states_explored: usize) -> SolverResult {
        SolverResult {
            outcome,
            nodes_expanded: self.nodes_expanded,
            states_explored,
            max_frontier: self.max_frontier,
            time_elapsed_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }
}

/// Run breadth-first search, logging progress at `info` level
pub fn breadth_first_search(puzzle: &Puzzle, config: &SolverConfig) -> Result<SolverResult> {
    breadth_first_search_with_progress(puzzle, config, |expanded| {
        info!("Checked already {} nodes", expanded)
    })
}

/// Run breadth-first search, calling `on_progress` with the number of
/// expanded nodes every `config.progress_interval` expansions.
///
/// Errors only surface if a state fails to rebuild into a board, which
/// cannot happen for states produced by the puzzle itself.
pub fn breadth_first_search_with_progress<F>(
    puzzle: &Puzzle,
    config: &SolverConfig,
    mut on_progress: F,
) -> Result<SolverResult>
where
    F: FnMut(usize),
{
    let mut stats = SearchStats::new();

    let root = Rc::new(SearchNode::root(Rc::new(puzzle.initial().clone())));
    if puzzle.goal_test(root.state())? {
        debug!("Initial state of the puzzle is already a solution");
        return Ok(stats.finish(SearchOutcome::Solved(root), 0));
    }

    let mut in_frontier: HashSet<Rc<BoardState>> = HashSet::new();
    in_frontier.insert(Rc::clone(root.shared_state()));
    let mut frontier: VecDeque<Rc<SearchNode>> = VecDeque::new();
    frontier.push_back(root);
    let mut explored: HashSet<Rc<BoardState>> = HashSet::new();

    while let Some(node) = frontier.pop_front() {
        in_frontier.remove(node.state());
        explored.insert(Rc::clone(node.shared_state()));

        for child in node.expand(puzzle)? {
            if explored.contains(child.state()) || in_frontier.contains(child.state()) {
                continue;
            }
            if puzzle.goal_test(child.state())? {
                stats.nodes_expanded += 1;
                debug!(
                    "Solution found at depth {} after {} expansions",
                    child.depth(),
                    stats.nodes_expanded
                );
                return Ok(stats.finish(SearchOutcome::Solved(Rc::new(child)), explored.len()));
            }
            let child = Rc::new(child);
            in_frontier.insert(Rc::clone(child.shared_state()));
            frontier.push_back(child);
        }

        stats.nodes_expanded += 1;
        stats.max_frontier = stats.max_frontier.max(frontier.len());
        if config.progress_interval > 0 && stats.nodes_expanded % config.progress_interval == 0 {
            on_progress(stats.nodes_expanded);
        }

        if node.depth() >= config.max_depth {
            warn!(
                "Could not find a solution within the depth limit of {}",
                config.max_depth
            );
            return Ok(stats.finish(
                SearchOutcome::DepthLimitReached { depth: node.depth() },
                explored.len(),
            ));
        }
    }

    debug!("Solution could not be found: every reachable state was explored");
    Ok(stats.finish(SearchOutcome::Exhausted, explored.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::board::Board;
    use crate::vehicle::{Cell, Direction, Orientation};

    fn create_board(vehicles: &[(&str, usize, usize, usize, Orientation)]) -> Board {
        let mut board = Board::new(6, 2).unwrap();
        for &(id, row, col, length, orientation) in vehicles {
            board
                .insert(id, Cell::new(row, col), length, orientation)
                .unwrap();
        }
        board
    }

    /// red must wait for blue to move up, which needs green out of the way
    fn create_blocked_puzzle() -> Puzzle {
        let board = create_board(&[
            ("red", 2, 0, 2, Orientation::Horizontal),
            ("blue", 1, 3, 2, Orientation::Vertical),
            ("green", 0, 2, 2, Orientation::Horizontal),
            ("yellow", 4, 3, 2, Orientation::Vertical),
        ]);
        Puzzle::with_default_target(&board).unwrap()
    }

    /// Minimal number of moves by an independent exhaustive breadth-first sweep
    fn shortest_solution_length(puzzle: &Puzzle) -> Option<usize> {
        let mut distance: HashMap<BoardState, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        distance.insert(puzzle.initial().clone(), 0);
        queue.push_back(puzzle.initial().clone());

        while let Some(state) = queue.pop_front() {
            let d = distance[&state];
            for next in Board::from_state(&state).unwrap().legal_neighbor_states() {
                if !distance.contains_key(&next) {
                    distance.insert(next.clone(), d + 1);
                    queue.push_back(next);
                }
            }
        }

        distance
            .iter()
            .filter(|(state, _)| puzzle.goal_test(state).unwrap())
            .map(|(_, d)| *d)
            .min()
    }

    #[test]
    fn test_initial_state_already_solved() {
        let board = create_board(&[("red", 2, 4, 2, Orientation::Horizontal)]);
        let puzzle = Puzzle::with_default_target(&board).unwrap();

        let result = breadth_first_search(&puzzle, &SolverConfig::default()).unwrap();
        let node = result.node().unwrap();
        assert_eq!(node.path_cost(), 0);
        assert_eq!(node.depth(), 0);
        assert!(node.solution().is_empty());
        assert!(result.moves().is_empty());
        assert_eq!(result.nodes_expanded, 0);
    }

    #[test]
    fn test_unobstructed_target_drives_out() {
        let board = create_board(&[
            ("red", 2, 0, 2, Orientation::Horizontal),
            ("blue", 0, 4, 2, Orientation::Vertical),
        ]);
        let puzzle = Puzzle::with_default_target(&board).unwrap();

        let result = puzzle.solve(&SolverConfig::default()).unwrap();
        assert!(result.is_solved());
        assert_eq!(result.node().map(SearchNode::path_cost), Some(4));
        assert!(result
            .moves()
            .iter()
            .all(|m| m.vehicle == "red" && m.direction == Direction::Right));
        assert_eq!(result.path().len(), 5);
        assert_eq!(result.path()[0], puzzle.initial());
    }

    #[test]
    fn test_blocked_puzzle_finds_shortest_solution() {
        let puzzle = create_blocked_puzzle();
        let result = breadth_first_search(&puzzle, &SolverConfig::default()).unwrap();

        let node = result.node().unwrap();
        assert_eq!(node.path_cost(), 6);
        assert_eq!(Some(node.path_cost()), shortest_solution_length(&puzzle));
        assert!(puzzle.goal_test(node.state()).unwrap());

        let moves = result.moves();
        assert_eq!(moves.len(), 6);
        assert_eq!(
            moves.iter().filter(|m| m.vehicle == "red").count(),
            4
        );
        assert!(moves.contains(&Move {
            vehicle: "blue".to_string(),
            direction: Direction::Up,
        }));
    }

    #[test]
    fn test_solution_replays_on_board() {
        let puzzle = create_blocked_puzzle();
        let result = breadth_first_search(&puzzle, &SolverConfig::default()).unwrap();

        let mut board = Board::from_state(puzzle.initial()).unwrap();
        for (before, after) in result.path().windows(2).map(|pair| (pair[0], pair[1])) {
            assert_eq!(&board.to_state(), before);
            let mv = before.move_to(after).unwrap();
            let vehicle = board.vehicle(&mv.vehicle).unwrap().clone();
            let step = crate::vehicle::Step::ALL
                .into_iter()
                .find(|&s| Direction::from_step(vehicle.orientation(), s) == mv.direction)
                .unwrap();
            board.slide_vehicle(&mv.vehicle, step).unwrap();
        }
        assert!(puzzle.goal_test(&board.to_state()).unwrap());
    }

    #[test]
    fn test_packed_board_is_exhausted() {
        let mut board = Board::new(6, 2).unwrap();
        for row in 0..6 {
            let first = if row == 2 { "red".to_string() } else { format!("a{}", row) };
            board
                .insert(first, Cell::new(row, 0), 2, Orientation::Horizontal)
                .unwrap();
            board
                .insert(format!("b{}", row), Cell::new(row, 2), 2, Orientation::Horizontal)
                .unwrap();
            board
                .insert(format!("c{}", row), Cell::new(row, 4), 2, Orientation::Horizontal)
                .unwrap();
        }
        let puzzle = Puzzle::with_default_target(&board).unwrap();
        assert!(puzzle.actions(puzzle.initial()).unwrap().is_empty());

        let result = breadth_first_search(&puzzle, &SolverConfig::default()).unwrap();
        assert!(matches!(result.outcome, SearchOutcome::Exhausted));
        assert_eq!(result.nodes_expanded, 1);
        assert_eq!(result.states_explored, 1);
        assert!(result.moves().is_empty());
    }

    #[test]
    fn test_walled_off_exit_is_exhausted() {
        let board = create_board(&[
            ("red", 2, 0, 2, Orientation::Horizontal),
            ("wall", 0, 3, 6, Orientation::Vertical),
        ]);
        let puzzle = Puzzle::with_default_target(&board).unwrap();

        let result = breadth_first_search(&puzzle, &SolverConfig::default()).unwrap();
        assert!(matches!(result.outcome, SearchOutcome::Exhausted));
        // red at column 0 and column 1
        assert_eq!(result.states_explored, 2);
    }

    #[test]
    fn test_depth_limit_aborts_search() {
        let puzzle = create_blocked_puzzle();
        let config = SolverConfig {
            max_depth: 1,
            ..SolverConfig::default()
        };

        let result = breadth_first_search(&puzzle, &config).unwrap();
        assert!(matches!(
            result.outcome,
            SearchOutcome::DepthLimitReached { depth: 1 }
        ));
        assert!(!result.is_solved());
        assert_eq!(result.outcome.name(), "depth_limit_reached");
    }

    #[test]
    fn test_progress_signal() {
        let puzzle = create_blocked_puzzle();
        let config = SolverConfig {
            progress_interval: 2,
            ..SolverConfig::default()
        };

        let mut signals = Vec::new();
        let result =
            breadth_first_search_with_progress(&puzzle, &config, |n| signals.push(n)).unwrap();

        assert!(result.is_solved());
        assert!(!signals.is_empty());
        assert!(signals.iter().all(|n| n % 2 == 0));
        assert!(signals.windows(2).all(|w| w[1] == w[0] + 2));
        assert!(signals.last().copied().unwrap_or(0) <= result.nodes_expanded);
    }

    #[test]
    fn test_progress_signal_disabled() {
        let puzzle = create_blocked_puzzle();
        let config = SolverConfig {
            progress_interval: 0,
            ..SolverConfig::default()
        };

        let mut calls = 0;
        breadth_first_search_with_progress(&puzzle, &config, |_| calls += 1).unwrap();
        assert_eq!(calls, 0);
    }
}
