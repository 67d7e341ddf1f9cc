//! Full-depth minimax search.
//!
//! X maximizes the utility, O minimizes it. Every line of play is explored
//! to the end; there is no pruning or depth limit. The full tic-tac-toe
//! tree has 549 946 nodes, so an exhaustive search from the empty board is
//! cheap.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::board::{Action, Board, Player};

/// Outcome of a search from one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Chosen action; `None` when the position is already terminal.
    pub action: Option<Action>,
    /// Game-theoretic value of the position under optimal play.
    pub value: i32,
    /// Positions visited, the root included.
    pub nodes: u64,
}

/// Value of `board` when the player to move maximizes.
pub fn max_value(board: &Board) -> i32 {
    Search::pure().max_value(*board)
}

/// Value of `board` when the player to move minimizes.
pub fn min_value(board: &Board) -> i32 {
    Search::pure().min_value(*board)
}

/// Optimal action for the player to move, or `None` on a terminal board.
pub fn best_action(board: &Board) -> Option<Action> {
    MinimaxSolver::new().best_action(board)
}

/// Minimax solver with an optional transposition table.
///
/// The table memoizes position values across calls. It never changes which
/// action is chosen: ties are still broken by row-major order.
#[derive(Debug, Default)]
pub struct MinimaxSolver {
    table: Option<FxHashMap<(Board, bool), i32>>,
}

impl MinimaxSolver {
    /// Plain exhaustive search.
    pub fn new() -> Self {
        Self { table: None }
    }

    /// Search that memoizes position values.
    pub fn with_transposition_table() -> Self {
        Self {
            table: Some(FxHashMap::default()),
        }
    }

    /// Number of memoized positions (0 without a table).
    pub fn table_len(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.len())
    }

    /// Optimal action for the player to move, or `None` on a terminal board.
    pub fn best_action(&mut self, board: &Board) -> Option<Action> {
        self.search(board).action
    }

    /// Searches `board` and reports the chosen action, its value, and the
    /// number of positions visited.
    ///
    /// X takes the first action whose value strictly exceeds all earlier
    /// ones, O the first strictly below; actions are tried row-major.
    pub fn search(&mut self, board: &Board) -> SearchOutcome {
        if let Some(value) = board.utility() {
            return SearchOutcome {
                action: None,
                value,
                nodes: 1,
            };
        }

        let mut search = Search {
            table: self.table.as_mut(),
            nodes: 1,
        };
        let player = board.current_player();
        let mut best: Option<(Action, i32)> = None;

        for action in board.legal_actions() {
            let child = board.place(action);
            let value = match player {
                Player::X => search.min_value(child),
                Player::O => search.max_value(child),
            };
            let improves = match (best, player) {
                (None, _) => true,
                (Some((_, b)), Player::X) => value > b,
                (Some((_, b)), Player::O) => value < b,
            };
            if improves {
                best = Some((action, value));
            }
        }

        let outcome = SearchOutcome {
            action: best.map(|(a, _)| a),
            value: best.map_or(0, |(_, v)| v),
            nodes: search.nodes,
        };
        debug!(
            ?player,
            action = ?outcome.action,
            value = outcome.value,
            nodes = outcome.nodes,
            "minimax search"
        );
        outcome
    }
}

/// Recursion state for one search.
struct Search<'t> {
    table: Option<&'t mut FxHashMap<(Board, bool), i32>>,
    nodes: u64,
}

impl Search<'_> {
    fn pure() -> Self {
        Search {
            table: None,
            nodes: 0,
        }
    }

    fn max_value(&mut self, board: Board) -> i32 {
        self.value(board, true)
    }

    fn min_value(&mut self, board: Board) -> i32 {
        self.value(board, false)
    }

    fn value(&mut self, board: Board, maximizing: bool) -> i32 {
        self.nodes += 1;
        if let Some(utility) = board.utility() {
            return utility;
        }
        if let Some(&cached) = self.table.as_ref().and_then(|t| t.get(&(board, maximizing))) {
            return cached;
        }

        let children = board.legal_actions().into_iter().map(|a| board.place(a));
        let value = if maximizing {
            children.fold(i32::MIN, |v, child| v.max(self.min_value(child)))
        } else {
            children.fold(i32::MAX, |v, child| v.min(self.max_value(child)))
        };

        if let Some(table) = self.table.as_mut() {
            table.insert((board, maximizing), value);
        }
        value
    }
}
