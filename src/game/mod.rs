//! Tic-tac-toe and minimax search.
//!
//! [`Board`] is an immutable 3×3 position from which the player to move,
//! the legal actions, the winner and the utility are derived.
//! [`MinimaxSolver`] picks the game-theoretically optimal action.
//!
//! An interactive front end validates human input with
//! [`Board::legal_actions`] or by handling [`Error::IllegalMove`]
//! from [`Board::apply_action`] and asking again.
//!
//! [`Error::IllegalMove`]: crate::Error::IllegalMove

mod board;
mod minimax;

pub use board::{Action, Board, Mark, Player, SIZE};
pub use minimax::{best_action, max_value, min_value, MinimaxSolver, SearchOutcome};
