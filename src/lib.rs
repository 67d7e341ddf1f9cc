//! A matched pair of classic search algorithms.
//!
//! - **Simulated Annealing for the TSP** ([`tsp`]): randomized swap-based
//!   local search with Metropolis acceptance and geometric cooling over a
//!   fixed, symmetric distance matrix, plus an exhaustive brute-force
//!   oracle for small instances. The annealing loop itself is generic and
//!   lives in [`sa`].
//! - **Minimax for tic-tac-toe** ([`game`]): immutable boards and a
//!   full-depth minimax search that returns the optimal action.
//!
//! Both halves follow the same shape, a pure evaluation function plus a
//! search procedure over a state space, but share no code. All randomness
//! is injectable or seeded, so runs are reproducible.
//!
//! # Example
//!
//! ```
//! use u_tourgame::game::{Board, MinimaxSolver};
//! use u_tourgame::tsp::{sample, AnnealingSolver, BruteForceSolver};
//!
//! let towns = sample::namibian_towns()?;
//! let subset = towns.restrict(&[0, 1, 2, 3, 4])?;
//! let exact = BruteForceSolver::default().optimal(&subset)?;
//! let annealed = AnnealingSolver::default().with_seed(3).solve(&subset)?;
//! assert!(annealed.cost() >= exact.cost);
//!
//! let mut board = Board::initial();
//! while let Some(action) = MinimaxSolver::new().best_action(&board) {
//!     board = board.apply_action(action)?;
//! }
//! assert_eq!(board.utility(), Some(0));
//! # Ok::<(), u_tourgame::Error>(())
//! ```

pub mod error;
pub mod game;
pub mod sa;
pub mod tsp;

pub use error::{Error, Result};
