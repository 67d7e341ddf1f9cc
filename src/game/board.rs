//! Immutable tic-tac-toe board.

use std::str::FromStr;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board side length.
pub const SIZE: usize = 3;

/// Winning lines as `(row, col)` triples: rows, then columns, then diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Contents of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            '.' | '_' | '-' => Some(Mark::Empty),
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            _ => None,
        }
    }

    /// The player owning this mark.
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
        }
    }
}

/// A player in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

/// A cell coordinate. Legal only on boards where that cell is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A 3×3 board snapshot.
///
/// `Board` is a small `Copy` value: applying an action returns a new board
/// and leaves the original untouched, so search can branch freely from any
/// ancestor. Turn order holds for every value the public API produces, so
/// [`current_player`](Self::current_player) cannot fail; boards supplied
/// from outside go through [`from_rows`](Self::from_rows), `parse` or
/// deserialization and are validated there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "[[Mark; SIZE]; SIZE]", into = "[[Mark; SIZE]; SIZE]")
)]
pub struct Board {
    cells: [[Mark; SIZE]; SIZE],
}

impl Board {
    /// The empty starting board.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Builds a board from explicit rows.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBoard`] unless X has as many marks as O or one more,
    /// and at most one player has three in a row.
    pub fn from_rows(cells: [[Mark; SIZE]; SIZE]) -> Result<Self> {
        let board = Self { cells };
        board.validate()?;
        Ok(board)
    }

    /// Checks the turn-order invariant and the single-winner invariant.
    pub fn validate(&self) -> Result<()> {
        let (x, o) = self.counts();
        if x != o && x != o + 1 {
            return Err(Error::InvalidBoard {
                reason: format!("X has {x} marks and O has {o}; X must equal O or lead by one"),
            });
        }
        if self.has_line(Player::X) && self.has_line(Player::O) {
            return Err(Error::InvalidBoard {
                reason: "both players have three in a row".into(),
            });
        }
        Ok(())
    }

    /// The mark at `(row, col)`, or `None` out of range.
    pub fn mark(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// All cells, row by row.
    pub fn marks(&self) -> &[[Mark; SIZE]; SIZE] {
        &self.cells
    }

    /// Player to move: X when the mark counts are equal, otherwise O.
    pub fn current_player(&self) -> Player {
        let (x, o) = self.counts();
        if x == o {
            Player::X
        } else {
            Player::O
        }
    }

    /// Every empty cell, in row-major order.
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(SIZE * SIZE);
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &mark) in cells.iter().enumerate() {
                if mark == Mark::Empty {
                    actions.push(Action::new(row, col));
                }
            }
        }
        actions
    }

    /// New board with the current player's mark at `action`.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalMove`] if the cell is out of range or occupied.
    pub fn apply_action(&self, action: Action) -> Result<Board> {
        match self.mark(action.row, action.col) {
            None => Err(Error::IllegalMove {
                row: action.row,
                col: action.col,
                reason: "cell is outside the board",
            }),
            Some(Mark::Empty) => Ok(self.place(action)),
            Some(_) => Err(Error::IllegalMove {
                row: action.row,
                col: action.col,
                reason: "cell is already occupied",
            }),
        }
    }

    /// Player with three in a row, scanning rows, columns, then diagonals.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&line| {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            if a == b && b == c {
                a.player()
            } else {
                None
            }
        })
    }

    /// `true` once someone has won or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// `+1` if X has won, `-1` if O has won, `0` for a draw; `None` while
    /// the game is still running.
    pub fn utility(&self) -> Option<i32> {
        match self.winner() {
            Some(Player::X) => Some(1),
            Some(Player::O) => Some(-1),
            None if self.is_full() => Some(0),
            None => None,
        }
    }

    /// Places the current player's mark without checking the cell.
    /// `action` must be one of [`legal_actions`](Self::legal_actions).
    pub(crate) fn place(&self, action: Action) -> Board {
        debug_assert_eq!(self.cells[action.row][action.col], Mark::Empty);
        let mut next = *self;
        next.cells[action.row][action.col] = self.current_player().mark();
        next
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&m| m != Mark::Empty)
    }

    fn has_line(&self, player: Player) -> bool {
        let target = player.mark();
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == target))
    }

    fn counts(&self) -> (usize, usize) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(x, o), mark| match mark {
                Mark::X => (x + 1, o),
                Mark::O => (x, o + 1),
                Mark::Empty => (x, o),
            })
    }
}

impl TryFrom<[[Mark; SIZE]; SIZE]> for Board {
    type Error = Error;

    fn try_from(cells: [[Mark; SIZE]; SIZE]) -> Result<Self> {
        Board::from_rows(cells)
    }
}

impl From<Board> for [[Mark; SIZE]; SIZE] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses nine cells (`X`, `O`, or `.`/`_`/`-` for empty) in row-major
    /// order. Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = [[Mark::Empty; SIZE]; SIZE];
        let mut count = 0usize;
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let mark = Mark::from_char(c).ok_or_else(|| Error::InvalidBoard {
                reason: format!("unexpected character '{c}'"),
            })?;
            if count < SIZE * SIZE {
                cells[count / SIZE][count % SIZE] = mark;
            }
            count += 1;
        }
        if count != SIZE * SIZE {
            return Err(Error::InvalidBoard {
                reason: format!("expected 9 cells, got {count}"),
            });
        }
        Board::from_rows(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[(usize, usize)]) -> Board {
        moves.iter().fold(Board::initial(), |board, &mv| {
            board.apply_action(mv.into()).unwrap()
        })
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.current_player(), Player::X);
        assert_eq!(board.legal_actions().len(), 9);
        assert!(!board.is_terminal());
        assert_eq!(board.winner(), None);
        assert_eq!(board.utility(), None);
    }

    #[test]
    fn test_players_alternate() {
        let board = play(&[(1, 1)]);
        assert_eq!(board.current_player(), Player::O);
        assert_eq!(board.mark(1, 1), Some(Mark::X));
        let board = board.apply_action(Action::new(0, 0)).unwrap();
        assert_eq!(board.current_player(), Player::X);
        assert_eq!(board.mark(0, 0), Some(Mark::O));
    }

    #[test]
    fn test_legal_actions_are_row_major() {
        let board = play(&[(0, 1), (2, 2)]);
        let actions = board.legal_actions();
        assert_eq!(actions.len(), 7);
        let mut sorted = actions.clone();
        sorted.sort();
        assert_eq!(actions, sorted);
        assert_eq!(actions[0], Action::new(0, 0));
        assert!(!actions.contains(&Action::new(0, 1)));
    }

    #[test]
    fn test_top_row_win_for_x() {
        let board = play(&[(0, 0), (1, 1), (0, 1), (1, 0), (0, 2)]);
        assert_eq!(board.winner(), Some(Player::X));
        assert!(board.is_terminal());
        assert_eq!(board.utility(), Some(1));
    }

    #[test]
    fn test_column_and_diagonal_wins_for_o() {
        let column = play(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 1)]);
        assert_eq!(column.winner(), Some(Player::O));
        assert_eq!(column.utility(), Some(-1));

        let diagonal = play(&[(0, 0), (0, 2), (0, 1), (1, 1), (2, 2), (2, 0)]);
        assert_eq!(diagonal.winner(), Some(Player::O));
        assert!(diagonal.is_terminal());
    }

    #[test]
    fn test_full_board_draw() {
        let board = play(&[
            (0, 0),
            (0, 2),
            (0, 1),
            (1, 0),
            (1, 1),
            (2, 1),
            (2, 0),
            (2, 2),
            (1, 2),
        ]);
        assert_eq!(board.winner(), None);
        assert!(board.is_terminal());
        assert_eq!(board.utility(), Some(0));
        assert!(board.legal_actions().is_empty());
    }

    #[test]
    fn test_apply_action_leaves_original_untouched() {
        let board = play(&[(0, 0), (1, 1)]);
        let before = board;
        let snapshot = *board.marks();

        let child = board.apply_action(Action::new(2, 2)).unwrap();

        assert_eq!(board, before);
        assert_eq!(*board.marks(), snapshot);
        assert_eq!(board.mark(2, 2), Some(Mark::Empty));
        assert_eq!(child.mark(2, 2), Some(Mark::X));
        assert_ne!(child, board);
    }

    #[test]
    fn test_illegal_moves() {
        let board = play(&[(1, 1)]);
        assert_eq!(
            board.apply_action(Action::new(1, 1)),
            Err(Error::IllegalMove {
                row: 1,
                col: 1,
                reason: "cell is already occupied"
            })
        );
        assert!(matches!(
            board.apply_action(Action::new(3, 0)),
            Err(Error::IllegalMove { row: 3, col: 0, .. })
        ));
        assert!(matches!(
            board.apply_action(Action::new(0, 7)),
            Err(Error::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "XO. | .X. | ..O".parse().unwrap();
        assert_eq!(board.mark(0, 0), Some(Mark::X));
        assert_eq!(board.mark(0, 1), Some(Mark::O));
        assert_eq!(board.mark(2, 2), Some(Mark::O));
        assert_eq!(board.current_player(), Player::X);
        assert_eq!(board, play(&[(0, 0), (0, 1), (1, 1), (2, 2)]));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("XO".parse::<Board>().is_err());
        assert!("XO.......X".parse::<Board>().is_err());
        assert!("XQ.......".parse::<Board>().is_err());
    }

    #[test]
    fn test_invalid_counts() {
        // O ahead of X.
        assert!(matches!(
            "OO.X.....".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
        // X two ahead.
        assert!(matches!(
            "XXX......".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_two_winners_rejected() {
        assert!(matches!(
            "XXX OOO ...".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!("XXX OO. ...".parse::<Board>().is_ok());
    }

    #[test]
    fn test_try_from_rows_validates() {
        use Mark::{Empty as E, O, X};
        assert!(Board::try_from([[O, O, O], [E, E, E], [E, E, E]]).is_err());
        let board = Board::try_from([[X, O, E], [E, X, E], [E, E, E]]).unwrap();
        assert_eq!(board.current_player(), Player::O);
        assert_eq!(<[[Mark; SIZE]; SIZE]>::from(board), *board.marks());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_invalid_board() {
        let bad = r#"[["O","O","O"],["Empty","Empty","Empty"],["Empty","Empty","Empty"]]"#;
        assert!(serde_json::from_str::<Board>(bad).is_err());

        let board = play(&[(0, 0), (1, 1), (2, 2)]);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }
}
