//! The [`n` queens puzzle](https://en.wikipedia.org/wiki/Eight_queens_puzzle)
//!  is the problem of placing `n` chess queens on an `n`×`n` chessboard so that
//! no two queens threaten each other.
//!
//! Every row and every column needs exactly one queen, so those are primary
//! constraints. A diagonal holds at most one queen, so diagonals are secondary.

use crate::ExactCover;

/// An instance of the `n` queens problem.
#[derive(Debug)]
pub struct NQueens {
    /// The list of possible positions that could solve the `n` queens puzzle.
    pub possibilities: Vec<Possibility>,
    /// The list of constraints that must be satisfied for this `n` queens
    /// puzzle.
    pub constraints: Vec<Constraint>,
    /// The length of the chess board side, equal to `n`.
    pub side_length: usize,
    /// The queens that are fixed when the puzzle is created.
    pub filled_values: Vec<Possibility>,
}

impl NQueens {
    /// Create a new instance of the `n` queens problem with the given filled
    /// values and side length.
    ///
    /// Squares attacked by a filled queen are not offered as possibilities,
    /// and the constraints the filled queens satisfy are dropped. Filled
    /// queens are assumed not to attack each other.
    ///
    /// Filled queens must be on the board. Debug builds panic on one that is
    /// not, release builds leave it out.
    pub fn new(side_length: usize, filled_values: impl IntoIterator<Item = Possibility>) -> Self {
        let filled_values: Vec<_> = filled_values
            .into_iter()
            .inspect(|poss| {
                debug_assert!(
                    poss.is_on_board(side_length),
                    "queen at {poss:?} is off the board"
                )
            })
            .filter(|poss| poss.is_on_board(side_length))
            .collect();

        let satisfied: Vec<_> = filled_values
            .iter()
            .flat_map(|poss| poss.satisfied_constraints(side_length))
            .collect();

        let possibilities = Possibility::all(side_length)
            .filter(|poss| {
                poss.satisfied_constraints(side_length)
                    .all(|cons| !satisfied.contains(&cons))
            })
            .collect();

        let constraints = Constraint::all(side_length)
            .filter(|cons| !satisfied.contains(cons))
            .collect();

        Self {
            possibilities,
            constraints,
            side_length,
            filled_values,
        }
    }
}

impl ExactCover for NQueens {
    type Constraint = Constraint;
    type Possibility = Possibility;

    fn satisfied_constraints(&self, poss: &Self::Possibility) -> Vec<Self::Constraint> {
        poss.satisfied_constraints(self.side_length).collect()
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        matches!(
            cons,
            Constraint::LeadingDiagonal { .. } | Constraint::TrailingDiagonal { .. }
        )
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}

/// A position on the chess board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    /// The row index, ranging from 0 to `n - 1`.
    pub row: usize,
    /// The column index, ranging form 0 to `n - 1`.
    pub column: usize,
}

impl Possibility {
    /// Return an iterator over all positions on the chess board for a given
    /// side length, in row-major order.
    pub fn all(side_length: usize) -> impl Iterator<Item = Self> {
        (0..side_length)
            .flat_map(move |row| (0..side_length).map(move |column| Possibility { row, column }))
    }

    /// Return true if this position lies on a board of the given side length.
    pub fn is_on_board(self, side_length: usize) -> bool {
        self.row < side_length && self.column < side_length
    }

    /// Return the leading diagonal index for a given side length.
    ///
    /// The position must be on the board.
    ///
    /// This value ranges from 0 to `2n - 2`.
    pub fn leading_diagonal(self, side_length: usize) -> usize {
        self.column + (side_length - 1) - self.row
    }

    /// Return the trailing diagonal index.
    ///
    /// The value ranges from 0 to `2n - 2`.
    pub fn trailing_diagonal(self) -> usize {
        self.row + self.column
    }

    /// Return an iterator over all the `Constraint`s that are satisfied by this
    /// `Possibility`.
    pub fn satisfied_constraints(self, side_length: usize) -> impl Iterator<Item = Constraint> {
        [
            Constraint::Row { index: self.row },
            Constraint::Column { index: self.column },
            Constraint::LeadingDiagonal {
                index: self.leading_diagonal(side_length),
            },
            Constraint::TrailingDiagonal {
                index: self.trailing_diagonal(),
            },
        ]
        .into_iter()
    }
}

/// A condition which must be satisfied in order to solve an `n` queens puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// A condition that a given row should have exactly one queen.
    Row {
        /// The row index
        index: usize,
    },
    /// A condition that a given column should have exactly one queen.
    Column {
        /// The column index
        index: usize,
    },
    /// A condition that a leading diagonal should have at most one queen.
    LeadingDiagonal {
        /// The leading diagonal index
        index: usize,
    },
    /// A condition that a trailing diagonal should have at most one queen.
    TrailingDiagonal {
        /// The trailing diagonal index
        index: usize,
    },
}

impl Constraint {
    /// Return an iterator over all possible `Constraint`s for a given
    /// `side_length`.
    pub fn all(side_length: usize) -> impl Iterator<Item = Constraint> {
        let diagonals = (2 * side_length).saturating_sub(1);

        let row_it = (0..side_length).map(|index| Constraint::Row { index });
        let column_it = (0..side_length).map(|index| Constraint::Column { index });
        let leading_it = (0..diagonals).map(|index| Constraint::LeadingDiagonal { index });
        let trailing_it = (0..diagonals).map(|index| Constraint::TrailingDiagonal { index });

        row_it.chain(column_it).chain(leading_it).chain(trailing_it)
    }
}
