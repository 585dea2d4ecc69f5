//! A [Sudoku puzzle](https://en.wikipedia.org/wiki/Sudoku) is a
//! `n^2` × `n^2` array with sub-arrays of size `n` × `n`. Each row, column, and
//! sub-array contains the values `1` through `n^2` with no repeats.
//!
//! The puzzle is laid out with one constraint per cell, per (row, value), per
//! (column, value) and per (square, value): `4 n^4` constraints in all, 324 for
//! the usual 9×9 board.

use crate::{error::PuzzleError, ExactCover};
use std::collections::HashMap;

/// An instance of a Sudoku puzzle.
#[derive(Debug)]
pub struct Sudoku {
    /// The side length of one square (sub-grid).
    pub box_side_length: usize,
    /// The list of possible values and positions that are valid for this Sudoku
    /// puzzle.
    pub possibilities: Vec<Possibility>,
    /// The list of constraints that must be satisfied for this Sudoku puzzle.
    pub constraints: Vec<Constraint>,
    /// The list of values and positions that are given as fixed when the
    /// puzzle is created.
    pub filled_values: Vec<Possibility>,
}

impl Sudoku {
    /// Create a new Sudoku puzzle.
    ///
    /// The puzzle has size `n^2` × `n^2` (where `n = box_side_length`) and the
    /// given list of filled values. A filled cell only offers its given value,
    /// so every solution contains the filled values as well. A cell given two
    /// different values offers nothing, and the puzzle has no solution.
    ///
    /// Filled values must be on the board and in `1..=n^2`. Debug builds
    /// panic on one that is not, release builds leave it out.
    pub fn new(box_side_length: usize, filled_values: impl IntoIterator<Item = Possibility>) -> Self {
        let side_length = box_side_length * box_side_length;
        let filled_values: Vec<_> = filled_values
            .into_iter()
            .inspect(|poss| {
                debug_assert!(
                    poss.is_on_board(side_length),
                    "given {poss:?} is off the board"
                );
                debug_assert!(
                    0 < poss.value && poss.value <= side_length,
                    "Symbol values should be in range (1..=side_length)"
                )
            })
            .filter(|poss| {
                poss.is_on_board(side_length) && 0 < poss.value && poss.value <= side_length
            })
            .collect();

        let mut givens: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for poss in &filled_values {
            givens
                .entry((poss.row, poss.column))
                .or_default()
                .push(poss.value);
        }

        let possibilities = (0..side_length)
            .flat_map(|row| (0..side_length).map(move |column| (row, column)))
            .flat_map(|(row, column)| {
                let values: Vec<usize> = match givens.get(&(row, column)) {
                    None => (1..=side_length).collect(),
                    Some(values) if values.iter().all(|value| *value == values[0]) => {
                        vec![values[0]]
                    }
                    Some(_) => Vec::new(),
                };

                values
                    .into_iter()
                    .map(move |value| Possibility::new(row, column, value, box_side_length))
            })
            .collect();

        Self {
            box_side_length,
            possibilities,
            constraints: Constraint::all(box_side_length).collect(),
            filled_values,
        }
    }

    /// Read a puzzle from a string of `n^4` characters in row-major order.
    ///
    /// `0` or `.` marks an empty cell. Values above 9 are written as letters,
    /// `a` for 10 and so on.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the input has the wrong length or a cell
    /// that is not a valid value.
    pub fn parse(sudoku_input: &str, box_side_length: usize) -> Result<Self, PuzzleError> {
        let side_length = box_side_length * box_side_length;

        log::debug!(
            "Parsing sudoku puzzle input [{}] for side length [{}].",
            sudoku_input,
            side_length
        );

        let found = sudoku_input.chars().count();
        if found != side_length * side_length {
            return Err(PuzzleError::WrongLength {
                expected: side_length * side_length,
                found,
            });
        }

        let mut filled_values = Vec::new();
        for (index, c) in sudoku_input.chars().enumerate() {
            if c == '.' {
                continue;
            }

            let value = c
                .to_digit(36)
                .ok_or(PuzzleError::NotADigit { index, found: c })? as usize;
            if value > side_length {
                return Err(PuzzleError::ValueOutOfRange {
                    index,
                    value,
                    max: side_length,
                });
            }
            if value != 0 {
                filled_values.push(Possibility::new(
                    index / side_length,
                    index % side_length,
                    value,
                    box_side_length,
                ));
            }
        }

        log::debug!("Generated filled_values [{:?}].", filled_values);

        Ok(Self::new(box_side_length, filled_values))
    }
}

/// Format a list of sudoku possibilities into a string format matching the
/// input of [`Sudoku::parse`], using `0` for cells with no value.
///
/// When two possibilities share a cell, the later one wins. Possibilities off
/// the board are skipped.
pub fn render<'a>(
    possibilities: impl IntoIterator<Item = &'a Possibility>,
    box_side_length: usize,
) -> String {
    let side_length = box_side_length * box_side_length;
    let mut output = vec!['0'; side_length * side_length];

    for possibility in possibilities {
        if !possibility.is_on_board(side_length) {
            continue;
        }

        let index = possibility.row * side_length + possibility.column;
        output[index] = char::from_digit(possibility.value as u32, 36).unwrap_or('?');
    }

    output.into_iter().collect()
}

impl ExactCover for Sudoku {
    type Constraint = Constraint;
    type Possibility = Possibility;

    fn satisfied_constraints(&self, poss: &Self::Possibility) -> Vec<Self::Constraint> {
        poss.satisfied_constraints().collect()
    }

    fn is_optional(&self, _cons: &Self::Constraint) -> bool {
        false
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}

/// A position and value for a box inside of a Sudoku puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    /// The row position of the box.
    ///
    /// The values ranges from 0 to `n - 1`, where `n` is the length of the
    /// Sudoku board.
    pub row: usize,

    /// The column position of the box.
    ///
    /// The values ranges from 0 to `n - 1`, where `n` is the length of the
    /// Sudoku board.
    pub column: usize,

    /// The index of the subgrid.
    ///
    /// The values ranges from 0 to `n - 1`, where `n` is the length of the
    /// Sudoku board. This field is redundant in identifying where the box is
    /// inside of the Sudoku board, however it is necessary to speed up checking
    /// which `Constraint`s are satisfied by this `Possibility`.
    pub square: usize,

    /// The value present inside of the box.
    ///
    /// The values ranges from 1 to `n`, where `n` is the length of the
    /// Sudoku board.
    pub value: usize,
}

impl Possibility {
    /// Create a `Possibility`, working out its square from the position.
    pub fn new(row: usize, column: usize, value: usize, box_side_length: usize) -> Self {
        let square = (row / box_side_length) * box_side_length + column / box_side_length;

        Possibility {
            row,
            column,
            square,
            value,
        }
    }

    /// Return true if the cell lies on a board with `side_length` rows and
    /// columns.
    pub fn is_on_board(self, side_length: usize) -> bool {
        self.row < side_length && self.column < side_length
    }

    /// Return an iterator over the `Constraint`s that are satisfied by this
    /// `Possibility`.
    pub fn satisfied_constraints(self) -> impl Iterator<Item = Constraint> {
        [
            Constraint::RowColumn {
                row: self.row,
                column: self.column,
            },
            Constraint::RowNumber {
                row: self.row,
                value: self.value,
            },
            Constraint::ColumnNumber {
                column: self.column,
                value: self.value,
            },
            Constraint::SquareNumber {
                square: self.square,
                value: self.value,
            },
        ]
        .into_iter()
    }
}

/// A condition which must be satisfied in order to solve a Sudoku puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// A condition that each cell holds exactly one value.
    RowColumn {
        /// The row index
        row: usize,
        /// The column index
        column: usize,
    },
    /// A condition that each row should only have a single instance of a
    /// numeric value.
    RowNumber {
        /// The row index
        row: usize,
        /// The unique numeric value
        value: usize,
    },
    /// A condition that each column should only have a single instance of a
    /// numeric value.
    ColumnNumber {
        /// The column index
        column: usize,
        /// The unique numeric value
        value: usize,
    },
    /// A condition that each square (or sub-grid) should only have a single
    /// instance of a numeric value.
    SquareNumber {
        /// The square index.
        square: usize,
        /// The unique numeric value
        value: usize,
    },
}

impl Constraint {
    /// Return an iterator over all `Constraint`s for a puzzle with the given
    /// square side length, grouped by kind.
    pub fn all(box_side_length: usize) -> impl Iterator<Item = Constraint> {
        let side_length = box_side_length * box_side_length;
        let pairs = move || {
            (0..side_length).flat_map(move |index| (0..side_length).map(move |other| (index, other)))
        };

        let row_column_it = pairs().map(|(row, column)| Constraint::RowColumn { row, column });
        let row_number_it = pairs().map(|(row, value)| Constraint::RowNumber {
            row,
            value: value + 1,
        });
        let column_number_it = pairs().map(|(column, value)| Constraint::ColumnNumber {
            column,
            value: value + 1,
        });
        let square_number_it = pairs().map(|(square, value)| Constraint::SquareNumber {
            square,
            value: value + 1,
        });

        row_column_it
            .chain(row_number_it)
            .chain(column_number_it)
            .chain(square_number_it)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, column: usize, value: usize) -> Possibility {
        Possibility::new(row, column, value, 2)
    }

    const SMALL: &str = "1234300220034321";

    #[test]
    fn squares_are_numbered_row_major() {
        assert_eq!(Possibility::new(0, 0, 1, 3).square, 0);
        assert_eq!(Possibility::new(0, 8, 1, 3).square, 2);
        assert_eq!(Possibility::new(4, 4, 1, 3).square, 4);
        assert_eq!(Possibility::new(8, 0, 1, 3).square, 6);
        assert_eq!(Possibility::new(8, 8, 1, 3).square, 8);
    }

    #[test]
    fn full_board_has_standard_dimensions() {
        let sudoku = Sudoku::new(3, []);
        let matrix = sudoku.matrix().unwrap();

        assert_eq!(matrix.num_columns(), 324);
        assert_eq!(matrix.num_rows(), 729);
        assert!(matrix.columns().all(|column| matrix.column_size(column) == 9));
    }

    #[test]
    fn filled_cells_offer_only_their_value() {
        let sudoku = Sudoku::parse(SMALL, 2).unwrap();

        assert_eq!(sudoku.filled_values.len(), 12);
        // 12 filled cells with one value, 4 empty cells with four
        assert_eq!(sudoku.possibilities.len(), 12 + 4 * 4);
        assert_eq!(sudoku.constraints.len(), 64);
        assert!(sudoku.possibilities.contains(&p(0, 0, 1)));
        assert!(!sudoku.possibilities.contains(&p(0, 0, 2)));
        assert!(sudoku.possibilities.contains(&p(1, 1, 3)));
    }

    #[test]
    fn solve_small_sudoku() {
        let sudoku = Sudoku::parse(SMALL, 2).unwrap();
        let mut matrix = sudoku.matrix().unwrap();

        let solutions = matrix.all_solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(render(&solutions[0], 2), "1234341221434321");
    }

    #[test]
    fn conflicting_givens_have_no_solution() {
        let sudoku = Sudoku::new(2, [p(0, 0, 1), p(0, 0, 2)]);
        let mut matrix = sudoku.matrix().unwrap();

        assert!(!sudoku.possibilities.iter().any(|poss| poss.row == 0 && poss.column == 0));
        assert_eq!(matrix.count_solutions(), 0);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            Sudoku::parse("123", 2).unwrap_err(),
            PuzzleError::WrongLength {
                expected: 16,
                found: 3
            }
        );
        assert_eq!(
            Sudoku::parse("12343002200343-1", 2).unwrap_err(),
            PuzzleError::NotADigit {
                index: 14,
                found: '-'
            }
        );
        assert_eq!(
            Sudoku::parse("1234300220034325", 2).unwrap_err(),
            PuzzleError::ValueOutOfRange {
                index: 15,
                value: 5,
                max: 4
            }
        );
    }

    #[test]
    fn render_marks_missing_cells() {
        assert_eq!(render(&[p(0, 1, 3), p(3, 3, 4)], 2), "0300000000000004");
    }

    #[test]
    fn render_skips_cells_off_the_board() {
        assert_eq!(render(&[p(0, 4, 2), p(4, 0, 1), p(1, 0, 3)], 2), "0000300000000000");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the board")]
    fn off_board_given_is_caught() {
        Sudoku::new(2, [p(0, 4, 1)]);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn off_board_given_is_left_out() {
        let sudoku = Sudoku::new(2, [p(0, 4, 1)]);

        assert!(sudoku.filled_values.is_empty());
        assert_eq!(sudoku.matrix().unwrap().count_solutions(), 288);
    }
}
