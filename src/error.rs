//! Errors reported while building a [`Matrix`](crate::Matrix) or reading a
//! puzzle.

/// A malformed exact cover model, rejected before any search begins.
///
/// Rows are identified by their position in input order, starting at 0.
/// Column identifiers are reported using their `Debug` rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A row names a column that is not part of the column list.
    #[error("row {row} references unknown column `{column}`")]
    UnknownColumn {
        /// Position of the offending row.
        row: usize,
        /// The unknown column identifier.
        column: String,
    },
    /// A row has no columns, so it can never be part of an exact cover.
    #[error("row {row} does not cover any column")]
    EmptyRow {
        /// Position of the offending row.
        row: usize,
    },
    /// The same column identifier was declared more than once.
    #[error("column `{column}` is declared more than once")]
    DuplicateColumn {
        /// The repeated column identifier.
        column: String,
    },
    /// A row lists the same column more than once.
    #[error("row {row} lists column `{column}` more than once")]
    RepeatedColumn {
        /// Position of the offending row.
        row: usize,
        /// The repeated column identifier.
        column: String,
    },
}

/// A puzzle description that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// The input does not have one character per cell.
    #[error("expected {expected} cells, found {found}")]
    WrongLength {
        /// Number of cells in the puzzle.
        expected: usize,
        /// Number of characters in the input.
        found: usize,
    },
    /// A cell holds something other than a digit.
    #[error("cell {index} holds `{found}`, expected a digit")]
    NotADigit {
        /// Cell position, in row-major order.
        index: usize,
        /// The character found.
        found: char,
    },
    /// A cell value is larger than the side length of the puzzle.
    #[error("cell {index} holds {value}, but values must be at most {max}")]
    ValueOutOfRange {
        /// Cell position, in row-major order.
        index: usize,
        /// The value found.
        value: usize,
        /// Largest value allowed.
        max: usize,
    },
}
