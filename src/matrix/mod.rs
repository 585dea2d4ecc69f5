//! The toroidal sparse matrix that Algorithm X dances over.
//!
//! Arena layout: index 0 is the root, indices `1..=n` are the column headers
//! in the order they were declared, and the row nodes follow, row by row.

mod builder;
mod column;
pub(crate) mod node;

pub use builder::MatrixBuilder;

use crate::{
    error::ModelError,
    solver::{self, Control, Solutions},
};
use column::Header;
use node::{iter, Nodes, ROOT};
use std::{fmt::Debug, hash::Hash};

/// Links and column bookkeeping, without the row identifiers.
#[derive(Debug, Clone)]
pub(crate) struct Links<C> {
    pub nodes: Nodes,
    pub headers: Vec<Header<C>>,
    /// Columns covered and not yet uncovered, oldest first.
    #[cfg(debug_assertions)]
    pub cover_log: Vec<usize>,
}

impl<C> Links<C> {
    pub(crate) fn new(nodes: Nodes, headers: Vec<Header<C>>) -> Self {
        Links {
            nodes,
            headers,
            #[cfg(debug_assertions)]
            cover_log: Vec::new(),
        }
    }

    /// True once every primary column has been covered.
    pub(crate) fn is_solved(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }
}

/// Handle to one column of a [`Matrix`].
///
/// Handles are only meaningful for the matrix that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column(usize);

/// An exact cover problem laid out as dancing links.
///
/// `R` identifies rows and `C` identifies columns. The matrix is built once,
/// then searched any number of times; each search leaves it exactly as it
/// found it.
#[derive(Debug, Clone)]
pub struct Matrix<R, C> {
    pub(crate) links: Links<C>,
    pub(crate) rows: Vec<R>,
}

impl<R, C> Matrix<R, C> {
    /// Start building a matrix column by column and row by row.
    pub fn builder() -> MatrixBuilder<R, C> {
        MatrixBuilder::new()
    }

    /// Build a matrix from a list of primary columns and a list of rows.
    ///
    /// Each row is given as its identifier and the columns it covers. Column
    /// and row order are preserved, and determine the order in which
    /// solutions are found.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a row is empty, if a row names an unknown
    /// column or the same column twice, or if a column is declared twice.
    pub fn new<I, J, K>(columns: I, rows: J) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = C>,
        J: IntoIterator<Item = (R, K)>,
        K: IntoIterator<Item = C>,
        C: Eq + Hash + Debug,
    {
        rows.into_iter()
            .fold(
                Self::builder().columns(columns),
                |builder, (row, row_columns)| builder.row(row, row_columns),
            )
            .build()
    }

    /// Number of declared columns, primary and secondary.
    pub fn num_columns(&self) -> usize {
        self.links.headers.len()
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Row identifiers, in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// All columns, in input order, whether covered or not.
    pub fn columns(&self) -> impl Iterator<Item = Column> {
        (1..=self.links.headers.len()).map(Column)
    }

    /// Look up a column by its identifier.
    pub fn column(&self, id: &C) -> Option<Column>
    where
        C: PartialEq,
    {
        self.links
            .headers
            .iter()
            .position(|header| header.id == *id)
            .map(|index| Column(index + 1))
    }

    /// The identifier a column was declared with.
    pub fn column_id(&self, column: Column) -> &C {
        &self.links.header(column.0).id
    }

    /// Number of rows currently linked into a column.
    pub fn column_size(&self, column: Column) -> usize {
        self.links.header(column.0).size
    }

    /// Return true if the column was declared secondary.
    pub fn is_secondary(&self, column: Column) -> bool {
        self.links.header(column.0).secondary
    }

    /// Primary columns that are not covered, left to right.
    pub fn active_columns(&self) -> impl Iterator<Item = Column> + '_ {
        iter::right(&self.links.nodes, ROOT).map(Column)
    }

    /// Rows still linked into a column, top to bottom.
    pub fn rows_in_column(&self, column: Column) -> impl Iterator<Item = &R> + '_ {
        iter::down(&self.links.nodes, column.0).map(move |node| &self.rows[self.links.nodes[node].row])
    }

    /// Return true if no primary column is left uncovered.
    pub fn is_solved(&self) -> bool {
        self.links.is_solved()
    }

    /// Cover a column: remove it from the active columns, and remove every row
    /// that touches it from all the other columns.
    ///
    /// Covers must be undone with [`uncover`](Self::uncover) in exactly the
    /// reverse order. In debug builds a mismatch panics.
    pub fn cover(&mut self, column: Column) {
        self.links.cover(column.0);
    }

    /// Undo the most recent [`cover`](Self::cover) of `column`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `column` is not the most recently covered
    /// column that is still covered.
    pub fn uncover(&mut self, column: Column) {
        self.links.uncover(column.0);
    }

    /// Iterate over all solutions, in the order the search finds them.
    ///
    /// Dropping the iterator early restores the matrix.
    pub fn solutions(&mut self) -> Solutions<'_, R, C> {
        Solutions::new(&mut self.links, &self.rows)
    }

    /// Return the first solution found, if any.
    pub fn first_solution(&mut self) -> Option<Vec<R>>
    where
        R: Clone,
    {
        let mut first = None;
        solver::solve(self, |rows| {
            first = Some(rows.iter().copied().cloned().collect());

            Control::Stop
        });

        first
    }

    /// Return every solution.
    pub fn all_solutions(&mut self) -> Vec<Vec<R>>
    where
        R: Clone,
    {
        let mut solutions = Vec::new();
        solver::solve(self, |rows| {
            solutions.push(rows.iter().copied().cloned().collect());

            Control::Continue
        });

        solutions
    }

    /// Count the solutions without collecting them.
    pub fn count_solutions(&mut self) -> usize {
        let mut count = 0;
        solver::solve(self, |_| {
            count += 1;

            Control::Continue
        });

        count
    }
}

#[cfg(test)]
impl<C> Links<C> {
    /// Check the live part of the structure: the active header ring, and the
    /// vertical ring and size of every active column.
    pub(crate) fn assert_consistent(&self) {
        let mut header = ROOT;
        loop {
            let next = self.nodes[header].right;
            assert_eq!(self.nodes[next].left, header, "header ring broken at {header}");
            if next == ROOT {
                break;
            }
            header = next;

            let mut count = 0;
            let mut node = header;
            loop {
                let below = self.nodes[node].down;
                assert_eq!(self.nodes[below].up, node, "column ring broken at {node}");
                if below == header {
                    break;
                }
                assert_eq!(self.nodes[below].column, header);
                count += 1;
                node = below;
            }
            assert_eq!(self.header(header).size, count, "size of column {header}");
        }
    }

    /// Check every ring of every node; only valid when nothing is covered.
    pub(crate) fn assert_intact(&self) {
        #[cfg(debug_assertions)]
        assert!(self.cover_log.is_empty(), "columns still covered");

        for index in 0..self.nodes.len() {
            let node = self.nodes[index];
            assert_eq!(self.nodes[node.right].left, index, "right of {index}");
            assert_eq!(self.nodes[node.left].right, index, "left of {index}");
            assert_eq!(self.nodes[node.down].up, index, "down of {index}");
            assert_eq!(self.nodes[node.up].down, index, "up of {index}");
        }

        for column in 1..=self.headers.len() {
            assert_eq!(iter::down(&self.nodes, column).count(), self.header(column).size);
        }
    }
}
