#![deny(missing_docs)]

//! Implementation of [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links)
//! and [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X) for solving
//!  [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problems.
//!
//! A problem is a list of columns (constraints) and a list of rows (options),
//! each row covering some of the columns. A solution is a set of rows that
//! covers every primary column exactly once and every secondary column at
//! most once.
//!
//! ```
//! use torus_cover::{solve, Control, Matrix, Outcome};
//!
//! let mut matrix = Matrix::new(
//!     ['A', 'B', 'C'],
//!     [("ab", vec!['A', 'B']), ("c", vec!['C']), ("bc", vec!['B', 'C'])],
//! )?;
//!
//! let mut found = Vec::new();
//! let outcome = solve(&mut matrix, |rows| {
//!     found.push(rows.to_vec());
//!     Control::Continue
//! });
//!
//! assert_eq!(outcome, Outcome::Exhausted);
//! assert_eq!(found, vec![vec![&"ab", &"c"]]);
//! # Ok::<(), torus_cover::ModelError>(())
//! ```

pub mod error;
pub(crate) mod matrix;
pub mod queens;
pub(crate) mod solver;
pub mod sudoku;

pub use error::{ModelError, PuzzleError};
pub use matrix::{Column, Matrix, MatrixBuilder};
pub use solver::{solve, Control, Outcome, SearchStats, Solutions, Solver};

use std::{fmt::Debug, hash::Hash};

/// An instance of an exact cover problem.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: Clone + Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: Clone + Eq + Hash + Debug;

    /// Return the `Constraint`s satisfied by the given `Possibility`.
    ///
    /// Every returned `Constraint` must be one of
    /// [`constraints`](Self::constraints).
    fn satisfied_constraints(&self, poss: &Self::Possibility) -> Vec<Self::Constraint>;

    /// Return true if the given `Constraint` is optional.
    fn is_optional(&self, cons: &Self::Constraint) -> bool;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Lay this problem out as a [`Matrix`], one column per constraint and one
    /// row per possibility.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if a possibility satisfies no constraint or a
    /// constraint that is not listed.
    fn matrix(&self) -> Result<Matrix<Self::Possibility, Self::Constraint>, ModelError> {
        let builder = self
            .constraints()
            .iter()
            .cloned()
            .fold(Matrix::builder(), |builder, cons| {
                if self.is_optional(&cons) {
                    builder.secondary_column(cons)
                } else {
                    builder.column(cons)
                }
            });

        self.possibilities()
            .iter()
            .fold(builder, |builder, poss| {
                builder.row(poss.clone(), self.satisfied_constraints(poss))
            })
            .build()
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfied_constraints(&self, poss: &Self::Possibility) -> Vec<Self::Constraint> {
        <E as ExactCover>::satisfied_constraints(self, poss)
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::is_optional(self, cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }
}
