use std::collections::{BTreeSet, HashMap};
use torus_cover::{
    sudoku::{self, Constraint, Possibility},
    ExactCover, Matrix, ModelError,
};

/// Install a test logger; safe to call from every test.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small exact cover problem kept in plain form, so solutions can be
/// checked against it independently of the matrix.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Problem {
    pub columns: Vec<u32>,
    pub secondary: Vec<u32>,
    pub rows: Vec<(usize, Vec<u32>)>,
}

#[allow(dead_code)]
impl Problem {
    /// A pseudo-random problem with `num_columns` primary columns and
    /// `num_rows` non-empty rows, fully determined by `seed`.
    pub fn generate(seed: u64, num_columns: u32, num_secondary: u32, num_rows: usize) -> Self {
        let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
        let mut next = move || {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let columns: Vec<u32> = (0..num_columns).collect();
        let secondary: Vec<u32> = (num_columns..num_columns + num_secondary).collect();
        let all = num_columns + num_secondary;

        let rows = (0..num_rows)
            .map(|row| {
                let mut chosen: Vec<u32> = (0..all).filter(|_| next() % 3 == 0).collect();
                if chosen.is_empty() {
                    chosen.push((next() % u64::from(all)) as u32);
                }
                (row, chosen)
            })
            .collect();

        Problem {
            columns,
            secondary,
            rows,
        }
    }

    pub fn matrix(&self) -> Result<Matrix<usize, u32>, ModelError> {
        let builder = self
            .secondary
            .iter()
            .fold(Matrix::builder().columns(self.columns.iter().copied()), |builder, id| {
                builder.secondary_column(*id)
            });

        self.rows
            .iter()
            .fold(builder, |builder, (id, columns)| {
                builder.row(*id, columns.iter().copied())
            })
            .build()
    }

    /// Panic unless the selected rows cover every primary column exactly once
    /// and every secondary column at most once.
    pub fn assert_partition(&self, solution: &[usize]) {
        let lookup: HashMap<usize, &Vec<u32>> =
            self.rows.iter().map(|(id, columns)| (*id, columns)).collect();

        let mut covered = BTreeSet::new();
        for row in solution {
            for column in lookup[row] {
                assert!(
                    covered.insert(*column),
                    "column {column} covered twice by {solution:?}"
                );
            }
        }

        for column in &self.columns {
            assert!(
                covered.contains(column),
                "column {column} not covered by {solution:?}"
            );
        }
    }

    /// Every exact cover, found by trying each subset of rows.
    ///
    /// Rows that only touch secondary columns are never part of a cover, since
    /// the search only ever picks rows through a primary column.
    pub fn brute_force(&self) -> BTreeSet<BTreeSet<usize>> {
        assert!(self.rows.len() <= 16, "too many rows to brute force");

        let primary: BTreeSet<u32> = self.columns.iter().copied().collect();
        (0u32..(1 << self.rows.len()))
            .filter_map(|mask| {
                let mut covered = BTreeSet::new();
                let mut chosen = BTreeSet::new();
                for (bit, (id, columns)) in self.rows.iter().enumerate() {
                    if mask & (1 << bit) == 0 {
                        continue;
                    }
                    if !columns.iter().any(|column| primary.contains(column)) {
                        return None;
                    }
                    chosen.insert(*id);
                    for column in columns {
                        if !covered.insert(*column) {
                            return None;
                        }
                    }
                }

                primary.is_subset(&covered).then_some(chosen)
            })
            .collect()
    }
}

/// A 6×6 Sudoku with 2×3 squares, which the square-box encoder in the crate
/// does not cover.
#[allow(dead_code)]
pub struct Sudoku6x6 {
    possibilities: Vec<Possibility>,
    constraints: Vec<Constraint>,
}

#[allow(dead_code)]
impl Sudoku6x6 {
    pub fn empty() -> Self {
        // Each column must contain 1-6
        // Each row must contain 1-6
        // Each (2 rows x 3 columns) box must contain 1-6
        let possibilities = (0..6)
            .flat_map(|row| {
                (0..6).flat_map(move |column| (1..=6).map(move |value| (row, column, value)))
            })
            .map(|(row, column, value)| Possibility {
                row,
                column,
                square: 2 * (row / 2) + (column / 3),
                value,
            })
            .collect();

        let pairs = || (0..6).flat_map(|index| (0..6).map(move |other| (index, other)));
        let constraints = pairs()
            .map(|(row, column)| Constraint::RowColumn { row, column })
            .chain(pairs().map(|(row, value)| Constraint::RowNumber {
                row,
                value: value + 1,
            }))
            .chain(pairs().map(|(column, value)| Constraint::ColumnNumber {
                column,
                value: value + 1,
            }))
            .chain(pairs().map(|(square, value)| Constraint::SquareNumber {
                square,
                value: value + 1,
            }))
            .collect();

        Sudoku6x6 {
            possibilities,
            constraints,
        }
    }
}

impl ExactCover for Sudoku6x6 {
    type Constraint = sudoku::Constraint;
    type Possibility = sudoku::Possibility;

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
