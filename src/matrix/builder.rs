use super::{
    column::Header,
    node::{Nodes, HEADER_ROW, ROOT},
    Links, Matrix,
};
use crate::error::ModelError;
use bumpalo::{collections::Vec as BumpVec, Bump};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Incremental construction of a [`Matrix`].
///
/// Columns are laid out left to right in the order they are added, and rows
/// top to bottom. Nothing is validated until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct MatrixBuilder<R, C> {
    columns: Vec<(C, bool)>,
    rows: Vec<(R, Vec<C>)>,
}

impl<R, C> Default for MatrixBuilder<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, C> MatrixBuilder<R, C> {
    /// Create an empty builder.
    pub fn new() -> Self {
        MatrixBuilder {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Add a primary column, which every solution must cover exactly once.
    pub fn column(mut self, id: C) -> Self {
        self.columns.push((id, false));
        self
    }

    /// Add several primary columns.
    pub fn columns(mut self, ids: impl IntoIterator<Item = C>) -> Self {
        self.columns.extend(ids.into_iter().map(|id| (id, false)));
        self
    }

    /// Add a secondary column, which a solution may cover at most once.
    pub fn secondary_column(mut self, id: C) -> Self {
        self.columns.push((id, true));
        self
    }

    /// Add a row covering the given columns.
    ///
    /// The order of `columns` is the order of the row's nodes, left to right.
    pub fn row(mut self, id: R, columns: impl IntoIterator<Item = C>) -> Self {
        self.rows.push((id, columns.into_iter().collect()));
        self
    }

    /// Validate the model and link it into a [`Matrix`].
    ///
    /// # Errors
    ///
    /// See [`ModelError`].
    pub fn build(self) -> Result<Matrix<R, C>, ModelError>
    where
        C: Eq + Hash + Debug,
    {
        let MatrixBuilder { columns, rows } = self;

        let num_nodes = 1
            + columns.len()
            + rows
                .iter()
                .map(|(_, row_columns)| row_columns.len())
                .sum::<usize>();
        let mut nodes = Nodes::with_capacity(num_nodes);
        let root = nodes.push_self_linked(None, HEADER_ROW);
        debug_assert_eq!(root, ROOT);

        let mut positions = HashMap::with_capacity(columns.len());
        let mut last_primary = root;
        for (id, secondary) in &columns {
            let header = nodes.push_self_linked(None, HEADER_ROW);
            if positions.insert(id, header).is_some() {
                return Err(ModelError::DuplicateColumn {
                    column: format!("{id:?}"),
                });
            }

            // Secondary headers stay self-linked, outside the root ring.
            if !secondary {
                last_primary = nodes.hook_right(last_primary, header);
            }
        }

        let mut sizes = vec![0; columns.len()];
        let mut row_ids = Vec::with_capacity(rows.len());
        let mut scratch = Bump::new();
        for (position, (row_id, row_columns)) in rows.into_iter().enumerate() {
            if row_columns.is_empty() {
                return Err(ModelError::EmptyRow { row: position });
            }

            scratch.reset();
            let mut headers = BumpVec::with_capacity_in(row_columns.len(), &scratch);
            for id in &row_columns {
                let header = *positions
                    .get(id)
                    .ok_or_else(|| ModelError::UnknownColumn {
                        row: position,
                        column: format!("{id:?}"),
                    })?;
                if headers.contains(&header) {
                    return Err(ModelError::RepeatedColumn {
                        row: position,
                        column: format!("{id:?}"),
                    });
                }
                headers.push(header);
            }

            let mut last = None;
            for &header in headers.iter() {
                let node = nodes.push_self_linked(Some(header), position);
                let bottom = nodes[header].up;
                nodes.hook_down(bottom, node);
                sizes[header - 1] += 1;

                if let Some(left) = last {
                    nodes.hook_right(left, node);
                }
                last = Some(node);
            }

            row_ids.push(row_id);
        }
        drop(positions);

        let num_secondary = columns.iter().filter(|(_, secondary)| *secondary).count();
        let headers: Vec<_> = columns
            .into_iter()
            .zip(sizes)
            .map(|((id, secondary), size)| Header {
                id,
                size,
                secondary,
            })
            .collect();

        log::debug!(
            "Built matrix with [{}] columns ([{}] secondary), [{}] rows and [{}] nodes.",
            headers.len(),
            num_secondary,
            row_ids.len(),
            nodes.len()
        );

        Ok(Matrix {
            links: Links::new(nodes, headers),
            rows: row_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::node::iter;

    #[test]
    fn columns_are_linked_in_input_order() {
        let matrix = Matrix::<u8, _>::builder()
            .columns(["a", "b", "c"])
            .build()
            .unwrap();

        let active: Vec<_> = matrix
            .active_columns()
            .map(|column| *matrix.column_id(column))
            .collect();
        assert_eq!(active, vec!["a", "b", "c"]);
        assert!(!matrix.is_solved());
        matrix.links.assert_intact();
    }

    #[test]
    fn rows_are_linked_in_input_order() {
        let matrix = Matrix::new(
            ['x', 'y'],
            [(10, vec!['y', 'x']), (20, vec!['x']), (30, vec!['y'])],
        )
        .unwrap();

        let x = matrix.column(&'x').unwrap();
        let y = matrix.column(&'y').unwrap();
        assert_eq!(matrix.rows_in_column(x).collect::<Vec<_>>(), vec![&10, &20]);
        assert_eq!(matrix.rows_in_column(y).collect::<Vec<_>>(), vec![&10, &30]);
        assert_eq!(matrix.column_size(x), 2);
        assert_eq!(matrix.column_size(y), 2);

        // Row 10 runs y then x, and wraps around.
        let first_node = matrix.links.nodes[y.0].down;
        let row: Vec<_> = std::iter::once(first_node)
            .chain(iter::right(&matrix.links.nodes, first_node))
            .map(|node| matrix.links.nodes[node].column)
            .collect();
        assert_eq!(row, vec![y.0, x.0]);
        matrix.links.assert_intact();
    }

    #[test]
    fn secondary_columns_stay_out_of_the_header_ring() {
        let matrix = Matrix::builder()
            .column('p')
            .secondary_column('s')
            .column('q')
            .row(0, ['p', 's'])
            .row(1, ['q'])
            .build()
            .unwrap();

        let active: Vec<_> = matrix
            .active_columns()
            .map(|column| *matrix.column_id(column))
            .collect();
        assert_eq!(active, vec!['p', 'q']);

        let s = matrix.column(&'s').unwrap();
        assert!(matrix.is_secondary(s));
        assert_eq!(matrix.column_size(s), 1);
        matrix.links.assert_intact();
    }

    #[test]
    fn no_columns_is_already_solved() {
        let matrix = Matrix::<u8, u8>::builder().build().unwrap();

        assert!(matrix.is_solved());
        assert_eq!(matrix.num_columns(), 0);
        assert_eq!(matrix.num_rows(), 0);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = Matrix::new(["A"], [("r1", vec!["A"]), ("r2", vec!["B"])]).unwrap_err();

        assert_eq!(
            err,
            ModelError::UnknownColumn {
                row: 1,
                column: "\"B\"".to_owned(),
            }
        );
    }

    #[test]
    fn empty_row_is_rejected() {
        let err = Matrix::new(["A"], [("r1", vec![])]).unwrap_err();

        assert_eq!(err, ModelError::EmptyRow { row: 0 });
        assert_eq!(err.to_string(), "row 0 does not cover any column");
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let err = Matrix::<u8, _>::new([1, 2, 1], Vec::<(u8, Vec<u32>)>::new()).unwrap_err();

        assert_eq!(
            err,
            ModelError::DuplicateColumn {
                column: "1".to_owned()
            }
        );
    }

    #[test]
    fn repeated_column_in_row_is_rejected() {
        let err = Matrix::new([1, 2], [('a', vec![1, 2, 1])]).unwrap_err();

        assert_eq!(
            err,
            ModelError::RepeatedColumn {
                row: 0,
                column: "1".to_owned(),
            }
        );
    }
}
