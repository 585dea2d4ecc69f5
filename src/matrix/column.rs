//! Column headers and the cover / uncover operations.

use super::Links;

/// Bookkeeping for one column header.
///
/// `headers[k]` in [`Links`] describes arena node `k + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Header<C> {
    pub id: C,
    /// Number of nodes currently linked into this column's vertical ring.
    pub size: usize,
    /// Secondary columns may be covered at most once and are never part of
    /// the active header ring.
    pub secondary: bool,
}

impl<C> Links<C> {
    pub(crate) fn header(&self, column: usize) -> &Header<C> {
        debug_assert!(self.is_header(column), "{column} is not a column header");

        &self.headers[column - 1]
    }

    fn header_mut(&mut self, column: usize) -> &mut Header<C> {
        &mut self.headers[column - 1]
    }

    pub(crate) fn is_header(&self, node: usize) -> bool {
        (1..=self.headers.len()).contains(&node)
    }

    /// Cover entire column, and any rows that that appear in this column.
    ///
    /// Every row with a node in `column` is unlinked from all the other
    /// columns it touches. The nodes of `column` itself stay in place so that
    /// [`uncover`](Self::uncover) can walk them again.
    pub(crate) fn cover(&mut self, column: usize) {
        debug_assert!(self.is_header(column), "{column} is not a column header");
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.cover_log.contains(&column),
                "column {column} is already covered"
            );
            self.cover_log.push(column);
        }

        self.nodes.unlink_lr(column);

        let mut row = self.nodes[column].down;
        while row != column {
            let mut node = self.nodes[row].right;
            while node != row {
                self.nodes.unlink_ud(node);
                let owner = self.nodes[node].column;
                self.header_mut(owner).size -= 1;

                node = self.nodes[node].right;
            }

            row = self.nodes[row].down;
        }
    }

    /// Uncover entire column, and any rows that appear in this column.
    ///
    /// Must undo the most recent [`cover`](Self::cover) that has not been
    /// undone yet; anything else corrupts the rings.
    pub(crate) fn uncover(&mut self, column: usize) {
        #[cfg(debug_assertions)]
        {
            let last = self.cover_log.pop();
            assert_eq!(
                last,
                Some(column),
                "columns must be uncovered in reverse cover order"
            );
        }

        let mut row = self.nodes[column].up;
        while row != column {
            let mut node = self.nodes[row].left;
            while node != row {
                let owner = self.nodes[node].column;
                self.header_mut(owner).size += 1;
                self.nodes.relink_ud(node);

                node = self.nodes[node].left;
            }

            row = self.nodes[row].up;
        }

        self.nodes.relink_lr(column);
    }
}
