//! Link storage for the toroidal matrix.
//!
//! Every node lives in one flat arena and refers to its neighbours by index,
//! so the cyclic row and column rings never need shared ownership.

use std::ops::Index;

/// Arena index of the root sentinel.
pub(crate) const ROOT: usize = 0;

/// `row` value carried by the root and by column headers.
pub(crate) const HEADER_ROW: usize = usize::MAX;

/// One cell of the torus.
///
/// A node sits in exactly one vertical ring (its column) and one horizontal
/// ring (its row, or the header ring for column headers).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct Node {
    pub left: usize,
    pub right: usize,
    pub up: usize,
    pub down: usize,
    /// Header of the owning column. Headers and the root point at themselves.
    pub column: usize,
    /// Position of the owning row, or [`HEADER_ROW`].
    pub row: usize,
}

/// The node arena.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Nodes(Vec<Node>);

impl Nodes {
    pub fn with_capacity(capacity: usize) -> Self {
        Nodes(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Allocate a node whose four links point back at itself.
    ///
    /// A `column` of `None` makes the node its own column, which is what
    /// headers and the root want.
    pub fn push_self_linked(&mut self, column: Option<usize>, row: usize) -> usize {
        let index = self.0.len();
        self.0.push(Node {
            left: index,
            right: index,
            up: index,
            down: index,
            column: column.unwrap_or(index),
            row,
        });

        index
    }

    /// Insert `node` directly below `at` in its column ring.
    pub fn hook_down(&mut self, at: usize, node: usize) -> usize {
        debug_assert_eq!(
            self.0[at].column, self.0[node].column,
            "nodes hooked into one column must share a header"
        );

        let below = self.0[at].down;
        self.0[node].up = at;
        self.0[node].down = below;
        self.0[below].up = node;
        self.0[at].down = node;

        node
    }

    /// Insert `node` directly to the right of `at` in its row ring.
    pub fn hook_right(&mut self, at: usize, node: usize) -> usize {
        let right = self.0[at].right;
        self.0[node].left = at;
        self.0[node].right = right;
        self.0[right].left = node;
        self.0[at].right = node;

        node
    }

    // The unlink methods leave the removed node's own links untouched; the
    // relink methods depend on those stale links to splice it back in.

    pub fn unlink_lr(&mut self, node: usize) {
        let Node { left, right, .. } = self.0[node];
        self.0[left].right = right;
        self.0[right].left = left;
    }

    pub fn relink_lr(&mut self, node: usize) {
        let Node { left, right, .. } = self.0[node];
        debug_assert!(
            self.0[left].right == right && self.0[right].left == left,
            "node {node} relinked out of order"
        );
        self.0[left].right = node;
        self.0[right].left = node;
    }

    pub fn unlink_ud(&mut self, node: usize) {
        let Node { up, down, .. } = self.0[node];
        self.0[up].down = down;
        self.0[down].up = up;
    }

    pub fn relink_ud(&mut self, node: usize) {
        let Node { up, down, .. } = self.0[node];
        debug_assert!(
            self.0[up].down == down && self.0[down].up == up,
            "node {node} relinked out of order"
        );
        self.0[up].down = node;
        self.0[down].up = node;
    }
}

impl Index<usize> for Nodes {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Read-only walks around a ring, excluding the starting node.
pub(crate) mod iter {
    use super::{Node, Nodes};

    #[cfg(test)]
    pub fn up(nodes: &Nodes, original: usize) -> NodeIterator<'_> {
        NodeIterator::new(nodes, original, |node| node.up)
    }

    pub fn down(nodes: &Nodes, original: usize) -> NodeIterator<'_> {
        NodeIterator::new(nodes, original, |node| node.down)
    }

    #[cfg(test)]
    pub fn left(nodes: &Nodes, original: usize) -> NodeIterator<'_> {
        NodeIterator::new(nodes, original, |node| node.left)
    }

    pub fn right(nodes: &Nodes, original: usize) -> NodeIterator<'_> {
        NodeIterator::new(nodes, original, |node| node.right)
    }

    #[derive(Debug)]
    pub struct NodeIterator<'n> {
        nodes: &'n Nodes,
        original: usize,
        current: usize,
        direction: fn(&Node) -> usize,
    }

    impl<'n> NodeIterator<'n> {
        fn new(nodes: &'n Nodes, original: usize, direction: fn(&Node) -> usize) -> Self {
            NodeIterator {
                nodes,
                original,
                current: original,
                direction,
            }
        }
    }

    impl Iterator for NodeIterator<'_> {
        type Item = usize;

        fn next(&mut self) -> Option<Self::Item> {
            let next = (self.direction)(&self.nodes[self.current]);

            if next == self.original {
                None
            } else {
                self.current = next;

                Some(next)
            }
        }
    }
}
