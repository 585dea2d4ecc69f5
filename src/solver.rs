//! Algorithm X over a [`Matrix`].
//!
//! Two drivers share the same column choice and the same cover order, so they
//! find the same solutions in the same order:
//!  - [`Solver`] recurses on the call stack and pushes each solution into a
//!    sink that decides whether to keep going.
//!  - [`Solutions`] keeps an explicit stack of frames and hands solutions out
//!    one at a time as an [`Iterator`].

use crate::matrix::{node::ROOT, Links, Matrix};

/// Returned by a solution sink to continue or end the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Keep searching for more solutions.
    Continue,
    /// Stop after this solution.
    Stop,
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every branch was explored.
    Exhausted,
    /// The sink asked to stop.
    Stopped,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of solutions passed to the sink.
    pub solutions: usize,
    /// Number of search nodes entered, including the root.
    pub nodes: usize,
    /// Deepest level reached, where the root is level 0.
    pub max_depth: usize,
}

/// Search `matrix` for exact covers, passing each one to `on_solution`.
///
/// Solutions are the selected row identifiers in the order they were chosen.
/// The row references borrow from `matrix`, so the sink may keep them. The
/// matrix is restored before this returns, whether the search was exhausted
/// or stopped.
pub fn solve<'m, R, C, F>(matrix: &'m mut Matrix<R, C>, on_solution: F) -> Outcome
where
    F: FnMut(&[&'m R]) -> Control,
{
    Solver::new(matrix).solve(on_solution)
}

/// Recursive Algorithm X solver with exclusive access to a matrix.
#[derive(Debug)]
pub struct Solver<'m, R, C> {
    links: &'m mut Links<C>,
    rows: &'m [R],
    /// Row nodes chosen on the current branch.
    selected: Vec<usize>,
    stats: SearchStats,
}

impl<'m, R, C> Solver<'m, R, C> {
    /// Create a new `Solver` for the given matrix.
    pub fn new(matrix: &'m mut Matrix<R, C>) -> Self {
        let Matrix { links, rows } = matrix;

        Solver {
            links,
            rows,
            selected: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Run a full search, passing each solution to `on_solution` until it
    /// returns [`Control::Stop`] or the search space is exhausted.
    pub fn solve<F>(&mut self, mut on_solution: F) -> Outcome
    where
        F: FnMut(&[&'m R]) -> Control,
    {
        self.selected.clear();
        self.stats = SearchStats::default();

        let outcome = match self.search(0, &mut on_solution) {
            Control::Continue => Outcome::Exhausted,
            Control::Stop => Outcome::Stopped,
        };

        log::debug!(
            "Search {:?} with [{}] solutions after [{}] nodes, max depth [{}].",
            outcome,
            self.stats.solutions,
            self.stats.nodes,
            self.stats.max_depth
        );

        outcome
    }

    /// Counters from the most recent call to [`solve`](Self::solve).
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn search<F>(&mut self, depth: usize, on_solution: &mut F) -> Control
    where
        F: FnMut(&[&'m R]) -> Control,
    {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let column = match choose_column(self.links) {
            Some(column) => column,
            None => {
                self.stats.solutions += 1;
                let solution = solution_rows(self.links, self.rows, &self.selected);
                log::trace!("Found solution at depth [{}].", depth);

                return on_solution(&solution);
            }
        };

        // An empty column yields no rows here, which is the dead end.
        self.links.cover(column);

        let mut flow = Control::Continue;
        let mut row = self.links.nodes[column].down;
        while row != column {
            self.selected.push(row);
            select_row(self.links, row);

            flow = self.search(depth + 1, on_solution);

            deselect_row(self.links, row);
            self.selected.pop();

            if flow == Control::Stop {
                break;
            }
            row = self.links.nodes[row].down;
        }

        self.links.uncover(column);

        flow
    }
}

#[derive(Debug, PartialEq, Eq)]
enum State {
    // Check for a solution, otherwise open a frame on the best column
    Descend,
    // Undo the current row of the top frame and try the next one
    Advance,
    Done,
}

#[derive(Debug)]
struct Frame {
    column: usize,
    // Row node currently selected, or `column` before the first row
    row: usize,
}

/// Iterator over the solutions of a [`Matrix`], created by
/// [`Matrix::solutions`].
///
/// Each item holds the selected row identifiers in the order they were
/// chosen.
#[derive(Debug)]
pub struct Solutions<'m, R, C> {
    links: &'m mut Links<C>,
    rows: &'m [R],

    selected: Vec<usize>,
    stack: Vec<Frame>,
    state: State,
}

impl<'m, R, C> Solutions<'m, R, C> {
    pub(crate) fn new(links: &'m mut Links<C>, rows: &'m [R]) -> Self {
        Solutions {
            links,
            rows,
            selected: Vec::new(),
            stack: Vec::new(),
            state: State::Descend,
        }
    }
}

impl<'m, R, C> Iterator for Solutions<'m, R, C> {
    type Item = Vec<&'m R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Descend => {
                    self.state = State::Advance;

                    match choose_column(self.links) {
                        Some(column) => {
                            self.links.cover(column);
                            self.stack.push(Frame {
                                column,
                                row: column,
                            });
                        }
                        None => {
                            log::trace!("Found solution at depth [{}].", self.stack.len());

                            return Some(solution_rows(self.links, self.rows, &self.selected));
                        }
                    }
                }
                State::Advance => {
                    let Some(frame) = self.stack.last_mut() else {
                        self.state = State::Done;
                        continue;
                    };

                    if frame.row != frame.column {
                        deselect_row(self.links, frame.row);
                        self.selected.pop();
                    }

                    let next = self.links.nodes[frame.row].down;
                    if next == frame.column {
                        let column = frame.column;
                        self.stack.pop();
                        self.links.uncover(column);
                    } else {
                        frame.row = next;
                        self.selected.push(next);
                        select_row(self.links, next);
                        self.state = State::Descend;
                    }
                }
            }
        }
    }
}

impl<R, C> Drop for Solutions<'_, R, C> {
    fn drop(&mut self) {
        while let Some(frame) = self.stack.pop() {
            if frame.row != frame.column {
                deselect_row(self.links, frame.row);
            }
            self.links.uncover(frame.column);
        }
        self.selected.clear();
    }
}

/// Pick the active primary column with the fewest rows, leftmost on ties.
///
/// Returns `None` when no primary column is left, which means the current
/// selection is a solution.
fn choose_column<C>(links: &Links<C>) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    let mut column = links.nodes[ROOT].right;
    while column != ROOT {
        let size = links.header(column).size;
        if best.map_or(true, |(_, best_size)| size < best_size) {
            best = Some((column, size));
            if size == 0 {
                break;
            }
        }

        column = links.nodes[column].right;
    }

    best.map(|(column, _)| column)
}

/// Cover the columns of every other node in `row`, left to right.
fn select_row<C>(links: &mut Links<C>, row: usize) {
    let mut node = links.nodes[row].right;
    while node != row {
        let column = links.nodes[node].column;
        links.cover(column);

        node = links.nodes[node].right;
    }
}

/// Undo [`select_row`], right to left.
fn deselect_row<C>(links: &mut Links<C>, row: usize) {
    let mut node = links.nodes[row].left;
    while node != row {
        let column = links.nodes[node].column;
        links.uncover(column);

        node = links.nodes[node].left;
    }
}

fn solution_rows<'r, R, C>(links: &Links<C>, rows: &'r [R], selected: &[usize]) -> Vec<&'r R> {
    selected
        .iter()
        .map(|&node| &rows[links.nodes[node].row])
        .collect()
}
