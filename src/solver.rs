use log::{debug, trace, warn};
use nalgebra::{DMatrix, Dim, Matrix, RawStorage};

use crate::labels::Labels;
use crate::search::{Matching, Tree};
use crate::{Allocation, Allocations, Error, Options, Strategy, Weight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Augmented,
    Relabeled,
    Rescan,
}

/// Maximum-weight assignment solver over a dense bipartite graph.
///
/// Rows of the input are the left partition, columns the right one. The
/// input is padded to a square `size x size` problem with zero-weight
/// phantom edges; those never show up in the result.
#[derive(Debug, Clone)]
pub struct Hungarian<T> {
    rows: usize,
    cols: usize,
    size: usize,
    options: Options,
    weights: DMatrix<T>,
    // negative edges clamped to zero outside perfect mode, never reported
    non_edges: DMatrix<bool>,
    tolerance: T,
    labels: Labels<T>,
    matching: Matching,
    tree: Tree<T>,
}

impl<T: Weight> Hungarian<T> {
    pub fn new<R, C, S>(weights: &Matrix<T, R, C, S>, options: Options) -> Result<Self, Error>
    where
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        let (rows, cols) = weights.shape();
        Self::build(rows, cols, |i, j| weights[(i, j)], options)
    }

    /// Builds a solver from nested rows, rejecting ragged input.
    pub fn from_rows<Row: AsRef<[T]>>(rows: &[Row], options: Options) -> Result<Self, Error> {
        let Some(first) = rows.first() else {
            return Err(Error::invalid("matrix has no rows"));
        };
        let cols = first.as_ref().len();
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != cols)
        {
            return Err(Error::invalid(format!(
                "row {index} has {} entries, expected {cols}",
                row.as_ref().len()
            )));
        }

        Self::build(rows.len(), cols, |i, j| rows[i].as_ref()[j], options)
    }

    fn build(
        rows: usize,
        cols: usize,
        weight: impl Fn(usize, usize) -> T,
        options: Options,
    ) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::invalid(format!("{rows}x{cols} matrix has no edges")));
        }

        let size = rows.max(cols);
        let mut weights = DMatrix::from_element(size, size, T::zero());
        let mut non_edges = DMatrix::from_element(size, size, false);

        for i in 0..rows {
            for j in 0..cols {
                let w = weight(i, j);
                if w.partial_cmp(&w).is_none() {
                    return Err(Error::invalid(format!("weight at ({i}, {j}) is not comparable")));
                }

                if options.perfect || w >= T::zero() {
                    weights[(i, j)] = w;
                } else {
                    // clamped to zero, indistinguishable from a real zero edge otherwise
                    non_edges[(i, j)] = true;
                }
            }
        }

        let mut lo = weights[(0, 0)];
        let mut hi = lo;
        for &w in weights.iter() {
            if w < lo {
                lo = w;
            }
            if w > hi {
                hi = w;
            }
        }
        // labels stay within the weight range, slack within twice its span
        match T::slack_bound(lo, hi) {
            Some(bound) if bound < T::max_value() => {}
            _ => {
                return Err(Error::invalid(format!(
                    "weights {lo:?}..={hi:?} span too wide for the label arithmetic"
                )))
            }
        }
        let tolerance = T::tolerance(lo, hi);

        Ok(Self {
            rows,
            cols,
            size,
            options,
            weights,
            non_edges,
            tolerance,
            labels: Labels::new(size),
            matching: Matching::new(size),
            tree: Tree::new(size, tolerance),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Side length of the padded square problem.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Left and right potentials as left by the last solve.
    pub fn labels(&self) -> (&[T], &[T]) {
        (&self.labels.left, &self.labels.right)
    }

    pub fn solve(&mut self) -> Result<Allocations, Error> {
        let mut allocations = Allocations::with_capacity(self.rows.min(self.cols));
        self.solve_into(&mut allocations)?;
        Ok(allocations)
    }

    /// Solves into a caller-provided buffer. The buffer is cleared first and
    /// stays empty if the solve fails.
    pub fn solve_into(&mut self, allocations: &mut Allocations) -> Result<(), Error> {
        allocations.clear();
        self.labels.reset(&self.weights);
        self.matching.reset();
        debug!(
            "solving {}x{} assignment (padded to {}), {:?}",
            self.rows, self.cols, self.size, self.options
        );

        for root in 0..self.size {
            if let Err(err) = self.augment_from(root) {
                warn!("{err}");
                return Err(err);
            }
        }

        self.extract(allocations);
        debug!("matched {} of {} rows", allocations.len(), self.rows);
        Ok(())
    }

    // Every relabel pulls one more right vertex into the next tree and a
    // failing tree holds at most `size - 1` matched ones, so `size + 1`
    // passes always suffice.
    fn augment_from(&mut self, root: usize) -> Result<(), Error> {
        for _ in 0..=self.size {
            if self.pass(root)? == Pass::Augmented {
                return Ok(());
            }
        }

        Err(Error::Infeasible { row: root })
    }

    fn pass(&mut self, root: usize) -> Result<Pass, Error> {
        let reached = match self.options.strategy {
            Strategy::BreadthFirst => {
                self.tree
                    .grow_breadth_first(root, &self.weights, &self.labels, &self.matching)
            }
            Strategy::DepthFirst => {
                self.tree
                    .grow_depth_first(root, &self.weights, &self.labels, &self.matching)
            }
        };

        if let Some(end) = reached {
            self.matching.augment(&self.tree.prev, end);
            return Ok(Pass::Augmented);
        }

        match self.tree.min_slack() {
            None => Err(Error::Infeasible { row: root }),
            // an unexplored tight edge, rescan at the same labels
            Some(delta) if T::is_tight(delta, self.tolerance) => Ok(Pass::Rescan),
            Some(delta) => {
                trace!("root {root}: shifting labels by {delta:?}");
                self.labels
                    .shift(delta, &self.tree.x_visited, &self.tree.y_visited);
                Ok(Pass::Relabeled)
            }
        }
    }

    fn extract(&self, allocations: &mut Allocations) {
        for row in 0..self.rows {
            if let Some(col) = self.matching.left[row] {
                if col < self.cols && !self.non_edges[(row, col)] {
                    allocations.push(Allocation { row, col });
                }
            }
        }
    }
}
