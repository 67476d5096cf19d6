//! Maximum-weight assignment on dense bipartite graphs using the
//! Kuhn-Munkres labeling method.
//!
//! Rows of the weight matrix form the left partition, columns the right one.
//! Rectangular input is padded with zero-weight phantom edges, which are
//! filtered out of the result again.

mod error;
mod labels;
mod options;
mod search;
mod solver;
mod weight;

use nalgebra::{Dim, Matrix, RawStorage};

pub use error::Error;
pub use options::{Options, Strategy};
pub use solver::Hungarian;
pub use weight::Weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    row: usize,
    col: usize,
}

impl Allocation {
    pub fn assignment(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Matched pairs in ascending row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocations(Vec<Allocation>);

impl Allocations {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn assignment(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(Allocation::assignment)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Allocation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Allocation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn push(&mut self, allocation: Allocation) {
        self.0.push(allocation);
    }

    /// Sums the entries of `weights` picked by these pairs.
    ///
    /// # Panics
    /// If a pair falls outside `weights`.
    pub fn total_weight<T, R, C, S>(&self, weights: &Matrix<T, R, C, S>) -> T
    where
        T: Weight,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        self.assignment()
            .fold(T::zero(), |total, pair| total + weights[pair])
    }
}

impl<'a> IntoIterator for &'a Allocations {
    type Item = &'a Allocation;
    type IntoIter = std::slice::Iter<'a, Allocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One-shot perfect-mode solve, reusing `assignments` for the result.
pub fn hungarian<T, R, C, S>(
    weights: &Matrix<T, R, C, S>,
    assignments: &mut Allocations,
) -> Result<(), Error>
where
    T: Weight,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    Hungarian::new(weights, Options::default())?.solve_into(assignments)
}
