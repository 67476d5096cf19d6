use nalgebra::DMatrix;

use crate::Weight;

/// Vertex potentials for both partitions.
///
/// An edge `(x, y)` is in the equality subgraph iff
/// `left[x] + right[y] == weights[(x, y)]`.
#[derive(Debug, Clone)]
pub(crate) struct Labels<T> {
    pub(crate) left: Vec<T>,
    pub(crate) right: Vec<T>,
}

impl<T: Weight> Labels<T> {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            left: vec![T::zero(); size],
            right: vec![T::zero(); size],
        }
    }

    /// Left label is the heaviest edge of its row, right labels are zero.
    pub(crate) fn reset(&mut self, weights: &DMatrix<T>) {
        for (x, label) in self.left.iter_mut().enumerate() {
            let row = weights.row(x);
            let mut best = row[0];
            for &w in row.iter().skip(1) {
                if w > best {
                    best = w;
                }
            }
            *label = best;
        }
        self.right.fill(T::zero());
    }

    // With weights in `lo..=hi`, left labels stay in `lo..=hi` and right
    // labels in `0..=hi - lo`, so this order never leaves `-(hi - lo)..=2 * (hi - lo)`.
    #[inline]
    pub(crate) fn slack(&self, weights: &DMatrix<T>, x: usize, y: usize) -> T {
        self.left[x] - weights[(x, y)] + self.right[y]
    }

    #[cfg(test)]
    pub(crate) fn is_tight(&self, weights: &DMatrix<T>, x: usize, y: usize, tolerance: T) -> bool {
        T::is_tight(self.slack(weights, x, y), tolerance)
    }

    // Tree edges stay tight, edges leaving the tree lose `delta` of slack.
    pub(crate) fn shift(&mut self, delta: T, x_visited: &[bool], y_visited: &[bool]) {
        for (label, _) in self.left.iter_mut().zip(x_visited).filter(|(_, v)| **v) {
            *label -= delta;
        }
        for (label, _) in self.right.iter_mut().zip(y_visited).filter(|(_, v)| **v) {
            *label += delta;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_feasible(&self, weights: &DMatrix<T>, tolerance: T) -> bool {
        let size = self.left.len();
        (0..size).all(|x| {
            (0..size).all(|y| {
                let slack = self.slack(weights, x, y);
                slack >= T::zero() || T::is_tight(slack, tolerance)
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn weights() -> DMatrix<i32> {
        #[rustfmt::skip]
        let w = DMatrix::from_row_slice(3, 3,
            &[
                4, 1, 3,
                2, 0, 5,
                3, 2, 2,
            ]
        );
        w
    }

    #[test]
    fn reset_takes_row_maximum() {
        let w = weights();
        let mut labels = Labels::new(3);
        labels.right.fill(7);
        labels.reset(&w);
        assert_eq!(labels.left, vec![4, 5, 3]);
        assert_eq!(labels.right, vec![0, 0, 0]);
        assert!(labels.is_feasible(&w, 0));
        assert!(labels.is_tight(&w, 0, 0, 0));
        assert!(labels.is_tight(&w, 1, 2, 0));
        assert!(!labels.is_tight(&w, 2, 1, 0));
    }

    #[test]
    fn shift_keeps_feasibility() {
        let w = weights();
        let mut labels = Labels::new(3);
        labels.reset(&w);
        // tree {x0, y0}; cheapest edge out of it is (x0, y2) with slack 1
        labels.shift(1, &[true, false, false], &[true, false, false]);
        assert_eq!(labels.left, vec![3, 5, 3]);
        assert_eq!(labels.right, vec![1, 0, 0]);
        assert!(labels.is_tight(&w, 0, 0, 0));
        assert!(labels.is_tight(&w, 0, 2, 0));
        assert!(labels.is_feasible(&w, 0));
    }
}
