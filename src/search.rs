use std::collections::VecDeque;

use nalgebra::DMatrix;

use crate::labels::Labels;
use crate::Weight;

#[derive(Debug, Clone)]
pub(crate) struct Matching {
    pub(crate) left: Vec<Option<usize>>,
    pub(crate) right: Vec<Option<usize>>,
}

impl Matching {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            left: vec![None; size],
            right: vec![None; size],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.left.fill(None);
        self.right.fill(None);
    }

    // each left vertex on the path takes the right vertex it discovered and
    // hands its old partner back towards the root
    pub(crate) fn augment(&mut self, prev: &[Option<usize>], end: usize) {
        let mut next = Some(end);
        while let Some(y) = next {
            let Some(x) = prev[y] else {
                break;
            };
            self.right[y] = Some(x);
            next = self.left[x].replace(y);
        }
    }
}

/// Alternating tree of one phase, rebuilt from scratch on every pass.
#[derive(Debug, Clone)]
pub(crate) struct Tree<T> {
    pub(crate) x_visited: Vec<bool>,
    pub(crate) y_visited: Vec<bool>,
    // prev[y] == Some(x): y was reached through the tight edge (x, y).
    // right vertices only lead on to their own partner
    pub(crate) prev: Vec<Option<usize>>,
    // smallest slack from any visited left vertex
    pub(crate) slack: Vec<T>,
    tolerance: T,
    queue: VecDeque<usize>,
    stack: Vec<(usize, usize)>,
}

impl<T: Weight> Tree<T> {
    pub(crate) fn new(size: usize, tolerance: T) -> Self {
        Self {
            x_visited: vec![false; size],
            y_visited: vec![false; size],
            prev: vec![None; size],
            slack: vec![T::max_value(); size],
            tolerance,
            queue: VecDeque::with_capacity(size),
            stack: Vec::with_capacity(size),
        }
    }

    fn reset(&mut self, root: usize) {
        self.x_visited.fill(false);
        self.y_visited.fill(false);
        self.prev.fill(None);
        self.slack.fill(T::max_value());
        self.queue.clear();
        self.stack.clear();
        self.x_visited[root] = true;
    }

    // a tight edge pulls `y` into the tree, anything else lowers its slack
    fn relax(&mut self, weights: &DMatrix<T>, labels: &Labels<T>, x: usize, y: usize) -> bool {
        let slack = labels.slack(weights, x, y);
        if T::is_tight(slack, self.tolerance) {
            self.y_visited[y] = true;
            self.prev[y] = Some(x);
            true
        } else {
            if slack < self.slack[y] {
                self.slack[y] = slack;
            }
            false
        }
    }

    /// Returns the first unmatched right vertex reached from `root`.
    pub(crate) fn grow_breadth_first(
        &mut self,
        root: usize,
        weights: &DMatrix<T>,
        labels: &Labels<T>,
        matching: &Matching,
    ) -> Option<usize> {
        self.reset(root);
        self.queue.push_back(root);

        while let Some(x) = self.queue.pop_front() {
            for y in 0..self.y_visited.len() {
                if self.y_visited[y] || !self.relax(weights, labels, x, y) {
                    continue;
                }

                match matching.right[y] {
                    None => return Some(y),
                    Some(partner) => {
                        self.x_visited[partner] = true;
                        self.queue.push_back(partner);
                    }
                }
            }
        }

        None
    }

    pub(crate) fn grow_depth_first(
        &mut self,
        root: usize,
        weights: &DMatrix<T>,
        labels: &Labels<T>,
        matching: &Matching,
    ) -> Option<usize> {
        self.reset(root);
        // (left vertex, first right vertex not scanned yet)
        self.stack.push((root, 0));

        while let Some(&(x, from)) = self.stack.last() {
            let mut descend = None;
            for y in from..self.y_visited.len() {
                if self.y_visited[y] || !self.relax(weights, labels, x, y) {
                    continue;
                }

                match matching.right[y] {
                    None => return Some(y),
                    Some(partner) => {
                        descend = Some((y, partner));
                        break;
                    }
                }
            }

            match descend {
                Some((y, partner)) => {
                    if let Some(frame) = self.stack.last_mut() {
                        frame.1 = y + 1;
                    }
                    self.x_visited[partner] = true;
                    self.stack.push((partner, 0));
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        None
    }

    // None if nothing outside the tree is reachable
    pub(crate) fn min_slack(&self) -> Option<T> {
        let mut delta = T::max_value();
        for (&slack, _) in self.slack.iter().zip(&self.y_visited).filter(|(_, v)| !**v) {
            if slack < delta {
                delta = slack;
            }
        }
        (delta < T::max_value()).then_some(delta)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn setup() -> (DMatrix<i32>, Labels<i32>) {
        #[rustfmt::skip]
        let weights = DMatrix::from_row_slice(3, 3,
            &[
                5, 5, 1,
                5, 2, 0,
                0, 1, 3,
            ]
        );
        let mut labels = Labels::new(3);
        labels.reset(&weights);
        (weights, labels)
    }

    #[test]
    fn augment_flips_path() {
        let mut matching = Matching::new(3);
        // x1 - y0 matched, x0 reaches y0, y0's partner x1 reaches y1
        matching.left[1] = Some(0);
        matching.right[0] = Some(1);
        let prev = vec![Some(0), Some(1), None];
        matching.augment(&prev, 1);
        assert_eq!(matching.left, vec![Some(0), Some(1), None]);
        assert_eq!(matching.right, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn breadth_first_reaches_free_vertex() {
        let (weights, labels) = setup();
        let matching = Matching::new(3);
        let mut tree = Tree::new(3, 0);
        assert_eq!(
            tree.grow_breadth_first(0, &weights, &labels, &matching),
            Some(0)
        );
        assert_eq!(tree.prev[0], Some(0));
    }

    #[test]
    fn blocked_tree_records_slack() {
        let (weights, labels) = setup();
        let mut matching = Matching::new(3);
        matching.left[0] = Some(0);
        matching.right[0] = Some(0);
        matching.left[2] = Some(2);
        matching.right[2] = Some(2);
        // labels: left [5, 5, 3], right 0. Only tight edge from x1 is y0.
        let mut tree = Tree::new(3, 0);
        let found = tree.grow_breadth_first(1, &weights, &labels, &matching);
        // y0 -> x0, and x0 reaches y1 which is free
        assert_eq!(found, Some(1));
        assert_eq!(tree.prev[1], Some(0));

        matching.augment(&tree.prev, 1);
        assert_eq!(matching.left, vec![Some(1), Some(0), Some(2)]);
        assert_eq!(matching.right, vec![Some(1), Some(0), Some(2)]);
    }

    #[test]
    fn min_slack_ignores_visited() {
        let mut tree: Tree<i32> = Tree::new(3, 0);
        tree.reset(0);
        tree.slack = vec![1, 4, i32::MAX];
        tree.y_visited[0] = true;
        assert_eq!(tree.min_slack(), Some(4));
        tree.y_visited[1] = true;
        assert_eq!(tree.min_slack(), None);
    }

    #[test]
    fn depth_first_matches_breadth_first_reachability() {
        let (weights, labels) = setup();
        let mut matching = Matching::new(3);
        matching.left[0] = Some(0);
        matching.right[0] = Some(0);
        let mut tree = Tree::new(3, 0);
        assert_eq!(
            tree.grow_depth_first(1, &weights, &labels, &matching),
            Some(1)
        );
        assert!(tree.x_visited[0] && tree.x_visited[1]);
    }
}
