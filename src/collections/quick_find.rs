//! Naive quick-find partition.
//!
//! Every element stores its set label directly, so queries are O(1) and
//! `union` relabels a whole set in O(n). Too slow for large grids, but
//! simple enough to serve as a reference backend in tests.

use super::DisjointSet;

/// Flat-array disjoint sets with O(1) `find` and O(n) `union`.
#[derive(Debug, Clone)]
pub struct QuickFind {
    label: Vec<usize>,
}

impl DisjointSet for QuickFind {
    fn with_len(n: usize) -> Self {
        Self {
            label: (0..n).collect(),
        }
    }

    fn len(&self) -> usize {
        self.label.len()
    }

    fn find(&mut self, x: usize) -> usize {
        self.label[x]
    }

    fn root(&self, x: usize) -> usize {
        self.label[x]
    }

    fn union(&mut self, x: usize, y: usize) -> bool {
        let from = self.label[x];
        let to = self.label[y];
        if from == to {
            return false;
        }
        for label in &mut self.label {
            if *label == from {
                *label = to;
            }
        }
        true
    }
}
