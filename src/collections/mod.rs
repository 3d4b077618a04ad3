//! Disjoint-set structures backing grid connectivity.
//!
//! The grid only needs three operations from its connectivity structure:
//! merge two sets, find a representative, and ask whether two elements
//! share a set. [`DisjointSet`] names that capability so the grid can run
//! on the fast [`UnionFind`] forest or on the naive [`QuickFind`] array
//! with identical observable behavior.

mod quick_find;
mod union_find;

pub use quick_find::QuickFind;
pub use union_find::UnionFind;

/// A partition of `0..len()` into disjoint sets supporting merge and
/// same-set queries.
///
/// Merges are permanent: once `union(a, b)` has run, `connected(a, b)`
/// stays `true` for the lifetime of the structure.
pub trait DisjointSet {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n-1}`.
    fn with_len(n: usize) -> Self
    where
        Self: Sized;

    /// Number of elements in the universe.
    fn len(&self) -> usize;

    /// Returns `true` if the universe has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the representative of the set containing `x`, allowed to
    /// restructure internal state to speed up later queries.
    ///
    /// # Panics
    /// Panics if `x >= len()`.
    fn find(&mut self, x: usize) -> usize;

    /// Returns the representative of the set containing `x` without
    /// touching internal state.
    ///
    /// # Panics
    /// Panics if `x >= len()`.
    fn root(&self, x: usize) -> usize;

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `true` if two distinct sets were merged, `false` if `x` and
    /// `y` already shared a set.
    fn union(&mut self, x: usize, y: usize) -> bool;

    /// Returns `true` if `x` and `y` are in the same set.
    fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Read-only variant of [`connected`](DisjointSet::connected).
    fn same_set(&self, x: usize, y: usize) -> bool {
        self.root(x) == self.root(y)
    }
}
