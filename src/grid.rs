//! Site percolation on an n×n grid.
//!
//! Sites start blocked and are opened one at a time. Connectivity between
//! open sites lives in a [`DisjointSet`] over `n² + 2` elements: one per
//! site plus two virtual anchors. Every open site in the top row is merged
//! with the top anchor and every open site in the bottom row with the
//! bottom anchor, so "is this site reachable from the top?" and "does the
//! grid percolate?" are single same-set queries instead of row scans.
//!
//! Coordinates are 1-indexed: `(1, 1)` is the upper-left site and
//! `(n, n)` the lower-right one.

use crate::collections::{DisjointSet, UnionFind};
use crate::error::{PercolationError, Result};

/// Whether a site lets connectivity through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteState {
    Blocked,
    Open,
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    state: SiteState,
    id: usize,
}

impl Site {
    fn blocked(id: usize) -> Self {
        Self {
            state: SiteState::Blocked,
            id,
        }
    }

    /// Row-major index in `[0, n²)`, also the site's disjoint-set element.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current state; flips from `Blocked` to `Open` at most once.
    pub fn state(&self) -> SiteState {
        self.state
    }

    /// Shorthand for `state() == SiteState::Open`.
    pub fn is_open(&self) -> bool {
        self.state == SiteState::Open
    }
}

/// An n×n percolation system.
///
/// `U` is the connectivity backend; it defaults to the path-compressed
/// [`UnionFind`] forest.
///
/// # Examples
/// ```
/// use percolation::PercolationGrid;
///
/// let mut grid = PercolationGrid::new(2)?;
/// grid.open(1, 1)?;
/// assert!(!grid.percolates());
/// grid.open(2, 1)?;
/// assert!(grid.percolates());
/// assert!(grid.is_full(2, 1)?);
/// # Ok::<(), percolation::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PercolationGrid<U = UnionFind> {
    size: usize,
    sites: Vec<Site>,
    open_count: usize,
    connectivity: U,
    virtual_top: usize,
    virtual_bottom: usize,
}

impl PercolationGrid {
    /// Creates an `n`×`n` grid with every site blocked.
    ///
    /// `n == 0` is a legal empty grid that never percolates.
    ///
    /// # Errors
    /// [`PercolationError::InvalidSize`] if `n < 0`.
    pub fn new(n: i64) -> Result<Self> {
        Self::with_disjoint_set(n)
    }
}

impl<U: DisjointSet> PercolationGrid<U> {
    /// Creates an `n`×`n` grid backed by connectivity structure `U`.
    ///
    /// # Errors
    /// [`PercolationError::InvalidSize`] if `n < 0`, or if `n² + 2` overflows
    /// `usize`.
    pub fn with_disjoint_set(n: i64) -> Result<Self> {
        let size = usize::try_from(n).map_err(|_| PercolationError::InvalidSize { size: n })?;
        Self::from_size(size)
    }

    pub(crate) fn from_size(size: usize) -> Result<Self> {
        let site_count = size
            .checked_mul(size)
            .filter(|sq| sq.checked_add(2).is_some())
            .ok_or(PercolationError::InvalidSize {
                size: i64::try_from(size).unwrap_or(i64::MAX),
            })?;

        Ok(Self {
            size,
            sites: (0..site_count).map(Site::blocked).collect(),
            open_count: 0,
            connectivity: U::with_len(site_count + 2),
            virtual_top: site_count,
            virtual_bottom: site_count + 1,
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Opens the site at `(row, col)` and links it to every open neighbor.
    ///
    /// Opening an already-open site changes nothing observable, but the
    /// neighbor scan still runs.
    ///
    /// # Errors
    /// [`PercolationError::OutOfBounds`] if `row` or `col` is outside
    /// `[1, n]`. The grid is left untouched.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let (r, c) = self.checked(row, col)?;
        self.open_at(r, c);
        Ok(())
    }

    /// Whether the site at `(row, col)` is open.
    ///
    /// # Errors
    /// [`PercolationError::OutOfBounds`] if `row` or `col` is outside `[1, n]`.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let (r, c) = self.checked(row, col)?;
        Ok(self.is_open_at(r, c))
    }

    /// Whether the site's set contains the virtual top anchor.
    ///
    /// Before the grid percolates this means an open path to the top row.
    /// Both anchors share one disjoint-set structure, so once the grid
    /// percolates every open site connected to the bottom row also reports
    /// full, even without a path of its own to the top ("backwash").
    ///
    /// # Errors
    /// [`PercolationError::OutOfBounds`] if `row` or `col` is outside `[1, n]`.
    pub fn is_full(&self, row: usize, col: usize) -> Result<bool> {
        let (r, c) = self.checked(row, col)?;
        let id = self.index(r, c);
        Ok(self.connectivity.same_set(id, self.virtual_top))
    }

    /// Number of sites opened so far.
    pub fn open_site_count(&self) -> usize {
        self.open_count
    }

    /// Fraction of sites that are open, or NaN for the empty grid.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.sites.len() as f64
    }

    /// Whether an open path joins the top row to the bottom row.
    pub fn percolates(&self) -> bool {
        self.connectivity.same_set(self.virtual_top, self.virtual_bottom)
    }

    /// Returns a copy of the site at `(row, col)`.
    ///
    /// # Errors
    /// [`PercolationError::OutOfBounds`] if `row` or `col` is outside `[1, n]`.
    pub fn site(&self, row: usize, col: usize) -> Result<Site> {
        let (r, c) = self.checked(row, col)?;
        Ok(self.sites[self.index(r, c)])
    }

    /// All sites in row-major order.
    pub fn sites(&self) -> impl Iterator<Item = &Site> + '_ {
        self.sites.iter()
    }

    /// Opens a site by 0-indexed coordinates. Callers guarantee bounds.
    pub(crate) fn open_at(&mut self, r: usize, c: usize) {
        let id = self.index(r, c);

        if !self.sites[id].is_open() {
            self.sites[id].state = SiteState::Open;
            self.open_count += 1;
            if r == 0 {
                self.connectivity.union(id, self.virtual_top);
            }
            if r == self.size - 1 {
                self.connectivity.union(id, self.virtual_bottom);
            }
        }

        for (nr, nc) in neighbors(self.size, r, c) {
            let neighbor = self.index(nr, nc);
            if self.sites[neighbor].is_open() && !self.connectivity.connected(id, neighbor) {
                self.connectivity.union(id, neighbor);
            }
        }
    }

    pub(crate) fn is_open_at(&self, r: usize, c: usize) -> bool {
        self.sites[self.index(r, c)].is_open()
    }

    fn index(&self, r: usize, c: usize) -> usize {
        r * self.size + c
    }

    fn checked(&self, row: usize, col: usize) -> Result<(usize, usize)> {
        let in_range = |v: usize| (1..=self.size).contains(&v);
        if in_range(row) && in_range(col) {
            Ok((row - 1, col - 1))
        } else {
            Err(PercolationError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }
}

/// In-bounds orthogonal neighbors of `(r, c)`, 0-indexed.
fn neighbors(n: usize, r: usize, c: usize) -> impl Iterator<Item = (usize, usize)> {
    [
        (r > 0).then(|| (r - 1, c)),
        (r + 1 < n).then(|| (r + 1, c)),
        (c > 0).then(|| (r, c - 1)),
        (c + 1 < n).then(|| (r, c + 1)),
    ]
    .into_iter()
    .flatten()
}
