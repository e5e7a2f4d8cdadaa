//! Column-major enumeration of grid cells

use crate::error::{Error, Result};

/// Iterator over the `(col, row)` cells of a rectangular block of the grid.
///
/// Columns run over `[x, x + ncol)` and rows over `[y, y + nrow)`, both
/// advancing by `step`. For each column every row is yielded before moving
/// on, so `(0, 0), (0, 1), (1, 0), (1, 1)` for a 2×2 block at the origin.
/// No wraparound is applied to the yielded values.
///
/// The iterator is finite and cheap to clone; a clone taken before
/// iteration replays the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridIter {
    x: i64,
    y: i64,
    ncol: i64,
    nrow: i64,
    step: i64,
    current: u64,
}

impl GridIter {
    /// Creates an iterator over a square block of `ncol` × `ncol` cells
    pub fn new(x: i64, y: i64, ncol: i64) -> Self {
        Self {
            x,
            y,
            ncol,
            nrow: ncol,
            step: 1,
            current: 0,
        }
    }

    /// Sets the number of rows, making the block rectangular
    pub fn rows(mut self, nrow: i64) -> Self {
        self.nrow = nrow;
        self.current = 0;
        self
    }

    /// Sets the stride between yielded columns and rows
    pub fn step(mut self, step: i64) -> Result<Self> {
        if step < 1 {
            return Err(Error::InvalidStep);
        }
        self.step = step;
        self.current = 0;
        Ok(self)
    }

    /// Rewinds to the first cell
    pub fn restart(&mut self) {
        self.current = 0;
    }

    fn steps(&self, extent: i64) -> u64 {
        if extent <= 0 {
            0
        } else {
            (extent / self.step + i64::from(extent % self.step != 0)) as u64
        }
    }

    fn column_count(&self) -> u64 {
        self.steps(self.ncol)
    }

    fn row_count(&self) -> u64 {
        self.steps(self.nrow)
    }

    fn total(&self) -> u64 {
        self.column_count().saturating_mul(self.row_count())
    }
}

impl Iterator for GridIter {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.total() {
            return None;
        }

        let rows = self.row_count();
        let col = self.x + (self.current / rows) as i64 * self.step;
        let row = self.y + (self.current % rows) as i64 * self.step;

        self.current += 1;

        Some((col, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total() - self.current) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter {}

/// Shorthand for a square block with unit step
pub fn grid_iter(x: i64, y: i64, ncol: i64) -> GridIter {
    GridIter::new(x, y, ncol)
}
