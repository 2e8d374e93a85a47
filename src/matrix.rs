//! Fixed-size square matrix stored row-major in a single allocation.

use crate::error::{Error, Result};

/// An `n x n` matrix whose size is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> SquareMatrix<T> {
    /// Creates a matrix with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> SquareMatrix<T> {
    /// Builds a matrix by calling `f(row, col)` for every cell.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(f(row, col));
            }
        }
        Self { size, cells }
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::config(format!(
                    "row {} has {} columns, expected {}",
                    index,
                    row.len(),
                    size
                )));
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.offset(row, col).map(|offset| &self.cells[offset])
    }

    /// Replaces the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let offset = self.checked_offset(row, col)?;
        self.cells[offset] = value;
        Ok(())
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.size {
            Some(&self.cells[row * self.size..(row + 1) * self.size])
        } else {
            None
        }
    }

    /// All cells, row-major.
    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    fn checked_offset(&self, row: usize, col: usize) -> Result<usize> {
        self.offset(row, col).ok_or(Error::IndexOutOfRange {
            index: row.max(col),
            size: self.size,
        })
    }
}
