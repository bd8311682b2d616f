//! Strict upper-triangular matrix stored as a flat vector

use std::fmt;

/// Dense storage for the cells `(i, j)` with `i < j < size`
///
/// Row `i` holds `size - i - 1` cells and rows are laid out one after the
/// other, so the matrix takes `size * (size - 1) / 2` slots.
#[derive(Clone, PartialEq)]
pub struct TriangularMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T> TriangularMatrix<T> {
    /// Build a matrix by calling `f(i, j)` for every cell in row-major order
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let cells = Self::coordinates(size).map(|(i, j)| f(i, j)).collect();
        Self { size, cells }
    }

    /// Wrap cells already laid out in row-major order
    ///
    /// Returns `None` when the number of cells does not match `size`.
    pub fn from_cells(size: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == Self::capacity(size)).then_some(Self { size, cells })
    }

    /// Wrap cells produced in the order of [`TriangularMatrix::coordinates`]
    pub(crate) fn from_row_major(size: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), Self::capacity(size));
        Self { size, cells }
    }

    /// Coordinates `(i, j)`, `i < j < size`, in row-major order
    pub fn coordinates(size: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..size).flat_map(move |i| ((i + 1)..size).map(move |j| (i, j)))
    }

    /// Number of cells for a matrix of `size` rows
    pub fn capacity(size: usize) -> usize {
        size * size.saturating_sub(1) / 2
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell `(i, j)`, `None` unless `i < j < size`
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        self.offset(i, j).map(|offset| &self.cells[offset])
    }

    /// Cells with their coordinates, in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        Self::coordinates(self.size).zip(self.cells.iter())
    }

    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        if i < j && j < self.size {
            Some(i * (2 * self.size - i - 1) / 2 + (j - i - 1))
        } else {
            None
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TriangularMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
