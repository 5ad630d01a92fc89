//! Dense square matrix indexed by place position.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Row-major N x N matrix.
///
/// Always square: the dimension is fixed at construction and every cell
/// exists. Serializes as a list of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    dim: usize,
    cells: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// An N x N matrix with every cell set to `fill`.
    pub fn new(dim: usize, fill: T) -> Self {
        Self { dim, cells: vec![fill; dim * dim] }
    }

    /// Build from nested rows. Returns `None` unless the rows form a square.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let dim = rows.len();
        if rows.iter().any(|r| r.len() != dim) {
            return None;
        }
        let cells = rows.into_iter().flatten().collect();
        Some(Self { dim, cells })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Same shape, cells mapped through `f`.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        Matrix { dim: self.dim, cells: self.cells.iter().map(f).collect() }
    }
}

impl<T> Matrix<T> {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Cell (row, col), or `None` when either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.dim && col < self.dim {
            self.cells.get(row * self.dim + col)
        } else {
            None
        }
    }

    /// Overwrite cell (row, col).
    ///
    /// # Panics
    /// When either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(row < self.dim && col < self.dim, "matrix index ({row}, {col}) out of range for dim {}", self.dim);
        self.cells[row * self.dim + col] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics, so an empty matrix yields no rows
        self.cells.chunks_exact(self.dim.max(1)).take(self.dim)
    }
}

impl<T> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.dim && col < self.dim, "matrix index ({row}, {col}) out of range for dim {}", self.dim);
        &self.cells[row * self.dim + col]
    }
}

impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.dim))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
