/// Dense row-major matrix of f64 with cofactor-expansion determinant and inverse
use std::fmt;

use approx::AbsDiffEq;
use nalgebra::DMatrix;

use crate::error::{GeometryError, GeometryResult};
use crate::float::{float_eq, is_zero, EPSILON};
use crate::tuple::{Homogeneous, Point, Vector};

/// A `rows x cols` matrix that exclusively owns its cell buffer.
///
/// Dimensions are fixed at construction; cells may be updated with [`Matrix::set`].
/// Equality is tolerant: two matrices compare equal when their shapes match
/// and every pair of cells differs by less than [`EPSILON`].
#[derive(Debug, Clone)]
pub struct Matrix {
    data: Box<[f64]>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a zero-filled matrix.
    ///
    /// Fails with [`GeometryError::InvalidInitialValues`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> GeometryResult<Self> {
        if rows < 1 || cols < 1 {
            return Err(GeometryError::InvalidInitialValues(format!(
                "cannot create a {}x{} matrix",
                rows, cols
            )));
        }
        Ok(Self {
            data: vec![0.0; rows * cols].into_boxed_slice(),
            rows,
            cols,
        })
    }

    /// Create an `n x n` identity matrix
    pub fn identity(n: usize) -> GeometryResult<Self> {
        let mut mat = Self::new(n, n)?;
        for i in 0..n {
            mat.data[i * n + i] = 1.0;
        }
        Ok(mat)
    }

    /// Build a matrix from a sequence of rows.
    ///
    /// The outer sequence and every row must be non-empty, and all rows must
    /// have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> GeometryResult<Self> {
        let cols = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => {
                return Err(GeometryError::InvalidInitialValues(
                    "no rows given".to_string(),
                ))
            }
        };

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row_num, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.is_empty() || row.len() != cols {
                return Err(GeometryError::InvalidInitialValues(format!(
                    "row {} has {} values, expected {}",
                    row_num,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data: data.into_boxed_slice(),
            rows: rows.len(),
            cols,
        })
    }

    /// 4x1 column holding the homogeneous embedding of `tuple`
    pub fn column<T: Homogeneous>(tuple: &T) -> Self {
        Self {
            data: Box::new(tuple.to_column()),
            rows: 4,
            cols: 1,
        }
    }

    /// 4x1 column `(x, y, z, 1)`
    pub fn from_point(p: &Point) -> Self {
        Self::column(p)
    }

    /// 4x1 column `(x, y, z, 0)`
    pub fn from_vector(v: &Vector) -> Self {
        Self::column(v)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// All cells in row-major order
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> GeometryError {
        GeometryError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn get(&self, i: usize, j: usize) -> GeometryResult<f64> {
        if i >= self.rows || j >= self.cols {
            return Err(self.out_of_bounds(i, j));
        }
        Ok(self.data[i * self.cols + j])
    }

    pub fn set(&mut self, i: usize, j: usize, val: f64) -> GeometryResult<()> {
        if i >= self.rows || j >= self.cols {
            return Err(self.out_of_bounds(i, j));
        }
        self.data[i * self.cols + j] = val;
        Ok(())
    }

    /// Borrow row `i`
    pub fn row(&self, i: usize) -> GeometryResult<&[f64]> {
        if i >= self.rows {
            return Err(self.out_of_bounds(i, 0));
        }
        Ok(&self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Copy out column `j`
    pub fn col(&self, j: usize) -> GeometryResult<Vec<f64>> {
        if j >= self.cols {
            return Err(self.out_of_bounds(0, j));
        }
        Ok((0..self.rows)
            .map(|i| self.data[i * self.cols + j])
            .collect())
    }

    /// Matrix product `self * other`.
    ///
    /// Fails with [`GeometryError::DimensionMismatch`] unless `self.cols() == other.rows()`.
    pub fn multiply(&self, other: &Matrix) -> GeometryResult<Matrix> {
        if self.cols != other.rows {
            return Err(GeometryError::DimensionMismatch {
                operation: "multiplication",
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }

        let mut product = Matrix::new(self.rows, other.cols)?;
        for r in 0..self.rows {
            let row = &self.data[r * self.cols..(r + 1) * self.cols];
            for c in 0..other.cols {
                product.data[r * other.cols + c] = row
                    .iter()
                    .enumerate()
                    .map(|(k, val)| val * other.data[k * other.cols + c])
                    .sum();
            }
        }
        Ok(product)
    }

    pub fn transposed(&self) -> Matrix {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            data: data.into_boxed_slice(),
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Tolerant cell-wise comparison; matrices of different shapes are never equal
    pub fn is_equal_to(&self, other: &Matrix) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| float_eq(*a, *b))
    }

    /// Copy of the matrix with `row` and `col` removed.
    ///
    /// Fails with [`GeometryError::OutOfBounds`] if either index is outside
    /// the matrix or the matrix has fewer than two rows or columns.
    pub fn submatrix(&self, row: usize, col: usize) -> GeometryResult<Matrix> {
        if row >= self.rows || col >= self.cols || self.rows < 2 || self.cols < 2 {
            return Err(self.out_of_bounds(row, col));
        }

        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for i in (0..self.rows).filter(|&i| i != row) {
            for j in (0..self.cols).filter(|&j| j != col) {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Ok(Matrix {
            data: data.into_boxed_slice(),
            rows: self.rows - 1,
            cols: self.cols - 1,
        })
    }

    /// Determinant of the submatrix with `row` and `col` removed
    pub fn minor(&self, row: usize, col: usize) -> GeometryResult<f64> {
        self.submatrix(row, col)?.det()
    }

    /// Signed minor, `minor(row, col) * (-1)^(row + col)`
    pub fn cofactor(&self, row: usize, col: usize) -> GeometryResult<f64> {
        let minor = self.minor(row, col)?;
        if (row + col) % 2 == 0 {
            Ok(minor)
        } else {
            Ok(-minor)
        }
    }

    /// Determinant by Laplace expansion along the first row.
    ///
    /// Runs in factorial time; intended for the 2x2 to 4x4 matrices used by
    /// affine transformations.
    pub fn det(&self) -> GeometryResult<f64> {
        if !self.is_square() {
            return Err(GeometryError::DimensionMismatch {
                operation: "determinant",
                lhs: (self.rows, self.cols),
                rhs: (self.rows, self.cols),
            });
        }
        if self.rows == 1 {
            return Ok(self.data[0]);
        }

        let mut det = 0.0;
        for col in 0..self.cols {
            det += self.data[col] * self.cofactor(0, col)?;
        }
        Ok(det)
    }

    /// Inverse as the adjugate scaled by `1 / det`.
    ///
    /// Fails with [`GeometryError::MatrixNotInvertible`] when the determinant is
    /// within tolerance of zero, and with [`GeometryError::DimensionMismatch`]
    /// for non-square matrices.
    pub fn inverse(&self) -> GeometryResult<Matrix> {
        let det = self.det()?;
        if is_zero(det) {
            return Err(GeometryError::MatrixNotInvertible { determinant: det });
        }

        let mut inv = Matrix::new(self.rows, self.cols)?;
        if self.rows == 1 {
            inv.data[0] = 1.0 / det;
            return Ok(inv);
        }
        for i in 0..self.rows {
            for j in 0..self.cols {
                inv.data[j * self.cols + i] = self.cofactor(i, j)? / det;
            }
        }
        Ok(inv)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, val) in self.data.iter().enumerate() {
            if i > 0 {
                if i % self.cols == 0 {
                    writeln!(f)?;
                } else {
                    write!(f, " ")?;
                }
            }
            write!(f, "{:14.3}", val)?;
        }
        Ok(())
    }
}

impl From<[[f64; 4]; 4]> for Matrix {
    fn from(rows: [[f64; 4]; 4]) -> Self {
        Self {
            data: rows.concat().into_boxed_slice(),
            rows: 4,
            cols: 4,
        }
    }
}

impl From<&Matrix> for DMatrix<f64> {
    fn from(mat: &Matrix) -> Self {
        DMatrix::from_row_slice(mat.rows, mat.cols, &mat.data)
    }
}

impl TryFrom<&DMatrix<f64>> for Matrix {
    type Error = GeometryError;

    fn try_from(mat: &DMatrix<f64>) -> GeometryResult<Self> {
        let mut result = Matrix::new(mat.nrows(), mat.ncols())?;
        for i in 0..mat.nrows() {
            for j in 0..mat.ncols() {
                result.data[i * mat.ncols() + j] = mat[(i, j)];
            }
        }
        Ok(result)
    }
}
