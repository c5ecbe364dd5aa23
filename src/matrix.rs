use std::ops::{Index, IndexMut};

use crate::{Result, TransformError};

/// Pivots smaller than this, relative to the largest entry, are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Dense, row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Row-major / C-ordered matrix data.
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        self.get(index.0, index.1)
            .expect("index should be in bounds")
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        self.get_mut(index.0, index.1)
            .expect("index should be in bounds")
    }
}

impl Matrix {
    pub fn builder(row_vecs: bool) -> MatrixBuilder {
        MatrixBuilder::new(row_vecs)
    }

    /// Square matrix with ones on the diagonal.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            data,
            nrows: n,
            ncols: n,
        }
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Row-major/ C order data
    pub fn try_new(data: Vec<f64>, ncols: usize) -> Result<Self> {
        if ncols == 0 {
            return Err(TransformError::MalformedMatrix(
                "ncols must be greater than 0".into(),
            ));
        }
        if data.len() % ncols != 0 {
            return Err(TransformError::MalformedMatrix(format!(
                "data length {} is not divisible by ncols {}",
                data.len(),
                ncols
            )));
        }
        let nrows = data.len() / ncols;
        Ok(Self { data, nrows, ncols })
    }

    /// Column-major/ Fortran order data
    pub fn try_new_colmaj(data: Vec<f64>, nrows: usize) -> Result<Self> {
        if nrows == 0 {
            return Err(TransformError::MalformedMatrix(
                "nrows must be greater than 0".into(),
            ));
        }
        if data.len() % nrows != 0 {
            return Err(TransformError::MalformedMatrix(format!(
                "data length {} is not divisible by nrows {}",
                data.len(),
                nrows
            )));
        }
        let ncols = data.len() / nrows;
        let mut rowmaj = vec![0.0; data.len()];
        for (f_idx, val) in data.into_iter().enumerate() {
            let r = f_idx % nrows;
            let c = f_idx / nrows;
            rowmaj[r * ncols + c] = val;
        }
        Ok(Self {
            data: rowmaj,
            nrows,
            ncols,
        })
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.data.len()];
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                data[c * self.nrows + r] = self[(r, c)];
            }
        }
        Matrix {
            data,
            nrows: self.ncols,
            ncols: self.nrows,
        }
    }

    /// Matrix product `self · other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.ncols != other.nrows {
            return Err(TransformError::DimensionMismatch {
                expected: self.ncols,
                actual: other.nrows,
            });
        }
        let mut data = vec![0.0; self.nrows * other.ncols];
        for (out_row, row) in data
            .chunks_exact_mut(other.ncols.max(1))
            .zip(self.data.chunks_exact(self.ncols.max(1)))
        {
            for (a, other_row) in row.iter().zip(other.data.chunks_exact(other.ncols.max(1))) {
                for (o, b) in out_row.iter_mut().zip(other_row.iter()) {
                    *o += a * b;
                }
            }
        }
        Ok(Matrix {
            data,
            nrows: self.nrows,
            ncols: other.ncols,
        })
    }

    /// Only the first `buf.len()` rows of the matrix are used.
    ///
    /// N.B. Coordinate "columns" are the _rows_ of the input and output matrices.
    pub fn matmul_transposed_into(&self, coord_cols: &[&[f64]], buf: &mut [&mut [f64]]) {
        for (out_dim_idx, buf_col) in buf.iter_mut().enumerate() {
            buf_col.fill(0.0);
            let row = self.row(out_dim_idx);
            for (mat_val, coord_col) in row.iter().zip(coord_cols.iter()) {
                // our hottest loop is iterating over long arrays in lock step
                for (c, b) in coord_col.iter().zip(buf_col.iter_mut()) {
                    *b += c * mat_val;
                }
            }
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.data.get(row * self.ncols + col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.data.get_mut(row * self.ncols + col)
    }

    /// Panics if the row is out of bounds.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.ncols;
        &self.data[start..(start + self.ncols)]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Exact comparison against the identity; no tolerance is applied.
    pub fn is_identity(&self) -> bool {
        self.is_square()
            && self.data.iter().enumerate().all(|(idx, v)| {
                let expected = if idx / self.ncols == idx % self.ncols {
                    1.0
                } else {
                    0.0
                };
                *v == expected
            })
    }

    fn check_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(TransformError::MalformedMatrix(format!(
                "expected a square matrix, got {}x{}",
                self.nrows, self.ncols
            )));
        }
        Ok(())
    }

    /// Determinant by Gaussian elimination with partial pivoting.
    pub fn determinant(&self) -> Result<f64> {
        self.check_square()?;
        let n = self.nrows;
        let mut a = self.data.clone();
        let mut det = 1.0;
        for col in 0..n {
            let pivot = pivot_row(&a, n, col);
            let p = a[pivot * n + col];
            if p == 0.0 {
                return Ok(0.0);
            }
            if pivot != col {
                swap_rows(&mut a, n, pivot, col);
                det = -det;
            }
            det *= p;
            for r in (col + 1)..n {
                let factor = a[r * n + col] / p;
                for c in col..n {
                    a[r * n + c] -= factor * a[col * n + c];
                }
            }
        }
        Ok(det)
    }

    /// Inverse by Gauss-Jordan elimination.
    ///
    /// `None` if the matrix is not square or is (numerically) singular.
    pub fn inverse(&self) -> Option<Matrix> {
        if !self.is_square() {
            return None;
        }
        let n = self.nrows;
        let max_abs = self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if max_abs == 0.0 || max_abs.is_nan() {
            return None;
        }
        let tolerance = PIVOT_EPSILON * max_abs;

        let mut a = self.data.clone();
        let mut inv = Matrix::identity(n).data;
        for col in 0..n {
            let pivot = pivot_row(&a, n, col);
            let magnitude = a[pivot * n + col].abs();
            if magnitude.is_nan() || magnitude <= tolerance {
                return None;
            }
            if pivot != col {
                swap_rows(&mut a, n, pivot, col);
                swap_rows(&mut inv, n, pivot, col);
            }
            let p = a[col * n + col];
            for c in 0..n {
                a[col * n + c] /= p;
                inv[col * n + c] /= p;
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = a[r * n + col];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..n {
                    a[r * n + c] -= factor * a[col * n + c];
                    inv[r * n + c] -= factor * inv[col * n + c];
                }
            }
        }
        Some(Matrix {
            data: inv,
            nrows: n,
            ncols: n,
        })
    }
}

/// Index of the row at or below `col` with the largest magnitude in column `col`.
fn pivot_row(data: &[f64], n: usize, col: usize) -> usize {
    (col..n)
        .max_by(|&i, &j| data[i * n + col].abs().total_cmp(&data[j * n + col].abs()))
        .unwrap_or(col)
}

fn swap_rows(data: &mut [f64], ncols: usize, r1: usize, r2: usize) {
    for c in 0..ncols {
        data.swap(r1 * ncols + c, r2 * ncols + c);
    }
}

#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    row_vecs: bool,
    dim_len: Option<usize>,
    data: Vec<f64>,
}

impl MatrixBuilder {
    fn new(row_vecs: bool) -> Self {
        Self {
            row_vecs,
            dim_len: None,
            data: Default::default(),
        }
    }

    pub fn add_vec(&mut self, vec: &[f64]) -> Result<&mut Self> {
        if let Some(len) = self.dim_len {
            if len != vec.len() {
                return Err(TransformError::DimensionMismatch {
                    expected: len,
                    actual: vec.len(),
                });
            }
        } else {
            self.dim_len = Some(vec.len());
        }
        self.data.extend_from_slice(vec);
        Ok(self)
    }

    /// Fails if no (non-empty) vectors were added.
    pub fn build(self) -> Result<Matrix> {
        let dim_len = self.dim_len.unwrap_or(0);
        if self.row_vecs {
            Matrix::try_new(self.data, dim_len)
        } else {
            Matrix::try_new_colmaj(self.data, dim_len)
        }
    }
}
