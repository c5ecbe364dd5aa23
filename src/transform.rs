use crate::{Matrix, Result, ShortVec, TransformError, Transformation};

/// The largest number of spatial dimensions supported.
pub const MAX_NDIM: usize = 3;

/// Fails unless `1 <= ndim <= MAX_NDIM`.
pub(crate) fn check_ndim(ndim: usize) -> Result<()> {
    if ndim == 0 || ndim > MAX_NDIM {
        return Err(TransformError::UnsupportedDimensions(ndim));
    }
    Ok(())
}

/// An affine transform of `ndim` dimensions,
/// stored as an `(ndim + 1) x (ndim + 1)` homogeneous matrix
/// whose last row is always `[0, ..., 0, 1]`.
///
/// Points are treated as column vectors,
/// so the matrix is applied as `M · [p_0, ..., p_n-1, 1]`.
/// Transforms are immutable; composing them produces a new transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix,
}

impl Transform {
    /// Wrap a square matrix of a supported size,
    /// overwriting its last row with `[0, ..., 0, 1]`.
    ///
    /// The last row of a product of affine matrices is only inexact
    /// when non-finite values are involved.
    pub(crate) fn from_affine_matrix(mut matrix: Matrix) -> Self {
        let last = matrix.nrows() - 1;
        for c in 0..last {
            matrix[(last, c)] = 0.0;
        }
        matrix[(last, last)] = 1.0;
        Self { matrix }
    }

    /// Validate and wrap a homogeneous matrix.
    ///
    /// The matrix must be square, of size 2, 3 or 4,
    /// and have a last row of exactly `[0, ..., 0, 1]`.
    pub fn try_from_matrix(matrix: Matrix) -> Result<Self> {
        if !matrix.is_square() {
            return Err(TransformError::MalformedTransform(format!(
                "matrix must be square, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        check_ndim(matrix.nrows().saturating_sub(1))?;

        let last = matrix.nrows() - 1;
        let last_row_ok = matrix
            .row(last)
            .iter()
            .enumerate()
            .all(|(c, v)| {
                let expected = if c == last { 1.0 } else { 0.0 };
                *v == expected
            });
        if !last_row_ok {
            return Err(TransformError::MalformedTransform(format!(
                "last row must be [0, ..., 0, 1], got {:?}",
                matrix.row(last)
            )));
        }
        Ok(Self { matrix })
    }

    /// The identity transform in `ndim` dimensions.
    pub fn identity(ndim: usize) -> Result<Self> {
        check_ndim(ndim)?;
        Ok(Self {
            matrix: Matrix::identity(ndim + 1),
        })
    }

    /// Number of spatial dimensions (one less than the matrix size).
    pub fn ndim(&self) -> usize {
        self.matrix.nrows() - 1
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// The translation component, i.e. where the origin is mapped to.
    pub fn translation(&self) -> ShortVec<f64> {
        let n = self.ndim();
        (0..n).map(|r| self.matrix[(r, n)]).collect()
    }

    /// The `ndim x ndim` linear part, i.e. the matrix without its translation column and last row.
    pub fn linear_part(&self) -> Matrix {
        let n = self.ndim();
        let data = (0..n)
            .flat_map(|r| self.matrix.row(r)[..n].iter().copied())
            .collect();
        Matrix::try_new(data, n).expect("transforms have at least one dimension")
    }

    /// Determinant of the linear part,
    /// i.e. the factor by which the transform scales lengths, areas or volumes.
    pub fn determinant(&self) -> f64 {
        // equal to the determinant of the whole matrix, given the last row
        self.matrix
            .determinant()
            .expect("transform matrices are square")
    }
}

impl TryFrom<Matrix> for Transform {
    type Error = TransformError;

    fn try_from(value: Matrix) -> Result<Self> {
        Self::try_from_matrix(value)
    }
}

impl From<Transform> for Matrix {
    fn from(value: Transform) -> Self {
        value.into_matrix()
    }
}

impl Transformation for Transform {
    /// Equivalent to multiplying the lifted point `[pt..., 1]` by the matrix
    /// and dropping the trailing coordinate.
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]) {
        let n = self.ndim();
        for (r, o) in buf.iter_mut().enumerate().take(n) {
            let row = self.matrix.row(r);
            *o = row[..n]
                .iter()
                .zip(pt.iter())
                .map(|(m, p)| m * p)
                .sum::<f64>()
                + row[n];
        }
    }

    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        let n_pts = columns.first().map_or(0, |c| c.len());
        let ones = vec![1.0; n_pts];
        let mut lifted: ShortVec<&[f64]> = columns.iter().copied().collect();
        lifted.push(&ones);
        // bufs only has ndim entries, so the homogeneous row is skipped
        self.matrix.matmul_transposed_into(&lifted, bufs);
    }

    /// `None` if the linear part is singular, e.g. a scale by 0.
    ///
    /// The inverse of `x -> A·x + t` is `x -> A⁻¹·x - A⁻¹·t`,
    /// so the size of the translation does not affect invertibility.
    fn invert(&self) -> Option<Self> {
        let n = self.ndim();
        let linear_inv = self.linear_part().inverse()?;
        let mut matrix = Matrix::identity(n + 1);
        for r in 0..n {
            let mut offset = 0.0;
            for c in 0..n {
                let v = linear_inv[(r, c)];
                matrix[(r, c)] = v;
                offset -= v * self.matrix[(c, n)];
            }
            matrix[(r, n)] = offset;
        }
        Some(Self::from_affine_matrix(matrix))
    }

    fn is_identity(&self) -> bool {
        self.matrix.is_identity()
    }

    fn input_ndim(&self) -> usize {
        self.ndim()
    }

    fn output_ndim(&self) -> usize {
        self.ndim()
    }
}
