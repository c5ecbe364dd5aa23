//! Canonical matrices for each kind of operation.
//!
//! Rotations are counter-clockwise about the named axis
//! when looking from the positive end of that axis towards the origin.
use crate::{
    Angle, Matrix, OperationKind, Result, Transform, TransformError, transform::check_ndim,
};

/// The identity transform in `ndim` dimensions.
pub fn identity(ndim: usize) -> Result<Transform> {
    Transform::identity(ndim)
}

/// Translate each coordinate by the corresponding offset.
///
/// The number of offsets gives the dimensionality.
pub fn translate(offsets: &[f64]) -> Result<Transform> {
    let ndim = offsets.len();
    check_ndim(ndim)?;
    let mut matrix = Matrix::identity(ndim + 1);
    for (r, t) in offsets.iter().enumerate() {
        matrix[(r, ndim)] = *t;
    }
    Ok(Transform::from_affine_matrix(matrix))
}

/// Multiply each coordinate by the corresponding factor.
///
/// The number of factors gives the dimensionality.
/// Zero and negative factors are allowed.
pub fn scale(factors: &[f64]) -> Result<Transform> {
    let ndim = factors.len();
    check_ndim(ndim)?;
    let mut matrix = Matrix::identity(ndim + 1);
    for (r, s) in factors.iter().enumerate() {
        matrix[(r, r)] = *s;
    }
    Ok(Transform::from_affine_matrix(matrix))
}

/// Shear coefficients.
///
/// The field `ab` adds `ab * b` to coordinate `a`,
/// e.g. with `xy = 0.5`, the point `(0, 2)` maps to `(1, 2)`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ShearFactors {
    pub xy: f64,
    pub xz: f64,
    pub yx: f64,
    pub yz: f64,
    pub zx: f64,
    pub zy: f64,
}

impl ShearFactors {
    /// `(name, row, column, value)` for each factor.
    pub(crate) fn entries(&self) -> [(&'static str, usize, usize, f64); 6] {
        [
            ("xy", 0, 1, self.xy),
            ("xz", 0, 2, self.xz),
            ("yx", 1, 0, self.yx),
            ("yz", 1, 2, self.yz),
            ("zx", 2, 0, self.zx),
            ("zy", 2, 1, self.zy),
        ]
    }
}

/// Shear in 2 or 3 dimensions.
///
/// In 2D, any non-zero factor involving `z` is rejected.
pub fn shear(ndim: usize, factors: ShearFactors) -> Result<Transform> {
    check_ndim(ndim)?;
    if ndim < 2 {
        return Err(TransformError::UnsupportedDimensions(ndim));
    }
    let mut matrix = Matrix::identity(ndim + 1);
    for (name, r, c, val) in factors.entries() {
        if r < ndim && c < ndim {
            matrix[(r, c)] = val;
        } else if val != 0.0 {
            return Err(TransformError::UnusedParameter {
                kind: OperationKind::Shear,
                param: name.to_string(),
            });
        }
    }
    Ok(Transform::from_affine_matrix(matrix))
}

/// 3D rotation about the x axis.
pub fn rotate_x(angle: Angle) -> Transform {
    let (s, c) = angle.to_radians().sin_cos();
    #[rustfmt::skip]
    let data = vec![
        1.0, 0.0, 0.0, 0.0,
        0.0, c,   -s,  0.0,
        0.0, s,   c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    homogeneous(data, 4)
}

/// 3D rotation about the y axis.
pub fn rotate_y(angle: Angle) -> Transform {
    let (s, c) = angle.to_radians().sin_cos();
    #[rustfmt::skip]
    let data = vec![
        c,   0.0, s,   0.0,
        0.0, 1.0, 0.0, 0.0,
        -s,  0.0, c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    homogeneous(data, 4)
}

/// 3D rotation about the z axis.
pub fn rotate_z(angle: Angle) -> Transform {
    let (s, c) = angle.to_radians().sin_cos();
    #[rustfmt::skip]
    let data = vec![
        c,   -s,  0.0, 0.0,
        s,   c,   0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    homogeneous(data, 4)
}

/// 2D rotation in the xy plane: [rotate_z] without the z axis.
pub fn rotate_xy(angle: Angle) -> Transform {
    let (s, c) = angle.to_radians().sin_cos();
    #[rustfmt::skip]
    let data = vec![
        c,   -s,  0.0,
        s,   c,   0.0,
        0.0, 0.0, 1.0,
    ];
    homogeneous(data, 3)
}

/// `data` must be a square row-major matrix with `size` columns.
fn homogeneous(data: Vec<f64>, size: usize) -> Transform {
    let mut matrix = Matrix::identity(size);
    for (idx, val) in data.into_iter().enumerate() {
        matrix[(idx / size, idx % size)] = val;
    }
    Transform::from_affine_matrix(matrix)
}
