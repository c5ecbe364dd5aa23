use crate::{
    Matrix, Result, ShortVec, Transform, TransformError, Transformation, transform::check_ndim,
};

/// Compose two transforms as the matrix product `t1 · t2`.
///
/// Order matters: when the result is applied to a point,
/// `t2` is applied first and `t1` second.
pub fn multiply(t1: &Transform, t2: &Transform) -> Result<Transform> {
    if t1.ndim() != t2.ndim() {
        return Err(TransformError::DimensionMismatch {
            expected: t1.ndim(),
            actual: t2.ndim(),
        });
    }
    let product = t1.matrix().multiply(t2.matrix())?;
    Ok(Transform::from_affine_matrix(product))
}

/// Apply a transform to a single point.
///
/// The point is lifted to homogeneous coordinates,
/// multiplied by the transform's matrix,
/// and returned without the trailing coordinate.
/// Fails if the point's dimensionality does not match the transform's.
pub fn transform(t: &Transform, point: &[f64]) -> Result<ShortVec<f64>> {
    if point.len() != t.ndim() {
        return Err(TransformError::DimensionMismatch {
            expected: t.ndim(),
            actual: point.len(),
        });
    }
    let mut out = smallvec::smallvec![f64::NAN; t.ndim()];
    t.transform_into(point, &mut out);
    Ok(out)
}

impl Transform {
    /// Apply this transform, then `next`.
    ///
    /// Equivalent to `multiply(next, self)`.
    pub fn then(&self, next: &Transform) -> Result<Transform> {
        multiply(next, self)
    }

    /// Checked application to a single point; see [transform].
    pub fn apply(&self, point: &[f64]) -> Result<ShortVec<f64>> {
        transform(self, point)
    }

    /// Express this transform in a higher number of dimensions.
    ///
    /// The existing axes behave as before
    /// and any added axes are passed through unchanged.
    pub fn embed(&self, ndim: usize) -> Result<Transform> {
        check_ndim(ndim)?;
        let own = self.ndim();
        if ndim < own {
            return Err(TransformError::DimensionMismatch {
                expected: own,
                actual: ndim,
            });
        }
        if ndim == own {
            return Ok(self.clone());
        }

        let mut matrix = Matrix::identity(ndim + 1);
        for r in 0..own {
            for c in 0..own {
                matrix[(r, c)] = self.matrix()[(r, c)];
            }
            matrix[(r, ndim)] = self.matrix()[(r, own)];
        }
        Ok(Transform::from_affine_matrix(matrix))
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_ulps_eq};
    use faer::rand::SeedableRng;
    use faer::stats::prelude::{Rng, SmallRng};

    use super::*;
    use crate::{Angle, identity, rotate_xy, rotate_z, scale, translate};

    fn random_transform(rng: &mut SmallRng, ndim: usize) -> Transform {
        let mut matrix = Matrix::identity(ndim + 1);
        for r in 0..ndim {
            for c in 0..=ndim {
                matrix[(r, c)] = rng.random::<f64>() * 20.0 - 10.0;
            }
        }
        Transform::try_from_matrix(matrix).unwrap()
    }

    #[test]
    fn test_identity_law() {
        let mut rng = SmallRng::seed_from_u64(1991);
        for ndim in 1..=3 {
            let ident = identity(ndim).unwrap();
            for _ in 0..20 {
                let pt: Vec<f64> = (0..ndim).map(|_| rng.random::<f64>() * 100.0).collect();
                assert_eq!(transform(&ident, &pt).unwrap().as_slice(), pt.as_slice());
            }
        }
    }

    #[test]
    fn test_order_matters() {
        let t = translate(&[1.0, 2.0, 3.0]).unwrap();
        let s = scale(&[2.0, 2.0, 2.0]).unwrap();
        let pt = [1.0, 2.0, 3.0];

        // right operand is applied first: scale, then translate
        let ts = multiply(&t, &s).unwrap();
        assert_eq!(transform(&ts, &pt).unwrap().as_slice(), &[3.0, 6.0, 9.0]);

        // translate, then scale
        let st = multiply(&s, &t).unwrap();
        assert_eq!(transform(&st, &pt).unwrap().as_slice(), &[4.0, 8.0, 12.0]);

        assert_eq!(s.then(&t).unwrap(), ts);
    }

    #[test]
    fn test_associative() {
        let mut rng = SmallRng::seed_from_u64(1991);
        for ndim in 1..=3 {
            let a = random_transform(&mut rng, ndim);
            let b = random_transform(&mut rng, ndim);
            let c = random_transform(&mut rng, ndim);
            let left = multiply(&multiply(&a, &b).unwrap(), &c).unwrap();
            let right = multiply(&a, &multiply(&b, &c).unwrap()).unwrap();
            assert_ulps_eq!(
                left.matrix().as_slice(),
                right.matrix().as_slice(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_operands_unchanged() {
        let t = translate(&[1.0, 2.0]).unwrap();
        let r = rotate_xy(Angle::degrees(30.0));
        let (t_before, r_before) = (t.clone(), r.clone());
        let _ = multiply(&t, &r).unwrap();
        assert_eq!(t, t_before);
        assert_eq!(r, r_before);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let t2 = translate(&[1.0, 2.0]).unwrap();
        let t3 = translate(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            multiply(&t2, &t3),
            Err(TransformError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_transform_dimension_mismatch() {
        let t = translate(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            transform(&t, &[1.0, 2.0]),
            Err(TransformError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(t.apply(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn test_embed_rotation() {
        let embedded = rotate_xy(Angle::degrees(90.0)).embed(3).unwrap();
        let expected = rotate_z(Angle::degrees(90.0));
        assert_abs_diff_eq!(
            embedded.matrix().as_slice(),
            expected.matrix().as_slice(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_embed_translation() {
        let t = translate(&[5.0]).unwrap().embed(3).unwrap();
        assert_eq!(t.ndim(), 3);
        assert_eq!(t.apply(&[1.0, 2.0, 3.0]).unwrap().as_slice(), &[6.0, 2.0, 3.0]);

        let same = translate(&[5.0, 1.0]).unwrap();
        assert_eq!(same.embed(2).unwrap(), same);

        assert_eq!(
            same.embed(1),
            Err(TransformError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(same.embed(4), Err(TransformError::UnsupportedDimensions(4)));
    }
}
