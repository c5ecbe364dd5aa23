use crate::{Operation, Result, Transform, TransformError, create, transform};

/// The 1D affine transform which maps `x1_in` to `x1_out` and `x2_in` to `x2_out`.
///
/// Useful for remapping between coordinate spaces, e.g. data values to pixels.
/// Fails if the two input coordinates are equal.
pub fn derive_linear_map(x1_in: f64, x1_out: f64, x2_in: f64, x2_out: f64) -> Result<Transform> {
    if x1_in == x2_in {
        return Err(TransformError::DegenerateLinearMap { x_in: x1_in });
    }
    let slope = (x2_out - x1_out) / (x2_in - x1_in);
    let intercept = x2_out - slope * x2_in;
    log::trace!("Linear map: x * {slope} + {intercept}");

    // scale first, then translate
    create(&[
        Operation::translation(&[intercept]),
        Operation::scaling(&[slope]),
    ])
}

/// Apply a 1D transform to a single value.
pub fn map(t: &Transform, value: f64) -> Result<f64> {
    let out = transform(t, &[value])?;
    Ok(out[0])
}
