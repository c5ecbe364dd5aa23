/// Core spatial transformation interface.
///
/// Implementations may not perform any bounds checks on the input,
/// as these transformations generally happen in performance-critical hot loops.
/// Therefore, they may panic if coordinates or output buffers of incorrect length are given.
/// Use [crate::transform] for a checked, allocating alternative.
pub trait Transformation: std::fmt::Debug + Send + Sync {
    /// Transform a single point from the input space to the output space.
    /// Writes to a pre-allocated output buffer.
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]);

    /// Transform multiple points from the input space into the output space.
    /// Writes to pre-allocated output buffers.
    ///
    /// The trait default implementation simply calls [Transformation::transform_into] in turn;
    /// specific transforms may override it.
    fn bulk_transform_into(&self, pts: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (pt, buf) in pts.iter().zip(bufs.iter_mut()) {
            self.transform_into(pt, buf);
        }
    }

    /// Transform multiple points given in columnar format,
    /// i.e. `columns[d][i]` is dimension `d` of point `i`.
    /// Writes to pre-allocated output buffers of the same layout.
    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]);

    /// Return the inverse transformation, if it exists.
    fn invert(&self) -> Option<Self>
    where
        Self: Sized;

    /// Whether this transformation represents the identity,
    /// i.e. input and output are the same number of dimensions
    /// and the coordinate values (and positions) are not changed.
    ///
    /// `true` means it definitely is an identity.
    /// A `false` value is not definitive, as no floating point tolerance is applied.
    fn is_identity(&self) -> bool;

    fn input_ndim(&self) -> usize;

    fn output_ndim(&self) -> usize;
}
