//! Affine transforms in 1, 2 and 3 dimensions,
//! represented as homogeneous matrices of size `ndim + 1`.
//!
//! Transforms can be built directly with the constructors
//! ([translate], [scale], [shear], [rotate_x] etc.),
//! composed with [multiply],
//! or described declaratively as a list of [Operation]s and folded with [create].
//!
//! Points are column vectors: `multiply(a, b)` applies `b` first, then `a`.
//! In the same way, the first operation given to [create] is the last one applied to a point.
//!
//! ```
//! use affine_transforms::{Angle, Operation, create, transform};
//!
//! let t = create(&[
//!     Operation::translation(&[1.0, 2.0, 3.0]),
//!     Operation::scaling(&[2.0, 2.0, 2.0]),
//!     Operation::RotateZ(Angle::degrees(90.0)),
//! ])
//! .unwrap();
//! let pt = transform(&t, &[4.0, 5.0, 6.0]).unwrap();
//! assert!((pt[0] - -9.0).abs() < 1e-10);
//! ```
use smallvec::SmallVec;


mod error;
pub use error::{Result, TransformError};

mod matrix;
pub use matrix::{Matrix, MatrixBuilder};

mod angle;
pub use angle::{Angle, AngleUnit};

mod traits;
pub use traits::Transformation;

mod transform;
pub use transform::{MAX_NDIM, Transform};

mod constructors;
pub use constructors::{
    ShearFactors, identity, rotate_x, rotate_xy, rotate_y, rotate_z, scale, shear, translate,
};

mod compose;
pub use compose::{multiply, transform};

mod operation;
pub use operation::{Operation, OperationKind, OperationRecord};

mod builder;
pub use builder::{CompositeBuilder, create, create_from_records};

mod linear_map;
pub use linear_map::{derive_linear_map, map};

/// Inline capacity of [ShortVec]: enough for a 3D point in homogeneous coordinates.
pub const COORD_SIZE: usize = MAX_NDIM + 1;

/// A short vector type alias for convenience,
/// used for points so that they do not need to be heap-allocated.
pub type ShortVec<T> = SmallVec<[T; COORD_SIZE]>;
