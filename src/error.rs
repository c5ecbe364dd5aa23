use thiserror::Error;

use crate::OperationKind;

/// Errors raised while building, composing or applying transforms.
///
/// These all indicate a malformed call rather than a transient condition;
/// non-finite numbers are never reported here and simply propagate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A point, matrix or transform has the wrong number of dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Only 1, 2 and 3 dimensional transforms are supported.
    #[error("unsupported number of dimensions: {0}")]
    UnsupportedDimensions(usize),

    #[error("unknown operation kind {0:?}")]
    UnknownOperationKind(String),

    #[error("unknown angle unit {0:?}")]
    UnknownAngleUnit(String),

    #[error("{kind} operation is missing required parameter {param:?}")]
    MissingParameter {
        kind: OperationKind,
        param: &'static str,
    },

    /// A parameter was given which the operation cannot use,
    /// e.g. a `z` offset for a 2D translation.
    #[error("{kind} operation does not use parameter {param:?}")]
    UnusedParameter { kind: OperationKind, param: String },

    /// Both reference points of a linear map share an input coordinate.
    #[error("linear map is degenerate: both input coordinates are {x_in}")]
    DegenerateLinearMap { x_in: f64 },

    #[error("cannot build a transform from an empty sequence of operations")]
    EmptySequence,

    #[error("malformed matrix: {0}")]
    MalformedMatrix(String),

    #[error("malformed transform: {0}")]
    MalformedTransform(String),
}

pub type Result<T> = std::result::Result<T, TransformError>;
