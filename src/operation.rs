//! Declarative descriptions of single transform operations.
//!
//! [Operation] is the typed form, where each kind carries only its own fields.
//! [OperationRecord] is the loose keyword-style form (a kind name plus named parameters)
//! which is validated when converted into an [Operation].
use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{
    Angle, AngleUnit, Result, ShearFactors, ShortVec, Transform, TransformError,
    derive_linear_map, rotate_x, rotate_xy, rotate_y, rotate_z, scale, shear,
    transform::check_ndim, translate,
};

const AXES: [&str; 3] = ["x", "y", "z"];

/// The kinds of operation, named in records as `snake_case` (or `kebab-case`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Translate,
    Scale,
    Shear,
    RotateX,
    RotateY,
    RotateZ,
    RotateXY,
    LinearMap,
}

impl OperationKind {
    pub const ALL: [OperationKind; 8] = [
        OperationKind::Translate,
        OperationKind::Scale,
        OperationKind::Shear,
        OperationKind::RotateX,
        OperationKind::RotateY,
        OperationKind::RotateZ,
        OperationKind::RotateXY,
        OperationKind::LinearMap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Translate => "translate",
            OperationKind::Scale => "scale",
            OperationKind::Shear => "shear",
            OperationKind::RotateX => "rotate_x",
            OperationKind::RotateY => "rotate_y",
            OperationKind::RotateZ => "rotate_z",
            OperationKind::RotateXY => "rotate_xy",
            OperationKind::LinearMap => "linear_map",
        }
    }

    /// Names of the numeric parameters this kind accepts in an [OperationRecord].
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            OperationKind::Translate | OperationKind::Scale => &AXES,
            OperationKind::Shear => &["xy", "xz", "yx", "yz", "zx", "zy"],
            OperationKind::RotateX
            | OperationKind::RotateY
            | OperationKind::RotateZ
            | OperationKind::RotateXY => &["angle"],
            OperationKind::LinearMap => &["x1_in", "x1_out", "x2_in", "x2_out"],
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = TransformError;

    /// Accepts `snake_case` and `kebab-case` names.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.replace('-', "_");
        OperationKind::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| TransformError::UnknownOperationKind(s.to_string()))
    }
}

/// A single transform operation.
///
/// Axis values left as `None` take the operation's neutral value:
/// 0 for translation, 1 for scaling.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Translate {
        ndim: usize,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    Scale {
        ndim: usize,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    Shear {
        ndim: usize,
        factors: ShearFactors,
    },
    /// 3D only.
    RotateX(Angle),
    /// 3D only.
    RotateY(Angle),
    /// 3D only.
    RotateZ(Angle),
    /// 2D only.
    RotateXY(Angle),
    /// 1D only; see [derive_linear_map].
    LinearMap {
        x1_in: f64,
        x1_out: f64,
        x2_in: f64,
        x2_out: f64,
    },
}

impl Operation {
    /// Translation with one offset per dimension.
    pub fn translation(offsets: &[f64]) -> Self {
        Operation::Translate {
            ndim: offsets.len(),
            x: offsets.first().copied(),
            y: offsets.get(1).copied(),
            z: offsets.get(2).copied(),
        }
    }

    /// Scaling with one factor per dimension.
    pub fn scaling(factors: &[f64]) -> Self {
        Operation::Scale {
            ndim: factors.len(),
            x: factors.first().copied(),
            y: factors.get(1).copied(),
            z: factors.get(2).copied(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Translate { .. } => OperationKind::Translate,
            Operation::Scale { .. } => OperationKind::Scale,
            Operation::Shear { .. } => OperationKind::Shear,
            Operation::RotateX(_) => OperationKind::RotateX,
            Operation::RotateY(_) => OperationKind::RotateY,
            Operation::RotateZ(_) => OperationKind::RotateZ,
            Operation::RotateXY(_) => OperationKind::RotateXY,
            Operation::LinearMap { .. } => OperationKind::LinearMap,
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            Operation::Translate { ndim, .. }
            | Operation::Scale { ndim, .. }
            | Operation::Shear { ndim, .. } => *ndim,
            Operation::RotateX(_) | Operation::RotateY(_) | Operation::RotateZ(_) => 3,
            Operation::RotateXY(_) => 2,
            Operation::LinearMap { .. } => 1,
        }
    }

    /// Build the transform for this operation alone.
    pub fn to_transform(&self) -> Result<Transform> {
        let kind = self.kind();
        match self {
            Operation::Translate { ndim, x, y, z } => {
                translate(&axis_values(kind, *ndim, [*x, *y, *z], 0.0)?)
            }
            Operation::Scale { ndim, x, y, z } => {
                scale(&axis_values(kind, *ndim, [*x, *y, *z], 1.0)?)
            }
            Operation::Shear { ndim, factors } => shear(*ndim, *factors),
            Operation::RotateX(angle) => Ok(rotate_x(*angle)),
            Operation::RotateY(angle) => Ok(rotate_y(*angle)),
            Operation::RotateZ(angle) => Ok(rotate_z(*angle)),
            Operation::RotateXY(angle) => Ok(rotate_xy(*angle)),
            Operation::LinearMap {
                x1_in,
                x1_out,
                x2_in,
                x2_out,
            } => derive_linear_map(*x1_in, *x1_out, *x2_in, *x2_out),
        }
    }
}

/// The first `ndim` axis values with defaults filled in.
///
/// Fails if a value is given for an axis beyond `ndim`.
fn axis_values(
    kind: OperationKind,
    ndim: usize,
    values: [Option<f64>; 3],
    default: f64,
) -> Result<ShortVec<f64>> {
    check_ndim(ndim)?;
    if let Some(idx) = (ndim..values.len()).find(|idx| values[*idx].is_some()) {
        return Err(TransformError::UnusedParameter {
            kind,
            param: AXES[idx].to_string(),
        });
    }
    Ok(values[..ndim].iter().map(|v| v.unwrap_or(default)).collect())
}

/// A loosely-typed operation description:
/// a kind name, an optional dimensionality, named numeric parameters and angle units.
///
/// Convert it into an [Operation] with [TryFrom],
/// which checks the kind, the required parameters,
/// and that every given parameter is used.
///
/// | kind | dimensions | parameters |
/// |------|------------|------------|
/// | `translate`, `scale` | required, 1-3 | `x`, `y`, `z` (optional) |
/// | `shear` | required, 2-3 | `xy`, `xz`, `yx`, `yz`, `zx`, `zy` (optional) |
/// | `rotate_x`, `rotate_y`, `rotate_z` | optional, must be 3 | `angle` and units (required) |
/// | `rotate_xy` | optional, must be 2 | `angle` and units (required) |
/// | `linear_map` | optional, must be 1 | `x1_in`, `x1_out`, `x2_in`, `x2_out` (required) |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationRecord {
    pub kind: String,
    pub dimensions: Option<usize>,
    pub params: BTreeMap<String, f64>,
    pub units: Option<AngleUnit>,
}

impl OperationRecord {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    pub fn with_units(mut self, units: AngleUnit) -> Self {
        self.units = Some(units);
        self
    }

    fn optional(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    fn required(&self, kind: OperationKind, name: &'static str) -> Result<f64> {
        self.optional(name)
            .ok_or(TransformError::MissingParameter { kind, param: name })
    }

    fn required_dimensions(&self, kind: OperationKind) -> Result<usize> {
        self.dimensions.ok_or(TransformError::MissingParameter {
            kind,
            param: "dimensions",
        })
    }

    /// Operations with a fixed dimensionality may omit it, but may not contradict it.
    fn fixed_dimensions(&self, ndim: usize) -> Result<()> {
        match self.dimensions {
            Some(d) if d != ndim => Err(TransformError::DimensionMismatch {
                expected: ndim,
                actual: d,
            }),
            _ => Ok(()),
        }
    }

    fn angle(&self, kind: OperationKind, ndim: usize) -> Result<Angle> {
        self.fixed_dimensions(ndim)?;
        let value = self.required(kind, "angle")?;
        let units = self.units.ok_or(TransformError::MissingParameter {
            kind,
            param: "units",
        })?;
        Ok(Angle::new(value, units))
    }
}

impl TryFrom<&OperationRecord> for Operation {
    type Error = TransformError;

    fn try_from(record: &OperationRecord) -> Result<Self> {
        let kind: OperationKind = record.kind.parse()?;

        if let Some(unused) = record
            .params
            .keys()
            .find(|name| !kind.params().iter().any(|p| *p == name.as_str()))
        {
            return Err(TransformError::UnusedParameter {
                kind,
                param: unused.clone(),
            });
        }

        let op = match kind {
            OperationKind::Translate => Operation::Translate {
                ndim: record.required_dimensions(kind)?,
                x: record.optional("x"),
                y: record.optional("y"),
                z: record.optional("z"),
            },
            OperationKind::Scale => Operation::Scale {
                ndim: record.required_dimensions(kind)?,
                x: record.optional("x"),
                y: record.optional("y"),
                z: record.optional("z"),
            },
            OperationKind::Shear => {
                let factor = |name: &str| record.optional(name).unwrap_or(0.0);
                Operation::Shear {
                    ndim: record.required_dimensions(kind)?,
                    factors: ShearFactors {
                        xy: factor("xy"),
                        xz: factor("xz"),
                        yx: factor("yx"),
                        yz: factor("yz"),
                        zx: factor("zx"),
                        zy: factor("zy"),
                    },
                }
            }
            OperationKind::RotateX => Operation::RotateX(record.angle(kind, 3)?),
            OperationKind::RotateY => Operation::RotateY(record.angle(kind, 3)?),
            OperationKind::RotateZ => Operation::RotateZ(record.angle(kind, 3)?),
            OperationKind::RotateXY => Operation::RotateXY(record.angle(kind, 2)?),
            OperationKind::LinearMap => {
                record.fixed_dimensions(1)?;
                Operation::LinearMap {
                    x1_in: record.required(kind, "x1_in")?,
                    x1_out: record.required(kind, "x1_out")?,
                    x2_in: record.required(kind, "x2_in")?,
                    x2_out: record.required(kind, "x2_out")?,
                }
            }
        };
        Ok(op)
    }
}

impl TryFrom<OperationRecord> for Operation {
    type Error = TransformError;

    fn try_from(record: OperationRecord) -> Result<Self> {
        Operation::try_from(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.name().parse::<OperationKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!(
            "rotate-xy".parse::<OperationKind>().unwrap(),
            OperationKind::RotateXY
        );
        assert_eq!(
            "skew".parse::<OperationKind>(),
            Err(TransformError::UnknownOperationKind("skew".into()))
        );
    }

    #[test]
    fn test_translate_defaults() {
        let op = Operation::Translate {
            ndim: 3,
            x: Some(1.0),
            y: None,
            z: Some(3.0),
        };
        let t = op.to_transform().unwrap();
        assert_eq!(t.translation().as_slice(), &[1.0, 0.0, 3.0]);
    }

    #[test]
    fn test_scale_defaults() {
        let op = Operation::Scale {
            ndim: 2,
            x: None,
            y: Some(4.0),
            z: None,
        };
        let t = op.to_transform().unwrap();
        assert_eq!(t.apply(&[3.0, 3.0]).unwrap().as_slice(), &[3.0, 12.0]);
    }

    #[test]
    fn test_axis_beyond_ndim() {
        let op = Operation::Translate {
            ndim: 2,
            x: None,
            y: None,
            z: Some(1.0),
        };
        assert_eq!(
            op.to_transform(),
            Err(TransformError::UnusedParameter {
                kind: OperationKind::Translate,
                param: "z".into()
            })
        );
    }

    #[test]
    fn test_ndim() {
        assert_eq!(Operation::translation(&[1.0, 2.0]).ndim(), 2);
        assert_eq!(Operation::RotateY(Angle::degrees(1.0)).ndim(), 3);
        assert_eq!(Operation::RotateXY(Angle::degrees(1.0)).ndim(), 2);
        assert_eq!(
            Operation::LinearMap {
                x1_in: 0.0,
                x1_out: 0.0,
                x2_in: 1.0,
                x2_out: 1.0
            }
            .ndim(),
            1
        );
    }

    #[test]
    fn test_record_translate() {
        let record = OperationRecord::new("translate")
            .with_dimensions(2)
            .with_param("x", 5.0);
        let op = Operation::try_from(&record).unwrap();
        assert_eq!(
            op,
            Operation::Translate {
                ndim: 2,
                x: Some(5.0),
                y: None,
                z: None
            }
        );
    }

    #[test]
    fn test_record_rotation() {
        let record = OperationRecord::new("rotate-z")
            .with_param("angle", 90.0)
            .with_units(AngleUnit::Degrees);
        assert_eq!(
            Operation::try_from(record).unwrap(),
            Operation::RotateZ(Angle::degrees(90.0))
        );
    }

    #[test]
    fn test_record_unknown_kind() {
        let record = OperationRecord::new("perspective").with_dimensions(3);
        assert_eq!(
            Operation::try_from(&record),
            Err(TransformError::UnknownOperationKind("perspective".into()))
        );
    }

    #[test]
    fn test_record_missing_parameters() {
        let no_dims = OperationRecord::new("scale").with_param("x", 2.0);
        assert_eq!(
            Operation::try_from(&no_dims),
            Err(TransformError::MissingParameter {
                kind: OperationKind::Scale,
                param: "dimensions"
            })
        );

        let no_angle = OperationRecord::new("rotate_x").with_units(AngleUnit::Radians);
        assert_eq!(
            Operation::try_from(&no_angle),
            Err(TransformError::MissingParameter {
                kind: OperationKind::RotateX,
                param: "angle"
            })
        );

        let no_units = OperationRecord::new("rotate_xy").with_param("angle", 1.0);
        assert_eq!(
            Operation::try_from(&no_units),
            Err(TransformError::MissingParameter {
                kind: OperationKind::RotateXY,
                param: "units"
            })
        );

        let partial_map = OperationRecord::new("linear_map")
            .with_param("x1_in", 0.0)
            .with_param("x1_out", 1.0)
            .with_param("x2_in", 2.0);
        assert_eq!(
            Operation::try_from(&partial_map),
            Err(TransformError::MissingParameter {
                kind: OperationKind::LinearMap,
                param: "x2_out"
            })
        );
    }

    #[test]
    fn test_record_unused_parameter() {
        let record = OperationRecord::new("translate")
            .with_dimensions(3)
            .with_param("w", 1.0);
        assert_eq!(
            Operation::try_from(&record),
            Err(TransformError::UnusedParameter {
                kind: OperationKind::Translate,
                param: "w".into()
            })
        );
    }

    #[test]
    fn test_record_contradicting_dimensions() {
        let record = OperationRecord::new("rotate_xy")
            .with_dimensions(3)
            .with_param("angle", 1.0)
            .with_units(AngleUnit::Radians);
        assert_eq!(
            Operation::try_from(&record),
            Err(TransformError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }
}
