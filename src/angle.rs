use std::{fmt, str::FromStr};

use crate::TransformError;

/// Unit in which an [Angle]'s value is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleUnit::Degrees => write!(f, "degrees"),
            AngleUnit::Radians => write!(f, "radians"),
        }
    }
}

impl FromStr for AngleUnit {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degrees" | "deg" => Ok(AngleUnit::Degrees),
            "radians" | "rad" => Ok(AngleUnit::Radians),
            other => Err(TransformError::UnknownAngleUnit(other.to_string())),
        }
    }
}

/// An angle tagged with the unit it was given in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    value: f64,
    unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Self { value, unit }
    }

    pub fn degrees(value: f64) -> Self {
        Self::new(value, AngleUnit::Degrees)
    }

    pub fn radians(value: f64) -> Self {
        Self::new(value, AngleUnit::Radians)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// The angle in radians, whatever unit it was given in.
    pub fn to_radians(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.value.to_radians(),
            AngleUnit::Radians => self.value,
        }
    }
}
