//! Units - physical dimension vectors
//!
//! A `Units` value is an exponent vector over a fixed basis of base
//! dimensions (length, mass, time, temperature). Unit algebra is plain
//! vector arithmetic: multiplication adds exponents, division subtracts
//! them, raising to a power scales them. Values are assumed pre-converted
//! to consistent base units, so no scale factors are tracked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for comparing floating-point exponents. Exponents coming out
/// of the linear solve carry float fuzz, so equality is tolerant rather
/// than bitwise.
pub(crate) const EPSILON: f64 = 1e-9;

/// Number of base dimensions in the fixed basis.
pub const DIMENSION_COUNT: usize = 4;

/// The fixed basis of base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Temperature,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; DIMENSION_COUNT] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Temperature,
    ];

    /// Conventional one-letter symbol used in rendered dimension strings.
    pub fn symbol(&self) -> &'static str {
        match self {
            BaseDimension::Length => "L",
            BaseDimension::Mass => "M",
            BaseDimension::Time => "T",
            BaseDimension::Temperature => "Θ",
        }
    }
}

/// Exponent vector over the base-dimension basis.
///
/// Immutable after construction: every algebraic operation returns a new
/// `Units`. Exponents are `f64` because fractional powers are legal
/// (e.g. the square root of an area is a length).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Units {
    exponents: [f64; DIMENSION_COUNT],
}

impl Units {
    pub const NONDIMENSIONAL: Units = Units::new([0.0, 0.0, 0.0, 0.0]);

    // Base quantities
    pub const LENGTH: Units = Units::new([1.0, 0.0, 0.0, 0.0]);
    pub const MASS: Units = Units::new([0.0, 1.0, 0.0, 0.0]);
    pub const TIME: Units = Units::new([0.0, 0.0, 1.0, 0.0]);
    pub const TEMPERATURE: Units = Units::new([0.0, 0.0, 0.0, 1.0]);

    // Derived quantities
    pub const AREA: Units = Units::new([2.0, 0.0, 0.0, 0.0]);
    pub const VOLUME: Units = Units::new([3.0, 0.0, 0.0, 0.0]);
    pub const FREQUENCY: Units = Units::new([0.0, 0.0, -1.0, 0.0]);
    pub const VELOCITY: Units = Units::new([1.0, 0.0, -1.0, 0.0]);
    pub const ACCELERATION: Units = Units::new([1.0, 0.0, -2.0, 0.0]);
    pub const FORCE: Units = Units::new([1.0, 1.0, -2.0, 0.0]);
    pub const PRESSURE: Units = Units::new([-1.0, 1.0, -2.0, 0.0]);
    pub const ENERGY: Units = Units::new([2.0, 1.0, -2.0, 0.0]);
    pub const DENSITY: Units = Units::new([-3.0, 1.0, 0.0, 0.0]);
    pub const SURFACE_TENSION: Units = Units::new([0.0, 1.0, -2.0, 0.0]);
    pub const VISCOSITY_DYNAMIC: Units = Units::new([-1.0, 1.0, -1.0, 0.0]);
    pub const VISCOSITY_KINEMATIC: Units = Units::new([2.0, 0.0, -1.0, 0.0]);

    /// Build units directly from an exponent vector, ordered as
    /// `BaseDimension::ALL` (length, mass, time, temperature).
    pub const fn new(exponents: [f64; DIMENSION_COUNT]) -> Self {
        Self { exponents }
    }

    /// Exponent of a single base dimension.
    pub fn exponent(&self, dimension: BaseDimension) -> f64 {
        self.exponents[dimension as usize]
    }

    /// The raw exponent vector.
    pub fn exponents(&self) -> &[f64; DIMENSION_COUNT] {
        &self.exponents
    }

    /// Product of two units: exponent vectors add.
    pub fn multiply(&self, other: &Units) -> Units {
        let mut exponents = self.exponents;
        for (e, o) in exponents.iter_mut().zip(other.exponents.iter()) {
            *e += o;
        }
        Units { exponents }
    }

    /// Quotient of two units: exponent vectors subtract.
    pub fn divide(&self, other: &Units) -> Units {
        let mut exponents = self.exponents;
        for (e, o) in exponents.iter_mut().zip(other.exponents.iter()) {
            *e -= o;
        }
        Units { exponents }
    }

    /// Raise units to a (possibly fractional) power: exponents scale.
    pub fn power(&self, exponent: f64) -> Units {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e *= exponent;
        }
        Units { exponents }
    }

    /// Exponent-vector equality, within `EPSILON` per component.
    pub fn equals(&self, other: &Units) -> bool {
        self == other
    }

    /// True when every exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|e| e.abs() <= EPSILON)
    }

    /// Base dimensions with a nonzero exponent.
    pub fn active_dimensions(&self) -> Vec<BaseDimension> {
        BaseDimension::ALL
            .into_iter()
            .filter(|d| self.exponent(*d).abs() > EPSILON)
            .collect()
    }
}

impl PartialEq for Units {
    fn eq(&self, other: &Self) -> bool {
        self.exponents
            .iter()
            .zip(other.exponents.iter())
            .all(|(a, b)| (a - b).abs() <= EPSILON)
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let mut parts = Vec::new();
        for dimension in BaseDimension::ALL {
            let e = self.exponent(dimension);
            if e.abs() <= EPSILON {
                continue;
            }
            if (e - 1.0).abs() <= EPSILON {
                parts.push(dimension.symbol().to_string());
            } else if (e - e.round()).abs() <= EPSILON {
                parts.push(format!("{}^{}", dimension.symbol(), e.round() as i64));
            } else {
                parts.push(format!("{}^{}", dimension.symbol(), e));
            }
        }
        write!(f, "{}", parts.join(" "))
    }
}
