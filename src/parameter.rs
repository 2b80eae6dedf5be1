//! Parameter - a named physical quantity
//!
//! A parameter is a numeric sample series plus a `Units` vector. Arithmetic
//! between parameters composes both at once: values element-wise, units
//! algebraically. Derived parameters get a synthesized name (`"a*b"`) and
//! carry their operands' names as provenance.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::units::Units;

/// A named physical quantity: sample values plus dimensions.
///
/// Equality compares values and units; the name is a label and takes no
/// part in it. Scalar arithmetic (`&p * 2.0`) scales values and leaves
/// units untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub values: Array1<f64>,
    pub units: Units,
    /// Display formula for derived parameters.
    pub formula: Option<String>,
    /// Names of the operands this parameter was derived from.
    pub parents: Option<Vec<String>>,
}

impl Parameter {
    /// A parameter from raw measurement data. Values are assumed already
    /// converted to consistent base units.
    pub fn new(name: impl Into<String>, values: impl Into<Array1<f64>>, units: Units) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
            units,
            formula: None,
            parents: None,
        }
    }

    /// A single-sample parameter, for known constants.
    pub fn constant(name: impl Into<String>, value: f64, units: Units) -> Self {
        Self::new(name, vec![value], units)
    }

    fn derived(name: String, values: Array1<f64>, units: Units, parents: Vec<String>) -> Self {
        Self {
            name: name.clone(),
            values,
            units,
            formula: Some(name),
            parents: Some(parents),
        }
    }

    /// Element-wise power: values and units are both raised.
    pub fn powf(&self, exponent: f64) -> Parameter {
        Parameter::derived(
            format!("{}^{{{}}}", self.name, fmt_number(exponent)),
            self.values.mapv(|v| v.powf(exponent)),
            self.units.power(exponent),
            vec![self.name.clone()],
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Units> for Parameter {
    /// Unit-only wrapper: no samples, no name. Used when a collection is
    /// built from raw `Units` values.
    fn from(units: Units) -> Self {
        Parameter::new("", Vec::<f64>::new(), units)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.units == other.units
    }
}

impl Add for &Parameter {
    type Output = Parameter;

    fn add(self, other: &Parameter) -> Parameter {
        Parameter::derived(
            format!("{}+{}", self.name, other.name),
            &self.values + &other.values,
            self.units,
            vec![self.name.clone(), other.name.clone()],
        )
    }
}

impl Sub for &Parameter {
    type Output = Parameter;

    fn sub(self, other: &Parameter) -> Parameter {
        Parameter::derived(
            format!("{}-{}", self.name, other.name),
            &self.values - &other.values,
            self.units,
            vec![self.name.clone(), other.name.clone()],
        )
    }
}

impl Mul for &Parameter {
    type Output = Parameter;

    fn mul(self, other: &Parameter) -> Parameter {
        Parameter::derived(
            format!("{}*{}", self.name, other.name),
            &self.values * &other.values,
            self.units.multiply(&other.units),
            vec![self.name.clone(), other.name.clone()],
        )
    }
}

impl Div for &Parameter {
    type Output = Parameter;

    fn div(self, other: &Parameter) -> Parameter {
        Parameter::derived(
            format!("{}/{}", self.name, other.name),
            &self.values / &other.values,
            self.units.divide(&other.units),
            vec![self.name.clone(), other.name.clone()],
        )
    }
}

impl Mul<f64> for &Parameter {
    type Output = Parameter;

    /// Scaling by a bare number leaves units and name unchanged.
    fn mul(self, scalar: f64) -> Parameter {
        Parameter {
            name: self.name.clone(),
            values: &self.values * scalar,
            units: self.units,
            formula: self.formula.clone(),
            parents: self.parents.clone(),
        }
    }
}

impl Div<f64> for &Parameter {
    type Output = Parameter;

    fn div(self, scalar: f64) -> Parameter {
        Parameter {
            name: self.name.clone(),
            values: &self.values / scalar,
            units: self.units,
            formula: self.formula.clone(),
            parents: self.parents.clone(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.name, self.values, self.units)
    }
}

/// Format a float without a trailing `.0` when it is integer-valued.
pub(crate) fn fmt_number(x: f64) -> String {
    if (x - x.round()).abs() <= f64::EPSILON && x.abs() < 1e15 {
        format!("{}", x.round() as i64)
    } else {
        format!("{}", x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_multiplication_composes_values_and_units() {
        let d = Parameter::new("d", vec![1.0, 2.0, 3.0], Units::LENGTH);
        let f = Parameter::new("f", vec![2.0, 2.0, 2.0], Units::FREQUENCY);
        let v = &d * &f;
        assert_eq!(v.values, array![2.0, 4.0, 6.0]);
        assert_eq!(v.units, Units::LENGTH.multiply(&Units::FREQUENCY));
        assert_eq!(v.units, Units::VELOCITY);
        assert_eq!(v.name, "d*f");
        assert_eq!(v.parents, Some(vec!["d".to_string(), "f".to_string()]));
    }

    #[test]
    fn test_division_composes_units() {
        let d = Parameter::new("d", vec![4.0, 6.0], Units::LENGTH);
        let t = Parameter::new("t", vec![2.0, 3.0], Units::TIME);
        let v = &d / &t;
        assert_eq!(v.values, array![2.0, 2.0]);
        assert_eq!(v.units, Units::VELOCITY);
        assert_eq!(v.name, "d/t");
    }

    #[test]
    fn test_scalar_ops_leave_units_and_name() {
        let d = Parameter::new("d", vec![1.0, 2.0], Units::LENGTH);
        let scaled = &d * 3.0;
        assert_eq!(scaled.values, array![3.0, 6.0]);
        assert_eq!(scaled.units, Units::LENGTH);
        assert_eq!(scaled.name, "d");
        let halved = &d / 2.0;
        assert_eq!(halved.values, array![0.5, 1.0]);
        assert_eq!(halved.units, Units::LENGTH);
    }

    #[test]
    fn test_power_raises_values_and_units() {
        let d = Parameter::new("d", vec![2.0, 3.0], Units::LENGTH);
        let a = d.powf(2.0);
        assert_eq!(a.values, array![4.0, 9.0]);
        assert_eq!(a.units, Units::AREA);
        assert_eq!(a.name, "d^{2}");
    }

    #[test]
    fn test_equality_ignores_name() {
        let a = Parameter::new("a", vec![1.0, 2.0], Units::LENGTH);
        let b = Parameter::new("b", vec![1.0, 2.0], Units::LENGTH);
        let c = Parameter::new("a", vec![1.0, 2.0], Units::TIME);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unit_only_wrapper() {
        let p: Parameter = Units::DENSITY.into();
        assert!(p.is_empty());
        assert_eq!(p.units, Units::DENSITY);
    }
}
