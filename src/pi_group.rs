//! Pi groups - dimensionless combinations via the Buckingham Pi theorem
//!
//! A `PiGroup` takes an ordered list `[target, repeat_1, .., repeat_k]`
//! and solves the square linear system that cancels every base dimension,
//! yielding one exponent per repeating variable. A `PiGroupSet` produces
//! one group per non-repeating parameter of a collection.

use ndarray::Array1;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::collection::ParameterList;
use crate::error::{DimensionalError, Result};
use crate::matrix::DimensionalMatrix;
use crate::parameter::{fmt_number, Parameter};
use crate::units::Units;

const EXPONENT_EPSILON: f64 = 1e-9;

/// A dimensionless group: one target parameter combined with repeating
/// variables raised to solved exponents.
///
/// Immutable once constructed. Two groups are equal when their formulas
/// match in either orientation, since a group and its reciprocal describe
/// the same physical grouping.
#[derive(Debug, Clone, Serialize)]
pub struct PiGroup {
    parameters: ParameterList,
    exponents: Vec<f64>,
    values: Array1<f64>,
    formula: String,
    formula_inverse: String,
}

impl PiGroup {
    /// Solve for the dimensionless combination of `parameters[0]` with the
    /// repeating variables `parameters[1..]`.
    ///
    /// The repeating variables must be dimensionally independent and as
    /// numerous as the base dimensions in play; otherwise the solve fails
    /// with an explicit error rather than returning a spurious group.
    pub fn new(parameters: ParameterList) -> Result<Self> {
        if parameters.is_empty() {
            return Err(DimensionalError::EmptyParameterList);
        }
        let exponents = solve_exponents(&parameters)?;
        debug!(name = %parameters[0].name, ?exponents, "solved pi-group exponents");
        let values = calculate_values(&parameters, &exponents);
        let (formula, formula_inverse) = render_formulas(&parameters, &exponents);
        Ok(Self {
            parameters,
            exponents,
            values,
            formula,
            formula_inverse,
        })
    }

    /// All member parameters, target first.
    pub fn parameters(&self) -> &ParameterList {
        &self.parameters
    }

    /// The repeating variables (everything after the target).
    pub fn repeating_variables(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().skip(1)
    }

    /// One solved exponent per repeating variable.
    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    /// The dimensionless value series, suitable for plotting.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn formula_inverse(&self) -> &str {
        &self.formula_inverse
    }

    /// Composed units of the group. Dimensionless by construction; exposed
    /// so callers (and tests) can verify the cancellation.
    pub fn units(&self) -> Units {
        let mut units = self.parameters[0].units;
        for (parameter, exponent) in self.parameters.iter().skip(1).zip(&self.exponents) {
            units = units.multiply(&parameter.units.power(*exponent));
        }
        units
    }

    /// Whether the named parameter appears in this group with a nonzero
    /// exponent. The target always counts: its exponent is one.
    pub fn contains(&self, name: &str) -> bool {
        if self.parameters[0].name == name {
            return true;
        }
        self.parameters
            .iter()
            .skip(1)
            .zip(&self.exponents)
            .any(|(p, e)| p.name == name && e.abs() > EXPONENT_EPSILON)
    }
}

impl PartialEq for PiGroup {
    fn eq(&self, other: &Self) -> bool {
        self.formula == other.formula || self.formula == other.formula_inverse
    }
}

impl fmt::Display for PiGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parameters[0].name)?;
        for (parameter, exponent) in self.parameters.iter().skip(1).zip(&self.exponents) {
            write!(f, "*{}^{}", parameter.name, fmt_number(*exponent))?;
        }
        Ok(())
    }
}

/// Solve `A x = B` where `A` holds the repeating-variable columns of the
/// reduced dimensional matrix and `B` the target column; the group's
/// exponents are `-x`.
fn solve_exponents(parameters: &ParameterList) -> Result<Vec<f64>> {
    let repeating = parameters.len() - 1;
    let matrix = DimensionalMatrix::new(parameters.units());
    let reduced = matrix.reduced();

    if reduced.nrows() != repeating {
        return Err(DimensionalError::NonSquareSystem {
            rows: reduced.nrows(),
            cols: repeating,
        });
    }
    if repeating == 0 {
        // Dimensionless target, nothing to cancel.
        return Ok(Vec::new());
    }

    let a = reduced.columns(1, repeating).into_owned();
    let b = reduced.column(0).into_owned();
    match a.lu().solve(&b) {
        Some(x) => Ok(x.iter().map(|e| -e).collect()),
        None => {
            let names: Vec<String> = parameters
                .iter()
                .skip(1)
                .map(|p| p.name.clone())
                .collect();
            warn!(?names, "repeating variables are not dimensionally independent");
            Err(DimensionalError::SingularMatrix { names })
        }
    }
}

/// `target.values * prod(repeat_i.values ^ exponents[i])`, element-wise.
fn calculate_values(parameters: &ParameterList, exponents: &[f64]) -> Array1<f64> {
    let mut values = parameters[0].values.clone();
    for (parameter, exponent) in parameters.iter().skip(1).zip(exponents) {
        values = values * parameter.values.mapv(|v| v.powf(*exponent));
    }
    values
}

/// Render the display formula and its inverse. Positive exponents go to the
/// numerator, negative ones (sign-flipped) to the denominator, zero
/// exponents are omitted, and the target is always in the numerator.
fn render_formulas(parameters: &ParameterList, exponents: &[f64]) -> (String, String) {
    let mut numerator = format!("({})", parameters[0].name);
    let mut denominator = String::new();
    for (parameter, &exponent) in parameters.iter().skip(1).zip(exponents) {
        if exponent > EXPONENT_EPSILON {
            numerator.push_str(&render_factor(&parameter.name, exponent));
        } else if exponent < -EXPONENT_EPSILON {
            denominator.push_str(&render_factor(&parameter.name, -exponent));
        }
    }

    let formula = if denominator.is_empty() {
        numerator.clone()
    } else {
        format!("$\\frac{{{numerator}}}{{{denominator}}}$")
    };
    let inverse_numerator = if denominator.is_empty() {
        "1".to_string()
    } else {
        denominator
    };
    let formula_inverse = format!("$\\frac{{{inverse_numerator}}}{{{numerator}}}$");
    (formula, formula_inverse)
}

fn render_factor(name: &str, exponent: f64) -> String {
    if (exponent - 1.0).abs() <= EXPONENT_EPSILON {
        format!("({})", name)
    } else {
        format!("({})^{{{}}}", name, fmt_number(exponent))
    }
}

/// One Pi group per non-repeating parameter of a collection, all sharing
/// the same repeating variables.
#[derive(Debug, Clone, Serialize)]
pub struct PiGroupSet {
    pi_groups: Vec<PiGroup>,
    parameters: ParameterList,
    repeating_variables: ParameterList,
}

impl PiGroupSet {
    /// Build one group for every member of `parameters - repeating`, in the
    /// collection's order of appearance. The repeating set must span the
    /// collection's independent dimensions; a bad choice surfaces as a
    /// solve error on the first affected group.
    pub fn new(parameters: ParameterList, repeating_variables: ParameterList) -> Result<Self> {
        let non_repeating = &parameters - &repeating_variables;
        let mut pi_groups = Vec::with_capacity(non_repeating.len());
        for target in &non_repeating {
            let members = &ParameterList::new([target.clone()]) + &repeating_variables;
            pi_groups.push(PiGroup::new(members)?);
        }
        Ok(Self {
            pi_groups,
            parameters,
            repeating_variables,
        })
    }

    pub fn pi_groups(&self) -> &[PiGroup] {
        &self.pi_groups
    }

    pub fn parameters(&self) -> &ParameterList {
        &self.parameters
    }

    pub fn repeating_variables(&self) -> &ParameterList {
        &self.repeating_variables
    }

    pub fn len(&self) -> usize {
        self.pi_groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pi_groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PiGroup> {
        self.pi_groups.iter()
    }
}

impl std::ops::Index<usize> for PiGroupSet {
    type Output = PiGroup;

    fn index(&self, index: usize) -> &PiGroup {
        &self.pi_groups[index]
    }
}

impl<'a> IntoIterator for &'a PiGroupSet {
    type Item = &'a PiGroup;
    type IntoIter = std::slice::Iter<'a, PiGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.pi_groups.iter()
    }
}

impl fmt::Display for PiGroupSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formulas: Vec<&str> = self.pi_groups.iter().map(|g| g.formula()).collect();
        write!(f, "[{}]", formulas.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parameter_list_is_rejected() {
        let err = PiGroup::new(ParameterList::new(Vec::<Parameter>::new())).unwrap_err();
        assert_eq!(err, DimensionalError::EmptyParameterList);
    }

    #[test]
    fn test_dimensionless_target_needs_no_repeaters() {
        let ratio = Parameter::new("r", vec![0.5, 0.7], Units::NONDIMENSIONAL);
        let group = PiGroup::new(ParameterList::new([ratio.clone()])).unwrap();
        assert!(group.exponents().is_empty());
        assert_eq!(group.values(), &ratio.values);
        assert_eq!(group.formula(), "(r)");
        assert_eq!(group.formula_inverse(), "$\\frac{1}{(r)}$");
    }

    #[test]
    fn test_dimensional_target_without_repeaters_fails() {
        let v = Parameter::new("v", vec![1.0], Units::VELOCITY);
        let err = PiGroup::new(ParameterList::new([v])).unwrap_err();
        assert_eq!(err, DimensionalError::NonSquareSystem { rows: 2, cols: 0 });
    }

    #[test]
    fn test_dependent_repeating_set_is_singular() {
        let v = Parameter::new("v", vec![1.0], Units::VELOCITY);
        let d = Parameter::new("d", vec![1.0], Units::LENGTH);
        let a = Parameter::new("a", vec![1.0], Units::AREA);
        let err = PiGroup::new(ParameterList::new([v, d, a])).unwrap_err();
        assert_eq!(
            err,
            DimensionalError::SingularMatrix {
                names: vec!["d".to_string(), "a".to_string()]
            }
        );
    }
}
