//! Error types for dimensional analysis
//!
//! Every failure here is deterministic: the same inputs always fail the same
//! way, so callers should treat these as configuration errors, not retries.

use thiserror::Error;

/// Errors raised while solving for dimensionless groups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionalError {
    /// The repeating variables do not span the dimensional space; the
    /// coefficient matrix of the exponent solve has no inverse.
    #[error("singular dimensional matrix: repeating variables {names:?} are not dimensionally independent")]
    SingularMatrix { names: Vec<String> },

    /// The exponent solve is not square: the number of base dimensions in
    /// play does not match the number of repeating variables.
    #[error("non-square dimensional system: {rows} base dimension(s) but {cols} repeating variable(s)")]
    NonSquareSystem { rows: usize, cols: usize },

    /// A Pi group needs at least a target parameter.
    #[error("cannot build a Pi group from an empty parameter list")]
    EmptyParameterList,
}

pub type Result<T> = std::result::Result<T, DimensionalError>;
