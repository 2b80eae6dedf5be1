//! Buckingham Pi dimensional analysis
//!
//! Given physical parameters (name, sample series, units as exponents over
//! a fixed base-dimension set), this crate:
//! - discovers the independent dimensions of a parameter collection,
//! - solves for the exponents that make a target parameter dimensionless
//!   against a caller-chosen set of repeating variables,
//! - produces each Pi group's numeric series and display formula.
//!
//! Values are assumed pre-converted to consistent base units; there is no
//! unit-conversion layer and no UI. Presentation code consumes the `values`
//! and `formula` surface of [`PiGroup`].

pub mod collection;
pub mod error;
pub mod matrix;
pub mod parameter;
pub mod pi_group;
pub mod units;

// Re-exports for convenience
pub use collection::ParameterList;
pub use error::{DimensionalError, Result};
pub use matrix::DimensionalMatrix;
pub use parameter::Parameter;
pub use pi_group::{PiGroup, PiGroupSet};
pub use units::{BaseDimension, Units};
