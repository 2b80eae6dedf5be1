//! Dimensional matrix - unit exponent vectors stacked into a matrix
//!
//! Columns are the exponent vectors of an ordered parameter list, one row
//! per base dimension. The matrix is purely structural; the Pi-group solver
//! consumes it.

use nalgebra::DMatrix;

use crate::units::{BaseDimension, Units, DIMENSION_COUNT};

const ROW_EPSILON: f64 = 1e-9;

/// Exponent matrix of an ordered sequence of units.
#[derive(Debug, Clone)]
pub struct DimensionalMatrix {
    matrix: DMatrix<f64>,
}

impl DimensionalMatrix {
    /// Stack the exponent vectors of `units` as columns, one row per base
    /// dimension in `BaseDimension::ALL` order.
    pub fn new(units: &[Units]) -> Self {
        let matrix = DMatrix::from_fn(DIMENSION_COUNT, units.len(), |row, col| {
            units[col].exponent(BaseDimension::ALL[row])
        });
        Self { matrix }
    }

    /// The full matrix, including all-zero rows.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The matrix with all-zero rows removed: only the base dimensions that
    /// actually occur in some column. This is the system the solver inverts.
    pub fn reduced(&self) -> DMatrix<f64> {
        let rows: Vec<usize> = (0..self.matrix.nrows())
            .filter(|&r| self.matrix.row(r).iter().any(|e| e.abs() > ROW_EPSILON))
            .collect();
        DMatrix::from_fn(rows.len(), self.matrix.ncols(), |r, c| {
            self.matrix[(rows[r], c)]
        })
    }

    /// Numerical rank of the exponent matrix.
    pub fn rank(&self) -> usize {
        self.matrix.rank(ROW_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_exponent_vectors() {
        let m = DimensionalMatrix::new(&[Units::VELOCITY, Units::LENGTH, Units::TIME]);
        assert_eq!(m.matrix().shape(), (DIMENSION_COUNT, 3));
        // velocity column: L^1 T^-1
        assert_eq!(m.matrix()[(0, 0)], 1.0);
        assert_eq!(m.matrix()[(2, 0)], -1.0);
        // time column
        assert_eq!(m.matrix()[(2, 2)], 1.0);
    }

    #[test]
    fn test_reduced_drops_unused_dimensions() {
        let m = DimensionalMatrix::new(&[Units::VELOCITY, Units::LENGTH, Units::TIME]);
        // Mass and temperature never appear, so only two rows survive.
        let reduced = m.reduced();
        assert_eq!(reduced.shape(), (2, 3));
        assert_eq!(m.rank(), 2);
    }

    #[test]
    fn test_rank_detects_dependence() {
        // Length and area are dimensionally dependent columns.
        let m = DimensionalMatrix::new(&[Units::LENGTH, Units::AREA]);
        assert_eq!(m.rank(), 1);
    }
}
