use potts_core::{ErrorInfo, PottsError};
use serde::{Deserialize, Serialize};

/// One lattice snapshot: an `N x M` grid of integer spin labels stored in
/// row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    spins: Vec<i64>,
}

impl Lattice {
    /// Builds a lattice from a flattened row-major spin sequence.
    pub fn from_spins(rows: usize, cols: usize, spins: Vec<i64>) -> Result<Self, PottsError> {
        if spins.len() != rows * cols {
            return Err(PottsError::Shape(
                ErrorInfo::new("lattice-size", "flattened state length mismatch")
                    .with_context("expected", (rows * cols).to_string())
                    .with_context("actual", spins.len().to_string()),
            ));
        }
        Ok(Self { rows, cols, spins })
    }

    /// Builds a lattice with every site set to `value`.
    pub fn filled(rows: usize, cols: usize, value: i64) -> Self {
        Self {
            rows,
            cols,
            spins: vec![value; rows * cols],
        }
    }

    /// Number of lattice rows (`N`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of lattice columns (`M`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of sites (`N * M`).
    pub fn site_count(&self) -> usize {
        self.spins.len()
    }

    /// Spin at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.spins[row * self.cols + col]
    }

    /// Overwrites the spin at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.spins[row * self.cols + col] = value;
    }

    /// Flattened row-major view of the spins.
    pub fn spins(&self) -> &[i64] {
        &self.spins
    }

    /// Spatial mean of the spin labels over all sites.
    pub fn site_mean(&self) -> f64 {
        let sum: i64 = self.spins.iter().sum();
        sum as f64 / self.spins.len() as f64
    }
}
