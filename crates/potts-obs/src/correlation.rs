//! Connected spatial correlation on the periodic lattice.
//!
//! `C(i, j)` correlates every site with its torus-shifted neighbour at offset
//! `(i, j)`, subtracts the product of the site-wise time means (the connected
//! part), spatially averages, and feeds the resulting per-frame series
//! through the time-weighted estimators. Offsets wrap modulo the lattice
//! dimensions, so cutoffs larger than the lattice are well defined.
//!
//! Every `(i, j)` pair is an independent reduction; the grid evaluates pairs
//! in parallel without changing any per-pair arithmetic.

use potts_traj::Trajectory;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::observables::Estimate;

/// Bound on the correlation offsets to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cutoff {
    /// Same bound applied to both lattice axes.
    Uniform(usize),
    /// Separate bounds for the row and column axes.
    PerAxis(usize, usize),
}

impl Cutoff {
    /// Resolves an optional cutoff to concrete `(Nmax, Mmax)` bounds; absent
    /// cutoffs default to half the lattice extent per axis.
    pub fn grid_bounds(cutoff: Option<Cutoff>, rows: usize, cols: usize) -> (usize, usize) {
        match cutoff {
            None => (rows / 2, cols / 2),
            Some(Cutoff::Uniform(k)) => (k, k),
            Some(Cutoff::PerAxis(i, j)) => (i, j),
        }
    }

    /// Resolves an optional scalar cutoff to the symmetrized-profile bound;
    /// absent cutoffs default to half the shorter lattice extent.
    pub fn profile_bound(cutoff: Option<usize>, rows: usize, cols: usize) -> usize {
        cutoff.unwrap_or_else(|| (rows / 2).min(cols / 2))
    }
}

/// Connected correlation estimates over a grid of offsets, stored row-major
/// as `nmax x mmax`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationGrid {
    /// Number of row offsets evaluated.
    pub nmax: usize,
    /// Number of column offsets evaluated.
    pub mmax: usize,
    /// `C(i, j)` values.
    pub values: Vec<f64>,
    /// Standard errors of the values.
    pub errors: Vec<f64>,
}

impl CorrelationGrid {
    /// Offset bounds this grid was evaluated for.
    pub fn bounds(&self) -> (usize, usize) {
        (self.nmax, self.mmax)
    }

    /// `C(i, j)`.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.mmax + j]
    }

    /// Standard error of `C(i, j)`.
    pub fn error(&self, i: usize, j: usize) -> f64 {
        self.errors[i * self.mmax + j]
    }
}

/// Direction-averaged correlation profile exploiting the lattice's four-fold
/// symmetry: `Lambda[k] = (C(k, 0) + C(0, k)) / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaProfile {
    /// Number of separations evaluated.
    pub cutoff: usize,
    /// `Lambda[k]` values.
    pub values: Vec<f64>,
    /// Combined standard errors.
    pub errors: Vec<f64>,
}

/// Evaluates the connected correlation grid up to `cutoff`.
pub fn spatial_correlation(trajectory: &Trajectory, cutoff: Option<Cutoff>) -> CorrelationGrid {
    let (nmax, mmax) = Cutoff::grid_bounds(cutoff, trajectory.rows(), trajectory.cols());
    let site_means = trajectory.weights().site_means(trajectory.states());

    let estimates: Vec<Estimate> = (0..nmax * mmax)
        .into_par_iter()
        .map(|index| correlation_pair(trajectory, &site_means, index / mmax, index % mmax))
        .collect();

    CorrelationGrid {
        nmax,
        mmax,
        values: estimates.iter().map(|e| e.value).collect(),
        errors: estimates.iter().map(|e| e.error).collect(),
    }
}

/// Evaluates the symmetrized correlation profile up to `cutoff` separations.
///
/// Only the `(k, 0)` and `(0, k)` offsets are computed; the mirrored offsets
/// are equal by the periodicity of the shift and need no extra evaluation.
/// The bound is always derived the same way whether the cutoff was given
/// explicitly or defaulted.
pub fn lambda_profile(trajectory: &Trajectory, cutoff: Option<usize>) -> LambdaProfile {
    let bound = Cutoff::profile_bound(cutoff, trajectory.rows(), trajectory.cols());
    let site_means = trajectory.weights().site_means(trajectory.states());

    let vertical: Vec<Estimate> = (0..bound)
        .into_par_iter()
        .map(|k| correlation_pair(trajectory, &site_means, k, 0))
        .collect();
    let horizontal: Vec<Estimate> = (0..bound)
        .into_par_iter()
        .map(|k| correlation_pair(trajectory, &site_means, 0, k))
        .collect();

    let values = vertical
        .iter()
        .zip(&horizontal)
        .map(|(v, h)| (v.value + h.value) / 2.0)
        .collect();
    let errors = vertical
        .iter()
        .zip(&horizontal)
        .map(|(v, h)| ((v.error * v.error + h.error * h.error) / 2.0).sqrt())
        .collect();
    LambdaProfile {
        cutoff: bound,
        values,
        errors,
    }
}

fn correlation_pair(
    trajectory: &Trajectory,
    site_means: &[f64],
    i: usize,
    j: usize,
) -> Estimate {
    let rows = trajectory.rows();
    let cols = trajectory.cols();
    let sites = (rows * cols) as f64;

    // Time-independent connected term: spatial average of the product of the
    // mean field with its own torus shift.
    let mut mean_product = 0.0;
    for r in 0..rows {
        for c in 0..cols {
            let shifted = site_means[((r + i) % rows) * cols + (c + j) % cols];
            mean_product += site_means[r * cols + c] * shifted;
        }
    }
    mean_product /= sites;

    let series: Vec<f64> = trajectory
        .states()
        .iter()
        .map(|state| {
            let mut acc = 0i64;
            for r in 0..rows {
                for c in 0..cols {
                    acc += state.get(r, c) * state.get((r + i) % rows, (c + j) % cols);
                }
            }
            acc as f64 / sites - mean_product
        })
        .collect();

    let weights = trajectory.weights();
    Estimate {
        value: weights.mean(&series),
        error: (weights.variance_of_mean(&series) / sites).sqrt(),
    }
}
