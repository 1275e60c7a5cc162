use potts_core::RunParameters;
use potts_traj::Trajectory;
use serde::{Deserialize, Serialize};

use crate::correlation::{CorrelationGrid, LambdaProfile};

/// Boltzmann constant in simulation units.
pub const BOLTZMANN: f64 = 1.0;

/// A scalar observable estimate paired with its standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Time-weighted point estimate.
    pub value: f64,
    /// Standard error of the estimate.
    pub error: f64,
}

/// Per-observable cache slots owned by a result.
///
/// Scalar slots are either empty or hold the one canonical value; the
/// shape-dependent slots keep the bounds they were computed for so getters
/// can tell a hit from a stale entry.
#[derive(Debug, Clone, Default)]
pub struct ObservableCache {
    pub(crate) average_energy: Option<Estimate>,
    pub(crate) heat_capacity: Option<Estimate>,
    pub(crate) magnetization: Option<Estimate>,
    pub(crate) correlation: Option<CorrelationGrid>,
    pub(crate) lambda: Option<LambdaProfile>,
}

/// Time-weighted average energy with its standard error.
pub fn average_energy(trajectory: &Trajectory) -> Estimate {
    let weights = trajectory.weights();
    Estimate {
        value: weights.mean(trajectory.energies()),
        error: weights.variance_of_mean(trajectory.energies()).sqrt(),
    }
}

/// Heat capacity per site from energy fluctuations:
/// `variance(E) * kB / (N * M * T^2)`.
///
/// The error propagates the uncertainty of the squared-deviation series
/// through the same scale factor.
pub fn heat_capacity(trajectory: &Trajectory, params: &RunParameters) -> Estimate {
    let weights = trajectory.weights();
    let mean_energy = weights.mean(trajectory.energies());
    let squared_deviations: Vec<f64> = trajectory
        .energies()
        .iter()
        .map(|energy| (energy - mean_energy).powi(2))
        .collect();
    let factor = BOLTZMANN / (params.site_count() as f64 * params.temperature.powi(2));
    Estimate {
        value: weights.mean(&squared_deviations) * factor,
        error: weights.variance_of_mean(&squared_deviations).sqrt() * factor,
    }
}

/// Time-weighted mean of the per-frame spatial spin average.
///
/// Spatial averaging over the `N * M` sites reduces the sampling variance,
/// so the error divides the variance of the mean by the site count before
/// taking the square root.
pub fn magnetization(trajectory: &Trajectory) -> Estimate {
    let weights = trajectory.weights();
    let spatial_means: Vec<f64> = trajectory
        .states()
        .iter()
        .map(|state| state.site_mean())
        .collect();
    let sites = trajectory.states()[0].site_count() as f64;
    Estimate {
        value: weights.mean(&spatial_means),
        error: (weights.variance_of_mean(&spatial_means) / sites).sqrt(),
    }
}
