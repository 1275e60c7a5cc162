//! Time-weighted statistical primitives.
//!
//! Frames of a kinetic Monte Carlo trajectory are not equally weighted
//! samples: the system stayed in each recorded state for its dwell time, so
//! every estimate below weights frame `t` by `dwell[t]` and normalizes by the
//! trajectory's total sample time. The three primitives here (mean, variance,
//! variance of the mean) are the only statistics the observable layer builds
//! on.

use crate::lattice::Lattice;

/// Borrowed dwell-time weights plus the normalization they sum against.
///
/// Callers must pass per-frame series whose length equals the weight count;
/// the estimators assume validated trajectories and do not re-check.
#[derive(Debug, Clone, Copy)]
pub struct TimeWeights<'a> {
    dwell: &'a [f64],
    total: f64,
}

impl<'a> TimeWeights<'a> {
    /// Wraps a dwell-time sequence and its normalization constant.
    pub fn new(dwell: &'a [f64], total: f64) -> Self {
        Self { dwell, total }
    }

    /// Number of frames the weights cover.
    pub fn frame_count(&self) -> usize {
        self.dwell.len()
    }

    /// Normalization constant (`totalSampleTime`).
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Time-weighted mean of a per-frame series:
    /// `sum(series[t] * dwell[t]) / total`.
    pub fn mean(&self, series: &[f64]) -> f64 {
        debug_assert_eq!(series.len(), self.dwell.len());
        let weighted: f64 = series
            .iter()
            .zip(self.dwell)
            .map(|(value, dwell)| value * dwell)
            .sum();
        weighted / self.total
    }

    /// Time-weighted variance: the weighted mean of the squared deviation
    /// from the weighted mean.
    pub fn variance(&self, series: &[f64]) -> f64 {
        let mean = self.mean(series);
        let weighted: f64 = series
            .iter()
            .zip(self.dwell)
            .map(|(value, dwell)| (value - mean).powi(2) * dwell)
            .sum();
        weighted / self.total
    }

    /// Variance of the time-weighted mean itself:
    /// `sum(((series[t] - mean) * dwell[t])^2) / total^2`.
    ///
    /// Deliberately not divided by the frame count. Dwell times already carry
    /// the weighting, and frames are not independent samples, so the ordinary
    /// standard-error-of-mean reduction does not apply.
    pub fn variance_of_mean(&self, series: &[f64]) -> f64 {
        let mean = self.mean(series);
        let weighted: f64 = series
            .iter()
            .zip(self.dwell)
            .map(|(value, dwell)| ((value - mean) * dwell).powi(2))
            .sum();
        weighted / (self.total * self.total)
    }

    /// Site-wise time-weighted mean over a snapshot sequence, returned as a
    /// flattened row-major field.
    pub fn site_means(&self, states: &[Lattice]) -> Vec<f64> {
        debug_assert_eq!(states.len(), self.dwell.len());
        let sites = states[0].site_count();
        let mut means = vec![0.0; sites];
        for (state, dwell) in states.iter().zip(self.dwell) {
            for (acc, spin) in means.iter_mut().zip(state.spins()) {
                *acc += *spin as f64 * dwell;
            }
        }
        for acc in &mut means {
            *acc /= self.total;
        }
        means
    }
}
