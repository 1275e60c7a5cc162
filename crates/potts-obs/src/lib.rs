#![deny(missing_docs)]
#![doc = "Physical observables over decoded Potts trajectories: time-weighted energy, heat capacity and magnetization estimates, connected spatial correlation with its symmetrized profile, per-result caching, and persistable analysis reports."]

/// Spatial correlation grids and profiles.
pub mod correlation;
/// Canonical hashing and JSON helpers.
pub mod hash;
/// Scalar observables and the per-result cache.
pub mod observables;
/// Analysis report assembly and persistence.
pub mod report;
/// Loaded run results with cached observables.
pub mod result;

pub use correlation::{lambda_profile, spatial_correlation, CorrelationGrid, Cutoff, LambdaProfile};
pub use observables::{average_energy, heat_capacity, magnetization, Estimate, ObservableCache, BOLTZMANN};
pub use report::{AnalysisReport, ObservableSet, TrajectorySummary};
pub use result::RunResult;
