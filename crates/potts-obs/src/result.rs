use std::path::Path;

use potts_core::{artifact, ErrorInfo, PottsError, RunParameters};
use potts_traj::{read_trajectory, SliceSpec, Trajectory};

use crate::correlation::{lambda_profile, spatial_correlation, CorrelationGrid, Cutoff, LambdaProfile};
use crate::observables::{average_energy, heat_capacity, magnetization, Estimate, ObservableCache};

/// A loaded simulation run: parameters, decoded trajectory, and the lazily
/// filled observable cache.
///
/// Getters return the cached value when it is still valid for the request
/// (for the shape-dependent observables that includes matching bounds) and
/// recompute otherwise; the `recalculate_*` variants always recompute and
/// overwrite. Slicing produces an independent result with an empty cache.
#[derive(Debug, Clone)]
pub struct RunResult {
    params: RunParameters,
    trajectory: Trajectory,
    cache: ObservableCache,
}

impl RunResult {
    /// Loads the `<job>.log` / `<job>.traj` artifact pair from a run
    /// directory.
    pub fn load(dir: &Path, job_name: &str) -> Result<Self, PottsError> {
        Self::from_artifacts(
            &artifact::log_path(dir, job_name),
            &artifact::traj_path(dir, job_name),
        )
    }

    /// Loads a run from explicitly named log and trajectory artifacts.
    pub fn from_artifacts(log_path: &Path, traj_path: &Path) -> Result<Self, PottsError> {
        let params = RunParameters::from_log(log_path)?;
        let trajectory = read_trajectory(traj_path, &params)?;
        Self::from_parts(params, trajectory)
    }

    /// Wraps an already decoded trajectory, checking it against the declared
    /// lattice dimensions.
    pub fn from_parts(params: RunParameters, trajectory: Trajectory) -> Result<Self, PottsError> {
        if trajectory.rows() != params.n || trajectory.cols() != params.m {
            return Err(PottsError::Shape(
                ErrorInfo::new("lattice-dims", "trajectory does not match declared lattice")
                    .with_context("declared", format!("{}x{}", params.n, params.m))
                    .with_context("decoded", format!("{}x{}", trajectory.rows(), trajectory.cols())),
            ));
        }
        Ok(Self {
            params,
            trajectory,
            cache: ObservableCache::default(),
        })
    }

    /// Simulation parameters of this run.
    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    /// Decoded trajectory of this run.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Independent restriction of this result to the frames selected by
    /// `spec`, with a fresh observable cache.
    pub fn sliced(&self, spec: &SliceSpec) -> Result<Self, PottsError> {
        let trajectory = self.trajectory.sliced(spec, self.params.record_freq)?;
        Ok(Self {
            params: self.params.clone(),
            trajectory,
            cache: ObservableCache::default(),
        })
    }

    /// Time-weighted average energy.
    pub fn average_energy(&mut self) -> Estimate {
        match self.cache.average_energy {
            Some(cached) => cached,
            None => self.recalculate_average_energy(),
        }
    }

    /// Recomputes and caches the average energy.
    pub fn recalculate_average_energy(&mut self) -> Estimate {
        let estimate = average_energy(&self.trajectory);
        self.cache.average_energy = Some(estimate);
        estimate
    }

    /// Fluctuation heat capacity per site.
    pub fn heat_capacity(&mut self) -> Estimate {
        match self.cache.heat_capacity {
            Some(cached) => cached,
            None => self.recalculate_heat_capacity(),
        }
    }

    /// Recomputes and caches the heat capacity.
    pub fn recalculate_heat_capacity(&mut self) -> Estimate {
        let estimate = heat_capacity(&self.trajectory, &self.params);
        self.cache.heat_capacity = Some(estimate);
        estimate
    }

    /// Time-weighted magnetization.
    pub fn magnetization(&mut self) -> Estimate {
        match self.cache.magnetization {
            Some(cached) => cached,
            None => self.recalculate_magnetization(),
        }
    }

    /// Recomputes and caches the magnetization.
    pub fn recalculate_magnetization(&mut self) -> Estimate {
        let estimate = magnetization(&self.trajectory);
        self.cache.magnetization = Some(estimate);
        estimate
    }

    /// Connected spatial correlation grid; the cache is reused only when its
    /// bounds match the resolved cutoff.
    pub fn spatial_correlation(&mut self, cutoff: Option<Cutoff>) -> CorrelationGrid {
        let bounds = Cutoff::grid_bounds(cutoff, self.params.n, self.params.m);
        match &self.cache.correlation {
            Some(grid) if grid.bounds() == bounds => grid.clone(),
            _ => self.recalculate_spatial_correlation(cutoff),
        }
    }

    /// Recomputes and caches the correlation grid.
    pub fn recalculate_spatial_correlation(&mut self, cutoff: Option<Cutoff>) -> CorrelationGrid {
        let grid = spatial_correlation(&self.trajectory, cutoff);
        self.cache.correlation = Some(grid.clone());
        grid
    }

    /// Symmetrized correlation profile; the cache is reused only when its
    /// bound matches the resolved cutoff.
    pub fn lambda(&mut self, cutoff: Option<usize>) -> LambdaProfile {
        let bound = Cutoff::profile_bound(cutoff, self.params.n, self.params.m);
        match &self.cache.lambda {
            Some(profile) if profile.cutoff == bound => profile.clone(),
            _ => self.recalculate_lambda(cutoff),
        }
    }

    /// Recomputes and caches the symmetrized correlation profile.
    pub fn recalculate_lambda(&mut self, cutoff: Option<usize>) -> LambdaProfile {
        let profile = lambda_profile(&self.trajectory, cutoff);
        self.cache.lambda = Some(profile.clone());
        profile
    }

    /// Recomputes the full default observable set in one pass.
    pub fn analyze_all(&mut self) {
        self.recalculate_average_energy();
        self.recalculate_heat_capacity();
        self.recalculate_magnetization();
        self.recalculate_spatial_correlation(None);
        self.recalculate_lambda(None);
    }
}
