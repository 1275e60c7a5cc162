use std::fs;
use std::path::Path;

use chrono::Utc;
use potts_core::{ErrorInfo, PottsError, RunParameters};
use potts_traj::TrajectorySource;
use serde::{Deserialize, Serialize};

use crate::correlation::{CorrelationGrid, LambdaProfile};
use crate::hash::{from_json_slice, stable_hash_string};
use crate::observables::Estimate;
use crate::result::RunResult;

fn report_error(code: &str, err: impl ToString, path: &Path) -> PottsError {
    PottsError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Compact description of the trajectory a report was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    /// Encoding of the underlying artifact.
    pub source: TrajectorySource,
    /// Number of decoded frames.
    pub frame_count: usize,
    /// Normalization used by the estimators.
    pub total_sample_time: f64,
    /// Stable hash of the full decoded trajectory.
    pub trajectory_hash: String,
}

/// The default observable set evaluated over one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservableSet {
    /// Time-weighted average energy.
    pub average_energy: Estimate,
    /// Fluctuation heat capacity per site.
    pub heat_capacity: Estimate,
    /// Time-weighted magnetization.
    pub magnetization: Estimate,
    /// Connected correlation grid at the default cutoff.
    pub correlation: CorrelationGrid,
    /// Symmetrized correlation profile at the default cutoff.
    pub lambda: LambdaProfile,
}

/// Persistable analysis summary for a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Job identifier the artifacts were named by.
    pub job_name: String,
    /// RFC 3339 timestamp of report creation.
    pub created_at: String,
    /// Parameters parsed from the log artifact.
    pub params: RunParameters,
    /// Summary of the decoded trajectory.
    pub trajectory: TrajectorySummary,
    /// Evaluated observables.
    pub observables: ObservableSet,
}

impl AnalysisReport {
    /// Evaluates the default observable set of `result` and assembles the
    /// report, reusing any cached values that are still valid.
    pub fn from_result(result: &mut RunResult) -> Result<Self, PottsError> {
        let trajectory_hash = stable_hash_string(result.trajectory())?;
        let trajectory = TrajectorySummary {
            source: result.trajectory().source(),
            frame_count: result.trajectory().frame_count(),
            total_sample_time: result.trajectory().total_sample_time(),
            trajectory_hash,
        };
        let observables = ObservableSet {
            average_energy: result.average_energy(),
            heat_capacity: result.heat_capacity(),
            magnetization: result.magnetization(),
            correlation: result.spatial_correlation(None),
            lambda: result.lambda(None),
        };
        Ok(Self {
            job_name: result.params().job_name.clone(),
            created_at: Utc::now().to_rfc3339(),
            params: result.params().clone(),
            trajectory,
            observables,
        })
    }

    /// Writes the report to a JSON file, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), PottsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| report_error("report-mkdir", err, parent))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| report_error("report-serialize", err, path))?;
        fs::write(path, json).map_err(|err| report_error("report-write", err, path))
    }

    /// Loads a report from disk.
    pub fn load(path: &Path) -> Result<Self, PottsError> {
        let bytes = fs::read(path).map_err(|err| report_error("report-read", err, path))?;
        from_json_slice(&bytes).map_err(|err| match err {
            PottsError::Serde(info) => {
                PottsError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Exports the correlation grid as CSV with one `(i, j)` offset per row.
    pub fn write_correlation_csv(&self, path: &Path) -> Result<(), PottsError> {
        let mut writer =
            csv::Writer::from_path(path).map_err(|err| report_error("csv-open", err, path))?;
        writer
            .write_record(["i", "j", "value", "error"])
            .map_err(|err| report_error("csv-write", err, path))?;
        let grid = &self.observables.correlation;
        for i in 0..grid.nmax {
            for j in 0..grid.mmax {
                writer
                    .write_record([
                        i.to_string(),
                        j.to_string(),
                        grid.value(i, j).to_string(),
                        grid.error(i, j).to_string(),
                    ])
                    .map_err(|err| report_error("csv-write", err, path))?;
            }
        }
        writer.flush().map_err(|err| report_error("csv-flush", err, path))
    }

    /// Exports the symmetrized correlation profile as CSV.
    pub fn write_lambda_csv(&self, path: &Path) -> Result<(), PottsError> {
        let mut writer =
            csv::Writer::from_path(path).map_err(|err| report_error("csv-open", err, path))?;
        writer
            .write_record(["k", "value", "error"])
            .map_err(|err| report_error("csv-write", err, path))?;
        let profile = &self.observables.lambda;
        for (k, (value, error)) in profile.values.iter().zip(&profile.errors).enumerate() {
            writer
                .write_record([k.to_string(), value.to_string(), error.to_string()])
                .map_err(|err| report_error("csv-write", err, path))?;
        }
        writer.flush().map_err(|err| report_error("csv-flush", err, path))
    }
}
