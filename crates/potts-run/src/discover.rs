use std::path::{Path, PathBuf};

use globset::Glob;
use potts_core::{artifact, ErrorInfo, PottsError};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// One complete artifact pair found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredRun {
    /// Job identifier the pair is named by.
    pub job_name: String,
    /// Path of the log artifact.
    pub log_path: PathBuf,
    /// Path of the trajectory artifact.
    pub traj_path: PathBuf,
}

/// Finds every `<job>.log` with a sibling `<job>.traj` under `root`.
///
/// Logs without a trajectory next to them are skipped; a run that never got
/// past writing its log is not analyzable. An optional glob restricts the job
/// names that are reported. Results come back sorted by job name (then path)
/// so discovery order never depends on directory enumeration order.
pub fn discover_runs(root: &Path, name_glob: Option<&str>) -> Result<Vec<DiscoveredRun>, PottsError> {
    let matcher = match name_glob {
        Some(pattern) => Some(
            Glob::new(pattern)
                .map_err(|err| {
                    PottsError::Config(
                        ErrorInfo::new("discover-glob", err.to_string())
                            .with_context("pattern", pattern),
                    )
                })?
                .compile_matcher(),
        ),
        None => None,
    };

    let mut runs = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(artifact::LOG_EXTENSION) {
            continue;
        }
        let Some(job_name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if let Some(matcher) = &matcher {
            if !matcher.is_match(job_name) {
                continue;
            }
        }
        let dir = path.parent().unwrap_or(root);
        let traj_path = artifact::traj_path(dir, job_name);
        if !traj_path.is_file() {
            continue;
        }
        runs.push(DiscoveredRun {
            job_name: job_name.to_string(),
            log_path: path.to_path_buf(),
            traj_path,
        });
    }
    runs.sort_by(|a, b| {
        a.job_name
            .cmp(&b.job_name)
            .then_with(|| a.log_path.cmp(&b.log_path))
    });
    Ok(runs)
}
