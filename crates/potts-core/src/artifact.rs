//! Naming conventions for the artifact pair a simulation job leaves behind.

use std::path::{Path, PathBuf};

/// Extension of the log artifact carrying the parameter block.
pub const LOG_EXTENSION: &str = "log";

/// Extension of the trajectory artifact.
pub const TRAJ_EXTENSION: &str = "traj";

/// Path of the log artifact for a job inside an output directory.
pub fn log_path(dir: &Path, job_name: &str) -> PathBuf {
    dir.join(format!("{job_name}.{LOG_EXTENSION}"))
}

/// Path of the trajectory artifact for a job inside an output directory.
pub fn traj_path(dir: &Path, job_name: &str) -> PathBuf {
    dir.join(format!("{job_name}.{TRAJ_EXTENSION}"))
}
