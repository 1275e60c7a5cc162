use std::fs;
use std::path::{Path, PathBuf};

use potts_core::{ErrorInfo, PottsError};
use serde::{Deserialize, Serialize};

fn config_error(code: &str, err: impl ToString, path: &Path) -> PottsError {
    PottsError::Config(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

fn default_binary() -> PathBuf {
    PathBuf::from("./PottsKMC")
}

fn default_quiet() -> bool {
    true
}

/// Explicit configuration for invoking the external simulator.
///
/// The binary location is plain data handed to whoever builds command lines;
/// nothing is resolved through environment variables or other process-wide
/// state behind the caller's back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Path to the simulator binary.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Append the trailing quiet flag to generated commands.
    #[serde(default = "default_quiet")]
    pub quiet: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            quiet: default_quiet(),
        }
    }
}

impl LauncherConfig {
    /// Configuration pointing at an explicit binary path.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    /// Loads a launcher configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, PottsError> {
        let contents =
            fs::read_to_string(path).map_err(|err| config_error("launcher-read", err, path))?;
        serde_yaml::from_str(&contents).map_err(|err| config_error("launcher-parse", err, path))
    }
}
