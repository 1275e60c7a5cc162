#![deny(missing_docs)]
#![doc = "Shared error surface, typed run parameters and artifact naming for the Potts KMC analysis tools."]

/// Artifact path conventions for a job's log/trajectory pair.
pub mod artifact;
/// Structured error types shared across the workspace.
pub mod errors;
/// Typed simulation parameters and the log parser.
pub mod params;

pub use errors::{ErrorInfo, PottsError};
pub use params::{ParameterOverrides, RunParameters, PARAMS_MARKER, REQUIRED_FIELDS};
