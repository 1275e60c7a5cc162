#![deny(missing_docs)]
#![doc = "Launcher-side collaborator layer for the Potts simulator: explicit launcher configuration, one-to-one command-line construction, sweep-plan expansion with deterministic seeds, batch-script generation, and artifact discovery."]

/// Batch-script rendering for bash and PowerShell.
pub mod batch;
/// Simulator command-line construction.
pub mod command;
/// Explicit launcher configuration.
pub mod config;
/// Discovery of artifact pairs on disk.
pub mod discover;
/// Sweep plans and their expansion.
pub mod sweep;

pub use batch::{batch_script, bash_script, powershell_script, write_batch_script, ShellFlavor};
pub use command::{command_args, command_line, QUIET_FLAG};
pub use config::LauncherConfig;
pub use discover::{discover_runs, DiscoveredRun};
pub use sweep::{derive_job_seed, SweepPlan};
