use potts_core::RunParameters;

use crate::config::LauncherConfig;

/// Trailing flag appended to every generated command.
pub const QUIET_FLAG: &str = "--quiet";

/// Builds the argument vector for one simulation run.
///
/// Flags appear in a fixed order, one per parameter, mirroring the
/// simulator's interface: `-N -M -q --steps --record-freq --random-seed
/// -J -B -T --tau --job-name`, with the quiet flag last when enabled.
pub fn command_args(launcher: &LauncherConfig, params: &RunParameters) -> Vec<String> {
    let mut args = vec![launcher.binary.display().to_string()];
    let flags: [(&str, String); 11] = [
        ("-N", params.n.to_string()),
        ("-M", params.m.to_string()),
        ("-q", params.q.to_string()),
        ("--steps", params.steps.to_string()),
        ("--record-freq", params.record_freq.to_string()),
        ("--random-seed", params.random_seed.to_string()),
        ("-J", params.coupling_j.to_string()),
        ("-B", params.field_b.to_string()),
        ("-T", params.temperature.to_string()),
        ("--tau", params.tau.to_string()),
        ("--job-name", params.job_name.clone()),
    ];
    for (flag, value) in flags {
        args.push(flag.to_string());
        args.push(value);
    }
    if launcher.quiet {
        args.push(QUIET_FLAG.to_string());
    }
    args
}

/// Renders the full shell command line for one simulation run.
pub fn command_line(launcher: &LauncherConfig, params: &RunParameters) -> String {
    command_args(launcher, params).join(" ")
}
