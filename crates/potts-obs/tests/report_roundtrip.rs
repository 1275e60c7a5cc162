use std::fs;

use potts_obs::{AnalysisReport, RunResult};
use potts_traj::SliceSpec;

const LOG_TEXT: &str = "\
Potts kinetic Monte Carlo
PARAMS
N = 2
M = 2
q = 2
steps = 3
recordFreq = 1
randomSeed = 7
J = 1.0
B = 0.0
T = 1.0
tau = 10.0
jobName = demo
";

const TRAJ_TEXT: &str = "\
# TrajType = FullState
0 0 0 0 0 0 1 0
1 1 0 0 0 1 2 1
2 1 0 0 0 3 1 1
";

fn demo_result(dir: &std::path::Path) -> RunResult {
    fs::write(potts_core::artifact::log_path(dir, "demo"), LOG_TEXT).unwrap();
    fs::write(potts_core::artifact::traj_path(dir, "demo"), TRAJ_TEXT).unwrap();
    RunResult::load(dir, "demo").unwrap()
}

#[test]
fn report_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut result = demo_result(dir.path());
    let report = AnalysisReport::from_result(&mut result).unwrap();

    assert_eq!(report.job_name, "demo");
    assert_eq!(report.trajectory.frame_count, 3);
    assert_eq!(report.trajectory.total_sample_time, 4.0);
    assert!((report.observables.average_energy.value - 0.75).abs() < 1e-12);

    let path = dir.path().join("analysis").join("demo.report.json");
    report.write(&path).unwrap();
    let loaded = AnalysisReport::load(&path).unwrap();
    assert_eq!(loaded, report);
}

#[test]
fn trajectory_hash_tracks_the_frames() {
    let dir = tempfile::tempdir().unwrap();
    let mut result = demo_result(dir.path());
    let report = AnalysisReport::from_result(&mut result).unwrap();

    let mut reloaded = demo_result(dir.path());
    let second = AnalysisReport::from_result(&mut reloaded).unwrap();
    // Same artifacts, same hash, whatever the wall clock says.
    assert_eq!(
        report.trajectory.trajectory_hash,
        second.trajectory.trajectory_hash
    );

    let mut sliced = result.sliced(&SliceSpec::range(0, 2)).unwrap();
    let sliced_report = AnalysisReport::from_result(&mut sliced).unwrap();
    assert_ne!(
        report.trajectory.trajectory_hash,
        sliced_report.trajectory.trajectory_hash
    );
}

#[test]
fn mangled_report_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.report.json");
    fs::write(&path, "{\"job_name\": \"demo\",").unwrap();
    match AnalysisReport::load(&path).unwrap_err() {
        potts_core::PottsError::Serde(info) => {
            assert_eq!(info.code, "json-deserialize");
            assert!(info.context.contains_key("path"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn csv_exports_cover_the_grids() {
    let dir = tempfile::tempdir().unwrap();
    let mut result = demo_result(dir.path());
    let report = AnalysisReport::from_result(&mut result).unwrap();

    let correlation_path = dir.path().join("correlation.csv");
    report.write_correlation_csv(&correlation_path).unwrap();
    let correlation = fs::read_to_string(&correlation_path).unwrap();
    let mut lines = correlation.lines();
    assert_eq!(lines.next().unwrap(), "i,j,value,error");
    // 2x2 lattice: the default grid is 1x1.
    assert_eq!(lines.count(), 1);

    let lambda_path = dir.path().join("lambda.csv");
    report.write_lambda_csv(&lambda_path).unwrap();
    let lambda = fs::read_to_string(&lambda_path).unwrap();
    let mut lines = lambda.lines();
    assert_eq!(lines.next().unwrap(), "k,value,error");
    assert_eq!(lines.count(), 1);
}
