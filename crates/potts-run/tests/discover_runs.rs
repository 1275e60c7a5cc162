use std::fs;
use std::path::Path;

use potts_core::PottsError;
use potts_run::discover_runs;

fn seed_pair(dir: &Path, job: &str) {
    fs::write(dir.join(format!("{job}.log")), "PARAMS\n").unwrap();
    fs::write(dir.join(format!("{job}.traj")), "# FullState\n").unwrap();
}

#[test]
fn finds_complete_pairs_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    seed_pair(dir.path(), "beta");
    seed_pair(dir.path(), "alpha");
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    seed_pair(&nested, "gamma");

    let runs = discover_runs(dir.path(), None).unwrap();
    let names: Vec<&str> = runs.iter().map(|run| run.job_name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    for run in &runs {
        assert!(run.log_path.is_file());
        assert!(run.traj_path.is_file());
    }
}

#[test]
fn logs_without_a_trajectory_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    seed_pair(dir.path(), "complete");
    fs::write(dir.path().join("orphan.log"), "PARAMS\n").unwrap();

    let runs = discover_runs(dir.path(), None).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].job_name, "complete");
}

#[test]
fn glob_filters_on_job_names() {
    let dir = tempfile::tempdir().unwrap();
    seed_pair(dir.path(), "scan_0000");
    seed_pair(dir.path(), "scan_0001");
    seed_pair(dir.path(), "pilot");

    let runs = discover_runs(dir.path(), Some("scan_*")).unwrap();
    let names: Vec<&str> = runs.iter().map(|run| run.job_name.as_str()).collect();
    assert_eq!(names, vec!["scan_0000", "scan_0001"]);

    match discover_runs(dir.path(), Some("scan_[")).unwrap_err() {
        PottsError::Config(info) => assert_eq!(info.code, "discover-glob"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_directories_yield_no_runs() {
    let dir = tempfile::tempdir().unwrap();
    assert!(discover_runs(dir.path(), None).unwrap().is_empty());
}
