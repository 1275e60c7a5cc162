use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use potts_core::artifact;
use potts_obs::{AnalysisReport, RunResult};
use potts_run::discover_runs;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory holding the `<job>.log` / `<job>.traj` artifact pairs.
    #[arg(long)]
    pub dir: PathBuf,
    /// Analyze a single job instead of every discovered pair.
    #[arg(long)]
    pub job: Option<String>,
    /// Glob restricting which discovered jobs are analyzed.
    #[arg(long)]
    pub filter: Option<String>,
    /// Output directory for reports and CSV exports.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &AnalyzeArgs) -> Result<(), Box<dyn Error>> {
    let pairs: Vec<(String, PathBuf, PathBuf)> = match &args.job {
        Some(job) => vec![(
            job.clone(),
            artifact::log_path(&args.dir, job),
            artifact::traj_path(&args.dir, job),
        )],
        None => discover_runs(&args.dir, args.filter.as_deref())?
            .into_iter()
            .map(|run| (run.job_name, run.log_path, run.traj_path))
            .collect(),
    };
    if pairs.is_empty() {
        println!("no artifact pairs found under {}", args.dir.display());
        return Ok(());
    }
    fs::create_dir_all(&args.out)?;

    for (job, log_path, traj_path) in pairs {
        let mut result = RunResult::from_artifacts(&log_path, &traj_path)?;
        let report = AnalysisReport::from_result(&mut result)?;
        report.write(&args.out.join(format!("{job}.report.json")))?;
        report.write_correlation_csv(&args.out.join(format!("{job}.correlation.csv")))?;
        report.write_lambda_csv(&args.out.join(format!("{job}.lambda.csv")))?;
        let energy = &report.observables.average_energy;
        println!(
            "{job}: {} frames, total time {}, <E> = {} +- {}",
            report.trajectory.frame_count,
            report.trajectory.total_sample_time,
            energy.value,
            energy.error
        );
    }
    Ok(())
}
