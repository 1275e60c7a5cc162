use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use potts_run::{batch_script, command_line, write_batch_script, LauncherConfig, ShellFlavor, SweepPlan};

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Shell {
    Bash,
    Powershell,
}

impl From<Shell> for ShellFlavor {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => ShellFlavor::Bash,
            Shell::Powershell => ShellFlavor::PowerShell,
        }
    }
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// YAML sweep plan to expand.
    #[arg(long)]
    pub plan: PathBuf,
    /// Launcher configuration file; defaults to `./PottsKMC`, quiet.
    #[arg(long)]
    pub launcher: Option<PathBuf>,
    /// Shell dialect of the generated script.
    #[arg(long, value_enum, default_value_t = Shell::Bash)]
    pub shell: Shell,
    /// Jobs launched concurrently before the script waits; 0 for all at once.
    #[arg(long, default_value_t = 4)]
    pub batch_size: usize,
    /// Path the script is written to.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &BatchArgs) -> Result<(), Box<dyn Error>> {
    let plan = SweepPlan::load(&args.plan)?;
    let launcher = match &args.launcher {
        Some(path) => LauncherConfig::load(path)?,
        None => LauncherConfig::default(),
    };
    let commands: Vec<String> = plan
        .expand()?
        .iter()
        .map(|params| command_line(&launcher, params))
        .collect();
    let script = batch_script(args.shell.into(), &commands, args.batch_size);
    write_batch_script(&args.out, &script)?;
    println!("wrote {} jobs to {}", commands.len(), args.out.display());
    Ok(())
}
