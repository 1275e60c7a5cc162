use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use potts_core::{ParameterOverrides, RunParameters};
use potts_run::{command_line, LauncherConfig};

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// YAML file of parameter overrides; absent fields take the defaults.
    #[arg(long)]
    pub params: Option<PathBuf>,
    /// Launcher configuration file; defaults to `./PottsKMC`, quiet.
    #[arg(long)]
    pub launcher: Option<PathBuf>,
}

pub fn run(args: &CommandArgs) -> Result<(), Box<dyn Error>> {
    let overrides: ParameterOverrides = match &args.params {
        Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
        None => ParameterOverrides::default(),
    };
    let params = RunParameters::from_overrides(&overrides);
    let launcher = match &args.launcher {
        Some(path) => LauncherConfig::load(path)?,
        None => LauncherConfig::default(),
    };
    println!("{}", command_line(&launcher, &params));
    Ok(())
}
