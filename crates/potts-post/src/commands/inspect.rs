use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use potts_core::RunParameters;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Log artifact to parse.
    #[arg(long)]
    pub log: PathBuf,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let params = RunParameters::from_log(&args.log)?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
