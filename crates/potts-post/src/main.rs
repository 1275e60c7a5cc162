use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    analyze::{self, AnalyzeArgs},
    batch::{self, BatchArgs},
    command::{self, CommandArgs},
    inspect::{self, InspectArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "potts-post", about = "Potts KMC trajectory analysis CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a run's artifact pair and write its analysis report.
    Analyze(AnalyzeArgs),
    /// Parse a log artifact and print its parameters.
    Inspect(InspectArgs),
    /// Print the simulator command line for a parameter file.
    Command(CommandArgs),
    /// Expand a sweep plan into a batch script.
    Batch(BatchArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => analyze::run(&args),
        Command::Inspect(args) => inspect::run(&args),
        Command::Command(args) => command::run(&args),
        Command::Batch(args) => batch::run(&args),
    }
}
