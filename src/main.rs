mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, Level};

/// Tabulate PDBePISA interface exports
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write InterfaceTable with one row per interface of each interfacetable.xml
    Interfaces(cli::interfaces::Args),

    /// Write InteractionSheet with one row per hydrogen bond or salt bridge
    Interactions(cli::interactions::Args),

    /// Write ResidueTable and ResiduePlot.svg from each residue0.xml
    Residues(cli::residues::Args),

    /// Write all tables and plots
    All(cli::all::Args),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let failures = match &args.command {
        Commands::Interfaces(args) => cli::interfaces::run(args),
        Commands::Interactions(args) => cli::interactions::run(args),
        Commands::Residues(args) => cli::residues::run(args),
        Commands::All(args) => cli::all::run(args),
    };

    if failures > 0 {
        error!("{failures} file(s) could not be processed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
