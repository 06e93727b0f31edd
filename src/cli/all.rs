use super::InputArgs;
use clap::Parser;
use pisatab::export::{write_interface_outputs, write_residue_table};
use pisatab::{INTERFACE_TABLE, RESIDUE_TABLE};
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    #[command(flatten)]
    input: InputArgs,

    /// Skip drawing ResiduePlot.svg
    #[arg(long = "no-plot", default_value_t = false)]
    no_plot: bool,
}

pub(crate) fn run(args: &Args) -> usize {
    let Some(opts) = args.input.options(!args.no_plot) else {
        return 1;
    };

    info!("Parsing {INTERFACE_TABLE} files");
    let mut failures = args.input.process(INTERFACE_TABLE, "interface tables", |f| {
        write_interface_outputs(f, &opts).map(|_| ())
    });

    info!("Parsing {RESIDUE_TABLE} files");
    failures += args.input.process(RESIDUE_TABLE, "residue table", |f| {
        write_residue_table(f, &opts).map(|_| ())
    });
    failures
}
