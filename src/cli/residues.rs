use super::InputArgs;
use clap::Parser;
use pisatab::export::write_residue_table;
use pisatab::RESIDUE_TABLE;

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
    args.input.process(RESIDUE_TABLE, "residue table", |f| {
        write_residue_table(f, &opts).map(|_| ())
    })
}
