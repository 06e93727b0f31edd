use super::InputArgs;
use clap::Parser;
use pisatab::export::write_interaction_sheet;
use pisatab::INTERFACE_TABLE;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    #[command(flatten)]
    input: InputArgs,
}

pub(crate) fn run(args: &Args) -> usize {
    let Some(opts) = args.input.options(false) else {
        return 1;
    };
    args.input
        .process(INTERFACE_TABLE, "interaction sheet", |f| {
            write_interaction_sheet(f, &opts).map(|_| ())
        })
}
