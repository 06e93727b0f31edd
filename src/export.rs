//! Per-structure pipelines that write tables and plots next to their XML input.

use crate::error::Result;
use crate::interactions::collect_interactions;
use crate::interfaces::{read_interface_table, InterfaceRecord};
use crate::plot::plot_residues;
use crate::residues::read_residues;
use crate::settings::{
    ExtractOptions, INTERACTION_OUTPUT, INTERFACE_OUTPUT, RESIDUE_OUTPUT, RESIDUE_PLOT,
};
use crate::utils::{run_with_threads, write_df_to_file};
use crate::{interactions_to_df, interfaces_to_df, residues_to_df};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

fn output_dir(xml_file: &Path) -> &Path {
    xml_file.parent().unwrap_or_else(|| Path::new("."))
}

fn save_interface_table(
    dir: &Path,
    records: &[InterfaceRecord],
    opts: &ExtractOptions,
) -> Result<PathBuf> {
    let mut df = interfaces_to_df(records)?;
    let output = write_df_to_file(&mut df, &dir.join(INTERFACE_OUTPUT), opts.output_format)?;
    info!("Interface table saved to {}", output.display());
    Ok(output)
}

fn save_interaction_sheet(
    dir: &Path,
    records: &[InterfaceRecord],
    opts: &ExtractOptions,
) -> Result<PathBuf> {
    let rows = collect_interactions(dir, records, &opts.roles)?;
    let mut df = interactions_to_df(&rows)?;
    let output = write_df_to_file(&mut df, &dir.join(INTERACTION_OUTPUT), opts.output_format)?;
    info!(
        "{} interaction(s) saved to {}",
        df.height(),
        output.display()
    );
    Ok(output)
}

/// Write `InterfaceTable` next to an `interfacetable.xml`.
pub fn write_interface_table(xml_file: &Path, opts: &ExtractOptions) -> Result<PathBuf> {
    debug!("Processing {}", xml_file.display());
    let records = read_interface_table(xml_file)?;
    save_interface_table(output_dir(xml_file), &records, opts)
}

/// Write `InteractionSheet` next to an `interfacetable.xml`.
pub fn write_interaction_sheet(xml_file: &Path, opts: &ExtractOptions) -> Result<PathBuf> {
    debug!("Processing {}", xml_file.display());
    let records = read_interface_table(xml_file)?;
    save_interaction_sheet(output_dir(xml_file), &records, opts)
}

/// Write both `InterfaceTable` and `InteractionSheet`, reading the interface table once.
pub fn write_interface_outputs(xml_file: &Path, opts: &ExtractOptions) -> Result<Vec<PathBuf>> {
    debug!("Processing {}", xml_file.display());
    let dir = output_dir(xml_file);
    let records = read_interface_table(xml_file)?;
    Ok(vec![
        save_interface_table(dir, &records, opts)?,
        save_interaction_sheet(dir, &records, opts)?,
    ])
}

/// Write `ResidueTable` and, if enabled, `ResiduePlot.svg` next to a `residue0.xml`.
pub fn write_residue_table(xml_file: &Path, opts: &ExtractOptions) -> Result<Vec<PathBuf>> {
    debug!("Processing {}", xml_file.display());
    let dir = output_dir(xml_file);
    let residues = read_residues(xml_file, &opts.roles)?;
    let mut df = residues_to_df(&residues)?;

    let mut written = vec![write_df_to_file(
        &mut df,
        &dir.join(RESIDUE_OUTPUT),
        opts.output_format,
    )?];
    info!("Residue table saved to {}", written[0].display());

    if opts.plot {
        let plot_file = dir.join(RESIDUE_PLOT);
        plot_residues(&residues, &opts.roles, &plot_file)?;
        info!("Residue plot saved to {}", plot_file.display());
        written.push(plot_file);
    }
    Ok(written)
}

/// Run `op` on every file in parallel and return how many failed.
///
/// A failure is logged with `task` and the file name; the remaining files still run.
pub fn process_files<F>(files: &[PathBuf], num_threads: usize, task: &str, op: F) -> Result<usize>
where
    F: Fn(&Path) -> Result<()> + Sync,
{
    run_with_threads(num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        files
            .par_iter()
            .filter(|f| match op(f) {
                Ok(()) => false,
                Err(e) => {
                    error!("Failed to build {task} for {}: {e}", f.display());
                    true
                }
            })
            .count()
    })
}
