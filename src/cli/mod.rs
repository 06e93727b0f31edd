pub(crate) mod all;
pub(crate) mod interactions;
pub(crate) mod interfaces;
pub(crate) mod residues;

use pisatab::export::process_files;
use pisatab::{find_xml_files, ChainRoles, DataFrameFileType, ExtractOptions};
use std::path::{Path, PathBuf};
use tracing::{error, info, trace, warn};

#[derive(clap::Args, Debug, Clone)]
pub(crate) struct InputArgs {
    /// Directory with PISA XML exports, either directly or one structure per subdirectory
    root: PathBuf,

    /// Group chains into proteins:
    /// e.g. A,B/C,D
    /// where chains A and B are the "binder" and C and D are the "target".
    /// Chains in neither group are written without a protein.
    #[arg(short, long, default_value_t = String::from("A/B"))]
    groups: String,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Number of threads to use for processing structures in parallel (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 0)]
    num_threads: usize,
}

impl InputArgs {
    /// Build extraction options, logging invalid chain groups.
    pub(crate) fn options(&self, plot: bool) -> Option<ExtractOptions> {
        match ChainRoles::parse(&self.groups) {
            Ok(roles) => Some(ExtractOptions {
                roles,
                output_format: self.output_format,
                plot,
            }),
            Err(e) => {
                error!("{e}");
                None
            }
        }
    }

    /// Run `op` on every `filename` under the root and return the number of failures.
    pub(crate) fn process<F>(&self, filename: &str, task: &str, op: F) -> usize
    where
        F: Fn(&Path) -> pisatab::Result<()> + Sync,
    {
        trace!("{self:?}");

        let files = match find_xml_files(&self.root, filename) {
            Ok(files) => files,
            Err(e) => {
                error!("{e}");
                return 1;
            }
        };
        if files.is_empty() {
            warn!("No {filename} found in {}", self.root.display());
            return 0;
        }
        info!("Found {} {filename} file(s)", files.len());

        let failures = process_files(&files, self.num_threads, task, op);
        match failures {
            Ok(n) => n,
            Err(e) => {
                error!("{e}");
                files.len()
            }
        }
    }
}
