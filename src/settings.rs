//! Extraction settings shared by the library entry points and the CLI.

use crate::chains::ChainRoles;
use crate::utils::DataFrameFileType;

/// Name of the interface table output, without extension
pub const INTERFACE_OUTPUT: &str = "InterfaceTable";
/// Name of the per-bond interaction output, without extension
pub const INTERACTION_OUTPUT: &str = "InteractionSheet";
/// Name of the residue table output, without extension
pub const RESIDUE_OUTPUT: &str = "ResidueTable";
/// File name of the residue plot
pub const RESIDUE_PLOT: &str = "ResiduePlot.svg";

/// What to extract and how to write it.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Binder and target chains
    pub roles: ChainRoles,
    /// Format of the written tables
    pub output_format: DataFrameFileType,
    /// Draw `ResiduePlot.svg` next to residue tables
    pub plot: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            roles: ChainRoles::default(),
            output_format: DataFrameFileType::Csv,
            plot: true,
        }
    }
}
