//! Locating PISA exports below an input directory.

use crate::error::{PisaError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default name of the interface table export.
pub const INTERFACE_TABLE: &str = "interfacetable.xml";
/// Default name of the interfacing residues export.
pub const RESIDUE_TABLE: &str = "residue0.xml";

/// Find files named `filename` in `root` or its direct subdirectories, sorted by path.
pub fn find_xml_files(root: &Path, filename: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(PisaError::MissingRoot(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(2)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == filename)
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}
