#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Pisatab Library
//!
//! This library reads the XML reports exported by the PDBePISA web service and
//! turns them into tables: one row per interface, one row per inter-chain bond,
//! and one row per interfacing residue.
//!
//! The library returns results as Polars DataFrames, which can be written to CSV,
//! Parquet or JSON with [`write_df_to_file`].

pub mod bonds;
pub mod chains;
pub mod discover;
pub mod error;
pub mod export;
pub mod interactions;
pub mod interfaces;
pub mod plot;
pub mod residues;
pub mod settings;
pub mod utils;
pub mod xml;

// Re-export key public types
pub use bonds::{Bond, BondKind};
pub use chains::{ChainRoles, Role};
pub use discover::{find_xml_files, INTERFACE_TABLE, RESIDUE_TABLE};
pub use error::{PisaError, Result};
pub use interactions::InteractionRow;
pub use interfaces::InterfaceRecord;
pub use residues::{ResidueId, ResidueRecord};
pub use settings::ExtractOptions;
pub use utils::{run_with_threads, write_df_to_file, DataFrameFileType};

use polars::prelude::*;
use std::path::Path;

/// Parse an `interfacetable.xml` and its companion files into a DataFrame.
///
/// # Returns
///
/// A Polars DataFrame with one row per interface and columns:
/// - interface, chain1, nres1, sasa1, chain2, nres2, sasa2
/// - interface_area, delta_g, delta_g_pvalue
/// - n_hbonds, n_saltbridges, n_disulfides, css, interface_surface
///
/// # Example
///
/// ```no_run
/// use pisatab::get_interfaces;
/// use std::path::Path;
///
/// let df = get_interfaces(Path::new("pisa_results/1abc/interfacetable.xml")).unwrap();
/// println!("Found {} interfaces", df.height());
/// ```
pub fn get_interfaces(xml_file: &Path) -> Result<DataFrame> {
    let records = interfaces::read_interface_table(xml_file)?;
    interfaces_to_df(&records)
}

/// List every hydrogen bond and salt bridge of the interfaces in an `interfacetable.xml`.
///
/// Bond files are looked up in the same directory as `xml_file`. Chains are mapped to
/// proteins with `roles`.
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - interface, protein1, chain1, res1, distance, protein2, chain2, res2
/// - interaction, interface_area, delta_g, delta_g_pvalue
pub fn get_interactions(xml_file: &Path, roles: &ChainRoles) -> Result<DataFrame> {
    let records = interfaces::read_interface_table(xml_file)?;
    let dir = xml_file.parent().unwrap_or_else(|| Path::new("."));
    let rows = interactions::collect_interactions(dir, &records, roles)?;
    interactions_to_df(&rows)
}

/// Parse the interfacing residues of a `residue0.xml`.
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - side, chain, resn, resi, insertion
/// - sasa, bsa, bsa_score, solvation_energy, continuous_resi
pub fn get_residues(xml_file: &Path, roles: &ChainRoles) -> Result<DataFrame> {
    let residues = residues::read_residues(xml_file, roles)?;
    residues_to_df(&residues)
}

/// Build the interface table from parsed records, one row per interface.
pub fn interfaces_to_df(res: &[InterfaceRecord]) -> Result<DataFrame> {
    Ok(df!(
        "interface" => res.iter().map(|x| x.interface).collect::<Vec<u32>>(),
        "chain1" => res.iter().map(|x| x.chain1.to_owned()).collect::<Vec<String>>(),
        "nres1" => res.iter().map(|x| x.nres1).collect::<Vec<Option<i64>>>(),
        "sasa1" => res.iter().map(|x| x.sasa1).collect::<Vec<Option<f64>>>(),
        "chain2" => res.iter().map(|x| x.chain2.to_owned()).collect::<Vec<String>>(),
        "nres2" => res.iter().map(|x| x.nres2).collect::<Vec<Option<i64>>>(),
        "sasa2" => res.iter().map(|x| x.sasa2).collect::<Vec<Option<f64>>>(),
        "interface_area" => res.iter().map(|x| x.interface_area).collect::<Vec<Option<f64>>>(),
        "delta_g" => res.iter().map(|x| x.delta_g).collect::<Vec<Option<f64>>>(),
        "delta_g_pvalue" => res.iter().map(|x| x.delta_g_pvalue).collect::<Vec<Option<f64>>>(),
        "n_hbonds" => res.iter().map(|x| x.n_hbonds).collect::<Vec<Option<i64>>>(),
        "n_saltbridges" => res.iter().map(|x| x.n_saltbridges).collect::<Vec<Option<i64>>>(),
        "n_disulfides" => res.iter().map(|x| x.n_disulfides).collect::<Vec<Option<i64>>>(),
        "css" => res.iter().map(|x| x.css).collect::<Vec<Option<f64>>>(),
        "interface_surface" => res
            .iter()
            .map(|x| x.interface_surface)
            .collect::<Vec<Option<f64>>>(),
    )?)
}

/// Build the interaction sheet, one row per bond.
/// Proteins without a role are written as nulls.
pub fn interactions_to_df(res: &[InteractionRow]) -> Result<DataFrame> {
    let protein = |p: Option<Role>| p.map(|r| r.to_string());
    Ok(df!(
        "interface" => res.iter().map(|x| x.interface).collect::<Vec<u32>>(),
        "protein1" => res.iter().map(|x| protein(x.protein1)).collect::<Vec<Option<String>>>(),
        "chain1" => res.iter().map(|x| x.bond.chain1.to_owned()).collect::<Vec<String>>(),
        "res1" => res.iter().map(|x| x.bond.res1.to_owned()).collect::<Vec<String>>(),
        "distance" => res.iter().map(|x| x.bond.distance).collect::<Vec<Option<f64>>>(),
        "protein2" => res.iter().map(|x| protein(x.protein2)).collect::<Vec<Option<String>>>(),
        "chain2" => res.iter().map(|x| x.bond.chain2.to_owned()).collect::<Vec<String>>(),
        "res2" => res.iter().map(|x| x.bond.res2.to_owned()).collect::<Vec<String>>(),
        "interaction" => res.iter().map(|x| x.kind.to_string()).collect::<Vec<String>>(),
        "interface_area" => res.iter().map(|x| x.interface_area).collect::<Vec<Option<f64>>>(),
        "delta_g" => res.iter().map(|x| x.delta_g).collect::<Vec<Option<f64>>>(),
        "delta_g_pvalue" => res.iter().map(|x| x.delta_g_pvalue).collect::<Vec<Option<f64>>>(),
    )?)
}

/// Build the residue table in the order of `res`.
pub fn residues_to_df(res: &[ResidueRecord]) -> Result<DataFrame> {
    Ok(df!(
        "side" => res.iter().map(|x| x.side as u32).collect::<Vec<u32>>(),
        "chain" => res.iter().map(|x| x.id.chain.to_owned()).collect::<Vec<String>>(),
        "resn" => res.iter().map(|x| x.id.resn.to_owned()).collect::<Vec<String>>(),
        "resi" => res.iter().map(|x| x.id.resi).collect::<Vec<i32>>(),
        "insertion" => res.iter().map(|x| x.id.insertion.to_owned()).collect::<Vec<String>>(),
        "sasa" => res.iter().map(|x| x.sasa).collect::<Vec<f64>>(),
        "bsa" => res.iter().map(|x| x.bsa).collect::<Vec<f64>>(),
        "bsa_score" => res.iter().map(|x| x.bsa_score).collect::<Vec<f64>>(),
        "solvation_energy" => res.iter().map(|x| x.solvation_energy).collect::<Vec<f64>>(),
        "continuous_resi" => res.iter().map(|x| x.continuous_resi).collect::<Vec<i32>>(),
    )?)
}
