//! Per-bond rows of the interaction sheet.

use crate::bonds::{parse_bond_file, Bond, BondKind};
use crate::chains::{ChainRoles, Role};
use crate::error::Result;
use crate::interfaces::InterfaceRecord;
use std::path::Path;
use tracing::debug;

/// A bond annotated with the proteins it connects and the energetics of its interface.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRow {
    /// 1-based interface number
    pub interface: u32,
    /// Hydrogen bond or salt bridge
    pub kind: BondKind,
    /// The bond as exported
    pub bond: Bond,
    /// Protein of `bond.chain1`
    pub protein1: Option<Role>,
    /// Protein of `bond.chain2`
    pub protein2: Option<Role>,
    /// Interface area in Å²
    pub interface_area: Option<f64>,
    /// Solvation free energy gain, kcal/mol
    pub delta_g: Option<f64>,
    /// P-value of `delta_g`
    pub delta_g_pvalue: Option<f64>,
}

/// Annotate the bonds of a single interface.
/// Hydrogen bonds come before salt bridges.
pub fn annotate_bonds(
    interface: &InterfaceRecord,
    hbonds: Vec<Bond>,
    salt_bridges: Vec<Bond>,
    roles: &ChainRoles,
) -> Vec<InteractionRow> {
    let tagged = hbonds
        .into_iter()
        .map(|b| (BondKind::HydrogenBond, b))
        .chain(salt_bridges.into_iter().map(|b| (BondKind::SaltBridge, b)));

    tagged
        .map(|(kind, bond)| InteractionRow {
            interface: interface.interface,
            kind,
            protein1: roles.protein(&bond.chain1),
            protein2: roles.protein(&bond.chain2),
            bond,
            interface_area: interface.interface_area,
            delta_g: interface.delta_g,
            delta_g_pvalue: interface.delta_g_pvalue,
        })
        .collect()
}

/// Collect the bonds of all interfaces, reading the bond files in `dir`.
pub fn collect_interactions(
    dir: &Path,
    interfaces: &[InterfaceRecord],
    roles: &ChainRoles,
) -> Result<Vec<InteractionRow>> {
    let mut rows = Vec::new();
    for interface in interfaces {
        let hbonds = parse_bond_file(
            &dir.join(BondKind::HydrogenBond.file_name(interface.interface)),
            BondKind::HydrogenBond,
        )?;
        let salt_bridges = parse_bond_file(
            &dir.join(BondKind::SaltBridge.file_name(interface.interface)),
            BondKind::SaltBridge,
        )?;
        rows.extend(annotate_bonds(interface, hbonds, salt_bridges, roles));
    }
    debug!("Collected {} interaction(s) in {}", rows.len(), dir.display());
    Ok(rows)
}
