//! Hydrogen bond and salt bridge exports.

use crate::error::{PisaError, Result};
use crate::xml::{parse_value, read_xml, scan, Event};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Types of inter-chain bonds exported per interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {
    /// Listed in `hydrogenbond{k}.xml`
    HydrogenBond,
    /// Listed in `saltbridge{k}.xml`
    SaltBridge,
}

impl BondKind {
    /// File name prefix used by the PISA export.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            BondKind::HydrogenBond => "hydrogenbond",
            BondKind::SaltBridge => "saltbridge",
        }
    }

    /// Name of the bond file for a 1-based interface number.
    pub fn file_name(&self, interface: u32) -> String {
        format!("{}{}.xml", self.file_prefix(), interface.saturating_sub(1))
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BondKind::HydrogenBond => write!(f, "Hydrogen bond"),
            BondKind::SaltBridge => write!(f, "Salt bridge"),
        }
    }
}

/// One bond between two residues of different chains.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Chain of the first residue
    pub chain1: String,
    /// Residue and atom label, e.g. `ARG 45[ NH1]`
    pub res1: String,
    /// Bond length in Å
    pub distance: Option<f64>,
    /// Chain of the second residue
    pub chain2: String,
    /// Residue and atom label on the second chain
    pub res2: String,
}

/// Split a structure label like `A:ARG 45[ NH1]` into chain and residue label.
pub fn split_structure(label: &str) -> Result<(String, String)> {
    let (chain, residue) = label
        .split_once(':')
        .ok_or_else(|| PisaError::InvalidStructure(label.to_string()))?;
    Ok((chain.trim().to_string(), residue.trim().to_string()))
}

/// Parse the bonds of a bond export.
/// A record is `STRUCTURE1`, `DISTANCE` and `STRUCTURE2`, completed at `STRUCTURE2`.
pub fn parse_bonds(text: &str) -> Result<Vec<Bond>> {
    let mut bonds = Vec::new();
    let mut first: Option<(String, String)> = None;
    let mut distance: Option<f64> = None;

    for event in scan(text)? {
        let Event::Leaf { name, value } = event else {
            continue;
        };
        match name {
            "STRUCTURE1" => {
                first = Some(split_structure(&value)?);
                distance = None;
            }
            "DISTANCE" => distance = parse_value(name, &value)?,
            "STRUCTURE2" => match first.take() {
                Some((chain1, res1)) => {
                    let (chain2, res2) = split_structure(&value)?;
                    bonds.push(Bond {
                        chain1,
                        res1,
                        distance: distance.take(),
                        chain2,
                        res2,
                    });
                }
                None => debug!("Skipping STRUCTURE2 {value} without a preceding STRUCTURE1"),
            },
            _ => {}
        }
    }

    Ok(bonds)
}

/// Read a bond export. A missing file is not an error and yields no bonds.
pub fn parse_bond_file(path: &Path, kind: BondKind) -> Result<Vec<Bond>> {
    if !path.is_file() {
        info!("No {kind} file {} found", path.display());
        return Ok(Vec::new());
    }
    let bonds = parse_bonds(&read_xml(path)?)?;
    debug!("Parsed {} {kind}(s) from {}", bonds.len(), path.display());
    Ok(bonds)
}

/// Chains on both sides of the first bond of an export. Missing sides read `/`.
pub fn bond_chains(text: &str) -> Result<(String, String)> {
    let mut chains = ("/".to_string(), "/".to_string());
    for event in scan(text)? {
        let Event::Leaf { name, value } = event else {
            continue;
        };
        match name {
            "STRUCTURE1" => chains.0 = chain_of(&value),
            "STRUCTURE2" => {
                chains.1 = chain_of(&value);
                break;
            }
            _ => {}
        }
    }
    Ok(chains)
}

fn chain_of(label: &str) -> String {
    match label.split_once(':') {
        Some((chain, _)) => chain.trim().to_string(),
        None => label.chars().take(1).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HBONDS: &str = "<?xml version=\"1.0\"?>
<BONDS>
<BOND>
<STRUCTURE1>A:ARG 45[ NH1]</STRUCTURE1>
<DISTANCE>2.87</DISTANCE>
<STRUCTURE2>B:GLU 12[ OE2]</STRUCTURE2>
</BOND>
<BOND>
<STRUCTURE1>A:SER 50[ OG ]</STRUCTURE1>
<STRUCTURE2>B:ASN 8[ OD1]</STRUCTURE2>
</BOND>
</BONDS>
";

    #[test]
    fn parses_bond_records() {
        let bonds = parse_bonds(HBONDS).unwrap();
        assert_eq!(bonds.len(), 2);
        assert_eq!(
            bonds[0],
            Bond {
                chain1: "A".to_string(),
                res1: "ARG 45[ NH1]".to_string(),
                distance: Some(2.87),
                chain2: "B".to_string(),
                res2: "GLU 12[ OE2]".to_string(),
            }
        );
        assert_eq!(bonds[1].distance, None);
        assert_eq!(bonds[1].res2, "ASN 8[ OD1]");
    }

    #[test]
    fn first_bond_chains() {
        assert_eq!(
            bond_chains(HBONDS).unwrap(),
            ("A".to_string(), "B".to_string())
        );
        assert_eq!(
            bond_chains("<BONDS></BONDS>").unwrap(),
            ("/".to_string(), "/".to_string())
        );
    }

    #[test]
    fn file_names_are_zero_based() {
        assert_eq!(BondKind::HydrogenBond.file_name(1), "hydrogenbond0.xml");
        assert_eq!(BondKind::SaltBridge.file_name(3), "saltbridge2.xml");
        assert_eq!(BondKind::SaltBridge.to_string(), "Salt bridge");
    }

    #[test]
    fn missing_file_has_no_bonds() {
        let bonds =
            parse_bond_file(Path::new("/nonexistent/saltbridge0.xml"), BondKind::SaltBridge)
                .unwrap();
        assert!(bonds.is_empty());
    }

    #[test]
    fn bad_label_is_an_error() {
        let text = "<STRUCTURE1>ARG 45</STRUCTURE1>";
        assert!(matches!(
            parse_bonds(text),
            Err(PisaError::InvalidStructure(_))
        ));
    }
}
