//! Interfacing residues and their continuous numbering.

use crate::chains::ChainRoles;
use crate::error::{PisaError, Result};
use crate::xml::{parse_value, read_xml, scan, Event};
use std::path::Path;
use tracing::debug;

/// Chain, name and number parsed from a residue label like `A:LEU 12A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueId {
    /// Chain identifier
    pub chain: String,
    /// Residue name, e.g. `LEU`
    pub resn: String,
    /// Residue number
    pub resi: i32,
    /// Insertion code, empty if none
    pub insertion: String,
}

impl ResidueId {
    /// Parse a PISA structure label.
    pub fn parse(label: &str) -> Result<Self> {
        let invalid = || PisaError::InvalidStructure(label.to_string());
        let (chain, rest) = label.split_once(':').ok_or_else(invalid)?;
        let rest = rest.trim();

        // Usually `LEU 12`; fall back to the first digit for labels like `LEU12`
        let (resn, number) = match rest.rsplit_once(char::is_whitespace) {
            Some((resn, number)) => (resn.trim(), number),
            None => {
                let idx = rest.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
                let idx = match rest[..idx].ends_with('-') {
                    true => idx - 1,
                    false => idx,
                };
                rest.split_at(idx)
            }
        };

        let digits_end = number
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
            .map_or(number.len(), |(i, _)| i);
        let resi = number[..digits_end].parse::<i32>().map_err(|_| invalid())?;

        Ok(Self {
            chain: chain.trim().to_string(),
            resn: resn.to_string(),
            resi,
            insertion: number[digits_end..].to_string(),
        })
    }
}

/// One interfacing residue of `residue0.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueRecord {
    /// Side of the interface, 1 or 2
    pub side: u8,
    /// Parsed `STRUCTURE` label
    pub id: ResidueId,
    /// Solvent accessible area in Å²
    pub sasa: f64,
    /// Buried surface area in Å²
    pub bsa: f64,
    /// Buried area score, 0 to 10
    pub bsa_score: f64,
    /// Solvation energy effect, kcal/mol
    pub solvation_energy: f64,
    /// Position on a single axis spanning all chains
    pub continuous_resi: i32,
}

#[derive(Default)]
struct PartialResidue {
    structure: Option<String>,
    sasa: Option<f64>,
    bsa: Option<f64>,
    bsa_score: Option<f64>,
    solvation_energy: Option<f64>,
}

impl PartialResidue {
    fn finish(self, side: u8) -> Result<ResidueRecord> {
        let structure = self.structure.ok_or_else(|| PisaError::MissingField {
            structure: "<unnamed>".to_string(),
            tag: "STRUCTURE".to_string(),
        })?;
        let missing = |tag: &str| PisaError::MissingField {
            structure: structure.clone(),
            tag: tag.to_string(),
        };
        let id = ResidueId::parse(&structure)?;
        let resi = id.resi;

        Ok(ResidueRecord {
            side,
            sasa: self.sasa.ok_or_else(|| missing("SOLVENTACCESSIBLEAREA"))?,
            bsa: self.bsa.ok_or_else(|| missing("BURIEDSURFACEAREA"))?,
            bsa_score: self.bsa_score.ok_or_else(|| missing("BURIEDSURFACEAREASCORE"))?,
            solvation_energy: self
                .solvation_energy
                .ok_or_else(|| missing("SOLVATIONENERGY"))?,
            id,
            continuous_resi: resi,
        })
    }
}

/// Parse the interfacing residues of a residue export.
/// All residues of side 1 come before those of side 2. `continuous_resi` equals `resi`
/// until [`assign_continuous`] is applied.
pub fn parse_residues(text: &str) -> Result<Vec<ResidueRecord>> {
    let mut sides: [Vec<ResidueRecord>; 2] = [Vec::new(), Vec::new()];
    let mut side: Option<u8> = None;
    let mut current: Option<PartialResidue> = None;

    for event in scan(text)? {
        match event {
            Event::Open("RESIDUE1") => side = Some(1),
            Event::Open("RESIDUE2") => side = Some(2),
            Event::Close("RESIDUE1") | Event::Close("RESIDUE2") => side = None,
            Event::Open("RESIDUE") if side.is_some() => current = Some(PartialResidue::default()),
            Event::Close("RESIDUE") => {
                if let (Some(s), Some(partial)) = (side, current.take()) {
                    sides[usize::from(s - 1)].push(partial.finish(s)?);
                }
            }
            Event::Leaf { name, value } => {
                let Some(partial) = current.as_mut() else {
                    continue;
                };
                match name {
                    "STRUCTURE" => partial.structure = Some(value),
                    "SOLVENTACCESSIBLEAREA" => partial.sasa = parse_value(name, &value)?,
                    "BURIEDSURFACEAREA" => partial.bsa = parse_value(name, &value)?,
                    "BURIEDSURFACEAREASCORE" => partial.bsa_score = parse_value(name, &value)?,
                    "SOLVATIONENERGY" => partial.solvation_energy = parse_value(name, &value)?,
                    _ => {}
                }
            }
            _ => {}
        }
    }

    let [mut side1, side2] = sides;
    side1.extend(side2);
    Ok(side1)
}

/// Place all chains on one residue axis.
/// Binder residues keep their numbers; all others are shifted past the last binder residue.
pub fn assign_continuous(residues: &mut [ResidueRecord], roles: &ChainRoles) {
    let shift = residues
        .iter()
        .filter(|r| roles.is_binder(&r.id.chain))
        .map(|r| r.id.resi)
        .max()
        .unwrap_or(0);
    for r in residues.iter_mut() {
        r.continuous_resi = match roles.is_binder(&r.id.chain) {
            true => r.id.resi,
            false => r.id.resi.saturating_add(shift),
        };
    }
}

/// Read a residue export and number its residues continuously.
pub fn read_residues(path: &Path, roles: &ChainRoles) -> Result<Vec<ResidueRecord>> {
    let mut residues = parse_residues(&read_xml(path)?)?;
    assign_continuous(&mut residues, roles);
    debug!("Parsed {} residue(s) from {}", residues.len(), path.display());
    Ok(residues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue_xml(structure: &str, energy: &str) -> String {
        format!(
            "<RESIDUE>
<STRUCTURE>{structure}</STRUCTURE>
<SOLVENTACCESSIBLEAREA>120.5</SOLVENTACCESSIBLEAREA>
<BURIEDSURFACEAREA>40.25</BURIEDSURFACEAREA>
<BURIEDSURFACEAREASCORE>3</BURIEDSURFACEAREASCORE>
<SOLVATIONENERGY>{energy}</SOLVATIONENERGY>
</RESIDUE>
"
        )
    }

    #[test]
    fn parses_structure_labels() {
        let id = ResidueId::parse("A:LEU 12").unwrap();
        assert_eq!(
            id,
            ResidueId {
                chain: "A".to_string(),
                resn: "LEU".to_string(),
                resi: 12,
                insertion: String::new(),
            }
        );

        let id = ResidueId::parse("B:GLY 100A").unwrap();
        assert_eq!((id.resi, id.insertion.as_str()), (100, "A"));

        let id = ResidueId::parse("H:SER -3").unwrap();
        assert_eq!(id.resi, -3);

        let id = ResidueId::parse("C:TRP27").unwrap();
        assert_eq!((id.resn.as_str(), id.resi), ("TRP", 27));

        assert!(ResidueId::parse("LEU 12").is_err());
        assert!(ResidueId::parse("A:LEU").is_err());
    }

    #[test]
    fn side_one_comes_first() {
        let text = format!(
            "<PISA><RESIDUE2>{}</RESIDUE2><RESIDUE1>{}{}</RESIDUE1></PISA>",
            residue_xml("B:ASP 5", "0.4"),
            residue_xml("A:LEU 12", "-1.2"),
            residue_xml("A:ILE 30", "-0.5"),
        );
        let residues = parse_residues(&text).unwrap();
        assert_eq!(residues.len(), 3);
        assert_eq!(residues[0].side, 1);
        assert_eq!(residues[0].id.resi, 12);
        assert_eq!(residues[1].id.resi, 30);
        assert_eq!(residues[2].side, 2);
        assert_eq!(residues[2].solvation_energy, 0.4);
        assert_eq!(residues[0].bsa, 40.25);
        assert_eq!(residues[0].bsa_score, 3.0);
    }

    #[test]
    fn continuous_numbering() {
        let text = format!(
            "<RESIDUE1>{}{}</RESIDUE1><RESIDUE2>{}</RESIDUE2>",
            residue_xml("A:LEU 12", "-1.2"),
            residue_xml("A:ILE 30", "-0.5"),
            residue_xml("B:ASP 5", "0.4"),
        );
        let mut residues = parse_residues(&text).unwrap();
        assign_continuous(&mut residues, &ChainRoles::default());
        let positions: Vec<i32> = residues.iter().map(|r| r.continuous_resi).collect();
        assert_eq!(positions, vec![12, 30, 35]);

        // Without binder residues nothing moves
        let roles = ChainRoles::parse("H/B").unwrap();
        assign_continuous(&mut residues, &roles);
        let positions: Vec<i32> = residues.iter().map(|r| r.continuous_resi).collect();
        assert_eq!(positions, vec![12, 30, 5]);
    }

    #[test]
    fn continuous_numbering_saturates() {
        let text = format!(
            "<RESIDUE1>{}</RESIDUE1><RESIDUE2>{}</RESIDUE2>",
            residue_xml("A:LEU 2147483000", "-1.2"),
            residue_xml("B:ASP 2000", "0.4"),
        );
        let mut residues = parse_residues(&text).unwrap();
        assign_continuous(&mut residues, &ChainRoles::default());
        assert_eq!(residues[1].continuous_resi, i32::MAX);
    }

    #[test]
    fn missing_field_is_reported() {
        let text = "<RESIDUE1><RESIDUE><STRUCTURE>A:LEU 12</STRUCTURE></RESIDUE></RESIDUE1>";
        match parse_residues(text) {
            Err(PisaError::MissingField { structure, tag }) => {
                assert_eq!(structure, "A:LEU 12");
                assert_eq!(tag, "SOLVENTACCESSIBLEAREA");
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }
}
