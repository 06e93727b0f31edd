//! The interface table and its interface summaries.

use crate::bonds::{bond_chains, BondKind};
use crate::error::{PisaError, Result};
use crate::xml::{parse_value, read_xml, scan, Event};
use std::path::Path;
use tracing::{debug, warn};

/// Chain label used when no bond file names the interface partners.
pub const UNKNOWN_CHAIN: &str = "?";

/// One row of `interfacetable.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRecord {
    /// 1-based interface number
    pub interface: u32,
    /// Chain of the first side, [`UNKNOWN_CHAIN`] without a bond file
    pub chain1: String,
    /// Chain of the second side
    pub chain2: String,
    /// Number of interfacing residues on the first side
    pub nres1: Option<i64>,
    /// Number of interfacing residues on the second side
    pub nres2: Option<i64>,
    /// Total solvent accessible surface of the first side
    pub sasa1: Option<f64>,
    /// Total solvent accessible surface of the second side
    pub sasa2: Option<f64>,
    /// Interface area in Å²
    pub interface_area: Option<f64>,
    /// Solvation free energy gain on formation, kcal/mol
    pub delta_g: Option<f64>,
    /// P-value of `delta_g`
    pub delta_g_pvalue: Option<f64>,
    /// Number of hydrogen bonds
    pub n_hbonds: Option<i64>,
    /// Number of salt bridges
    pub n_saltbridges: Option<i64>,
    /// Number of disulfide bonds
    pub n_disulfides: Option<i64>,
    /// Complexation significance score
    pub css: Option<f64>,
    /// Mean interface area of both sides from `interfacesummary{k}.xml`
    pub interface_surface: Option<f64>,
}

impl InterfaceRecord {
    fn new(interface: u32) -> Self {
        Self {
            interface,
            chain1: UNKNOWN_CHAIN.to_string(),
            chain2: UNKNOWN_CHAIN.to_string(),
            nres1: None,
            nres2: None,
            sasa1: None,
            sasa2: None,
            interface_area: None,
            delta_g: None,
            delta_g_pvalue: None,
            n_hbonds: None,
            n_saltbridges: None,
            n_disulfides: None,
            css: None,
            interface_surface: None,
        }
    }
}

/// Parse the records of an interface table.
/// Chains and interface surfaces live in companion files and are left unresolved here.
pub fn parse_interface_table(text: &str) -> Result<Vec<InterfaceRecord>> {
    let mut records: Vec<InterfaceRecord> = Vec::new();

    for event in scan(text)? {
        let Event::Leaf { name, value } = event else {
            continue;
        };
        if name == "INTERFACENO" {
            let interface = parse_value::<u32>(name, &value)?.ok_or_else(|| {
                PisaError::InvalidValue {
                    tag: name.to_string(),
                    value: value.clone(),
                }
            })?;
            records.push(InterfaceRecord::new(interface));
            continue;
        }

        // Fields before the first record carry no interface
        let Some(record) = records.last_mut() else {
            continue;
        };
        match name {
            "INTERFACENRESIDUES1" => record.nres1 = parse_value(name, &value)?,
            "INTERFACENRESIDUES2" => record.nres2 = parse_value(name, &value)?,
            "TOTALSURFACEAREA1" => record.sasa1 = parse_value(name, &value)?,
            "TOTALSURFACEAREA2" => record.sasa2 = parse_value(name, &value)?,
            "INTERFACEAREA" => record.interface_area = parse_value(name, &value)?,
            "INTERFACEDELTAG" => record.delta_g = parse_value(name, &value)?,
            "INTERFACEDELTAGPVALUE" => record.delta_g_pvalue = parse_value(name, &value)?,
            "INTERFACENHBONDS" => record.n_hbonds = parse_value(name, &value)?,
            "INTERFACENSALTBRIDGES" => record.n_saltbridges = parse_value(name, &value)?,
            "INTERFACENDISULFIDEBONDS" => record.n_disulfides = parse_value(name, &value)?,
            "INTERFACECSS" => record.css = parse_value(name, &value)?,
            _ => {}
        }
    }

    Ok(records)
}

/// Mean of the interface areas reported for both sides of an interface summary.
///
/// Values before the first `STRUCTURE2` belong to the first side; the last area seen
/// on each side wins.
pub fn parse_interface_summary(text: &str) -> Result<Option<f64>> {
    let mut side2 = false;
    let mut areas: (Option<f64>, Option<f64>) = (None, None);

    for event in scan(text)? {
        let name = match &event {
            Event::Open(name) | Event::Close(name) => *name,
            Event::Leaf { name, .. } => *name,
        };
        if name == "STRUCTURE2" {
            side2 = true;
        }
        if let Event::Leaf { name, value } = event {
            if name == "INTERFACEAREA" {
                let area = parse_value(name, &value)?;
                if side2 {
                    areas.1 = area.or(areas.1);
                } else {
                    areas.0 = area.or(areas.0);
                }
            }
        }
    }

    Ok(match areas {
        (Some(a1), Some(a2)) => Some((a1 + a2) / 2.0),
        _ => None,
    })
}

/// Read an interface table and resolve chains and surfaces from the files next to it.
pub fn read_interface_table(path: &Path) -> Result<Vec<InterfaceRecord>> {
    let mut records = parse_interface_table(&read_xml(path)?)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    for record in records.iter_mut() {
        let bond_file = [BondKind::HydrogenBond, BondKind::SaltBridge]
            .iter()
            .map(|kind| dir.join(kind.file_name(record.interface)))
            .find(|f| f.is_file());
        match bond_file {
            Some(f) => {
                (record.chain1, record.chain2) = bond_chains(&read_xml(&f)?)?;
            }
            None => warn!(
                "No bond file for interface {} in {}, chains are unknown",
                record.interface,
                dir.display()
            ),
        }

        let summary = dir.join(format!(
            "interfacesummary{}.xml",
            record.interface.saturating_sub(1)
        ));
        if summary.is_file() {
            record.interface_surface = parse_interface_summary(&read_xml(&summary)?)?;
        }
    }

    debug!("Parsed {} interface(s) from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "<?xml version=\"1.0\"?>
<PISA_INTERFACES>
<STATUS>Ok</STATUS>
<INTERFACE>
<INTERFACENO>1</INTERFACENO>
<INTERFACENRESIDUES1>21</INTERFACENRESIDUES1>
<TOTALSURFACEAREA1>5120.5</TOTALSURFACEAREA1>
<INTERFACENRESIDUES2>19</INTERFACENRESIDUES2>
<TOTALSURFACEAREA2>7311.2</TOTALSURFACEAREA2>
<INTERFACEAREA>812.4</INTERFACEAREA>
<INTERFACEDELTAG>-9.3</INTERFACEDELTAG>
<INTERFACEDELTAGPVALUE>0.121</INTERFACEDELTAGPVALUE>
<INTERFACENHBONDS>7</INTERFACENHBONDS>
<INTERFACENSALTBRIDGES>2</INTERFACENSALTBRIDGES>
<INTERFACENDISULFIDEBONDS>0</INTERFACENDISULFIDEBONDS>
<INTERFACECSS>1.000</INTERFACECSS>
</INTERFACE>
<INTERFACE>
<INTERFACENO>2</INTERFACENO>
<INTERFACEAREA>120.0</INTERFACEAREA>
<INTERFACECSS>0.000</INTERFACECSS>
</INTERFACE>
</PISA_INTERFACES>
";

    #[test]
    fn parses_records_without_shifting() {
        let records = parse_interface_table(TABLE).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.interface, 1);
        assert_eq!(first.nres1, Some(21));
        assert_eq!(first.nres2, Some(19));
        assert_eq!(first.sasa2, Some(7311.2));
        assert_eq!(first.interface_area, Some(812.4));
        assert_eq!(first.delta_g, Some(-9.3));
        assert_eq!(first.delta_g_pvalue, Some(0.121));
        assert_eq!(first.n_hbonds, Some(7));
        assert_eq!(first.n_saltbridges, Some(2));
        assert_eq!(first.n_disulfides, Some(0));
        assert_eq!(first.chain1, UNKNOWN_CHAIN);

        // Second record has gaps, which stay empty
        let second = &records[1];
        assert_eq!(second.interface, 2);
        assert_eq!(second.nres1, None);
        assert_eq!(second.interface_area, Some(120.0));
        assert_eq!(second.css, Some(0.0));
    }

    #[test]
    fn bad_numbers_name_the_tag() {
        let text = "<INTERFACENO>1</INTERFACENO><INTERFACENHBONDS>many</INTERFACENHBONDS>";
        match parse_interface_table(text) {
            Err(PisaError::InvalidValue { tag, value }) => {
                assert_eq!(tag, "INTERFACENHBONDS");
                assert_eq!(value, "many");
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[test]
    fn summary_averages_both_sides() {
        let text = "<INTERFACESUMMARY>
<STRUCTURE1>A</STRUCTURE1>
<INTERFACEAREA>800.0</INTERFACEAREA>
<INTERFACEAREA>810.0</INTERFACEAREA>
<STRUCTURE2>B</STRUCTURE2>
<INTERFACEAREA>790.0</INTERFACEAREA>
</INTERFACESUMMARY>";
        assert_eq!(parse_interface_summary(text).unwrap(), Some(800.0));

        let one_sided = "<STRUCTURE1>A</STRUCTURE1><INTERFACEAREA>800.0</INTERFACEAREA>";
        assert_eq!(parse_interface_summary(one_sided).unwrap(), None);
    }

    #[test]
    fn resolves_companion_files() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = Path::new(root).join("test-data/pisa/1abc/interfacetable.xml");

        let records = read_interface_table(&path).unwrap();
        assert_eq!(records.len(), 3);

        // Chains from the hydrogen bond file
        assert_eq!((records[0].chain1.as_str(), records[0].chain2.as_str()), ("A", "B"));
        assert_eq!(records[0].interface_surface, Some(805.0));

        // Only a salt bridge file exists for the second interface
        assert_eq!((records[1].chain1.as_str(), records[1].chain2.as_str()), ("A", "C"));
        assert_eq!(records[1].interface_surface, None);

        // No bond files at all
        assert_eq!(records[2].chain1, UNKNOWN_CHAIN);
        assert_eq!(records[2].chain2, UNKNOWN_CHAIN);
    }
}
