use super::{load_masses, open_input, with_input_path};
use crate::cli::InspectArgs;
use crate::config::PartialConvertConfig;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};
use xyzpsf::core::io::traits::GeometryFile;
use xyzpsf::core::io::xyz::XyzFile;
use xyzpsf::core::masses::MassLookup;
use xyzpsf::core::models::topology::Topology;
use xyzpsf::workflows::convert::{ConvertError, infer_connectivity};

/// Summary of what a conversion would produce for one geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectReport {
    pub atoms: usize,
    pub declared_atoms: Option<usize>,
    pub bonds: usize,
    pub angles: usize,
    pub dihedrals: usize,
    pub total_charge: f64,
    pub total_mass: f64,
    pub composition: BTreeMap<String, usize>,
}

impl InspectReport {
    pub fn from_topology(topology: &Topology, declared_atoms: Option<usize>) -> Self {
        let mut composition = BTreeMap::new();
        for atom in topology.atoms() {
            *composition.entry(atom.element.clone()).or_insert(0) += 1;
        }
        let connectivity = topology.connectivity();
        Self {
            atoms: topology.atoms().len(),
            declared_atoms,
            bonds: connectivity.bonds.len(),
            angles: connectivity.angles.len(),
            dihedrals: connectivity.dihedrals.len(),
            total_charge: topology.geometry().total_charge(),
            total_mass: topology.total_mass(),
            composition,
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Atoms:        {}", self.atoms)?;
        let composition = self
            .composition
            .iter()
            .map(|(element, count)| format!("{element}:{count}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "Composition:  {}", composition)?;
        writeln!(f, "Bonds:        {}", self.bonds)?;
        writeln!(f, "Angles:       {}", self.angles)?;
        writeln!(f, "Dihedrals:    {}", self.dihedrals)?;
        writeln!(f, "Total charge: {:.6}", self.total_charge)?;
        write!(f, "Total mass:   {:.3}", self.total_mass)
    }
}

/// Reads a geometry and builds the report without rendering any topology.
pub fn inspect(
    reader: &mut impl std::io::BufRead,
    bond_threshold: f64,
    masses: &impl MassLookup,
) -> std::result::Result<InspectReport, ConvertError> {
    let (geometry, metadata) = XyzFile::read_from(reader)?;
    let connectivity = infer_connectivity(&geometry, bond_threshold);
    let topology = Topology::assemble(geometry, connectivity, masses)?;
    Ok(InspectReport::from_topology(&topology, metadata.declared_count))
}

pub fn run(args: InspectArgs) -> Result<()> {
    let settings =
        PartialConvertConfig::load_optional(args.config.as_deref())?.merge_with_inspect(&args)?;
    let masses = load_masses(settings.mass_table.as_deref())?;
    let mut reader = open_input(&args.file)?;

    let report = inspect(&mut reader, settings.bond_threshold, &masses)
        .map_err(with_input_path(&args.file))?;
    info!(
        "Inspected {} atom(s) with bond threshold {}",
        report.atoms, settings.bond_threshold
    );
    if let Some(declared) = report.declared_atoms.filter(|&d| d != report.atoms) {
        warn!(
            "Header declares {} atom(s) but {} atom row(s) were read.",
            declared, report.atoms
        );
    }

    println!("File:         {}", args.file.display());
    println!("{}", report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use xyzpsf::core::masses::{MassError, StandardMasses};

    const WATER_XYZ: &str = "\
3
water, oxygen first
O1  0.000  0.000  0.000 -0.834 O
H1  0.957  0.000  0.000  0.417 H
H2 -0.240  0.927  0.000  0.417 H
";

    #[test]
    fn reports_counts_and_totals() {
        let report = inspect(&mut Cursor::new(WATER_XYZ), 1.2, &StandardMasses).unwrap();

        assert_eq!(report.atoms, 3);
        assert_eq!(report.declared_atoms, Some(3));
        assert_eq!(report.bonds, 2);
        assert_eq!(report.angles, 1);
        assert_eq!(report.dihedrals, 0);
        assert!(report.total_charge.abs() < 1e-12);
        assert!((report.total_mass - (15.999 + 2.0 * 1.008)).abs() < 1e-9);
        assert_eq!(report.composition.get("H"), Some(&2));
        assert_eq!(report.composition.get("O"), Some(&1));
    }

    #[test]
    fn report_display_lists_every_field() {
        let report = inspect(&mut Cursor::new(WATER_XYZ), 1.2, &StandardMasses).unwrap();
        let text = report.to_string();

        assert!(text.contains("Atoms:        3\n"));
        assert!(text.contains("Composition:  H:2 O:1\n"));
        assert!(text.contains("Bonds:        2\n"));
        assert!(text.contains("Angles:       1\n"));
        assert!(text.contains("Dihedrals:    0\n"));
        assert!(text.contains("Total mass:   18.01"));
    }

    #[test]
    fn small_threshold_yields_no_connectivity() {
        let report = inspect(&mut Cursor::new(WATER_XYZ), 0.6, &StandardMasses).unwrap();
        assert_eq!((report.bonds, report.angles, report.dihedrals), (0, 0, 0));
    }

    #[test]
    fn unknown_element_is_reported() {
        let result = inspect(&mut Cursor::new("1\n\nZ1 0 0 0 0 Zz\n"), 1.6, &StandardMasses);
        assert!(matches!(
            result,
            Err(ConvertError::Mass(MassError::UnknownElement { .. }))
        ));
    }
}
