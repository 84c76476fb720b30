use super::atom::{Atom, Geometry};
use crate::core::masses::{MassError, MassLookup};

/// A connectivity term spanning a fixed number of atoms.
///
/// Indices are 0-based internally; [`Term::serials`] yields the 1-based form
/// used in topology files.
pub trait Term {
    /// Number of atoms in the term (2 for bonds, 3 for angles, 4 for dihedrals).
    const ARITY: usize;

    fn indices(&self) -> &[usize];

    fn serials(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices().iter().map(|&i| i + 1)
    }
}

/// A bond between two atoms, stored canonically with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond(pub [usize; 2]);

/// An angle `i - j - k` centered on `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Angle(pub [usize; 3]);

/// A proper dihedral `i - j - k - l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dihedral(pub [usize; 4]);

impl Term for Bond {
    const ARITY: usize = 2;
    fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl Term for Angle {
    const ARITY: usize = 3;
    fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl Term for Dihedral {
    const ARITY: usize = 4;
    fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// Flattens a list of terms into the 1-based index sequence written to topology files.
pub fn flatten_serials<T: Term>(terms: &[T]) -> Vec<usize> {
    let mut flat = Vec::with_capacity(terms.len() * T::ARITY);
    for term in terms {
        flat.extend(term.serials());
    }
    flat
}

/// Bonds, angles and dihedrals in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connectivity {
    pub bonds: Vec<Bond>,
    pub angles: Vec<Angle>,
    pub dihedrals: Vec<Dihedral>,
}

impl Connectivity {
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty() && self.angles.is_empty() && self.dihedrals.is_empty()
    }
}

/// The complete topology of one fragment, ready for serialization.
///
/// Every atom carries its resolved mass, so writing a `Topology` cannot fail on
/// a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    geometry: Geometry,
    masses: Vec<f64>,
    connectivity: Connectivity,
}

impl Topology {
    /// Assembles a topology, resolving each atom's mass by its lowercased element symbol.
    ///
    /// # Errors
    ///
    /// Returns [`MassError::UnknownElement`] for the first atom whose element is
    /// not known to `masses`.
    pub fn assemble(
        geometry: Geometry,
        connectivity: Connectivity,
        masses: &impl MassLookup,
    ) -> Result<Self, MassError> {
        let resolved = geometry
            .atoms()
            .iter()
            .map(|atom| {
                masses
                    .mass(&atom.element.to_lowercase())
                    .map_err(|e| e.at_atom(atom.serial()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            geometry,
            masses: resolved,
            connectivity,
        })
    }

    pub fn atoms(&self) -> &[Atom] {
        self.geometry.atoms()
    }

    /// Iterates atoms together with their resolved masses.
    pub fn atoms_with_masses(&self) -> impl Iterator<Item = (&Atom, f64)> + '_ {
        self.geometry
            .atoms()
            .iter()
            .zip(self.masses.iter().copied())
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::masses::StandardMasses;
    use nalgebra::Point3;

    #[test]
    fn serials_are_one_based() {
        let angle = Angle([0, 1, 2]);
        assert_eq!(angle.serials().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn flatten_serials_concatenates_in_order() {
        let bonds = vec![Bond([0, 1]), Bond([1, 2])];
        assert_eq!(flatten_serials(&bonds), vec![1, 2, 2, 3]);
        assert!(flatten_serials::<Dihedral>(&[]).is_empty());
    }

    #[test]
    fn assemble_resolves_masses_case_insensitively() {
        let mut geometry = Geometry::new();
        geometry.push("O1", "O", Point3::origin(), -0.8);
        geometry.push("H1", "h", Point3::new(0.96, 0.0, 0.0), 0.4);

        let topology =
            Topology::assemble(geometry, Connectivity::default(), &StandardMasses).unwrap();
        let masses: Vec<f64> = topology.atoms_with_masses().map(|(_, m)| m).collect();

        assert!((masses[0] - 15.999).abs() < 1e-9);
        assert!((masses[1] - 1.008).abs() < 1e-9);
        assert!((topology.total_mass() - 17.007).abs() < 1e-9);
    }

    #[test]
    fn assemble_reports_first_unknown_element_with_serial() {
        let mut geometry = Geometry::new();
        geometry.push("C1", "C", Point3::origin(), 0.0);
        geometry.push("X1", "Xx", Point3::new(1.0, 0.0, 0.0), 0.0);

        let err =
            Topology::assemble(geometry, Connectivity::default(), &StandardMasses).unwrap_err();
        match err {
            MassError::UnknownElement { symbol, atom } => {
                assert_eq!(symbol, "xx");
                assert_eq!(atom, Some(2));
            }
        }
    }
}
