use nalgebra::Point3;

/// Represents a single atom read from a geometry file.
///
/// Atoms are immutable once loaded. The `index` is the 0-based position in the
/// input; the 1-based serial used in topology files is available through
/// [`Atom::serial`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// 0-based position of the atom in the input table.
    pub index: usize,
    /// The atom label, used as both atom name and atom type in the output.
    pub label: String,
    /// The element symbol as written in the input (case preserved).
    pub element: String,
    /// The 3D coordinates of the atom in the length units of the input.
    pub position: Point3<f64>,
    /// The partial atomic charge in elementary charge units.
    pub charge: f64,
}

impl Atom {
    pub fn new(
        index: usize,
        label: &str,
        element: &str,
        position: Point3<f64>,
        charge: f64,
    ) -> Self {
        Self {
            index,
            label: label.to_string(),
            element: element.to_string(),
            position,
            charge,
        }
    }

    /// Returns the 1-based serial number of the atom.
    pub fn serial(&self) -> usize {
        self.index + 1
    }
}

/// The ordered atom list of one molecular fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    atoms: Vec<Atom>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom, assigning it the next 0-based index.
    pub fn push(&mut self, label: &str, element: &str, position: Point3<f64>, charge: f64) {
        let index = self.atoms.len();
        self.atoms
            .push(Atom::new(index, label, element, position, charge));
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn total_charge(&self) -> f64 {
        self.atoms.iter().map(|a| a.charge).sum()
    }
}

impl FromIterator<(String, String, Point3<f64>, f64)> for Geometry {
    fn from_iter<I: IntoIterator<Item = (String, String, Point3<f64>, f64)>>(iter: I) -> Self {
        let mut geometry = Geometry::new();
        for (label, element, position, charge) in iter {
            geometry.push(&label, &element, position, charge);
        }
        geometry
    }
}
