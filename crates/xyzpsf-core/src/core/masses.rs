use phf::{Map, phf_map};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Standard atomic weights keyed by lowercase element symbol.
static STANDARD_MASSES: Map<&'static str, f64> = phf_map! {
    "h" => 1.008, "he" => 4.003,
    "li" => 6.94, "be" => 9.012, "b" => 10.81, "c" => 12.011, "n" => 14.007,
    "o" => 15.999, "f" => 18.998, "ne" => 20.180,
    "na" => 22.990, "mg" => 24.305, "al" => 26.982, "si" => 28.085, "p" => 30.974,
    "s" => 32.06, "cl" => 35.45, "ar" => 39.948,
    "k" => 39.098, "ca" => 40.078, "sc" => 44.956, "ti" => 47.867, "v" => 50.942,
    "cr" => 51.996, "mn" => 54.938, "fe" => 55.845, "co" => 58.933, "ni" => 58.693,
    "cu" => 63.546, "zn" => 65.38, "ga" => 69.723, "ge" => 72.630, "as" => 74.922,
    "se" => 78.971, "br" => 79.904, "kr" => 83.798,
    "rb" => 85.468, "sr" => 87.62, "y" => 88.906, "zr" => 91.224, "nb" => 92.906,
    "mo" => 95.95, "tc" => 98.0, "ru" => 101.07, "rh" => 102.906, "pd" => 106.42,
    "ag" => 107.868, "cd" => 112.414, "in" => 114.818, "sn" => 118.710, "sb" => 121.760,
    "te" => 127.60, "i" => 126.904, "xe" => 131.293,
    "cs" => 132.905, "ba" => 137.327, "la" => 138.905, "ce" => 140.116, "pr" => 140.908,
    "nd" => 144.242, "pm" => 145.0, "sm" => 150.36, "eu" => 151.964, "gd" => 157.25,
    "tb" => 158.925, "dy" => 162.500, "ho" => 164.930, "er" => 167.259, "tm" => 168.934,
    "yb" => 173.045, "lu" => 174.967, "hf" => 178.49, "ta" => 180.948, "w" => 183.84,
    "re" => 186.207, "os" => 190.23, "ir" => 192.217, "pt" => 195.084, "au" => 196.967,
    "hg" => 200.592, "tl" => 204.38, "pb" => 207.2, "bi" => 208.980, "po" => 209.0,
    "at" => 210.0, "rn" => 222.0,
    "fr" => 223.0, "ra" => 226.0, "ac" => 227.0, "th" => 232.038, "pa" => 231.036,
    "u" => 238.029,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MassError {
    #[error("Unknown element '{symbol}'{}", describe_atom(.atom))]
    UnknownElement { symbol: String, atom: Option<usize> },
}

fn describe_atom(atom: &Option<usize>) -> String {
    atom.map(|serial| format!(" at atom {}", serial))
        .unwrap_or_default()
}

impl MassError {
    pub fn unknown(symbol: &str) -> Self {
        Self::UnknownElement {
            symbol: symbol.to_string(),
            atom: None,
        }
    }

    /// Attaches the 1-based serial of the atom whose lookup failed.
    pub fn at_atom(self, serial: usize) -> Self {
        match self {
            Self::UnknownElement { symbol, .. } => Self::UnknownElement {
                symbol,
                atom: Some(serial),
            },
        }
    }
}

/// Resolves an atomic mass from a lowercase element symbol.
pub trait MassLookup {
    /// # Errors
    ///
    /// Returns [`MassError::UnknownElement`] if the symbol is not in the table.
    fn mass(&self, symbol: &str) -> Result<f64, MassError>;
}

/// The built-in table of standard atomic weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMasses;

impl MassLookup for StandardMasses {
    fn mass(&self, symbol: &str) -> Result<f64, MassError> {
        STANDARD_MASSES
            .get(symbol)
            .copied()
            .ok_or_else(|| MassError::unknown(symbol))
    }
}

/// User-supplied mass overrides layered over [`StandardMasses`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassTable {
    overrides: HashMap<String, f64>,
}

impl MassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads overrides from a TOML file mapping element symbols to masses.
    ///
    /// Symbols are lowercased on load, so `Cd = 112.41` and `cd = 112.41` are equivalent.
    pub fn load(path: &Path) -> Result<Self, MassTableLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| MassTableLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: HashMap<String, f64> =
            toml::from_str(&content).map_err(|e| MassTableLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut table = Self::new();
        for (symbol, mass) in raw {
            if !mass.is_finite() || mass <= 0.0 {
                return Err(MassTableLoadError::InvalidMass { symbol, mass });
            }
            table.insert(&symbol, mass);
        }
        Ok(table)
    }

    pub fn insert(&mut self, symbol: &str, mass: f64) {
        self.overrides.insert(symbol.to_lowercase(), mass);
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl MassLookup for MassTable {
    fn mass(&self, symbol: &str) -> Result<f64, MassError> {
        match self.overrides.get(symbol) {
            Some(&mass) => Ok(mass),
            None => StandardMasses.mass(symbol),
        }
    }
}

#[derive(Debug, Error)]
pub enum MassTableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid mass {mass} for element '{symbol}'")]
    InvalidMass { symbol: String, mass: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn standard_masses_cover_common_elements() {
        assert_eq!(StandardMasses.mass("h"), Ok(1.008));
        assert_eq!(StandardMasses.mass("c"), Ok(12.011));
        assert_eq!(StandardMasses.mass("cd"), Ok(112.414));
        assert_eq!(StandardMasses.mass("se"), Ok(78.971));
        assert_eq!(StandardMasses.mass("pb"), Ok(207.2));
    }

    #[test]
    fn standard_masses_expect_lowercase_symbols() {
        assert!(StandardMasses.mass("Cd").is_err());
    }

    #[test]
    fn unknown_symbol_fails_with_unknown_element() {
        let err = StandardMasses.mass("zz").unwrap_err();
        assert_eq!(err, MassError::unknown("zz"));
        assert_eq!(err.to_string(), "Unknown element 'zz'");
        assert_eq!(
            err.at_atom(7).to_string(),
            "Unknown element 'zz' at atom 7"
        );
    }

    #[test]
    fn mass_table_overrides_and_falls_back() {
        let mut table = MassTable::new();
        table.insert("Cd", 112.0);

        assert_eq!(table.mass("cd"), Ok(112.0));
        assert_eq!(table.mass("se"), Ok(78.971));
        assert!(table.mass("qq").is_err());
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("masses.toml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Cs = 132.9\nbr = 79.9").unwrap();

        let table = MassTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.mass("cs"), Ok(132.9));
        assert_eq!(table.mass("br"), Ok(79.9));
    }

    #[test]
    fn load_rejects_non_positive_mass() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("masses.toml");
        std::fs::write(&path, "h = -1.0\n").unwrap();

        let result = MassTable::load(&path);
        assert!(matches!(
            result,
            Err(MassTableLoadError::InvalidMass { ref symbol, .. }) if symbol == "h"
        ));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = MassTable::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(MassTableLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("masses.toml");
        std::fs::write(&path, "h = \"light\"\n").unwrap();

        let result = MassTable::load(&path);
        assert!(matches!(result, Err(MassTableLoadError::Toml { .. })));
    }
}
