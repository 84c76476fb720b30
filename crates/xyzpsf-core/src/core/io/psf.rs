use crate::core::io::traits::TopologyFile;
use crate::core::models::topology::{Angle, Bond, Dihedral, Term, Topology, flatten_serials};
use serde::Deserialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "PSF generated by xyz2psf";

const BONDS_PER_ROW: usize = 8;
const ANGLES_PER_ROW: usize = 9;
const DIHEDRALS_PER_ROW: usize = 8;

const TRAILER: &str = "\n\n\n         0 !NIMPHI\n\n\n         0 !NDON\n\n\n         0 !NACC\n\n\n         0 !NNB\n\n\n\n";

/// How index lists are broken into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowWrap {
    /// Full rows, then a closing row of the last `per_row - len % per_row`
    /// entries. Repeats entries from the previous row when the list does not
    /// divide evenly and is longer than one row.
    #[default]
    Legacy,
    /// Full rows, then a closing row of the remaining `len % per_row` entries.
    Complete,
}

#[derive(Debug, Error)]
#[error("Invalid row wrap mode '{0}' (expected 'legacy' or 'complete')")]
pub struct ParseRowWrapError(String);

impl FromStr for RowWrap {
    type Err = ParseRowWrapError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "complete" => Ok(Self::Complete),
            _ => Err(ParseRowWrapError(s.to_string())),
        }
    }
}

impl fmt::Display for RowWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Legacy => "legacy",
                Self::Complete => "complete",
            }
        )
    }
}

impl RowWrap {
    /// Splits `values` into rows of at most `per_row` entries.
    pub fn rows<'a>(&self, values: &'a [usize], per_row: usize) -> Vec<&'a [usize]> {
        match self {
            Self::Complete => values.chunks(per_row).collect(),
            Self::Legacy => {
                let len = values.len();
                let mut rows: Vec<&[usize]> = (0..len.saturating_sub(per_row))
                    .step_by(per_row)
                    .map(|start| &values[start..start + per_row])
                    .collect();
                // Lists shorter than the remainder are written whole.
                let rest = per_row - len % per_row;
                rows.push(&values[len.saturating_sub(rest)..]);
                rows
            }
        }
    }

    /// Returns `true` if the rows repeat or omit entries of `len` values.
    pub fn is_lossy(&self, len: usize, per_row: usize) -> bool {
        match self {
            Self::Complete => false,
            Self::Legacy => len % per_row != 0 && 2 * len > per_row,
        }
    }
}

/// Rendering options for the PSF atom and connectivity blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct PsfOptions {
    /// Fragment id written into the molecule and residue columns.
    pub fragment_id: i64,
    /// Omit bond, angle and dihedral rows, keeping only the count lines.
    pub isolated: bool,
    pub title: String,
    pub row_wrap: RowWrap,
}

impl PsfOptions {
    pub fn new(fragment_id: i64) -> Self {
        Self {
            fragment_id,
            isolated: false,
            title: DEFAULT_TITLE.to_string(),
            row_wrap: RowWrap::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PsfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Writer for the extended PSF topology layout read by CP2K and CHARMM-style tools.
pub struct PsfFile;

impl PsfFile {
    /// Names the connectivity sections whose rows would repeat or omit entries
    /// under `options`. Always empty for isolated output.
    pub fn lossy_sections(topology: &Topology, options: &PsfOptions) -> Vec<&'static str> {
        if options.isolated {
            return Vec::new();
        }
        let connectivity = topology.connectivity();
        let sections = [
            ("NBOND", connectivity.bonds.len() * Bond::ARITY, BONDS_PER_ROW),
            ("NTHETA", connectivity.angles.len() * Angle::ARITY, ANGLES_PER_ROW),
            ("NPHI", connectivity.dihedrals.len() * Dihedral::ARITY, DIHEDRALS_PER_ROW),
        ];
        sections
            .into_iter()
            .filter(|&(_, len, per_row)| options.row_wrap.is_lossy(len, per_row))
            .map(|(tag, _, _)| tag)
            .collect()
    }

    fn write_header(writer: &mut impl Write, title: &str) -> io::Result<()> {
        write!(writer, "PSF EXT \n \n")?;
        writeln!(writer, "{:10} !NTITLE", 1)?;
        write!(writer, "   {} \n \n", title)
    }

    fn write_atoms(
        writer: &mut impl Write,
        topology: &Topology,
        fragment_id: i64,
    ) -> io::Result<()> {
        writeln!(writer, "{:10} !NATOM", topology.atoms().len())?;
        for (atom, mass) in topology.atoms_with_masses() {
            writeln!(
                writer,
                "{:10} MOL{:<4}  R{:<7} {:<7}  {:<6}  {:<6}{:10.6}     {:8.3}           {:1}",
                atom.serial(),
                fragment_id,
                fragment_id,
                1,
                atom.label,
                atom.label,
                atom.charge,
                mass,
                0
            )?;
        }
        Ok(())
    }

    fn write_section<T: Term>(
        writer: &mut impl Write,
        separator: &str,
        tag: &str,
        terms: &[T],
        per_row: usize,
        options: &PsfOptions,
    ) -> io::Result<()> {
        let values = flatten_serials(terms);
        write!(writer, "{}{:10} !{}", separator, values.len() / T::ARITY, tag)?;
        if options.isolated {
            return Ok(());
        }

        writeln!(writer)?;
        let rows = options.row_wrap.rows(&values, per_row);
        for (n, row) in rows.iter().enumerate() {
            if n > 0 {
                writeln!(writer)?;
            }
            for value in row.iter() {
                write!(writer, "{:10}", value)?;
            }
        }
        Ok(())
    }
}

impl TopologyFile for PsfFile {
    type Options = PsfOptions;
    type Error = PsfError;

    fn write_to(
        topology: &Topology,
        options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let connectivity = topology.connectivity();

        Self::write_header(writer, &options.title)?;
        Self::write_atoms(writer, topology, options.fragment_id)?;
        Self::write_section::<Bond>(
            writer,
            "\n\n",
            "NBOND",
            &connectivity.bonds,
            BONDS_PER_ROW,
            options,
        )?;
        Self::write_section::<Angle>(
            writer,
            "\n\n\n",
            "NTHETA",
            &connectivity.angles,
            ANGLES_PER_ROW,
            options,
        )?;
        Self::write_section::<Dihedral>(
            writer,
            "\n\n\n",
            "NPHI",
            &connectivity.dihedrals,
            DIHEDRALS_PER_ROW,
            options,
        )?;
        writer.write_all(TRAILER.as_bytes())?;
        Ok(())
    }
}
