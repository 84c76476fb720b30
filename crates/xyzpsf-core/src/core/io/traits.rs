use crate::core::models::atom::Geometry;
use crate::core::models::topology::Topology;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading a geometry from a coordinate file format.
pub trait GeometryFile {
    /// Format-specific information that is not part of the geometry itself.
    type Metadata;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a geometry from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<(Geometry, Self::Metadata), Self::Error>;

    /// Reads a geometry from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Geometry, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Defines the interface for serializing a [`Topology`] into a topology file format.
pub trait TopologyFile {
    /// Rendering options for the format.
    type Options;

    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes a topology to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        topology: &Topology,
        options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a topology to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        topology: &Topology,
        options: &Self::Options,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(topology, options, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Renders a topology into an in-memory string.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn write_to_string(topology: &Topology, options: &Self::Options) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(topology, options, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
