use crate::core::connectivity::builder::{
    BondCriterion, ConnectivityBuilder, DEFAULT_BOND_THRESHOLD,
};
use crate::core::connectivity::distance::DistanceMatrix;
use crate::core::io::psf::{PsfError, PsfFile, PsfOptions, RowWrap};
use crate::core::io::traits::{GeometryFile, TopologyFile};
use crate::core::io::xyz::{XyzError, XyzFile, XyzMetadata};
use crate::core::masses::{MassError, MassLookup};
use crate::core::models::atom::Geometry;
use crate::core::models::topology::{Connectivity, Topology};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Bond threshold must be a positive finite length, got {0}")]
    InvalidBondThreshold(f64),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read geometry: {0}")]
    Input(#[from] XyzError),

    #[error("Failed to resolve atomic masses: {0}")]
    Mass(#[from] MassError),

    #[error("Failed to write topology: {0}")]
    Output(#[from] PsfError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub bond_threshold: f64,
    pub psf: PsfOptions,
}

#[derive(Default)]
pub struct ConvertConfigBuilder {
    fragment_id: Option<i64>,
    bond_threshold: Option<f64>,
    isolated: Option<bool>,
    title: Option<String>,
    row_wrap: Option<RowWrap>,
}

impl ConvertConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fragment_id(mut self, id: i64) -> Self {
        self.fragment_id = Some(id);
        self
    }
    pub fn bond_threshold(mut self, threshold: f64) -> Self {
        self.bond_threshold = Some(threshold);
        self
    }
    pub fn isolated(mut self, isolated: bool) -> Self {
        self.isolated = Some(isolated);
        self
    }
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    pub fn row_wrap(mut self, wrap: RowWrap) -> Self {
        self.row_wrap = Some(wrap);
        self
    }

    pub fn build(self) -> Result<ConvertConfig, ConfigError> {
        let fragment_id = self
            .fragment_id
            .ok_or(ConfigError::MissingParameter("fragment_id"))?;
        let bond_threshold =
            validate_bond_threshold(self.bond_threshold.unwrap_or(DEFAULT_BOND_THRESHOLD))?;

        let mut psf = PsfOptions::new(fragment_id);
        psf.isolated = self.isolated.unwrap_or(false);
        if let Some(title) = self.title {
            psf.title = title;
        }
        if let Some(wrap) = self.row_wrap {
            psf.row_wrap = wrap;
        }

        Ok(ConvertConfig {
            bond_threshold,
            psf,
        })
    }
}

/// Accepts only positive finite bond thresholds.
pub fn validate_bond_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(threshold)
    } else {
        Err(ConfigError::InvalidBondThreshold(threshold))
    }
}

/// A fully resolved conversion, ready to be written.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub topology: Topology,
    pub metadata: XyzMetadata,
}

impl Conversion {
    pub fn write_to(
        &self,
        config: &ConvertConfig,
        writer: &mut impl Write,
    ) -> Result<(), ConvertError> {
        PsfFile::write_to(&self.topology, &config.psf, writer)?;
        Ok(())
    }
}

/// Infers bonds, angles and dihedrals of a geometry with the given bond threshold.
pub fn infer_connectivity(geometry: &Geometry, bond_threshold: f64) -> Connectivity {
    let distances = DistanceMatrix::from_positions(&geometry.positions());
    ConnectivityBuilder::new(&distances, BondCriterion::new(bond_threshold)).build()
}

/// Reads a geometry and resolves everything the topology file needs.
///
/// Nothing is written here; every failure (malformed rows, unknown elements)
/// surfaces before any output exists.
pub fn prepare(
    reader: &mut impl BufRead,
    config: &ConvertConfig,
    masses: &impl MassLookup,
) -> Result<Conversion, ConvertError> {
    let (geometry, metadata) = XyzFile::read_from(reader)?;
    let connectivity = infer_connectivity(&geometry, config.bond_threshold);
    let topology = Topology::assemble(geometry, connectivity, masses)?;
    Ok(Conversion { topology, metadata })
}

/// Runs the complete conversion from an XYZ stream to a PSF stream.
pub fn run(
    reader: &mut impl BufRead,
    config: &ConvertConfig,
    masses: &impl MassLookup,
    writer: &mut impl Write,
) -> Result<Conversion, ConvertError> {
    let conversion = prepare(reader, config, masses)?;
    conversion.write_to(config, writer)?;
    Ok(conversion)
}
