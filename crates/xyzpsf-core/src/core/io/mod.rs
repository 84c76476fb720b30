//! Provides input/output for the coordinate and topology file formats.
//!
//! Coordinates are read from extended XYZ tables ([`xyz`]) and topologies are
//! written in the PSF layout ([`psf`]). Both sit behind the small trait-based
//! interface in [`traits`].

pub mod psf;
pub mod traits;
pub mod xyz;
