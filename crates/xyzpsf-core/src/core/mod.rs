//! # Core Module
//!
//! The building blocks of the XYZ-to-PSF conversion.
//!
//! ## Architecture
//!
//! - **Fragment Representation** ([`models`]) - Atoms, geometry, connectivity terms and topology
//! - **Connectivity Inference** ([`connectivity`]) - Distance matrix and bond/angle/dihedral enumeration
//! - **Atomic Masses** ([`masses`]) - Element-symbol lookup behind the [`masses::MassLookup`] trait
//! - **File I/O** ([`io`]) - Extended XYZ reading and PSF writing
//!
//! Connectivity is inferred from distances alone. There is no atom typing,
//! ring perception or bond-order assignment.

pub mod connectivity;
pub mod io;
pub mod masses;
pub mod models;
