//! # Core Models Module
//!
//! Data structures for a single molecular fragment and its inferred topology.
//!
//! - [`atom`] - Atoms as read from a geometry file, and the ordered [`atom::Geometry`]
//! - [`topology`] - Bonds, angles and dihedrals, and the assembled [`topology::Topology`]
//!
//! ```ignore
//! use xyzpsf::core::models::atom::Geometry;
//! use nalgebra::Point3;
//!
//! let mut geometry = Geometry::new();
//! geometry.push("O1", "O", Point3::origin(), -0.834);
//! geometry.push("H1", "H", Point3::new(0.9572, 0.0, 0.0), 0.417);
//! ```

pub mod atom;
pub mod topology;
