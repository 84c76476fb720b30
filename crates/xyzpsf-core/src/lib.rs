//! # xyzpsf
//!
//! Converts an extended XYZ geometry (labels, coordinates, charges and element
//! symbols) into a PSF structural topology for molecular-dynamics engines such
//! as CP2K.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Stateless data models, distance-based
//!   connectivity inference, the atomic-mass lookup, and file I/O.
//!
//! - **[`workflows`]: The Public API.** Ties the `core` pieces together into the
//!   complete conversion pipeline: read, infer connectivity, resolve masses,
//!   write.

pub mod core;
pub mod workflows;
