//! # Workflows Module
//!
//! High-level entry points that run a complete conversion.
//!
//! - **Conversion Workflow** ([`convert`]) - Reads an extended XYZ geometry,
//!   infers connectivity from interatomic distances, resolves atomic masses and
//!   writes the PSF topology.
//!
//! All fallible steps run before any output is produced, so a failed
//! conversion never leaves a partial document behind.

pub mod convert;
