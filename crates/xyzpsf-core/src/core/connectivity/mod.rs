//! Distance-based connectivity inference.
//!
//! [`distance`] builds the full pairwise distance matrix of a fragment and
//! [`builder`] walks it to enumerate bonds, angles and dihedrals using a single
//! bond-length threshold.

pub mod builder;
pub mod distance;
