use super::distance::DistanceMatrix;
use crate::core::models::topology::{Angle, Bond, Connectivity, Dihedral};

/// Distances at or below this value are treated as overlapping atoms, never bonds.
pub const MIN_BOND_DISTANCE: f64 = 0.5;

pub const DEFAULT_BOND_THRESHOLD: f64 = 1.6;

/// Open distance interval `(MIN_BOND_DISTANCE, threshold)` that defines a bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondCriterion {
    threshold: f64,
}

impl BondCriterion {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn accepts(&self, distance: f64) -> bool {
        distance > MIN_BOND_DISTANCE && distance < self.threshold
    }
}

impl Default for BondCriterion {
    fn default() -> Self {
        Self::new(DEFAULT_BOND_THRESHOLD)
    }
}

/// Enumerates bonds, angles and dihedrals from a distance matrix.
///
/// The search is a plain nested loop over atom indices `i -> j -> k -> l`:
///
/// - a bond `(i, j)` is emitted for every bonded pair with `i < j`;
/// - for **every** bonded `(i, j)`, regardless of index order, each `k` bonded
///   to `j` yields the angle `(i, j, k)` when `i != j`, `i < k` and `j != k`;
/// - inside that `(j, k)` branch, each `l` bonded to `k` yields the dihedral
///   `(i, j, k, l)` when `i < j`, `i != k`, `i < l`, `j != k`, `j != l` and `k != l`.
///
/// The inner pair `(j, k)` is never index-ordered, and dihedrals are gated only
/// by the `(j, k)` bond test, not by the angle condition. Terms come out in
/// discovery order without deduplication.
///
/// Work is O(N⁴) in the worst case, which limits this to small fragments.
pub struct ConnectivityBuilder<'a> {
    distances: &'a DistanceMatrix,
    criterion: BondCriterion,
}

impl<'a> ConnectivityBuilder<'a> {
    pub fn new(distances: &'a DistanceMatrix, criterion: BondCriterion) -> Self {
        Self {
            distances,
            criterion,
        }
    }

    #[inline]
    fn bonded(&self, a: usize, b: usize) -> bool {
        self.criterion.accepts(self.distances.get(a, b))
    }

    pub fn build(&self) -> Connectivity {
        let n = self.distances.len();
        let mut connectivity = Connectivity::default();

        for i in 0..n {
            for j in 0..n {
                if !self.bonded(i, j) {
                    continue;
                }
                if i < j {
                    connectivity.bonds.push(Bond([i, j]));
                }
                for k in 0..n {
                    if !self.bonded(j, k) {
                        continue;
                    }
                    if i != j && i < k && j != k {
                        connectivity.angles.push(Angle([i, j, k]));
                    }
                    for l in 0..n {
                        if !self.bonded(k, l) {
                            continue;
                        }
                        if i < j && i != k && i < l && j != k && j != l && k != l {
                            connectivity.dihedrals.push(Dihedral([i, j, k, l]));
                        }
                    }
                }
            }
        }

        connectivity
    }
}
