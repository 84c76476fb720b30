use nalgebra::{DMatrix, Point3};

/// Full pairwise Euclidean distance matrix of a set of atoms.
///
/// Both triangles and the diagonal are stored. Memory grows as O(N²), which
/// is intended for fragments of tens to a few hundred atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    distances: DMatrix<f64>,
}

impl DistanceMatrix {
    /// Computes `d[i][j] = |p_i - p_j|` for every ordered pair, including `i == j`.
    ///
    /// Non-finite coordinates yield NaN entries; they are not filtered here.
    pub fn from_positions(positions: &[Point3<f64>]) -> Self {
        let n = positions.len();
        let distances = DMatrix::from_fn(n, n, |i, j| (positions[i] - positions[j]).norm());
        Self { distances }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[(i, j)]
    }

    /// Number of atoms (rows) in the matrix.
    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
