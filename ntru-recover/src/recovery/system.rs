//! Construction of the modular linear system relating known and unknown coefficients.

use alloc::vec::Vec;

use super::error::RecoveryError;
use crate::{
    leakage::CoefficientVector,
    math::{negacyclic_row, reduce},
};

// LINEAR SYSTEM
// ================================================================================================

/// A linear system `A·x ≡ b (mod q)` with all entries reduced into `[0, q)`.
///
/// Rows correspond to known `g` coefficients in ascending index order; columns
/// correspond to unknown `f` coefficients in ascending index order. The solver requires
/// the system to be square; the column ordering fixed here must match the order used
/// when splicing the solution back into the coefficient vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSystem {
    matrix: Vec<Vec<i64>>,
    rhs: Vec<i64>,
    modulus: i64,
}

impl LinearSystem {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a system with the given coefficient matrix and right-hand side.
    ///
    /// Entries may be unreduced; they are reduced into `[0, q)` here.
    pub fn new(matrix: Vec<Vec<i64>>, rhs: Vec<i64>, modulus: i64) -> Self {
        debug_assert_eq!(matrix.len(), rhs.len(), "one rhs entry per equation");
        debug_assert!(matrix.iter().all(|row| row.len() == matrix[0].len()));
        let matrix = matrix
            .into_iter()
            .map(|row| row.into_iter().map(|a| reduce(a, modulus)).collect())
            .collect();
        let rhs = rhs.into_iter().map(|b| reduce(b, modulus)).collect();
        Self { matrix, rhs, modulus }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of equations.
    pub fn num_equations(&self) -> usize {
        self.rhs.len()
    }

    /// Returns the number of unknowns.
    pub fn num_unknowns(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    /// Returns true if the equation and unknown counts match.
    pub fn is_square(&self) -> bool {
        self.num_equations() == self.num_unknowns()
    }

    /// Returns the modulus.
    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Returns the coefficient matrix.
    pub fn matrix(&self) -> &[Vec<i64>] {
        &self.matrix
    }

    /// Returns the right-hand-side vector.
    pub fn rhs(&self) -> &[i64] {
        &self.rhs
    }
}

// SYSTEM CONSTRUCTION
// ================================================================================================

/// Builds the linear system whose unknowns are the masked-unknown coefficients of `f`.
///
/// For every known index `k` of `g` (ascending order), the ring identity gives the
/// equation `g[k] ≡ Σ_j H_k[j]·f[j] (mod q)` where `H_k` is row `k` of the negacyclic
/// convolution matrix of `h`. The sum splits over known and unknown `f` indices; the
/// known contribution moves to the right-hand side:
///
/// ```text
/// rhs_k = (g[k] − Σ_{j known} H_k[j]·f[j]) mod q
/// ```
///
/// and the stored matrix row is `H_k` restricted to the unknown `f` columns in
/// ascending index order.
///
/// Fails with [`RecoveryError::NoKnownSourceCoefficients`] when `g` has no known slots.
pub fn build_system(
    g: &CoefficientVector,
    f: &CoefficientVector,
    h: &[i64],
    q: i64,
) -> Result<LinearSystem, RecoveryError> {
    let n = h.len();
    debug_assert_eq!(g.len(), n, "g must match the ring dimension");
    debug_assert_eq!(f.len(), n, "f must match the ring dimension");

    if g.known_count() == 0 {
        return Err(RecoveryError::NoKnownSourceCoefficients);
    }

    let num_equations = g.known_count();
    let mut matrix = Vec::with_capacity(num_equations);
    let mut rhs = Vec::with_capacity(num_equations);

    for (k, g_value) in g.known_entries() {
        let row = negacyclic_row(h, k, q);

        let known_sum = f
            .known_entries()
            .fold(0i64, |acc, (j, f_value)| reduce(acc + row[j] * reduce(f_value, q), q));
        rhs.push(reduce(g_value - known_sum, q));

        matrix.push(f.unknown_indices().map(|j| row[j]).collect());
    }

    Ok(LinearSystem { matrix, rhs, modulus: q })
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn rows_restrict_to_unknown_columns() {
        // h over Z_17, g known at {1}, f known at {0} with value 3
        let h = [5, 7, 2, 1];
        let g = CoefficientVector::from_entries(4, &[(1, 12)]);
        let f = CoefficientVector::from_entries(4, &[(0, 3)]);

        let system = build_system(&g, &f, &h, 17).unwrap();
        assert_eq!(system.num_equations(), 1);
        assert_eq!(system.num_unknowns(), 3);

        // H_1 = [7, 5, 16, 15]; unknown columns are 1..=3
        assert_eq!(system.matrix(), &[vec![5, 16, 15]]);
        // rhs = (12 − 7·3) mod 17 = 8
        assert_eq!(system.rhs(), &[8]);
    }

    #[test]
    fn fully_unknown_f_keeps_whole_row() {
        let h = [5, 7, 2, 1];
        let g = CoefficientVector::from_entries(4, &[(0, 2), (3, 11)]);
        let f = CoefficientVector::unknown(4);

        let system = build_system(&g, &f, &h, 17).unwrap();
        assert_eq!(system.matrix(), &[vec![5, 16, 15, 10], vec![1, 2, 7, 5]]);
        assert_eq!(system.rhs(), &[2, 11]);
    }

    #[test]
    fn no_known_g_is_rejected() {
        let h = [5, 7, 2, 1];
        let g = CoefficientVector::unknown(4);
        let f = CoefficientVector::from_entries(4, &[(0, 1)]);
        assert_matches!(
            build_system(&g, &f, &h, 17),
            Err(RecoveryError::NoKnownSourceCoefficients)
        );
    }

    #[test]
    fn negative_known_values_reduce_into_range() {
        let h = [5, 7, 2, 1];
        let g = CoefficientVector::from_entries(4, &[(1, -5)]);
        let f = CoefficientVector::from_entries(4, &[(0, -1)]);

        let system = build_system(&g, &f, &h, 17).unwrap();
        // rhs = (-5 − 7·(-1)) mod 17 = 2
        assert_eq!(system.rhs(), &[2]);
        assert!(system.matrix()[0].iter().all(|&a| (0..17).contains(&a)));
    }
}
