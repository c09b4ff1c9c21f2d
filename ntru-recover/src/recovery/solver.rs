//! Gaussian elimination over the integers modulo `q`.

use alloc::vec::Vec;

use super::{error::RecoveryError, system::LinearSystem};
use crate::math::{center, mod_inverse, reduce};

/// Solves the square system `A·x ≡ b (mod q)` by elimination with modular pivoting.
///
/// Columns are processed left to right. For each column the first row at or below the
/// diagonal whose entry is invertible modulo `q` becomes the pivot (row swap only, no
/// column pivoting), the pivot row is normalized to a leading `1`, and the column is
/// eliminated from every other row. All arithmetic stays reduced in `[0, q)`; the
/// solution is reported in centered representatives `(-q/2, q/2]`, ordered to match the
/// system's column order.
///
/// Fails with [`RecoveryError::StructuralMismatch`] when the system is not square and
/// with [`RecoveryError::SingularSystem`] when some column has no invertible pivot. `q`
/// need not be prime; for the prime reference modulus the only non-invertible residue
/// is zero.
pub fn solve(system: &LinearSystem) -> Result<Vec<i64>, RecoveryError> {
    let equations = system.num_equations();
    let unknowns = system.num_unknowns();
    if equations != unknowns {
        return Err(RecoveryError::StructuralMismatch { equations, unknowns });
    }

    let u = unknowns;
    let q = system.modulus();

    // augmented matrix [A | b], entries already reduced by LinearSystem
    let mut m: Vec<Vec<i64>> = system
        .matrix()
        .iter()
        .zip(system.rhs())
        .map(|(row, &b)| {
            let mut augmented = Vec::with_capacity(u + 1);
            augmented.extend_from_slice(row);
            augmented.push(b);
            augmented
        })
        .collect();

    for col in 0..u {
        let pivot_row = (col..u)
            .find(|&row| mod_inverse(m[row][col], q).is_some())
            .ok_or(RecoveryError::SingularSystem { column: col })?;
        m.swap(col, pivot_row);

        let pivot = m[col][col];
        let inverse =
            mod_inverse(pivot, q).ok_or(RecoveryError::NonInvertiblePivot { pivot })?;
        for entry in m[col][col..].iter_mut() {
            *entry = *entry * inverse % q;
        }

        eliminate_column(&mut m, col, q);
    }

    Ok(m.iter().map(|row| center(row[u], q)).collect())
}

/// Eliminates column `col` from every row other than the pivot row.
///
/// Row updates within a column are independent of each other and share only the pivot
/// row read-only, so with the `concurrent` feature they run in parallel; the exact
/// integer arithmetic makes the parallel result identical to the sequential one.
fn eliminate_column(m: &mut [Vec<i64>], col: usize, q: i64) {
    let (above, rest) = m.split_at_mut(col);
    let (pivot, below) = rest.split_at_mut(1);
    let pivot_row = pivot[0].as_slice();

    #[cfg(feature = "concurrent")]
    {
        use rayon::prelude::*;
        above
            .par_iter_mut()
            .chain(below.par_iter_mut())
            .for_each(|row| eliminate_row(row, pivot_row, col, q));
    }

    #[cfg(not(feature = "concurrent"))]
    for row in above.iter_mut().chain(below.iter_mut()) {
        eliminate_row(row, pivot_row, col, q);
    }
}

/// Subtracts `row[col]` times the normalized pivot row from `row`, columns `col..`.
fn eliminate_row(row: &mut [i64], pivot_row: &[i64], col: usize, q: i64) {
    let factor = row[col];
    if factor == 0 {
        return;
    }
    for (entry, &pivot_entry) in row[col..].iter_mut().zip(pivot_row[col..].iter()) {
        *entry = reduce(*entry - factor * pivot_entry, q);
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn identity_system_returns_centered_rhs() {
        let system = LinearSystem::new(
            vec![vec![1, 0], vec![0, 1]],
            vec![16, 8],
            17,
        );
        assert_eq!(solve(&system).unwrap(), vec![-1, 8]);
    }

    #[test]
    fn two_by_two_system() {
        // x = (3, -2): 3 + 15 ≡ 1, 3 + 16·15 ≡ 5 (mod 17)
        let system = LinearSystem::new(
            vec![vec![1, 1], vec![1, 16]],
            vec![1, 5],
            17,
        );
        assert_eq!(solve(&system).unwrap(), vec![3, -2]);
    }

    #[test]
    fn pivot_search_swaps_rows() {
        // leading zero forces a row swap in column 0
        let system = LinearSystem::new(
            vec![vec![0, 1], vec![1, 0]],
            vec![2, 3],
            17,
        );
        assert_eq!(solve(&system).unwrap(), vec![3, 2]);
    }

    #[test]
    fn non_invertible_entries_are_not_pivots() {
        // over Z_8, column 0 holds 2 and 4 (not units) but row 2 starts with 3
        let system = LinearSystem::new(
            vec![vec![2, 1, 0], vec![4, 0, 1], vec![3, 0, 0]],
            vec![7, 6, 3],
            8,
        );
        // x0 = 3/3 = 1, then x1 = 7 − 2 = 5, x2 = 6 − 4 = 2
        assert_eq!(solve(&system).unwrap(), vec![1, -3, 2]);
    }

    #[test]
    fn singular_system_is_detected() {
        // all entries multiples of 2 over q = 4: no invertible pivot anywhere
        let system = LinearSystem::new(vec![vec![2, 2], vec![2, 0]], vec![1, 2], 4);
        assert_matches!(solve(&system), Err(RecoveryError::SingularSystem { column: 0 }));
    }

    #[test]
    fn rank_deficient_prime_system_is_detected() {
        // second row is twice the first over Z_17
        let system = LinearSystem::new(
            vec![vec![1, 2], vec![2, 4]],
            vec![3, 6],
            17,
        );
        assert_matches!(solve(&system), Err(RecoveryError::SingularSystem { column: 1 }));
    }

    #[test]
    fn non_square_system_is_rejected() {
        let system = LinearSystem::new(vec![vec![1, 2, 3], vec![4, 5, 6]], vec![1, 2], 17);
        assert_matches!(
            solve(&system),
            Err(RecoveryError::StructuralMismatch { equations: 2, unknowns: 3 })
        );
    }
}
