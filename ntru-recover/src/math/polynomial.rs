//! Negacyclic convolution structure of the ring `Z_q[x]/(xⁿ + 1)`.

use alloc::vec::Vec;

use super::reduce;

/// Builds row `k` of the negacyclic convolution matrix of `h`.
///
/// Row `k` expresses coefficient `k` of the ring product `h·f`:
///
/// ```text
/// (h·f)[k] ≡ Σ_j row[j]·f[j]   (mod q)
/// ```
///
/// Indices wrap cyclically, and a wrap past `xⁿ` negates the entry since `xⁿ ≡ -1`:
/// `row[j] = h[k - j]` for `k ≥ j` and `row[j] = -h[n + k - j]` otherwise. All entries
/// are returned reduced into `[0, q)`.
pub fn negacyclic_row(h: &[i64], k: usize, q: i64) -> Vec<i64> {
    let n = h.len();
    debug_assert!(k < n, "row index {k} out of range for dimension {n}");
    (0..n)
        .map(|j| if k >= j { reduce(h[k - j], q) } else { reduce(-h[n + k - j], q) })
        .collect()
}

/// Multiplies two polynomials in `Z_q[x]/(xⁿ + 1)` by direct convolution.
///
/// This is the O(n²) reference multiplication. The solver never calls it; it serves as
/// the ground truth for [`negacyclic_row`] and for checking recovered key candidates
/// against the ring identity.
pub fn negacyclic_mul(a: &[i64], b: &[i64], q: i64) -> Vec<i64> {
    debug_assert_eq!(a.len(), b.len(), "operands must share the ring dimension");
    let n = a.len();
    let mut c = vec![0i64; n];
    for i in 0..n {
        let ai = reduce(a[i], q);
        for j in 0..n {
            let mut term = ai * reduce(b[j], q) % q;
            if i + j >= n {
                term = -term;
            }
            let k = (i + j) % n;
            c[k] = reduce(c[k] + term, q);
        }
    }
    c
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn wraparound_negates() {
        // x · x³ = x⁴ ≡ -1 in Z_17[x]/(x⁴ + 1)
        let a = [0, 1, 0, 0];
        let b = [0, 0, 0, 1];
        assert_eq!(negacyclic_mul(&a, &b, 17), vec![16, 0, 0, 0]);
    }

    #[test]
    fn constant_multiplication() {
        let a = [2, 0, 0, 0];
        let b = [3, 5, 0, 16];
        assert_eq!(negacyclic_mul(&a, &b, 17), vec![6, 10, 0, 15]);
    }

    #[test]
    fn first_row_is_h_with_negated_tail() {
        // row 0: h[0] followed by -h[n-1], ..., -h[1]
        let h = [5, 7, 2, 1];
        assert_eq!(negacyclic_row(&h, 0, 17), vec![5, 16, 15, 10]);
        assert_eq!(negacyclic_row(&h, 3, 17), vec![1, 2, 7, 5]);
    }

    proptest! {
        #[test]
        fn row_matches_direct_multiplication(
            h in prop::collection::vec(0i64..12289, 8),
            f in prop::collection::vec(-6144i64..=6144, 8),
        ) {
            let q = 12289;
            let product = negacyclic_mul(&h, &f, q);
            for k in 0..h.len() {
                let row = negacyclic_row(&h, k, q);
                let acc = row
                    .iter()
                    .zip(f.iter())
                    .fold(0i64, |acc, (&r, &x)| reduce(acc + r * reduce(x, q), q));
                prop_assert_eq!(acc, product[k]);
            }
        }

        #[test]
        fn multiplication_commutes(
            a in prop::collection::vec(0i64..17, 8),
            b in prop::collection::vec(0i64..17, 8),
        ) {
            prop_assert_eq!(negacyclic_mul(&a, &b, 17), negacyclic_mul(&b, &a, 17));
        }
    }
}
