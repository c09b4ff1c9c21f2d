//! Modular scalar arithmetic shared by the system builder and the solver.
//!
//! All residue arithmetic in this crate is performed on `i64` values with an explicit
//! modulus `q`, reduced at every step. Two representations are used:
//!
//! - the canonical representative in `[0, q)`, used while building and eliminating the
//!   linear system;
//! - the centered (balanced) representative in `(-q/2, q/2]`, used for reported key
//!   coefficients, where "small" secret values must stay small (e.g. `-1`, not `q - 1`).

mod polynomial;
pub use polynomial::{negacyclic_mul, negacyclic_row};

/// Reduces `x` into the canonical residue range `[0, q)`.
pub const fn reduce(x: i64, q: i64) -> i64 {
    let r = x % q;
    if r < 0 { r + q } else { r }
}

/// Maps a residue to its centered representative in `(-q/2, q/2]`.
pub const fn center(x: i64, q: i64) -> i64 {
    let r = reduce(x, q);
    if r > q / 2 { r - q } else { r }
}

/// Computes the multiplicative inverse of `a` modulo `q` using the extended Euclidean
/// algorithm.
///
/// Returns `None` when `gcd(a, q) != 1`, in which case no inverse exists. `q` is not
/// required to be prime; for the prime reference modulus every nonzero residue is
/// invertible.
pub fn mod_inverse(a: i64, q: i64) -> Option<i64> {
    let a = reduce(a, q);
    if a == 0 {
        return None;
    }

    let (mut t, mut new_t) = (0i64, 1i64);
    let (mut r, mut new_r) = (q, a);
    while new_r != 0 {
        let quotient = r / new_r;
        (t, new_t) = (new_t, t - quotient * new_t);
        (r, new_r) = (new_r, r - quotient * new_r);
    }

    if r > 1 {
        return None;
    }
    Some(reduce(t, q))
}

// TESTS
// ================================================================================================
