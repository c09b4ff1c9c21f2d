//! The coefficient-recovery pipeline.
//!
//! Data flows strictly forward: masked coefficient vectors from the leakage stage are
//! equalized, turned into a modular linear system driven by the negacyclic structure of
//! the public polynomial, solved by Gaussian elimination, and spliced back into a full
//! key candidate. Each step is a pure function of its inputs; failures carry a
//! [`RecoveryError`] and never abort sibling instances.

use alloc::vec::Vec;

use crate::{
    RecoveryParams,
    leakage::{
        CoefficientVector, LeakageMap, SelectionPolicy, SelectionStatus, select_known_positions,
    },
    math::{negacyclic_mul, reduce},
};

mod error;
pub use error::RecoveryError;

mod system;
pub use system::{LinearSystem, build_system};

mod solver;
pub use solver::solve;


// EQUALIZATION
// ================================================================================================

/// Caps both vectors' known-slot counts so the downstream system can be square.
///
/// When **both** vectors independently have more than `n/2` known slots, each keeps its
/// first `n/2` known slots in ascending index order and demotes the rest to unknown;
/// the resulting `#known(g) == n/2 == #unknown(f)` makes the system square. Otherwise
/// both vectors pass through unchanged: under-leaked instances are left intact and
/// surface later as a solver failure, which is the intended signal that the instance is
/// not solvable.
pub fn equalize_known_counts(
    g: CoefficientVector,
    f: CoefficientVector,
) -> (CoefficientVector, CoefficientVector) {
    debug_assert_eq!(g.len(), f.len(), "vectors must share the ring dimension");
    let cap = g.len() / 2;
    if g.known_count() > cap && f.known_count() > cap {
        (truncate_known(g, cap), truncate_known(f, cap))
    } else {
        (g, f)
    }
}

fn truncate_known(mut vector: CoefficientVector, cap: usize) -> CoefficientVector {
    let demote: Vec<usize> = vector.known_indices().skip(cap).collect();
    for index in demote {
        vector.clear_known(index);
    }
    vector
}

// RECOVERY
// ================================================================================================

/// Solves for the masked-unknown coefficients of `f`.
///
/// Returns the solved values as centered representatives, ordered by ascending unknown
/// index, the order [`reconstruct`] expects.
pub fn recover_unknown_coefficients(
    g: &CoefficientVector,
    f: &CoefficientVector,
    h: &[i64],
    q: i64,
) -> Result<Vec<i64>, RecoveryError> {
    let system = build_system(g, f, h, q)?;
    solve(&system)
}

/// Splices solved values into the unknown slots of `f`, yielding the full recovered
/// coefficient vector.
///
/// Known slots keep their leakage-asserted values; unknown slots are filled from
/// `solution` in ascending index order, matching the column order fixed by
/// [`build_system`].
pub fn reconstruct(f: &CoefficientVector, solution: &[i64]) -> Vec<i64> {
    debug_assert_eq!(f.len() - f.known_count(), solution.len());
    let mut solved = solution.iter();
    (0..f.len())
        .map(|i| match f.value(i) {
            Some(value) => value,
            None => *solved.next().expect("one solution entry per unknown slot"),
        })
        .collect()
}

/// Recovers the full `f` coefficient vector from partially known `f` and `g`.
pub fn recover_full_vector(
    g: &CoefficientVector,
    f: &CoefficientVector,
    h: &[i64],
    q: i64,
) -> Result<Vec<i64>, RecoveryError> {
    let solution = recover_unknown_coefficients(g, f, h, q)?;
    Ok(reconstruct(f, &solution))
}

/// Checks the ring identity `h·f ≡ g (mod q, mod xⁿ + 1)` over full vectors.
pub fn verify_key_pair(f: &[i64], g: &[i64], h: &[i64], q: i64) -> bool {
    let product = negacyclic_mul(h, f, q);
    product.iter().zip(g.iter()).all(|(&p, &g_value)| p == reduce(g_value, q))
}

// INSTANCE PIPELINE
// ================================================================================================

/// A single recovery problem: the public polynomial plus one leakage map per secret
/// polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecoveryInstance {
    /// The public polynomial `h`, fully known, entries in `[0, q)`.
    pub h: Vec<i64>,
    /// Leakage records for `g`, the equation-generating secret polynomial.
    pub g_records: LeakageMap,
    /// Leakage records for `f`, the polynomial being recovered.
    pub f_records: LeakageMap,
}

/// Outcome of one instance: the selection statuses of both polynomials and either the
/// full recovered coefficient vector (centered, ascending index order) or the failure
/// reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryOutcome {
    /// Selection status for the `g` leakage map.
    pub g_selection: SelectionStatus,
    /// Selection status for the `f` leakage map.
    pub f_selection: SelectionStatus,
    /// The recovered coefficient vector, or why recovery failed.
    pub result: Result<Vec<i64>, RecoveryError>,
}

impl RecoveryOutcome {
    /// Returns true if a full coefficient vector was recovered.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs the full pipeline for one instance: leakage selection for both polynomials,
/// equalization, system construction, elimination, and reconstruction.
///
/// Partial selections do not stop the pipeline; they are reported in the outcome while
/// recovery proceeds on whatever coefficients were selected.
pub fn recover_instance(
    instance: &RecoveryInstance,
    params: &RecoveryParams,
    policy: &SelectionPolicy,
) -> RecoveryOutcome {
    let budget = params.known_budget();
    let (f_vector, f_selection) =
        select_known_positions(&instance.f_records, policy, budget, params.n);
    let (g_vector, g_selection) =
        select_known_positions(&instance.g_records, policy, budget, params.n);

    let (g_vector, f_vector) = equalize_known_counts(g_vector, f_vector);
    let result = recover_full_vector(&g_vector, &f_vector, &instance.h, params.q);

    RecoveryOutcome { g_selection, f_selection, result }
}

/// Recovers a batch of independent instances, one outcome per instance.
///
/// Instances share no state; with the `concurrent` feature they are solved in parallel
/// on a rayon worker pool. Outcomes are returned in input order and a failing instance
/// never aborts the batch.
#[cfg(feature = "concurrent")]
pub fn recover_batch(
    instances: &[RecoveryInstance],
    params: &RecoveryParams,
    policy: &SelectionPolicy,
) -> Vec<RecoveryOutcome> {
    use rayon::prelude::*;
    instances
        .par_iter()
        .map(|instance| recover_instance(instance, params, policy))
        .collect()
}

/// Recovers a batch of independent instances, one outcome per instance.
///
/// Instances share no state; with the `concurrent` feature they are solved in parallel
/// on a rayon worker pool. Outcomes are returned in input order and a failing instance
/// never aborts the batch.
#[cfg(not(feature = "concurrent"))]
pub fn recover_batch(
    instances: &[RecoveryInstance],
    params: &RecoveryParams,
    policy: &SelectionPolicy,
) -> Vec<RecoveryOutcome> {
    instances
        .iter()
        .map(|instance| recover_instance(instance, params, policy))
        .collect()
}
