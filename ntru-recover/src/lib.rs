#![no_std]

//! Recovery of NTRU-lattice secret keys from partially known coefficients.
//!
//! The secret polynomials `f` and `g` of a Falcon-style key pair satisfy
//! `h·f ≡ g (mod q, mod xⁿ + 1)` for the public polynomial `h`. When a
//! side-channel analysis stage asserts a subset of the coefficients of `f`
//! and `g`, the remaining unknown coefficients of `f` are the solution of
//! an exact linear system over `Z_q` whose rows come from the negacyclic
//! convolution matrix of `h`. This crate selects the asserted
//! coefficients, constructs that system, and solves it by modular
//! Gaussian elimination.
//!
//! The core is a pure, synchronous computation per problem instance with
//! no I/O and no internal randomness. Independent instances share no
//! state and can be recovered concurrently via [`recovery::recover_batch`]
//! when the `concurrent` feature is enabled.

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod leakage;
pub mod math;
pub mod recovery;

// RE-EXPORTS
// ================================================================================================

pub use leakage::{
    CoefficientVector, LeakageMap, LeakageRecord, SelectionPolicy, SelectionStatus,
    select_known_positions,
};
pub use recovery::{
    LinearSystem, RecoveryError, RecoveryInstance, RecoveryOutcome, build_system,
    equalize_known_counts, reconstruct, recover_batch, recover_full_vector, recover_instance,
    recover_unknown_coefficients, solve, verify_key_pair,
};

// CONSTANTS
// ================================================================================================

/// The Falcon modulus q.
pub const MODULUS: i64 = 12289;

// RECOVERY PARAMETERS
// ================================================================================================

/// Ring parameters of one recovery instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryParams {
    /// Ring dimension, i.e. the degree of `phi := xⁿ + 1` and the length of every
    /// coefficient vector.
    pub n: usize,
    /// Coefficient modulus.
    pub q: i64,
}

impl RecoveryParams {
    /// Returns the known-coefficient budget used during leakage selection.
    ///
    /// Each secret polynomial contributes at most `n/2` known coefficients, so that a
    /// fully leaked instance produces a square `n/2 × n/2` system.
    pub const fn known_budget(&self) -> usize {
        self.n / 2
    }
}

/// Parameters of the Falcon-512 instance.
pub const FALCON_512: RecoveryParams = RecoveryParams { n: 512, q: MODULUS };

/// Parameters of the Falcon-1024 instance.
pub const FALCON_1024: RecoveryParams = RecoveryParams { n: 1024, q: MODULUS };
