use thiserror::Error;

/// Failure reasons for a single recovery instance.
///
/// Every failure is reported per instance and is never fatal to a batch: each instance
/// fails independently and a batch run simply records one outcome per instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    /// Fewer unambiguous leakage values than the requested budget were available for a
    /// polynomial. Informational: callers decide whether to still attempt recovery.
    #[error("not enough known values: only {found}/{requested}")]
    InsufficientKnownCoefficients {
        /// Number of unambiguous in-tier coefficients found.
        found: usize,
        /// The requested known-coefficient budget.
        requested: usize,
    },

    /// The equation-generating polynomial has zero known coefficients, so there is
    /// nothing to build equations from.
    #[error("no known g")]
    NoKnownSourceCoefficients,

    /// No invertible pivot exists in the given column; the instance's known/unknown
    /// index pattern does not admit a unique solution.
    #[error("no pivot in column {column}, singular matrix")]
    SingularSystem {
        /// The column for which pivot search failed.
        column: usize,
    },

    /// The selected pivot turned out to be non-invertible at normalization. Unreachable
    /// while pivot search already filters for invertibility; kept as a guard.
    #[error("modular inverse not found for pivot {pivot}")]
    NonInvertiblePivot {
        /// The offending pivot value.
        pivot: i64,
    },

    /// Equation and unknown counts differ; elimination requires a square system.
    #[error("system is not square: {equations} equations for {unknowns} unknowns")]
    StructuralMismatch {
        /// Number of equations (known source coefficients).
        equations: usize,
        /// Number of unknowns being solved for.
        unknowns: usize,
    },
}
