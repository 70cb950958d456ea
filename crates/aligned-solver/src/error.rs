use aligned_core::ConsistencyError;

/// Errors that abort a technique search.
///
/// Cooperative interruption is not an error; it is reported as
/// [`SearchOutcome::Interrupted`](crate::SearchOutcome::Interrupted).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum SolverError {
    /// The grid handed to the technique contains a contradiction.
    #[display("inconsistency detected: {_0}")]
    Inconsistent(#[from] ConsistencyError),
    /// The outer search exceeded its iteration budget, which means the search
    /// logic is broken rather than the puzzle being hard.
    #[display("{technique} exceeded its search budget after {iterations} iterations")]
    #[from(ignore)]
    SearchRunaway {
        /// Name of the technique whose search ran away.
        technique: &'static str,
        /// Iterations performed when the watchdog tripped.
        iterations: u64,
    },
}

/// Errors produced when building a technique configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The requested degree is outside the supported range.
    #[display("degree {degree} is out of range {min}..={max}")]
    InvalidDegree {
        /// Requested degree.
        degree: usize,
        /// Smallest supported degree.
        min: usize,
        /// Largest supported degree.
        max: usize,
    },
    /// The non-hinter cache size exponent is outside the supported range.
    #[display("cache shift {_0} is out of range 4..=24")]
    InvalidCacheShift(#[error(not(source))] u8),
}
