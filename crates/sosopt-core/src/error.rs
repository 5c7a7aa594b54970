//! Unified error type for the sosopt lowering pipeline.
//!
//! This module provides a common error type [`SosOptError`] spanning symbol
//! registration, constraint construction, and solver dispatch. Domain-specific
//! errors (e.g. [`crate::solver_common`]'s solver status) convert into it at
//! API boundaries via `#[from]`.

use thiserror::Error;

/// Unified error type for sosopt operations.
///
/// Variant names follow the error taxonomy of the lowering pipeline: each
/// variant corresponds to exactly one documented failure mode, not a generic
/// catch-all.
#[derive(Error, Debug)]
pub enum SosOptError {
    /// A constraint constructor was called with neither a `>= 0` nor a
    /// `<= 0` side.
    #[error("constraint '{name}' is incomplete: neither greater_than_zero nor less_than_zero was given")]
    ConstraintIncomplete { name: String },

    /// Solver-args assembly tried to resolve an index range for a symbol
    /// that was never allocated in `State`.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A matrix constraint or stack operation was given incompatible shapes.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The degree of an expression could not be bounded (a monomial carried
    /// a symbolic, rather than concrete, exponent).
    #[error("degree inference failed: {0}")]
    DegreeInferenceFailed(String),

    /// The selected solver adapter cannot accept the given problem shape
    /// (unrewritten quadratic cost, or linear-inequality data).
    #[error("solver incapable: {0}")]
    SolverIncapable(String),

    /// The adapter returned `SolutionNotFound`.
    #[error("solver failed with status: {0}")]
    SolverFailed(String),

    /// Sparse SMR was requested for a problem the engine cannot sparsify.
    #[error("config conflict: {0}")]
    ConfigConflict(String),

    /// A cone primitive, once fully substituted, evaluated to a violated
    /// numeric constraint.
    #[error("infeasible substitution in constraint '{name}': {detail}")]
    InfeasibleSubstitution { name: String, detail: String },

    /// A symbol was registered twice under the same name within one `State`.
    #[error("symbol '{0}' is already registered")]
    DuplicateSymbol(String),
}

/// Convenience alias for `Result<T, SosOptError>`.
pub type SosOptResult<T> = Result<T, SosOptError>;

impl From<String> for SosOptError {
    fn from(s: String) -> Self {
        SosOptError::ShapeMismatch(s)
    }
}

impl From<&str> for SosOptError {
    fn from(s: &str) -> Self {
        SosOptError::ShapeMismatch(s.to_string())
    }
}
