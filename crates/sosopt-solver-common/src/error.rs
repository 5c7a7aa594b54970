//! Adapter-internal error type.
//!
//! Solver adapters (`sosopt-solver-dense`, `sosopt-solver-sparse`) need a
//! small error type of their own for failures specific to invoking the
//! underlying conic solver (bad settings, initialization failure) before
//! those failures cross into [`sosopt_core::SosOptError`] — the taxonomy
//! the rest of the pipeline speaks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    /// The underlying solver rejected its own settings.
    #[error("solver settings error: {0}")]
    Settings(String),

    /// The underlying solver failed to initialize from the assembled problem data.
    #[error("solver initialization failed: {0}")]
    Init(String),

    /// The adapter cannot accept the given problem shape (e.g. an
    /// unrewritten quadratic cost, or linear-inequality data it doesn't
    /// support).
    #[error("solver incapable: {0}")]
    Incapable(String),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for sosopt_core::SosOptError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Incapable(detail) => sosopt_core::SosOptError::SolverIncapable(detail),
            SolverError::Settings(detail) | SolverError::Init(detail) => {
                sosopt_core::SosOptError::SolverFailed(detail)
            }
        }
    }
}
