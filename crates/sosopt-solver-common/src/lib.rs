//! Shared types between the two conic solver adapters.
//!
//! The core pipeline never calls a solver subprocess — solve() is an
//! in-process, synchronous call with no disk or wire format. This crate is
//! just the small vocabulary both adapters speak: an adapter-internal
//! [`error::SolverError`] and [`solution::SolutionStatus`].

pub mod error;
pub mod solution;

pub use error::{SolverError, SolverResult};
pub use solution::SolutionStatus;
