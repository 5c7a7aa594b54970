//! Dense cone adapter.
//!
//! Calls into [Clarabel](https://github.com/oxfordcontrol/Clarabel.rs) via
//! the standard `CscMatrix`/`DefaultSettingsBuilder`/`DefaultSolver`/
//! `IPSolver::solve` sequence against the generic
//! `sosopt-conic::SolverArgs` contract.
//!
//! "Dense" describes the wire shape this adapter accepts: each SDP block
//! is the full row-major `m x m` Gram matrix vectorization, not
//! pre-reduced to its lower triangle (contrast `sosopt-solver-sparse`,
//! which expects the caller to have already done that reduction). Both
//! adapters still hand Clarabel its native scaled-lower-triangle svec
//! format internally — Clarabel's `PSDTriangleConeT` has no "full matrix"
//! mode — so this crate's own job is exactly that one reduction step.

mod adapter;

pub use adapter::DenseConeAdapter;
