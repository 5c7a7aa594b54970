//! Solver adapter trait.
//!
//! Both solver adapters implement exactly one operation: `solve(args) ->
//! Result`, queried through a small capability interface — an id, an
//! availability check, and whether the backend accepts a native quadratic
//! cost (neither shipped adapter does).

use sosopt_core::SosOptResult;

use crate::problem::SolverArgs;
use crate::result::SolverResult;

/// A solver backend capable of solving one assembled [`SolverArgs`].
pub trait SolverAdapter {
    /// Short identifying name, e.g. `"clarabel-dense"`.
    fn id(&self) -> &str;

    /// Whether this adapter is available in the current build. Both shipped
    /// adapters are pure-Rust (Clarabel) and always available; the hook
    /// exists for adapters that might wrap an optional native library.
    fn is_available(&self) -> bool;

    /// Whether this adapter accepts a native quadratic cost. Both shipped
    /// adapters return `false` — callers must run the quadratic-cost
    /// rewrite before assembling a `SolverArgs` meant for either of them.
    fn accepts_quadratic_cost(&self) -> bool {
        false
    }

    /// Solve one assembled conic problem.
    fn solve(&self, args: &SolverArgs) -> SosOptResult<SolverResult>;
}
