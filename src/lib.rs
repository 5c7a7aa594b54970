//! # sosopt: sum-of-squares polynomial optimization
//!
//! Builds semidefinite/conic programs from polynomial positivity
//! constraints: declare decision-variable polynomials over a
//! semialgebraic set, state SOS or Putinar constraints on them, assemble
//! the result into a cone program, and hand it to a Clarabel-backed
//! solver adapter.
//!
//! This crate is a thin facade over the workspace's layered crates —
//! [`sosopt_core`] (symbol registry), [`sosopt_poly`] (polynomial
//! algebra), [`sosopt_constraints`] (SOS/Putinar lowering),
//! [`sosopt_conic`] (problem assembly and back-substitution), and the two
//! solver adapters [`sosopt_solver_dense`]/[`sosopt_solver_sparse`] — each
//! usable standalone; this crate just re-exports the pieces most callers
//! need in one place.
//!
//! ## Quick start
//!
//! ```
//! use sosopt::{
//!     define_polynomial_variable, sos_constraint, assemble, AffineExpr,
//!     GramMode, Monomial, SolverAdapter, State,
//! };
//! use sosopt::solvers::DenseConeAdapter;
//!
//! let n_vars = 2;
//! let mut state = State::new(GramMode::Dense);
//! let z = vec![Monomial::one(), Monomial::var(0), Monomial::var(1)];
//! let p = define_polynomial_variable(&mut state, "p", z, (1, 1), n_vars).unwrap();
//!
//! let constraints = sos_constraint(&mut state, "p_sos", Some(p.expr.clone()), None, n_vars).unwrap();
//! let args = assemble(&mut state, AffineExpr::zero(), None, constraints, false).unwrap();
//!
//! let adapter = DenseConeAdapter::new();
//! let result = adapter.solve(&args).unwrap();
//! ```

pub use sosopt_core::{GramMode, SosOptError, SosOptResult, State, Symbol, SymbolKind};

pub use sosopt_poly::{
    define_polynomial_variable, define_symmetric_matrix_variable, multiplier_degree_bound,
    synthesize_multiplier, AffineExpr, Monomial, PolyMatrix, Polynomial, PolynomialVariable,
    SemialgebraicSet,
};

pub use sosopt_constraints::{
    gram_factorize, gram_to_primitives, putinar_constraint, sos_constraint,
    square_matricial_representation, to_gram_polynomial, zero_equality_constraint, ConeKind,
    ConePrimitive, GramFactorization,
};

pub use sosopt_conic::{
    assemble, back_substitute, find_by_name, to_named_map, ConeBlock, LinearCost, SolverAdapter,
    SolverArgs, SolverResult, SymbolValue,
};

pub use sosopt_solver_common::{SolutionStatus, SolverError};

/// Re-exported so callers can pick an adapter without an extra
/// `Cargo.toml` entry; each is also usable directly as its own crate.
pub mod solvers {
    pub use sosopt_solver_dense::DenseConeAdapter;
    pub use sosopt_solver_sparse::SparseSdpAdapter;
}
