//! Polynomial algebra and decision-variable construction for SOS modeling.
//!
//! This crate is the algebra engine: sparse multivariate polynomials with
//! decision-affine coefficients ([`polynomial::Polynomial`]), matrix-shaped
//! expressions ([`matrix::PolyMatrix`]), decision polynomial variable
//! construction ([`decisionvar`]), semialgebraic domain modeling
//! ([`semialgebraic::SemialgebraicSet`]), and Putinar multiplier synthesis
//! ([`multiplier`]). It builds on [`sosopt_core`]'s `State` registry but
//! knows nothing about cones, Gram factorization, or solver backends — those
//! live one layer up in `sosopt-constraints` and `sosopt-conic`.

pub mod affine;
pub mod decisionvar;
pub mod matrix;
pub mod monomial;
pub mod multiplier;
pub mod polynomial;
pub mod semialgebraic;

pub use affine::AffineExpr;
pub use decisionvar::{define_polynomial_variable, define_symmetric_matrix_variable, PolynomialVariable};
pub use matrix::PolyMatrix;
pub use monomial::{monomial_combinations, Monomial};
pub use multiplier::{multiplier_degree_bound, synthesize_multiplier};
pub use polynomial::Polynomial;
pub use semialgebraic::SemialgebraicSet;
