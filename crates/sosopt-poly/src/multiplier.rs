//! Putinar multiplier synthesis.
//!
//! A Putinar certificate needs one fresh decision polynomial per domain
//! constraint `g_i`/`h_j`, of a degree chosen so that `multiplier * g_i` can
//! reach the degree of the polynomial being certified. This module is the
//! degree-bound heuristic plus the `define_polynomial_variable` call that
//! actually allocates it, grounded on
//! `examples/original_source/sosopt/polymat/from_.py`'s `define_multiplier`.

use sosopt_core::{SosOptResult, State};

use crate::decisionvar::{define_polynomial_variable, PolynomialVariable};
use crate::monomial::{monomial_combinations, round_up_even};

/// Choose the multiplier's total degree bound: the smallest even number `d`
/// such that a multiplier of degree `d` paired with a constraint of degree
/// `constraint_degree` can still reach `target_degree` (the degree of the
/// polynomial the Putinar certificate is being built for).
///
/// Degree bounds are always rounded up to even, since the multiplier `σ`
/// is itself later certified SOS, and an SOS polynomial's Gram
/// factorization needs an even total degree to take a half-degree square.
pub fn multiplier_degree_bound(target_degree: u32, constraint_degree: u32) -> u32 {
    let raw = target_degree as i64 - constraint_degree as i64;
    round_up_even(raw)
}

/// Synthesize a fresh decision polynomial multiplier for one domain
/// constraint, with monomial basis `Z` = every monomial of degree at most
/// the chosen degree bound (§4.3: `x.combinations(0..=degree_bound)`).
///
/// The multiplier `σ` itself is later asserted SOS (`sos_cell_primitives`),
/// which is where the half-degree Gram-factorization reduction belongs —
/// halving it again here would under-parametrize the certificate.
///
/// `name` should uniquely identify the constraint this multiplier is
/// certifying (e.g. `"putinar_g1"`), since it becomes the symbol's name.
pub fn synthesize_multiplier(
    state: &mut State,
    name: &str,
    n_vars: usize,
    target_degree: u32,
    constraint_degree: u32,
) -> SosOptResult<PolynomialVariable> {
    let degree_bound = multiplier_degree_bound(target_degree, constraint_degree);
    let z = monomial_combinations(n_vars, 0..=degree_bound);
    define_polynomial_variable(state, name, z, (1, 1), n_vars)
}
