//! Scenario tests spanning decision-variable construction, semialgebraic
//! domains, and multiplier synthesis together, the way a caller actually
//! uses this crate rather than each module in isolation.

use sosopt_core::{GramMode, State};
use sosopt_poly::{
    define_polynomial_variable, define_symmetric_matrix_variable, monomial_combinations,
    synthesize_multiplier, Monomial, Polynomial, SemialgebraicSet,
};

#[test]
fn box_constrained_domain_bounds_multiplier_degree() {
    let n_vars = 2;
    let domain = SemialgebraicSet::box_constraints(n_vars, &[-1.0, -1.0], &[1.0, 1.0]);
    assert_eq!(domain.max_degree(), 1);

    let mut state = State::new(GramMode::Dense);
    let multiplier = synthesize_multiplier(&mut state, "mult_box_lower_0", n_vars, 4, domain.max_degree()).unwrap();
    // target degree 4, constraint degree 1: bound rounds up to 4, so Z must
    // span every monomial of degree 0..=4 in 2 variables: 1+2+3+4+5 = 15.
    assert_eq!(multiplier.z.len(), 15);
}

#[test]
fn polynomial_variable_cells_share_one_monomial_basis() {
    let mut state = State::new(GramMode::Dense);
    let n_vars = 2;
    let z = monomial_combinations(n_vars, 0..=1);
    let p = define_polynomial_variable(&mut state, "p", z.clone(), (2, 1), n_vars).unwrap();

    assert_eq!(p.expr.shape(), (2, 1));
    assert_eq!(p.distinct_symbols().len(), 2);
    for cell in p.expr.cells() {
        assert!(cell.support().len() <= z.len());
    }
}

#[test]
fn symmetric_matrix_variable_shares_symbols_across_the_diagonal() {
    let mut state = State::new(GramMode::Dense);
    let n_vars = 1;
    let z = vec![Monomial::one()];
    let q = define_symmetric_matrix_variable(&mut state, "q", z, 2, n_vars).unwrap();

    // (0, 1) and (1, 0) must carry the same underlying decision symbol.
    let off_diag_a = q.expr.get(0, 1);
    let off_diag_b = q.expr.get(1, 0);
    assert_eq!(off_diag_a.decision_symbols(), off_diag_b.decision_symbols());
}

#[test]
fn unconstrained_domain_has_no_inequalities_or_equalities() {
    let domain = SemialgebraicSet::new();
    assert!(domain.is_empty());
    assert_eq!(domain.max_degree(), 0);
    let _ = Polynomial::zero(1);
}
