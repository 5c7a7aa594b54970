//! End-to-end pipeline tests: declare a polynomial condition, lower it
//! through the SOS constraint constructor, assemble a conic problem, and
//! hand it to each shipped solver adapter.

use sosopt::solvers::{DenseConeAdapter, SparseSdpAdapter};
use sosopt::{
    assemble, back_substitute, find_by_name, sos_constraint, AffineExpr, GramMode, Polynomial,
    SolverAdapter, SolverResult, State, Symbol, SymbolKind,
};

/// `p(x) = x^2 + 1` is trivially SOS (it is already a sum of squares), so
/// both adapters should report an optimal, feasible solution.
fn build_args(mode: GramMode) -> sosopt::SolverArgs {
    let n_vars = 1;
    let mut state = State::new(mode);

    let x = Polynomial::variable(n_vars, 0);
    let p = x
        .mul_numeric(&x)
        .unwrap()
        .add(&Polynomial::constant(n_vars, 1.0));

    let condition = sosopt::PolyMatrix::scalar(p);
    let constraints = sos_constraint(&mut state, "p_sos", Some(condition), None, n_vars).unwrap();
    assemble(&mut state, AffineExpr::zero(), None, constraints, false).unwrap()
}

#[test]
fn dense_adapter_certifies_a_trivially_sos_polynomial() {
    let args = build_args(GramMode::Dense);
    let adapter = DenseConeAdapter::new();
    let result = adapter.solve(&args).unwrap();
    assert!(result.status().is_success(), "expected success, got {:?}", result.status());
}

#[test]
fn sparse_adapter_certifies_a_trivially_sos_polynomial() {
    let args = build_args(GramMode::Sparse);
    let adapter = SparseSdpAdapter::new();
    let result = adapter.solve(&args).unwrap();
    assert!(result.status().is_success(), "expected success, got {:?}", result.status());
}

/// Minimizing `||quad_cost||^2 = x^2` over a free decision variable `x`
/// (no other constraints) has the true minimum at `x = 0`, `cost = 0`. If
/// the rotated-SOC rewrite instead encoded the linear norm `||x||_2`, the
/// solver would still converge but the recovered `t`/cost relationship
/// would be wrong for any non-trivial quadratic cost; this scenario is the
/// simplest one where the rewrite is exercised end to end through a real
/// adapter.
#[test]
fn quadratic_cost_rewrite_solves_to_the_true_squared_norm_minimum() {
    let mut state = State::new(GramMode::Dense);
    let x = Symbol::new("x", SymbolKind::Decision);
    let (x_start, _) = state.allocate(x, 1).unwrap();

    let quad_cost = Some(vec![AffineExpr::variable(x_start)]);
    let args = assemble(&mut state, AffineExpr::zero(), quad_cost, Vec::new(), false).unwrap();

    let adapter = DenseConeAdapter::new();
    let result = adapter.solve(&args).unwrap();
    assert!(result.status().is_success(), "expected success, got {:?}", result.status());

    match result {
        SolverResult::SolutionFound { solution, cost, .. } => {
            assert!(cost.abs() < 1e-6, "expected cost ~= 0, got {cost}");
            let values = back_substitute(&args.indices, &solution, false);
            let x_value = find_by_name(&values, "x").unwrap();
            assert!(x_value.values[0].abs() < 1e-4, "expected x ~= 0, got {:?}", x_value.values);
        }
        SolverResult::SolutionNotFound { status } => panic!("expected a solution, got {status:?}"),
    }
}

#[test]
fn both_adapters_reject_reserved_linear_blocks() {
    use sosopt::ConeBlock;

    let mut args = build_args(GramMode::Dense);
    args.l_data.push(ConeBlock {
        name: "reserved".into(),
        constant: vec![0.0],
        linear: vec![vec![]],
    });

    assert!(DenseConeAdapter::new().solve(&args).is_err());
    assert!(SparseSdpAdapter::new().solve(&args).is_err());
}
