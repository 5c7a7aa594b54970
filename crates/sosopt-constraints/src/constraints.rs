//! Polynomial constraints: SOS, zero-equality, and Putinar.
//!
//! Each constructor lowers a user-facing polynomial constraint into the
//! [`ConePrimitive`] normal form the conic assembler consumes.

use sosopt_core::{GramMode, SosOptError, SosOptResult, State};
use sosopt_poly::monomial::round_up_even;
use sosopt_poly::multiplier::synthesize_multiplier;
use sosopt_poly::{PolyMatrix, Polynomial, SemialgebraicSet};

use crate::cone::ConePrimitive;
use crate::smr::{gram_factorize, gram_to_primitives};

/// Resolve the `{greater_than_zero, less_than_zero}` tie-break:
/// negate `less_than_zero` if that's the only side given; error if neither
/// is given.
fn resolve_condition(
    name: &str,
    greater_than_zero: Option<PolyMatrix>,
    less_than_zero: Option<PolyMatrix>,
) -> SosOptResult<PolyMatrix> {
    match (greater_than_zero, less_than_zero) {
        (Some(g), _) => Ok(g),
        (None, Some(l)) => Ok(l.transpose_negate()),
        (None, None) => Err(SosOptError::ConstraintIncomplete { name: name.to_string() }),
    }
}

/// A matrix cannot be negated in place without owning its cells; this is a
/// tiny helper kept local to this module since no other lowering step needs
/// a whole-matrix negation.
trait NegateMatrix {
    fn transpose_negate(self) -> PolyMatrix;
}
impl NegateMatrix for PolyMatrix {
    fn transpose_negate(self) -> PolyMatrix {
        let (rows, cols) = self.shape();
        let cells: Vec<Polynomial> = self.cells().iter().map(|p| p.neg()).collect();
        PolyMatrix::from_cells(rows, cols, cells).expect("shape preserved by negation")
    }
}

/// Build the SOS primitives (`p >= 0`) for every cell of the resolved
/// condition matrix.
pub fn sos_constraint(
    state: &mut State,
    name: &str,
    greater_than_zero: Option<PolyMatrix>,
    less_than_zero: Option<PolyMatrix>,
    n_vars: usize,
) -> SosOptResult<Vec<ConePrimitive>> {
    let condition = resolve_condition(name, greater_than_zero, less_than_zero)?;
    let (rows, cols) = condition.shape();
    let mode = state.gram_mode();
    tracing::info!(constraint = name, rows, cols, ?mode, "lowering SOS constraint");
    let mut primitives = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let cell_name = sosopt_poly::decisionvar::cell_name(name, row, col, rows, cols);
            primitives.extend(sos_cell_primitives(state, &cell_name, condition.get(row, col), n_vars, mode)?);
        }
    }
    tracing::debug!(constraint = name, primitives = primitives.len(), "SOS constraint lowered");
    Ok(primitives)
}

fn sos_cell_primitives(
    state: &mut State,
    name: &str,
    p: &Polynomial,
    n_vars: usize,
    mode: GramMode,
) -> SosOptResult<Vec<ConePrimitive>> {
    let factorization = gram_factorize(state, name, p, n_vars, mode)?;
    let (sdp, equality) = gram_to_primitives(name, &factorization)?;
    Ok(vec![sdp, equality])
}

/// Build the zero-equality primitives (`p == 0`) for every cell.
pub fn zero_equality_constraint(name: &str, p: PolyMatrix) -> SosOptResult<Vec<ConePrimitive>> {
    let (rows, cols) = p.shape();
    tracing::info!(constraint = name, rows, cols, "lowering zero-equality constraint");
    let mut primitives = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let cell_name = sosopt_poly::decisionvar::cell_name(name, row, col, rows, cols);
            let cell = p.get(row, col);
            let basis = cell.support();
            primitives.push(ConePrimitive::equality(cell_name, cell.coefficient_vector(&basis)));
        }
    }
    Ok(primitives)
}

/// Build the Putinar certificate primitives for `condition >= 0 on domain`:
/// one reduced-polynomial SOS primitive per cell, one multiplier-SOS
/// primitive per inequality constraint per cell, and the multipliers
/// themselves folded into the reduced polynomial by subtraction.
pub fn putinar_constraint(
    state: &mut State,
    name: &str,
    condition: PolyMatrix,
    domain: &SemialgebraicSet,
    n_vars: usize,
) -> SosOptResult<Vec<ConePrimitive>> {
    let mode = state.gram_mode();
    let (rows, cols) = condition.shape();
    let domain_degree = domain.max_degree();
    if domain.is_empty() {
        tracing::warn!(constraint = name, "Putinar constraint has an empty domain, reduces to plain SOS");
    }
    tracing::info!(
        constraint = name,
        rows,
        cols,
        inequalities = domain.inequalities.len(),
        equalities = domain.equalities.len(),
        "lowering Putinar constraint"
    );
    let mut primitives = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let cell_name = sosopt_poly::decisionvar::cell_name(name, row, col, rows, cols);
            let cell = condition.get(row, col);
            let reduction = putinar_reduce_cell(state, &cell_name, cell, domain, domain_degree, n_vars)?;

            primitives.extend(sos_cell_primitives(state, &format!("{cell_name}_reduced"), &reduction.reduced, n_vars, mode)?);
            for (mult_name, multiplier) in reduction.inequality_multipliers {
                let sigma = multiplier.expr.into_scalar()?;
                primitives.extend(sos_cell_primitives(state, &mult_name, &sigma, n_vars, mode)?);
            }
        }
    }

    Ok(primitives)
}

/// The Putinar reduction for a single cell: `cell` minus every inequality
/// multiplier term `μ_i·g_i` and equality multiplier term `ν_j·h_j`, plus
/// the inequality multipliers themselves (each of which still needs its own
/// SOS certificate; equality multipliers carry no sign and need none).
///
/// Property (spec §8 #5, "Putinar zeroing"): `reduced + Σ μ_i·g_i + Σ ν_j·h_j
/// == cell` identically, by construction.
struct PutinarReduction {
    reduced: Polynomial,
    inequality_multipliers: Vec<(String, sosopt_poly::PolynomialVariable)>,
}

fn putinar_reduce_cell(
    state: &mut State,
    cell_name: &str,
    cell: &Polynomial,
    domain: &SemialgebraicSet,
    domain_degree: u32,
    n_vars: usize,
) -> SosOptResult<PutinarReduction> {
    let target_degree = round_up_even(domain_degree.max(cell.degree()) as i64);

    let mut reduced = cell.clone();
    let mut inequality_multipliers = Vec::new();

    for (g_name, g) in &domain.inequalities {
        let mult_name = format!("{cell_name}_mult_{g_name}");
        let multiplier = synthesize_multiplier(state, &mult_name, n_vars, target_degree, g.degree())?;
        let term = multiplier.expr.clone().into_scalar()?.mul_numeric(g)?;
        reduced = reduced.sub(&term);
        inequality_multipliers.push((mult_name, multiplier));
    }
    for (h_name, h) in &domain.equalities {
        let mult_name = format!("{cell_name}_mult_{h_name}");
        let multiplier = synthesize_multiplier(state, &mult_name, n_vars, target_degree, h.degree())?;
        // Equality multipliers carry no sign restriction; always
        // subtract `multiplier * h_j` uniformly.
        let term = multiplier.expr.into_scalar()?.mul_numeric(h)?;
        reduced = reduced.sub(&term);
    }

    Ok(PutinarReduction {
        reduced,
        inequality_multipliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sosopt_core::GramMode;
    use sosopt_poly::Polynomial;

    #[test]
    fn missing_both_sides_is_constraint_incomplete() {
        let err = resolve_condition("c", None, None).unwrap_err();
        assert!(matches!(err, SosOptError::ConstraintIncomplete { .. }));
    }

    #[test]
    fn less_than_zero_negates() {
        let n = 1;
        let p = PolyMatrix::scalar(Polynomial::constant(n, 3.0));
        let resolved = resolve_condition("c", None, Some(p)).unwrap();
        assert_eq!(resolved.into_scalar().unwrap().coefficient(&sosopt_poly::Monomial::one()).constant, -3.0);
    }

    #[test]
    fn sos_constraint_on_constant_emits_one_sdp_and_one_equality() {
        let mut state = State::new(GramMode::Dense);
        let n = 1;
        let p = PolyMatrix::scalar(Polynomial::constant(n, 4.0));
        let primitives = sos_constraint(&mut state, "c", Some(p), None, n).unwrap();
        assert_eq!(primitives.len(), 2);
    }

    #[test]
    fn putinar_reduction_satisfies_zeroing_identity() {
        // Property 5 (Putinar zeroing): reduced + Σ μ_i·g_i == cell as a
        // symbolic identity in the decision variables, not just after
        // substituting numeric values for the multipliers.
        let mut state = State::new(GramMode::Dense);
        let n = 1;
        let cell = Polynomial::variable(n, 0).mul_numeric(&Polynomial::variable(n, 0)).unwrap(); // x^2
        let domain = SemialgebraicSet::new().with_inequality("g", Polynomial::constant(n, 1.0));
        let domain_degree = domain.max_degree();

        let reduction = putinar_reduce_cell(&mut state, "c", &cell, &domain, domain_degree, n).unwrap();
        assert_eq!(reduction.inequality_multipliers.len(), 1);

        let (_, g) = domain.inequalities.iter().next().unwrap();
        let mut reconstructed = reduction.reduced.clone();
        for (_, multiplier) in &reduction.inequality_multipliers {
            let term = multiplier.expr.clone().into_scalar().unwrap().mul_numeric(g).unwrap();
            reconstructed = reconstructed.add(&term);
        }

        assert!(cell.sub(&reconstructed).is_zero_poly());
    }

    #[test]
    fn putinar_with_empty_domain_reduces_to_plain_sos() {
        let mut state = State::new(GramMode::Dense);
        let n = 1;
        let p = PolyMatrix::scalar(Polynomial::constant(n, 1.0));
        let domain = SemialgebraicSet::new();
        let primitives = putinar_constraint(&mut state, "c", p, &domain, n).unwrap();
        // no multipliers synthesized, just the reduced-polynomial SOS pair
        assert_eq!(primitives.len(), 2);
    }
}
