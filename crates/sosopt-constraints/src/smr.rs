//! Square matricial representation / Gram factorization.
//!
//! Given a scalar polynomial `p`, find `(Q, Z)` with `p = Zᵀ Q Z`, `Q`
//! symmetric. `Q`'s entries are themselves fresh decision variables (scalar,
//! not polynomials over `x`): the basis `Z` fixes how many entries `Q` has,
//! and whenever that count exceeds the number of monomials `p` actually
//! carries, the extra entries are genuinely free — they *are* the
//! null-space parametrization, with no separate bookkeeping required.

use std::collections::BTreeMap;

use sosopt_core::{GramMode, Symbol, SymbolKind, SosOptError, SosOptResult, State};
use sosopt_poly::{AffineExpr, Monomial, Polynomial};

use crate::cone::ConePrimitive;

/// The result of factoring `p` as `Zᵀ Q Z`.
pub struct GramFactorization {
    /// The monomial basis `Z`.
    pub z: Vec<Monomial>,
    /// `Q`, row-major, symmetric (`q[i][j] == q[j][i]`).
    pub q: Vec<Vec<AffineExpr>>,
    /// One scalar symbol per distinct `Q` entry (`i <= j`).
    pub q_symbols: Vec<Symbol>,
    /// `p − Zᵀ Q Z`, which the caller must constrain to be identically zero.
    pub residual: Polynomial,
}

/// Allocate a fresh `n x n` symmetric matrix of scalar decision variables,
/// sharing the symbol between `(i, j)` and `(j, i)` for `i <= j` — the same
/// sharing rule `sosopt_poly::decisionvar::define_symmetric_matrix_variable`
/// uses for polynomial-valued cells, specialized to plain scalars here since
/// Gram entries carry no monomial basis of their own.
fn symmetric_scalar_matrix(
    state: &mut State,
    name: &str,
    n: usize,
) -> SosOptResult<(Vec<Symbol>, Vec<Vec<AffineExpr>>)> {
    let mut symbols = vec![None; n * n];
    let mut q = vec![vec![AffineExpr::zero(); n]; n];

    for i in 0..n {
        for j in i..n {
            let cname = sosopt_poly::decisionvar::cell_name(name, i, j, n, n);
            let sym = Symbol::new(cname, SymbolKind::Decision);
            let (start, _stop) = state.allocate(sym.clone(), 1)?;
            let expr = AffineExpr::variable(start);
            symbols[i * n + j] = Some(sym.clone());
            symbols[j * n + i] = Some(sym);
            q[i][j] = expr.clone();
            q[j][i] = expr;
        }
    }

    let symbols = symbols.into_iter().map(|s| s.unwrap()).collect();
    Ok((symbols, q))
}

/// Dense-mode basis: every monomial of `x` up to `deg(p)/2`.
fn dense_basis(n_vars: usize, half_degree: u32) -> Vec<Monomial> {
    sosopt_poly::monomial::monomial_combinations(n_vars, 0..=half_degree)
}

/// Sparse-mode basis: a Newton-polytope reduction. Only monomials whose
/// doubled exponent vector appears in `p`'s support can appear on the
/// diagonal of `Z ⊗ Z`, so `Z` is built from the halves of `p`'s own
/// even-exponent monomials (plus the constant monomial, since `1 ⊗ 1`
/// contributes to `p`'s constant term whenever `p` has one).
fn sparse_basis(p: &Polynomial) -> Vec<Monomial> {
    let mut basis = std::collections::BTreeSet::new();
    basis.insert(Monomial::one());
    for m in p.support() {
        if m.pairs().all(|(_, e)| e % 2 == 0) {
            let halved: Vec<(usize, u32)> = m.pairs().map(|(v, e)| (v, e / 2)).collect();
            basis.insert(Monomial::from_exponents(halved));
        }
    }
    basis.into_iter().collect()
}

/// Factor `p` as `Zᵀ Q Z` per the configured [`GramMode`].
pub fn gram_factorize(
    state: &mut State,
    name: &str,
    p: &Polynomial,
    n_vars: usize,
    mode: GramMode,
) -> SosOptResult<GramFactorization> {
    let z = match mode {
        GramMode::Dense => dense_basis(n_vars, p.degree().div_ceil(2)),
        GramMode::Sparse => sparse_basis(p),
    };
    if z.is_empty() {
        return Err(SosOptError::DegreeInferenceFailed(format!(
            "gram factorization '{name}' produced an empty monomial basis"
        )));
    }

    let (q_symbols, q) = symmetric_scalar_matrix(state, name, z.len())?;

    let mut zt_q_z = Polynomial::zero(n_vars);
    for i in 0..z.len() {
        for j in 0..z.len() {
            let m = z[i].mul(&z[j]);
            zt_q_z = zt_q_z.add(&Polynomial::monomial_term(n_vars, m, q[i][j].clone()));
        }
    }
    let residual = p.sub(&zt_q_z);

    Ok(GramFactorization {
        z,
        q,
        q_symbols,
        residual,
    })
}

/// Lower a [`GramFactorization`] into its two cone primitives: the PSD
/// constraint on `Q` and the equality constraint pinning `Zᵀ Q Z` to `p`.
pub fn gram_to_primitives(name: &str, factorization: &GramFactorization) -> SosOptResult<(ConePrimitive, ConePrimitive)> {
    let size = factorization.z.len();
    let mut vector = Vec::with_capacity(size * size);
    for row in &factorization.q {
        vector.extend(row.iter().cloned());
    }
    let sdp = ConePrimitive::sdp(format!("{name}_gram"), size, vector)?;

    let basis = factorization.residual.support();
    let equality = ConePrimitive::equality(
        format!("{name}_residual"),
        factorization.residual.coefficient_vector(&basis),
    );
    Ok((sdp, equality))
}

/// `SUPPLEMENTED` (from `examples/sosdecomposition.py`'s `to_gram_matrix`):
/// given a fully-numeric symmetric matrix (row-major, `size x size`) and its
/// basis `Z`, render the polynomial `Zᵀ Q Z` it represents. Used post-solve
/// to check a solved Gram matrix really does reconstruct the certified
/// polynomial.
pub fn to_gram_polynomial(n_vars: usize, z: &[Monomial], q: &[f64]) -> Polynomial {
    let size = z.len();
    let mut out = Polynomial::zero(n_vars);
    for i in 0..size {
        for j in 0..size {
            let coeff = q[i * size + j];
            if coeff != 0.0 {
                let m = z[i].mul(&z[j]);
                out = out.add(&Polynomial::monomial_term(n_vars, m, AffineExpr::constant(coeff)));
            }
        }
    }
    out
}

/// `SUPPLEMENTED` (from `examples/sosdecomposition.py`'s
/// `square_matricial_representation`): an SOS factorization `p = qᵀq` of a
/// solved, numerically symmetric positive-semidefinite Gram matrix, via a
/// (possibly rank-deficient) Cholesky-style decomposition `Q = LLᵀ` — the
/// rows of `L` are the square-root polynomials `q_i(x) = L[i,:]·Z`.
pub fn square_matricial_representation(z: &[Monomial], q: &[f64], tol: f64) -> SosOptResult<Vec<Vec<f64>>> {
    let n = z.len();
    let mut l = vec![vec![0.0f64; n]; n];
    for j in 0..n {
        let mut diag = q[j * n + j];
        for k in 0..j {
            diag -= l[j][k] * l[j][k];
        }
        if diag < -tol {
            return Err(SosOptError::DegreeInferenceFailed(
                "Gram matrix is not positive semidefinite".to_string(),
            ));
        }
        let diag = diag.max(0.0);
        l[j][j] = diag.sqrt();
        for i in (j + 1)..n {
            let mut value = q[i * n + j];
            for k in 0..j {
                value -= l[i][k] * l[j][k];
            }
            l[i][j] = if l[j][j] > tol { value / l[j][j] } else { 0.0 };
        }
    }
    Ok(l)
}

/// Simple LDLᵀ-style positive-semidefinite test for a fully numeric
/// symmetric matrix, used by [`crate::cone::ConePrimitive::eval`] once every
/// decision variable in an SDP primitive has been substituted.
pub fn is_positive_semidefinite(entries: &[f64], size: usize, tol: f64) -> bool {
    if size == 0 {
        return true;
    }
    let mut l = vec![vec![0.0f64; size]; size];
    for j in 0..size {
        let mut diag = entries[j * size + j];
        for k in 0..j {
            diag -= l[j][k] * l[j][k];
        }
        if diag < -tol {
            return false;
        }
        l[j][j] = diag.max(0.0).sqrt();
        for i in (j + 1)..size {
            let mut value = entries[i * size + j];
            for k in 0..j {
                value -= l[i][k] * l[j][k];
            }
            l[i][j] = if l[j][j] > tol { value / l[j][j] } else { 0.0 };
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use sosopt_core::GramMode;

    #[test]
    fn sos_example_gram_factorization_has_zero_residual_when_q_chosen_right() {
        // p = x^2, Z = (x), Q = [[1]]
        let n = 1;
        let p = Polynomial::variable(n, 0).mul_numeric(&Polynomial::variable(n, 0)).unwrap();
        let mut state = State::new(GramMode::Dense);
        let factorization = gram_factorize(&mut state, "q", &p, n, GramMode::Dense).unwrap();
        // residual has one free decision variable (the Q entry); substituting 1.0 zeroes it
        let mut values: BTreeMap<usize, f64> = BTreeMap::new();
        values.insert(0, 1.0);
        let substituted = factorization.residual.substitute(&values);
        assert!(substituted.is_zero_poly());
    }

    #[test]
    fn sos_round_trip_matches_spec_literal_example() {
        // Property 3 (SOS round-trip) / S2: p = x1^2 - x1*x2^2 + x2^4 + 1.
        // The Newton-polytope reduction yields exactly Z = (1, x1, x2^2),
        // and Q = [[1,0,0],[0,1,-1/2],[0,-1/2,1]] (indexed by whichever
        // order `gram_factorize` assigns to that basis) is positive
        // semidefinite and reconstructs p exactly.
        let n = 2;
        let x1 = Polynomial::variable(n, 0);
        let x2 = Polynomial::variable(n, 1);
        let x1_sq = x1.mul_numeric(&x1).unwrap();
        let x2_sq = x2.mul_numeric(&x2).unwrap();
        let x2_4 = x2_sq.mul_numeric(&x2_sq).unwrap();
        let p = x1_sq
            .sub(&x1.mul_numeric(&x2_sq).unwrap())
            .add(&x2_4)
            .add(&Polynomial::constant(n, 1.0));

        let mut state = State::new(GramMode::Sparse);
        let factorization = gram_factorize(&mut state, "p", &p, n, GramMode::Sparse).unwrap();
        assert_eq!(factorization.z.len(), 3);

        let one_idx = factorization.z.iter().position(|m| m.is_one()).unwrap();
        let x1_idx = factorization.z.iter().position(|m| *m == Monomial::var(0)).unwrap();
        let x2sq_idx = factorization
            .z
            .iter()
            .position(|m| m.exponent(1) == 2 && m.degree() == 2)
            .unwrap();

        let size = factorization.z.len();
        let mut q = vec![vec![0.0; size]; size];
        q[one_idx][one_idx] = 1.0;
        q[x1_idx][x1_idx] = 1.0;
        q[x2sq_idx][x2sq_idx] = 1.0;
        q[x1_idx][x2sq_idx] = -0.5;
        q[x2sq_idx][x1_idx] = -0.5;

        let mut values: BTreeMap<usize, f64> = BTreeMap::new();
        for i in 0..size {
            for j in 0..size {
                let sym = &factorization.q_symbols[i * size + j];
                let (start, _) = state.range_of(sym).unwrap();
                values.insert(start, q[i][j]);
            }
        }
        let substituted = factorization.residual.substitute(&values);
        assert!(substituted.is_zero_poly());

        // The same Q, run through the Cholesky-style SMR helper, recovers a
        // `p = qᵀq` decomposition whose expansion matches p within 1e-10.
        let flat: Vec<f64> = q.into_iter().flatten().collect();
        let l = square_matricial_representation(&factorization.z, &flat, 1e-9).unwrap();
        let mut reconstructed = Polynomial::zero(n);
        for row in &l {
            let mut row_poly = Polynomial::zero(n);
            for (k, coeff) in row.iter().enumerate() {
                if *coeff != 0.0 {
                    row_poly = row_poly.add(&Polynomial::monomial_term(n, factorization.z[k].clone(), AffineExpr::constant(*coeff)));
                }
            }
            reconstructed = reconstructed.add(&row_poly.mul_numeric(&row_poly).unwrap());
        }
        for m in p.support().iter().chain(reconstructed.support().iter()) {
            let expected = p.coefficient(m).as_constant(1e-12).unwrap();
            let got = reconstructed.coefficient(m).as_constant(1e-12).unwrap();
            assert!((expected - got).abs() < 1e-9, "mismatch at {m:?}: {expected} vs {got}");
        }
    }

    #[test]
    fn is_psd_accepts_identity_and_rejects_negative_diagonal() {
        assert!(is_positive_semidefinite(&[1.0, 0.0, 0.0, 1.0], 2, 1e-9));
        assert!(!is_positive_semidefinite(&[-1.0, 0.0, 0.0, 1.0], 2, 1e-9));
    }

    #[test]
    fn square_matricial_representation_reconstructs_identity() {
        let z = vec![Monomial::var(0)];
        let q = vec![4.0];
        let l = square_matricial_representation(&z, &q, 1e-9).unwrap();
        assert!((l[0][0] - 2.0).abs() < 1e-9);
    }
}
