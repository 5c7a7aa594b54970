//! Sparse multivariate polynomials with decision-affine coefficients.
//!
//! This is the algebra engine the rest of the crate is built on: variable
//! stacking, addition, multiplication by a numeric polynomial,
//! differentiation, degree inference, coefficient extraction against a
//! monomial basis, and decision-variable substitution.

use std::collections::{BTreeMap, BTreeSet};

use sosopt_core::SosOptError;

use crate::affine::AffineExpr;
use crate::monomial::{differentiate_monomial, Monomial};

/// A scalar polynomial in `n_vars` ambient variables, with each monomial's
/// coefficient an [`AffineExpr`] in the decision-variable vector.
///
/// A polynomial with every coefficient a bare constant (no `linear` terms)
/// is a *numeric* polynomial — the kind domain constraints (`g_i`, `h_j`)
/// and monomial bases are expressed in.
#[derive(Clone, Debug, Default)]
pub struct Polynomial {
    pub n_vars: usize,
    terms: BTreeMap<Monomial, AffineExpr>,
}

impl Polynomial {
    pub fn zero(n_vars: usize) -> Self {
        Polynomial {
            n_vars,
            terms: BTreeMap::new(),
        }
    }

    pub fn constant(n_vars: usize, c: f64) -> Self {
        let mut p = Self::zero(n_vars);
        if c != 0.0 {
            p.terms.insert(Monomial::one(), AffineExpr::constant(c));
        }
        p
    }

    /// A polynomial with a single monomial term.
    pub fn monomial_term(n_vars: usize, m: Monomial, coeff: AffineExpr) -> Self {
        let mut p = Self::zero(n_vars);
        p.set_term(m, coeff);
        p
    }

    /// Build a purely numeric polynomial from `(monomial, coefficient)` pairs.
    pub fn from_numeric_terms(n_vars: usize, terms: impl IntoIterator<Item = (Monomial, f64)>) -> Self {
        let mut p = Self::zero(n_vars);
        for (m, c) in terms {
            p.add_term(m, AffineExpr::constant(c));
        }
        p
    }

    /// The polynomial `x_var` (for building linear domain constraints, etc.)
    pub fn variable(n_vars: usize, var: usize) -> Self {
        Self::from_numeric_terms(n_vars, [(Monomial::var(var), 1.0)])
    }

    fn set_term(&mut self, m: Monomial, coeff: AffineExpr) {
        if coeff.is_zero(0.0) {
            self.terms.remove(&m);
        } else {
            self.terms.insert(m, coeff);
        }
    }

    fn add_term(&mut self, m: Monomial, coeff: AffineExpr) {
        let merged = match self.terms.get(&m) {
            Some(existing) => existing.add(&coeff),
            None => coeff,
        };
        self.set_term(m, merged);
    }

    /// Non-zero `(monomial, coefficient)` pairs, in monomial order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &AffineExpr)> {
        self.terms.iter()
    }

    pub fn coefficient(&self, m: &Monomial) -> AffineExpr {
        self.terms.get(m).cloned().unwrap_or_else(AffineExpr::zero)
    }

    pub fn is_zero_poly(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether this polynomial references no decision variable anywhere.
    pub fn is_numeric(&self) -> bool {
        self.terms.values().all(|c| c.linear.is_empty())
    }

    pub fn decision_symbols(&self) -> BTreeSet<usize> {
        let mut out = BTreeSet::new();
        for coeff in self.terms.values() {
            out.extend(coeff.decision_symbols());
        }
        out
    }

    /// Total degree: the maximum degree among non-zero terms. `0` for the
    /// zero polynomial.
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(|m| m.degree()).max().unwrap_or(0)
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (m, c) in other.terms.iter() {
            out.add_term(m.clone(), c.clone());
        }
        out
    }

    pub fn neg(&self) -> Polynomial {
        Polynomial {
            n_vars: self.n_vars,
            terms: self.terms.iter().map(|(m, c)| (m.clone(), c.neg())).collect(),
        }
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.neg())
    }

    pub fn scale(&self, k: f64) -> Polynomial {
        Polynomial {
            n_vars: self.n_vars,
            terms: self.terms.iter().map(|(m, c)| (m.clone(), c.scale(k))).collect(),
        }
    }

    /// Multiply by a numeric polynomial. Returns
    /// [`SosOptError::DegreeInferenceFailed`] if `other` is not numeric —
    /// multiplying two decision-affine polynomials would make the product
    /// bilinear in the decision vector, which this system never does.
    pub fn mul_numeric(&self, other: &Polynomial) -> Result<Polynomial, SosOptError> {
        if !other.is_numeric() {
            return Err(SosOptError::DegreeInferenceFailed(
                "attempted to multiply two decision-affine polynomials".to_string(),
            ));
        }
        let mut out = Polynomial::zero(self.n_vars);
        for (ma, ca) in self.terms.iter() {
            for (mb, cb) in other.terms.iter() {
                let cb_const = cb.constant; // other is numeric: no linear terms
                out.add_term(ma.mul(mb), ca.scale(cb_const));
            }
        }
        Ok(out)
    }

    /// Partial derivative with respect to ambient variable `var`.
    pub fn diff(&self, var: usize) -> Polynomial {
        let mut out = Polynomial::zero(self.n_vars);
        for (m, c) in self.terms.iter() {
            if let Some((scalar, reduced)) = differentiate_monomial(m, var) {
                out.add_term(reduced, c.scale(scalar));
            }
        }
        out
    }

    /// Substitute decision-variable values, folding them into coefficients.
    pub fn substitute(&self, values: &BTreeMap<usize, f64>) -> Polynomial {
        let mut out = Polynomial::zero(self.n_vars);
        for (m, c) in self.terms.iter() {
            out.set_term(m.clone(), c.substitute(values));
        }
        out
    }

    /// Coefficient vector of this polynomial w.r.t. a monomial basis `Z`:
    /// for each `Z_k`, the (possibly decision-affine) coefficient of that
    /// monomial in `self` (zero if `Z_k` does not appear).
    pub fn coefficient_vector(&self, basis: &[Monomial]) -> Vec<AffineExpr> {
        basis.iter().map(|m| self.coefficient(m)).collect()
    }

    /// All monomials appearing with non-zero coefficient, in order.
    pub fn support(&self) -> Vec<Monomial> {
        self.terms.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x0(n: usize) -> Polynomial {
        Polynomial::variable(n, 0)
    }
    fn x1(n: usize) -> Polynomial {
        Polynomial::variable(n, 1)
    }

    #[test]
    fn degree_of_sum_of_squares_example() {
        // p = x1^2 - x1*x2^2 + x2^4 + 1
        let n = 2;
        let x1p = x0(n);
        let x2p = x1(n);
        let p = x1p
            .mul_numeric(&x1p)
            .unwrap()
            .sub(&x1p.mul_numeric(&x2p.mul_numeric(&x2p).unwrap()).unwrap())
            .add(&x2p.mul_numeric(&x2p).unwrap().mul_numeric(&x2p.mul_numeric(&x2p).unwrap()).unwrap())
            .add(&Polynomial::constant(n, 1.0));
        assert_eq!(p.degree(), 4);
    }

    #[test]
    fn diff_reduces_degree() {
        let n = 1;
        let p = x0(n).mul_numeric(&x0(n)).unwrap(); // x^2
        let dp = p.diff(0); // 2x
        assert_eq!(dp.degree(), 1);
        assert_eq!(dp.coefficient(&Monomial::var(0)).constant, 2.0);
    }

    #[test]
    fn mul_of_two_affine_polys_fails() {
        use sosopt_core::{Symbol, SymbolKind};
        let n = 1;
        let sym = Symbol::new("c", SymbolKind::Decision);
        let _ = sym; // just need a distinct index
        let affine = Polynomial::monomial_term(n, Monomial::one(), AffineExpr::variable(0));
        let err = affine.mul_numeric(&affine);
        assert!(err.is_err());
    }

    #[test]
    fn coefficient_vector_extracts_in_basis_order() {
        let n = 1;
        let p = x0(n).add(&Polynomial::constant(n, 3.0));
        let basis = vec![Monomial::one(), Monomial::var(0), Monomial::from_exponents([(0, 2)])];
        let coeffs = p.coefficient_vector(&basis);
        assert_eq!(coeffs[0].constant, 3.0);
        assert_eq!(coeffs[1].constant, 1.0);
        assert_eq!(coeffs[2].constant, 0.0);
    }
}
