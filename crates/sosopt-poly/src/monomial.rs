//! Monomials in an ambient variable vector `x = (x_0, …, x_{n-1})`.
//!
//! A monomial is a sparse exponent vector: only variables with non-zero
//! exponent are stored, so the representation stays compact for the
//! high-arity, low-degree polynomials typical of SOS problems.

use std::collections::BTreeMap;

/// A single monomial `x_0^{e_0} · x_1^{e_1} · …`.
///
/// Stored as a sorted map from variable index to exponent; a variable with
/// exponent zero is never present, so two monomials are structurally equal
/// iff they denote the same monomial (no normalization step needed before
/// comparing or hashing).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<usize, u32>);

impl Monomial {
    /// The constant monomial `1`.
    pub fn one() -> Self {
        Monomial(BTreeMap::new())
    }

    /// The monomial `x_var` (exponent 1).
    pub fn var(var: usize) -> Self {
        let mut m = BTreeMap::new();
        m.insert(var, 1);
        Monomial(m)
    }

    /// Build a monomial from explicit `(variable, exponent)` pairs.
    /// Pairs with exponent 0 are dropped.
    pub fn from_exponents(pairs: impl IntoIterator<Item = (usize, u32)>) -> Self {
        let mut m = BTreeMap::new();
        for (var, exp) in pairs {
            if exp > 0 {
                *m.entry(var).or_insert(0) += exp;
            }
        }
        Monomial(m)
    }

    /// Total degree: the sum of all exponents.
    pub fn degree(&self) -> u32 {
        self.0.values().sum()
    }

    /// The exponent of `var` in this monomial (0 if absent).
    pub fn exponent(&self, var: usize) -> u32 {
        self.0.get(&var).copied().unwrap_or(0)
    }

    /// Variables with non-zero exponent, in increasing order.
    pub fn vars(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    /// `(variable, exponent)` pairs, in increasing variable order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0.iter().map(|(&v, &e)| (v, e))
    }

    /// Product of two monomials: exponents add componentwise.
    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut m = self.0.clone();
        for (&var, &exp) in other.0.iter() {
            *m.entry(var).or_insert(0) += exp;
        }
        Monomial(m)
    }

    /// Whether this is the constant monomial `1`.
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }
}

/// Derivative exponent bookkeeping: differentiating `x_var^e` w.r.t. `x_var`
/// yields `e · x_var^{e-1}` (or `0` if `e == 0`). Returns `None` when the
/// derivative is identically zero (monomial does not contain `var`).
pub fn differentiate_monomial(m: &Monomial, var: usize) -> Option<(f64, Monomial)> {
    let exp = m.exponent(var);
    if exp == 0 {
        return None;
    }
    let mut pairs: Vec<(usize, u32)> = m.pairs().collect();
    for pair in pairs.iter_mut() {
        if pair.0 == var {
            pair.1 -= 1;
        }
    }
    Some((exp as f64, Monomial::from_exponents(pairs)))
}

/// Round `n` up to the nearest even number.
pub fn round_up_even(n: i64) -> u32 {
    let n = n.max(0);
    (n + (n % 2)) as u32
}

/// Enumerate every monomial in `n_vars` variables whose total degree is one
/// of `degrees`.
pub fn monomial_combinations(n_vars: usize, degrees: impl IntoIterator<Item = u32>) -> Vec<Monomial> {
    let mut degrees: Vec<u32> = degrees.into_iter().collect();
    degrees.sort_unstable();
    degrees.dedup();

    let mut out = Vec::new();
    for &d in &degrees {
        enumerate_degree(n_vars, d, &mut Vec::new(), &mut out);
    }
    out
}

fn enumerate_degree(n_vars: usize, remaining: u32, acc: &mut Vec<u32>, out: &mut Vec<Monomial>) {
    if acc.len() == n_vars {
        if remaining == 0 {
            out.push(Monomial::from_exponents(
                acc.iter().enumerate().map(|(i, &e)| (i, e)),
            ));
        }
        return;
    }
    // last free variable absorbs whatever degree remains
    if acc.len() + 1 == n_vars {
        acc.push(remaining);
        enumerate_degree(n_vars, 0, acc, out);
        acc.pop();
        return;
    }
    for e in 0..=remaining {
        acc.push(e);
        enumerate_degree(n_vars, remaining - e, acc, out);
        acc.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_has_degree_zero() {
        assert_eq!(Monomial::one().degree(), 0);
        assert!(Monomial::one().is_one());
    }

    #[test]
    fn mul_adds_exponents() {
        let a = Monomial::var(0);
        let b = Monomial::var(0);
        let prod = a.mul(&b);
        assert_eq!(prod.exponent(0), 2);
        assert_eq!(prod.degree(), 2);
    }

    #[test]
    fn differentiate_drops_absent_variable() {
        let m = Monomial::var(1);
        assert!(differentiate_monomial(&m, 0).is_none());
        let (coeff, reduced) = differentiate_monomial(&m, 1).unwrap();
        assert_eq!(coeff, 1.0);
        assert!(reduced.is_one());
    }

    #[test]
    fn round_up_even_works() {
        assert_eq!(round_up_even(3), 4);
        assert_eq!(round_up_even(4), 4);
        assert_eq!(round_up_even(-1), 0);
    }

    #[test]
    fn combinations_enumerate_expected_count() {
        // degree-0 and degree-2 monomials in 2 variables: 1 + 3 = 4
        let combos = monomial_combinations(2, [0, 2]);
        assert_eq!(combos.len(), 4);
        assert!(combos.iter().all(|m| m.degree() == 0 || m.degree() == 2));
    }
}
