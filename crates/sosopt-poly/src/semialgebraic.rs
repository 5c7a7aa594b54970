//! Semialgebraic set model: a pair of named polynomial maps
//! defining `{x : ∀i g_i(x) >= 0 ∧ ∀j h_j(x) = 0}`.

use std::collections::BTreeMap;

use crate::polynomial::Polynomial;

#[derive(Clone, Debug, Default)]
pub struct SemialgebraicSet {
    pub inequalities: BTreeMap<String, Polynomial>,
    pub equalities: BTreeMap<String, Polynomial>,
}

impl SemialgebraicSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inequality(mut self, name: impl Into<String>, g: Polynomial) -> Self {
        self.inequalities.insert(name.into(), g);
        self
    }

    pub fn with_equality(mut self, name: impl Into<String>, h: Polynomial) -> Self {
        self.equalities.insert(name.into(), h);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.inequalities.is_empty() && self.equalities.is_empty()
    }

    /// Maximum total degree across every inequality/equality polynomial in
    /// the domain. `0` for an empty domain.
    pub fn max_degree(&self) -> u32 {
        self.inequalities
            .values()
            .chain(self.equalities.values())
            .map(|p| p.degree())
            .max()
            .unwrap_or(0)
    }

    /// `SUPPLEMENTED` (from `examples/boxconstraints.py`): build the paired
    /// `(x_i - lo_i) >= 0, (up_i - x_i) >= 0` inequality family for a box
    /// `[lo, up]^n`, a convenience wrapper over `with_inequality`.
    pub fn box_constraints(n_vars: usize, lower: &[f64], upper: &[f64]) -> Self {
        let mut set = Self::new();
        for (i, (&lo, &up)) in lower.iter().zip(upper.iter()).enumerate() {
            let x_i = Polynomial::variable(n_vars, i);
            let lower_g = x_i.sub(&Polynomial::constant(n_vars, lo));
            let upper_g = Polynomial::constant(n_vars, up).sub(&x_i);
            set = set
                .with_inequality(format!("box_lower_{i}"), lower_g)
                .with_inequality(format!("box_upper_{i}"), upper_g);
        }
        set
    }
}
