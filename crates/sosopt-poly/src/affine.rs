//! Affine expressions in the flat decision-variable vector.
//!
//! Every polynomial coefficient in this crate is an [`AffineExpr`]: a
//! constant plus a linear combination of decision-variable flat indices.
//! This is the algebraic structure the whole pipeline relies on — Gram
//! matrix entries, cost rows, and constraint rows are all affine in the
//! decision vector, never higher order: no bilinear or alternation search.

use std::collections::BTreeMap;

/// `constant + Σ linear[i] · x_i`, where `i` ranges over flat decision
/// indices (as assigned by `sosopt_core::State::allocate`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AffineExpr {
    pub constant: f64,
    pub linear: BTreeMap<usize, f64>,
}

impl AffineExpr {
    pub fn constant(c: f64) -> Self {
        AffineExpr {
            constant: c,
            linear: BTreeMap::new(),
        }
    }

    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    /// The expression `1.0 · x_index`.
    pub fn variable(index: usize) -> Self {
        let mut linear = BTreeMap::new();
        linear.insert(index, 1.0);
        AffineExpr {
            constant: 0.0,
            linear,
        }
    }

    /// Whether every term is (numerically) zero.
    pub fn is_zero(&self, tol: f64) -> bool {
        self.constant.abs() <= tol && self.linear.values().all(|c| c.abs() <= tol)
    }

    /// `Some(constant)` if this expression references no decision variable
    /// (or only ones with exactly zero coefficient).
    pub fn as_constant(&self, tol: f64) -> Option<f64> {
        if self.linear.values().all(|c| c.abs() <= tol) {
            Some(self.constant)
        } else {
            None
        }
    }

    pub fn decision_symbols(&self) -> impl Iterator<Item = usize> + '_ {
        self.linear.keys().copied()
    }

    pub fn add(&self, other: &AffineExpr) -> AffineExpr {
        let mut linear = self.linear.clone();
        for (&k, &v) in &other.linear {
            *linear.entry(k).or_insert(0.0) += v;
        }
        linear.retain(|_, v| v.abs() > 0.0);
        AffineExpr {
            constant: self.constant + other.constant,
            linear,
        }
    }

    pub fn neg(&self) -> AffineExpr {
        AffineExpr {
            constant: -self.constant,
            linear: self.linear.iter().map(|(&k, &v)| (k, -v)).collect(),
        }
    }

    pub fn sub(&self, other: &AffineExpr) -> AffineExpr {
        self.add(&other.neg())
    }

    pub fn scale(&self, k: f64) -> AffineExpr {
        AffineExpr {
            constant: self.constant * k,
            linear: self.linear.iter().map(|(&i, &v)| (i, v * k)).collect(),
        }
    }

    /// Substitute a subset of decision variables with numeric values,
    /// folding them into the constant. Variables not present in `values`
    /// are left symbolic.
    pub fn substitute(&self, values: &BTreeMap<usize, f64>) -> AffineExpr {
        let mut constant = self.constant;
        let mut linear = BTreeMap::new();
        for (&idx, &coeff) in &self.linear {
            match values.get(&idx) {
                Some(v) => constant += coeff * v,
                None => {
                    linear.insert(idx, coeff);
                }
            }
        }
        AffineExpr { constant, linear }
    }
}
