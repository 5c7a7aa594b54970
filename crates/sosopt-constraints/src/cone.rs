//! Cone constraint primitives — normal form.
//!
//! Every polynomial constraint (SOS, zero-equality, Putinar) bottoms out in
//! one or more [`ConePrimitive`]s: a name traceable back to the user, a
//! vector of expressions affine in the decision variables, and a kind tag.
//! This is the shape the conic problem assembler and the solver adapters
//! actually consume.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use sosopt_core::SosOptError;
use sosopt_poly::AffineExpr;

/// The cone a primitive's vector is constrained to lie in.
///
/// `Linear` is carried for completeness but reserved-but-unimplemented: no
/// public constructor produces `Linear` primitives today, only
/// `Sdp`/`Equality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConeKind {
    /// Positive semidefinite cone; `size` is the Gram matrix's side length,
    /// so the vector has `size * size` entries (row-major vectorization).
    Sdp { size: usize },
    /// Zero cone (equality).
    Equality,
    /// Non-negative orthant. Reserved; not yet constructible.
    Linear,
}

/// One cone constraint, in the normal form the assembler consumes.
#[derive(Debug, Clone)]
pub struct ConePrimitive {
    pub name: String,
    pub kind: ConeKind,
    vector: Vec<AffineExpr>,
}

impl ConePrimitive {
    pub fn sdp(name: impl Into<String>, size: usize, vector: Vec<AffineExpr>) -> Result<Self, SosOptError> {
        if vector.len() != size * size {
            return Err(SosOptError::ShapeMismatch(format!(
                "SDP primitive '{}' expected {} entries for size {}, got {}",
                name.into(),
                size * size,
                size,
                vector.len()
            )));
        }
        Ok(ConePrimitive {
            name: name.into(),
            kind: ConeKind::Sdp { size },
            vector,
        })
    }

    /// Build an equality primitive, filtering out identically-zero rows.
    pub fn equality(name: impl Into<String>, vector: Vec<AffineExpr>) -> Self {
        let vector = vector.into_iter().filter(|e| !e.is_zero(1e-12)).collect();
        ConePrimitive {
            name: name.into(),
            kind: ConeKind::Equality,
            vector,
        }
    }

    /// The affine expression the solver sees.
    pub fn to_constraint_vector(&self) -> &[AffineExpr] {
        &self.vector
    }

    pub fn decision_variable_symbols(&self) -> BTreeSet<usize> {
        let mut out = BTreeSet::new();
        for e in &self.vector {
            out.extend(e.decision_symbols());
        }
        out
    }

    /// Substitute known decision values.
    ///
    /// Returns `Ok(None)` if every decision variable this primitive
    /// references was substituted and the resulting numeric constraint is
    /// satisfied — the primitive becomes a numerical check, discarded
    /// unless it fails. Returns `Ok(Some(primitive))` with the substitution
    /// folded in if some symbols remain free. Returns
    /// [`SosOptError::InfeasibleSubstitution`] if fully resolved but
    /// violated.
    pub fn eval(&self, values: &BTreeMap<usize, f64>) -> Result<Option<ConePrimitive>, SosOptError> {
        let substituted: Vec<AffineExpr> = self.vector.iter().map(|e| e.substitute(values)).collect();
        let tol = 1e-9;
        let resolved: Option<Vec<f64>> = substituted
            .iter()
            .map(|e| e.as_constant(tol))
            .collect::<Option<Vec<f64>>>();

        let Some(numeric) = resolved else {
            return Ok(Some(ConePrimitive {
                name: self.name.clone(),
                kind: self.kind,
                vector: substituted,
            }));
        };

        let feasible = match self.kind {
            ConeKind::Equality => numeric.iter().all(|v| v.abs() <= tol),
            ConeKind::Linear => numeric.iter().all(|v| *v >= -tol),
            ConeKind::Sdp { size } => crate::smr::is_positive_semidefinite(&numeric, size, tol),
        };

        if feasible {
            Ok(None)
        } else {
            Err(SosOptError::InfeasibleSubstitution {
                name: self.name.clone(),
                detail: format!("{:?} constraint violated after full substitution", self.kind),
            })
        }
    }
}
