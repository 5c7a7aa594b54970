//! Conic problem assembler.
//!
//! Takes a linear cost, an optional quadratic cost, and a flat list of cone
//! primitives already lowered by `sosopt-constraints`, and produces the
//! flat-array [`SolverArgs`] contract both solver adapters consume.

use std::collections::{BTreeMap, BTreeSet};

use sosopt_core::{Symbol, SymbolKind, SosOptError, SosOptResult, State};
use sosopt_poly::AffineExpr;

use sosopt_constraints::{ConeKind, ConePrimitive};

/// One cone block in dense flat-array form: `len(constant)` rows, each row
/// `constant[i] + Σ_k linear[i][k] · x_{indices[k]}`.
#[derive(Debug, Clone)]
pub struct ConeBlock {
    pub name: String,
    pub constant: Vec<f64>,
    pub linear: Vec<Vec<f64>>,
}

/// `(const, linear)` lowering of the scalar linear cost.
#[derive(Debug, Clone)]
pub struct LinearCost {
    pub constant: f64,
    pub linear: Vec<f64>,
}

/// The flat-array solver contract.
#[derive(Debug, Clone)]
pub struct SolverArgs {
    /// Every referenced decision symbol's range, sorted by start index.
    pub indices: Vec<(Symbol, usize, usize)>,
    pub lin_cost: LinearCost,
    /// Semidefinite blocks, one per SOS/Putinar Gram matrix.
    pub s_data: Vec<ConeBlock>,
    /// Reserved for standalone linear-inequality blocks: always empty today.
    pub l_data: Vec<ConeBlock>,
    /// Linear-equality blocks.
    pub eq_data: Vec<ConeBlock>,
    /// Second-order-cone blocks introduced by the quadratic-cost rewrite,
    /// each the `(p, s, w)` linear change of variables of a rotated SOC
    /// `2·t·(1/2) >= ||w||^2` (`p = (t+1/2)/sqrt(2)`, `s = (t-1/2)/sqrt(2)`).
    /// Not part of the user-facing `{Sdp, Equality, Linear}`
    /// cone-primitive taxonomy — this is assembler-internal plumbing for
    /// the one objective-side case that genuinely needs a cone Clarabel
    /// supports natively but which no polynomial constraint
    /// ever lowers to.
    pub soc_data: Vec<ConeBlock>,
    /// Total flat width of the primal vector this problem's columns span.
    pub n_vars: usize,
}

impl SolverArgs {
    /// `SUPPLEMENTED` (from `examples/debugconicproblem.py`): a short,
    /// human-readable summary of the assembled problem's shape.
    pub fn describe(&self) -> String {
        format!(
            "SolverArgs {{ vars: {}, symbols: {}, sdp_blocks: {}, eq_rows: {}, soc_blocks: {} }}",
            self.n_vars,
            self.indices.len(),
            self.s_data.len(),
            self.eq_data.iter().map(|b| b.constant.len()).sum::<usize>(),
            self.soc_data.len(),
        )
    }
}

impl std::fmt::Display for SolverArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Assemble a [`SolverArgs`] from a linear cost, optional quadratic cost,
/// and the cone primitives a constraint construction pass produced.
///
/// `solver_accepts_quadratic` models §4.8's adapter capability check: when
/// `false` (both shipped adapters are `false`) and `quad_cost` is present,
/// the quadratic-cost rewrite (step 5) runs before flattening.
pub fn assemble(
    state: &mut State,
    lin_cost: AffineExpr,
    quad_cost: Option<Vec<AffineExpr>>,
    constraints: Vec<ConePrimitive>,
    solver_accepts_quadratic: bool,
) -> SosOptResult<SolverArgs> {
    tracing::info!(
        constraints = constraints.len(),
        has_quad_cost = quad_cost.is_some(),
        solver_accepts_quadratic,
        "assembling conic problem"
    );
    let mut referenced: BTreeSet<usize> = BTreeSet::new();
    referenced.extend(lin_cost.decision_symbols());
    for c in &constraints {
        referenced.extend(c.decision_variable_symbols());
    }
    if let Some(q) = &quad_cost {
        for e in q {
            referenced.extend(e.decision_symbols());
        }
    }

    let mut lin_cost = lin_cost;
    let mut soc_data = Vec::new();

    if let (Some(q), false) = (quad_cost, solver_accepts_quadratic) {
        tracing::warn!("selected solver cannot accept a native quadratic cost; rewriting via rotated-SOC epigraph");
        let t = Symbol::new("_quad_cost_epigraph", SymbolKind::Auxiliary);
        let (t_start, _) = state.allocate(t, 1)?;
        referenced.insert(t_start);
        lin_cost = lin_cost.add(&AffineExpr::variable(t_start));

        // Rotated second-order cone: {(u, v, w) : u, v >= 0, 2uv >= ||w||^2}
        // certifies t = u >= ||quad_cost||^2 when v is pinned to the
        // constant 1/2. Clarabel exposes only the plain SOC, so fold in the
        // standard linear change of variables p = (u+v)/sqrt(2),
        // s = (u-v)/sqrt(2), under which 2uv - ||w||^2 >= 0 becomes
        // p >= ||(s, w)||_2, a plain SOC on (p, s, w).
        let u = AffineExpr::variable(t_start);
        let v = AffineExpr::constant(0.5);
        let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        let p = u.add(&v).scale(inv_sqrt2);
        let s = u.sub(&v).scale(inv_sqrt2);

        let mut vector = Vec::with_capacity(q.len() + 2);
        vector.push(p);
        vector.push(s);
        vector.extend(q);

        // Flatten the (p, s, w) vector directly into its own block; columns
        // are resolved once the full referenced set (including `t`) below.
        soc_data.push(RawBlock {
            name: "_quad_cost_soc".to_string(),
            vector,
        });
    }

    // Map every referenced scalar flat index (spanning possibly disjoint
    // owning symbols) to its local column in the flattened problem.
    let mut symbols: Vec<(Symbol, usize, usize)> = Vec::new();
    for idx in &referenced {
        if let Some(sym) = state.symbol_at(*idx) {
            if !symbols.iter().any(|(s, _, _)| s == sym) {
                let (start, stop) = state.range_of(sym)?;
                symbols.push((sym.clone(), start, stop));
            }
        } else {
            return Err(SosOptError::UnknownSymbol(format!("flat index {idx} has no owning symbol")));
        }
    }
    symbols.sort_by_key(|(_, start, _)| *start);

    let mut col_of: BTreeMap<usize, usize> = BTreeMap::new();
    let mut n_vars = 0usize;
    for (_, start, stop) in &symbols {
        for global in *start..*stop {
            col_of.insert(global, n_vars);
            n_vars += 1;
        }
    }

    let lower_affine = |e: &AffineExpr| -> (f64, Vec<f64>) {
        let mut row = vec![0.0; n_vars];
        for (idx, coeff) in &e.linear {
            if let Some(&col) = col_of.get(idx) {
                row[col] = *coeff;
            }
        }
        (e.constant, row)
    };

    let lower_block = |name: &str, vector: &[AffineExpr]| -> ConeBlock {
        let mut constant = Vec::with_capacity(vector.len());
        let mut linear = Vec::with_capacity(vector.len());
        for e in vector {
            let (c, row) = lower_affine(e);
            constant.push(c);
            linear.push(row);
        }
        ConeBlock {
            name: name.to_string(),
            constant,
            linear,
        }
    };

    let mut s_data = Vec::new();
    let mut l_data = Vec::new();
    let mut eq_data = Vec::new();
    for c in &constraints {
        let block = lower_block(&c.name, c.to_constraint_vector());
        match c.kind {
            ConeKind::Sdp { .. } => s_data.push(block),
            ConeKind::Equality => eq_data.push(block),
            ConeKind::Linear => l_data.push(block),
        }
    }

    let soc_data: Vec<ConeBlock> = soc_data
        .into_iter()
        .map(|raw| lower_block(&raw.name, &raw.vector))
        .collect();

    let (lin_const, lin_linear) = lower_affine(&lin_cost);

    tracing::debug!(
        n_vars,
        sdp_blocks = s_data.len(),
        eq_rows = eq_data.len(),
        soc_blocks = soc_data.len(),
        "conic problem assembled"
    );

    Ok(SolverArgs {
        indices: symbols,
        lin_cost: LinearCost {
            constant: lin_const,
            linear: lin_linear,
        },
        s_data,
        l_data,
        eq_data,
        soc_data,
        n_vars,
    })
}

/// Intermediate representation for a cone block whose columns haven't been
/// resolved against the final referenced-symbol set yet.
struct RawBlock {
    name: String,
    vector: Vec<AffineExpr>,
}
