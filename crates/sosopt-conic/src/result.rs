//! Solver result contract and back-substitution.

use std::collections::BTreeMap;

use sosopt_core::{Symbol, SymbolKind};
use sosopt_solver_common::SolutionStatus;

/// What a solver adapter hands back after attempting one [`crate::problem::SolverArgs`].
#[derive(Debug, Clone)]
pub enum SolverResult {
    /// A primal vector was produced, regardless of whether it's fully optimal.
    SolutionFound {
        /// The raw primal vector, indexed by the same flat columns as
        /// `SolverArgs::n_vars`.
        solution: Vec<f64>,
        status: SolutionStatus,
        iterations: u32,
        cost: f64,
        is_successful: bool,
    },
    /// The solver terminated without a usable primal vector.
    SolutionNotFound { status: SolutionStatus },
}

impl SolverResult {
    pub fn status(&self) -> SolutionStatus {
        match self {
            SolverResult::SolutionFound { status, .. } => *status,
            SolverResult::SolutionNotFound { status } => *status,
        }
    }
}

/// One symbol's value, back-substituted out of a solver's flat primal vector.
///
/// `values` preserves the symbol's original shape: `values.len()` equals the
/// `length` the symbol was `allocate`d with.
#[derive(Debug, Clone)]
pub struct SymbolValue {
    pub symbol: Symbol,
    pub values: Vec<f64>,
}

/// Back-substitute a solver's raw primal vector into per-symbol values:
/// for each symbol packed into `indices`, locate its flat positions and
/// slice them out of `solution`. Only user-declared ([`SymbolKind::Decision`])
/// symbols are reported; engine-introduced [`SymbolKind::Auxiliary`] symbols
/// are skipped unless `include_auxiliary` is set, since callers normally only
/// care about the values they themselves declared.
pub fn back_substitute(
    indices: &[(Symbol, usize, usize)],
    solution: &[f64],
    include_auxiliary: bool,
) -> Vec<SymbolValue> {
    let mut local_offset = 0usize;
    let mut out = Vec::with_capacity(indices.len());
    for (symbol, start, stop) in indices {
        let len = stop - start;
        let values = solution[local_offset..local_offset + len].to_vec();
        if include_auxiliary || symbol.kind() == SymbolKind::Decision {
            out.push(SymbolValue {
                symbol: symbol.clone(),
                values,
            });
        }
        local_offset += len;
    }
    out
}

/// Look up one symbol's back-substituted values by name, if present.
pub fn find_by_name<'a>(values: &'a [SymbolValue], name: &str) -> Option<&'a SymbolValue> {
    values.iter().find(|v| v.symbol.name() == name)
}

/// Convenience map from symbol name to its back-substituted values, for
/// callers that just want a lookup table rather than an ordered list.
pub fn to_named_map(values: Vec<SymbolValue>) -> BTreeMap<String, Vec<f64>> {
    values
        .into_iter()
        .map(|v| (v.symbol.name().to_string(), v.values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sosopt_core::SymbolKind;

    #[test]
    fn back_substitution_slices_each_symbols_own_range() {
        let a = Symbol::new("a", SymbolKind::Decision);
        let b = Symbol::new("b", SymbolKind::Decision);
        let indices = vec![(a, 0usize, 2usize), (b, 2usize, 5usize)];
        let solution = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let values = back_substitute(&indices, &solution, false);
        assert_eq!(values[0].values, vec![1.0, 2.0]);
        assert_eq!(values[1].values, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn auxiliary_symbols_are_hidden_unless_requested() {
        let a = Symbol::new("a", SymbolKind::Decision);
        let slack = Symbol::new("slack", SymbolKind::Auxiliary);
        let indices = vec![(a, 0usize, 1usize), (slack, 1usize, 2usize)];
        let solution = vec![1.0, 2.0];

        let hidden = back_substitute(&indices, &solution, false);
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].values, vec![1.0]);

        let shown = back_substitute(&indices, &solution, true);
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn find_by_name_locates_the_right_symbol() {
        let a = Symbol::new("a", SymbolKind::Decision);
        let indices = vec![(a, 0usize, 1usize)];
        let values = back_substitute(&indices, &[7.0], false);
        let found = find_by_name(&values, "a").unwrap();
        assert_eq!(found.values, vec![7.0]);
        assert!(find_by_name(&values, "missing").is_none());
    }

    #[test]
    fn to_named_map_collects_every_symbol() {
        let a = Symbol::new("a", SymbolKind::Decision);
        let indices = vec![(a, 0usize, 1usize)];
        let values = back_substitute(&indices, &[9.0], false);
        let map = to_named_map(values);
        assert_eq!(map.get("a"), Some(&vec![9.0]));
    }
}
