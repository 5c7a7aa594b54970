//! Symbol & State registry.
//!
//! `State` is the process-wide, monotonically growing registry mapping each
//! declared symbol to a contiguous half-open index range in the global
//! decision-variable vector. It is threaded explicitly through every
//! construction operation — there is no global singleton (contrast with the
//! `once_cell::sync::Lazy` solver registry pattern this crate's predecessor
//! used for solver backends; that pattern is deliberately not reused here).

use hashbrown::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{SosOptError, SosOptResult};

/// Distinguishes user-declared decision symbols from symbols the engine
/// introduces internally (sparse-SMR auxiliary variables, Putinar
/// multipliers' own coefficients are still `Decision` — only slack variables
/// with no user-visible name are `Auxiliary`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A symbol the user (or a named constructor on their behalf) declared.
    Decision,
    /// A symbol introduced by the engine with no user-visible name, e.g. a
    /// sparse Gram factorization's null-space parametrization.
    Auxiliary,
}

/// Opaque identity for a named decision-variable block.
///
/// Symbols compare by identity (via an internal monotonic id), not by name:
/// names are a human-readable label, not a key. Two `Symbol`s constructed
/// with the same name in two different `State`s are unequal.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    name: String,
    kind: SymbolKind,
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

impl Symbol {
    /// Create a fresh symbol with a globally unique identity.
    ///
    /// The counter is process-wide (not per-`State`) purely so that two
    /// `Symbol`s never collide even if constructed before being registered
    /// in any `State` — it carries no other significance and is not itself
    /// state that construction operations observe or depend on.
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        let id = NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Symbol {}
impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Gram factorization mode, the single configuration knob of the engine —
/// a named enum instead of a bare bool for clarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GramMode {
    /// `Z` is the full monomial basis up to `deg(p)/2`. Simple, robust,
    /// introduces auxiliary variables only when the linear system relating
    /// `Q` to `p`'s coefficients is underdetermined.
    #[default]
    Dense,
    /// `Z` is reduced to the Newton-polytope support; yields smaller `Q` at
    /// the cost of the residual `p - ZᵀQZ` carrying more free terms, each of
    /// which becomes an extra row of the equality cone primitive
    /// `sosopt_constraints::gram_to_primitives` emits alongside the SDP one.
    Sparse,
}

/// The name/index registry threaded through every construction operation in
/// the lowering pipeline.
///
/// Every mutating operation consumes `self` by value and returns a new
/// `State` (or mutates in place behind `&mut State`, at the caller's
/// choice — both preserve "exactly one path mutates state at a time").
/// `indices` grows monotonically within a session; nothing is ever removed.
pub struct State {
    n_indices: usize,
    indices: HashMap<u64, (Symbol, usize, usize)>,
    order: Vec<u64>,
    gram_mode: GramMode,
}

impl Default for State {
    fn default() -> Self {
        Self::new(GramMode::Dense)
    }
}

impl State {
    /// Create a fresh, empty registry with the given Gram factorization mode.
    pub fn new(gram_mode: GramMode) -> Self {
        State {
            n_indices: 0,
            indices: HashMap::new(),
            order: Vec::new(),
            gram_mode,
        }
    }

    pub fn gram_mode(&self) -> GramMode {
        self.gram_mode
    }

    /// Total number of scalar decision indices allocated so far.
    pub fn n_indices(&self) -> usize {
        self.n_indices
    }

    /// Assign the next free contiguous range of size `length` to `symbol`.
    ///
    /// Fails with [`SosOptError::DuplicateSymbol`] if `symbol` is already
    /// registered in this `State`.
    pub fn allocate(&mut self, symbol: Symbol, length: usize) -> SosOptResult<(usize, usize)> {
        if self.indices.contains_key(&sym_key(&symbol)) {
            return Err(SosOptError::DuplicateSymbol(symbol.name().to_string()));
        }
        let start = self.n_indices;
        let stop = start + length;
        tracing::debug!(symbol = symbol.name(), start, stop, "allocate");
        let key = sym_key(&symbol);
        self.indices.insert(key, (symbol, start, stop));
        self.order.push(key);
        self.n_indices = stop;
        Ok((start, stop))
    }

    /// Look up the `[start, stop)` range for `symbol`.
    pub fn range_of(&self, symbol: &Symbol) -> SosOptResult<(usize, usize)> {
        self.indices
            .get(&sym_key(symbol))
            .map(|(_, start, stop)| (*start, *stop))
            .ok_or_else(|| SosOptError::UnknownSymbol(symbol.name().to_string()))
    }

    /// Reverse lookup: the symbol (if any) owning flat index `i`.
    ///
    /// Returns `None` for indices introduced by the algebra engine that have
    /// no user-visible symbol (e.g. raw auxiliary slack not wrapped in a
    /// [`SymbolKind::Auxiliary`] symbol).
    pub fn symbol_at(&self, i: usize) -> Option<&Symbol> {
        self.order.iter().find_map(|key| {
            let (sym, start, stop) = self.indices.get(key)?;
            if *start <= i && i < *stop {
                Some(sym)
            } else {
                None
            }
        })
    }

    /// All registered symbols, in allocation order.
    pub fn symbols_in_order(&self) -> impl Iterator<Item = &Symbol> {
        self.order.iter().map(|key| &self.indices.get(key).unwrap().0)
    }

}

fn sym_key(symbol: &Symbol) -> u64 {
    // Symbol::id is itself process-unique; reuse it directly as the map key
    // rather than re-deriving one from the name (names need not be globally
    // unique — only unique within one State, and id already guarantees that).
    symbol.id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_monotonic_and_disjoint() {
        let mut state = State::default();
        let a = Symbol::new("a", SymbolKind::Decision);
        let b = Symbol::new("b", SymbolKind::Decision);
        let (a_start, a_stop) = state.allocate(a, 2).unwrap();
        let (b_start, b_stop) = state.allocate(b, 3).unwrap();
        assert_eq!((a_start, a_stop), (0, 2));
        assert_eq!((b_start, b_stop), (2, 5));
        assert_eq!(state.n_indices(), 5);
    }

    #[test]
    fn duplicate_symbol_fails() {
        let mut state = State::default();
        let a = Symbol::new("a", SymbolKind::Decision);
        let a2 = a.clone();
        state.allocate(a, 1).unwrap();
        assert!(matches!(
            state.allocate(a2, 1),
            Err(SosOptError::DuplicateSymbol(_))
        ));
    }

    #[test]
    fn unknown_symbol_lookup_fails() {
        let state = State::default();
        let ghost = Symbol::new("ghost", SymbolKind::Decision);
        assert!(matches!(
            state.range_of(&ghost),
            Err(SosOptError::UnknownSymbol(_))
        ));
    }

    #[test]
    fn symbol_at_reverse_lookup() {
        let mut state = State::default();
        let a = Symbol::new("a", SymbolKind::Decision);
        state.allocate(a, 2).unwrap();
        let b = Symbol::new("b", SymbolKind::Decision);
        state.allocate(b, 3).unwrap();
        assert_eq!(state.symbol_at(0).unwrap().name(), "a");
        assert_eq!(state.symbol_at(1).unwrap().name(), "a");
        assert_eq!(state.symbol_at(2).unwrap().name(), "b");
        assert_eq!(state.symbol_at(4).unwrap().name(), "b");
        assert!(state.symbol_at(5).is_none());
    }
}
