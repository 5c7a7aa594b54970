//! Decision polynomial variables.
//!
//! A polynomial variable bundles a name, a shared monomial basis `Z`, one
//! freshly allocated decision symbol per cell, and the reified expression
//! `cᵀ·Z` (or matrix thereof). Construction takes `&mut State` explicitly —
//! there is no implicit global registry to allocate against.

use sosopt_core::{GramMode, State, Symbol, SymbolKind};

use crate::affine::AffineExpr;
use crate::matrix::PolyMatrix;
use crate::monomial::Monomial;
use crate::polynomial::Polynomial;

/// A symbolic polynomial whose coefficients are decision variables.
#[derive(Clone, Debug)]
pub struct PolynomialVariable {
    pub name: String,
    pub shape: (usize, usize),
    /// The monomial basis `Z`, shared by every cell.
    pub z: Vec<Monomial>,
    pub n_vars: usize,
    /// One coefficient symbol per cell, row-major; for a symmetric matrix
    /// variable, the symbol for `(i, j)` and `(j, i)` (i <= j) are the same.
    pub symbols: Vec<Symbol>,
    /// The reified `r x c` matrix expression `cᵀ·Z` per cell.
    pub expr: PolyMatrix,
}

impl PolynomialVariable {
    /// All distinct coefficient symbols, in cell order (deduplicated for a
    /// symmetric matrix variable).
    pub fn distinct_symbols(&self) -> Vec<&Symbol> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for sym in &self.symbols {
            if seen.insert(sym.name().to_string()) {
                out.push(sym);
            }
        }
        out
    }
}

/// Cell-naming rule: `(1,1) -> name`; `(1,c) -> name{j+1}`;
/// `(r,1) -> name{i+1}`; `(r,c) -> name{i+1}{j+1}`.
pub fn cell_name(name: &str, row: usize, col: usize, rows: usize, cols: usize) -> String {
    match (rows, cols) {
        (1, 1) => name.to_string(),
        (1, _) => format!("{name}{}", col + 1),
        (_, 1) => format!("{name}{}", row + 1),
        _ => format!("{name}{}{}", row + 1, col + 1),
    }
}

/// Build the expression `cᵀ·Z` for a single cell given its coefficient
/// symbol's allocated flat range.
fn cell_expr(n_vars: usize, z: &[Monomial], start: usize) -> Polynomial {
    let mut p = Polynomial::zero(n_vars);
    for (k, m) in z.iter().enumerate() {
        let coeff = AffineExpr::variable(start + k);
        p = p.add(&Polynomial::monomial_term(n_vars, m.clone(), coeff));
    }
    p
}

/// Construct a general `r x c` decision polynomial variable.
///
/// Each cell `(i, j)` gets a fresh decision symbol of length `|z|`.
pub fn define_polynomial_variable(
    state: &mut State,
    name: &str,
    z: Vec<Monomial>,
    shape: (usize, usize),
    n_vars: usize,
) -> sosopt_core::SosOptResult<PolynomialVariable> {
    let (rows, cols) = shape;
    let mut symbols = Vec::with_capacity(rows * cols);
    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let cname = cell_name(name, row, col, rows, cols);
            let sym = Symbol::new(cname, SymbolKind::Decision);
            let (start, _stop) = state.allocate(sym.clone(), z.len())?;
            cells.push(cell_expr(n_vars, &z, start));
            symbols.push(sym);
        }
    }
    let expr = PolyMatrix::from_cells(rows, cols, cells)?;
    Ok(PolynomialVariable {
        name: name.to_string(),
        shape,
        z,
        n_vars,
        symbols,
        expr,
    })
}

/// Construct an `n x n` symmetric decision polynomial variable: the
/// coefficient symbol for `(i, j)` and `(j, i)` is shared whenever `i <= j`.
pub fn define_symmetric_matrix_variable(
    state: &mut State,
    name: &str,
    z: Vec<Monomial>,
    n: usize,
    n_vars: usize,
) -> sosopt_core::SosOptResult<PolynomialVariable> {
    let mut symbol_grid: Vec<Option<Symbol>> = vec![None; n * n];
    let mut cells = vec![Polynomial::zero(n_vars); n * n];

    for i in 0..n {
        for j in i..n {
            let cname = cell_name(name, i, j, n, n);
            let sym = Symbol::new(cname, SymbolKind::Decision);
            let (start, _stop) = state.allocate(sym.clone(), z.len())?;
            let expr = cell_expr(n_vars, &z, start);
            symbol_grid[i * n + j] = Some(sym.clone());
            symbol_grid[j * n + i] = Some(sym);
            cells[i * n + j] = expr.clone();
            cells[j * n + i] = expr;
        }
    }

    let symbols: Vec<Symbol> = symbol_grid.into_iter().map(|s| s.unwrap()).collect();
    let expr = PolyMatrix::from_cells(n, n, cells)?;
    Ok(PolynomialVariable {
        name: name.to_string(),
        shape: (n, n),
        z,
        n_vars,
        symbols,
        expr,
    })
}

/// Honor the configured [`GramMode`] when a caller wants to pick a default
/// monomial basis size heuristic; exposed so higher layers don't need to
/// match on the mode themselves.
pub fn default_half_degree(mode: GramMode, poly_degree: u32) -> u32 {
    match mode {
        GramMode::Dense => poly_degree.div_ceil(2),
        GramMode::Sparse => poly_degree.div_ceil(2),
    }
}
