use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus as ClarabelStatus, SupportedConeT,
};
use sprs::TriMat;

use sosopt_conic::{ConeBlock, SolverAdapter, SolverArgs, SolverResult};
use sosopt_core::{SosOptError, SosOptResult};
use sosopt_solver_common::{SolutionStatus, SolverError};

/// Clarabel-backed sparse SDP adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SparseSdpAdapter;

impl SparseSdpAdapter {
    pub fn new() -> Self {
        SparseSdpAdapter
    }
}

impl SolverAdapter for SparseSdpAdapter {
    fn id(&self) -> &str {
        "clarabel-sparse"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn solve(&self, args: &SolverArgs) -> SosOptResult<SolverResult> {
        tracing::info!(adapter = self.id(), n_vars = args.n_vars, sdp_blocks = args.s_data.len(), "dispatching solve");
        if !args.l_data.is_empty() {
            return Err(SolverError::Incapable(
                "sparse SDP adapter does not support linear-inequality (l_data) blocks".into(),
            )
            .into());
        }

        let n_var = args.n_vars;
        // SDP blocks carry the full m^2 vectorization; this
        // adapter reduces each to its m*(m+1)/2 lower-triangle rows below,
        // so the up-front row count must use the reduced size, not
        // `block.constant.len()` directly.
        let total_rows: usize = args
            .s_data
            .iter()
            .map(|b| tril_len(matrix_side(b)))
            .chain(args.eq_data.iter().map(|b| b.constant.len()))
            .chain(args.soc_data.iter().map(|b| b.constant.len()))
            .sum();

        let mut triplet = TriMat::new((total_rows, n_var));
        let mut rows_seen = 0usize;
        let mut rhs = Vec::new();
        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();

        for block in &args.s_data {
            let m = matrix_side(block);
            rows_seen = push_tril_block(&mut triplet, rows_seen, block, m, &mut rhs);
            cones.push(SupportedConeT::PSDTriangleConeT(m));
        }
        for block in &args.eq_data {
            if block.constant.is_empty() {
                continue;
            }
            rows_seen = push_full_block(&mut triplet, rows_seen, block, &mut rhs);
            cones.push(SupportedConeT::ZeroConeT(block.constant.len()));
        }
        for block in &args.soc_data {
            rows_seen = push_full_block(&mut triplet, rows_seen, block, &mut rhs);
            cones.push(SupportedConeT::SecondOrderConeT(block.constant.len()));
        }

        let a_mat = to_clarabel_csc(triplet, rows_seen, n_var);
        let p_mat = CscMatrix::new(n_var, n_var, vec![0; n_var + 1], vec![], vec![]);
        let q = args.lin_cost.linear.clone();

        let settings = DefaultSettingsBuilder::default()
            .verbose(false)
            .build()
            .map_err(|e| SolverError::Settings(format!("{e:?}")))?;

        let mut solver = DefaultSolver::new(&p_mat, &q, &a_mat, &rhs, &cones, settings)
            .map_err(|e| SolverError::Init(format!("{e:?}")))?;

        solver.solve();
        let sol = solver.solution;
        let status = translate_status(sol.status);
        tracing::info!(adapter = self.id(), %status, iterations = sol.iterations, "solve finished");

        if status.is_success() {
            let cost = args.lin_cost.constant
                + q.iter().zip(sol.x.iter()).map(|(c, x)| c * x).sum::<f64>();
            Ok(SolverResult::SolutionFound {
                solution: sol.x,
                status,
                iterations: sol.iterations as u32,
                cost,
                is_successful: true,
            })
        } else {
            tracing::warn!(adapter = self.id(), %status, "solve did not produce a usable primal vector");
            Ok(SolverResult::SolutionNotFound { status })
        }
    }
}

/// Recover a PSD block's matrix side length from its flattened `m^2` length.
fn matrix_side(block: &ConeBlock) -> usize {
    (block.constant.len() as f64).sqrt().round() as usize
}

/// Number of lower-triangle entries (including the diagonal) of an `m x m` matrix.
fn tril_len(m: usize) -> usize {
    m * (m + 1) / 2
}

/// `(row, col)` pairs of the lower triangle of an `m x m` matrix, in the
/// column-major order Clarabel's `PSDTriangleConeT` svec expects.
fn tril_indices(m: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(m * (m + 1) / 2);
    for col in 0..m {
        for row in col..m {
            out.push((row, col));
        }
    }
    out
}

/// Push one PSD block's lower-triangle entries into the running triplet
/// matrix, scaling off-diagonal entries by `sqrt(2)` for Clarabel's svec
/// convention (`Ax + s = b`, `A = -linear`, `b = constant`). Returns the new
/// row count.
fn push_tril_block(triplet: &mut TriMat<f64>, row_offset: usize, block: &ConeBlock, m: usize, rhs: &mut Vec<f64>) -> usize {
    let sqrt2 = std::f64::consts::SQRT_2;
    let mut row = row_offset;
    for (r, c) in tril_indices(m) {
        let scale = if r == c { 1.0 } else { sqrt2 };
        let flat = r * m + c;
        for (var_col, &coeff) in block.linear[flat].iter().enumerate() {
            if coeff != 0.0 {
                triplet.add_triplet(row, var_col, -coeff * scale);
            }
        }
        rhs.push(block.constant[flat] * scale);
        row += 1;
    }
    row
}

/// Push an equality/SOC-shaped block verbatim (no tril reduction, no
/// scaling — these cones are not matrix-shaped).
fn push_full_block(triplet: &mut TriMat<f64>, row_offset: usize, block: &ConeBlock, rhs: &mut Vec<f64>) -> usize {
    let mut row = row_offset;
    for (i, row_coeffs) in block.linear.iter().enumerate() {
        for (var_col, &coeff) in row_coeffs.iter().enumerate() {
            if coeff != 0.0 {
                triplet.add_triplet(row, var_col, -coeff);
            }
        }
        rhs.push(block.constant[i]);
        row += 1;
    }
    row
}

/// Convert the accumulated `sprs` triplet matrix into Clarabel's
/// `CscMatrix` via the standard `TriMat::new` → `to_csc()` →
/// `indptr()/indices()/data()` sequence.
fn to_clarabel_csc(triplet: TriMat<f64>, n_rows: usize, n_cols: usize) -> CscMatrix<f64> {
    let csc = triplet.to_csc();
    let col_ptr: Vec<usize> = (0..=n_cols).map(|i| csc.indptr().index(i)).collect();
    let row_idx: Vec<usize> = csc.indices().to_vec();
    let values: Vec<f64> = csc.data().to_vec();
    CscMatrix::new(n_rows, n_cols, col_ptr, row_idx, values)
}

fn translate_status(status: ClarabelStatus) -> SolutionStatus {
    match status {
        ClarabelStatus::Solved => SolutionStatus::Optimal,
        ClarabelStatus::AlmostSolved => SolutionStatus::AlmostOptimal,
        ClarabelStatus::PrimalInfeasible | ClarabelStatus::AlmostPrimalInfeasible => SolutionStatus::Infeasible,
        ClarabelStatus::DualInfeasible | ClarabelStatus::AlmostDualInfeasible => SolutionStatus::Unbounded,
        ClarabelStatus::MaxIterations => SolutionStatus::IterationLimit,
        ClarabelStatus::MaxTime => SolutionStatus::Timeout,
        ClarabelStatus::NumericalError | ClarabelStatus::InsufficientProgress => SolutionStatus::NumericalError,
        _ => SolutionStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sosopt_conic::LinearCost;

    #[test]
    fn l_data_is_rejected() {
        let args = SolverArgs {
            indices: Vec::new(),
            lin_cost: LinearCost { constant: 0.0, linear: vec![] },
            s_data: Vec::new(),
            l_data: vec![ConeBlock {
                name: "reserved".into(),
                constant: vec![0.0],
                linear: vec![vec![]],
            }],
            eq_data: Vec::new(),
            soc_data: Vec::new(),
            n_vars: 0,
        };
        let adapter = SparseSdpAdapter::new();
        assert!(matches!(adapter.solve(&args), Err(SosOptError::SolverIncapable(_))));
    }

    #[test]
    fn tril_indices_cover_lower_triangle_only() {
        let idx = tril_indices(3);
        assert_eq!(idx.len(), 6);
        assert!(idx.iter().all(|&(r, c)| r >= c));
    }
}
