use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus as ClarabelStatus, SupportedConeT,
};

use sosopt_conic::{ConeBlock, SolverAdapter, SolverArgs, SolverResult};
use sosopt_core::{SosOptError, SosOptResult};
use sosopt_solver_common::{SolverError, SolutionStatus};

/// Clarabel-backed dense cone adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenseConeAdapter;

impl DenseConeAdapter {
    pub fn new() -> Self {
        DenseConeAdapter
    }
}

impl SolverAdapter for DenseConeAdapter {
    fn id(&self) -> &str {
        "clarabel-dense"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn solve(&self, args: &SolverArgs) -> SosOptResult<SolverResult> {
        tracing::info!(adapter = self.id(), n_vars = args.n_vars, sdp_blocks = args.s_data.len(), "dispatching solve");
        if !args.l_data.is_empty() {
            return Err(SolverError::Incapable(
                "dense cone adapter does not support linear-inequality (l_data) blocks".into(),
            )
            .into());
        }

        let n_var = args.n_vars;
        let mut triplets: Vec<(usize, usize, f64)> = Vec::new();
        let mut rhs = Vec::new();
        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();

        // SDP blocks first: each is the Gram matrix's full row-major
        // vectorization; Clarabel wants only the scaled lower triangle.
        for block in &args.s_data {
            let m = (block.constant.len() as f64).sqrt().round() as usize;
            push_psd_block(block, m, &mut triplets, &mut rhs);
            cones.push(SupportedConeT::PSDTriangleConeT(m));
        }

        // Equality blocks: zero cone, one row per (already zero-filtered)
        // linear expression.
        for block in &args.eq_data {
            if block.constant.is_empty() {
                continue;
            }
            push_zero_block(block, &mut triplets, &mut rhs);
            cones.push(SupportedConeT::ZeroConeT(block.constant.len()));
        }

        // Second-order-cone blocks from the assembler's quadratic-cost
        // rewrite; not part of the user-facing cone taxonomy but a
        // Clarabel-native cone this adapter carries through.
        for block in &args.soc_data {
            push_zero_block(block, &mut triplets, &mut rhs);
            cones.push(SupportedConeT::SecondOrderConeT(block.constant.len()));
        }

        let a_mat = build_csc_from_triplets(&triplets, rhs.len(), n_var);
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

/// Push a PSD block's full row-major `m x m` vectorization into the
/// constraint triplet list as Clarabel's scaled lower-triangle svec: column
/// by column, entries `(row, col)` with `row >= col`, off-diagonal entries
/// scaled by `sqrt(2)`.
///
/// `Ax + s = b` with `s` in the PSD cone, so `A = -linear`, `b = constant`.
fn push_psd_block(block: &ConeBlock, m: usize, triplets: &mut Vec<(usize, usize, f64)>, rhs: &mut Vec<f64>) {
    let sqrt2 = std::f64::consts::SQRT_2;
    for col in 0..m {
        for row in col..m {
            let scale = if row == col { 1.0 } else { sqrt2 };
            let flat = row * m + col;
            let base_row = rhs.len();
            for (var_col, &coeff) in block.linear[flat].iter().enumerate() {
                if coeff != 0.0 {
                    triplets.push((base_row, var_col, -coeff * scale));
                }
            }
            rhs.push(block.constant[flat] * scale);
        }
    }
}

/// Push an equality/SOC-shaped block as-is (no scaling): one constraint row
/// per vector entry, `A = -linear`, `b = constant`.
fn push_zero_block(block: &ConeBlock, triplets: &mut Vec<(usize, usize, f64)>, rhs: &mut Vec<f64>) {
    for (i, row_coeffs) in block.linear.iter().enumerate() {
        let row = rhs.len();
        for (var_col, &coeff) in row_coeffs.iter().enumerate() {
            if coeff != 0.0 {
                triplets.push((row, var_col, -coeff));
            }
        }
        rhs.push(block.constant[i]);
    }
}

/// Build a CSC constraint matrix from `(row, col, value)` triplets: sort by
/// column then row, then fill column pointers in a single pass.
fn build_csc_from_triplets(triplets: &[(usize, usize, f64)], n_rows: usize, n_cols: usize) -> CscMatrix<f64> {
    if triplets.is_empty() {
        return CscMatrix::new(n_rows, n_cols, vec![0; n_cols + 1], vec![], vec![]);
    }
    let mut sorted = triplets.to_vec();
    sorted.sort_by_key(|&(r, c, _)| (c, r));

    let mut col_ptr = vec![0];
    let mut row_idx = Vec::new();
    let mut values = Vec::new();
    let mut current_col = 0;

    for &(row, col, val) in &sorted {
        while current_col < col {
            col_ptr.push(row_idx.len());
            current_col += 1;
        }
        row_idx.push(row);
        values.push(val);
    }
    while current_col < n_cols {
        col_ptr.push(row_idx.len());
        current_col += 1;
    }

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
    fn empty_problem_reports_incapable_for_l_data() {
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
        let adapter = DenseConeAdapter::new();
        assert!(matches!(adapter.solve(&args), Err(SosOptError::SolverIncapable(_))));
    }

    #[test]
    fn psd_block_triplet_push_scales_off_diagonal_entries() {
        // Q = [[a, b], [b, c]] flattened row-major over a single decision
        // variable per entry (a=idx0, b=idx1 shared, c=idx2).
        let block = ConeBlock {
            name: "q".into(),
            constant: vec![0.0, 0.0, 0.0, 0.0],
            linear: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        };
        let mut triplets = Vec::new();
        let mut rhs = Vec::new();
        push_psd_block(&block, 2, &mut triplets, &mut rhs);
        assert_eq!(rhs.len(), 3); // lower triangle of a 2x2: 3 entries
        let off_diag = triplets.iter().find(|(row, col, _)| *row == 1 && *col == 1).unwrap();
        assert!((off_diag.2 + std::f64::consts::SQRT_2).abs() < 1e-12);
    }
}
