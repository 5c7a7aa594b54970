//! Matrix-valued polynomial expressions: `r × c` grids of [`Polynomial`].
//!
//! Decision polynomial variables and polynomial constraints are, in
//! general, matrix-shaped — for a scalar cell, expression ≡ `cᵀZ`. A 1×1
//! `PolyMatrix` is the scalar case.

use sosopt_core::SosOptError;

use crate::polynomial::Polynomial;

/// A row-major `rows × cols` grid of polynomials, all in the same number of
/// ambient variables.
#[derive(Clone, Debug)]
pub struct PolyMatrix {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Polynomial>,
}

impl PolyMatrix {
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Polynomial>) -> Result<Self, SosOptError> {
        if cells.len() != rows * cols {
            return Err(SosOptError::ShapeMismatch(format!(
                "expected {} cells for a {}x{} matrix, got {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }
        Ok(PolyMatrix { rows, cols, cells })
    }

    pub fn scalar(p: Polynomial) -> Self {
        PolyMatrix {
            rows: 1,
            cols: 1,
            cells: vec![p],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &Polynomial {
        &self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, p: Polynomial) {
        self.cells[row * self.cols + col] = p;
    }

    pub fn cells(&self) -> &[Polynomial] {
        &self.cells
    }

    pub fn into_scalar(self) -> Result<Polynomial, SosOptError> {
        if self.rows != 1 || self.cols != 1 {
            return Err(SosOptError::ShapeMismatch(format!(
                "expected a 1x1 matrix, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(self.cells.into_iter().next().unwrap())
    }

    /// Stack matrices side by side; all parts must share the row count.
    pub fn h_stack(parts: &[PolyMatrix]) -> Result<Self, SosOptError> {
        let rows = parts
            .first()
            .ok_or_else(|| SosOptError::ShapeMismatch("h_stack requires at least one part".into()))?
            .rows;
        if parts.iter().any(|p| p.rows != rows) {
            return Err(SosOptError::ShapeMismatch(
                "h_stack requires all parts to share the same row count".into(),
            ));
        }
        let cols: usize = parts.iter().map(|p| p.cols).sum();
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for part in parts {
                for c in 0..part.cols {
                    cells.push(part.get(r, c).clone());
                }
            }
        }
        Ok(PolyMatrix { rows, cols, cells })
    }

    /// Stack matrices on top of each other; all parts must share the column count.
    pub fn v_stack(parts: &[PolyMatrix]) -> Result<Self, SosOptError> {
        let cols = parts
            .first()
            .ok_or_else(|| SosOptError::ShapeMismatch("v_stack requires at least one part".into()))?
            .cols;
        if parts.iter().any(|p| p.cols != cols) {
            return Err(SosOptError::ShapeMismatch(
                "v_stack requires all parts to share the same column count".into(),
            ));
        }
        let rows: usize = parts.iter().map(|p| p.rows).sum();
        let mut cells = Vec::with_capacity(rows * cols);
        for part in parts {
            for r in 0..part.rows {
                for c in 0..cols {
                    cells.push(part.get(r, c).clone());
                }
            }
        }
        Ok(PolyMatrix { rows, cols, cells })
    }

    pub fn transpose(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                cells.push(self.get(r, c).clone());
            }
        }
        PolyMatrix {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_stack_concatenates_columns() {
        let a = PolyMatrix::scalar(Polynomial::constant(1, 1.0));
        let b = PolyMatrix::scalar(Polynomial::constant(1, 2.0));
        let stacked = PolyMatrix::h_stack(&[a, b]).unwrap();
        assert_eq!(stacked.shape(), (1, 2));
        assert_eq!(stacked.get(0, 1).coefficient(&crate::monomial::Monomial::one()).constant, 2.0);
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let cells = vec![Polynomial::zero(1); 3];
        assert!(PolyMatrix::from_cells(2, 2, cells).is_err());
    }
}
