use crate::error::{BalanceError, Result};
use crate::matrix::StoichiometricMatrix;
use malachite::num::arithmetic::traits::Abs;
use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;
use std::cmp::{max, min};
use std::mem;

/// Exact solution of `matrix * x = 0`, one entry per molecule
pub type NullSpaceVector = Vec<Rational>;

/// Matrix in reduced row echelon form, zero rows removed
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowEchelon {
    /// Non-zero rows, row `i` has its leading 1 in column `pivots[i]`
    pub rows: Vec<Vec<Rational>>,
    /// Pivot column of every row, strictly increasing
    pub pivots: Vec<usize>,
    /// Number of columns
    pub columns: usize,
}
impl RowEchelon {
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Columns without a pivot, each one parametrizes one dimension of the null space
    pub fn free_columns(&self) -> Vec<usize> {
        (0..self.columns).filter(|col| !self.pivots.contains(col)).collect()
    }

    /// Null-space vector with the given free variable set to 1 and all other free variables set to 0
    fn null_vector(&self, free: usize) -> NullSpaceVector {
        let mut vector = vec![Rational::ZERO; self.columns];
        vector[free] = Rational::ONE;
        for (row, &pivot) in self.rows.iter().zip(self.pivots.iter()) {
            vector[pivot] = -&row[free];
        }
        vector
    }
}

/// Row-reduces the matrix using exact rational arithmetic
pub fn reduced_row_echelon(matrix: &StoichiometricMatrix) -> RowEchelon {
    // m - number of rows, n - number of columns
    let m = matrix.row_count();
    let n = matrix.column_count();

    let mut rows = matrix
        .rows()
        .iter()
        .map(|row| row
            .iter()
            .map(|&x| Rational::from(x))
            .collect()
        )
        .collect::<Vec<Vec<Rational>>>();

    let pivots = gaussian_elimination(&mut rows, m, n);
    reduce_row_echelon(&mut rows, &pivots, n);

    // every row below the last pivot row contains only zeros
    rows.truncate(pivots.len());

    RowEchelon { rows, pivots, columns: n }
}

/// Basis of the null space of the matrix, one vector per free column (in column order)
///
/// The basis is empty when only the zero vector solves the system.
pub fn null_space(matrix: &StoichiometricMatrix) -> Vec<NullSpaceVector> {
    let echelon = reduced_row_echelon(matrix);
    echelon
        .free_columns()
        .into_iter()
        .map(|free| echelon.null_vector(free))
        .collect()
}

/// Computes one null-space vector of the matrix
///
/// If the null space has more than one dimension, the vector belonging to the first free column is
/// returned.
/// # Returns
/// * `Ok` - vector `x` with `matrix * x = 0` and `x != 0`
/// * `Err` - [`BalanceError::NoSolution`] if the matrix has full column rank
pub fn solve(matrix: &StoichiometricMatrix) -> Result<NullSpaceVector> {
    let echelon = reduced_row_echelon(matrix);
    let free_columns = echelon.free_columns();

    match free_columns.as_slice() {
        [] => Err(BalanceError::NoSolution {
            molecules: echelon.columns,
            rank: echelon.rank(),
        }),
        [first, rest @ ..] => {
            if !rest.is_empty() {
                log::warn!(
                    "null space has dimension {}, the equation has more than one independent balance",
                    free_columns.len(),
                );
            }
            log::debug!("rank {} of {} columns, free column {}", echelon.rank(), echelon.columns, first);
            Ok(echelon.null_vector(*first))
        },
    }
}

/// Brings the matrix to row echelon form, returns the pivot column of every non-zero row
pub fn gaussian_elimination(matrix: &mut [Vec<Rational>], m: usize, n: usize) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut row = 0;
    let mut col = 0;
    while row < m && col < n {
        let mut i_max = row;
        for (i, row_n) in matrix.iter().enumerate().skip(row + 1) {
            if (&row_n[col]).abs() > (&matrix[i_max][col]).abs() {
                i_max = i;
            }
        }

        if matrix[i_max][col] == Rational::ZERO {
            col += 1;
        } else {
            swap_rows(row, i_max, matrix);
            for i in (row + 1)..m {
                if matrix[i][col] == Rational::ZERO { continue; }
                let f = &matrix[i][col] / &matrix[row][col];
                matrix[i][col] = Rational::ZERO;
                for j in (col + 1)..n {
                    let div_amount = &f * &matrix[row][j];
                    matrix[i][j] -= div_amount;
                }
            }

            pivots.push(col);
            row += 1;
            col += 1;
        }
    }
    pivots
}

#[inline(always)]
pub fn swap_rows<T>(r1: usize, r2: usize, matrix: &mut [Vec<T>]) {
    if r1 != r2 {
        let bigger_r = max(r1, r2);
        let smaller_r = min(r1, r2);
        let (top, bot) = matrix.split_at_mut(bigger_r);  // splits before bigger_r so index 0 in bot will be bigger_r
        mem::swap(&mut top[smaller_r], &mut bot[0])
    }
}

/// Turns a row echelon matrix into reduced row echelon form
pub fn reduce_row_echelon(matrix: &mut [Vec<Rational>], pivots: &[usize], n: usize) {
    // process rows from bottom to top so the rows below are already reduced
    for (r, &p) in pivots.iter().enumerate().rev() {
        let factor = Rational::ONE / &matrix[r][p];
        for j in p..n {
            matrix[r][j] *= &factor;
        }

        for r_temp in 0..r {
            if matrix[r_temp][p] == Rational::ZERO { continue; }
            let factor = matrix[r_temp][p].clone();
            for j in p..n {
                let div_amount = &factor * &matrix[r][j];
                matrix[r_temp][j] -= div_amount;
            }
        }
    }
}
