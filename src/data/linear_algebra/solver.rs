//! # Dense linear solver
//!
//! Gaussian elimination with partial pivoting for square systems `A x = b`. The basis matrix of a
//! small dense problem is factored from scratch on every call; no factorization is kept between
//! calls.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::data::linear_algebra::{Dense, Scalar};

/// No nonzero pivot was available in a column during elimination.
///
/// The system matrix is singular, or so close to it that elimination hit an exactly zero pivot.
/// Solutions computed past this point would be meaningless, so the computation is abandoned
/// instead.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SingularMatrix {
    /// Elimination column at which every remaining candidate pivot was zero.
    pub column: usize,
}

impl Display for SingularMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "matrix is singular: no nonzero pivot in column {}", self.column)
    }
}

impl Error for SingularMatrix {
}

/// Solves square dense systems, reusing its own scratch buffers between calls.
///
/// Elimination destroys the matrix it works on, so each call copies its inputs into private
/// scratch space first; the caller's matrix and right-hand side are never modified.
#[derive(Debug, Clone)]
pub struct GaussianSolver<F> {
    size: usize,
    scratch: Dense<F>,
    rhs: Vec<F>,
}

impl<F: Scalar> GaussianSolver<F> {
    /// Create a solver for systems of a fixed size.
    pub fn new(size: usize) -> Self {
        debug_assert_ne!(size, 0);

        Self {
            size,
            scratch: Dense::zeros(size, size),
            rhs: vec![F::zero(); size],
        }
    }

    /// Solve `A x = b` for `x`.
    ///
    /// # Arguments
    ///
    /// * `matrix`: Square coefficient matrix `A`, left untouched.
    /// * `b`: Right-hand side, left untouched.
    /// * `x`: Buffer the solution is written into.
    ///
    /// # Errors
    ///
    /// `SingularMatrix` when a pivot is exactly zero after row selection. The contents of `x` are
    /// unspecified in that case.
    pub fn solve(&mut self, matrix: &Dense<F>, b: &[F], x: &mut [F]) -> Result<(), SingularMatrix> {
        debug_assert_eq!(matrix.nr_rows(), self.size);
        debug_assert_eq!(matrix.nr_columns(), self.size);
        debug_assert_eq!(b.len(), self.size);
        debug_assert_eq!(x.len(), self.size);

        self.scratch.copy_from(matrix);
        self.rhs.copy_from_slice(b);

        // Forward elimination, selecting the largest pivot among the remaining rows.
        for column in 0..self.size - 1 {
            let mut largest = self.scratch[(column, column)].abs();
            let mut selected = column;
            for row in column + 1..self.size {
                if self.scratch[(row, column)].abs() > largest {
                    largest = self.scratch[(row, column)].abs();
                    selected = row;
                }
            }

            if selected != column {
                self.scratch.swap_rows(selected, column);
                self.rhs.swap(selected, column);
            }

            let pivot = self.scratch[(column, column)];
            if pivot == F::zero() {
                return Err(SingularMatrix { column });
            }

            for row in column + 1..self.size {
                let scale = self.scratch[(row, column)] / pivot;
                self.rhs[row] = self.rhs[row] - scale * self.rhs[column];
                for k in column..self.size {
                    self.scratch[(row, k)] = self.scratch[(row, k)] - scale * self.scratch[(column, k)];
                }
            }
        }

        // Back substitution.
        for column in (0..self.size).rev() {
            let mut value = self.rhs[column];
            for row in column + 1..self.size {
                value = value - x[row] * self.scratch[(column, row)];
            }

            let pivot = self.scratch[(column, column)];
            if pivot == F::zero() {
                return Err(SingularMatrix { column });
            }
            x[column] = value / pivot;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::data::linear_algebra::Dense;
    use crate::data::linear_algebra::solver::{GaussianSolver, SingularMatrix};

    fn matrix_from(rows: &[&[f64]]) -> Dense<f64> {
        let mut matrix = Dense::zeros(rows.len(), rows[0].len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                matrix[(i, j)] = value;
            }
        }
        matrix
    }

    #[test]
    fn three_by_three() {
        let matrix = matrix_from(&[
            &[2_f64, 1_f64, -1_f64],
            &[-3_f64, -1_f64, 2_f64],
            &[-2_f64, 1_f64, 2_f64],
        ]);
        let b = [8_f64, -11_f64, -3_f64];
        let mut x = [0_f64; 3];

        let mut solver = GaussianSolver::new(3);
        solver.solve(&matrix, &b, &mut x).unwrap();

        assert_relative_eq!(x[0], 2_f64);
        assert_relative_eq!(x[1], 3_f64);
        assert_relative_eq!(x[2], -1_f64);
    }

    #[test]
    fn requires_row_swap() {
        // Naive elimination would divide by the zero in the top left corner.
        let matrix = matrix_from(&[
            &[0_f64, 1_f64],
            &[1_f64, 0_f64],
        ]);
        let b = [2_f64, 3_f64];
        let mut x = [0_f64; 2];

        let mut solver = GaussianSolver::new(2);
        solver.solve(&matrix, &b, &mut x).unwrap();

        assert_relative_eq!(x[0], 3_f64);
        assert_relative_eq!(x[1], 2_f64);
    }

    #[test]
    fn singular_is_reported() {
        let matrix = matrix_from(&[
            &[1_f64, 2_f64],
            &[2_f64, 4_f64],
        ]);
        let b = [1_f64, 2_f64];
        let mut x = [0_f64; 2];

        let mut solver = GaussianSolver::new(2);
        assert_eq!(solver.solve(&matrix, &b, &mut x), Err(SingularMatrix { column: 1 }));
    }

    #[test]
    fn inputs_are_preserved() {
        let matrix = matrix_from(&[
            &[4_f64, 3_f64],
            &[6_f64, 3_f64],
        ]);
        let copy = matrix.clone();
        let b = [10_f64, 12_f64];
        let mut x = [0_f64; 2];

        let mut solver = GaussianSolver::new(2);
        solver.solve(&matrix, &b, &mut x).unwrap();

        assert_eq!(matrix, copy);
        assert_eq!(b, [10_f64, 12_f64]);
        assert_relative_eq!(x[0], 1_f64);
        assert_relative_eq!(x[1], 2_f64);

        // The scratch space is reusable; a second solve must not see leftovers.
        solver.solve(&matrix, &b, &mut x).unwrap();
        assert_relative_eq!(x[0], 1_f64);
        assert_relative_eq!(x[1], 2_f64);
    }
}
