//! # Basis repair
//!
//! When artificial variables remain basic at zero level after the first phase, one or more
//! constraint rows are linearly redundant and the partial basis of genuine columns cannot be
//! completed by Simplex pivots alone. A column-pivoted orthogonal triangularization manufactures
//! the missing basis members: the partial basis is packed in front and triangularized with
//! Householder reflections, then each remaining row greedily takes the column with the
//! largest-magnitude entry in that row. The greedy rule selects for numerical stability; it is
//! not a search for a true non-redundant minor.
use log::trace;

use crate::algorithm::revised_simplex::RevisedSimplex;
use crate::data::linear_algebra::{Dense, Scalar};

impl<F: Scalar> RevisedSimplex<F> {
    /// Complete a partial basis to a full-rank one.
    ///
    /// # Arguments
    ///
    /// * `partial_basis`: Column indices to keep as the first basis members, fewer than the
    ///   number of rows.
    ///
    /// # Return value
    ///
    /// A permutation of all column indices with the partial basis in front; its first
    /// `nr_constraints` entries form the new basis.
    pub(crate) fn augment_basis(&self, partial_basis: &[usize]) -> Vec<usize> {
        let rows = self.nr_constraints;
        let cols = self.nr_columns;
        let basis_size = partial_basis.len();
        debug_assert!(basis_size <= rows);
        debug_assert!(rows <= cols);
        debug_assert!(partial_basis.iter().all(|&column| column < cols));

        let mut in_basis = vec![false; cols];
        for &column in partial_basis {
            in_basis[column] = true;
        }

        // Pack the columns of the constraint matrix: the partial basis first, the others behind
        // in reverse column order.
        let mut packed = Dense::zeros(rows, cols);
        let mut permanent = vec![0_usize; cols];
        let mut position = 0;
        for &column in partial_basis {
            for row in 0..rows {
                packed[(row, position)] = self.a[(row, column)];
            }
            permanent[position] = column;
            position += 1;
        }
        for column in (0..cols).rev() {
            if !in_basis[column] {
                for row in 0..rows {
                    packed[(row, position)] = self.a[(row, column)];
                }
                permanent[position] = column;
                position += 1;
            }
        }
        debug_assert_eq!(position, cols);

        let mut reflection = vec![F::zero(); rows];
        for column in 0..basis_size {
            householder_reflect(&mut packed, &mut reflection, column);
        }

        for row in basis_size..rows {
            // The largest-magnitude entry in this row decides the next basis member.
            let mut largest = packed[(row, row)].abs();
            let mut selected = row;
            for column in row + 1..cols {
                if packed[(row, column)].abs() > largest {
                    largest = packed[(row, column)].abs();
                    selected = column;
                }
            }
            permanent.swap(row, selected);
            packed.swap_columns(row, selected);
            trace!("basis repair: row {} takes column {}", row, permanent[row]);

            if row < rows - 1 {
                householder_reflect(&mut packed, &mut reflection, row);
            }
        }

        permanent
    }
}

/// Zero the subdiagonal of one column with a Householder reflection, applying the same reflection
/// to every column to its right.
fn householder_reflect<F: Scalar>(matrix: &mut Dense<F>, reflection: &mut [F], column: usize) {
    let rows = matrix.nr_rows();
    let cols = matrix.nr_columns();

    let mut norm = F::zero();
    for row in column..rows {
        norm = norm + matrix[(row, column)] * matrix[(row, column)];
    }
    let norm = norm.sqrt();

    for row in column..rows {
        reflection[row] = matrix[(row, column)];
    }
    if reflection[column] < F::zero() {
        matrix[(column, column)] = norm;
        reflection[column] = reflection[column] - norm;
    } else {
        matrix[(column, column)] = -norm;
        reflection[column] = reflection[column] + norm;
    }
    for row in column + 1..rows {
        matrix[(row, column)] = F::zero();
    }

    let mut denominator = F::zero();
    for row in column..rows {
        denominator = denominator + reflection[row] * reflection[row];
    }
    if denominator == F::zero() {
        // The column was already zero from this row down; nothing to reflect.
        return;
    }
    let scale = (F::one() + F::one()) / denominator;

    for k in column + 1..cols {
        let mut factor = F::zero();
        for row in column..rows {
            factor = factor + reflection[row] * matrix[(row, k)];
        }
        let factor = factor * scale;
        for row in column..rows {
            matrix[(row, k)] = matrix[(row, k)] - factor * reflection[row];
        }
    }
}
