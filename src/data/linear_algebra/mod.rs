//! # Linear algebra primitives
//!
//! Dense, row-major storage sized for problems with tens of rows and columns. Everything here is
//! deliberately small and concrete; this is not a general purpose matrix library.
use std::fmt::{Debug, Display};
use std::ops::{Index, IndexMut};

use itertools::izip;
use num_traits::Float;

pub mod solver;

/// Scalar type all algorithm code is generic over.
///
/// The solver is floating-point by design; exact arithmetic is out of scope.
pub trait Scalar: Float + Debug + Display {}
impl<F: Float + Debug + Display> Scalar for F {}

/// Inner product of two equally long slices.
pub fn dot<F: Scalar>(left: &[F], right: &[F]) -> F {
    debug_assert_eq!(left.len(), right.len());

    izip!(left, right).fold(F::zero(), |total, (&l, &r)| total + l * r)
}

/// Dense matrix with row-major storage and a size fixed at creation.
///
/// Indexed with a `(row, column)` tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<F> {
    nr_rows: usize,
    nr_columns: usize,
    data: Vec<F>,
}

impl<F: Scalar> Dense<F> {
    /// Create a matrix with all elements equal to zero.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: Number of rows, fixed for the lifetime of the value.
    /// * `nr_columns`: Number of columns, fixed for the lifetime of the value.
    pub fn zeros(nr_rows: usize, nr_columns: usize) -> Self {
        debug_assert_ne!(nr_rows, 0);
        debug_assert_ne!(nr_columns, 0);

        Self {
            nr_rows,
            nr_columns,
            data: vec![F::zero(); nr_rows * nr_columns],
        }
    }

    /// Number of rows.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Copy the values of a column into a buffer, one value per row.
    pub fn copy_column_into(&self, column: usize, target: &mut [F]) {
        debug_assert!(column < self.nr_columns);
        debug_assert_eq!(target.len(), self.nr_rows);

        for (row, value) in target.iter_mut().enumerate() {
            *value = self[(row, column)];
        }
    }

    /// Overwrite all values with those of an equally sized matrix.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.nr_rows, other.nr_rows);
        debug_assert_eq!(self.nr_columns, other.nr_columns);

        self.data.copy_from_slice(&other.data);
    }

    /// Exchange two entire rows.
    pub fn swap_rows(&mut self, row_1: usize, row_2: usize) {
        debug_assert!(row_1 < self.nr_rows && row_2 < self.nr_rows);

        for column in 0..self.nr_columns {
            self.data.swap(row_1 * self.nr_columns + column, row_2 * self.nr_columns + column);
        }
    }

    /// Exchange two entire columns.
    pub fn swap_columns(&mut self, column_1: usize, column_2: usize) {
        debug_assert!(column_1 < self.nr_columns && column_2 < self.nr_columns);

        for row in 0..self.nr_rows {
            self.data.swap(row * self.nr_columns + column_1, row * self.nr_columns + column_2);
        }
    }

    /// Reset all values to zero, keeping the size.
    pub fn set_zero(&mut self) {
        for value in &mut self.data {
            *value = F::zero();
        }
    }
}

impl<F: Scalar> Index<(usize, usize)> for Dense<F> {
    type Output = F;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        debug_assert!(row < self.nr_rows && column < self.nr_columns);

        &self.data[row * self.nr_columns + column]
    }
}

impl<F: Scalar> IndexMut<(usize, usize)> for Dense<F> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        debug_assert!(row < self.nr_rows && column < self.nr_columns);

        &mut self.data[row * self.nr_columns + column]
    }
}
