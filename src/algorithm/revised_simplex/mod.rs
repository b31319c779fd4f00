//! # The revised simplex engine
//!
//! Owns the problem data, the basis partition and the per-iteration state of the revised Simplex
//! method. The iteration itself lives in [`iteration`] as an explicit state machine; the
//! procedure that repairs a rank-deficient basis after the first phase lives in `basis_repair`.
//!
//! A problem is described in three calls: construction with the variable and constraint counts,
//! one `add_constraint` per declared row, and `set_objective`. After `initialize` the problem is
//! immutable and the driver advances the engine with [`RevisedSimplex::step`] or
//! [`RevisedSimplex::iterate`].
//!
//! ## Two-phase protocol
//!
//! When initialization had to add artificial variables, the engine first minimizes their sum.
//! Once `OptimalForPhase` is reported with `artificial_added()` still true, the *driver* inspects
//! `objective_value()`: zero means a feasible basis was found and `eliminate_artificials` starts
//! the second phase; a positive value means the program is infeasible. The split is deliberate,
//! so a driver can observe the phase-one outcome before committing to phase two.
use enum_map::EnumMap;
use itertools::izip;
use log::{debug, trace, warn};

use crate::algorithm::IterationStatus;
use crate::algorithm::revised_simplex::error::ModelError;
use crate::algorithm::revised_simplex::iteration::Step;
use crate::data::linear_algebra::{Dense, Scalar, dot};
use crate::data::linear_algebra::solver::{GaussianSolver, SingularMatrix};
use crate::data::linear_program::elements::{ConstraintType, Objective, VariableKind};

pub mod error;
pub mod iteration;
mod basis_repair;

/// A column of the augmented coefficient matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Variable<F> {
    cost: F,
    kind: VariableKind,
}

/// A steppable revised Simplex solve session for one small dense linear program.
///
/// All state is exclusively owned; the embedded linear solver's scratch buffers are private to
/// this instance. Operations run to completion, nothing is reentrant.
#[derive(Debug)]
pub struct RevisedSimplex<F> {
    /// Number of decision variables of the original problem.
    nr_structural: usize,
    nr_constraints: usize,
    /// Total number of columns currently part of the problem. Grows when slack, surplus and
    /// artificial columns are appended during initialization and shrinks again when the
    /// artificial columns are dropped for the second phase.
    nr_columns: usize,
    nr_rows_taken: usize,
    initialized: bool,

    variables: Vec<Variable<F>>,
    constraint_types: Vec<ConstraintType>,
    /// Augmented coefficient matrix, sized at construction with enough column headroom for the
    /// slack, surplus and artificial columns that initialization may append.
    a: Dense<F>,
    b: Vec<F>,

    /// Column index per row; `basic[i]` is the variable whose value is `x[i]`.
    basic: Vec<usize>,
    /// The column indices not in the basis, each held at value zero.
    nonbasic: Vec<usize>,
    x: Vec<F>,

    basis: Dense<F>,
    basis_transpose: Dense<F>,
    cost_of_basic: Vec<F>,
    multipliers: Vec<F>,
    direction: Vec<F>,
    /// One entry per nonbasic position, aligned with `nonbasic`.
    reduced_cost: Vec<F>,
    column_buffer: Vec<F>,
    solver: GaussianSolver<F>,

    current_step: Step,
    finished: Option<IterationStatus>,
    /// Position into `nonbasic` of the variable chosen to enter the basis.
    entering: usize,
    /// Position into `basic` (the row) of the variable chosen to leave the basis.
    leaving: usize,
    min_ratio: F,
    nr_min_ratio: usize,
    nr_iterations: usize,

    objective: Objective,
    original_objective: Objective,
    original_cost: Vec<F>,
    artificial_added: bool,
    nr_basic_artificials: usize,
    kind_counts: EnumMap<VariableKind, usize>,
}

impl<F: Scalar> RevisedSimplex<F> {
    /// Create an engine for a problem of a fixed shape.
    ///
    /// Buffers are sized once, with headroom for the columns initialization appends; nothing is
    /// reallocated during a solve.
    ///
    /// # Arguments
    ///
    /// * `nr_variables`: Number of decision variables, at least one.
    /// * `nr_constraints`: Number of constraint rows, at least one.
    pub fn new(nr_variables: usize, nr_constraints: usize) -> Self {
        debug_assert_ne!(nr_variables, 0);
        debug_assert_ne!(nr_constraints, 0);

        let mut kind_counts = EnumMap::default();
        kind_counts[VariableKind::Structural] = nr_variables;

        Self {
            nr_structural: nr_variables,
            nr_constraints,
            nr_columns: nr_variables,
            nr_rows_taken: 0,
            initialized: false,

            variables: vec![
                Variable { cost: F::zero(), kind: VariableKind::Structural };
                nr_variables
            ],
            constraint_types: Vec::with_capacity(nr_constraints),
            a: Dense::zeros(nr_constraints, nr_variables + 3 * nr_constraints),
            b: Vec::with_capacity(nr_constraints),

            basic: Vec::with_capacity(nr_constraints),
            nonbasic: Vec::with_capacity(nr_variables + 2 * nr_constraints),
            x: vec![F::zero(); nr_constraints],

            basis: Dense::zeros(nr_constraints, nr_constraints),
            basis_transpose: Dense::zeros(nr_constraints, nr_constraints),
            cost_of_basic: vec![F::zero(); nr_constraints],
            multipliers: vec![F::zero(); nr_constraints],
            direction: vec![F::zero(); nr_constraints],
            reduced_cost: Vec::with_capacity(nr_variables + 2 * nr_constraints),
            column_buffer: vec![F::zero(); nr_constraints],
            solver: GaussianSolver::new(nr_constraints),

            current_step: Step::RebuildBasis,
            finished: None,
            entering: 0,
            leaving: 0,
            min_ratio: F::zero(),
            nr_min_ratio: 0,
            nr_iterations: 0,

            objective: Objective::default(),
            original_objective: Objective::default(),
            original_cost: Vec::new(),
            artificial_added: false,
            nr_basic_artificials: 0,
            kind_counts,
        }
    }

    /// Append one constraint row.
    ///
    /// Must be called exactly as many times as the number of rows declared at construction,
    /// before `initialize`.
    ///
    /// # Errors
    ///
    /// When the coefficient count doesn't match the declared number of variables, when all
    /// declared rows were already added, or when the problem was already initialized.
    pub fn add_constraint(
        &mut self,
        coefficients: &[F],
        rhs: F,
        constraint_type: ConstraintType,
    ) -> Result<(), ModelError> {
        if self.initialized {
            return Err(ModelError::AlreadyInitialized);
        }
        if coefficients.len() != self.nr_structural {
            return Err(ModelError::CoefficientCount {
                expected: self.nr_structural,
                actual: coefficients.len(),
            });
        }
        if self.nr_rows_taken == self.nr_constraints {
            return Err(ModelError::TooManyConstraints { declared: self.nr_constraints });
        }

        for (column, &coefficient) in coefficients.iter().enumerate() {
            self.a[(self.nr_rows_taken, column)] = coefficient;
        }
        self.b.push(rhs);
        self.constraint_types.push(constraint_type);
        self.nr_rows_taken += 1;

        Ok(())
    }

    /// Set or overwrite the objective function.
    ///
    /// # Errors
    ///
    /// When the coefficient count doesn't match the declared number of variables, or when the
    /// problem was already initialized.
    pub fn set_objective(
        &mut self,
        coefficients: &[F],
        objective: Objective,
    ) -> Result<(), ModelError> {
        if self.initialized {
            return Err(ModelError::AlreadyInitialized);
        }
        if coefficients.len() != self.nr_structural {
            return Err(ModelError::CoefficientCount {
                expected: self.nr_structural,
                actual: coefficients.len(),
            });
        }

        for (variable, &cost) in izip!(&mut self.variables, coefficients) {
            variable.cost = cost;
        }
        self.objective = objective;

        Ok(())
    }

    /// Build the augmented matrix, assign the initial basis and detect the need for a first
    /// phase.
    ///
    /// Per row, the designated slack or surplus column becomes basic when its value would be
    /// nonnegative; otherwise, and for every equality row, an artificial column is appended with
    /// its sign chosen so that it starts at a nonnegative value. If any artificial column was
    /// added, the true objective is cached and replaced with the phase-one objective that
    /// minimizes the sum of the artificial values.
    ///
    /// # Errors
    ///
    /// When fewer rows were added than declared, or on double initialization.
    pub fn initialize(&mut self) -> Result<(), ModelError> {
        if self.initialized {
            return Err(ModelError::AlreadyInitialized);
        }
        if self.nr_rows_taken < self.nr_constraints {
            return Err(ModelError::MissingConstraints {
                declared: self.nr_constraints,
                taken: self.nr_rows_taken,
            });
        }

        self.original_objective = self.objective;
        if self.objective == Objective::Maximize {
            // Internally, minimization only.
            for variable in &mut self.variables {
                variable.cost = -variable.cost;
            }
        }

        self.nonbasic = (0..self.nr_structural).collect();

        // One designated slack or surplus column per inequality row.
        let mut constraint_variable = vec![0_usize; self.nr_constraints];
        for row in 0..self.nr_constraints {
            match self.constraint_types[row] {
                ConstraintType::Less => {
                    constraint_variable[row] = self.append_column(row, F::one(), VariableKind::Slack);
                },
                ConstraintType::Greater => {
                    constraint_variable[row] = self.append_column(row, -F::one(), VariableKind::Slack);
                },
                ConstraintType::Equal => {},
            }
        }

        for row in 0..self.nr_constraints {
            match self.constraint_types[row] {
                ConstraintType::Less => {
                    if self.b[row] >= F::zero() {
                        self.basic.push(constraint_variable[row]);
                        self.x[row] = self.b[row];
                    } else {
                        let artificial = self.append_column(row, -F::one(), VariableKind::Artificial);
                        self.basic.push(artificial);
                        self.x[row] = -self.b[row];
                        self.nonbasic.push(constraint_variable[row]);
                    }
                },
                ConstraintType::Greater => {
                    if self.b[row] > F::zero() {
                        let artificial = self.append_column(row, F::one(), VariableKind::Artificial);
                        self.basic.push(artificial);
                        self.x[row] = self.b[row];
                        self.nonbasic.push(constraint_variable[row]);
                    } else {
                        self.basic.push(constraint_variable[row]);
                        self.x[row] = -self.b[row];
                    }
                },
                ConstraintType::Equal => {
                    let coefficient = if self.b[row] >= F::zero() { F::one() } else { -F::one() };
                    let artificial = self.append_column(row, coefficient, VariableKind::Artificial);
                    self.basic.push(artificial);
                    self.x[row] = self.b[row].abs();
                },
            }
        }

        self.nr_columns = self.variables.len();
        debug_assert_eq!(self.nonbasic.len(), self.nr_columns - self.nr_constraints);
        self.reduced_cost = vec![F::zero(); self.nonbasic.len()];

        let nr_artificial = self.kind_counts[VariableKind::Artificial];
        self.nr_basic_artificials = nr_artificial;
        if nr_artificial > 0 {
            self.artificial_added = true;
            self.install_feasibility_objective();
        }

        self.initialized = true;
        self.current_step = Step::RebuildBasis;
        self.finished = None;
        debug!("initialized: {} columns of which {} artificial", self.nr_columns, nr_artificial);

        Ok(())
    }

    /// Drop the artificial variables and restore the true objective for the second phase.
    ///
    /// To be called by the driver after the first phase reached `OptimalForPhase` with an
    /// objective value of zero. Columns are repartitioned with the genuine basic columns first;
    /// when artificial variables remain basic at zero level, at least one constraint row is
    /// linearly redundant and a replacement basis is manufactured through the repair procedure in
    /// `basis_repair`. The column count shrinks by the number of artificial columns, the cached
    /// objective is reinstalled and the state machine is reset to the start of an iteration.
    ///
    /// # Errors
    ///
    /// When the problem was not yet initialized.
    pub fn eliminate_artificials(&mut self) -> Result<(), ModelError> {
        if !self.initialized {
            return Err(ModelError::NotInitialized);
        }
        debug_assert!(self.artificial_added);

        let nr_artificial = self.kind_counts[VariableKind::Artificial];
        // Artificial columns are appended last during initialization.
        debug_assert!(self.variables[self.nr_columns - nr_artificial..]
            .iter()
            .all(|variable| variable.kind == VariableKind::Artificial));

        let mut value_by_column = vec![F::zero(); self.nr_columns];
        let mut was_basic = vec![false; self.nr_columns];
        for (row, &column) in self.basic.iter().enumerate() {
            value_by_column[column] = self.x[row];
            was_basic[column] = true;
        }

        let mut new_basis: Vec<usize> = (0..self.nr_columns)
            .filter(|&column| {
                was_basic[column] && self.variables[column].kind != VariableKind::Artificial
            })
            .collect();

        if self.nr_basic_artificials > 0 {
            // One or more artificial variables are stuck in the basis at zero level: some
            // constraint row is linearly redundant and the basis must be repaired.
            let permanent = self.augment_basis(&new_basis);
            new_basis = permanent[..self.nr_constraints].to_vec();
            if new_basis.iter().any(|&column| self.variables[column].kind == VariableKind::Artificial) {
                warn!("repaired basis still contains an artificial column; a constraint row is redundant");
            }
        }
        debug_assert_eq!(new_basis.len(), self.nr_constraints);

        let mut in_basis = vec![false; self.nr_columns];
        for &column in &new_basis {
            in_basis[column] = true;
        }
        self.basic = new_basis;
        for (row, &column) in self.basic.iter().enumerate() {
            self.x[row] = value_by_column[column];
        }

        self.nr_columns -= nr_artificial;
        self.nonbasic = (0..self.nr_columns).filter(|&column| !in_basis[column]).collect();
        self.reduced_cost = vec![F::zero(); self.nonbasic.len()];
        self.kind_counts[VariableKind::Artificial] = 0;

        for (variable, &cost) in izip!(&mut self.variables, &self.original_cost) {
            variable.cost = cost;
        }
        self.objective = self.original_objective;
        self.artificial_added = false;
        self.nr_basic_artificials = self.basic
            .iter()
            .filter(|&&column| self.variables[column].kind == VariableKind::Artificial)
            .count();

        self.current_step = Step::RebuildBasis;
        self.finished = None;
        debug!("second phase: original objective restored, {} columns remain", self.nr_columns);

        Ok(())
    }

    /// Current value of the objective function, sign-adjusted for maximization.
    pub fn objective_value(&self) -> F {
        let total = izip!(&self.basic, &self.x)
            .fold(F::zero(), |total, (&column, &value)| {
                total + value * self.variables[column].cost
            });

        match self.objective {
            Objective::Minimize => total,
            Objective::Maximize => -total,
        }
    }

    /// Override the automatic entering choice.
    ///
    /// Only accepted while the state machine is paused at [`Step::ConfirmEntering`].
    ///
    /// # Arguments
    ///
    /// * `position`: Position into the nonbasic sequence, not a column index.
    ///
    /// # Errors
    ///
    /// Outside the override window, or when the position is out of range or doesn't carry a
    /// negative reduced cost.
    pub fn set_entering(&mut self, position: usize) -> Result<(), ModelError> {
        if self.current_step != Step::ConfirmEntering {
            return Err(ModelError::OverrideWindowClosed { step: self.current_step });
        }
        if position >= self.nonbasic.len() || self.reduced_cost[position] >= F::zero() {
            return Err(ModelError::InvalidEntering { position });
        }

        self.entering = position;
        Ok(())
    }

    /// Override the automatic leaving choice after a minimum-ratio tie.
    ///
    /// Only accepted while the state machine is paused at [`Step::BreakTie`], and only for rows
    /// that attain the minimum ratio.
    ///
    /// # Arguments
    ///
    /// * `position`: Position into the basic sequence, that is, a row.
    ///
    /// # Errors
    ///
    /// Outside the override window, or when the row doesn't attain the minimum ratio.
    pub fn set_leaving(&mut self, position: usize) -> Result<(), ModelError> {
        if self.current_step != Step::BreakTie {
            return Err(ModelError::OverrideWindowClosed { step: self.current_step });
        }
        let attains_minimum = position < self.nr_constraints
            && self.direction[position] > F::zero()
            && self.x[position] / self.direction[position] == self.min_ratio;
        if !attains_minimum {
            return Err(ModelError::InvalidLeaving { position });
        }

        self.leaving = position;
        Ok(())
    }

    /// Clear all problem data and computed state, returning the engine to its state right after
    /// construction. Allocated buffers are kept and reused.
    pub fn reset(&mut self) {
        self.a.set_zero();
        self.b.clear();
        self.constraint_types.clear();
        self.variables.truncate(self.nr_structural);
        for variable in &mut self.variables {
            variable.cost = F::zero();
        }
        self.kind_counts = EnumMap::default();
        self.kind_counts[VariableKind::Structural] = self.nr_structural;
        self.nr_columns = self.nr_structural;
        self.nr_rows_taken = 0;
        self.initialized = false;

        self.basic.clear();
        self.nonbasic.clear();
        for value in &mut self.x {
            *value = F::zero();
        }
        self.reduced_cost.clear();

        self.current_step = Step::RebuildBasis;
        self.finished = None;
        self.entering = 0;
        self.leaving = 0;
        self.min_ratio = F::zero();
        self.nr_min_ratio = 0;
        self.nr_iterations = 0;

        self.objective = Objective::default();
        self.original_objective = Objective::default();
        self.original_cost.clear();
        self.artificial_added = false;
        self.nr_basic_artificials = 0;
    }

    /// The step the state machine will execute next.
    pub fn current_step(&self) -> Step {
        self.current_step
    }

    /// The terminal status, if the engine reached one.
    pub fn status(&self) -> Option<IterationStatus> {
        self.finished
    }

    /// Position into the nonbasic sequence of the entering variable.
    ///
    /// Meaningful from [`Step::ConfirmEntering`] until the end of the iteration.
    pub fn entering(&self) -> usize {
        self.entering
    }

    /// Row of the leaving variable.
    ///
    /// Meaningful from [`Step::BreakTie`]/[`Step::ConfirmLeaving`] until the end of the
    /// iteration.
    pub fn leaving(&self) -> usize {
        self.leaving
    }

    /// Result of the last minimum-ratio test.
    pub fn min_ratio(&self) -> F {
        self.min_ratio
    }

    /// How many rows attained the minimum ratio in the last ratio test.
    ///
    /// A value larger than one indicates a degenerate tie; the state machine pauses at
    /// [`Step::BreakTie`] in that case.
    pub fn nr_min_ratio(&self) -> usize {
        self.nr_min_ratio
    }

    /// Reduced costs, one entry per nonbasic position.
    pub fn reduced_costs(&self) -> &[F] {
        &self.reduced_cost
    }

    /// Update direction of the entering column in the current basis.
    pub fn direction(&self) -> &[F] {
        &self.direction
    }

    /// Simplex multipliers of the current basis.
    pub fn multipliers(&self) -> &[F] {
        &self.multipliers
    }

    /// Column indices of the basic variables, one per row.
    pub fn basic_variables(&self) -> &[usize] {
        &self.basic
    }

    /// Column indices of the nonbasic variables.
    pub fn nonbasic_variables(&self) -> &[usize] {
        &self.nonbasic
    }

    /// Value per column: the basic value for basic variables, zero for nonbasic ones.
    pub fn basic_solution(&self) -> Vec<F> {
        let mut solution = vec![F::zero(); self.nr_columns];
        for (row, &column) in self.basic.iter().enumerate() {
            // A column beyond the count is an artificial stuck at zero level after repair.
            if column < self.nr_columns {
                solution[column] = self.x[row];
            }
        }
        solution
    }

    /// Whether initialization had to add artificial variables that are not yet eliminated.
    pub fn artificial_added(&self) -> bool {
        self.artificial_added
    }

    /// Number of iterations started so far.
    pub fn nr_iterations(&self) -> usize {
        self.nr_iterations
    }

    /// Total number of columns currently part of the problem.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Append a column to the augmented matrix with a single nonzero coefficient.
    fn append_column(&mut self, row: usize, coefficient: F, kind: VariableKind) -> usize {
        let column = self.variables.len();
        self.a[(row, column)] = coefficient;
        self.variables.push(Variable { cost: F::zero(), kind });
        self.kind_counts[kind] += 1;
        column
    }

    /// Cache the true costs and install the phase-one objective: minimize the sum of the
    /// artificial variables.
    fn install_feasibility_objective(&mut self) {
        self.original_cost = self.variables.iter().map(|variable| variable.cost).collect();
        for variable in &mut self.variables {
            variable.cost = if variable.kind == VariableKind::Artificial {
                F::one()
            } else {
                F::zero()
            };
        }
        self.objective = Objective::Minimize;
    }

    /// Rebuild the basis matrix, its transpose and the basic cost vector from the current basis.
    fn rebuild_basis(&mut self) {
        for i in 0..self.nr_constraints {
            let column = self.basic[i];
            self.cost_of_basic[i] = self.variables[column].cost;
            for j in 0..self.nr_constraints {
                self.basis[(i, j)] = self.a[(i, self.basic[j])];
                self.basis_transpose[(i, j)] = self.a[(j, column)];
            }
        }
    }

    /// Solve `Bᵀ π = c_B` for the simplex multipliers.
    fn compute_multipliers(&mut self) -> Result<(), SingularMatrix> {
        self.solver.solve(&self.basis_transpose, &self.cost_of_basic, &mut self.multipliers)
    }

    /// Reduced cost per nonbasic position: `c_j − π · a_j`.
    fn price_nonbasic(&mut self) {
        for (position, &column) in self.nonbasic.iter().enumerate() {
            self.a.copy_column_into(column, &mut self.column_buffer);
            self.reduced_cost[position] =
                self.variables[column].cost - dot(&self.multipliers, &self.column_buffer);
        }
    }

    /// The current basis is optimal iff no reduced cost is negative.
    fn is_optimal(&self) -> bool {
        self.reduced_cost.iter().all(|&cost| cost >= F::zero())
    }

    /// Automatic entering choice: the most negative reduced cost, first position on ties.
    fn select_entering(&self) -> usize {
        let mut choice = 0;
        let mut most_negative = F::zero();
        for (position, &cost) in self.reduced_cost.iter().enumerate() {
            if cost < most_negative {
                most_negative = cost;
                choice = position;
            }
        }
        debug_assert!(most_negative < F::zero());

        choice
    }

    /// Solve `B y = a_j` for the update direction of the entering column.
    fn compute_direction(&mut self) -> Result<(), SingularMatrix> {
        let column = self.nonbasic[self.entering];
        self.a.copy_column_into(column, &mut self.column_buffer);
        self.solver.solve(&self.basis, &self.column_buffer, &mut self.direction)
    }

    /// The problem is unbounded iff no entry of the direction is positive.
    fn is_unbounded(&self) -> bool {
        self.direction.iter().all(|&value| value <= F::zero())
    }

    /// Minimum-ratio test over the rows with a positive direction entry.
    ///
    /// Records the minimum, the first row attaining it and the number of rows attaining it. Ties
    /// are a real possibility under degeneracy and are exposed rather than silently broken.
    fn ratio_test(&mut self) {
        self.nr_min_ratio = 0;
        let mut selected = 0;
        for (row, (&value, &step)) in izip!(&self.x, &self.direction).enumerate() {
            if step > F::zero() {
                let ratio = value / step;
                if self.nr_min_ratio == 0 || ratio < self.min_ratio {
                    self.min_ratio = ratio;
                    selected = row;
                    self.nr_min_ratio = 1;
                } else if ratio == self.min_ratio {
                    self.nr_min_ratio += 1;
                }
            }
        }
        debug_assert!(self.nr_min_ratio > 0);

        self.leaving = selected;
    }

    /// Apply the pivot: update the basic values and exchange the entering and leaving variables
    /// between the two index sequences.
    fn update_solution(&mut self) {
        let ratio = self.min_ratio;
        for (value, &step) in izip!(&mut self.x, &self.direction) {
            *value = *value - ratio * step;
        }
        self.x[self.leaving] = ratio;

        let entering_column = self.nonbasic[self.entering];
        let leaving_column = self.basic[self.leaving];
        if self.variables[leaving_column].kind == VariableKind::Artificial {
            self.nr_basic_artificials -= 1;
        }
        if self.variables[entering_column].kind == VariableKind::Artificial {
            self.nr_basic_artificials += 1;
        }

        self.basic[self.leaving] = entering_column;
        self.nonbasic[self.entering] = leaving_column;
        trace!(
            "column {} entered the basis at row {}, column {} left",
            entering_column, self.leaving, leaving_column,
        );
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::algorithm::IterationStatus;
    use crate::algorithm::revised_simplex::RevisedSimplex;
    use crate::algorithm::revised_simplex::error::ModelError;
    use crate::data::linear_algebra::dot;
    use crate::data::linear_program::elements::{ConstraintType, Objective, VariableKind};
    use crate::tests::{problem_1, problem_2};

    /// Guard against cycling; all test problems converge in far fewer iterations.
    const MAX_ITERATIONS: usize = 50;

    fn solve_current_phase(engine: &mut RevisedSimplex<f64>) -> IterationStatus {
        for _ in 0..MAX_ITERATIONS {
            let status = engine.iterate().unwrap();
            if status != IterationStatus::Continue {
                return status;
            }
        }
        panic!("no convergence within {} iterations", MAX_ITERATIONS);
    }

    #[test]
    fn building_contracts() {
        let mut engine = RevisedSimplex::new(2, 1);

        assert_eq!(
            engine.add_constraint(&[1_f64], 4_f64, ConstraintType::Less),
            Err(ModelError::CoefficientCount { expected: 2, actual: 1 }),
        );
        assert_eq!(
            engine.set_objective(&[1_f64, 1_f64, 1_f64], Objective::Minimize),
            Err(ModelError::CoefficientCount { expected: 2, actual: 3 }),
        );
        assert_eq!(
            engine.initialize(),
            Err(ModelError::MissingConstraints { declared: 1, taken: 0 }),
        );

        engine.add_constraint(&[1_f64, 1_f64], 4_f64, ConstraintType::Less).unwrap();
        assert_eq!(
            engine.add_constraint(&[1_f64, 1_f64], 4_f64, ConstraintType::Less),
            Err(ModelError::TooManyConstraints { declared: 1 }),
        );

        engine.initialize().unwrap();
        assert_eq!(engine.initialize(), Err(ModelError::AlreadyInitialized));
        assert_eq!(
            engine.set_objective(&[1_f64, 1_f64], Objective::Minimize),
            Err(ModelError::AlreadyInitialized),
        );
    }

    #[test]
    fn initial_basis_of_slack_problem() {
        let engine = problem_1::initialized_engine();

        // Both rows are `<=` with nonnegative right-hand sides: the slacks form the basis.
        assert_eq!(engine.basic_variables(), &[2, 3]);
        assert_eq!(engine.nonbasic_variables(), &[0, 1]);
        assert_eq!(engine.nr_columns(), 4);
        assert!(!engine.artificial_added());
    }

    #[test]
    fn immediately_optimal() {
        let mut engine = RevisedSimplex::new(2, 1);
        engine.add_constraint(&[1_f64, 1_f64], 4_f64, ConstraintType::Less).unwrap();
        engine.set_objective(&[1_f64, 1_f64], Objective::Minimize).unwrap();
        engine.initialize().unwrap();

        assert_eq!(engine.iterate().unwrap(), IterationStatus::OptimalForPhase);
        assert_relative_eq!(engine.objective_value(), 0_f64);
        assert_eq!(engine.basic_solution()[..2], [0_f64, 0_f64]);
    }

    #[test]
    fn bounded_maximization() {
        let mut engine = problem_1::initialized_engine();

        assert_eq!(solve_current_phase(&mut engine), IterationStatus::OptimalForPhase);
        assert_relative_eq!(engine.objective_value(), 12_f64);

        let solution = engine.basic_solution();
        assert_relative_eq!(solution[0], 4_f64);
        assert_relative_eq!(solution[1], 0_f64);
    }

    #[test]
    fn objective_round_trip() {
        let mut engine = problem_1::initialized_engine();
        solve_current_phase(&mut engine);

        // Substituting the reported solution into the original coefficients must reproduce the
        // reported objective value.
        let solution = engine.basic_solution();
        assert_relative_eq!(dot(&solution[..2], &problem_1::COST), engine.objective_value());
    }

    #[test]
    fn two_phases() {
        let mut engine = problem_2::initialized_engine();
        assert!(engine.artificial_added());
        assert_eq!(
            engine.basic_variables().iter().filter(|&&column| column >= 4).count(),
            1,
        );

        // First phase: drive the artificial variable out.
        assert_eq!(solve_current_phase(&mut engine), IterationStatus::OptimalForPhase);
        assert_relative_eq!(engine.objective_value(), 0_f64);

        engine.eliminate_artificials().unwrap();
        assert!(!engine.artificial_added());
        assert_eq!(engine.nr_columns(), 4);

        // Second phase: the restored objective is optimized.
        assert_eq!(solve_current_phase(&mut engine), IterationStatus::OptimalForPhase);
        assert_relative_eq!(engine.objective_value(), 2_f64);

        let solution = engine.basic_solution();
        assert_relative_eq!(solution[0] + solution[1], 2_f64);
    }

    #[test]
    fn infeasible_program() {
        let mut engine = RevisedSimplex::new(2, 2);
        engine.add_constraint(&[1_f64, 1_f64], 1_f64, ConstraintType::Less).unwrap();
        engine.add_constraint(&[1_f64, 1_f64], 3_f64, ConstraintType::Greater).unwrap();
        engine.set_objective(&[1_f64, 0_f64], Objective::Minimize).unwrap();
        engine.initialize().unwrap();
        assert!(engine.artificial_added());

        assert_eq!(solve_current_phase(&mut engine), IterationStatus::OptimalForPhase);
        // A strictly positive phase-one objective is the driver's infeasibility signal.
        assert!(engine.objective_value() > 0_f64);
    }

    #[test]
    fn redundant_constraint_triggers_repair() {
        let mut engine = RevisedSimplex::new(2, 2);
        engine.add_constraint(&[1_f64, 1_f64], 2_f64, ConstraintType::Equal).unwrap();
        engine.add_constraint(&[2_f64, 2_f64], 4_f64, ConstraintType::Equal).unwrap();
        engine.set_objective(&[1_f64, 0_f64], Objective::Minimize).unwrap();
        engine.initialize().unwrap();
        assert!(engine.artificial_added());

        assert_eq!(solve_current_phase(&mut engine), IterationStatus::OptimalForPhase);
        assert_relative_eq!(engine.objective_value(), 0_f64);
        // Both rows are equalities, so the artificial columns are 2 and 3; the redundant second
        // row leaves one of them basic at zero level.
        assert!(engine
            .basic_variables()
            .iter()
            .any(|&column| column >= 2));

        engine.eliminate_artificials().unwrap();
        assert_eq!(solve_current_phase(&mut engine), IterationStatus::OptimalForPhase);
        assert_relative_eq!(engine.objective_value(), 0_f64);

        let solution = engine.basic_solution();
        assert_relative_eq!(solution[0], 0_f64);
        assert_relative_eq!(solution[1], 2_f64);
    }

    #[test]
    fn reset_allows_reuse() {
        let mut engine = problem_1::initialized_engine();
        solve_current_phase(&mut engine);

        engine.reset();
        assert_eq!(engine.nr_iterations(), 0);
        assert_eq!(engine.status(), None);

        engine.add_constraint(&[1_f64, 1_f64], 10_f64, ConstraintType::Less).unwrap();
        engine.add_constraint(&[1_f64, 0_f64], 7_f64, ConstraintType::Less).unwrap();
        engine.set_objective(&[1_f64, 0_f64], Objective::Maximize).unwrap();
        engine.initialize().unwrap();

        assert_eq!(solve_current_phase(&mut engine), IterationStatus::OptimalForPhase);
        assert_relative_eq!(engine.objective_value(), 7_f64);
    }

    #[test]
    fn kind_assignment() {
        let mut engine = RevisedSimplex::new(1, 3);
        engine.add_constraint(&[1_f64], 5_f64, ConstraintType::Less).unwrap();
        engine.add_constraint(&[1_f64], 1_f64, ConstraintType::Greater).unwrap();
        engine.add_constraint(&[1_f64], 3_f64, ConstraintType::Equal).unwrap();
        engine.set_objective(&[1_f64], Objective::Minimize).unwrap();
        engine.initialize().unwrap();

        // Column 0 structural, 1 slack, 2 surplus, then artificials for rows 1 and 2.
        assert_eq!(engine.kind_counts[VariableKind::Structural], 1);
        assert_eq!(engine.kind_counts[VariableKind::Slack], 2);
        assert_eq!(engine.kind_counts[VariableKind::Artificial], 2);
        assert_eq!(engine.nr_columns(), 5);
    }
}
